//! In-memory store and request helpers for handler tests.

use crate::config::PaginationConfig;
use crate::models::{
    Application, ApplicationRef, NewApplication, NewPlan, NewPost, NewUser, Plan, PlanListing, Post, PostChanges,
    PostSummary, User,
};
use crate::pagination::Page;
use crate::state::AppState;
use crate::store::{Store, StoreError};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

#[derive(Default)]
struct Tables {
    next_id: i32,
    applications: Vec<Application>,
    plans: Vec<Plan>,
    posts: Vec<Post>,
    users: Vec<(User, String)>,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

/// Mirrors the constraints of the PostgreSQL schema: unique application
/// names and user emails, foreign keys from plans and posts.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn plan_count(&self) -> usize {
        self.tables.lock().unwrap().plans.len()
    }

    pub fn user_count(&self) -> usize {
        self.tables.lock().unwrap().users.len()
    }

    pub fn password_hash(&self, email: &str) -> Option<String> {
        let tables = self.tables.lock().unwrap();
        tables.users.iter().find(|(u, _)| u.email == email).map(|(_, h)| h.clone())
    }
}

fn page_of<T: Clone>(rows: &[T], page: Page) -> Vec<T> {
    rows.iter()
        .skip(usize::try_from(page.skip).unwrap_or(usize::MAX))
        .take(usize::try_from(page.take).unwrap_or(0))
        .cloned()
        .collect()
}

fn take_by_id<T>(rows: &mut Vec<T>, id: impl Fn(&T) -> bool) -> Result<T, StoreError> {
    let index = rows.iter().position(id).ok_or(StoreError::NotFound)?;
    Ok(rows.remove(index))
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn list_applications(&self, page: Page) -> Result<Vec<Application>, StoreError> {
        Ok(page_of(&self.tables.lock().unwrap().applications, page))
    }

    async fn create_application(&self, new: NewApplication) -> Result<Application, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.applications.iter().any(|a| a.name == new.name) {
            return Err(StoreError::UniqueViolation("applications_name_key".into()));
        }
        let row = Application {
            id: tables.next_id(),
            name: new.name,
            description: new.description,
        };
        tables.applications.push(row.clone());
        Ok(row)
    }

    async fn delete_application(&self, id: i32) -> Result<Application, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        let row = take_by_id(&mut tables.applications, |a| a.id == id)?;
        tables.plans.retain(|p| p.application_id != id);
        Ok(row)
    }

    async fn list_plans(&self, page: Page) -> Result<Vec<PlanListing>, StoreError> {
        let tables = self.tables.lock().unwrap();
        let listings: Vec<PlanListing> = tables
            .plans
            .iter()
            .filter_map(|p| {
                let app = tables.applications.iter().find(|a| a.id == p.application_id)?;
                Some(PlanListing {
                    id: p.id,
                    duration: p.duration.clone(),
                    price: p.price,
                    note: p.note.clone(),
                    application: ApplicationRef {
                        id: app.id,
                        name: app.name.clone(),
                    },
                })
            })
            .collect();
        Ok(page_of(&listings, page))
    }

    async fn create_plan(&self, new: NewPlan) -> Result<Plan, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.applications.iter().any(|a| a.id == new.application_id) {
            return Err(StoreError::ForeignKeyViolation("plans_application_id_fkey".into()));
        }
        let row = Plan {
            id: tables.next_id(),
            duration: new.duration,
            price: new.price,
            note: new.note,
            application_id: new.application_id,
        };
        tables.plans.push(row.clone());
        Ok(row)
    }

    async fn delete_plan(&self, id: i32) -> Result<Plan, StoreError> {
        take_by_id(&mut self.tables.lock().unwrap().plans, |p| p.id == id)
    }

    async fn list_posts(&self, page: Page) -> Result<Vec<PostSummary>, StoreError> {
        let tables = self.tables.lock().unwrap();
        let rows: Vec<PostSummary> = tables.posts.iter().cloned().map(PostSummary::from).collect();
        Ok(page_of(&rows, page))
    }

    async fn create_post(&self, new: NewPost) -> Result<Post, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.users.iter().any(|(u, _)| u.id == new.author_id) {
            return Err(StoreError::ForeignKeyViolation("posts_author_id_fkey".into()));
        }
        let row = Post {
            id: tables.next_id(),
            title: new.title,
            content: new.content,
            published: false,
            author_id: new.author_id,
        };
        tables.posts.push(row.clone());
        Ok(row)
    }

    async fn update_post(&self, id: i32, changes: PostChanges) -> Result<Option<Post>, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        let Some(post) = tables.posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        if let Some(title) = changes.title {
            post.title = title;
        }
        if let Some(content) = changes.content {
            post.content = content;
        }
        if let Some(published) = changes.published {
            post.published = published;
        }
        Ok(Some(post.clone()))
    }

    async fn delete_post(&self, id: i32) -> Result<Post, StoreError> {
        take_by_id(&mut self.tables.lock().unwrap().posts, |p| p.id == id)
    }

    async fn list_users(&self, page: Page) -> Result<Vec<User>, StoreError> {
        let tables = self.tables.lock().unwrap();
        let rows: Vec<User> = tables.users.iter().map(|(u, _)| u.clone()).collect();
        Ok(page_of(&rows, page))
    }

    async fn create_user(&self, new: NewUser) -> Result<User, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.users.iter().any(|(u, _)| u.email == new.email) {
            return Err(StoreError::UniqueViolation("users_email_key".into()));
        }
        let row = User {
            id: tables.next_id(),
            name: new.name,
            email: new.email,
        };
        tables.users.push((row.clone(), new.password_hash));
        Ok(row)
    }

    async fn delete_user(&self, id: i32) -> Result<User, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.posts.iter().any(|p| p.author_id == id) {
            return Err(StoreError::ForeignKeyViolation("posts_author_id_fkey".into()));
        }
        take_by_id(&mut tables.users, |(u, _)| u.id == id).map(|(u, _)| u)
    }
}

/// Full router over a fresh in-memory store.
pub fn test_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let state = AppState::new(store.clone(), PaginationConfig::default());
    (crate::app(state, 64 * 1024), store)
}

/// Send one request; returns the status and the JSON body (`Null` when empty).
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn create(app: &Router, uri: &str, body: Value) -> Value {
    let (status, json) = send(app, Method::POST, uri, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "create {uri} failed: {json}");
    json["data"].clone()
}
