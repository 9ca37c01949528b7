//! Rows and inputs for the four resources. JSON field names are camelCase.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct Application {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewApplication {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: i32,
    pub duration: String,
    pub price: f64,
    pub note: Option<String>,
    pub application_id: i32,
}

/// The owning application as embedded in plan listings.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ApplicationRef {
    pub id: i32,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlanListing {
    pub id: i32,
    pub duration: String,
    pub price: f64,
    pub note: Option<String>,
    pub application: ApplicationRef,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlan {
    pub duration: String,
    pub price: f64,
    #[serde(default)]
    pub note: Option<String>,
    pub application_id: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub author_id: i32,
}

/// Listing projection; the author is not exposed.
#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct PostSummary {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub published: bool,
}

impl From<Post> for PostSummary {
    fn from(p: Post) -> Self {
        PostSummary {
            id: p.id,
            title: p.title,
            content: p.content,
            published: p.published,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author_id: i32,
}

/// Partial update. `None` means the field was absent and stays untouched;
/// `Some(false)` for `published` is applied like any other value.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct PostChanges {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub published: Option<bool>,
}

/// Public view of a user. The password hash never leaves the store.
#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
}

/// Not `Debug`, so the plaintext password cannot end up in logs.
#[derive(Clone, Deserialize)]
pub struct UserSignup {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// What the store persists for a new user.
#[derive(Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}
