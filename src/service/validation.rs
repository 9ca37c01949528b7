//! Request validation from declarative per-field rules.

use crate::error::{AppError, FieldError};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("email pattern is valid")
});

/// A single check applied to one field value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Check {
    /// Present and non-blank. Strings are trimmed; numbers and booleans become their text.
    NotEmpty,
    String,
    /// Integer in `i32` range; numeric strings are parsed.
    Int,
    /// Finite number strictly greater than zero; numeric strings are parsed.
    PositiveFloat,
    Email,
    /// String with at least this many characters.
    MinLength(usize),
    /// `true`/`false`, also as the strings `"true"`, `"false"`, `"1"`, `"0"`.
    Boolean,
}

/// Ordered checks for one field, each paired with the message reported when it fails.
#[derive(Clone, Copy, Debug)]
pub struct FieldRules {
    pub field: &'static str,
    /// Absent or `null` values skip every check.
    pub optional: bool,
    pub checks: &'static [(Check, &'static str)],
}

impl FieldRules {
    pub const fn required(field: &'static str, checks: &'static [(Check, &'static str)]) -> Self {
        FieldRules {
            field,
            optional: false,
            checks,
        }
    }

    pub const fn optional(field: &'static str, checks: &'static [(Check, &'static str)]) -> Self {
        FieldRules {
            field,
            optional: true,
            checks,
        }
    }
}

pub struct RequestValidator;

impl RequestValidator {
    /// Run every rule against `body`. All failing fields are reported, at most
    /// one error per field, in rule order. On success returns the body with
    /// normalized values.
    pub fn validate(mut body: Map<String, Value>, rules: &[FieldRules]) -> Result<Map<String, Value>, AppError> {
        let mut errors = Vec::new();
        for rule in rules {
            let value = body.get(rule.field).cloned().unwrap_or(Value::Null);
            if rule.optional && value.is_null() {
                continue;
            }
            match apply_checks(value, rule.checks) {
                Ok(normalized) => {
                    body.insert(rule.field.to_string(), normalized);
                }
                Err(message) => errors.push(FieldError::new(rule.field, message)),
            }
        }
        if errors.is_empty() {
            Ok(body)
        } else {
            Err(AppError::Validation(errors))
        }
    }

    /// Validate, then deserialize the normalized body into a typed input.
    pub fn extract<T: DeserializeOwned>(body: Map<String, Value>, rules: &[FieldRules]) -> Result<T, AppError> {
        let body = Self::validate(body, rules)?;
        serde_json::from_value(Value::Object(body)).map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e)))
    }
}

fn apply_checks(mut value: Value, checks: &[(Check, &'static str)]) -> Result<Value, &'static str> {
    for (check, message) in checks {
        value = apply(*check, value).ok_or(*message)?;
    }
    Ok(value)
}

fn apply(check: Check, value: Value) -> Option<Value> {
    match check {
        Check::NotEmpty => match value {
            Value::String(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| Value::String(trimmed.to_string()))
            }
            Value::Number(n) => Some(Value::String(n.to_string())),
            Value::Bool(b) => Some(Value::String(b.to_string())),
            _ => None,
        },
        Check::String => value.is_string().then_some(value),
        Check::Int => parse_int(&value).map(|n| Value::Number(n.into())),
        Check::PositiveFloat => parse_float(&value)
            .filter(|f| f.is_finite() && *f > 0.0)
            .and_then(Number::from_f64)
            .map(Value::Number),
        Check::Email => value.as_str().is_some_and(|s| EMAIL.is_match(s)).then_some(value),
        Check::MinLength(min) => value.as_str().is_some_and(|s| s.chars().count() >= min).then_some(value),
        Check::Boolean => match value {
            Value::Bool(b) => Some(Value::Bool(b)),
            Value::String(s) => match s.as_str() {
                "true" | "1" => Some(Value::Bool(true)),
                "false" | "0" => Some(Value::Bool(false)),
                _ => None,
            },
            _ => None,
        },
    }
}

fn parse_int(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return i32::try_from(i).ok();
            }
            let f = n.as_f64()?;
            if f.fract() == 0.0 && f >= f64::from(i32::MIN) && f <= f64::from(i32::MAX) {
                Some(f as i32)
            } else {
                None
            }
        }
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn parse_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
