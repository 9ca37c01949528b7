//! Request validation and password hashing shared by the handlers.

mod password;
mod validation;
pub use password::hash_password;
#[cfg(test)]
pub use password::verify_password;
pub use validation::{Check, FieldRules, RequestValidator};
