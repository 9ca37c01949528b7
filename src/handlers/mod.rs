//! HTTP handlers, one module per resource.

pub mod applications;
pub mod plans;
pub mod posts;
pub mod users;

use crate::error::AppError;

/// Path ids are 32-bit integers; anything else is rejected before the store is touched.
pub(crate) fn parse_id(id_str: &str, resource: &str) -> Result<i32, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid {} ID", resource)))
}
