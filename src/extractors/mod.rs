mod json;
pub use json::JsonObject;
