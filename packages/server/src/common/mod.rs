// Common types shared across domains

pub mod entity_ids;
pub mod errors;
pub mod id;

pub use entity_ids::*;
pub use errors::{AppError, AppResult};
pub use id::Id;
