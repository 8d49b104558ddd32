pub mod activities;
pub mod models;
pub mod prompts;

pub use models::{Channel, ConfirmAction, Content, ContentStatus, PreviewToken};
