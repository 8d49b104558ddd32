pub mod confirm;
pub mod drafts;
pub mod generate;
pub mod publish;

pub use confirm::{request_confirm, respond_to_confirm, view_preview, ConfirmRequestResult};
pub use drafts::{create_draft, delete_draft, update_draft, ContentEdit, CreateContentInput};
pub use generate::{generate_draft, GenerateDraftInput};
pub use publish::publish_content;
