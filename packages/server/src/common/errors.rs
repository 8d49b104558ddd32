use thiserror::Error;

/// Failure taxonomy shared by every route.
///
/// Messages carried by `NotFound` and `InvalidState` are shown to the caller
/// verbatim, so they are written in the product's locale. Wrapped
/// `anyhow` errors are logged and never rendered.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Persistence error: {0}")]
    Persistence(#[from] anyhow::Error),

    #[error("Generation error: {0}")]
    Generation(anyhow::Error),
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;

/// User-facing messages.
pub mod messages {
    pub const CONTENT_NOT_FOUND: &str = "콘텐츠를 찾을 수 없습니다.";
    pub const ADVERTISER_NOT_FOUND: &str = "광고주를 찾을 수 없습니다.";
    pub const NOTIFICATION_NOT_FOUND: &str = "알림을 찾을 수 없습니다.";
    pub const MISSING_CONTACT_PHONE: &str = "광고주 담당자 연락처가 등록되지 않았습니다.";
    pub const ALREADY_PROCESSED: &str = "이미 처리된 콘텐츠입니다.";
    pub const CONFIRM_NOT_ALLOWED: &str = "컨펌 요청을 보낼 수 없는 상태입니다.";
    pub const EDIT_NOT_ALLOWED: &str = "수정할 수 없는 상태의 콘텐츠입니다.";
    pub const PUBLISH_NOT_ALLOWED: &str = "승인된 콘텐츠만 발행할 수 있습니다.";
    pub const INVALID_REQUEST: &str = "잘못된 요청입니다.";
    pub const NAME_REQUIRED: &str = "광고주 이름을 입력해주세요.";
    pub const TITLE_REQUIRED: &str = "제목을 입력해주세요.";
    pub const LOGIN_REQUIRED: &str = "로그인이 필요합니다.";
    pub const INTERNAL: &str = "요청을 처리하는 중 오류가 발생했습니다.";
    pub const GENERATION_FAILED: &str = "AI 콘텐츠 생성에 실패했습니다.";
}
