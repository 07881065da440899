#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    #[error("Invalid language code: {0:?}")]
    InvalidLanguageCode(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
