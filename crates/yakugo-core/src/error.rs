use yakugo_translator::TranslateError;
use yakugo_types::TypeError;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid language code: {0:?}")]
    InvalidLanguageCode(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Translation not found")]
    TranslationNotFound,

    #[error("Translation already exists")]
    TranslationAlreadyExists,

    /// Another writer cached the same (lang, text) first
    #[error("Provider cache entry already exists")]
    CacheEntryAlreadyExists,

    #[error("Provider error: {0}")]
    Provider(#[from] TranslateError),

    #[error("{context}: {source}")]
    Storage {
        context: String,
        #[source]
        source: BoxError,
    },

    #[error("Operation cancelled")]
    Cancelled,
}

impl Error {
    pub fn storage(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Error::Storage {
            context: context.into(),
            source: source.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::TranslationNotFound)
    }
}

impl From<TypeError> for Error {
    fn from(value: TypeError) -> Self {
        match value {
            TypeError::InvalidLanguageCode(code) => Error::InvalidLanguageCode(code),
            TypeError::InvalidArgument(message) => Error::InvalidArgument(message),
        }
    }
}
