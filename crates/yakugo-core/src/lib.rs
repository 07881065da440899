pub mod admin;
pub mod cancel;
pub mod error;
pub mod lookup;
pub mod merge;
pub mod store;


pub use admin::AdminResolver;
pub use error::{BoxError, Error, Result};
pub use lookup::LookupResolver;
pub use store::{CachedCandidates, CustomTranslationStore, ProviderCacheStore, RepositoryFactory};
