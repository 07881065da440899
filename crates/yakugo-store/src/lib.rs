pub mod custom;
pub mod factory;
pub mod provider_cache;
pub mod snapshot;
mod table;

pub use custom::MemoryCustomStore;
pub use factory::MemoryRepositoryFactory;
pub use provider_cache::MemoryProviderCache;
pub use snapshot::JsonSnapshot;
