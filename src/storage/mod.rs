// In-memory storage: TTL cache for source results.

pub mod cache;

pub use cache::DataCache;
