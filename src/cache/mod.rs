//! Memoizing lookup cache over the recipient directory.

pub mod directory;
pub mod lookup_cache;

pub use directory::{FileDirectory, RecipientRecord};
pub use lookup_cache::{CacheStats, LookupCache, RecordSource};
