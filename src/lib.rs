//! docrelay: outbound signed-document relay.
//!
//! Two halves:
//! - [`dispatch`]: the relay pipeline. Raw files are recognized into
//!   documents, checked against the acceptance policy (format version,
//!   freshness), HMAC-signed, and handed to a transport. Files failing any
//!   step are reported as skipped.
//! - [`cache`]: a memoizing [`LookupCache`](cache::LookupCache) in front of
//!   the recipient directory, populating lazily on miss and never caching
//!   "not found".
//!
//! The crate is synchronous throughout; callers needing concurrency wrap
//! it themselves.

pub mod cache;
pub mod config;
pub mod dispatch;
pub mod error;

pub use error::{RelayError, Result};
