//! Delivery transports.
//!
//! `try_send` reports success as a plain bool: the relay treats a failed
//! send as "skip this file", not as a pipeline error. Transports log their
//! own failure detail.

use std::path::PathBuf;

use tracing::{debug, warn};

/// Delivers signed document bytes to their destination.
#[cfg_attr(test, mockall::automock)]
pub trait Transport {
    /// Attempt delivery. `false` means the file should be reported skipped.
    fn try_send(&self, doc_name: &str, signed: &[u8]) -> bool;
}

/// Transport that spools signed documents into an outbox directory.
///
/// Delivery is a single file write of `<outbox>/<doc_name>.signed`. A
/// downstream forwarder drains the directory.
pub struct OutboxTransport {
    outbox: PathBuf,
}

impl OutboxTransport {
    pub fn new(outbox: impl Into<PathBuf>) -> Self {
        Self {
            outbox: outbox.into(),
        }
    }

    fn spool_path(&self, doc_name: &str) -> PathBuf {
        // Flatten path separators so a document name can never escape the
        // outbox directory.
        let safe: String = doc_name
            .chars()
            .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
            .collect();
        self.outbox.join(format!("{safe}.signed"))
    }
}

impl Transport for OutboxTransport {
    fn try_send(&self, doc_name: &str, signed: &[u8]) -> bool {
        if let Err(e) = std::fs::create_dir_all(&self.outbox) {
            warn!(doc = doc_name, "Failed to create outbox: {}", e);
            return false;
        }
        let path = self.spool_path(doc_name);
        match std::fs::write(&path, signed) {
            Ok(()) => {
                debug!(doc = doc_name, path = %path.display(), "Spooled to outbox");
                true
            }
            Err(e) => {
                warn!(doc = doc_name, "Failed to spool document: {}", e);
                false
            }
        }
    }
}
