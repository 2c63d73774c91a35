//! File recognition: turning raw submissions into documents.
//!
//! A submission arrives as an opaque named byte blob. The recognizer
//! decides whether it is a document the relay understands; anything it
//! cannot make sense of is simply "not recognized" (the relay skips it),
//! never a hard error.

use base64::Engine;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

/// A raw file submitted for relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingFile {
    pub name: String,
    pub content: Vec<u8>,
}

impl IncomingFile {
    pub fn new(name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content,
        }
    }
}

/// A recognized document ready for validation and signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub name: String,
    pub content: Vec<u8>,
    pub created: DateTime<Utc>,
    pub format: String,
}

/// Turns an [`IncomingFile`] into a [`Document`], or declines.
#[cfg_attr(test, mockall::automock)]
pub trait Recognizer {
    /// `None` means "not a document we understand"; the file is skipped.
    fn recognize(&self, file: &IncomingFile) -> Option<Document>;
}

/// JSON envelope wire form. Content travels base64-encoded.
#[derive(Debug, Deserialize)]
struct Envelope {
    name: String,
    format: String,
    created: DateTime<Utc>,
    content_b64: String,
}

/// Recognizer for the JSON envelope format.
pub struct EnvelopeRecognizer;

impl Recognizer for EnvelopeRecognizer {
    fn recognize(&self, file: &IncomingFile) -> Option<Document> {
        let envelope: Envelope = match serde_json::from_slice(&file.content) {
            Ok(envelope) => envelope,
            Err(e) => {
                debug!(file = %file.name, "Not a document envelope: {}", e);
                return None;
            }
        };
        let content = match base64::engine::general_purpose::STANDARD.decode(&envelope.content_b64)
        {
            Ok(content) => content,
            Err(e) => {
                debug!(file = %file.name, "Envelope content is not valid base64: {}", e);
                return None;
            }
        };
        Some(Document {
            name: envelope.name,
            content,
            created: envelope.created,
            format: envelope.format,
        })
    }
}
