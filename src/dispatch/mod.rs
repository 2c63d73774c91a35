//! Outbound relay pipeline: recognize, validate, sign, send.

pub mod recognizer;
pub mod relay;
pub mod signer;
pub mod transport;

pub use recognizer::{Document, EnvelopeRecognizer, IncomingFile, Recognizer};
pub use relay::{FileRelay, Outcome, RelayPolicy};
pub use signer::{HmacSigner, Signer};
pub use transport::{OutboxTransport, Transport};
