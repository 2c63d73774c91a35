//! The relay pipeline: recognize, validate, sign, send.
//!
//! Each file runs the pipeline independently; a file that fails any step is
//! collected into the outcome's `skipped` list and never affects its
//! neighbors.

use chrono::{Months, Utc};
use tracing::debug;

use crate::config::RelayConfig;

use super::recognizer::{Document, IncomingFile, Recognizer};
use super::signer::Signer;
use super::transport::Transport;

/// Result of a relay run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Files that were not sent, in input order.
    pub skipped: Vec<IncomingFile>,
}

impl Outcome {
    /// `true` when every file went out.
    pub fn all_sent(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Acceptance policy alias; the relay consumes the config section directly.
pub type RelayPolicy = RelayConfig;

/// Drives files through recognize -> validate -> sign -> send.
pub struct FileRelay<R, S, T> {
    recognizer: R,
    signer: S,
    transport: T,
    policy: RelayPolicy,
}

impl<R: Recognizer, S: Signer, T: Transport> FileRelay<R, S, T> {
    pub fn new(recognizer: R, signer: S, transport: T, policy: RelayPolicy) -> Self {
        Self {
            recognizer,
            signer,
            transport,
            policy,
        }
    }

    /// Relay a batch of files, returning the ones that were skipped.
    pub fn send_files(&self, files: &[IncomingFile]) -> Outcome {
        Outcome {
            skipped: files
                .iter()
                .filter(|file| !self.try_send_file(file))
                .cloned()
                .collect(),
        }
    }

    fn try_send_file(&self, file: &IncomingFile) -> bool {
        let Some(document) = self.recognizer.recognize(file) else {
            debug!(file = %file.name, "Skipping: not recognized");
            return false;
        };
        if !self.format_accepted(&document) {
            debug!(file = %file.name, format = %document.format, "Skipping: format not accepted");
            return false;
        }
        if !self.fresh_enough(&document) {
            debug!(file = %file.name, created = %document.created, "Skipping: document too old");
            return false;
        }
        let signed = self.signer.sign(&document.content);
        self.transport.try_send(&document.name, &signed)
    }

    fn format_accepted(&self, document: &Document) -> bool {
        self.policy
            .accepted_formats
            .iter()
            .any(|format| format == &document.format)
    }

    fn fresh_enough(&self, document: &Document) -> bool {
        document.created + Months::new(self.policy.max_age_months) > Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::recognizer::MockRecognizer;
    use crate::dispatch::signer::MockSigner;
    use crate::dispatch::transport::MockTransport;
    use chrono::{DateTime, Duration, Utc};

    fn file(name: &str) -> IncomingFile {
        IncomingFile::new(name, vec![1, 2, 3])
    }

    fn document(name: &str, format: &str, created: DateTime<Utc>) -> Document {
        Document {
            name: name.to_string(),
            content: b"payload".to_vec(),
            created,
            format: format.to_string(),
        }
    }

    /// Signer stub that appends a fixed marker, so transport expectations
    /// can assert the signed bytes flowed through.
    fn stub_signer() -> MockSigner {
        let mut signer = MockSigner::new();
        signer.expect_sign().returning(|content| {
            let mut signed = content.to_vec();
            signed.extend_from_slice(b"+sig");
            signed
        });
        signer
    }

    fn relay(
        recognizer: MockRecognizer,
        signer: MockSigner,
        transport: MockTransport,
    ) -> FileRelay<MockRecognizer, MockSigner, MockTransport> {
        FileRelay::new(recognizer, signer, transport, RelayPolicy::default())
    }

    #[test]
    fn test_sends_accepted_formats() {
        for format in ["4.0", "3.1"] {
            let doc = document("doc-a", format, Utc::now());
            let mut recognizer = MockRecognizer::new();
            recognizer
                .expect_recognize()
                .returning(move |_| Some(doc.clone()));

            let mut transport = MockTransport::new();
            transport
                .expect_try_send()
                .withf(|name, signed| name == "doc-a" && signed == b"payload+sig")
                .times(1)
                .returning(|_, _| true);

            let outcome = relay(recognizer, stub_signer(), transport).send_files(&[file("a")]);
            assert!(outcome.all_sent(), "format {format} should be sent");
        }
    }

    #[test]
    fn test_skips_rejected_formats() {
        for format in ["", "VasyaLizhnik", "4", "1.0"] {
            let doc = document("doc-a", format, Utc::now());
            let mut recognizer = MockRecognizer::new();
            recognizer
                .expect_recognize()
                .returning(move |_| Some(doc.clone()));

            let mut transport = MockTransport::new();
            transport.expect_try_send().times(0);

            let outcome = relay(recognizer, stub_signer(), transport).send_files(&[file("a")]);
            assert_eq!(outcome.skipped, vec![file("a")], "format {format:?}");
        }
    }

    #[test]
    fn test_skips_document_older_than_a_month() {
        let doc = document("doc-a", "4.0", Utc::now() - Duration::days(40));
        let mut recognizer = MockRecognizer::new();
        recognizer
            .expect_recognize()
            .returning(move |_| Some(doc.clone()));

        let mut transport = MockTransport::new();
        transport.expect_try_send().times(0);

        let outcome = relay(recognizer, stub_signer(), transport).send_files(&[file("a")]);
        assert_eq!(outcome.skipped, vec![file("a")]);
    }

    #[test]
    fn test_sends_document_younger_than_a_month() {
        let doc = document("doc-a", "4.0", Utc::now() - Duration::days(10));
        let mut recognizer = MockRecognizer::new();
        recognizer
            .expect_recognize()
            .returning(move |_| Some(doc.clone()));

        let mut transport = MockTransport::new();
        transport.expect_try_send().times(1).returning(|_, _| true);

        let outcome = relay(recognizer, stub_signer(), transport).send_files(&[file("a")]);
        assert!(outcome.all_sent());
    }

    #[test]
    fn test_skips_when_not_recognized() {
        let mut recognizer = MockRecognizer::new();
        recognizer.expect_recognize().returning(|_| None);

        let mut signer = MockSigner::new();
        signer.expect_sign().times(0);
        let mut transport = MockTransport::new();
        transport.expect_try_send().times(0);

        let outcome = relay(recognizer, signer, transport).send_files(&[file("a")]);
        assert_eq!(outcome.skipped, vec![file("a")]);
    }

    #[test]
    fn test_skips_when_send_fails() {
        let doc = document("doc-a", "4.0", Utc::now());
        let mut recognizer = MockRecognizer::new();
        recognizer
            .expect_recognize()
            .returning(move |_| Some(doc.clone()));

        let mut transport = MockTransport::new();
        transport.expect_try_send().times(1).returning(|_, _| false);

        let outcome = relay(recognizer, stub_signer(), transport).send_files(&[file("a")]);
        assert_eq!(outcome.skipped, vec![file("a")]);
    }

    #[test]
    fn test_files_are_relayed_independently() {
        // "bad" is unrecognizable; "good" must still go out.
        let mut recognizer = MockRecognizer::new();
        recognizer
            .expect_recognize()
            .withf(|f: &IncomingFile| f.name == "bad")
            .returning(|_| None);
        recognizer
            .expect_recognize()
            .withf(|f: &IncomingFile| f.name == "good")
            .returning(|f| Some(document(&f.name, "4.0", Utc::now())));

        let mut transport = MockTransport::new();
        transport
            .expect_try_send()
            .withf(|name, _| name == "good")
            .times(1)
            .returning(|_, _| true);

        let outcome =
            relay(recognizer, stub_signer(), transport).send_files(&[file("bad"), file("good")]);
        assert_eq!(outcome.skipped, vec![file("bad")]);
    }

    #[test]
    fn test_send_failure_skips_only_that_file() {
        let mut recognizer = MockRecognizer::new();
        recognizer
            .expect_recognize()
            .returning(|f| Some(document(&f.name, "4.0", Utc::now())));

        let mut transport = MockTransport::new();
        transport
            .expect_try_send()
            .withf(|name, _| name == "flaky")
            .times(1)
            .returning(|_, _| false);
        transport
            .expect_try_send()
            .withf(|name, _| name == "steady")
            .times(1)
            .returning(|_, _| true);

        let outcome = relay(recognizer, stub_signer(), transport)
            .send_files(&[file("flaky"), file("steady")]);
        assert_eq!(outcome.skipped, vec![file("flaky")]);
    }

    #[test]
    fn test_custom_policy_format() {
        let doc = document("doc-a", "5.0", Utc::now());
        let mut recognizer = MockRecognizer::new();
        recognizer
            .expect_recognize()
            .returning(move |_| Some(doc.clone()));

        let mut transport = MockTransport::new();
        transport.expect_try_send().times(1).returning(|_, _| true);

        let policy = RelayPolicy {
            accepted_formats: vec!["5.0".to_string()],
            max_age_months: 1,
        };
        let relay = FileRelay::new(recognizer, stub_signer(), transport, policy);
        assert!(relay.send_files(&[file("a")]).all_sent());
    }
}
