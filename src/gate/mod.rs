use std::sync::Arc;

use crate::app::Result;
use crate::domain::Fingerprint;
use crate::store::FingerprintStore;

/// Decides whether a formatted post is announced or suppressed.
///
/// Identity is the SHA-256 of the full formatted text, so an upstream edit to
/// any field yields a new announcement rather than a suppression.
pub struct DedupGate {
    store: Arc<dyn FingerprintStore + Send + Sync>,
}

impl DedupGate {
    pub fn new(store: Arc<dyn FingerprintStore + Send + Sync>) -> Self {
        Self { store }
    }

    /// Returns the post with its `post_id` annotation, or `None` when the
    /// same content was already recorded. Store failures propagate.
    pub fn gate(&self, formatted_post: &str) -> Result<Option<String>> {
        let fingerprint = Fingerprint::of(formatted_post);
        let annotated = annotate(formatted_post, &fingerprint);

        if !self.store.insert_if_absent(&fingerprint)? {
            tracing::info!("Suppressed already announced post {}", fingerprint);
            return Ok(None);
        }

        tracing::info!("Announcing new post {}", fingerprint);
        Ok(Some(annotated))
    }
}

/// Append the fingerprint annotation. The fingerprint must be computed over
/// `formatted_post` alone.
pub fn annotate(formatted_post: &str, fingerprint: &Fingerprint) -> String {
    let mut annotated = String::with_capacity(formatted_post.len() + Fingerprint::HEX_LEN + 10);
    annotated.push_str(formatted_post);
    annotated.push_str(&fingerprint.annotation());
    annotated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FeedFields;
    use crate::formatter::format_post;
    use crate::store::{FileStore, MemoryStore};

    fn fields(excerpt: &str) -> FeedFields {
        FeedFields::new(
            "ThreatPost",
            "New Botnet Observed",
            "Mon, 01 Jan 2024 00:00:00 +0000",
            excerpt,
            "https://example.com/botnet",
        )
    }

    fn memory_gate() -> (Arc<MemoryStore>, DedupGate) {
        let store = Arc::new(MemoryStore::new());
        let gate = DedupGate::new(store.clone());
        (store, gate)
    }

    #[test]
    fn test_same_post_suppressed_second_time() {
        let (store, gate) = memory_gate();
        let post = format_post(&fields("Botnet spreads via routers."));

        assert!(gate.gate(&post).unwrap().is_some());
        assert_eq!(gate.gate(&post).unwrap(), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_annotation_appended_and_excluded_from_fingerprint() {
        let (store, gate) = memory_gate();
        let post = format_post(&fields("Botnet spreads via routers."));
        let expected_fp = Fingerprint::of(&post);

        let announced = gate.gate(&post).unwrap().unwrap();

        assert_eq!(announced, format!("{}`post_id={}`", post, expected_fp));
        assert_eq!(store.fingerprints(), vec![expected_fp]);
    }

    #[test]
    fn test_single_char_change_is_new_post() {
        let (store, gate) = memory_gate();
        let original = format_post(&fields("Botnet spreads via routers."));
        let edited = format_post(&fields("Botnet spreads via routers!"));

        assert_ne!(Fingerprint::of(&original), Fingerprint::of(&edited));
        assert!(gate.gate(&original).unwrap().is_some());
        assert!(gate.gate(&edited).unwrap().is_some());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_fingerprint_stable_across_runs() {
        let first = Fingerprint::of(&format_post(&fields("same")));
        let second = Fingerprint::of(&format_post(&fields("same")));
        assert_eq!(first, second);
    }

    #[test]
    fn test_store_bootstrap() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("post_id.db");
        let gate = DedupGate::new(Arc::new(FileStore::new(&path)));
        let post = format_post(&fields("First sighting."));

        assert!(!path.exists());
        assert!(gate.gate(&post).unwrap().is_some());

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, format!("{}\n", Fingerprint::of(&post)));
        assert_eq!(contents.lines().count(), 1);
    }

    #[test]
    fn test_durable_across_gates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("post_id.db");
        let post = format_post(&fields("Seen before."));

        let first = DedupGate::new(Arc::new(FileStore::new(&path)));
        assert!(first.gate(&post).unwrap().is_some());

        let second = DedupGate::new(Arc::new(FileStore::new(&path)));
        assert_eq!(second.gate(&post).unwrap(), None);
    }

    #[test]
    fn test_store_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let gate = DedupGate::new(Arc::new(FileStore::new(
            dir.path().join("no-such-dir").join("post_id.db"),
        )));

        assert!(gate.gate("post").is_err());
    }
}
