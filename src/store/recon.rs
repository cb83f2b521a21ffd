use crate::app::Result;
use crate::domain::Fingerprint;
use crate::store::FingerprintStore;

/// Outcome of rebuilding a store from an archive of past posts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconReport {
    pub added: usize,
    pub skipped: usize,
}

/// Re-record every `post_id` annotation found in `archive`.
///
/// Used after the store file is lost: feed it the text of announcements that
/// were already posted, and they will be suppressed again on the next run.
pub fn reconstruct(store: &dyn FingerprintStore, archive: &str) -> Result<ReconReport> {
    let mut report = ReconReport::default();

    for fingerprint in Fingerprint::scan_annotations(archive) {
        if store.insert_if_absent(&fingerprint)? {
            report.added += 1;
        } else {
            report.skipped += 1;
        }
    }

    tracing::info!(
        "Reconstructed store: {} added, {} already present",
        report.added,
        report.skipped
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_reconstruct_from_archive() {
        let store = MemoryStore::new();
        let a = Fingerprint::of("a");
        let b = Fingerprint::of("b");
        store.append(&a).unwrap();

        let archive = format!(
            "post one {}\npost two {}\nrepeat {}\n",
            a.annotation(),
            b.annotation(),
            b.annotation()
        );
        let report = reconstruct(&store, &archive).unwrap();

        assert_eq!(report, ReconReport { added: 1, skipped: 2 });
        assert_eq!(store.fingerprints(), vec![a, b]);
    }

    #[test]
    fn test_reconstruct_empty_archive() {
        let store = MemoryStore::new();
        assert_eq!(reconstruct(&store, "nothing here").unwrap(), ReconReport::default());
        assert!(store.is_empty());
    }
}
