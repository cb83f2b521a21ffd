//! Durable record of every fingerprint that has been announced.

pub mod file;
pub mod memory;
pub mod recon;

use crate::app::Result;
use crate::domain::Fingerprint;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use recon::{reconstruct, ReconReport};

/// Append-only set of fingerprints. Entries are never removed or rewritten.
pub trait FingerprintStore {
    /// Whether `fingerprint` has been recorded. A store that does not exist
    /// yet is empty.
    fn contains(&self, fingerprint: &Fingerprint) -> Result<bool>;

    /// Record `fingerprint`; durable once this returns.
    fn append(&self, fingerprint: &Fingerprint) -> Result<()>;

    /// Check and record under a single exclusive acquisition.
    ///
    /// Returns `true` when the fingerprint was new and has been appended.
    fn insert_if_absent(&self, fingerprint: &Fingerprint) -> Result<bool>;
}

/// Line-oriented membership test shared by the store implementations.
fn contains_line(contents: &str, fingerprint: &Fingerprint) -> bool {
    contents
        .lines()
        .any(|line| line.trim().eq_ignore_ascii_case(fingerprint.as_str()))
}
