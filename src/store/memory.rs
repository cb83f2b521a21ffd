use std::sync::Mutex;

use crate::app::Result;
use crate::domain::Fingerprint;
use crate::store::FingerprintStore;

/// In-process store; contents are lost when it is dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<Vec<Fingerprint>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fingerprints(&self) -> Vec<Fingerprint> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Fingerprint>> {
        // A poisoned lock still guards a consistent Vec.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl FromIterator<Fingerprint> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = Fingerprint>>(iter: I) -> Self {
        Self {
            entries: Mutex::new(iter.into_iter().collect()),
        }
    }
}

impl FingerprintStore for MemoryStore {
    fn contains(&self, fingerprint: &Fingerprint) -> Result<bool> {
        Ok(self.lock().contains(fingerprint))
    }

    fn append(&self, fingerprint: &Fingerprint) -> Result<()> {
        self.lock().push(fingerprint.clone());
        Ok(())
    }

    fn insert_if_absent(&self, fingerprint: &Fingerprint) -> Result<bool> {
        let mut entries = self.lock();
        if entries.contains(fingerprint) {
            return Ok(false);
        }
        entries.push(fingerprint.clone());
        Ok(true)
    }
}
