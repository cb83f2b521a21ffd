use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::app::{Result, ThreatFeedError};
use crate::domain::Fingerprint;
use crate::store::{contains_line, FingerprintStore, MemoryStore};

/// Plain-text store: one lowercase hex fingerprint per line, append-only.
///
/// The file is created on first use. Every operation holds a process-local
/// mutex and an exclusive OS lock on the file, so a check followed by an
/// append in [`insert_if_absent`](FingerprintStore::insert_if_absent) cannot
/// interleave with another run.
pub struct FileStore {
    path: PathBuf,
    local: Mutex<()>,
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            local: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every recorded fingerprint in append order. Lines that are not a
    /// digest are skipped.
    pub fn fingerprints(&self) -> Result<Vec<Fingerprint>> {
        let mut locked = self.acquire()?;
        let contents = locked.contents()?;
        Ok(contents.lines().filter_map(Fingerprint::parse).collect())
    }

    /// Volatile copy of the current contents, for runs that must not write.
    pub fn snapshot(&self) -> Result<MemoryStore> {
        Ok(MemoryStore::from_iter(self.fingerprints()?))
    }

    fn acquire(&self) -> Result<LockedFile<'_>> {
        let local = self.local.lock().map_err(|e| {
            ThreatFeedError::store(&self.path, std::io::Error::other(e.to_string()))
        })?;

        let file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|e| ThreatFeedError::store(&self.path, e))?;

        file.lock().map_err(|e| ThreatFeedError::store(&self.path, e))?;

        Ok(LockedFile {
            _local: local,
            file,
            path: &self.path,
        })
    }
}

impl FingerprintStore for FileStore {
    fn contains(&self, fingerprint: &Fingerprint) -> Result<bool> {
        let mut locked = self.acquire()?;
        locked.contains(fingerprint)
    }

    fn append(&self, fingerprint: &Fingerprint) -> Result<()> {
        let mut locked = self.acquire()?;
        locked.append(fingerprint)
    }

    fn insert_if_absent(&self, fingerprint: &Fingerprint) -> Result<bool> {
        let mut locked = self.acquire()?;
        if locked.contains(fingerprint)? {
            return Ok(false);
        }
        locked.append(fingerprint)?;
        Ok(true)
    }
}

/// Store file held open under both locks; released on drop.
struct LockedFile<'a> {
    _local: MutexGuard<'a, ()>,
    file: File,
    path: &'a Path,
}

impl LockedFile<'_> {
    fn contents(&mut self) -> Result<String> {
        let mut contents = String::new();
        self.file
            .seek(SeekFrom::Start(0))
            .and_then(|_| self.file.read_to_string(&mut contents))
            .map_err(|e| ThreatFeedError::store(self.path, e))?;
        Ok(contents)
    }

    fn contains(&mut self, fingerprint: &Fingerprint) -> Result<bool> {
        Ok(contains_line(&self.contents()?, fingerprint))
    }

    fn append(&mut self, fingerprint: &Fingerprint) -> Result<()> {
        self.write_line(fingerprint)
            .map_err(|e| ThreatFeedError::store(self.path, e))?;

        tracing::debug!("Recorded {} in {}", fingerprint, self.path.display());
        Ok(())
    }

    /// Hand-edited stores may lack a final newline; never glue onto that line.
    fn write_line(&mut self, fingerprint: &Fingerprint) -> std::io::Result<()> {
        if self.ends_mid_line()? {
            self.file.write_all(b"\n")?;
        }
        writeln!(self.file, "{}", fingerprint)?;
        self.file.sync_all()
    }

    fn ends_mid_line(&mut self) -> std::io::Result<bool> {
        let len = self.file.metadata()?.len();
        if len == 0 {
            return Ok(false);
        }

        let mut last = [0u8; 1];
        self.file.seek(SeekFrom::Start(len - 1))?;
        self.file.read_exact(&mut last)?;
        Ok(last[0] != b'\n')
    }
}

impl Drop for LockedFile<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.file.unlock() {
            tracing::warn!("Failed to unlock {}: {}", self.path.display(), e);
        }
    }
}
