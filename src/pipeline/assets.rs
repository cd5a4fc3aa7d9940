//! Asset cache planning.
//!
//! Avatars and inline images are cached on disk under their derived
//! filenames. The planner only decides *whether* a download is needed; the
//! HTTP client executes the plan afterwards.

use std::path::{Path, PathBuf};

/// Whether a remote asset needs downloading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchDecision {
    /// A local copy already exists; leave it alone.
    Skip,
    /// No local copy; download it.
    Fetch,
}

/// One planned asset download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetFetch {
    /// Remote URL to download from.
    pub remote_url: String,
    /// Filename to store under, relative to the cache root.
    pub local_filename: String,
    /// Skip or fetch.
    pub decision: FetchDecision,
}

/// Local storage the planner checks for existing copies.
///
/// A trait so the decoder can be tested against a fake store without
/// touching disk.
pub trait FileStore {
    /// Does a file with this name already exist in the store?
    fn exists(&self, filename: &str) -> bool;

    /// Absolute path a filename resolves to, for writers and renderers.
    fn resolve(&self, filename: &str) -> PathBuf;
}

/// Decide whether `remote_url` must be fetched into `local_filename`.
///
/// Skip iff the file already exists — a pure existence check, never a
/// freshness check: a stale or wrong-content file is never refreshed.
///
/// The check and the later download are not atomic. Two overlapping
/// timeline decodes may both see the file missing, both decide `Fetch`,
/// and both write the same path; last writer wins. No lock is taken.
pub fn plan_fetch(store: &dyn FileStore, remote_url: &str, local_filename: &str) -> AssetFetch {
    let decision = if store.exists(local_filename) {
        FetchDecision::Skip
    } else {
        FetchDecision::Fetch
    };
    AssetFetch {
        remote_url: remote_url.to_string(),
        local_filename: local_filename.to_string(),
        decision,
    }
}

/// Asset store backed by a directory on disk.
#[derive(Debug, Clone)]
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    /// Create a store rooted at `root`. The directory is not created here;
    /// [`crate::paths::asset_cache_dir`] does that.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The cache root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FileStore for DiskStore {
    fn exists(&self, filename: &str) -> bool {
        self.root.join(filename).exists()
    }

    fn resolve(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }
}
