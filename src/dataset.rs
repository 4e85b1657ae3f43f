//! # Network dataset
//! Loads the base GeoJSON network from disk once and shares it behind a
//! cheap clone-able handle.
//!
//! Behavior:
//! - A missing or unparseable file at startup logs a warning and leaves the
//!   slot empty; the scoring route degrades to 503 instead of the process
//!   refusing to boot.
//! - `reload` re-reads the file on demand (admin route) and swaps the slot
//!   atomically.
//! - Every loaded snapshot carries a short content fingerprint so operators
//!   can tell from logs and health output which file revision is live.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::geojson::FeatureCollection;

/// One parsed revision of the base network file.
#[derive(Debug)]
pub struct NetworkDataset {
    pub collection: FeatureCollection,
    pub fingerprint: String,
    pub feature_count: usize,
    pub loaded_at_unix: u64,
}

impl NetworkDataset {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let collection: FeatureCollection =
            serde_json::from_slice(bytes).context("parsing network GeoJSON")?;
        Ok(Self::assemble(collection, fingerprint(bytes)))
    }

    /// In-memory construction, used by tests and demos that have no file.
    pub fn from_collection(collection: FeatureCollection) -> Self {
        let bytes = serde_json::to_vec(&collection).unwrap_or_default();
        Self::assemble(collection, fingerprint(&bytes))
    }

    fn assemble(collection: FeatureCollection, fingerprint: String) -> Self {
        let feature_count = collection.features.len();
        Self {
            collection,
            fingerprint,
            feature_count,
            loaded_at_unix: now_unix(),
        }
    }
}

/// Shared handle over the currently loaded dataset. Clones are cheap and
/// all point at the same slot.
#[derive(Clone)]
pub struct DatasetHandle {
    path: PathBuf,
    inner: Arc<RwLock<Option<Arc<NetworkDataset>>>>,
}

impl DatasetHandle {
    /// Initial load. Failure is reported, not fatal.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let slot = match read_dataset(&path) {
            Ok(dataset) => {
                info!(
                    path = %path.display(),
                    features = dataset.feature_count,
                    fingerprint = %dataset.fingerprint,
                    "network dataset loaded"
                );
                Some(Arc::new(dataset))
            }
            Err(err) => {
                warn!(path = %path.display(), error = %format!("{err:#}"), "network dataset unavailable");
                None
            }
        };
        Self {
            path,
            inner: Arc::new(RwLock::new(slot)),
        }
    }

    /// Handle over an in-memory collection (tests, demos).
    pub fn from_collection(collection: FeatureCollection) -> Self {
        Self {
            path: PathBuf::new(),
            inner: Arc::new(RwLock::new(Some(Arc::new(NetworkDataset::from_collection(
                collection,
            ))))),
        }
    }

    pub fn snapshot(&self) -> Option<Arc<NetworkDataset>> {
        self.inner.read().expect("dataset slot poisoned").clone()
    }

    /// Re-read the file and swap the slot. On failure the previous dataset
    /// stays live.
    pub fn reload(&self) -> Result<Arc<NetworkDataset>> {
        let dataset = Arc::new(read_dataset(&self.path)?);
        info!(
            path = %self.path.display(),
            features = dataset.feature_count,
            fingerprint = %dataset.fingerprint,
            "network dataset reloaded"
        );
        *self.inner.write().expect("dataset slot poisoned") = Some(dataset.clone());
        Ok(dataset)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn read_dataset(path: &Path) -> Result<NetworkDataset> {
    let bytes = fs::read(path).with_context(|| {
        format!(
            "reading network dataset at {} (create it or set ATP_DATASET_PATH)",
            path.display()
        )
    })?;
    NetworkDataset::from_bytes(&bytes)
}

/// First 6 bytes of the SHA-256 digest, hex-encoded. Enough to tell file
/// revisions apart in logs without dumping whole digests.
fn fingerprint(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
