//! Periodic catalog snapshot sink.
//!
//! A background task copies the catalog on a fixed interval and writes it to
//! disk as JSON. The write is output only (the catalog always loads from seed
//! data) and its failures are logged and swallowed; request handling never
//! waits on it.

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use pantry_core::Product;

use crate::shop::CatalogStore;

/// Snapshot write failure.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("serialize failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes catalog snapshots to one JSON file, replacing it each time.
#[derive(Debug, Clone)]
pub struct JsonSnapshotter {
    path: PathBuf,
}

impl JsonSnapshotter {
    /// Snapshotter targeting `path`; parent directories are created on first
    /// persist.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The target file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist one read-only copy of the catalog.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError` when serialization or the file write fails.
    pub async fn persist(&self, products: &[Product]) -> Result<(), SnapshotError> {
        let json = serde_json::to_vec_pretty(products)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

/// Spawn the snapshot loop: every `interval`, copy the catalog and persist
/// it. Runs for the process lifetime.
pub fn spawn_snapshot_task(catalog: CatalogStore, snapshotter: JsonSnapshotter, interval: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick fires immediately; skip it so snapshots start one
        // interval after boot
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let products = catalog.all().await;
            match snapshotter.persist(&products).await {
                Ok(()) => debug!(count = products.len(), "catalog snapshot written"),
                Err(e) => warn!(error = %e, "catalog snapshot failed"),
            }
        }
    });
}
