//! # Backup Command
//!
//! Writes every product, hidden ones included, to a pretty-printed JSON
//! file the operator can keep:
//!
//! ```json
//! {
//!   "exportedAt": "2025-01-31T18:04:11.532Z",
//!   "products": [ … ]
//! }
//! ```
//!
//! The ledger never reads a backup back.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::error::ApiError;
use crate::state::LedgerState;
use kiosk_core::Backup;
use kiosk_db::ProductStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupReport {
    pub path: PathBuf,
    pub products: usize,
    pub exported_at: String,
}

/// Writes the backup document to `path`, replacing any file already there.
pub fn export_backup<S: ProductStore>(
    state: &LedgerState<S>,
    path: &Path,
    exported_at: DateTime<Utc>,
) -> Result<BackupReport, ApiError> {
    let backup = Backup::new(state.ledger().products(), exported_at);
    let document = backup
        .to_json_pretty()
        .map_err(|e| ApiError::internal(format!("Could not encode backup: {}", e)))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| write_failed(path, e))?;
        }
    }
    std::fs::write(path, document).map_err(|e| write_failed(path, e))?;

    info!(path = %path.display(), products = backup.products.len(), "Backup written");

    Ok(BackupReport {
        path: path.to_path_buf(),
        products: backup.products.len(),
        exported_at: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

fn write_failed(path: &Path, err: std::io::Error) -> ApiError {
    error!(path = %path.display(), error = %err, "Backup write failed");
    ApiError::storage(format!("Could not write backup to {}: {}", path.display(), err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::product::{add_product, hide_product};
    use crate::error::ErrorCode;
    use chrono::TimeZone;
    use kiosk_db::{Database, DbConfig};

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("kiosk-backup-test-{}-{}", name, std::process::id()))
    }

    #[tokio::test]
    async fn test_backup_includes_hidden_products() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut state = LedgerState::open(db.products()).await;
        add_product(&mut state, "Tomato", "5", "8", "20").await.unwrap();
        let kale = add_product(&mut state, "Kale", "2.5", "4", "3").await.unwrap().product;
        hide_product(&mut state, &kale.id).await.unwrap();

        let dir = scratch_dir("hidden");
        let path = dir.join("nested").join("kiosk-backup.json");
        let at = Utc.with_ymd_and_hms(2025, 1, 31, 18, 4, 11).unwrap();

        let report = export_backup(&state, &path, at).unwrap();
        assert_eq!(report.products, 2);
        assert_eq!(report.exported_at, "2025-01-31T18:04:11.000Z");

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["exportedAt"], "2025-01-31T18:04:11.000Z");
        assert_eq!(written["products"][1]["name"], "Kale");
        assert_eq!(written["products"][1]["hidden"], true);
        assert_eq!(written["products"][1]["buyingPrice"], 2.5);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_unwritable_path_is_storage_error() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let state = LedgerState::open(db.products()).await;

        // A regular file can't be used as a directory.
        let dir = scratch_dir("blocked");
        std::fs::create_dir_all(&dir).unwrap();
        let blocker = dir.join("file");
        std::fs::write(&blocker, "x").unwrap();

        let err = export_backup(&state, &blocker.join("backup.json"), Utc::now()).unwrap_err();
        assert_eq!(err.code, ErrorCode::StorageError);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
