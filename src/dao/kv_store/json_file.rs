use std::{collections::BTreeMap, io::ErrorKind, path::PathBuf, sync::Arc};

use dashmap::DashMap;
use futures::future::{BoxFuture, FutureExt};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tokio::{fs, sync::Mutex};
use tracing::{debug, info};

use super::{ScoreboardStore, StoreKey};
use crate::dao::storage::{StorageError, StorageResult};

/// On-disk layout of the session file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    saved_at: Option<String>,
    #[serde(default)]
    entries: BTreeMap<String, Value>,
}

/// Store that mirrors its entries in memory and rewrites a JSON file on every write.
#[derive(Clone)]
pub struct JsonFileStore {
    inner: Arc<JsonFileInner>,
}

struct JsonFileInner {
    path: PathBuf,
    entries: DashMap<String, Value>,
    /// Serialises file rewrites so an older snapshot never replaces a newer one.
    write_gate: Mutex<()>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file yields an empty store.
    pub async fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        let document = match fs::read_to_string(&path).await {
            Ok(contents) => {
                serde_json::from_str::<StoredDocument>(&contents).map_err(|source| {
                    StorageError::Corrupt {
                        path: path.display().to_string(),
                        source,
                    }
                })?
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "session file not found; starting empty");
                StoredDocument::default()
            }
            Err(err) => {
                return Err(StorageError::unavailable(
                    format!("failed to read `{}`", path.display()),
                    err,
                ));
            }
        };

        let entries = document.entries.into_iter().collect::<DashMap<_, _>>();
        info!(
            path = %path.display(),
            keys = entries.len(),
            saved_at = document.saved_at.as_deref().unwrap_or("never"),
            "opened session file"
        );

        Ok(Self {
            inner: Arc::new(JsonFileInner {
                path,
                entries,
                write_gate: Mutex::new(()),
            }),
        })
    }
}

impl JsonFileInner {
    async fn flush(&self) -> StorageResult<()> {
        let _gate = self.write_gate.lock().await;

        let document = StoredDocument {
            saved_at: Some(now_rfc3339()),
            entries: self
                .entries
                .iter()
                .map(|entry| (entry.key().clone(), entry.value().clone()))
                .collect(),
        };
        let payload = serde_json::to_vec_pretty(&document).map_err(|source| {
            StorageError::Corrupt {
                path: self.path.display().to_string(),
                source,
            }
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|err| {
                StorageError::unavailable(format!("failed to create `{}`", parent.display()), err)
            })?;
        }

        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, payload).await.map_err(|err| {
            StorageError::unavailable(format!("failed to write `{}`", staging.display()), err)
        })?;
        fs::rename(&staging, &self.path).await.map_err(|err| {
            StorageError::unavailable(format!("failed to replace `{}`", self.path.display()), err)
        })?;

        debug!(path = %self.path.display(), "session file written");
        Ok(())
    }
}

impl ScoreboardStore for JsonFileStore {
    fn get(&self, key: StoreKey) -> BoxFuture<'static, StorageResult<Option<Value>>> {
        let value = self
            .inner
            .entries
            .get(key.as_str())
            .map(|entry| entry.value().clone());
        futures::future::ready(Ok(value)).boxed()
    }

    fn put_all(&self, entries: Vec<(StoreKey, Value)>) -> BoxFuture<'static, StorageResult<()>> {
        for (key, value) in entries {
            self.inner.entries.insert(key.as_str().to_string(), value);
        }
        let inner = Arc::clone(&self.inner);
        async move { inner.flush().await }.boxed()
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let inner = Arc::clone(&self.inner);
        async move {
            let Some(parent) = inner.path.parent().filter(|p| !p.as_os_str().is_empty()) else {
                return Ok(());
            };
            match fs::metadata(parent).await {
                Ok(_) => Ok(()),
                // Created lazily on the first write.
                Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
                Err(err) => Err(StorageError::unavailable(
                    format!("cannot access `{}`", parent.display()),
                    err,
                )),
            }
        }
        .boxed()
    }
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "invalid-timestamp".into())
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use uuid::Uuid;

    use super::*;

    fn scratch_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("scoreboard-back-{}", Uuid::new_v4().simple()))
            .join("session.json")
    }

    #[tokio::test]
    async fn missing_file_opens_empty() {
        let store = JsonFileStore::open(scratch_path()).await.unwrap();
        assert_eq!(store.get(StoreKey::AwayScore).await.unwrap(), None);
        store.health_check().await.unwrap();
    }

    #[tokio::test]
    async fn writes_survive_reopening() {
        let path = scratch_path();
        {
            let store = JsonFileStore::open(&path).await.unwrap();
            store
                .put_all(vec![
                    (StoreKey::HomeScore, json!(51)),
                    (StoreKey::ShotRemainingMs, json!(14_000)),
                ])
                .await
                .unwrap();
        }

        let reopened = JsonFileStore::open(&path).await.unwrap();
        assert_eq!(
            reopened.get(StoreKey::HomeScore).await.unwrap(),
            Some(json!(51))
        );
        assert_eq!(
            reopened.get(StoreKey::ShotRemainingMs).await.unwrap(),
            Some(json!(14_000))
        );

        let raw = std::fs::read_to_string(&path).unwrap();
        let document: Value = serde_json::from_str(&raw).unwrap();
        assert!(document["saved_at"].is_string());

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[tokio::test]
    async fn garbage_file_is_reported_as_corrupt() {
        let path = scratch_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "not json").unwrap();

        let err = JsonFileStore::open(&path).await.err().unwrap();
        assert!(matches!(err, StorageError::Corrupt { .. }));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
