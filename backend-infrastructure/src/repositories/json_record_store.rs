use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info};

use backend_domain::{Collection, Document, Evaluation, RecordStore, SetField};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Snapshot {
    #[serde(default)]
    meetings: BTreeMap<String, Document>,
    #[serde(default)]
    users: BTreeMap<String, Document>,
    #[serde(default)]
    evaluations: BTreeMap<String, Vec<Evaluation>>,
}

impl Snapshot {
    fn collection(&self, collection: Collection) -> &BTreeMap<String, Document> {
        match collection {
            Collection::Meetings => &self.meetings,
            Collection::Users => &self.users,
        }
    }

    fn collection_mut(&mut self, collection: Collection) -> &mut BTreeMap<String, Document> {
        match collection {
            Collection::Meetings => &mut self.meetings,
            Collection::Users => &mut self.users,
        }
    }

    fn set_field_mut(&mut self, key: &str, field: SetField) -> Result<&mut Vec<Value>> {
        let collection = field.collection();
        let document = self
            .collection_mut(collection)
            .get_mut(key)
            .ok_or_else(|| anyhow!("no document {}/{}", collection.as_str(), key))?;
        let slot = document
            .entry(field.as_str())
            .or_insert_with(|| Value::Array(Vec::new()));
        if slot.is_null() {
            *slot = Value::Array(Vec::new());
        }
        slot.as_array_mut().ok_or_else(|| {
            anyhow!(
                "{}/{}.{} is not an array",
                collection.as_str(),
                key,
                field.as_str()
            )
        })
    }
}

/// Document collections held in memory, optionally mirrored to a JSON file
/// after every mutation. A mutation whose file write fails is discarded.
pub struct JsonRecordStore {
    path: Option<PathBuf>,
    snapshot: RwLock<Snapshot>,
}

impl JsonRecordStore {
    pub fn in_memory() -> Self {
        Self {
            path: None,
            snapshot: RwLock::new(Snapshot::default()),
        }
    }

    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let snapshot = if path.exists() {
            let content = fs::read_to_string(&path).await?;
            let snapshot: Snapshot = serde_json::from_str(&content)
                .map_err(|err| anyhow!("invalid record store {}: {}", path.display(), err))?;
            info!(
                "loaded {} meetings and {} users from {}",
                snapshot.meetings.len(),
                snapshot.users.len(),
                path.display()
            );
            snapshot
        } else {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).await?;
                }
            }
            Snapshot::default()
        };
        Ok(Self {
            path: Some(path),
            snapshot: RwLock::new(snapshot),
        })
    }

    async fn mutate<F>(&self, apply: F) -> Result<()>
    where
        F: FnOnce(&mut Snapshot) -> Result<()> + Send,
    {
        let mut snapshot = self.snapshot.write().await;
        let Some(path) = &self.path else {
            return apply(&mut *snapshot);
        };
        let mut next = snapshot.clone();
        apply(&mut next)?;
        write_snapshot(path, &next).await?;
        *snapshot = next;
        Ok(())
    }
}

async fn write_snapshot(path: &Path, snapshot: &Snapshot) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    let content = serde_json::to_vec_pretty(snapshot)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, content).await?;
    fs::rename(&tmp, path).await?;
    debug!("record store written to {}", path.display());
    Ok(())
}

#[async_trait]
impl RecordStore for JsonRecordStore {
    async fn read(&self, collection: Collection, key: &str) -> Result<Option<Document>> {
        let snapshot = self.snapshot.read().await;
        Ok(snapshot.collection(collection).get(key).cloned())
    }

    async fn merge(&self, collection: Collection, key: &str, fields: Document) -> Result<()> {
        self.mutate(|snapshot| {
            snapshot
                .collection_mut(collection)
                .entry(key.to_string())
                .or_default()
                .extend(fields);
            Ok(())
        })
        .await
    }

    async fn array_union(&self, key: &str, field: SetField, value: &str) -> Result<()> {
        self.mutate(|snapshot| {
            let values = snapshot.set_field_mut(key, field)?;
            if !values.iter().any(|existing| existing.as_str() == Some(value)) {
                values.push(Value::String(value.to_string()));
            }
            Ok(())
        })
        .await
    }

    async fn array_remove(&self, key: &str, field: SetField, value: &str) -> Result<()> {
        self.mutate(|snapshot| {
            let values = snapshot.set_field_mut(key, field)?;
            values.retain(|existing| existing.as_str() != Some(value));
            Ok(())
        })
        .await
    }

    async fn add_evaluation(&self, event_key: &str, evaluation: &Evaluation) -> Result<()> {
        self.mutate(|snapshot| {
            if !snapshot.meetings.contains_key(event_key) {
                return Err(anyhow!("no document meetings/{}", event_key));
            }
            snapshot
                .evaluations
                .entry(event_key.to_string())
                .or_default()
                .push(evaluation.clone());
            Ok(())
        })
        .await
    }

    async fn list_evaluations(&self, event_key: &str) -> Result<Vec<Evaluation>> {
        let snapshot = self.snapshot.read().await;
        Ok(snapshot
            .evaluations
            .get(event_key)
            .cloned()
            .unwrap_or_default())
    }

    /// A file-backed store is ready only while its directory exists and is
    /// writable, since every mutation rewrites the snapshot there.
    async fn ping(&self) -> Result<()> {
        let _snapshot = self.snapshot.read().await;
        let Some(parent) = self.path.as_deref().and_then(Path::parent) else {
            return Ok(());
        };
        let dir = if parent.as_os_str().is_empty() {
            Path::new(".")
        } else {
            parent
        };
        let metadata = fs::metadata(dir)
            .await
            .map_err(|err| anyhow!("store directory {} is missing: {}", dir.display(), err))?;
        if metadata.permissions().readonly() {
            return Err(anyhow!("store directory {} is read-only", dir.display()));
        }
        Ok(())
    }
}
