use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::{Mutex, RwLock, RwLockReadGuard};
use yakugo_core::Result;

use crate::snapshot::JsonSnapshot;

/// Keyed rows in memory, optionally mirrored to a [`JsonSnapshot`].
///
/// Changes apply in place. With a snapshot, the rows are encoded under the
/// write lock and the file is replaced on the blocking pool after the lock is
/// released; a failed write restores the one row that changed. `persist`
/// keeps snapshot writes in the order their changes were applied.
#[derive(Debug)]
pub(crate) struct Table<K, V> {
    rows: RwLock<BTreeMap<K, V>>,
    snapshot: Option<JsonSnapshot>,
    persist: Mutex<()>,
}

impl<K, V> Default for Table<K, V> {
    fn default() -> Self {
        Self {
            rows: RwLock::default(),
            snapshot: None,
            persist: Mutex::default(),
        }
    }
}

impl<K, V> Table<K, V>
where
    K: Ord + Clone,
    V: Clone + Serialize + DeserializeOwned,
{
    /// `loaded` rows keyed by `key_of`, written back to `snapshot` on every change
    pub fn mirrored(snapshot: JsonSnapshot, loaded: Vec<V>, key_of: impl Fn(&V) -> K) -> Self {
        let rows = loaded.into_iter().map(|row| (key_of(&row), row)).collect();

        Self {
            rows: RwLock::new(rows),
            snapshot: Some(snapshot),
            persist: Mutex::default(),
        }
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, BTreeMap<K, V>> {
        self.rows.read().await
    }

    /// Run `change` on the row at `key` (`None` when absent). The row is
    /// stored, replaced or removed according to what `change` leaves behind.
    pub async fn apply<F>(&self, key: K, change: F) -> Result<()>
    where
        F: FnOnce(&mut Option<V>) -> Result<()>,
    {
        let _persist = match &self.snapshot {
            Some(_) => Some(self.persist.lock().await),
            None => None,
        };

        let (snapshot, previous, encoded) = {
            let mut rows = self.rows.write().await;
            let previous = rows.get(&key).cloned();
            let mut slot = previous.clone();
            change(&mut slot)?;
            put(&mut *rows, &key, slot);

            let Some(snapshot) = &self.snapshot else {
                return Ok(());
            };
            match snapshot.encode(&rows.values().collect::<Vec<_>>()) {
                Ok(encoded) => (snapshot, previous, encoded),
                Err(e) => {
                    put(&mut *rows, &key, previous);
                    return Err(e);
                }
            }
        };

        if let Err(e) = snapshot.write(encoded).await {
            tracing::warn!("restoring row after failed write to {}", snapshot.path().display());
            put(&mut *self.rows.write().await, &key, previous);
            return Err(e);
        }
        Ok(())
    }
}

fn put<K: Ord + Clone, V>(rows: &mut BTreeMap<K, V>, key: &K, value: Option<V>) {
    match value {
        Some(value) => {
            rows.insert(key.clone(), value);
        }
        None => {
            rows.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use yakugo_core::Error;

    use super::*;

    /// (word, translation) rows keyed by word
    type Words = Table<String, (String, String)>;

    fn open(path: &std::path::Path) -> Words {
        let snapshot = JsonSnapshot::new(path);
        let loaded = snapshot.load().unwrap();
        Words::mirrored(snapshot, loaded, |(word, _)| word.clone())
    }

    async fn set(table: &Words, word: &str, translated: &str) -> Result<()> {
        let row = (word.to_string(), translated.to_string());
        table
            .apply(word.to_string(), |slot| {
                *slot = Some(row);
                Ok(())
            })
            .await
    }

    #[tokio::test]
    async fn in_memory_changes_apply_in_place() {
        let table = Words::default();
        set(&table, "book", "本").await.unwrap();
        set(&table, "run", "走る").await.unwrap();
        table
            .apply("run".into(), |slot| {
                slot.take();
                Ok(())
            })
            .await
            .unwrap();

        let rows = table.read().await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows["book"].1, "本");
    }

    #[tokio::test]
    async fn rejected_change_leaves_row_alone() {
        let table = Words::default();
        set(&table, "book", "本").await.unwrap();

        let result = table
            .apply("book".into(), |slot| {
                *slot = Some(("book".into(), "書籍".into()));
                Err(Error::TranslationAlreadyExists)
            })
            .await;

        assert!(matches!(result, Err(Error::TranslationAlreadyExists)));
        assert_eq!(table.read().await["book"].1, "本");
    }

    #[tokio::test]
    async fn changes_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.json");
        {
            let table = open(&path);
            set(&table, "book", "本").await.unwrap();
            set(&table, "book", "書籍").await.unwrap();
        }

        let reopened = open(&path);
        let rows = reopened.read().await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows["book"].1, "書籍");
    }

    #[tokio::test]
    async fn failed_write_restores_only_the_changed_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.json");
        let table = open(&path);
        set(&table, "book", "本").await.unwrap();
        set(&table, "run", "走る").await.unwrap();

        // a directory in place of the file makes the rename fail
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        let update = set(&table, "book", "書籍").await;
        assert!(matches!(update, Err(Error::Storage { .. })));
        let add = set(&table, "cat", "猫").await;
        assert!(matches!(add, Err(Error::Storage { .. })));

        let rows = table.read().await;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows["book"].1, "本");
        assert_eq!(rows["run"].1, "走る");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_changes_all_reach_the_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.json");
        let table = Arc::new(open(&path));

        let writers: Vec<_> = (0..16)
            .map(|i| {
                let table = table.clone();
                tokio::spawn(async move { set(&table, &format!("w{i:02}"), "x").await })
            })
            .collect();
        for writer in writers {
            writer.await.unwrap().unwrap();
        }

        assert_eq!(table.read().await.len(), 16);
        let reopened = open(&path);
        assert_eq!(reopened.read().await.len(), 16);
    }
}
