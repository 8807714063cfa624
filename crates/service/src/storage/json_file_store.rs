use std::{ffi::OsString, io::ErrorKind, marker::PhantomData, path::{Path, PathBuf}, sync::Arc};

use serde::{de::DeserializeOwned, Serialize};
use tokio::{fs, sync::Mutex};
use tracing::{debug, info};

use crate::errors::ServiceError;

/// Generic JSON file-backed array store.
///
/// The file holds a single JSON array and is the only source of truth: every
/// call re-reads it, nothing is cached between operations. Writes go to a
/// uniquely named sibling temp file which is then renamed over the target.
///
/// Load-mutate-save sequences are serialized by a mutex owned by this handle,
/// so a process must share one handle (behind `Arc`) per file. Separate
/// handles on the same path never corrupt the file, but their transactions
/// can overwrite each other's changes.
pub struct JsonFileStore<T> {
    file_path: PathBuf,
    write_lock: Mutex<()>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Create a handle for `path`, creating parent directories. The file itself is left alone.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ServiceError::storage(parent, e))?;
        }
        Ok(Arc::new(Self { file_path, write_lock: Mutex::new(()), _marker: PhantomData }))
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Write an empty array if the file does not exist yet. Existing files are never touched.
    pub async fn ensure_initialized(&self) -> Result<(), ServiceError> {
        let _guard = self.write_lock.lock().await;
        match fs::metadata(&self.file_path).await {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %self.file_path.display(), "initializing empty store file");
                self.write_all(&[]).await
            }
            Err(e) => Err(ServiceError::storage(&self.file_path, e)),
        }
    }

    /// Read and decode the whole array. Missing or malformed files are errors.
    pub async fn load(&self) -> Result<Vec<T>, ServiceError> {
        let bytes = fs::read(&self.file_path)
            .await
            .map_err(|e| ServiceError::storage(&self.file_path, e))?;
        serde_json::from_slice(&bytes).map_err(|e| ServiceError::storage(&self.file_path, e))
    }

    /// Overwrite the file with `items`.
    pub async fn save(&self, items: &[T]) -> Result<(), ServiceError> {
        let _guard = self.write_lock.lock().await;
        self.write_all(items).await
    }

    /// Load, apply `f`, and persist the result while holding the write lock.
    /// When `f` fails nothing is written.
    pub async fn transact<R, F>(&self, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R, ServiceError>,
    {
        let _guard = self.write_lock.lock().await;
        let mut items = self.load().await?;
        let out = f(&mut items)?;
        self.write_all(&items).await?;
        Ok(out)
    }

    async fn write_all(&self, items: &[T]) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(items)
            .map_err(|e| ServiceError::storage(&self.file_path, e))?;
        let tmp = self.temp_path();
        fs::write(&tmp, data).await.map_err(|e| ServiceError::storage(&tmp, e))?;
        fs::rename(&tmp, &self.file_path)
            .await
            .map_err(|e| ServiceError::storage(&self.file_path, e))?;
        debug!(path = %self.file_path.display(), count = items.len(), "store saved");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .file_path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("store"));
        name.push(format!(".{}.tmp", uuid::Uuid::new_v4().simple()));
        self.file_path.with_file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tmp_file(prefix: &str) -> PathBuf {
        std::env::temp_dir().join(format!("{}_{}.json", prefix, uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn json_file_store_save_and_load() -> Result<(), anyhow::Error> {
        let tmp = tmp_file("json_file_store");
        let store = JsonFileStore::<String>::new(&tmp).await?;
        store.ensure_initialized().await?;
        assert!(store.load().await?.is_empty());

        store.save(&["a".to_string(), "b".to_string()]).await?;
        assert_eq!(store.load().await?, vec!["a", "b"]);

        // a second handle sees the same data
        let reopened = JsonFileStore::<String>::new(&tmp).await?;
        assert_eq!(reopened.load().await?, vec!["a", "b"]);

        let _ = fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn writers_on_separate_handles_leave_a_valid_file() -> Result<(), anyhow::Error> {
        let dir = std::env::temp_dir().join(format!("json_file_store_dir_{}", uuid::Uuid::new_v4()));
        let path = dir.join("items.json");
        let first = JsonFileStore::<u32>::new(&path).await?;
        let second = JsonFileStore::<u32>::new(&path).await?;

        let mut handles = Vec::new();
        for i in 0..20u32 {
            let store = if i % 2 == 0 { Arc::clone(&first) } else { Arc::clone(&second) };
            handles.push(tokio::spawn(async move { store.save(&[i; 50]).await }));
        }
        for h in handles {
            h.await??;
        }

        let items = first.load().await?;
        assert_eq!(items.len(), 50);
        assert!(items.iter().all(|v| *v == items[0]));

        // no temp files left behind
        let mut entries = fs::read_dir(&dir).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            names.push(entry.file_name());
        }
        assert_eq!(names, vec![OsString::from("items.json")]);

        let _ = fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn ensure_initialized_keeps_existing_content() -> Result<(), anyhow::Error> {
        let tmp = tmp_file("json_file_store_keep");
        fs::write(&tmp, br#"["kept"]"#).await?;
        let store = JsonFileStore::<String>::new(&tmp).await?;
        store.ensure_initialized().await?;
        assert_eq!(store.load().await?, vec!["kept"]);
        let _ = fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn load_missing_file_is_storage_error() -> Result<(), anyhow::Error> {
        let store = JsonFileStore::<String>::new(tmp_file("json_file_store_missing")).await?;
        assert!(matches!(store.load().await, Err(ServiceError::Storage(_))));
        Ok(())
    }

    #[tokio::test]
    async fn load_malformed_file_is_storage_error() -> Result<(), anyhow::Error> {
        let tmp = tmp_file("json_file_store_bad");
        fs::write(&tmp, b"{not json").await?;
        let store = JsonFileStore::<String>::new(&tmp).await?;
        assert!(matches!(store.load().await, Err(ServiceError::Storage(_))));
        let _ = fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn failed_transaction_writes_nothing() -> Result<(), anyhow::Error> {
        let tmp = tmp_file("json_file_store_tx");
        let store = JsonFileStore::<u32>::new(&tmp).await?;
        store.save(&[1, 2]).await?;
        let before = fs::read(&tmp).await?;

        let res: Result<(), _> = store
            .transact(|items| {
                items.push(3);
                Err(ServiceError::not_found("item"))
            })
            .await;
        assert!(matches!(res, Err(ServiceError::NotFound(_))));
        assert_eq!(fs::read(&tmp).await?, before);

        let len = store.transact(|items| { items.push(3); Ok(items.len()) }).await?;
        assert_eq!(len, 3);
        assert_eq!(store.load().await?, vec![1, 2, 3]);

        let _ = fs::remove_file(&tmp).await;
        Ok(())
    }

    #[test]
    fn temp_paths_are_unique_siblings() {
        let store = JsonFileStore::<u8> {
            file_path: PathBuf::from("/data/blog_posts.json"),
            write_lock: Mutex::new(()),
            _marker: PhantomData,
        };
        let a = store.temp_path();
        let b = store.temp_path();
        assert_ne!(a, b);
        for tmp in [a, b] {
            assert_eq!(tmp.parent(), Some(Path::new("/data")));
            let name = tmp.file_name().unwrap().to_string_lossy().into_owned();
            assert!(name.starts_with("blog_posts.json."));
            assert!(name.ends_with(".tmp"));
        }
    }
}
