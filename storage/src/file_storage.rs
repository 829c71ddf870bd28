use std::{
    io::ErrorKind,
    path::{Component, Path, PathBuf},
};
use tracing::{error, info, instrument, trace};
use utilities::error::{DfsError, DfsResult};

use crate::storage::Storage;
use tokio::fs;

const PART_SUFFIX: &str = ".part";

#[derive(Clone, Debug)]
pub struct FileStorage {
    root: PathBuf,
}
impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> DfsResult<Self> {
        let root = root.into();
        match std::fs::create_dir_all(&root) {
            Ok(_v) => {
                info!(root=%root.display(),"Created root for storage");
            }
            Err(e) => {
                error!(root=%root.display(),error=%e,"Error while creating the root for storage");
                return Err(e.into());
            }
        }
        Ok(FileStorage { root })
    }
    pub fn root(&self) -> &Path {
        &self.root
    }
    /// Maps a namespace directory onto the local root, refusing anything that
    /// could escape it.
    fn dir_path(&self, path: &str) -> DfsResult<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        for component in relative.components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                _ => {
                    return Err(DfsError::InvalidArgument(format!(
                        "path {path:?} is not a plain relative path"
                    )));
                }
            }
        }
        Ok(self.root.join(relative))
    }
    fn block_path(&self, path: &str, block_id: &str) -> DfsResult<PathBuf> {
        if block_id.is_empty() || block_id.contains('/') || block_id == ".." || block_id == "." {
            return Err(DfsError::InvalidArgument(format!(
                "invalid block id {block_id:?}"
            )));
        }
        Ok(self.dir_path(path)?.join(block_id))
    }
}
impl Storage for FileStorage {
    #[instrument(name = "file_storage_put_block", skip(self, data), fields(len = data.len()))]
    async fn put_block(&self, path: &str, block_id: &str, data: &[u8]) -> DfsResult<u64> {
        let block_path = self.block_path(path, block_id)?;
        if let Some(parent) = block_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        // write aside then rename so readers never see a torn block
        let staged_path = block_path.with_file_name(format!("{block_id}{PART_SUFFIX}"));
        fs::write(&staged_path, data).await?;
        fs::rename(&staged_path, &block_path).await?;
        trace!("block stored");
        Ok(data.len() as u64)
    }
    #[instrument(name = "file_storage_get_block", skip(self))]
    async fn get_block(&self, path: &str, block_id: &str) -> DfsResult<Vec<u8>> {
        let block_path = self.block_path(path, block_id)?;
        match fs::read(&block_path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(DfsError::NotFound(format!(
                "block {block_id} under {path:?}"
            ))),
            Err(e) => Err(e.into()),
        }
    }
    #[instrument(name = "file_storage_make_dir", skip(self))]
    async fn make_dir(&self, path: &str) -> DfsResult<()> {
        fs::create_dir_all(self.dir_path(path)?).await?;
        Ok(())
    }
    #[instrument(name = "file_storage_delete_path", skip(self))]
    async fn delete_path(&self, path: &str) -> DfsResult<()> {
        let dir = self.dir_path(path)?;
        if dir == self.root {
            return Err(DfsError::InvalidArgument(
                "refusing to delete the storage root".to_owned(),
            ));
        }
        match fs::remove_dir_all(&dir).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                trace!("path already absent");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
    #[instrument(name = "file_storage_delete_block", skip(self))]
    async fn delete_block(&self, path: &str, block_id: &str) -> DfsResult<bool> {
        match fs::remove_file(self.block_path(path, block_id)?).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
    #[instrument(name = "file_storage_rename_dir", skip(self))]
    async fn rename_dir(&self, src_path: &str, dest_path: &str) -> DfsResult<()> {
        let src = self.dir_path(src_path)?;
        let dest = self.dir_path(dest_path)?;
        if !fs::try_exists(&src).await? {
            return Err(DfsError::NotFound(format!("directory {src_path:?}")));
        }
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::rename(&src, &dest).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::storage::tests::storage_test;

    use super::*;
    #[tokio::test]
    async fn file_storage_test() -> DfsResult<()> {
        let dir = tempfile::tempdir()?;
        let storage = FileStorage::new(dir.path())?;
        storage_test(storage).await
    }

    #[tokio::test]
    async fn rejects_paths_escaping_the_root() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();
        let result = storage.put_block("../outside/", "b-1", b"x").await;
        assert!(matches!(result, Err(DfsError::InvalidArgument(_))));
        let result = storage.get_block("docs/", "..").await;
        assert!(matches!(result, Err(DfsError::InvalidArgument(_))));
        assert!(storage.delete_path("").await.is_err());
    }

    #[tokio::test]
    async fn blocks_land_under_their_directory() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();
        storage.put_block("Test1/", "abc", b"hello").await.unwrap();
        storage.put_block("", "root-block", b"r").await.unwrap();
        assert!(dir.path().join("Test1").join("abc").is_file());
        assert!(dir.path().join("root-block").is_file());
        assert!(!dir.path().join("Test1").join("abc.part").exists());
    }

    #[tokio::test]
    async fn renaming_a_missing_directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();
        let result = storage.rename_dir("nothing/", "else/").await;
        assert!(matches!(result, Err(DfsError::NotFound(_))));
    }
}
