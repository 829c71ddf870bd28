use std::future::Future;

use utilities::error::DfsResult;

/// Block persistence of a datanode. Blocks live under a directory path that
/// mirrors the namespace, one file per block id.
pub trait Storage {
    /// Writes the block atomically, replacing any previous copy. Returns the
    /// number of bytes stored.
    fn put_block(
        &self,
        path: &str,
        block_id: &str,
        data: &[u8],
    ) -> impl Future<Output = DfsResult<u64>> + Send;
    fn get_block(&self, path: &str, block_id: &str)
    -> impl Future<Output = DfsResult<Vec<u8>>> + Send;
    fn make_dir(&self, path: &str) -> impl Future<Output = DfsResult<()>> + Send;
    /// Removes the directory and everything under it. Missing paths are fine.
    fn delete_path(&self, path: &str) -> impl Future<Output = DfsResult<()>> + Send;
    /// Returns whether a copy was actually removed.
    fn delete_block(
        &self,
        path: &str,
        block_id: &str,
    ) -> impl Future<Output = DfsResult<bool>> + Send;
    fn rename_dir(
        &self,
        src_path: &str,
        dest_path: &str,
    ) -> impl Future<Output = DfsResult<()>> + Send;
}

#[cfg(test)]
pub mod tests {
    use utilities::error::DfsError;

    use super::*;
    pub async fn storage_test(storage: impl Storage) -> DfsResult<()> {
        let original_data = b"hello world";

        let written = storage.put_block("docs/", "b-1", original_data).await?;
        assert_eq!(written as usize, original_data.len());
        assert_eq!(storage.get_block("docs/", "b-1").await?, original_data);

        // overwrite replaces the previous copy
        storage.put_block("docs/", "b-1", b"bye").await?;
        assert_eq!(storage.get_block("docs/", "b-1").await?, b"bye");

        assert!(matches!(
            storage.get_block("docs/", "missing").await,
            Err(DfsError::NotFound(_))
        ));

        storage.rename_dir("docs/", "papers/").await?;
        assert_eq!(storage.get_block("papers/", "b-1").await?, b"bye");
        assert!(storage.get_block("docs/", "b-1").await.is_err());

        assert!(storage.delete_block("papers/", "b-1").await?);
        assert!(!storage.delete_block("papers/", "b-1").await?);

        storage.make_dir("tmp/inner/").await?;
        storage.make_dir("tmp/inner/").await?;
        storage.put_block("tmp/inner/", "b-2", b"x").await?;
        storage.delete_path("tmp/").await?;
        storage.delete_path("tmp/").await?;
        assert!(storage.get_block("tmp/inner/", "b-2").await.is_err());
        Ok(())
    }
}
