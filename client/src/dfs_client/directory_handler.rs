use utilities::{
    error::{DfsError, DfsResult},
    logger::{debug, info, instrument, tracing},
    paths::{file_key, normalize_dir},
};

use crate::{datanode_service::DatanodeService, namenode_service::NamenodeService};

/// Namespace operations that are not about a file's bytes.
#[derive(Clone, Debug)]
pub struct DirectoryHandler {
    namenode: NamenodeService,
    datanode: DatanodeService,
}

impl DirectoryHandler {
    pub fn new(namenode: NamenodeService, datanode: DatanodeService) -> Self {
        Self { namenode, datanode }
    }
    /// Creates the directory on every live node, failing on the first error.
    #[instrument(name = "make_dir", skip(self))]
    pub async fn make_dir(&self, dir_path: &str) -> DfsResult<usize> {
        let dir_path = normalize_dir(dir_path);
        let nodes = self.namenode.get_live_nodes().await?;
        if nodes.is_empty() {
            return Err(DfsError::InsufficientReplicas {
                needed: 1,
                available: 0,
            });
        }
        for datanode in &nodes {
            self.datanode.make_dir(datanode, &dir_path).await?;
        }
        Ok(nodes.len())
    }
    /// A source ending in `/` renames a directory on metadata and on every
    /// node; anything else renames a single file within its directory.
    /// Returns how many files moved.
    #[instrument(name = "rename", skip(self))]
    pub async fn rename(&self, src_path: &str, dest_path: &str) -> DfsResult<u32> {
        if !src_path.ends_with('/') {
            self.namenode.rename_file(src_path, dest_path).await?;
            return Ok(1);
        }
        let src_path = normalize_dir(src_path);
        let dest_path = normalize_dir(dest_path);
        let response = self.namenode.rename(&src_path, &dest_path).await?;
        let mut renamed_on = 0;
        for datanode in &response.nodes {
            match self.datanode.rename_dir(datanode, &src_path, &dest_path).await {
                Ok(()) => renamed_on += 1,
                // the node holds nothing under this directory
                Err(DfsError::NotFound(_)) => debug!(%datanode, "Nothing to move"),
                Err(e) => return Err(e),
            }
        }
        if renamed_on == 0 && response.files_renamed == 0 {
            return Err(DfsError::NotFound(format!("directory {src_path:?}")));
        }
        info!(files = response.files_renamed, "Renamed directory");
        Ok(response.files_renamed)
    }
    pub async fn stat(&self, dir_path: &str, file_name: &str) -> DfsResult<u64> {
        self.namenode.file_size(&file_key(dir_path, file_name)).await
    }
    pub async fn list(&self, dir_path: &str) -> DfsResult<Vec<(String, u64)>> {
        Ok(self
            .namenode
            .list(&normalize_dir(dir_path))
            .await?
            .into_iter()
            .map(|entry| (entry.file_name, entry.file_size))
            .collect())
    }
}
