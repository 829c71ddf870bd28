use std::path::Path;

use utilities::{
    error::{DfsError, DfsResult},
    logger::{info, instrument, trace, tracing, warn},
    paths::{normalize_dir, validate_file_name},
};

use crate::{
    datanode_service::DatanodeService, file_chunker::FileChunker,
    namenode_service::NamenodeService,
};

/// What a successful put wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreReport {
    pub file_size: u64,
    pub blocks: usize,
    /// blocks whose chain stored fewer copies than the placement asked for
    pub under_replicated: usize,
}

#[derive(Clone, Debug)]
pub struct StoreFileHandler {
    namenode: NamenodeService,
    datanode: DatanodeService,
}

impl StoreFileHandler {
    pub fn new(namenode: NamenodeService, datanode: DatanodeService) -> Self {
        Self { namenode, datanode }
    }
    /// Allocates blocks for the local file and pushes each one to the head
    /// of its chain. Stops at the first block that fails.
    #[instrument(name = "store_file", skip(self, local_file_path), fields(local = %local_file_path.as_ref().display()))]
    pub async fn store_file(
        &self,
        local_file_path: impl AsRef<Path>,
        dir_path: &str,
        file_name: &str,
    ) -> DfsResult<StoreReport> {
        validate_file_name(file_name)?;
        let dir_path = normalize_dir(dir_path);
        let file_metadata = tokio::fs::metadata(local_file_path.as_ref()).await?;
        if file_metadata.is_dir() {
            return Err(DfsError::InvalidArgument(format!(
                "provided file path {} is a directory",
                local_file_path.as_ref().display()
            )));
        }
        let block_size = self.namenode.get_block_size().await?;
        if block_size == 0 {
            return Err(DfsError::Inconsistent(
                "namenode reported a block size of 0".to_owned(),
            ));
        }
        let mut chunker = FileChunker::open(local_file_path.as_ref(), block_size).await?;
        let file_size = chunker.remaining();
        info!(file_size, block_size, "Storing file");

        let placements = self
            .namenode
            .write_data(&dir_path, file_name, file_size)
            .await?;
        let expected = file_size.div_ceil(block_size) as usize;
        if placements.len() != expected {
            return Err(DfsError::Inconsistent(format!(
                "expected {expected} block placements for {file_size} bytes, got {}",
                placements.len()
            )));
        }

        let mut under_replicated = 0;
        for placement in &placements {
            let Some((primary, tail)) = placement.addresses.split_first() else {
                return Err(DfsError::InsufficientReplicas {
                    needed: 1,
                    available: 0,
                });
            };
            let Some(chunk) = chunker.next_chunk().await? else {
                return Err(DfsError::Inconsistent(
                    "local file shrank while it was being stored".to_owned(),
                ));
            };
            trace!(block_id = %placement.block_id, %primary, len = chunk.len(), "Sending block");
            let response = self
                .datanode
                .put_data(primary, &dir_path, &placement.block_id, chunk, tail.to_vec())
                .await?;
            if !response.stored {
                return Err(DfsError::Internal(format!(
                    "datanode {primary} did not store block {}",
                    placement.block_id
                )));
            }
            if (response.copies_written as usize) < placement.addresses.len() {
                under_replicated += 1;
                warn!(
                    block_id = %placement.block_id,
                    copies = response.copies_written,
                    wanted = placement.addresses.len(),
                    forward_error = %response.forward_error,
                    "Block stored with fewer copies than placed"
                );
            }
        }
        Ok(StoreReport {
            file_size,
            blocks: placements.len(),
            under_replicated,
        })
    }
}
