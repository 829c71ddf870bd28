use std::path::Path;

use proto::generated::client_namenode::BlockPlacement;
use tokio::{fs::OpenOptions, io::AsyncWriteExt};
use utilities::{
    error::{DfsError, DfsResult},
    logger::{error, instrument, trace, tracing, warn},
    paths::{file_key, normalize_dir},
};

use crate::{datanode_service::DatanodeService, namenode_service::NamenodeService};

#[derive(Clone, Debug)]
pub struct FetchFileHandler {
    namenode: NamenodeService,
    datanode: DatanodeService,
}

impl FetchFileHandler {
    pub fn new(namenode: NamenodeService, datanode: DatanodeService) -> Self {
        Self { namenode, datanode }
    }
    /// Reassembles the remote file into `local_file_path`, replacing whatever
    /// was there. Returns the number of bytes written.
    #[instrument(name = "fetch_file", skip(self, local_file_path), fields(local = %local_file_path.as_ref().display()))]
    pub async fn fetch_file(
        &self,
        dir_path: &str,
        file_name: &str,
        local_file_path: impl AsRef<Path>,
    ) -> DfsResult<u64> {
        let dir_path = normalize_dir(dir_path);
        let placements = self.namenode.read_data(&dir_path, file_name).await?;
        // an empty placement list is either an empty file or no file at all
        let file_size = self
            .namenode
            .file_size(&file_key(&dir_path, file_name))
            .await?;
        if placements.is_empty() && file_size > 0 {
            return Err(DfsError::Inconsistent(format!(
                "file of {file_size} bytes has no blocks"
            )));
        }

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(local_file_path.as_ref())
            .await?;
        let mut written = 0u64;
        for placement in &placements {
            let data = self.fetch_block(&dir_path, placement).await?;
            file.write_all(&data).await?;
            written += data.len() as u64;
        }
        file.flush().await?;
        if written != file_size {
            warn!(written, file_size, "Fetched byte count differs from recorded size");
        }
        Ok(written)
    }
    /// Tries each replica in placement order until one answers.
    async fn fetch_block(&self, dir_path: &str, placement: &BlockPlacement) -> DfsResult<Vec<u8>> {
        let mut last_error = None;
        for datanode in &placement.addresses {
            match self
                .datanode
                .get_data(datanode, dir_path, &placement.block_id)
                .await
            {
                Ok(data) => {
                    trace!(block_id = %placement.block_id, %datanode, len = data.len(), "Fetched block");
                    return Ok(data);
                }
                Err(e) if e.is_recoverable() => {
                    warn!(block_id = %placement.block_id, %datanode, error = %e, "Replica failed, trying next");
                    last_error = Some(e);
                }
                Err(e) => {
                    error!(block_id = %placement.block_id, %datanode, error = %e, "Error while fetching block");
                    return Err(e);
                }
            }
        }
        Err(last_error.unwrap_or_else(|| {
            DfsError::NotFound(format!("block {} has no replicas", placement.block_id))
        }))
    }
}
