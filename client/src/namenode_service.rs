use proto::generated::client_namenode::{
    BlockPlacement, DeleteFileMetaDataRequest, DeleteMetaDataRequest, FileEntry,
    FileSizeRequest, GetBlockSizeRequest, GetLiveNodesRequest, ListRequest, NodeAddress,
    ReadDataRequest, RenameFileRequest, RenameRequest, RenameResponse, WriteDataRequest,
    client_namenode_client::ClientNamenodeClient,
};
use tonic::transport::Channel;
use utilities::{
    error::DfsResult,
    grpc_channel_pool::GrpcChannelPool,
    logger::{instrument, trace, tracing},
};

/// Client side of the metadata engine protocol.
#[derive(Clone, Debug)]
pub struct NamenodeService {
    addrs: String,
    pool: GrpcChannelPool,
}

impl NamenodeService {
    pub fn new(addrs: impl Into<String>, pool: GrpcChannelPool) -> Self {
        Self {
            addrs: addrs.into(),
            pool,
        }
    }
    async fn get_connection(&self) -> DfsResult<ClientNamenodeClient<Channel>> {
        let channel = self.pool.get_channel(&self.addrs).await?;
        Ok(ClientNamenodeClient::new(channel))
    }
    async fn evict_on_error<T>(&self, result: Result<T, tonic::Status>) -> DfsResult<T> {
        match result {
            Ok(v) => Ok(v),
            Err(status) => {
                if status.code() == tonic::Code::Unavailable {
                    self.pool.evict(&self.addrs).await;
                }
                Err(status.into())
            }
        }
    }
    pub async fn get_block_size(&self) -> DfsResult<u64> {
        let result = self
            .get_connection()
            .await?
            .get_block_size(tonic::Request::new(GetBlockSizeRequest {}))
            .await;
        Ok(self.evict_on_error(result).await?.into_inner().block_size)
    }
    #[instrument(name = "service_namenode_write_data", skip(self))]
    pub async fn write_data(
        &self,
        dir_path: &str,
        file_name: &str,
        file_size: u64,
    ) -> DfsResult<Vec<BlockPlacement>> {
        let result = self
            .get_connection()
            .await?
            .write_data(tonic::Request::new(WriteDataRequest {
                dir_path: dir_path.to_owned(),
                file_name: file_name.to_owned(),
                file_size,
            }))
            .await;
        let blocks = self.evict_on_error(result).await?.into_inner().blocks;
        trace!(blocks = blocks.len(), "Got placements");
        Ok(blocks)
    }
    #[instrument(name = "service_namenode_read_data", skip(self))]
    pub async fn read_data(&self, dir_path: &str, file_name: &str) -> DfsResult<Vec<BlockPlacement>> {
        let result = self
            .get_connection()
            .await?
            .read_data(tonic::Request::new(ReadDataRequest {
                dir_path: dir_path.to_owned(),
                file_name: file_name.to_owned(),
            }))
            .await;
        Ok(self.evict_on_error(result).await?.into_inner().blocks)
    }
    /// Size of the file at the full key `path`.
    pub async fn file_size(&self, path: &str) -> DfsResult<u64> {
        let result = self
            .get_connection()
            .await?
            .file_size(tonic::Request::new(FileSizeRequest {
                path: path.to_owned(),
            }))
            .await;
        Ok(self.evict_on_error(result).await?.into_inner().file_size)
    }
    pub async fn get_live_nodes(&self) -> DfsResult<Vec<NodeAddress>> {
        let result = self
            .get_connection()
            .await?
            .get_live_nodes(tonic::Request::new(GetLiveNodesRequest {}))
            .await;
        Ok(self.evict_on_error(result).await?.into_inner().nodes)
    }
    #[instrument(name = "service_namenode_delete_meta_data", skip(self))]
    pub async fn delete_meta_data(&self, dir_path: &str) -> DfsResult<u32> {
        let result = self
            .get_connection()
            .await?
            .delete_meta_data(tonic::Request::new(DeleteMetaDataRequest {
                dir_path: dir_path.to_owned(),
            }))
            .await;
        Ok(self.evict_on_error(result).await?.into_inner().files_removed)
    }
    #[instrument(name = "service_namenode_delete_file_meta_data", skip(self))]
    pub async fn delete_file_meta_data(&self, dir_path: &str, file_name: &str) -> DfsResult<bool> {
        let result = self
            .get_connection()
            .await?
            .delete_file_meta_data(tonic::Request::new(DeleteFileMetaDataRequest {
                dir_path: dir_path.to_owned(),
                file_name: file_name.to_owned(),
            }))
            .await;
        Ok(self.evict_on_error(result).await?.into_inner().file_present)
    }
    #[instrument(name = "service_namenode_rename", skip(self))]
    pub async fn rename(&self, src_path: &str, dest_path: &str) -> DfsResult<RenameResponse> {
        let result = self
            .get_connection()
            .await?
            .rename(tonic::Request::new(RenameRequest {
                src_path: src_path.to_owned(),
                dest_path: dest_path.to_owned(),
            }))
            .await;
        Ok(self.evict_on_error(result).await?.into_inner())
    }
    #[instrument(name = "service_namenode_rename_file", skip(self))]
    pub async fn rename_file(&self, src_file: &str, dest_file: &str) -> DfsResult<bool> {
        let result = self
            .get_connection()
            .await?
            .rename_file(tonic::Request::new(RenameFileRequest {
                src_file: src_file.to_owned(),
                dest_file: dest_file.to_owned(),
            }))
            .await;
        Ok(self.evict_on_error(result).await?.into_inner().renamed)
    }
    pub async fn list(&self, dir_path: &str) -> DfsResult<Vec<FileEntry>> {
        let result = self
            .get_connection()
            .await?
            .list(tonic::Request::new(ListRequest {
                dir_path: dir_path.to_owned(),
            }))
            .await;
        Ok(self.evict_on_error(result).await?.into_inner().entries)
    }
}
