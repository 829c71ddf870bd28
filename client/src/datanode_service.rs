use proto::generated::{
    client_datanode::{
        DeleteFileRequest, DeletePathRequest, GetDataRequest, MakeDirRequest, PutDataRequest,
        PutDataResponse, RenameDirRequest, client_datanode_client::ClientDatanodeClient,
    },
    client_namenode::NodeAddress,
};
use tonic::transport::Channel;
use utilities::{
    error::{DfsError, DfsResult},
    grpc_channel_pool::GrpcChannelPool,
    logger::{instrument, trace, tracing},
};

/// Byte level calls the client makes on storage nodes.
#[derive(Clone, Debug, Default)]
pub struct DatanodeService {
    pool: GrpcChannelPool,
}

impl DatanodeService {
    pub fn new(pool: GrpcChannelPool) -> Self {
        Self { pool }
    }
    async fn get_connection(&self, addrs: &str) -> DfsResult<ClientDatanodeClient<Channel>> {
        let channel = self.pool.get_channel(addrs).await?;
        Ok(ClientDatanodeClient::new(channel))
    }
    async fn evict_on_error<T>(&self, addrs: &str, result: Result<T, tonic::Status>) -> DfsResult<T> {
        match result {
            Ok(v) => Ok(v),
            Err(status) => {
                self.pool.evict(addrs).await;
                Err(status.into())
            }
        }
    }
    fn check_status(datanode: &NodeAddress, status: bool) -> DfsResult<()> {
        if status {
            Ok(())
        } else {
            Err(DfsError::Internal(format!(
                "datanode {datanode} reported failure"
            )))
        }
    }
    #[instrument(name = "service_datanode_put_data", skip(self, data, replica_tail), fields(datanode = %datanode, len = data.len()))]
    pub async fn put_data(
        &self,
        datanode: &NodeAddress,
        path: &str,
        block_id: &str,
        data: Vec<u8>,
        replica_tail: Vec<NodeAddress>,
    ) -> DfsResult<PutDataResponse> {
        let addrs = datanode.endpoint();
        let result = self
            .get_connection(&addrs)
            .await?
            .put_data(tonic::Request::new(PutDataRequest {
                path: path.to_owned(),
                block_id: block_id.to_owned(),
                data,
                replica_tail,
            }))
            .await;
        let response = self.evict_on_error(&addrs, result).await?.into_inner();
        trace!(copies = response.copies_written, "Block stored");
        Ok(response)
    }
    #[instrument(name = "service_datanode_get_data", skip(self), fields(datanode = %datanode))]
    pub async fn get_data(
        &self,
        datanode: &NodeAddress,
        path: &str,
        block_id: &str,
    ) -> DfsResult<Vec<u8>> {
        let addrs = datanode.endpoint();
        let result = self
            .get_connection(&addrs)
            .await?
            .get_data(tonic::Request::new(GetDataRequest {
                path: path.to_owned(),
                block_id: block_id.to_owned(),
            }))
            .await;
        Ok(self.evict_on_error(&addrs, result).await?.into_inner().data)
    }
    #[instrument(name = "service_datanode_make_dir", skip(self), fields(datanode = %datanode))]
    pub async fn make_dir(&self, datanode: &NodeAddress, path: &str) -> DfsResult<()> {
        let addrs = datanode.endpoint();
        let result = self
            .get_connection(&addrs)
            .await?
            .make_dir(tonic::Request::new(MakeDirRequest {
                path: path.to_owned(),
            }))
            .await;
        let status = self.evict_on_error(&addrs, result).await?.into_inner().status;
        Self::check_status(datanode, status)
    }
    #[instrument(name = "service_datanode_delete_path", skip(self), fields(datanode = %datanode))]
    pub async fn delete_path(&self, datanode: &NodeAddress, path: &str) -> DfsResult<()> {
        let addrs = datanode.endpoint();
        let result = self
            .get_connection(&addrs)
            .await?
            .delete_path(tonic::Request::new(DeletePathRequest {
                path: path.to_owned(),
            }))
            .await;
        let status = self.evict_on_error(&addrs, result).await?.into_inner().status;
        Self::check_status(datanode, status)
    }
    #[instrument(name = "service_datanode_delete_file", skip(self), fields(datanode = %datanode))]
    pub async fn delete_file(
        &self,
        datanode: &NodeAddress,
        path: &str,
        block_id: &str,
    ) -> DfsResult<()> {
        let addrs = datanode.endpoint();
        let result = self
            .get_connection(&addrs)
            .await?
            .delete_file(tonic::Request::new(DeleteFileRequest {
                path: path.to_owned(),
                block_id: block_id.to_owned(),
            }))
            .await;
        let status = self.evict_on_error(&addrs, result).await?.into_inner().status;
        Self::check_status(datanode, status)
    }
    #[instrument(name = "service_datanode_rename_dir", skip(self), fields(datanode = %datanode))]
    pub async fn rename_dir(
        &self,
        datanode: &NodeAddress,
        src_path: &str,
        dest_path: &str,
    ) -> DfsResult<()> {
        let addrs = datanode.endpoint();
        let result = self
            .get_connection(&addrs)
            .await?
            .rename_dir(tonic::Request::new(RenameDirRequest {
                src_path: src_path.to_owned(),
                dest_path: dest_path.to_owned(),
            }))
            .await;
        let status = self.evict_on_error(&addrs, result).await?.into_inner().status;
        Self::check_status(datanode, status)
    }
}
