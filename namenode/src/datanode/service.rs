use proto::generated::{
    client_datanode::{
        DeleteFileRequest, GetDataRequest, PutDataRequest, PutDataResponse,
        client_datanode_client::ClientDatanodeClient,
    },
    client_namenode::NodeAddress,
    namenode_datanode::{
        HeartbeatRequest, PingRequest, namenode_datanode_client::NamenodeDatanodeClient,
    },
};
use tonic::transport::Channel;
use utilities::{
    error::{DfsError, DfsResult},
    grpc_channel_pool::GrpcChannelPool,
    logger::{instrument, trace, tracing},
};

/// Calls the metadata engine makes on storage nodes.
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
    /// Announces this engine to `datanode`. Dials fresh so a dead port fails fast.
    #[instrument(name = "service_datanode_ping", skip(self, own), fields(datanode = %datanode))]
    pub async fn ping(&self, datanode: &NodeAddress, own: &NodeAddress) -> DfsResult<bool> {
        let channel = self.pool.connect_fresh(&datanode.endpoint()).await?;
        let response = NamenodeDatanodeClient::new(channel)
            .ping(tonic::Request::new(PingRequest {
                host: own.host.clone(),
                port: own.port,
            }))
            .await?;
        Ok(response.get_ref().ack)
    }
    /// A fresh connection plus a liveness call; any failure means the node is dead.
    #[instrument(name = "service_datanode_heartbeat", skip(self), fields(datanode = %datanode))]
    pub async fn heartbeat(&self, datanode: &NodeAddress) -> DfsResult<()> {
        let channel = self.pool.connect_fresh(&datanode.endpoint()).await?;
        let response = NamenodeDatanodeClient::new(channel)
            .heartbeat(tonic::Request::new(HeartbeatRequest { probe: true }))
            .await?;
        if !response.get_ref().alive {
            return Err(DfsError::Unreachable(format!(
                "datanode {datanode} answered heartbeat negatively"
            )));
        }
        trace!("Datanode alive");
        Ok(())
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
        let response = self.evict_on_error(&addrs, result).await?;
        Ok(response.into_inner().data)
    }
    #[instrument(name = "service_datanode_put_data", skip(self, data, replica_tail), fields(datanode = %datanode))]
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
        let response = self.evict_on_error(&addrs, result).await?;
        Ok(response.into_inner())
    }
    #[instrument(name = "service_datanode_delete_block", skip(self), fields(datanode = %datanode))]
    pub async fn delete_block(
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
        self.evict_on_error(&addrs, result).await?;
        Ok(())
    }
}
