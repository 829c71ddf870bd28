use proto::generated::{
    client_namenode::NodeAddress,
    datanode_datanode::{ReplicateBlockRequest, ReplicateBlockResponse, peer_client::PeerClient},
};
use tonic::transport::Channel;
use utilities::{
    error::DfsResult,
    grpc_channel_pool::GrpcChannelPool,
    logger::{instrument, trace, tracing},
};

#[derive(Clone, Debug, Default)]
pub struct PeerService {
    pool: GrpcChannelPool,
}

impl PeerService {
    pub fn new(pool: GrpcChannelPool) -> Self {
        Self { pool }
    }

    async fn get_grpc_connection(&self, addrs: &str) -> DfsResult<PeerClient<Channel>> {
        let channel = self.pool.get_channel(addrs).await?;
        Ok(PeerClient::new(channel))
    }
    /// Hands the block to `target`, which stores it and keeps forwarding along
    /// `replica_tail`.
    #[instrument(name = "service_peer_replicate_block", skip(self, data, replica_tail), fields(target = %target))]
    pub async fn replicate_block(
        &self,
        target: &NodeAddress,
        path: &str,
        block_id: &str,
        data: &[u8],
        replica_tail: &[NodeAddress],
    ) -> DfsResult<ReplicateBlockResponse> {
        let addrs = target.endpoint();
        let mut client = self.get_grpc_connection(&addrs).await?;
        let request = tonic::Request::new(ReplicateBlockRequest {
            path: path.to_owned(),
            block_id: block_id.to_owned(),
            data: data.to_vec(),
            replica_tail: replica_tail.to_vec(),
        });
        trace!(remaining = replica_tail.len(), "Forwarding block to next replica");
        match client.replicate_block(request).await {
            Ok(response) => Ok(response.into_inner()),
            Err(status) => {
                self.pool.evict(&addrs).await;
                Err(status.into())
            }
        }
    }
}
