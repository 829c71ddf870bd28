use std::sync::Arc;

use proto::generated::{
    client_namenode::NodeAddress,
    namenode_datanode::{
        HeartbeatRequest, HeartbeatResponse, PingRequest, PingResponse,
        namenode_datanode_server::NamenodeDatanode,
    },
};
use tokio::sync::Mutex;
use tonic::{Request, Response, Status};
use utilities::logger::{info, instrument, trace, tracing};

use crate::datanode_state::DatanodeState;

pub struct NamenodeHandler {
    state: Arc<Mutex<DatanodeState>>,
}

impl NamenodeHandler {
    pub fn new(state: Arc<Mutex<DatanodeState>>) -> Self {
        Self { state }
    }
}

#[tonic::async_trait]
impl NamenodeDatanode for NamenodeHandler {
    #[instrument(name="grpc_namenode_ping",skip(self,request),fields(host = %request.get_ref().host, port = request.get_ref().port))]
    async fn ping(&self, request: Request<PingRequest>) -> Result<Response<PingResponse>, Status> {
        let ping_request = request.into_inner();
        let namenode = NodeAddress {
            host: ping_request.host,
            port: ping_request.port,
        };
        info!(%namenode, "Pinged by namenode");
        self.state.lock().await.record_ping(namenode);
        Ok(Response::new(PingResponse { ack: true }))
    }
    #[instrument(name="grpc_namenode_heartbeat",skip(self,request))]
    async fn heartbeat(
        &self,
        request: Request<HeartbeatRequest>,
    ) -> Result<Response<HeartbeatResponse>, Status> {
        if !request.get_ref().probe {
            return Err(Status::invalid_argument("heartbeat probe must be set"));
        }
        trace!("Heartbeat acknowledged");
        Ok(Response::new(HeartbeatResponse { alive: true }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ping_records_the_caller() {
        let state = Arc::new(Mutex::new(DatanodeState::new()));
        let handler = NamenodeHandler::new(state.clone());
        let response = handler
            .ping(Request::new(PingRequest {
                host: "127.0.0.1".to_owned(),
                port: 5000,
            }))
            .await
            .unwrap();
        assert!(response.get_ref().ack);
        let state = state.lock().await;
        assert_eq!(state.namenode_addrs, Some(NodeAddress::new("127.0.0.1", 5000)));
        assert_eq!(state.pings_received, 1);
    }

    #[tokio::test]
    async fn heartbeat_fails_only_on_false_probe() {
        let handler = NamenodeHandler::new(Arc::new(Mutex::new(DatanodeState::new())));
        let alive = handler
            .heartbeat(Request::new(HeartbeatRequest { probe: true }))
            .await
            .unwrap();
        assert!(alive.get_ref().alive);
        let status = handler
            .heartbeat(Request::new(HeartbeatRequest { probe: false }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), tonic::Code::InvalidArgument);
    }
}
