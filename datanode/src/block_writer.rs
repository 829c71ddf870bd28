use proto::generated::client_namenode::NodeAddress;
use storage::{file_storage::FileStorage, storage::Storage};
use utilities::{
    error::DfsResult,
    logger::{instrument, trace, tracing, warn},
};

use crate::peer::service::PeerService;

#[derive(Debug, PartialEq, Eq)]
pub struct ChainOutcome {
    // this node plus every hop downstream that stored the block
    pub copies_written: u32,
    // empty when the whole tail was reached
    pub forward_error: String,
}

/// Local write followed by chained forwarding, shared by the client facing
/// `PutData` and the hop to hop `ReplicateBlock`.
#[derive(Clone, Debug)]
pub struct BlockWriter {
    store: FileStorage,
    peer_service: PeerService,
}

impl BlockWriter {
    pub fn new(store: FileStorage, peer_service: PeerService) -> Self {
        Self {
            store,
            peer_service,
        }
    }
    pub fn store(&self) -> &FileStorage {
        &self.store
    }

    /// Fails only when the local write fails. A hop that cannot be reached or
    /// cannot store the block is skipped and the block goes to the one after
    /// it, so a single dead replica does not cut the rest of the chain.
    #[instrument(name = "block_writer_store_and_forward", skip(self, data, replica_tail), fields(tail = replica_tail.len()))]
    pub async fn store_and_forward(
        &self,
        path: &str,
        block_id: &str,
        data: &[u8],
        replica_tail: &[NodeAddress],
    ) -> DfsResult<ChainOutcome> {
        self.store.put_block(path, block_id, data).await?;
        let mut copies_written = 1;
        let mut forward_errors = vec![];
        for (hop, next) in replica_tail.iter().enumerate() {
            match self
                .peer_service
                .replicate_block(next, path, block_id, data, &replica_tail[hop + 1..])
                .await
            {
                Ok(response) => {
                    copies_written += response.copies_written;
                    if !response.forward_error.is_empty() {
                        forward_errors.push(response.forward_error);
                    }
                    break;
                }
                Err(e) => {
                    warn!(next = %next, error = %e, "Skipping replica that did not take the block");
                    forward_errors.push(format!("{next}: {e}"));
                }
            }
        }
        trace!(copies_written, "Block chain finished");
        Ok(ChainOutcome {
            copies_written,
            forward_error: forward_errors.join("; "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use utilities::grpc_channel_pool::{ChannelSettings, GrpcChannelPool};

    fn unused_port() -> u16 {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    }

    #[tokio::test]
    async fn local_write_without_tail_counts_one_copy() {
        let dir = tempfile::tempdir().unwrap();
        let writer = BlockWriter::new(
            FileStorage::new(dir.path()).unwrap(),
            PeerService::default(),
        );
        let outcome = writer
            .store_and_forward("docs/", "b-1", b"abcd", &[])
            .await
            .unwrap();
        assert_eq!(
            outcome,
            ChainOutcome {
                copies_written: 1,
                forward_error: String::new()
            }
        );
        assert_eq!(writer.store().get_block("docs/", "b-1").await.unwrap(), b"abcd");
    }

    #[tokio::test]
    async fn unreachable_replica_is_reported_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let pool = GrpcChannelPool::new(ChannelSettings {
            connect_retries: 1,
            ..ChannelSettings::with_timeout(Duration::from_millis(500))
        });
        let writer = BlockWriter::new(FileStorage::new(dir.path()).unwrap(), PeerService::new(pool));
        let dead = NodeAddress::new("127.0.0.1", unused_port());
        let outcome = writer
            .store_and_forward("", "b-2", b"xy", &[dead.clone()])
            .await
            .unwrap();
        assert_eq!(outcome.copies_written, 1);
        assert!(outcome.forward_error.contains(&dead.to_string()));
        assert_eq!(writer.store().get_block("", "b-2").await.unwrap(), b"xy");
    }
}
