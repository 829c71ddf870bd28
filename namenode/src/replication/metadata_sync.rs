use std::{sync::Arc, time::Duration};

use proto::generated::namenode_namenode::{
    Role, SnapshotRequest, namenode_peer_client::NamenodePeerClient,
};
use tokio::{sync::Mutex, task::JoinHandle, time::interval};
use utilities::{
    grpc_channel_pool::GrpcChannelPool,
    logger::{Instrument, Level, info, span, trace, warn},
};

use crate::{namenode_state::NamenodeState, replication::leader_election::LeaderElection};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncOutcome {
    Synced,
    // primary reachable but the call failed, try again next tick
    Skipped,
    Promoted,
    AlreadyPrimary,
}

/// Secondary side of metadata replication: pull the primary's snapshot on a
/// fixed interval and overwrite local state with it.
pub struct MetadataSync {
    state: Arc<Mutex<NamenodeState>>,
    leadership: Arc<dyn LeaderElection>,
    pool: GrpcChannelPool,
    interval: Duration,
}

impl MetadataSync {
    pub fn new(
        state: Arc<Mutex<NamenodeState>>,
        leadership: Arc<dyn LeaderElection>,
        pool: GrpcChannelPool,
        interval: Duration,
    ) -> Self {
        Self {
            state,
            leadership,
            pool,
            interval,
        }
    }

    pub async fn sync_once(&self) -> SyncOutcome {
        if self.leadership.role().await == Role::Primary {
            return SyncOutcome::AlreadyPrimary;
        }
        let primary = self.leadership.primary_addrs().await;
        let channel = match self.pool.connect_fresh(&primary.endpoint()).await {
            Ok(channel) => channel,
            Err(e) => {
                warn!(%primary, error = %e, "Primary namenode is unreachable");
                self.leadership.on_primary_unreachable().await;
                return SyncOutcome::Promoted;
            }
        };
        let request = tonic::Request::new(SnapshotRequest::default());
        match NamenodePeerClient::new(channel)
            .replicate_metadata_snapshot(request)
            .await
        {
            Ok(response) => {
                let snapshot = response.into_inner();
                if snapshot.role() != Role::Primary {
                    warn!(%primary, role = ?snapshot.role(), "Syncing from a node that does not claim to be primary");
                }
                self.state.lock().await.apply_snapshot(snapshot);
                trace!("Metadata synced from primary");
                SyncOutcome::Synced
            }
            Err(status) => {
                warn!(%primary, error = %status, "Error while pulling metadata snapshot");
                SyncOutcome::Skipped
            }
        }
    }

    /// Polls until this instance becomes primary.
    pub fn start(self) -> JoinHandle<()> {
        let span = span!(Level::INFO, "namenode_metadata_sync");
        tokio::spawn(
            async move {
                let mut ticker = interval(self.interval);
                loop {
                    ticker.tick().await;
                    match self.sync_once().await {
                        SyncOutcome::Promoted | SyncOutcome::AlreadyPrimary => {
                            info!("Acting as primary, metadata sync stopped");
                            break;
                        }
                        SyncOutcome::Synced | SyncOutcome::Skipped => {}
                    }
                }
            }
            .instrument(span),
        )
    }
}
