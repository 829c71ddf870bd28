use std::{sync::Arc, time::Duration};

use proto::generated::{client_namenode::NodeAddress, namenode_namenode::Role};
use tokio::{sync::Mutex, task::JoinHandle, time::interval};
use utilities::logger::{Instrument, Level, error, info, span, warn};

use crate::{
    datanode::service::DatanodeService, namenode_state::NamenodeState, repair::Repairer,
    replication::leader_election::LeaderElection,
};

/// To mantain the registry based on the heartbeat
pub struct StateMantainer {
    state: Arc<Mutex<NamenodeState>>,
    datanode_service: DatanodeService,
    repairer: Repairer,
    leadership: Arc<dyn LeaderElection>,
    interval: Duration,
}

impl StateMantainer {
    pub fn new(
        state: Arc<Mutex<NamenodeState>>,
        datanode_service: DatanodeService,
        repairer: Repairer,
        leadership: Arc<dyn LeaderElection>,
        interval: Duration,
    ) -> Self {
        Self {
            state,
            datanode_service,
            repairer,
            leadership,
            interval,
        }
    }

    /// Probes every registered node once. Dead nodes are deregistered and
    /// their blocks redistributed before the next node is probed. Returns
    /// the nodes found dead.
    pub async fn probe_once(&self) -> Vec<NodeAddress> {
        let registered = self.state.lock().await.live_nodes();
        let mut dead = vec![];
        for node in registered {
            let Err(e) = self.datanode_service.heartbeat(&node).await else {
                continue;
            };
            warn!(%node, error = %e, "No heartbeat received from datanode");
            match self.repairer.redistribute(&node).await {
                Ok(report) => {
                    info!(%node, repaired = report.repaired.len(), failed = report.failed.len(), "Handled dead datanode");
                }
                Err(e) => {
                    error!(%node, error = %e, "Error while redistributing data of dead datanode");
                }
            }
            dead.push(node);
        }
        dead
    }

    /// Runs the heartbeat loop. Only the primary probes, so a secondary that
    /// gets promoted starts probing on its next tick.
    pub fn start(self) -> JoinHandle<()> {
        let span = span!(Level::INFO, "namenode_heartbeat");
        tokio::spawn(
            async move {
                let mut ticker = interval(self.interval);
                // first tick completes immediately, give datanodes one period
                ticker.tick().await;
                loop {
                    ticker.tick().await;
                    if self.leadership.role().await != Role::Primary {
                        continue;
                    }
                    let dead = self.probe_once().await;
                    if !dead.is_empty() {
                        info!(?dead, "Heartbeat round removed datanodes");
                    }
                }
            }
            .instrument(span),
        )
    }
}
