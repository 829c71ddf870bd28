use std::sync::Arc;

use proto::generated::client_namenode::NodeAddress;
use tokio::sync::Mutex;
use utilities::{
    error::DfsResult,
    logger::{error, info, instrument, tracing, warn},
};

use crate::{
    datanode::service::DatanodeService,
    namenode_state::{NamenodeState, RepairTask},
};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct RepairReport {
    // false when too few nodes were left to try
    pub attempted: bool,
    pub repaired: Vec<String>,
    // not retried, the operator has to trigger repair again
    pub failed: Vec<String>,
}

/// Re-replicates the blocks of a dead datanode onto fresh placements.
#[derive(Clone)]
pub struct Repairer {
    state: Arc<Mutex<NamenodeState>>,
    datanode_service: DatanodeService,
}

impl Repairer {
    pub fn new(state: Arc<Mutex<NamenodeState>>, datanode_service: DatanodeService) -> Self {
        Self {
            state,
            datanode_service,
        }
    }

    /// Deregisters `dead` and copies each block it held from a surviving
    /// holder. Network I/O runs without the state lock; a failed block is
    /// logged and the next one proceeds.
    #[instrument(name = "namenode_redistribute_data", skip(self), fields(dead = %dead))]
    pub async fn redistribute(&self, dead: &NodeAddress) -> DfsResult<RepairReport> {
        let plan = self.state.lock().await.begin_repair(dead)?;
        info!(
            dead_id = plan.dead_id,
            tasks = plan.tasks.len(),
            lost = plan.lost.len(),
            "Datanode deregistered, redistributing its blocks"
        );
        let mut report = RepairReport {
            attempted: plan.capacity_ok,
            failed: plan.lost,
            ..RepairReport::default()
        };
        if !plan.capacity_ok {
            warn!(
                live = plan.live_count,
                "Replication not possible, not enough datanodes left"
            );
            report
                .failed
                .extend(plan.tasks.into_iter().map(|task| task.block_id));
            return Ok(report);
        }
        for task in plan.tasks {
            match self.repair_block(&task).await {
                Ok(true) => report.repaired.push(task.block_id),
                Ok(false) => {
                    info!(block_id = %task.block_id, "Block went away during repair");
                }
                Err(e) => {
                    error!(block_id = %task.block_id, source = %task.source, error = %e, "Error while repairing block");
                    report.failed.push(task.block_id);
                }
            }
        }
        info!(repaired = report.repaired.len(), failed = report.failed.len(), "Redistribution finished");
        Ok(report)
    }

    async fn repair_block(&self, task: &RepairTask) -> DfsResult<bool> {
        let data = self
            .datanode_service
            .get_data(&task.source, &task.dir_path, &task.block_id)
            .await?;
        for host in &task.stale_hosts {
            if let Err(e) = self
                .datanode_service
                .delete_block(host, &task.dir_path, &task.block_id)
                .await
            {
                warn!(%host, error = %e, "Error while removing stale copy");
            }
        }
        let placement = self.state.lock().await.select_placement()?;
        let node_ids: Vec<u64> = placement.iter().map(|(id, _)| *id).collect();
        let mut nodes = placement.into_iter().map(|(_, node)| node);
        let Some(primary) = nodes.next() else {
            return Ok(false);
        };
        let replica_tail: Vec<NodeAddress> = nodes.collect();
        let wanted = replica_tail.len() + 1;
        let response = self
            .datanode_service
            .put_data(&primary, &task.dir_path, &task.block_id, data, replica_tail)
            .await?;
        if (response.copies_written as usize) < wanted {
            warn!(
                block_id = %task.block_id,
                copies = response.copies_written,
                wanted,
                forward_error = %response.forward_error,
                "Repaired block is still under replicated"
            );
        }
        Ok(self
            .state
            .lock()
            .await
            .install_placement(&task.block_id, node_ids))
    }
}
