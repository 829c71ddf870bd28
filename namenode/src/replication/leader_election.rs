use std::sync::Arc;

use async_trait::async_trait;
use proto::generated::{client_namenode::NodeAddress, namenode_namenode::Role};
use tokio::sync::Mutex;
use utilities::logger::warn;

use crate::namenode_state::NamenodeState;

/// Decides which metadata engine is primary. Swappable for a real election
/// protocol; today only [`PollingFailover`] exists.
#[async_trait]
pub trait LeaderElection: Send + Sync {
    async fn role(&self) -> Role;
    async fn primary_addrs(&self) -> NodeAddress;
    /// Called by the secondary when the primary cannot be reached. Returns the
    /// role held afterwards.
    async fn on_primary_unreachable(&self) -> Role;
}

/// Poll, and take over as soon as the primary stops answering. Nothing stops
/// a recovered primary from carrying on as well, the term only makes the two
/// distinguishable.
pub struct PollingFailover {
    own: NodeAddress,
    primary: Mutex<NodeAddress>,
    state: Arc<Mutex<NamenodeState>>,
}

impl PollingFailover {
    pub fn new(own: NodeAddress, primary: NodeAddress, state: Arc<Mutex<NamenodeState>>) -> Self {
        Self {
            own,
            primary: Mutex::new(primary),
            state,
        }
    }
    pub fn own_addrs(&self) -> &NodeAddress {
        &self.own
    }
}

#[async_trait]
impl LeaderElection for PollingFailover {
    async fn role(&self) -> Role {
        if self.primary.lock().await.same_node(&self.own) {
            Role::Primary
        } else {
            Role::Secondary
        }
    }
    async fn primary_addrs(&self) -> NodeAddress {
        self.primary.lock().await.clone()
    }
    async fn on_primary_unreachable(&self) -> Role {
        let mut primary = self.primary.lock().await;
        if primary.same_node(&self.own) {
            return Role::Primary;
        }
        let mut state = self.state.lock().await;
        state.term += 1;
        warn!(old_primary = %primary, new_primary = %self.own, term = state.term, "Primary unreachable, promoting self");
        *primary = self.own.clone();
        Role::Primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namenode_state::tests::state_with_nodes;

    #[tokio::test]
    async fn promotion_bumps_term_once() {
        let state = Arc::new(Mutex::new(state_with_nodes(4, 1, 0)));
        state.lock().await.term = 3;
        let own = NodeAddress::new("127.0.0.1", 5001);
        let election = PollingFailover::new(
            own.clone(),
            NodeAddress::new("127.0.0.1", 5000),
            state.clone(),
        );
        assert_eq!(election.role().await, Role::Secondary);
        assert_eq!(election.on_primary_unreachable().await, Role::Primary);
        assert_eq!(election.role().await, Role::Primary);
        assert_eq!(election.primary_addrs().await, own);
        assert_eq!(election.on_primary_unreachable().await, Role::Primary);
        assert_eq!(state.lock().await.term, 4);
    }

    #[tokio::test]
    async fn primary_recognises_itself_under_any_spelling() {
        let state = Arc::new(Mutex::new(state_with_nodes(4, 1, 0)));
        let election = PollingFailover::new(
            NodeAddress::new("127.0.0.1", 5000),
            NodeAddress::new("localhost", 5000),
            state,
        );
        assert_eq!(election.role().await, Role::Primary);
    }
}
