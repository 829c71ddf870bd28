use proto::generated::client_namenode::NodeAddress;

#[derive(Debug, Default)]
pub struct DatanodeState {
    // last metadata engine that pinged us, informational only
    pub namenode_addrs: Option<NodeAddress>,
    pub pings_received: u64,
}
impl DatanodeState {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn record_ping(&mut self, namenode: NodeAddress) {
        self.pings_received += 1;
        self.namenode_addrs = Some(namenode);
    }
}
