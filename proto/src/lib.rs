pub mod node_address;

pub mod generated {
    pub mod client_datanode {
        include!("./generated/client_datanode.rs");
    }
    pub mod client_namenode {
        include!("./generated/client_namenode.rs");
    }
    pub mod datanode_datanode {
        include!("./generated/datanode_datanode.rs");
    }
    pub mod namenode_datanode {
        include!("./generated/namenode_datanode.rs");
    }
    pub mod namenode_namenode {
        include!("./generated/namenode_namenode.rs");
    }
}
