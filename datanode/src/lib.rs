pub mod block_writer;
pub mod client;
pub mod config;
pub mod datanode_server;
pub mod datanode_state;
pub mod namenode;
pub mod peer;
