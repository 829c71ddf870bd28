pub mod command_runner;
pub mod config;
pub mod datanode_service;
pub mod dfs_client;
pub mod file_chunker;
pub mod namenode_service;
