use std::{error::Error, time::Duration};

use namenode::{
    config::CONFIG,
    namenode_server::{NamenodeInstance, NamenodeSettings},
    namenode_state::ClusterConfig,
};
use proto::generated::client_namenode::NodeAddress;
use tokio::net::TcpListener;
use utilities::{
    grpc_channel_pool::ChannelSettings,
    logger::{error, info, init_logger},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = CONFIG.as_ref().map_err(|e| e.clone())?;
    let _gaurd = init_logger(
        "Namenode",
        &config.id,
        &config.log_level,
        config.apm_endpoint.as_deref(),
        &config.log_base,
    );
    let own_addrs = NodeAddress::new(config.host.clone(), config.grpc_port);
    let primary_addrs = NodeAddress::parse(&config.primary_addrs)
        .ok_or_else(|| format!("invalid primary_addrs {:?}", config.primary_addrs))?;
    let datanodes = config
        .datanodes
        .iter()
        .map(|addrs| NodeAddress::parse(addrs).ok_or_else(|| format!("invalid datanode {addrs:?}")))
        .collect::<Result<Vec<_>, _>>()?;
    let instance = NamenodeInstance::new(NamenodeSettings {
        id: config.id.clone(),
        own_addrs,
        primary_addrs,
        cluster: ClusterConfig {
            block_size: config.block_size,
            replication_factor: config.replication_factor,
        },
        heartbeat_interval: Duration::from_millis(config.heartbeat_interval_ms),
        sync_interval: Duration::from_millis(config.sync_interval_ms),
        channel: ChannelSettings::with_timeout(Duration::from_millis(config.rpc_timeout_ms)),
        seed: config.seed,
    })?;
    info!(
        block_size = config.block_size,
        replication_factor = config.replication_factor,
        "Namenode configured"
    );
    let listener = TcpListener::bind(("0.0.0.0", config.grpc_port)).await?;
    let range = config.discovery_port_range;
    let registered = instance
        .register_and_discover(datanodes, range.start..=range.end)
        .await;
    info!(?registered, "List of datanodes in service");
    let _background = instance.start_background_tasks().await;
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Error while waiting for shutdown signal");
        }
    };
    instance.serve(listener, shutdown).await?;
    Ok(())
}
