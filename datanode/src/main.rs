use std::{error::Error, time::Duration};

use datanode::{config::CONFIG, datanode_server::DatanodeServer};
use storage::file_storage::FileStorage;
use tokio::net::TcpListener;
use utilities::{
    grpc_channel_pool::ChannelSettings,
    logger::{error, info},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = CONFIG.as_ref().map_err(|e| e.clone())?;
    let _guard = utilities::logger::init_logger(
        "Datanode",
        &config.id,
        &config.log_level,
        config.apm_endpoint.as_deref(),
        &config.log_base,
    );
    let store = FileStorage::new(&config.storage_path)?;
    let listener = TcpListener::bind(("0.0.0.0", config.grpc_port)).await?;
    info!(port = config.grpc_port, host = %config.host, "Datanode listening");
    let server = DatanodeServer::new(
        config.id.clone(),
        store,
        ChannelSettings::with_timeout(Duration::from_millis(config.rpc_timeout_ms)),
    );
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Error while waiting for shutdown signal");
        }
    };
    server.serve(listener, shutdown).await?;
    Ok(())
}
