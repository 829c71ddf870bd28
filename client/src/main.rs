use std::{error::Error, time::Duration};

use client::{command_runner::CommandRunner, config::CONFIG, dfs_client::DfsClient};
use tokio::io::{AsyncBufReadExt, BufReader};
use utilities::{
    grpc_channel_pool::ChannelSettings,
    logger::{self, info},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = CONFIG.as_ref().map_err(|e| e.clone())?;
    let _gaurd = logger::init_logger(
        "Client",
        &config.client_id,
        &config.log_level,
        config.apm_endpoint.as_deref(),
        &config.log_base,
    );
    // an address on the command line wins over the config file
    let namenode_addrs = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config.namenode_addrs.clone());
    let client = DfsClient::new(
        &namenode_addrs,
        ChannelSettings::with_timeout(Duration::from_millis(config.rpc_timeout_ms)),
        config.delete_mode,
    );
    let mut command_executer = CommandRunner::new(client);
    info!(%namenode_addrs, "starting the Client");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(input) = lines.next_line().await? {
        if input.trim().is_empty() {
            continue;
        }
        match command_executer.handle_input(&input).await {
            Ok(message) => {
                println!("Success : {}", message);
            }
            Err(message) => {
                println!("Error : false ({})", message);
            }
        }
    }
    Ok(())
}
