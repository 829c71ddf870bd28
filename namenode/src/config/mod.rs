use figment::{
    Figment,
    providers::{Format, Serialized, Yaml},
};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct PortRange {
    pub start: u16,
    pub end: u16,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub id: String,
    pub host: String,
    pub grpc_port: u16,
    // equal to host:grpc_port on the primary
    pub primary_addrs: String,
    pub block_size: u64,
    pub replication_factor: usize,
    // empty list means discover over discovery_port_range on localhost
    pub datanodes: Vec<String>,
    pub discovery_port_range: PortRange,
    pub heartbeat_interval_ms: u64,
    pub sync_interval_ms: u64,
    pub rpc_timeout_ms: u64,
    pub log_level: String,
    pub log_base: String,
    #[serde(default)]
    pub apm_endpoint: Option<String>,
    #[serde(default)]
    pub seed: Option<u64>,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            id: "namenode-5000".to_string(),
            host: "127.0.0.1".to_string(),
            grpc_port: 5000,
            primary_addrs: "127.0.0.1:5000".to_string(),
            block_size: 32,
            replication_factor: 1,
            datanodes: vec![],
            discovery_port_range: PortRange {
                start: 7000,
                end: 7049,
            },
            heartbeat_interval_ms: 5000,
            sync_interval_ms: 1000,
            rpc_timeout_ms: 3000,
            log_level: "info".to_string(),
            log_base: "logs".to_string(),
            apm_endpoint: None,
            seed: None,
        }
    }
}

pub fn load_config(config_file_path: &str) -> Result<Config, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Yaml::file(config_file_path))
        .extract()
}

pub static CONFIG: Lazy<Result<Config, figment::Error>> = Lazy::new(|| {
    let env = std::env::var("ENV").unwrap_or_else(|_| "default".to_owned());
    let config_file_path =
        std::env::var("CONFIG_PATH").unwrap_or_else(|_| format!("./namenode/config/{}.yaml", env));
    load_config(&config_file_path)
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_fill_missing_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "grpc_port: 5001\nprimary_addrs: 127.0.0.1:5000\nreplication_factor: 2\ndatanodes: [\"127.0.0.1:7000\"]"
        )
        .unwrap();
        let config = load_config(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.grpc_port, 5001);
        assert_eq!(config.replication_factor, 2);
        assert_eq!(config.block_size, 32);
        assert_eq!(config.datanodes, vec!["127.0.0.1:7000".to_owned()]);
        assert_eq!(config.discovery_port_range, PortRange { start: 7000, end: 7049 });
        assert!(config.seed.is_none());
    }
}
