use figment::{
    Figment,
    providers::{Format, Serialized, Yaml},
};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    pub id: String,
    // address other nodes use to reach this one
    pub host: String,
    pub grpc_port: u16,
    // blocks are stored under <storage_path>/<dir path>/<block id>
    pub storage_path: String,
    pub rpc_timeout_ms: u64,
    pub log_level: String,
    pub log_base: String,
    #[serde(default)]
    pub apm_endpoint: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            id: "datanode-3000".to_owned(),
            host: "127.0.0.1".to_owned(),
            grpc_port: 3000,
            storage_path: "./temp/datanode-3000".to_owned(),
            rpc_timeout_ms: 5000,
            log_level: "info".to_owned(),
            log_base: "logs".to_owned(),
            apm_endpoint: None,
        }
    }
}

pub fn load_config(config_file_path: &str) -> Result<Config, figment::Error> {
    Figment::from(Serialized::defaults(Config::default()))
        .merge(Yaml::file(config_file_path))
        .extract()
}

pub static CONFIG: Lazy<Result<Config, figment::Error>> = Lazy::new(|| {
    let env = std::env::var("ENV").unwrap_or_else(|_| "default".to_owned());
    let config_file_path =
        std::env::var("CONFIG_PATH").unwrap_or_else(|_| format!("./datanode/config/{}.yaml", env));
    println!("Reading config from file : {config_file_path}");
    load_config(&config_file_path)
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn yaml_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "grpc_port: 4100\nstorage_path: /tmp/dn").unwrap();
        let config = load_config(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.grpc_port, 4100);
        assert_eq!(config.storage_path, "/tmp/dn");
        assert_eq!(config.log_level, "info");
        assert!(config.apm_endpoint.is_none());
    }
}
