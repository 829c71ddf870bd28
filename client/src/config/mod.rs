use figment::{
    Figment,
    providers::{self, Format, Serialized},
};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// What a delete does when a live datanode fails to drop its bytes.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DeleteMode {
    /// abort before touching metadata
    #[default]
    Strict,
    /// log the failure and delete the metadata anyway
    BestEffort,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub client_id: String,
    pub namenode_addrs: String,
    #[serde(default)]
    pub delete_mode: DeleteMode,
    pub rpc_timeout_ms: u64,
    pub log_level: String,
    pub log_base: String,
    #[serde(default)]
    pub apm_endpoint: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            client_id: "client-0".to_owned(),
            namenode_addrs: "http://127.0.0.1:5000".to_owned(),
            delete_mode: DeleteMode::Strict,
            rpc_timeout_ms: 5000,
            log_level: "info".to_owned(),
            log_base: "logs".to_owned(),
            apm_endpoint: None,
        }
    }
}

pub fn load_config(config_file_path: &str) -> Result<Config, figment::Error> {
    Figment::from(Serialized::defaults(Config::default()))
        .merge(providers::Yaml::file(config_file_path))
        .extract()
}

pub static CONFIG: Lazy<Result<Config, figment::Error>> = Lazy::new(|| {
    let env = std::env::var("ENV").unwrap_or_else(|_| "default".to_owned());
    // giving defaule path to root of binary
    let config_file_path =
        std::env::var("CONFIG_PATH").unwrap_or_else(|_| format!("./client/config/{}.yaml", env));
    println!("reading config from {config_file_path:?}");
    load_config(&config_file_path)
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn delete_mode_reads_snake_case() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "delete_mode: best_effort\nnamenode_addrs: http://10.0.0.1:5000").unwrap();
        let config = load_config(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.delete_mode, DeleteMode::BestEffort);
        assert_eq!(config.namenode_addrs, "http://10.0.0.1:5000");
        assert_eq!(config.rpc_timeout_ms, 5000);
    }

    #[test]
    fn strict_is_the_default() {
        let config = load_config("/nonexistent/client.yaml").unwrap();
        assert_eq!(config.delete_mode, DeleteMode::Strict);
    }
}
