use std::collections::HashMap;
use std::path::Path;
use std::{fs::File, io::BufReader};

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8006,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn listen(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Sent with every request, e.g. `Cookie` or `Authorization`
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Honor HTTP_PROXY / HTTPS_PROXY from the environment
    #[serde(default = "default_system_proxy")]
    pub system_proxy: bool,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_system_proxy() -> bool {
    true
}

fn default_user_agent() -> String {
    "pagelayout".to_string()
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            headers: HashMap::new(),
            system_proxy: default_system_proxy(),
        }
    }
}

impl Config {
    pub fn read(path: &str) -> anyhow::Result<Self> {
        let file = File::open(path)
            .map_err(|e| anyhow::anyhow!("Failed to open config file {}: {}", path, e))?;
        let reader = BufReader::new(file);
        let config: Config = serde_yaml::from_reader(reader)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file {}: {}", path, e))?;
        let config = config.postprocess()?;
        Ok(config)
    }

    /// Reads `path` if it exists, defaults otherwise. The flag tells which.
    pub fn read_or_default(path: &str) -> anyhow::Result<(Self, bool)> {
        if Path::new(path).exists() {
            Ok((Config::read(path)?, true))
        } else {
            Ok((Config::empty(), false))
        }
    }

    // Header values like `$SP_COOKIE` come from the environment, so secrets
    // stay out of the file.
    fn postprocess(mut self) -> anyhow::Result<Self> {
        for (name, value) in self.http.headers.iter_mut() {
            if let Some(var) = value.strip_prefix('$') {
                *value = std::env::var(var).map_err(|_| {
                    anyhow::anyhow!("Header {} refers to unset environment variable {}", name, var)
                })?;
            }
        }
        Ok(self)
    }

    pub fn empty() -> Self {
        Self {
            debug: false,
            server: ServerConfig::default(),
            http: HttpConfig::default(),
        }
    }
}
