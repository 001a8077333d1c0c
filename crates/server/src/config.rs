use std::{
    env, fs,
    net::{AddrParseError, SocketAddr},
    path::PathBuf,
    time::Duration,
};

use serde::Deserialize;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_PRICE_DATA_PATH: &str = "PriceDataKraken.json";
const DEFAULT_SPOT_PRICE_URL: &str = "https://blockchain.info/tobtc";
const DEFAULT_POOL_ACCOUNT_URL: &str = "https://slushpool.com/accounts/profile/json/btc/";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
const DEFAULT_LOG_FORMAT: LogFormat = LogFormat::Text;

const CONFIG_FILE_KEY: &str = "MINING_ROI_CONFIG";
const LISTEN_ADDR_KEY: &str = "MINING_ROI_ADDR";
const PRICE_DATA_KEY: &str = "MINING_ROI_PRICE_DATA";
const SPOT_PRICE_URL_KEY: &str = "MINING_ROI_SPOT_PRICE_URL";
const POOL_URL_KEY: &str = "MINING_ROI_POOL_URL";
const HTTP_TIMEOUT_KEY: &str = "MINING_ROI_HTTP_TIMEOUT_SECS";
const LOG_FORMAT_KEY: &str = "MINING_ROI_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub price_data_path: PathBuf,
    pub spot_price_url: String,
    pub pool_account_url: String,
    pub http_timeout: Duration,
    pub log_format: LogFormat,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("MINING_ROI_ADDR is not a valid socket address: {0}")]
    InvalidListenAddr(#[source] AddrParseError),
    #[error("{key} must not be empty or whitespace")]
    Empty { key: &'static str },
    #[error("MINING_ROI_HTTP_TIMEOUT_SECS must be a whole number of seconds greater than zero")]
    InvalidHttpTimeout,
    #[error("MINING_ROI_LOG_FORMAT must be one of: text, json")]
    InvalidLogFormat,
    #[error("{key} contains non-unicode data")]
    NonUnicode { key: &'static str },
    #[error("failed to read config file {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config file {} is invalid: {source}", .path.display())]
    ParseFile {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct FileConfig {
    listen_addr: Option<String>,
    price_data_path: Option<String>,
    spot_price_url: Option<String>,
    pool_account_url: Option<String>,
    http_timeout_secs: Option<u64>,
    log_format: Option<String>,
}

impl Config {
    /// Defaults, then the YAML file named by `MINING_ROI_CONFIG`, then
    /// individual environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let file = match env_value(CONFIG_FILE_KEY)? {
            Some(path) => FileConfig::load(PathBuf::from(path))?,
            None => FileConfig::default(),
        };

        let listen_addr = match env_value(LISTEN_ADDR_KEY)?.or(file.listen_addr) {
            Some(value) => value.parse().map_err(ConfigError::InvalidListenAddr)?,
            None => DEFAULT_LISTEN_ADDR
                .parse()
                .expect("default listen address must be valid"),
        };

        let price_data_path = non_empty(
            PRICE_DATA_KEY,
            env_value(PRICE_DATA_KEY)?.or(file.price_data_path),
            DEFAULT_PRICE_DATA_PATH,
        )?;
        let spot_price_url = non_empty(
            SPOT_PRICE_URL_KEY,
            env_value(SPOT_PRICE_URL_KEY)?.or(file.spot_price_url),
            DEFAULT_SPOT_PRICE_URL,
        )?;
        let pool_account_url = non_empty(
            POOL_URL_KEY,
            env_value(POOL_URL_KEY)?.or(file.pool_account_url),
            DEFAULT_POOL_ACCOUNT_URL,
        )?;

        let http_timeout_secs = match env_value(HTTP_TIMEOUT_KEY)? {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidHttpTimeout)?,
            None => file.http_timeout_secs.unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
        };
        if http_timeout_secs == 0 {
            return Err(ConfigError::InvalidHttpTimeout);
        }

        let log_format = match env_value(LOG_FORMAT_KEY)?.or(file.log_format) {
            Some(value) => LogFormat::parse(value.trim()).ok_or(ConfigError::InvalidLogFormat)?,
            None => DEFAULT_LOG_FORMAT,
        };

        Ok(Self {
            listen_addr,
            price_data_path: PathBuf::from(price_data_path),
            spot_price_url,
            pool_account_url,
            http_timeout: Duration::from_secs(http_timeout_secs),
            log_format,
        })
    }
}

impl FileConfig {
    fn load(path: PathBuf) -> Result<Self, ConfigError> {
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(source) => return Err(ConfigError::ReadFile { path, source }),
        };
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::ParseFile { path, source })
    }
}

fn env_value(key: &'static str) -> Result<Option<String>, ConfigError> {
    match env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::NonUnicode { key }),
    }
}

fn non_empty(
    key: &'static str,
    value: Option<String>,
    default_value: &str,
) -> Result<String, ConfigError> {
    match value {
        Some(value) if value.trim().is_empty() => Err(ConfigError::Empty { key }),
        Some(value) => Ok(value),
        None => Ok(default_value.to_owned()),
    }
}
