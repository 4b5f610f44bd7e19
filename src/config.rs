use serde::{Deserialize, Serialize};
use std::env;

use crate::lottery::FreshBookStart;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub lottery: LotteryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
}

/// 彩票业务参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LotteryConfig {
    /// 向前查找上次扫描记录的最大天数
    #[serde(default = "default_scan_lookback_days")]
    pub scan_lookback_days: u32,
    /// 向前查找的总超时（秒）
    #[serde(default = "default_scan_lookup_timeout_secs")]
    pub scan_lookup_timeout_secs: u64,
    /// 新票本（无历史扫描）起始票号的取法
    #[serde(default)]
    pub fresh_book_start: FreshBookStart,
}

fn default_scan_lookback_days() -> u32 {
    30
}

fn default_scan_lookup_timeout_secs() -> u64 {
    10
}

impl Default for LotteryConfig {
    fn default() -> Self {
        Self {
            scan_lookback_days: default_scan_lookback_days(),
            scan_lookup_timeout_secs: default_scan_lookup_timeout_secs(),
            fresh_book_start: FreshBookStart::default(),
        }
    }
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // 配置文件不存在时完全依赖环境变量
        let mut config: Config = match std::fs::read_to_string(&config_path) {
            Ok(config_str) => Self::parse(&config_str)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let database_url = env::var("DATABASE_URL").map_err(|_| {
                    "DATABASE_URL is not set and no config.toml was found".to_string()
                })?;

                Config {
                    server: ServerConfig {
                        host: "0.0.0.0".to_string(),
                        port: 8080,
                    },
                    database: DatabaseConfig {
                        url: database_url,
                        max_connections: 10,
                    },
                    jwt: JwtConfig {
                        secret: "change-me-in-production".to_string(),
                    },
                    lottery: LotteryConfig::default(),
                }
            }
            Err(e) => {
                return Err(format!("Failed to read config file {config_path}: {e}").into());
            }
        };

        config.apply_env_overrides();
        Ok(config)
    }

    pub fn parse(config_str: &str) -> Result<Self, Box<dyn std::error::Error>> {
        toml::from_str(config_str).map_err(|e| format!("Failed to parse config file: {e}").into())
    }

    /// 环境变量覆盖（即便文件存在时也覆盖）
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = env::var("SERVER_HOST") {
            self.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            self.server.port = p;
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            self.database.max_connections = mc;
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            self.jwt.secret = v;
        }
        if let Ok(v) = env::var("LOTTERY_SCAN_LOOKBACK_DAYS")
            && let Ok(n) = v.parse()
        {
            self.lottery.scan_lookback_days = n;
        }
        if let Ok(v) = env::var("LOTTERY_SCAN_LOOKUP_TIMEOUT_SECS")
            && let Ok(n) = v.parse()
        {
            self.lottery.scan_lookup_timeout_secs = n;
        }
        if let Ok(v) = env::var("LOTTERY_FRESH_BOOK_START") {
            match v.parse() {
                Ok(mode) => self.lottery.fresh_book_start = mode,
                Err(e) => log::warn!("Ignoring LOTTERY_FRESH_BOOK_START: {e}"),
            }
        }
    }
}
