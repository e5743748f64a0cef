use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
#[error("环境变量 {name}={value:?} 无法解析")]
pub struct ConfigError {
    pub name: &'static str,
    pub value: String,
}

/// 服务配置
/// 默认值可以通过 OCCUPANCY_* 环境变量覆盖
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 快照保留时间
    pub snapshot_ttl: Duration,
    /// 后台清理任务的执行间隔
    pub cleanup_interval: Duration,
    /// 请求未指定 resolution 时使用的每轴分箱数
    pub default_resolution: usize,
    pub max_resolution: usize,
    /// POST /snapshots 请求体的最大字节数
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            snapshot_ttl: Duration::from_secs(30 * 60),    // 30 分钟
            cleanup_interval: Duration::from_secs(5 * 60), // 5 分钟
            default_resolution: 50,
            max_resolution: 1000,
            max_upload_bytes: 64 * 1024 * 1024, // 64 MiB
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 从任意键值来源读取配置，缺失的键使用默认值
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            host: lookup("OCCUPANCY_HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "OCCUPANCY_PORT", defaults.port)?,
            snapshot_ttl: Duration::from_secs(parse_or(
                &lookup,
                "OCCUPANCY_SNAPSHOT_TTL_SECS",
                defaults.snapshot_ttl.as_secs(),
            )?),
            cleanup_interval: Duration::from_secs(parse_or(
                &lookup,
                "OCCUPANCY_CLEANUP_INTERVAL_SECS",
                defaults.cleanup_interval.as_secs(),
            )?),
            default_resolution: parse_or(
                &lookup,
                "OCCUPANCY_DEFAULT_RESOLUTION",
                defaults.default_resolution,
            )?,
            max_resolution: parse_or(&lookup, "OCCUPANCY_MAX_RESOLUTION", defaults.max_resolution)?,
            max_upload_bytes: parse_or(
                &lookup,
                "OCCUPANCY_MAX_UPLOAD_BYTES",
                defaults.max_upload_bytes,
            )?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = ServerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.snapshot_ttl, Duration::from_secs(1800));
        assert_eq!(config.default_resolution, 50);
        assert_eq!(config.max_upload_bytes, 64 * 1024 * 1024);
    }

    #[test]
    fn overrides_are_parsed() {
        let vars: HashMap<&str, &str> = [
            ("OCCUPANCY_PORT", "9090"),
            ("OCCUPANCY_SNAPSHOT_TTL_SECS", " 60 "),
            ("OCCUPANCY_MAX_RESOLUTION", "200"),
            ("OCCUPANCY_MAX_UPLOAD_BYTES", "1048576"),
        ]
        .into_iter()
        .collect();
        let config =
            ServerConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string())).unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.snapshot_ttl, Duration::from_secs(60));
        assert_eq!(config.max_resolution, 200);
        assert_eq!(config.max_upload_bytes, 1 << 20);
        assert_eq!(config.host, "127.0.0.1");
    }

    #[test]
    fn bad_value_names_the_variable() {
        let err = ServerConfig::from_lookup(|name| {
            (name == "OCCUPANCY_PORT").then(|| "eighty".to_string())
        })
        .unwrap_err();
        assert_eq!(err.name, "OCCUPANCY_PORT");
    }
}
