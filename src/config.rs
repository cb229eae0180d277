use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

use crate::billing::AllocationPolicy;

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 화면에 표시할 이름들.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    /// 화면 제목
    pub title: String,
    /// 제목 아래 부제
    pub subtitle: String,
    /// 청구 대상 임차인 이름
    pub tenant: String,
    /// 별도 계량 설비 이름
    pub machine: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            title: "Billabong Invoice Tool".into(),
            subtitle: "SurfparkTLV Maintenance & IT".into(),
            tenant: "Billabong".into(),
            machine: "Wave Machine".into(),
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub policy: AllocationPolicy,
    pub labels: Labels,
}

/// 설정 로드 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// 배분 비율이 0~1 범위를 벗어남
    #[error("invalid allocation policy: {field} = {value} (expected a number between 0 and 1)")]
    InvalidPolicy { field: &'static str, value: f64 },
}

/// 설정 파일을 읽는다. 파일이 없으면 기본 설정을 쓰며, 파일을 새로 만들지는 않는다.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }
    let content = fs::read_to_string(path)?;
    let cfg = Config::from_toml(&content)?;
    debug!(path = %path.display(), ?cfg.policy, "config loaded");
    Ok(cfg)
}

/// 설정 파일을 읽되, 읽기/해석/검증에 실패하면 경고를 남기고 기본 설정을 쓴다(GUI용).
pub fn load_or_fallback(path: impl AsRef<Path>) -> Config {
    let path = path.as_ref();
    load_or_default(path).unwrap_or_else(|err| {
        warn!(path = %path.display(), %err, "falling back to default config");
        Config::default()
    })
}

impl Config {
    /// TOML 문자열을 해석하고 배분 정책을 검증한다.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let cfg: Config = toml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_fraction("policy.ac_pool_fraction", self.policy.ac_pool_fraction)?;
        check_fraction("policy.tenant_ac_share", self.policy.tenant_ac_share)?;
        Ok(())
    }
}

fn check_fraction(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidPolicy { field, value })
    }
}
