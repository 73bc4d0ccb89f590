//! 설정 관리 — logfwd.toml 파싱 및 런타임 설정
//!
//! [`LogfwdConfig`]는 로그 저장소 서술자, 운영자 상수, 시크릿 위치를 담는
//! 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`LOGFWD_LOG_STORE_TYPE=lokistack` 형식)
//! 3. 설정 파일 (`logfwd.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), logfwd_core::error::LogfwdError> {
//! use logfwd_core::config::LogfwdConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = LogfwdConfig::load("logfwd.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = LogfwdConfig::parse("[log_store]\ntype = \"elasticsearch\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, LogfwdError};
use crate::types::{LogStoreSpec, LogStoreType};

/// 운영자 네임스페이스 기본값
pub const DEFAULT_NAMESPACE: &str = "openshift-logging";

/// 수집기 시크릿 이름 기본값
pub const DEFAULT_COLLECTOR_SECRET_NAME: &str = "collector";

/// 단일 테넌트 저장소의 내부 서비스 주소 기본값
pub const DEFAULT_STORE_URL: &str = "https://elasticsearch.openshift-logging.svc:9200";

/// logfwd 통합 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogfwdConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 로그 저장소 설정
    #[serde(default)]
    pub log_store: LogStoreConfig,
    /// 운영자 설정
    #[serde(default)]
    pub operator: OperatorConfig,
    /// 시크릿 설정
    #[serde(default)]
    pub secrets: SecretsConfig,
}

impl LogfwdConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, LogfwdError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, LogfwdError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LogfwdError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                LogfwdError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, LogfwdError> {
        toml::from_str(toml_str).map_err(|e| {
            LogfwdError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `LOGFWD_{SECTION}_{FIELD}`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "LOGFWD_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "LOGFWD_GENERAL_LOG_FORMAT");

        // Log store
        override_store_type(&mut self.log_store.store_type, "LOGFWD_LOG_STORE_TYPE");
        override_string(&mut self.log_store.name, "LOGFWD_LOG_STORE_NAME");
        override_string(
            &mut self.log_store.service_endpoint,
            "LOGFWD_LOG_STORE_SERVICE_ENDPOINT",
        );

        // Operator
        override_string(&mut self.operator.namespace, "LOGFWD_OPERATOR_NAMESPACE");
        override_string(
            &mut self.operator.collector_secret_name,
            "LOGFWD_OPERATOR_COLLECTOR_SECRET_NAME",
        );
        override_string(
            &mut self.operator.default_store_url,
            "LOGFWD_OPERATOR_DEFAULT_STORE_URL",
        );

        // Secrets
        override_string(&mut self.secrets.dir, "LOGFWD_SECRETS_DIR");
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), LogfwdError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        if self.operator.namespace.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "operator.namespace".to_owned(),
                reason: "namespace must not be empty".to_owned(),
            }
            .into());
        }

        // 멀티 테넌트 게이트웨이 주소는 저장소 이름에서 파생됨
        if self.log_store.store_type == LogStoreType::LokiStack && self.log_store.name.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "log_store.name".to_owned(),
                reason: "name must not be empty for a lokistack log store".to_owned(),
            }
            .into());
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "json".to_owned(),
        }
    }
}

/// 로그 저장소 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogStoreConfig {
    /// 저장소 유형 (none, elasticsearch, lokistack)
    #[serde(rename = "type")]
    pub store_type: LogStoreType,
    /// 저장소 이름
    pub name: String,
    /// 저장소 서비스 주소
    pub service_endpoint: String,
}

impl LogStoreConfig {
    /// 정규화 엔진에 전달할 서술자를 생성합니다.
    ///
    /// 유형이 `none`이면 `None`을 반환합니다.
    pub fn to_spec(&self) -> Option<LogStoreSpec> {
        if self.store_type == LogStoreType::None {
            return None;
        }
        Some(LogStoreSpec {
            store_type: self.store_type,
            name: self.name.clone(),
            service_endpoint: self.service_endpoint.clone(),
        })
    }
}

/// 운영자 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatorConfig {
    /// 운영자 네임스페이스
    pub namespace: String,
    /// 수집기 시크릿 이름
    pub collector_secret_name: String,
    /// 단일 테넌트 저장소 기본 주소
    pub default_store_url: String,
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_owned(),
            collector_secret_name: DEFAULT_COLLECTOR_SECRET_NAME.to_owned(),
            default_store_url: DEFAULT_STORE_URL.to_owned(),
        }
    }
}

/// 시크릿 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecretsConfig {
    /// 시크릿 디렉토리 (`<dir>/<secret>/<key>` 구조)
    pub dir: String,
}

impl Default for SecretsConfig {
    fn default() -> Self {
        Self {
            dir: "/etc/logfwd/secrets".to_owned(),
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_store_type(target: &mut LogStoreType, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match LogStoreType::from_str_loose(&val) {
            Some(parsed) => *target = parsed,
            None => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse log store type from env var, ignoring"
            ),
        }
    }
}
