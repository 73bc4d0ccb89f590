//! 정규화 엔진 설정
//!
//! [`NormalizerConfig`]는 core의 [`OperatorConfig`](logfwd_core::config::OperatorConfig)를
//! 기반으로 마이그레이터가 합성하는 출력의 고정 값을 제공합니다.
//!
//! # 사용 예시
//! ```ignore
//! use logfwd_core::config::LogfwdConfig;
//! use logfwd_forwarding::config::NormalizerConfig;
//!
//! let core_config = LogfwdConfig::default();
//! let config = NormalizerConfig::from_core(&core_config.operator);
//! ```

use logfwd_core::config::{
    DEFAULT_COLLECTOR_SECRET_NAME, DEFAULT_NAMESPACE, DEFAULT_STORE_URL, OperatorConfig,
};
use serde::{Deserialize, Serialize};

use crate::error::ForwardingError;

/// 정규화 엔진 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// 운영자 네임스페이스 (테넌트 게이트웨이 주소에 사용)
    pub namespace: String,
    /// 기본 출력이 참조하는 수집기 시크릿 이름
    pub collector_secret_name: String,
    /// 단일 테넌트 저장소 주소 (서술자에 주소가 없을 때 사용)
    pub default_store_url: String,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_owned(),
            collector_secret_name: DEFAULT_COLLECTOR_SECRET_NAME.to_owned(),
            default_store_url: DEFAULT_STORE_URL.to_owned(),
        }
    }
}

impl NormalizerConfig {
    /// core의 `OperatorConfig`에서 엔진 설정을 생성합니다.
    pub fn from_core(core: &OperatorConfig) -> Self {
        Self {
            namespace: core.namespace.clone(),
            collector_secret_name: core.collector_secret_name.clone(),
            default_store_url: core.default_store_url.clone(),
        }
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), ForwardingError> {
        if self.namespace.is_empty() {
            return Err(ForwardingError::Config {
                field: "namespace".to_owned(),
                reason: "must not be empty".to_owned(),
            });
        }

        if self.collector_secret_name.is_empty() {
            return Err(ForwardingError::Config {
                field: "collector_secret_name".to_owned(),
                reason: "must not be empty".to_owned(),
            });
        }

        if self.default_store_url.is_empty() {
            return Err(ForwardingError::Config {
                field: "default_store_url".to_owned(),
                reason: "must not be empty".to_owned(),
            });
        }

        Ok(())
    }
}

/// 정규화 엔진 설정 빌더
#[derive(Default)]
pub struct NormalizerConfigBuilder {
    config: NormalizerConfig,
}

impl NormalizerConfigBuilder {
    /// 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 운영자 네임스페이스를 설정합니다.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.config.namespace = namespace.into();
        self
    }

    /// 수집기 시크릿 이름을 설정합니다.
    pub fn collector_secret_name(mut self, name: impl Into<String>) -> Self {
        self.config.collector_secret_name = name.into();
        self
    }

    /// 단일 테넌트 저장소 주소를 설정합니다.
    pub fn default_store_url(mut self, url: impl Into<String>) -> Self {
        self.config.default_store_url = url.into();
        self
    }

    /// 설정을 검증하고 반환합니다.
    pub fn build(self) -> Result<NormalizerConfig, ForwardingError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
