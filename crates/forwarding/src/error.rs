//! 포워딩 정규화 에러 타입
//!
//! [`ForwardingError`]는 정규화를 **중단**시키는 상황만 표현합니다.
//! 개별 출력/파이프라인의 무효성은 에러가 아니라 상태(condition)로 보고됩니다.
//! `From<ForwardingError> for LogfwdError` 변환이 구현되어 있어
//! 상위 레이어에서 `?` 연산자로 자연스럽게 전파할 수 있습니다.

use logfwd_core::error::{ConfigError, LogfwdError, NormalizeError, SecretError};

/// 포워딩 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum ForwardingError {
    /// 기본 출력을 참조하지만 로그 저장소가 구성되지 않음
    #[error(
        "no log store configured for the default output referenced by pipelines: {}",
        .pipelines.join(", ")
    )]
    NoLogStore {
        /// 기본 출력을 참조하는 파이프라인 이름
        pipelines: Vec<String>,
    },

    /// 시크릿 조회 자체가 실패 (없음과 구분됨)
    #[error("secret lookup failed for output '{output}' (secret '{secret}'): {source}")]
    SecretLookup {
        /// 조회를 요청한 출력 이름
        output: String,
        /// 조회한 시크릿 이름
        secret: String,
        /// 원인 에러
        #[source]
        source: SecretError,
    },

    /// 명세 파일 로딩 실패
    #[error("spec load error: {path}: {reason}")]
    SpecLoad {
        /// 명세 파일 경로
        path: String,
        /// 실패 사유
        reason: String,
    },

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },
}

impl ForwardingError {
    /// 메트릭 레이블로 사용할 에러 종류를 반환합니다.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NoLogStore { .. } => "no_log_store",
            Self::SecretLookup { .. } => "secret_lookup",
            Self::SpecLoad { .. } => "spec_load",
            Self::Config { .. } => "config",
        }
    }
}

impl From<ForwardingError> for LogfwdError {
    fn from(err: ForwardingError) -> Self {
        match err {
            ForwardingError::NoLogStore { pipelines } => {
                LogfwdError::Normalize(NormalizeError::NoLogStore(pipelines.join(", ")))
            }
            ForwardingError::SecretLookup { source, .. } => LogfwdError::Secret(source),
            ForwardingError::SpecLoad { path, reason } => LogfwdError::SpecLoad { path, reason },
            ForwardingError::Config { field, reason } => {
                LogfwdError::Config(ConfigError::InvalidValue { field, reason })
            }
        }
    }
}
