#![doc = include_str!("../README.md")]

pub mod config;
pub mod error;
pub mod metrics;
pub mod secret;
pub mod types;

// --- 주요 타입 re-export ---
// 각 모듈의 핵심 타입을 크레이트 루트에서 바로 사용할 수 있도록 합니다.

// 에러
pub use error::{ConfigError, LogfwdError, NormalizeError, SecretError};

// 설정
pub use config::LogfwdConfig;

// 시크릿 조회 trait
pub use secret::{Secret, SecretLookup};

// 도메인 타입
pub use types::{
    ElasticsearchTuning, ForwardingSpec, InputSpec, LogStoreSpec, LogStoreType, OutputDefaults,
    OutputSecretSpec, OutputSpec, OutputType, PipelineSpec,
};
