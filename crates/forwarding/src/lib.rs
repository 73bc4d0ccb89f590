#![doc = include_str!("../README.md")]
//!
//! # 모듈 구성
//!
//! - [`registry`]: 인식 가능한 출력 유형, 소스 종류, 예약 이름, 테넌트 출력 이름 규칙
//! - [`output`]: 출력 검증기
//! - [`pipeline`]: 파이프라인 검증기
//! - [`migrate`]: 기본 출력 주입과 멀티 테넌트 fan-out
//! - [`normalizer`]: 전체 정규화 오케스트레이션
//! - [`status`]: 판정 상태와 조건
//! - [`secret_store`]: 시크릿 조회 구현
//! - [`loader`]: 명세 파일 로더
//! - [`config`]: 엔진 설정 (core 설정 확장)
//! - [`error`]: 도메인 에러 타입
//!
//! # 아키텍처
//!
//! ```text
//! ForwardingSpec -> migrate -> OutputValidator -> PipelineValidator -> Normalized
//!                      |              |
//!               LogStoreSpec     SecretLookup
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod migrate;
pub mod normalizer;
pub mod output;
pub mod pipeline;
pub mod registry;
pub mod secret_store;
pub mod status;

// --- 주요 타입 re-export ---

// 정규화
pub use normalizer::{Normalized, Normalizer, normalize};

// 설정
pub use config::{NormalizerConfig, NormalizerConfigBuilder};

// 에러
pub use error::ForwardingError;

// 검증기
pub use output::{OutputValidation, OutputValidator};
pub use pipeline::{PipelineValidation, PipelineValidator};

// 마이그레이션
pub use migrate::{Migrated, migrate_default_output};

// 상태
pub use status::{
    Condition, ConditionReason, ConditionType, EntityStatus, ForwardingStatus, OutputStatus,
    PipelineStatus, State, StatusSummary,
};

// 레지스트리
pub use registry::{OwnedNames, SourceKind};

// 시크릿 저장소
pub use secret_store::{DirSecretStore, StaticSecretStore};

// 로더
pub use loader::{SpecFormat, load_spec, parse_spec};
