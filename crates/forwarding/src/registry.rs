//! 엔티티 레지스트리 -- 인식 가능한 유형, 예약 이름, 결정적 이름 규칙
//!
//! 출력 유형과 소스 종류는 닫힌 열거형이며, 문자열 판정은 이 모듈에서 한 번만 수행합니다.

use std::collections::BTreeSet;
use std::fmt;

use logfwd_core::types::{InputSpec, OutputType};
use serde::{Deserialize, Serialize};

/// 마이그레이터 전용 예약 출력 이름
pub const OUTPUT_NAME_DEFAULT: &str = "default";

/// 예약 입력 이름: 애플리케이션
pub const INPUT_NAME_APPLICATION: &str = "application";
/// 예약 입력 이름: 인프라
pub const INPUT_NAME_INFRASTRUCTURE: &str = "infrastructure";
/// 예약 입력 이름: 감사
pub const INPUT_NAME_AUDIT: &str = "audit";

/// 예약 입력 이름 목록 (이름이 곧 종류)
pub const RESERVED_INPUT_NAMES: [&str; 3] =
    [INPUT_NAME_APPLICATION, INPUT_NAME_INFRASTRUCTURE, INPUT_NAME_AUDIT];

/// 부트스트랩 애플리케이션 파이프라인 이름
pub const PIPELINE_NAME_DEFAULT_APP: &str = "default-app-pipeline";
/// 부트스트랩 인프라 파이프라인 이름
pub const PIPELINE_NAME_DEFAULT_INFRA: &str = "default-infra-pipeline";

/// 예약 파이프라인 이름 목록
pub const RESERVED_PIPELINE_NAMES: [&str; 2] =
    [PIPELINE_NAME_DEFAULT_APP, PIPELINE_NAME_DEFAULT_INFRA];

/// fluentdForward 출력 시크릿에 필요한 키
pub const SECRET_KEY_SHARED_KEY: &str = "shared_key";

/// 인식 가능한 출력 유형 목록
pub const RECOGNIZED_OUTPUT_TYPES: [OutputType; 7] = [
    OutputType::Elasticsearch,
    OutputType::FluentdForward,
    OutputType::Syslog,
    OutputType::Loki,
    OutputType::Kafka,
    OutputType::Cloudwatch,
    OutputType::Http,
];

/// 로그 소스 종류
///
/// `Ord` 구현 순서가 상태 보고서의 `logSources` 정렬 순서입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// 애플리케이션 컨테이너 로그
    Application,
    /// 노드/플랫폼 로그
    Infrastructure,
    /// 감사 로그
    Audit,
}

impl SourceKind {
    /// 모든 종류 (선언 순서)
    pub const ALL: [SourceKind; 3] = [Self::Application, Self::Infrastructure, Self::Audit];

    /// 종류에 대응하는 예약 입력 이름을 반환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Application => INPUT_NAME_APPLICATION,
            Self::Infrastructure => INPUT_NAME_INFRASTRUCTURE,
            Self::Audit => INPUT_NAME_AUDIT,
        }
    }

    /// 예약 입력 이름에서 종류를 파싱합니다 (대소문자 구분).
    pub fn from_reserved_name(name: &str) -> Option<Self> {
        match name {
            INPUT_NAME_APPLICATION => Some(Self::Application),
            INPUT_NAME_INFRASTRUCTURE => Some(Self::Infrastructure),
            INPUT_NAME_AUDIT => Some(Self::Audit),
            _ => None,
        }
    }

    /// 멀티 테넌트 저장소의 테넌트 출력 접미사
    fn tenant_suffix(&self) -> &'static str {
        match self {
            Self::Application => "loki-apps",
            Self::Infrastructure => "loki-infra",
            Self::Audit => "loki-audit",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 예약 입력 이름인지 확인합니다.
pub fn is_reserved_input_name(name: &str) -> bool {
    SourceKind::from_reserved_name(name).is_some()
}

/// 예약 파이프라인 이름인지 확인합니다.
pub fn is_reserved_pipeline_name(name: &str) -> bool {
    RESERVED_PIPELINE_NAMES.contains(&name)
}

/// 선언된 입력의 종류를 판정합니다.
///
/// 채워진 소스 하위 필드 중 첫 번째(application, infrastructure, audit 순)를 사용합니다.
pub fn input_kind(input: &InputSpec) -> Option<SourceKind> {
    if input.application.is_some() {
        Some(SourceKind::Application)
    } else if input.infrastructure.is_some() {
        Some(SourceKind::Infrastructure)
    } else if input.audit.is_some() {
        Some(SourceKind::Audit)
    } else {
        None
    }
}

/// 입력 참조 이름을 소스 종류로 해석합니다.
///
/// 예약 이름이면 이름 자체가 종류이고, 그렇지 않으면 같은 이름으로 선언된
/// 입력 중 소스 하위 필드가 채워진 첫 번째 입력으로 판정합니다.
pub fn resolve_input_kind(name: &str, inputs: &[InputSpec]) -> Option<SourceKind> {
    if let Some(kind) = SourceKind::from_reserved_name(name) {
        return Some(kind);
    }
    inputs
        .iter()
        .filter(|i| i.name == name)
        .find_map(input_kind)
}

/// 입력 이름에서 테넌트 출력 이름을 결정적으로 생성합니다.
///
/// 예약 입력은 `default-loki-apps` 형식, 그 외는 `default-<input>` 형식입니다.
pub fn tenant_output_name(input_name: &str) -> String {
    match SourceKind::from_reserved_name(input_name) {
        Some(kind) => format!("{OUTPUT_NAME_DEFAULT}-{}", kind.tenant_suffix()),
        None => format!("{OUTPUT_NAME_DEFAULT}-{input_name}"),
    }
}

/// 마이그레이터가 소유한 엔티티 이름
///
/// 예약 이름을 가진 엔티티라도 마이그레이터가 합성(또는 재채택)한 것이면
/// 예약 이름 충돌로 판정하지 않습니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnedNames {
    outputs: BTreeSet<String>,
    pipelines: BTreeSet<String>,
}

impl OwnedNames {
    /// 출력 이름을 소유로 표시합니다.
    pub fn claim_output(&mut self, name: impl Into<String>) {
        self.outputs.insert(name.into());
    }

    /// 파이프라인 이름을 소유로 표시합니다.
    pub fn claim_pipeline(&mut self, name: impl Into<String>) {
        self.pipelines.insert(name.into());
    }

    /// 출력이 마이그레이터 소유인지 확인합니다.
    pub fn owns_output(&self, name: &str) -> bool {
        self.outputs.contains(name)
    }

    /// 파이프라인이 마이그레이터 소유인지 확인합니다.
    pub fn owns_pipeline(&self, name: &str) -> bool {
        self.pipelines.contains(name)
    }
}
