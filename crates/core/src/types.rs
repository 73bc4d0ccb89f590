//! 도메인 타입 — 로그 포워딩 명세의 데이터 모델
//!
//! 출력(output), 파이프라인(pipeline), 입력(input)과 이들을 묶는
//! [`ForwardingSpec`], 그리고 외부에서 전달되는 [`LogStoreSpec`]을 정의합니다.
//! 필드는 camelCase로 직렬화되므로 기존 명세 파일을 그대로 읽을 수 있습니다.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// 출력 유형
///
/// 인식 가능한 유형의 닫힌 집합입니다. 알 수 없는 문자열은
/// [`OutputType::Unrecognized`]로 보존되어 검증 단계에서 한 번만 판정됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OutputType {
    /// Elasticsearch (단일 테넌트 기본 로그 저장소와 같은 유형)
    Elasticsearch,
    /// Fluentd forward 프로토콜
    FluentdForward,
    /// Syslog (RFC 3164/5424)
    Syslog,
    /// Loki (멀티 테넌트 기본 로그 저장소와 같은 유형)
    Loki,
    /// Kafka
    Kafka,
    /// CloudWatch Logs
    Cloudwatch,
    /// HTTP
    Http,
    /// 인식할 수 없는 유형 (빈 문자열 포함)
    Unrecognized(String),
}

impl OutputType {
    /// 와이어 형식의 유형 이름을 반환합니다.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Elasticsearch => "elasticsearch",
            Self::FluentdForward => "fluentdForward",
            Self::Syslog => "syslog",
            Self::Loki => "loki",
            Self::Kafka => "kafka",
            Self::Cloudwatch => "cloudwatch",
            Self::Http => "http",
            Self::Unrecognized(raw) => raw,
        }
    }

    /// 유형이 비어 있는지 확인합니다.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Unrecognized(raw) if raw.is_empty())
    }

    /// 인식 가능한 유형인지 확인합니다.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl Default for OutputType {
    fn default() -> Self {
        Self::Unrecognized(String::new())
    }
}

impl From<&str> for OutputType {
    fn from(s: &str) -> Self {
        match s {
            "elasticsearch" => Self::Elasticsearch,
            "fluentdForward" => Self::FluentdForward,
            "syslog" => Self::Syslog,
            "loki" => Self::Loki,
            "kafka" => Self::Kafka,
            "cloudwatch" => Self::Cloudwatch,
            "http" => Self::Http,
            other => Self::Unrecognized(other.to_owned()),
        }
    }
}

impl From<String> for OutputType {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<OutputType> for String {
    fn from(t: OutputType) -> Self {
        match t {
            OutputType::Unrecognized(raw) => raw,
            other => other.as_str().to_owned(),
        }
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 출력이 참조하는 시크릿
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSecretSpec {
    /// 시크릿 이름
    pub name: String,
}

impl OutputSecretSpec {
    /// 이름으로 시크릿 참조를 생성합니다.
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Elasticsearch 유형 전용 튜닝 블록
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElasticsearchTuning {
    /// 구조화 로그의 인덱스 이름을 결정할 필드 키
    #[serde(skip_serializing_if = "String::is_empty")]
    pub structured_type_key: String,
    /// 구조화 로그의 기본 인덱스 이름
    #[serde(skip_serializing_if = "String::is_empty")]
    pub structured_type_name: String,
    /// 컨테이너 단위 구조화 로그 활성화
    pub enable_structured_container_logs: bool,
}

/// 포워딩 목적지
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OutputSpec {
    /// 출력 이름 (출력 간 고유)
    pub name: String,
    /// 출력 유형
    #[serde(rename = "type")]
    pub output_type: OutputType,
    /// 목적지 주소
    #[serde(alias = "endpoint")]
    pub url: String,
    /// 시크릿 참조
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<OutputSecretSpec>,
    /// Elasticsearch 유형 전용 설정
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elasticsearch: Option<ElasticsearchTuning>,
}

impl OutputSpec {
    /// 이름, 유형, 주소로 출력을 생성합니다.
    pub fn new(name: impl Into<String>, output_type: OutputType, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            output_type,
            url: url.into(),
            ..Self::default()
        }
    }

    /// 시크릿 참조를 설정합니다.
    pub fn with_secret(mut self, name: impl Into<String>) -> Self {
        self.secret = Some(OutputSecretSpec::named(name));
        self
    }
}

/// 입력에서 출력으로의 경로
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PipelineSpec {
    /// 파이프라인 이름
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// 참조하는 입력 이름 (순서가 fan-out 순서를 결정)
    pub input_refs: Vec<String>,
    /// 참조하는 출력 이름
    pub output_refs: Vec<String>,
    /// 레코드에 부착할 레이블
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    /// 파싱 방식 (예: json)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse: Option<String>,
}

impl PipelineSpec {
    /// 이름, 입력, 출력으로 파이프라인을 생성합니다.
    pub fn new<I, O>(name: impl Into<String>, inputs: I, outputs: O) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        O: IntoIterator,
        O::Item: Into<String>,
    {
        Self {
            name: name.into(),
            input_refs: inputs.into_iter().map(Into::into).collect(),
            output_refs: outputs.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// 주어진 출력 이름을 참조하는지 확인합니다.
    pub fn references_output(&self, name: &str) -> bool {
        self.output_refs.iter().any(|r| r == name)
    }
}

/// 애플리케이션 로그 소스
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationSource {
    /// 수집 대상 네임스페이스 (비어 있으면 전체)
    pub namespaces: Vec<String>,
}

/// 인프라 로그 소스
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfrastructureSource {}

/// 감사 로그 소스
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSource {}

/// 이름이 붙은 로그 입력
///
/// 종류는 채워진 소스 하위 필드로 결정됩니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSpec {
    /// 입력 이름
    pub name: String,
    /// 애플리케이션 소스
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application: Option<ApplicationSource>,
    /// 인프라 소스
    #[serde(skip_serializing_if = "Option::is_none")]
    pub infrastructure: Option<InfrastructureSource>,
    /// 감사 소스
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audit: Option<AuditSource>,
}

/// 출력 유형별 기본값
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputDefaults {
    /// 기본 출력에 적용할 Elasticsearch 설정
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elasticsearch: Option<ElasticsearchTuning>,
}

/// 로그 포워딩 명세 (루트 엔티티)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ForwardingSpec {
    /// 출력 목록
    pub outputs: Vec<OutputSpec>,
    /// 파이프라인 목록
    pub pipelines: Vec<PipelineSpec>,
    /// 입력 목록
    pub inputs: Vec<InputSpec>,
    /// 기본 포워딩 비활성화
    pub disable_default_forwarding: bool,
    /// 출력 유형별 기본값
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_defaults: Option<OutputDefaults>,
}

impl ForwardingSpec {
    /// 출력, 파이프라인, 입력, 기본값이 모두 비어 있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
            && self.pipelines.is_empty()
            && self.inputs.is_empty()
            && self.output_defaults.is_none()
    }
}

/// 로그 저장소 유형
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogStoreType {
    /// 저장소 없음
    #[default]
    None,
    /// 단일 테넌트 저장소
    Elasticsearch,
    /// 멀티 테넌트 저장소 (테넌트별 엔드포인트)
    LokiStack,
}

impl LogStoreType {
    /// 문자열에서 저장소 유형을 파싱합니다 (대소문자 구분 없음).
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "" | "none" => Some(Self::None),
            "elasticsearch" | "es" => Some(Self::Elasticsearch),
            "lokistack" | "loki" => Some(Self::LokiStack),
            _ => None,
        }
    }
}

impl fmt::Display for LogStoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Elasticsearch => write!(f, "elasticsearch"),
            Self::LokiStack => write!(f, "lokistack"),
        }
    }
}

/// 외부 로그 저장소 서술자
///
/// 호출자가 제공하는 읽기 전용 값입니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogStoreSpec {
    /// 저장소 유형
    #[serde(rename = "type")]
    pub store_type: LogStoreType,
    /// 저장소 이름 (멀티 테넌트 게이트웨이 서비스 이름의 접두사)
    pub name: String,
    /// 저장소 서비스 주소 (비어 있으면 운영자 기본값 사용)
    pub service_endpoint: String,
}

impl LogStoreSpec {
    /// 단일 테넌트 저장소를 생성합니다.
    pub fn elasticsearch(name: impl Into<String>) -> Self {
        Self {
            store_type: LogStoreType::Elasticsearch,
            name: name.into(),
            service_endpoint: String::new(),
        }
    }

    /// 멀티 테넌트 저장소를 생성합니다.
    pub fn lokistack(name: impl Into<String>) -> Self {
        Self {
            store_type: LogStoreType::LokiStack,
            name: name.into(),
            service_endpoint: String::new(),
        }
    }

    /// 저장소가 실제로 구성되어 있는지 확인합니다.
    pub fn is_configured(&self) -> bool {
        self.store_type != LogStoreType::None
    }

    /// 멀티 테넌트 저장소인지 확인합니다.
    pub fn is_multi_tenant(&self) -> bool {
        self.store_type == LogStoreType::LokiStack
    }
}
