//! 정규화 상태 -- 엔티티별 판정 결과와 조건(condition)
//!
//! 각 검증기는 [`EntityStatus`] 목록을 누적하여 반환하고,
//! 오케스트레이터가 이를 [`ForwardingStatus`]로 조립합니다.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::registry::SourceKind;

/// 엔티티 판정 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum State {
    /// 모든 검증 통과
    Accepted,
    /// 일부 출력 참조만 유효 (파이프라인 전용)
    Degraded,
    /// 정규화 결과에서 제외
    Dropped,
}

impl State {
    /// 메트릭 레이블 값
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Degraded => "degraded",
            Self::Dropped => "dropped",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accepted => write!(f, "Accepted"),
            Self::Degraded => write!(f, "Degraded"),
            Self::Dropped => write!(f, "Dropped"),
        }
    }
}

/// 조건이 가리키는 엔티티 측면
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionType {
    /// 이름
    Name,
    /// 출력 유형
    Type,
    /// 출력 주소
    Endpoint,
    /// 출력 시크릿
    Secret,
    /// 파이프라인 입력
    SourceType,
    /// 파이프라인 출력 참조
    OutputRef,
}

/// 조건 사유
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionReason {
    MissingName,
    ReservedNameConflict,
    NonUniqueName,
    UniqueName,
    MissingType,
    UnrecognizedType,
    MissingEndpoint,
    MissingSecretName,
    SecretDoesNotExist,
    SecretMissingSharedKey,
    MissingSource,
    UnrecognizedSourceType,
    UnrecognizedOutputRef,
    MissingOutputs,
}

impl ConditionReason {
    /// 사유별 기본 메시지
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::MissingName => "The name is missing.",
            Self::ReservedNameConflict => "The name is reserved for operator generated entities.",
            Self::NonUniqueName => "The output name is not unique among all defined outputs.",
            Self::UniqueName => "The pipeline name is not unique among all defined pipelines.",
            Self::MissingType => "The output type is missing.",
            Self::UnrecognizedType => "The output type is not recognized.",
            Self::MissingEndpoint => "The output url is missing.",
            Self::MissingSecretName => "The output references a secret without a name.",
            Self::SecretDoesNotExist => "The referenced secret does not exist.",
            Self::SecretMissingSharedKey => "The referenced secret is missing the 'shared_key' entry.",
            Self::MissingSource => "The pipeline does not reference any input.",
            Self::UnrecognizedSourceType => "The pipeline references an input of unknown kind.",
            Self::UnrecognizedOutputRef => "The pipeline references an output that was not accepted.",
            Self::MissingOutputs => "The pipeline lost one or more of its outputs.",
        }
    }
}

/// 판정 결과를 설명하는 조건
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// 조건 유형
    #[serde(rename = "type")]
    pub condition_type: ConditionType,
    /// 사유
    pub reason: ConditionReason,
    /// 사람이 읽을 메시지
    pub message: String,
}

/// 출력 또는 파이프라인 한 개의 상태
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityStatus {
    /// 표시 이름 (이름이 무효하면 `output[i]`/`pipeline[i]`로 대체)
    pub name: String,
    /// 판정 상태
    pub state: State,
    /// 누적된 조건 (발생 순서)
    pub conditions: Vec<Condition>,
}

/// 출력 상태
pub type OutputStatus = EntityStatus;

/// 파이프라인 상태
pub type PipelineStatus = EntityStatus;

impl EntityStatus {
    /// 조건 없는 상태를 생성합니다.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: State::Accepted,
            conditions: Vec::new(),
        }
    }

    /// 기본 메시지로 조건을 추가합니다.
    pub fn add_condition(&mut self, condition_type: ConditionType, reason: ConditionReason) {
        self.add_condition_with_message(condition_type, reason, reason.default_message());
    }

    /// 지정한 메시지로 조건을 추가합니다.
    pub fn add_condition_with_message(
        &mut self,
        condition_type: ConditionType,
        reason: ConditionReason,
        message: impl Into<String>,
    ) {
        self.conditions.push(Condition {
            condition_type,
            reason,
            message: message.into(),
        });
    }

    /// 조건이 하나라도 있는지 확인합니다.
    pub fn has_conditions(&self) -> bool {
        !self.conditions.is_empty()
    }

    /// 주어진 사유의 조건이 있는지 확인합니다.
    pub fn has_reason(&self, reason: ConditionReason) -> bool {
        self.conditions.iter().any(|c| c.reason == reason)
    }
}

/// 정규화 전체 상태
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardingStatus {
    /// 수락/저하된 파이프라인이 사용하는 소스 종류
    pub log_sources: BTreeSet<SourceKind>,
    /// 출력 상태 (선언 순서)
    pub outputs: Vec<OutputStatus>,
    /// 파이프라인 상태 (선언 순서)
    pub pipelines: Vec<PipelineStatus>,
}

/// 상태별 집계
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
    pub outputs_accepted: usize,
    pub outputs_dropped: usize,
    pub pipelines_accepted: usize,
    pub pipelines_degraded: usize,
    pub pipelines_dropped: usize,
}

impl ForwardingStatus {
    /// 이름으로 출력 상태를 찾습니다.
    pub fn output(&self, name: &str) -> Option<&OutputStatus> {
        self.outputs.iter().find(|s| s.name == name)
    }

    /// 이름으로 파이프라인 상태를 찾습니다.
    pub fn pipeline(&self, name: &str) -> Option<&PipelineStatus> {
        self.pipelines.iter().find(|s| s.name == name)
    }

    /// 상태별 개수를 집계합니다.
    pub fn summary(&self) -> StatusSummary {
        let mut summary = StatusSummary::default();
        for s in &self.outputs {
            match s.state {
                State::Accepted => summary.outputs_accepted += 1,
                // 출력에는 Degraded가 없음
                State::Degraded | State::Dropped => summary.outputs_dropped += 1,
            }
        }
        for s in &self.pipelines {
            match s.state {
                State::Accepted => summary.pipelines_accepted += 1,
                State::Degraded => summary.pipelines_degraded += 1,
                State::Dropped => summary.pipelines_dropped += 1,
            }
        }
        summary
    }

    /// 모든 엔티티가 조건 없이 수락되었는지 확인합니다.
    pub fn is_fully_accepted(&self) -> bool {
        self.outputs
            .iter()
            .chain(self.pipelines.iter())
            .all(|s| s.state == State::Accepted)
    }
}
