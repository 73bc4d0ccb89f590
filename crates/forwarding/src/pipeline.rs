//! 파이프라인 검증기
//!
//! 이름과 입력을 먼저 검사하고, 통과한 파이프라인만 출력 참조를
//! 수락된 출력 집합에 대해 해석합니다.
//!
//! | 해석 결과 | 상태 |
//! |-----------|------|
//! | 모든 참조 유효 | Accepted |
//! | 일부만 유효 | Degraded + `MissingOutputs` |
//! | 유효한 참조 없음 | Dropped + `MissingOutputs` |

use std::collections::BTreeSet;

use logfwd_core::metrics as m;
use logfwd_core::types::{InputSpec, PipelineSpec};

use crate::registry::{OwnedNames, SourceKind, is_reserved_pipeline_name, resolve_input_kind};
use crate::status::{ConditionReason, ConditionType, PipelineStatus, State};

/// 파이프라인 검증 결과
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineValidation {
    /// 유지된 파이프라인 (선언 순서, 출력 참조는 수락된 것만 남음)
    pub pipelines: Vec<PipelineSpec>,
    /// 유지된 파이프라인이 사용하는 소스 종류
    pub log_sources: BTreeSet<SourceKind>,
    /// 모든 파이프라인의 상태 (선언 순서)
    pub statuses: Vec<PipelineStatus>,
}

/// 파이프라인 검증기
pub struct PipelineValidator;

impl PipelineValidator {
    /// 파이프라인 목록을 검증합니다.
    ///
    /// 입력 참조는 예약 입력 이름 또는 `inputs`에 선언된 입력으로 해석합니다.
    pub fn validate(
        pipelines: &[PipelineSpec],
        inputs: &[InputSpec],
        accepted_outputs: &BTreeSet<String>,
        owned: &OwnedNames,
    ) -> PipelineValidation {
        let mut result = PipelineValidation::default();
        let mut kept_names: BTreeSet<String> = BTreeSet::new();

        for (index, pipeline) in pipelines.iter().enumerate() {
            let (status, kept) =
                Self::evaluate(index, pipeline, inputs, accepted_outputs, owned, &kept_names);

            tracing::debug!(
                pipeline = %status.name,
                state = %status.state,
                conditions = status.conditions.len(),
                "evaluated pipeline"
            );
            metrics::counter!(m::PIPELINES_TOTAL, m::LABEL_STATE => status.state.as_label())
                .increment(1);

            match kept {
                Some((pipeline, kinds)) => {
                    if status.state == State::Degraded {
                        tracing::warn!(
                            pipeline = %status.name,
                            "pipeline degraded: some output references were dropped"
                        );
                    }
                    kept_names.insert(pipeline.name.clone());
                    result.log_sources.extend(kinds);
                    result.pipelines.push(pipeline);
                }
                None => {
                    tracing::warn!(
                        pipeline = %status.name,
                        reasons = ?status.conditions.iter().map(|c| c.reason).collect::<Vec<_>>(),
                        "dropping pipeline"
                    );
                }
            }
            result.statuses.push(status);
        }

        result
    }

    fn evaluate(
        index: usize,
        pipeline: &PipelineSpec,
        inputs: &[InputSpec],
        accepted_outputs: &BTreeSet<String>,
        owned: &OwnedNames,
        kept_names: &BTreeSet<String>,
    ) -> (PipelineStatus, Option<(PipelineSpec, BTreeSet<SourceKind>)>) {
        let mut status = PipelineStatus::new(pipeline.name.clone());
        let placeholder = format!("pipeline[{index}]");

        if pipeline.name.is_empty() {
            status.name = placeholder;
            status.add_condition(ConditionType::Name, ConditionReason::MissingName);
        } else if is_reserved_pipeline_name(&pipeline.name) && !owned.owns_pipeline(&pipeline.name)
        {
            status.name = placeholder;
            status.add_condition(ConditionType::Name, ConditionReason::ReservedNameConflict);
        } else if kept_names.contains(&pipeline.name) {
            status.name = placeholder;
            status.add_condition(ConditionType::Name, ConditionReason::UniqueName);
        }

        let mut kinds = BTreeSet::new();
        if pipeline.input_refs.is_empty() {
            status.add_condition(ConditionType::SourceType, ConditionReason::MissingSource);
        } else {
            let unresolved: Vec<&str> = pipeline
                .input_refs
                .iter()
                .filter_map(|input| match resolve_input_kind(input, inputs) {
                    Some(kind) => {
                        kinds.insert(kind);
                        None
                    }
                    None => Some(input.as_str()),
                })
                .collect();
            if !unresolved.is_empty() {
                status.add_condition_with_message(
                    ConditionType::SourceType,
                    ConditionReason::UnrecognizedSourceType,
                    format!(
                        "The pipeline references inputs of unknown kind: {}",
                        unresolved.join(", ")
                    ),
                );
            }
        }

        if status.has_conditions() {
            status.state = State::Dropped;
            return (status, None);
        }

        let mut resolved = Vec::with_capacity(pipeline.output_refs.len());
        for output_ref in &pipeline.output_refs {
            if accepted_outputs.contains(output_ref) {
                resolved.push(output_ref.clone());
            } else {
                status.add_condition_with_message(
                    ConditionType::OutputRef,
                    ConditionReason::UnrecognizedOutputRef,
                    format!("The pipeline references an unrecognized output '{output_ref}'."),
                );
            }
        }

        if resolved.is_empty() {
            status.add_condition(ConditionType::OutputRef, ConditionReason::MissingOutputs);
            status.state = State::Dropped;
            return (status, None);
        }

        if resolved.len() < pipeline.output_refs.len() {
            status.add_condition(ConditionType::OutputRef, ConditionReason::MissingOutputs);
            status.state = State::Degraded;
        }

        let kept = PipelineSpec {
            output_refs: resolved,
            ..pipeline.clone()
        };
        (status, Some((kept, kinds)))
    }
}
