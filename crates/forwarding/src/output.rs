//! 출력 검증기
//!
//! 선언 순서대로 각 출력을 평가하여 조건을 누적합니다.
//! 조건이 하나도 없으면 수락(Accepted), 하나라도 있으면 제외(Dropped)입니다.
//! 시크릿 조회 자체의 실패만 에러로 반환되며 정규화를 중단시킵니다.

use std::collections::BTreeSet;

use logfwd_core::metrics as m;
use logfwd_core::secret::SecretLookup;
use logfwd_core::types::{OutputSpec, OutputType};

use crate::error::ForwardingError;
use crate::registry::{OUTPUT_NAME_DEFAULT, OwnedNames, SECRET_KEY_SHARED_KEY};
use crate::status::{ConditionReason, ConditionType, OutputStatus, State};

/// 출력 검증 결과
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputValidation {
    /// 수락된 출력 이름 집합
    pub accepted_names: BTreeSet<String>,
    /// 수락된 출력 (선언 순서, 내용 변경 없음)
    pub accepted: Vec<OutputSpec>,
    /// 모든 출력의 상태 (선언 순서)
    pub statuses: Vec<OutputStatus>,
}

/// 출력 검증기
///
/// 시크릿 존재 여부는 주입된 [`SecretLookup`]으로 확인합니다.
pub struct OutputValidator<'a, S: SecretLookup + ?Sized> {
    secrets: &'a S,
}

impl<'a, S: SecretLookup + ?Sized> OutputValidator<'a, S> {
    /// 새 검증기를 생성합니다.
    pub fn new(secrets: &'a S) -> Self {
        Self { secrets }
    }

    /// 출력 목록을 검증합니다.
    ///
    /// `owned`에 포함된 출력은 예약 이름(`default`)을 사용해도 충돌로 보지 않습니다.
    ///
    /// # Errors
    /// - 시크릿 조회가 전송 오류로 실패한 경우 (`ForwardingError::SecretLookup`)
    pub fn validate(
        &self,
        outputs: &[OutputSpec],
        owned: &OwnedNames,
    ) -> Result<OutputValidation, ForwardingError> {
        let mut result = OutputValidation::default();

        for (index, output) in outputs.iter().enumerate() {
            let status = self.evaluate(index, output, owned, &result.accepted_names)?;

            tracing::debug!(
                output = %status.name,
                state = %status.state,
                conditions = status.conditions.len(),
                "evaluated output"
            );
            metrics::counter!(m::OUTPUTS_TOTAL, m::LABEL_STATE => status.state.as_label())
                .increment(1);

            if status.state == State::Accepted {
                result.accepted_names.insert(output.name.clone());
                result.accepted.push(output.clone());
            } else {
                tracing::warn!(
                    output = %status.name,
                    reasons = ?status.conditions.iter().map(|c| c.reason).collect::<Vec<_>>(),
                    "dropping output"
                );
            }
            result.statuses.push(status);
        }

        Ok(result)
    }

    fn evaluate(
        &self,
        index: usize,
        output: &OutputSpec,
        owned: &OwnedNames,
        accepted_names: &BTreeSet<String>,
    ) -> Result<OutputStatus, ForwardingError> {
        let mut status = OutputStatus::new(output.name.clone());
        let placeholder = format!("output[{index}]");

        if output.name.is_empty() {
            status.name = placeholder;
            status.add_condition(ConditionType::Name, ConditionReason::MissingName);
        } else if output.name == OUTPUT_NAME_DEFAULT && !owned.owns_output(&output.name) {
            status.name = placeholder;
            status.add_condition(ConditionType::Name, ConditionReason::ReservedNameConflict);
        } else if accepted_names.contains(&output.name) {
            status.name = placeholder;
            status.add_condition(ConditionType::Name, ConditionReason::NonUniqueName);
        }

        if output.output_type.is_missing() {
            status.add_condition(ConditionType::Type, ConditionReason::MissingType);
        } else if !output.output_type.is_recognized() {
            status.add_condition_with_message(
                ConditionType::Type,
                ConditionReason::UnrecognizedType,
                format!("The output type '{}' is not recognized.", output.output_type),
            );
        }

        if output.url.is_empty() {
            status.add_condition(ConditionType::Endpoint, ConditionReason::MissingEndpoint);
        }

        if let Some(secret_ref) = &output.secret {
            if secret_ref.name.is_empty() {
                status.add_condition(ConditionType::Secret, ConditionReason::MissingSecretName);
            } else {
                metrics::counter!(m::SECRET_LOOKUPS_TOTAL).increment(1);
                let found = self.secrets.lookup(&secret_ref.name).map_err(|source| {
                    ForwardingError::SecretLookup {
                        output: output.name.clone(),
                        secret: secret_ref.name.clone(),
                        source,
                    }
                })?;

                match found {
                    None => status.add_condition_with_message(
                        ConditionType::Secret,
                        ConditionReason::SecretDoesNotExist,
                        format!("The referenced secret '{}' does not exist.", secret_ref.name),
                    ),
                    Some(secret)
                        if output.output_type == OutputType::FluentdForward
                            && !secret.contains_key(SECRET_KEY_SHARED_KEY) =>
                    {
                        status.add_condition_with_message(
                            ConditionType::Secret,
                            ConditionReason::SecretMissingSharedKey,
                            format!(
                                "The referenced secret '{}' is missing the '{SECRET_KEY_SHARED_KEY}' entry.",
                                secret_ref.name
                            ),
                        )
                    }
                    Some(_) => {}
                }
            }
        }

        if status.has_conditions() {
            status.state = State::Dropped;
        }
        Ok(status)
    }
}
