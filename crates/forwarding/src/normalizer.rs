//! 정규화 오케스트레이터
//!
//! 마이그레이션 → 출력 검증 → 파이프라인 검증 → 상태 조립 순서로 실행합니다.
//! 입력 명세는 변경하지 않으며 매 호출마다 새 결과를 반환합니다.

use std::time::Instant;

use logfwd_core::metrics as m;
use logfwd_core::secret::SecretLookup;
use logfwd_core::types::{ForwardingSpec, LogStoreSpec};
use serde::Serialize;

use crate::config::NormalizerConfig;
use crate::error::ForwardingError;
use crate::migrate::migrate_default_output;
use crate::output::OutputValidator;
use crate::pipeline::PipelineValidator;
use crate::status::ForwardingStatus;

/// 정규화 결과
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Normalized {
    /// 정규화된 명세 (수락된 출력과 유지된 파이프라인만 포함)
    pub spec: ForwardingSpec,
    /// 엔티티별 판정 상태
    pub status: ForwardingStatus,
}

/// 포워딩 명세 정규화기
///
/// 설정과 시크릿 조회 구현을 소유하며, 공유 가변 상태가 없으므로
/// 조회 구현이 `Send + Sync`이면 여러 스레드에서 공유할 수 있습니다.
pub struct Normalizer<S: SecretLookup> {
    config: NormalizerConfig,
    secrets: S,
}

impl<S: SecretLookup> Normalizer<S> {
    /// 새 정규화기를 생성합니다.
    pub fn new(config: NormalizerConfig, secrets: S) -> Self {
        Self { config, secrets }
    }

    /// 엔진 설정을 반환합니다.
    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// 명세를 정규화합니다.
    ///
    /// # Errors
    /// - `default` 출력이 참조되지만 저장소가 없는 경우 (`ForwardingError::NoLogStore`)
    /// - 시크릿 조회가 실패한 경우 (`ForwardingError::SecretLookup`)
    pub fn normalize(
        &self,
        spec: &ForwardingSpec,
        log_store: Option<&LogStoreSpec>,
    ) -> Result<Normalized, ForwardingError> {
        let started = Instant::now();
        let result = self.run(spec, log_store);
        metrics::histogram!(m::NORMALIZE_DURATION_SECONDS)
            .record(started.elapsed().as_secs_f64());

        if let Err(e) = &result {
            metrics::counter!(m::NORMALIZE_ERRORS_TOTAL, m::LABEL_KIND => e.kind()).increment(1);
            tracing::error!(error = %e, "normalization aborted");
        }
        result
    }

    fn run(
        &self,
        spec: &ForwardingSpec,
        log_store: Option<&LogStoreSpec>,
    ) -> Result<Normalized, ForwardingError> {
        let migrated = migrate_default_output(spec, log_store, &self.config)?;

        let outputs = OutputValidator::new(&self.secrets)
            .validate(&migrated.spec.outputs, &migrated.owned)?;
        let pipelines = PipelineValidator::validate(
            &migrated.spec.pipelines,
            &migrated.spec.inputs,
            &outputs.accepted_names,
            &migrated.owned,
        );

        let status = ForwardingStatus {
            log_sources: pipelines.log_sources,
            outputs: outputs.statuses,
            pipelines: pipelines.statuses,
        };

        let summary = status.summary();
        tracing::info!(
            store = %log_store.map(|s| s.store_type).unwrap_or_default(),
            outputs_accepted = summary.outputs_accepted,
            outputs_dropped = summary.outputs_dropped,
            pipelines_accepted = summary.pipelines_accepted,
            pipelines_degraded = summary.pipelines_degraded,
            pipelines_dropped = summary.pipelines_dropped,
            "normalized forwarding spec"
        );

        Ok(Normalized {
            spec: ForwardingSpec {
                outputs: outputs.accepted,
                pipelines: pipelines.pipelines,
                ..migrated.spec
            },
            status,
        })
    }
}

/// 일회성 정규화를 수행합니다.
///
/// [`Normalizer`]를 만들지 않고 빌린 조회 구현으로 바로 실행합니다.
pub fn normalize<S: SecretLookup + ?Sized>(
    spec: &ForwardingSpec,
    log_store: Option<&LogStoreSpec>,
    lookup: &S,
    config: &NormalizerConfig,
) -> Result<Normalized, ForwardingError> {
    Normalizer::new(config.clone(), lookup).normalize(spec, log_store)
}
