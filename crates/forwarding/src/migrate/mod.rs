//! 명세 마이그레이션 -- 기본 출력 주입과 멀티 테넌트 fan-out
//!
//! 검증 전에 한 번 수행되며, 입력 명세를 변경하지 않고 새 명세를 반환합니다.
//!
//! # 처리 순서
//! 1. 빈 명세 부트스트랩 ([`default_output::bootstrap`])
//! 2. 예약 파이프라인 재채택 ([`default_output::adopt_reserved_pipelines`])
//! 3. 멀티 테넌트 저장소 fan-out ([`tenant::fan_out`])
//! 4. 기본 출력 참조 해석 ([`default_output::resolve_default_reference`])
//!
//! 마이그레이터는 출력 참조의 유효성을 검사하지 않습니다. 그것은 검증기의 몫입니다.

pub mod default_output;
pub mod tenant;

use std::collections::BTreeMap;

use logfwd_core::types::{ForwardingSpec, LogStoreSpec, PipelineSpec};

use crate::config::NormalizerConfig;
use crate::error::ForwardingError;
use crate::registry::OwnedNames;

/// 마이그레이션 결과
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Migrated {
    /// 마이그레이션된 명세
    pub spec: ForwardingSpec,
    /// 마이그레이터가 합성하거나 재채택한 이름
    pub owned: OwnedNames,
}

/// 출력 이름 → 참조하는 파이프라인 표시 이름
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteIndex {
    by_output: BTreeMap<String, Vec<String>>,
}

impl RouteIndex {
    /// 파이프라인 목록에서 색인을 생성합니다.
    ///
    /// 이름 없는 파이프라인은 `pipeline[i]`로 기록됩니다.
    pub fn build(pipelines: &[PipelineSpec]) -> Self {
        let mut by_output: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (index, pipeline) in pipelines.iter().enumerate() {
            let display = if pipeline.name.is_empty() {
                format!("pipeline[{index}]")
            } else {
                pipeline.name.clone()
            };
            for output in &pipeline.output_refs {
                let referrers = by_output.entry(output.clone()).or_default();
                if !referrers.contains(&display) {
                    referrers.push(display.clone());
                }
            }
        }
        Self { by_output }
    }

    /// 출력을 참조하는 파이프라인 이름을 반환합니다.
    pub fn referencing(&self, output: &str) -> &[String] {
        self.by_output.get(output).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 출력이 하나 이상의 파이프라인에서 참조되는지 확인합니다.
    pub fn is_referenced(&self, output: &str) -> bool {
        !self.referencing(output).is_empty()
    }
}

/// 기본 출력 마이그레이션을 수행합니다.
///
/// 구성되지 않은 저장소(`LogStoreType::None`)는 `None`과 같게 취급합니다.
///
/// # Errors
/// - `default` 출력이 참조되지만 저장소가 없는 경우 (`ForwardingError::NoLogStore`)
pub fn migrate_default_output(
    spec: &ForwardingSpec,
    log_store: Option<&LogStoreSpec>,
    config: &NormalizerConfig,
) -> Result<Migrated, ForwardingError> {
    let store = log_store.filter(|s| s.is_configured());
    let mut migrated = Migrated {
        spec: spec.clone(),
        owned: OwnedNames::default(),
    };

    if let Some(store) = store {
        default_output::bootstrap(&mut migrated);
        default_output::adopt_reserved_pipelines(&mut migrated, store);

        if store.is_multi_tenant() {
            migrated.spec = tenant::fan_out(
                &migrated.spec,
                store,
                &config.namespace,
                &mut migrated.owned,
            );
        }
    }

    default_output::resolve_default_reference(&mut migrated, store, config)?;
    Ok(migrated)
}
