//! 기본 출력 마이그레이터
//!
//! 예약 이름 `default`로 참조되는 출력을 저장소 서술자에서 합성합니다.

use logfwd_core::metrics as m;
use logfwd_core::types::{
    ForwardingSpec, LogStoreSpec, OutputSecretSpec, OutputSpec, OutputType, PipelineSpec,
};

use super::{Migrated, RouteIndex};
use crate::config::NormalizerConfig;
use crate::error::ForwardingError;
use crate::registry::{
    INPUT_NAME_APPLICATION, INPUT_NAME_INFRASTRUCTURE, OUTPUT_NAME_DEFAULT,
    PIPELINE_NAME_DEFAULT_APP, PIPELINE_NAME_DEFAULT_INFRA, tenant_output_name,
};

/// 예약 파이프라인 이름과 정규 입력
const RESERVED_PIPELINES: [(&str, &str); 2] = [
    (PIPELINE_NAME_DEFAULT_APP, INPUT_NAME_APPLICATION),
    (PIPELINE_NAME_DEFAULT_INFRA, INPUT_NAME_INFRASTRUCTURE),
];

/// 빈 명세에 기본 파이프라인을 추가합니다.
///
/// 저장소가 구성된 경우에만 호출됩니다. `disableDefaultForwarding`이 설정되어 있거나
/// 명세가 비어 있지 않으면 아무것도 하지 않습니다.
/// 기본 출력 자체는 참조 해석 단계에서 합성됩니다.
pub fn bootstrap(migrated: &mut Migrated) {
    let spec = &mut migrated.spec;
    if !spec.is_empty() {
        return;
    }
    if spec.disable_default_forwarding {
        tracing::debug!("default forwarding disabled, skipping bootstrap");
        return;
    }

    tracing::info!("empty forwarding spec, forwarding to the default log store");
    for (name, input) in RESERVED_PIPELINES {
        spec.pipelines
            .push(PipelineSpec::new(name, [input], [OUTPUT_NAME_DEFAULT]));
        migrated.owned.claim_pipeline(name);
    }
}

/// 정규 형태의 예약 파이프라인을 마이그레이터 소유로 재채택합니다.
///
/// 이전 정규화 결과를 다시 정규화할 때 부트스트랩 파이프라인이
/// 예약 이름 충돌로 제외되지 않도록 합니다. 정규 형태는 입력이 예약 입력 하나이고
/// 출력이 `default` 하나(멀티 테넌트 저장소에서는 해당 테넌트 출력 하나)인 경우입니다.
pub fn adopt_reserved_pipelines(migrated: &mut Migrated, store: &LogStoreSpec) {
    for (name, input) in RESERVED_PIPELINES {
        let canonical = migrated
            .spec
            .pipelines
            .iter()
            .any(|p| p.name == name && is_canonical_route(p, input, store));
        if canonical && !migrated.owned.owns_pipeline(name) {
            tracing::debug!(pipeline = name, "adopting reserved pipeline");
            migrated.owned.claim_pipeline(name);
        }
    }
}

fn is_canonical_route(pipeline: &PipelineSpec, input: &str, store: &LogStoreSpec) -> bool {
    if pipeline.input_refs.len() != 1 || pipeline.input_refs[0] != input {
        return false;
    }
    match pipeline.output_refs.as_slice() {
        [output] if output == OUTPUT_NAME_DEFAULT => true,
        [output] => store.is_multi_tenant() && *output == tenant_output_name(input),
        _ => false,
    }
}

/// 기본 출력 참조를 해석합니다.
///
/// `default`가 참조되면 단일 테넌트 저장소의 기본 출력으로 선언된 `default` 출력을
/// 교체하거나 추가합니다. 멀티 테넌트 저장소는 fan-out 단계에서 이미 참조를
/// 치환했으므로 여기서는 아무것도 하지 않습니다.
///
/// # Errors
/// - `default`가 참조되지만 저장소가 없는 경우 (`ForwardingError::NoLogStore`)
pub fn resolve_default_reference(
    migrated: &mut Migrated,
    store: Option<&LogStoreSpec>,
    config: &NormalizerConfig,
) -> Result<(), ForwardingError> {
    let routes = RouteIndex::build(&migrated.spec.pipelines);
    if !routes.is_referenced(OUTPUT_NAME_DEFAULT) {
        return Ok(());
    }

    let store = match store {
        Some(store) => store,
        None => {
            let pipelines = routes.referencing(OUTPUT_NAME_DEFAULT).to_vec();
            tracing::warn!(
                pipelines = ?pipelines,
                "default output referenced but no log store is configured"
            );
            return Err(ForwardingError::NoLogStore { pipelines });
        }
    };

    if store.is_multi_tenant() {
        return Ok(());
    }

    let default_output = new_default_output(store, &migrated.spec, config);
    let mut replaced = false;
    for output in migrated
        .spec
        .outputs
        .iter_mut()
        .filter(|o| o.name == OUTPUT_NAME_DEFAULT)
    {
        let mut replacement = default_output.clone();
        if output.elasticsearch.is_some() {
            replacement.elasticsearch = output.elasticsearch.take();
        }
        *output = replacement;
        replaced = true;
    }
    if !replaced {
        tracing::debug!(url = %default_output.url, "adding default output");
        migrated.spec.outputs.push(default_output);
        metrics::counter!(m::SYNTHESIZED_OUTPUTS_TOTAL, m::LABEL_STORE => store.store_type.to_string())
            .increment(1);
    }
    migrated.owned.claim_output(OUTPUT_NAME_DEFAULT);

    Ok(())
}

/// 단일 테넌트 저장소의 기본 출력을 생성합니다.
///
/// 주소는 저장소 서술자의 서비스 주소, 없으면 설정의 기본 주소를 사용하고
/// elasticsearch 설정 블록은 `outputDefaults`에서 가져옵니다.
pub fn new_default_output(
    store: &LogStoreSpec,
    spec: &ForwardingSpec,
    config: &NormalizerConfig,
) -> OutputSpec {
    let url = if store.service_endpoint.is_empty() {
        config.default_store_url.clone()
    } else {
        store.service_endpoint.clone()
    };

    OutputSpec {
        name: OUTPUT_NAME_DEFAULT.to_owned(),
        output_type: OutputType::Elasticsearch,
        url,
        secret: Some(OutputSecretSpec::named(config.collector_secret_name.clone())),
        elasticsearch: spec
            .output_defaults
            .as_ref()
            .and_then(|d| d.elasticsearch.clone()),
    }
}
