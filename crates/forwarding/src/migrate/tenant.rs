//! 멀티 테넌트 fan-out 마이그레이터
//!
//! `default`를 참조하는 파이프라인을 입력별로 복제하고, 입력마다
//! 테넌트 게이트웨이로 향하는 Loki 출력을 합성합니다.

use std::collections::BTreeSet;

use logfwd_core::metrics as m;
use logfwd_core::types::{ForwardingSpec, LogStoreSpec, OutputSpec, OutputType, PipelineSpec};

use crate::registry::{OUTPUT_NAME_DEFAULT, OwnedNames, resolve_input_kind, tenant_output_name};

/// 게이트웨이 서비스 포트
const GATEWAY_PORT: u16 = 8080;

/// 테넌트 API 주소를 생성합니다.
///
/// 저장소 이름이 비어 있으면 `None`을 반환합니다.
pub fn gateway_url(store: &LogStoreSpec, namespace: &str, tenant: &str) -> Option<String> {
    if store.name.is_empty() {
        return None;
    }
    Some(format!(
        "https://{}-gateway-http.{namespace}.svc:{GATEWAY_PORT}/api/logs/v1/{tenant}",
        store.name
    ))
}

/// `default` 참조를 테넌트 출력으로 치환합니다.
///
/// 합성된 출력은 이름순으로 정렬되어 기존 출력 뒤에 추가되고 `owned`에 기록됩니다.
pub fn fan_out(
    spec: &ForwardingSpec,
    store: &LogStoreSpec,
    namespace: &str,
    owned: &mut OwnedNames,
) -> ForwardingSpec {
    let mut pipelines = Vec::with_capacity(spec.pipelines.len());
    let mut needed: BTreeSet<&str> = BTreeSet::new();

    for pipeline in &spec.pipelines {
        // 입력이 없는 파이프라인은 그대로 두어 검증기가 MissingSource로 보고하게 함
        if !pipeline.references_output(OUTPUT_NAME_DEFAULT) || pipeline.input_refs.is_empty() {
            pipelines.push(pipeline.clone());
            continue;
        }

        for (index, input) in pipeline.input_refs.iter().enumerate() {
            needed.insert(input.as_str());
            pipelines.push(split_pipeline(pipeline, index, input));
        }
    }

    let mut outputs: Vec<OutputSpec> = needed
        .into_iter()
        .filter_map(|input| tenant_output(spec, store, namespace, input))
        .collect();
    outputs.sort_by(|a, b| a.name.cmp(&b.name));

    if !outputs.is_empty() {
        tracing::info!(
            store = %store.name,
            outputs = outputs.len(),
            "synthesized tenant outputs"
        );
        metrics::counter!(m::SYNTHESIZED_OUTPUTS_TOTAL, m::LABEL_STORE => store.store_type.to_string())
            .increment(outputs.len() as u64);
    }
    for output in &outputs {
        owned.claim_output(output.name.clone());
    }

    let mut result = ForwardingSpec {
        pipelines,
        ..spec.clone()
    };
    result.outputs.extend(outputs);
    result
}

/// 파이프라인의 `index`번째 입력만 남긴 복제본을 만듭니다.
fn split_pipeline(pipeline: &PipelineSpec, index: usize, input: &str) -> PipelineSpec {
    let tenant_output = tenant_output_name(input);
    let name = if !pipeline.name.is_empty() && index > 0 {
        format!("{}-{index}", pipeline.name)
    } else {
        pipeline.name.clone()
    };

    PipelineSpec {
        name,
        input_refs: vec![input.to_owned()],
        output_refs: pipeline
            .output_refs
            .iter()
            .map(|r| {
                if r == OUTPUT_NAME_DEFAULT {
                    tenant_output.clone()
                } else {
                    r.clone()
                }
            })
            .collect(),
        ..pipeline.clone()
    }
}

fn tenant_output(
    spec: &ForwardingSpec,
    store: &LogStoreSpec,
    namespace: &str,
    input: &str,
) -> Option<OutputSpec> {
    let Some(tenant) = resolve_input_kind(input, &spec.inputs) else {
        tracing::warn!(input, "unable to determine tenant for input, no output synthesized");
        return None;
    };
    let Some(url) = gateway_url(store, namespace, tenant.as_str()) else {
        tracing::warn!(input, "log store has no name, no tenant output synthesized");
        return None;
    };
    Some(OutputSpec::new(tenant_output_name(input), OutputType::Loki, url))
}

#[cfg(test)]
mod tests {
    use logfwd_core::types::{AuditSource, InputSpec};

    use super::*;

    const NS: &str = "openshift-logging";

    fn store() -> LogStoreSpec {
        LogStoreSpec::lokistack("lokistack-dev")
    }

    fn spec(pipelines: Vec<PipelineSpec>) -> ForwardingSpec {
        ForwardingSpec {
            pipelines,
            ..ForwardingSpec::default()
        }
    }

    #[test]
    fn gateway_url_format() {
        assert_eq!(
            gateway_url(&store(), NS, "application").as_deref(),
            Some("https://lokistack-dev-gateway-http.openshift-logging.svc:8080/api/logs/v1/application")
        );
        assert_eq!(gateway_url(&LogStoreSpec::lokistack(""), NS, "audit"), None);
    }

    #[test]
    fn splits_pipelines_per_input_and_sorts_outputs() {
        let mut owned = OwnedNames::default();
        let input = spec(vec![PipelineSpec::new(
            "all",
            ["infrastructure", "application"],
            ["default", "es"],
        )]);
        let result = fan_out(&input, &store(), NS, &mut owned);

        assert_eq!(result.pipelines.len(), 2);
        assert_eq!(result.pipelines[0].name, "all");
        assert_eq!(result.pipelines[0].input_refs, ["infrastructure"]);
        assert_eq!(result.pipelines[0].output_refs, ["default-loki-infra", "es"]);
        assert_eq!(result.pipelines[1].name, "all-1");
        assert_eq!(result.pipelines[1].output_refs, ["default-loki-apps", "es"]);

        let names: Vec<_> = result.outputs.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["default-loki-apps", "default-loki-infra"]);
        assert!(result.outputs.iter().all(|o| o.output_type == OutputType::Loki));
        assert!(result.outputs[1].url.ends_with("/api/logs/v1/infrastructure"));
        assert!(owned.owns_output("default-loki-infra"));
    }

    #[test]
    fn unnamed_pipelines_keep_empty_name() {
        let mut owned = OwnedNames::default();
        let input = spec(vec![PipelineSpec::new("", ["application", "audit"], ["default"])]);
        let result = fan_out(&input, &store(), NS, &mut owned);
        assert!(result.pipelines.iter().all(|p| p.name.is_empty()));
    }

    #[test]
    fn non_default_pipelines_pass_through() {
        let mut owned = OwnedNames::default();
        let p = PipelineSpec::new("p", ["application", "audit"], ["es"]);
        let result = fan_out(&spec(vec![p.clone()]), &store(), NS, &mut owned);
        assert_eq!(result.pipelines, vec![p]);
        assert!(result.outputs.is_empty());
    }

    #[test]
    fn declared_inputs_use_their_tenant() {
        let mut owned = OwnedNames::default();
        let mut input = spec(vec![PipelineSpec::new("p", ["my-audit"], ["default"])]);
        input.inputs.push(InputSpec {
            name: "my-audit".to_owned(),
            audit: Some(AuditSource {}),
            ..InputSpec::default()
        });
        let result = fan_out(&input, &store(), NS, &mut owned);
        assert_eq!(result.outputs.len(), 1);
        assert_eq!(result.outputs[0].name, "default-my-audit");
        assert!(result.outputs[0].url.ends_with("/api/logs/v1/audit"));
    }

    #[test]
    fn unresolvable_inputs_produce_no_output() {
        let mut owned = OwnedNames::default();
        let input = spec(vec![PipelineSpec::new("p", ["mystery"], ["default"])]);
        let result = fan_out(&input, &store(), NS, &mut owned);
        assert_eq!(result.pipelines[0].output_refs, ["default-mystery"]);
        assert!(result.outputs.is_empty());
    }

    #[test]
    fn nameless_store_produces_no_output() {
        let mut owned = OwnedNames::default();
        let input = spec(vec![PipelineSpec::new("p", ["application"], ["default"])]);
        let result = fan_out(&input, &LogStoreSpec::lokistack(""), NS, &mut owned);
        assert!(result.outputs.is_empty());
        assert_eq!(result.pipelines[0].output_refs, ["default-loki-apps"]);
    }

    #[test]
    fn pipelines_without_inputs_pass_through() {
        let mut owned = OwnedNames::default();
        let p = PipelineSpec::new("noinputs", Vec::<String>::new(), ["default"]);
        let result = fan_out(&spec(vec![p.clone()]), &store(), NS, &mut owned);
        assert_eq!(result.pipelines, vec![p]);
        assert!(result.outputs.is_empty());
    }
}
