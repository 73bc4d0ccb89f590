//! 통합 테스트 -- 명세 로딩부터 정규화 결과까지 전체 흐름 검증

use logfwd_core::secret::Secret;
use logfwd_core::types::{
    ApplicationSource, ForwardingSpec, InputSpec, LogStoreSpec, OutputSpec, OutputType,
    PipelineSpec,
};
use logfwd_forwarding::{
    ConditionReason, DirSecretStore, ForwardingError, Normalizer, NormalizerConfig, SourceKind,
    SpecFormat, State, StaticSecretStore, parse_spec,
};

fn collector_secrets() -> StaticSecretStore {
    StaticSecretStore::new()
        .with_secret(Secret::new("collector").with_entry("ca-bundle.crt", "pem"))
        .with_secret(Secret::new("fluent-ok").with_entry("shared_key", "k"))
        .with_secret(Secret::new("fluent-nokey").with_entry("tls.crt", "pem"))
}

fn normalizer() -> Normalizer<StaticSecretStore> {
    Normalizer::new(NormalizerConfig::default(), collector_secrets())
}

/// 빈 명세 + 단일 테넌트 저장소 → 파이프라인 2개와 기본 출력 1개
#[test]
fn test_bootstrap_single_tenant() {
    let store = LogStoreSpec::elasticsearch("elasticsearch");
    let result = normalizer()
        .normalize(&ForwardingSpec::default(), Some(&store))
        .unwrap();

    assert_eq!(result.spec.pipelines.len(), 2);
    assert_eq!(result.spec.outputs.len(), 1);
    let output = &result.spec.outputs[0];
    assert_eq!(output.name, "default");
    assert_eq!(output.output_type, OutputType::Elasticsearch);
    assert_eq!(output.url, "https://elasticsearch.openshift-logging.svc:9200");
    assert_eq!(output.secret.as_ref().unwrap().name, "collector");

    assert!(result.status.is_fully_accepted());
    assert_eq!(
        result.status.log_sources.iter().copied().collect::<Vec<_>>(),
        vec![SourceKind::Application, SourceKind::Infrastructure]
    );
}

/// 멀티 테넌트 저장소 → 테넌트 출력으로 치환, 출력은 이름순 정렬
#[test]
fn test_multi_tenant_fan_out() {
    let store = LogStoreSpec::lokistack("lokistack-dev");
    let spec = ForwardingSpec {
        pipelines: vec![
            PipelineSpec::new("infra", ["infrastructure"], ["default"]),
            PipelineSpec::new("apps", ["application"], ["default"]),
        ],
        ..ForwardingSpec::default()
    };
    let result = normalizer().normalize(&spec, Some(&store)).unwrap();

    assert_eq!(result.spec.pipelines[0].output_refs, ["default-loki-infra"]);
    assert_eq!(result.spec.pipelines[1].output_refs, ["default-loki-apps"]);

    let outputs: Vec<(&str, &str)> = result
        .spec
        .outputs
        .iter()
        .map(|o| (o.name.as_str(), o.url.as_str()))
        .collect();
    assert_eq!(
        outputs,
        vec![
            (
                "default-loki-apps",
                "https://lokistack-dev-gateway-http.openshift-logging.svc:8080/api/logs/v1/application"
            ),
            (
                "default-loki-infra",
                "https://lokistack-dev-gateway-http.openshift-logging.svc:8080/api/logs/v1/infrastructure"
            ),
        ]
    );
    assert!(result.status.is_fully_accepted());
}

/// 같은 이름의 출력 두 개 → 첫 번째 수락, 두 번째 NonUniqueName
#[test]
fn test_duplicate_output_names() {
    let spec = ForwardingSpec {
        outputs: vec![
            OutputSpec::new("foo", OutputType::Elasticsearch, "https://a:9200"),
            OutputSpec::new("foo", OutputType::Elasticsearch, "https://b:9200"),
        ],
        pipelines: vec![PipelineSpec::new("p", ["application"], ["foo"])],
        ..ForwardingSpec::default()
    };
    let result = normalizer().normalize(&spec, None).unwrap();

    assert_eq!(result.spec.outputs.len(), 1);
    assert_eq!(result.spec.outputs[0].url, "https://a:9200");
    assert_eq!(result.status.outputs[0].state, State::Accepted);
    assert_eq!(result.status.outputs[1].state, State::Dropped);
    assert!(result.status.outputs[1].has_reason(ConditionReason::NonUniqueName));
    assert_eq!(
        result.status.outputs[1].conditions[0].message,
        "The output name is not unique among all defined outputs."
    );
}

/// fluentdForward 출력 시크릿에 shared_key가 없으면 제외
#[test]
fn test_fluentd_forward_requires_shared_key() {
    let spec = ForwardingSpec {
        outputs: vec![
            OutputSpec::new("ok", OutputType::FluentdForward, "tcp://f:24224")
                .with_secret("fluent-ok"),
            OutputSpec::new("nokey", OutputType::FluentdForward, "tcp://f:24224")
                .with_secret("fluent-nokey"),
        ],
        pipelines: vec![PipelineSpec::new("p", ["audit"], ["ok", "nokey"])],
        ..ForwardingSpec::default()
    };
    let result = normalizer().normalize(&spec, None).unwrap();

    let nokey = result.status.output("nokey").unwrap();
    assert!(nokey.has_reason(ConditionReason::SecretMissingSharedKey));

    let pipeline = result.status.pipeline("p").unwrap();
    assert_eq!(pipeline.state, State::Degraded);
    assert_eq!(result.spec.pipelines[0].output_refs, ["ok"]);
}

/// 저장소 없이 default 참조 → NoLogStore 에러
#[test]
fn test_default_reference_without_store_is_fatal() {
    let spec = ForwardingSpec {
        pipelines: vec![
            PipelineSpec::new("app-logs", ["application"], ["default"]),
            PipelineSpec::new("", ["audit"], ["default"]),
        ],
        ..ForwardingSpec::default()
    };
    let err = normalizer().normalize(&spec, None).unwrap_err();
    match err {
        ForwardingError::NoLogStore { pipelines } => {
            assert_eq!(pipelines, ["app-logs", "pipeline[1]"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

/// 정규화 결과를 다시 정규화해도 같은 명세
#[test]
fn test_normalization_is_idempotent() {
    let cases = vec![
        (ForwardingSpec::default(), LogStoreSpec::elasticsearch("es")),
        (ForwardingSpec::default(), LogStoreSpec::lokistack("lokistack-dev")),
        (
            ForwardingSpec {
                outputs: vec![
                    OutputSpec::new("es", OutputType::Elasticsearch, "https://es:9200"),
                    OutputSpec::new("bad", OutputType::from("splunk"), ""),
                ],
                pipelines: vec![
                    PipelineSpec::new("mixed", ["application", "audit"], ["default", "es", "bad"]),
                    PipelineSpec::new("gone", ["audit"], ["bad"]),
                ],
                ..ForwardingSpec::default()
            },
            LogStoreSpec::lokistack("lokistack-dev"),
        ),
        (
            ForwardingSpec {
                pipelines: vec![PipelineSpec::new("p", ["infrastructure"], ["default"])],
                ..ForwardingSpec::default()
            },
            LogStoreSpec::elasticsearch("es"),
        ),
        (team_input_spec(), LogStoreSpec::lokistack("lokistack-dev")),
        (team_input_spec(), LogStoreSpec::elasticsearch("es")),
        (
            ForwardingSpec {
                pipelines: vec![PipelineSpec::new("multi", ["application", "ghost"], ["default"])],
                ..ForwardingSpec::default()
            },
            LogStoreSpec::lokistack("lokistack-dev"),
        ),
    ];

    let normalizer = normalizer();
    for (spec, store) in cases {
        let first = normalizer.normalize(&spec, Some(&store)).unwrap();
        let second = normalizer.normalize(&first.spec, Some(&store)).unwrap();
        assert_eq!(first.spec, second.spec, "store: {:?}", store.store_type);
        assert!(second.status.is_fully_accepted());
    }
}

fn team_input_spec() -> ForwardingSpec {
    ForwardingSpec {
        inputs: vec![InputSpec {
            name: "team-a".to_owned(),
            application: Some(ApplicationSource {
                namespaces: vec!["team-a".to_owned()],
            }),
            ..InputSpec::default()
        }],
        pipelines: vec![PipelineSpec::new("team", ["team-a"], ["default"])],
        ..ForwardingSpec::default()
    }
}

/// 테넌트를 알 수 없는 입력의 분할 파이프라인만 제외되고 나머지는 유지
#[test]
fn test_unresolvable_tenant_drops_only_its_split() {
    let spec = ForwardingSpec {
        pipelines: vec![PipelineSpec::new("multi", ["application", "ghost"], ["default"])],
        ..ForwardingSpec::default()
    };
    let store = LogStoreSpec::lokistack("lokistack-dev");
    let result = normalizer().normalize(&spec, Some(&store)).unwrap();

    assert_eq!(result.status.pipeline("multi").unwrap().state, State::Accepted);
    assert_eq!(result.status.pipeline("multi-1").unwrap().state, State::Dropped);
    assert_eq!(result.spec.pipelines.len(), 1);
    assert_eq!(result.spec.outputs.len(), 1);
    assert_eq!(result.spec.outputs[0].name, "default-loki-apps");
}

/// 부트스트랩 파이프라인을 사용자가 다른 출력으로 바꾸면 다음 정규화에서 예약 이름 충돌
#[test]
fn test_edited_reserved_pipeline_conflicts_on_next_pass() {
    let store = LogStoreSpec::elasticsearch("es");
    let normalizer = normalizer();
    let first = normalizer
        .normalize(&ForwardingSpec::default(), Some(&store))
        .unwrap();

    let mut edited = first.spec.clone();
    edited
        .outputs
        .push(OutputSpec::new("es", OutputType::Elasticsearch, "https://es:9200"));
    edited.pipelines[0].output_refs = vec!["es".to_owned()];

    let second = normalizer.normalize(&edited, Some(&store)).unwrap();
    let status = &second.status.pipelines[0];
    assert_eq!(status.name, "pipeline[0]");
    assert_eq!(status.state, State::Dropped);
    assert!(status.has_reason(ConditionReason::ReservedNameConflict));
    // 정규 형태로 남은 인프라 파이프라인은 계속 수락
    assert_eq!(
        second.status.pipeline("default-infra-pipeline").unwrap().state,
        State::Accepted
    );
}

/// 일부 출력만 유효한 파이프라인은 Degraded, 전부 무효면 Dropped
#[test]
fn test_degraded_and_dropped_pipelines() {
    let spec = ForwardingSpec {
        outputs: vec![OutputSpec::new("es", OutputType::Elasticsearch, "https://es:9200")],
        pipelines: vec![
            PipelineSpec::new("half", ["application"], ["es", "missing"]),
            PipelineSpec::new("none", ["infrastructure"], ["missing"]),
        ],
        ..ForwardingSpec::default()
    };
    let result = normalizer().normalize(&spec, None).unwrap();

    let summary = result.status.summary();
    assert_eq!(summary.pipelines_degraded, 1);
    assert_eq!(summary.pipelines_dropped, 1);
    assert_eq!(result.spec.pipelines.len(), 1);
    assert_eq!(
        result.status.log_sources.iter().copied().collect::<Vec<_>>(),
        vec![SourceKind::Application]
    );
}

/// 매니페스트 파일 + 디렉토리 시크릿 저장소 전체 흐름
#[tokio::test]
async fn test_load_and_normalize_with_dir_secrets() {
    let tmp = tempfile::tempdir().unwrap();
    let secret_dir = tmp.path().join("secrets/fluent");
    std::fs::create_dir_all(&secret_dir).unwrap();
    std::fs::write(secret_dir.join("shared_key"), b"k").unwrap();

    let spec_path = tmp.path().join("forwarder.yaml");
    std::fs::write(
        &spec_path,
        r#"
kind: ClusterLogForwarder
spec:
  outputs:
    - name: fluent
      type: fluentdForward
      url: tcp://fluent:24224
      secret:
        name: fluent
  pipelines:
    - name: apps
      inputRefs: [application]
      outputRefs: [fluent]
"#,
    )
    .unwrap();

    let spec = logfwd_forwarding::load_spec(&spec_path).await.unwrap();
    let normalizer = Normalizer::new(
        NormalizerConfig::default(),
        DirSecretStore::new(tmp.path().join("secrets")),
    );
    let result = normalizer.normalize(&spec, None).unwrap();
    assert!(result.status.is_fully_accepted());
    assert_eq!(result.spec, spec);
}

/// 상태 JSON 직렬화 형식
#[test]
fn test_status_json_shape() {
    let spec = parse_spec(
        "outputs:\n  - name: ''\n    type: http\n    url: https://h\n",
        SpecFormat::Yaml,
        "inline",
    )
    .unwrap();
    let result = normalizer().normalize(&spec, None).unwrap();
    let json = serde_json::to_value(&result.status).unwrap();
    assert_eq!(json["outputs"][0]["name"], "output[0]");
    assert_eq!(json["outputs"][0]["state"], "Dropped");
    assert_eq!(json["outputs"][0]["conditions"][0]["reason"], "MissingName");
    assert_eq!(json["logSources"], serde_json::json!([]));
}
