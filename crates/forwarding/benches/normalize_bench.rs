//! 정규화 벤치마크
//!
//! 명세 크기와 저장소 유형별 정규화 처리 시간을 측정합니다.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use logfwd_core::secret::Secret;
use logfwd_core::types::{ForwardingSpec, LogStoreSpec, OutputSpec, OutputType, PipelineSpec};
use logfwd_forwarding::{Normalizer, NormalizerConfig, StaticSecretStore};

const INPUTS: [&str; 3] = ["application", "infrastructure", "audit"];

/// 출력 `n`개, 파이프라인 `n`개짜리 명세 (일부는 default 참조, 일부는 무효 참조)
fn build_spec(n: usize) -> ForwardingSpec {
    let outputs = (0..n)
        .map(|i| {
            OutputSpec::new(
                format!("out-{i}"),
                OutputType::Elasticsearch,
                format!("https://es-{i}.svc:9200"),
            )
        })
        .collect();
    let pipelines = (0..n)
        .map(|i| {
            let mut refs = vec![format!("out-{i}"), format!("missing-{i}")];
            if i % 4 == 0 {
                refs.push("default".to_owned());
            }
            PipelineSpec::new(format!("p-{i}"), [INPUTS[i % 3], INPUTS[(i + 1) % 3]], refs)
        })
        .collect();
    ForwardingSpec {
        outputs,
        pipelines,
        ..ForwardingSpec::default()
    }
}

fn normalizer() -> Normalizer<StaticSecretStore> {
    let secrets =
        StaticSecretStore::new().with_secret(Secret::new("collector").with_entry("ca", "pem"));
    Normalizer::new(NormalizerConfig::default(), secrets)
}

fn bench_normalize(c: &mut Criterion) {
    let normalizer = normalizer();
    let stores = [
        ("elasticsearch", LogStoreSpec::elasticsearch("elasticsearch")),
        ("lokistack", LogStoreSpec::lokistack("lokistack-dev")),
    ];

    let mut group = c.benchmark_group("normalize");
    for size in [10usize, 100, 1000] {
        let spec = build_spec(size);
        group.throughput(Throughput::Elements(size as u64));
        for (label, store) in &stores {
            group.bench_with_input(BenchmarkId::new(*label, size), &spec, |b, spec| {
                b.iter(|| normalizer.normalize(black_box(spec), Some(store)).unwrap())
            });
        }
    }
    group.finish();
}

fn bench_bootstrap(c: &mut Criterion) {
    let normalizer = normalizer();
    let store = LogStoreSpec::elasticsearch("elasticsearch");
    let empty = ForwardingSpec::default();

    c.bench_function("normalize_bootstrap", |b| {
        b.iter(|| normalizer.normalize(black_box(&empty), Some(&store)).unwrap())
    });
}

criterion_group!(benches, bench_normalize, bench_bootstrap);
criterion_main!(benches);
