//! 메트릭 상수 및 설명 등록
//!
//! 정규화 엔진이 기록하는 메트릭의 이름과 설명을 중앙에서 정의합니다.
//! 레코더가 설치되지 않은 환경에서는 기록이 무시됩니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `logfwd_`
//! - 접미어: `_total` (counter), `_seconds` (histogram)
//!
//! # 사용 예시
//!
//! ```ignore
//! use logfwd_core::metrics as m;
//!
//! metrics::counter!(m::OUTPUTS_TOTAL, m::LABEL_STATE => "accepted").increment(1);
//! ```

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 상태 레이블 키 (accepted, degraded, dropped)
pub const LABEL_STATE: &str = "state";

/// 저장소 유형 레이블 키 (none, elasticsearch, lokistack)
pub const LABEL_STORE: &str = "store";

/// 에러 종류 레이블 키 (no_log_store, secret_lookup)
pub const LABEL_KIND: &str = "kind";

// ─── 정규화 메트릭 ─────────────────────────────────────────────────

/// 평가된 출력 수 (counter, label: state)
pub const OUTPUTS_TOTAL: &str = "logfwd_outputs_total";

/// 평가된 파이프라인 수 (counter, label: state)
pub const PIPELINES_TOTAL: &str = "logfwd_pipelines_total";

/// 마이그레이터가 합성한 출력 수 (counter, label: store)
pub const SYNTHESIZED_OUTPUTS_TOTAL: &str = "logfwd_synthesized_outputs_total";

/// 수행된 시크릿 조회 수 (counter)
pub const SECRET_LOOKUPS_TOTAL: &str = "logfwd_secret_lookups_total";

/// 중단된 정규화 수 (counter, label: kind)
pub const NORMALIZE_ERRORS_TOTAL: &str = "logfwd_normalize_errors_total";

/// 정규화 1회 소요 시간 (histogram, 초)
pub const NORMALIZE_DURATION_SECONDS: &str = "logfwd_normalize_duration_seconds";

// ─── 설명 등록 함수 ─────────────────────────────────────────────────

/// 모든 메트릭의 설명(description)을 등록합니다.
///
/// 전역 레코더 설치 후 한 번만 호출해야 합니다.
pub fn describe_all() {
    use metrics::{describe_counter, describe_histogram};

    describe_counter!(
        OUTPUTS_TOTAL,
        "Total number of outputs evaluated, by resulting state"
    );
    describe_counter!(
        PIPELINES_TOTAL,
        "Total number of pipelines evaluated, by resulting state"
    );
    describe_counter!(
        SYNTHESIZED_OUTPUTS_TOTAL,
        "Total number of outputs synthesized for the log store"
    );
    describe_counter!(
        SECRET_LOOKUPS_TOTAL,
        "Total number of secret lookups issued during output validation"
    );
    describe_counter!(
        NORMALIZE_ERRORS_TOTAL,
        "Total number of normalization runs aborted with an error"
    );
    describe_histogram!(
        NORMALIZE_DURATION_SECONDS,
        "Time to normalize a single forwarding spec in seconds"
    );
}
