//! 에러 타입 — 도메인별 에러 정의

/// logfwd 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum LogfwdError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 정규화 중단 에러
    #[error("normalize error: {0}")]
    Normalize(#[from] NormalizeError),

    /// 시크릿 조회 에러
    #[error("secret error: {0}")]
    Secret(#[from] SecretError),

    /// 명세 파일 로딩 에러
    #[error("spec load error: {path}: {reason}")]
    SpecLoad { path: String, reason: String },

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 정규화를 중단시키는 에러
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    /// 기본 출력을 참조하지만 로그 저장소가 없음
    #[error("no log store configured for default output referenced by: {0}")]
    NoLogStore(String),
}

/// 시크릿 조회 에러
///
/// "없음"은 에러가 아닙니다. 이 타입은 조회 자체가 실패한 경우만 표현합니다.
#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    /// 저장소 접근 실패
    #[error("secret backend unavailable for '{name}': {reason}")]
    Unavailable { name: String, reason: String },

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
