//! 시크릿 조회 trait — 정규화 엔진이 사용하는 유일한 외부 조회 지점
//!
//! 조회 결과는 세 가지입니다.
//! - `Ok(Some(secret))`: 시크릿 존재
//! - `Ok(None)`: 시크릿 없음 (출력 상태의 조건으로 보고됨)
//! - `Err(_)`: 전송/저장소 장애 (정규화 전체를 중단)

use std::collections::BTreeMap;

use crate::error::SecretError;

/// 시크릿 페이로드
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Secret {
    /// 시크릿 이름
    pub name: String,
    /// 키별 원시 데이터
    pub data: BTreeMap<String, Vec<u8>>,
}

impl Secret {
    /// 빈 시크릿을 생성합니다.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: BTreeMap::new(),
        }
    }

    /// 키와 값을 추가합니다.
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// 키가 존재하는지 확인합니다.
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }
}

/// 시크릿 조회 trait
///
/// 호출은 블로킹이며 엔진은 타임아웃이나 재시도를 적용하지 않습니다.
/// 네트워크 기반 구현이라면 재시도 정책은 구현체가 책임집니다.
pub trait SecretLookup: Send + Sync {
    /// 이름으로 시크릿을 조회합니다.
    fn lookup(&self, name: &str) -> Result<Option<Secret>, SecretError>;
}

impl<T: SecretLookup + ?Sized> SecretLookup for &T {
    fn lookup(&self, name: &str) -> Result<Option<Secret>, SecretError> {
        (**self).lookup(name)
    }
}

impl<T: SecretLookup + ?Sized> SecretLookup for std::sync::Arc<T> {
    fn lookup(&self, name: &str) -> Result<Option<Secret>, SecretError> {
        (**self).lookup(name)
    }
}
