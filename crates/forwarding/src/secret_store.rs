//! 시크릿 저장소 구현
//!
//! - [`StaticSecretStore`]: 메모리 내 맵 (테스트, 임베딩 용도)
//! - [`DirSecretStore`]: `<dir>/<secret>/<key>` 파일 레이아웃
//!   (쿠버네티스 시크릿 볼륨 마운트와 같은 구조)

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use logfwd_core::error::SecretError;
use logfwd_core::secret::{Secret, SecretLookup};

/// 시크릿 키 파일 최대 크기
const MAX_SECRET_FILE_SIZE: u64 = 1024 * 1024; // 1MB

/// 메모리 내 시크릿 저장소
#[derive(Debug, Clone, Default)]
pub struct StaticSecretStore {
    secrets: BTreeMap<String, Secret>,
}

impl StaticSecretStore {
    /// 빈 저장소를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 시크릿을 추가합니다.
    pub fn with_secret(mut self, secret: Secret) -> Self {
        self.insert(secret);
        self
    }

    /// 시크릿을 추가하거나 교체합니다.
    pub fn insert(&mut self, secret: Secret) {
        self.secrets.insert(secret.name.clone(), secret);
    }

    /// 저장된 시크릿 수
    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    /// 저장소가 비어 있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }
}

impl SecretLookup for StaticSecretStore {
    fn lookup(&self, name: &str) -> Result<Option<Secret>, SecretError> {
        Ok(self.secrets.get(name).cloned())
    }
}

/// 디렉토리 기반 시크릿 저장소
///
/// 시크릿 하나는 하위 디렉토리 하나이고, 그 안의 각 파일이 키입니다.
/// 점(`.`)으로 시작하는 파일은 무시합니다 (`..data` 심볼릭 링크 등).
#[derive(Debug, Clone)]
pub struct DirSecretStore {
    root: PathBuf,
}

impl DirSecretStore {
    /// 루트 디렉토리로 저장소를 생성합니다.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// 루트 디렉토리 경로
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read_secret(&self, name: &str, dir: &Path) -> Result<Secret, SecretError> {
        let mut secret = Secret::new(name);

        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let Some(key) = file_name.to_str() else {
                tracing::warn!(secret = name, "skipping secret key with non UTF-8 name");
                continue;
            };
            if key.starts_with('.') {
                continue;
            }

            let path = entry.path();
            let metadata = std::fs::metadata(&path)?;
            if !metadata.is_file() {
                continue;
            }
            if metadata.len() > MAX_SECRET_FILE_SIZE {
                return Err(SecretError::Unavailable {
                    name: name.to_owned(),
                    reason: format!(
                        "key '{key}' exceeds maximum size ({} > {MAX_SECRET_FILE_SIZE})",
                        metadata.len()
                    ),
                });
            }

            let value = std::fs::read(&path)?;
            secret.data.insert(key.to_owned(), value);
        }

        Ok(secret)
    }
}

/// 경로 구성 요소로 안전한 시크릿 이름인지 확인합니다.
fn is_valid_secret_name(name: &str) -> bool {
    !name.is_empty() && !name.starts_with('.') && !name.contains(['/', '\\'])
}

impl SecretLookup for DirSecretStore {
    fn lookup(&self, name: &str) -> Result<Option<Secret>, SecretError> {
        if !is_valid_secret_name(name) {
            tracing::warn!(secret = name, "invalid secret name, treating as absent");
            return Ok(None);
        }

        let dir = self.root.join(name);
        match std::fs::metadata(&dir) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Ok(None),
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(SecretError::Unavailable {
                    name: name.to_owned(),
                    reason: e.to_string(),
                });
            }
        }

        let secret = self.read_secret(name, &dir)?;
        tracing::debug!(secret = name, keys = secret.data.len(), "loaded secret");
        Ok(Some(secret))
    }
}
