//! 명세 파일 로더 -- YAML/JSON 포워딩 명세를 디스크에서 로드합니다.
//!
//! 최상위에 `spec:` 키가 있으면 그 아래를 명세로 사용하므로
//! 리소스 매니페스트(`apiVersion`, `kind`, `metadata`, `spec`)를 그대로 읽을 수 있습니다.

use std::path::Path;

use logfwd_core::types::ForwardingSpec;

use crate::error::ForwardingError;

/// 명세 파일 최대 크기
const MAX_SPEC_FILE_SIZE: u64 = 10 * 1024 * 1024; // 10MB

/// 매니페스트에서 명세를 감싸는 키
const SPEC_WRAPPER_KEY: &str = "spec";

/// 명세 파일 형식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecFormat {
    /// YAML (`.yaml`, `.yml`, 확장자 없음)
    Yaml,
    /// JSON (`.json`)
    Json,
}

impl SpecFormat {
    /// 파일 확장자에서 형식을 판정합니다. 알 수 없으면 YAML로 취급합니다.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// 파일에서 명세를 로드합니다.
///
/// # Errors
/// - 파일을 읽을 수 없거나 크기 제한을 초과한 경우
/// - 명세 파싱에 실패한 경우
pub async fn load_spec(path: impl AsRef<Path>) -> Result<ForwardingSpec, ForwardingError> {
    let path = path.as_ref();
    let source = path.display().to_string();

    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| ForwardingError::SpecLoad {
            path: source.clone(),
            reason: format!("failed to read file metadata: {e}"),
        })?;

    if metadata.len() > MAX_SPEC_FILE_SIZE {
        return Err(ForwardingError::SpecLoad {
            path: source,
            reason: format!(
                "file too large: {} bytes (max: {MAX_SPEC_FILE_SIZE})",
                metadata.len()
            ),
        });
    }

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ForwardingError::SpecLoad {
            path: source.clone(),
            reason: format!("failed to read file: {e}"),
        })?;

    let spec = parse_spec(&content, SpecFormat::from_path(path), &source)?;
    tracing::debug!(
        path = %source,
        outputs = spec.outputs.len(),
        pipelines = spec.pipelines.len(),
        inputs = spec.inputs.len(),
        "loaded forwarding spec"
    );
    Ok(spec)
}

/// 문자열에서 명세를 파싱합니다.
///
/// 빈 문서는 빈 명세로 취급합니다.
pub fn parse_spec(
    content: &str,
    format: SpecFormat,
    source: &str,
) -> Result<ForwardingSpec, ForwardingError> {
    if content.trim().is_empty() {
        return Ok(ForwardingSpec::default());
    }

    let parse_err = |reason: String| ForwardingError::SpecLoad {
        path: source.to_owned(),
        reason,
    };

    match format {
        SpecFormat::Json => {
            let mut doc: serde_json::Value = serde_json::from_str(content)
                .map_err(|e| parse_err(format!("invalid JSON: {e}")))?;
            if let Some(inner) = doc.get_mut(SPEC_WRAPPER_KEY).map(serde_json::Value::take) {
                doc = inner;
            }
            if doc.is_null() {
                return Ok(ForwardingSpec::default());
            }
            serde_json::from_value(doc).map_err(|e| parse_err(format!("invalid spec: {e}")))
        }
        SpecFormat::Yaml => {
            let mut doc: serde_yaml::Value = serde_yaml::from_str(content)
                .map_err(|e| parse_err(format!("invalid YAML: {e}")))?;
            if let Some(inner) = doc
                .get_mut(SPEC_WRAPPER_KEY)
                .map(|v| std::mem::replace(v, serde_yaml::Value::Null))
            {
                doc = inner;
            }
            if doc.is_null() {
                return Ok(ForwardingSpec::default());
            }
            serde_yaml::from_value(doc).map_err(|e| parse_err(format!("invalid spec: {e}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use logfwd_core::types::OutputType;

    use super::*;

    const BARE_YAML: &str = r#"
outputs:
  - name: es
    type: elasticsearch
    url: https://es.svc:9200
pipelines:
  - name: app
    inputRefs: [application]
    outputRefs: [es]
"#;

    #[test]
    fn parses_bare_yaml() {
        let spec = parse_spec(BARE_YAML, SpecFormat::Yaml, "test").unwrap();
        assert_eq!(spec.outputs[0].output_type, OutputType::Elasticsearch);
        assert_eq!(spec.pipelines[0].input_refs, ["application"]);
    }

    #[test]
    fn parses_wrapped_manifest() {
        let yaml = r#"
apiVersion: logging.openshift.io/v1
kind: ClusterLogForwarder
metadata:
  name: instance
spec:
  disableDefaultForwarding: true
  outputs:
    - name: fluent
      type: fluentdForward
      endpoint: tcp://fluent:24224
      secret:
        name: fluent-secret
"#;
        let spec = parse_spec(yaml, SpecFormat::Yaml, "test").unwrap();
        assert!(spec.disable_default_forwarding);
        assert_eq!(spec.outputs[0].url, "tcp://fluent:24224");
        assert_eq!(spec.outputs[0].secret.as_ref().unwrap().name, "fluent-secret");
    }

    #[test]
    fn parses_json() {
        let json = r#"{"spec": {"pipelines": [{"inputRefs": ["audit"], "outputRefs": ["default"]}]}}"#;
        let spec = parse_spec(json, SpecFormat::Json, "test.json").unwrap();
        assert_eq!(spec.pipelines[0].output_refs, ["default"]);
    }

    #[test]
    fn unknown_output_type_is_preserved() {
        let yaml = "outputs:\n  - name: s\n    type: splunk\n    url: https://s\n";
        let spec = parse_spec(yaml, SpecFormat::Yaml, "test").unwrap();
        assert_eq!(spec.outputs[0].output_type, OutputType::from("splunk"));
    }

    #[test]
    fn null_spec_is_empty_spec_in_both_formats() {
        let json = parse_spec(r#"{"spec": null}"#, SpecFormat::Json, "f.json").unwrap();
        assert_eq!(json, ForwardingSpec::default());
        let yaml = parse_spec("spec: null\n", SpecFormat::Yaml, "f.yaml").unwrap();
        assert_eq!(yaml, ForwardingSpec::default());
        let bare = parse_spec("null", SpecFormat::Json, "f.json").unwrap();
        assert_eq!(bare, ForwardingSpec::default());
    }

    #[test]
    fn empty_document_is_empty_spec() {
        assert!(parse_spec("", SpecFormat::Yaml, "t").unwrap().is_empty());
        assert!(parse_spec("---\n", SpecFormat::Yaml, "t").unwrap().is_empty());
    }

    #[test]
    fn invalid_document_reports_source() {
        let err = parse_spec("outputs: {", SpecFormat::Yaml, "broken.yaml").unwrap_err();
        assert!(err.to_string().contains("broken.yaml"));
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(SpecFormat::from_path(Path::new("a.JSON")), SpecFormat::Json);
        assert_eq!(SpecFormat::from_path(Path::new("a.yml")), SpecFormat::Yaml);
        assert_eq!(SpecFormat::from_path(Path::new("spec")), SpecFormat::Yaml);
    }

    #[tokio::test]
    async fn load_spec_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("forwarder.yaml");
        tokio::fs::write(&path, BARE_YAML).await.unwrap();
        let spec = load_spec(&path).await.unwrap();
        assert_eq!(spec.pipelines.len(), 1);
    }

    #[tokio::test]
    async fn load_spec_missing_file() {
        let err = load_spec("/nonexistent/forwarder.yaml").await.unwrap_err();
        assert!(matches!(err, ForwardingError::SpecLoad { .. }));
    }
}
