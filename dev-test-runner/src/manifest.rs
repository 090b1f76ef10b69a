use anyhow::{Result, anyhow};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    pub cases: Vec<Case>,
}

/// One input document and what its projection should look like.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Case {
    pub name: String,
    pub input: Value,
    /// expected `to_json` of the (transformed) tree; only checked when present
    #[serde(default)]
    pub expect: Option<Value>,
    /// expected single-line rendering
    #[serde(default)]
    pub expect_text: Option<String>,
    #[serde(default)]
    pub redact: Option<String>,
    #[serde(default)]
    pub max_depth: Option<usize>,
}

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path(src: &str) -> Result<Manifest> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, Manifest>(de).map_err(|err| {
        let path = err.path().to_string();
        anyhow!("at JSON path {path} → {}", err.into_inner())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_carry_the_json_path() {
        let src = r#"{"cases": [{"name": "a", "input": 1}, {"name": 2, "input": 1}]}"#;
        let err = from_str_with_path(src).unwrap_err().to_string();
        assert!(err.contains("cases[1].name"), "{err}");
    }

    #[test]
    fn optional_fields_default() {
        let m = from_str_with_path(r#"{"cases": [{"name": "a", "input": null}]}"#).unwrap();
        assert_eq!(m.cases.len(), 1);
        assert!(m.cases[0].expect.is_none());
        assert!(m.cases[0].max_depth.is_none());
    }
}
