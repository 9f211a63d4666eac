//! The optional `.schema.yaml` document.
//!
//! Keys follow the helper binary's own config file (camelCase, schema-root
//! metadata nested under `schemaRoot`). Every field is optional; the file is
//! read once per run and never written back.

use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use crate::Result;

/// Config file name, looked up in the run's working directory.
pub const CONFIG_FILE: &str = ".schema.yaml";

/// A single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum StringOrVec {
    String(String),
    Vec(Vec<String>),
}

impl StringOrVec {
    /// Convert to a vector of strings
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Self::String(s) => vec![s.clone()],
            Self::Vec(v) => v.clone(),
        }
    }

    /// Join into the comma-separated form the helper's `--values` flag accepts.
    ///
    /// Returns `None` for an empty list.
    #[must_use]
    pub fn joined(&self) -> Option<String> {
        let items = self.to_vec();
        if items.is_empty() {
            None
        } else {
            Some(items.join(","))
        }
    }
}

/// Schema-root metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaRoot {
    pub id: Option<String>,
    #[serde(rename = "ref")]
    pub reference: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub additional_properties: Option<bool>,
}

/// Parsed `.schema.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaConfig {
    pub values: Option<StringOrVec>,
    pub draft: Option<u32>,
    pub indent: Option<u32>,
    pub output: Option<String>,
    pub schema_root: Option<SchemaRoot>,
    pub no_additional_properties: Option<bool>,
    pub bundle: Option<bool>,
    pub bundle_root: Option<String>,
    #[serde(rename = "bundleWithoutID")]
    pub bundle_without_id: Option<bool>,
    #[serde(rename = "k8sSchemaVersion")]
    pub k8s_schema_version: Option<String>,
    #[serde(rename = "k8sSchemaURL")]
    pub k8s_schema_url: Option<String>,
    pub use_helm_docs: Option<bool>,
}

impl SchemaConfig {
    /// Parse a config document.
    ///
    /// An empty document yields the default (all fields unset).
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Read and parse a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&contents)?;
        debug!(?path, "Loaded schema config");
        Ok(config)
    }

    /// Schema-root metadata, or an empty one.
    #[must_use]
    pub fn schema_root(&self) -> SchemaRoot {
        self.schema_root.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
values:
  - values.yaml
  - values.prod.yaml
draft: 2020
indent: 2
output: schema/values.schema.json
schemaRoot:
  id: https://example.com/schema
  ref: schema/root.json
  title: Chart values
  description: Values for the chart
  additionalProperties: false
noAdditionalProperties: true
bundle: true
bundleRoot: ./schemas
bundleWithoutID: true
k8sSchemaVersion: v1.30.0
k8sSchemaURL: "https://k8s.example.com/{{ .K8sSchemaVersion }}/"
useHelmDocs: true
"#;
        let config = SchemaConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(
            config.values.as_ref().and_then(StringOrVec::joined),
            Some("values.yaml,values.prod.yaml".to_string())
        );
        assert_eq!(config.draft, Some(2020));
        assert_eq!(config.indent, Some(2));
        assert_eq!(config.output.as_deref(), Some("schema/values.schema.json"));

        let root = config.schema_root();
        assert_eq!(root.id.as_deref(), Some("https://example.com/schema"));
        assert_eq!(root.reference.as_deref(), Some("schema/root.json"));
        assert_eq!(root.title.as_deref(), Some("Chart values"));
        assert_eq!(root.additional_properties, Some(false));

        assert_eq!(config.no_additional_properties, Some(true));
        assert_eq!(config.bundle, Some(true));
        assert_eq!(config.bundle_root.as_deref(), Some("./schemas"));
        assert_eq!(config.bundle_without_id, Some(true));
        assert_eq!(config.k8s_schema_version.as_deref(), Some("v1.30.0"));
        assert!(config.k8s_schema_url.is_some());
        assert_eq!(config.use_helm_docs, Some(true));
    }

    #[test]
    fn test_values_accepts_single_string() {
        let config = SchemaConfig::from_yaml_str("values: values.yaml\n").unwrap();
        assert_eq!(
            config.values,
            Some(StringOrVec::String("values.yaml".to_string()))
        );
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(
            SchemaConfig::from_yaml_str("").unwrap(),
            SchemaConfig::default()
        );
        assert_eq!(
            SchemaConfig::from_yaml_str("   \n").unwrap(),
            SchemaConfig::default()
        );
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let config = SchemaConfig::from_yaml_str("draft: 7\nnoDefaultGlobal: true\n").unwrap();
        assert_eq!(config.draft, Some(7));
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        assert!(SchemaConfig::from_yaml_str("draft: [unclosed").is_err());
        assert!(SchemaConfig::from_yaml_str("draft: not-a-number").is_err());
    }

    #[test]
    fn test_from_file_missing() {
        let temp = TempDir::new().unwrap();
        let err = SchemaConfig::from_file(&temp.path().join(CONFIG_FILE)).unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }

    #[test]
    fn test_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        std::fs::write(&path, "output: out.json\n").unwrap();

        let config = SchemaConfig::from_file(&path).unwrap();
        assert_eq!(config.output.as_deref(), Some("out.json"));
    }

    #[test]
    fn test_empty_values_list_joins_to_none() {
        assert_eq!(StringOrVec::Vec(vec![]).joined(), None);
    }
}
