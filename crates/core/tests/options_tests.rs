//! From `.schema.yaml` on disk to the helper command line.

use helm_schema_core::config::{CONFIG_FILE, SchemaConfig};
use helm_schema_core::options::EffectiveOptions;
use std::path::Path;
use tempfile::TempDir;

const FULL_CONFIG: &str = r#"
values:
  - values.yaml
  - overrides.yaml
draft: 2019
indent: 2
output: schema/values.schema.json
schemaRoot:
  id: https://example.com/schema
  ref: schema/root.json
  title: Helm Values Schema
  description: Schema for chart values
  additionalProperties: true
noAdditionalProperties: false
bundle: true
bundleRoot: charts
bundleWithoutID: true
k8sSchemaVersion: v1.30.0
k8sSchemaURL: "https://example.com/k8s/{{ .K8sSchemaVersion }}/"
useHelmDocs: true
"#;

fn no_inputs(_: &str) -> Option<String> {
    None
}

#[test]
fn test_full_config_to_args() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join(CONFIG_FILE), FULL_CONFIG).unwrap();

    let config = SchemaConfig::from_file(&temp.path().join(CONFIG_FILE)).unwrap();
    let args = EffectiveOptions::resolve(no_inputs, &config).to_args();

    assert_eq!(
        args,
        vec![
            "--values",
            "values.yaml,overrides.yaml",
            "--output",
            "schema/values.schema.json",
            "--draft",
            "2019",
            "--indent",
            "2",
            "--schema-root.id",
            "https://example.com/schema",
            "--schema-root.ref",
            "schema/root.json",
            "--schema-root.title",
            "Helm Values Schema",
            "--schema-root.description",
            "Schema for chart values",
            "--schema-root.additional-properties=true",
            "--no-additional-properties=false",
            "--bundle=true",
            "--bundle-root",
            "charts",
            "--bundle-without-id=true",
            "--k8s-schema-version",
            "v1.30.0",
            "--k8s-schema-url",
            "https://example.com/k8s/{{ .K8sSchemaVersion }}/",
            "--use-helm-docs=true",
        ]
    );
}

#[test]
fn test_inputs_override_file() {
    let config = SchemaConfig::from_yaml_str(FULL_CONFIG).unwrap();
    let options = EffectiveOptions::resolve(
        |name: &str| match name {
            "input" => Some("legacy.yaml".to_string()),
            "bundle" => Some("false".to_string()),
            "title" => Some("Overridden".to_string()),
            _ => None,
        },
        &config,
    );

    assert_eq!(options.values.as_deref(), Some("legacy.yaml"));
    assert_eq!(options.bundle.as_deref(), Some("false"));
    assert_eq!(options.title.as_deref(), Some("Overridden"));
    assert_eq!(options.draft.as_deref(), Some("2019"));
}

#[test]
fn test_chart_rebasing() {
    let config = SchemaConfig::from_yaml_str("values: [values.yaml, extra.yaml]\n").unwrap();
    let options = EffectiveOptions::resolve(no_inputs, &config).for_chart(Path::new("charts/app"));

    let join = |p: &str| Path::new("charts/app").join(p).to_string_lossy().into_owned();
    assert_eq!(
        options.values,
        Some(format!("{},{}", join("values.yaml"), join("extra.yaml")))
    );
    assert_eq!(options.output, join("values.schema.json"));
}
