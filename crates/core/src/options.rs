//! Effective per-run options and the helper command line.
//!
//! Every field resolves in the same order: explicit action input, then the
//! `.schema.yaml` value, then a built-in default. Schema fields without a
//! built-in default stay unset and are left off the command line.

use std::path::Path;

use crate::config::{SchemaConfig, StringOrVec};

/// Default output path, also used to look up the change status.
pub const DEFAULT_OUTPUT: &str = "values.schema.json";
/// Values file read from each chart when none is configured.
pub const DEFAULT_CHART_VALUES: &str = "values.yaml";
/// Default commit author name.
pub const DEFAULT_GIT_USER_NAME: &str = "github-actions[bot]";
/// Default commit author email.
pub const DEFAULT_GIT_USER_EMAIL: &str = "github-actions[bot]@users.noreply.github.com";
/// Default commit message.
pub const DEFAULT_COMMIT_MESSAGE: &str = "update values.schema.json";

/// How a flag is rendered on the helper's command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    /// `--flag value`
    Value,
    /// `--flag=value`; boolean flags do not take a separate argument.
    Switch,
}

/// Commit and push settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitOptions {
    pub push: bool,
    pub user_name: String,
    pub user_email: String,
    pub commit_message: String,
}

/// The fully resolved options for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveOptions {
    pub values: Option<String>,
    pub output: String,
    pub draft: Option<String>,
    pub indent: Option<String>,
    pub id: Option<String>,
    pub reference: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub additional_properties: Option<String>,
    pub no_additional_properties: Option<String>,
    pub bundle: Option<String>,
    pub bundle_root: Option<String>,
    pub bundle_without_id: Option<String>,
    pub k8s_schema_version: Option<String>,
    pub k8s_schema_url: Option<String>,
    pub use_helm_docs: Option<String>,
    pub git: GitOptions,
    pub fail_on_diff: bool,
    pub recursive: bool,
}

impl EffectiveOptions {
    /// Merge action inputs over `config` over built-in defaults.
    ///
    /// `input` returns the value of a named action input, `None` when it was
    /// not supplied (or supplied empty).
    pub fn resolve<F>(input: F, config: &SchemaConfig) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| input(name).filter(|v| !v.trim().is_empty());
        let root = config.schema_root();

        Self {
            values: get("values")
                .or_else(|| get("input"))
                .or_else(|| config.values.as_ref().and_then(StringOrVec::joined)),
            output: get("output")
                .or_else(|| config.output.clone())
                .unwrap_or_else(|| DEFAULT_OUTPUT.to_string()),
            draft: get("draft").or_else(|| config.draft.map(|d| d.to_string())),
            indent: get("indent").or_else(|| config.indent.map(|i| i.to_string())),
            id: get("id").or(root.id),
            reference: get("ref").or(root.reference),
            title: get("title").or(root.title),
            description: get("description").or(root.description),
            additional_properties: get("additionalProperties")
                .or_else(|| bool_str(root.additional_properties)),
            no_additional_properties: get("noAdditionalProperties")
                .or_else(|| bool_str(config.no_additional_properties)),
            bundle: get("bundle").or_else(|| bool_str(config.bundle)),
            bundle_root: get("bundle-root").or_else(|| config.bundle_root.clone()),
            bundle_without_id: get("bundle-without-id")
                .or_else(|| bool_str(config.bundle_without_id)),
            k8s_schema_version: get("k8s-schema-version")
                .or_else(|| config.k8s_schema_version.clone()),
            k8s_schema_url: get("k8s-schema-url").or_else(|| config.k8s_schema_url.clone()),
            use_helm_docs: get("use-helm-docs").or_else(|| bool_str(config.use_helm_docs)),
            git: GitOptions {
                push: get("git-push").is_some_and(|v| is_true(&v)),
                user_name: get("git-push-user-name")
                    .unwrap_or_else(|| DEFAULT_GIT_USER_NAME.to_string()),
                user_email: get("git-push-user-email")
                    .unwrap_or_else(|| DEFAULT_GIT_USER_EMAIL.to_string()),
                commit_message: get("git-commit-message")
                    .unwrap_or_else(|| DEFAULT_COMMIT_MESSAGE.to_string()),
            },
            fail_on_diff: get("fail-on-diff").is_some_and(|v| is_true(&v)),
            recursive: get("recursive").is_some_and(|v| is_true(&v)),
        }
    }

    /// Ordered `(flag, kind, value)` entries for every schema field.
    ///
    /// Unset fields are present with a `None` value; [`Self::to_args`] drops them.
    #[must_use]
    pub fn flags(&self) -> Vec<(&'static str, FlagKind, Option<&str>)> {
        use FlagKind::{Switch, Value};

        vec![
            ("--values", Value, self.values.as_deref()),
            ("--output", Value, Some(self.output.as_str())),
            ("--draft", Value, self.draft.as_deref()),
            ("--indent", Value, self.indent.as_deref()),
            ("--schema-root.id", Value, self.id.as_deref()),
            ("--schema-root.ref", Value, self.reference.as_deref()),
            ("--schema-root.title", Value, self.title.as_deref()),
            ("--schema-root.description", Value, self.description.as_deref()),
            (
                "--schema-root.additional-properties",
                Switch,
                self.additional_properties.as_deref(),
            ),
            (
                "--no-additional-properties",
                Switch,
                self.no_additional_properties.as_deref(),
            ),
            ("--bundle", Switch, self.bundle.as_deref()),
            ("--bundle-root", Value, self.bundle_root.as_deref()),
            ("--bundle-without-id", Switch, self.bundle_without_id.as_deref()),
            ("--k8s-schema-version", Value, self.k8s_schema_version.as_deref()),
            ("--k8s-schema-url", Value, self.k8s_schema_url.as_deref()),
            ("--use-helm-docs", Switch, self.use_helm_docs.as_deref()),
        ]
    }

    /// Command-line arguments for the helper binary.
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        for (flag, kind, value) in self.flags() {
            let Some(value) = value else { continue };
            match kind {
                FlagKind::Value => {
                    args.push(flag.to_string());
                    args.push(value.to_string());
                }
                FlagKind::Switch => args.push(format!("{flag}={value}")),
            }
        }
        args
    }

    /// Options rebased onto a chart directory.
    ///
    /// Each values file and the output path are joined onto `chart_dir`.
    /// Without configured values files the chart's own `values.yaml` is used.
    #[must_use]
    pub fn for_chart(&self, chart_dir: &Path) -> Self {
        let join = |p: &str| chart_dir.join(p).to_string_lossy().into_owned();
        let values = self.values.as_deref().unwrap_or(DEFAULT_CHART_VALUES);
        Self {
            values: Some(
                values
                    .split(',')
                    .map(|p| join(p.trim()))
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            output: join(&self.output),
            ..self.clone()
        }
    }
}

fn bool_str(value: Option<bool>) -> Option<String> {
    value.map(|b| b.to_string())
}

/// Action inputs compare against the literal string `true`.
#[must_use]
pub fn is_true(value: &str) -> bool {
    value.trim() == "true"
}
