//! What to do once the schema has been regenerated.

/// The single action taken after generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Nothing changed.
    UpToDate,
    /// Changed and `fail-on-diff` is set. Wins over [`Decision::Push`].
    Fail,
    /// Changed and `git-push` is set.
    Push,
    /// Changed, nothing requested.
    Report,
}

/// Classify the run.
#[must_use]
pub fn decide(changed: bool, fail_on_diff: bool, push: bool) -> Decision {
    match (changed, fail_on_diff, push) {
        (false, _, _) => Decision::UpToDate,
        (true, true, _) => Decision::Fail,
        (true, false, true) => Decision::Push,
        (true, false, false) => Decision::Report,
    }
}

/// Outputs a message is about.
#[derive(Debug, Clone, Copy)]
pub enum Outputs<'a> {
    /// The output of a single-chart run.
    Single(&'a str),
    /// The changed outputs of a recursive run.
    Many(&'a [String]),
}

impl Outputs<'_> {
    fn list(&self) -> String {
        match self {
            Self::Single(output) => (*output).to_string(),
            Self::Many(outputs) => outputs.join(", "),
        }
    }

    /// Failure message for [`Decision::Fail`].
    #[must_use]
    pub fn changed(&self) -> String {
        match self {
            Self::Single(output) => format!("'{output}' has changed"),
            Self::Many(_) => format!("Some JSON schemas have changed: {}", self.list()),
        }
    }

    /// Confirmation for [`Decision::Push`].
    #[must_use]
    pub fn pushed(&self) -> String {
        match self {
            Self::Single(output) => format!("Pushed '{output}' to the branch."),
            Self::Many(_) => format!(
                "Pushed changes for the following JSON schemas: {}",
                self.list()
            ),
        }
    }

    /// Note for [`Decision::Report`].
    #[must_use]
    pub fn no_action(&self) -> String {
        match self {
            Self::Single(output) => {
                format!("'{output}' has changed, but no action was requested.")
            }
            Self::Many(_) => format!(
                "JSON schemas changed: {}, but no action was requested.",
                self.list()
            ),
        }
    }

    /// Note for [`Decision::UpToDate`].
    #[must_use]
    pub fn up_to_date(&self) -> String {
        match self {
            Self::Single(output) => format!("'{output}' is up to date."),
            Self::Many(_) => "All JSON schemas are up to date.".to_string(),
        }
    }
}
