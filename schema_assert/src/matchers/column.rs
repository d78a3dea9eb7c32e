//! Column expectation matcher
//!
//! Asserts that a subject exposes one or more named columns and that each of
//! them carries the configured attribute values.

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::schema::ColumnSource;
use crate::utils::naming::to_sentence;

use super::mismatch::Mismatch;
use super::options::{ColumnOption, OptionValue};

/// Subject name used in messages before any evaluation bound one
const UNBOUND_SUBJECT: &str = "model";

/// Expects a subject to expose columns with the given attributes
///
/// Built with [`super::have_column`] or [`super::have_columns`] and configured
/// through the chainable setters:
///
/// ```
/// use schema_assert::matchers::have_column;
///
/// let matcher = have_column("age").of_type("integer").null_is(false);
/// assert_eq!(matcher.description(), r#"have column named age with options {type: "integer", null: false}"#);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnExpectation {
    columns: Vec<String>,
    options: IndexMap<ColumnOption, OptionValue>,
    subject_name: Option<String>,
    missing: Option<Mismatch>,
}

impl ColumnExpectation {
    /// Create an expectation for `columns` with pre-set `options`
    ///
    /// Option names are not validated here; unrecognized ones fail at
    /// evaluation.
    pub fn new<C, S, O, K, V>(columns: C, options: O) -> Self
    where
        C: IntoIterator<Item = S>,
        S: Into<String>,
        O: IntoIterator<Item = (K, V)>,
        K: Into<ColumnOption>,
        V: Into<OptionValue>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            options: options
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
            subject_name: None,
            missing: None,
        }
    }

    /// Set (or overwrite) an expected attribute value
    pub fn option(mut self, key: impl Into<ColumnOption>, value: impl Into<OptionValue>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Expect the simplified column type, e.g. `integer` or `string`
    pub fn of_type(self, column_type: impl Into<OptionValue>) -> Self {
        self.option(ColumnOption::Type, column_type)
    }

    /// Expect the column to be the primary key
    pub fn primary(self) -> Self {
        self.primary_is(true)
    }

    /// Expect the column to be, or not be, the primary key
    pub fn primary_is(self, value: bool) -> Self {
        self.option(ColumnOption::Primary, value)
    }

    /// Expect the column default; `None` means no default
    pub fn default(self, default: impl Into<OptionValue>) -> Self {
        self.option(ColumnOption::Default, default)
    }

    /// Expect the numeric precision
    pub fn precision(self, precision: impl Into<OptionValue>) -> Self {
        self.option(ColumnOption::Precision, precision)
    }

    /// Expect the length limit, as in `varchar(255)`
    pub fn limit(self, limit: impl Into<OptionValue>) -> Self {
        self.option(ColumnOption::Limit, limit)
    }

    /// Expect the column to accept NULL
    pub fn null(self) -> Self {
        self.null_is(true)
    }

    /// Expect the column to accept, or reject, NULL
    pub fn null_is(self, value: bool) -> Self {
        self.option(ColumnOption::Null, value)
    }

    /// Expect the numeric scale
    pub fn scale(self, scale: impl Into<OptionValue>) -> Self {
        self.option(ColumnOption::Scale, scale)
    }

    /// Expect the raw database type, e.g. `varchar(255)`
    pub fn sql_type(self, sql_type: impl Into<OptionValue>) -> Self {
        self.option(ColumnOption::SqlType, sql_type)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn options(&self) -> &IndexMap<ColumnOption, OptionValue> {
        &self.options
    }

    /// Evaluate against `subject` without recording anything
    ///
    /// Stops at the first missing column or mismatching option.
    pub fn check<S: ColumnSource + ?Sized>(&self, subject: &S) -> Result<(), Mismatch> {
        let subject_name = subject.source_name();

        for column_name in &self.columns {
            let column = subject
                .column(column_name)
                .ok_or_else(|| Mismatch::MissingColumn {
                    subject: subject_name.to_string(),
                    column: column_name.clone(),
                })?;

            for (option, expected) in &self.options {
                let expected = expected.canonical();
                let found = column.attribute(option);
                trace!(column = %column_name, option = %option, ?found, %expected, "Comparing column option");

                if found.as_deref() != Some(expected.as_str()) {
                    return Err(Mismatch::OptionMismatch {
                        subject: subject_name.to_string(),
                        column: column_name.clone(),
                        option: option.clone(),
                        found: found.unwrap_or_default(),
                        expected,
                    });
                }
            }
        }

        Ok(())
    }

    /// Evaluate against `subject`, remembering the first mismatch for the
    /// failure messages
    pub fn matches<S: ColumnSource + ?Sized>(&mut self, subject: &S) -> bool {
        self.subject_name = Some(subject.source_name().to_string());
        self.missing = self.check(subject).err();

        debug!(
            subject = subject.source_name(),
            columns = ?self.columns,
            matched = self.missing.is_none(),
            "Evaluated column expectation"
        );

        self.missing.is_none()
    }

    /// The mismatch recorded by the last evaluation
    pub fn mismatch(&self) -> Option<&Mismatch> {
        self.missing.as_ref()
    }

    /// Human-readable reason for the last failure, empty after a success
    pub fn missing_reason(&self) -> String {
        self.missing
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    pub fn failure_message(&self) -> String {
        format!("Expected {} ({})", self.expectation(), self.missing_reason())
    }

    pub fn negative_failure_message(&self) -> String {
        format!("Did not expect {}", self.expectation())
    }

    pub fn expectation(&self) -> String {
        let subject = self.subject_name.as_deref().unwrap_or(UNBOUND_SUBJECT);

        if self.columns.len() == 1 {
            format!("{} to have a column named {}", subject, self.columns[0])
        } else {
            format!("{} to have columns {}", subject, to_sentence(&self.columns))
        }
    }

    pub fn description(&self) -> String {
        let mut description = if self.columns.len() == 1 {
            format!("have column named {}", self.columns[0])
        } else {
            format!("have columns {}", to_sentence(&self.columns))
        };

        if !self.options.is_empty() {
            description.push_str(" with options ");
            description.push_str(&self.render_options());
        }

        description
    }

    fn render_options(&self) -> String {
        let pairs: Vec<String> = self
            .options
            .iter()
            .map(|(option, value)| format!("{}: {}", option, value))
            .collect();

        format!("{{{}}}", pairs.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ColumnMetadata, Table};
    use pretty_assertions::assert_eq;

    fn users() -> Table {
        let mut table = Table::new("users");
        table.add_column(ColumnMetadata::new("id", "integer").primary(true));
        table.add_column(ColumnMetadata::new("age", "integer").nullable(true));
        table
    }

    #[test]
    fn reset_option_keeps_its_position() {
        let matcher = ColumnExpectation::new(["age"], Vec::<(ColumnOption, OptionValue)>::new())
            .of_type("string")
            .null()
            .of_type("integer");

        let keys: Vec<&ColumnOption> = matcher.options().keys().collect();
        assert_eq!(keys, vec![&ColumnOption::Type, &ColumnOption::Null]);
        assert_eq!(matcher.options()[&ColumnOption::Type], OptionValue::from("integer"));
    }

    #[test]
    fn success_clears_previous_mismatch() {
        let mut matcher = ColumnExpectation::new(["age"], [("null", false)]);
        let mut table = users();

        assert!(!matcher.matches(&table));
        assert!(matcher.mismatch().is_some());

        table.columns[1] = ColumnMetadata::new("age", "integer");
        assert!(matcher.matches(&table));
        assert_eq!(matcher.mismatch(), None);
        assert_eq!(matcher.missing_reason(), "");
    }

    #[test]
    fn messages_before_evaluation_use_placeholder_subject() {
        let matcher = ColumnExpectation::new(["age"], Vec::<(ColumnOption, OptionValue)>::new());
        assert_eq!(matcher.negative_failure_message(), "Did not expect model to have a column named age");
    }

    #[test]
    fn unrecognized_option_never_matches() {
        let mut matcher = ColumnExpectation::new(["id"], [("collation", "")]);

        assert!(!matcher.matches(&users()));
        assert_eq!(
            matcher.missing_reason(),
            "id column on table for users does not match option collation, found '' but expected ''"
        );
    }
}
