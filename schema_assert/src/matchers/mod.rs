//! Matchers module for schema_assert
//!
//! This module provides the column matchers and the small contract test code
//! drives them through.

pub mod column;
pub mod mismatch;
pub mod options;

pub use column::ColumnExpectation;
pub use mismatch::Mismatch;
pub use options::{ColumnOption, OptionValue};

use crate::error::{Error, Result};
use crate::schema::ColumnSource;

/// An expected condition evaluated against a subject
pub trait Matcher<S: ?Sized> {
    /// Evaluate the subject, recording whatever the messages need
    fn matches(&mut self, subject: &S) -> bool;

    /// Message for a failed positive assertion
    fn failure_message(&self) -> String;

    /// Message for a failed negative assertion
    fn negative_failure_message(&self) -> String;

    /// Summary of the expectation for documentation output
    fn description(&self) -> String;
}

impl<S: ColumnSource + ?Sized> Matcher<S> for ColumnExpectation {
    fn matches(&mut self, subject: &S) -> bool {
        ColumnExpectation::matches(self, subject)
    }

    fn failure_message(&self) -> String {
        ColumnExpectation::failure_message(self)
    }

    fn negative_failure_message(&self) -> String {
        ColumnExpectation::negative_failure_message(self)
    }

    fn description(&self) -> String {
        ColumnExpectation::description(self)
    }
}

/// Expect a single column
pub fn have_column(column: impl Into<String>) -> ColumnExpectation {
    have_columns([column])
}

/// Expect a single column with pre-set options
pub fn have_column_with<O, K, V>(column: impl Into<String>, options: O) -> ColumnExpectation
where
    O: IntoIterator<Item = (K, V)>,
    K: Into<ColumnOption>,
    V: Into<OptionValue>,
{
    ColumnExpectation::new([column], options)
}

/// Expect every one of `columns`
pub fn have_columns<C, S>(columns: C) -> ColumnExpectation
where
    C: IntoIterator<Item = S>,
    S: Into<String>,
{
    ColumnExpectation::new(columns, Vec::<(ColumnOption, OptionValue)>::new())
}

/// Expect every one of `columns`, each with the same options
pub fn have_columns_with<C, S, O, K, V>(columns: C, options: O) -> ColumnExpectation
where
    C: IntoIterator<Item = S>,
    S: Into<String>,
    O: IntoIterator<Item = (K, V)>,
    K: Into<ColumnOption>,
    V: Into<OptionValue>,
{
    ColumnExpectation::new(columns, options)
}

/// Assert that `matcher` holds for `subject`
pub fn assert_matches<S, M>(subject: &S, matcher: &mut M) -> Result<()>
where
    S: ?Sized,
    M: Matcher<S>,
{
    if matcher.matches(subject) {
        Ok(())
    } else {
        Err(Error::AssertionFailed(matcher.failure_message()))
    }
}

/// Assert that `matcher` does not hold for `subject`
pub fn assert_not_matches<S, M>(subject: &S, matcher: &mut M) -> Result<()>
where
    S: ?Sized,
    M: Matcher<S>,
{
    if matcher.matches(subject) {
        Err(Error::AssertionFailed(matcher.negative_failure_message()))
    } else {
        Ok(())
    }
}
