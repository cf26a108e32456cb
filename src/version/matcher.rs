//! Matching a version against a list of acceptable versions

use crate::version::error::VersionError;
use crate::version::value::VersionValue;

/// An ordered, non-empty set of acceptable versions.
///
/// A candidate matches when it supports at least one of them; the first one in
/// construction order wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionMatcher {
    expected: Vec<VersionValue>,
}

impl VersionMatcher {
    /// Create a matcher from the required version and any additional acceptable versions
    pub fn new<S: AsRef<str>>(
        required: &str,
        additional: impl IntoIterator<Item = S>,
    ) -> Result<Self, VersionError> {
        let mut expected = vec![required.parse::<VersionValue>()?];
        for version in additional {
            expected.push(version.as_ref().parse()?);
        }
        Ok(Self { expected })
    }

    /// Create a matcher from arguments that may be missing
    ///
    /// Both the required version and the list of additional versions must be present;
    /// the list itself may be empty.
    pub fn from_optional<S: AsRef<str>>(
        required: Option<&str>,
        additional: Option<&[S]>,
    ) -> Result<Self, VersionError> {
        let required = required.ok_or(VersionError::NullArgument("required"))?;
        let additional = additional.ok_or(VersionError::NullArgument("additional"))?;
        Self::new(required, additional)
    }

    /// The acceptable versions in construction order
    pub fn expected(&self) -> &[VersionValue] {
        &self.expected
    }

    /// The first acceptable version `actual` supports
    pub fn find_matching_version(&self, actual: &VersionValue) -> Option<&VersionValue> {
        actual.find_supported(&self.expected)
    }

    /// `None` when `actual` matches; otherwise a message naming every acceptable version
    pub fn error_message(&self, actual: &VersionValue) -> Option<String> {
        if self.find_matching_version(actual).is_some() {
            return None;
        }

        let expected = self
            .expected
            .iter()
            .map(VersionValue::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        let quantifier = if self.expected.len() > 1 { "any of " } else { "" };

        Some(format!("{actual} does not support {quantifier}{expected}"))
    }

    /// [`error_message`](Self::error_message) for an unparsed version
    pub fn error_message_for(&self, actual: &str) -> Result<Option<String>, VersionError> {
        let actual = actual.parse::<VersionValue>()?;
        Ok(self.error_message(&actual))
    }
}
