//! Loose semantic version value
//!
//! Follows the rules at <https://semver.org> with the `major.minor.patch` scheme
//! loosened: any number of ordinals is accepted (`2`, `3.2`, `4.5.6.7`), and when
//! minor or patch is not supplied the accessors report `-1`.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::version::error::VersionError;
use crate::version::prerelease::compare_pre_release;

/// `core ('-' preRelease)? ('+' metadata)?`, anchored at both ends
static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^((?:0|[1-9][0-9]*)(?:\.(?:0|[1-9][0-9]*))*)(?:-([0-9A-Za-z.\-]*))?(?:\+([0-9A-Za-z.\-]*))?$",
    )
    .unwrap()
});

/// Largest accepted ordinal, so the signed minor/patch view is lossless
const MAX_ORDINAL: u64 = i64::MAX as u64;

/// A parsed version. Immutable once constructed.
///
/// Equality and hashing use the exact text the value was parsed from, metadata
/// included. Compatibility is a separate relation, see [`VersionValue::is_supported`].
#[derive(Debug, Clone)]
pub struct VersionValue {
    raw: String,
    ordinals: Vec<u64>,
    pre_release: Option<String>,
    metadata: Option<String>,
}

impl VersionValue {
    /// Parse an optional version string.
    ///
    /// Returns `Ok(None)` when `version` is `None`, so optional version fields can be
    /// passed straight through.
    pub fn parse(version: Option<&str>) -> Result<Option<Self>, VersionError> {
        version.map(Self::parse_str).transpose()
    }

    fn parse_str(version: &str) -> Result<Self, VersionError> {
        let captures = VERSION_RE
            .captures(version)
            .ok_or_else(|| VersionError::Format(version.to_string()))?;

        let ordinals = captures[1]
            .split('.')
            .map(|segment| {
                segment
                    .parse::<u64>()
                    .ok()
                    .filter(|&ordinal| ordinal <= MAX_ORDINAL)
            })
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| VersionError::Format(version.to_string()))?;

        Ok(Self {
            raw: captures[0].to_string(),
            ordinals,
            pre_release: captures.get(2).map(|m| m.as_str().to_string()),
            metadata: captures.get(3).map(|m| m.as_str().to_string()),
        })
    }

    /// The version exactly as parsed
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// All ordinals, major first
    pub fn ordinals(&self) -> &[u64] {
        &self.ordinals
    }

    /// X of X.Y.Z
    pub fn major(&self) -> u64 {
        self.ordinals[0]
    }

    /// Y of X.Y.Z, or -1 when not supplied
    pub fn minor(&self) -> i64 {
        self.ordinal_or_unset(1)
    }

    /// Z of X.Y.Z, or -1 when not supplied
    pub fn patch(&self) -> i64 {
        self.ordinal_or_unset(2)
    }

    fn ordinal_or_unset(&self, index: usize) -> i64 {
        self.ordinals
            .get(index)
            .map_or(-1, |&ordinal| ordinal as i64)
    }

    /// The pre-release qualifier, e.g. `SNAPSHOT` of `1.2.3-SNAPSHOT`
    pub fn pre_release(&self) -> Option<&str> {
        self.pre_release.as_deref()
    }

    /// The build metadata, e.g. `exp.sha.5114f85` of `1.2.3+exp.sha.5114f85`
    pub fn metadata(&self) -> Option<&str> {
        self.metadata.as_deref()
    }

    /// Does this version satisfy the minimum requirement `expected`?
    ///
    /// Major versions must match exactly. Remaining ordinals only need to be at least
    /// the expected ones; a version more specific than the requirement with an equal
    /// prefix is supported. Pre-release tags are compared only when the ordinals tie,
    /// and metadata never participates.
    pub fn is_supported(&self, expected: &VersionValue) -> bool {
        if self.ordinals[0] != expected.ordinals[0] {
            return false;
        }

        for i in 1..self.ordinals.len() {
            if i == expected.ordinals.len() {
                return true;
            }
            if self.ordinals[i] != expected.ordinals[i] {
                return self.ordinals[i] > expected.ordinals[i];
            }
        }
        if self.ordinals.len() < expected.ordinals.len() {
            return false;
        }

        match (&self.pre_release, &expected.pre_release) {
            (Some(actual), Some(expected)) => compare_pre_release(actual, expected).is_ge(),
            (actual, _) => actual.is_none(),
        }
    }

    /// [`is_supported`](Self::is_supported) for callers holding an optional requirement
    pub fn check_supported(&self, expected: Option<&VersionValue>) -> Result<bool, VersionError> {
        expected
            .map(|expected| self.is_supported(expected))
            .ok_or(VersionError::NullArgument("expected"))
    }

    /// The first of `expected_versions`, in iteration order, that this version supports
    pub fn find_supported<'a, I>(&self, expected_versions: I) -> Option<&'a VersionValue>
    where
        I: IntoIterator<Item = &'a VersionValue>,
    {
        expected_versions
            .into_iter()
            .find(|expected| self.is_supported(expected))
    }
}

impl FromStr for VersionValue {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl fmt::Display for VersionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl PartialEq for VersionValue {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for VersionValue {}

impl Hash for VersionValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}
