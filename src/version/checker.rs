//! Compatibility checks of installed components against their requirements

use std::collections::BTreeMap;

use indexmap::IndexMap;
#[cfg(test)]
use mockall::automock;
use tracing::debug;

use crate::version::error::VersionError;
use crate::version::matcher::VersionMatcher;
use crate::version::value::VersionValue;

/// Supplier of raw version strings, keyed by component identifier
///
/// Values are formatted as `<version>[+<groupId>-<artifactId>]`.
#[cfg_attr(test, automock)]
pub trait VersionSource {
    fn component_versions(&self) -> BTreeMap<String, String>;
}

/// Result of checking one component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentReport {
    /// Component name as configured
    pub component: String,
    /// Raw version supplied by the source, if the component was found
    pub found: Option<String>,
    pub status: CheckStatus,
}

/// Status of a component check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    /// The found version supports `matched`
    Supported { matched: String },
    /// The found version supports none of the acceptable versions
    Unsupported { message: String },
    /// The found version is not a proper version
    Invalid { reason: String },
    /// No version is known for the component
    Missing,
}

impl CheckStatus {
    pub fn is_supported(&self) -> bool {
        matches!(self, CheckStatus::Supported { .. })
    }
}

/// Check every required component against the versions supplied by `source`.
///
/// `requirements` maps a component to its acceptable versions, the first being the
/// required one. A component is looked up by identifier first, then by a version
/// whose metadata names it. Fails only when a requirement itself is malformed.
pub fn check_components<S: VersionSource + ?Sized>(
    source: &S,
    requirements: &IndexMap<String, Vec<String>>,
) -> Result<Vec<ComponentReport>, VersionError> {
    let versions = source.component_versions();

    requirements
        .iter()
        .map(|(component, acceptable)| -> Result<ComponentReport, VersionError> {
            let (required, additional) = acceptable
                .split_first()
                .ok_or(VersionError::NullArgument("required"))?;
            let matcher = VersionMatcher::new(required, additional)?;

            let found = find_component(&versions, component);
            let status = match found {
                Some(raw) => check_version(&matcher, raw),
                None => {
                    debug!("No version found for {}", component);
                    CheckStatus::Missing
                }
            };

            Ok(ComponentReport {
                component: component.clone(),
                found: found.map(str::to_string),
                status,
            })
        })
        .collect()
}

fn find_component<'a>(versions: &'a BTreeMap<String, String>, component: &str) -> Option<&'a str> {
    versions
        .get(component)
        .or_else(|| {
            versions
                .values()
                .find(|raw| metadata_of(raw) == Some(component))
        })
        .map(String::as_str)
}

fn metadata_of(raw: &str) -> Option<&str> {
    raw.split_once('+').map(|(_, metadata)| metadata)
}

fn check_version(matcher: &VersionMatcher, raw: &str) -> CheckStatus {
    let actual = match raw.parse::<VersionValue>() {
        Ok(actual) => actual,
        Err(e) => {
            return CheckStatus::Invalid {
                reason: e.to_string(),
            };
        }
    };

    match matcher.find_matching_version(&actual) {
        Some(matched) => CheckStatus::Supported {
            matched: matched.to_string(),
        },
        None => CheckStatus::Unsupported {
            message: matcher.error_message(&actual).unwrap_or_default(),
        },
    }
}
