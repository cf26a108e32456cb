//! Version extraction from Maven built jars
//!
//! Every jar Maven packages carries `META-INF/maven/<groupId>/<artifactId>/pom.properties`.
//! The version read from it is decorated with the coordinates as metadata:
//! `<version>+<groupId>-<artifactId>`.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use tracing::{debug, warn};
use zip::ZipArchive;

use crate::manifest::properties::parse_properties;
use crate::version::error::ManifestError;

/// Group, artifact and version of a Maven artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupArtifactVersion {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl GroupArtifactVersion {
    /// `<version>+<groupId>-<artifactId>`
    pub fn with_meta(&self) -> String {
        format!("{}+{}-{}", self.version, self.group_id, self.artifact_id)
    }
}

/// Extract the decorated version of a jar file.
///
/// Returns `None` when the file cannot be read as an archive or carries no
/// complete `pom.properties`.
pub fn extract_version(path: &Path) -> Option<String> {
    let Ok(gav) = read_jar(path).inspect_err(|e| {
        warn!("Unable to read {}: {}", path.display(), e);
    }) else {
        return None;
    };

    gav.map(|gav| gav.with_meta())
}

fn read_jar(path: &Path) -> Result<Option<GroupArtifactVersion>, ManifestError> {
    let file = File::open(path)?;
    read_pom_meta(file)
}

/// Read the coordinates from the first `pom.properties` entry of an archive
pub fn read_pom_meta<R: Read + Seek>(
    reader: R,
) -> Result<Option<GroupArtifactVersion>, ManifestError> {
    let mut archive = ZipArchive::new(reader)?;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let name = entry.name().to_string();
        if !(name.starts_with("META-INF/") && name.ends_with("/pom.properties")) {
            continue;
        }

        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes)?;
        return Ok(group_artifact_version(&decode_latin1(&bytes), &name));
    }

    Ok(None)
}

/// `.properties` files are ISO-8859-1; every byte maps to the same code point
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

fn group_artifact_version(content: &str, entry_name: &str) -> Option<GroupArtifactVersion> {
    let mut properties = parse_properties(content);
    match (
        properties.remove("groupId"),
        properties.remove("artifactId"),
        properties.remove("version"),
    ) {
        (Some(group_id), Some(artifact_id), Some(version)) => Some(GroupArtifactVersion {
            group_id,
            artifact_id,
            version,
        }),
        _ => {
            debug!("Incomplete pom.properties at {}", entry_name);
            None
        }
    }
}
