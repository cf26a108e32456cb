//! Versions of the jars on a classpath

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::manifest::extractor::extract_version;
use crate::version::checker::VersionSource;
use crate::version::error::VersionError;
use crate::version::value::VersionValue;

const JAR_EXTENSION: &str = "jar";

/// Jar file name to decorated version, for every jar a version could be read from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JarVersions {
    dependent_jars: BTreeMap<String, String>,
}

impl JarVersions {
    pub fn new(dependent_jars: BTreeMap<String, String>) -> Self {
        Self { dependent_jars }
    }

    /// Scan classpath entries. Jar files are read directly, directories are searched
    /// (non-recursively) for jar files, anything else is skipped.
    pub fn from_classpath<P: AsRef<Path>>(entries: impl IntoIterator<Item = P>) -> Self {
        let mut dependent_jars = BTreeMap::new();

        for jar in entries
            .into_iter()
            .flat_map(|entry| jar_files(entry.as_ref()))
        {
            let Some(file_name) = jar.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if let Some(version) = extract_version(&jar) {
                dependent_jars.insert(file_name.to_string(), version);
            }
        }

        Self { dependent_jars }
    }

    pub fn dependent_jars(&self) -> &BTreeMap<String, String> {
        &self.dependent_jars
    }

    /// Remove the principal jar and return its version.
    ///
    /// Returns `Ok(None)` when no version is known for `file_name`.
    pub fn remove_principal(&mut self, file_name: &str) -> Result<Option<VersionValue>, VersionError> {
        let version = self.dependent_jars.remove(file_name);
        VersionValue::parse(version.as_deref())
    }
}

impl VersionSource for JarVersions {
    fn component_versions(&self) -> BTreeMap<String, String> {
        self.dependent_jars.clone()
    }
}

fn is_jar(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(JAR_EXTENSION))
}

fn jar_files(entry: &Path) -> Vec<PathBuf> {
    if entry.is_dir() {
        let Ok(read_dir) = fs::read_dir(entry).inspect_err(|e| {
            debug!("Unable to list {}: {}", entry.display(), e);
        }) else {
            return Vec::new();
        };

        let mut jars: Vec<PathBuf> = read_dir
            .filter_map(|dir_entry| dir_entry.ok().map(|d| d.path()))
            .filter(|path| path.is_file() && is_jar(path))
            .collect();
        jars.sort();
        jars
    } else if entry.is_file() && is_jar(entry) {
        vec![entry.to_path_buf()]
    } else {
        debug!("Skipping classpath entry {}", entry.display());
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    use tempfile::TempDir;
    use zip::ZipWriter;
    use zip::write::FileOptions;

    fn write_jar(dir: &Path, file_name: &str, group: &str, artifact: &str, version: &str) -> PathBuf {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(
                format!("META-INF/maven/{group}/{artifact}/pom.properties"),
                FileOptions::default(),
            )
            .unwrap();
        write!(writer, "version={version}\ngroupId={group}\nartifactId={artifact}\n").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let path = dir.join(file_name);
        fs::write(&path, bytes).unwrap();
        path
    }

    fn classpath_dir() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        write_jar(
            temp_dir.path(),
            "annotations-3.0.1.jar",
            "com.google.code.findbugs",
            "annotations",
            "3.0.1",
        );
        write_jar(
            temp_dir.path(),
            "jsr305-3.0.1.jar",
            "com.google.code.findbugs",
            "jsr305",
            "3.0.1",
        );
        write_jar(temp_dir.path(), "slf4j-api-1.7.30.jar", "org.slf4j", "slf4j-api", "1.7.30");
        fs::write(temp_dir.path().join("broken.jar"), b"not a jar").unwrap();
        fs::write(temp_dir.path().join("README.txt"), b"readme").unwrap();
        temp_dir
    }

    #[test]
    fn from_classpath_extracts_maven_jars_in_directory() {
        let temp_dir = classpath_dir();

        let jar_versions = JarVersions::from_classpath([temp_dir.path()]);

        let actual = jar_versions.dependent_jars();
        assert_eq!(actual.len(), 3);
        assert_eq!(
            actual["annotations-3.0.1.jar"],
            "3.0.1+com.google.code.findbugs-annotations"
        );
        assert_eq!(actual["jsr305-3.0.1.jar"], "3.0.1+com.google.code.findbugs-jsr305");
        assert_eq!(actual["slf4j-api-1.7.30.jar"], "1.7.30+org.slf4j-slf4j-api");
    }

    #[test]
    fn from_classpath_accepts_jar_files_and_skips_missing_entries() {
        let temp_dir = TempDir::new().unwrap();
        let jar = write_jar(temp_dir.path(), "lib.jar", "com.example", "lib", "2.1");

        let jar_versions =
            JarVersions::from_classpath([jar, temp_dir.path().join("missing-dir")]);

        assert_eq!(
            jar_versions.dependent_jars(),
            &BTreeMap::from([("lib.jar".to_string(), "2.1+com.example-lib".to_string())])
        );
    }

    #[test]
    fn remove_principal_returns_version_and_removes_jar() {
        let temp_dir = classpath_dir();
        let mut jar_versions = JarVersions::from_classpath([temp_dir.path()]);

        let principal = jar_versions.remove_principal("slf4j-api-1.7.30.jar").unwrap();

        assert_eq!(
            principal.map(|v| v.to_string()),
            Some("1.7.30+org.slf4j-slf4j-api".to_string())
        );
        assert!(!jar_versions.dependent_jars().contains_key("slf4j-api-1.7.30.jar"));
        assert_eq!(jar_versions.dependent_jars().len(), 2);
    }

    #[test]
    fn remove_principal_returns_none_for_unknown_jar() {
        let mut jar_versions = JarVersions::default();

        assert_eq!(jar_versions.remove_principal("unknown.jar"), Ok(None));
    }

    #[test]
    fn remove_principal_rejects_improper_version() {
        let mut jar_versions = JarVersions::new(BTreeMap::from([(
            "app.jar".to_string(),
            "${revision}+com.example-app".to_string(),
        )]));

        assert_eq!(
            jar_versions.remove_principal("app.jar"),
            Err(VersionError::Format("${revision}+com.example-app".to_string()))
        );
        assert!(jar_versions.dependent_jars().is_empty());
    }
}
