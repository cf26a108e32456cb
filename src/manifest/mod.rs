//! Manifest layer: discovers installed jars and the versions embedded in them
//! - properties.rs: Java `.properties` parser
//! - extractor.rs: reads `pom.properties` out of a jar
//! - jar_versions.rs: classpath scanning

pub mod extractor;
pub mod jar_versions;
pub mod properties;

pub use extractor::{GroupArtifactVersion, extract_version};
pub use jar_versions::JarVersions;
pub use properties::parse_properties;
