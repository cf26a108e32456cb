//! Version layer: parsing and compatibility of loose semantic versions
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │    Value    │────▶│   Matcher   │────▶│   Checker   │
//! │  (parse)    │     │ (first fit) │     │ (components)│
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                                       ▲
//!        ▼                                       │
//! ┌─────────────┐                         ┌─────────────┐
//! │ Pre-release │                         │VersionSource│
//! │  (ordering) │                         │ (jar scan)  │
//! └─────────────┘                         └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`value`]: `VersionValue`, the parsed version and its compatibility relation
//! - [`prerelease`]: identifier-by-identifier ordering of pre-release tags
//! - [`matcher`]: `VersionMatcher`, first acceptable version and mismatch message
//! - [`checker`]: checks supplied component versions against requirements
//! - [`error`]: error types for parsing and manifest reading

pub mod checker;
pub mod error;
pub mod matcher;
pub mod prerelease;
pub mod value;

pub use error::VersionError;
pub use matcher::VersionMatcher;
pub use value::VersionValue;
