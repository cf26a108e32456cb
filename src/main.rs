use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::info;

use version_compat::config::{CompatConfig, LogConfig};
use version_compat::logging::init_logging;
use version_compat::manifest::JarVersions;
use version_compat::version::checker::{CheckStatus, check_components};
use version_compat::version::{VersionMatcher, VersionValue};

#[derive(Parser)]
#[command(name = "version-compat")]
#[command(version, about = "Minimum-version compatibility checks for loose semantic versions")]
struct Cli {
    /// Write JSON logs to the data directory instead of stderr
    #[arg(long, global = true)]
    log_file: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check whether a version supports any of the acceptable versions
    Check {
        /// Version to check
        actual: String,
        /// Required version
        required: String,
        /// Additional acceptable versions
        additional: Vec<String>,
    },
    /// List the versions of the jars on a classpath
    Scan {
        /// Jar files or directories of jars
        #[arg(required = true)]
        classpath: Vec<PathBuf>,
    },
    /// Check the jars on a classpath against configured requirements
    Verify {
        /// JSON requirements file
        #[arg(long, short)]
        config: PathBuf,
        /// Jar files or directories of jars, added to the configured classpath
        classpath: Vec<PathBuf>,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Command::Check {
            actual,
            required,
            additional,
        } => {
            let _guard = init_logging(&log_config(cli.log_file))?;
            check(&actual, &required, &additional)
        }
        Command::Scan { classpath } => {
            let _guard = init_logging(&log_config(cli.log_file))?;
            scan(&classpath)
        }
        Command::Verify { config, classpath } => {
            let mut config = CompatConfig::load(&config)?;
            config.log.to_file |= cli.log_file;
            let _guard = init_logging(&config.log)?;
            verify(config, classpath)
        }
    }
}

fn log_config(to_file: bool) -> LogConfig {
    LogConfig {
        to_file,
        ..LogConfig::default()
    }
}

fn check(actual: &str, required: &str, additional: &[String]) -> anyhow::Result<ExitCode> {
    let matcher = VersionMatcher::new(required, additional)?;
    let actual: VersionValue = actual.parse()?;

    match matcher.find_matching_version(&actual) {
        Some(matched) => {
            println!("{matched}");
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("{}", matcher.error_message(&actual).unwrap_or_default());
            Ok(ExitCode::FAILURE)
        }
    }
}

fn scan(classpath: &[PathBuf]) -> anyhow::Result<ExitCode> {
    let jar_versions = JarVersions::from_classpath(classpath);
    info!("Found {} versioned jars", jar_versions.dependent_jars().len());

    for (jar, version) in jar_versions.dependent_jars() {
        println!("{jar}\t{version}");
    }
    Ok(ExitCode::SUCCESS)
}

fn verify(config: CompatConfig, classpath: Vec<PathBuf>) -> anyhow::Result<ExitCode> {
    let mut jar_versions =
        JarVersions::from_classpath(config.classpath.iter().chain(classpath.iter()));

    if let Some(principal) = &config.principal {
        match jar_versions.remove_principal(principal)? {
            Some(version) => info!("Principal {} is version {}", principal, version),
            None => info!("No version known for principal {}", principal),
        }
    }

    let reports = check_components(&jar_versions, &config.requirements)?;
    let mut all_supported = true;

    for report in &reports {
        let line = match &report.status {
            CheckStatus::Supported { matched } => format!(
                "ok       {}: {} supports {}",
                report.component,
                report.found.as_deref().unwrap_or_default(),
                matched
            ),
            CheckStatus::Unsupported { message } => format!("FAILED   {}: {}", report.component, message),
            CheckStatus::Invalid { reason } => format!("INVALID  {}: {}", report.component, reason),
            CheckStatus::Missing => format!("MISSING  {}", report.component),
        };
        all_supported &= report.status.is_supported();
        println!("{line}");
    }

    Ok(if all_supported {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
