//! Java installation discovery (runtime home, trust store, keytool binary).

use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

use crate::keytool::Keytool;
use crate::profile;

/// Environment variable naming the Java installation root.
pub const JAVA_HOME_VAR: &str = "JAVA_HOME";

/// System keytool probed before the one bundled with the runtime.
pub const SYSTEM_KEYTOOL: &str = "/usr/bin/keytool";

/// Why a Java installation (or part of it) could not be located.
/// Display strings double as outcome comments.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocateError {
    #[error("Java is not installed")]
    JavaNotFound,
    #[error("Could not find Java trust store.")]
    TrustStoreNotFound,
    #[error("Could not find keytool binary.")]
    KeytoolNotFound,
}

/// Resolve the runtime home from an explicit value or the system profile.
///
/// An explicit path is used verbatim; downstream discovery performs the real
/// validation. Without one, `profile_file` is scanned for a literal
/// JAVA_HOME assignment.
pub fn resolve_java_home(
    explicit: Option<&Path>,
    profile_file: &Path,
) -> Result<PathBuf, LocateError> {
    if let Some(home) = explicit {
        return Ok(home.to_path_buf());
    }
    profile::var_from_file(profile_file, JAVA_HOME_VAR)
        .map(PathBuf::from)
        .ok_or(LocateError::JavaNotFound)
}

/// Locate the default trust store under a Java installation.
///
/// The store is not at a fixed path across runtime layouts (jre/lib/security,
/// lib/security, ...), so the first regular file named `cacerts` wins.
pub fn find_trust_store(java_home: &Path) -> Result<PathBuf, LocateError> {
    WalkDir::new(java_home)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .find(|entry| entry.file_type().is_file() && entry.file_name() == "cacerts")
        .map(|entry| entry.into_path())
        .ok_or(LocateError::TrustStoreNotFound)
}

/// Locate a runnable keytool, preferring the system binary over the one in
/// `<java_home>/bin`. Each candidate is probed with `-help`.
pub fn find_keytool(java_home: &Path, keytool: &dyn Keytool) -> Result<PathBuf, LocateError> {
    let candidates = [
        PathBuf::from(SYSTEM_KEYTOOL),
        java_home.join("bin").join("keytool"),
    ];
    candidates
        .into_iter()
        .find(|candidate| keytool.help(candidate).succeeded())
        .ok_or(LocateError::KeytoolNotFound)
}
