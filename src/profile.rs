//! Shell profile scanning for environment variable assignments.
//!
//! The host framework does not source login shells, so JAVA_HOME discovery
//! falls back to scanning the system profile for a literal assignment line.

use std::path::{Path, PathBuf};

/// System profile scanned for JAVA_HOME when none is given explicitly.
pub const SYSTEM_PROFILE: &str = "/etc/profile";

/// Profile file to scan. If KEYTRUST_PROFILE is set (e.g. in tests), uses that path.
pub fn profile_path() -> PathBuf {
    if let Ok(path) = std::env::var("KEYTRUST_PROFILE") {
        return PathBuf::from(path);
    }
    PathBuf::from(SYSTEM_PROFILE)
}

/// Extract the value assigned to `var` in profile `content`.
///
/// Matches literal `VAR=value` and `export VAR=value` lines; the last
/// assignment wins. Values may be single or double quoted. No shell
/// evaluation is performed, so `$HOME`-style references come back verbatim.
pub fn var_assignment(content: &str, var: &str) -> Option<String> {
    let mut found = None;
    for line in content.lines() {
        let line = line.trim();
        if line.starts_with('#') {
            continue;
        }
        let line = line
            .strip_prefix("export ")
            .map(str::trim_start)
            .unwrap_or(line);
        let Some(rest) = line.strip_prefix(var) else {
            continue;
        };
        let Some(value) = rest.strip_prefix('=') else {
            continue;
        };
        let value = value.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
            .unwrap_or(value);
        if !value.is_empty() {
            found = Some(value.to_string());
        }
    }
    found
}

/// Read `path` and extract the value assigned to `var`, if any.
///
/// An unreadable profile is treated the same as one without the assignment.
pub fn var_from_file(path: &Path, var: &str) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    var_assignment(&content, var)
}
