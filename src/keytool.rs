//! keytool invocation (external process seam).

use std::path::{Path, PathBuf};
use std::process::Command;

/// Result of one keytool invocation. Exit status is ground truth: no output
/// parsing decides success or failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// The tool exited zero; combined output kept for callers that need it.
    Success { output: String },
    /// The tool exited non-zero or could not be spawned.
    Failure { diagnostic: String },
}

impl Invocation {
    pub fn succeeded(&self) -> bool {
        matches!(self, Invocation::Success { .. })
    }

    /// Diagnostic text, empty for successful invocations.
    pub fn diagnostic(&self) -> &str {
        match self {
            Invocation::Success { .. } => "",
            Invocation::Failure { diagnostic } => diagnostic,
        }
    }
}

/// Resolved coordinates shared by all trust-store operations.
#[derive(Debug, Clone)]
pub struct StoreAccess {
    pub keytool: PathBuf,
    pub keystore: PathBuf,
    pub storepass: String,
    /// Exported as JAVA_HOME to child keytool processes.
    pub java_home: PathBuf,
}

/// Trait for keytool operations (probe/check/import).
pub trait Keytool: Send + Sync {
    /// Probe that `binary` is a runnable keytool (`keytool -help`).
    fn help(&self, binary: &Path) -> Invocation;
    /// List a single alias; success means the alias exists.
    fn list_alias(&self, access: &StoreAccess, alias: &str) -> Invocation;
    /// List the whole store; failure means the store is unreadable
    /// (wrong password or corrupt file).
    fn list_store(&self, access: &StoreAccess) -> Invocation;
    /// Decode a certificate file without touching the store.
    fn print_cert(&self, access: &StoreAccess, cert_file: &Path) -> Invocation;
    /// Import `cert_file` under `alias`, suppressing the confirmation prompt.
    fn import_cert(&self, access: &StoreAccess, alias: &str, cert_file: &Path) -> Invocation;
}

/// Keytool implementation that runs the real binary.
pub struct SystemKeytool;

fn run(cmd: &mut Command) -> Invocation {
    let output = match cmd.output() {
        Ok(output) => output,
        Err(e) => {
            return Invocation::Failure {
                diagnostic: format!("failed to run {:?}: {e}", cmd.get_program()),
            }
        }
    };
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    if output.status.success() {
        Invocation::Success { output: text }
    } else {
        Invocation::Failure { diagnostic: text }
    }
}

fn store_cmd(access: &StoreAccess) -> Command {
    let mut cmd = Command::new(&access.keytool);
    cmd.env("JAVA_HOME", &access.java_home);
    cmd
}

impl Keytool for SystemKeytool {
    fn help(&self, binary: &Path) -> Invocation {
        run(Command::new(binary).arg("-help"))
    }

    fn list_alias(&self, access: &StoreAccess, alias: &str) -> Invocation {
        let mut cmd = store_cmd(access);
        cmd.arg("-keystore")
            .arg(&access.keystore)
            .args(["-list", "-alias", alias, "-storepass"])
            .arg(&access.storepass)
            .arg("-noprompt");
        run(&mut cmd)
    }

    fn list_store(&self, access: &StoreAccess) -> Invocation {
        let mut cmd = store_cmd(access);
        cmd.arg("-keystore")
            .arg(&access.keystore)
            .args(["-list", "-storepass"])
            .arg(&access.storepass);
        run(&mut cmd)
    }

    fn print_cert(&self, access: &StoreAccess, cert_file: &Path) -> Invocation {
        let mut cmd = store_cmd(access);
        cmd.arg("-printcert").arg("-file").arg(cert_file);
        run(&mut cmd)
    }

    fn import_cert(&self, access: &StoreAccess, alias: &str, cert_file: &Path) -> Invocation {
        let mut cmd = store_cmd(access);
        cmd.args(["-importcert", "-trustcacerts", "-file"])
            .arg(cert_file)
            .arg("-keystore")
            .arg(&access.keystore)
            .args(["-alias", alias, "-storepass"])
            .arg(&access.storepass)
            .arg("-noprompt");
        run(&mut cmd)
    }
}
