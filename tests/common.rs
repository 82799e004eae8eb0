//! Shared test helpers: temp workspaces, a fake JDK tree, and a recording
//! MockKeytool double.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use keytrust::keytool::{Invocation, Keytool, StoreAccess};
use tempfile::TempDir;

/// Create a temp directory inside the workspace (sandbox-friendly).
pub fn temp_workspace() -> TempDir {
    tempfile::Builder::new()
        .prefix("keytrust_test_")
        .tempdir_in(std::env::current_dir().unwrap_or_else(|_| std::path::Path::new(".").into()))
        .expect("temp dir")
}

/// Lay out a minimal JDK tree: bin/keytool and lib/security/cacerts.
pub fn fake_jdk(base: &Path) -> PathBuf {
    let jdk = base.join("jdk");
    std::fs::create_dir_all(jdk.join("bin")).unwrap();
    std::fs::create_dir_all(jdk.join("lib").join("security")).unwrap();
    std::fs::write(jdk.join("bin").join("keytool"), b"").unwrap();
    std::fs::write(jdk.join("lib").join("security").join("cacerts"), b"jks").unwrap();
    jdk
}

/// Write a profile file with the given content, returning its path.
pub fn write_profile(base: &Path, content: &str) -> PathBuf {
    let path = base.join("profile");
    std::fs::write(&path, content).unwrap();
    path
}

/// Write a placeholder certificate file, returning its path.
pub fn write_cert(base: &Path) -> PathBuf {
    let path = base.join("internal_ca.pem");
    std::fs::write(
        &path,
        b"-----BEGIN CERTIFICATE-----\nMIIB\n-----END CERTIFICATE-----\n",
    )
    .unwrap();
    path
}

/// In-memory keytool double; records every invocation in order.
pub struct MockKeytool {
    pub aliases: Mutex<HashSet<String>>,
    pub calls: Mutex<Vec<String>>,
    pub seen_storepass: Mutex<Vec<String>>,
    /// Binaries that respond to -help; empty means all candidates do.
    pub runnable: Vec<PathBuf>,
    pub store_ok: bool,
    pub cert_ok: bool,
    pub import_ok: bool,
}

impl MockKeytool {
    pub fn new() -> Self {
        Self {
            aliases: Mutex::new(HashSet::new()),
            calls: Mutex::new(Vec::new()),
            seen_storepass: Mutex::new(Vec::new()),
            runnable: Vec::new(),
            store_ok: true,
            cert_ok: true,
            import_ok: true,
        }
    }

    pub fn with_alias(self, alias: &str) -> Self {
        self.aliases.lock().unwrap().insert(alias.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn has_alias(&self, alias: &str) -> bool {
        self.aliases.lock().unwrap().contains(alias)
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Keytool for MockKeytool {
    fn help(&self, binary: &Path) -> Invocation {
        self.record(format!("help {}", binary.display()));
        if self.runnable.is_empty() || self.runnable.iter().any(|p| p == binary) {
            Invocation::Success {
                output: "Key and Certificate Management Tool".to_string(),
            }
        } else {
            Invocation::Failure {
                diagnostic: format!("{}: No such file or directory", binary.display()),
            }
        }
    }

    fn list_alias(&self, access: &StoreAccess, alias: &str) -> Invocation {
        self.record(format!("list-alias {alias}"));
        self.seen_storepass
            .lock()
            .unwrap()
            .push(access.storepass.clone());
        if self.aliases.lock().unwrap().contains(alias) {
            Invocation::Success {
                output: format!("{alias}, trustedCertEntry"),
            }
        } else {
            Invocation::Failure {
                diagnostic: format!(
                    "keytool error: java.lang.Exception: Alias <{alias}> does not exist"
                ),
            }
        }
    }

    fn list_store(&self, access: &StoreAccess) -> Invocation {
        self.record("list-store".to_string());
        self.seen_storepass
            .lock()
            .unwrap()
            .push(access.storepass.clone());
        if self.store_ok {
            Invocation::Success {
                output: format!(
                    "Keystore contains {} entries",
                    self.aliases.lock().unwrap().len()
                ),
            }
        } else {
            Invocation::Failure {
                diagnostic:
                    "keytool error: java.io.IOException: Keystore was tampered with, or password was incorrect"
                        .to_string(),
            }
        }
    }

    fn print_cert(&self, _access: &StoreAccess, cert_file: &Path) -> Invocation {
        self.record(format!("print-cert {}", cert_file.display()));
        if self.cert_ok {
            Invocation::Success {
                output: "Owner: CN=Internal CA".to_string(),
            }
        } else {
            Invocation::Failure {
                diagnostic: "keytool error: java.lang.Exception: Input not an X.509 certificate"
                    .to_string(),
            }
        }
    }

    fn import_cert(&self, access: &StoreAccess, alias: &str, _cert_file: &Path) -> Invocation {
        self.record(format!("import {alias}"));
        self.seen_storepass
            .lock()
            .unwrap()
            .push(access.storepass.clone());
        if self.import_ok {
            self.aliases.lock().unwrap().insert(alias.to_string());
            Invocation::Success {
                output: "Certificate was added to keystore".to_string(),
            }
        } else {
            Invocation::Failure {
                diagnostic:
                    "keytool error: java.lang.Exception: Failed to establish chain from reply"
                        .to_string(),
            }
        }
    }
}
