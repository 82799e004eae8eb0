//! trust_cert state: ensure a CA certificate is trusted by the Java runtime.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::java;
use crate::keytool::{Invocation, Keytool, StoreAccess, SystemKeytool};
use crate::outcome::{Outcome, ResultCodes};
use crate::profile;

/// Trust store password shipped with the JDK.
pub const DEFAULT_STOREPASS: &str = "changeit";

/// Desired trust entry: parameters for one `trust_cert` invocation.
///
/// The certificate must already exist on the managed host (e.g. placed there
/// by a file state).
#[derive(Debug, Clone)]
pub struct TrustCert {
    /// State name; echoed back in the outcome.
    pub name: String,
    /// Public certificate on the managed host.
    pub cert_file: PathBuf,
    /// Alias the entry is stored under.
    pub alias: String,
    /// Trust store password.
    pub storepass: String,
    /// Explicit runtime home; discovered from the system profile when unset.
    pub java_home: Option<PathBuf>,
}

impl TrustCert {
    pub fn new(
        name: impl Into<String>,
        cert_file: impl Into<PathBuf>,
        alias: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            cert_file: cert_file.into(),
            alias: alias.into(),
            storepass: DEFAULT_STOREPASS.to_string(),
            java_home: None,
        }
    }

    pub fn storepass(mut self, storepass: impl Into<String>) -> Self {
        self.storepass = storepass.into();
        self
    }

    pub fn java_home(mut self, java_home: impl Into<PathBuf>) -> Self {
        self.java_home = Some(java_home.into());
        self
    }

    /// Reject parameter combinations the state cannot act on.
    fn validate(&self) -> Result<()> {
        if self.alias.trim().is_empty() {
            anyhow::bail!("alias must not be empty");
        }
        if self.cert_file.as_os_str().is_empty() {
            anyhow::bail!("cert_file must not be empty");
        }
        if !self.cert_file.is_file() {
            anyhow::bail!("cert_file {} does not exist", self.cert_file.display());
        }
        Ok(())
    }
}

/// How the state is applied; `test` reports the would-be change without
/// mutating the trust store.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApplyOpts {
    pub test: bool,
}

/// Apply the state with the system keytool and system profile.
pub fn trust_cert(params: &TrustCert, opts: &ApplyOpts) -> Outcome {
    trust_cert_with_keytool(params, opts, &SystemKeytool, &profile::profile_path())
}

/// Apply the state with a provided keytool and profile file (for testing).
///
/// Never returns an error: every failure becomes an outcome record so the
/// host framework can keep orchestrating other states.
pub fn trust_cert_with_keytool(
    params: &TrustCert,
    opts: &ApplyOpts,
    keytool: &dyn Keytool,
    profile_file: &Path,
) -> Outcome {
    let codes = ResultCodes::for_mode(opts.test);
    let name = params.name.as_str();

    if let Err(e) = params.validate() {
        return Outcome::unchanged(name, codes.failure, e.to_string());
    }

    let java_home = match java::resolve_java_home(params.java_home.as_deref(), profile_file) {
        Ok(home) => home,
        Err(e) => return Outcome::unchanged(name, codes.failure, e.to_string()),
    };

    let keystore = match java::find_trust_store(&java_home) {
        Ok(store) => store,
        Err(e) => return Outcome::unchanged(name, codes.failure, e.to_string()),
    };

    let binary = match java::find_keytool(&java_home, keytool) {
        Ok(binary) => binary,
        Err(e) => return Outcome::unchanged(name, codes.failure, e.to_string()),
    };

    let access = StoreAccess {
        keytool: binary,
        keystore,
        storepass: params.storepass.clone(),
        java_home,
    };

    // Alias already present: nothing to do.
    if keytool.list_alias(&access, &params.alias).succeeded() {
        return Outcome::unchanged(name, codes.none, "CA alias exists in trust store.");
    }

    // A failed alias probe normally means the alias is absent, but a wrong
    // storepass or a corrupt store fails the same way. Listing the whole
    // store separates the two before anything is imported.
    if let Invocation::Failure { diagnostic } = keytool.list_store(&access) {
        return Outcome::unchanged(
            name,
            codes.failure,
            format!("Keystore {} problem:\n{diagnostic}", access.keystore.display()),
        );
    }

    if let Invocation::Failure { diagnostic } = keytool.print_cert(&access, &params.cert_file) {
        return Outcome::unchanged(
            name,
            codes.failure,
            format!(
                "File {} is not a valid certificate:\n{diagnostic}",
                params.cert_file.display()
            ),
        );
    }

    if opts.test {
        return Outcome::with_change(
            name,
            codes.success,
            format!(
                "Certificate \"{}\" will be added as a trusted root.",
                params.alias
            ),
            &params.alias,
        );
    }

    match keytool.import_cert(&access, &params.alias, &params.cert_file) {
        Invocation::Success { .. } => Outcome::with_change(
            name,
            codes.success,
            format!(
                "Certificate \"{}\" was added as a trusted root.",
                params.alias
            ),
            &params.alias,
        ),
        Invocation::Failure { diagnostic } => Outcome::unchanged(name, codes.failure, diagnostic),
    }
}
