//! Credential discovery for the backing cloud services.
//!
//! Exactly one of two credential materials must be present in the
//! configured directory: a service-account key file (preferred, suitable
//! for servers) or an interactive OAuth client file. Absence of both is a
//! fatal startup condition. The choice of mechanism is configuration — the
//! rest of the system takes a [`Credentials`] value and never branches on
//! how it was obtained.

use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use thiserror::Error;

/// Service-account key file name, checked first.
pub const SERVICE_ACCOUNT_FILE: &str = "service_account.json";
/// Interactive OAuth client file name, the fallback.
pub const OAUTH_CLIENT_FILE: &str = "credentials.json";

#[derive(Error, Debug)]
pub enum AuthError {
    #[error(
        "no credentials found in {0}: place {SERVICE_ACCOUNT_FILE} (preferred) \
         or {OAUTH_CLIENT_FILE} there"
    )]
    MissingCredentials(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Resolved credential material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Server-side service-account key.
    ServiceAccount(PathBuf),
    /// Interactive OAuth client secrets.
    Interactive(PathBuf),
}

impl Credentials {
    /// Look for credential files in `dir`, preferring the service account.
    pub fn discover(dir: &Path) -> Result<Self, AuthError> {
        let service_account = dir.join(SERVICE_ACCOUNT_FILE);
        if service_account.exists() {
            log::info!("using service-account credentials");
            return Ok(Credentials::ServiceAccount(service_account));
        }
        let oauth_client = dir.join(OAUTH_CLIENT_FILE);
        if oauth_client.exists() {
            log::info!("using interactive OAuth credentials");
            return Ok(Credentials::Interactive(oauth_client));
        }
        Err(AuthError::MissingCredentials(dir.display().to_string()))
    }

    /// Path of the credential file.
    pub fn path(&self) -> &Path {
        match self {
            Credentials::ServiceAccount(path) | Credentials::Interactive(path) => path,
        }
    }

    /// Mechanism name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Credentials::ServiceAccount(_) => "service-account",
            Credentials::Interactive(_) => "interactive-oauth",
        }
    }
}

static PROCESS_CREDENTIALS: OnceCell<Credentials> = OnceCell::new();

/// The process-scoped credential handle.
///
/// Discovered from the working directory on first use and memoized for the
/// lifetime of the process; credentials are stateless after resolution so
/// no teardown is needed.
pub fn process_credentials() -> Result<&'static Credentials, AuthError> {
    PROCESS_CREDENTIALS.get_or_try_init(|| {
        let dir = std::env::current_dir()?;
        Credentials::discover(&dir)
    })
}
