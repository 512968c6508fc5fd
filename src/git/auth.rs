//! Git authentication configuration
//!
//! This module handles:
//! - Turning raw credential material into one [`AuthHandle`]
//! - Offering that handle to libgit2 through the credentials callback
//! - Falling back to git's native credential sources when nothing is configured
//!
//! Precedence when several credential forms are supplied is fixed: an inline
//! private key, then a private key file, then username/password. A username
//! without a password (or the reverse) is not an auth configuration and
//! silently yields [`AuthHandle::None`].

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use git2::{Cred, CredentialType, Error, ErrorClass, ErrorCode};

use super::key;
use crate::error::{Result, config};

/// Username used for SSH when the URL does not carry one
pub const DEFAULT_SSH_USERNAME: &str = "git";

/// How the SSH server's host key is checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HostKeyPolicy {
    /// Verify against `known_hosts`
    #[default]
    Strict,
    /// Accept any host key
    AcceptAny,
}

/// Raw credential material, as supplied by configuration
#[derive(Clone, Default)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
    /// PEM-encoded private key content
    pub private_key: Option<String>,
    pub private_key_file: Option<PathBuf>,
    pub private_key_password: Option<String>,
    pub ignore_host_key: bool,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("private_key_file", &self.private_key_file)
            .field(
                "private_key_password",
                &self.private_key_password.as_ref().map(|_| "<redacted>"),
            )
            .field("ignore_host_key", &self.ignore_host_key)
            .finish()
    }
}

/// An authenticated-transport capability
///
/// Created once per configuration and shared read-only by every lookup.
#[derive(Clone, Default)]
pub enum AuthHandle {
    /// Nothing configured; git's native credential sources are tried
    #[default]
    None,
    Basic {
        username: String,
        password: String,
    },
    PublicKey {
        private_key: String,
        passphrase: Option<String>,
        host_key: HostKeyPolicy,
    },
}

impl fmt::Debug for AuthHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthHandle::None => f.write_str("None"),
            AuthHandle::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .finish_non_exhaustive(),
            AuthHandle::PublicKey { host_key, .. } => f
                .debug_struct("PublicKey")
                .field("host_key", host_key)
                .finish_non_exhaustive(),
        }
    }
}

impl AuthHandle {
    /// Host key policy in effect for SSH connections
    #[must_use]
    pub fn host_key_policy(&self) -> HostKeyPolicy {
        match self {
            AuthHandle::PublicKey { host_key, .. } => *host_key,
            _ => HostKeyPolicy::Strict,
        }
    }

    /// Short description for logs; never includes secrets
    #[must_use]
    pub fn describe(&self) -> &'static str {
        match self {
            AuthHandle::None => "native git credentials",
            AuthHandle::Basic { .. } => "basic auth",
            AuthHandle::PublicKey { .. } => "ssh public key",
        }
    }

    /// Produce a credential for one libgit2 credentials request
    pub(crate) fn credential(
        &self,
        url: &str,
        username_from_url: Option<&str>,
        allowed: CredentialType,
    ) -> std::result::Result<Cred, Error> {
        let ssh_user = username_from_url.unwrap_or(DEFAULT_SSH_USERNAME);

        // libgit2 asks for the SSH username on its own when the URL has none
        if allowed.contains(CredentialType::USERNAME) {
            return Cred::username(ssh_user);
        }

        match self {
            AuthHandle::PublicKey {
                private_key,
                passphrase,
                ..
            } if allowed.contains(CredentialType::SSH_MEMORY)
                || allowed.contains(CredentialType::SSH_KEY) =>
            {
                Cred::ssh_key_from_memory(ssh_user, None, private_key, passphrase.as_deref())
            }
            AuthHandle::Basic { username, password }
                if allowed.contains(CredentialType::USER_PASS_PLAINTEXT) =>
            {
                Cred::userpass_plaintext(username, password)
            }
            AuthHandle::None => native_credential(url, username_from_url, allowed),
            _ => Err(auth_error("configured credentials do not match the remote's auth method")),
        }
    }
}

fn auth_error(message: &str) -> Error {
    Error::new(ErrorCode::Auth, ErrorClass::Ssh, message)
}

fn native_credential(
    url: &str,
    username_from_url: Option<&str>,
    allowed: CredentialType,
) -> std::result::Result<Cred, Error> {
    if allowed.contains(CredentialType::DEFAULT) {
        return Cred::default();
    }

    if allowed.contains(CredentialType::SSH_KEY) {
        let username = username_from_url.unwrap_or(DEFAULT_SSH_USERNAME);
        return Cred::ssh_key_from_agent(username).or_else(|_| try_ssh_key_files(username));
    }

    if allowed.contains(CredentialType::USER_PASS_PLAINTEXT) {
        let config = git2::Config::open_default()?;
        return Cred::credential_helper(&config, url, username_from_url);
    }

    Err(auth_error("no credentials configured"))
}

fn try_ssh_key_files(username: &str) -> std::result::Result<Cred, Error> {
    let ssh_dir = dirs::home_dir().unwrap_or_default().join(".ssh");

    for key_name in &["id_ed25519", "id_rsa", "id_ecdsa"] {
        let private_key = ssh_dir.join(key_name);
        if !private_key.exists() {
            continue;
        }

        let public_key = ssh_dir.join(format!("{key_name}.pub"));
        let public_key_path = public_key.exists().then_some(public_key.as_path());

        if let Ok(cred) = Cred::ssh_key(username, public_key_path, &private_key, None) {
            return Ok(cred);
        }
    }

    Err(auth_error("SSH key not found"))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn read_key_file(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| config::private_key_read_failed(path.display().to_string(), e.to_string()))
}

fn public_key_handle(
    pem: String,
    passphrase: Option<&str>,
    host_key: HostKeyPolicy,
) -> Result<AuthHandle> {
    let info = key::inspect(&pem)?;
    tracing::debug!(format = ?info.format, encrypted = info.encrypted, "loaded private key");
    if info.encrypted && passphrase.is_none() {
        return Err(config::private_key_invalid(
            "key is encrypted but no passphrase was given",
        ));
    }

    Ok(AuthHandle::PublicKey {
        private_key: pem,
        passphrase: passphrase.map(str::to_string),
        host_key,
    })
}

/// Resolve credential material into an [`AuthHandle`]
///
/// # Errors
///
/// Returns a configuration error when a private key cannot be read or is
/// not a well-formed PEM private key, or is encrypted without a passphrase.
pub fn resolve(credentials: &Credentials) -> Result<AuthHandle> {
    let passphrase = non_empty(credentials.private_key_password.as_deref());
    let host_key = if credentials.ignore_host_key {
        HostKeyPolicy::AcceptAny
    } else {
        HostKeyPolicy::Strict
    };

    if let Some(pem) = non_empty(credentials.private_key.as_deref()) {
        return public_key_handle(pem.to_string(), passphrase, host_key);
    }

    if let Some(path) = credentials
        .private_key_file
        .as_deref()
        .filter(|p| !p.as_os_str().is_empty())
    {
        let pem = read_key_file(path)?;
        return public_key_handle(pem, passphrase, host_key);
    }

    match (
        non_empty(credentials.username.as_deref()),
        non_empty(credentials.password.as_deref()),
    ) {
        (Some(username), Some(password)) => Ok(AuthHandle::Basic {
            username: username.to_string(),
            password: password.to_string(),
        }),
        _ => Ok(AuthHandle::None),
    }
}
