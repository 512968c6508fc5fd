//! Outbound transport configuration
//!
//! A [`Transport`] bundles everything a remote operation needs besides the
//! URL: the [`AuthHandle`], the TLS verification policy and the SSH host key
//! policy. Both policies are applied through libgit2's per-operation
//! certificate callback, so independently configured transports can be used
//! side by side in one process.
//!
//! The user agent is the exception. libgit2 only has a library-wide setting
//! for it, so it is installed once per process. Every transport announces the
//! same `gitref/<version>` identity, which keeps that shared setting
//! consistent no matter how many transports exist.

use std::ffi::{CString, c_int};
use std::sync::{Arc, Once};

use git2::{
    AutotagOption, CertificateCheckStatus, CredentialType, Error, ErrorClass, ErrorCode,
    FetchOptions, ProxyOptions, RemoteCallbacks,
};

use super::auth::{AuthHandle, HostKeyPolicy};

/// User agent sent with every HTTP(S) request
pub const USER_AGENT: &str = concat!("gitref/", env!("CARGO_PKG_VERSION"));

/// How many times a credential is offered before giving up
const MAX_CREDENTIAL_ATTEMPTS: u32 = 1;

static INSTALL_USER_AGENT: Once = Once::new();

fn install_user_agent() {
    INSTALL_USER_AGENT.call_once(|| {
        let Ok(agent) = CString::new(USER_AGENT) else {
            return;
        };
        libgit2_sys::init();
        // SAFETY: GIT_OPT_SET_USER_AGENT takes a single `const char *`, which
        // libgit2 copies before returning.
        let rc = unsafe {
            libgit2_sys::git_libgit2_opts(
                libgit2_sys::GIT_OPT_SET_USER_AGENT as c_int,
                agent.as_ptr(),
            )
        };
        if rc < 0 {
            tracing::warn!("failed to install git user agent");
        }
    });
}

/// Configured outbound transport for remote repository access
#[derive(Debug, Clone)]
pub struct Transport {
    auth: Arc<AuthHandle>,
    skip_tls_verify: bool,
}

impl Default for Transport {
    fn default() -> Self {
        Self::new(AuthHandle::None, false)
    }
}

impl Transport {
    /// Build a transport from an auth handle and TLS policy
    ///
    /// With `skip_tls_verify` set, HTTPS certificate chain and hostname
    /// checks are skipped for every operation made through this transport.
    /// Anyone able to intercept the connection can then impersonate the
    /// server, so only use it against hosts you control.
    #[must_use]
    pub fn new(auth: AuthHandle, skip_tls_verify: bool) -> Self {
        install_user_agent();
        if skip_tls_verify {
            tracing::warn!("TLS certificate verification is disabled for git remotes");
        }
        if auth.host_key_policy() == HostKeyPolicy::AcceptAny {
            tracing::warn!("SSH host key verification is disabled for git remotes");
        }
        tracing::debug!(auth = auth.describe(), skip_tls_verify, "configured git transport");

        Self {
            auth: Arc::new(auth),
            skip_tls_verify,
        }
    }

    #[must_use]
    pub fn auth(&self) -> &AuthHandle {
        &self.auth
    }

    #[must_use]
    pub fn skip_tls_verify(&self) -> bool {
        self.skip_tls_verify
    }

    #[must_use]
    pub fn user_agent(&self) -> &'static str {
        USER_AGENT
    }

    /// Callbacks carrying credentials and certificate policy for one operation
    pub(crate) fn remote_callbacks(&self) -> RemoteCallbacks<'_> {
        let mut callbacks = RemoteCallbacks::new();

        let auth = &*self.auth;
        let mut attempts = 0;
        callbacks.credentials(move |url, username_from_url, allowed| {
            if !allowed.contains(CredentialType::USERNAME) {
                if attempts >= MAX_CREDENTIAL_ATTEMPTS {
                    return Err(Error::new(
                        ErrorCode::Auth,
                        ErrorClass::Net,
                        "authentication failed: credentials rejected by remote",
                    ));
                }
                attempts += 1;
            }
            auth.credential(url, username_from_url, allowed)
        });

        let host_key = self.auth.host_key_policy();
        let skip_tls_verify = self.skip_tls_verify;
        callbacks.certificate_check(move |cert, host| {
            let status = if cert.as_hostkey().is_some() {
                match host_key {
                    HostKeyPolicy::Strict => CertificateCheckStatus::CertificatePassthrough,
                    HostKeyPolicy::AcceptAny => CertificateCheckStatus::CertificateOk,
                }
            } else if skip_tls_verify {
                CertificateCheckStatus::CertificateOk
            } else {
                CertificateCheckStatus::CertificatePassthrough
            };
            tracing::trace!(host, "certificate check");
            Ok(status)
        });

        callbacks
    }

    /// Proxy settings taken from git configuration and the environment
    pub(crate) fn proxy_options(&self) -> ProxyOptions<'_> {
        let mut proxy = ProxyOptions::new();
        proxy.auto();
        proxy
    }

    /// Fetch options for a single-ref fetch
    ///
    /// `depth` of 0 fetches full history.
    pub(crate) fn fetch_options(&self, depth: u32) -> FetchOptions<'_> {
        let mut options = FetchOptions::new();
        options.remote_callbacks(self.remote_callbacks());
        options.proxy_options(self.proxy_options());
        options.download_tags(AutotagOption::None);
        if let Some(depth) = shallow_depth(depth) {
            options.depth(depth);
        }
        options
    }
}

/// The libgit2 fetch depth for `depth`, or `None` for full history
pub(crate) fn shallow_depth(depth: u32) -> Option<i32> {
    (depth > 0).then(|| i32::try_from(depth).unwrap_or(i32::MAX))
}
