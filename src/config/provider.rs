//! Provider-level configuration: credentials and transport policy

use super::require_non_empty;
use crate::error::Result;
use crate::git::auth::{self, Credentials};
use crate::git::transport::Transport;

/// Settings shared by every lookup made with one configuration
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    pub credentials: Credentials,
    /// Skip HTTPS certificate verification
    pub skip_tls_verify: bool,
}

impl ProviderConfig {
    /// Check option values without touching the filesystem
    ///
    /// # Errors
    ///
    /// Returns a configuration error when an option is set to an empty value.
    pub fn validate(&self) -> Result<()> {
        let creds = &self.credentials;
        require_non_empty("username", creds.username.as_deref())?;
        require_non_empty("password", creds.password.as_deref())?;
        require_non_empty("private_key", creds.private_key.as_deref())?;
        if creds
            .private_key_file
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            require_non_empty("private_key_file", Some(""))?;
        }
        require_non_empty(
            "private_key_password",
            creds.private_key_password.as_deref(),
        )?;
        Ok(())
    }

    /// Build the transport every lookup under this configuration uses
    ///
    /// # Errors
    ///
    /// Returns a configuration error for empty option values and for
    /// private keys that cannot be read or parsed.
    pub fn into_transport(self) -> Result<Transport> {
        self.validate()?;
        let auth = auth::resolve(&self.credentials)?;
        Ok(Transport::new(auth, self.skip_tls_verify))
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::error::ErrorKind;
    use crate::git::AuthHandle;

    #[test]
    fn test_default_config_yields_native_auth() {
        let transport = ProviderConfig::default().into_transport().unwrap();
        assert!(matches!(transport.auth(), AuthHandle::None));
        assert!(!transport.skip_tls_verify());
    }

    #[test]
    fn test_skip_tls_verify_is_carried() {
        let config = ProviderConfig {
            skip_tls_verify: true,
            ..ProviderConfig::default()
        };
        assert!(config.into_transport().unwrap().skip_tls_verify());
    }

    #[test]
    fn test_empty_username_rejected() {
        let config = ProviderConfig {
            credentials: Credentials {
                username: Some(String::new()),
                ..Credentials::default()
            },
            ..ProviderConfig::default()
        };
        let err = config.into_transport().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.to_string().contains("username"));
    }

    #[test]
    fn test_empty_private_key_file_rejected() {
        let config = ProviderConfig {
            credentials: Credentials {
                private_key_file: Some(PathBuf::new()),
                ..Credentials::default()
            },
            ..ProviderConfig::default()
        };
        assert_eq!(config.validate().unwrap_err().kind(), ErrorKind::Config);
    }

    #[test]
    fn test_malformed_key_rejected() {
        let config = ProviderConfig {
            credentials: Credentials {
                private_key: Some("not a key".to_string()),
                ..Credentials::default()
            },
            ..ProviderConfig::default()
        };
        assert_eq!(
            config.into_transport().unwrap_err().kind(),
            ErrorKind::Config
        );
    }

    #[test]
    fn test_basic_auth_configured() {
        let config = ProviderConfig {
            credentials: Credentials {
                username: Some("alice".to_string()),
                password: Some("pw".to_string()),
                ..Credentials::default()
            },
            ..ProviderConfig::default()
        };
        let transport = config.into_transport().unwrap();
        assert!(matches!(transport.auth(), AuthHandle::Basic { .. }));
    }
}
