use std::fmt;
use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser, ValueEnum};

use crate::config::{LookupRequest, ProviderConfig};
use crate::git::auth::Credentials;
use crate::git::locate::DEFAULT_DEPTH;

/// How the lookup result is printed
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One `key value` pair per line
    #[default]
    Text,
    /// A single JSON object
    Json,
}

/// Arguments for the lookup command
#[derive(Parser, Clone, Default)]
#[command(after_help = "EXAMPLES:\n  \
                  Resolve HEAD of the current checkout:\n    gitref lookup\n\n\
                  Resolve a tag in another checkout:\n    gitref lookup --path ../infra --tag v1.2.0\n\n\
                  Resolve a remote branch over SSH:\n    GIT_PRIVATE_KEY_FILE=~/.ssh/deploy gitref lookup --url git@host:team/infra.git --branch main\n\n\
                  Print JSON:\n    gitref lookup --format json")]
pub struct LookupArgs {
    /// Path inside a local checkout (defaults to the current directory)
    #[arg(long, env = "GIT_DIR")]
    pub path: Option<PathBuf>,

    /// URL of a remote repository to clone
    #[arg(long)]
    pub url: Option<String>,

    /// Branch to resolve
    #[arg(long)]
    pub branch: Option<String>,

    /// Tag to resolve
    #[arg(long)]
    pub tag: Option<String>,

    /// Username for HTTP basic auth
    #[arg(long, env = "GIT_USERNAME")]
    pub username: Option<String>,

    /// Password for HTTP basic auth
    #[arg(long, env = "GIT_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// PEM-encoded SSH private key
    #[arg(long, env = "GIT_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,

    /// Path to an SSH private key file
    #[arg(long, env = "GIT_PRIVATE_KEY_FILE")]
    pub private_key_file: Option<PathBuf>,

    /// Passphrase for an encrypted private key
    #[arg(long, env = "GIT_PRIVATE_KEY_PASSWORD", hide_env_values = true)]
    pub private_key_password: Option<String>,

    /// Accept any SSH host key
    #[arg(
        long,
        env = "GIT_IGNORE_HOST_KEY",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    pub ignore_host_key: bool,

    /// Skip HTTPS certificate verification
    #[arg(
        long,
        env = "GIT_SKIP_TLS_VERIFY",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    pub skip_tls_verify: bool,

    /// Clone depth, 0 for full history
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    pub depth: u32,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl fmt::Debug for LookupArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LookupArgs")
            .field("path", &self.path)
            .field("url", &self.url)
            .field("branch", &self.branch)
            .field("tag", &self.tag)
            .field("credentials", &self.credentials())
            .field("skip_tls_verify", &self.skip_tls_verify)
            .field("depth", &self.depth)
            .field("format", &self.format)
            .finish()
    }
}

impl LookupArgs {
    fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
            private_key: self.private_key.clone(),
            private_key_file: self.private_key_file.clone(),
            private_key_password: self.private_key_password.clone(),
            ignore_host_key: self.ignore_host_key,
        }
    }

    #[must_use]
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            credentials: self.credentials(),
            skip_tls_verify: self.skip_tls_verify,
        }
    }

    #[must_use]
    pub fn request(&self) -> LookupRequest {
        LookupRequest {
            path: self.path.clone(),
            url: self.url.clone(),
            branch: self.branch.clone(),
            tag: self.tag.clone(),
            depth: self.depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> LookupArgs {
        let mut argv = vec!["lookup"];
        argv.extend_from_slice(args);
        LookupArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_request_from_flags() {
        let args = parse(&["--url", "https://example.com/r.git", "--tag", "v1.0.0"]);
        let request = args.request();
        assert_eq!(request.url.as_deref(), Some("https://example.com/r.git"));
        assert_eq!(request.tag.as_deref(), Some("v1.0.0"));
        assert_eq!(request.depth, DEFAULT_DEPTH);
    }

    #[test]
    fn test_provider_from_flags() {
        let args = parse(&[
            "--username",
            "alice",
            "--password",
            "pw",
            "--skip-tls-verify",
            "--ignore-host-key",
        ]);
        let provider = args.provider_config();
        assert_eq!(provider.credentials.username.as_deref(), Some("alice"));
        assert!(provider.credentials.ignore_host_key);
        assert!(provider.skip_tls_verify);
    }

    #[test]
    fn test_format_and_depth() {
        let args = parse(&["--format", "json", "--depth", "0"]);
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.depth, 0);
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(LookupArgs::try_parse_from(["lookup", "--format", "yaml"]).is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let args = parse(&["--password", "hunter2", "--private-key", "PEMDATA"]);
        let debug = format!("{args:?}");
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("PEMDATA"));
    }
}
