//! PEM private key inspection
//!
//! libgit2 only decodes a private key when the SSH handshake asks for it, so
//! a corrupt key would otherwise surface as an authentication failure on the
//! first clone. This module checks the PEM framing up front and works out
//! whether the key is encrypted, which is enough to reject obviously broken
//! key material at configuration time.

use crate::error::{Result, config};

/// Base64 of `openssh-key-v1\0`, the magic every OpenSSH key body starts with
const OPENSSH_MAGIC_B64: &str = "b3BlbnNzaC1rZXktdjEA";

/// Base64 of the magic followed by the cipher name `none`
const OPENSSH_UNENCRYPTED_B64: &str = "b3BlbnNzaC1rZXktdjEAAAAABG5vbmU";

/// Private key container formats accepted by libgit2's SSH backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFormat {
    OpenSsh,
    /// Traditional `RSA`/`EC`/`DSA PRIVATE KEY` blocks
    Traditional,
    Pkcs8,
}

/// What could be learned about a key without decrypting it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInfo {
    pub format: KeyFormat,
    pub encrypted: bool,
}

fn label_format(label: &str) -> Option<(KeyFormat, bool)> {
    match label {
        "OPENSSH PRIVATE KEY" => Some((KeyFormat::OpenSsh, false)),
        "RSA PRIVATE KEY" | "EC PRIVATE KEY" | "DSA PRIVATE KEY" => {
            Some((KeyFormat::Traditional, false))
        }
        "PRIVATE KEY" => Some((KeyFormat::Pkcs8, false)),
        "ENCRYPTED PRIVATE KEY" => Some((KeyFormat::Pkcs8, true)),
        _ => None,
    }
}

fn is_base64(line: &str) -> bool {
    line.bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'/' || b == b'=')
}

/// Inspect PEM-encoded private key material
///
/// # Errors
///
/// Returns a configuration error when the text is not a single well-formed
/// PEM private key block.
pub fn inspect(pem: &str) -> Result<KeyInfo> {
    let mut lines = pem.lines().map(str::trim).skip_while(|l| l.is_empty());

    let begin = lines
        .next()
        .ok_or_else(|| config::private_key_invalid("key is empty"))?;
    let label = begin
        .strip_prefix("-----BEGIN ")
        .and_then(|rest| rest.strip_suffix("-----"))
        .ok_or_else(|| config::private_key_invalid("missing PEM BEGIN line"))?;
    let (format, mut encrypted) = label_format(label)
        .ok_or_else(|| config::private_key_invalid(format!("'{label}' is not a private key")))?;

    let end = format!("-----END {label}-----");
    let mut body = String::new();
    let mut closed = false;
    for line in lines.by_ref() {
        if line == end {
            closed = true;
            break;
        }
        if line.is_empty() {
            continue;
        }
        // RFC 1421 headers, e.g. `Proc-Type: 4,ENCRYPTED`
        if let Some((name, value)) = line.split_once(':') {
            if format != KeyFormat::Traditional {
                return Err(config::private_key_invalid("unexpected header in key body"));
            }
            if name.trim() == "Proc-Type" && value.contains("ENCRYPTED") {
                encrypted = true;
            }
            continue;
        }
        if !is_base64(line) {
            return Err(config::private_key_invalid("key body is not valid base64"));
        }
        body.push_str(line);
    }

    if !closed {
        return Err(config::private_key_invalid(format!(
            "missing '{end}' line"
        )));
    }
    if lines.any(|l| !l.is_empty()) {
        return Err(config::private_key_invalid(
            "unexpected data after the key block",
        ));
    }
    if body.is_empty() {
        return Err(config::private_key_invalid("key body is empty"));
    }

    if format == KeyFormat::OpenSsh {
        if !body.starts_with(OPENSSH_MAGIC_B64) {
            return Err(config::private_key_invalid(
                "not an openssh-key-v1 key",
            ));
        }
        encrypted = !body.starts_with(OPENSSH_UNENCRYPTED_B64);
    }

    Ok(KeyInfo { format, encrypted })
}
