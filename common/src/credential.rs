//! # Credential pool
//!
//! API credentials are read once from a flat file, one per line:
//!
//! ```text
//! key:secret
//! label:key:secret
//! ```
//!
//! Lines with any other number of `:`-separated fields are skipped.

use std::fmt;
use std::path::Path;

use tracing::warn;

use crate::error::ScanError;

#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    label: String,
    pub key: String,
    pub secret: String,
}

impl Credential {
    pub fn new(label: impl Into<String>, key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            key: key.into(),
            secret: secret.into(),
        }
    }

    /// Display name of the credential, the key when no label was given.
    pub fn label(&self) -> &str {
        if self.label.is_empty() { &self.key } else { &self.label }
    }
}

// Secrets stay out of debug output and logs.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("label", &self.label())
            .field("key", &self.key)
            .field("secret", &"***")
            .finish()
    }
}

/// Ordered credentials, tried first to last.
#[derive(Debug, Clone, Default)]
pub struct CredentialPool {
    credentials: Vec<Credential>,
}

impl CredentialPool {
    pub fn new(credentials: Vec<Credential>) -> Self {
        Self { credentials }
    }

    /// Loads the pool from `path`. An unreadable file is a configuration error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScanError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ScanError::config(path, e))?;
        Ok(Self::parse(&content))
    }

    pub fn parse(content: &str) -> Self {
        let credentials = content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(idx, line)| {
                let credential = parse_line(line.trim());
                if credential.is_none() {
                    warn!("Skipping credential on line {}: expected key:secret or label:key:secret", idx + 1);
                }
                credential
            })
            .collect();

        Self { credentials }
    }

    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Credential> {
        self.credentials.iter()
    }
}

fn parse_line(line: &str) -> Option<Credential> {
    let fields: Vec<&str> = line.split(':').map(str::trim).collect();
    match fields.as_slice() {
        [key, secret] => Some(Credential::new("", *key, *secret)),
        [label, key, secret] => Some(Credential::new(*label, *key, *secret)),
        _ => None,
    }
}
