use crate::hash::BodyHasher;
use crate::ConfigError;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Digest algorithms available for hashing response bodies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// MD5, rendered as 32 lowercase hex characters
    #[default]
    Md5,

    /// SHA-256, rendered as 64 lowercase hex characters
    Sha256,
}

impl HashAlgorithm {
    /// Returns the canonical lowercase name of the algorithm
    pub fn name(&self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha256 => "sha256",
        }
    }

    /// Returns the length of the hex-encoded digest
    pub fn hex_len(&self) -> usize {
        match self {
            Self::Md5 => 32,
            Self::Sha256 => 64,
        }
    }
}

impl BodyHasher for HashAlgorithm {
    fn digest(&self, body: &[u8]) -> String {
        match self {
            Self::Md5 => hex::encode(md5::compute(body).0),
            Self::Sha256 => {
                let mut hasher = Sha256::new();
                hasher.update(body);
                hex::encode(hasher.finalize())
            }
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "md5" => Ok(Self::Md5),
            "sha256" | "sha-256" => Ok(Self::Sha256),
            _ => Err(ConfigError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
