//! Server settings loaded via OrthoConfig, plus session key handling.
//!
//! Every setting can come from the CLI, a config file, or a `REGISTRAR_*`
//! environment variable, e.g. `REGISTRAR_PORT=9000`.

use std::net::SocketAddr;
use std::path::PathBuf;

use actix_web::cookie::Key;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::warn;
use zeroize::Zeroize;

use crate::outbound::security::DEFAULT_COST;

const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
/// Minimum session key length in bytes.
pub const SESSION_KEY_MIN_LEN: usize = 64;
const FINGERPRINT_BYTES: usize = 8;

/// Errors raised while turning settings into a runnable server.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The configured host and port do not form a socket address.
    #[error("invalid bind address {host}:{port}")]
    BindAddress { host: String, port: u16 },
    /// The session key file could not be read.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The session key file is too short to derive signing material.
    #[error("session key at {path} is {length} bytes; need at least {min_len}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
}

/// Configuration values for the HTTP server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "REGISTRAR")]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// File holding at least 64 bytes of session key material.
    pub session_key_file: Option<PathBuf>,
    /// Mark session cookies `Secure`.
    #[ortho_config(default = true)]
    pub cookie_secure: bool,
    /// Fall back to a random per-process key when the key file is missing.
    #[ortho_config(default = false)]
    pub allow_ephemeral_key: bool,
    /// bcrypt cost factor for new password digests.
    pub password_cost: Option<u32>,
}

impl ServerSettings {
    /// Host to bind, defaulting to all interfaces.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or("0.0.0.0")
    }

    /// Port to bind, defaulting to 8080.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(8080)
    }

    /// Path of the session key file.
    pub fn session_key_path(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(SESSION_KEY_DEFAULT_PATH))
    }

    /// Cost factor for the password hasher.
    pub fn password_cost(&self) -> u32 {
        self.password_cost.unwrap_or(DEFAULT_COST)
    }

    /// Socket address built from host and port.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host(), self.port())
            .parse()
            .map_err(|_| ConfigError::BindAddress {
                host: self.host().to_owned(),
                port: self.port(),
            })
    }

    /// Load the session key.
    ///
    /// A missing file yields an ephemeral key in debug builds or when
    /// `allow_ephemeral_key` is set; sessions then do not survive restarts.
    pub fn session_key(&self) -> Result<Key, ConfigError> {
        let path = self.session_key_path();
        match std::fs::read(&path) {
            Ok(mut bytes) => {
                let length = bytes.len();
                if length < SESSION_KEY_MIN_LEN {
                    bytes.zeroize();
                    return Err(ConfigError::KeyTooShort {
                        path,
                        length,
                        min_len: SESSION_KEY_MIN_LEN,
                    });
                }
                let key = Key::derive_from(&bytes);
                bytes.zeroize();
                Ok(key)
            }
            Err(error) if cfg!(debug_assertions) || self.allow_ephemeral_key => {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "using temporary session key (dev only)"
                );
                Ok(Key::generate())
            }
            Err(error) => Err(ConfigError::KeyRead {
                path,
                source: error,
            }),
        }
    }
}

/// Truncated SHA-256 fingerprint of the key's signing material, safe to log.
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let digest = Sha256::digest(key.signing());
    hex::encode(&digest[..FINGERPRINT_BYTES])
}
