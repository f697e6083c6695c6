//! Run-level error taxonomy.
//!
//! Malformed individual chat fields are recovered locally inside the
//! aggregators and never surface here; everything in this enum aborts the
//! run with a descriptive message.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PodiumError {
    /// Building the HTTP client failed (TLS setup, header map).
    #[error("failed to build the habitica client: {0}")]
    Client(#[source] reqwest::Error),

    /// A credential contains bytes that cannot form an HTTP header value.
    #[error("api credential is not a valid header value")]
    InvalidCredentialHeader,

    #[error("failed to fetch party data: {0}")]
    Fetch(#[source] reqwest::Error),

    #[error("failed to update the group description: {0}")]
    Update(#[source] reqwest::Error),

    /// The party returned no chat messages at all.
    #[error("no chat messages found")]
    NoChatMessages,

    /// No boss damage activity inside the window; nothing to rank.
    #[error("no boss damage messages found in the last {days} days")]
    NoRecentDamage { days: u32 },

    /// The group record is unusable: id or description absent or empty.
    #[error("could not find group id or description")]
    MissingGroupRecord,

    /// A skill cast count failed integer coercion. Unlike the damage
    /// fields this aborts the run: a silently dropped count would corrupt
    /// the cast ranking.
    #[error("non-numeric cast count {value} for {actor}")]
    InvalidCastCount { actor: String, value: String },

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// No usable credentials after merging file and environment.
    #[error("missing habitica credentials (set HABITICA_USER_ID and HABITICA_API_TOKEN)")]
    MissingCredentials,
}
