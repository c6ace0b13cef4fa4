//! Hint lookups against a "means like" word service.
//!
//! The gateway never fails: every error is logged and turned into a fixed
//! message the player can read.

use reqwest::blocking::Client;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

pub const HINT_UNAVAILABLE: &str = "Hint service unavailable. Try guessing!";
pub const HINT_NO_RESULTS: &str = "No related terms found. Try guessing!";

const REQUEST_TIMEOUT_SECS: u64 = 5;

pub trait HintGateway {
    /// One lookup for `word`, already turned into display text.
    fn fetch_hint(&self, word: &str) -> String;
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RelatedWord {
    pub word: String,
}

#[derive(Debug)]
pub enum HintError {
    Network(reqwest::Error),
    Status(reqwest::StatusCode),
    Decode(reqwest::Error),
}

impl fmt::Display for HintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(e) => write!(f, "request failed: {e}"),
            Self::Status(status) => write!(f, "unexpected status {status}"),
            Self::Decode(e) => write!(f, "malformed response: {e}"),
        }
    }
}

impl std::error::Error for HintError {}

/// Maps a lookup result to the text shown to the player.
pub fn format_hint(result: Result<Vec<RelatedWord>, HintError>) -> String {
    match result {
        Ok(related) if related.is_empty() => HINT_NO_RESULTS.to_string(),
        Ok(related) => {
            let words: Vec<&str> = related.iter().map(|r| r.word.as_str()).collect();
            format!("Related concepts: {}", words.join(", "))
        }
        Err(e) => {
            log::warn!("Hint lookup failed: {e}");
            HINT_UNAVAILABLE.to_string()
        }
    }
}

/// Datamuse-compatible lookup (`GET {endpoint}?ml=<word>&max=<n>`).
pub struct DatamuseHints {
    client: Client,
    endpoint: String,
    max_terms: usize,
}

impl DatamuseHints {
    /// Fails only if the HTTP client cannot be built (TLS backend or
    /// resolver setup).
    pub fn new(endpoint: impl Into<String>, max_terms: usize) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            max_terms,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn lookup(&self, word: &str) -> Result<Vec<RelatedWord>, HintError> {
        let max = self.max_terms.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("ml", word.to_lowercase().as_str()), ("max", max.as_str())])
            .send()
            .map_err(HintError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(HintError::Status(status));
        }

        let mut related: Vec<RelatedWord> = response.json().map_err(HintError::Decode)?;
        related.truncate(self.max_terms);
        Ok(related)
    }
}

impl HintGateway for DatamuseHints {
    fn fetch_hint(&self, word: &str) -> String {
        log::debug!("Requesting hint for a {}-letter word", word.len());
        format_hint(self.lookup(word))
    }
}

/// Gateway for offline play; every lookup reports the service as unavailable.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineHints;

impl HintGateway for OfflineHints {
    fn fetch_hint(&self, _word: &str) -> String {
        HINT_UNAVAILABLE.to_string()
    }
}
