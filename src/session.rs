use thiserror::Error;

use crate::kdf::{self, Pbkdf2Config, Salt};
use crate::render;
use crate::request::DerivationRequest;

/// User-facing failures at the interaction boundary. None of these are
/// fatal; the session state is left unchanged.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Generate first to get a salt")]
    MissingSalt,
    #[error("Nothing generated yet")]
    NothingGenerated,
    #[error(transparent)]
    Derivation(#[from] anyhow::Error),
}

/// The result of one completed derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub password: String,
    pub salt_b64: String,
    pub strength: u8,
}

/// Per-session state: the current salt, the last rendered password, and a
/// request sequence counter. Overwritten on each generation, never merged.
pub struct Session {
    config: Pbkdf2Config,
    salt: Option<Salt>,
    rendered: Option<String>,
    seq: u64,
}

impl Session {
    pub fn new(config: Pbkdf2Config) -> Self {
        Self {
            config,
            salt: None,
            rendered: None,
            seq: 0,
        }
    }

    /// Derive with a fresh random salt. Always draws new salt bytes, even
    /// when the fields are unchanged; salt freshness is the point of
    /// Generate, not a caching opportunity.
    pub fn generate(&mut self, request: &DerivationRequest) -> Result<Outcome, SessionError> {
        let salt = Salt::random()?;
        let outcome = self.derive_with(request, &salt)?;
        self.salt = Some(salt);
        self.rendered = Some(outcome.password.clone());
        Ok(outcome)
    }

    /// Rerun the derivation with the session's existing salt and the
    /// current field values. Reproduces the previous password exactly when
    /// the fields have not changed.
    pub fn regenerate(&mut self, request: &DerivationRequest) -> Result<Outcome, SessionError> {
        let salt = self.salt.clone().ok_or(SessionError::MissingSalt)?;
        let outcome = self.derive_with(request, &salt)?;
        self.rendered = Some(outcome.password.clone());
        Ok(outcome)
    }

    /// Seed the session with a previously shown salt so a later
    /// `regenerate` reproduces an earlier result.
    pub fn restore_salt(&mut self, salt: Salt) {
        self.salt = Some(salt);
    }

    pub fn salt(&self) -> Option<&Salt> {
        self.salt.as_ref()
    }

    pub fn rendered(&self) -> Option<&str> {
        self.rendered.as_deref()
    }

    /// The last rendered password, or the error shown when copy/export is
    /// attempted before anything was generated.
    pub fn exportable(&self) -> Result<&str, SessionError> {
        self.rendered.as_deref().ok_or(SessionError::NothingGenerated)
    }

    /// Hand out the sequence number for a new in-flight derivation. Only
    /// the most recently begun request may apply its result.
    pub fn begin(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    /// Store a completed derivation's result, unless a newer request has
    /// begun since. Stale results are discarded and the prior rendered
    /// password stays in place.
    pub fn apply(&mut self, seq: u64, salt: Salt, outcome: &Outcome) -> bool {
        if seq != self.seq {
            return false;
        }
        self.salt = Some(salt);
        self.rendered = Some(outcome.password.clone());
        true
    }

    fn derive_with(
        &self,
        request: &DerivationRequest,
        salt: &Salt,
    ) -> Result<Outcome, SessionError> {
        let salt_b64 = salt.to_base64();
        let seed = kdf::build_seed(request, &salt_b64);
        let key = kdf::derive_key(&seed, salt, self.config)?;
        let password = render::render(&key, request.style, request.symbol);
        let strength = render::strength_score(&password);
        Ok(Outcome {
            password,
            salt_b64,
            strength,
        })
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Pbkdf2Config::DEFAULT)
    }
}
