use anyhow::{Context, Result};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::request::DerivationRequest;

pub const OUTPUT_LEN: usize = 32;
pub const SALT_LEN: usize = 16;

#[derive(Debug, Clone, Copy)]
pub struct Pbkdf2Config {
    pub iterations: u32,
}

impl Pbkdf2Config {
    pub const DEFAULT: Self = Self {
        iterations: 150_000,
    };
}

/// 16-byte salt, shown to the user as unpadded base64url for reproducible
/// regeneration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Salt([u8; SALT_LEN]);

impl Salt {
    pub fn random() -> Result<Self> {
        let mut bytes = [0u8; SALT_LEN];
        getrandom::getrandom(&mut bytes)
            .map_err(|e| anyhow::anyhow!("Failed to gather salt entropy: {e}"))?;
        Ok(Self(bytes))
    }

    pub const fn from_bytes(bytes: [u8; SALT_LEN]) -> Self {
        Self(bytes)
    }

    pub fn from_base64(encoded: &str) -> Result<Self> {
        let decoded = URL_SAFE_NO_PAD
            .decode(encoded)
            .context("Salt is not valid base64url")?;
        let bytes: [u8; SALT_LEN] = decoded
            .try_into()
            .map_err(|v: Vec<u8>| anyhow::anyhow!("Salt must be {} bytes, got {}", SALT_LEN, v.len()))?;
        Ok(Self(bytes))
    }

    pub fn to_base64(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; SALT_LEN] {
        &self.0
    }
}

/// Pipe-joined seed in fixed field order. Empty optional fields stay as
/// empty segments so the field positions never shift.
pub fn build_seed(request: &DerivationRequest, salt_b64: &str) -> Zeroizing<String> {
    Zeroizing::new(format!(
        "{}|{}|{}|{}|{}|{}",
        request.word,
        request.number,
        request.symbol,
        request.wild_word,
        request.style.as_str(),
        salt_b64
    ))
}

pub fn derive_key(
    seed: &str,
    salt: &Salt,
    config: Pbkdf2Config,
) -> Result<Zeroizing<[u8; OUTPUT_LEN]>> {
    if config.iterations == 0 {
        anyhow::bail!("Iteration count cannot be zero");
    }

    let mut output = Zeroizing::new([0u8; OUTPUT_LEN]);
    pbkdf2_hmac::<Sha256>(
        seed.as_bytes(),
        salt.as_bytes(),
        config.iterations,
        &mut *output,
    );
    Ok(output)
}
