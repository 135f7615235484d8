use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::kdf::OUTPUT_LEN;
use crate::request::Style;
use crate::wordlist::{WORDS, wordlist_size};

pub const DICE_WORD_COUNT: usize = 6;

const CRYPTO_HEAD_LEN: usize = 28;
const CRYPTO_TAIL_END: usize = 48;
const HYBRID_TAIL_LEN: usize = 12;

/// Format the derived key according to the chosen style. Pure function:
/// same key, style and symbol always produce the same string.
pub fn render(key: &[u8; OUTPUT_LEN], style: Style, symbol: char) -> String {
    match style {
        Style::Dice => render_dice(key),
        Style::Crypto => render_crypto(key, symbol),
        Style::Hybrid => render_hybrid(key, symbol),
    }
}

/// Consecutive 2-byte big-endian groups, each reduced modulo the wordlist
/// size, joined with hyphens. The readable rendering.
fn render_dice(key: &[u8; OUTPUT_LEN]) -> String {
    let words: Vec<&str> = key
        .chunks_exact(2)
        .take(DICE_WORD_COUNT)
        .map(|pair| {
            let group = u16::from_be_bytes([pair[0], pair[1]]);
            WORDS[(group % wordlist_size()) as usize]
        })
        .collect();
    words.join("-")
}

/// Head of the base64url encoding, the symbol, then the remaining tail up
/// to character 48. A 32-byte key encodes to 43 characters, so the tail
/// holds 15 and the symbol lands at index 28.
fn render_crypto(key: &[u8; OUTPUT_LEN], symbol: char) -> String {
    let raw = URL_SAFE_NO_PAD.encode(key);
    let tail_end = raw.len().min(CRYPTO_TAIL_END);
    format!(
        "{}{}{}",
        &raw[..CRYPTO_HEAD_LEN],
        symbol,
        &raw[CRYPTO_HEAD_LEN..tail_end]
    )
}

/// Readable words plus the symbol plus a short base64url suffix.
fn render_hybrid(key: &[u8; OUTPUT_LEN], symbol: char) -> String {
    let raw = URL_SAFE_NO_PAD.encode(key);
    format!("{}{}{}", render_dice(key), symbol, &raw[..HYBRID_TAIL_LEN])
}

/// Cosmetic strength heuristic driving the visual meter. Indicative only,
/// not an entropy estimate.
pub fn strength_score(password: &str) -> u8 {
    use std::collections::HashSet;

    let unique = password.chars().collect::<HashSet<_>>().len();
    let length = password.chars().count();
    (unique * 4 + length * 3).min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kdf::{self, Pbkdf2Config, Salt};
    use crate::request::DerivationRequest;

    fn fixed_salt() -> Salt {
        Salt::from_bytes([0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15])
    }

    fn derive_scenario(number: &str, wild_word: &str, style: Style) -> [u8; 32] {
        let request = DerivationRequest::new(
            "midnight-fox".to_string(),
            number.to_string(),
            '!',
            wild_word.to_string(),
            style,
        )
        .unwrap();
        let salt = fixed_salt();
        let seed = kdf::build_seed(&request, &salt.to_base64());
        *kdf::derive_key(&seed, &salt, Pbkdf2Config::DEFAULT).unwrap()
    }

    #[test]
    fn test_render_deterministic() {
        let key = [42u8; 32];
        for style in [Style::Hybrid, Style::Crypto, Style::Dice] {
            assert_eq!(render(&key, style, '!'), render(&key, style, '!'));
        }
    }

    #[test]
    fn test_dice_word_count_and_shape() {
        let key = [0u8; 32];
        let rendered = render(&key, Style::Dice, '!');
        assert_eq!(rendered.split('-').count(), DICE_WORD_COUNT);
        assert_eq!(rendered, "iron-iron-iron-iron-iron-iron");
    }

    #[test]
    fn test_dice_group_reduction() {
        // 0x0100 = 256 ≡ 0 (mod 16), 0x0011 = 17 ≡ 1 (mod 16)
        let mut key = [0u8; 32];
        key[0] = 0x01;
        key[3] = 0x11;
        let rendered = render(&key, Style::Dice, '!');
        assert!(rendered.starts_with("iron-echo-"));
    }

    #[test]
    fn test_crypto_shape() {
        let key = [42u8; 32];
        let rendered = render(&key, Style::Crypto, '#');
        assert_eq!(rendered.len(), 44);
        assert_eq!(rendered.chars().nth(28), Some('#'));
        assert_eq!(rendered.matches('#').count(), 1);
    }

    #[test]
    fn test_hybrid_shape() {
        let key = [42u8; 32];
        let dice_len = render(&key, Style::Dice, '!').len();
        let rendered = render(&key, Style::Hybrid, '!');
        assert_eq!(rendered.len(), dice_len + 1 + 12);
    }

    #[test]
    fn test_strength_score_empty() {
        assert_eq!(strength_score(""), 0);
    }

    #[test]
    fn test_strength_score_formula() {
        // 2 unique chars * 4 + 2 length * 3
        assert_eq!(strength_score("ab"), 14);
        // 1 unique char * 4 + 3 length * 3
        assert_eq!(strength_score("aaa"), 13);
    }

    #[test]
    fn test_strength_score_caps_at_100() {
        assert_eq!(
            strength_score("sigma-sigma-neon-omega-cinder-atlas!a5jriFnWWGmT"),
            100
        );
    }

    #[test]
    fn test_regression_hybrid() {
        let key = derive_scenario("7", "echo", Style::Hybrid);
        assert_eq!(
            render(&key, Style::Hybrid, '!'),
            "sigma-sigma-neon-omega-cinder-atlas!a5jriFnWWGmT"
        );
    }

    #[test]
    fn test_regression_crypto() {
        let key = derive_scenario("7", "echo", Style::Crypto);
        let rendered = render(&key, Style::Crypto, '!');
        assert_eq!(rendered, "dL8bBLIdiLYxASXK6mPcrGtHMfuS!4Wl_np-rBZeMa8I");
        assert_eq!(rendered.len(), 44);
        assert_eq!(rendered.find('!'), Some(28));
    }

    #[test]
    fn test_regression_dice_empty_optionals() {
        let key = derive_scenario("", "", Style::Dice);
        let rendered = render(&key, Style::Dice, '!');
        assert_eq!(rendered, "vapor-void-void-onyx-onyx-flux");
        assert!(!rendered.is_empty());
    }
}
