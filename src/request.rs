use anyhow::Result;

/// The fixed symbol set offered by the form.
pub const SYMBOLS: [char; 8] = ['!', '@', '#', '$', '%', '*', '~', '?'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    #[default]
    Hybrid,
    Crypto,
    Dice,
}

impl Style {
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Hybrid => "hybrid",
            Style::Crypto => "crypto",
            Style::Dice => "dice",
        }
    }
}

impl std::str::FromStr for Style {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "hybrid" => Ok(Style::Hybrid),
            "crypto" => Ok(Style::Crypto),
            "dice" => Ok(Style::Dice),
            other => anyhow::bail!("Unknown style \"{}\"", other),
        }
    }
}

/// Immutable snapshot of the form fields at the moment of generation.
#[derive(Debug, Clone)]
pub struct DerivationRequest {
    pub word: String,
    pub number: String,
    pub symbol: char,
    pub wild_word: String,
    pub style: Style,
}

impl DerivationRequest {
    pub fn new(
        word: String,
        number: String,
        symbol: char,
        wild_word: String,
        style: Style,
    ) -> Result<Self> {
        if !SYMBOLS.contains(&symbol) {
            anyhow::bail!(
                "Symbol \"{}\" is not in the allowed set: {}",
                symbol,
                SYMBOLS.iter().collect::<String>()
            );
        }

        Ok(Self {
            word,
            number,
            symbol,
            wild_word,
            style,
        })
    }
}
