use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use spideypass::kdf::{Pbkdf2Config, Salt};
use spideypass::request::{DerivationRequest, Style};
use spideypass::session::Session;
use spideypass::{server, ui};

#[derive(Parser)]
#[command(
    name = "spideypass",
    version,
    about = "Deterministic password derivation with a local browser demo"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Derive a password from the answer fields
    Derive {
        /// Memorable word
        #[arg(short, long)]
        word: String,

        /// Favorite number (optional)
        #[arg(short, long, default_value = "")]
        number: String,

        /// Symbol, one of: ! @ # $ % * ~ ?
        #[arg(short, long, default_value = "!")]
        symbol: char,

        /// Wild word (optional)
        #[arg(long, default_value = "")]
        wild_word: String,

        /// Rendering style
        #[arg(long, value_enum, default_value = "hybrid")]
        style: StyleArg,

        /// Reuse a previously shown salt (base64url) to regenerate
        #[arg(long)]
        salt: Option<String>,

        /// Print only the password
        #[arg(short, long)]
        quiet: bool,
    },
    /// Serve the browser demo from loopback
    Serve {
        /// Port to bind (0 picks an ephemeral port)
        #[arg(short, long, default_value = "0")]
        port: u16,

        /// Do not open a browser
        #[arg(long)]
        no_open: bool,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
enum StyleArg {
    Hybrid,
    Crypto,
    Dice,
}

impl From<StyleArg> for Style {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::Hybrid => Style::Hybrid,
            StyleArg::Crypto => Style::Crypto,
            StyleArg::Dice => Style::Dice,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Derive {
            word,
            number,
            symbol,
            wild_word,
            style,
            salt,
            quiet,
        } => {
            let request = DerivationRequest::new(word, number, symbol, wild_word, style.into())?;

            let options = ui::DisplayOptions {
                unicode_support: ui::detect_unicode_support(),
                color_support: ui::detect_color_support(),
                quiet,
            };

            let mut session = Session::new(Pbkdf2Config::DEFAULT);
            let regenerating = match salt {
                Some(encoded) => {
                    session.restore_salt(Salt::from_base64(&encoded)?);
                    true
                }
                None => false,
            };

            let (outcome, elapsed) = ui::show_progress(options.unicode_support, || {
                if regenerating {
                    session.regenerate(&request)
                } else {
                    session.generate(&request)
                }
                .map_err(anyhow::Error::from)
            })?;

            ui::display_output(&outcome, &request, &Pbkdf2Config::DEFAULT, elapsed, &options);
        }
        Command::Serve { port, no_open } => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::from_default_env()
                        .add_directive(tracing::Level::INFO.into()),
                )
                .init();

            server::run(port, !no_open).await?;
        }
    }

    Ok(())
}
