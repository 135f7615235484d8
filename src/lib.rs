pub mod kdf;
pub mod render;
pub mod request;
pub mod server;
pub mod session;
pub mod ui;
pub mod wordlist;

pub use kdf::{Pbkdf2Config, Salt, build_seed, derive_key};
pub use render::{render, strength_score};
pub use request::{DerivationRequest, Style};
pub use session::{Outcome, Session, SessionError};
pub use wordlist::{WORDS, wordlist_size};
