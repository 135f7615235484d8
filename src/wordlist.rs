/// Fixed rendering vocabulary for the dice and hybrid styles. Changing the
/// contents or order breaks every previously derived readable password.
pub const WORDS: [&str; 16] = [
    "iron", "echo", "raven", "void", "flux", "onyx", "neon", "drift", "sigma", "omega", "zero",
    "atlas", "cinder", "lumen", "vapor", "quartz",
];

pub const fn wordlist_size() -> u16 {
    WORDS.len() as u16
}
