use rand::Rng;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

const ADJECTIVES: &[&str] = &[
    "Live", "Stream", "Pro", "Neon", "Pixel", "Retro", "Cyber", "Glitch",
    "Arcade", "Night", "Byte", "Turbo", "Swift", "Sly", "Golden", "Silent",
];

const NOUNS: &[&str] = &[
    "Gamer", "Snake", "Slither", "Viper", "Serpent", "Cobra", "Runner", "Hunter",
    "Crawler", "Wizard", "Python", "Mamba", "Adder", "Racer", "Coil", "Fang",
];

/// Random base-36 identifier, 11 to 13 characters long.
pub fn generate_id() -> String {
    let mut rng = rand::rng();
    let len = rng.random_range(11..=13);
    (0..len)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

pub fn generate_player_name() -> String {
    let mut rng = rand::rng();
    let adjective = ADJECTIVES[rng.random_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.random_range(0..NOUNS.len())];
    let number: u32 = rng.random_range(1..100);
    format!("{}{}{}", adjective, noun, number)
}
