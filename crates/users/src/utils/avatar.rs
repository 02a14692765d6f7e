//! Default avatar colours.

const PALETTE: [&str; 10] = [
    "#667eea", "#f093fb", "#4facfe", "#fa709a", "#30cfd0", "#e86ba7", "#4ecc5e", "#f7971e",
    "#43e97b", "#6a11cb",
];

/// Pick a palette colour from a seed string.
///
/// Each character contributes its leading UTF-16 code unit, so characters outside
/// the basic plane count only their high surrogate, as the browser client does.
pub fn color_for(seed: &str) -> String {
    let sum: u64 = seed
        .chars()
        .map(|c| u64::from(c.encode_utf16(&mut [0; 2])[0]))
        .sum();
    PALETTE[(sum % PALETTE.len() as u64) as usize].to_string()
}
