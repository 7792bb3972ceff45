use unicode_normalization::UnicodeNormalization;

/// Fold an answer into the form used for comparison: lowercase, decomposed,
/// combining diacritics (U+0300..=U+036F) removed, surrounding whitespace trimmed.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_diacritic(*c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Check whether an answer matches the expected word, ignoring case and accents
pub fn answers_match(answer: &str, expected: &str) -> bool {
    normalize(answer) == normalize(expected)
}

fn is_combining_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}
