//! Per-style vocabulary and trigger phrasing.

use wildweave_types::DescriptionStyle;

/// Profiles below this complexity keep their text unstyled.
pub const STYLE_COMPLEXITY_THRESHOLD: u8 = 3;

/// Replacement for the nouns `trees`, `forest` and `light`.
const fn vocabulary(style: DescriptionStyle) -> &'static [(&'static str, &'static str)] {
    match style {
        DescriptionStyle::Poetic => &[
            ("trees", "silvan sentinels"),
            ("forest", "woodland realm"),
            ("light", "luminous glow"),
        ],
        DescriptionStyle::Mysterious => &[
            ("trees", "shadowed shapes"),
            ("forest", "veiled woods"),
            ("light", "pale glimmer"),
        ],
        DescriptionStyle::Dramatic => &[
            ("trees", "towering giants"),
            ("forest", "primeval expanse"),
            ("light", "piercing radiance"),
        ],
        DescriptionStyle::Pastoral => &[
            ("trees", "gentle groves"),
            ("forest", "homely woods"),
            ("light", "warm daylight"),
        ],
        DescriptionStyle::Practical => &[],
    }
}

const fn trigger(style: DescriptionStyle) -> Option<(&'static str, &'static str)> {
    match style {
        DescriptionStyle::Dramatic => Some(("towers", "looms majestically")),
        DescriptionStyle::Poetic => Some(("flows", "flows gracefully")),
        DescriptionStyle::Mysterious => Some(("stands", "stands silently")),
        DescriptionStyle::Pastoral => Some(("grows", "grows contentedly")),
        DescriptionStyle::Practical => None,
    }
}

/// Byte offset of the first whole-word, case-sensitive match of `word`.
pub fn find_word(text: &str, word: &str) -> Option<usize> {
    let mut from = 0;
    while let Some(found) = text.get(from..).and_then(|rest| rest.find(word)) {
        let start = from.saturating_add(found);
        let end = start.saturating_add(word.len());
        let before = text.get(..start).and_then(|head| head.chars().next_back());
        let after = text.get(end..).and_then(|tail| tail.chars().next());
        let bounded = |c: Option<char>| c.is_none_or(|c| !c.is_alphanumeric());
        if bounded(before) && bounded(after) {
            return Some(start);
        }
        from = end;
    }
    None
}

/// Whether `text` holds `word` as a whole word, bare or with a plural
/// `s`/`es` ending. `text` and `word` are expected in the same case.
pub fn mentions_word(text: &str, word: &str) -> bool {
    ["", "s", "es"]
        .iter()
        .any(|ending| find_word(text, &format!("{word}{ending}")).is_some())
}

/// Whether `text` mentions any of `words` as whole words.
pub fn mentions_any_word(text: &str, words: &[&str]) -> bool {
    words.iter().any(|word| mentions_word(text, word))
}

/// Replace the first whole-word occurrence of `word`, ignoring ASCII case.
///
/// A capitalized match gets a capitalized replacement.
pub fn replace_word_ignore_case(text: &str, word: &str, replacement: &str) -> Option<String> {
    let start = find_word(&text.to_ascii_lowercase(), &word.to_ascii_lowercase())?;
    let end = start.saturating_add(word.len());
    let capitalized = text.get(start..).and_then(|tail| tail.chars().next()).is_some_and(char::is_uppercase);
    let replacement = if capitalized {
        let mut chars = replacement.chars();
        chars
            .next()
            .map_or_else(String::new, |first| first.to_uppercase().chain(chars).collect())
    } else {
        replacement.to_owned()
    };
    Some(format!(
        "{}{replacement}{}",
        text.get(..start).unwrap_or_default(),
        text.get(end..).unwrap_or_default()
    ))
}

/// Replace the first whole-word occurrence of `word`.
pub fn replace_word(text: &str, word: &str, replacement: &str) -> Option<String> {
    let start = find_word(text, word)?;
    let end = start.saturating_add(word.len());
    Some(format!(
        "{}{replacement}{}",
        text.get(..start).unwrap_or_default(),
        text.get(end..).unwrap_or_default()
    ))
}

/// Apply a style's vocabulary and trigger phrase.
///
/// Text is returned unchanged when `complexity` is below
/// `threshold`.
pub fn apply_style(text: &str, style: DescriptionStyle, complexity: u8, threshold: u8) -> String {
    if complexity < threshold {
        return text.to_owned();
    }
    let mut out = text.to_owned();
    for (word, replacement) in vocabulary(style) {
        if let Some(styled) = replace_word(&out, word, replacement) {
            out = styled;
        }
    }
    if let Some((word, replacement)) = trigger(style)
        && let Some(styled) = replace_word(&out, word, replacement)
    {
        out = styled;
    }
    out
}
