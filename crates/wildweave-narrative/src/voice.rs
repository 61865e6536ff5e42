//! Second-person to observational voice normalization.
//!
//! Hints are authored freely and sometimes address the reader ("you
//! notice..."). Descriptions are written from an observer's distance, so
//! stored text is rewritten before it is cached.

/// Rewrite second-person phrasing into observational phrasing.
///
/// - "your footsteps" becomes "footsteps"
/// - "you have stepped" becomes "one steps"
/// - a sentence-initial "you " becomes "the area " (capitalized when it
///   opens the text or follows a full stop)
///
/// Mid-sentence pronouns are left for [`is_observational`] to report.
pub fn to_observational(text: &str) -> String {
    let mut out = replace_ignoring_case(text, "your footsteps", "footsteps");
    out = replace_ignoring_case(&out, "you have stepped", "one steps");
    rewrite_sentence_openers(&out)
}

/// Whether `text` is free of second-person words.
pub fn is_observational(text: &str) -> bool {
    !text
        .split(|c: char| !c.is_ascii_alphabetic() && c != '\'')
        .map(|word| word.trim_matches('\'').to_ascii_lowercase())
        .any(|word| matches!(word.as_str(), "you" | "your" | "yours" | "yourself" | "you're"))
}

fn replace_ignoring_case(text: &str, from: &str, to: &str) -> String {
    let lower = text.to_ascii_lowercase();
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    while let Some(found) = lower.get(cursor..).and_then(|rest| rest.find(from)) {
        let start = cursor.saturating_add(found);
        let original = text.get(start..).unwrap_or_default();
        out.push_str(text.get(cursor..start).unwrap_or_default());
        out.push_str(&match_case(original, to));
        cursor = start.saturating_add(from.len());
    }
    out.push_str(text.get(cursor..).unwrap_or_default());
    out
}

/// Capitalize `replacement` when `original` starts upper-case.
fn match_case(original: &str, replacement: &str) -> String {
    if original.starts_with(|c: char| c.is_ascii_uppercase()) {
        capitalize(replacement)
    } else {
        replacement.to_owned()
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

fn rewrite_sentence_openers(text: &str) -> String {
    let mut out = String::with_capacity(text.len().saturating_add(16));
    let mut at_sentence_start = true;
    let mut rest = text;
    while !rest.is_empty() {
        if at_sentence_start {
            let trimmed = rest.trim_start();
            out.push_str(rest.get(..rest.len().saturating_sub(trimmed.len())).unwrap_or_default());
            rest = trimmed;
            if let Some(head) = rest.get(..4)
                && head.eq_ignore_ascii_case("you ")
            {
                let capital = out.trim_end().is_empty() || out.trim_end().ends_with(['.', '!', '?']);
                out.push_str(if capital { "The area " } else { "the area " });
                rest = rest.get(4..).unwrap_or_default();
            }
            at_sentence_start = false;
            continue;
        }
        let Some(c) = rest.chars().next() else {
            break;
        };
        out.push(c);
        rest = rest.get(c.len_utf8()..).unwrap_or_default();
        if matches!(c, '.' | '!' | '?') {
            at_sentence_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footsteps_lose_the_pronoun() {
        assert_eq!(
            to_observational("Your footsteps echo in the hollow."),
            "Footsteps echo in the hollow."
        );
        assert_eq!(
            to_observational("The leaves muffle your footsteps."),
            "The leaves muffle footsteps."
        );
    }

    #[test]
    fn stepping_becomes_impersonal() {
        assert_eq!(
            to_observational("It feels as if you have stepped into another age."),
            "It feels as if one steps into another age."
        );
    }

    #[test]
    fn sentence_openers_are_rewritten() {
        assert_eq!(
            to_observational("You sense ancient magic. you hear water."),
            "The area sense ancient magic. The area hear water."
        );
        assert_eq!(to_observational("Quiet pines. Nothing stirs."), "Quiet pines. Nothing stirs.");
    }

    #[test]
    fn observational_check_finds_pronouns() {
        assert!(is_observational("Mist curls between the stones."));
        assert!(!is_observational("The wind tugs at your cloak."));
        assert!(!is_observational("Something watches you."));
        assert!(is_observational("Young saplings crowd the youthful glade."));
    }
}
