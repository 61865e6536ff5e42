//! Semantic integration of selected hints into a base description.
//!
//! [`NarrativeElements::extract`] pulls a mood, a dynamic verb, a seasonal
//! image, a sensory sentence and a temporal sentence out of the selected
//! hints. Each found element adds to an integration weight; when the weight
//! clears the threshold, [`integrate`] rebuilds the description around the
//! base's opening sentence instead of appending hints at the end.

use std::sync::Arc;

use wildweave_types::{DescriptionStyle, HintCategory, HintId, RegionHint, RegionProfile, Season, TimeCategory};

use crate::base::finish;
use crate::style::{find_word, mentions_any_word, mentions_word, replace_word_ignore_case};

/// Integration weight below which hints are simply concatenated.
pub const SEMANTIC_THRESHOLD: f64 = 0.3;

const MOOD_WEIGHT: f64 = 0.3;
const VERB_WEIGHT: f64 = 0.2;
const IMAGERY_WEIGHT: f64 = 0.15;
const SENSORY_WEIGHT: f64 = 0.25;
const TEMPORAL_WEIGHT: f64 = 0.2;

/// Temporal hints longer than this become the opening sentence verbatim.
const VERBATIM_TEMPORAL_LEN: usize = 60;

const GENERIC_MOODS: &[&str] = &[
    "ethereal", "mysterious", "ancient", "peaceful", "serene", "ominous", "wild", "majestic",
    "tranquil", "eerie", "gentle",
];

const fn preferred_moods(style: DescriptionStyle) -> &'static [&'static str] {
    match style {
        DescriptionStyle::Poetic => &["ethereal", "serene", "luminous", "wistful"],
        DescriptionStyle::Mysterious => &["mysterious", "eerie", "ominous", "ethereal"],
        DescriptionStyle::Dramatic => &["majestic", "ominous", "wild", "ancient"],
        DescriptionStyle::Pastoral => &["peaceful", "serene", "gentle", "idyllic"],
        DescriptionStyle::Practical => &[],
    }
}

/// Dynamic verbs as (plural, third-person singular).
const VERBS: &[(&str, &str)] = &[
    ("whisper", "whispers"),
    ("shimmer", "shimmers"),
    ("sway", "sways"),
    ("rustle", "rustles"),
    ("murmur", "murmurs"),
    ("dance", "dances"),
    ("drift", "drifts"),
    ("glisten", "glistens"),
    ("echo", "echoes"),
];

/// Verbs a dynamic verb may be attached to, as (third-person, plural).
const ANCHORS: &[(&str, &str)] = &[
    ("towers", "tower"),
    ("rises", "rise"),
    ("stretches", "stretch"),
    ("spreads", "spread"),
    ("rolls", "roll"),
    ("stands", "stand"),
];

const fn seasonal_imagery(season: Season) -> &'static [&'static str] {
    match season {
        Season::Spring => &["blossom", "bud", "bloom", "fresh", "green"],
        Season::Summer => &["canopy", "verdant", "lush", "warm", "sunlit"],
        Season::Autumn => &["amber", "russet", "fallen", "golden", "harvest"],
        Season::Winter => &["frost", "snow", "ice", "bare", "pale"],
    }
}

const fn time_keywords(time: TimeCategory) -> &'static [&'static str] {
    match time {
        TimeCategory::Morning => &["dawn", "morning", "sunrise", "early"],
        TimeCategory::Afternoon => &["afternoon", "midday", "noon"],
        TimeCategory::Evening => &["dusk", "evening", "twilight", "sunset"],
        TimeCategory::Night => &["night", "moon", "star", "dark"],
    }
}

const fn temporal_prefix(time: TimeCategory) -> &'static str {
    match time {
        TimeCategory::Morning => "In the early light, ",
        TimeCategory::Afternoon => "Under the afternoon sky, ",
        TimeCategory::Evening => "As evening settles, ",
        TimeCategory::Night => "Beneath the night sky, ",
    }
}

fn mood_transformations(mood: &str) -> &'static [(&'static str, &'static str)] {
    match mood {
        "ethereal" | "luminous" | "wistful" => &[
            ("dense", "moss-draped"),
            ("thick", "silent"),
            ("towering", "spectral"),
        ],
        "mysterious" => &[("dense", "shadow-laden"), ("tall", "looming"), ("quiet", "hushed")],
        "ominous" | "eerie" => &[("dense", "oppressive"), ("tall", "brooding"), ("quiet", "unnerving")],
        "peaceful" | "serene" | "tranquil" | "gentle" | "idyllic" => &[
            ("dense", "sheltering"),
            ("wild", "gentle"),
            ("harsh", "soft"),
        ],
        "majestic" | "ancient" => &[("tall", "stately"), ("old", "venerable"), ("large", "grand")],
        "wild" => &[("quiet", "restless"), ("gentle", "untamed")],
        _ => &[],
    }
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// A dynamic verb in both agreement forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DynamicVerb {
    /// Form agreeing with a plural subject.
    pub plural: &'static str,
    /// Form agreeing with a singular subject.
    pub singular: &'static str,
}

/// Elements pulled out of the selected hints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NarrativeElements {
    /// Dominant mood word.
    pub mood: Option<String>,
    /// Dynamic verb to attach to the opening sentence.
    pub verb: Option<DynamicVerb>,
    /// Seasonal image and the hint carrying it.
    pub imagery: Option<(&'static str, HintId)>,
    /// Sensory sentence and its hint.
    pub sensory: Option<(String, HintId)>,
    /// Temporal sentence and its hint.
    pub temporal: Option<(String, HintId)>,
    /// Cumulative integration weight.
    pub weight: f64,
}

impl NarrativeElements {
    /// Extract elements from `hints` for the given profile and moment.
    pub fn extract(
        hints: &[Arc<RegionHint>],
        profile: &RegionProfile,
        season: Season,
        time: TimeCategory,
    ) -> Self {
        let lowered: Vec<(String, &RegionHint)> = hints
            .iter()
            .map(|hint| (hint.text.to_lowercase(), hint.as_ref()))
            .collect();
        let mut elements = Self::default();

        let find_in_hints = |words: &[&str]| {
            words
                .iter()
                .find(|word| lowered.iter().any(|(text, _)| find_word(text, word).is_some()))
                .map(|word| (*word).to_owned())
        };
        elements.mood = find_in_hints(preferred_moods(profile.style))
            .or_else(|| find_in_hints(GENERIC_MOODS))
            .or_else(|| {
                let mood = profile.dominant_mood.trim().to_lowercase();
                (!mood.is_empty()).then_some(mood)
            });
        if elements.mood.is_some() {
            elements.weight += MOOD_WEIGHT;
        }

        elements.verb = VERBS
            .iter()
            .find(|(plural, singular)| {
                lowered
                    .iter()
                    .any(|(text, _)| find_word(text, plural).is_some() || find_word(text, singular).is_some())
            })
            .map(|&(plural, singular)| DynamicVerb { plural, singular });
        if elements.verb.is_some() {
            elements.weight += VERB_WEIGHT;
        }

        elements.imagery = seasonal_imagery(season).iter().find_map(|word| {
            lowered
                .iter()
                .find(|(text, _)| mentions_word(text, word))
                .map(|(_, hint)| (*word, hint.id))
        });
        if elements.imagery.is_some() {
            elements.weight += IMAGERY_WEIGHT;
        }

        elements.sensory = hints
            .iter()
            .find(|hint| matches!(hint.category, HintCategory::Sounds | HintCategory::Scents))
            .map(|hint| (hint.text.clone(), hint.id));
        if elements.sensory.is_some() {
            elements.weight += SENSORY_WEIGHT;
        }

        let keywords = time_keywords(time);
        let mentions_time = |text: &str| mentions_any_word(text, keywords);
        elements.temporal = lowered
            .iter()
            .find(|(text, hint)| hint.category == HintCategory::TimeOfDay && mentions_time(text))
            .or_else(|| lowered.iter().find(|(text, _)| mentions_time(text)))
            .filter(|(_, hint)| elements.sensory.as_ref().is_none_or(|(_, id)| *id != hint.id))
            .map(|(_, hint)| (hint.text.clone(), hint.id));
        if elements.temporal.is_some() {
            elements.weight += TEMPORAL_WEIGHT;
        }

        elements
    }

    /// Whether there is enough signal for semantic integration.
    pub fn is_sufficient(&self, threshold: f64) -> bool {
        self.weight >= threshold
    }

    fn consumed(&self, id: HintId) -> bool {
        self.sensory.as_ref().is_some_and(|(_, used)| *used == id)
            || self.temporal.as_ref().is_some_and(|(_, used)| *used == id)
    }
}

// ---------------------------------------------------------------------------
// Reconstruction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SentenceContext {
    Temporal,
    Spatial,
    Weather,
    Sensory,
}

fn classify(sentence: &str) -> SentenceContext {
    let lower = sentence.to_lowercase();
    let any = |words: &[&str]| mentions_any_word(&lower, words);
    if any(&["dawn", "dusk", "night", "morning", "evening", "twilight", "moment"]) {
        SentenceContext::Temporal
    } else if any(&["nearby", "distance", "above", "below", "beyond", "around", "across"]) {
        SentenceContext::Spatial
    } else if any(&["wind", "rain", "breeze", "mist", "storm"]) {
        SentenceContext::Weather
    } else {
        SentenceContext::Sensory
    }
}

/// Phrase introducing a sensory sentence.
fn transition(style: DescriptionStyle, sentence: &str) -> &'static str {
    use SentenceContext::{Sensory, Spatial, Temporal, Weather};
    match (style, classify(sentence)) {
        (DescriptionStyle::Poetic, Temporal) => "As the hours turn, ",
        (DescriptionStyle::Poetic, Spatial) => "All around, ",
        (DescriptionStyle::Poetic, Weather) => "Upon the breeze, ",
        (DescriptionStyle::Poetic, Sensory) => "Softly, ",
        (DescriptionStyle::Mysterious, Temporal) => "In the stillness that follows, ",
        (DescriptionStyle::Mysterious, Spatial) => "Somewhere unseen, ",
        (DescriptionStyle::Mysterious, Weather) => "Through the shifting air, ",
        (DescriptionStyle::Mysterious, Sensory) => "Faintly, ",
        (DescriptionStyle::Dramatic, Temporal) => "Then, ",
        (DescriptionStyle::Dramatic, Spatial) => "From every side, ",
        (DescriptionStyle::Dramatic, Weather) => "On the rising wind, ",
        (DescriptionStyle::Dramatic, Sensory) => "Suddenly, ",
        (DescriptionStyle::Pastoral, Temporal) => "As the day wears on, ",
        (DescriptionStyle::Pastoral, Spatial) => "Close by, ",
        (DescriptionStyle::Pastoral, Weather) => "On the gentle air, ",
        (DescriptionStyle::Pastoral, Sensory) => "Here and there, ",
        (DescriptionStyle::Practical, Temporal) => "Meanwhile, ",
        (DescriptionStyle::Practical, Spatial) => "Nearby, ",
        (DescriptionStyle::Practical, Weather) => "In the air, ",
        (DescriptionStyle::Practical, Sensory) => "Also, ",
    }
}

/// Split off the first sentence, terminator included.
pub fn split_opening(text: &str) -> (&str, &str) {
    text.find(['.', '!', '?']).map_or((text.trim(), ""), |end| {
        let cut = end.saturating_add(1);
        (
            text.get(..cut).unwrap_or(text).trim(),
            text.get(cut..).unwrap_or_default().trim(),
        )
    })
}

fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        // Keep acronyms and the pronoun "I" intact.
        if chars.clone().next().is_some_and(char::is_uppercase) || (first == 'I' && text.get(1..2) == Some(" ")) {
            text.to_owned()
        } else {
            first.to_lowercase().chain(chars).collect()
        }
    })
}

fn sentence(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.ends_with(['.', '!', '?']) {
        trimmed.to_owned()
    } else {
        format!("{trimmed}.")
    }
}

/// Apply the mood's substitutions to `text`.
pub fn transform_mood(text: &str, mood: &str) -> String {
    mood_transformations(mood)
        .iter()
        .fold(text.to_owned(), |acc, (from, to)| {
            replace_word_ignore_case(&acc, from, to).unwrap_or(acc)
        })
}

/// Attach `verb` after the first anchor verb in `text`.
pub fn inject_verb(text: &str, verb: DynamicVerb) -> Option<String> {
    ANCHORS.iter().find_map(|(singular, plural)| {
        let (anchor, form) = match find_word(text, singular) {
            Some(at) => ((at, *singular), verb.singular),
            None => (find_word(text, plural).map(|at| (at, *plural))?, verb.plural),
        };
        let end = anchor.0.saturating_add(anchor.1.len());
        Some(format!(
            "{} and {form}{}",
            text.get(..end).unwrap_or_default(),
            text.get(end..).unwrap_or_default()
        ))
    })
}

/// Collapse doubled punctuation and spacing.
pub fn clean(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        let previous = out.chars().next_back();
        match (previous, c) {
            (Some(' '), ' ') | (Some('.'), '.') => {}
            (Some(' '), '.' | ',') => {
                out.pop();
                if !out.ends_with(['.', ',']) {
                    out.push(c);
                }
            }
            (Some(','), '.') => {
                out.pop();
                out.push('.');
            }
            _ => out.push(c),
        }
    }
    out
}

/// Rebuild `base` around the extracted elements.
///
/// `hints` are every selected hint, in selection order; the ones not
/// consumed as sensory or temporal sentences are appended, the imagery
/// hint first.
pub fn integrate(
    base: &str,
    hints: &[Arc<RegionHint>],
    elements: &NarrativeElements,
    profile: &RegionProfile,
    time: TimeCategory,
) -> String {
    let (opening, rest) = split_opening(base.trim());
    let mut opening = elements
        .mood
        .as_deref()
        .map_or_else(|| opening.to_owned(), |mood| transform_mood(opening, mood));
    if let Some(verb) = elements.verb
        && let Some(injected) = inject_verb(&opening, verb)
    {
        opening = injected;
    }

    let mut parts: Vec<String> = Vec::new();
    match &elements.temporal {
        Some((text, _)) if text.len() > VERBATIM_TEMPORAL_LEN => {
            parts.push(sentence(text));
            parts.push(opening);
        }
        Some(_) => parts.push(format!("{}{}", temporal_prefix(time), lowercase_first(&opening))),
        None => parts.push(opening),
    }
    if !rest.is_empty() {
        parts.push(rest.to_owned());
    }
    if let Some((text, _)) = &elements.sensory {
        parts.push(format!(
            "{}{}",
            transition(profile.style, text),
            lowercase_first(&sentence(text))
        ));
    }

    let imagery_first = elements.imagery.map(|(_, id)| id);
    let remaining = hints
        .iter()
        .filter(|hint| Some(hint.id) == imagery_first)
        .chain(hints.iter().filter(|hint| Some(hint.id) != imagery_first))
        .filter(|hint| !elements.consumed(hint.id));
    for hint in remaining {
        parts.push(sentence(&hint.text));
    }

    finish(clean(&parts.join(" ")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::DateTime;
    use wildweave_types::RegionId;

    use super::*;

    fn hint(id: i64, category: HintCategory, text: &str) -> Arc<RegionHint> {
        Arc::new(RegionHint {
            id: HintId::new(id),
            region: RegionId::new(1),
            category,
            text: text.to_owned(),
            priority: 1,
            weather_conditions: String::new(),
            seasonal_weights: serde_json::Value::Null,
            time_weights: serde_json::Value::Null,
            resource_triggers: serde_json::Value::Null,
            created_at: DateTime::from_timestamp(0, 0).unwrap(),
            active: true,
        })
    }

    fn profile(style: DescriptionStyle, mood: &str) -> RegionProfile {
        RegionProfile {
            style,
            dominant_mood: mood.to_owned(),
            ..RegionProfile::neutral(RegionId::new(1))
        }
    }

    #[test]
    fn elements_accumulate_weight() {
        let hints = vec![
            hint(1, HintCategory::Atmosphere, "An ethereal hush settles over the glade."),
            hint(2, HintCategory::Flora, "Ferns whisper against fresh blossom."),
            hint(3, HintCategory::Sounds, "A thrush sings nearby."),
            hint(4, HintCategory::TimeOfDay, "Dawn mist lifts slowly."),
        ];
        let elements = NarrativeElements::extract(
            &hints,
            &profile(DescriptionStyle::Poetic, ""),
            Season::Spring,
            TimeCategory::Morning,
        );
        assert_eq!(elements.mood.as_deref(), Some("ethereal"));
        assert_eq!(
            elements.verb,
            Some(DynamicVerb {
                plural: "whisper",
                singular: "whispers"
            })
        );
        assert_eq!(elements.imagery, Some(("blossom", HintId::new(2))));
        assert_eq!(elements.sensory, Some(("A thrush sings nearby.".to_owned(), HintId::new(3))));
        assert_eq!(elements.temporal, Some(("Dawn mist lifts slowly.".to_owned(), HintId::new(4))));
        assert!((elements.weight - 1.1).abs() < 1e-9);
        assert!(elements.is_sufficient(SEMANTIC_THRESHOLD));
    }

    #[test]
    fn profile_mood_is_the_last_resort() {
        let hints = vec![hint(1, HintCategory::Geography, "Boulders litter the slope.")];
        let elements = NarrativeElements::extract(
            &hints,
            &profile(DescriptionStyle::Practical, "Brooding"),
            Season::Summer,
            TimeCategory::Afternoon,
        );
        assert_eq!(elements.mood.as_deref(), Some("brooding"));
        assert!((elements.weight - MOOD_WEIGHT).abs() < 1e-9);
    }

    #[test]
    fn verb_attaches_to_anchor_in_agreement() {
        let verb = DynamicVerb {
            plural: "whisper",
            singular: "whispers",
        };
        assert_eq!(
            inject_verb("Tall oaks tower overhead.", verb).as_deref(),
            Some("Tall oaks tower and whisper overhead.")
        );
        assert_eq!(
            inject_verb("A lone pine stands on the ridge.", verb).as_deref(),
            Some("A lone pine stands and whispers on the ridge.")
        );
        assert!(inject_verb("Grass covers the plain.", verb).is_none());
    }

    #[test]
    fn ethereal_mood_softens_dense_forest() {
        assert_eq!(
            transform_mood("A dense forest of thick oaks.", "ethereal"),
            "A moss-draped forest of silent oaks."
        );
        assert_eq!(transform_mood("A dense forest.", "unknown"), "A dense forest.");
        assert_eq!(transform_mood("Dense oaks.", "ominous"), "Oppressive oaks.");
        assert_eq!(transform_mood("Tall pines, tall firs.", "majestic"), "Stately pines, tall firs.");
    }

    #[test]
    fn keywords_match_whole_words_only() {
        let hints = vec![
            hint(1, HintCategory::Geography, "A voice carries from the far bank, nearly lost."),
            hint(2, HintCategory::Geography, "Hikers start up the trail."),
        ];
        let practical = profile(DescriptionStyle::Practical, "");
        let winter = NarrativeElements::extract(&hints, &practical, Season::Winter, TimeCategory::Morning);
        assert_eq!(winter.imagery, None);
        assert_eq!(winter.temporal, None);

        let night = NarrativeElements::extract(&hints, &practical, Season::Winter, TimeCategory::Night);
        assert_eq!(night.temporal, None);

        let stars = vec![hint(3, HintCategory::Geography, "Stars wheel over the ice.")];
        let night = NarrativeElements::extract(&stars, &practical, Season::Winter, TimeCategory::Night);
        assert_eq!(night.imagery, Some(("ice", HintId::new(3))));
        assert_eq!(night.temporal.map(|(_, id)| id), Some(HintId::new(3)));
    }

    #[test]
    fn transitions_ignore_keywords_inside_words() {
        assert_eq!(classify("The terrain rises in winding folds."), SentenceContext::Sensory);
        assert_eq!(classify("Rain ticks on the leaves."), SentenceContext::Weather);
    }

    #[test]
    fn cleanup_collapses_doubles() {
        assert_eq!(clean("Mist rises..  Birds call ."), "Mist rises. Birds call.");
        assert_eq!(clean("Quiet ,  still,."), "Quiet, still.");
    }

    #[test]
    fn integration_rebuilds_around_the_opening() {
        let hints = vec![
            hint(1, HintCategory::Atmosphere, "An ethereal hush settles."),
            hint(2, HintCategory::Sounds, "A thrush sings"),
        ];
        let profile = profile(DescriptionStyle::Pastoral, "");
        let elements =
            NarrativeElements::extract(&hints, &profile, Season::Autumn, TimeCategory::Night);
        let text = integrate(
            "Dense oaks stand close together. A stream runs west.\r\n",
            &hints,
            &elements,
            &profile,
            TimeCategory::Night,
        );
        assert_eq!(
            text,
            "Moss-draped oaks stand close together. A stream runs west. Here and there, a thrush sings. \
             An ethereal hush settles.\r\n"
        );
    }

    #[test]
    fn temporal_prefix_or_verbatim_opening() {
        let short = vec![hint(1, HintCategory::TimeOfDay, "The night is cool.")];
        let profile = profile(DescriptionStyle::Practical, "");
        let elements = NarrativeElements::extract(&short, &profile, Season::Winter, TimeCategory::Night);
        let text = integrate("Snow blankets the field.", &short, &elements, &profile, TimeCategory::Night);
        assert_eq!(text, "Beneath the night sky, snow blankets the field.\r\n");

        let long_text = "Night has settled completely, and only the faint starlight marks the path ahead.";
        let long = vec![hint(2, HintCategory::TimeOfDay, long_text)];
        let elements = NarrativeElements::extract(&long, &profile, Season::Winter, TimeCategory::Night);
        let text = integrate("Snow blankets the field.", &long, &elements, &profile, TimeCategory::Night);
        assert_eq!(text, format!("{long_text} Snow blankets the field.\r\n"));
    }
}
