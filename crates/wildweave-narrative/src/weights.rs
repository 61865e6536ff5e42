//! Contextual weight blobs stored alongside each hint.
//!
//! Blobs are small JSON objects mapping a key to a number
//! (`{"spring": 1.2, "winter": 0.4}`). A blob may arrive as a JSON object
//! or as a string holding one. Missing keys, non-numeric values and
//! malformed blobs all read as a neutral 1.0.

use std::borrow::Cow;

use serde_json::{Map, Value};
use wildweave_types::{ResourceKind, ResourceLevels, Season, SunState, TimeCategory};

/// Neutral multiplier.
pub const NEUTRAL: f64 = 1.0;
/// Multiplier when a resource trigger is met.
pub const TRIGGER_MET: f64 = 1.2;
/// Multiplier when a resource trigger is not met.
pub const TRIGGER_UNMET: f64 = 0.8;

/// Interpret a blob as a JSON object, parsing string-encoded blobs.
fn as_object(blob: &Value) -> Option<Cow<'_, Map<String, Value>>> {
    match blob {
        Value::Object(map) => Some(Cow::Borrowed(map)),
        Value::String(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => Some(Cow::Owned(map)),
            Ok(_) => None,
            Err(err) => {
                tracing::debug!(error = %err, "Ignoring malformed weight blob");
                None
            }
        },
        _ => None,
    }
}

/// Numeric value for `key`, if present and finite.
pub fn lookup(blob: &Value, key: &str) -> Option<f64> {
    as_object(blob)?
        .get(key)
        .and_then(Value::as_f64)
        .filter(|value| value.is_finite())
}

/// Value for `key`, or neutral.
pub fn weight_for(blob: &Value, key: &str) -> f64 {
    lookup(blob, key).unwrap_or(NEUTRAL)
}

/// Seasonal multiplier for `season`.
pub fn seasonal(blob: &Value, season: Season) -> f64 {
    weight_for(blob, season.as_str())
}

/// Time-of-day multiplier.
///
/// The category name is looked up first (`morning`, `afternoon`,
/// `evening`, `night`), then the sun-state name (`dawn`, `day`, `dusk`,
/// `night`).
pub fn time_of_day(blob: &Value, category: TimeCategory, sun: SunState) -> f64 {
    lookup(blob, category.as_str())
        .or_else(|| lookup(blob, sun.as_str()))
        .unwrap_or(NEUTRAL)
}

/// Combined resource-trigger multiplier.
///
/// Each `{"kind": threshold}` entry multiplies by [`TRIGGER_MET`] when the
/// local level reaches the threshold and [`TRIGGER_UNMET`] otherwise.
/// Unknown kinds are ignored.
pub fn resource_triggers(blob: &Value, levels: &ResourceLevels) -> f64 {
    let Some(map) = as_object(blob) else {
        return NEUTRAL;
    };
    map.iter()
        .filter_map(|(name, threshold)| {
            let kind = ResourceKind::parse(name)?;
            let threshold = threshold.as_f64()?;
            Some(if f64::from(levels.get(kind)) >= threshold {
                TRIGGER_MET
            } else {
                TRIGGER_UNMET
            })
        })
        .product()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn reads_object_and_string_blobs() {
        let object = json!({"spring": 1.5, "winter": 0.25});
        let string = Value::String(r#"{"spring": 1.5}"#.to_owned());
        assert!((seasonal(&object, Season::Spring) - 1.5).abs() < f64::EPSILON);
        assert!((seasonal(&object, Season::Winter) - 0.25).abs() < f64::EPSILON);
        assert!((seasonal(&string, Season::Spring) - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_or_malformed_is_neutral() {
        let object = json!({"spring": "lots"});
        assert!((seasonal(&object, Season::Spring) - NEUTRAL).abs() < f64::EPSILON);
        assert!((seasonal(&object, Season::Autumn) - NEUTRAL).abs() < f64::EPSILON);
        let broken = Value::String("{spring: 1.5".to_owned());
        assert!((seasonal(&broken, Season::Spring) - NEUTRAL).abs() < f64::EPSILON);
        assert!((seasonal(&Value::Null, Season::Spring) - NEUTRAL).abs() < f64::EPSILON);
        assert!((seasonal(&json!([1, 2]), Season::Spring) - NEUTRAL).abs() < f64::EPSILON);
    }

    #[test]
    fn time_prefers_category_then_sun_state() {
        let blob = json!({"dusk": 0.5, "evening": 1.4});
        let got = time_of_day(&blob, TimeCategory::Evening, SunState::Set);
        assert!((got - 1.4).abs() < f64::EPSILON);
        let blob = json!({"dawn": 1.3});
        let got = time_of_day(&blob, TimeCategory::Morning, SunState::Rise);
        assert!((got - 1.3).abs() < f64::EPSILON);
    }

    #[test]
    fn triggers_boost_or_damp() {
        let mut levels = ResourceLevels::default();
        levels.set(ResourceKind::Water, 0.7);
        let met = json!({"water": 0.6});
        let unmet = json!({"water": 0.6, "vegetation": 0.5, "mana": 0.1});
        assert!((resource_triggers(&met, &levels) - TRIGGER_MET).abs() < 1e-12);
        assert!((resource_triggers(&unmet, &levels) - TRIGGER_MET * TRIGGER_UNMET).abs() < 1e-12);
        assert!((resource_triggers(&Value::Null, &levels) - NEUTRAL).abs() < f64::EPSILON);
    }
}
