//! Operator-facing resource surveys and ASCII abundance maps.

use serde::Serialize;
use wildweave_types::{Coord, ResourceKind, ResourceLevels, SectorType};

use crate::fields::EnvironmentFields;
use crate::resource::config;
use crate::sampler::{Moment, ResourceSampler};

/// Smallest accepted map radius.
pub const MIN_MAP_RADIUS: i32 = 3;
/// Largest accepted map radius.
pub const MAX_MAP_RADIUS: i32 = 15;
/// Radius used when the requested one is out of range.
pub const DEFAULT_MAP_RADIUS: i32 = 7;

/// Levels at or below this are left out of the survey listing.
const SURVEY_FLOOR: f32 = 0.05;

const RULE: &str = "========================================";

/// Word describing an abundance level.
pub fn abundance_word(level: f32) -> &'static str {
    if level >= 0.9 {
        "incredibly abundant"
    } else if level >= 0.8 {
        "very abundant"
    } else if level >= 0.6 {
        "abundant"
    } else if level >= 0.4 {
        "moderate"
    } else if level >= 0.2 {
        "scarce"
    } else if level >= 0.1 {
        "very scarce"
    } else {
        "depleted"
    }
}

/// Map glyph for an abundance level.
pub fn map_symbol(level: f32) -> char {
    if level >= 0.8 {
        '#'
    } else if level >= 0.6 {
        '*'
    } else if level >= 0.4 {
        '+'
    } else if level >= 0.2 {
        '.'
    } else if level >= 0.05 {
        '_'
    } else {
        ' '
    }
}

/// Clamp a requested radius, replacing out-of-range values with the
/// default.
pub const fn effective_radius(requested: i32) -> i32 {
    if requested < MIN_MAP_RADIUS || requested > MAX_MAP_RADIUS {
        DEFAULT_MAP_RADIUS
    } else {
        requested
    }
}

/// Structured result of a point survey.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Survey {
    /// Surveyed coordinate.
    pub at: Coord,
    /// Terrain classification.
    pub sector: SectorType,
    /// Raw elevation.
    pub elevation: u8,
    /// Elevation relative to sea level.
    pub elevation_meters: f32,
    /// Every level, depletion applied.
    pub levels: ResourceLevels,
    /// Ecological health composite.
    pub health: f32,
}

impl Survey {
    /// Survey a coordinate.
    pub fn take(
        sampler: &mut ResourceSampler,
        fields: &impl EnvironmentFields,
        at: Coord,
        moment: Moment,
    ) -> Self {
        let levels = sampler.levels_at(fields, at.x, at.y, moment);
        Self {
            at,
            sector: fields.sector_at(at.x, at.y),
            elevation: fields.elevation(at.x, at.y),
            elevation_meters: fields.elevation_meters(at.x, at.y),
            levels,
            health: levels.ecological_health(),
        }
    }

    /// Render as the multi-line text shown to operators.
    pub fn render(&self) -> String {
        let mut out = format!("Resource Survey for ({}, {}):\r\n", self.at.x, self.at.y);
        out.push_str(RULE);
        out.push_str("\r\n");
        out.push_str(&format!(
            "Terrain: {} | Elevation: {} ({:.0} m)\r\n\r\n",
            self.sector.as_str(),
            self.elevation,
            self.elevation_meters
        ));
        out.push_str("Available Resources:\r\n");
        let mut listed = 0_usize;
        for (kind, level) in self.levels.iter() {
            if level > SURVEY_FLOOR {
                out.push_str(&format!(
                    "  {:<12}: {} ({:.1}%)\r\n",
                    config(kind).name,
                    abundance_word(level),
                    level * 100.0
                ));
                listed = listed.saturating_add(1);
            }
        }
        if listed == 0 {
            out.push_str("  Nothing of value remains here.\r\n");
        }
        out.push_str(&format!(
            "\r\nEcological health: {} ({:.1}%)\r\n",
            abundance_word(self.health),
            self.health * 100.0
        ));
        out
    }
}

/// Draw an abundance map of one kind around `center`, north at the top.
///
/// The centre cell is drawn as `@`.
pub fn resource_map(
    sampler: &mut ResourceSampler,
    fields: &impl EnvironmentFields,
    kind: ResourceKind,
    center: Coord,
    radius: i32,
    moment: Moment,
) -> String {
    let radius = effective_radius(radius);
    let mut out = format!("Resource Map - {} (Radius: {radius})\r\n", kind.as_str());
    out.push_str("Legend: # very high  * high  + moderate  . low  _ traces\r\n");
    out.push_str(RULE);
    out.push_str("\r\n");
    for dy in (-radius..=radius).rev() {
        out.push(' ');
        for dx in -radius..=radius {
            if dx == 0 && dy == 0 {
                out.push('@');
                continue;
            }
            let x = center.x.saturating_add(dx);
            let y = center.y.saturating_add(dy);
            out.push(map_symbol(sampler.sample(fields, kind, x, y, moment)));
        }
        out.push_str("\r\n");
    }
    out.push_str(RULE);
    out.push_str("\r\n");
    let here = sampler.sample(fields, kind, center.x, center.y, moment);
    out.push_str(&format!("Current location (@): ({}, {})\r\n", center.x, center.y));
    out.push_str(&format!(
        "Current {} level: {} ({:.1}%)\r\n",
        kind.as_str(),
        abundance_word(here),
        here * 100.0
    ));
    out
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use wildweave_types::GameTime;

    use super::*;
    use crate::fields::UniformFields;

    fn moment() -> Moment {
        Moment::new(
            GameTime::at(6, 12),
            DateTime::from_timestamp(1_700_000_000, 0).unwrap_or_default(),
        )
    }

    #[test]
    fn abundance_words_follow_thresholds() {
        assert_eq!(abundance_word(0.95), "incredibly abundant");
        assert_eq!(abundance_word(0.8), "very abundant");
        assert_eq!(abundance_word(0.45), "moderate");
        assert_eq!(abundance_word(0.1), "very scarce");
        assert_eq!(abundance_word(0.02), "depleted");
    }

    #[test]
    fn symbols_follow_thresholds() {
        assert_eq!(map_symbol(0.85), '#');
        assert_eq!(map_symbol(0.6), '*');
        assert_eq!(map_symbol(0.41), '+');
        assert_eq!(map_symbol(0.2), '.');
        assert_eq!(map_symbol(0.05), '_');
        assert_eq!(map_symbol(0.01), ' ');
    }

    #[test]
    fn radius_out_of_range_uses_default() {
        assert_eq!(effective_radius(2), 7);
        assert_eq!(effective_radius(16), 7);
        assert_eq!(effective_radius(3), 3);
        assert_eq!(effective_radius(15), 15);
    }

    #[test]
    fn map_has_square_grid_with_center_marker() {
        let fields = UniformFields::default();
        let mut sampler = ResourceSampler::default();
        let map = resource_map(&mut sampler, &fields, ResourceKind::Vegetation, Coord::new(0, 0), 3, moment());
        let rows: Vec<&str> = map.lines().filter(|line| line.starts_with(' ')).collect();
        assert_eq!(rows.len(), 7);
        assert!(rows.iter().all(|row| row.chars().count() == 8));
        assert_eq!(map.matches('@').count(), 2);
    }

    #[test]
    fn survey_lists_meaningful_resources() {
        let fields = UniformFields::default();
        let mut sampler = ResourceSampler::default();
        let survey = Survey::take(&mut sampler, &fields, Coord::new(4, 4), moment());
        let text = survey.render();
        assert!(text.contains("Resource Survey for (4, 4)"));
        assert!(text.contains("vegetation"));
        assert!(text.contains("Ecological health"));
    }
}
