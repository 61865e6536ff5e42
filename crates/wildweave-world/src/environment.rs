//! Per-request environmental context.
//!
//! [`EnvironmentalContext::build`] gathers everything the template selector
//! and the hint weaver read about "right now, right here": weather, calendar,
//! light, terrain and elevation. The context is a plain value; nothing in it
//! refers back to the room.

use rand::Rng;
use serde::Serialize;
use wildweave_types::{
    Coord, GameTime, HintWeather, Season, SectorType, SunState, TimeCategory, WeatherBucket,
};

use crate::fields::EnvironmentFields;
use crate::room::RoomView;

/// Elevation in metres that maps to a normalized elevation of 1.0.
pub const ELEVATION_CEILING_METERS: f32 = 1000.0;

/// Natural light reported for an outdoor room at night (moon and stars).
const NIGHT_NATURAL_LIGHT: i32 = 5;

/// Everything the description stages know about the moment and place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnvironmentalContext {
    /// Calendar season.
    pub season: Season,
    /// Sun state of the current hour.
    pub sun: SunState,
    /// Hour of the day, 0-23.
    pub hour: u8,
    /// Month of the year, 0-11.
    pub month: u8,
    /// Raw weather intensity, 0-255.
    pub weather: u8,
    /// Total light: room, sun and light items.
    pub light_level: i32,
    /// Room light plus light items.
    pub artificial_light: i32,
    /// Sun and moon light as reported to the templates.
    pub natural_light: i32,
    /// Whether any artificial light is present.
    pub has_light_sources: bool,
    /// Terrain classification.
    pub sector: SectorType,
    /// Normalized elevation in `[0, 1]`.
    pub elevation: f32,
    /// Elevation relative to sea level in metres.
    pub elevation_meters: f32,
    /// Water in or next to the room.
    pub near_water: bool,
    /// Forest sector.
    pub in_forest: bool,
    /// Mountain or high-mountain sector.
    pub in_mountains: bool,
}

impl EnvironmentalContext {
    /// Build the context for a room at a game time.
    ///
    /// Returns `None` for a wilderness room without coordinates.
    pub fn build(
        room: &RoomView,
        fields: &impl EnvironmentFields,
        time: &GameTime,
        rng: &mut impl Rng,
    ) -> Option<Self> {
        let sun = time.sun_state();
        let coords = if room.is_wilderness {
            let Some(at) = room.coords else {
                tracing::warn!(vnum = %room.vnum, "Wilderness room has no coordinates");
                return None;
            };
            Some(at)
        } else {
            None
        };

        let weather = coords.map_or_else(
            || room.sky.representative_intensity(),
            |at| fields.weather(at.x, at.y),
        );

        let (sun_light, reported_natural) = if room.outdoors {
            match sun {
                SunState::Light => (100, 100),
                SunState::Rise | SunState::Set => (50, 50),
                SunState::Dark => (0, NIGHT_NATURAL_LIGHT),
            }
        } else {
            (0, 0)
        };
        let artificial_light = room.base_light.saturating_add(room.item_light());
        let light_level = artificial_light.saturating_add(sun_light);

        let (elevation, elevation_meters) = match coords {
            Some(at) => {
                let meters = fields.elevation_meters(at.x, at.y);
                (normalize_meters(meters), meters)
            }
            None => {
                let jitter: f32 = rng.random_range(-0.02..=0.02);
                let normalized = (sector_elevation(room.sector) + jitter).clamp(0.0, 1.0);
                (normalized, normalized * ELEVATION_CEILING_METERS)
            }
        };

        let near_water = room.sector.is_water()
            || coords.is_some_and(|at| water_adjacent(fields, at));

        Some(Self {
            season: time.season(),
            sun,
            hour: time.hour,
            month: time.month,
            weather,
            light_level,
            artificial_light,
            natural_light: reported_natural,
            has_light_sources: artificial_light > 0,
            sector: room.sector,
            elevation,
            elevation_meters,
            near_water,
            in_forest: room.sector.is_forest(),
            in_mountains: room.sector.is_mountainous(),
        })
    }

    /// Weather bucket used by the templates.
    pub const fn weather_bucket(&self) -> WeatherBucket {
        WeatherBucket::from_intensity(self.weather)
    }

    /// Weather condition used to filter and key hints.
    pub const fn hint_weather(&self) -> HintWeather {
        HintWeather::from_intensity(self.weather)
    }

    /// Four-way time category.
    pub const fn time_category(&self) -> TimeCategory {
        TimeCategory::from_hour(self.hour)
    }

    /// Whether it is full night.
    pub const fn is_dark(&self) -> bool {
        self.sun.is_dark()
    }
}

/// Metres to `[0, 1]` against [`ELEVATION_CEILING_METERS`].
pub fn normalize_meters(meters: f32) -> f32 {
    (meters / ELEVATION_CEILING_METERS).clamp(0.0, 1.0)
}

/// Typical normalized elevation of a hand-built room of a given sector.
pub const fn sector_elevation(sector: SectorType) -> f32 {
    match sector {
        SectorType::WaterSwim
        | SectorType::WaterNoSwim
        | SectorType::Ocean
        | SectorType::Underwater => 0.0,
        SectorType::Beach | SectorType::Marshland => 0.02,
        SectorType::Inside
        | SectorType::City
        | SectorType::Field
        | SectorType::RoadNorthSouth
        | SectorType::RoadEastWest
        | SectorType::RoadIntersection
        | SectorType::Planes => 0.1,
        SectorType::Desert => 0.15,
        SectorType::Forest => 0.2,
        SectorType::Hills => 0.35,
        SectorType::Flying => 0.5,
        SectorType::Mountain => 0.65,
        SectorType::HighMountain => 0.9,
    }
}

/// Whether any of the eight neighbouring wilderness tiles is water.
fn water_adjacent(fields: &impl EnvironmentFields, at: Coord) -> bool {
    (-1..=1).any(|dy: i32| {
        (-1..=1).any(|dx: i32| {
            (dx != 0 || dy != 0)
                && fields
                    .sector_at(at.x.saturating_add(dx), at.y.saturating_add(dy))
                    .is_water()
        })
    })
}
