//! Enumeration types for the Wildweave description pipeline.
//!
//! Numeric thresholds that classify raw collaborator values (weather
//! intensity, clock hours, calendar months) live next to the enum they
//! produce so every stage derives the same bucket from the same input.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// An ecological or material resource tracked per wilderness coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Grasses, shrubs and general plant cover.
    Vegetation,
    /// Ore and metal-bearing rock.
    Minerals,
    /// Fresh surface and ground water.
    Water,
    /// Medicinal and culinary plants.
    Herbs,
    /// Huntable animals.
    Game,
    /// Harvestable timber.
    Wood,
    /// Building stone.
    Stone,
    /// Workable clay deposits.
    Clay,
    /// Salt flats and brine.
    Salt,
}

impl ResourceKind {
    /// Number of resource kinds.
    pub const COUNT: usize = 9;

    /// Every resource kind, in index order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Vegetation,
        Self::Minerals,
        Self::Water,
        Self::Herbs,
        Self::Game,
        Self::Wood,
        Self::Stone,
        Self::Clay,
        Self::Salt,
    ];

    /// Stable array index of this kind.
    pub const fn index(self) -> usize {
        match self {
            Self::Vegetation => 0,
            Self::Minerals => 1,
            Self::Water => 2,
            Self::Herbs => 3,
            Self::Game => 4,
            Self::Wood => 5,
            Self::Stone => 6,
            Self::Clay => 7,
            Self::Salt => 8,
        }
    }

    /// Resolve an array index back to a kind. Out-of-range indices yield `None`.
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Vegetation),
            1 => Some(Self::Minerals),
            2 => Some(Self::Water),
            3 => Some(Self::Herbs),
            4 => Some(Self::Game),
            5 => Some(Self::Wood),
            6 => Some(Self::Stone),
            7 => Some(Self::Clay),
            8 => Some(Self::Salt),
            _ => None,
        }
    }

    /// Lower-case name used in JSON blobs, survey output and the CLI.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vegetation => "vegetation",
            Self::Minerals => "minerals",
            Self::Water => "water",
            Self::Herbs => "herbs",
            Self::Game => "game",
            Self::Wood => "wood",
            Self::Stone => "stone",
            Self::Clay => "clay",
            Self::Salt => "salt",
        }
    }

    /// Parse a lower-case name (as produced by [`ResourceKind::as_str`]).
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl core::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse abundance bucket used to pick template pools and clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbundanceTier {
    /// Level at or above [`AbundanceTier::ABUNDANT`].
    Abundant,
    /// Level at or above [`AbundanceTier::MODERATE`].
    Moderate,
    /// Anything lower.
    Sparse,
}

impl AbundanceTier {
    /// Lower bound of the abundant tier.
    pub const ABUNDANT: f32 = 0.75;
    /// Lower bound of the moderate tier.
    pub const MODERATE: f32 = 0.40;
    /// Below this a resource is too thin to mention in most clauses.
    pub const SPARSE: f32 = 0.15;

    /// Classify a resource level.
    pub fn from_level(level: f32) -> Self {
        if level >= Self::ABUNDANT {
            Self::Abundant
        } else if level >= Self::MODERATE {
            Self::Moderate
        } else {
            Self::Sparse
        }
    }
}

/// Skill a character uses to harvest a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HarvestSkill {
    /// Plants, herbs and timber.
    Foresting,
    /// Ore, stone and clay.
    Mining,
    /// Game animals.
    Hunting,
    /// Water and salt gathering.
    Survival,
}

/// Quality grade of a harvested resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceQuality {
    /// Barely usable.
    Poor,
    /// Ordinary.
    Common,
    /// Better than usual.
    Uncommon,
    /// Hard to find.
    Rare,
    /// Exceptional.
    Legendary,
}

impl ResourceQuality {
    /// Display name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Poor => "poor",
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
            Self::Legendary => "legendary",
        }
    }
}

// ---------------------------------------------------------------------------
// Calendar and clock
// ---------------------------------------------------------------------------

/// A season of the in-game year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    /// Months 2 through 4.
    Spring,
    /// Months 5 through 7.
    Summer,
    /// Months 8 through 10.
    Autumn,
    /// Months 11, 0 and 1.
    Winter,
}

impl Season {
    /// Derive the season from a zero-based calendar month.
    pub const fn from_month(month: u8) -> Self {
        match month {
            2..=4 => Self::Spring,
            5..=7 => Self::Summer,
            8..=10 => Self::Autumn,
            _ => Self::Winter,
        }
    }

    /// Key used in seasonal weight blobs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Autumn => "autumn",
            Self::Winter => "winter",
        }
    }
}

/// Position of the sun in the classic four-phase day cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SunState {
    /// Night, hours 22 through 4.
    Dark,
    /// Dawn, hour 5.
    Rise,
    /// Day, hours 6 through 20.
    Light,
    /// Dusk, hour 21.
    Set,
}

impl SunState {
    /// Derive the sun state from the in-game hour (0-23).
    pub const fn from_hour(hour: u8) -> Self {
        match hour {
            5 => Self::Rise,
            6..=20 => Self::Light,
            21 => Self::Set,
            _ => Self::Dark,
        }
    }

    /// Whether this is full night.
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Key used in time-of-day weight blobs when no finer category matches.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "night",
            Self::Rise => "dawn",
            Self::Light => "day",
            Self::Set => "dusk",
        }
    }
}

/// Four-way time category used to key hint weights and the hint cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeCategory {
    /// Hours 6 through 11.
    Morning,
    /// Hours 12 through 17.
    Afternoon,
    /// Hours 18 through 21.
    Evening,
    /// Everything else.
    Night,
}

impl TimeCategory {
    /// Derive the category from the in-game hour.
    pub const fn from_hour(hour: u8) -> Self {
        match hour {
            6..=11 => Self::Morning,
            12..=17 => Self::Afternoon,
            18..=21 => Self::Evening,
            _ => Self::Night,
        }
    }

    /// Key used in time-of-day weight blobs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
            Self::Night => "night",
        }
    }

    /// Small integer code used in the hint cache key.
    pub const fn code(self) -> u8 {
        match self {
            Self::Morning => 0,
            Self::Afternoon => 1,
            Self::Evening => 2,
            Self::Night => 3,
        }
    }
}

// ---------------------------------------------------------------------------
// Weather
// ---------------------------------------------------------------------------

/// Room-level discrete sky condition used outside the wilderness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sky {
    /// No clouds.
    Cloudless,
    /// Overcast.
    Cloudy,
    /// Rain.
    Raining,
    /// Thunderstorm.
    Lightning,
}

impl Sky {
    /// Representative raw intensity for the sky, so rooms without a weather
    /// field land in the same buckets as wilderness coordinates.
    pub const fn representative_intensity(self) -> u8 {
        match self {
            Self::Cloudless => 40,
            Self::Cloudy => 150,
            Self::Raining => 190,
            Self::Lightning => 235,
        }
    }
}

/// Weather bucket used by the description templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherBucket {
    /// Raw intensity 127 and below.
    Clear,
    /// Raw intensity above 127.
    Cloudy,
    /// Raw intensity from 178.
    Rainy,
    /// Raw intensity from 200.
    Stormy,
    /// Raw intensity from 225.
    Lightning,
}

impl WeatherBucket {
    /// Lower bound of the rain bucket.
    pub const RAIN_MIN: u8 = 178;
    /// Lower bound of the storm bucket.
    pub const STORM_MIN: u8 = 200;
    /// Lower bound of the lightning bucket.
    pub const LIGHTNING_MIN: u8 = 225;

    /// Classify a raw 0-255 intensity.
    pub const fn from_intensity(raw: u8) -> Self {
        if raw >= Self::LIGHTNING_MIN {
            Self::Lightning
        } else if raw >= Self::STORM_MIN {
            Self::Stormy
        } else if raw >= Self::RAIN_MIN {
            Self::Rainy
        } else if raw > 127 {
            Self::Cloudy
        } else {
            Self::Clear
        }
    }

    /// Whether rain is falling (rain or storm, lightning excluded because it
    /// carries its own phrasing).
    pub const fn is_wet(self) -> bool {
        matches!(self, Self::Rainy | Self::Stormy)
    }
}

/// Weather condition used to filter and key region hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HintWeather {
    /// Raw intensity below 64.
    Clear,
    /// Raw intensity below 128.
    Cloudy,
    /// Raw intensity below 192.
    Rainy,
    /// Everything above.
    Stormy,
}

impl HintWeather {
    /// Classify a raw 0-255 intensity.
    pub const fn from_intensity(raw: u8) -> Self {
        match raw {
            0..=63 => Self::Clear,
            64..=127 => Self::Cloudy,
            128..=191 => Self::Rainy,
            _ => Self::Stormy,
        }
    }

    /// Tag stored in a hint's weather-conditions list.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Cloudy => "cloudy",
            Self::Rainy => "rainy",
            Self::Stormy => "stormy",
        }
    }

    /// Small integer code used in the hint cache key.
    pub const fn code(self) -> u8 {
        match self {
            Self::Clear => 0,
            Self::Cloudy => 1,
            Self::Rainy => 2,
            Self::Stormy => 3,
        }
    }
}

// ---------------------------------------------------------------------------
// Terrain
// ---------------------------------------------------------------------------

/// Sector type of a room (terrain classification).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectorType {
    /// Indoors.
    Inside,
    /// City streets.
    City,
    /// Open fields.
    Field,
    /// Woodland.
    Forest,
    /// Hill country.
    Hills,
    /// Mountain slopes.
    Mountain,
    /// Swimmable water.
    WaterSwim,
    /// Deep water that needs a boat.
    WaterNoSwim,
    /// Open air.
    Flying,
    /// Below the water surface.
    Underwater,
    /// Road running north-south.
    RoadNorthSouth,
    /// Road running east-west.
    RoadEastWest,
    /// Road intersection.
    RoadIntersection,
    /// Desert.
    Desert,
    /// Open ocean.
    Ocean,
    /// Marsh and bog.
    Marshland,
    /// High mountain peaks.
    HighMountain,
    /// Other planes of existence.
    Planes,
    /// Sandy shore.
    Beach,
}

impl SectorType {
    /// Resolve the game's integer sector code.
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Inside),
            1 => Some(Self::City),
            2 => Some(Self::Field),
            3 => Some(Self::Forest),
            4 => Some(Self::Hills),
            5 => Some(Self::Mountain),
            6 => Some(Self::WaterSwim),
            7 => Some(Self::WaterNoSwim),
            8 => Some(Self::Flying),
            9 => Some(Self::Underwater),
            11 => Some(Self::RoadNorthSouth),
            12 => Some(Self::RoadEastWest),
            13 => Some(Self::RoadIntersection),
            14 => Some(Self::Desert),
            15 => Some(Self::Ocean),
            16 => Some(Self::Marshland),
            17 => Some(Self::HighMountain),
            18 => Some(Self::Planes),
            19 => Some(Self::Beach),
            _ => None,
        }
    }

    /// Surface water of any depth (not underwater).
    pub const fn is_surface_water(self) -> bool {
        matches!(self, Self::WaterSwim | Self::WaterNoSwim | Self::Ocean)
    }

    /// Any water sector, including underwater.
    pub const fn is_water(self) -> bool {
        self.is_surface_water() || matches!(self, Self::Underwater)
    }

    /// Forest sector.
    pub const fn is_forest(self) -> bool {
        matches!(self, Self::Forest)
    }

    /// Mountain or high-mountain sector.
    pub const fn is_mountainous(self) -> bool {
        matches!(self, Self::Mountain | Self::HighMountain)
    }

    /// One of the three road sectors.
    pub const fn is_road(self) -> bool {
        matches!(
            self,
            Self::RoadNorthSouth | Self::RoadEastWest | Self::RoadIntersection
        )
    }

    /// Lower-case name for logs and the CLI.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inside => "inside",
            Self::City => "city",
            Self::Field => "field",
            Self::Forest => "forest",
            Self::Hills => "hills",
            Self::Mountain => "mountain",
            Self::WaterSwim => "water_swim",
            Self::WaterNoSwim => "water_noswim",
            Self::Flying => "flying",
            Self::Underwater => "underwater",
            Self::RoadNorthSouth => "road_ns",
            Self::RoadEastWest => "road_ew",
            Self::RoadIntersection => "road_int",
            Self::Desert => "desert",
            Self::Ocean => "ocean",
            Self::Marshland => "marshland",
            Self::HighMountain => "high_mountain",
            Self::Planes => "planes",
            Self::Beach => "beach",
        }
    }
}

// ---------------------------------------------------------------------------
// Regions and hints
// ---------------------------------------------------------------------------

/// Type tag of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionKind {
    /// Broad terrain identity; the preferred hint source.
    Geographic,
    /// Narrow gameplay trigger zone.
    Encounter,
    /// Region that rewrites the sector type of rooms inside it.
    SectorTransform,
    /// Region that fixes the sector type of rooms inside it.
    Sector,
}

impl RegionKind {
    /// Resolve the integer type code stored with a region.
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::Geographic),
            2 => Some(Self::Encounter),
            3 => Some(Self::SectorTransform),
            4 => Some(Self::Sector),
            _ => None,
        }
    }

    /// Integer type code.
    pub const fn code(self) -> i32 {
        match self {
            Self::Geographic => 1,
            Self::Encounter => 2,
            Self::SectorTransform => 3,
            Self::Sector => 4,
        }
    }
}

/// Category of a region hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HintCategory {
    /// General mood of the place.
    Atmosphere,
    /// Animals.
    Fauna,
    /// Plants.
    Flora,
    /// Landforms.
    Geography,
    /// How the weather shapes the scene.
    WeatherInfluence,
    /// Harvestable materials.
    Resources,
    /// Notable fixed features.
    Landmarks,
    /// Ambient sounds.
    Sounds,
    /// Ambient smells.
    Scents,
    /// Changes tied to the season.
    SeasonalChanges,
    /// Changes tied to the hour.
    TimeOfDay,
    /// Magical or uncanny detail.
    Mystical,
}

impl HintCategory {
    /// Every category, in storage order.
    pub const ALL: [Self; 12] = [
        Self::Atmosphere,
        Self::Fauna,
        Self::Flora,
        Self::Geography,
        Self::WeatherInfluence,
        Self::Resources,
        Self::Landmarks,
        Self::Sounds,
        Self::Scents,
        Self::SeasonalChanges,
        Self::TimeOfDay,
        Self::Mystical,
    ];

    /// Name as stored in the hint table.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Atmosphere => "atmosphere",
            Self::Fauna => "fauna",
            Self::Flora => "flora",
            Self::Geography => "geography",
            Self::WeatherInfluence => "weather_influence",
            Self::Resources => "resources",
            Self::Landmarks => "landmarks",
            Self::Sounds => "sounds",
            Self::Scents => "scents",
            Self::SeasonalChanges => "seasonal_changes",
            Self::TimeOfDay => "time_of_day",
            Self::Mystical => "mystical",
        }
    }

    /// Parse a stored category name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

/// Narrative style of a region profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DescriptionStyle {
    /// Lyrical imagery.
    #[default]
    Poetic,
    /// Plain and functional.
    Practical,
    /// Shadowed and uncanny.
    Mysterious,
    /// Bold and sweeping.
    Dramatic,
    /// Gentle and rural.
    Pastoral,
}

impl DescriptionStyle {
    /// Parse a stored style name, defaulting to [`DescriptionStyle::Poetic`].
    pub fn parse_or_default(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "practical" => Self::Practical,
            "mysterious" => Self::Mysterious,
            "dramatic" => Self::Dramatic,
            "pastoral" => Self::Pastoral,
            _ => Self::Poetic,
        }
    }

    /// Name as stored in the profile table.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Poetic => "poetic",
            Self::Practical => "practical",
            Self::Mysterious => "mysterious",
            Self::Dramatic => "dramatic",
            Self::Pastoral => "pastoral",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_index_roundtrip() {
        for kind in ResourceKind::ALL {
            assert_eq!(ResourceKind::from_index(kind.index()), Some(kind));
        }
        assert_eq!(ResourceKind::from_index(ResourceKind::COUNT), None);
    }

    #[test]
    fn resource_parse_is_case_insensitive() {
        assert_eq!(ResourceKind::parse("Water"), Some(ResourceKind::Water));
        assert_eq!(ResourceKind::parse("crystal"), None);
    }

    #[test]
    fn season_boundaries() {
        assert_eq!(Season::from_month(1), Season::Winter);
        assert_eq!(Season::from_month(2), Season::Spring);
        assert_eq!(Season::from_month(7), Season::Summer);
        assert_eq!(Season::from_month(10), Season::Autumn);
        assert_eq!(Season::from_month(11), Season::Winter);
    }

    #[test]
    fn sun_state_cycle() {
        assert_eq!(SunState::from_hour(4), SunState::Dark);
        assert_eq!(SunState::from_hour(5), SunState::Rise);
        assert_eq!(SunState::from_hour(6), SunState::Light);
        assert_eq!(SunState::from_hour(21), SunState::Set);
        assert_eq!(SunState::from_hour(22), SunState::Dark);
    }

    #[test]
    fn time_category_boundaries() {
        assert_eq!(TimeCategory::from_hour(5), TimeCategory::Night);
        assert_eq!(TimeCategory::from_hour(6), TimeCategory::Morning);
        assert_eq!(TimeCategory::from_hour(12), TimeCategory::Afternoon);
        assert_eq!(TimeCategory::from_hour(18), TimeCategory::Evening);
        assert_eq!(TimeCategory::from_hour(22), TimeCategory::Night);
    }

    #[test]
    fn weather_buckets() {
        assert_eq!(WeatherBucket::from_intensity(127), WeatherBucket::Clear);
        assert_eq!(WeatherBucket::from_intensity(128), WeatherBucket::Cloudy);
        assert_eq!(WeatherBucket::from_intensity(178), WeatherBucket::Rainy);
        assert_eq!(WeatherBucket::from_intensity(210), WeatherBucket::Stormy);
        assert_eq!(WeatherBucket::from_intensity(225), WeatherBucket::Lightning);

        assert_eq!(HintWeather::from_intensity(63), HintWeather::Clear);
        assert_eq!(HintWeather::from_intensity(64), HintWeather::Cloudy);
        assert_eq!(HintWeather::from_intensity(191), HintWeather::Rainy);
        assert_eq!(HintWeather::from_intensity(210), HintWeather::Stormy);
    }

    #[test]
    fn abundance_tiers() {
        assert_eq!(AbundanceTier::from_level(0.85), AbundanceTier::Abundant);
        assert_eq!(AbundanceTier::from_level(0.75), AbundanceTier::Abundant);
        assert_eq!(AbundanceTier::from_level(0.5), AbundanceTier::Moderate);
        assert_eq!(AbundanceTier::from_level(0.39), AbundanceTier::Sparse);
    }

    #[test]
    fn hint_category_names_roundtrip() {
        for category in HintCategory::ALL {
            assert_eq!(HintCategory::parse(category.as_str()), Some(category));
        }
        let json = serde_json::to_string(&HintCategory::WeatherInfluence).ok();
        assert_eq!(json.as_deref(), Some("\"weather_influence\""));
    }

    #[test]
    fn sector_codes_skip_zone_start() {
        assert_eq!(SectorType::from_code(10), None);
        assert_eq!(SectorType::from_code(3), Some(SectorType::Forest));
        assert!(SectorType::Ocean.is_water());
        assert!(!SectorType::Underwater.is_surface_water());
    }

    #[test]
    fn style_defaults_to_poetic() {
        assert_eq!(DescriptionStyle::parse_or_default("Dramatic"), DescriptionStyle::Dramatic);
        assert_eq!(DescriptionStyle::parse_or_default("baroque"), DescriptionStyle::Poetic);
    }
}
