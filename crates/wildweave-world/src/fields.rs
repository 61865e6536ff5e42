//! Environmental noise fields consumed by the sampler and context builder.
//!
//! The game owns the authoritative weather and terrain generators; the
//! pipeline only needs a scalar per coordinate. [`EnvironmentFields`] is that
//! seam. [`PerlinFields`] is a self-contained implementation built on the
//! `noise` crate for tools, tests and hosts without their own generator, and
//! [`UniformFields`] returns fixed values for deterministic tests.
//!
//! All byte-valued fields use the full `0..=255` range with 128 as the
//! neutral midpoint (for elevation, sea level).

use noise::{NoiseFn, Perlin};
use wildweave_types::{GameTime, SectorType};

/// Raw elevation value that corresponds to sea level.
pub const SEA_LEVEL: u8 = 128;

/// Metres per raw elevation step above or below [`SEA_LEVEL`].
pub const METERS_PER_ELEVATION_STEP: f32 = 30.0;

/// Coherent scalar fields over the wilderness coordinate space.
pub trait EnvironmentFields {
    /// Weather intensity, 0 (cloudless) to 255 (violent storm).
    fn weather(&self, x: i32, y: i32) -> u8;

    /// Raw elevation, [`SEA_LEVEL`] is the waterline.
    fn elevation(&self, x: i32, y: i32) -> u8;

    /// Raw temperature; see [`celsius_from_raw`] for the scale.
    fn temperature(&self, x: i32, y: i32) -> u8;

    /// Raw moisture, 0 (parched) to 255 (saturated).
    fn moisture(&self, x: i32, y: i32) -> u8;

    /// Elevation relative to sea level in metres.
    fn elevation_meters(&self, x: i32, y: i32) -> f32 {
        meters_from_raw(self.elevation(x, y))
    }

    /// Secondary coherent noise in `[0, 1]` for resource micro-variation.
    ///
    /// Each `layer` must produce a field uncorrelated with the others.
    fn detail_noise(&self, layer: u32, x: i32, y: i32, frequency: f64) -> f64;

    /// Terrain classification of a coordinate.
    fn sector_at(&self, x: i32, y: i32) -> SectorType {
        classify_sector(
            self.elevation(x, y),
            self.temperature(x, y),
            self.moisture(x, y),
        )
    }

    /// Move time-varying fields (weather) to the given game time.
    fn advance_to(&mut self, _time: &GameTime) {}
}

/// Convert a raw temperature byte to degrees Celsius (-30 °C to 35 °C).
pub fn celsius_from_raw(raw: u8) -> f32 {
    f32::from(raw) / 255.0 * 65.0 - 30.0
}

/// Convert degrees Celsius to the raw byte scale, saturating at the ends.
pub fn raw_from_celsius(celsius: f32) -> u8 {
    unit_to_byte(f64::from((celsius + 30.0) / 65.0))
}

/// Convert a raw elevation byte to metres relative to sea level.
pub fn meters_from_raw(raw: u8) -> f32 {
    (f32::from(raw) - f32::from(SEA_LEVEL)) * METERS_PER_ELEVATION_STEP
}

/// Terrain rules shared by every field implementation.
pub fn classify_sector(elevation: u8, temperature: u8, moisture: u8) -> SectorType {
    let celsius = celsius_from_raw(temperature);
    match elevation {
        0..=99 => SectorType::Ocean,
        100..=119 => SectorType::WaterNoSwim,
        120..=127 => SectorType::WaterSwim,
        128..=130 => SectorType::Beach,
        221..=255 => SectorType::HighMountain,
        191..=220 => SectorType::Mountain,
        166..=190 => SectorType::Hills,
        _ => {
            if celsius >= 24.0 && moisture < 90 {
                SectorType::Desert
            } else if moisture > 170 && elevation < 140 {
                SectorType::Marshland
            } else if moisture > 120 {
                SectorType::Forest
            } else {
                SectorType::Field
            }
        }
    }
}

/// Map a value in `[0, 1]` to a byte.
fn unit_to_byte(value: f64) -> u8 {
    let scaled = (value.clamp(0.0, 1.0) * 255.0).round();
    // Clamped to [0, 255] above, so the cast cannot truncate.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let byte = scaled as u8;
    byte
}

// ---------------------------------------------------------------------------
// Perlin implementation
// ---------------------------------------------------------------------------

/// Number of independent detail layers (one per resource kind).
const DETAIL_LAYERS: usize = 9;

/// Noise-backed environment fields.
///
/// Fields are fractal sums of Perlin octaves sampled at coordinate scale.
/// Temperature follows a latitude gradient (warm at `y = 0`, cold toward
/// `±half_extent`) with an elevation lapse rate. Weather drifts with the
/// game clock through a third noise dimension.
pub struct PerlinFields {
    seed: u32,
    half_extent: f64,
    elevation: Perlin,
    moisture: Perlin,
    temperature: Perlin,
    weather: Perlin,
    detail: Vec<Perlin>,
    weather_phase: f64,
}

impl PerlinFields {
    /// Build the fields for a world seed and the half-width of the map.
    pub fn new(seed: u32, half_extent: i32) -> Self {
        let detail = (0..DETAIL_LAYERS)
            .map(|layer| {
                let offset = u32::try_from(layer).unwrap_or(0);
                Perlin::new(seed.wrapping_add(100).wrapping_add(offset))
            })
            .collect();
        Self {
            seed,
            half_extent: f64::from(half_extent.max(1)),
            elevation: Perlin::new(seed),
            moisture: Perlin::new(seed.wrapping_add(1)),
            temperature: Perlin::new(seed.wrapping_add(2)),
            weather: Perlin::new(seed.wrapping_add(3)),
            detail,
            weather_phase: 0.0,
        }
    }

    /// The world seed.
    pub const fn seed(&self) -> u32 {
        self.seed
    }

    /// Sum `octaves` of noise into a value in `[0, 1]`.
    fn fractal(noise: &Perlin, x: f64, y: f64, z: f64, base_frequency: f64, octaves: u32) -> f64 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = base_frequency;
        let mut norm = 0.0;
        for _ in 0..octaves {
            total += noise.get([x * frequency, y * frequency, z]) * amplitude;
            norm += amplitude;
            amplitude *= 0.5;
            frequency *= 2.0;
        }
        if norm > 0.0 {
            (total / norm).mul_add(0.5, 0.5).clamp(0.0, 1.0)
        } else {
            0.5
        }
    }
}

impl core::fmt::Debug for PerlinFields {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PerlinFields")
            .field("seed", &self.seed)
            .field("half_extent", &self.half_extent)
            .field("weather_phase", &self.weather_phase)
            .finish_non_exhaustive()
    }
}

impl EnvironmentFields for PerlinFields {
    fn weather(&self, x: i32, y: i32) -> u8 {
        let value = Self::fractal(
            &self.weather,
            f64::from(x),
            f64::from(y),
            self.weather_phase,
            0.015,
            3,
        );
        unit_to_byte(value)
    }

    fn elevation(&self, x: i32, y: i32) -> u8 {
        let value = Self::fractal(&self.elevation, f64::from(x), f64::from(y), 0.0, 0.008, 5);
        unit_to_byte(value)
    }

    fn temperature(&self, x: i32, y: i32) -> u8 {
        let latitude = (f64::from(y).abs() / self.half_extent).min(1.0);
        let mut celsius = 60.0_f64.mul_add(-latitude, 32.0);
        let meters = f64::from(self.elevation_meters(x, y));
        if meters > 0.0 {
            celsius -= meters / 1000.0 * 6.5;
        }
        let jitter = Self::fractal(&self.temperature, f64::from(x), f64::from(y), 0.5, 0.02, 2);
        celsius += (jitter - 0.5) * 10.0;
        // Narrowing to f32 is fine for a temperature in degrees.
        #[allow(clippy::cast_possible_truncation)]
        let celsius = celsius as f32;
        raw_from_celsius(celsius)
    }

    fn moisture(&self, x: i32, y: i32) -> u8 {
        let value = Self::fractal(&self.moisture, f64::from(x), f64::from(y), 0.25, 0.01, 4);
        unit_to_byte(value)
    }

    fn detail_noise(&self, layer: u32, x: i32, y: i32, frequency: f64) -> f64 {
        let index = usize::try_from(layer).unwrap_or(0) % DETAIL_LAYERS;
        self.detail.get(index).map_or(0.5, |noise| {
            Self::fractal(noise, f64::from(x), f64::from(y), 0.75, frequency, 2)
        })
    }

    fn advance_to(&mut self, time: &GameTime) {
        // Weather fronts drift slowly; one unit of phase spans ~two days.
        #[allow(clippy::cast_precision_loss)]
        let hours = time.absolute_hour as f64;
        self.weather_phase = hours / 48.0;
    }
}

// ---------------------------------------------------------------------------
// Constant implementation
// ---------------------------------------------------------------------------

/// Fields that return the same values everywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformFields {
    /// Weather intensity.
    pub weather: u8,
    /// Raw elevation.
    pub elevation: u8,
    /// Raw temperature.
    pub temperature: u8,
    /// Raw moisture.
    pub moisture: u8,
    /// Detail noise value in `[0, 1]`.
    pub detail: f64,
    /// Fixed sector; `None` classifies from the other fields.
    pub sector: Option<SectorType>,
}

impl Default for UniformFields {
    fn default() -> Self {
        Self {
            weather: 60,
            elevation: 150,
            temperature: raw_from_celsius(18.0),
            moisture: 140,
            detail: 0.5,
            sector: None,
        }
    }
}

impl EnvironmentFields for UniformFields {
    fn weather(&self, _x: i32, _y: i32) -> u8 {
        self.weather
    }

    fn elevation(&self, _x: i32, _y: i32) -> u8 {
        self.elevation
    }

    fn temperature(&self, _x: i32, _y: i32) -> u8 {
        self.temperature
    }

    fn moisture(&self, _x: i32, _y: i32) -> u8 {
        self.moisture
    }

    fn detail_noise(&self, _layer: u32, _x: i32, _y: i32, _frequency: f64) -> f64 {
        self.detail.clamp(0.0, 1.0)
    }

    fn sector_at(&self, x: i32, y: i32) -> SectorType {
        self.sector.unwrap_or_else(|| {
            classify_sector(
                self.elevation(x, y),
                self.temperature(x, y),
                self.moisture(x, y),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_scale_roundtrip() {
        let raw = raw_from_celsius(25.0);
        assert!((celsius_from_raw(raw) - 25.0).abs() < 0.3);
        assert_eq!(raw_from_celsius(-80.0), 0);
        assert_eq!(raw_from_celsius(90.0), 255);
    }

    #[test]
    fn sea_level_is_zero_meters() {
        assert!(meters_from_raw(SEA_LEVEL).abs() < f32::EPSILON);
        assert!(meters_from_raw(200) > 2000.0);
    }

    #[test]
    fn perlin_fields_are_deterministic() {
        let a = PerlinFields::new(7, 1024);
        let b = PerlinFields::new(7, 1024);
        for (x, y) in [(0, 0), (15, -40), (-300, 512), (1000, 1000)] {
            assert_eq!(a.elevation(x, y), b.elevation(x, y));
            assert_eq!(a.moisture(x, y), b.moisture(x, y));
            assert_eq!(a.temperature(x, y), b.temperature(x, y));
            assert_eq!(a.weather(x, y), b.weather(x, y));
        }
    }

    #[test]
    fn detail_noise_in_unit_range() {
        let fields = PerlinFields::new(3, 1024);
        for layer in 0..12 {
            let value = fields.detail_noise(layer, layer.try_into().unwrap_or(0), 17, 0.05);
            assert!((0.0..=1.0).contains(&value));
        }
    }

    #[test]
    fn poles_are_colder_than_equator() {
        let fields = UniformFields::default();
        let perlin = PerlinFields::new(11, 1024);
        // Uniform fields have no gradient.
        assert_eq!(fields.temperature(0, 0), fields.temperature(0, 1000));
        let equator = celsius_from_raw(perlin.temperature(0, 0));
        let pole = celsius_from_raw(perlin.temperature(0, 1024));
        assert!(equator > pole);
    }

    #[test]
    fn classification_bands() {
        assert_eq!(classify_sector(50, 128, 128), SectorType::Ocean);
        assert_eq!(classify_sector(129, 128, 128), SectorType::Beach);
        assert_eq!(classify_sector(230, 128, 128), SectorType::HighMountain);
        assert_eq!(classify_sector(150, raw_from_celsius(30.0), 40), SectorType::Desert);
        assert_eq!(classify_sector(150, raw_from_celsius(15.0), 150), SectorType::Forest);
    }
}
