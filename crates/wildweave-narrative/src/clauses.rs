//! Detail clauses appended after the opening sentence.
//!
//! Each function returns the clause text with its own leading punctuation
//! (`", ..."` continues the sentence, `". ..."` starts a new one) or `None`
//! when the clause does not apply.

use rand::Rng;
use wildweave_types::{
    AbundanceTier, ResourceKind, ResourceLevels, Season, SectorType, SunState, WeatherBucket,
};
use wildweave_world::EnvironmentalContext;

use crate::pools::TerrainFamily;

/// Chance that the elevation clause is included.
pub const ELEVATION_CLAUSE_CHANCE: f64 = 0.4;

/// Mineral level below which no geological clause is written.
const TRACE_MINERALS: f32 = 0.05;

fn is_wet(ctx: &EnvironmentalContext) -> bool {
    ctx.weather_bucket().is_wet()
}

fn lit_night(ctx: &EnvironmentalContext) -> bool {
    ctx.is_dark() && ctx.has_light_sources
}

// ---------------------------------------------------------------------------
// Vegetation
// ---------------------------------------------------------------------------

/// Seasonal vegetation clause for land terrain.
pub fn vegetation(
    family: TerrainFamily,
    levels: &ResourceLevels,
    ctx: &EnvironmentalContext,
) -> Option<&'static str> {
    if family.is_aquatic() {
        return None;
    }
    let wooded = family == TerrainFamily::Forest || ctx.in_forest;
    let tier = AbundanceTier::from_level(levels.get(ResourceKind::Vegetation));
    let text = match (tier, ctx.season) {
        (AbundanceTier::Abundant, Season::Spring) => pick(
            wooded,
            ", their branches alive with new growth and emerging buds",
            ", where lush grasses and vibrant wildflowers bloom in abundance",
        ),
        (AbundanceTier::Abundant, Season::Summer) => pick(
            wooded,
            ", their emerald canopy dense with lush foliage",
            ", where thick carpets of grass wave gently in the breeze",
        ),
        (AbundanceTier::Abundant, Season::Autumn) => pick(
            wooded,
            ", their leaves a brilliant tapestry of gold and crimson",
            ", where tall grasses and late-season flowers create a warm mosaic",
        ),
        (AbundanceTier::Abundant, Season::Winter) => pick(
            wooded,
            ", their bare branches creating intricate patterns against the sky",
            ", where hardy winter grasses persist despite the cold",
        ),
        (AbundanceTier::Moderate, Season::Spring) => pick(
            wooded,
            ", showing the first signs of spring's awakening",
            ", where patches of new grass emerge among scattered wildflowers",
        ),
        (AbundanceTier::Moderate, Season::Summer) => moderate_summer(wooded, ctx),
        (AbundanceTier::Moderate, Season::Autumn) => pick(
            wooded,
            ", touched with the colors of the changing season",
            ", where autumn grasses turn tawny and seed heads catch the wind",
        ),
        (AbundanceTier::Moderate, Season::Winter) => pick(
            wooded,
            ", standing quiet and still in winter's embrace",
            ", where frost-touched grasses form a sparse but resilient ground cover",
        ),
        (AbundanceTier::Sparse, Season::Spring) => pick(
            wooded,
            ", where tender new shoots push through the soil",
            ", where scattered shoots of grass emerge from the earth",
        ),
        (AbundanceTier::Sparse, Season::Summer) => sparse_summer(wooded, ctx),
        (AbundanceTier::Sparse, Season::Autumn) => pick(
            wooded,
            ", their sparse foliage rustling in the breeze",
            ", where dry grasses and fading wildflowers bend in the autumn wind",
        ),
        (AbundanceTier::Sparse, Season::Winter) => pick(
            wooded,
            ", stark and beautiful against the winter landscape",
            ", where only the hardiest grasses survive the winter cold",
        ),
    };
    Some(text)
}

const fn pick(wooded: bool, forest: &'static str, open: &'static str) -> &'static str {
    if wooded { forest } else { open }
}

fn moderate_summer(wooded: bool, ctx: &EnvironmentalContext) -> &'static str {
    let wet = is_wet(ctx);
    match (wooded, ctx.is_dark(), ctx.has_light_sources, wet) {
        (true, true, true, true) => {
            ", their healthy canopy heavy with rain, droplets glistening in the flickering light"
        }
        (true, true, true, false) => {
            ", their healthy canopy creating dancing shadows in the flickering light"
        }
        (true, true, false, true) => ", their rain-soaked canopy rustling softly in the darkness",
        (true, true, false, false) => ", their healthy canopy rustling softly in the night breeze",
        (true, false, _, true) => ", their healthy canopy dripping steadily from the ongoing rain",
        (true, false, _, false) => ", their healthy canopy providing pleasant shade",
        (false, true, true, true) => {
            ", the rain-laden grasses and flowers bending under the weight of water in the artificial light"
        }
        (false, true, true, false) => ", the grasses and flowers swaying gently in the artificial light",
        (false, true, false, true) => {
            ", the vegetation heavy with rainwater rustling quietly in the darkness"
        }
        (false, true, false, false) => ", the vegetation rustling quietly in the darkness",
        (false, false, _, true) => ", where grasses and scattered flowers glisten with fresh raindrops",
        (false, false, _, false) => ", forming a pleasant meadow dotted with colorful blooms",
    }
}

fn sparse_summer(wooded: bool, ctx: &EnvironmentalContext) -> &'static str {
    match (ctx.is_dark(), ctx.has_light_sources, wooded) {
        (true, true, true) => ", their sparse forms casting twisted shadows in the artificial light",
        (true, true, false) => {
            ", where sparse patches of vegetation are picked out by the flickering light"
        }
        (true, false, true) => ", their sparse forms barely visible in the darkness",
        (true, false, false) => ", where scattered vegetation fades into the night",
        (false, _, true) => ", casting patches of shade across the open landscape",
        (false, _, false) => ", where scattered wildflowers add splashes of color to the grassland",
    }
}

/// Aquatic flora clause for water terrain.
pub fn aquatic_flora(family: TerrainFamily, levels: &ResourceLevels) -> Option<&'static str> {
    let tier = AbundanceTier::from_level(levels.get(ResourceKind::Vegetation));
    match (family, tier) {
        (TerrainFamily::Water, AbundanceTier::Abundant) => {
            Some(", thick beds of water plants swaying with the current")
        }
        (TerrainFamily::Water, AbundanceTier::Moderate) => {
            Some(", scattered weed drifting just below the surface")
        }
        (TerrainFamily::Water, AbundanceTier::Sparse) => Some(", the depths nearly bare of growth"),
        (TerrainFamily::Underwater, AbundanceTier::Abundant) => {
            Some(", fronds of kelp and sea grass brushing past in every direction")
        }
        (TerrainFamily::Underwater, AbundanceTier::Moderate) => {
            Some(", a few hardy sea plants anchored among the stones")
        }
        (TerrainFamily::Underwater, AbundanceTier::Sparse) => {
            Some(", only a thin film of algae softening the rocks")
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Geology
// ---------------------------------------------------------------------------

/// Mineral and bedrock clause. Skipped over water and in the air.
pub fn geology(levels: &ResourceLevels, ctx: &EnvironmentalContext) -> Option<&'static str> {
    if ctx.sector.is_water() || ctx.sector == SectorType::Flying {
        return None;
    }
    let minerals = levels.get(ResourceKind::Minerals);
    let lit = lit_night(ctx);
    let wet = is_wet(ctx);
    let sector = ctx.sector;

    let text = if minerals >= AbundanceTier::ABUNDANT {
        match sector {
            SectorType::Mountain | SectorType::HighMountain => match (lit, wet) {
                (true, true) => {
                    ". The wet rocky peaks glitter with metallic veins that catch the torchlight through the rain"
                }
                (true, false) => ". The rocky peaks glitter with metallic veins that catch the torchlight",
                (false, true) => {
                    ". The rain-washed mountain stone reveals rich ore veins and crystalline deposits more clearly"
                }
                (false, false) => {
                    ". The mountain stone is rich with visible ore veins and crystalline deposits"
                }
            },
            SectorType::Hills if lit => {
                ". The hillsides reveal mineral wealth that gleams in the flickering light"
            }
            SectorType::Hills => ". The rolling terrain is enriched with exposed seams of precious metals",
            SectorType::Desert => {
                ". The sun-baked earth reveals rich mineral deposits beneath the sandy surface"
            }
            SectorType::Beach => {
                ". The coastal cliffs show layers of mineral-rich sediment deposited over ages"
            }
            SectorType::Marshland => {
                ". The boggy ground conceals rich deposits of clay and mineral sediments"
            }
            _ if lit => ". The earth shows veins of metal that catch and reflect the flickering light",
            _ => ". The earth is enriched with visible seams of precious metals",
        }
    } else if minerals >= AbundanceTier::MODERATE {
        match sector {
            SectorType::Mountain | SectorType::HighMountain => match (lit, wet) {
                (true, true) => ". The wet rocky outcrops show mineral traces glistening in the torchlight",
                (true, false) => ". The rocky outcrops show mineral traces visible in the torchlight",
                (false, true) => ". The rain-cleaned mountain stone shows clearer signs of mineral wealth",
                (false, false) => ". The mountain stone shows promising signs of mineral wealth",
            },
            SectorType::Hills | SectorType::Field | SectorType::Forest if lit => {
                ". The ground shows signs of mineral wealth, with occasional glints in the torchlight"
            }
            SectorType::Hills | SectorType::Field | SectorType::Forest => {
                ". The ground shows signs of mineral wealth, with small deposits visible"
            }
            SectorType::Desert => ". The arid landscape reveals scattered mineral deposits among the rocks",
            SectorType::Beach => {
                ". The sandy shore is mixed with small pebbles of interesting mineral content"
            }
            SectorType::Marshland => {
                ". The wetland soil contains traces of valuable clay and mineral deposits"
            }
            _ => ". The terrain shows modest signs of mineral presence",
        }
    } else if minerals >= AbundanceTier::SPARSE {
        match sector {
            SectorType::Mountain | SectorType::HighMountain => {
                ". The rugged peaks show ancient geological formations of weathered stone"
            }
            SectorType::Hills => ". The rolling landscape reveals the weathered bones of ancient bedrock",
            SectorType::Forest => {
                ". The forest floor is broken by scattered rock outcroppings among the tree roots"
            }
            SectorType::Field | SectorType::Planes => {
                ". The grassland is dotted with occasional stones and small rocky patches"
            }
            SectorType::Desert => ". The barren landscape exposes wind-carved rock formations",
            SectorType::Beach => ". The shoreline is scattered with worn pebbles and shell fragments",
            SectorType::Marshland => ". The boggy terrain reveals patches of clay and mineral-rich mud",
            _ => ". The terrain shows subtle geological character",
        }
    } else if minerals >= TRACE_MINERALS {
        match sector {
            SectorType::Mountain | SectorType::HighMountain => {
                ". The stark peaks show the raw geological structure of ancient stone"
            }
            SectorType::Hills => ". The gentle slopes reveal glimpses of the underlying bedrock",
            SectorType::Forest => ". The wooded area shows its deep roots anchored in rich earth",
            SectorType::Field | SectorType::Planes => {
                ". The open landscape rests on a foundation of solid earth"
            }
            SectorType::Desert => ". The harsh environment has exposed the bare bones of the earth",
            SectorType::Beach => ". The coastal area blends sand and stone in natural harmony",
            SectorType::Marshland => ". The wetland sits atop layers of sediment deposited over centuries",
            _ => ". The area shows the quiet geological presence of deep time",
        }
    } else {
        return None;
    };
    Some(text)
}

// ---------------------------------------------------------------------------
// Water features
// ---------------------------------------------------------------------------

/// Streams, springs and pools. Skipped when the terrain is itself water.
pub fn water_feature(levels: &ResourceLevels, ctx: &EnvironmentalContext) -> Option<&'static str> {
    if ctx.sector.is_water() {
        return None;
    }
    let water = levels.get(ResourceKind::Water);
    if water < AbundanceTier::SPARSE {
        return None;
    }
    let sector = ctx.sector;
    let text = match AbundanceTier::from_level(water) {
        AbundanceTier::Abundant => match sector {
            SectorType::Beach => ". Waves wash rhythmically against the sandy shore",
            SectorType::Marshland => ". Meandering waterways wind through the marshy terrain",
            SectorType::Mountain | SectorType::HighMountain => {
                ". A mountain spring bubbles forth from rocky clefts"
            }
            SectorType::Forest => ". A crystal-clear brook winds between moss-covered boulders",
            SectorType::Field | SectorType::Planes => {
                ". A lively creek dances through the meadow over smooth stones"
            }
            SectorType::Hills => ". Sparkling streams cascade down the hillsides",
            SectorType::Desert => ". A rare oasis provides life-giving water in the arid landscape",
            _ => ". Abundant fresh water flows through the area",
        },
        AbundanceTier::Moderate => match sector {
            SectorType::Beach => ". Gentle waves lap against the shoreline",
            SectorType::Marshland => ". Shallow channels weave through the wetland",
            SectorType::Mountain | SectorType::HighMountain => {
                ". A steady mountain stream flows over rocky terrain"
            }
            SectorType::Forest | SectorType::Field | SectorType::Planes | SectorType::Hills => {
                ". A steady stream flows over smooth stones"
            }
            SectorType::Desert => ". A small spring provides precious water in the dry landscape",
            _ => ". Water flows quietly through the terrain",
        },
        AbundanceTier::Sparse => match sector {
            SectorType::Beach => ". Occasional tide pools collect seawater among the rocks",
            SectorType::Marshland => ". Shallow puddles dot the boggy ground",
            SectorType::Mountain | SectorType::HighMountain => {
                ". A thin trickle of water seeps from cracks in the stone"
            }
            SectorType::Desert => ". Rare pools reflect the sky where water briefly collects",
            SectorType::Forest | SectorType::Field | SectorType::Planes | SectorType::Hills => {
                ". Small pools reflect the sky where water once flowed freely"
            }
            _ => ". Traces of water hint at hidden springs",
        },
    };
    Some(text)
}

// ---------------------------------------------------------------------------
// Elevation
// ---------------------------------------------------------------------------

/// Elevation band clause for a height in metres above sea level.
pub fn elevation_band(family: TerrainFamily, meters: f32) -> &'static str {
    if meters <= 5.0 {
        if family.is_aquatic() {
            ". The water lies level with the distant sea"
        } else {
            ". The land here lies barely above the level of the sea"
        }
    } else if meters <= 50.0 {
        ". The lowlands spread out in gentle, level folds"
    } else if meters <= 200.0 {
        ". The ground rises here into rolling upland"
    } else if meters <= 500.0 {
        ". The air grows thinner at this mountainous height"
    } else {
        ". Lofty peaks crowd the horizon from this high, windswept place"
    }
}

/// Elevation clause, included with [`ELEVATION_CLAUSE_CHANCE`].
pub fn elevation(
    family: TerrainFamily,
    ctx: &EnvironmentalContext,
    rng: &mut impl Rng,
) -> Option<&'static str> {
    rng.random_bool(ELEVATION_CLAUSE_CHANCE)
        .then(|| elevation_band(family, ctx.elevation_meters))
}

// ---------------------------------------------------------------------------
// Atmosphere
// ---------------------------------------------------------------------------

/// Weather phrase followed by a time-of-day phrase in fair weather.
pub fn atmosphere(ctx: &EnvironmentalContext) -> String {
    let bucket = ctx.weather_bucket();
    let dark = ctx.is_dark();
    let twilight = matches!(ctx.sun, SunState::Rise | SunState::Set);
    let weather = match bucket {
        WeatherBucket::Clear => "",
        WeatherBucket::Cloudy => " beneath a canopy of gray clouds",
        WeatherBucket::Rainy if dark => " as gentle rain patters softly in the darkness",
        WeatherBucket::Rainy if twilight => " where light rain creates a misty veil over the landscape",
        WeatherBucket::Rainy => " as steady rain drums against the earth",
        WeatherBucket::Stormy if dark => " while heavy rain pounds the ground through the night",
        WeatherBucket::Stormy => " as sheets of rain sweep across the terrain",
        WeatherBucket::Lightning if dark => {
            " as lightning tears through the storm-darkened sky, briefly illuminating the rain-soaked landscape"
        }
        WeatherBucket::Lightning => {
            " where lightning splits the turbulent sky above the storm-lashed terrain"
        }
    };
    let mut out = String::from(weather);
    if matches!(bucket, WeatherBucket::Clear | WeatherBucket::Cloudy) {
        if !out.is_empty() {
            out.push(',');
        }
        out.push_str(time_of_day(ctx));
    }
    out
}

fn time_of_day(ctx: &EnvironmentalContext) -> &'static str {
    match ctx.sun {
        SunState::Rise if ctx.has_light_sources => {
            " as the first light of dawn mingles with the warm glow of torchlight"
        }
        SunState::Rise => " as the first light of dawn filters through the landscape",
        SunState::Light => match ctx.hour {
            6..=9 => " in the gentle light of morning",
            10..=13 => " under the bright midday sun",
            14..=17 => " in the warm afternoon light",
            _ => " in the fading daylight of evening",
        },
        SunState::Set if ctx.has_light_sources => {
            " as twilight deepens and artificial light begins to push back the gathering darkness"
        }
        SunState::Set => " as twilight casts long shadows across the terrain",
        SunState::Dark if ctx.has_light_sources => {
            if ctx.artificial_light >= 50 {
                " illuminated by the warm glow of torchlight dancing across the landscape"
            } else if ctx.artificial_light >= 20 {
                " where flickering light creates shifting patterns of illumination and shadow"
            } else {
                " where a faint light source barely pierces the encompassing darkness"
            }
        }
        SunState::Dark => " under the pale light of moon and stars",
    }
}

// ---------------------------------------------------------------------------
// Wildlife
// ---------------------------------------------------------------------------

/// Wildlife presence, terrestrial or aquatic, banded by time of day.
pub fn wildlife(
    family: TerrainFamily,
    levels: &ResourceLevels,
    ctx: &EnvironmentalContext,
) -> Option<&'static str> {
    let vegetation = levels.get(ResourceKind::Vegetation);
    let game = levels.get(ResourceKind::Game);
    let aquatic = family.is_aquatic();

    if vegetation >= AbundanceTier::MODERATE && game >= AbundanceTier::MODERATE {
        let text = match (ctx.sun, aquatic) {
            (SunState::Rise | SunState::Set, false) => {
                ". Small creatures can be heard moving through the underbrush"
            }
            (SunState::Rise | SunState::Set, true) => ". Fish rise to snatch insects from the surface",
            (SunState::Light, false) => match ctx.hour {
                6..=11 => ". Birdsong echoes from the canopy above",
                12..=17 => ". The quiet rustle of leaves hints at hidden wildlife",
                _ => ". Evening wildlife begins to stir in the shadows",
            },
            (SunState::Light, true) => match ctx.hour {
                6..=11 => ". Small fish dart through the clear shallows",
                12..=17 => ". Ripples betray fish feeding beneath the surface",
                _ => ". Water birds settle along the margins for the evening",
            },
            (SunState::Dark, false) => ". Night sounds drift through the darkness",
            (SunState::Dark, true) => ". Soft splashes hint at creatures moving in the dark water",
        };
        Some(text)
    } else if vegetation >= AbundanceTier::SPARSE {
        Some(if aquatic {
            ". The water lies quiet and still"
        } else {
            ". The area rests in peaceful solitude"
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::fixtures::{context, levels};

    #[test]
    fn spring_forest_mentions_new_growth() {
        let ctx = context(SectorType::Forest, Season::Spring, SunState::Light, 9);
        let clause = vegetation(TerrainFamily::Forest, &levels(0.85, 0.0, 0.0, 0.0), &ctx);
        assert!(clause.is_some_and(|c| c.contains("new growth")));
    }

    #[test]
    fn water_terrain_gets_aquatic_flora_only() {
        let ctx = context(SectorType::WaterSwim, Season::Summer, SunState::Light, 12);
        let lv = levels(0.8, 0.9, 0.9, 0.0);
        assert_eq!(vegetation(TerrainFamily::Water, &lv, &ctx), None);
        assert!(aquatic_flora(TerrainFamily::Water, &lv).is_some());
        assert_eq!(geology(&lv, &ctx), None);
        assert_eq!(water_feature(&lv, &ctx), None);
    }

    #[test]
    fn geology_uses_torchlight_at_lit_night() {
        let mut ctx = context(SectorType::Mountain, Season::Winter, SunState::Dark, 2);
        ctx.has_light_sources = true;
        ctx.artificial_light = 60;
        let clause = geology(&levels(0.2, 0.8, 0.0, 0.0), &ctx);
        assert!(clause.is_some_and(|c| c.contains("torchlight")));
        let none = geology(&levels(0.2, 0.01, 0.0, 0.0), &ctx);
        assert_eq!(none, None);
    }

    #[test]
    fn elevation_bands_follow_meters() {
        assert!(elevation_band(TerrainFamily::Plains, 3.0).contains("sea"));
        assert!(elevation_band(TerrainFamily::Plains, 40.0).contains("lowlands"));
        assert!(elevation_band(TerrainFamily::Hills, 150.0).contains("upland"));
        assert!(elevation_band(TerrainFamily::Mountain, 400.0).contains("mountainous"));
        assert!(elevation_band(TerrainFamily::Mountain, 900.0).contains("peaks"));
    }

    #[test]
    fn elevation_clause_is_occasional() {
        let ctx = context(SectorType::Hills, Season::Summer, SunState::Light, 12);
        let mut rng = SmallRng::seed_from_u64(42);
        let hits = (0..1000)
            .filter(|_| elevation(TerrainFamily::Hills, &ctx, &mut rng).is_some())
            .count();
        assert!((300..500).contains(&hits), "{hits}");
    }

    #[test]
    fn atmosphere_crosses_weather_and_time() {
        let mut ctx = context(SectorType::Field, Season::Summer, SunState::Light, 12);
        assert_eq!(atmosphere(&ctx), " under the bright midday sun");
        ctx.weather = 150;
        assert_eq!(atmosphere(&ctx), " beneath a canopy of gray clouds, under the bright midday sun");
        ctx.sun = SunState::Dark;
        ctx.hour = 1;
        assert_eq!(atmosphere(&ctx), " beneath a canopy of gray clouds, under the pale light of moon and stars");
        ctx.sun = SunState::Light;
        ctx.hour = 12;
        ctx.weather = 210;
        assert_eq!(atmosphere(&ctx), " as sheets of rain sweep across the terrain");
        ctx.weather = 40;
        ctx.sun = SunState::Dark;
        ctx.hour = 1;
        assert_eq!(atmosphere(&ctx), " under the pale light of moon and stars");
        ctx.has_light_sources = true;
        ctx.artificial_light = 25;
        assert!(atmosphere(&ctx).contains("flickering"));
    }

    #[test]
    fn wildlife_needs_vegetation_and_game() {
        let ctx = context(SectorType::Forest, Season::Summer, SunState::Light, 8);
        let rich = levels(0.6, 0.0, 0.0, 0.6);
        assert_eq!(
            wildlife(TerrainFamily::Forest, &rich, &ctx),
            Some(". Birdsong echoes from the canopy above")
        );
        let quiet = levels(0.3, 0.0, 0.0, 0.1);
        assert_eq!(
            wildlife(TerrainFamily::Forest, &quiet, &ctx),
            Some(". The area rests in peaceful solitude")
        );
        assert_eq!(wildlife(TerrainFamily::Forest, &levels(0.05, 0.0, 0.0, 0.9), &ctx), None);
    }
}
