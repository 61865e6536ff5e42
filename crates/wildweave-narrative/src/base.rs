//! Base template selection and clause assembly.
//!
//! The base description is one opening sentence chosen from the terrain
//! family's pool for the local vegetation tier, followed by detail clauses
//! in a fixed order. It never consults region hints.

use rand::Rng;
use wildweave_types::{AbundanceTier, ResourceKind, ResourceLevels, Season};
use wildweave_world::{EnvironmentalContext, RoomView};

use crate::clauses;
use crate::pools::{DAYLIGHT_WORDS, TerrainFamily, night_fallback, pool};
use crate::select::choose_template;
use crate::template::Template;

/// Line terminator appended to every description.
pub const LINE_END: &str = "\r\n";

/// Tree species for forest templates.
pub const fn tree_species(season: Season, near_water: bool) -> &'static str {
    match season {
        Season::Spring | Season::Summer if near_water => "willow",
        Season::Spring | Season::Summer => "oak",
        Season::Autumn => "maple",
        Season::Winter => "pine",
    }
}

/// Choose the opening sentence for a family, tier and context.
pub fn opening(
    family: TerrainFamily,
    tier: AbundanceTier,
    ctx: &EnvironmentalContext,
    rng: &mut impl Rng,
) -> String {
    opening_from(pool(family, tier), night_fallback(family), ctx, rng)
}

/// Choose from an explicit pool; daylight-only templates are refused at
/// night.
pub fn opening_from(
    candidates: &[Template],
    fallback: Template,
    ctx: &EnvironmentalContext,
    rng: &mut impl Rng,
) -> String {
    let night = ctx.is_dark();
    let chosen = choose_template(
        candidates,
        |template| night && template.mentions_any(&DAYLIGHT_WORDS),
        fallback,
        rng,
    );
    chosen.render(&[("tree", tree_species(ctx.season, ctx.near_water))])
}

/// Compose the full base description for a context and resource state.
pub fn compose(levels: &ResourceLevels, ctx: &EnvironmentalContext, rng: &mut impl Rng) -> String {
    let family = TerrainFamily::from_sector(ctx.sector);
    let tier = AbundanceTier::from_level(levels.get(ResourceKind::Vegetation));
    let mut out = opening(family, tier, ctx, rng);

    if family.is_aquatic() {
        out.extend(clauses::aquatic_flora(family, levels));
    } else {
        out.extend(clauses::vegetation(family, levels, ctx));
        out.extend(clauses::geology(levels, ctx));
        out.extend(clauses::water_feature(levels, ctx));
    }
    out.extend(clauses::elevation(family, ctx, rng));
    out.push_str(&clauses::atmosphere(ctx));
    out.extend(clauses::wildlife(family, levels, ctx));

    finish(out)
}

/// Select and format the base description for a room.
///
/// Returns `None` when the room has no wilderness coordinates.
pub fn select_and_format(
    room: &RoomView,
    levels: &ResourceLevels,
    ctx: &EnvironmentalContext,
    rng: &mut impl Rng,
) -> Option<String> {
    let Some(at) = room.wilderness_coords() else {
        tracing::warn!(vnum = %room.vnum, "Base description requested for a room without coordinates");
        return None;
    };
    let text = compose(levels, ctx, rng);
    tracing::debug!(x = at.x, y = at.y, len = text.len(), "Composed base description");
    Some(text)
}

/// Terminate with a period, unless already punctuated, and [`LINE_END`].
pub fn finish(mut text: String) -> String {
    let trimmed = text.trim_end().len();
    text.truncate(trimmed);
    if !text.ends_with(['.', '!', '?']) {
        text.push('.');
    }
    text.push_str(LINE_END);
    text
}
