//! Random selection helpers shared by the template selector and the weaver.

use rand::Rng;

use crate::template::Template;

/// Random draws attempted before falling back to a deterministic scan.
pub const MAX_TEMPLATE_DRAWS: usize = 50;

/// Pick an index with probability proportional to its weight.
///
/// Walks cumulative weights against a uniform draw in `[0, total)`.
/// Non-finite and negative weights count as zero; when the total is not
/// positive the pick is uniform. Returns `None` only for an empty slice.
pub fn weighted_index(weights: &[f64], rng: &mut impl Rng) -> Option<usize> {
    if weights.is_empty() {
        return None;
    }
    let clean = |w: f64| if w.is_finite() && w > 0.0 { w } else { 0.0 };
    let total: f64 = weights.iter().copied().map(clean).sum();
    if total <= 0.0 {
        return Some(rng.random_range(0..weights.len()));
    }

    let target = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (index, weight) in weights.iter().copied().map(clean).enumerate() {
        cumulative += weight;
        if target < cumulative {
            return Some(index);
        }
    }
    // Rounding can leave the target at the very top of the range.
    weights.iter().rposition(|w| clean(*w) > 0.0)
}

/// Choose a template from `pool`, skipping any that `reject` refuses.
///
/// Up to [`MAX_TEMPLATE_DRAWS`] random draws, then the first acceptable
/// template in pool order, then `fallback`.
pub fn choose_template(
    pool: &[Template],
    reject: impl Fn(Template) -> bool,
    fallback: Template,
    rng: &mut impl Rng,
) -> Template {
    if pool.is_empty() {
        return fallback;
    }
    for _ in 0..MAX_TEMPLATE_DRAWS {
        if let Some(candidate) = pool.get(rng.random_range(0..pool.len())).copied()
            && !reject(candidate)
        {
            return candidate;
        }
    }
    pool.iter()
        .copied()
        .find(|candidate| !reject(*candidate))
        .unwrap_or(fallback)
}
