/*!
Exhaustive generation of the wavelet catalog.

A wavelet is built by anchoring a first rectangle and then displacing
each following rectangle from the previous one by integer multiples of
the shared rectangle size. Disjointness of distinct rectangles holds by
construction, so a candidate placement only has to be rejected when it
leaves the window or lands exactly on an already placed rectangle.
 */

use rayon::prelude::*;

use crate::config::{DimensionPlan, GenerationConfig};
use crate::dedup::WaveletSet;
use crate::wavelet::{HaarWavelet, Rect};

/// Generates the deduplicated catalog for every dimension plan of
/// `config`, sorted in the canonical catalog order.
///
/// A window too small for the minimum rectangle size produces an empty
/// catalog, not an error.
pub fn generate(config: &GenerationConfig) -> Vec<HaarWavelet> {
    generate_set(config).into_sorted_vec()
}

/// Same as [`generate`] but keeps the result as a [`WaveletSet`].
pub fn generate_set(config: &GenerationConfig) -> WaveletSet {
    let mut wavelets = WaveletSet::new();
    for plan in &config.plans {
        // Each shared size is an independent slice of the search space,
        // so the sizes run in parallel into local sets. The collect keeps
        // the size order and the local sets are merged in that order,
        // which keeps the run reproducible.
        let local: Vec<WaveletSet> = shared_sizes(config, plan)
            .into_par_iter()
            .map(|(w, h)| {
                let mut set = WaveletSet::new();
                generate_sized(config, plan, w, h, &mut set);
                set
            })
            .collect();
        for set in local {
            wavelets.merge(set);
        }
        log::debug!(
            "{} wavelets in the set after dimension {}",
            wavelets.len(),
            plan.dimensions
        );
    }
    wavelets
}

/// Candidate shared `(width, height)` pairs for one dimension plan.
fn shared_sizes(config: &GenerationConfig, plan: &DimensionPlan) -> Vec<(i32, i32)> {
    let n = config.window.window_size;
    let mut sizes = Vec::new();
    for w in (config.window.min_rect_width..=n).step_by(plan.size_stride) {
        for h in (config.window.min_rect_height..=n).step_by(plan.size_stride) {
            sizes.push((w, h));
        }
    }
    sizes
}

/// Every wavelet of `plan.dimensions` rectangles sharing the size
/// `(w, h)`, anchored on `anchor_stride` steps.
fn generate_sized(
    config: &GenerationConfig,
    plan: &DimensionPlan,
    w: i32,
    h: i32,
    out: &mut WaveletSet,
) {
    let n = config.window.window_size;
    let mut placed = Vec::with_capacity(plan.dimensions);
    for x in (0..=n - w).step_by(config.anchor_stride) {
        for y in (0..=n - h).step_by(config.anchor_stride) {
            placed.push(Rect::new(x, y, w, h));
            place_remaining(n, plan.dimensions - 1, &mut placed, out);
            placed.pop();
        }
    }
}

/// Tries every valid integer-multiple displacement of the previous
/// rectangle for the next one, recursing until the wavelet is complete.
/// Partial placements are pruned as soon as a rectangle leaves the window
/// or coincides with one already placed.
fn place_remaining(n: i32, remaining: usize, placed: &mut Vec<Rect>, out: &mut WaveletSet) {
    if remaining == 0 {
        out.insert(HaarWavelet::with_alternating_weights(placed.clone()));
        return;
    }

    let prev = *placed.last().expect("the anchor rectangle is placed first");
    let (w, h) = (prev.width, prev.height);
    for dx in -(n / w)..n / w {
        for dy in -(n / h)..n / h {
            if dx == 0 && dy == 0 {
                // would coincide with the previous rectangle
                continue;
            }

            let candidate = Rect::new(prev.x + dx * w, prev.y + dy * h, w, h);
            if !candidate.fits_window(n) {
                continue;
            }
            // sizes are shared, so matching corners mean coincidence
            if placed.iter().any(|r| r.x == candidate.x && r.y == candidate.y) {
                continue;
            }

            placed.push(candidate);
            place_remaining(n, remaining - 1, placed, out);
            placed.pop();
        }
    }
}
