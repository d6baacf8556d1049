/*!
Brute-force re-verification of a persisted catalog.

The checks deliberately avoid the generator's hash/bucket shortcut:
everything is re-derived with plain quadratic scans so a defect in the
dedup structure cannot hide itself.
 */

use rayon::prelude::*;

use crate::catalog::CatalogRecord;
use crate::config::WindowConfig;
use crate::wavelet::Rect;

/// Indices of records containing two rectangles with identical
/// coordinates.
///
/// Coincidence, not geometric intersection, is the literal rule checked:
/// the displacement construction already keeps distinct rectangles from
/// intersecting, so an intersecting pair can only show up as an exact
/// duplicate.
pub fn coincident_rects(records: &[CatalogRecord]) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| {
            let rects = record.wavelet.rects();
            rects
                .iter()
                .enumerate()
                .any(|(i, a)| rects.iter().skip(i + 1).any(|b| a == b))
        })
        .map(|(index, _)| index)
        .collect()
}

/// Indices of records with a rectangle leaving the window or under the
/// minimum size.
pub fn out_of_bounds(records: &[CatalogRecord], window: &WindowConfig) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| {
            record
                .wavelet
                .rects()
                .iter()
                .any(|r| rect_out_of_bounds(r, window))
        })
        .map(|(index, _)| index)
        .collect()
}

fn rect_out_of_bounds(r: &Rect, window: &WindowConfig) -> bool {
    let n = window.window_size;
    r.x < 0
        || r.y < 0
        || r.x >= n
        || r.y >= n
        || r.x + r.width > n
        || r.y + r.height > n
        || r.width < window.min_rect_width
        || r.height < window.min_rect_height
}

/// All pairs of distinct records that are canonically equal, i.e.
/// duplicates the generator's deduplication should have merged. The scan
/// is `O(n^2)` on purpose; pairs come back in (first, second) index
/// order.
pub fn duplicate_pairs(records: &[CatalogRecord]) -> Vec<(usize, usize)> {
    records
        .par_iter()
        .enumerate()
        .map(|(i, a)| {
            records[i + 1..]
                .iter()
                .enumerate()
                .filter(|(_, b)| a.wavelet.canonical_eq(&b.wavelet))
                .map(|(offset, _)| (i, i + 1 + offset))
                .collect::<Vec<_>>()
        })
        .flatten()
        .collect()
}
