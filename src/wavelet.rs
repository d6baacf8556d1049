/*!
Core geometry of the catalog: rectangles, wavelets, and the canonical
identity used to deduplicate wavelets.
 */

use std::fmt;

/// Axis-aligned rectangle in window-relative pixel coordinates.
///
/// Fields are signed because the generation search produces candidate
/// positions outside the window before rejecting them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Rect {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// True when the rectangle lies fully inside an `n`x`n` window.
    pub fn fits_window(&self, n: i32) -> bool {
        self.x >= 0 && self.y >= 0 && self.x + self.width <= n && self.y + self.height <= n
    }

    /// Center of the rectangle, used by the region statistics.
    pub fn center(&self) -> (f32, f32) {
        (
            self.x as f32 + self.width as f32 / 2.0,
            self.y as f32 + self.height as f32 / 2.0,
        )
    }
}

// Keeps wavelets of different rectangle counts in mostly distinct hash
// ranges.
const DIMENSION_SALT: i64 = 160_000;

/// A Haar wavelet: `k` equally sized rectangles and `k` signed weights.
///
/// The rectangle list keeps the order the generator placed it in, but the
/// identity of a wavelet ignores that order, see
/// [`canonical_eq`](HaarWavelet::canonical_eq).
#[derive(Debug, Clone)]
pub struct HaarWavelet {
    rects: Vec<Rect>,
    weights: Vec<f32>,
}

impl HaarWavelet {
    pub fn new(rects: Vec<Rect>, weights: Vec<f32>) -> HaarWavelet {
        debug_assert_eq!(rects.len(), weights.len());
        HaarWavelet { rects, weights }
    }

    /// Builds a wavelet with the fixed alternating weight assignment
    /// `+1, -1, +1, -1, ...` every freshly generated wavelet carries.
    pub fn with_alternating_weights(rects: Vec<Rect>) -> HaarWavelet {
        let weights = alternating_weights(rects.len());
        HaarWavelet { rects, weights }
    }

    /// Number of rectangles.
    pub fn dimensions(&self) -> usize {
        self.rects.len()
    }

    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// The rectangles sorted into a canonical order. Two wavelets are the
    /// same entity exactly when their dimensions and these sequences
    /// match.
    pub fn canonical_rects(&self) -> Vec<Rect> {
        let mut rects = self.rects.clone();
        rects.sort_unstable();
        rects
    }

    /// Order-independent, multiplicity-sensitive equality of the
    /// rectangle multisets. Weights take no part in wavelet identity:
    /// they are a fixed function of the dimension at generation time.
    pub fn canonical_eq(&self, other: &HaarWavelet) -> bool {
        self.dimensions() == other.dimensions() && self.canonical_rects() == other.canonical_rects()
    }

    /// Cheap bucketing hash: the sum of `x*y*width*height` over the
    /// rectangles, salted by the dimension count. It collides easily
    /// (any rectangle touching x=0 or y=0 contributes nothing), so it
    /// must always be backed by [`canonical_eq`](HaarWavelet::canonical_eq).
    pub fn weak_hash(&self) -> u64 {
        let rects_sum: i64 = self
            .rects
            .iter()
            .map(|r| r.x as i64 * r.y as i64 * r.width as i64 * r.height as i64)
            .sum();
        (rects_sum + DIMENSION_SALT * (self.dimensions() as i64 - 2)) as u64
    }
}

impl fmt::Display for HaarWavelet {
    /// Formats the wavelet as its catalog record prefix:
    /// `<k> <x1> <y1> <w1> <h1> ... <weight1> ...`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dimensions())?;
        for r in &self.rects {
            write!(f, " {} {} {} {}", r.x, r.y, r.width, r.height)?;
        }
        for w in &self.weights {
            write!(f, " {}", w)?;
        }
        Ok(())
    }
}

/// `+1, -1, +1, -1, ...`
pub fn alternating_weights(k: usize) -> Vec<f32> {
    (0..k).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wavelet(rects: &[(i32, i32, i32, i32)]) -> HaarWavelet {
        HaarWavelet::with_alternating_weights(
            rects.iter().map(|&(x, y, w, h)| Rect::new(x, y, w, h)).collect(),
        )
    }

    #[test]
    fn canonical_eq_ignores_rectangle_order() {
        let a = wavelet(&[(0, 0, 3, 3), (6, 0, 3, 3)]);
        let b = wavelet(&[(6, 0, 3, 3), (0, 0, 3, 3)]);
        assert!(a.canonical_eq(&b));
        assert!(b.canonical_eq(&a));
    }

    #[test]
    fn canonical_eq_counts_multiplicity() {
        let r1 = (0, 0, 3, 3);
        let r2 = (6, 0, 3, 3);
        let a = wavelet(&[r1, r1, r2]);
        let b = wavelet(&[r1, r2, r1]);
        let c = wavelet(&[r1, r2, r2]);
        assert!(a.canonical_eq(&b));
        assert!(!a.canonical_eq(&c));
        assert!(!c.canonical_eq(&a));
    }

    #[test]
    fn canonical_eq_is_transitive() {
        let a = wavelet(&[(0, 0, 3, 3), (3, 3, 3, 3), (6, 6, 3, 3)]);
        let b = wavelet(&[(3, 3, 3, 3), (6, 6, 3, 3), (0, 0, 3, 3)]);
        let c = wavelet(&[(6, 6, 3, 3), (0, 0, 3, 3), (3, 3, 3, 3)]);
        assert!(a.canonical_eq(&b));
        assert!(b.canonical_eq(&c));
        assert!(a.canonical_eq(&c));
    }

    #[test]
    fn different_dimensions_never_equal() {
        let a = wavelet(&[(0, 0, 3, 3), (3, 0, 3, 3)]);
        let b = wavelet(&[(0, 0, 3, 3), (3, 0, 3, 3), (6, 0, 3, 3)]);
        assert!(!a.canonical_eq(&b));
    }

    #[test]
    fn weak_hash_collides_on_zero_products() {
        // Every rectangle touches x=0, so both wavelets hash to the same
        // bucket while being distinct entities.
        let a = wavelet(&[(0, 1, 3, 3), (0, 4, 3, 3)]);
        let b = wavelet(&[(0, 2, 3, 3), (0, 8, 3, 3)]);
        assert_eq!(a.weak_hash(), b.weak_hash());
        assert!(!a.canonical_eq(&b));
    }

    #[test]
    fn weak_hash_salts_by_dimension() {
        let a = wavelet(&[(2, 3, 3, 3), (5, 3, 3, 3)]);
        let b = wavelet(&[(2, 3, 3, 3), (5, 3, 3, 3), (8, 3, 3, 3)]);
        assert_ne!(a.weak_hash(), b.weak_hash());
    }

    #[test]
    fn display_matches_record_format() {
        let w = wavelet(&[(0, 2, 3, 4), (3, 2, 3, 4)]);
        assert_eq!(w.to_string(), "2 0 2 3 4 3 2 3 4 1 -1");
    }

    #[test]
    fn alternating_weights_start_positive() {
        assert_eq!(alternating_weights(2), vec![1.0, -1.0]);
        assert_eq!(alternating_weights(3), vec![1.0, -1.0, 1.0]);
        assert_eq!(alternating_weights(4), vec![1.0, -1.0, 1.0, -1.0]);
    }
}
