/*!
Descriptive statistics over a catalog, and the statistics payloads the
downstream training tools append to catalog records.
 */

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::catalog::CatalogRecord;

/// Distribution statistics of a catalog. Purely descriptive; nothing in
/// here carries pass/fail semantics.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogStats {
    /// Wavelet count per dimension.
    pub dimension_counts: BTreeMap<usize, usize>,
    /// Total number of rectangles over all wavelets.
    pub total_rectangles: usize,
    /// `width_histogram[s - 1]` counts rectangles of width `s`.
    pub width_histogram: Vec<usize>,
    /// `height_histogram[s - 1]` counts rectangles of height `s`.
    pub height_histogram: Vec<usize>,
    /// Rectangle centers bucketed into a coarse 3x3 grid over the window,
    /// indexed `[x band][y band]`.
    pub region_histogram: [[usize; 3]; 3],
}

/// Computes the distribution statistics of a loaded catalog.
pub fn catalog_stats(records: &[CatalogRecord], window_size: i32) -> CatalogStats {
    let n = window_size;
    // Band edges; on the 20x20 window these are the 8-4-8 horizontal and
    // 7-6-7 vertical regions.
    let (x_lo, x_hi) = (2 * n / 5, n - 2 * n / 5);
    let (y_lo, y_hi) = (7 * n / 20, n - 7 * n / 20);

    let mut stats = CatalogStats {
        dimension_counts: BTreeMap::new(),
        total_rectangles: 0,
        width_histogram: vec![0; n.max(0) as usize],
        height_histogram: vec![0; n.max(0) as usize],
        region_histogram: [[0; 3]; 3],
    };

    for record in records {
        let wavelet = &record.wavelet;
        *stats
            .dimension_counts
            .entry(wavelet.dimensions())
            .or_insert(0) += 1;

        for r in wavelet.rects() {
            stats.total_rectangles += 1;
            if r.width >= 1 && r.width <= n {
                stats.width_histogram[r.width as usize - 1] += 1;
            }
            if r.height >= 1 && r.height <= n {
                stats.height_histogram[r.height as usize - 1] += 1;
            }

            let (cx, cy) = r.center();
            let x_band = if cx < x_lo as f32 {
                0
            } else if cx < x_hi as f32 {
                1
            } else {
                2
            };
            let y_band = if cy < y_lo as f32 {
                0
            } else if cy < y_hi as f32 {
                1
            } else {
                2
            };
            stats.region_histogram[x_band][y_band] += 1;
        }
    }
    stats
}

impl fmt::Display for CatalogStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = |k: usize| self.dimension_counts.get(&k).copied().unwrap_or(0);
        writeln!(
            f,
            "Total 2D/3D/4D wavelets: {}/{}/{}",
            count(2),
            count(3),
            count(4)
        )?;
        writeln!(f, "Total rectangles: {}", self.total_rectangles)?;

        write!(f, "Width histogram:")?;
        for bucket in &self.width_histogram {
            write!(f, " {}", bucket)?;
        }
        writeln!(f)?;
        write!(f, "Height histogram:")?;
        for bucket in &self.height_histogram {
            write!(f, " {}", bucket)?;
        }
        writeln!(f)?;

        writeln!(f, "Rectangles mean position 2D histogram:")?;
        for y in 0..3 {
            for x in 0..3 {
                write!(f, "{} ", self.region_histogram[x][y])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Statistics payload a downstream tool attached to a wavelet record.
///
/// The downstream optimizers each use their own record layout; the
/// layouts only differ in the numeric tail after the weight list, so one
/// tagged type covers all of them. The geometry core never needs a
/// payload; these parsers exist for tools that inspect optimizer output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ClassifierStats {
    /// Feature-value mean and standard deviation of a Gaussian model.
    Gaussian { mean: f64, std_dev: f64 },
    /// Feature-value mean/stddev plus a probability histogram. The
    /// buckets of a well-formed payload sum to 1.
    Histogram {
        mean: f64,
        std_dev: f64,
        buckets: Vec<f64>,
    },
    /// Per-class probability histograms with class priors; each histogram
    /// is stored behind its own bucket count.
    DualHistogram {
        positive_prior: f64,
        positive: Vec<f64>,
        negative_prior: f64,
        negative: Vec<f64>,
    },
    /// One mean per wavelet dimension and a shared standard deviation.
    Band { means: Vec<f64>, std_dev: f64 },
}

impl ClassifierStats {
    /// `<mean> <stddev>`
    pub fn parse_gaussian(tail: &[f64]) -> Option<ClassifierStats> {
        match tail {
            [mean, std_dev] => Some(ClassifierStats::Gaussian {
                mean: *mean,
                std_dev: *std_dev,
            }),
            _ => None,
        }
    }

    /// `<mean> <stddev> <b1> ... <b_count>`
    pub fn parse_histogram(tail: &[f64], bucket_count: usize) -> Option<ClassifierStats> {
        if tail.len() != 2 + bucket_count {
            return None;
        }
        Some(ClassifierStats::Histogram {
            mean: tail[0],
            std_dev: tail[1],
            buckets: tail[2..].to_vec(),
        })
    }

    /// `<posPrior> <posCount> <pos...> <negPrior> <negCount> <neg...>`
    pub fn parse_dual_histogram(tail: &[f64]) -> Option<ClassifierStats> {
        let (positive_prior, rest) = tail.split_first()?;
        let (positive_count, rest) = rest.split_first()?;
        let positive_count = to_count(*positive_count)?;
        if rest.len() < positive_count {
            return None;
        }
        let (positive, rest) = rest.split_at(positive_count);

        let (negative_prior, rest) = rest.split_first()?;
        let (negative_count, rest) = rest.split_first()?;
        let negative_count = to_count(*negative_count)?;
        if rest.len() != negative_count {
            return None;
        }

        Some(ClassifierStats::DualHistogram {
            positive_prior: *positive_prior,
            positive: positive.to_vec(),
            negative_prior: *negative_prior,
            negative: rest.to_vec(),
        })
    }

    /// `<mean_1> ... <mean_k> <stddev>` for a `k`-dimensional wavelet.
    pub fn parse_band(tail: &[f64], dimensions: usize) -> Option<ClassifierStats> {
        if tail.len() != dimensions + 1 {
            return None;
        }
        Some(ClassifierStats::Band {
            means: tail[..dimensions].to_vec(),
            std_dev: tail[dimensions],
        })
    }

    /// Whether every probability histogram in the payload sums to 1
    /// within `eps`. Payloads without histograms pass trivially.
    pub fn histograms_sum_to_one(&self, eps: f64) -> bool {
        let sums_to_one = |buckets: &[f64]| (buckets.iter().sum::<f64>() - 1.0).abs() <= eps;
        match self {
            ClassifierStats::Histogram { buckets, .. } => sums_to_one(buckets),
            ClassifierStats::DualHistogram {
                positive, negative, ..
            } => sums_to_one(positive) && sums_to_one(negative),
            _ => true,
        }
    }
}

fn to_count(value: f64) -> Option<usize> {
    if value >= 0.0 && value.fract() == 0.0 {
        Some(value as usize)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wavelet::{HaarWavelet, Rect};

    fn record(rects: &[(i32, i32, i32, i32)]) -> CatalogRecord {
        CatalogRecord {
            wavelet: HaarWavelet::with_alternating_weights(
                rects.iter().map(|&(x, y, w, h)| Rect::new(x, y, w, h)).collect(),
            ),
            tail: Vec::new(),
        }
    }

    #[test]
    fn counts_dimensions_and_rectangles() {
        let records = vec![
            record(&[(0, 0, 3, 3), (3, 0, 3, 3)]),
            record(&[(0, 0, 3, 4), (3, 0, 3, 4), (6, 0, 3, 4)]),
        ];
        let stats = catalog_stats(&records, 20);
        assert_eq!(stats.dimension_counts.get(&2), Some(&1));
        assert_eq!(stats.dimension_counts.get(&3), Some(&1));
        assert_eq!(stats.total_rectangles, 5);
        assert_eq!(stats.width_histogram[2], 5);
        assert_eq!(stats.height_histogram[2], 2);
        assert_eq!(stats.height_histogram[3], 3);
    }

    #[test]
    fn buckets_rectangle_centers_into_the_window_bands() {
        // Centers: (1.5, 1.5) -> left/top band, (10, 10) -> middle band,
        // (18.5, 18.5) -> right/bottom band of the 20x20 window.
        let records = vec![record(&[(0, 0, 3, 3), (8, 8, 4, 4)]), record(&[(17, 17, 3, 3), (8, 8, 4, 4)])];
        let stats = catalog_stats(&records, 20);
        assert_eq!(stats.region_histogram[0][0], 1);
        assert_eq!(stats.region_histogram[1][1], 2);
        assert_eq!(stats.region_histogram[2][2], 1);
    }

    #[test]
    fn display_shows_the_dimension_totals() {
        let records = vec![record(&[(0, 0, 3, 3), (3, 0, 3, 3)])];
        let rendered = catalog_stats(&records, 20).to_string();
        assert!(rendered.starts_with("Total 2D/3D/4D wavelets: 1/0/0\n"));
        assert!(rendered.contains("Total rectangles: 2\n"));
    }

    #[test]
    fn parses_the_gaussian_payload() {
        let stats = ClassifierStats::parse_gaussian(&[0.5, 0.1]).unwrap();
        assert_eq!(
            stats,
            ClassifierStats::Gaussian {
                mean: 0.5,
                std_dev: 0.1
            }
        );
        assert!(ClassifierStats::parse_gaussian(&[0.5]).is_none());
    }

    #[test]
    fn parses_the_histogram_payload_and_checks_probabilities() {
        let tail = [0.5, 0.1, 0.25, 0.25, 0.5];
        let stats = ClassifierStats::parse_histogram(&tail, 3).unwrap();
        assert!(stats.histograms_sum_to_one(1e-6));

        let bad = ClassifierStats::parse_histogram(&[0.5, 0.1, 0.2, 0.2, 0.2], 3).unwrap();
        assert!(!bad.histograms_sum_to_one(1e-6));
    }

    #[test]
    fn parses_the_dual_histogram_payload() {
        let tail = [0.6, 2.0, 0.5, 0.5, 0.4, 3.0, 0.2, 0.3, 0.5];
        let stats = ClassifierStats::parse_dual_histogram(&tail).unwrap();
        match &stats {
            ClassifierStats::DualHistogram {
                positive, negative, ..
            } => {
                assert_eq!(positive.len(), 2);
                assert_eq!(negative.len(), 3);
            }
            _ => panic!("wrong variant"),
        }
        assert!(stats.histograms_sum_to_one(1e-6));
        // bucket count must match the remaining fields
        assert!(ClassifierStats::parse_dual_histogram(&[0.6, 3.0, 0.5, 0.5]).is_none());
    }

    #[test]
    fn parses_the_band_payload() {
        let stats = ClassifierStats::parse_band(&[0.1, 0.2, 0.3, 0.05], 3).unwrap();
        assert_eq!(
            stats,
            ClassifierStats::Band {
                means: vec![0.1, 0.2, 0.3],
                std_dev: 0.05
            }
        );
        assert!(ClassifierStats::parse_band(&[0.1, 0.2], 3).is_none());
    }
}
