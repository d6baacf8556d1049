/*!
Generation and checking of Haar wavelet catalogs.

A Haar wavelet here is a small set of equally sized, axis-aligned
rectangles with alternating signed weights, placed inside a square
sampling window. Catalogs are built under Pavani's restrictions:

1. only 2 to 4 rectangles per wavelet
2. a fixed square sampling window (20x20 unless configured otherwise)
3. no rotated rectangles
4. disjoint rectangles are away from each other an integer multiple of
   the rectangle size
5. all rectangles in a wavelet have the same size
6. no rectangles smaller than 3x3

The `generate` module enumerates every valid wavelet and deduplicates
them up to rectangle order; the `validate` and `stats` modules re-check
a persisted catalog with independent brute-force scans and report its
distribution.
 */

pub mod catalog;
pub mod config;
pub mod dedup;
pub mod generate;
pub mod stats;
pub mod validate;
pub mod wavelet;

pub use crate::catalog::{load_catalog, save_catalog, CatalogError, CatalogRecord, LoadedCatalog};
pub use crate::config::{DimensionPlan, GenerationConfig, WindowConfig};
pub use crate::dedup::WaveletSet;
pub use crate::generate::generate;
pub use crate::stats::{catalog_stats, CatalogStats, ClassifierStats};
pub use crate::wavelet::{HaarWavelet, Rect};
