/*!
Runtime configuration for the generator and the checks.

The window and the minimum rectangle size are plain values instead of
compile-time constants so tests can run tiny windows and callers can
change the scan granularity without recompiling.
 */

/// Geometry limits shared by the generator and the checker.
#[derive(Debug, Clone, Copy)]
pub struct WindowConfig {
    /// Side of the square sampling window, in pixels.
    pub window_size: i32,
    /// Smallest allowed rectangle width.
    pub min_rect_width: i32,
    /// Smallest allowed rectangle height.
    pub min_rect_height: i32,
}

impl Default for WindowConfig {
    fn default() -> WindowConfig {
        WindowConfig {
            window_size: 20,
            min_rect_width: 3,
            min_rect_height: 3,
        }
    }
}

impl WindowConfig {
    /// Default limits on a differently sized window.
    pub fn with_window_size(window_size: i32) -> WindowConfig {
        WindowConfig {
            window_size,
            ..WindowConfig::default()
        }
    }
}

/// How the wavelets of one rectangle count are scanned.
#[derive(Debug, Clone, Copy)]
pub struct DimensionPlan {
    /// Rectangle count of the generated wavelets.
    pub dimensions: usize,
    /// Step used when scanning the shared rectangle width and height.
    pub size_stride: usize,
}

/// Configuration of a full generation run.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub window: WindowConfig,
    /// Step used when scanning the position of the first rectangle.
    pub anchor_stride: usize,
    /// One entry per generated dimension.
    pub plans: Vec<DimensionPlan>,
}

impl Default for GenerationConfig {
    /// The canonical run: 20x20 window, rectangles of at least 3x3,
    /// dimensions 2, 3 and 4. The 2-rectangle scan visits every candidate
    /// size while the deeper dimensions skip every other one to keep the
    /// search tractable.
    fn default() -> GenerationConfig {
        GenerationConfig {
            window: WindowConfig::default(),
            anchor_stride: 2,
            plans: vec![
                DimensionPlan {
                    dimensions: 2,
                    size_stride: 1,
                },
                DimensionPlan {
                    dimensions: 3,
                    size_stride: 2,
                },
                DimensionPlan {
                    dimensions: 4,
                    size_stride: 2,
                },
            ],
        }
    }
}

impl GenerationConfig {
    /// The default plans on a differently sized window.
    pub fn with_window_size(window_size: i32) -> GenerationConfig {
        GenerationConfig {
            window: WindowConfig::with_window_size(window_size),
            ..GenerationConfig::default()
        }
    }
}
