//! Centralized constants for the matrix inspector engine
//!
//! All tunable numbers used by the transformation and orchestration code live
//! here rather than being scattered throughout the modules.

// ============================================================================
// SYMMETRY DETECTION
// ============================================================================

/// Relative tolerance used when comparing mirrored values
pub const DEFAULT_RELATIVE_TOLERANCE: f64 = 1e-8;

/// Absolute tolerance floor used when comparing mirrored values
pub const DEFAULT_ABSOLUTE_TOLERANCE: f64 = f64::EPSILON;

// ============================================================================
// PROGRESS REPORTING
// ============================================================================

/// Maximum number of progress reports emitted by a single long loop (1% steps)
pub const DEFAULT_PROGRESS_STEPS: usize = 100;

/// Share of a CSR reorder spent building offsets and the rename table
pub const REORDER_SETUP_SHARE: f64 = 0.1;

/// Share of a reduce spent building the column map
pub const REDUCE_SETUP_SHARE: f64 = 0.1;

/// Share of a CSR transpose spent on the histogram pass
pub const TRANSPOSE_HISTOGRAM_SHARE: f64 = 0.3;

/// Share of a stats computation spent settling symmetry when it is unknown
pub const STATS_SYMMETRY_SHARE: f64 = 0.5;

/// Share of the remaining stats budget spent on the row pass
pub const STATS_ROW_SHARE: f64 = 0.5;

/// Share of a reorder orchestration call spent generating permutations
pub const ORCHESTRATION_REORDER_SETUP_SHARE: f64 = 0.1;

/// Share of a sampling orchestration call spent selecting indices
pub const ORCHESTRATION_SAMPLE_SETUP_SHARE: f64 = 0.2;

// ============================================================================
// DEBUG OUTPUT
// ============================================================================

/// Number of rows shown by the `Debug` implementations
pub const DEBUG_MAX_ROWS: usize = 5;

/// Number of entries per row shown by the `Debug` implementations
pub const DEBUG_MAX_ENTRIES: usize = 5;
