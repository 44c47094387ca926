/// Fixed-point equalized sample, one per channel tick.
pub type Sample = i16;
/// Squared-error cost of one trellis branch.
pub type BranchMetric = u32;
/// Accumulated squared-error cost of a survivor path.
pub type PathMetric = u32;

/// Lowest sample value accepted by the branch metric unit (12-bit window).
pub const SAMPLE_MIN: Sample = -2048;
/// Highest sample value accepted by the branch metric unit.
pub const SAMPLE_MAX: Sample = 2047;

/// Branch metrics are 24 bits wide before widening into the path metric.
pub const BRANCH_METRIC_BITS: u32 = 24;
/// Largest representable branch metric.
pub const BRANCH_METRIC_MAX: BranchMetric = (1 << BRANCH_METRIC_BITS) - 1;

/// Number of states in the PR4 trellis.
pub const STATES: usize = 4;

/// Path metrics are rebased once their minimum exceeds half the metric range.
pub const NORMALIZE_THRESHOLD: PathMetric = PathMetric::MAX / 2;

/// Fixed-point value of unit amplitude in the default reference levels.
pub const UNIT_AMPLITUDE: Sample = 32;

/// Default survivor history depth, which is also the decoding delay.
pub const TRACEBACK_DEPTH: usize = 32;

/// Consecutive converged samples required to declare lock.
pub const LOCK_WINDOW: usize = 64;
/// Default lock threshold of the minimum path metric basis. The minimum increment basis
/// derives its default from the reference levels instead.
pub const LOCK_THRESHOLD: PathMetric = 1 << 16;
