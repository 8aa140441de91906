//! Configuration constants for memfs.

/// Default minimum degree `t` of directory B-trees.
///
/// The minimum degree bounds node fan-out:
/// - Every node holds at most `2t - 1` entries.
/// - Every node except the root holds at least `t - 1` entries.
/// - An internal node with `k` entries has exactly `k + 1` children.
///
/// # Capacity
/// With `t = 3`, each node holds 2–5 entries (root: 0–5) and internal
/// nodes have 3–6 children. A directory with a million entries is at
/// most `log_3(1_000_000) ≈ 13` levels deep.
///
/// The engine takes the degree as a const generic with this value as
/// the default, so alternative degrees (e.g. `t = 2`, a 2-3-4 tree) can
/// be instantiated without touching the default directory layout.
pub const MIN_DEGREE: usize = 3;

/// Maximum entries per node at the default degree.
pub const MAX_ENTRIES: usize = 2 * MIN_DEGREE - 1;

/// Maximum children per internal node at the default degree.
pub const MAX_CHILDREN: usize = 2 * MIN_DEGREE;
