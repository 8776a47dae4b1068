//! Animation function table: `(kind, t)` to a per-frame transform.

/// Transform type and the kind -> transform mapping.
pub mod transform;
