//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;

/// SmallVec sized for hierarchy name stacks (prefab trees are rarely deeper than 8).
pub type SmallVec8<T> = SmallVec<[T; 8]>;
