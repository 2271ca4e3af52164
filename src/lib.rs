//! A sorted set backed by a skiplist.  Elements can be looked up, inserted and removed in
//! `O(log(n))` on average, and are always iterated in ascending order.
//!
//! Conceptually, a skiplist resembles something like:
//!
//! ```text
//! <head> ----------> [2] --------------------------------------------------> [9] ---------->
//! <head> ----------> [2] ------------------------------------[7] ----------> [9] ---------->
//! <head> ----------> [2] ----------> [4] ------------------> [7] ----------> [9] --> [10] ->
//! <head> --> [1] --> [2] --> [3] --> [4] --> [5] --> [6] --> [7] --> [8] --> [9] --> [10] ->
//! ```
//!
//! where each node `[x]` has references to nodes further down the list, allowing the search to
//! skip ahead.  A node's height is drawn with fair coin flips when it is inserted, capped at the
//! number of levels in use, and that number follows the size of the set.
//!
//! Elements use their natural order.  It **must** be well-behaved for every stored value:
//!
//! - Be well defined: `a.partial_cmp(b)` should always return the same value
//! - Be anti-symmetric: `a > b` iff `b < a`
//! - Be transitive: if `a > b` and `b > c` then `a > c`
//!
//! Values which are not comparable to themselves, such as `f64::NAN`, are refused by `add`.
//!
//! ```
//! use skipset::SkipListSet;
//!
//! let mut set = SkipListSet::with_seed(42);
//! for x in &[5, 2, 8, 2] {
//!     set.add(*x).unwrap();
//! }
//! assert_eq!(set.len(), 3);
//! assert_eq!(set.to_string(), "[2, 5, 8]");
//! ```

pub mod algebra;
pub mod error;
pub mod level_generator;
pub mod skiplist_set;
mod skipnode;

pub use crate::algebra::Contains;
pub use crate::error::SetError;
pub use crate::level_generator::{CoinFlipLevelGenerator, LevelGenerator};
pub use crate::skiplist_set::{IntoIter, Iter, SkipListSet};
pub use config::{Config, ConfigError};
pub use logger::{Level, Logger};
