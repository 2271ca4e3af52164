use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::default;
use std::fmt;
use std::hash::{self, Hash, Hasher};
use std::iter;
use std::mem;

use config::{Config, DEFAULT_INITIAL_LEVELS};
use logger::{log, Logger};

use crate::error::SetError;
use crate::level_generator::{CoinFlipLevelGenerator, LevelGenerator};
use crate::skipnode::SkipNode;

/// Arena index of the head node.
const HEAD: usize = 0;

/// `ceil(log2(len + 1))`, which is the bit length of `len`.  An empty set keeps `initial` levels.
fn level_cap_for(len: usize, initial: usize) -> usize {
    if len == 0 {
        initial
    } else {
        (usize::BITS - len.leading_zeros()) as usize
    }
}

/// A value takes part in the ordering only if it can be compared to itself.
fn orderable<T: PartialOrd>(value: &T) -> bool {
    value.partial_cmp(value).is_some()
}

// /////////////////////////////////////////////////////////////////////////////////////////////////
// SkipListSet
// /////////////////////////////////////////////////////////////////////////////////////////////////

/// A sorted set of unique elements stored in a skiplist.
///
/// Elements are kept in their natural order (`PartialOrd`); two elements are the same element when
/// neither is less than the other.  Values which cannot be compared to themselves (such as
/// `f64::NAN`) cannot be stored: `add` rejects them with `SetError::InvalidArgument`, while
/// `contains` and `remove` simply report that they are absent.
///
/// The number of levels in use, `level_cap`, follows the size of the set: after every insertion it
/// is `ceil(log2(len + 1))`.  Removals never lower it, and `rebalance` rebuilds the whole
/// structure with freshly drawn heights.
///
/// # Examples
///
/// ```
/// use skipset::SkipListSet;
///
/// let mut set = SkipListSet::new();
/// set.add(5).unwrap();
/// set.add(2).unwrap();
/// set.add(8).unwrap();
/// assert!(!set.add(2).unwrap());
///
/// assert_eq!(set.len(), 3);
/// assert_eq!(set.iter().collect::<Vec<_>>(), vec![&2, &5, &8]);
/// assert_eq!(set.first().unwrap(), &2);
/// assert_eq!(set.last().unwrap(), &8);
/// ```
#[derive(Clone)]
pub struct SkipListSet<T, G = CoinFlipLevelGenerator> {
    // Arena of nodes.  `nodes[HEAD]` is the head; released slots are vacant and listed in `free`.
    nodes: Vec<SkipNode<T>>,
    free: Vec<usize>,
    len: usize,
    level_cap: usize,
    initial_levels: usize,
    level_generator: G,
    logger: Option<Logger>,
}

// ///////////////////////////////////////////////
// Inherent methods
// ///////////////////////////////////////////////

impl<T> SkipListSet<T>
where
    T: PartialOrd,
{
    /// Create a new, empty set with 8 levels and a level generator seeded from entropy.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipListSet;
    ///
    /// let set: SkipListSet<i64> = SkipListSet::new();
    /// assert!(set.is_empty());
    /// assert_eq!(set.level_cap(), 8);
    /// ```
    #[inline]
    pub fn new() -> Self {
        SkipListSet::with_generator(CoinFlipLevelGenerator::new())
    }

    /// Create a new, empty set whose node heights are drawn from a generator seeded with `seed`.
    /// Two sets built with the same seed and the same operations have the same shape.
    #[inline]
    pub fn with_seed(seed: u64) -> Self {
        SkipListSet::with_generator(CoinFlipLevelGenerator::seeded(seed))
    }

    /// Create a new, empty set from a configuration: its initial number of levels, the generator
    /// seed (if any), and the logger.
    ///
    /// Fails if the configured log file cannot be created.
    pub fn with_config(config: &Config) -> Result<Self, SetError> {
        let level_generator = match config.seed {
            Some(seed) => CoinFlipLevelGenerator::seeded(seed),
            None => CoinFlipLevelGenerator::new(),
        };
        let mut set = SkipListSet::build(level_generator, config.initial_levels);
        set.logger = Some(config.logger()?);
        Ok(set)
    }

    /// Create a set holding every value produced by `values`.  Duplicates are dropped.
    ///
    /// Fails with `SetError::InvalidArgument` if any value cannot be ordered.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipListSet;
    ///
    /// let set = SkipListSet::from_values(vec![3, 1, 3, 2]).unwrap();
    /// assert_eq!(set.to_vec(), vec![1, 2, 3]);
    /// assert!(SkipListSet::from_values(vec![1.0, std::f64::NAN]).is_err());
    /// ```
    pub fn from_values<I>(values: I) -> Result<Self, SetError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut set = SkipListSet::new();
        set.add_all(values)?;
        Ok(set)
    }

    /// Custom orderings are not supported; elements always use their natural order.
    pub fn with_comparator<F>(_compare: F) -> Result<Self, SetError>
    where
        F: Fn(&T, &T) -> Ordering,
    {
        Err(SetError::Unsupported("custom comparator"))
    }
}

impl<T, G> SkipListSet<T, G>
where
    T: PartialOrd,
    G: LevelGenerator,
{
    /// Create a new, empty set drawing node heights from `level_generator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::{CoinFlipLevelGenerator, SkipListSet};
    ///
    /// let mut set = SkipListSet::with_generator(CoinFlipLevelGenerator::seeded(7));
    /// set.add("b").unwrap();
    /// set.add("a").unwrap();
    /// assert_eq!(set.first().unwrap(), &"a");
    /// ```
    pub fn with_generator(level_generator: G) -> Self {
        SkipListSet::build(level_generator, DEFAULT_INITIAL_LEVELS)
    }

    fn build(level_generator: G, initial_levels: usize) -> Self {
        let initial_levels = initial_levels.max(1);
        SkipListSet {
            nodes: vec![SkipNode::head(initial_levels)],
            free: Vec::new(),
            len: 0,
            level_cap: initial_levels,
            initial_levels: initial_levels,
            level_generator: level_generator,
            logger: None,
        }
    }

    /// Returns true if the value is contained in the set.  Values which cannot be ordered are
    /// never contained.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipListSet;
    ///
    /// let mut set = SkipListSet::new();
    /// set.add_all(0..10).unwrap();
    /// assert!(set.contains(&4));
    /// assert!(!set.contains(&15));
    /// ```
    pub fn contains(&self, value: &T) -> bool {
        if !orderable(value) {
            return false;
        }
        let (_, candidate) = self.search(value);
        self.matching(candidate, value).is_some()
    }

    /// Insert the element into the set.  Returns `Ok(false)`, leaving the set unchanged, if an
    /// equal element is already present.
    ///
    /// # Errors
    ///
    /// `SetError::InvalidArgument` if the value cannot be ordered.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipListSet;
    ///
    /// let mut set = SkipListSet::new();
    /// assert!(set.add(0).unwrap());
    /// assert!(set.add(5).unwrap());
    /// assert!(!set.add(5).unwrap());
    /// assert_eq!(set.len(), 2);
    ///
    /// let mut floats = SkipListSet::new();
    /// assert!(floats.add(std::f64::NAN).is_err());
    /// assert!(floats.is_empty());
    /// ```
    pub fn add(&mut self, value: T) -> Result<bool, SetError> {
        if !orderable(&value) {
            if let Some(logger) = self.logger.as_mut() {
                log!(logger, Warning, "rejected an element which cannot be ordered");
            }
            return Err(SetError::InvalidArgument);
        }
        self.insert(value)
    }

    /// Removes the element equal to `value`, returning whether it was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipListSet;
    ///
    /// let mut set = SkipListSet::new();
    /// set.add_all(0..10).unwrap();
    /// assert!(set.remove(&4));
    /// assert!(!set.remove(&4));
    /// ```
    pub fn remove(&mut self, value: &T) -> bool {
        self.take(value).is_some()
    }

    /// Removes and returns the element equal to `value`, or `None` if there is no such element.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipListSet;
    ///
    /// let mut set = SkipListSet::new();
    /// set.add_all(vec!["a", "b"]).unwrap();
    /// assert_eq!(set.take(&"a"), Some("a"));
    /// assert_eq!(set.take(&"a"), None);
    /// ```
    pub fn take(&mut self, value: &T) -> Option<T> {
        if self.len == 0 || !orderable(value) {
            return None;
        }
        let (update, candidate) = self.search(value);
        let target = self.matching(candidate, value)?;

        // Relink from the bottom up.  Once a predecessor no longer points at the target, the
        // target does not reach that level (nor any above it).
        for (lvl, &prev) in update.iter().enumerate() {
            if self.nodes[prev].links[lvl] != Some(target) {
                break;
            }
            self.nodes[prev].links[lvl] = self.nodes[target].links[lvl];
        }
        self.len -= 1;
        self.release(target)
    }

    /// Discards the current structure and inserts every element again, in ascending order, into a
    /// fresh one.  Every node gets a newly drawn height and the level cap is recomputed.
    ///
    /// This restores the expected shape after heavy removal, or after the set grew while the
    /// level cap was still small.
    ///
    /// # Errors
    ///
    /// `SetError::InvalidHeight` if the level generator produces a height of 0.  Every height is
    /// drawn before the structure is touched, so the set is left as it was.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipListSet;
    ///
    /// let mut set = SkipListSet::new();
    /// set.add_all(0..100).unwrap();
    /// set.remove_all(&(0..90).collect::<Vec<_>>());
    /// set.rebalance().unwrap();
    /// assert_eq!(set.len(), 10);
    /// assert_eq!(set.level_cap(), 4);
    /// ```
    pub fn rebalance(&mut self) -> Result<(), SetError> {
        // the i-th reinsertion happens while the set holds i elements
        let mut heights = Vec::with_capacity(self.len);
        for placed in 0..self.len {
            heights.push(self.draw_height(level_cap_for(placed, self.initial_levels))?);
        }

        let mut old_nodes = mem::replace(&mut self.nodes, vec![SkipNode::head(self.initial_levels)]);
        let mut cursor = old_nodes[HEAD].links.first().cloned().flatten();
        self.free.clear();
        self.len = 0;
        self.level_cap = self.initial_levels;

        for height in heights {
            let idx = match cursor {
                Some(idx) => idx,
                None => break,
            };
            let mut node = mem::replace(&mut old_nodes[idx], SkipNode::vacant());
            cursor = node.links[0];
            node.links = vec![None; height];
            let update = match node.value {
                Some(ref value) => self.search(value).0,
                None => break,
            };
            self.splice(node, &update);
        }

        if let Some(logger) = self.logger.as_mut() {
            log!(logger, Notice, "rebalanced {} elements over {} levels", self.len, self.level_cap);
        }
        if self.logger.as_ref().map_or(false, |l| l.enabled(logger::Level::Debug)) {
            let sizes = self.level_sizes();
            if let Some(logger) = self.logger.as_mut() {
                log!(logger, Debug, "level sizes {:?}", sizes);
            }
        }
        Ok(())
    }

    /// Retains only the elements specified by the predicate.
    ///
    /// In other words, remove all elements `e` such that `f(&e)` returns false.
    /// This method operates in place and calls `f` once per element, in ascending order.  Nothing
    /// is unlinked until `f` has seen every element, so a panicking `f` leaves the set unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipListSet;
    ///
    /// let mut set = SkipListSet::new();
    /// set.add_all(0..10).unwrap();
    /// set.retain(|&x| x % 2 == 0);
    /// assert_eq!(set.to_vec(), vec![0, 2, 4, 6, 8]);
    /// ```
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> bool,
    {
        let mut removed = vec![false; self.nodes.len()];
        let mut count = 0;
        for idx in self.level_indices(0) {
            if let Some(ref value) = self.nodes[idx].value {
                if !f(value) {
                    removed[idx] = true;
                    count += 1;
                }
            }
        }
        if count == 0 {
            return;
        }

        // Every level is walked once, bottom-up, skipping over the marked nodes.
        for lvl in 0..self.level_cap {
            let mut node = HEAD;
            while let Some(next) = self.nodes[node].links[lvl] {
                if removed[next] {
                    self.nodes[node].links[lvl] = self.nodes[next].links[lvl];
                } else {
                    node = next;
                }
            }
        }

        self.len -= count;
        for (idx, gone) in removed.into_iter().enumerate() {
            if gone {
                self.release(idx);
            }
        }
    }

    /// Range views are not supported.
    pub fn sub_set(&self, _from: &T, _to: &T) -> Result<Self, SetError> {
        Err(SetError::Unsupported("sub_set"))
    }

    /// Range views are not supported.
    pub fn head_set(&self, _to: &T) -> Result<Self, SetError> {
        Err(SetError::Unsupported("head_set"))
    }

    /// Range views are not supported.
    pub fn tail_set(&self, _from: &T) -> Result<Self, SetError> {
        Err(SetError::Unsupported("tail_set"))
    }

    /// Inserts an orderable value.
    fn insert(&mut self, value: T) -> Result<bool, SetError> {
        let (update, candidate) = self.search(&value);
        if self.matching(candidate, &value).is_some() {
            return Ok(false);
        }

        let height = self.draw_height(self.level_cap)?;
        let node = SkipNode::new(value, height)?;
        self.splice(node, &update);
        Ok(true)
    }

    /// A node height in `1..=cap` from the level generator.
    fn draw_height(&mut self, cap: usize) -> Result<usize, SetError> {
        match self.level_generator.height(cap).min(cap) {
            0 => Err(SetError::InvalidHeight),
            height => Ok(height),
        }
    }
}

impl<T, G> SkipListSet<T, G> {
    /// Clears the set, removing all values.  The level cap is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipListSet;
    ///
    /// let mut set = SkipListSet::new();
    /// set.add_all(0..10).unwrap();
    /// set.clear();
    /// assert!(set.is_empty());
    /// assert!(set.first().is_err());
    /// ```
    pub fn clear(&mut self) {
        let dropped = self.len;
        self.nodes = vec![SkipNode::head(self.level_cap)];
        self.free.clear();
        self.len = 0;
        if let Some(logger) = self.logger.as_mut() {
            log!(logger, Debug, "cleared {} elements", dropped);
        }
    }

    /// Returns the number of elements in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the set contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of levels currently in use.
    #[inline]
    pub fn level_cap(&self) -> usize {
        self.level_cap
    }

    /// Elements are ordered by `PartialOrd`; there is no comparator to return.
    pub fn comparator(&self) -> Option<&dyn Fn(&T, &T) -> Ordering> {
        None
    }

    /// Routes the set's log messages (level cap changes, rebalances, rejected elements) to
    /// `logger`.
    pub fn set_logger(&mut self, logger: Logger) {
        self.logger = Some(logger);
    }

    /// Returns the smallest element.
    ///
    /// # Errors
    ///
    /// `SetError::NoSuchElement` if the set is empty.
    pub fn first(&self) -> Result<&T, SetError> {
        if self.len == 0 {
            return Err(SetError::NoSuchElement);
        }
        self.nodes[HEAD].links[0]
            .and_then(|idx| self.nodes[idx].value.as_ref())
            .ok_or(SetError::NoSuchElement)
    }

    /// Returns the largest element.  There is no tail pointer: the element is reached by running
    /// to the end of each level before dropping to the one below, in `O(log(n))` on average.
    ///
    /// # Errors
    ///
    /// `SetError::NoSuchElement` if the set is empty.
    pub fn last(&self) -> Result<&T, SetError> {
        if self.len == 0 {
            return Err(SetError::NoSuchElement);
        }
        self.nodes[self.get_last()]
            .value
            .as_ref()
            .ok_or(SetError::NoSuchElement)
    }

    /// Returns an iterator over the elements, in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipListSet;
    ///
    /// let mut set = SkipListSet::new();
    /// set.add_all(vec![3, 1, 2]).unwrap();
    /// let mut iter = set.iter();
    /// assert!(iter.has_next());
    /// assert_eq!(iter.try_next().unwrap(), &1);
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), Some(&3));
    /// assert!(iter.try_next().is_err());
    /// ```
    pub fn iter(&self) -> Iter<T> {
        Iter {
            nodes: &self.nodes,
            cursor: self.nodes[HEAD].links[0],
            size: self.len,
        }
    }

    /// Clones the elements into a vector, in ascending order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Moves the elements into a vector, in ascending order.
    pub fn into_vec(self) -> Vec<T> {
        self.into_iter().collect()
    }

    /// Clones the elements, in ascending order, into the front of `dest`.  Returns how many were
    /// copied, which is `dest.len()` when `dest` is shorter than the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipListSet;
    ///
    /// let set = SkipListSet::from_values(vec![4, 2, 9]).unwrap();
    /// let mut array = [0; 5];
    /// assert_eq!(set.copy_to(&mut array), 3);
    /// assert_eq!(array, [2, 4, 9, 0, 0]);
    /// ```
    pub fn copy_to(&self, dest: &mut [T]) -> usize
    where
        T: Clone,
    {
        let mut copied = 0;
        for (slot, value) in dest.iter_mut().zip(self.iter()) {
            *slot = value.clone();
            copied += 1;
        }
        copied
    }

    /// The height of every node, in the ascending order of their elements.
    pub fn heights(&self) -> Vec<usize> {
        self.level_indices(0)
            .into_iter()
            .map(|idx| self.nodes[idx].height())
            .collect()
    }

    /// Order-sensitive hash of the elements: starting from 1, every element's hash is folded in
    /// as `h = 31 * h + hash(e)`.  Equal sets have equal hash codes.
    pub fn hash_code(&self) -> u64
    where
        T: Hash,
    {
        self.iter().fold(1u64, |h, elt| {
            let mut hasher = DefaultHasher::new();
            elt.hash(&mut hasher);
            h.wrapping_mul(31).wrapping_add(hasher.finish())
        })
    }

    /// Renders every level, top level first, one row per level:
    ///
    /// ```text
    /// 2: <head> ----------------> [5]
    /// 1: <head> --> [2] --------> [5]
    /// 0: <head> --> [2] --> [4] --> [5] --> [8]
    /// ```
    ///
    /// Only the elements present on each level are listed.
    pub fn structure(&self) -> String
    where
        T: fmt::Debug,
    {
        let mut rows: Vec<String> = Vec::with_capacity(self.level_cap);
        let mut lvl = self.level_cap;
        while lvl > 0 {
            lvl -= 1;
            let mut row = format!("{}: <head>", lvl);
            for idx in self.level_indices(lvl) {
                if let Some(ref v) = self.nodes[idx].value {
                    row.push_str(&format!(" --> [{:?}]", v));
                }
            }
            rows.push(row);
        }
        rows.join("\n")
    }
}

// ///////////////////////////////////////////////
// Internal methods
// ///////////////////////////////////////////////

impl<T, G> SkipListSet<T, G>
where
    T: PartialOrd,
{
    /// Top-down search for `value`.  At each level, moves along the level while the next value is
    /// less than `value`, and records the node it stopped at: `update[lvl]` is the predecessor of
    /// `value` on level `lvl`.
    ///
    /// Also returns the level 0 successor of the last predecessor, which is either the element
    /// equal to `value` or the position where `value` belongs.
    fn search(&self, value: &T) -> (Vec<usize>, Option<usize>) {
        let mut update = vec![HEAD; self.level_cap];
        let mut node = HEAD;

        let mut lvl = self.level_cap;
        while lvl > 0 {
            lvl -= 1;

            while let Some(next) = self.nodes[node].links[lvl] {
                match self.nodes[next].value {
                    Some(ref next_value) if next_value.partial_cmp(value) == Some(Ordering::Less) => {
                        node = next;
                    }
                    _ => break,
                }
            }
            update[lvl] = node;
        }

        (update, self.nodes[node].links[0])
    }

    /// The candidate, if it holds an element equal to `value`.
    fn matching(&self, candidate: Option<usize>, value: &T) -> Option<usize> {
        candidate.filter(|&idx| match self.nodes[idx].value {
            Some(ref v) => v.partial_cmp(value) == Some(Ordering::Equal),
            None => false,
        })
    }

    /// Links `node` in after the predecessors in `update`, then recomputes the level cap.
    fn splice(&mut self, mut node: SkipNode<T>, update: &[usize]) {
        let height = node.height();

        // Before:    [prev] ------------> [next]
        // After:     [prev] --> [new] --> [next]
        for lvl in 0..height {
            node.links[lvl] = self.nodes[update[lvl]].links[lvl];
        }
        let idx = self.allocate(node);
        for lvl in 0..height {
            self.nodes[update[lvl]].links[lvl] = Some(idx);
        }

        self.len += 1;
        self.resize_levels(level_cap_for(self.len, self.initial_levels));
    }

    /// Moves the level cap to `cap`, resizing the head's links.  New levels start out empty.
    /// Levels being dropped are unlinked so that no node keeps a link above the cap.
    fn resize_levels(&mut self, cap: usize) {
        let old = self.level_cap;
        if cap == old {
            return;
        }
        for lvl in cap..old {
            let mut next = self.nodes[HEAD].links[lvl];
            while let Some(idx) = next {
                next = self.nodes[idx].links[lvl].take();
            }
        }
        self.nodes[HEAD].links.resize(cap, None);
        self.level_cap = cap;

        if let Some(logger) = self.logger.as_mut() {
            log!(logger, Verbose, "level cap {} -> {} at {} elements", old, cap, self.len);
        }
    }
}

impl<T, G> SkipListSet<T, G> {
    /// Stores `node` in a vacant slot (or a new one) and returns its index.
    fn allocate(&mut self, node: SkipNode<T>) -> usize {
        match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = node;
                idx
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    /// Vacates the slot at `idx`, returning its value.  The node must already be unlinked.
    fn release(&mut self, idx: usize) -> Option<T> {
        let node = mem::replace(&mut self.nodes[idx], SkipNode::vacant());
        self.free.push(idx);
        node.into_inner()
    }

    /// Returns the index of the last node (the head if the set is empty).
    fn get_last(&self) -> usize {
        let mut node = HEAD;

        let mut lvl = self.level_cap;
        while lvl > 0 {
            lvl -= 1;

            while let Some(next) = self.nodes[node].links[lvl] {
                node = next;
            }
        }
        node
    }

    /// Number of nodes on each level, bottom level first.
    fn level_sizes(&self) -> Vec<usize> {
        (0..self.level_cap)
            .map(|lvl| self.level_indices(lvl).len())
            .collect()
    }

    /// Indices of the nodes on level `lvl`, in order.
    fn level_indices(&self, lvl: usize) -> Vec<usize> {
        let mut indices = Vec::new();
        let mut next = self.nodes[HEAD].links.get(lvl).cloned().flatten();
        while let Some(idx) = next {
            indices.push(idx);
            next = self.nodes[idx].links[lvl];
        }
        indices
    }
}

// ///////////////////////////////////////////////
// Trait implementation
// ///////////////////////////////////////////////

impl<T: PartialOrd> default::Default for SkipListSet<T> {
    fn default() -> SkipListSet<T> {
        SkipListSet::new()
    }
}

/// Two sets are equal when they hold equal elements in the same order.  The shape of the
/// structure (node heights, level cap) and the level generator are not compared.
impl<A, B, GA, GB> PartialEq<SkipListSet<B, GB>> for SkipListSet<A, GA>
where
    A: PartialEq<B>,
{
    #[inline]
    fn eq(&self, other: &SkipListSet<B, GB>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T, G> Eq for SkipListSet<T, G> where T: Eq {}

impl<T: Hash, G> Hash for SkipListSet<T, G> {
    #[inline]
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for elt in self.iter() {
            elt.hash(state);
        }
    }
}

/// # Panics
///
/// Panics if a value cannot be ordered.  Use `add_all` to get an error instead.
impl<T, G> Extend<T> for SkipListSet<T, G>
where
    T: PartialOrd,
    G: LevelGenerator,
{
    #[inline]
    fn extend<I: iter::IntoIterator<Item = T>>(&mut self, iterable: I) {
        for element in iterable {
            if let Err(e) = self.add(element) {
                panic!("Element cannot be inserted: {}", e);
            }
        }
    }
}

/// # Panics
///
/// Panics if a value cannot be ordered.  Use `from_values` to get an error instead.
impl<T> iter::FromIterator<T> for SkipListSet<T>
where
    T: PartialOrd,
{
    #[inline]
    fn from_iter<I>(iter: I) -> SkipListSet<T>
    where
        I: iter::IntoIterator<Item = T>,
    {
        let mut set = SkipListSet::new();
        set.extend(iter);
        set
    }
}

impl<T, G> fmt::Debug for SkipListSet<T, G>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;

        for (i, entry) in self.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}", entry)?;
        }
        write!(f, "]")
    }
}

impl<T, G> fmt::Display for SkipListSet<T, G>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;

        for (i, entry) in self.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", entry)?;
        }
        write!(f, "]")
    }
}

impl<T, G> iter::IntoIterator for SkipListSet<T, G> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        let cursor = self.nodes[HEAD].links[0];
        IntoIter {
            nodes: self.nodes,
            cursor: cursor,
            size: self.len,
        }
    }
}

impl<'a, T, G> iter::IntoIterator for &'a SkipListSet<T, G> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

// ///////////////////////////////////////////////
// Extra structs
// ///////////////////////////////////////////////

/// Forward iterator over the elements of a set, in ascending order.  It starts at the smallest
/// element present when it is created and cannot be restarted; call `iter` again instead.
pub struct Iter<'a, T: 'a> {
    nodes: &'a [SkipNode<T>],
    cursor: Option<usize>,
    size: usize,
}

impl<'a, T> Iter<'a, T> {
    /// Returns `true` if another element follows.
    pub fn has_next(&self) -> bool {
        self.cursor.is_some()
    }

    /// Like `next`, but running past the end is an error.
    ///
    /// # Errors
    ///
    /// `SetError::NoSuchElement` once every element has been returned.
    pub fn try_next(&mut self) -> Result<&'a T, SetError> {
        self.next().ok_or(SetError::NoSuchElement)
    }

    /// Elements cannot be removed through the iterator.
    pub fn remove(&mut self) -> Result<(), SetError> {
        Err(SetError::Unsupported("remove through an iterator"))
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let nodes = self.nodes;
        let node = &nodes[self.cursor?];
        self.cursor = node.links[0];
        self.size = self.size.saturating_sub(1);
        node.value.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.size, Some(self.size))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> iter::FusedIterator for Iter<'a, T> {}

/// Owning iterator over the elements of a set, in ascending order.
pub struct IntoIter<T> {
    nodes: Vec<SkipNode<T>>,
    cursor: Option<usize>,
    size: usize,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let idx = self.cursor?;
        let node = mem::replace(&mut self.nodes[idx], SkipNode::vacant());
        self.cursor = node.links.first().cloned().flatten();
        self.size = self.size.saturating_sub(1);
        node.into_inner()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.size, Some(self.size))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> iter::FusedIterator for IntoIter<T> {}

// /////////////////////////////////////////////////////////////////////////////////////////////////
// Tests
// /////////////////////////////////////////////////////////////////////////////////////////////////
