//! Bulk operations: subset test, union, difference and intersection against other collections.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};
use std::hash::{BuildHasher, Hash};

use crate::error::SetError;
use crate::level_generator::LevelGenerator;
use crate::skiplist_set::SkipListSet;

/// A collection which can answer whether it holds a value.  `retain_all` keeps exactly the
/// elements its argument reports as members.
pub trait Contains<T> {
    fn contains_value(&self, value: &T) -> bool;
}

impl<T, G> Contains<T> for SkipListSet<T, G>
where
    T: PartialOrd,
    G: LevelGenerator,
{
    fn contains_value(&self, value: &T) -> bool {
        self.contains(value)
    }
}

/// Linear scan, using the same notion of equality as the set.
impl<T: PartialOrd> Contains<T> for [T] {
    fn contains_value(&self, value: &T) -> bool {
        self.iter()
            .any(|e| e.partial_cmp(value) == Some(Ordering::Equal))
    }
}

impl<T: PartialOrd> Contains<T> for Vec<T> {
    fn contains_value(&self, value: &T) -> bool {
        self.as_slice().contains_value(value)
    }
}

impl<T: Ord> Contains<T> for BTreeSet<T> {
    fn contains_value(&self, value: &T) -> bool {
        self.contains(value)
    }
}

impl<T, S> Contains<T> for HashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn contains_value(&self, value: &T) -> bool {
        self.contains(value)
    }
}

impl<T, G> SkipListSet<T, G>
where
    T: PartialOrd,
    G: LevelGenerator,
{
    /// Returns true if every value is contained in the set.  True for no values at all.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipListSet;
    ///
    /// let set = SkipListSet::from_values(0..10).unwrap();
    /// assert!(set.contains_all(&[2, 4, 6]));
    /// assert!(!set.contains_all(&[2, 40]));
    /// ```
    pub fn contains_all<'a, I>(&self, values: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        values.into_iter().all(|v| self.contains(v))
    }

    /// Adds every value, returning whether the set changed.
    ///
    /// # Errors
    ///
    /// Stops at the first value which cannot be ordered and fails with
    /// `SetError::InvalidArgument`.  Values added before it stay in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipListSet;
    ///
    /// let mut set = SkipListSet::new();
    /// assert!(set.add_all(vec![1, 2]).unwrap());
    /// assert!(set.add_all(vec![2, 3]).unwrap());
    /// assert!(!set.add_all(vec![1, 3]).unwrap());
    /// ```
    pub fn add_all<I>(&mut self, values: I) -> Result<bool, SetError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut changed = false;
        for value in values {
            changed |= self.add(value)?;
        }
        Ok(changed)
    }

    /// Removes every value, returning whether the set changed.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipListSet;
    ///
    /// let mut set = SkipListSet::from_values(0..5).unwrap();
    /// assert!(set.remove_all(&[1, 3, 7]));
    /// assert!(!set.remove_all(&[7]));
    /// assert_eq!(set.to_vec(), vec![0, 2, 4]);
    /// ```
    pub fn remove_all<'a, I>(&mut self, values: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let mut changed = false;
        for value in values {
            changed |= self.remove(value);
        }
        changed
    }

    /// Removes every element `other` does not contain, returning whether the set changed.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipListSet;
    ///
    /// let mut set = SkipListSet::from_values(0..6).unwrap();
    /// assert!(set.retain_all(&vec![1, 3, 5, 7]));
    /// assert_eq!(set.to_vec(), vec![1, 3, 5]);
    /// ```
    pub fn retain_all<C>(&mut self, other: &C) -> bool
    where
        C: Contains<T> + ?Sized,
    {
        let before = self.len();
        self.retain(|e| other.contains_value(e));
        self.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::Contains;
    use crate::SkipListSet;
    use std::collections::{BTreeSet, HashSet};

    #[test]
    fn membership() {
        let v = vec![1.0, 2.5];
        assert!(v.contains_value(&2.5));
        assert!(!v.contains_value(&std::f64::NAN));
        assert!(v[..1].contains_value(&1.0));

        let b: BTreeSet<_> = (0..3).collect();
        assert!(b.contains_value(&2));
        let h: HashSet<_> = (0..3).collect();
        assert!(!h.contains_value(&3));

        let s = SkipListSet::from_values(vec!["x", "y"]).unwrap();
        assert!(s.contains_value(&"y"));
    }

    #[test]
    fn add_all_stops_at_invalid() {
        let mut set = SkipListSet::with_seed(1);
        assert!(set.add_all(vec![1.0, std::f64::NAN, 3.0]).is_err());
        assert_eq!(set.to_vec(), vec![1.0]);
    }

    #[test]
    fn retain_all_against_sets() {
        let mut set = SkipListSet::from_values(0..20).unwrap();
        let evens: HashSet<i32> = (0..40).filter(|x| x % 2 == 0).collect();
        assert!(set.retain_all(&evens));
        assert_eq!(set.len(), 10);
        assert!(!set.retain_all(&evens));

        let other = SkipListSet::from_values(vec![4, 8, 100]).unwrap();
        assert!(set.retain_all(&other));
        assert_eq!(set.to_vec(), vec![4, 8]);

        assert!(set.retain_all(&[0i32; 0][..]));
        assert!(set.is_empty());
    }

    #[test]
    fn contains_all_empty() {
        let set: SkipListSet<u8> = SkipListSet::new();
        assert!(set.contains_all(&[]));
        assert!(!set.contains_all(&[1]));
    }
}
