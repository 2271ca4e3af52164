use std::collections::{BTreeSet, HashSet};

use skipset::SkipListSet;

#[test]
fn union() {
    let mut set = SkipListSet::from_values(vec![1, 3, 5]).unwrap();
    assert!(set.add_all(vec![2, 3, 4]).unwrap());
    assert_eq!(set.to_vec(), vec![1, 2, 3, 4, 5]);
    assert!(!set.add_all(Vec::new()).unwrap());
}

#[test]
fn difference() {
    let mut set = SkipListSet::from_values(0..10).unwrap();
    let odds: Vec<i32> = (0..10).filter(|x| x % 2 == 1).collect();
    assert!(set.remove_all(&odds));
    assert_eq!(set.to_vec(), vec![0, 2, 4, 6, 8]);
    assert!(!set.remove_all(&odds));
    assert!(!set.remove_all(&[]));
}

#[test]
fn intersection() {
    let mut set = SkipListSet::from_values(0..10).unwrap();
    let keep: BTreeSet<i32> = vec![2, 3, 5, 7, 11].into_iter().collect();
    assert!(set.retain_all(&keep));
    assert_eq!(set.to_vec(), vec![2, 3, 5, 7]);
    assert!(!set.retain_all(&keep));

    let keep: HashSet<i32> = vec![3, 7].into_iter().collect();
    assert!(set.retain_all(&keep));
    assert_eq!(set.to_vec(), vec![3, 7]);
}

#[test]
fn intersection_with_itself_type() {
    let mut a = SkipListSet::from_values(vec!["a", "b", "c"]).unwrap();
    let b = SkipListSet::from_values(vec!["b", "c", "d"]).unwrap();
    assert!(a.retain_all(&b));
    assert_eq!(a.to_vec(), vec!["b", "c"]);
    assert!(b.contains_all(&a));
    assert!(!a.contains_all(&b));
}

#[test]
fn intersection_with_empty_empties() {
    let mut set = SkipListSet::from_values(0..50).unwrap();
    assert!(set.retain_all(&Vec::<i32>::new()));
    assert!(set.is_empty());
    assert!(set.first().is_err());
    set.add(4).unwrap();
    assert_eq!(set.to_vec(), vec![4]);
}

#[test]
fn subset() {
    let set = SkipListSet::from_values(vec![1.5, 2.5, 3.5]).unwrap();
    assert!(set.contains_all(&[1.5, 3.5]));
    assert!(!set.contains_all(&[1.5, std::f64::NAN]));
    assert!(set.contains_all(&Vec::new()));
}
