use skipset::{LevelGenerator, SkipListSet};

/// Always grows to the cap.
struct Tallest;

impl LevelGenerator for Tallest {
    fn flip(&mut self) -> bool {
        true
    }
}

/// Never grows.
struct Flat;

impl LevelGenerator for Flat {
    fn flip(&mut self) -> bool {
        false
    }
}

#[test]
fn rebalance_preserves_membership() {
    let mut set = SkipListSet::with_seed(20);
    set.add_all((0..300).map(|x| x * 3)).unwrap();
    let before = set.to_vec();
    set.rebalance().unwrap();
    assert_eq!(set.to_vec(), before);
    assert_eq!(set.len(), 300);
    assert_eq!(set.level_cap(), 9);
    for x in 0..900 {
        assert_eq!(set.contains(&x), x % 3 == 0);
    }
}

#[test]
fn rebalance_recomputes_cap_after_removals() {
    let mut set = SkipListSet::with_seed(21);
    set.add_all(0..4096).unwrap();
    assert_eq!(set.level_cap(), 13);
    set.retain(|&x| x < 3);
    assert_eq!(set.level_cap(), 13);
    set.rebalance().unwrap();
    assert_eq!(set.level_cap(), 2);
    assert_eq!(set.to_vec(), vec![0, 1, 2]);
}

#[test]
fn rebalance_of_empty_set_restores_default() {
    let mut set: SkipListSet<i32> = SkipListSet::new();
    set.add(1).unwrap();
    set.clear();
    assert_eq!(set.level_cap(), 1);
    set.rebalance().unwrap();
    assert_eq!(set.level_cap(), 8);
    assert!(set.is_empty());
}

#[test]
fn tallest_nodes_reach_the_cap() {
    let mut set = SkipListSet::with_generator(Tallest);
    set.add_all(1..8).unwrap();
    // caps seen at insertion: 8, 1, 2, 2, 3, 3, 3
    assert_eq!(set.heights(), vec![8, 1, 2, 2, 3, 3, 3]);
    set.rebalance().unwrap();
    assert_eq!(set.heights(), vec![8, 1, 2, 2, 3, 3, 3]);
    assert_eq!(set.level_cap(), 3);
}

#[test]
fn flat_generator_is_a_sorted_list() {
    let mut set = SkipListSet::with_generator(Flat);
    set.add_all(vec![5, 1, 4, 2, 3]).unwrap();
    assert!(set.heights().iter().all(|&h| h == 1));
    assert_eq!(
        set.structure(),
        "2: <head>\n1: <head>\n0: <head> --> [1] --> [2] --> [3] --> [4] --> [5]"
    );
    assert_eq!(set.last().unwrap(), &5);
    assert!(set.remove(&3));
    assert_eq!(set.to_vec(), vec![1, 2, 4, 5]);
}
