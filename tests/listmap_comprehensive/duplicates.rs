//! N-th occurrence addressing

use listmap::{Error, IndexedMultimap, Locator};

use crate::test_utils::map_of;

#[test]
fn test_nth_by_key_is_idempotent() {
    let map = map_of(&[("k", 1), ("x", 0), ("k", 2), ("k", 3)]);
    for _ in 0..3 {
        assert_eq!(map.nth_by_key(0, &"k").unwrap(), 1);
        assert_eq!(map.nth_by_key(1, &"k").unwrap(), 2);
        assert_eq!(map.nth_by_key(2, &"k").unwrap(), 3);
    }
}

#[test]
fn test_occurrence_past_frequency() {
    let map = map_of(&[("k", 1), ("k", 2)]);
    assert_eq!(
        map.nth_by_key(2, &"k"),
        Err(Error::IndexOutOfRange { index: 2, len: 2 })
    );
    assert_eq!(
        map.nth_by_key(0, &"none"),
        Err(Error::IndexOutOfRange { index: 0, len: 0 })
    );
    assert_eq!(map.first_by_key(&"none"), Err(Error::KeyNotFound));
}

#[test]
fn test_insert_before_duplicates_renumbers_them() {
    let map = map_of(&[("k", 1), ("k", 2)]);
    map.insert_at(0, "k", 0).unwrap();
    assert_eq!(map.nth_by_key(0, &"k").unwrap(), 0);
    assert_eq!(map.nth_by_key(2, &"k").unwrap(), 2);
    assert_eq!(map.locate(&Locator::nth_key(2, "k")), Ok(2));
}

#[test]
fn test_occurrence_counting_is_view_relative() {
    let map = map_of(&[("k", 1), ("k", 2), ("k", 3), ("k", 4)]);
    let view = map.sub_map(2, 3).unwrap();
    assert_eq!(view.key_frequency(&"k"), 2);
    assert_eq!(view.nth_by_key(0, &"k").unwrap(), 3);
    view.remove(&Locator::nth_key(1, "k")).unwrap();
    assert_eq!(map.values().unwrap(), vec![1, 2, 3]);
}
