//! Insert, view and remove walkthroughs

use listmap::{Entry, Error, IndexedMultimap, ListMap, Window};

use crate::test_utils::keys_of;

#[test]
fn test_insert_view_remove_walkthrough() {
    let map = ListMap::new();
    map.insert_at(0, "a", 1).unwrap();
    map.insert_at(1, "b", 2).unwrap();
    map.insert_at(1, "c", 3).unwrap();
    assert_eq!(
        map.entries().unwrap(),
        vec![Entry::new("a", 1), Entry::new("c", 3), Entry::new("b", 2)]
    );

    let view = map.sub_map(1, 2).unwrap();
    assert_eq!(view.len(), 2);
    assert_eq!(view.get(0).unwrap(), 3);

    map.remove_at(0).unwrap();
    assert_eq!(view.get(0).unwrap(), 2);
    // Removal before the window leaves its size alone
    assert_eq!(view.len(), 2);
    assert_eq!(view.window(), Window::span(1, 3));
}

#[test]
fn test_removal_inside_view_shrinks_it() {
    let map = ListMap::new();
    map.put_all(vec![("a", 1), ("c", 3), ("b", 2)]).unwrap();
    let view = map.sub_map(1, 2).unwrap();

    map.remove_at(1).unwrap();
    assert_eq!(view.len(), 1);
    assert_eq!(view.get(0).unwrap(), 2);
    assert_eq!(keys_of(&view), vec!["b"]);
}

#[test]
fn test_every_position_is_reachable() {
    let map: ListMap<usize, usize> = ListMap::new();
    for i in 0..20 {
        map.insert_at(i / 2, i, i).unwrap();
    }
    let keys = keys_of(&map);
    for (index, key) in keys.iter().enumerate() {
        assert_eq!(map.get_key(index).unwrap(), *key);
    }
    assert_eq!(map.get(20), Err(Error::IndexOutOfRange { index: 20, len: 20 }));
}

#[test]
fn test_insert_past_end_is_rejected() {
    let map: ListMap<&str, i32> = ListMap::new();
    assert_eq!(
        map.insert_at(1, "a", 1),
        Err(Error::IndexOutOfRange { index: 1, len: 0 })
    );
    assert_eq!(map.generation(), 0);
}
