//! Root and view clear semantics

use listmap::{Error, IndexedMultimap};

use crate::test_utils::{counting, keys_of};

#[test]
fn test_root_clear_empties_every_view() {
    let map = counting(5);
    let views = vec![
        map.sub_map(0, 1).unwrap(),
        map.head_map(3).unwrap(),
        map.tail_map(2).unwrap(),
    ];
    map.clear().unwrap();
    for view in &views {
        assert!(view.is_emptied());
        assert!(view.is_empty());
    }
}

#[test]
fn test_emptied_views_are_not_resurrected() {
    let map = counting(3);
    let tail = map.tail_map(0).unwrap();
    map.clear().unwrap();
    map.put_all(vec![(1, 1), (2, 2)]).unwrap();
    assert_eq!(tail.len(), 0);
    assert_eq!(tail.keys().unwrap(), Vec::<i32>::new());
    assert!(matches!(tail.insert_at(0, 5, 5), Err(Error::IllegalState(_))));
    assert!(matches!(tail.get(0), Err(Error::IndexOutOfRange { .. })));
}

#[test]
fn test_clear_bumps_generation_once() {
    let map = counting(10);
    let before = map.generation();
    map.clear().unwrap();
    assert_eq!(map.generation(), before + 1);
}

#[test]
fn test_view_clear_leaves_rest_of_store() {
    let map = counting(6);
    let view = map.sub_map(2, 3).unwrap();
    let outer = map.sub_map(1, 4).unwrap();
    view.clear().unwrap();

    assert_eq!(keys_of(&map), vec![0, 1, 4, 5]);
    assert_eq!(keys_of(&outer), vec![1, 4]);
    assert!(!outer.is_emptied());

    view.push(9, 9).unwrap();
    assert_eq!(keys_of(&outer), vec![1, 9, 4]);
}
