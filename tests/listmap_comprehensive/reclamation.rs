//! Dropped and detached views

use listmap::{Error, IndexedMultimap};

use crate::test_utils::counting;

#[test]
fn test_dropped_views_do_not_accumulate() {
    let map = counting(4);
    for round in 0..50 {
        let view = map.sub_map(0, 1).unwrap();
        assert_eq!(view.len(), 2);
        drop(view);
        map.push(100 + round, 0).unwrap();
        assert_eq!(map.registered_views(), 0);
    }
}

#[test]
fn test_dead_view_is_not_touched_by_later_edits() {
    let map = counting(4);
    let kept = map.sub_map(1, 2).unwrap();
    {
        let _short_lived = map.sub_map(0, 3).unwrap();
    }
    assert_eq!(map.live_views(), 1);

    map.insert_at(1, 9, 9).unwrap();
    assert_eq!(map.registered_views(), 1);
    assert_eq!(kept.len(), 3);
}

#[test]
fn test_nested_view_outlives_its_parent_view() {
    let map = counting(6);
    let inner = {
        let outer = map.sub_map(1, 4).unwrap();
        outer.sub_map(1, 2).unwrap()
    };
    map.insert_at(2, 50, 50).unwrap();
    assert_eq!(inner.keys().unwrap(), vec![50, 2, 3]);
}

#[test]
fn test_views_detach_when_root_dropped() {
    let map = counting(3);
    let view = map.tail_map(1).unwrap();
    let nested = view.head_map(1).unwrap();
    drop(map);

    for handle in [&view, &nested] {
        assert!(handle.is_detached());
        assert_eq!(handle.len(), 0);
        assert_eq!(handle.keys(), Err(Error::Detached));
        assert_eq!(handle.clear(), Err(Error::Detached));
        assert!(handle.cursor().is_err());
    }
}
