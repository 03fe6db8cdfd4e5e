//! Window adjustment across nested and sibling views

use std::ops::Bound;

use listmap::{Edge, IndexedMultimap, Locator, Window};

use crate::test_utils::{counting, keys_of};

#[test]
fn test_insert_at_view_start_is_inside() {
    let map = counting(6);
    let view = map.sub_map(2, 3).unwrap();
    map.insert_at(2, 99, 99).unwrap();
    assert_eq!(keys_of(&view), vec![99, 2, 3]);
}

#[test]
fn test_insert_at_view_end_is_outside() {
    let map = counting(6);
    let view = map.sub_map(2, 3).unwrap();
    map.insert_at(4, 99, 99).unwrap();
    assert_eq!(keys_of(&view), vec![2, 3]);
}

#[test]
fn test_siblings_adjust_independently() {
    let map = counting(10);
    let left = map.sub_map(0, 4).unwrap();
    let right = map.sub_map(5, 9).unwrap();

    left.insert_at(2, 50, 50).unwrap();
    assert_eq!(left.len(), 6);
    assert_eq!(right.window(), Window::span(5, 10));
    // The right view's start is a fixed position, so it now begins at 4
    assert_eq!(right.get_key(0).unwrap(), 4);

    // Position 5 is now the last entry of the left view as well
    right.remove_at(0).unwrap();
    assert_eq!(keys_of(&left), vec![0, 1, 50, 2, 3]);
    assert_eq!(right.len(), 4);
}

#[test]
fn test_nested_views_see_each_others_edits() {
    let map = counting(8);
    let outer = map.tail_map(2).unwrap();
    let inner = outer.head_map(3).unwrap();
    assert_eq!(
        inner.window(),
        Window::Live {
            start: Edge::At(2),
            end: Edge::At(5)
        }
    );

    inner.push(100, 100).unwrap();
    assert_eq!(keys_of(&inner), vec![2, 3, 4, 100]);
    assert_eq!(outer.len(), 7);

    outer.remove_at(0).unwrap();
    assert_eq!(keys_of(&inner), vec![3, 4, 100]);
    assert_eq!(map.len(), 8);
}

#[test]
fn test_key_bounded_view_keeps_position_not_key() {
    let map = counting(5);
    let view = map
        .view(
            Bound::Included(Locator::key(1)),
            Bound::Excluded(Locator::key(3)),
        )
        .unwrap();
    assert_eq!(keys_of(&view), vec![1, 2]);

    map.replace_key(&Locator::Index(1), 42).unwrap();
    assert_eq!(keys_of(&view), vec![42, 2]);
}

#[test]
fn test_anchored_view_follows_root_length() {
    let map = counting(3);
    let tail = map.tail_map(1).unwrap();
    map.push(3, 3).unwrap();
    map.push(4, 4).unwrap();
    assert_eq!(keys_of(&tail), vec![1, 2, 3, 4]);
    map.remove_at(4).unwrap();
    assert_eq!(tail.len(), 3);
}
