//! Cursor fencing against structural edits

use listmap::{CursorState, Error, IndexedMultimap};

use crate::test_utils::{counting, keys_of};

#[test]
fn test_external_remove_fails_next_step() {
    let map = counting(4);
    let mut cursor = map.cursor().unwrap();
    cursor.advance().unwrap();
    map.remove_at(3).unwrap();
    assert_eq!(
        cursor.advance(),
        Err(Error::ConcurrentStructuralChange {
            expected: 0,
            actual: 1
        })
    );
    // Stays failed; there is no silent resynchronization
    assert!(cursor.retreat().unwrap_err().is_stale());
    assert!(cursor.peek_next().is_err());
}

#[test]
fn test_external_clear_fails_next_step() {
    let map = counting(2);
    let cursor = map.cursor().unwrap();
    map.clear().unwrap();
    assert!(matches!(
        cursor.peek_next(),
        Err(Error::ConcurrentStructuralChange { .. })
    ));
}

#[test]
fn test_edit_through_view_fails_root_cursor() {
    let map = counting(5);
    let view = map.sub_map(1, 3).unwrap();
    let mut cursor = map.cursor().unwrap();
    view.push(9, 9).unwrap();
    assert!(cursor.advance().is_err());
}

#[test]
fn test_edit_through_root_fails_view_cursor() {
    let map = counting(5);
    let view = map.sub_map(1, 3).unwrap();
    let mut cursor = view.cursor().unwrap();
    assert_eq!(*cursor.advance().unwrap().key(), 1);

    // The view's window is already adjusted, the cursor must still notice
    map.insert_at(2, 7, 7).unwrap();
    assert!(matches!(
        cursor.advance(),
        Err(Error::ConcurrentStructuralChange { .. })
    ));
}

#[test]
fn test_cursor_removal_during_iteration() {
    let map = counting(6);
    let mut cursor = map.cursor().unwrap();
    while cursor.has_next() {
        let entry = cursor.advance().unwrap();
        if entry.key() % 2 == 0 {
            cursor.remove_current().unwrap();
        }
    }
    assert_eq!(cursor.state(), CursorState::Exhausted);
    assert_eq!(keys_of(&map), vec![1, 3, 5]);
}

#[test]
fn test_view_cursor_removal_keeps_view_in_step() {
    let map = counting(6);
    let view = map.sub_map(1, 4).unwrap();
    let mut cursor = view.cursor().unwrap();
    cursor.advance().unwrap();
    cursor.remove_current().unwrap();
    assert_eq!(*cursor.advance().unwrap().key(), 2);
    assert_eq!(keys_of(&view), vec![2, 3, 4]);
}

#[test]
fn test_iterator_reports_one_error() {
    let map = counting(3);
    let mut cursor = map.cursor().unwrap();
    cursor.next();
    map.push(3, 3).unwrap();
    let rest: Vec<_> = cursor.collect();
    assert_eq!(rest.len(), 1);
    assert!(rest[0].is_err());
}
