//! Addressing engine: logical request -> physical index
//!
//! All functions operate on the visible slice of a scope (the whole store or
//! a view window) and return indices relative to that slice. Key lookups are
//! linear scans in ascending index order; the N-th duplicate is always the
//! N-th match in that order.
//!
//! # Frequency-then-walk
//!
//! Occurrence lookups first count matches, reject `occurrence >= frequency`
//! with `IndexOutOfRange`, then walk to the match. Both passes run under the
//! same lock, so the walk cannot come up short; if it does anyway the call
//! fails with `ConcurrentStructuralChange` instead of returning a wrong entry.

use listmap_core::{Entry, Error, Locator, Result};

/// Count entries satisfying `pred`
pub fn frequency<K, V, P>(entries: &[Entry<K, V>], pred: P) -> usize
where
    P: Fn(&Entry<K, V>) -> bool,
{
    entries.iter().filter(|&e| pred(e)).count()
}

/// Index of the first entry satisfying `pred`
pub fn first_match<K, V, P>(entries: &[Entry<K, V>], pred: P) -> Option<usize>
where
    P: Fn(&Entry<K, V>) -> bool,
{
    entries.iter().position(pred)
}

/// Index of the `occurrence`-th (0-based) entry satisfying `pred`
pub fn nth_match<K, V, P>(entries: &[Entry<K, V>], occurrence: usize, pred: P) -> Result<usize>
where
    P: Fn(&Entry<K, V>) -> bool,
{
    let freq = frequency(entries, &pred);
    if occurrence >= freq {
        return Err(Error::out_of_range(occurrence, freq));
    }

    let mut seen = 0usize;
    for (index, entry) in entries.iter().enumerate() {
        if pred(entry) {
            if seen == occurrence {
                return Ok(index);
            }
            seen += 1;
        }
    }

    Err(Error::ConcurrentStructuralChange {
        expected: freq as u64,
        actual: seen as u64,
    })
}

/// Resolve a locator against `entries`
pub fn resolve<K, V>(entries: &[Entry<K, V>], locator: &Locator<K, V>) -> Result<usize>
where
    K: PartialEq,
    V: PartialEq,
{
    match locator {
        Locator::Index(index) => {
            if *index < entries.len() {
                Ok(*index)
            } else {
                Err(Error::out_of_range(*index, entries.len()))
            }
        }
        Locator::Key(key) => first_match(entries, |e| e.matches_key(key)).ok_or(Error::KeyNotFound),
        Locator::KeyOccurrence { occurrence, key } => {
            nth_match(entries, *occurrence, |e| e.matches_key(key))
        }
        Locator::Entry { key, value } => {
            first_match(entries, |e| e.matches(key, value)).ok_or(Error::KeyNotFound)
        }
        Locator::EntryOccurrence {
            occurrence,
            key,
            value,
        } => nth_match(entries, *occurrence, |e| e.matches(key, value)),
    }
}
