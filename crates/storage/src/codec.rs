//! Serde support for `ListMap`
//!
//! A map serializes as a sequence of entries in index order, so duplicate
//! keys survive formats whose native maps would collapse them. Views and
//! generation counters are not serialized; a deserialized map starts at
//! generation 0 with no views.

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeSeq, Serializer};

use listmap_core::Entry;

use crate::store::ListMap;

impl<K, V> Serialize for ListMap<K, V>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.with_entries(|entries| {
            let mut seq = serializer.serialize_seq(Some(entries.len()))?;
            for entry in entries {
                seq.serialize_element(entry)?;
            }
            seq.end()
        })
    }
}

impl<'de, K, V> Deserialize<'de> for ListMap<K, V>
where
    K: Deserialize<'de>,
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = Vec::<Entry<K, V>>::deserialize(deserializer)?;
        Ok(ListMap::from_entries(entries))
    }
}
