//! Serde and TOML configuration

use listmap::{IndexedMultimap, ListMap, ListMapConfig};

use crate::test_utils::map_of;

#[test]
fn test_json_preserves_duplicates() {
    let map = map_of(&[("a", 1), ("b", 2), ("a", 3)]);
    let json = serde_json::to_value(&map).unwrap();
    assert_eq!(json.as_array().map(|a| a.len()), Some(3));

    let back: ListMap<String, i32> = serde_json::from_value(json).unwrap();
    assert_eq!(back.key_frequency(&"a".to_string()), 2);
    assert_eq!(back.nth_by_key(1, &"a".to_string()).unwrap(), 3);
}

#[test]
fn test_config_from_toml_drives_construction() {
    let config = ListMapConfig::from_toml_str(
        r#"
        initial_capacity = 2
        max_len = 2
        "#,
    )
    .unwrap();
    let map: ListMap<&str, i32> = ListMap::with_config(config).unwrap();
    map.push("a", 1).unwrap();
    map.push("b", 2).unwrap();
    assert!(map.push("c", 3).is_err());
}

#[test]
fn test_invalid_toml_config_is_rejected() {
    assert!(ListMapConfig::from_toml_str("initial_capacity = 4\nmax_len = 2\n").is_err());
}
