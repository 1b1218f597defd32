use crate::model::{Asset, AssetCode, Entry, EntryKey, Inventory, Location};
use crate::InventoryError;

fn asset(code: &str, location: EntryKey, data: &str) -> Entry {
    Entry::Asset(Asset { asset_code: AssetCode::from(code), kind: "widget".into(), location, data: data.as_bytes().to_vec() })
}

fn sample() -> Inventory {
    let mut inv = Inventory::new();
    inv.entries.insert(EntryKey::root(), Entry::Location(Location { path: ".".into(), location: ".".into() }));
    inv.entries.insert(EntryKey::folder("site"), Entry::Location(Location { path: "site".into(), location: ".".into() }));
    inv.entries.insert(EntryKey::code("sr1"), asset("sr1", EntryKey::folder("site"), "name: rack\nslots: 4\n"));
    inv.entries.insert(EntryKey::code("sr2"), asset("sr2", EntryKey::code("sr1"), "- a\n- b\n"));
    inv.entries.insert(EntryKey::code("sr3"), asset("sr3", EntryKey::code("sr1"), "key: [unclosed"));
    inv
}

#[test]
fn codes_and_folders_are_distinct_keys() {
    assert_ne!(EntryKey::code("sr1"), EntryKey::folder("sr1"));
    assert!(EntryKey::folder("").is_root());
    assert!(EntryKey::folder(".").is_root());
    assert!(!EntryKey::folder("a").is_root());
}

#[test]
fn tree_queries() {
    let inv = sample();
    assert_eq!(inv.codes(), vec!["sr1", "sr2", "sr3"]);
    assert_eq!(inv.parent_of(&EntryKey::code("sr2")), Some(EntryKey::code("sr1")));
    assert_eq!(inv.parent_of(&EntryKey::folder("site")), None);
    assert_eq!(inv.ancestry(&EntryKey::code("sr2")), vec![EntryKey::code("sr1"), EntryKey::folder("site")]);
    assert_eq!(inv.children_of(&EntryKey::code("sr1")), vec![EntryKey::code("sr2"), EntryKey::code("sr3")]);
    assert_eq!(inv.children_of(&EntryKey::root()), vec![EntryKey::folder("site")]);
}

#[test]
fn decode_on_demand() {
    let inv = sample();
    let doc = inv.asset("sr1").unwrap().load_document().unwrap();
    assert_eq!(doc["slots"].as_u64(), Some(4));
    let list: Vec<String> = inv.asset("sr2").unwrap().load_data().unwrap();
    assert_eq!(list, vec!["a", "b"]);
    let err = inv.asset("sr3").unwrap().load_document().unwrap_err();
    match err.downcast_ref::<InventoryError>() {
        Some(InventoryError::Decode { code, .. }) => assert_eq!(code, "sr3"),
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
fn json_snapshot_uses_string_keys() {
    let v: serde_json::Value = serde_json::from_str(&sample().to_json_pretty().unwrap()).unwrap();
    assert_eq!(v["sr1"]["kind"], "asset");
    assert_eq!(v["sr1"]["type"], "widget");
    assert_eq!(v["sr1"]["data"], "name: rack\nslots: 4\n");
    assert_eq!(v["site/"]["kind"], "location");
    assert_eq!(v["site/"]["location"], ".");
}
