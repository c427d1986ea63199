use std::sync::Arc;

use keepsake::binding::{CallArgs, Signature};
use keepsake::construct::{Identified, Registry};
use keepsake::error::KeepsakeError;

// A speaker is identified by the room it sits in; the trailing volume
// parameter has a default and takes no part in identity.
struct Speaker {
    room: String,
}
impl Identified for Speaker {
    const IDENTIFIER: Option<&'static str> = Some("room");
    fn signature() -> Signature {
        Signature::new().required("room").optional("volume", 4)
    }
}

// Same shape as Speaker but its own default group, so the two never share
// instances even for the same room.
struct Soundbar {
    room: String,
}
impl Identified for Soundbar {
    const IDENTIFIER: Option<&'static str> = Some("room");
    fn signature() -> Signature {
        Signature::new().required("room")
    }
}

// Coordinator and member declare the same group label and therefore share
// one identity namespace.
struct ZoneCoordinator {
    name: String,
}
impl Identified for ZoneCoordinator {
    const CLASS_GROUP: Option<&'static str> = Some("zone");
    const IDENTIFIER: Option<&'static str> = Some("name");
    fn signature() -> Signature {
        Signature::new().required("name")
    }
}
#[derive(Debug)]
struct ZoneMember {
    name: String,
}
impl Identified for ZoneMember {
    const CLASS_GROUP: Option<&'static str> = Some("zone");
    const IDENTIFIER: Option<&'static str> = Some("name");
    fn signature() -> Signature {
        Signature::new().required("name")
    }
}

// No identifier declared: the whole group is one instance.
struct Household {
    name: String,
}
impl Identified for Household {
    fn signature() -> Signature {
        Signature::new().required("name")
    }
}

#[test]
fn same_identifier_returns_the_same_instance() {
    let registry = Registry::new();
    let (first, existed) = registry
        .construct(&CallArgs::new().arg("den"), || {
            Ok(Speaker { room: "den".into() })
        })
        .expect("construct");
    assert!(!existed);
    assert_eq!(first.room, "den");
    let (second, existed) = registry
        .construct::<Speaker, _>(&CallArgs::new().arg("den"), || {
            unreachable!("a hit must not rebuild")
        })
        .expect("construct");
    assert!(existed);
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn distinct_identifiers_yield_distinct_instances() {
    let registry = Registry::new();
    let (den, _) = registry
        .construct(&CallArgs::new().arg("den"), || {
            Ok(Speaker { room: "den".into() })
        })
        .expect("construct");
    let (attic, existed) = registry
        .construct(&CallArgs::new().arg("attic"), || {
            Ok(Speaker { room: "attic".into() })
        })
        .expect("construct");
    assert!(!existed);
    assert!(!Arc::ptr_eq(&den, &attic));
    assert_eq!(registry.len().expect("len"), 2);
}

#[test]
fn positional_and_named_supply_resolve_identically() {
    let registry = Registry::new();
    let (positional, _) = registry
        .construct(&CallArgs::new().arg("den"), || {
            Ok(Speaker { room: "den".into() })
        })
        .expect("construct");
    let (named, existed) = registry
        .construct::<Speaker, _>(&CallArgs::new().named("room", "den"), || {
            unreachable!("same identity")
        })
        .expect("construct");
    assert!(existed);
    assert!(Arc::ptr_eq(&positional, &named));
    // a defaulted extra argument changes nothing about identity
    let (with_volume, existed) = registry
        .construct::<Speaker, _>(&CallArgs::new().arg("den").named("volume", 4), || {
            unreachable!("same identity")
        })
        .expect("construct");
    assert!(existed);
    assert!(Arc::ptr_eq(&positional, &with_volume));
}

#[test]
fn default_groups_keep_types_apart() {
    let registry = Registry::new();
    let (speaker, existed) = registry
        .construct(&CallArgs::new().arg("den"), || {
            Ok(Speaker { room: "den".into() })
        })
        .expect("construct");
    assert!(!existed);
    let (soundbar, existed) = registry
        .construct(&CallArgs::new().arg("den"), || {
            Ok(Soundbar { room: "den".into() })
        })
        .expect("construct");
    assert!(!existed, "a different type must get its own instance");
    assert_eq!(speaker.room, soundbar.room);
    assert_eq!(registry.len().expect("len"), 2);
}

#[test]
fn shared_group_shares_instances_across_types() {
    let registry = Registry::new();
    let (coordinator, existed) = registry
        .construct_in_group::<ZoneCoordinator, _>(&CallArgs::new().arg("kitchen"), || {
            Ok(ZoneCoordinator {
                name: "kitchen".into(),
            })
        })
        .expect("construct");
    assert!(!existed);
    assert_eq!(
        coordinator
            .downcast_ref::<ZoneCoordinator>()
            .expect("first keeper of the key")
            .name,
        "kitchen"
    );
    let (member, existed) = registry
        .construct_in_group::<ZoneMember, _>(&CallArgs::new().named("name", "kitchen"), || {
            unreachable!("shared group, same identity")
        })
        .expect("construct");
    assert!(existed);
    assert!(Arc::ptr_eq(&coordinator, &member));
    // a different identity still creates a second zone instance
    let (patio, existed) = registry
        .construct_in_group::<ZoneMember, _>(&CallArgs::new().arg("patio"), || {
            Ok(ZoneMember {
                name: "patio".into(),
            })
        })
        .expect("construct");
    assert!(!existed);
    assert!(!Arc::ptr_eq(&coordinator, &patio));
    assert_eq!(
        patio.downcast_ref::<ZoneMember>().expect("member-built").name,
        "patio"
    );
}

#[test]
fn typed_access_to_a_foreign_instance_is_a_conflict() {
    let registry = Registry::new();
    registry
        .construct(&CallArgs::new().arg("kitchen"), || {
            Ok(ZoneCoordinator {
                name: "kitchen".into(),
            })
        })
        .expect("construct");
    let err = registry
        .construct::<ZoneMember, _>(&CallArgs::new().arg("kitchen"), || {
            unreachable!("the key is already kept")
        })
        .unwrap_err();
    assert!(matches!(
        err,
        KeepsakeError::TypeConflict { ref group, .. } if group == "zone"
    ));
}

#[test]
fn no_identifier_collapses_the_group_to_one_instance() {
    let registry = Registry::new();
    let (first, existed) = registry
        .construct(&CallArgs::new().arg("aa"), || {
            Ok(Household { name: "aa".into() })
        })
        .expect("construct");
    assert!(!existed);
    let (second, existed) = registry
        .construct::<Household, _>(&CallArgs::new().arg("bb"), || {
            unreachable!("group singleton")
        })
        .expect("construct");
    assert!(existed);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(second.name, "aa", "the first construction wins");
}
