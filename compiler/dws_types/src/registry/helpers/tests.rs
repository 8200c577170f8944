use pretty_assertions::assert_eq;

use super::*;
use crate::PropertyAccess;

fn method(ret: u32) -> MethodInfo {
    MethodInfo::new(TypeId::from_raw(ret))
}

#[test]
fn register_and_lookup_by_name() {
    let mut registry = HelperRegistry::new();
    registry
        .register(HelperType::new("TStringHelper", TypeId::STRING))
        .unwrap();

    assert_eq!(registry.helper_count(), 1);
    assert_eq!(registry.type_count(), 1);
    for name in ["TStringHelper", "tstringhelper", "TSTRINGHELPER"] {
        assert_eq!(registry.by_name(name).map(|h| h.target), Some(TypeId::STRING));
    }
}

#[test]
fn duplicate_name_is_rejected() {
    let mut registry = HelperRegistry::new();
    registry
        .register(HelperType::new("THelper", TypeId::STRING))
        .unwrap();
    assert_eq!(
        registry.register(HelperType::new("thelper", TypeId::INTEGER)),
        Err(RegistryError::DuplicateHelper {
            name: "thelper".to_owned()
        })
    );
    assert_eq!(registry.helper_count(), 1);
}

#[test]
fn helpers_are_grouped_by_target() {
    let mut registry = HelperRegistry::new();
    registry.register(HelperType::new("TS1", TypeId::STRING)).unwrap();
    registry.register(HelperType::new("TS2", TypeId::STRING)).unwrap();
    registry.register(HelperType::new("TI", TypeId::INTEGER)).unwrap();

    let names: Vec<_> = registry
        .helpers_for(TypeId::STRING)
        .map(|h| h.name.as_str())
        .collect();
    assert_eq!(names, vec!["TS1", "TS2"]);
    assert_eq!(registry.helpers_for(TypeId::FLOAT).count(), 0);
    assert_eq!(registry.type_count(), 2);
}

#[test]
fn newest_helper_wins() {
    let mut registry = HelperRegistry::new();
    registry
        .register(HelperType::new("THelper1", TypeId::STRING).with_method("Test", method(2)))
        .unwrap();
    registry
        .register(HelperType::new("THelper2", TypeId::STRING).with_method("Test", method(0)))
        .unwrap();

    let (found, helper) = registry.find_method(TypeId::STRING, "TEST").unwrap();
    assert_eq!(helper.name, "THelper2");
    assert_eq!(found.signature, TypeId::INTEGER);
    assert!(registry.find_method(TypeId::STRING, "nonexistent").is_none());
}

#[test]
fn parent_helper_members_are_visible() {
    let mut registry = HelperRegistry::new();
    registry
        .register(
            HelperType::new("TParentHelper", TypeId::STRING)
                .with_method("ToUpper", method(2))
                .with_property(
                    "Length",
                    PropertyInfo::new(
                        TypeId::INTEGER,
                        PropertyAccess::Method("GetLength".to_owned()),
                        PropertyAccess::None,
                    ),
                ),
        )
        .unwrap();
    registry
        .register(
            HelperType::new("TChildHelper", TypeId::FLOAT)
                .with_parent("TParentHelper")
                .with_class_var("Epsilon", TypeId::FLOAT),
        )
        .unwrap();

    let (_, owner) = registry.find_method(TypeId::FLOAT, "toupper").unwrap();
    assert_eq!(owner.name, "TParentHelper");
    let (prop, _) = registry.find_property(TypeId::FLOAT, "length").unwrap();
    assert!(prop.is_read_only());
    assert_eq!(
        registry.find_class_var(TypeId::FLOAT, "EPSILON").map(|(ty, h)| (ty, h.name.as_str())),
        Some((TypeId::FLOAT, "TChildHelper"))
    );
}

#[test]
fn self_parented_helper_terminates() {
    let mut registry = HelperRegistry::new();
    registry
        .register(HelperType::new("TLoop", TypeId::STRING).with_parent("tloop"))
        .unwrap();
    assert!(registry.find_method(TypeId::STRING, "Missing").is_none());
}

#[test]
fn clear_resets_everything() {
    let mut registry = HelperRegistry::new();
    registry.register(HelperType::new("THelper1", TypeId::STRING)).unwrap();
    registry.register(HelperType::new("THelper2", TypeId::INTEGER)).unwrap();

    registry.clear();
    assert_eq!(registry.helper_count(), 0);
    assert_eq!(registry.type_count(), 0);
    assert!(registry.by_name("THelper1").is_none());
}
