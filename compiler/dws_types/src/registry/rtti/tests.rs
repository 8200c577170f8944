use pretty_assertions::assert_eq;

use super::*;

#[test]
fn categories_start_at_their_bases() {
    let mut rtti = RttiRegistry::default();
    assert_eq!(rtti.get_or_allocate_class("TObject").unwrap(), 1000);
    assert_eq!(rtti.get_or_allocate_class("Exception").unwrap(), 1001);
    assert_eq!(rtti.get_or_allocate_record("TPoint").unwrap(), 200_000);
    assert_eq!(rtti.get_or_allocate_enum("TColor").unwrap(), 300_000);
}

#[test]
fn ids_are_memoized_case_insensitively() {
    let mut rtti = RttiRegistry::default();
    let first = rtti.get_or_allocate_class("TFoo").unwrap();
    assert_eq!(rtti.get_or_allocate_class("tfoo").unwrap(), first);
    assert_eq!(rtti.get_or_allocate_class("TFOO").unwrap(), first);
    assert_eq!(rtti.get_or_allocate_class("TBar").unwrap(), first + 1);
}

#[test]
fn get_does_not_allocate() {
    let mut rtti = RttiRegistry::default();
    assert_eq!(rtti.class_id("TFoo"), None);
    rtti.get_or_allocate_class("TFoo").unwrap();
    assert_eq!(rtti.class_id("tfoo"), Some(1000));
    assert_eq!(rtti.record_id("TFoo"), None);
    assert_eq!(rtti.enum_id("TFoo"), None);
}

#[test]
fn same_name_in_different_categories_is_independent() {
    let mut rtti = RttiRegistry::default();
    assert_eq!(rtti.get_or_allocate_record("TThing").unwrap(), 200_000);
    assert_eq!(rtti.get_or_allocate_enum("TThing").unwrap(), 300_000);
    assert_eq!(rtti.name_of(RttiCategory::Enum, 300_000), Some("TThing"));
    assert_eq!(rtti.name_of(RttiCategory::Class, 300_000), None);
}

#[test]
fn units_do_not_share_counters() {
    let config = RttiConfig {
        class_base: 5,
        ..RttiConfig::default()
    };
    let mut a = RttiRegistry::new(config);
    let mut b = RttiRegistry::new(config);
    assert_eq!(a.get_or_allocate_class("X").unwrap(), 5);
    assert_eq!(a.get_or_allocate_class("Y").unwrap(), 6);
    assert_eq!(b.get_or_allocate_class("Y").unwrap(), 5);
}

#[test]
fn counter_stops_at_u32_max() {
    let mut rtti = RttiRegistry::new(RttiConfig {
        class_base: u32::MAX,
        ..RttiConfig::default()
    });
    assert_eq!(rtti.get_or_allocate_class("A"), Ok(u32::MAX));
    assert_eq!(rtti.get_or_allocate_class("a"), Ok(u32::MAX));
    assert_eq!(
        rtti.get_or_allocate_class("B"),
        Err(RegistryError::RttiExhausted {
            category: RttiCategory::Class
        })
    );
    assert_eq!(rtti.class_id("B"), None);
    // Other categories keep allocating.
    assert_eq!(rtti.get_or_allocate_record("B"), Ok(200_000));
}

#[test]
fn exhaustion_message_names_the_category() {
    let err = RegistryError::RttiExhausted {
        category: RttiCategory::Enum,
    };
    assert_eq!(err.to_string(), "enum RTTI identifiers exhausted");
}
