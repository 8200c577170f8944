use pretty_assertions::assert_eq;

use super::*;
use crate::{MemberFlags, RttiConfig, SignatureType};

fn class_system() -> TypeSystem {
    let mut system = TypeSystem::default();
    system
        .declare_class(ClassType::new("TObject"), Position::at(1, 1))
        .unwrap();
    system
        .declare_class(ClassType::new("Exception").with_parent("TObject"), Position::at(2, 1))
        .unwrap();
    system
        .declare_class(
            ClassType::new("EConvertError").with_parent("Exception"),
            Position::at(3, 1),
        )
        .unwrap();
    system
}

fn procedure(system: &mut TypeSystem) -> TypeId {
    system.pool_mut().method_pointer(Vec::<TypeId>::new(), None)
}

#[test]
fn builtins_are_seeded() {
    let system = TypeSystem::default();
    assert_eq!(system.resolve("integer"), Some(TypeId::INTEGER));
    assert_eq!(system.resolve("FLOAT"), Some(TypeId::FLOAT));
    assert_eq!(system.resolve("Variant"), Some(TypeId::VARIANT));
    let root = system.resolve(ROOT_INTERFACE).unwrap();
    assert_eq!(system.pool().kind(root), TypeKind::Interface);
}

#[test]
fn builtins_can_be_disabled() {
    let system = TypeSystem::new(EngineConfig::default().without_builtins());
    assert_eq!(system.types().count(), 0);
    assert_eq!(system.resolve("Integer"), None);
}

#[test]
fn register_builtins_is_idempotent() {
    let mut system = TypeSystem::default();
    let before = system.types().count();
    let root = system.resolve(ROOT_INTERFACE);
    system.register_builtins();
    assert_eq!(system.types().count(), before);
    assert_eq!(system.resolve(ROOT_INTERFACE), root);
}

#[test]
fn declared_classes_get_rtti_and_hierarchy() {
    let system = class_system();
    assert_eq!(system.rtti().class_id("TObject"), Some(1000));
    assert_eq!(system.rtti().class_id("exception"), Some(1001));
    assert_eq!(system.rtti().class_id("EConvertError"), Some(1002));
    assert!(system.is_descendant_of("EConvertError", "TObject"));
    assert!(!system.is_descendant_of("TObject", "Exception"));
    assert_eq!(system.classes().depth("EConvertError"), Some(2));
}

#[test]
fn records_and_enums_use_their_own_rtti_ranges() {
    let config = EngineConfig::default().with_rtti(RttiConfig {
        class_base: 10,
        record_base: 20,
        enum_base: 30,
    });
    let mut system = TypeSystem::new(config);
    system
        .declare_record(RecordType::new("TPoint"), Position::at(1, 1))
        .unwrap();
    system
        .declare_enum(EnumType::new("TColor", ["Red", "Green"]), Position::at(2, 1))
        .unwrap();
    assert_eq!(system.rtti().record_id("TPoint"), Some(20));
    assert_eq!(system.rtti().enum_id("TColor"), Some(30));
    assert_eq!(system.rtti().class_id("TPoint"), None);
}

#[test]
fn duplicate_declaration_does_not_grow_the_pool() {
    let mut system = class_system();
    let len = system.pool().len();
    let err = system
        .declare_class(ClassType::new("tobject"), Position::at(9, 1))
        .unwrap_err();
    assert_eq!(
        err,
        RegistryError::DuplicateType {
            name: "TObject".to_owned(),
            position: Position::at(1, 1),
        }
    );
    assert_eq!(system.pool().len(), len);
}

#[test]
fn user_type_may_shadow_builtin() {
    let mut system = TypeSystem::default();
    let id = system
        .declare_record(RecordType::new("Integer"), Position::at(4, 1))
        .unwrap();
    assert_eq!(system.resolve("Integer"), Some(id));
}

#[test]
fn forward_class_is_completed_in_place() {
    let mut system = class_system();
    let id = system
        .declare_class(
            ClassType::new("TNode").with_flags(ClassFlags::FORWARD),
            Position::at(5, 1),
        )
        .unwrap();
    assert_eq!(system.unresolved_forwards(), vec!["TNode"]);

    let done = system
        .complete_class(
            ClassType::new("tnode")
                .with_parent("TObject")
                .with_field("Next", id, dws_ir::Visibility::Public)
                .with_flags(ClassFlags::FORWARD),
        )
        .unwrap();

    assert_eq!(done, id);
    assert!(system.unresolved_forwards().is_empty());
    assert!(system.is_descendant_of("TNode", "TObject"));
    let class = system.pool().class(id).unwrap();
    assert_eq!(class.name, "TNode");
    assert!(class.fields.contains("next"));
}

#[test]
fn complete_after_seal_is_rejected() {
    let mut system = class_system();
    system.seal();
    let err = system
        .complete_class(ClassType::new("TObject"))
        .unwrap_err();
    assert_eq!(
        err,
        RegistryError::Sealed {
            name: "TObject".to_owned()
        }
    );
}

#[test]
fn complete_unknown_class_fails() {
    let mut system = TypeSystem::default();
    assert!(matches!(
        system.complete_class(ClassType::new("TGhost")),
        Err(RegistryError::NotAClass { .. })
    ));
}

#[test]
fn members_are_found_on_ancestors() {
    let mut system = TypeSystem::default();
    let proc = procedure(&mut system);
    let string = TypeId::STRING;
    system
        .declare_class(
            ClassType::new("TBase")
                .with_field("FName", string, dws_ir::Visibility::Private)
                .with_method(
                    "Run",
                    MethodInfo::new(proc).with_flags(MemberFlags::VIRTUAL),
                )
                .with_property(
                    "Name",
                    PropertyInfo::new(
                        string,
                        crate::PropertyAccess::Field("FName".to_owned()),
                        crate::PropertyAccess::None,
                    ),
                ),
            Position::at(1, 1),
        )
        .unwrap();
    system
        .declare_class(
            ClassType::new("TChild").with_parent("TBase").with_method(
                "Run",
                MethodInfo::new(proc).with_flags(MemberFlags::OVERRIDE),
            ),
            Position::at(2, 1),
        )
        .unwrap();

    let (method, owner) = system.find_method("TChild", "run").unwrap();
    assert_eq!(owner, "TChild");
    assert!(method.flags.contains(MemberFlags::OVERRIDE));

    let (_, owner) = system.overridden_method("TChild", "Run").unwrap();
    assert_eq!(owner, "TBase");
    assert!(system.overridden_method("TBase", "Run").is_none());

    let (field, owner) = system.find_field("TChild", "fname").unwrap();
    assert_eq!((field.ty, owner), (string, "TBase"));

    let (property, _) = system.find_property("TChild", "Name").unwrap();
    assert!(property.is_read_only());

    assert!(system.find_method("TChild", "Missing").is_none());
}

#[test]
fn interface_implementation_is_inherited() {
    let mut system = class_system();
    system
        .declare_interface(InterfaceType::new("IShape").with_parent(ROOT_INTERFACE), Position::at(4, 1))
        .unwrap();
    system
        .declare_interface(InterfaceType::new("ICircle").with_parent("IShape"), Position::at(5, 1))
        .unwrap();
    system
        .declare_class(
            ClassType::new("TCircle").with_parent("TObject").implementing("ICircle"),
            Position::at(6, 1),
        )
        .unwrap();
    system
        .declare_class(ClassType::new("TBigCircle").with_parent("TCircle"), Position::at(7, 1))
        .unwrap();

    assert!(system.implements_interface("TCircle", "ICircle"));
    assert!(system.implements_interface("TCircle", "ishape"));
    assert!(system.implements_interface("TBigCircle", "IShape"));
    assert!(system.implements_interface("TBigCircle", ROOT_INTERFACE));
    assert!(!system.implements_interface("TObject", "IShape"));

    assert!(system.interface_extends("ICircle", "IShape"));
    assert!(system.interface_extends("IShape", "IShape"));
    assert!(!system.interface_extends("IShape", "ICircle"));
}

#[test]
fn interface_cycle_terminates() {
    let mut system = TypeSystem::default();
    system
        .declare_interface(InterfaceType::new("IA").with_parent("IB"), Position::at(1, 1))
        .unwrap();
    system
        .declare_interface(InterfaceType::new("IB").with_parent("IA"), Position::at(2, 1))
        .unwrap();
    assert!(!system.interface_extends("IA", "IC"));
    assert!(system.interface_extends("IA", "IB"));
}

#[test]
fn missing_interface_methods_checks_signatures() {
    let mut system = TypeSystem::default();
    let area = system
        .pool_mut()
        .method_pointer(Vec::<TypeId>::new(), Some(TypeId::FLOAT));
    let draw = procedure(&mut system);
    let wrong = system
        .pool_mut()
        .method_pointer(Vec::<TypeId>::new(), Some(TypeId::INTEGER));

    system
        .declare_interface(
            InterfaceType::new("IShape")
                .with_method("Area", MethodInfo::new(area))
                .with_method("Draw", MethodInfo::new(draw)),
            Position::at(1, 1),
        )
        .unwrap();
    system
        .declare_class(
            ClassType::new("TSquare")
                .implementing("IShape")
                .with_method("Area", MethodInfo::new(wrong))
                .with_method("Draw", MethodInfo::new(draw)),
            Position::at(2, 1),
        )
        .unwrap();

    assert_eq!(system.missing_interface_methods("TSquare", "IShape"), vec!["Area"]);
    let expected = SignatureType::new(Vec::<TypeId>::new(), Some(TypeId::FLOAT));
    assert_eq!(system.pool().signature(area), Some(&expected));
}

#[test]
fn conversion_path_uses_configured_depth() {
    let mut system = TypeSystem::new(EngineConfig::default().with_conversion_depth(1));
    for (from, to) in [("A", "B"), ("B", "C")] {
        system
            .declare_record(RecordType::new(from), Position::at(1, 1))
            .ok();
        system
            .declare_record(RecordType::new(to), Position::at(1, 1))
            .ok();
        system
            .conversions_mut()
            .register(crate::ConversionEntry::implicit(from, to, "Conv"))
            .unwrap();
    }
    let a = system.resolve("A").unwrap();
    let b = system.resolve("B").unwrap();
    let c = system.resolve("C").unwrap();

    assert_eq!(system.conversion_path(a, b), Some(vec!["A".to_owned(), "B".to_owned()]));
    // Two hops exceed a depth of one.
    assert_eq!(system.conversion_path(a, c), None);
}

#[test]
fn nominal_name_sees_through_aliases() {
    let mut system = class_system();
    let object = system.resolve("TObject").unwrap();
    let alias = system
        .declare_alias("TBaseObject", object, Position::at(8, 1))
        .unwrap();
    assert_eq!(system.nominal_name(alias), Some("TObject"));
    assert_eq!(system.nominal_name(TypeId::INTEGER), None);
}

#[test]
fn completing_a_complete_class_is_rejected() {
    let mut system = class_system();
    let err = system
        .complete_class(ClassType::new("Exception"))
        .unwrap_err();
    assert_eq!(
        err,
        RegistryError::NotForward {
            name: "Exception".to_owned()
        }
    );
    assert!(system.is_descendant_of("Exception", "TObject"));
    let exception = system.resolve("Exception").unwrap();
    assert_eq!(
        system.pool().class(exception).unwrap().parent.as_deref(),
        Some("TObject")
    );
}

#[test]
fn forward_class_completes_only_once() {
    let mut system = class_system();
    system
        .declare_class(
            ClassType::new("TNode").with_flags(ClassFlags::FORWARD),
            Position::at(5, 1),
        )
        .unwrap();
    system
        .complete_class(ClassType::new("TNode").with_parent("TObject"))
        .unwrap();
    assert!(matches!(
        system.complete_class(ClassType::new("TNode")),
        Err(RegistryError::NotForward { .. })
    ));
    assert!(system.is_descendant_of("TNode", "TObject"));
}

#[test]
fn declared_name_must_match_payload() {
    let mut system = class_system();
    let len = system.pool().len();
    let err = system
        .declare_type(
            "TAnimal",
            TypeData::Class(ClassType::new("TBeast").with_parent("TObject")),
            Position::at(6, 1),
            TypeVisibility::Public,
        )
        .unwrap_err();
    assert_eq!(
        err,
        RegistryError::NameMismatch {
            name: "TAnimal".to_owned(),
            declared: "TBeast".to_owned(),
        }
    );
    assert_eq!(system.pool().len(), len);
    assert_eq!(system.resolve("TAnimal"), None);
    assert_eq!(system.rtti().class_id("TAnimal"), None);

    // Case differences are not a mismatch.
    let id = system
        .declare_type(
            "tanimal",
            TypeData::Class(ClassType::new("TAnimal").with_parent("TObject")),
            Position::at(7, 1),
            TypeVisibility::Public,
        )
        .unwrap();
    let animal = system.resolve("TAnimal").unwrap();
    assert!(system.class_descends_from(animal, system.resolve("TObject").unwrap()));
    assert_eq!(animal, id);
}

#[test]
fn named_subrange_may_use_any_payload_name() {
    let mut system = TypeSystem::default();
    let id = system
        .declare_type(
            "TDigit",
            TypeData::Subrange(crate::SubrangeType {
                name: String::new(),
                base: TypeId::INTEGER,
                low: 0,
                high: 9,
            }),
            Position::at(1, 1),
            TypeVisibility::Public,
        )
        .unwrap();
    assert_eq!(system.resolve("TDigit"), Some(id));
}

#[test]
fn exhausted_rtti_rejects_declaration() {
    let config = EngineConfig::default().with_rtti(RttiConfig {
        class_base: u32::MAX,
        ..RttiConfig::default()
    });
    let mut system = TypeSystem::new(config);
    system
        .declare_class(ClassType::new("TFirst"), Position::at(1, 1))
        .unwrap();
    let len = system.pool().len();
    let err = system
        .declare_class(ClassType::new("TSecond"), Position::at(2, 1))
        .unwrap_err();
    assert_eq!(
        err,
        RegistryError::RttiExhausted {
            category: crate::RttiCategory::Class
        }
    );
    assert_eq!(system.pool().len(), len);
    assert_eq!(system.resolve("TSecond"), None);
    assert_eq!(system.rtti().class_id("TFirst"), Some(u32::MAX));
}
