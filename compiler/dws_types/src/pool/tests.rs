use pretty_assertions::assert_eq;

use super::*;
use crate::{ClassFlags, EnumType, TypeKind};

#[test]
fn primitives_are_pre_interned() {
    let pool = TypePool::new();
    assert_eq!(pool.len(), TypeId::PRIMITIVE_COUNT as usize);
    assert_eq!(pool.kind(TypeId::INTEGER), TypeKind::Integer);
    assert_eq!(pool.kind(TypeId::VARIANT), TypeKind::Variant);
    assert_eq!(pool.kind(TypeId::NIL), TypeKind::Nil);
}

#[test]
fn alias_chain_unwraps() {
    let mut pool = TypePool::new();
    let a = pool.alias("A", TypeId::INTEGER);
    let b = pool.alias("B", a);
    let c = pool.alias("C", b);

    assert_eq!(pool.kind(c), TypeKind::Alias);
    assert_eq!(pool.underlying(c), TypeId::INTEGER);
    assert_eq!(pool.underlying_kind(c), TypeKind::Integer);
    assert!(pool.equals(c, TypeId::INTEGER));
    assert!(pool.equals(a, c));
    assert!(!pool.equals(c, TypeId::STRING));
}

#[test]
fn named_types_compare_by_name_ignoring_case() {
    let mut pool = TypePool::new();
    let a = pool.add_class(ClassType::new("TFoo"));
    let b = pool.add_class(ClassType::new("tfoo"));
    let c = pool.add_class(ClassType::new("TBar"));
    assert!(pool.equals(a, b));
    assert!(!pool.equals(a, c));

    let e = pool.add_enum(EnumType::new("TColor", ["Red", "Green"]));
    let r = pool.add_record(RecordType::new("TColor"));
    assert!(!pool.equals(e, r), "different kinds never compare equal");
}

#[test]
fn arrays_compare_element_and_bounds() {
    let mut pool = TypePool::new();
    let dyn_int = pool.dynamic_array(TypeId::INTEGER);
    let dyn_int2 = pool.dynamic_array(TypeId::INTEGER);
    let static_int = pool.static_array(TypeId::INTEGER, 1, 10);
    let static_int2 = pool.static_array(TypeId::INTEGER, 1, 10);
    let static_other = pool.static_array(TypeId::INTEGER, 0, 9);
    let dyn_str = pool.dynamic_array(TypeId::STRING);

    assert!(pool.equals(dyn_int, dyn_int2));
    assert!(pool.equals(static_int, static_int2));
    assert!(!pool.equals(static_int, static_other));
    assert!(!pool.equals(dyn_int, static_int));
    assert!(!pool.equals(dyn_int, dyn_str));
}

#[test]
fn procedure_never_equals_function() {
    let mut pool = TypePool::new();
    let func = pool.function_pointer([TypeId::STRING], Some(TypeId::INTEGER));
    let proc_ = pool.function_pointer([TypeId::STRING], None);
    let func2 = pool.function_pointer([TypeId::STRING], Some(TypeId::INTEGER));
    let method = pool.method_pointer([TypeId::STRING], Some(TypeId::INTEGER));

    assert!(pool.equals(func, func2));
    assert!(!pool.equals(func, proc_));
    assert!(!pool.equals(func, method));
}

#[test]
fn display_names() {
    let mut pool = TypePool::new();
    let func = pool.function_pointer([TypeId::INTEGER, TypeId::STRING], Some(TypeId::BOOLEAN));
    let nullary = pool.function_pointer([], Some(TypeId::INTEGER));
    let proc_ = pool.function_pointer([TypeId::STRING], None);
    let method = pool.method_pointer([TypeId::STRING], None);
    let dyn_arr = pool.dynamic_array(TypeId::INTEGER);
    let static_arr = pool.static_array(TypeId::INTEGER, 1, 10);
    let digit = pool.add_subrange("", TypeId::INTEGER, 0, 9);
    let class = pool.add_class(ClassType::new("TFoo"));
    let meta = pool.class_of(class);

    assert_eq!(pool.display_name(func), "function(Integer, String): Boolean");
    assert_eq!(pool.display_name(nullary), "function(): Integer");
    assert_eq!(pool.display_name(proc_), "procedure(String)");
    assert_eq!(pool.display_name(method), "procedure(String) of object");
    assert_eq!(pool.display_name(dyn_arr), "array of Integer");
    assert_eq!(pool.display_name(static_arr), "array[1..10] of Integer");
    assert_eq!(pool.display_name(digit), "0..9");
    assert_eq!(pool.display_name(meta), "class of TFoo");
}

#[test]
fn class_mut_until_sealed() {
    let mut pool = TypePool::new();
    let id = pool.add_class(ClassType::new("TFoo").with_flags(ClassFlags::FORWARD));
    let alias = pool.alias("TFooAlias", id);

    {
        let class = pool.class_mut(alias).expect("class is open");
        class.add_field("FValue", TypeId::INTEGER, dws_ir::Visibility::Private);
        class.flags.remove(ClassFlags::FORWARD);
    }
    assert!(pool.class(id).is_some_and(|c| c.fields.contains("fvalue")));

    pool.seal();
    assert_eq!(
        pool.class_mut(id).err(),
        Some(RegistryError::Sealed {
            name: "TFoo".to_owned()
        })
    );
}

#[test]
fn class_mut_rejects_non_class() {
    let mut pool = TypePool::new();
    let rec = pool.add_record(RecordType::new("TPoint"));
    assert_eq!(
        pool.class_mut(rec).err(),
        Some(RegistryError::NotAClass {
            name: "TPoint".to_owned()
        })
    );
}
