//! Type compatibility tests
//!
//! Covers:
//! - The numeric widening table
//! - Nullable and enum handling
//! - Generic base lookup
//! - Hierarchy walks
//! - Underlying type resolution

use dynq_types::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn t(b: BuiltinType) -> TypeDescriptor {
    TypeDescriptor::of(b)
}

// === Classification ===

#[rstest]
#[case(BuiltinType::Char, NumericKind::Floating)]
#[case(BuiltinType::Single, NumericKind::Floating)]
#[case(BuiltinType::Double, NumericKind::Floating)]
#[case(BuiltinType::Decimal, NumericKind::Floating)]
#[case(BuiltinType::SByte, NumericKind::Signed)]
#[case(BuiltinType::Int16, NumericKind::Signed)]
#[case(BuiltinType::Int32, NumericKind::Signed)]
#[case(BuiltinType::Int64, NumericKind::Signed)]
#[case(BuiltinType::Byte, NumericKind::Unsigned)]
#[case(BuiltinType::UInt16, NumericKind::Unsigned)]
#[case(BuiltinType::UInt32, NumericKind::Unsigned)]
#[case(BuiltinType::UInt64, NumericKind::Unsigned)]
#[case(BuiltinType::String, NumericKind::NotNumeric)]
#[case(BuiltinType::DateTime, NumericKind::NotNumeric)]
#[case(BuiltinType::Boolean, NumericKind::NotNumeric)]
fn test_classify(#[case] builtin: BuiltinType, #[case] expected: NumericKind) {
    let coercer = TypeCoercer::new();
    assert_eq!(coercer.classify(&t(builtin)), expected);
    assert_eq!(coercer.classify(&t(builtin).wrap_nullable()), expected);
}

#[test]
fn test_classify_enum_uses_underlying_type() {
    let coercer = TypeCoercer::new();
    let status = TypeDescriptor::enumeration("App", "Status", BuiltinType::Int16);
    assert_eq!(coercer.classify(&status), NumericKind::Signed);
    assert!(status.is_signed_integral());
    assert!(!status.is_unsigned_integral());
    assert!(status.is_numeric());
}

// === Widening table ===

#[rstest]
#[case(BuiltinType::SByte, BuiltinType::Int16, true)]
#[case(BuiltinType::SByte, BuiltinType::Decimal, true)]
#[case(BuiltinType::SByte, BuiltinType::Byte, false)]
#[case(BuiltinType::SByte, BuiltinType::UInt32, false)]
#[case(BuiltinType::Byte, BuiltinType::UInt16, true)]
#[case(BuiltinType::Byte, BuiltinType::Int16, true)]
#[case(BuiltinType::Byte, BuiltinType::UInt64, true)]
#[case(BuiltinType::Byte, BuiltinType::SByte, false)]
#[case(BuiltinType::Int16, BuiltinType::Int32, true)]
#[case(BuiltinType::Int16, BuiltinType::UInt16, false)]
#[case(BuiltinType::UInt16, BuiltinType::Int32, true)]
#[case(BuiltinType::UInt16, BuiltinType::Int16, false)]
#[case(BuiltinType::Int32, BuiltinType::Int64, true)]
#[case(BuiltinType::Int32, BuiltinType::Single, true)]
#[case(BuiltinType::Int32, BuiltinType::UInt32, false)]
#[case(BuiltinType::UInt32, BuiltinType::Int64, true)]
#[case(BuiltinType::UInt32, BuiltinType::Int32, false)]
#[case(BuiltinType::Int64, BuiltinType::Double, true)]
#[case(BuiltinType::Int64, BuiltinType::UInt64, false)]
#[case(BuiltinType::UInt64, BuiltinType::Decimal, true)]
#[case(BuiltinType::UInt64, BuiltinType::Int64, false)]
#[case(BuiltinType::Single, BuiltinType::Double, true)]
#[case(BuiltinType::Single, BuiltinType::Decimal, false)]
#[case(BuiltinType::Double, BuiltinType::Double, true)]
#[case(BuiltinType::Char, BuiltinType::Int32, false)]
#[case(BuiltinType::Decimal, BuiltinType::Double, false)]
fn test_widening_table(
    #[case] source: BuiltinType,
    #[case] target: BuiltinType,
    #[case] expected: bool,
) {
    let coercer = TypeCoercer::new();
    assert_eq!(coercer.is_compatible(&t(source), &t(target)), expected);
}

#[test]
fn test_nullable_pairs_use_the_same_table() {
    let coercer = TypeCoercer::new();
    let byte_opt = t(BuiltinType::Byte).wrap_nullable();
    let int_opt = t(BuiltinType::Int32).wrap_nullable();
    assert!(coercer.is_compatible(&byte_opt, &int_opt));
    assert!(!coercer.is_compatible(&int_opt, &byte_opt));
}

#[test]
fn test_optionality_must_match() {
    let coercer = TypeCoercer::new();
    let int = t(BuiltinType::Int32);
    assert!(!coercer.is_compatible(&int, &int.wrap_nullable()));
    assert!(!coercer.is_compatible(&int.wrap_nullable(), &int));
}

// === Enums ===

#[test]
fn test_enum_pairs_require_exact_match() {
    let coercer = TypeCoercer::new();
    let color = TypeDescriptor::enumeration("App", "Color", BuiltinType::Int32);
    let shade = TypeDescriptor::enumeration("App", "Shade", BuiltinType::Int32);
    assert!(coercer.is_compatible(&color, &color));
    assert!(!coercer.is_compatible(&color, &shade));
    assert!(coercer.is_compatible(&color.wrap_nullable(), &color.wrap_nullable()));
}

#[test]
fn test_single_enum_side_widens_as_underlying_type() {
    let coercer = TypeCoercer::new();
    let color = TypeDescriptor::enumeration("App", "Color", BuiltinType::Int32);
    assert!(coercer.is_compatible(&color, &t(BuiltinType::Int64)));
    assert!(!coercer.is_compatible(&color, &t(BuiltinType::Int16)));
}

// === Reference types ===

#[test]
fn test_everything_is_assignable_to_object() {
    let coercer = TypeCoercer::new();
    let entity = TypeDescriptor::class("App", "Entity").build();
    assert!(coercer.is_compatible(&entity, &TypeDescriptor::object()));
    assert!(coercer.is_compatible(&t(BuiltinType::Guid), &TypeDescriptor::object()));
    assert!(!coercer.is_compatible(&TypeDescriptor::object(), &entity));
}

#[test]
fn test_transitive_interface_assignability() {
    let coercer = TypeCoercer::new();
    let root = TypeDescriptor::interface("App", "IRoot").build();
    let child = TypeDescriptor::interface("App", "IChild").interface(root.clone()).build();
    let base = TypeDescriptor::class("App", "Base").interface(child).build();
    let derived = TypeDescriptor::class("App", "Derived").base(base).build();
    assert!(coercer.is_compatible(&derived, &root));
    assert!(!coercer.is_compatible(&TypeDescriptor::string(), &root));
}

// === Generic base lookup ===

#[test]
fn test_find_generic_base_walks_base_chain() {
    let coercer = TypeCoercer::new();
    let list_def = TypeDescriptor::class("System.Collections.Generic", "List")
        .generic_arity(1)
        .build();
    let list_of_int = list_def.make_generic(vec![t(BuiltinType::Int32)]);
    let numbers = TypeDescriptor::class("App", "Numbers").base(list_of_int.clone()).build();

    assert_eq!(coercer.find_generic_base(&list_def, &numbers), Some(list_of_int));
    assert_eq!(coercer.find_generic_base(&list_def, &TypeDescriptor::string()), None);
}

#[test]
fn test_find_generic_base_searches_interfaces() {
    let coercer = TypeCoercer::new();
    let enumerable_def = TypeDescriptor::interface("System.Collections.Generic", "IEnumerable")
        .generic_arity(1)
        .build();
    let collection_def = TypeDescriptor::interface("System.Collections.Generic", "ICollection")
        .generic_arity(1)
        .build();
    let enumerable_of_string = enumerable_def.make_generic(vec![TypeDescriptor::string()]);
    let collection_of_string = TypeDescriptor::closed(&collection_def, vec![TypeDescriptor::string()])
        .interface(enumerable_of_string.clone())
        .build();
    let names = TypeDescriptor::class("App", "Names")
        .interface(collection_of_string)
        .build();

    assert_eq!(
        coercer.find_generic_base(&enumerable_def, &names),
        Some(enumerable_of_string)
    );
}

#[test]
fn test_find_generic_base_ignores_interfaces_for_class_definitions() {
    let coercer = TypeCoercer::new();
    let box_def = TypeDescriptor::class("App", "Box").generic_arity(1).build();
    let holder_def = TypeDescriptor::interface("App", "IHolder").generic_arity(1).build();
    let holder = TypeDescriptor::closed(&holder_def, vec![TypeDescriptor::string()]).build();
    let item = TypeDescriptor::class("App", "Item").interface(holder).build();
    assert_eq!(coercer.find_generic_base(&box_def, &item), None);
}

// === Hierarchy walks ===

#[test]
fn test_self_and_base_types_for_classes() {
    let coercer = TypeCoercer::new();
    let entity = TypeDescriptor::class("App", "Entity").build();
    let person = TypeDescriptor::class("App", "Person").base(entity.clone()).build();
    let customer = TypeDescriptor::class("App", "Customer").base(person.clone()).build();

    assert_eq!(
        coercer.self_and_base_types(&customer),
        vec![customer.clone(), person, entity]
    );
}

#[test]
fn test_self_and_base_types_for_interfaces_dedups_depth_first() {
    let coercer = TypeCoercer::new();
    let a = TypeDescriptor::interface("App", "IA").build();
    let b = TypeDescriptor::interface("App", "IB").interface(a.clone()).build();
    let c = TypeDescriptor::interface("App", "IC").interface(a.clone()).build();
    let d = TypeDescriptor::interface("App", "ID")
        .interface(b.clone())
        .interface(c.clone())
        .build();

    assert_eq!(coercer.self_and_base_types(&d), vec![d.clone(), b, a, c]);
}

// === Underlying type ===

#[test]
fn test_underlying_type_of_non_generic_is_identity() {
    let coercer = TypeCoercer::new();
    assert_eq!(coercer.underlying_type(&TypeDescriptor::string()), TypeDescriptor::string());
}

#[test]
fn test_underlying_type_keeps_nullable_wrapper() {
    let coercer = TypeCoercer::new();
    let opt = t(BuiltinType::Decimal).wrap_nullable();
    assert_eq!(coercer.underlying_type(&opt), opt);
}

#[test]
fn test_underlying_type_inspects_only_last_argument() {
    let coercer = TypeCoercer::new();
    let list_def = TypeDescriptor::class("System.Collections.Generic", "List")
        .generic_arity(1)
        .build();
    let dict_def = TypeDescriptor::class("System.Collections.Generic", "Dictionary")
        .generic_arity(2)
        .build();

    let list_of_opt = list_def.make_generic(vec![t(BuiltinType::Int32).wrap_nullable()]);
    assert_eq!(coercer.underlying_type(&list_of_opt), t(BuiltinType::Int32).wrap_nullable());

    let dict = dict_def.make_generic(vec![
        t(BuiltinType::Guid),
        list_def.make_generic(vec![TypeDescriptor::string()]),
    ]);
    assert_eq!(coercer.underlying_type(&dict), TypeDescriptor::string());
}
