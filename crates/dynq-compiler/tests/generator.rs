//! Expression generator tests
//!
//! Covers:
//! - Integer widening ladder
//! - Equality optimization for date, offset and GUID operands
//! - Relational operators on strings and enums
//! - Null-propagation guards
//! - Type mismatch propagation

use chrono::NaiveDate;
use dynq_ast::{BinaryOperator, Expr, ExprKind, ExprRef};
use dynq_compiler::*;
use dynq_diagnostics::{DQ0100, DQ0102};
use dynq_types::{BuiltinType, LiteralValue, TypeDescriptor};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn generator() -> ExpressionGenerator {
    ExpressionGenerator::new(&ParsingConfig::default())
}

fn t(b: BuiltinType) -> TypeDescriptor {
    TypeDescriptor::of(b)
}

fn param(name: &str, ty: TypeDescriptor) -> ExprRef {
    Expr::parameter(name, ty)
}

fn binary_parts(expr: &ExprRef) -> (BinaryOperator, ExprRef, ExprRef) {
    match expr.kind() {
        ExprKind::Binary { op, left, right } => (*op, left.clone(), right.clone()),
        other => panic!("expected a binary node, got {:?}", other),
    }
}

// === Widening ===

#[rstest]
#[case(BuiltinType::Int32, BuiltinType::Int64, BuiltinType::Int64)]
#[case(BuiltinType::Int64, BuiltinType::Int32, BuiltinType::Int64)]
#[case(BuiltinType::UInt64, BuiltinType::Byte, BuiltinType::UInt64)]
#[case(BuiltinType::Int64, BuiltinType::UInt64, BuiltinType::UInt64)]
#[case(BuiltinType::UInt32, BuiltinType::Int64, BuiltinType::Int64)]
#[case(BuiltinType::Int32, BuiltinType::UInt32, BuiltinType::UInt32)]
#[case(BuiltinType::UInt16, BuiltinType::Int32, BuiltinType::Int32)]
#[case(BuiltinType::Int16, BuiltinType::UInt16, BuiltinType::UInt16)]
#[case(BuiltinType::Byte, BuiltinType::Int16, BuiltinType::Int16)]
#[case(BuiltinType::Byte, BuiltinType::UInt32, BuiltinType::UInt32)]
fn test_widening_ladder(
    #[case] left: BuiltinType,
    #[case] right: BuiltinType,
    #[case] expected: BuiltinType,
) {
    let generator = generator();
    let mut l = param("l", t(left));
    let mut r = param("r", t(right));
    generator
        .convert_numeric_type_to_bigger_type(&mut l, &mut r)
        .unwrap();

    assert_eq!(*l.ty(), t(expected));
    assert_eq!(*r.ty(), t(expected));
    // only the narrower side is converted
    assert_eq!(l.is_parameter(), left == expected);
    assert_eq!(r.is_parameter(), right == expected);
}

#[rstest]
#[case(BuiltinType::Int32)]
#[case(BuiltinType::UInt64)]
#[case(BuiltinType::Double)]
fn test_widening_same_type_is_noop(#[case] ty: BuiltinType) {
    let generator = generator();
    let l0 = param("l", t(ty));
    let r0 = param("r", t(ty));
    let (mut l, mut r) = (l0.clone(), r0.clone());
    generator
        .convert_numeric_type_to_bigger_type(&mut l, &mut r)
        .unwrap();
    assert!(std::sync::Arc::ptr_eq(&l, &l0));
    assert!(std::sync::Arc::ptr_eq(&r, &r0));
}

#[test]
fn test_widening_fails_loudly_for_unconvertible_operand() {
    let generator = generator();
    let mut l = param("l", t(BuiltinType::Int64));
    let mut r = param("r", TypeDescriptor::string());
    let err = generator
        .convert_numeric_type_to_bigger_type(&mut l, &mut r)
        .unwrap_err();
    assert_eq!(err.code(), DQ0102);
}

// === Equality ===

#[test]
fn test_date_time_equality_parses_string_literal() {
    let generator = generator();
    let created = param("created", t(BuiltinType::DateTime));
    let text = Expr::constant(LiteralValue::string("2024-01-01"));

    let eq = generator.generate_equal(&created, &text).unwrap();
    let (op, _, right) = binary_parts(&eq);
    assert_eq!(op, BinaryOperator::Equal);

    let expected = NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap();
    assert_eq!(right.as_constant(), Some(&LiteralValue::DateTime(expected)));
    assert_eq!(*right.ty(), t(BuiltinType::DateTime));
}

#[test]
fn test_equality_optimization_works_from_the_left() {
    let generator = generator();
    let id = param("id", t(BuiltinType::Guid).wrap_nullable());
    let text = Expr::constant(LiteralValue::string("6f9619ff-8b86-d011-b42d-00cf4fc964ff"));

    let eq = generator.generate_not_equal(&text, &id).unwrap();
    let (op, left, _) = binary_parts(&eq);
    assert_eq!(op, BinaryOperator::NotEqual);
    assert!(matches!(left.as_constant(), Some(LiteralValue::Guid(_))));
    assert_eq!(*left.ty(), t(BuiltinType::Guid).wrap_nullable());
}

#[test]
fn test_date_time_offset_equality() {
    let generator = generator();
    let stamp = param("stamp", t(BuiltinType::DateTimeOffset));
    let text = Expr::constant(LiteralValue::string("2024-03-05T10:00:00+02:00"));
    let eq = generator.generate_equal(&stamp, &text).unwrap();
    let (_, _, right) = binary_parts(&eq);
    assert!(matches!(right.as_constant(), Some(LiteralValue::DateTimeOffset(_))));
}

#[test]
fn test_unparseable_literal_falls_through_to_type_mismatch() {
    let generator = generator();
    let created = param("created", t(BuiltinType::DateTime));
    let text = Expr::constant(LiteralValue::string("yesterday"));
    let err = generator.generate_equal(&created, &text).unwrap_err();
    assert_eq!(err.code(), DQ0100);
}

#[test]
fn test_mismatched_numeric_equality_is_an_error() {
    let generator = generator();
    let count = param("count", t(BuiltinType::Int32));
    let limit = Expr::constant(LiteralValue::Int64(10));
    assert_eq!(generator.generate_equal(&count, &limit).unwrap_err().code(), DQ0100);
}

// === Relational ===

#[test]
fn test_string_less_than_uses_compare() {
    let generator = generator();
    let a = param("a", TypeDescriptor::string());
    let b = param("b", TypeDescriptor::string());

    let lt = generator.generate_less_than(&a, &b).unwrap();
    let (op, left, right) = binary_parts(&lt);
    assert_eq!(op, BinaryOperator::LessThan);
    assert!(left.is_call());
    assert_eq!(right.as_constant(), Some(&LiteralValue::Int32(0)));
    assert_eq!(lt.to_string(), "(String.Compare(a, b) < 0)");
}

#[rstest]
#[case(BinaryOperator::GreaterThan)]
#[case(BinaryOperator::GreaterThanOrEqual)]
#[case(BinaryOperator::LessThan)]
#[case(BinaryOperator::LessThanOrEqual)]
fn test_string_relational_never_compares_strings_directly(#[case] op: BinaryOperator) {
    let generator = generator();
    let a = param("a", TypeDescriptor::string());
    let b = Expr::constant(LiteralValue::string("m"));
    let expr = match op {
        BinaryOperator::GreaterThan => generator.generate_greater_than(&a, &b),
        BinaryOperator::GreaterThanOrEqual => generator.generate_greater_than_equal(&a, &b),
        BinaryOperator::LessThan => generator.generate_less_than(&a, &b),
        _ => generator.generate_less_than_equal(&a, &b),
    }
    .unwrap();
    let (built, left, _) = binary_parts(&expr);
    assert_eq!(built, op);
    assert_eq!(*left.ty(), TypeDescriptor::int32());
}

#[test]
fn test_enum_relational_converts_both_sides() {
    let generator = generator();
    let status = TypeDescriptor::enumeration("Shop", "Status", BuiltinType::Int32);
    let current = Expr::constant(LiteralValue::enumeration(status.clone(), 2));
    let pending = Expr::constant(LiteralValue::enumeration(status, 1));

    let gt = generator.generate_greater_than(&current, &pending).unwrap();
    let (_, left, right) = binary_parts(&gt);
    assert!(matches!(left.kind(), ExprKind::Convert { .. }));
    assert!(matches!(right.kind(), ExprKind::Convert { .. }));
    assert_eq!(*left.ty(), TypeDescriptor::int32());
    assert_eq!(*right.ty(), TypeDescriptor::int32());
}

#[test]
fn test_enum_relational_leaves_plain_integer_alone() {
    let generator = generator();
    let status = TypeDescriptor::enumeration("Shop", "Status", BuiltinType::Int32);
    let current = param("status", status);
    let three = Expr::constant(LiteralValue::Int32(3));

    let ge = generator.generate_greater_than_equal(&current, &three).unwrap();
    let (_, left, right) = binary_parts(&ge);
    assert!(matches!(left.kind(), ExprKind::Convert { .. }));
    assert!(std::sync::Arc::ptr_eq(&right, &three));
}

#[test]
fn test_nullable_enum_converts_to_nullable_underlying_type() {
    let generator = generator();
    let level = TypeDescriptor::enumeration("Shop", "Level", BuiltinType::Byte).wrap_nullable();
    let a = param("a", level.clone());
    let b = param("b", level);
    let le = generator.generate_less_than_equal(&a, &b).unwrap();
    let (_, left, _) = binary_parts(&le);
    assert_eq!(*left.ty(), t(BuiltinType::Byte).wrap_nullable());
}

#[test]
fn test_numeric_relational() {
    let generator = generator();
    let price = param("price", t(BuiltinType::Decimal));
    let limit = Expr::constant(LiteralValue::Decimal(rust_decimal::Decimal::new(995, 2)));
    let lt = generator.generate_less_than(&price, &limit).unwrap();
    assert_eq!(*lt.ty(), TypeDescriptor::boolean());
    assert_eq!(lt.to_string(), "(price < 9.95M)");
}

// === Arithmetic ===

#[test]
fn test_add_and_subtract() {
    let generator = generator();
    let x = param("x", TypeDescriptor::int32());
    let one = Expr::constant(LiteralValue::Int32(1));
    assert_eq!(generator.generate_add(&x, &one).unwrap().to_string(), "(x + 1)");
    assert_eq!(generator.generate_subtract(&x, &one).unwrap().to_string(), "(x - 1)");
}

// === Null propagation ===

fn order_model() -> ExprRef {
    let address = TypeDescriptor::class("Shop", "Address")
        .member("City", TypeDescriptor::string())
        .member("Zip", TypeDescriptor::int32())
        .build();
    let customer = TypeDescriptor::class("Shop", "Customer")
        .member("Address", address)
        .build();
    let order = TypeDescriptor::class("Shop", "Order")
        .member("Customer", customer)
        .build();
    param("a", order)
}

#[test]
fn test_null_guard_for_member_chain() {
    let generator = generator();
    let a = order_model();
    let b = Expr::property(a.clone(), "Customer").unwrap();
    let c = Expr::property(b.clone(), "Address").unwrap();
    let d = Expr::property(c, "City").unwrap();

    let guard = generator.try_generate_and_also_not_null(&d, true).unwrap();
    assert!(guard.is_guarded());
    assert_eq!(
        guard.expression().to_string(),
        "((((a != null) && (a.Customer != null)) && (a.Customer.Address != null)) && (a.Customer.Address.City != null))"
    );
}

#[test]
fn test_null_guard_three_terms_root_first() {
    let generator = generator();
    let a = order_model();
    let b = Expr::property(a, "Customer").unwrap();
    let c = Expr::property(b, "Address").unwrap();

    let guard = generator.try_generate_and_also_not_null(&c, true).unwrap();
    let NullGuard::Guarded(expr) = guard else {
        panic!("expected a guard");
    };
    assert_eq!(
        expr.to_string(),
        "(((a != null) && (a.Customer != null)) && (a.Customer.Address != null))"
    );
}

#[test]
fn test_null_guard_skips_value_typed_leaf() {
    let generator = generator();
    let customer = Expr::property(order_model(), "Customer").unwrap();
    let address = Expr::property(customer, "Address").unwrap();
    let zip = Expr::property(address, "Zip").unwrap();

    let guard = generator.try_generate_and_also_not_null(&zip, true).unwrap();
    assert_eq!(
        guard.expression().to_string(),
        "(((a != null) && (a.Customer != null)) && (a.Customer.Address != null))"
    );
}

#[test]
fn test_single_node_is_unchanged() {
    let generator = generator();
    let a = order_model();
    let b = Expr::property(a, "Customer").unwrap();

    let guard = generator.try_generate_and_also_not_null(&b, false).unwrap();
    assert!(!guard.is_guarded());
    assert!(std::sync::Arc::ptr_eq(guard.expression(), &b));

    let root = order_model();
    let guard = generator.try_generate_and_also_not_null(&root, true).unwrap();
    assert!(std::sync::Arc::ptr_eq(&guard.into_expression(), &root));
}

#[test]
fn test_single_method_call_is_guarded() {
    let generator = generator();
    let customer_type = TypeDescriptor::class("Shop", "Customer")
        .member("Name", TypeDescriptor::string())
        .build();
    let repo = TypeDescriptor::class("Shop", "Repository").build();
    let find = dynq_types::MethodInfo::new_instance(
        repo.clone(),
        "FindCustomer",
        vec![],
        customer_type,
    );
    let call = Expr::call(Some(param("repo", repo)), find, vec![]).unwrap();
    let name = Expr::property(call, "Name").unwrap();

    let guard = generator.try_generate_and_also_not_null(&name, false).unwrap();
    assert!(guard.is_guarded());
    assert_eq!(guard.expression().to_string(), "(repo.FindCustomer() != null)");
}
