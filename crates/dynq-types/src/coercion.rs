//! Type compatibility rules
//!
//! This module implements the implicit conversion rules used when combining
//! operands:
//! - Numeric widening (the integer promotion ladder plus float widening)
//! - Nullable and enum unwrapping
//! - Reference assignability along base classes and interfaces
//! - Generic base lookup and hierarchy walks

use crate::{BuiltinType, NumericKind, TypeDescriptor};

/// Type compatibility engine
///
/// Stateless: every rule is a pure function of the descriptors involved.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeCoercer;

impl TypeCoercer {
    /// Create a new type coercer
    pub fn new() -> Self {
        Self
    }

    /// Numeric family of `ty`, computed from its unwrapped form
    pub fn classify(&self, ty: &TypeDescriptor) -> NumericKind {
        ty.numeric_kind()
    }

    /// Check if a value of `source` may be used where `target` is expected
    ///
    /// - Identical types are always compatible
    /// - Reference targets use reference assignability
    /// - Value targets compare the nullable-unwrapped forms; nullable on only
    ///   one side is rejected
    /// - Two enums are compared as `object` (exact match only); a single enum
    ///   side enters the widening table as its underlying integral type
    pub fn is_compatible(&self, source: &TypeDescriptor, target: &TypeDescriptor) -> bool {
        if source == target {
            return true;
        }

        if !target.is_value_type() {
            return self.is_assignable(source, target);
        }

        let st = source.unwrap_nullable();
        let tt = target.unwrap_nullable();
        if (st != *source) != (tt != *target) {
            return false;
        }

        if st.is_enum() && tt.is_enum() {
            return st == tt;
        }

        match (st.type_code(), tt.type_code()) {
            (Some(sc), Some(tc)) => widens_to(sc, tc).unwrap_or(st == tt),
            _ => st == tt,
        }
    }

    /// Reference assignability: `target` is `source`, `object`, a base class
    /// of `source`, or an interface `source` implements
    pub fn is_assignable(&self, source: &TypeDescriptor, target: &TypeDescriptor) -> bool {
        if source == target || target.is_object() {
            return true;
        }
        let mut current = Some(source);
        while let Some(ty) = current {
            if ty == target {
                return true;
            }
            if target.is_interface() && implements(ty, target) {
                return true;
            }
            current = ty.base_type();
        }
        false
    }

    /// Find the closed form of `generic_definition` among `ty` and its bases
    ///
    /// When the definition is an interface, the implemented interfaces of each
    /// visited type are searched depth-first as well. The first match wins.
    pub fn find_generic_base(
        &self,
        generic_definition: &TypeDescriptor,
        ty: &TypeDescriptor,
    ) -> Option<TypeDescriptor> {
        let mut current = Some(ty);
        while let Some(t) = current {
            if t.is_object() {
                break;
            }
            if t.generic_definition() == Some(generic_definition) {
                return Some(t.clone());
            }
            if generic_definition.is_interface() {
                for interface in t.interfaces() {
                    if let Some(found) = self.find_generic_base(generic_definition, interface) {
                        return Some(found);
                    }
                }
            }
            current = t.base_type();
        }
        None
    }

    /// `ty` followed by its supertypes
    ///
    /// Interfaces yield themselves and every transitively extended interface
    /// once, depth-first. Other types yield themselves and their base chain,
    /// excluding the root `object`.
    pub fn self_and_base_types(&self, ty: &TypeDescriptor) -> Vec<TypeDescriptor> {
        if ty.is_interface() {
            let mut types = Vec::new();
            add_interface(&mut types, ty);
            return types;
        }

        let mut types = Vec::new();
        let mut current = Some(ty);
        while let Some(t) = current {
            if t.is_object() {
                break;
            }
            types.push(t.clone());
            current = t.base_type();
        }
        types
    }

    /// Innermost non-generic type reached through the last generic argument
    ///
    /// `Nullable<T>` is kept as-is when its payload is that innermost type.
    /// Only the last argument is inspected.
    pub fn underlying_type(&self, ty: &TypeDescriptor) -> TypeDescriptor {
        match ty.generic_arguments().last() {
            Some(last) => {
                let inner = self.underlying_type(last);
                if ty.nullable_payload() == Some(&inner) {
                    ty.clone()
                } else {
                    inner
                }
            }
            None => ty.clone(),
        }
    }
}

fn implements(ty: &TypeDescriptor, interface: &TypeDescriptor) -> bool {
    ty.interfaces()
        .iter()
        .any(|i| i == interface || implements(i, interface))
}

fn add_interface(types: &mut Vec<TypeDescriptor>, ty: &TypeDescriptor) {
    if !types.contains(ty) {
        types.push(ty.clone());
        for interface in ty.interfaces() {
            add_interface(types, interface);
        }
    }
}

/// Widening table keyed on builtin codes.
///
/// `None` means the source is outside the table and the caller falls back to
/// an exact match.
fn widens_to(source: BuiltinType, target: BuiltinType) -> Option<bool> {
    use BuiltinType::*;

    let allowed: &[BuiltinType] = match source {
        SByte => &[SByte, Int16, Int32, Int64, Single, Double, Decimal],
        Byte => &[
            Byte, Int16, UInt16, Int32, UInt32, Int64, UInt64, Single, Double, Decimal,
        ],
        Int16 => &[Int16, Int32, Int64, Single, Double, Decimal],
        UInt16 => &[UInt16, Int32, UInt32, Int64, UInt64, Single, Double, Decimal],
        Int32 => &[Int32, Int64, Single, Double, Decimal],
        UInt32 => &[UInt32, Int64, UInt64, Single, Double, Decimal],
        Int64 => &[Int64, Single, Double, Decimal],
        UInt64 => &[UInt64, Single, Double, Decimal],
        Single => &[Single, Double],
        _ => return None,
    };
    Some(allowed.contains(&target))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(b: BuiltinType) -> TypeDescriptor {
        TypeDescriptor::of(b)
    }

    #[test]
    fn test_identical_types_are_compatible() {
        let coercer = TypeCoercer::new();
        assert!(coercer.is_compatible(&t(BuiltinType::Guid), &t(BuiltinType::Guid)));
        assert!(coercer.is_compatible(&TypeDescriptor::string(), &TypeDescriptor::string()));
    }

    #[test]
    fn test_widening_is_one_directional() {
        let coercer = TypeCoercer::new();
        assert!(coercer.is_compatible(&t(BuiltinType::Int32), &t(BuiltinType::Int64)));
        assert!(!coercer.is_compatible(&t(BuiltinType::Int64), &t(BuiltinType::Int32)));
        assert!(coercer.is_compatible(&t(BuiltinType::Single), &t(BuiltinType::Double)));
        assert!(!coercer.is_compatible(&t(BuiltinType::Double), &t(BuiltinType::Single)));
        assert!(!coercer.is_compatible(&t(BuiltinType::Double), &t(BuiltinType::Decimal)));
    }

    #[test]
    fn test_mismatched_optionality_is_rejected() {
        let coercer = TypeCoercer::new();
        let int = t(BuiltinType::Int32);
        let long_opt = t(BuiltinType::Int64).wrap_nullable();
        assert!(!coercer.is_compatible(&int.wrap_nullable(), &int));
        assert!(!coercer.is_compatible(&int, &long_opt));
        assert!(coercer.is_compatible(&int.wrap_nullable(), &long_opt));
    }

    #[test]
    fn test_reference_assignability() {
        let coercer = TypeCoercer::new();
        let named = TypeDescriptor::interface("App", "INamed").build();
        let entity = TypeDescriptor::class("App", "Entity").interface(named.clone()).build();
        let customer = TypeDescriptor::class("App", "Customer").base(entity.clone()).build();

        assert!(coercer.is_compatible(&customer, &entity));
        assert!(coercer.is_compatible(&customer, &named));
        assert!(coercer.is_compatible(&t(BuiltinType::Int32), &TypeDescriptor::object()));
        assert!(!coercer.is_compatible(&entity, &customer));
    }

    #[test]
    fn test_underlying_type_keeps_nullable() {
        let coercer = TypeCoercer::new();
        let opt = t(BuiltinType::Int32).wrap_nullable();
        assert_eq!(coercer.underlying_type(&opt), opt);
        assert_eq!(coercer.underlying_type(&t(BuiltinType::Int32)), t(BuiltinType::Int32));
    }
}
