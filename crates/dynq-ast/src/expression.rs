//! Typed expression tree nodes
//!
//! Nodes are immutable and shared through [`ExprRef`]. Every constructor
//! checks its operands the way the host runtime does when it builds the same
//! node, so a tree that was built successfully is well-typed.

use std::fmt;
use std::sync::Arc;

use dynq_diagnostics::{DQ0104, DQ0105, QueryError, Result};
use dynq_types::{BuiltinType, LiteralValue, MemberInfo, MethodInfo, TypeCoercer, TypeDescriptor};

use crate::BinaryOperator;

/// Shared handle to a node
pub type ExprRef = Arc<Expr>;

/// A typed node of the expression tree
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    ty: TypeDescriptor,
    kind: ExprKind,
}

/// Node shapes
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Literal value
    Constant(LiteralValue),
    /// Root lambda parameter
    Parameter { name: String },
    /// Property or field read (source.member)
    MemberAccess { source: ExprRef, member: MemberInfo },
    /// Type conversion; the target is the node type
    Convert { operand: ExprRef },
    /// Binary operation
    Binary {
        op: BinaryOperator,
        left: ExprRef,
        right: ExprRef,
    },
    /// Method call; `instance` is `None` for static methods
    Call {
        instance: Option<ExprRef>,
        method: MethodInfo,
        arguments: Vec<ExprRef>,
    },
}

impl Expr {
    // === Leaves ===

    /// Constant typed with the natural type of its value
    pub fn constant(value: LiteralValue) -> ExprRef {
        Arc::new(Self {
            ty: value.value_type(),
            kind: ExprKind::Constant(value),
        })
    }

    /// Constant with an explicit static type
    ///
    /// Accepts null for any type that can hold null, a value for its own type
    /// or its `Nullable<>` form, and any value for a reference type it is
    /// assignable to.
    pub fn typed_constant(value: LiteralValue, ty: TypeDescriptor) -> Result<ExprRef> {
        let natural = value.value_type();
        let accepted = if value.is_null() {
            ty.can_be_null()
        } else {
            natural == ty
                || ty.nullable_payload() == Some(&natural)
                || (!ty.is_value_type() && TypeCoercer::new().is_assignable(&natural, &ty))
        };
        if !accepted {
            return Err(QueryError::invalid_conversion(
                natural.display_name(),
                ty.display_name(),
            ));
        }
        Ok(Arc::new(Self {
            ty,
            kind: ExprKind::Constant(value),
        }))
    }

    /// The null constant typed as `object`
    pub fn null() -> ExprRef {
        Self::constant(LiteralValue::Null)
    }

    /// Root parameter
    pub fn parameter(name: impl Into<String>, ty: TypeDescriptor) -> ExprRef {
        Arc::new(Self {
            ty,
            kind: ExprKind::Parameter { name: name.into() },
        })
    }

    // === Member access ===

    /// Property read by name, looked up along the base chain of the source type
    pub fn property(source: ExprRef, name: &str) -> Result<ExprRef> {
        let member = source
            .ty
            .find_member(name)
            .cloned()
            .ok_or_else(|| QueryError::member_not_found(name, source.ty.display_name()))?;
        Ok(Self::member(source, member))
    }

    /// Member read with an already resolved member
    pub fn member(source: ExprRef, member: MemberInfo) -> ExprRef {
        Arc::new(Self {
            ty: member.member_type.clone(),
            kind: ExprKind::MemberAccess { source, member },
        })
    }

    // === Conversion ===

    /// Explicit conversion to `target`
    ///
    /// Defined between numeric types (enums included, either side possibly
    /// nullable), between `T` and `Nullable<T>`, for boxing and unboxing, and
    /// between related reference types.
    pub fn convert(operand: ExprRef, target: TypeDescriptor) -> Result<ExprRef> {
        if !is_convertible(&operand.ty, &target) {
            return Err(QueryError::invalid_conversion(
                operand.ty.display_name(),
                target.display_name(),
            ));
        }
        Ok(Arc::new(Self {
            ty: target,
            kind: ExprKind::Convert { operand },
        }))
    }

    // === Operators ===

    /// Binary node
    ///
    /// Both operands must share one type; there is no implicit conversion at
    /// this level. Equality additionally accepts two reference types related
    /// by assignment and a null constant against any side that can hold null.
    pub fn binary(op: BinaryOperator, left: ExprRef, right: ExprRef) -> Result<ExprRef> {
        let ty = binary_result_type(op, &left, &right)?;
        Ok(Arc::new(Self {
            ty,
            kind: ExprKind::Binary { op, left, right },
        }))
    }

    /// Short-circuit conjunction
    pub fn and_also(left: ExprRef, right: ExprRef) -> Result<ExprRef> {
        Self::binary(BinaryOperator::AndAlso, left, right)
    }

    /// `operand != null`
    pub fn not_null(operand: ExprRef) -> Result<ExprRef> {
        let null = Self::typed_constant(LiteralValue::Null, operand.ty.clone())?;
        Self::binary(BinaryOperator::NotEqual, operand, null)
    }

    // === Calls ===

    /// Method call with argument checking
    ///
    /// Value-type arguments must match their parameter exactly; reference
    /// arguments must be assignable to theirs.
    pub fn call(
        instance: Option<ExprRef>,
        method: MethodInfo,
        arguments: Vec<ExprRef>,
    ) -> Result<ExprRef> {
        match (&instance, method.is_static) {
            (Some(_), true) => {
                return Err(QueryError::build(
                    DQ0105,
                    format!("Static method '{}' called with an instance", method.name),
                ));
            }
            (None, false) => {
                return Err(QueryError::build(
                    DQ0105,
                    format!("Instance method '{}' called without an instance", method.name),
                ));
            }
            _ => {}
        }

        if arguments.len() != method.arity() {
            return Err(QueryError::build(
                DQ0104,
                format!(
                    "Method '{}' expects {} arguments, got {}",
                    method.name,
                    method.arity(),
                    arguments.len()
                ),
            ));
        }

        let coercer = TypeCoercer::new();
        for (index, (arg, param)) in arguments.iter().zip(&method.parameters).enumerate() {
            let accepted =
                arg.ty == *param || (!arg.ty.is_value_type() && coercer.is_assignable(&arg.ty, param));
            if !accepted {
                return Err(QueryError::build(
                    DQ0105,
                    format!(
                        "Argument {} of '{}' has type '{}', expected '{}'",
                        index,
                        method.name,
                        arg.ty.display_name(),
                        param.display_name()
                    ),
                ));
            }
        }

        Ok(Arc::new(Self {
            ty: method.return_type.clone(),
            kind: ExprKind::Call {
                instance,
                method,
                arguments,
            },
        }))
    }

    // === Accessors ===

    /// Static type of the node
    pub fn ty(&self) -> &TypeDescriptor {
        &self.ty
    }

    pub fn kind(&self) -> &ExprKind {
        &self.kind
    }

    /// Literal value of a constant node
    pub fn as_constant(&self) -> Option<&LiteralValue> {
        match &self.kind {
            ExprKind::Constant(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_constant(&self) -> bool {
        matches!(self.kind, ExprKind::Constant(_))
    }

    pub fn is_null_constant(&self) -> bool {
        matches!(self.kind, ExprKind::Constant(LiteralValue::Null))
    }

    pub fn is_parameter(&self) -> bool {
        matches!(self.kind, ExprKind::Parameter { .. })
    }

    pub fn is_member_access(&self) -> bool {
        matches!(self.kind, ExprKind::MemberAccess { .. })
    }

    pub fn is_call(&self) -> bool {
        matches!(self.kind, ExprKind::Call { .. })
    }
}

fn is_convertible(from: &TypeDescriptor, to: &TypeDescriptor) -> bool {
    if from == to {
        return true;
    }
    let (f, t) = (from.unwrap_nullable(), to.unwrap_nullable());
    if f == t || (f.is_numeric() && t.is_numeric()) {
        return true;
    }
    let coercer = TypeCoercer::new();
    match (from.is_value_type(), to.is_value_type()) {
        // boxing / unboxing
        (true, false) => coercer.is_assignable(from, to),
        (false, true) => coercer.is_assignable(to, from),
        (false, false) => {
            coercer.is_assignable(from, to)
                || coercer.is_assignable(to, from)
                || from.is_interface()
                || to.is_interface()
        }
        (true, true) => false,
    }
}

fn binary_result_type(
    op: BinaryOperator,
    left: &ExprRef,
    right: &ExprRef,
) -> Result<TypeDescriptor> {
    let (lt, rt) = (&left.ty, &right.ty);
    let mismatch = || QueryError::type_mismatch(op.name(), lt.display_name(), rt.display_name());

    if op.is_equality() {
        let null_check = (left.is_null_constant() && rt.can_be_null())
            || (right.is_null_constant() && lt.can_be_null());
        if null_check {
            return Ok(TypeDescriptor::boolean());
        }
        if !lt.is_value_type() && !rt.is_value_type() {
            let coercer = TypeCoercer::new();
            if coercer.is_assignable(lt, rt) || coercer.is_assignable(rt, lt) {
                return Ok(TypeDescriptor::boolean());
            }
            return Err(mismatch());
        }
        if lt != rt {
            return Err(mismatch());
        }
        let operand = lt.unwrap_nullable();
        let defined = operand.is_enum() || operand.builtin().is_some_and(|b| b.has_equality());
        if !defined {
            return Err(QueryError::operator_not_defined(op.name(), lt.display_name()));
        }
        return Ok(TypeDescriptor::boolean());
    }

    if lt != rt {
        return Err(mismatch());
    }
    let operand = lt.unwrap_nullable();
    let builtin = operand.builtin();

    let defined = match op {
        o if o.is_relational() => builtin.is_some_and(|b| b.is_ordered()),
        o if o.is_arithmetic() => builtin.is_some_and(|b| b.is_arithmetic()),
        BinaryOperator::And | BinaryOperator::Or => {
            builtin.is_some_and(|b| b == BuiltinType::Boolean || b.is_integral())
        }
        _ => lt.is(BuiltinType::Boolean),
    };
    if !defined {
        return Err(QueryError::operator_not_defined(op.name(), lt.display_name()));
    }

    Ok(if op.is_relational() {
        TypeDescriptor::boolean()
    } else {
        lt.clone()
    })
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Constant(value) => write!(f, "{}", value),
            ExprKind::Parameter { name } => write!(f, "{}", name),
            ExprKind::MemberAccess { source, member } => write!(f, "{}.{}", source, member.name),
            ExprKind::Convert { operand } => {
                write!(f, "Convert({}, {})", operand, self.ty.display_name())
            }
            ExprKind::Binary { op, left, right } => {
                write!(f, "({} {} {})", left, op.symbol(), right)
            }
            ExprKind::Call {
                instance,
                method,
                arguments,
            } => {
                match instance {
                    Some(target) => write!(f, "{}.{}(", target, method.name)?,
                    None => write!(f, "{}.{}(", method.declaring_type.display_name(), method.name)?,
                }
                for (i, arg) in arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}
