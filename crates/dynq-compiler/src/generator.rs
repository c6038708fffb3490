//! Expression generator
//!
//! Combines already built sub-expressions into comparison, arithmetic and
//! null-guard nodes. Operator-specific policies live here:
//! - string operands of relational operators go through `String.Compare`
//! - enum operands of relational operators are compared as their underlying type
//! - string literals compared with date, offset or GUID values are parsed
//! - literals are routed through the [`LiteralCache`] when parameterization is on

use std::sync::{Arc, LazyLock};

use dynq_ast::{BinaryOperator, Expr, ExprKind, ExprRef};
use dynq_diagnostics::Result;
use dynq_types::{
    BuiltinType, LiteralValue, MethodInfo, TypeDescriptor, parse_date_time, parse_date_time_offset,
    parse_guid,
};

use crate::{LiteralCache, ParsingConfig};

/// Integer widening ladder, widest first
const WIDENING_LADDER: [BuiltinType; 7] = [
    BuiltinType::UInt64,
    BuiltinType::Int64,
    BuiltinType::UInt32,
    BuiltinType::Int32,
    BuiltinType::UInt16,
    BuiltinType::Int16,
    BuiltinType::Byte,
];

static STRING_COMPARE: LazyLock<MethodInfo> = LazyLock::new(|| {
    MethodInfo::new_static(
        TypeDescriptor::string(),
        "Compare",
        vec![TypeDescriptor::string(), TypeDescriptor::string()],
        TypeDescriptor::int32(),
    )
});

static STRING_CONCAT: LazyLock<MethodInfo> = LazyLock::new(|| {
    MethodInfo::new_static(
        TypeDescriptor::string(),
        "Concat",
        vec![TypeDescriptor::object(), TypeDescriptor::object()],
        TypeDescriptor::string(),
    )
});

/// Outcome of null-guard generation
#[derive(Debug, Clone)]
pub enum NullGuard {
    /// Nothing to guard; holds the original expression
    Unchanged(ExprRef),
    /// Conjunction of not-null checks, root first
    Guarded(ExprRef),
}

impl NullGuard {
    pub fn is_guarded(&self) -> bool {
        matches!(self, Self::Guarded(_))
    }

    pub fn expression(&self) -> &ExprRef {
        match self {
            Self::Unchanged(expr) | Self::Guarded(expr) => expr,
        }
    }

    pub fn into_expression(self) -> ExprRef {
        match self {
            Self::Unchanged(expr) | Self::Guarded(expr) => expr,
        }
    }
}

/// Builds binary and comparison nodes
///
/// Stateless apart from the optional literal cache, which is shared by
/// every clone of the generator.
#[derive(Debug, Clone, Default)]
pub struct ExpressionGenerator {
    cache: Option<Arc<LiteralCache>>,
}

impl ExpressionGenerator {
    /// Create a generator; a fresh literal cache is attached when
    /// parameterized names are enabled
    pub fn new(config: &ParsingConfig) -> Self {
        Self {
            cache: config
                .use_parameterized_names
                .then(|| Arc::new(LiteralCache::new())),
        }
    }

    /// Create a generator over an existing cache
    pub fn with_cache(cache: Arc<LiteralCache>) -> Self {
        Self { cache: Some(cache) }
    }

    pub fn cache(&self) -> Option<&Arc<LiteralCache>> {
        self.cache.as_ref()
    }

    /// Route a node through the literal cache if one is attached
    pub fn wrap_constant(&self, node: &ExprRef) -> ExprRef {
        match &self.cache {
            Some(cache) => cache.wrap(node),
            None => node.clone(),
        }
    }

    // === Equality ===

    pub fn generate_equal(&self, left: &ExprRef, right: &ExprRef) -> Result<ExprRef> {
        self.generate_equality(BinaryOperator::Equal, left, right)
    }

    pub fn generate_not_equal(&self, left: &ExprRef, right: &ExprRef) -> Result<ExprRef> {
        self.generate_equality(BinaryOperator::NotEqual, left, right)
    }

    fn generate_equality(
        &self,
        op: BinaryOperator,
        left: &ExprRef,
        right: &ExprRef,
    ) -> Result<ExprRef> {
        let mut left = left.clone();
        let mut right = right.clone();
        self.optimize_for_equality_if_possible(&mut left, &mut right);
        Expr::binary(op, self.wrap_constant(&left), self.wrap_constant(&right))
    }

    /// Replace a string literal compared with a date, offset or GUID value
    /// by a constant of that type
    ///
    /// The left side is tried first. Unparseable text leaves both sides as
    /// they are.
    pub fn optimize_for_equality_if_possible(&self, left: &mut ExprRef, right: &mut ExprRef) {
        if let Some(optimized) = self.optimize_operand(left, right.ty()) {
            *left = optimized;
        } else if let Some(optimized) = self.optimize_operand(right, left.ty()) {
            *right = optimized;
        }
    }

    fn optimize_operand(&self, operand: &ExprRef, other: &TypeDescriptor) -> Option<ExprRef> {
        let text = operand.as_constant()?.as_str()?;
        self.optimize_string_for_equality_if_possible(text, other)
    }

    /// Parse `text` as a constant of `ty`
    ///
    /// Only `DateTime`, `DateTimeOffset` and `Guid` (nullable or not) are
    /// handled; the constant carries `ty` exactly.
    pub fn optimize_string_for_equality_if_possible(
        &self,
        text: &str,
        ty: &TypeDescriptor,
    ) -> Option<ExprRef> {
        let value = match ty.unwrap_nullable().builtin()? {
            BuiltinType::DateTime => LiteralValue::DateTime(parse_date_time(text)?),
            BuiltinType::DateTimeOffset => {
                LiteralValue::DateTimeOffset(parse_date_time_offset(text)?)
            }
            BuiltinType::Guid => LiteralValue::Guid(parse_guid(text)?),
            _ => return None,
        };
        Expr::typed_constant(value, ty.clone()).ok()
    }

    // === Relational ===

    pub fn generate_greater_than(&self, left: &ExprRef, right: &ExprRef) -> Result<ExprRef> {
        self.generate_relational(BinaryOperator::GreaterThan, left, right)
    }

    pub fn generate_greater_than_equal(&self, left: &ExprRef, right: &ExprRef) -> Result<ExprRef> {
        self.generate_relational(BinaryOperator::GreaterThanOrEqual, left, right)
    }

    pub fn generate_less_than(&self, left: &ExprRef, right: &ExprRef) -> Result<ExprRef> {
        self.generate_relational(BinaryOperator::LessThan, left, right)
    }

    pub fn generate_less_than_equal(&self, left: &ExprRef, right: &ExprRef) -> Result<ExprRef> {
        self.generate_relational(BinaryOperator::LessThanOrEqual, left, right)
    }

    fn generate_relational(
        &self,
        op: BinaryOperator,
        left: &ExprRef,
        right: &ExprRef,
    ) -> Result<ExprRef> {
        if left.ty().is(BuiltinType::String) {
            let compare = Expr::call(None, STRING_COMPARE.clone(), vec![left.clone(), right.clone()])?;
            let zero = Expr::constant(LiteralValue::Int32(0));
            return Expr::binary(op, compare, zero);
        }

        if is_enum_like(left.ty()) || is_enum_like(right.ty()) {
            return Expr::binary(op, enum_to_underlying(left)?, enum_to_underlying(right)?);
        }

        Expr::binary(op, self.wrap_constant(left), self.wrap_constant(right))
    }

    // === Arithmetic ===

    pub fn generate_add(&self, left: &ExprRef, right: &ExprRef) -> Result<ExprRef> {
        Expr::binary(
            BinaryOperator::Add,
            self.wrap_constant(left),
            self.wrap_constant(right),
        )
    }

    pub fn generate_subtract(&self, left: &ExprRef, right: &ExprRef) -> Result<ExprRef> {
        Expr::binary(
            BinaryOperator::Subtract,
            self.wrap_constant(left),
            self.wrap_constant(right),
        )
    }

    /// `String.Concat(object, object)`; operands that are not strings are
    /// converted to `object`
    pub fn generate_string_concat(&self, left: &ExprRef, right: &ExprRef) -> Result<ExprRef> {
        let to_object = |operand: &ExprRef| -> Result<ExprRef> {
            if operand.ty().is(BuiltinType::String) {
                Ok(operand.clone())
            } else {
                Expr::convert(operand.clone(), TypeDescriptor::object())
            }
        };
        Expr::call(None, STRING_CONCAT.clone(), vec![to_object(left)?, to_object(right)?])
    }

    // === Widening ===

    /// Bring two integer operands to the wider of their types
    ///
    /// The ladder is scanned widest first; at the first rank held by either
    /// operand the other operand is converted to it. Floating-point types are
    /// not on the ladder and are left alone.
    pub fn convert_numeric_type_to_bigger_type(
        &self,
        left: &mut ExprRef,
        right: &mut ExprRef,
    ) -> Result<()> {
        if left.ty() == right.ty() {
            return Ok(());
        }

        for rank in WIDENING_LADDER {
            let target = TypeDescriptor::of(rank);
            if *left.ty() == target {
                log::trace!("Widening right operand {} to {}", right.ty(), target);
                *right = Expr::convert(right.clone(), target)?;
                break;
            }
            if *right.ty() == target {
                log::trace!("Widening left operand {} to {}", left.ty(), target);
                *left = Expr::convert(left.clone(), target)?;
                break;
            }
        }
        Ok(())
    }

    // === Null propagation ===

    /// Guard a member-access chain with not-null checks
    ///
    /// For `a.b.c` the guard is `a != null && a.b != null`, with
    /// `a.b.c != null` appended when `include_self` is set and `c` can hold
    /// null. The walk stops at the first parameter or method call. A chain of
    /// a single non-call node is returned unchanged.
    pub fn try_generate_and_also_not_null(
        &self,
        expr: &ExprRef,
        include_self: bool,
    ) -> Result<NullGuard> {
        let chain = collect_chain(expr, include_self);

        let trivial = match chain.as_slice() {
            [] => true,
            [only] => !only.is_call(),
            _ => false,
        };
        if trivial {
            return Ok(NullGuard::Unchanged(expr.clone()));
        }

        let mut guard: Option<ExprRef> = None;
        for node in chain.into_iter().rev() {
            let check = Expr::not_null(node)?;
            guard = Some(match guard {
                Some(acc) => Expr::and_also(acc, check)?,
                None => check,
            });
        }

        match guard {
            Some(guard) => {
                log::trace!("Null guard generated: {}", guard);
                Ok(NullGuard::Guarded(guard))
            }
            None => Ok(NullGuard::Unchanged(expr.clone())),
        }
    }
}

/// Nodes to guard, leaf first
fn collect_chain(expr: &ExprRef, include_self: bool) -> Vec<ExprRef> {
    let mut chain = Vec::new();
    if include_self && expr.is_member_access() && expr.ty().can_be_null() {
        chain.push(expr.clone());
    }

    let mut current = expr.clone();
    while let ExprKind::MemberAccess { source, .. } = current.kind() {
        let source = source.clone();
        if source.is_member_access() {
            chain.push(source.clone());
            current = source;
            continue;
        }
        if source.is_parameter() || source.is_call() {
            chain.push(source);
        }
        break;
    }
    chain
}

fn is_enum_like(ty: &TypeDescriptor) -> bool {
    ty.unwrap_nullable().is_enum()
}

/// Convert an enum (or nullable enum) operand to its underlying integral type
fn enum_to_underlying(operand: &ExprRef) -> Result<ExprRef> {
    let ty = operand.ty();
    match ty.unwrap_nullable().enum_underlying_type() {
        Some(underlying) => {
            let target = if ty.is_nullable() {
                underlying.wrap_nullable()
            } else {
                underlying
            };
            Expr::convert(operand.clone(), target)
        }
        None => Ok(operand.clone()),
    }
}
