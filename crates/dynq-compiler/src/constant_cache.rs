//! Literal cache
//!
//! Collapses repeated literals into one canonical constant node so the
//! downstream engine can bind a single placeholder per distinct value.
//! Entries are keyed by value and static type, kept in first-seen order and
//! never evicted.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

use dynq_ast::{Expr, ExprRef};
use dynq_types::{LiteralValue, TypeDescriptor};

type CacheKey = (LiteralValue, TypeDescriptor);

/// A canonical literal and how it appeared in the source
#[derive(Debug, Clone)]
pub struct CachedLiteral {
    /// Canonical node handed out for every occurrence
    pub node: ExprRef,
    /// Source text of the first occurrence
    pub text: String,
    /// Positional placeholder name (`@p0`, `@p1`, ...)
    pub parameter_name: String,
}

/// Shared, append-only literal store
#[derive(Debug, Default)]
pub struct LiteralCache {
    entries: RwLock<IndexMap<CacheKey, CachedLiteral>>,
}

impl LiteralCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonicalize a constant node
    ///
    /// Non-constant nodes and null constants are returned unchanged. The
    /// first node seen for a value becomes canonical, with the value's
    /// rendered text as its source text.
    pub fn wrap(&self, node: &ExprRef) -> ExprRef {
        match node.as_constant() {
            Some(value) if !value.is_null() => {
                self.get_or_insert(value, node.ty(), || (node.clone(), value.to_string()))
            }
            _ => node.clone(),
        }
    }

    /// Canonical node for `value`, recording `text` if the value is new
    ///
    /// Text supplied for a value that is already cached is ignored.
    pub fn create_literal(&self, value: LiteralValue, text: impl Into<String>) -> ExprRef {
        if value.is_null() {
            return Expr::null();
        }
        let ty = value.value_type();
        let text = text.into();
        self.get_or_insert(&value, &ty, || (Expr::constant(value.clone()), text))
    }

    /// Source text recorded for a canonical node
    pub fn text_of(&self, node: &ExprRef) -> Option<String> {
        self.entry_of(node).map(|entry| entry.text)
    }

    /// Cache entry of a canonical node
    ///
    /// Matches by reference: a structurally equal node that was never handed
    /// out by this cache has no entry.
    pub fn entry_of(&self, node: &ExprRef) -> Option<CachedLiteral> {
        let value = node.as_constant()?;
        let entries = self.entries.read();
        entries
            .get(&(value.clone(), node.ty().clone()))
            .filter(|entry| Arc::ptr_eq(&entry.node, node))
            .cloned()
    }

    /// Placeholder names and their values in first-seen order
    pub fn parameters(&self) -> Vec<(String, LiteralValue)> {
        self.entries
            .read()
            .iter()
            .map(|((value, _), entry)| (entry.parameter_name.clone(), value.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn get_or_insert(
        &self,
        value: &LiteralValue,
        ty: &TypeDescriptor,
        make: impl FnOnce() -> (ExprRef, String),
    ) -> ExprRef {
        let key = (value.clone(), ty.clone());
        if let Some(entry) = self.entries.read().get(&key) {
            return entry.node.clone();
        }

        // Another thread may have inserted between the two locks.
        let mut entries = self.entries.write();
        let index = entries.len();
        let entry = entries.entry(key).or_insert_with(|| {
            let (node, text) = make();
            log::trace!("Cached literal {} as @p{}", text, index);
            CachedLiteral {
                node,
                text,
                parameter_name: format!("@p{}", index),
            }
        });
        entry.node.clone()
    }
}
