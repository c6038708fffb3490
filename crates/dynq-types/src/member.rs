//! Member and method descriptors

use crate::TypeDescriptor;

/// A property or field of a type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInfo {
    /// Member name
    pub name: String,
    /// Member type
    pub member_type: TypeDescriptor,
}

impl MemberInfo {
    /// Create a new member
    pub fn new(name: impl Into<String>, member_type: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            member_type,
        }
    }
}

/// A callable method, resolved by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodInfo {
    /// Type declaring the method
    pub declaring_type: TypeDescriptor,
    /// Method name
    pub name: String,
    /// Parameter types, in order
    pub parameters: Vec<TypeDescriptor>,
    /// Return type
    pub return_type: TypeDescriptor,
    /// Static methods take no instance
    pub is_static: bool,
}

impl MethodInfo {
    /// Create a static method
    pub fn new_static(
        declaring_type: TypeDescriptor,
        name: impl Into<String>,
        parameters: Vec<TypeDescriptor>,
        return_type: TypeDescriptor,
    ) -> Self {
        Self {
            declaring_type,
            name: name.into(),
            parameters,
            return_type,
            is_static: true,
        }
    }

    /// Create an instance method
    pub fn new_instance(
        declaring_type: TypeDescriptor,
        name: impl Into<String>,
        parameters: Vec<TypeDescriptor>,
        return_type: TypeDescriptor,
    ) -> Self {
        Self {
            declaring_type,
            name: name.into(),
            parameters,
            return_type,
            is_static: false,
        }
    }

    /// Get parameter count
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }
}
