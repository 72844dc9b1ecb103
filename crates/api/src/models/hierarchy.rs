//! Type and method hierarchy information attached to an extraction unit.

use serde::{Deserialize, Serialize};

use super::naming::{MethodName, TypeName};
use super::sst::Sst;

/// The supertype structure of one type: the declared superclass chain and
/// the implemented interfaces, each itself a hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeHierarchy {
    pub element: TypeName,
    #[serde(default)]
    pub extends: Option<Box<TypeHierarchy>>,
    #[serde(default)]
    pub implements: Vec<TypeHierarchy>,
}

impl TypeHierarchy {
    pub fn new(element: impl Into<TypeName>) -> Self {
        Self {
            element: element.into(),
            extends: None,
            implements: Vec::new(),
        }
    }

    pub fn with_extends(mut self, parent: TypeHierarchy) -> Self {
        self.extends = Some(Box::new(parent));
        self
    }

    pub fn with_implements(mut self, interface: TypeHierarchy) -> Self {
        self.implements.push(interface);
        self
    }

    /// The direct superclass element, when one is declared.
    pub fn superclass(&self) -> Option<&TypeName> {
        self.extends.as_deref().map(|parent| &parent.element)
    }
}

/// Where a method sits in its override chain: `first_method` is the original
/// introduction, `super_method` the directly overridden declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodHierarchy {
    pub element: MethodName,
    #[serde(default)]
    pub super_method: Option<MethodName>,
    #[serde(default)]
    pub first_method: Option<MethodName>,
}

impl MethodHierarchy {
    pub fn new(element: MethodName) -> Self {
        Self {
            element,
            super_method: None,
            first_method: None,
        }
    }

    pub fn with_super(mut self, method: MethodName) -> Self {
        self.super_method = Some(method);
        self
    }

    pub fn with_first(mut self, method: MethodName) -> Self {
        self.first_method = Some(method);
        self
    }

    /// The most general declaration this method restates: the original
    /// introduction, else the overridden one, else the method itself.
    pub fn earliest_declaration(&self) -> &MethodName {
        self.first_method
            .as_ref()
            .or(self.super_method.as_ref())
            .unwrap_or(&self.element)
    }
}

/// Hierarchy information for the enclosing type and its methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeShape {
    pub hierarchy: TypeHierarchy,
    #[serde(default)]
    pub method_hierarchies: Vec<MethodHierarchy>,
}

impl TypeShape {
    pub fn new(hierarchy: TypeHierarchy) -> Self {
        Self {
            hierarchy,
            method_hierarchies: Vec::new(),
        }
    }

    pub fn with_method_hierarchy(mut self, method_hierarchy: MethodHierarchy) -> Self {
        self.method_hierarchies.push(method_hierarchy);
        self
    }

    pub fn superclass(&self) -> Option<&TypeName> {
        self.hierarchy.superclass()
    }

    /// The earliest known declaration of `method`; `method` itself when no
    /// hierarchy entry was recorded for it.
    pub fn earliest_declaration_of<'a>(&'a self, method: &'a MethodName) -> &'a MethodName {
        self.method_hierarchies
            .iter()
            .find(|entry| entry.element == *method)
            .map(|entry| entry.earliest_declaration())
            .unwrap_or(method)
    }
}

/// One extraction unit: a simplified tree plus the hierarchy of its type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Context {
    pub type_shape: TypeShape,
    pub sst: Sst,
}

impl Context {
    pub fn new(type_shape: TypeShape, sst: Sst) -> Self {
        Self { type_shape, sst }
    }
}
