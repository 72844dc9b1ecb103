//! Usage records: the output of extraction and the unit stored by the
//! pattern index.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::naming::{FieldName, MethodName, TypeName};

/// How a tracked value came into existence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DefinitionSite {
    /// No definition information is available.
    Unknown,
    /// The value is the enclosing instance itself.
    This,
    /// The value is a literal.
    Constant,
    /// The value was produced by a constructor call.
    Constructor { method: MethodName },
    /// The value was returned from an invocation.
    Return { method: MethodName },
    /// The value was read from a field of the enclosing instance.
    Field { field: FieldName },
    /// The value arrived as the `index`-th declared parameter.
    Param { method: MethodName, index: usize },
}

/// An operation observed on a tracked value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CallSite {
    /// The value was the receiver of `method`.
    Receiver { method: MethodName },
}

impl CallSite {
    pub fn receiver(method: MethodName) -> Self {
        CallSite::Receiver { method }
    }

    pub fn method(&self) -> &MethodName {
        match self {
            CallSite::Receiver { method } => method,
        }
    }
}

/// The usage record of one object type within one method: the enclosing
/// contexts, how an instance was obtained, and the operations invoked on it.
///
/// Call sites keep first-observation order and never repeat; equality
/// compares them as a set, so records whose sites were observed in a
/// different order still compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub object_type: TypeName,
    pub class_context: TypeName,
    pub method_context: MethodName,
    pub definition: DefinitionSite,
    pub call_sites: IndexSet<CallSite>,
}

impl Query {
    /// A fresh record with no observed call sites.
    pub fn new(
        object_type: TypeName,
        class_context: TypeName,
        method_context: MethodName,
        definition: DefinitionSite,
    ) -> Self {
        Self {
            object_type,
            class_context,
            method_context,
            definition,
            call_sites: IndexSet::new(),
        }
    }
}
