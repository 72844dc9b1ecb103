//! Enclosing (class, method) context frames stamped onto new records.

use usagescope_api::{MethodName, TypeName};

use crate::error::{ExtractionError, Result};

/// One context level. Unset values fall back to the nearest ancestor that
/// carries one.
#[derive(Debug, Clone, PartialEq)]
struct ContextFrame {
    class: Option<TypeName>,
    method: Option<MethodName>,
}

/// Parent-chained enclosing context.
///
/// Plain scopes push unset frames and inherit both values; closure scopes
/// push frames carrying their renamed contexts. The root frame is always
/// fully set.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextStack {
    frames: Vec<ContextFrame>,
}

impl ContextStack {
    pub fn new(class: TypeName, method: MethodName) -> Self {
        Self {
            frames: vec![ContextFrame {
                class: Some(class),
                method: Some(method),
            }],
        }
    }

    /// Push a frame that inherits both values.
    pub fn enter(&mut self) {
        self.frames.push(ContextFrame {
            class: None,
            method: None,
        });
    }

    /// Push a frame carrying its own class and method.
    pub fn enter_with(&mut self, class: TypeName, method: MethodName) {
        self.frames.push(ContextFrame {
            class: Some(class),
            method: Some(method),
        });
    }

    pub fn leave(&mut self) -> Result<()> {
        if self.frames.len() == 1 {
            return Err(ExtractionError::RootScopeExit);
        }
        self.frames.pop();
        Ok(())
    }

    /// Effective enclosing class: the nearest set value.
    pub fn class_context(&self) -> &TypeName {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.class.as_ref())
            .expect("root context frame is always set")
    }

    /// Effective enclosing method: the nearest set value.
    pub fn method_context(&self) -> &MethodName {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.method.as_ref())
            .expect("root context frame is always set")
    }
}
