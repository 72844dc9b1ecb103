//! Symbol table with parent-chained scope frames.

use indexmap::IndexMap;
use usagescope_api::TypeName;

use crate::accumulator::QueryId;
use crate::error::{ExtractionError, Result};

/// One lexical scope level: the id and type bindings created in it.
///
/// Both maps point into the same record arena, so an id and a type key may
/// alias one record. Equality ignores insertion order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct ScopeFrame {
    ids: IndexMap<String, QueryId>,
    types: IndexMap<TypeName, QueryId>,
}

/// Parent-chained symbol table.
///
/// The frame stack is the parent chain: the last frame is the current scope.
/// A key registers at most once per frame; the same key in an inner frame
/// shadows the outer binding without touching it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolTable {
    frames: Vec<ScopeFrame>,
}

impl SymbolTable {
    /// A table holding only the root frame.
    pub fn new() -> Self {
        Self {
            frames: vec![ScopeFrame::default()],
        }
    }

    /// Open a child scope.
    pub fn enter(&mut self) {
        self.frames.push(ScopeFrame::default());
    }

    /// Drop the current frame. Its bindings become unreachable; the records
    /// they pointed to are unaffected.
    pub fn leave(&mut self) -> Result<()> {
        if self.frames.len() == 1 {
            return Err(ExtractionError::RootScopeExit);
        }
        self.frames.pop();
        Ok(())
    }

    /// Bind `id` in the current frame.
    pub fn register_id(&mut self, id: &str, query: QueryId) -> Result<()> {
        let frame = self.current_mut();
        if frame.ids.contains_key(id) {
            return Err(ExtractionError::DuplicateId(id.to_string()));
        }
        frame.ids.insert(id.to_string(), query);
        Ok(())
    }

    /// Bind `object_type` in the current frame.
    pub fn register_type(&mut self, object_type: &TypeName, query: QueryId) -> Result<()> {
        let frame = self.current_mut();
        if frame.types.contains_key(object_type) {
            return Err(ExtractionError::DuplicateType(object_type.clone()));
        }
        frame.types.insert(object_type.clone(), query);
        Ok(())
    }

    /// Nearest binding for `id`, searching from the current frame outwards.
    pub fn lookup_id(&self, id: &str) -> Option<QueryId> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.ids.get(id).copied())
    }

    /// Nearest binding for `object_type`, searching from the current frame
    /// outwards.
    pub fn lookup_type(&self, object_type: &TypeName) -> Option<QueryId> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.types.get(object_type).copied())
    }

    /// Chain lookup that treats absence as a contract violation.
    pub fn find_id(&self, id: &str) -> Result<QueryId> {
        self.lookup_id(id)
            .ok_or_else(|| ExtractionError::UnboundId(id.to_string()))
    }

    /// Binding for `id` in the current frame only.
    pub fn id_in_current(&self, id: &str) -> Option<QueryId> {
        self.current().ids.get(id).copied()
    }

    /// Binding for `object_type` in the current frame only.
    pub fn type_in_current(&self, object_type: &TypeName) -> Option<QueryId> {
        self.current().types.get(object_type).copied()
    }

    /// Every id visible from the current frame, de-duplicated, outermost
    /// frame first, insertion order within a frame.
    pub fn bound_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for frame in &self.frames {
            for id in frame.ids.keys() {
                if !names.iter().any(|known| known == id) {
                    names.push(id.clone());
                }
            }
        }
        names
    }

    fn current(&self) -> &ScopeFrame {
        self.frames
            .last()
            .expect("symbol table always holds the root frame")
    }

    fn current_mut(&mut self) -> &mut ScopeFrame {
        self.frames
            .last_mut()
            .expect("symbol table always holds the root frame")
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
