//! Usage record accumulation across lexical scopes.
//!
//! One accumulator is exclusively owned by one method walk. Records live in
//! a creation-ordered arena; scope frames bind ids and types to arena
//! handles, so both keys alias the same mutable record. Leaving a scope
//! unbinds records but never removes them from the arena.

use usagescope_api::{CallSite, DefinitionSite, MethodName, Query, TypeName};

use crate::error::Result;
use crate::scopes::{ContextStack, SymbolTable};

/// Handle of one record in the accumulator's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryId(usize);

impl QueryId {
    #[cfg(test)]
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }
}

/// Accumulates usage records for one method walk.
#[derive(Debug)]
pub struct UsageAccumulator {
    queries: Vec<Query>,
    symbols: SymbolTable,
    contexts: ContextStack,
}

impl UsageAccumulator {
    /// A fresh accumulator rooted at the given enclosing context.
    pub fn new(class_context: TypeName, method_context: MethodName) -> Self {
        Self {
            queries: Vec::new(),
            symbols: SymbolTable::new(),
            contexts: ContextStack::new(class_context, method_context),
        }
    }

    /// Every record ever created, in creation order. Records of scopes that
    /// were since left are still here.
    pub fn all_queries(&self) -> &[Query] {
        &self.queries
    }

    pub fn query(&self, id: QueryId) -> &Query {
        &self.queries[id.0]
    }

    /// A detached copy of one record.
    pub fn snapshot(&self, id: QueryId) -> Query {
        self.queries[id.0].clone()
    }

    pub fn class_context(&self) -> &TypeName {
        self.contexts.class_context()
    }

    pub fn method_context(&self) -> &MethodName {
        self.contexts.method_context()
    }

    /// Resolve `id` through the scope chain without creating anything.
    pub fn resolve_id(&self, id: &str) -> Option<QueryId> {
        self.symbols.lookup_id(id)
    }

    /// Object type of the record bound to `id`, fatal when unbound.
    pub fn static_type_of(&self, id: &str) -> Result<&TypeName> {
        let query = self.symbols.find_id(id)?;
        Ok(&self.queries[query.0].object_type)
    }

    /// Bind `id` in the current frame.
    ///
    /// When the frame already tracks `object_type`, the id joins that record
    /// and the definition of the first registration stands. Otherwise a
    /// record is created and registered under both the type and the id.
    pub fn define_variable(
        &mut self,
        id: &str,
        object_type: &TypeName,
        definition: DefinitionSite,
    ) -> Result<QueryId> {
        let query = self.query_for_type(object_type, definition)?;
        self.symbols.register_id(id, query)?;
        Ok(query)
    }

    /// Record `method` invoked with the value bound to `id` as receiver.
    ///
    /// An unbound id vivifies a record keyed by the method's declaring type
    /// in the current frame; the id itself stays unbound.
    pub fn register_callsite(&mut self, id: &str, method: &MethodName) -> Result<QueryId> {
        let query = match self.symbols.lookup_id(id) {
            Some(existing) => existing,
            None => self.query_for_type(&method.declaring_type, DefinitionSite::Unknown)?,
        };
        self.queries[query.0]
            .call_sites
            .insert(CallSite::receiver(method.clone()));
        Ok(query)
    }

    /// Overwrite the definition of the record bound to `id`. The id must be
    /// bound somewhere on the scope chain.
    pub fn register_definition(&mut self, id: &str, definition: DefinitionSite) -> Result<QueryId> {
        let query = self.symbols.find_id(id)?;
        self.queries[query.0].definition = definition;
        Ok(query)
    }

    /// Overwrite the definition of the current frame's record for
    /// `object_type`, vivifying the record first when absent.
    pub fn register_type_definition(
        &mut self,
        object_type: &TypeName,
        definition: DefinitionSite,
    ) -> Result<QueryId> {
        let query = self.query_for_type(object_type, definition.clone())?;
        self.queries[query.0].definition = definition;
        Ok(query)
    }

    /// The current frame's record for `object_type`, vivified with an
    /// unknown definition when absent.
    pub fn usage_for_type(&mut self, object_type: &TypeName) -> Result<QueryId> {
        self.query_for_type(object_type, DefinitionSite::Unknown)
    }

    /// Open a plain scope: an empty frame and an inheriting context layer.
    pub fn enter_scope(&mut self) {
        self.symbols.enter();
        self.contexts.enter();
    }

    /// Open a closure scope.
    ///
    /// The context gains one `$Lambda` marker on class and method, and every
    /// id visible at the point of entry is re-bound to a fresh clone of its
    /// record: same object type and definition, no call sites, stamped with
    /// the renamed context. Calls inside the closure land on the clones;
    /// the outer records keep only what was observed outside.
    pub fn enter_lambda_scope(&mut self) -> Result<()> {
        let lambda_class = self.contexts.class_context().with_lambda_marker();
        let lambda_method = self.contexts.method_context().with_lambda_marker();

        let mut carried: Vec<(String, TypeName, DefinitionSite)> = Vec::new();
        for name in self.symbols.bound_names() {
            if let Some(query) = self.symbols.lookup_id(&name) {
                let source = &self.queries[query.0];
                carried.push((name, source.object_type.clone(), source.definition.clone()));
            }
        }

        self.symbols.enter();
        self.contexts.enter_with(lambda_class, lambda_method);

        // Clones are bound by id only: two ids of the same type must not
        // collide on the type key.
        for (name, object_type, definition) in carried {
            let clone = self.create_query(&object_type, definition);
            self.symbols.register_id(&name, clone)?;
        }
        Ok(())
    }

    /// Pop to the parent scope. Records created in the popped frame stay in
    /// the arena; they merely become unreachable through the table.
    pub fn leave_scope(&mut self) -> Result<()> {
        self.symbols.leave()?;
        self.contexts.leave()
    }

    /// The record keyed by `object_type` in the current frame, created and
    /// type-registered with `definition` when absent.
    fn query_for_type(
        &mut self,
        object_type: &TypeName,
        definition: DefinitionSite,
    ) -> Result<QueryId> {
        if let Some(existing) = self.symbols.type_in_current(object_type) {
            return Ok(existing);
        }
        let created = self.create_query(object_type, definition);
        self.symbols.register_type(object_type, created)?;
        Ok(created)
    }

    fn create_query(&mut self, object_type: &TypeName, definition: DefinitionSite) -> QueryId {
        let query = Query::new(
            object_type.clone(),
            self.contexts.class_context().clone(),
            self.contexts.method_context().clone(),
            definition,
        );
        let id = QueryId(self.queries.len());
        self.queries.push(query);
        id
    }
}
