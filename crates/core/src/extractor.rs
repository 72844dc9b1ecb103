//! Entry points for usage extraction.
//!
//! Extraction is synchronous and owns all of its state: every call builds a
//! fresh accumulator, seeds it, walks the body and returns. Nothing is
//! shared between calls.

use usagescope_api::{
    Context, DefinitionSite, MethodDeclaration, Query, SELF_REFERENCE, SUPER_REFERENCE, TypeShape,
};

use crate::accumulator::{QueryId, UsageAccumulator};
use crate::error::Result;
use crate::walker::{CompletionCapture, StatementWalker};

/// Extract the usage record at `method`'s completion marker.
///
/// `Ok(None)` is the ordinary outcome for a method without a marker, or
/// with a marker whose reference cannot be resolved at all.
///
/// When the marker sits on the enclosing instance and the type declares a
/// superclass, the returned record reports the superclass as its object
/// type and class context; the method context stays as extracted.
pub fn extract_for_method(context: &Context, method: &MethodDeclaration) -> Result<Option<Query>> {
    let mut accumulator = seeded_accumulator(&context.type_shape, method)?;
    let mut walker = StatementWalker::new(&mut accumulator);
    walker.walk_body(&method.body)?;
    let Some(capture) = walker.into_completion() else {
        return Ok(None);
    };

    let Some(resolved) = resolve_capture(&mut accumulator, &capture)? else {
        return Ok(None);
    };
    let mut snapshot = accumulator.snapshot(resolved);

    if capture.is_self_reference() {
        if let Some(superclass) = context.type_shape.superclass() {
            snapshot.object_type = superclass.clone();
            snapshot.class_context = superclass.clone();
        }
    }
    tracing::trace!("extracted usage of {} at completion", snapshot.object_type);
    Ok(Some(snapshot))
}

/// Extract from the first method of the tree that contains a marker.
pub fn extract_query(context: &Context) -> Result<Option<Query>> {
    for method in &context.sst.methods {
        if let Some(query) = extract_for_method(context, method)? {
            return Ok(Some(query));
        }
    }
    Ok(None)
}

/// Walk one method and return every record created, in creation order.
/// Used for full-method mining rather than completion lookups.
pub fn extract_all_queries(context: &Context, method: &MethodDeclaration) -> Result<Vec<Query>> {
    let mut accumulator = seeded_accumulator(&context.type_shape, method)?;
    StatementWalker::new(&mut accumulator).walk_body(&method.body)?;
    Ok(accumulator.all_queries().to_vec())
}

/// Build and seed the accumulator for one method: the enclosing context,
/// the `this` and `super` bindings, and the declared parameters.
///
/// The method context is rebased to the earliest declaration known to the
/// hierarchy, so overriding methods aggregate under the signature that
/// introduced them.
fn seeded_accumulator(
    type_shape: &TypeShape,
    method: &MethodDeclaration,
) -> Result<UsageAccumulator> {
    let method_context = type_shape.earliest_declaration_of(&method.name).clone();
    let class_context = method.name.declaring_type.clone();

    let mut accumulator = UsageAccumulator::new(class_context.clone(), method_context.clone());
    accumulator.define_variable(SELF_REFERENCE, &class_context, DefinitionSite::This)?;
    if let Some(superclass) = type_shape.superclass() {
        accumulator.define_variable(SUPER_REFERENCE, superclass, DefinitionSite::This)?;
    }
    for (index, parameter) in method.parameters.iter().enumerate() {
        accumulator.define_variable(
            &parameter.name,
            &parameter.param_type,
            DefinitionSite::Param {
                method: method_context.clone(),
                index,
            },
        )?;
    }
    Ok(accumulator)
}

/// The marker's record: the handle captured at visit, then a root-scope
/// retry for references declared after the marker, then type-keyed
/// vivification from the marker's static type hint.
fn resolve_capture(
    accumulator: &mut UsageAccumulator,
    capture: &CompletionCapture,
) -> Result<Option<QueryId>> {
    if let Some(resolved) = capture.resolved {
        return Ok(Some(resolved));
    }
    if let Some(resolved) = accumulator.resolve_id(capture.reference()) {
        return Ok(Some(resolved));
    }
    match &capture.expression.type_hint {
        Some(hint) => Ok(Some(accumulator.usage_for_type(hint)?)),
        None => Ok(None),
    }
}
