//! Per-type code generation.
//!
//! Each resolved shape becomes one `TypeDef`. Layouts and contracts only
//! read the immutable tables built by earlier stages, so they are generated
//! independently (on the rayon pool when enabled) and collected in
//! emission order. Size bounds depend on children and are folded in a
//! second, sequential pass over that order.

use rayon::prelude::*;
use wirecast_core::Interner;
use wirecast_layout::{FieldDef, Layout, SizeBounds, TypeDef, TypeId};

use crate::InvariantViolation;
use crate::mangle::{self, Names};
use crate::resolve::{Lowered, LoweredBody, Resolution};
use crate::shapes::{Shape, ShapeId, ShapeTable};

/// Read-only inputs shared by all workers.
pub(crate) struct Codegen<'a> {
    pub(crate) shapes: &'a ShapeTable,
    pub(crate) lowered: &'a Lowered,
    pub(crate) resolution: &'a Resolution,
    pub(crate) names: &'a Names,
    pub(crate) interner: &'a Interner,
    pub(crate) prefix: &'a str,
}

impl Codegen<'_> {
    /// Generate the type table in emission order.
    #[tracing::instrument(level = "debug", skip_all, fields(types = self.resolution.order.len(), parallel = parallel))]
    pub(crate) fn generate(&self, parallel: bool) -> Result<Vec<TypeDef>, InvariantViolation> {
        let order = &self.resolution.order;
        let mut types = if parallel {
            order
                .par_iter()
                .enumerate()
                .map(|(index, &shape)| self.type_def(index, shape))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            order
                .iter()
                .enumerate()
                .map(|(index, &shape)| self.type_def(index, shape))
                .collect::<Result<Vec<_>, _>>()?
        };

        fill_bounds(&mut types);
        tracing::debug!(
            definitions = types.iter().filter(|t| t.is_definition()).count(),
            "type table generated"
        );
        Ok(types)
    }

    fn type_def(&self, index: usize, shape: ShapeId) -> Result<TypeDef, InvariantViolation> {
        let canonical = self.canonical(shape)?;
        let layout = self.layout(shape)?;
        let (name, contract) = if layout.kind().is_definition() {
            (
                format!("{}{canonical}", self.prefix),
                Some(mangle::contract(self.prefix, &canonical)),
            )
        } else {
            (canonical.clone(), None)
        };

        Ok(TypeDef {
            id: TypeId::from_index(index),
            name,
            canonical,
            layout,
            contract,
            bounds: SizeBounds::ZERO,
        })
    }

    fn layout(&self, shape: ShapeId) -> Result<Layout, InvariantViolation> {
        let layout = match self.shapes.get(shape) {
            Shape::Scalar(kind) => Layout::Scalar(*kind),
            Shape::Fixed { element, dims } => Layout::Fixed {
                element: self.type_id(*element)?,
                dims: dims.clone(),
            },
            Shape::Variable { element, capacity } => Layout::Variable {
                element: self.type_id(*element)?,
                capacity: *capacity,
            },
            Shape::Optional { inner } => Layout::Optional {
                inner: self.type_id(*inner)?,
            },
            Shape::Named(sym) => match self.lowered.get(*sym).map(|d| &d.body) {
                Some(LoweredBody::Record { fields, .. }) => Layout::Record {
                    fields: fields
                        .iter()
                        .map(|&(name, ty)| {
                            Ok(FieldDef {
                                name: self.interner.resolve(name).to_string(),
                                ty: self.type_id(ty)?,
                            })
                        })
                        .collect::<Result<_, InvariantViolation>>()?,
                },
                Some(LoweredBody::Alias { target, .. }) => Layout::Alias {
                    target: self.type_id(*target)?,
                },
                Some(LoweredBody::Union { .. }) | None => {
                    return Err(InvariantViolation::UnresolvedShape(
                        self.interner.resolve(*sym).to_string(),
                    ));
                }
            },
        };
        Ok(layout)
    }

    fn type_id(&self, shape: ShapeId) -> Result<TypeId, InvariantViolation> {
        self.resolution
            .type_id(shape)
            .ok_or_else(|| InvariantViolation::UnresolvedShape(format!("{shape:?}")))
    }

    fn canonical(&self, shape: ShapeId) -> Result<String, InvariantViolation> {
        self.names
            .canonical(shape)
            .map(|sym| self.interner.resolve(sym).to_string())
            .ok_or_else(|| InvariantViolation::UnresolvedShape(format!("{shape:?}")))
    }
}

/// Dependencies always precede dependents, so one forward pass suffices.
/// A forward reference would be rejected by `Program::new`.
fn fill_bounds(types: &mut [TypeDef]) {
    for i in 0..types.len() {
        let bounds = {
            let (done, _) = types.split_at(i);
            let of = |id: TypeId| done.get(id.index()).map_or(SizeBounds::ZERO, |t| t.bounds);
            match &types[i].layout {
                Layout::Scalar(kind) => SizeBounds::scalar(*kind),
                Layout::Fixed { element, dims } => SizeBounds::fixed(of(*element), dims),
                Layout::Variable { element, capacity } => {
                    SizeBounds::variable(of(*element), *capacity)
                }
                Layout::Optional { inner } => SizeBounds::optional(of(*inner)),
                Layout::Record { fields } => SizeBounds::record(fields.iter().map(|f| of(f.ty))),
                Layout::Alias { target } => of(*target),
            }
        };
        types[i].bounds = bounds;
    }
}
