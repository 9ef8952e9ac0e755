//! Memoizing factory for structural shapes.
//!
//! Every type reference is lowered to a `ShapeId`. Structurally identical
//! shapes intern to the same id, which is what deduplicates synthesized
//! types (`vla__u32_3` is emitted once no matter how many fields use it).

use indexmap::IndexSet;
use wirecast_core::{Interner, ScalarKind, Symbol, TypeExpr};

/// Dense handle into a `ShapeTable`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub(crate) struct ShapeId(u32);

impl ShapeId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Structural identity of a type. Children are referenced by id.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub(crate) enum Shape {
    Scalar(ScalarKind),
    /// Declared record or alias.
    Named(Symbol),
    /// Element is never itself `Fixed`; nested fixed arrays are flattened.
    Fixed { element: ShapeId, dims: Vec<u32> },
    Variable { element: ShapeId, capacity: u32 },
    Optional { inner: ShapeId },
}

impl Shape {
    /// Inline shapes have a layout but no standalone definition.
    pub(crate) fn is_inline(&self) -> bool {
        matches!(self, Self::Scalar(_) | Self::Fixed { .. })
    }
}

#[derive(Debug, Default)]
pub(crate) struct ShapeTable {
    shapes: IndexSet<Shape>,
}

impl ShapeTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Intern a shape, returning the existing id for a structural duplicate.
    pub(crate) fn intern(&mut self, shape: Shape) -> ShapeId {
        let shape = match shape {
            Shape::Fixed { element, dims } => self.flatten_fixed(element, dims),
            other => other,
        };
        let (index, _) = self.shapes.insert_full(shape);
        ShapeId(index as u32)
    }

    /// `Fixed{Fixed{T, inner}, outer}` becomes `Fixed{T, outer ++ inner}`.
    fn flatten_fixed(&self, element: ShapeId, mut dims: Vec<u32>) -> Shape {
        match self.get(element) {
            Shape::Fixed {
                element: inner_element,
                dims: inner_dims,
            } => {
                dims.extend_from_slice(inner_dims);
                Shape::Fixed {
                    element: *inner_element,
                    dims,
                }
            }
            _ => Shape::Fixed { element, dims },
        }
    }

    /// Lower a type expression, interning every shape along the way.
    ///
    /// The expression must already be validated: references resolve to
    /// records or aliases.
    pub(crate) fn lower(&mut self, expr: &TypeExpr, interner: &mut Interner) -> ShapeId {
        let shape = match expr {
            TypeExpr::Scalar(kind) => Shape::Scalar(*kind),
            TypeExpr::Ref(name) => Shape::Named(interner.intern(name)),
            TypeExpr::Fixed { element, dims } => Shape::Fixed {
                element: self.lower(element, interner),
                dims: dims.clone(),
            },
            TypeExpr::Variable { element, capacity } => Shape::Variable {
                element: self.lower(element, interner),
                capacity: *capacity,
            },
            TypeExpr::Optional(inner) => Shape::Optional {
                inner: self.lower(inner, interner),
            },
        };
        self.intern(shape)
    }

    /// # Panics
    /// Panics if the id was not produced by this table.
    pub(crate) fn get(&self, id: ShapeId) -> &Shape {
        &self.shapes[id.index()]
    }

    pub(crate) fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Direct child of a wrapper shape. Named shapes have none here; their
    /// dependencies come from the declaration body.
    pub(crate) fn child(&self, id: ShapeId) -> Option<ShapeId> {
        match self.get(id) {
            Shape::Scalar(_) | Shape::Named(_) => None,
            Shape::Fixed { element, .. } | Shape::Variable { element, .. } => Some(*element),
            Shape::Optional { inner } => Some(*inner),
        }
    }
}
