//! Dependency resolution.
//!
//! Declarations are lowered into the shape table, then a depth-first
//! post-order walk produces the emission order: every shape appears after
//! all of its dependencies. Synthesized shapes (arrays, optionals) are
//! first-class nodes, emitted at the point their element is first reached.
//!
//! Roots are visited in declaration order, so the order is deterministic
//! and otherwise follows the schema author's order.

use std::collections::HashMap;

use wirecast_core::{Interner, Symbol, TypeBody, TypeGraph};
use wirecast_layout::TypeId;

use crate::SchemaError;
use crate::shapes::{Shape, ShapeId, ShapeTable};

/// A declaration with every type reference lowered to a shape.
#[derive(Debug)]
pub(crate) struct LoweredDecl {
    pub(crate) name: Symbol,
    pub(crate) body: LoweredBody,
}

#[derive(Debug)]
pub(crate) enum LoweredBody {
    /// `shape` is the record's own `Named` shape.
    Record {
        shape: ShapeId,
        fields: Vec<(Symbol, ShapeId)>,
    },
    Union {
        variants: Vec<(Symbol, ShapeId)>,
    },
    Alias {
        shape: ShapeId,
        target: ShapeId,
    },
}

/// All declarations of a validated graph, lowered.
#[derive(Debug)]
pub(crate) struct Lowered {
    pub(crate) decls: Vec<LoweredDecl>,
    by_name: HashMap<Symbol, usize>,
}

impl Lowered {
    pub(crate) fn lower(graph: &TypeGraph, shapes: &mut ShapeTable, interner: &mut Interner) -> Self {
        let mut decls = Vec::with_capacity(graph.len());
        let mut by_name = HashMap::with_capacity(graph.len());

        for decl in graph.decls() {
            let name = interner.intern(&decl.name);
            let body = match &decl.body {
                TypeBody::Record(fields) => LoweredBody::Record {
                    shape: shapes.intern(Shape::Named(name)),
                    fields: fields
                        .iter()
                        .map(|f| (interner.intern(&f.name), shapes.lower(&f.ty, interner)))
                        .collect(),
                },
                TypeBody::Union(variants) => LoweredBody::Union {
                    variants: variants
                        .iter()
                        .map(|v| (interner.intern(&v.name), shapes.lower(&v.ty, interner)))
                        .collect(),
                },
                TypeBody::Alias(target) => LoweredBody::Alias {
                    shape: shapes.intern(Shape::Named(name)),
                    target: shapes.lower(target, interner),
                },
            };
            by_name.insert(name, decls.len());
            decls.push(LoweredDecl { name, body });
        }

        Self { decls, by_name }
    }

    pub(crate) fn get(&self, name: Symbol) -> Option<&LoweredDecl> {
        self.by_name.get(&name).map(|&i| &self.decls[i])
    }

    /// Records in declaration order, with their own shapes.
    pub(crate) fn records(&self) -> impl Iterator<Item = (Symbol, ShapeId)> + '_ {
        self.decls.iter().filter_map(|d| match d.body {
            LoweredBody::Record { shape, .. } => Some((d.name, shape)),
            _ => None,
        })
    }
}

/// Emission order. A shape's `TypeId` is its position in `order`.
#[derive(Debug)]
pub(crate) struct Resolution {
    pub(crate) order: Vec<ShapeId>,
    ids: HashMap<ShapeId, TypeId>,
}

impl Resolution {
    pub(crate) fn type_id(&self, shape: ShapeId) -> Option<TypeId> {
        self.ids.get(&shape).copied()
    }
}

/// Order every reachable shape so dependencies come first.
///
/// Fails with the first cycle found, as a path of declaration names with
/// the first member repeated at the end.
#[tracing::instrument(level = "debug", skip_all, fields(decls = lowered.decls.len(), shapes = shapes.len()))]
pub(crate) fn resolve(
    lowered: &Lowered,
    shapes: &ShapeTable,
    interner: &Interner,
) -> Result<Resolution, SchemaError> {
    let mut resolver = Resolver {
        shapes,
        lowered,
        interner,
        marks: HashMap::with_capacity(shapes.len()),
        path: Vec::new(),
        order: Vec::with_capacity(shapes.len()),
    };

    for decl in &lowered.decls {
        let roots = match &decl.body {
            LoweredBody::Record { shape, .. } | LoweredBody::Alias { shape, .. } => vec![*shape],
            LoweredBody::Union { variants } => variants.iter().map(|(_, s)| *s).collect(),
        };
        for root in roots {
            resolver.visit(root).map_err(SchemaError::DependencyCycle)?;
        }
    }

    let order = resolver.order;
    let ids = order
        .iter()
        .enumerate()
        .map(|(i, &shape)| (shape, TypeId::from_index(i)))
        .collect();

    tracing::debug!(types = order.len(), "emission order resolved");
    Ok(Resolution { order, ids })
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Mark {
    Active,
    Done,
}

struct Resolver<'a> {
    shapes: &'a ShapeTable,
    lowered: &'a Lowered,
    interner: &'a Interner,
    marks: HashMap<ShapeId, Mark>,
    /// Shapes currently being visited, outermost first.
    path: Vec<ShapeId>,
    order: Vec<ShapeId>,
}

impl Resolver<'_> {
    fn visit(&mut self, id: ShapeId) -> Result<(), Vec<String>> {
        match self.marks.get(&id) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::Active) => return Err(self.cycle_from(id)),
            None => {}
        }

        self.marks.insert(id, Mark::Active);
        self.path.push(id);
        for dep in self.dependencies(id) {
            self.visit(dep)?;
        }
        self.path.pop();
        self.marks.insert(id, Mark::Done);
        self.order.push(id);
        Ok(())
    }

    fn dependencies(&self, id: ShapeId) -> Vec<ShapeId> {
        let Shape::Named(name) = self.shapes.get(id) else {
            return self.shapes.child(id).into_iter().collect();
        };
        match self.lowered.get(*name).map(|d| &d.body) {
            Some(LoweredBody::Record { fields, .. }) => fields.iter().map(|(_, s)| *s).collect(),
            Some(LoweredBody::Alias { target, .. }) => vec![*target],
            Some(LoweredBody::Union { .. }) | None => Vec::new(),
        }
    }

    /// Declaration names on the path from `id` back to itself.
    fn cycle_from(&self, id: ShapeId) -> Vec<String> {
        let start = self.path.iter().position(|&p| p == id).unwrap_or(0);
        let mut names: Vec<String> = self.path[start..]
            .iter()
            .filter_map(|&p| match self.shapes.get(p) {
                Shape::Named(sym) => Some(self.interner.resolve(*sym).to_string()),
                _ => None,
            })
            .collect();
        if let Some(first) = names.first().cloned() {
            names.push(first);
        }
        names
    }
}
