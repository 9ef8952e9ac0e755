//! Schema validation.
//!
//! Runs before resolution and collects every problem in the graph, so a
//! frontend can report them all at once. Cycles are found later by the
//! resolver, which needs a graph whose references all resolve.

use std::collections::HashSet;

use indexmap::IndexMap;
use wirecast_core::utils::is_identifier;
use wirecast_core::{ScalarKind, TypeBody, TypeDecl, TypeExpr, TypeGraph};

use crate::{GLOBAL_ANY_OF, SchemaError};

/// Check the graph, returning all schema errors in declaration order.
#[tracing::instrument(level = "debug", skip_all, fields(decls = graph.len()))]
pub(crate) fn validate(graph: &TypeGraph, global_any_of: bool) -> Vec<SchemaError> {
    let mut errors = Vec::new();
    let mut decls: IndexMap<&str, &TypeDecl> = IndexMap::new();

    for decl in graph.decls() {
        if !is_type_name(&decl.name) {
            errors.push(SchemaError::InvalidName(decl.name.clone()));
        }
        let reserved = global_any_of && decl.name == GLOBAL_ANY_OF;
        let duplicate = decls.contains_key(decl.name.as_str());
        if !duplicate {
            decls.insert(&decl.name, decl);
        }
        if duplicate || reserved {
            errors.push(SchemaError::DuplicateType(decl.name.clone()));
        }
    }

    let checker = ExprChecker { decls: &decls };
    for decl in graph.decls() {
        match &decl.body {
            TypeBody::Record(fields) => {
                let mut seen = HashSet::new();
                for field in fields {
                    check_member(&decl.name, &field.name, &mut errors);
                    if !seen.insert(field.name.as_str()) {
                        errors.push(SchemaError::DuplicateField {
                            record: decl.name.clone(),
                            field: field.name.clone(),
                        });
                    }
                    checker.check(&field.ty, &decl.name, &mut errors);
                }
            }
            TypeBody::Union(variants) => {
                if variants.is_empty() {
                    errors.push(SchemaError::EmptyUnion(decl.name.clone()));
                }
                let mut seen = HashSet::new();
                for variant in variants {
                    check_member(&decl.name, &variant.name, &mut errors);
                    if !seen.insert(variant.name.as_str()) {
                        errors.push(SchemaError::DuplicateVariant {
                            union: decl.name.clone(),
                            variant: variant.name.clone(),
                        });
                    }
                    checker.check(&variant.ty, &decl.name, &mut errors);
                }
            }
            TypeBody::Alias(target) => checker.check(target, &decl.name, &mut errors),
        }
    }

    if !errors.is_empty() {
        tracing::debug!(count = errors.len(), "schema rejected");
    }
    errors
}

/// `__` is reserved for mangled names; scalar keywords are taken.
pub(crate) fn is_type_name(name: &str) -> bool {
    is_identifier(name) && !name.contains("__") && ScalarKind::from_name(name).is_none()
}

fn check_member(owner: &str, member: &str, errors: &mut Vec<SchemaError>) {
    if !is_identifier(member) {
        errors.push(SchemaError::InvalidMemberName {
            owner: owner.to_string(),
            member: member.to_string(),
        });
    }
}

struct ExprChecker<'a> {
    decls: &'a IndexMap<&'a str, &'a TypeDecl>,
}

impl ExprChecker<'_> {
    fn check(&self, expr: &TypeExpr, owner: &str, errors: &mut Vec<SchemaError>) {
        match expr {
            TypeExpr::Scalar(_) => {}
            TypeExpr::Ref(name) => match self.decls.get(name.as_str()) {
                None => errors.push(SchemaError::UnresolvedType {
                    name: name.clone(),
                    referenced_by: owner.to_string(),
                }),
                Some(decl) if decl.is_union() => errors.push(SchemaError::UnionNotEmbeddable {
                    union: name.clone(),
                    referenced_by: owner.to_string(),
                }),
                Some(_) => {}
            },
            TypeExpr::Fixed { element, dims } => {
                if dims.is_empty() {
                    errors.push(SchemaError::EmptyDims {
                        referenced_by: owner.to_string(),
                    });
                } else if dims.contains(&0) {
                    errors.push(SchemaError::ZeroDimension {
                        referenced_by: owner.to_string(),
                    });
                }
                self.check(element, owner, errors);
            }
            TypeExpr::Variable { element, capacity } => {
                if *capacity == 0 {
                    errors.push(SchemaError::ZeroCapacity {
                        referenced_by: owner.to_string(),
                    });
                }
                self.check(element, owner, errors);
            }
            TypeExpr::Optional(inner) => self.check(inner, owner, errors),
        }
    }
}
