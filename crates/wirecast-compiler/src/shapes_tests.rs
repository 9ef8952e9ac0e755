use wirecast_core::{Interner, ScalarKind, TypeExpr};

use crate::shapes::{Shape, ShapeTable};

#[test]
fn identical_shapes_share_an_id() {
    let mut interner = Interner::new();
    let mut table = ShapeTable::new();

    let a = table.lower(&TypeExpr::U32.variable(3), &mut interner);
    let b = table.lower(&TypeExpr::U32.variable(3), &mut interner);
    let c = table.lower(&TypeExpr::U32.variable(4), &mut interner);

    assert_eq!(a, b);
    assert_ne!(a, c);
    // u32, vla<u32, 3>, vla<u32, 4>
    assert_eq!(table.len(), 3);
}

#[test]
fn named_shapes_intern_by_symbol() {
    let mut interner = Interner::new();
    let mut table = ShapeTable::new();

    let a = table.lower(&TypeExpr::named("boom"), &mut interner);
    let b = table.lower(&TypeExpr::named("boom"), &mut interner);

    assert_eq!(a, b);
    assert_eq!(table.get(a), &Shape::Named(interner.intern("boom")));
}

#[test]
fn nested_fixed_arrays_flatten() {
    let mut interner = Interner::new();
    let mut table = ShapeTable::new();

    let nested = table.lower(&TypeExpr::U32.fixed([4]).fixed([5]), &mut interner);
    let flat = table.lower(&TypeExpr::U32.fixed([5, 4]), &mut interner);

    assert_eq!(nested, flat);
    let Shape::Fixed { element, dims } = table.get(flat) else {
        panic!("expected fixed");
    };
    assert_eq!(dims, &[5, 4]);
    assert_eq!(table.get(*element), &Shape::Scalar(ScalarKind::U32));
}

#[test]
fn fixed_inside_variable_is_not_flattened() {
    let mut interner = Interner::new();
    let mut table = ShapeTable::new();

    let id = table.lower(&TypeExpr::U32.fixed([3]).variable(4).fixed([5]), &mut interner);

    let Shape::Fixed { element, dims } = table.get(id) else {
        panic!("expected fixed");
    };
    assert_eq!(dims, &[5]);
    assert!(matches!(table.get(*element), Shape::Variable { capacity: 4, .. }));
}

#[test]
fn child_and_inline() {
    let mut interner = Interner::new();
    let mut table = ShapeTable::new();

    let opt = table.lower(&TypeExpr::U8.fixed([12]).optional(), &mut interner);
    let fixed = table.child(opt).unwrap();
    let scalar = table.child(fixed).unwrap();

    assert!(!table.get(opt).is_inline());
    assert!(table.get(fixed).is_inline());
    assert!(table.get(scalar).is_inline());
    assert_eq!(table.child(scalar), None);
}
