use indoc::indoc;

use crate::test_utils::{compile_valid, compile_valid_with};
use crate::{Config, GLOBAL_ANY_OF};

const SHAPES: &str = indoc! {r#"
    {
      "types": {
        "thing": { "record": { "x": "u8" } },
        "boom": { "record": { "y": "u16" } },
        "shape": { "union": ["boom", "thing"] }
      }
    }
"#};

#[test]
fn discriminants_follow_declaration_order() {
    let program = compile_valid(SHAPES);
    let shape = program.union_by_name("shape").unwrap();

    let variants: Vec<_> = shape
        .variants
        .iter()
        .map(|v| (v.discriminant, v.name.as_str(), v.key_name.as_str()))
        .collect();
    assert_eq!(variants, [(0, "boom", "SHAPE_BOOM"), (1, "thing", "SHAPE_THING")]);
    assert_eq!(shape.keys_name, "SHAPE_KEYS");
    assert_eq!(shape.ident, "shape");

    let boom = program.type_by_name("boom").unwrap();
    assert_eq!(shape.variant(0).unwrap().type_id, boom.id);
    assert!(shape.variant(2).is_none());
}

#[test]
fn prefixed_union() {
    let program = compile_valid_with(SHAPES, Config::new().prefix("fooey_"));
    let shape = program.union_by_name("shape").unwrap();

    assert_eq!(shape.ident, "fooey_shape");
    assert_eq!(shape.keys_name, "FOOEY_SHAPE_KEYS");
    assert_eq!(shape.variant_by_name("thing").unwrap().key_name, "FOOEY_SHAPE_THING");
    assert_eq!(shape.ops.generic_decode, "fooey_shape_generic_decode");
    assert_eq!(shape.ops.array_encode, "fooey_shape_array_encode");
}

#[test]
fn named_variants_may_share_a_type() {
    let program = compile_valid(indoc! {r#"
        {
          "types": {
            "point": { "record": { "x": "i32", "y": "i32" } },
            "event": { "union": { "start": "point", "stop": "point", "tick": "u64" } }
          }
        }
    "#});
    let event = program.union_by_name("event").unwrap();

    assert_eq!(event.variants.len(), 3);
    assert_eq!(event.variants[0].type_id, event.variants[1].type_id);
    assert_eq!(program.get(event.variants[2].type_id).unwrap().canonical, "u64");
}

#[test]
fn global_any_of_covers_records_in_order() {
    let program = compile_valid_with(
        indoc! {r#"
            {
              "types": {
                "thing": { "record": { "inner": "boom" } },
                "boolish": { "alias": "bool" },
                "boom": { "record": {} }
              }
            }
        "#},
        Config::new().prefix("fooey_").global_any_of(true),
    );
    let global = program.union_by_name(GLOBAL_ANY_OF).unwrap();

    let keys: Vec<_> = global
        .variants
        .iter()
        .map(|v| (v.discriminant, v.key_name.as_str()))
        .collect();
    assert_eq!(
        keys,
        [(0, "FOOEY_GLOBAL_ANY_OF_THING"), (1, "FOOEY_GLOBAL_ANY_OF_BOOM")]
    );
    assert_eq!(global.ident, "fooey_global_any_of");
    assert_eq!(global.ops.generic_encode, "fooey_global_any_of_generic_encode");
}

#[test]
fn global_any_of_comes_after_declared_unions() {
    let program = compile_valid_with(SHAPES, Config::new().global_any_of(true));

    let unions: Vec<_> = program.unions().iter().map(|u| u.name.as_str()).collect();
    assert_eq!(unions, ["shape", GLOBAL_ANY_OF]);
}

#[test]
fn global_any_of_skipped_without_records() {
    let program = compile_valid_with(
        r#"{ "types": { "boolish": { "alias": "bool" } } }"#,
        Config::new().global_any_of(true),
    );

    assert!(program.unions().is_empty());
}

#[test]
fn global_any_of_is_off_by_default() {
    let program = compile_valid(SHAPES);

    assert!(program.union_by_name(GLOBAL_ANY_OF).is_none());
}
