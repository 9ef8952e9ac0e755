use indoc::indoc;

use crate::Config;
use crate::mangle::{
    contract, dispatch_ops, fixed_name, fixed_optional_name, key_name, keys_name, optional_name,
    variable_name,
};
use crate::test_utils::{compile_valid, compile_valid_with, schema_errors, schema_errors_with};

#[test]
fn synthesized_names() {
    assert_eq!(fixed_name("u8", &[3, 4, 9]), "u8____3____4____9");
    assert_eq!(variable_name(&variable_name("u32", 3), 4), "vla__vla__u32_3_4");
    assert_eq!(variable_name(&fixed_name("u32", &[3]), 4), "vla__u32____3_4");
    assert_eq!(
        variable_name(&fixed_name(&variable_name("u32", 3), &[4]), 5),
        "vla__vla__u32_3____4_5"
    );
    assert_eq!(variable_name(&fixed_name("u32", &[4, 3]), 5), "vla__u32____4____3_5");
    assert_eq!(
        optional_name(&variable_name(&fixed_name("u32", &[3, 4]), 5)),
        "optional__vla__u32____3____4_5"
    );
    assert_eq!(
        fixed_optional_name(&optional_name(&fixed_name("u32", &[3])), &[4]),
        "fixed__optional__u32____3_4"
    );
    assert_eq!(
        fixed_optional_name(&optional_name("u32"), &[3, 4]),
        "fixed__optional__u32_3x4"
    );
}

#[test]
fn fixed_array_of_optionals_is_bracketed() {
    let program = compile_valid(indoc! {r#"
        {
          "types": {
            "thing": { "record": {
              "x": { "optional": { "fixed": { "element": "u32", "dims": [3, 4] } } },
              "y": { "fixed": {
                "element": { "optional": { "fixed": { "element": "u32", "dims": [3] } } },
                "dims": [4]
              } },
              "z": { "fixed": { "element": { "optional": "u32" }, "dims": [3, 4] } }
            } }
          }
        }
    "#});

    let names: Vec<_> = program.types().iter().map(|t| t.canonical.as_str()).collect();
    assert_eq!(
        names,
        [
            "u32",
            "u32____3____4",
            "optional__u32____3____4",
            "u32____3",
            "optional__u32____3",
            "fixed__optional__u32____3_4",
            "optional__u32",
            "fixed__optional__u32_3x4",
            "thing",
        ]
    );
}

#[test]
fn operation_names() {
    let c = contract("fooey_", "thing");

    assert_eq!(
        c.names(),
        [
            "fooey_encode_thing",
            "fooey_encode_thing_array",
            "fooey_decode_thing",
            "fooey_decode_thing_array",
            "fooey_len_thing",
            "fooey_array_len_thing",
        ]
    );
}

#[test]
fn union_names() {
    let ops = dispatch_ops("fooey_", "shape");

    assert_eq!(keys_name("fooey_", "shape"), "FOOEY_SHAPE_KEYS");
    assert_eq!(key_name("fooey_", "shape", "thing"), "FOOEY_SHAPE_THING");
    assert_eq!(key_name("", "shape", "thingNested"), "SHAPE_THING_NESTED");
    assert_eq!(ops.generic_encode, "fooey_shape_generic_encode");
    assert_eq!(ops.array_len, "fooey_shape_array_len");
}

#[test]
fn canonical_names_of_compiled_types() {
    let program = compile_valid(indoc! {r#"
        {
          "types": {
            "thing": { "record": {
              "grid": { "fixed": { "element": "u8", "dims": [3, 4, 9] } },
              "nested": { "variable": {
                "element": { "variable": { "element": "u32", "capacity": 3 } },
                "capacity": 4
              } },
              "rows": { "variable": {
                "element": { "fixed": { "element": "u32", "dims": [3] } },
                "capacity": 4
              } },
              "mixed": { "variable": {
                "element": { "fixed": {
                  "element": { "variable": { "element": "u32", "capacity": 3 } },
                  "dims": [4]
                } },
                "capacity": 5
              } },
              "maybe": { "optional": { "variable": {
                "element": { "fixed": { "element": "u32", "dims": [3] } },
                "capacity": 4
              } } }
            } }
          }
        }
    "#});

    let names: Vec<_> = program.types().iter().map(|t| t.canonical.as_str()).collect();
    assert_eq!(
        names,
        [
            "u8",
            "u8____3____4____9",
            "u32",
            "vla__u32_3",
            "vla__vla__u32_3_4",
            "u32____3",
            "vla__u32____3_4",
            "vla__u32_3____4",
            "vla__vla__u32_3____4_5",
            "optional__vla__u32____3_4",
            "thing",
        ]
    );
}

#[test]
fn prefix_applies_to_definitions_only() {
    let program = compile_valid_with(
        indoc! {r#"
            {
              "types": {
                "thing": { "record": {
                  "name": { "fixed": { "element": "u8", "dims": [12] } },
                  "tags": { "variable": { "element": "u16", "capacity": 2 } }
                } }
              }
            }
        "#},
        Config::new().prefix("fooey_"),
    );

    let names: Vec<_> = program.types().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(
        names,
        ["u8", "u8____12", "u16", "fooey_vla__u16_2", "fooey_thing"]
    );

    let thing = program.type_by_name("thing").unwrap();
    let contract = thing.contract.as_ref().unwrap();
    assert_eq!(contract.encode, "fooey_encode_thing");
    assert_eq!(contract.array_len, "fooey_array_len_thing");
    assert!(program.type_by_name("u8____12").unwrap().contract.is_none());
}

#[test]
fn operation_name_clash() {
    let errors = schema_errors(indoc! {r#"
        {
          "types": {
            "foo": { "record": {} },
            "foo_array": { "record": {} }
          }
        }
    "#});

    insta::assert_snapshot!(errors, @r"
    `foo` and `foo_array` both emit `encode_foo_array`
    `foo` and `foo_array` both emit `decode_foo_array`
    ");
}

#[test]
fn union_key_clash() {
    let errors = schema_errors_with(
        indoc! {r#"
            {
              "types": {
                "boom": { "record": {} },
                "shape": { "union": { "keys": "boom" } }
              }
            }
        "#},
        Config::new().prefix("fooey_"),
    );

    insta::assert_snapshot!(errors, @"`shape` and `shape` both emit `FOOEY_SHAPE_KEYS`");
}
