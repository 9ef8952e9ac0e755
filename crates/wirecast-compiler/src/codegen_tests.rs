use indoc::indoc;
use wirecast_layout::{FieldDef, Layout, SizeBounds, TypeId, TypeKind};

use crate::Config;
use crate::test_utils::{compile_valid, compile_valid_with, graph};

const OBJECT: &str = indoc! {r#"
    {
      "types": {
        "object": { "record": {
          "id": "u64",
          "name": { "fixed": { "element": "u8", "dims": [12] } },
          "tags": { "variable": { "element": "u16", "capacity": 4 } },
          "parent": { "optional": "u32" }
        } }
      }
    }
"#};

#[test]
fn record_layout_references_fields_by_id() {
    let program = compile_valid(OBJECT);
    let object = program.type_by_name("object").unwrap();

    let Layout::Record { fields } = &object.layout else {
        panic!("expected record");
    };
    let field_types: Vec<_> = fields
        .iter()
        .map(|f| (f.name.as_str(), program.get(f.ty).unwrap().canonical.as_str()))
        .collect();
    assert_eq!(
        field_types,
        [
            ("id", "u64"),
            ("name", "u8____12"),
            ("tags", "vla__u16_4"),
            ("parent", "optional__u32"),
        ]
    );
    assert!(fields.iter().all(|f| f.ty < object.id));
}

#[test]
fn size_bounds() {
    let program = compile_valid(OBJECT);
    let bounds = |name: &str| program.type_by_name(name).unwrap().bounds;

    assert_eq!(bounds("u64"), SizeBounds::exact(8));
    assert_eq!(bounds("u8____12"), SizeBounds::exact(12));
    assert_eq!(bounds("vla__u16_4"), SizeBounds { min: 4, max: 12 });
    assert_eq!(bounds("optional__u32"), SizeBounds { min: 1, max: 5 });
    assert_eq!(bounds("object"), SizeBounds { min: 25, max: 37 });
}

#[test]
fn alias_layout_and_bounds() {
    let program = compile_valid(indoc! {r#"
        {
          "types": {
            "boolish": { "alias": "bool" },
            "nullish": { "alias": "null" },
            "names": { "alias": { "fixed": { "element": "u8", "dims": [2, 3] } } }
          }
        }
    "#});

    let boolish = program.type_by_name("boolish").unwrap();
    assert_eq!(boolish.kind(), TypeKind::Alias);
    assert_eq!(boolish.layout, Layout::Alias { target: TypeId(0) });
    assert_eq!(boolish.bounds, SizeBounds::exact(1));
    assert!(boolish.contract.is_some());

    assert_eq!(program.type_by_name("nullish").unwrap().bounds, SizeBounds::ZERO);
    assert_eq!(program.type_by_name("names").unwrap().bounds, SizeBounds::exact(6));
}

#[test]
fn empty_record() {
    let program = compile_valid(r#"{ "types": { "empty": { "record": {} } } }"#);
    let empty = program.type_by_name("empty").unwrap();

    assert_eq!(empty.layout, Layout::Record { fields: Vec::<FieldDef>::new() });
    assert_eq!(empty.bounds, SizeBounds::ZERO);
    assert_eq!(program.order(), [TypeId(0)]);
}

#[test]
fn only_definitions_have_contracts() {
    let program = compile_valid(OBJECT);

    for def in program.types() {
        assert_eq!(def.contract.is_some(), def.is_definition(), "{}", def.name);
    }
    let definitions: Vec<_> = program.definitions().map(|t| t.canonical.as_str()).collect();
    assert_eq!(definitions, ["vla__u16_4", "optional__u32", "object"]);
}

#[test]
fn parallel_and_sequential_agree() {
    let json = indoc! {r#"
        {
          "types": {
            "thing": { "record": {
              "inner": "boom",
              "list": { "variable": { "element": "boom", "capacity": 3 } },
              "grid": { "fixed": { "element": { "optional": "i16" }, "dims": [2, 2] } }
            } },
            "boom": { "record": { "x": "u32", "y": { "optional": "boom_id" } } },
            "boom_id": { "alias": "u64" }
          }
        }
    "#};

    let sequential = compile_valid_with(json, Config::new());
    let parallel = crate::compile(&graph(json), &Config::new().parallel(true)).unwrap();
    assert_eq!(sequential, parallel);
}
