use wirecast_core::{Colors, ScalarKind};

use crate::{
    CodecContract, DispatchOps, FieldDef, Layout, Program, SizeBounds, TypeDef, TypeId, UnionDef,
    VariantDef, dump,
};

fn contract(c: &str) -> CodecContract {
    CodecContract {
        encode: format!("encode_{c}"),
        encode_array: format!("encode_{c}_array"),
        decode: format!("decode_{c}"),
        decode_array: format!("decode_{c}_array"),
        len: format!("len_{c}"),
        array_len: format!("array_len_{c}"),
    }
}

fn def(id: u32, name: &str, layout: Layout, bounds: SizeBounds) -> TypeDef {
    let contract = layout.kind().is_definition().then(|| contract(name));
    TypeDef {
        id: TypeId(id),
        name: name.into(),
        canonical: name.into(),
        layout,
        contract,
        bounds,
    }
}

fn boom_program() -> Program {
    let types = vec![
        def(0, "u32", Layout::Scalar(ScalarKind::U32), SizeBounds::exact(4)),
        def(
            1,
            "boom",
            Layout::Record {
                fields: vec![FieldDef {
                    name: "a".into(),
                    ty: TypeId(0),
                }],
            },
            SizeBounds::exact(4),
        ),
    ];
    let union = UnionDef {
        name: "shape".into(),
        ident: "shape".into(),
        keys_name: "SHAPE_KEYS".into(),
        variants: vec![VariantDef {
            name: "boom".into(),
            key_name: "SHAPE_BOOM".into(),
            discriminant: 0,
            type_id: TypeId(1),
        }],
        ops: DispatchOps {
            generic_encode: "shape_generic_encode".into(),
            generic_decode: "shape_generic_decode".into(),
            generic_len: "shape_generic_len".into(),
            array_encode: "shape_array_encode".into(),
            array_decode: "shape_array_decode".into(),
            array_len: "shape_array_len".into(),
        },
    };
    Program::new("", types, vec![union]).unwrap()
}

#[test]
fn dump_record_and_union() {
    let out = dump(&boom_program(), Colors::OFF);

    insta::assert_snapshot!(out, @r#"
    [program]
    prefix = ""

    [types]
    T0 u32 = u32  ; 4
    T1 boom = record { a: T0 }  ; 4
      encode encode_boom, encode_boom_array
      decode decode_boom, decode_boom_array
      len    len_boom, array_len_boom

    [unions]
    shape: SHAPE_KEYS
      0 SHAPE_BOOM -> T1 boom
      generic shape_generic_encode, shape_generic_decode, shape_generic_len
      array   shape_array_encode, shape_array_decode, shape_array_len
    "#);
}

#[test]
fn dump_wrappers() {
    let types = vec![
        def(0, "u8", Layout::Scalar(ScalarKind::U8), SizeBounds::exact(1)),
        def(
            1,
            "u8____12",
            Layout::Fixed {
                element: TypeId(0),
                dims: vec![12],
            },
            SizeBounds::exact(12),
        ),
        def(
            2,
            "vla__u8____12_3",
            Layout::Variable {
                element: TypeId(1),
                capacity: 3,
            },
            SizeBounds { min: 4, max: 40 },
        ),
        def(
            3,
            "optional__vla__u8____12_3",
            Layout::Optional { inner: TypeId(2) },
            SizeBounds { min: 1, max: 41 },
        ),
        def(
            4,
            "empty",
            Layout::Record { fields: vec![] },
            SizeBounds::ZERO,
        ),
    ];
    let program = Program::new("", types, vec![]).unwrap();

    insta::assert_snapshot!(dump(&program, Colors::OFF), @r#"
    [program]
    prefix = ""

    [types]
    T0 u8 = u8  ; 1
    T1 u8____12 = T0[12]  ; 12
    T2 vla__u8____12_3 = vla(T1, 3)  ; 4..40
      encode encode_vla__u8____12_3, encode_vla__u8____12_3_array
      decode decode_vla__u8____12_3, decode_vla__u8____12_3_array
      len    len_vla__u8____12_3, array_len_vla__u8____12_3
    T3 optional__vla__u8____12_3 = optional(T2)  ; 1..41
      encode encode_optional__vla__u8____12_3, encode_optional__vla__u8____12_3_array
      decode decode_optional__vla__u8____12_3, decode_optional__vla__u8____12_3_array
      len    len_optional__vla__u8____12_3, array_len_optional__vla__u8____12_3
    T4 empty = record {}  ; 0
      encode encode_empty, encode_empty_array
      decode decode_empty, decode_empty_array
      len    len_empty, array_len_empty
    "#);
}

#[test]
fn dump_colored() {
    let out = dump(&boom_program(), Colors::ON);

    assert!(out.contains("\x1b[34m[types]\x1b[0m"));
    assert!(out.contains("\x1b[32mencode_boom\x1b[0m"));
    assert!(out.contains("\x1b[2m  ; 4\x1b[0m"));
}
