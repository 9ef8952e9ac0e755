//! Shared helpers for VM integration tests.

#![allow(dead_code)]

use wirecast_compiler::Config;
use wirecast_core::{ScalarKind, TypeGraph};
use wirecast_layout::{Layout, Program, TypeId};
use wirecast_vm::Value;

pub fn compile(json: &str) -> Program {
    compile_with(json, &Config::new())
}

pub fn compile_with(json: &str, config: &Config) -> Program {
    let graph = TypeGraph::from_json(json).expect("test schema should parse");
    wirecast_compiler::compile(&graph, config).expect("test schema should compile")
}

/// A value of type `ty`: every variable array filled to capacity and every
/// optional present when `full`, all empty and absent otherwise.
pub fn sample(program: &Program, ty: TypeId, full: bool) -> Value {
    let def = program.get(ty).expect("type id in range");
    match &def.layout {
        Layout::Scalar(kind) => scalar(*kind),
        Layout::Fixed { element, dims } => fixed(program, *element, dims, full),
        Layout::Variable { element, capacity } => {
            let count = if full { *capacity } else { 0 };
            Value::Array((0..count).map(|_| sample(program, *element, full)).collect())
        }
        Layout::Optional { inner } if full => Value::some(sample(program, *inner, full)),
        Layout::Optional { .. } => Value::none(),
        Layout::Record { fields } => Value::Record(
            fields
                .iter()
                .map(|f| (f.name.clone(), sample(program, f.ty, full)))
                .collect(),
        ),
        Layout::Alias { target } => sample(program, *target, full),
    }
}

fn fixed(program: &Program, element: TypeId, dims: &[u32], full: bool) -> Value {
    match dims.split_first() {
        None => sample(program, element, full),
        Some((&len, rest)) => {
            Value::Array((0..len).map(|_| fixed(program, element, rest, full)).collect())
        }
    }
}

fn scalar(kind: ScalarKind) -> Value {
    match kind {
        ScalarKind::U8 => Value::U8(u8::MAX),
        ScalarKind::I8 => Value::I8(i8::MIN),
        ScalarKind::U16 => Value::U16(0xBEEF),
        ScalarKind::I16 => Value::I16(-300),
        ScalarKind::U32 => Value::U32(0xDEAD_BEEF),
        ScalarKind::I32 => Value::I32(i32::MIN + 1),
        ScalarKind::U64 => Value::U64(u64::MAX - 1),
        ScalarKind::I64 => Value::I64(-1),
        ScalarKind::Bool => Value::Bool(true),
        ScalarKind::Null => Value::Null,
    }
}
