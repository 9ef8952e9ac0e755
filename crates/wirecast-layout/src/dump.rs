//! Human-readable program dump for debugging and snapshot tests.
//!
//! ```text
//! [types]
//! T0 u32 = u32  ; 4
//! T1 boom = record { a: T0 }  ; 4
//!   encode encode_boom, encode_boom_array
//!   decode decode_boom, decode_boom_array
//!   len    len_boom, array_len_boom
//! ```

use std::fmt::Write as _;

use wirecast_core::Colors;

use crate::{Layout, Program, TypeId};

/// Generate a human-readable dump of the program.
pub fn dump(program: &Program, colors: Colors) -> String {
    let mut out = String::new();
    let ctx = DumpContext {
        type_width: width_for_count(program.types().len()),
        colors,
    };

    dump_header(&mut out, program, &ctx);
    dump_types(&mut out, program, &ctx);
    dump_unions(&mut out, program, &ctx);

    out
}

struct DumpContext {
    /// Width for type indices (T#).
    type_width: usize,
    colors: Colors,
}

impl DumpContext {
    fn id(&self, id: TypeId) -> String {
        format!("T{:0w$}", id.0, w = self.type_width)
    }
}

fn width_for_count(count: usize) -> usize {
    if count <= 1 {
        1
    } else {
        ((count - 1) as f64).log10().floor() as usize + 1
    }
}

fn dump_header(out: &mut String, program: &Program, ctx: &DumpContext) {
    let c = &ctx.colors;

    writeln!(out, "{}", c.paint(c.section, "[program]")).unwrap();
    writeln!(out, "prefix = {:?}", program.prefix()).unwrap();
}

fn dump_types(out: &mut String, program: &Program, ctx: &DumpContext) {
    let c = &ctx.colors;

    out.push('\n');
    writeln!(out, "{}", c.paint(c.section, "[types]")).unwrap();

    for def in program.types() {
        let layout = format_layout(&def.layout, ctx);
        writeln!(
            out,
            "{} {} = {layout}{}",
            ctx.id(def.id),
            def.name,
            c.paint(c.size, format_args!("  ; {}", def.bounds))
        )
        .unwrap();

        let Some(contract) = &def.contract else {
            continue;
        };
        let ops = [
            ("encode", &contract.encode, &contract.encode_array),
            ("decode", &contract.decode, &contract.decode_array),
            ("len", &contract.len, &contract.array_len),
        ];
        for (label, single, batch) in ops {
            writeln!(
                out,
                "  {label:<6} {}, {}",
                c.paint(c.op, single),
                c.paint(c.op, batch)
            )
            .unwrap();
        }
    }
}

fn format_layout(layout: &Layout, ctx: &DumpContext) -> String {
    match layout {
        Layout::Scalar(kind) => kind.name().to_string(),
        Layout::Fixed { element, dims } => {
            let mut s = ctx.id(*element);
            for d in dims {
                write!(s, "[{d}]").unwrap();
            }
            s
        }
        Layout::Variable { element, capacity } => {
            format!("vla({}, {capacity})", ctx.id(*element))
        }
        Layout::Optional { inner } => format!("optional({})", ctx.id(*inner)),
        Layout::Record { fields } if fields.is_empty() => "record {}".to_string(),
        Layout::Record { fields } => {
            let fields: Vec<_> = fields
                .iter()
                .map(|f| format!("{}: {}", f.name, ctx.id(f.ty)))
                .collect();
            format!("record {{ {} }}", fields.join(", "))
        }
        Layout::Alias { target } => format!("alias({})", ctx.id(*target)),
    }
}

fn dump_unions(out: &mut String, program: &Program, ctx: &DumpContext) {
    let c = &ctx.colors;

    if program.unions().is_empty() {
        return;
    }

    out.push('\n');
    writeln!(out, "{}", c.paint(c.section, "[unions]")).unwrap();

    for union in program.unions() {
        writeln!(out, "{}: {}", union.ident, c.paint(c.op, &union.keys_name)).unwrap();
        for variant in &union.variants {
            let target = program
                .get(variant.type_id)
                .map_or("?", |t| t.name.as_str());
            writeln!(
                out,
                "  {} {} -> {} {target}",
                variant.discriminant,
                c.paint(c.op, &variant.key_name),
                ctx.id(variant.type_id)
            )
            .unwrap();
        }

        let ops = &union.ops;
        writeln!(
            out,
            "  generic {}",
            c.paint(
                c.op,
                format_args!("{}, {}, {}", ops.generic_encode, ops.generic_decode, ops.generic_len)
            )
        )
        .unwrap();
        writeln!(
            out,
            "  array   {}",
            c.paint(
                c.op,
                format_args!("{}, {}, {}", ops.array_encode, ops.array_decode, ops.array_len)
            )
        )
        .unwrap();
    }
}
