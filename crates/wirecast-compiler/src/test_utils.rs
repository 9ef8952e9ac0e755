//! Test helpers: compile JSON schemas and render the results.

use wirecast_core::TypeGraph;
use wirecast_layout::Program;

use crate::{Config, Error, Session};

pub fn graph(json: &str) -> TypeGraph {
    TypeGraph::from_json(json).expect("test schema should parse")
}

/// Compile sequentially so failures are deterministic.
pub fn compile_with(json: &str, config: Config) -> Result<Program, Error> {
    Session::new(config.parallel(false)).compile(&graph(json))
}

pub fn compile_valid(json: &str) -> Program {
    compile_valid_with(json, Config::new())
}

pub fn compile_valid_with(json: &str, config: Config) -> Program {
    compile_with(json, config).expect("schema should compile")
}

/// Dump of a schema that must compile.
pub fn dump_valid(json: &str) -> String {
    dump_valid_with(json, Config::new())
}

pub fn dump_valid_with(json: &str, config: Config) -> String {
    let session = Session::new(config.clone());
    session.dump(&compile_valid_with(json, config))
}

/// Schema errors of a schema that must fail, one message per line.
pub fn schema_errors(json: &str) -> String {
    schema_errors_with(json, Config::new())
}

pub fn schema_errors_with(json: &str, config: Config) -> String {
    let err = compile_with(json, config).expect_err("schema should be rejected");
    assert!(
        matches!(err, Error::Schema(_)),
        "expected schema errors, got {err}"
    );
    err.schema_errors()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
