//! Compilation session.

use wirecast_core::utils::is_identifier;
use wirecast_core::{Interner, TypeGraph};
use wirecast_layout::Program;

use crate::codegen::Codegen;
use crate::dispatch::Dispatch;
use crate::resolve::{self, Lowered};
use crate::shapes::ShapeTable;
use crate::{Config, Error, InvariantViolation, Result, mangle, validate};

/// A compilation run over one configuration.
///
/// The session owns the interner, so declared and mangled names are shared
/// across every stage of a run. Programs produced by one session do not
/// borrow from it.
#[derive(Debug, Default)]
pub struct Session {
    config: Config,
    interner: Interner,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            interner: Interner::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    /// Compile a type graph into a codec program.
    ///
    /// Schema errors are collected over the whole graph and returned
    /// together. Nothing is produced when any stage fails.
    #[tracing::instrument(level = "debug", skip_all, fields(decls = graph.len(), prefix = %self.config.prefix))]
    pub fn compile(&mut self, graph: &TypeGraph) -> Result<Program> {
        let prefix = self.config.prefix.as_str();
        if !prefix.is_empty() && !is_identifier(prefix) {
            return Err(Error::InvalidPrefix(prefix.to_string()));
        }

        let errors = validate::validate(graph, self.config.global_any_of);
        if !errors.is_empty() {
            return Err(Error::Schema(errors));
        }

        let mut shapes = ShapeTable::new();
        let lowered = Lowered::lower(graph, &mut shapes, &mut self.interner);
        let resolution = resolve::resolve(&lowered, &shapes, &self.interner)
            .map_err(|e| Error::Schema(vec![e]))?;
        let names = mangle::mangle(&shapes, &resolution, &mut self.interner, prefix)?;

        let types = Codegen {
            shapes: &shapes,
            lowered: &lowered,
            resolution: &resolution,
            names: &names,
            interner: &self.interner,
            prefix,
        }
        .generate(self.config.parallel)?;

        let unions = Dispatch {
            lowered: &lowered,
            resolution: &resolution,
            interner: &self.interner,
            prefix,
        }
        .build(&types, self.config.global_any_of)?;

        let program = Program::new(prefix, types, unions).map_err(InvariantViolation::from)?;
        tracing::debug!(
            types = program.types().len(),
            unions = program.unions().len(),
            "compiled"
        );
        Ok(program)
    }

    /// Text dump of a program, colored per the session config.
    pub fn dump(&self, program: &Program) -> String {
        wirecast_layout::dump(program, self.config.colors)
    }
}

/// Compile with a fresh session.
pub fn compile(graph: &TypeGraph, config: &Config) -> Result<Program> {
    Session::new(config.clone()).compile(graph)
}
