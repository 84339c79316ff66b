//! Whole programs.

use crate::ast::decl::Decl;
use std::fmt;

node_family! {
    /// A complete Stella program.
    family Program(ProgramKind) visited by ProgramVisitor;

    /// `language core; extend with #a, #b; decls...`
    Module => visit_module {
        /// Language version header
        language: LanguageDecl,
        /// Enabled extensions, one entry per `extend with` line
        extensions: Vec<Extension>,
        /// Top-level declarations
        decls: Vec<Decl>,
    }
}

impl Program {
    /// Top-level declarations.
    #[must_use]
    pub fn decls(&self) -> &[Decl] {
        match self.kind() {
            ProgramKind::Module(module) => &module.decls,
        }
    }

    /// Returns `true` if any `extend with` line enables `name`.
    ///
    /// The leading `#` is optional.
    #[must_use]
    pub fn has_extension(&self, name: &str) -> bool {
        let name = name.trim_start_matches('#');
        match self.kind() {
            ProgramKind::Module(module) => module
                .extensions
                .iter()
                .flat_map(|ext| ext.names.iter())
                .any(|n| n.trim_start_matches('#') == name),
        }
    }
}

/// The `language` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LanguageDecl {
    /// `language core;`
    #[default]
    Core,
}

impl fmt::Display for LanguageDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageDecl::Core => f.write_str("core"),
        }
    }
}

/// One `extend with #a, #b;` line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Extension {
    /// Extension names, including the leading `#`
    pub names: Vec<String>,
}

impl Extension {
    /// Creates an extension line.
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_extension() {
        let program = Program::from(Module::new(
            LanguageDecl::Core,
            vec![Extension::new(["#natural-literals", "#unit-type"])],
            vec![],
        ));
        assert!(program.has_extension("#unit-type"));
        assert!(program.has_extension("natural-literals"));
        assert!(!program.has_extension("#references"));
        assert!(program.decls().is_empty());
    }
}
