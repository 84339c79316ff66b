//! Program checking.

use super::TypeChecker;
use crate::context::Scope;
use crate::error::TypeError;
use stella_syntax::ast::program::Module;
use stella_syntax::ast::ProgramVisitor;
use stella_syntax::Position;

/// Extension enabling subsumption wherever a type is expected.
const STRUCTURAL_SUBTYPING: &str = "structural-subtyping";

impl<'ast, 's> ProgramVisitor<'ast, &'s mut Scope> for TypeChecker<'ast> {
    type Output = ();

    fn visit_module(
        &mut self,
        node: &'ast Module,
        _position: Option<Position>,
        scope: &'s mut Scope,
    ) {
        let subtyping = node
            .extensions
            .iter()
            .flat_map(|ext| ext.names.iter())
            .any(|name| name.trim_start_matches('#') == STRUCTURAL_SUBTYPING);
        if subtyping {
            stella_log::debug!("structural subtyping enabled");
        }
        self.set_subtyping(subtyping);

        self.check_declarations(&node.decls, scope);

        if !self.halted && scope.lookup("main").is_none() {
            self.report(TypeError::MissingMain);
        }
    }
}
