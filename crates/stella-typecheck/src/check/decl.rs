//! Declaration checking.
//!
//! A block of declarations (a program, or a function's locals) is checked in
//! two passes:
//! - Pass 1: type aliases and exception declarations, then every function
//!   signature, so functions may refer to each other regardless of order
//! - Pass 2: function bodies against their declared return types

use super::TypeChecker;
use crate::context::Scope;
use crate::error::TypeError;
use crate::types::Ty;
use hashbrown::HashSet;
use stella_syntax::ast::decl::{ExceptionType, ExceptionVariant, Fun, FunGeneric, TypeAlias};
use stella_syntax::ast::expr::{Expr, ParamDecl};
use stella_syntax::ast::{Decl, DeclKind, DeclVisitor, Type};
use stella_syntax::Position;

impl<'ast> TypeChecker<'ast> {
    /// Check a block of declarations in `scope`, binding every function it
    /// declares.
    pub fn check_declarations(&mut self, decls: &'ast [Decl], scope: &mut Scope) {
        // Type and term names live in separate namespaces.
        let mut types = HashSet::new();
        for decl in decls {
            if matches!(decl.kind(), DeclKind::Fun(_) | DeclKind::FunGeneric(_)) {
                continue;
            }
            if !self.first_in_block(decl, &mut types) {
                continue;
            }
            self.collect_signature(decl, scope);
        }

        let mut functions = HashSet::new();
        for decl in decls {
            if !matches!(decl.kind(), DeclKind::Fun(_) | DeclKind::FunGeneric(_)) {
                continue;
            }
            if !self.first_in_block(decl, &mut functions) {
                continue;
            }
            self.collect_signature(decl, scope);
        }
        stella_log::trace!("collected {} function signatures", functions.len());

        for decl in decls {
            if self.halted {
                break;
            }
            decl.accept(self, scope);
        }
    }

    /// Records the name `decl` introduces, reporting it if the block already
    /// declared it.
    fn first_in_block(&mut self, decl: &'ast Decl, seen: &mut HashSet<&'ast str>) -> bool {
        let Some(name) = decl.name() else {
            return true;
        };
        if seen.insert(name) {
            return true;
        }
        self.report(TypeError::DuplicateDeclaration {
            name: name.to_string(),
            position: decl.position(),
        });
        false
    }

    /// Pass 1 for a single declaration.
    fn collect_signature(&mut self, decl: &'ast Decl, scope: &mut Scope) {
        match decl.kind() {
            DeclKind::Fun(fun) => {
                let ty = self.signature(&fun.params, fun.return_type.as_ref(), scope);
                scope.bind(fun.name.as_str(), ty);
            }
            DeclKind::FunGeneric(fun) => {
                scope.push();
                for generic in &fun.generics {
                    scope.bind_type_var(generic.as_str());
                }
                let body = self.signature(&fun.params, fun.return_type.as_ref(), scope);
                scope.pop();
                let ty = Ty::ForAll {
                    vars: fun.generics.clone(),
                    body: Box::new(body),
                };
                scope.bind(fun.name.as_str(), ty);
            }
            DeclKind::TypeAlias(alias) => {
                let ty = self.lower(&alias.ty, scope);
                self.aliases.insert(alias.name.clone(), ty);
            }
            DeclKind::ExceptionType(exception) => {
                let ty = self.lower(&exception.ty, scope);
                if self.exception_type.is_some() {
                    stella_log::warn!("exception type declared more than once; keeping the last");
                }
                self.exception_type = Some(ty);
            }
            DeclKind::ExceptionVariant(variant) => {
                let ty = self.lower(&variant.ty, scope);
                self.exception_variants.push((variant.label.clone(), Some(ty)));
            }
        }
    }

    fn signature(
        &mut self,
        params: &'ast [ParamDecl],
        return_type: Option<&'ast Type>,
        scope: &Scope,
    ) -> Ty {
        let params = params.iter().map(|param| self.lower(&param.ty, scope)).collect();
        let ret = return_type.map_or(Ty::Unit, |ty| self.lower(ty, scope));
        Ty::fun(params, ret)
    }

    /// Pass 2 for a function: parameters, locals, then the body.
    #[allow(clippy::too_many_arguments)]
    fn check_function(
        &mut self,
        name: &str,
        generics: &[String],
        params: &'ast [ParamDecl],
        return_type: Option<&'ast Type>,
        throw_types: &'ast [Type],
        locals: &'ast [Decl],
        body: &'ast Expr,
        scope: &mut Scope,
    ) {
        stella_log::debug!("checking function {}", name);
        scope.push();
        for generic in generics {
            scope.bind_type_var(generic.as_str());
        }
        for param in params {
            let ty = self.lower(&param.ty, scope);
            scope.bind(param.name.as_str(), ty);
        }
        for ty in throw_types {
            self.lower(ty, scope);
        }
        let ret = return_type.map_or(Ty::Unit, |ty| self.lower(ty, scope));

        // Aliases and exceptions declared among the locals end with the body.
        let aliases = self.aliases.clone();
        let exception_type = self.exception_type.clone();
        let exception_variants = self.exception_variants.len();

        self.check_declarations(locals, scope);
        self.expect(body, &ret, scope);

        self.aliases = aliases;
        self.exception_type = exception_type;
        self.exception_variants.truncate(exception_variants);
        scope.pop();
    }
}

impl<'ast, 's> DeclVisitor<'ast, &'s mut Scope> for TypeChecker<'ast> {
    type Output = ();

    fn visit_fun(&mut self, node: &'ast Fun, _position: Option<Position>, scope: &'s mut Scope) {
        self.check_function(
            &node.name,
            &[],
            &node.params,
            node.return_type.as_ref(),
            &node.throw_types,
            &node.locals,
            &node.body,
            scope,
        );
    }

    fn visit_fun_generic(
        &mut self,
        node: &'ast FunGeneric,
        _position: Option<Position>,
        scope: &'s mut Scope,
    ) {
        self.check_function(
            &node.name,
            &node.generics,
            &node.params,
            node.return_type.as_ref(),
            &node.throw_types,
            &node.locals,
            &node.body,
            scope,
        );
    }

    fn visit_type_alias(
        &mut self,
        _node: &'ast TypeAlias,
        _position: Option<Position>,
        _scope: &'s mut Scope,
    ) {}

    fn visit_exception_type(
        &mut self,
        _node: &'ast ExceptionType,
        _position: Option<Position>,
        _scope: &'s mut Scope,
    ) {}

    fn visit_exception_variant(
        &mut self,
        _node: &'ast ExceptionVariant,
        _position: Option<Position>,
        _scope: &'s mut Scope,
    ) {
    }
}
