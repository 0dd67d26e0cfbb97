//! Contains the [`analyze`] function, which builds the abstract syntax tree
//! and the symbol table of a program.

use getset::Getters;
use sadc_abort::Abort;
use sadc_handler::Handler;
use sadc_lexical::token::{Category, Keyword, Token};
use sadc_syntax::tree::NodeID;

use crate::{
    ast::{self, Ast, Label},
    error::{
        Error, RedeclaredVariable, TypeMismatch, UnassignedVariable,
        UndeclaredVariable, UninitializedUse, UnusedVariable,
    },
    symbol::{ScopeID, SymbolID, Table},
    ty::{self, Reduction, Type},
};

/// The result of a successful semantic analysis.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Program {
    /// The abstract syntax tree of the program.
    #[get = "pub"]
    ast: Ast,

    /// Every scope and variable of the program.
    #[get = "pub"]
    table: Table,
}

/// Analyzes the tokens of one program.
///
/// The tokens must have been accepted by [`sadc_syntax::parser::parse`]. The
/// analysis doesn't stop at the first problem: every error and warning is
/// reported to the handler.
///
/// # Errors
///
/// Returns [`Abort`] if at least one error (as opposed to a warning) was
/// reported.
///
/// # Panics
///
/// Panics if the tokens are not grammatically valid.
pub fn analyze(
    tokens: &[Token],
    handler: &dyn Handler<Error>,
) -> Result<Program, Abort> {
    Analyzer {
        tokens,
        cursor: 0,
        handler,
        errors: 0,
        table: Table::new(),
        scope: None,
    }
    .program()
}

struct Analyzer<'a, 'h> {
    tokens: &'a [Token],
    cursor: usize,
    handler: &'h dyn Handler<Error>,
    errors: usize,
    table: Table,
    scope: Option<ScopeID>,
}

impl<'a> Analyzer<'a, '_> {
    fn peek(&self) -> Category { self.tokens[self.cursor].category }

    fn next(&mut self) -> &'a Token {
        let token = &self.tokens[self.cursor];
        self.cursor += 1;

        token
    }

    fn current_scope(&self) -> ScopeID {
        self.scope.expect("should be inside of a block")
    }

    fn report(&mut self, error: impl Into<Error>) {
        let error = error.into();

        if error.is_error() {
            self.errors += 1;
        }

        self.handler.receive(error);
    }

    fn program(mut self) -> Result<Program, Abort> {
        let mut ast = Ast::new(Label::Program);
        let root = ast.root();

        self.block(&mut ast, root);

        if self.errors > 0 {
            log::info!(
                "semantic analysis failed with {} error(s)",
                self.errors
            );
            return Err(Abort);
        }

        Ok(Program { ast, table: self.table })
    }

    fn block(&mut self, ast: &mut Ast, parent: NodeID<Label>) {
        // `{`
        self.next();

        let scope = self.table.new_scope(self.scope);
        let node = ast.add_child(parent, Label::Block { scope });
        self.scope = Some(scope);

        log::debug!(
            "semantic: entering scope {}",
            self.table.scope(scope).depth()
        );

        while self.peek() != Category::RightBrace {
            self.statement(ast, node);
        }

        // `}`
        self.next();

        self.exit_scope(scope);
    }

    fn exit_scope(&mut self, scope: ScopeID) {
        let symbols = self
            .table
            .scope(scope)
            .symbols()
            .iter()
            .map(|x| self.table.symbol(*x))
            .collect::<Vec<_>>();

        let unassigned = symbols
            .iter()
            .find(|x| x.value().is_none())
            .map(|x| UnassignedVariable { name: x.name(), line: x.line() });
        let unused = symbols
            .iter()
            .filter(|x| !x.used())
            .map(|x| UnusedVariable { name: x.name(), line: x.line() })
            .collect::<Vec<_>>();

        if let Some(warning) = unassigned {
            self.report(warning);
        }
        for warning in unused {
            self.report(warning);
        }

        self.scope = self.table.scope(scope).parent();
    }

    fn statement(&mut self, ast: &mut Ast, parent: NodeID<Label>) {
        match self.peek() {
            Category::Keyword(Keyword::Print) => {
                // `print` `(`
                self.next();
                self.next();

                let node = ast.add_child(parent, Label::PrintStatement);
                let argument = self.expression();
                ast.attach(node, argument);

                // `)`
                self.next();
            }
            Category::Identifier => self.assignment(ast, parent),
            Category::Keyword(Keyword::While) => {
                self.conditional(ast, parent, Label::WhileStatement);
            }
            Category::Keyword(Keyword::If) => {
                self.conditional(ast, parent, Label::IfStatement);
            }
            Category::Keyword(keyword) => match Type::from_keyword(keyword) {
                Some(ty) => self.declaration(ast, parent, ty),
                None => unreachable!("`{keyword}` can't start a statement"),
            },
            _ => self.block(ast, parent),
        }
    }

    fn declaration(
        &mut self,
        ast: &mut Ast,
        parent: NodeID<Label>,
        ty: Type,
    ) {
        // the type keyword
        self.next();

        let token = self.next();
        let name = identifier_name(token);
        let scope = self.current_scope();

        let symbol = match self.table.declare(scope, name, ty, token.line) {
            Ok(symbol) => symbol,
            Err(existing) => {
                let previous_line = self.table.symbol(existing).line();
                self.report(RedeclaredVariable {
                    name,
                    line: token.line,
                    previous_line,
                });

                existing
            }
        };

        let node = ast.add_child(parent, Label::VarDecl);
        ast.add_child(node, Label::Type(ty));
        ast.add_child(node, Label::Identifier { name, symbol: Some(symbol) });
    }

    fn assignment(&mut self, ast: &mut Ast, parent: NodeID<Label>) {
        let token = self.next();
        let name = identifier_name(token);
        let symbol = self.resolve(name, token.line);

        // `=`
        self.next();

        let value = self.expression();

        if let Some(symbol) = symbol {
            let declared = self.table.symbol(symbol).ty();
            let found = ty::reduce(&value, value.root(), &self.table);

            let compatible = match found {
                Reduction::Homogeneous(ty) => ty == declared,
                Reduction::Mixed => declared == Type::String,
                Reduction::Unknown => true,
            };

            if !compatible {
                self.report(TypeMismatch {
                    target: Some(name),
                    expected: Reduction::Homogeneous(declared),
                    found,
                    line: token.line,
                });
            }

            self.table
                .symbol_mut(symbol)
                .assign(ast::source_text(&value, value.root()));
        }

        let node = ast.add_child(parent, Label::AssignStatement);
        ast.add_child(node, Label::Identifier { name, symbol });
        ast.attach(node, value);
    }

    fn conditional(
        &mut self,
        ast: &mut Ast,
        parent: NodeID<Label>,
        label: Label,
    ) {
        // `while` or `if`
        self.next();

        let node = ast.add_child(parent, label);
        let condition = self.expression();
        ast.attach(node, condition);

        self.block(ast, node);
    }

    /// Builds the tree of the expression starting at the cursor.
    fn expression(&mut self) -> Ast {
        let token = self.next();

        match token.category {
            Category::Digit => {
                let digit = digit_value(token);

                if self.peek() == Category::Addition {
                    self.next();

                    let mut tree = Ast::new(Label::Addition);
                    let root = tree.root();
                    tree.add_child(root, Label::Digit(digit));

                    let rest = self.expression();
                    tree.attach(root, rest);

                    tree
                } else {
                    Ast::new(Label::Digit(digit))
                }
            }
            Category::Quote => {
                let mut string = String::new();
                while self.peek() != Category::Quote {
                    string.push_str(&self.next().lexeme);
                }

                // closing `"`
                self.next();

                Ast::new(Label::StringLiteral(string))
            }
            Category::LeftParenthesis => self.comparison(),
            Category::Keyword(keyword @ (Keyword::True | Keyword::False)) => {
                Ast::new(Label::Boolean(keyword == Keyword::True))
            }
            Category::Identifier => {
                let name = identifier_name(token);
                let symbol = self.resolve(name, token.line);

                if let Some(symbol) = symbol {
                    self.read(symbol, token.line);
                }

                Ast::new(Label::Identifier { name, symbol })
            }
            category => {
                unreachable!("{category} can't start an expression")
            }
        }
    }

    /// Builds the tree of `( Expr boolop Expr )`, the `(` already consumed.
    fn comparison(&mut self) -> Ast {
        let lhs = self.expression();
        let operator = self.next();
        let rhs = self.expression();

        // `)`
        self.next();

        let lhs_type = ty::reduce(&lhs, lhs.root(), &self.table);
        let rhs_type = ty::reduce(&rhs, rhs.root(), &self.table);

        let known =
            lhs_type != Reduction::Unknown && rhs_type != Reduction::Unknown;
        if known && (lhs_type != rhs_type || lhs_type == Reduction::Mixed) {
            self.report(TypeMismatch {
                target: None,
                expected: lhs_type,
                found: rhs_type,
                line: operator.line,
            });
        }

        let mut tree = Ast::new(if operator.category == Category::Equal {
            Label::Equal
        } else {
            Label::NotEqual
        });
        let root = tree.root();
        tree.attach(root, lhs);
        tree.attach(root, rhs);

        tree
    }

    fn resolve(&mut self, name: char, line: usize) -> Option<SymbolID> {
        let symbol = self.table.lookup(self.current_scope(), name);

        if symbol.is_none() {
            self.report(UndeclaredVariable { name, line });
        }

        symbol
    }

    fn read(&mut self, symbol: SymbolID, line: usize) {
        let symbol = self.table.symbol_mut(symbol);
        symbol.mark_used();

        if symbol.value().is_none() {
            let name = symbol.name();
            self.report(UninitializedUse { name, line });
        }
    }
}

fn identifier_name(token: &Token) -> char {
    token.lexeme.chars().next().expect("identifiers are one letter long")
}

fn digit_value(token: &Token) -> u8 {
    token
        .lexeme
        .bytes()
        .next()
        .map(|x| x - b'0')
        .expect("digits are one character long")
}

#[cfg(test)]
mod test;
