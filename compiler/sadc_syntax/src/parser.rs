//! Contains the [`Parser`], a recursive descent acceptor for the grammar of
//! the language.

use sadc_abort::Abort;
use sadc_handler::Handler;
use sadc_lexical::token::{Category, Keyword, Token};

use crate::{
    cst::Label,
    error::{Expected, SyntaxError},
    tree::{NodeID, SyntaxTree},
};

/// The concrete syntax tree built by [`parse`].
pub type Tree = SyntaxTree<Label>;

/// Checks that `tokens` form one program of the grammar and builds its
/// concrete syntax tree.
///
/// The parser stops at the first token that doesn't fit: it reports one
/// [`SyntaxError`] to the handler and returns [`Abort`].
///
/// # Errors
///
/// Returns [`Abort`] when the tokens are not derivable from the grammar.
pub fn parse(
    tokens: &[Token],
    handler: &dyn Handler<SyntaxError>,
) -> Result<Tree, Abort> {
    Parser { tokens, cursor: 0, handler }.program()
}

/// Represents a state machine that walks a slice of tokens with a cursor and
/// produces a concrete syntax tree.
///
/// Each grammar production has its own method returning the tree of that
/// production, which the caller attaches under its own node.
pub struct Parser<'a, 'h> {
    tokens: &'a [Token],
    cursor: usize,
    handler: &'h dyn Handler<SyntaxError>,
}

impl std::fmt::Debug for Parser<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("tokens", &self.tokens)
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}

impl<'a> Parser<'a, '_> {
    /// Returns the next token without consuming it.
    fn peek(&self) -> Option<&'a Token> { self.tokens.get(self.cursor) }

    fn peek_category(&self) -> Option<Category> {
        self.peek().map(|x| x.category)
    }

    fn report_error(&self, expected: Expected) -> Abort {
        self.handler
            .receive(SyntaxError { expected, found: self.peek().cloned() });

        Abort
    }

    /// Consumes the next token if it is of the given category, otherwise
    /// reports a [`SyntaxError`].
    fn expect(&mut self, category: Category) -> Result<&'a Token, Abort> {
        match self.peek() {
            Some(token) if token.category == category => {
                self.cursor += 1;
                Ok(token)
            }
            _ => Err(self.report_error(Expected::Category(category))),
        }
    }

    /// Consumes the next token of the given category and adds it as a
    /// terminal under `parent`.
    fn terminal(
        &mut self,
        tree: &mut Tree,
        parent: NodeID<Label>,
        category: Category,
    ) -> Result<(), Abort> {
        let token = self.expect(category)?;
        tree.add_child(parent, Label::Terminal(token.lexeme.clone()));

        Ok(())
    }

    /// Adds a `label` node wrapping the next token, which the caller has
    /// already checked, as a terminal.
    fn wrapped_terminal(
        &mut self,
        tree: &mut Tree,
        label: Label,
        category: Category,
    ) -> Result<(), Abort> {
        let root = tree.root();
        let node = tree.add_child(root, label);

        self.terminal(tree, node, category)
    }

    /// Program ::= Block $
    fn program(mut self) -> Result<Tree, Abort> {
        log::debug!("parser: program()");

        let mut tree = Tree::new(Label::Program);
        let root = tree.root();

        let block = self.block()?;
        tree.attach(root, block);
        self.terminal(&mut tree, root, Category::EndOfProgram)?;

        Ok(tree)
    }

    /// Block ::= { StatementList }
    fn block(&mut self) -> Result<Tree, Abort> {
        log::debug!("parser: block()");

        let mut tree = Tree::new(Label::Block);
        let root = tree.root();

        self.terminal(&mut tree, root, Category::LeftBrace)?;
        let statements = self.statement_list()?;
        tree.attach(root, statements);
        self.terminal(&mut tree, root, Category::RightBrace)?;

        Ok(tree)
    }

    /// StatementList ::= Statement StatementList | ε
    fn statement_list(&mut self) -> Result<Tree, Abort> {
        log::debug!("parser: statement_list()");

        let mut tree = Tree::new(Label::StatementList);
        let root = tree.root();

        if self.peek_category().is_some_and(starts_statement) {
            let statement = self.statement()?;
            tree.attach(root, statement);

            let rest = self.statement_list()?;
            tree.attach(root, rest);
        }

        Ok(tree)
    }

    /// Statement ::= PrintStatement | AssignStatement | VarDecl
    ///             | WhileStatement | IfStatement | Block
    fn statement(&mut self) -> Result<Tree, Abort> {
        log::debug!("parser: statement()");

        let mut tree = Tree::new(Label::Statement);
        let root = tree.root();

        let statement = match self.peek_category() {
            Some(Category::Keyword(Keyword::Print)) => self.print_statement()?,
            Some(Category::Identifier) => self.assign_statement()?,
            Some(Category::Keyword(keyword)) if keyword.is_type() => {
                self.var_decl(keyword)?
            }
            Some(Category::Keyword(Keyword::While)) => {
                self.conditional(Label::WhileStatement, Keyword::While)?
            }
            Some(Category::Keyword(Keyword::If)) => {
                self.conditional(Label::IfStatement, Keyword::If)?
            }
            _ => self.block()?,
        };
        tree.attach(root, statement);

        Ok(tree)
    }

    /// PrintStatement ::= print ( Expr )
    fn print_statement(&mut self) -> Result<Tree, Abort> {
        log::debug!("parser: print_statement()");

        let mut tree = Tree::new(Label::PrintStatement);
        let root = tree.root();

        self.terminal(&mut tree, root, Category::Keyword(Keyword::Print))?;
        self.terminal(&mut tree, root, Category::LeftParenthesis)?;
        let expression = self.expression()?;
        tree.attach(root, expression);
        self.terminal(&mut tree, root, Category::RightParenthesis)?;

        Ok(tree)
    }

    /// AssignStatement ::= Id = Expr
    fn assign_statement(&mut self) -> Result<Tree, Abort> {
        log::debug!("parser: assign_statement()");

        let mut tree = Tree::new(Label::AssignStatement);
        let root = tree.root();

        let identifier = self.identifier()?;
        tree.attach(root, identifier);
        self.terminal(&mut tree, root, Category::Assign)?;
        let expression = self.expression()?;
        tree.attach(root, expression);

        Ok(tree)
    }

    /// VarDecl ::= type Id
    fn var_decl(&mut self, ty: Keyword) -> Result<Tree, Abort> {
        log::debug!("parser: var_decl()");

        let mut tree = Tree::new(Label::VarDecl);
        let root = tree.root();

        self.wrapped_terminal(&mut tree, Label::Type, Category::Keyword(ty))?;
        let identifier = self.identifier()?;
        tree.attach(root, identifier);

        Ok(tree)
    }

    /// WhileStatement ::= while BooleanExpr Block
    /// IfStatement    ::= if BooleanExpr Block
    fn conditional(
        &mut self,
        label: Label,
        keyword: Keyword,
    ) -> Result<Tree, Abort> {
        log::debug!("parser: {keyword}_statement()");

        let mut tree = Tree::new(label);
        let root = tree.root();

        self.terminal(&mut tree, root, Category::Keyword(keyword))?;
        let condition = self.boolean_expression()?;
        tree.attach(root, condition);
        let block = self.block()?;
        tree.attach(root, block);

        Ok(tree)
    }

    /// Expr ::= IntExpr | StringExpr | BooleanExpr | Id
    fn expression(&mut self) -> Result<Tree, Abort> {
        log::debug!("parser: expression()");

        let mut tree = Tree::new(Label::Expression);
        let root = tree.root();

        let expression = match self.peek_category() {
            Some(Category::Digit) => self.int_expression()?,
            Some(Category::Quote) => self.string_expression()?,
            Some(Category::LeftParenthesis) => self.boolean_expression()?,
            Some(Category::Keyword(keyword)) if keyword.is_boolean_literal() => {
                self.boolean_expression()?
            }
            Some(Category::Identifier) => self.identifier()?,
            _ => return Err(self.report_error(Expected::Expression)),
        };
        tree.attach(root, expression);

        Ok(tree)
    }

    /// IntExpr ::= digit intop Expr | digit
    fn int_expression(&mut self) -> Result<Tree, Abort> {
        log::debug!("parser: int_expression()");

        let mut tree = Tree::new(Label::IntExpression);

        self.wrapped_terminal(&mut tree, Label::Digit, Category::Digit)?;

        if self.peek_category() == Some(Category::Addition) {
            self.wrapped_terminal(
                &mut tree,
                Label::IntOperator,
                Category::Addition,
            )?;

            let root = tree.root();
            let rest = self.expression()?;
            tree.attach(root, rest);
        }

        Ok(tree)
    }

    /// StringExpr ::= " CharList "
    fn string_expression(&mut self) -> Result<Tree, Abort> {
        log::debug!("parser: string_expression()");

        let mut tree = Tree::new(Label::StringExpression);
        let root = tree.root();

        self.terminal(&mut tree, root, Category::Quote)?;
        let characters = self.char_list()?;
        tree.attach(root, characters);
        self.terminal(&mut tree, root, Category::Quote)?;

        Ok(tree)
    }

    /// CharList ::= char CharList | space CharList | ε
    fn char_list(&mut self) -> Result<Tree, Abort> {
        let mut tree = Tree::new(Label::CharList);

        let label = match self.peek_category() {
            Some(Category::Character) => Label::Char,
            Some(Category::Space) => Label::Space,
            _ => return Ok(tree),
        };

        let category = if label == Label::Char {
            Category::Character
        } else {
            Category::Space
        };
        self.wrapped_terminal(&mut tree, label, category)?;

        let root = tree.root();
        let rest = self.char_list()?;
        tree.attach(root, rest);

        Ok(tree)
    }

    /// BooleanExpr ::= ( Expr boolop Expr ) | boolval
    fn boolean_expression(&mut self) -> Result<Tree, Abort> {
        log::debug!("parser: boolean_expression()");

        let mut tree = Tree::new(Label::BooleanExpression);
        let root = tree.root();

        match self.peek_category() {
            Some(Category::LeftParenthesis) => {
                self.terminal(&mut tree, root, Category::LeftParenthesis)?;

                let lhs = self.expression()?;
                tree.attach(root, lhs);

                let operator = match self.peek_category() {
                    Some(category @ (Category::Equal | Category::NotEqual)) => {
                        category
                    }
                    _ => {
                        return Err(
                            self.report_error(Expected::BooleanOperator)
                        )
                    }
                };
                self.wrapped_terminal(
                    &mut tree,
                    Label::BooleanOperator,
                    operator,
                )?;

                let rhs = self.expression()?;
                tree.attach(root, rhs);

                self.terminal(&mut tree, root, Category::RightParenthesis)?;
            }
            Some(category @ Category::Keyword(keyword))
                if keyword.is_boolean_literal() =>
            {
                self.wrapped_terminal(
                    &mut tree,
                    Label::BooleanValue,
                    category,
                )?;
            }
            _ => return Err(self.report_error(Expected::BooleanExpression)),
        }

        Ok(tree)
    }

    /// Id ::= char
    fn identifier(&mut self) -> Result<Tree, Abort> {
        let mut tree = Tree::new(Label::Identifier);
        let root = tree.root();

        self.terminal(&mut tree, root, Category::Identifier)?;

        Ok(tree)
    }
}

/// Checks whether a token of the given category can begin a statement.
const fn starts_statement(category: Category) -> bool {
    match category {
        Category::Keyword(keyword) => {
            keyword.is_type()
                || matches!(
                    keyword,
                    Keyword::Print | Keyword::While | Keyword::If
                )
        }
        Category::Identifier | Category::LeftBrace => true,
        _ => false,
    }
}

#[cfg(test)]
mod test;
