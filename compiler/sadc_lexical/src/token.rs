//! Is a module containing the [`Token`] type and the tokenizer producing it.

use derive_more::Deref;
use sadc_handler::Handler;
use strum::IntoEnumIterator;

use crate::error::{
    self, IllegalStringCharacter, MissingTerminator, Terminator,
    UnrecognizedToken,
};

/// Enumeration of all the reserved words of the language.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum_macros::EnumString,
    strum_macros::EnumIter,
    strum_macros::IntoStaticStr,
    strum_macros::Display,
)]
#[strum(serialize_all = "lowercase")]
#[allow(missing_docs)]
pub enum Keyword {
    Print,
    While,
    If,
    Int,
    String,
    Boolean,
    True,
    False,
}

impl Keyword {
    /// Gets the source text of the keyword.
    #[must_use]
    pub fn as_str(self) -> &'static str { self.into() }

    /// Checks whether the keyword names a type (`int`, `string` or
    /// `boolean`).
    #[must_use]
    pub const fn is_type(self) -> bool {
        matches!(self, Self::Int | Self::String | Self::Boolean)
    }

    /// Checks whether the keyword is a boolean literal.
    #[must_use]
    pub const fn is_boolean_literal(self) -> bool {
        matches!(self, Self::True | Self::False)
    }
}

/// The lexical category of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// `$`
    EndOfProgram,

    /// `{`
    LeftBrace,

    /// `}`
    RightBrace,

    /// `(`
    LeftParenthesis,

    /// `)`
    RightParenthesis,

    /// `=`
    Assign,

    /// `==`
    Equal,

    /// `!=`
    NotEqual,

    /// `+`
    Addition,

    /// `"`, opening or closing a string literal.
    Quote,

    /// Any of the reserved words.
    Keyword(Keyword),

    /// A single lowercase letter outside of a string literal.
    Identifier,

    /// A single decimal digit.
    Digit,

    /// A single lowercase letter inside of a string literal.
    Character,

    /// A space inside of a string literal.
    Space,

    /// A lexeme that matches no other category.
    Error,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EndOfProgram => f.write_str("`$`"),
            Self::LeftBrace => f.write_str("`{`"),
            Self::RightBrace => f.write_str("`}`"),
            Self::LeftParenthesis => f.write_str("`(`"),
            Self::RightParenthesis => f.write_str("`)`"),
            Self::Assign => f.write_str("`=`"),
            Self::Equal => f.write_str("`==`"),
            Self::NotEqual => f.write_str("`!=`"),
            Self::Addition => f.write_str("`+`"),
            Self::Quote => f.write_str("`\"`"),
            Self::Keyword(keyword) => write!(f, "`{keyword}`"),
            Self::Identifier => f.write_str("identifier"),
            Self::Digit => f.write_str("digit"),
            Self::Character => f.write_str("character"),
            Self::Space => f.write_str("space"),
            Self::Error => f.write_str("invalid token"),
        }
    }
}

/// A single lexeme of the program together with its category and location.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Token {
    /// The category of the token.
    pub category: Category,

    /// The text the token was made of.
    pub lexeme: String,

    /// The line the token starts on.
    pub line: usize,

    /// The column the token starts at.
    pub column: usize,
}

/// The list of tokens of one program, in source order.
///
/// A successfully tokenized stream always ends with exactly one
/// [`Category::EndOfProgram`] token.
#[derive(Debug, Clone, PartialEq, Eq, Deref)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Tokenizes the text of one program.
    ///
    /// `first_line` is the line number of the first line of `source` within
    /// the whole input, so that line numbers stay meaningful after the input
    /// has been split into programs.
    #[must_use]
    pub fn tokenize(
        source: &str,
        first_line: usize,
        handler: &dyn Handler<error::Error>,
    ) -> Self {
        let mut tokenizer = Tokenizer::new(source, first_line, handler);
        tokenizer.run();

        Self { tokens: tokenizer.tokens }
    }

    /// Consumes the stream and returns the underlying tokens.
    #[must_use]
    pub fn into_vec(self) -> Vec<Token> { self.tokens }
}

/// A struct used for tokenizing the text of one program.
struct Tokenizer<'h> {
    characters: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    handler: &'h dyn Handler<error::Error>,
    tokens: Vec<Token>,
}

impl std::fmt::Debug for Tokenizer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tokenizer")
            .field("position", &self.position)
            .field("line", &self.line)
            .field("column", &self.column)
            .finish_non_exhaustive()
    }
}

impl<'h> Tokenizer<'h> {
    fn new(
        source: &str,
        first_line: usize,
        handler: &'h dyn Handler<error::Error>,
    ) -> Self {
        Self {
            characters: source.chars().collect(),
            position: 0,
            line: first_line,
            column: 1,
            handler,
            tokens: Vec::new(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.characters.get(self.position).copied()
    }

    fn peek_second(&self) -> Option<char> {
        self.characters.get(self.position + 1).copied()
    }

    /// Consumes one character, keeping the line and column up to date.
    fn bump(&mut self) -> Option<char> {
        let character = self.peek()?;
        self.position += 1;

        if character == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(character)
    }

    fn push(
        &mut self,
        category: Category,
        lexeme: String,
        line: usize,
        column: usize,
    ) {
        log::debug!(
            "lexer: {category:?} [ {} ] found at ({line}:{column})",
            lexeme.escape_debug()
        );

        self.tokens.push(Token { category, lexeme, line, column });
    }

    /// Consumes `length` characters and pushes them as one token.
    fn push_consumed(&mut self, category: Category, length: usize) {
        let (line, column) = (self.line, self.column);
        let lexeme = (0..length).filter_map(|_| self.bump()).collect();

        self.push(category, lexeme, line, column);
    }

    fn run(&mut self) {
        while let Some(character) = self.peek() {
            match character {
                '/' if self.peek_second() == Some('*') => self.comment(),
                '"' => self.string_literal(),
                'a'..='z' => self.word(),
                '0'..='9' => self.push_consumed(Category::Digit, 1),
                '{' => self.push_consumed(Category::LeftBrace, 1),
                '}' => self.push_consumed(Category::RightBrace, 1),
                '(' => self.push_consumed(Category::LeftParenthesis, 1),
                ')' => self.push_consumed(Category::RightParenthesis, 1),
                '+' => self.push_consumed(Category::Addition, 1),
                '$' => self.push_consumed(Category::EndOfProgram, 1),
                '=' if self.peek_second() == Some('=') => {
                    self.push_consumed(Category::Equal, 2);
                }
                '=' => self.push_consumed(Category::Assign, 1),
                '!' if self.peek_second() == Some('=') => {
                    self.push_consumed(Category::NotEqual, 2);
                }
                character if character.is_whitespace() => {
                    self.bump();
                }
                character => {
                    self.handler.receive(error::Error::UnrecognizedToken(
                        UnrecognizedToken {
                            lexeme: character.to_string(),
                            line: self.line,
                            column: self.column,
                        },
                    ));
                    self.push_consumed(Category::Error, 1);
                }
            }
        }

        let ends_with_marker = self
            .tokens
            .last()
            .is_some_and(|x| x.category == Category::EndOfProgram);

        if !ends_with_marker {
            self.handler.receive(error::Error::MissingTerminator(
                MissingTerminator {
                    terminator: Terminator::EndOfProgram,
                    line: self.line,
                },
            ));

            let (line, column) = (self.line, self.column);
            self.push(Category::EndOfProgram, "$".to_owned(), line, column);
        }
    }

    fn comment(&mut self) {
        let start_line = self.line;

        // `/*`
        self.bump();
        self.bump();

        loop {
            match (self.peek(), self.peek_second()) {
                (Some('*'), Some('/')) => {
                    self.bump();
                    self.bump();
                    return;
                }
                (Some(_), _) => {
                    self.bump();
                }
                (None, _) => {
                    self.handler.receive(error::Error::MissingTerminator(
                        MissingTerminator {
                            terminator: Terminator::Comment,
                            line: start_line,
                        },
                    ));
                    return;
                }
            }
        }
    }

    fn string_literal(&mut self) {
        let start_line = self.line;
        self.push_consumed(Category::Quote, 1);

        loop {
            match self.peek() {
                Some('"') => {
                    self.push_consumed(Category::Quote, 1);
                    return;
                }
                Some('a'..='z') => self.push_consumed(Category::Character, 1),
                Some(' ') => self.push_consumed(Category::Space, 1),
                Some(character) => {
                    self.handler.receive(error::Error::IllegalStringCharacter(
                        IllegalStringCharacter {
                            character,
                            line: self.line,
                            column: self.column,
                        },
                    ));
                    self.push_consumed(Category::Error, 1);
                }
                None => {
                    self.handler.receive(error::Error::MissingTerminator(
                        MissingTerminator {
                            terminator: Terminator::Quote,
                            line: start_line,
                        },
                    ));
                    return;
                }
            }
        }
    }

    /// Splits a run of lowercase letters into keywords (longest match first)
    /// and single-letter identifiers.
    fn word(&mut self) {
        let length = self.characters[self.position..]
            .iter()
            .take_while(|x| x.is_ascii_lowercase())
            .count();
        let end = self.position + length;

        while self.position < end {
            let rest = self.characters[self.position..end]
                .iter()
                .collect::<String>();

            let keyword = Keyword::iter()
                .filter(|keyword| rest.starts_with(keyword.as_str()))
                .max_by_key(|keyword| keyword.as_str().len());

            match keyword {
                Some(keyword) => self.push_consumed(
                    Category::Keyword(keyword),
                    keyword.as_str().len(),
                ),
                None => self.push_consumed(Category::Identifier, 1),
            }
        }
    }
}

#[cfg(test)]
mod test;
