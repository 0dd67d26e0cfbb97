//! Contains the symbol [`Table`]: the tree of scopes of a program and the
//! variables declared in them.

use std::{collections::HashMap, fmt::Display};

use getset::{CopyGetters, Getters};
use itertools::Itertools;
use sadc_arena::{Arena, ID};

use crate::ty::Type;

/// The identifier of a [`Scope`] within its [`Table`].
pub type ScopeID = ID<Scope>;

/// The identifier of a [`Symbol`] within its [`Table`].
pub type SymbolID = ID<Symbol>;

/// A lexical scope, opened by a block.
#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct Scope {
    /// The enclosing scope, [`None`] for the outermost block.
    #[get_copy = "pub"]
    parent: Option<ScopeID>,

    /// The nesting level of the block, starting at zero.
    #[get_copy = "pub"]
    depth: usize,

    declarations: HashMap<char, SymbolID>,

    /// The variables declared directly in this scope, in declaration order.
    #[get = "pub"]
    symbols: Vec<SymbolID>,
}

/// A declared variable.
#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct Symbol {
    /// The name of the variable.
    #[get_copy = "pub"]
    name: char,

    /// The type the variable was declared with.
    #[get_copy = "pub"]
    ty: Type,

    /// The source text of the last value assigned to the variable.
    #[get = "pub"]
    value: Option<String>,

    /// The scope the variable was declared in.
    #[get_copy = "pub"]
    scope: ScopeID,

    /// The nesting level of [`Self::scope`].
    #[get_copy = "pub"]
    depth: usize,

    /// The line of the declaration.
    #[get_copy = "pub"]
    line: usize,

    /// Whether the variable has been read anywhere.
    #[get_copy = "pub"]
    used: bool,
}

impl Symbol {
    /// Records a new value assigned to the variable.
    pub fn assign(&mut self, value: String) { self.value = Some(value); }

    /// Records that the variable has been read.
    pub fn mark_used(&mut self) { self.used = true; }
}

/// The scopes and variables of one program.
///
/// Entries are only ever added: leaving a scope doesn't remove its variables,
/// so the table describes the whole program once the analysis is done.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    scopes: Arena<Scope>,
    symbols: Arena<Symbol>,
}

impl Table {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Opens a new scope nested in `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` doesn't belong to this table.
    pub fn new_scope(&mut self, parent: Option<ScopeID>) -> ScopeID {
        let depth = parent.map_or(0, |x| self.scopes[x].depth + 1);

        self.scopes.insert(Scope {
            parent,
            depth,
            declarations: HashMap::new(),
            symbols: Vec::new(),
        })
    }

    /// Declares a variable in the given scope.
    ///
    /// # Errors
    ///
    /// Returns the ID of the previous declaration if the scope already
    /// declares a variable of the same name. Declarations in enclosing scopes
    /// don't count: the new variable shadows them.
    ///
    /// # Panics
    ///
    /// Panics if `scope` doesn't belong to this table.
    pub fn declare(
        &mut self,
        scope: ScopeID,
        name: char,
        ty: Type,
        line: usize,
    ) -> Result<SymbolID, SymbolID> {
        if let Some(existing) = self.scopes[scope].declarations.get(&name) {
            return Err(*existing);
        }

        let depth = self.scopes[scope].depth;
        let id = self.symbols.insert(Symbol {
            name,
            ty,
            value: None,
            scope,
            depth,
            line,
            used: false,
        });

        let scope = &mut self.scopes[scope];
        scope.declarations.insert(name, id);
        scope.symbols.push(id);

        Ok(id)
    }

    /// Finds the nearest declaration of `name` visible from `scope`, walking
    /// the enclosing scopes outwards.
    #[must_use]
    pub fn lookup(&self, scope: ScopeID, name: char) -> Option<SymbolID> {
        std::iter::successors(Some(scope), |x| self.scopes.get(*x)?.parent)
            .find_map(|x| {
                self.scopes.get(x)?.declarations.get(&name).copied()
            })
    }

    /// Gets the scope with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID doesn't belong to this table.
    #[must_use]
    pub fn scope(&self, id: ScopeID) -> &Scope { &self.scopes[id] }

    /// Gets the symbol with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID doesn't belong to this table.
    #[must_use]
    pub fn symbol(&self, id: SymbolID) -> &Symbol { &self.symbols[id] }

    /// Gets the symbol with the given ID mutably.
    ///
    /// # Panics
    ///
    /// Panics if the ID doesn't belong to this table.
    pub fn symbol_mut(&mut self, id: SymbolID) -> &mut Symbol {
        &mut self.symbols[id]
    }

    /// Iterates every declared variable in declaration order.
    pub fn symbols(
        &self,
    ) -> impl ExactSizeIterator<Item = (SymbolID, &Symbol)> {
        self.symbols.iter()
    }

    /// Iterates every scope in the order they were opened.
    pub fn scopes(&self) -> impl ExactSizeIterator<Item = (ScopeID, &Scope)> {
        self.scopes.iter()
    }
}

const BAR: &str = "-----------------------------";

fn row(cells: [String; 4]) -> String {
    cells.iter().map(|x| format!("{x:<6}")).join("| ").trim_end().to_owned()
}

impl Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{BAR}")?;
        writeln!(
            f,
            "{}",
            row(["Name", "Type", "Scope", "Line"].map(str::to_owned))
        )?;
        write!(f, "{BAR}")?;

        let rows = self
            .symbols
            .items()
            .map(|x| {
                row([
                    x.name.to_string(),
                    x.ty.to_string(),
                    x.depth.to_string(),
                    x.line.to_string(),
                ])
            })
            .join("\n");

        if !rows.is_empty() {
            write!(f, "\n{rows}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test;
