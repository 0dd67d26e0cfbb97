//! Contains the two address-resolution ledgers of the code generator: the
//! [`VariableTable`] and the [`JumpTable`].
//!
//! Both hand out placeholders while the code is being emitted and learn the
//! real values afterwards, once the layout of the image is known.

use std::{collections::HashMap, fmt::Display};

use getset::{CopyGetters, Getters};
use itertools::Itertools;
use sadc_arena::{Arena, ID};
use sadc_semantic::symbol::SymbolID;

/// The identifier of a [`Slot`] within its [`VariableTable`].
pub type SlotID = ID<Slot>;

/// The identifier of a [`Jump`] within its [`JumpTable`].
pub type JumpID = ID<Jump>;

/// Where the value held by a [`Slot`] comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Source {
    /// A variable of the program.
    Variable {
        /// The name of the variable.
        name: char,

        /// The nesting level of the scope the variable is declared in.
        depth: usize,

        /// The declaration the slot belongs to.
        symbol: SymbolID,
    },

    /// A value the compiler needs to keep in memory for a moment, e.g. the
    /// flag of a comparison.
    Temporary,
}

/// One byte of static memory.
#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct Slot {
    /// The name the slot goes by until it has an address, `T<n>XX`.
    #[get = "pub"]
    placeholder: String,

    /// What the slot holds.
    #[get_copy = "pub"]
    source: Source,

    /// The address of the slot, once the layout is known.
    #[get_copy = "pub"]
    address: Option<u8>,
}

/// The static memory of a program: one [`Slot`] per declared variable and per
/// temporary, in allocation order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VariableTable {
    slots: Arena<Slot>,
    by_symbol: HashMap<SymbolID, SlotID>,
}

impl VariableTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    fn allocate(&mut self, source: Source) -> SlotID {
        let placeholder = format!("T{}XX", self.slots.len());
        log::trace!("codegen: allocating {placeholder} for {source:?}");

        self.slots.insert(Slot { placeholder, source, address: None })
    }

    /// Allocates the slot of a declared variable.
    ///
    /// Declaring the same symbol again returns the slot it already has: a
    /// declaration inside of a loop body is emitted once but runs many times.
    pub fn declare(
        &mut self,
        symbol: SymbolID,
        name: char,
        depth: usize,
    ) -> SlotID {
        if let Some(slot) = self.by_symbol.get(&symbol) {
            return *slot;
        }

        let slot = self.allocate(Source::Variable { name, depth, symbol });
        self.by_symbol.insert(symbol, slot);

        slot
    }

    /// Allocates a fresh slot for a temporary.
    pub fn temporary(&mut self) -> SlotID { self.allocate(Source::Temporary) }

    /// Gets the slot of a declared variable.
    #[must_use]
    pub fn slot_of(&self, symbol: SymbolID) -> Option<SlotID> {
        self.by_symbol.get(&symbol).copied()
    }

    /// Gets the slot with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID doesn't belong to this table.
    #[must_use]
    pub fn get(&self, id: SlotID) -> &Slot { &self.slots[id] }

    /// Gets the number of slots, which is also the number of bytes of static
    /// memory the program needs.
    #[must_use]
    pub fn len(&self) -> usize { self.slots.len() }

    /// Checks whether the program needs no static memory.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.slots.is_empty() }

    /// Iterates the slots in allocation order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (SlotID, &Slot)> {
        self.slots.iter()
    }

    /// Gives every slot its address, sequentially from `start`.
    ///
    /// Returns [`None`] if the slots don't fit below address 256.
    pub(crate) fn assign_addresses(&mut self, start: usize) -> Option<()> {
        for (index, (_, slot)) in self.slots.iter_mut().enumerate() {
            slot.address = Some(u8::try_from(start + index).ok()?);
        }

        Some(())
    }
}

impl Display for VariableTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:<5} | {:<5} | {:<5} | Address", "Temp", "Var", "Scope")?;
        write!(f, "---------------------------------")?;

        for slot in self.slots.items() {
            let (name, depth) = match slot.source {
                Source::Variable { name, depth, .. } => {
                    (name.to_string(), depth.to_string())
                }
                Source::Temporary => ("-".to_owned(), "-".to_owned()),
            };
            let address = slot
                .address
                .map_or_else(|| "??".to_owned(), |x| format!("{x:02X}"));

            write!(
                f,
                "\n{:<5} | {name:<5} | {depth:<5} | {address}",
                slot.placeholder
            )?;
        }

        Ok(())
    }
}

/// A forward or backward branch.
#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct Jump {
    /// The name the jump goes by until it is resolved, `J<n>`.
    #[get = "pub"]
    placeholder: String,

    /// The operand of the branch instruction, once it is known.
    #[get_copy = "pub"]
    distance: Option<u8>,
}

/// The branches of a program, in the order they were emitted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JumpTable {
    jumps: Arena<Jump>,
}

impl JumpTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Adds a jump whose distance is not known yet.
    pub fn add(&mut self) -> JumpID {
        let placeholder = format!("J{}", self.jumps.len());

        self.jumps.insert(Jump { placeholder, distance: None })
    }

    /// Sets the operand of the branch instruction of the given jump.
    ///
    /// # Panics
    ///
    /// Panics if the ID doesn't belong to this table.
    pub fn resolve(&mut self, id: JumpID, distance: u8) {
        self.jumps[id].distance = Some(distance);
    }

    /// Gets the jump with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID doesn't belong to this table.
    #[must_use]
    pub fn get(&self, id: JumpID) -> &Jump { &self.jumps[id] }

    /// Iterates the jumps in emission order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (JumpID, &Jump)> {
        self.jumps.iter()
    }
}

impl Display for JumpTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:<5} | Dist", "Temp")?;
        write!(f, "--------------")?;

        let rows = self
            .jumps
            .items()
            .map(|x| {
                let distance = x
                    .distance
                    .map_or_else(|| "??".to_owned(), |x| x.to_string());

                format!("{:<5} | {distance}", x.placeholder)
            })
            .join("\n");

        if !rows.is_empty() {
            write!(f, "\n{rows}")?;
        }

        Ok(())
    }
}
