//! Contains the [`generate`] function, which turns an analyzed program into
//! an [`Image`].
//!
//! Code is generated in two passes. The first walks the abstract syntax tree
//! and emits instructions whose memory operands are placeholders: the
//! static variables live right after the code, so their addresses are unknown
//! until the last instruction is out. Every placeholder is recorded in a
//! relocation list together with the offset of its byte. The second pass
//! lays out memory and patches exactly those offsets.

use getset::Getters;
use sadc_semantic::{
    ast::{self, Ast, Label},
    symbol::{SymbolID, Table},
    ty::{self, Reduction, Type},
};
use sadc_syntax::tree::NodeID;

use crate::{
    heap::Heap,
    image::Image,
    instruction::Instruction,
    table::{JumpID, JumpTable, SlotID, VariableTable},
    Error, MEMORY_SIZE,
};

/// The result of generating the code of one program.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Output {
    /// The memory the machine starts with.
    #[get = "pub"]
    image: Image,

    /// Where every variable and temporary ended up.
    #[get = "pub"]
    variables: VariableTable,

    /// The distance of every branch.
    #[get = "pub"]
    jumps: JumpTable,
}

/// Generates the image of an analyzed program.
///
/// # Errors
///
/// Returns [`Error::OutOfMemory`] if the code, the static variables and the
/// string literals don't fit in memory together.
///
/// # Panics
///
/// Panics if the program didn't pass the semantic analysis, e.g. it uses an
/// undeclared variable.
pub fn generate(ast: &Ast, table: &Table) -> Result<Output, Error> {
    let mut generator = Generator {
        ast,
        table,
        code: Vec::new(),
        relocations: Vec::new(),
        variables: VariableTable::new(),
        jumps: JumpTable::new(),
        heap: Heap::new(),
        scratch: None,
    };

    let block = ast
        .children(ast.root())
        .first()
        .copied()
        .expect("a program consists of one block");

    generator.statement(block)?;
    generator.finish()
}

/// What the byte at a relocated offset stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reference {
    Variable(SlotID),
    Jump(JumpID),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Relocation {
    offset: usize,
    reference: Reference,
}

struct Generator<'a> {
    ast: &'a Ast,
    table: &'a Table,
    code: Vec<u8>,
    relocations: Vec<Relocation>,
    variables: VariableTable,
    jumps: JumpTable,
    heap: Heap,

    /// The temporary holding the right operand of an addition.
    scratch: Option<SlotID>,
}

impl Generator<'_> {
    fn emit(&mut self, instruction: Instruction) {
        instruction.encode(&mut self.code);
    }

    /// Emits an instruction whose operand is the address of `slot`.
    fn emit_absolute(
        &mut self,
        instruction: fn(u8) -> Instruction,
        slot: SlotID,
    ) {
        self.relocate(Reference::Variable(slot));
        self.emit(instruction(0));
    }

    fn emit_branch(&mut self, jump: JumpID) {
        self.relocate(Reference::Jump(jump));
        self.emit(Instruction::BranchNotEqual(0));
    }

    /// Records that the operand of the next instruction is a placeholder.
    fn relocate(&mut self, reference: Reference) {
        self.relocations
            .push(Relocation { offset: self.code.len() + 1, reference });
    }

    fn required_memory(&self) -> usize {
        self.code.len() + self.variables.len() + self.heap.len()
    }

    fn intern(&mut self, literal: &str) -> u8 {
        u8::try_from(self.heap.intern(literal))
            .expect("heap addresses are below the top of memory")
    }

    fn slot(&self, symbol: Option<SymbolID>) -> SlotID {
        symbol
            .and_then(|x| self.variables.slot_of(x))
            .expect("variables are declared before being used")
    }

    fn scratch(&mut self) -> SlotID {
        let variables = &mut self.variables;
        *self.scratch.get_or_insert_with(|| variables.temporary())
    }

    fn resolve(&mut self, jump: JumpID, distance: usize) -> Result<(), Error> {
        let required = self.required_memory();
        let distance = u8::try_from(distance)
            .map_err(|_| Error::OutOfMemory { required })?;

        log::trace!(
            "codegen: {} resolved to {distance}",
            self.jumps.get(jump).placeholder()
        );
        self.jumps.resolve(jump, distance);

        Ok(())
    }

    fn statement(&mut self, node: NodeID<Label>) -> Result<(), Error> {
        let ast = self.ast;
        let children = ast.children(node);

        match ast.label(node) {
            Label::Block { .. } => {
                for child in children {
                    self.statement(*child)?;
                }
            }
            Label::VarDecl => self.declaration(children[1]),
            Label::AssignStatement => {
                self.assignment(children[0], children[1]);
            }
            Label::PrintStatement => self.print(children[0]),
            Label::IfStatement => {
                self.if_statement(children[0], children[1])?;
            }
            Label::WhileStatement => {
                self.while_statement(children[0], children[1])?;
            }
            label => unreachable!("{label} is not a statement"),
        }

        Ok(())
    }

    fn declaration(&mut self, identifier: NodeID<Label>) {
        let Label::Identifier { symbol: Some(symbol), .. } =
            self.ast.label(identifier)
        else {
            unreachable!("a declaration always names its variable")
        };

        let item = self.table.symbol(*symbol);
        let slot = self.variables.declare(*symbol, item.name(), item.depth());

        self.emit(Instruction::LoadAccumulatorConstant(0));
        self.emit_absolute(Instruction::StoreAccumulator, slot);
    }

    fn assignment(&mut self, target: NodeID<Label>, value: NodeID<Label>) {
        let ast = self.ast;
        let Label::Identifier { symbol, .. } = ast.label(target) else {
            unreachable!("only variables can be assigned")
        };
        let slot = self.slot(*symbol);

        if ty::reduce(ast, value, self.table) == Reduction::Mixed {
            let address = self.intern(&ast::source_text(ast, value));
            self.emit(Instruction::LoadAccumulatorConstant(address));
        } else {
            self.load(value);
        }

        self.emit_absolute(Instruction::StoreAccumulator, slot);
    }

    fn print(&mut self, argument: NodeID<Label>) {
        let ast = self.ast;

        match ty::reduce(ast, argument, self.table) {
            Reduction::Homogeneous(Type::Int) => {
                let value = self.operand(argument);
                self.emit_absolute(Instruction::LoadY, value);
                self.emit(Instruction::LoadXConstant(1));
            }
            Reduction::Homogeneous(Type::String) => {
                let value = self.operand(argument);
                self.emit_absolute(Instruction::LoadY, value);
                self.emit(Instruction::LoadXConstant(2));
            }
            Reduction::Homogeneous(Type::Boolean) => {
                let flag = self.operand(argument);
                let pointer = self.variables.temporary();
                let false_address = self.intern("false");
                let true_address = self.intern("true");

                self.emit(Instruction::LoadAccumulatorConstant(false_address));
                self.emit_absolute(Instruction::StoreAccumulator, pointer);
                self.emit(Instruction::LoadXConstant(1));
                self.emit_absolute(Instruction::CompareX, flag);
                self.emit(Instruction::BranchNotEqual(5));
                self.emit(Instruction::LoadAccumulatorConstant(true_address));
                self.emit_absolute(Instruction::StoreAccumulator, pointer);
                self.emit_absolute(Instruction::LoadY, pointer);
                self.emit(Instruction::LoadXConstant(2));
            }
            Reduction::Mixed => {
                let address = self.intern(&ast::source_text(ast, argument));
                self.emit(Instruction::LoadYConstant(address));
                self.emit(Instruction::LoadXConstant(2));
            }
            Reduction::Unknown => {
                unreachable!("the argument of print always has a type")
            }
        }

        self.emit(Instruction::SystemCall);
    }

    fn if_statement(
        &mut self,
        condition: NodeID<Label>,
        block: NodeID<Label>,
    ) -> Result<(), Error> {
        log::debug!("codegen: if_statement()");

        let flag = self.operand(condition);
        let skip = self.jumps.add();

        self.emit(Instruction::LoadXConstant(1));
        self.emit_absolute(Instruction::CompareX, flag);
        self.emit_branch(skip);

        let start = self.code.len();
        self.statement(block)?;

        self.resolve(skip, self.code.len() - start)
    }

    fn while_statement(
        &mut self,
        condition: NodeID<Label>,
        block: NodeID<Label>,
    ) -> Result<(), Error> {
        log::debug!("codegen: while_statement()");

        let test = self.code.len();
        let flag = self.operand(condition);
        let exit = self.jumps.add();

        self.emit(Instruction::LoadXConstant(1));
        self.emit_absolute(Instruction::CompareX, flag);
        self.emit_branch(exit);

        let body = self.code.len();
        self.statement(block)?;

        // unconditional: 1 is never equal to the guard
        let guard = self.variables.temporary();
        let back = self.jumps.add();

        self.emit(Instruction::LoadAccumulatorConstant(0));
        self.emit_absolute(Instruction::StoreAccumulator, guard);
        self.emit(Instruction::LoadXConstant(1));
        self.emit_absolute(Instruction::CompareX, guard);
        self.emit_branch(back);

        let end = self.code.len();
        let loop_length = end - test;
        if loop_length >= MEMORY_SIZE {
            let required = self.required_memory();
            return Err(Error::OutOfMemory { required });
        }

        self.resolve(exit, end - body)?;
        self.resolve(back, MEMORY_SIZE - loop_length)
    }

    /// Gets a slot holding the value of the expression, materializing it into
    /// a fresh temporary unless it is a variable already.
    fn operand(&mut self, node: NodeID<Label>) -> SlotID {
        match self.ast.label(node) {
            Label::Identifier { symbol, .. } => self.slot(*symbol),
            Label::Equal | Label::NotEqual => self.comparison(node),
            _ => {
                self.load(node);

                let temporary = self.variables.temporary();
                self.emit_absolute(Instruction::StoreAccumulator, temporary);

                temporary
            }
        }
    }

    /// Materializes the 0/1 result of a comparison into a fresh temporary.
    fn comparison(&mut self, node: NodeID<Label>) -> SlotID {
        let ast = self.ast;
        let children = ast.children(node);
        let initial = u8::from(*ast.label(node) == Label::NotEqual);

        let lhs = self.operand(children[0]);
        let rhs = self.operand(children[1]);
        let flag = self.variables.temporary();

        self.emit(Instruction::LoadAccumulatorConstant(initial));
        self.emit_absolute(Instruction::StoreAccumulator, flag);
        self.emit_absolute(Instruction::LoadX, lhs);
        self.emit_absolute(Instruction::CompareX, rhs);
        self.emit(Instruction::BranchNotEqual(5));
        self.emit(Instruction::LoadAccumulatorConstant(1 - initial));
        self.emit_absolute(Instruction::StoreAccumulator, flag);

        flag
    }

    /// Materializes the value of the expression into the accumulator.
    fn load(&mut self, node: NodeID<Label>) {
        let ast = self.ast;

        match ast.label(node) {
            Label::Digit(digit) => {
                self.emit(Instruction::LoadAccumulatorConstant(*digit));
            }
            Label::Boolean(boolean) => {
                self.emit(Instruction::LoadAccumulatorConstant(u8::from(
                    *boolean,
                )));
            }
            Label::StringLiteral(string) => {
                let address = self.intern(string);
                self.emit(Instruction::LoadAccumulatorConstant(address));
            }
            Label::Identifier { symbol, .. } => {
                let slot = self.slot(*symbol);
                self.emit_absolute(Instruction::LoadAccumulator, slot);
            }
            Label::Addition => {
                let children = ast.children(node);

                self.load(children[1]);
                let scratch = self.scratch();
                self.emit_absolute(Instruction::StoreAccumulator, scratch);

                self.load(children[0]);
                self.emit_absolute(Instruction::AddWithCarry, scratch);
            }
            Label::Equal | Label::NotEqual => {
                let flag = self.comparison(node);
                self.emit_absolute(Instruction::LoadAccumulator, flag);
            }
            label => unreachable!("{label} is not an expression"),
        }
    }

    fn finish(mut self) -> Result<Output, Error> {
        self.emit(Instruction::Break);

        let required = self.required_memory();
        if required > MEMORY_SIZE {
            log::info!("codegen: {required} bytes don't fit in memory");
            return Err(Error::OutOfMemory { required });
        }

        self.variables
            .assign_addresses(self.code.len())
            .ok_or(Error::OutOfMemory { required })?;

        for relocation in &self.relocations {
            let value = match relocation.reference {
                Reference::Variable(slot) => self.variables.get(slot).address(),
                Reference::Jump(jump) => self.jumps.get(jump).distance(),
            };

            self.code[relocation.offset] =
                value.expect("every placeholder is resolved after the layout");
        }

        log::info!(
            "codegen: {} bytes of code, {} of variables, {} of heap",
            self.code.len(),
            self.variables.len(),
            self.heap.len()
        );

        Ok(Output {
            image: Image::new(&self.code, self.heap.bytes()),
            variables: self.variables,
            jumps: self.jumps,
        })
    }
}
