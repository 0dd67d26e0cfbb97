#![allow(missing_docs)]

//! Compiles whole programs and runs their images on an emulator of the
//! target machine, checking what they print.

use proptest::{collection::vec, prop_assert_eq, proptest};
use sadc_codegen::{generator::Output, image::Image, instruction::Instruction};
use sadc_driver::Error;
use sadc_handler::Storage;

mod booleans;
mod hello_world;
mod if_statement;
mod mixed_string;
mod nested_loop;
mod shadowing;
mod string_comparison;
mod while_loop;

/// Runs are cut short after this many instructions.
const STEP_LIMIT: usize = 10_000;

fn compile(source: &str) -> Output {
    let storage = Storage::<Error>::new();
    let compilation = sadc_driver::compile(source, 1, &storage);

    let errors = storage
        .as_vec()
        .iter()
        .filter(|x| x.is_error())
        .cloned()
        .collect::<Vec<_>>();
    assert!(errors.is_empty(), "{errors:?}");

    compilation.output().clone().expect("the program should compile")
}

/// The registers and memory of the target machine.
struct Machine {
    memory: Vec<u8>,
    accumulator: u8,
    x: u8,
    y: u8,
    zero: bool,
    counter: usize,
    output: String,
}

impl Machine {
    fn new(image: &Image) -> Self {
        Self {
            memory: image.to_vec(),
            accumulator: 0,
            x: 0,
            y: 0,
            zero: false,
            counter: 0,
            output: String::new(),
        }
    }

    fn read(&self, address: u8) -> u8 { self.memory[usize::from(address)] }

    fn string_at(&self, address: u8) -> String {
        self.memory[usize::from(address)..]
            .iter()
            .take_while(|x| **x != 0)
            .map(|x| char::from(*x))
            .collect()
    }

    /// Executes one instruction, returning `false` on `BRK`.
    fn step(&mut self) -> bool {
        let instruction = Instruction::decode(&self.memory, self.counter)
            .expect("the machine should only execute code");
        let mut next = self.counter + instruction.len();

        match instruction {
            Instruction::LoadAccumulatorConstant(value) => {
                self.accumulator = value;
            }
            Instruction::LoadAccumulator(address) => {
                self.accumulator = self.read(address);
            }
            Instruction::StoreAccumulator(address) => {
                self.memory[usize::from(address)] = self.accumulator;
            }
            Instruction::AddWithCarry(address) => {
                self.accumulator =
                    self.accumulator.wrapping_add(self.read(address));
            }
            Instruction::LoadXConstant(value) => self.x = value,
            Instruction::LoadX(address) => self.x = self.read(address),
            Instruction::LoadYConstant(value) => self.y = value,
            Instruction::LoadY(address) => self.y = self.read(address),
            Instruction::CompareX(address) => {
                self.zero = self.x == self.read(address);
            }
            Instruction::BranchNotEqual(distance) => {
                if !self.zero {
                    next = (next + usize::from(distance)) % 256;
                }
            }
            Instruction::SystemCall => match self.x {
                1 => self.output.push_str(&self.y.to_string()),
                2 => {
                    let string = self.string_at(self.y);
                    self.output.push_str(&string);
                }
                x => panic!("unknown system call {x}"),
            },
            Instruction::Break => return false,
        }

        self.counter = next;
        true
    }
}

/// Runs the image until it halts and returns what it printed.
fn run(image: &Image) -> String {
    let mut machine = Machine::new(image);

    for _ in 0..STEP_LIMIT {
        if !machine.step() {
            return machine.output;
        }
    }

    panic!("the program didn't halt after {STEP_LIMIT} instructions");
}

fn compile_and_run(source: &str) -> String { run(compile(source).image()) }

proptest! {
    #[test]
    fn sums(digits in vec(0u8..10, 1..8)) {
        let expression = digits
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" + ");
        let source = format!("{{int a\na = {expression}\nprint(a)}}$");

        let sum = digits.iter().map(|x| u32::from(*x)).sum::<u32>();
        prop_assert_eq!(compile_and_run(&source), sum.to_string());
    }

    #[test]
    fn counting_loop(count in 0u8..10) {
        let source = format!(
            "{{int i\ni = 0\nwhile (i != {count}) {{print(i)\ni = 1 + i}}}}$"
        );

        let expected = (0..count).map(|x| x.to_string()).collect::<String>();
        prop_assert_eq!(compile_and_run(&source), expected);
    }
}
