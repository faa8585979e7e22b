//! Reference machine.
//!
//! A small single-cycle host that implements every collaborator trait of the extension. It
//! performs:
//! 1. **Fetch:** Reads the word at the PC from the loaded program.
//! 2. **Decode:** Takes the first catalog descriptor whose fixed bits match.
//! 3. **Execute:** Dispatches the semantics and applies any requested control transfer.
//!
//! Branches resolve to `pc + 4 + (offset << 2)` and jumps to
//! `((pc + 4) & 0xF000_0000) | (target << 2)`. Execution halts when the PC leaves the
//! loaded program.

use thiserror::Error;
use tracing::debug;

use super::memory::DataMemory;
use crate::common::constants::WORD_BYTES;
use crate::common::error::{Fault, MemoryError};
use crate::common::reg::RegisterFile;
use crate::config::Config;
use crate::host::{ControlTransfer, Diagnostics, MemoryAccess, RegisterAccess};
use crate::isa::catalog::catalog;
use crate::isa::codec::decode;
use crate::isa::disasm::render;
use crate::isa::dispatch::dispatch;

/// Region bits preserved by a jump.
const JUMP_REGION_MASK: u32 = 0xF000_0000;

/// Error that stops the reference machine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SimError {
    /// No catalog descriptor matches the fetched word.
    #[error("illegal instruction {word:#010x} at pc {pc:#010x}")]
    IllegalInstruction {
        /// Address of the word.
        pc: u32,
        /// The unmatched encoding.
        word: u32,
    },

    /// An instruction raised a fault.
    #[error("fault at pc {pc:#010x}: {fault}")]
    Fault {
        /// Address of the faulting instruction.
        pc: u32,
        /// The fault raised by the semantics function.
        #[source]
        fault: Fault,
    },

    /// The run retired `max_steps` instructions without halting.
    #[error("step limit of {0} instructions reached")]
    StepLimit(u64),
}

/// Result of a single [`Machine::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// One instruction retired.
    Retired,
    /// The PC is outside the loaded program; nothing was executed.
    Halted,
}

/// Summary of a completed [`Machine::run`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Instructions retired during this run.
    pub retired: u64,
    /// PC at which execution halted.
    pub final_pc: u32,
}

/// Reference host machine.
#[derive(Clone, Debug)]
pub struct Machine {
    regs: RegisterFile,
    data: DataMemory,
    program: Vec<u32>,
    text_base: u32,
    pc: u32,
    next_pc: Option<u32>,
    output: Vec<String>,
    retired: u64,
    trace: bool,
    max_steps: u64,
}

impl Default for Machine {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Machine {
    /// Creates a machine with an empty program and zeroed state.
    pub fn new(config: &Config) -> Self {
        Self {
            regs: RegisterFile::new(),
            data: DataMemory::new(config.memory.data_base, config.memory.data_size),
            program: Vec::new(),
            text_base: config.memory.text_base,
            pc: config.memory.text_base,
            next_pc: None,
            output: Vec::new(),
            retired: 0,
            trace: config.general.trace,
            max_steps: config.general.max_steps,
        }
    }

    /// Loads `words` at the text base and resets the PC to it.
    pub fn load_program(&mut self, words: &[u32]) {
        self.program = words.to_vec();
        self.pc = self.text_base;
        self.next_pc = None;
    }

    /// Current program counter.
    pub const fn pc(&self) -> u32 {
        self.pc
    }

    /// Sets the program counter.
    pub const fn set_pc(&mut self, pc: u32) {
        self.pc = pc;
    }

    /// Reads register `idx`.
    pub const fn reg(&self, idx: usize) -> i32 {
        self.regs.read(idx)
    }

    /// Writes register `idx` (writes to `$zero` are ignored).
    pub const fn set_reg(&mut self, idx: usize, val: i32) {
        self.regs.write(idx, val);
    }

    /// The register file.
    pub const fn registers(&self) -> &RegisterFile {
        &self.regs
    }

    /// The data segment.
    pub const fn data(&self) -> &DataMemory {
        &self.data
    }

    /// Diagnostic lines emitted so far.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Removes and returns the diagnostic lines emitted so far.
    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }

    /// Total instructions retired since creation.
    pub const fn retired(&self) -> u64 {
        self.retired
    }

    /// Fetches the program word at `pc`, or `None` outside the program.
    fn fetch(&self, pc: u32) -> Option<u32> {
        let offset = pc.checked_sub(self.text_base)?;
        if offset % WORD_BYTES != 0 {
            return None;
        }
        self.program.get((offset / WORD_BYTES) as usize).copied()
    }

    /// Executes one instruction.
    ///
    /// # Errors
    ///
    /// [`SimError::IllegalInstruction`] if no descriptor matches the fetched word,
    /// [`SimError::Fault`] if the instruction faults. The PC is left on the offending
    /// instruction in both cases.
    pub fn step(&mut self) -> Result<StepOutcome, SimError> {
        let pc = self.pc;
        let Some(word) = self.fetch(pc) else {
            debug!(pc = format_args!("{pc:#010x}"), "pc left the program");
            return Ok(StepOutcome::Halted);
        };
        let descriptor = catalog()
            .find(word)
            .ok_or(SimError::IllegalInstruction { pc, word })?;
        let operands = decode(word, descriptor.format());

        if self.trace {
            debug!(
                pc = format_args!("{pc:#010x}"),
                word = format_args!("{word:#010x}"),
                "{}",
                render(descriptor, &operands)
            );
        }

        self.next_pc = None;
        dispatch(descriptor, &operands, self).map_err(|fault| SimError::Fault { pc, fault })?;
        self.pc = self
            .next_pc
            .take()
            .unwrap_or_else(|| pc.wrapping_add(WORD_BYTES));
        self.retired += 1;
        Ok(StepOutcome::Retired)
    }

    /// Runs until the PC leaves the program.
    ///
    /// # Errors
    ///
    /// Any error from [`step`](Self::step), or [`SimError::StepLimit`] once the configured
    /// number of instructions has retired and the PC still points into the program.
    pub fn run(&mut self) -> Result<RunSummary, SimError> {
        let start = self.retired;
        loop {
            if self.retired - start >= self.max_steps && self.fetch(self.pc).is_some() {
                return Err(SimError::StepLimit(self.max_steps));
            }
            if self.step()? == StepOutcome::Halted {
                let summary = RunSummary {
                    retired: self.retired - start,
                    final_pc: self.pc,
                };
                debug!(retired = summary.retired, "halted");
                return Ok(summary);
            }
        }
    }
}

impl RegisterAccess for Machine {
    fn get(&self, idx: usize) -> i32 {
        self.regs.read(idx)
    }

    fn set(&mut self, idx: usize, val: i32) {
        self.regs.write(idx, val);
    }
}

impl MemoryAccess for Machine {
    fn read_word(&mut self, addr: u32) -> Result<i32, MemoryError> {
        self.data.read(addr)
    }

    fn write_word(&mut self, addr: u32, val: i32) -> Result<(), MemoryError> {
        self.data.write(addr, val)
    }
}

impl ControlTransfer for Machine {
    fn branch_to(&mut self, offset: i32) {
        let target = self
            .pc
            .wrapping_add(WORD_BYTES)
            .wrapping_add((offset as u32) << 2);
        debug!(
            offset,
            target = format_args!("{target:#010x}"),
            "branch taken"
        );
        self.next_pc = Some(target);
    }

    fn jump_to(&mut self, target: u32) {
        let region = self.pc.wrapping_add(WORD_BYTES) & JUMP_REGION_MASK;
        let dest = region | (target << 2);
        debug!(target = format_args!("{dest:#010x}"), "jump");
        self.next_pc = Some(dest);
    }
}

impl Diagnostics for Machine {
    fn emit(&mut self, line: &str) {
        self.output.push(line.to_owned());
    }
}
