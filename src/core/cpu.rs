//! Machine state and the per-cycle stepping loop.

use crate::common::error::{SimError, MEM_CAPACITY};
use crate::common::reg::RegisterFile;
use crate::core::pipeline::hazards::{self, ForwardingUnit};
use crate::core::pipeline::stages::{decode_stage, execute_stage, fetch_stage, mem_stage, wb_stage};
use crate::core::pipeline::Latch;

/// Register x9; the termination condition is `regs[9] == 10`.
const TERMINATION_REG: usize = 9;
const TERMINATION_VALUE: u64 = 10;

/// The whole simulated machine: architectural state, the four
/// inter-stage latches, and the forwarding selectors that outlive a
/// single cycle.
pub struct Cpu {
    pub regs: RegisterFile,
    pub pc: u64,
    pub cycles: i64,
    pub exit_pc: u64,

    inst_mem: Vec<u32>,
    data_mem: Vec<u64>,

    pub if_id: Latch,
    pub id_ex: Latch,
    pub ex_mem: Latch,
    pub mem_wb: Latch,

    fwd: ForwardingUnit,

    pub trace: bool,
}

impl Cpu {
    pub fn new() -> Self {
        Self {
            regs: RegisterFile::new(),
            pc: 0,
            cycles: 0,
            exit_pc: 0,
            inst_mem: vec![0; MEM_CAPACITY],
            data_mem: vec![0; MEM_CAPACITY],
            if_id: Latch::new(),
            id_ex: Latch::new(),
            ex_mem: Latch::new(),
            mem_wb: Latch::new(),
            fwd: ForwardingUnit::default(),
            trace: false,
        }
    }

    /// Loads `words` into the front of instruction memory. The
    /// remainder stays zero-initialized.
    pub fn load_instructions(&mut self, words: &[u32]) {
        self.inst_mem[..words.len()].copy_from_slice(words);
    }

    pub(crate) fn fetch_instruction(&self, index: u64) -> Result<u32, SimError> {
        if index as usize >= MEM_CAPACITY {
            return Err(SimError::InstructionAddressOutOfRange {
                pc: self.pc,
                index,
            });
        }
        Ok(self.inst_mem[index as usize])
    }

    pub(crate) fn read_data(&self, index: u64) -> Result<u64, SimError> {
        self.data_mem
            .get(index as usize)
            .copied()
            .ok_or(SimError::DataAddressOutOfRange { index, pc: self.pc })
    }

    pub(crate) fn write_data(&mut self, index: u64, value: u64) -> Result<(), SimError> {
        let pc = self.pc;
        self.data_mem
            .get_mut(index as usize)
            .map(|slot| *slot = value)
            .ok_or(SimError::DataAddressOutOfRange { index, pc })
    }

    /// Runs one full clock cycle: WB, IF, ID, EX, MEM, then the
    /// end-of-cycle forwarding/latch-advance/branch-resolution barrier.
    ///
    /// WB precedes IF/ID so a register write from the oldest in-flight
    /// instruction is visible to this cycle's decode.
    pub fn tick(&mut self) -> Result<(), SimError> {
        wb_stage(self);
        fetch_stage(self)?;
        let fwd = self.fwd;
        decode_stage(self, &fwd);
        execute_stage(self);
        mem_stage(self)?;

        self.cycle_end();
        self.cycles += 1;
        Ok(())
    }

    fn cycle_end(&mut self) {
        // Late forwarding: EX→ID / MEM→ID against this cycle's
        // not-yet-advanced ID write-view, plus the link/branch-equality
        // precompute.
        let id_r = self.if_id.read;
        let ex_w = self.ex_mem.write;
        let mem_r = self.ex_mem.read;
        hazards::apply_late(&mut self.id_ex.write, &id_r, &ex_w, &mem_r, &self.fwd);

        self.if_id.advance();
        self.id_ex.advance();
        self.ex_mem.advance();
        self.mem_wb.advance();

        let ex_r = self.id_ex.read;
        if (ex_r.alu_zero || ex_r.ctrl.link) && ex_r.ctrl.branch {
            self.pc = ex_r.pc;
            self.if_id.squash_read();
        } else {
            self.pc = self.pc.wrapping_add(4);
        }

        // Early forwarding: recompute selectors from the just-advanced
        // latches and apply WB→EX / MEM→EX immediately so next cycle's
        // EX stage sees fresh operands.
        let id_r = self.if_id.read;
        let ex_r = self.id_ex.read;
        let mem_r = self.ex_mem.read;
        let wb_r = self.mem_wb.read;
        self.fwd = hazards::compute(&id_r, &ex_r, &mem_r, &wb_r);
        let fwd = self.fwd;
        hazards::apply_early(&mut self.id_ex.read, &mem_r, &wb_r, &fwd);

        self.exit_pc = self.mem_wb.read.pc;
    }

    /// Has the simulation reached its termination condition (x9 == 10)?
    pub fn terminated(&self) -> bool {
        self.regs.read(TERMINATION_REG) == TERMINATION_VALUE
    }

    /// Runs cycles until termination or `max_cycles` is reached.
    /// Returns `true` if the program terminated, `false` if the cycle
    /// ceiling was hit first.
    pub fn run(&mut self, max_cycles: u64) -> Result<bool, SimError> {
        while (self.cycles as u64) < max_cycles {
            self.tick()?;
            if self.terminated() {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}
