//! Instruction Fetch (IF) stage.

use crate::common::error::SimError;
use crate::core::pipeline::latches::PipelineReg;
use crate::core::Cpu;

/// Reads the 32-bit word at `inst_mem[pc/4]` and writes the IF→ID
/// write-view carrying it and the current PC. PC advancement itself
/// happens in `cycle_end`, not here.
pub fn fetch_stage(cpu: &mut Cpu) -> Result<(), SimError> {
    let index = cpu.pc / 4;
    let inst = cpu.fetch_instruction(index)?;

    cpu.if_id.write = PipelineReg {
        inst,
        pc: cpu.pc,
        ..Default::default()
    };

    if cpu.trace {
        eprintln!("IF  pc={:#x} inst={:#010x}", cpu.pc, inst);
    }
    Ok(())
}
