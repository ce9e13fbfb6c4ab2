//! Memory Access (MEM) stage.

use crate::common::error::SimError;
use crate::core::Cpu;

/// Stores `data` to `data_mem[alu_res]` on a write, or loads
/// `data_mem[alu_res]` into `data` on a read. `alu_res` is used
/// directly as a word index, not a byte address.
pub fn mem_stage(cpu: &mut Cpu) -> Result<(), SimError> {
    let r = cpu.ex_mem.read;
    let mut w = r;

    if r.ctrl.mem_write {
        cpu.write_data(r.alu_res, r.data)?;
    }
    if r.ctrl.mem_read {
        w.data = cpu.read_data(r.alu_res)?;
    }

    if cpu.trace && (r.ctrl.mem_write || r.ctrl.mem_read) {
        eprintln!(
            "MEM pc={:#x} addr={} write={} read={}",
            r.pc, r.alu_res, r.ctrl.mem_write, r.ctrl.mem_read
        );
    }

    cpu.mem_wb.write = w;
    Ok(())
}
