//! Write-Back (WB) stage.

use crate::core::Cpu;

/// Writes `data` (loads) or `alu_res` (everything else) into `rd`,
/// provided `reg_write` is set and `rd != 0`.
pub fn wb_stage(cpu: &mut Cpu) {
    let r = cpu.mem_wb.read;
    if !r.ctrl.reg_write || r.rd == 0 {
        return;
    }
    let val = if r.ctrl.mem_to_reg { r.data } else { r.alu_res };
    cpu.regs.write(r.rd, val);

    if cpu.trace {
        eprintln!("WB  pc={:#x} x{}={:#x}", r.pc, r.rd, val);
    }
}
