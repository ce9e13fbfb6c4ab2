//! Execute (EX) stage.

use crate::core::alu;
use crate::core::Cpu;

/// Runs the ALU against the (already forwarded) ID→EX read-view and
/// writes the EX→MEM write-view. `d2` is also propagated into `data`
/// unconditionally, ready for a subsequent store.
pub fn execute_stage(cpu: &mut Cpu) {
    let r = cpu.id_ex.read;
    let mut w = r;

    let ctrl_code = alu::alu_control(&r.ctrl, r.inst_funct3(), r.inst_funct7());
    let b = if r.ctrl.alu_src { r.imm as u64 } else { r.d2 };
    let res = alu::execute(ctrl_code, r.d1, b);

    w.data = r.d2;
    w.alu_res = res;
    w.alu_zero = res == 0;

    if cpu.trace {
        eprintln!("EX  pc={:#x} alu_res={:#x}", r.pc, w.alu_res);
    }

    cpu.ex_mem.write = w;
}
