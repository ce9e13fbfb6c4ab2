//! Instruction Decode / Register Read (ID) stage.

use crate::core::control;
use crate::core::pipeline::hazards::ForwardingUnit;
use crate::core::Cpu;
use crate::isa;

/// Decodes the instruction in the IF→ID read-view, reads its source
/// registers (skipping the register file where the EX→ID forwarding
/// selector says the latched value is already fresher), and writes
/// the ID→EX write-view.
///
/// Branch/jalr instructions get their target precomputed into the
/// latch's `pc` slot here: `base + (imm << 1)`, where `base` is the
/// source register for jalr (the only family whose target is
/// register-relative) and the instruction's own PC otherwise.
pub fn decode_stage(cpu: &mut Cpu, fwd: &ForwardingUnit) {
    let r = cpu.if_id.read;
    let mut w = r;

    let d = isa::decode(r.inst);
    w.rs1 = d.rs1;
    w.rs2 = d.rs2;
    w.rd = d.rd;
    w.imm = d.imm;
    w.ctrl = control::generate(&d);

    w.d1 = if fwd.ex_id & 0x2 != 0 {
        w.d1
    } else {
        cpu.regs.read(d.rs1)
    };
    w.d2 = if fwd.ex_id & 0x4 != 0 {
        w.d2
    } else {
        cpu.regs.read(d.rs2)
    };

    if w.ctrl.branch {
        let base = if d.compressed_opcode == 7 { w.d1 } else { w.pc };
        w.pc = base.wrapping_add((w.imm << 1) as u64);
    }

    if cpu.trace {
        eprintln!(
            "ID  pc={:#x} rs1=x{} rs2=x{} rd=x{} imm={}",
            r.pc, w.rs1, w.rs2, w.rd, w.imm
        );
    }

    cpu.id_ex.write = w;
}
