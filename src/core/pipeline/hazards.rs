//! Data-forwarding unit: four selectors recomputed once per cycle, plus
//! the two steps that apply them to the EX and ID latches.
//!
//! The selectors have no state of their own — they are a pure function
//! of the four latch read-views present at the moment they're
//! recomputed. Applying them is split into an *early* step (WB→EX,
//! MEM→EX, against the just-advanced EX read-view) and a *late* step
//! (EX→ID, MEM→ID, plus the link/branch-equality precompute, against
//! this cycle's not-yet-advanced ID write-view).

use crate::core::pipeline::latches::PipelineReg;

/// Bit forwarded to the d1 operand.
const D1: u8 = 0x2;
/// Bit forwarded to the d2 operand.
const D2: u8 = 0x4;

/// The four forwarding selectors, recomputed once per cycle.
#[derive(Clone, Copy, Debug, Default)]
pub struct ForwardingUnit {
    pub wb_ex: u8,
    pub mem_ex: u8,
    pub mem_id: u8,
    pub ex_id: u8,
}

fn select(writer_reg_write: bool, writer_rd: usize, rs1: usize, rs2: Option<usize>) -> u8 {
    if !writer_reg_write || writer_rd == 0 {
        return 0;
    }
    let mut bits = 0;
    if rs1 == writer_rd {
        bits |= D1;
    }
    if let Some(rs2) = rs2 {
        if rs2 == writer_rd {
            bits |= D2;
        }
    }
    bits
}

/// Recomputes all four selectors from the current latch read-views.
///
/// Called once per cycle against the latches as they stand *after*
/// that cycle's latch advance and branch resolution — i.e. against
/// next cycle's EX/MEM/WB occupants and this cycle's (just-fetched)
/// ID occupant.
pub fn compute(id_r: &PipelineReg, ex_r: &PipelineReg, mem_r: &PipelineReg, wb_r: &PipelineReg) -> ForwardingUnit {
    ForwardingUnit {
        wb_ex: select(wb_r.ctrl.reg_write, wb_r.rd, ex_r.rs1, Some(ex_r.rs2)),
        mem_ex: select(mem_r.ctrl.reg_write, mem_r.rd, ex_r.rs1, Some(ex_r.rs2)),
        mem_id: select(mem_r.ctrl.reg_write, mem_r.rd, id_r.rs1, None),
        ex_id: select(ex_r.ctrl.reg_write, ex_r.rd, id_r.rs1, Some(id_r.rs2)),
    }
}

/// Applies the WB→EX and MEM→EX paths to the EX read-view, MEM taking
/// priority over WB when both fire.
pub fn apply_early(ex_r: &mut PipelineReg, mem_r: &PipelineReg, wb_r: &PipelineReg, fwd: &ForwardingUnit) {
    if fwd.wb_ex & D1 != 0 {
        ex_r.d1 = wb_r.alu_res;
    }
    if fwd.wb_ex & D2 != 0 {
        ex_r.d2 = wb_r.alu_res;
    }
    if fwd.mem_ex & D1 != 0 {
        ex_r.d1 = mem_r.alu_res;
    }
    if fwd.mem_ex & D2 != 0 {
        ex_r.d2 = mem_r.alu_res;
    }
}

/// Applies the MEM→ID and EX→ID paths to the ID write-view (EX taking
/// priority over MEM), then resolves the link return-address override
/// or the pre-branch equality flag.
///
/// `id_r` supplies the PC used for the link return address: the ID
/// stage's own PC, latched before this cycle's decode ran.
pub fn apply_late(
    id_w: &mut PipelineReg,
    id_r: &PipelineReg,
    ex_w: &PipelineReg,
    mem_r: &PipelineReg,
    fwd: &ForwardingUnit,
) {
    if fwd.mem_id & D1 != 0 {
        id_w.d1 = mem_r.alu_res;
    }
    if fwd.ex_id & D1 != 0 {
        id_w.d1 = ex_w.alu_res;
    }
    if fwd.ex_id & D2 != 0 {
        id_w.d2 = ex_w.alu_res;
    }

    if id_w.ctrl.link {
        id_w.d1 = id_r.pc.wrapping_add(4);
        id_w.imm = 0;
    } else {
        id_w.alu_zero = id_w.d1 == id_w.d2;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::control::ControlSignals;

    fn reg(reg_write: bool, rd: usize) -> PipelineReg {
        PipelineReg {
            rd,
            ctrl: ControlSignals {
                reg_write,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn wb_ex_fires_on_matching_rs1() {
        let id_r = PipelineReg::default();
        let mut ex_r = PipelineReg {
            rs1: 5,
            rs2: 9,
            ..Default::default()
        };
        let mem_r = reg(false, 0);
        let wb_r = reg(true, 5);
        let fwd = compute(&id_r, &ex_r, &mem_r, &wb_r);
        assert_eq!(fwd.wb_ex, D1);
        apply_early(&mut ex_r, &mem_r, &wb_r, &fwd);
        assert_eq!(ex_r.d1, wb_r.alu_res);
    }

    #[test]
    fn mem_ex_overrides_wb_ex() {
        let id_r = PipelineReg::default();
        let mut ex_r = PipelineReg {
            rs1: 5,
            rs2: 0,
            ..Default::default()
        };
        let mem_r = PipelineReg {
            alu_res: 42,
            ..reg(true, 5)
        };
        let wb_r = PipelineReg {
            alu_res: 7,
            ..reg(true, 5)
        };
        let fwd = compute(&id_r, &ex_r, &mem_r, &wb_r);
        apply_early(&mut ex_r, &mem_r, &wb_r, &fwd);
        assert_eq!(ex_r.d1, 42);
    }

    #[test]
    fn writes_to_r0_never_forward() {
        let id_r = PipelineReg::default();
        let ex_r = PipelineReg {
            rs1: 0,
            rs2: 0,
            ..Default::default()
        };
        let mem_r = reg(true, 0);
        let wb_r = reg(true, 0);
        let fwd = compute(&id_r, &ex_r, &mem_r, &wb_r);
        assert_eq!(fwd.wb_ex, 0);
        assert_eq!(fwd.mem_ex, 0);
    }

    #[test]
    fn mem_id_targets_d1_only() {
        let id_r = PipelineReg {
            rs1: 3,
            rs2: 3,
            ..Default::default()
        };
        let ex_r = PipelineReg::default();
        let mem_r = reg(true, 3);
        let wb_r = reg(false, 0);
        let fwd = compute(&id_r, &ex_r, &mem_r, &wb_r);
        assert_eq!(fwd.mem_id, D1);
    }

    #[test]
    fn ex_id_overrides_mem_id_in_late_forwarding() {
        let id_r = PipelineReg {
            rs1: 4,
            rs2: 0,
            ..Default::default()
        };
        let mut id_w = PipelineReg::default();
        let ex_w = PipelineReg {
            alu_res: 100,
            ..Default::default()
        };
        let mem_r = PipelineReg {
            alu_res: 200,
            ..Default::default()
        };
        let fwd = ForwardingUnit {
            mem_id: D1,
            ex_id: D1,
            ..Default::default()
        };
        apply_late(&mut id_w, &id_r, &ex_w, &mem_r, &fwd);
        assert_eq!(id_w.d1, 100);
    }

    #[test]
    fn link_instruction_gets_return_address_and_zero_imm() {
        let id_r = PipelineReg {
            pc: 0x100,
            ..Default::default()
        };
        let mut id_w = PipelineReg {
            imm: 4,
            ctrl: ControlSignals {
                link: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let ex_w = PipelineReg::default();
        let mem_r = PipelineReg::default();
        apply_late(&mut id_w, &id_r, &ex_w, &mem_r, &ForwardingUnit::default());
        assert_eq!(id_w.d1, 0x104);
        assert_eq!(id_w.imm, 0);
    }

    #[test]
    fn non_link_precomputes_alu_zero_as_equality() {
        let id_r = PipelineReg::default();
        let mut id_w = PipelineReg {
            d1: 7,
            d2: 7,
            ..Default::default()
        };
        let ex_w = PipelineReg::default();
        let mem_r = PipelineReg::default();
        apply_late(&mut id_w, &id_r, &ex_w, &mem_r, &ForwardingUnit::default());
        assert!(id_w.alu_zero);
    }
}
