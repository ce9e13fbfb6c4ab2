//! Arithmetic Logic Unit.
//!
//! Implements the four integer operations this simulator's Non-goals
//! allow: bitwise AND/OR and integer ADD/SUB. Everything else (shifts,
//! compares, multiply/divide) is out of scope by design (see
//! rather than missing by oversight.

use crate::core::control::ControlSignals;

/// One of the four ALU control codes the EX stage can select.
///
/// The numeric values in parens are the control codes this datapath
/// names them by (`0` AND, `1` OR, `2` ADD, `6` SUB); the stage logic
/// only ever needs the enum, but tests and trace output reference the
/// numbering, so it's kept close at hand via `code()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluCtrl {
    And,
    Or,
    Add,
    Sub,
}

impl AluCtrl {
    pub fn code(self) -> u8 {
        match self {
            AluCtrl::And => 0,
            AluCtrl::Or => 1,
            AluCtrl::Add => 2,
            AluCtrl::Sub => 6,
        }
    }
}

/// Derives the ALU control code from `alu_op`, funct3, and funct7 bit 30.
///
/// `funct7` is only consulted when `ctrl.funct7` says bit 30 is
/// meaningful for this instruction (set for the R-type family and for
/// op-imm shift-like funct3 values; see `control::generate`) — this
/// keeps stray immediate bits from masquerading as a SUB selector on
/// I-type instructions, matching the original's masking behavior.
pub fn alu_control(ctrl: &ControlSignals, funct3: u32, funct7: u32) -> AluCtrl {
    match ctrl.alu_op {
        0 => AluCtrl::Add,
        1 => AluCtrl::Sub,
        2 => match funct3 {
            0 => {
                let sub = ctrl.funct7 && ((funct7 >> 5) & 1) == 1;
                if sub {
                    AluCtrl::Sub
                } else {
                    AluCtrl::Add
                }
            }
            6 => AluCtrl::Or,
            7 => AluCtrl::And,
            // sll(1), xor(4), srl/sra(5) are not implemented.
            _ => AluCtrl::And,
        },
        _ => AluCtrl::And,
    }
}

/// Executes `op` on 64-bit operands, wrapping on overflow.
pub fn execute(op: AluCtrl, a: u64, b: u64) -> u64 {
    match op {
        AluCtrl::And => a & b,
        AluCtrl::Or => a | b,
        AluCtrl::Add => a.wrapping_add(b),
        AluCtrl::Sub => a.wrapping_sub(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::control::ControlSignals;

    fn ctrl(alu_op: u8, funct7_meaningful: bool) -> ControlSignals {
        ControlSignals {
            alu_op,
            funct7: funct7_meaningful,
            ..Default::default()
        }
    }

    #[test]
    fn alu_op_zero_is_always_add() {
        assert_eq!(alu_control(&ctrl(0, false), 7, 0x20), AluCtrl::Add);
    }

    #[test]
    fn alu_op_one_is_always_sub() {
        assert_eq!(alu_control(&ctrl(1, false), 0, 0), AluCtrl::Sub);
    }

    #[test]
    fn alu_op_two_add_sub_by_funct7_bit30() {
        assert_eq!(alu_control(&ctrl(2, true), 0, 0x00), AluCtrl::Add);
        assert_eq!(alu_control(&ctrl(2, true), 0, 0x20), AluCtrl::Sub);
    }

    #[test]
    fn funct7_ignored_unless_flagged() {
        // I-type ADDI: funct3=0 but ctrl.funct7 is false, so stray
        // immediate bits in the funct7 position must not select SUB.
        assert_eq!(alu_control(&ctrl(2, false), 0, 0x20), AluCtrl::Add);
    }

    #[test]
    fn or_and_and_by_funct3() {
        assert_eq!(alu_control(&ctrl(2, false), 6, 0), AluCtrl::Or);
        assert_eq!(alu_control(&ctrl(2, false), 7, 0), AluCtrl::And);
    }

    #[test]
    fn unimplemented_funct3_falls_back_to_and() {
        assert_eq!(alu_control(&ctrl(2, false), 1, 0), AluCtrl::And); // sll
        assert_eq!(alu_control(&ctrl(2, false), 4, 0), AluCtrl::And); // xor
        assert_eq!(alu_control(&ctrl(2, false), 5, 0), AluCtrl::And); // srl/sra
    }

    #[test]
    fn execute_wraps_on_overflow() {
        assert_eq!(execute(AluCtrl::Add, u64::MAX, 1), 0);
        assert_eq!(execute(AluCtrl::Sub, 0, 1), u64::MAX);
    }
}
