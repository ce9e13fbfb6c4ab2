//! Control-signal generation.
//!
//! Produces the per-instruction control bundle that rides alongside it
//! through every latch, keyed purely by the compressed opcode (plus,
//! for op-imm, the low bits of funct3 — see the `funct7` field below).

use crate::isa::Decoded;

/// Control-signal bundle carried through the pipeline latches.
///
/// Field meanings match the datapath's control-bundle layout; `funct3` is a reserved
/// flag the original datapath wires but never reads, kept here for
/// datapath fidelity rather than because anything consumes it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlSignals {
    /// This instruction may redirect PC if taken/linked, resolved in EX.
    pub branch: bool,
    /// Load from data memory in MEM.
    pub mem_read: bool,
    /// Write memory data (not ALU result) to rd in WB.
    pub mem_to_reg: bool,
    /// Selector into the ALU-control decoder (0, 1, or 2).
    pub alu_op: u8,
    /// Store to data memory in MEM.
    pub mem_write: bool,
    /// Second ALU operand is the immediate, not d2.
    pub alu_src: bool,
    /// Write rd in WB.
    pub reg_write: bool,
    /// Link-style op (jal/jalr): rd gets pc+4, PC unconditionally redirects.
    pub link: bool,
    /// Reserved; wired through but unused by any stage.
    pub funct3: bool,
    /// funct7 bit 30 is meaningful for ALU control on this instruction.
    pub funct7: bool,
}

/// Builds the control bundle for one decoded instruction.
///
/// `branch` and `link` are derived unconditionally from the raw
/// opcode's bit 6 and bit 2 — every known family's opcode happens to
/// clear both bits except the three that carry them, so deriving them
/// up front rather than per-arm matches the same result.
pub fn generate(d: &Decoded) -> ControlSignals {
    let mut c = ControlSignals::default();
    c.branch = (d.opcode & 0x40) != 0;
    c.link = (d.opcode & 0x04) != 0;

    match d.compressed_opcode {
        // load (I)
        0 => {
            c.reg_write = true;
            c.mem_read = true;
            c.mem_to_reg = true;
            c.alu_src = true;
            c.alu_op = 0;
        }
        // op-imm (I)
        1 => {
            c.reg_write = true;
            c.alu_src = true;
            c.alu_op = 2;
            c.funct7 = (d.funct3 & 0x3) == 1;
        }
        // store (S)
        2 => {
            c.mem_write = true;
            c.alu_src = true;
            c.alu_op = 0;
        }
        // op (R)
        3 => {
            c.reg_write = true;
            c.alu_op = 2;
            c.funct7 = true;
        }
        // branch (SB)
        6 => {
            c.alu_src = true;
            c.alu_op = 1;
        }
        // jalr (I)
        7 => {
            c.reg_write = true;
            c.alu_src = true;
            c.alu_op = 2;
        }
        // jal (UJ)
        9 => {
            c.reg_write = true;
            c.alu_src = true;
            c.alu_op = 0;
        }
        // U-type (5, unused) and anything unimplemented: bubble,
        // modulo the branch/link bits derived above.
        _ => {}
    }
    c
}
