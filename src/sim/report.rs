//! Final report writer: cycle count, exit PC, and the register file.

use crate::common::reg::RegisterFile;

/// Writes the termination report to `out`, in the original's format:
/// a dashed separator, the cycle count, the PC, then `x0` through
/// `x31` each on their own line as unsigned decimal.
pub fn write_report<W: std::io::Write>(
    out: &mut W,
    cycles: i64,
    pc: u64,
    regs: &RegisterFile,
) -> std::io::Result<()> {
    writeln!(out, "---------------------------------------------------")?;
    writeln!(out, "Clock cycles = {}", cycles)?;
    writeln!(out, "PC     = {}\n", pc)?;
    for (n, val) in regs.all().iter().enumerate() {
        writeln!(out, "{:<5}= {}", format!("x{}", n), val)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_contains_cycle_count_and_all_registers() {
        let mut regs = RegisterFile::new();
        regs.write(9, 10);
        let mut buf = Vec::new();
        write_report(&mut buf, 42, 0x10, &regs).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Clock cycles = 42"));
        assert!(text.contains("PC     = 16"));
        assert!(text.contains("x9   = 10"));
        assert!(text.contains("x31  = 0"));
    }
}
