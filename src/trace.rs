//! The nestest-compatible step trace: one line per executed instruction,
//! rendered from a pre-execution register snapshot and the post-execution
//! running cycle count.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
  /// A documented or stable-illegal opcode executed normally.
  Normal,
  /// An unrecognized opcode: the processor made no progress.
  Jam,
  /// A bus-conflict-dependent illegal opcode; bytes/cycles were consumed
  /// but no register or memory mutation happened.
  Unstable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepResult {
  pub cycles: u8,
  pub trace_line: String,
  pub kind: StepKind,
}

/// Formats one trace line. `raw_bytes` is the instruction's opcode byte
/// followed by its 0, 1, or 2 operand bytes. `a`/`x`/`y`/`p`/`sp` are the
/// *pre-execution* snapshot; `cycles` is the running total *after* the
/// instruction executed.
#[allow(clippy::too_many_arguments)]
pub fn format_trace_line(
  pc: u16,
  raw_bytes: &[u8],
  mnemonic_mode: &str,
  a: u8,
  x: u8,
  y: u8,
  p: u8,
  sp: u8,
  cycles: u64,
) -> String {
  let mut byte_field = raw_bytes
    .iter()
    .map(|b| format!("{:02X}", b))
    .collect::<Vec<_>>()
    .join(" ");
  while byte_field.len() < 9 {
    byte_field.push(' ');
  }

  let mut mnemonic_field = mnemonic_mode.to_string();
  while mnemonic_field.len() < 11 {
    mnemonic_field.push(' ');
  }

  format!(
    "{:04X}  {} {} A:{:02X} X:{:02X} Y:{:02X} SR:{:02X} SP:{:02X} CYC:{}\n",
    pc, byte_field, mnemonic_field, a, x, y, p, sp, cycles
  )
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn single_byte_instruction_pads_the_byte_field() {
    let line = format_trace_line(0xC000, &[0xEA], "NOP_IMP", 0, 0, 0, 0x24, 0xFD, 7);
    assert!(line.starts_with("C000  EA        NOP_IMP    "));
  }

  #[test]
  fn three_byte_instruction_fills_the_byte_field() {
    let line = format_trace_line(0xC000, &[0x4C, 0xF5, 0xC5], "JMP_ABS", 0, 0, 0, 0x24, 0xFD, 3);
    assert!(line.starts_with("C000  4C F5 C5  JMP_ABS    "));
  }

  #[test]
  fn trailer_has_a_x_y_sr_sp_and_decimal_cyc() {
    let line = format_trace_line(0x8000, &[0xA9, 0x05], "LDA_IMM", 0x05, 0x00, 0x00, 0x24, 0xFD, 9);
    assert!(line.contains("A:05 X:00 Y:00 SR:24 SP:FD CYC:9"));
  }
}
