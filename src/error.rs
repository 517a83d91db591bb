//! Error conditions the outer harness needs to know about. None of these
//! are raised from inside `Cpu::step` as a Rust `Result` — the step loop
//! has no termination condition of its own (see `cpu::Cpu::step`) — they
//! are constructed by `controller::Controller` from a `StepResult`'s
//! `StepKind` so a caller driving the loop can decide whether to stop.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuError {
  /// The opcode table has no entry for the fetched byte; the step made no
  /// progress.
  UnknownOpcode { opcode: u8, pc: u16 },
  /// An unstable/magic illegal opcode executed; bytes and cycles were
  /// consumed but no state was mutated.
  UnstableOpcode { opcode: u8, pc: u16 },
  /// Reserved for a bus-interface collaborator rejecting an access.
  /// Unreachable from the bare CPU core, which treats all 64 KiB as RAM.
  BusError { addr: u16 },
}

impl fmt::Display for CpuError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CpuError::UnknownOpcode { opcode, pc } => {
        write!(f, "unknown opcode ${:02X} at ${:04X}", opcode, pc)
      }
      CpuError::UnstableOpcode { opcode, pc } => {
        write!(f, "unstable opcode ${:02X} at ${:04X} (no-op)", opcode, pc)
      }
      CpuError::BusError { addr } => write!(f, "bus error at ${:04X}", addr),
    }
  }
}

impl std::error::Error for CpuError {}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn unknown_opcode_display_includes_opcode_and_pc() {
    let err = CpuError::UnknownOpcode { opcode: 0x02, pc: 0xC000 };
    assert_eq!(format!("{}", err), "unknown opcode $02 at $C000");
  }
}
