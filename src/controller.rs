//! The outer harness: owns a `Cpu`, drives its `step()` loop, and decides
//! what to do with `StepKind::Jam`/`StepKind::Unstable` results and where
//! the trace goes. None of this lives inside the core itself — it has no
//! termination condition of its own, so ROM loading, halting, and
//! trace-sink plumbing are all a caller's concern.

use std::io::{self, Write};

use colored::Colorize;

use crate::cpu::Cpu;
use crate::error::CpuError;
use crate::trace::StepKind;

pub struct Controller<W: Write> {
  cpu: Cpu,
  trace_sink: W,
  steps_run: u64,
}

impl Controller<io::Stdout> {
  /// Convenience constructor that traces to stdout, matching how the
  /// nestest-style golden comparison is normally driven.
  pub fn new(rom_image: &[u8], entry_point: Option<u16>) -> Controller<io::Stdout> {
    Controller::with_sink(rom_image, entry_point, io::stdout())
  }
}

impl<W: Write> Controller<W> {
  pub fn with_sink(rom_image: &[u8], entry_point: Option<u16>, trace_sink: W) -> Controller<W> {
    Controller { cpu: Cpu::new(rom_image, entry_point), trace_sink, steps_run: 0 }
  }

  pub fn cpu(&self) -> &Cpu {
    &self.cpu
  }

  pub fn cpu_mut(&mut self) -> &mut Cpu {
    &mut self.cpu
  }

  pub fn reset(&mut self) {
    self.cpu.reset();
  }

  /// Runs until a JAM opcode is hit or `max_steps` instructions have
  /// executed, whichever comes first. Every step's trace line is flushed
  /// to the sink immediately (see `cpu::Cpu`'s concurrency model: the
  /// trace sink is append-only and flushed per step).
  ///
  /// Unstable opcodes are logged but do not stop the run: per `error`'s
  /// documented behavior, they consume their bytes/cycles and leave state
  /// untouched, which is safe to continue past.
  pub fn run_until_jam(&mut self, max_steps: u64) -> Result<u64, CpuError> {
    for _ in 0..max_steps {
      let pre_pc = self.cpu.pc;
      let result = self.cpu.step();
      self.trace_sink
        .write_all(result.trace_line.as_bytes())
        .expect("trace sink write failed");
      self.steps_run += 1;

      match result.kind {
        StepKind::Jam => {
          let opcode = self.cpu.read(pre_pc);
          return Err(CpuError::UnknownOpcode { opcode, pc: pre_pc });
        }
        StepKind::Unstable => {
          let opcode = self.cpu.read(pre_pc);
          eprintln!(
            "{} {}",
            "warning:".yellow().bold(),
            CpuError::UnstableOpcode { opcode, pc: pre_pc }
          );
        }
        StepKind::Normal => {}
      }
    }
    Ok(self.steps_run)
  }

  pub fn steps_run(&self) -> u64 {
    self.steps_run
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn run_until_jam_stops_on_an_unrecognized_opcode() {
    let rom = [0xEA, 0xEA, 0x02]; // NOP, NOP, JAM
    let mut sink = Vec::new();
    let mut controller = Controller::with_sink(&rom, Some(0x8000), &mut sink);
    let result = controller.run_until_jam(10);
    assert_eq!(result, Err(CpuError::UnknownOpcode { opcode: 0x02, pc: 0x8002 }));
    assert_eq!(controller.steps_run(), 3);
  }

  #[test]
  fn run_until_jam_respects_the_step_cap() {
    let rom = [0xEA; 16];
    let mut sink = Vec::new();
    let mut controller = Controller::with_sink(&rom, Some(0x8000), &mut sink);
    let result = controller.run_until_jam(5);
    assert_eq!(result, Ok(5));
    assert_eq!(controller.steps_run(), 5);
  }

  #[test]
  fn every_step_appends_a_trace_line_to_the_sink() {
    let rom = [0xA9, 0x05]; // LDA #$05
    let mut sink = Vec::new();
    {
      let mut controller = Controller::with_sink(&rom, Some(0x8000), &mut sink);
      controller.run_until_jam(1).unwrap();
    }
    let trace = String::from_utf8(sink).unwrap();
    assert!(trace.starts_with("8000"));
    assert!(trace.contains("LDA_IMM"));
  }
}
