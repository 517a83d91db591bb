// Clippy rules to disable.
#![allow(clippy::new_without_default)]

pub mod controller;
pub mod cpu;
pub mod error;
pub mod memory;
pub mod opcodes;
pub mod ops;
pub mod status;
pub mod trace;

pub use controller::Controller;
pub use cpu::Cpu;
pub use error::CpuError;
pub use trace::StepResult;
