//! Addressing modes and the 256-entry opcode dispatch table.
//!
//! The page-cross penalty column is 1 for the read-indexed forms and for
//! Relative (the "charge on cross" rule), 0 elsewhere. JMP (Indirect)'s
//! page-wrap handling lives in `Cpu::effective_address`, not in this table.
//! The 12 `JAM` slots are marked to halt rather than routed to a NOP.

use crate::cpu::Cpu;
use crate::ops::{illegal_ops, jump_ops, logical_ops, move_ops};
use crate::trace::StepKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
  Accumulator,
  Immediate,
  Implied,
  Absolute,
  AbsoluteX,
  AbsoluteY,
  ZeroPage,
  ZeroPageX,
  ZeroPageY,
  Indirect,
  IndirectX,
  IndirectY,
  Relative,
}

impl Mode {
  /// Number of operand bytes consumed after the opcode byte itself.
  pub fn byte_count(&self) -> u8 {
    match self {
      Mode::Accumulator | Mode::Implied => 0,
      Mode::Absolute | Mode::AbsoluteX | Mode::AbsoluteY | Mode::Indirect => 2,
      _ => 1,
    }
  }
}

pub struct OpEntry {
  pub name: &'static str,
  pub mode: Mode,
  pub cycles: u8,
  pub page_cross_penalty: u8,
  pub handler: fn(&mut Cpu, Mode, u8),
  pub kind: StepKind,
}

macro_rules! op {
  ($name:expr, $mode:expr, $cycles:expr, $penalty:expr, $handler:path) => {
    OpEntry {
      name: $name,
      mode: $mode,
      cycles: $cycles,
      page_cross_penalty: $penalty,
      handler: $handler,
      kind: StepKind::Normal,
    }
  };
}

macro_rules! jam {
  ($name:expr) => {
    OpEntry {
      name: $name,
      mode: Mode::Implied,
      cycles: 0,
      page_cross_penalty: 0,
      handler: jump_ops::nop,
      kind: StepKind::Jam,
    }
  };
}

macro_rules! unstable_op {
  ($name:expr, $mode:expr, $cycles:expr, $penalty:expr) => {
    OpEntry {
      name: $name,
      mode: $mode,
      cycles: $cycles,
      page_cross_penalty: $penalty,
      handler: illegal_ops::unstable,
      kind: StepKind::Unstable,
    }
  };
}

use Mode::*;

#[rustfmt::skip]
pub static OPCODE_TABLE: [OpEntry; 256] = [
  // 0x00
  op!("BRK_IMP", Implied, 7, 0, jump_ops::brk),
  op!("ORA_INX", IndirectX, 6, 0, logical_ops::ora),
  jam!("JAM"),
  op!("SLO_INX", IndirectX, 8, 0, illegal_ops::slo),
  op!("NOP_ZP", ZeroPage, 3, 0, jump_ops::nop),
  op!("ORA_ZP", ZeroPage, 3, 0, logical_ops::ora),
  op!("ASL_ZP", ZeroPage, 5, 0, logical_ops::asl),
  op!("SLO_ZP", ZeroPage, 5, 0, illegal_ops::slo),
  op!("PHP_IMP", Implied, 3, 0, move_ops::php),
  op!("ORA_IMM", Immediate, 2, 0, logical_ops::ora),
  op!("ASL_ACC", Accumulator, 2, 0, logical_ops::asl),
  op!("ANC_IMM", Immediate, 2, 0, illegal_ops::anc),
  op!("NOP_ABS", Absolute, 4, 0, jump_ops::nop),
  op!("ORA_ABS", Absolute, 4, 0, logical_ops::ora),
  op!("ASL_ABS", Absolute, 6, 0, logical_ops::asl),
  op!("SLO_ABS", Absolute, 6, 0, illegal_ops::slo),
  // 0x10
  op!("BPL_REL", Relative, 2, 1, jump_ops::bpl),
  op!("ORA_INY", IndirectY, 5, 1, logical_ops::ora),
  jam!("JAM"),
  op!("SLO_INY", IndirectY, 8, 0, illegal_ops::slo),
  op!("NOP_ZPX", ZeroPageX, 4, 0, jump_ops::nop),
  op!("ORA_ZPX", ZeroPageX, 4, 0, logical_ops::ora),
  op!("ASL_ZPX", ZeroPageX, 6, 0, logical_ops::asl),
  op!("SLO_ZPX", ZeroPageX, 6, 0, illegal_ops::slo),
  op!("CLC_IMP", Implied, 2, 0, jump_ops::clc),
  op!("ORA_ABY", AbsoluteY, 4, 1, logical_ops::ora),
  op!("NOP_IMP", Implied, 2, 0, jump_ops::nop),
  op!("SLO_ABY", AbsoluteY, 7, 0, illegal_ops::slo),
  op!("NOP_ABX", AbsoluteX, 4, 1, jump_ops::nop),
  op!("ORA_ABX", AbsoluteX, 4, 1, logical_ops::ora),
  op!("ASL_ABX", AbsoluteX, 7, 0, logical_ops::asl),
  op!("SLO_ABX", AbsoluteX, 7, 0, illegal_ops::slo),
  // 0x20
  op!("JSR_ABS", Absolute, 6, 0, jump_ops::jsr),
  op!("AND_INX", IndirectX, 6, 0, logical_ops::and),
  jam!("JAM"),
  op!("RLA_INX", IndirectX, 8, 0, illegal_ops::rla),
  op!("BIT_ZP", ZeroPage, 3, 0, jump_ops::bit),
  op!("AND_ZP", ZeroPage, 3, 0, logical_ops::and),
  op!("ROL_ZP", ZeroPage, 5, 0, logical_ops::rol),
  op!("RLA_ZP", ZeroPage, 5, 0, illegal_ops::rla),
  op!("PLP_IMP", Implied, 4, 0, move_ops::plp),
  op!("AND_IMM", Immediate, 2, 0, logical_ops::and),
  op!("ROL_ACC", Accumulator, 2, 0, logical_ops::rol),
  op!("ANC_IMM2", Immediate, 2, 0, illegal_ops::anc),
  op!("BIT_ABS", Absolute, 4, 0, jump_ops::bit),
  op!("AND_ABS", Absolute, 4, 0, logical_ops::and),
  op!("ROL_ABS", Absolute, 6, 0, logical_ops::rol),
  op!("RLA_ABS", Absolute, 6, 0, illegal_ops::rla),
  // 0x30
  op!("BMI_REL", Relative, 2, 1, jump_ops::bmi),
  op!("AND_INY", IndirectY, 5, 1, logical_ops::and),
  jam!("JAM"),
  op!("RLA_INY", IndirectY, 8, 0, illegal_ops::rla),
  op!("NOP_ZPX2", ZeroPageX, 4, 0, jump_ops::nop),
  op!("AND_ZPX", ZeroPageX, 4, 0, logical_ops::and),
  op!("ROL_ZPX", ZeroPageX, 6, 0, logical_ops::rol),
  op!("RLA_ZPX", ZeroPageX, 6, 0, illegal_ops::rla),
  op!("SEC_IMP", Implied, 2, 0, jump_ops::sec),
  op!("AND_ABY", AbsoluteY, 4, 1, logical_ops::and),
  op!("NOP_IMP2", Implied, 2, 0, jump_ops::nop),
  op!("RLA_ABY", AbsoluteY, 7, 0, illegal_ops::rla),
  op!("NOP_ABX2", AbsoluteX, 4, 1, jump_ops::nop),
  op!("AND_ABX", AbsoluteX, 4, 1, logical_ops::and),
  op!("ROL_ABX", AbsoluteX, 7, 0, logical_ops::rol),
  op!("RLA_ABX", AbsoluteX, 7, 0, illegal_ops::rla),
  // 0x40
  op!("RTI_IMP", Implied, 6, 0, jump_ops::rti),
  op!("EOR_INX", IndirectX, 6, 0, logical_ops::eor),
  jam!("JAM"),
  op!("SRE_INX", IndirectX, 8, 0, illegal_ops::sre),
  op!("NOP_ZP2", ZeroPage, 3, 0, jump_ops::nop),
  op!("EOR_ZP", ZeroPage, 3, 0, logical_ops::eor),
  op!("LSR_ZP", ZeroPage, 5, 0, logical_ops::lsr),
  op!("SRE_ZP", ZeroPage, 5, 0, illegal_ops::sre),
  op!("PHA_IMP", Implied, 3, 0, move_ops::pha),
  op!("EOR_IMM", Immediate, 2, 0, logical_ops::eor),
  op!("LSR_ACC", Accumulator, 2, 0, logical_ops::lsr),
  op!("ALR_IMM", Immediate, 2, 0, illegal_ops::alr),
  op!("JMP_ABS", Absolute, 3, 0, jump_ops::jmp),
  op!("EOR_ABS", Absolute, 4, 0, logical_ops::eor),
  op!("LSR_ABS", Absolute, 6, 0, logical_ops::lsr),
  op!("SRE_ABS", Absolute, 6, 0, illegal_ops::sre),
  // 0x50
  op!("BVC_REL", Relative, 2, 1, jump_ops::bvc),
  op!("EOR_INY", IndirectY, 5, 1, logical_ops::eor),
  jam!("JAM"),
  op!("SRE_INY", IndirectY, 8, 0, illegal_ops::sre),
  op!("NOP_ZPX3", ZeroPageX, 4, 0, jump_ops::nop),
  op!("EOR_ZPX", ZeroPageX, 4, 0, logical_ops::eor),
  op!("LSR_ZPX", ZeroPageX, 6, 0, logical_ops::lsr),
  op!("SRE_ZPX", ZeroPageX, 6, 0, illegal_ops::sre),
  op!("CLI_IMP", Implied, 2, 0, jump_ops::cli),
  op!("EOR_ABY", AbsoluteY, 4, 1, logical_ops::eor),
  op!("NOP_IMP3", Implied, 2, 0, jump_ops::nop),
  op!("SRE_ABY", AbsoluteY, 7, 0, illegal_ops::sre),
  op!("NOP_ABX3", AbsoluteX, 4, 1, jump_ops::nop),
  op!("EOR_ABX", AbsoluteX, 4, 1, logical_ops::eor),
  op!("LSR_ABX", AbsoluteX, 7, 0, logical_ops::lsr),
  op!("SRE_ABX", AbsoluteX, 7, 0, illegal_ops::sre),
  // 0x60
  op!("RTS_IMP", Implied, 6, 0, jump_ops::rts),
  op!("ADC_INX", IndirectX, 6, 0, logical_ops::adc),
  jam!("JAM"),
  op!("RRA_INX", IndirectX, 8, 0, illegal_ops::rra),
  op!("NOP_ZP3", ZeroPage, 3, 0, jump_ops::nop),
  op!("ADC_ZP", ZeroPage, 3, 0, logical_ops::adc),
  op!("ROR_ZP", ZeroPage, 5, 0, logical_ops::ror),
  op!("RRA_ZP", ZeroPage, 5, 0, illegal_ops::rra),
  op!("PLA_IMP", Implied, 4, 0, move_ops::pla),
  op!("ADC_IMM", Immediate, 2, 0, logical_ops::adc),
  op!("ROR_ACC", Accumulator, 2, 0, logical_ops::ror),
  unstable_op!("ARR_IMM", Immediate, 2, 0),
  op!("JMP_IND", Indirect, 5, 0, jump_ops::jmp),
  op!("ADC_ABS", Absolute, 4, 0, logical_ops::adc),
  op!("ROR_ABS", Absolute, 6, 0, logical_ops::ror),
  op!("RRA_ABS", Absolute, 6, 0, illegal_ops::rra),
  // 0x70
  op!("BVS_REL", Relative, 2, 1, jump_ops::bvs),
  op!("ADC_INY", IndirectY, 5, 1, logical_ops::adc),
  jam!("JAM"),
  op!("RRA_INY", IndirectY, 8, 0, illegal_ops::rra),
  op!("NOP_ZPX4", ZeroPageX, 4, 0, jump_ops::nop),
  op!("ADC_ZPX", ZeroPageX, 4, 0, logical_ops::adc),
  op!("ROR_ZPX", ZeroPageX, 6, 0, logical_ops::ror),
  op!("RRA_ZPX", ZeroPageX, 6, 0, illegal_ops::rra),
  op!("SEI_IMP", Implied, 2, 0, jump_ops::sei),
  op!("ADC_ABY", AbsoluteY, 4, 1, logical_ops::adc),
  op!("NOP_IMP4", Implied, 2, 0, jump_ops::nop),
  op!("RRA_ABY", AbsoluteY, 7, 0, illegal_ops::rra),
  op!("NOP_ABX4", AbsoluteX, 4, 1, jump_ops::nop),
  op!("ADC_ABX", AbsoluteX, 4, 1, logical_ops::adc),
  op!("ROR_ABX", AbsoluteX, 7, 0, logical_ops::ror),
  op!("RRA_ABX", AbsoluteX, 7, 0, illegal_ops::rra),
  // 0x80
  op!("NOP_IMM", Immediate, 2, 0, jump_ops::nop),
  op!("STA_INX", IndirectX, 6, 0, move_ops::sta),
  op!("NOP_IMM2", Immediate, 2, 0, jump_ops::nop),
  op!("SAX_INX", IndirectX, 6, 0, illegal_ops::sax),
  op!("STY_ZP", ZeroPage, 3, 0, move_ops::sty),
  op!("STA_ZP", ZeroPage, 3, 0, move_ops::sta),
  op!("STX_ZP", ZeroPage, 3, 0, move_ops::stx),
  op!("SAX_ZP", ZeroPage, 3, 0, illegal_ops::sax),
  op!("DEY_IMP", Implied, 2, 0, logical_ops::dey),
  op!("NOP_IMM3", Immediate, 2, 0, jump_ops::nop),
  op!("TXA_IMP", Implied, 2, 0, move_ops::txa),
  unstable_op!("XAA_IMM", Immediate, 2, 0),
  op!("STY_ABS", Absolute, 4, 0, move_ops::sty),
  op!("STA_ABS", Absolute, 4, 0, move_ops::sta),
  op!("STX_ABS", Absolute, 4, 0, move_ops::stx),
  op!("SAX_ABS", Absolute, 4, 0, illegal_ops::sax),
  // 0x90
  op!("BCC_REL", Relative, 2, 1, jump_ops::bcc),
  op!("STA_INY", IndirectY, 6, 0, move_ops::sta),
  jam!("JAM"),
  unstable_op!("AHX_INY", IndirectY, 6, 0),
  op!("STY_ZPX", ZeroPageX, 4, 0, move_ops::sty),
  op!("STA_ZPX", ZeroPageX, 4, 0, move_ops::sta),
  op!("STX_ZPY", ZeroPageY, 4, 0, move_ops::stx),
  op!("SAX_ZPY", ZeroPageY, 4, 0, illegal_ops::sax),
  op!("TYA_IMP", Implied, 2, 0, move_ops::tya),
  op!("STA_ABY", AbsoluteY, 5, 0, move_ops::sta),
  op!("TXS_IMP", Implied, 2, 0, move_ops::txs),
  unstable_op!("TAS_ABY", AbsoluteY, 5, 0),
  unstable_op!("SHY_ABX", AbsoluteX, 5, 0),
  op!("STA_ABX", AbsoluteX, 5, 0, move_ops::sta),
  unstable_op!("SHX_ABY", AbsoluteY, 5, 0),
  unstable_op!("AHX_ABY", AbsoluteY, 5, 0),
  // 0xA0
  op!("LDY_IMM", Immediate, 2, 0, move_ops::ldy),
  op!("LDA_INX", IndirectX, 6, 0, move_ops::lda),
  op!("LDX_IMM", Immediate, 2, 0, move_ops::ldx),
  op!("LAX_INX", IndirectX, 6, 0, illegal_ops::lax),
  op!("LDY_ZP", ZeroPage, 3, 0, move_ops::ldy),
  op!("LDA_ZP", ZeroPage, 3, 0, move_ops::lda),
  op!("LDX_ZP", ZeroPage, 3, 0, move_ops::ldx),
  op!("LAX_ZP", ZeroPage, 3, 0, illegal_ops::lax),
  op!("TAY_IMP", Implied, 2, 0, move_ops::tay),
  op!("LDA_IMM", Immediate, 2, 0, move_ops::lda),
  op!("TAX_IMP", Implied, 2, 0, move_ops::tax),
  unstable_op!("LXA_IMM", Immediate, 2, 0),
  op!("LDY_ABS", Absolute, 4, 0, move_ops::ldy),
  op!("LDA_ABS", Absolute, 4, 0, move_ops::lda),
  op!("LDX_ABS", Absolute, 4, 0, move_ops::ldx),
  op!("LAX_ABS", Absolute, 4, 0, illegal_ops::lax),
  // 0xB0
  op!("BCS_REL", Relative, 2, 1, jump_ops::bcs),
  op!("LDA_INY", IndirectY, 5, 1, move_ops::lda),
  jam!("JAM"),
  op!("LAX_INY", IndirectY, 5, 1, illegal_ops::lax),
  op!("LDY_ZPX", ZeroPageX, 4, 0, move_ops::ldy),
  op!("LDA_ZPX", ZeroPageX, 4, 0, move_ops::lda),
  op!("LDX_ZPY", ZeroPageY, 4, 0, move_ops::ldx),
  op!("LAX_ZPY", ZeroPageY, 4, 0, illegal_ops::lax),
  op!("CLV_IMP", Implied, 2, 0, jump_ops::clv),
  op!("LDA_ABY", AbsoluteY, 4, 1, move_ops::lda),
  op!("TSX_IMP", Implied, 2, 0, move_ops::tsx),
  unstable_op!("LAS_ABY", AbsoluteY, 4, 1),
  op!("LDY_ABX", AbsoluteX, 4, 1, move_ops::ldy),
  op!("LDA_ABX", AbsoluteX, 4, 1, move_ops::lda),
  op!("LDX_ABY", AbsoluteY, 4, 1, move_ops::ldx),
  op!("LAX_ABY", AbsoluteY, 4, 1, illegal_ops::lax),
  // 0xC0
  op!("CPY_IMM", Immediate, 2, 0, logical_ops::cpy),
  op!("CMP_INX", IndirectX, 6, 0, logical_ops::cmp),
  op!("NOP_IMM4", Immediate, 2, 0, jump_ops::nop),
  op!("DCP_INX", IndirectX, 8, 0, illegal_ops::dcp),
  op!("CPY_ZP", ZeroPage, 3, 0, logical_ops::cpy),
  op!("CMP_ZP", ZeroPage, 3, 0, logical_ops::cmp),
  op!("DEC_ZP", ZeroPage, 5, 0, logical_ops::dec),
  op!("DCP_ZP", ZeroPage, 5, 0, illegal_ops::dcp),
  op!("INY_IMP", Implied, 2, 0, logical_ops::iny),
  op!("CMP_IMM", Immediate, 2, 0, logical_ops::cmp),
  op!("DEX_IMP", Implied, 2, 0, logical_ops::dex),
  unstable_op!("AXS_IMM", Immediate, 2, 0),
  op!("CPY_ABS", Absolute, 4, 0, logical_ops::cpy),
  op!("CMP_ABS", Absolute, 4, 0, logical_ops::cmp),
  op!("DEC_ABS", Absolute, 6, 0, logical_ops::dec),
  op!("DCP_ABS", Absolute, 6, 0, illegal_ops::dcp),
  // 0xD0
  op!("BNE_REL", Relative, 2, 1, jump_ops::bne),
  op!("CMP_INY", IndirectY, 5, 1, logical_ops::cmp),
  jam!("JAM"),
  op!("DCP_INY", IndirectY, 8, 0, illegal_ops::dcp),
  op!("NOP_ZPX5", ZeroPageX, 4, 0, jump_ops::nop),
  op!("CMP_ZPX", ZeroPageX, 4, 0, logical_ops::cmp),
  op!("DEC_ZPX", ZeroPageX, 6, 0, logical_ops::dec),
  op!("DCP_ZPX", ZeroPageX, 6, 0, illegal_ops::dcp),
  op!("CLD_IMP", Implied, 2, 0, jump_ops::cld),
  op!("CMP_ABY", AbsoluteY, 4, 1, logical_ops::cmp),
  op!("NOP_IMP5", Implied, 2, 0, jump_ops::nop),
  op!("DCP_ABY", AbsoluteY, 7, 0, illegal_ops::dcp),
  op!("NOP_ABX5", AbsoluteX, 4, 1, jump_ops::nop),
  op!("CMP_ABX", AbsoluteX, 4, 1, logical_ops::cmp),
  op!("DEC_ABX", AbsoluteX, 7, 0, logical_ops::dec),
  op!("DCP_ABX", AbsoluteX, 7, 0, illegal_ops::dcp),
  // 0xE0
  op!("CPX_IMM", Immediate, 2, 0, logical_ops::cpx),
  op!("SBC_INX", IndirectX, 6, 0, logical_ops::sbc),
  op!("NOP_IMM5", Immediate, 2, 0, jump_ops::nop),
  op!("ISC_INX", IndirectX, 8, 0, illegal_ops::isc),
  op!("CPX_ZP", ZeroPage, 3, 0, logical_ops::cpx),
  op!("SBC_ZP", ZeroPage, 3, 0, logical_ops::sbc),
  op!("INC_ZP", ZeroPage, 5, 0, logical_ops::inc),
  op!("ISC_ZP", ZeroPage, 5, 0, illegal_ops::isc),
  op!("INX_IMP", Implied, 2, 0, logical_ops::inx),
  op!("SBC_IMM", Immediate, 2, 0, logical_ops::sbc),
  op!("NOP_IMP6", Implied, 2, 0, jump_ops::nop),
  op!("SBC_IMM2", Immediate, 2, 0, logical_ops::sbc),
  op!("CPX_ABS", Absolute, 4, 0, logical_ops::cpx),
  op!("SBC_ABS", Absolute, 4, 0, logical_ops::sbc),
  op!("INC_ABS", Absolute, 6, 0, logical_ops::inc),
  op!("ISC_ABS", Absolute, 6, 0, illegal_ops::isc),
  // 0xF0
  op!("BEQ_REL", Relative, 2, 1, jump_ops::beq),
  op!("SBC_INY", IndirectY, 5, 1, logical_ops::sbc),
  jam!("JAM"),
  op!("ISC_INY", IndirectY, 8, 0, illegal_ops::isc),
  op!("NOP_ZPX6", ZeroPageX, 4, 0, jump_ops::nop),
  op!("SBC_ZPX", ZeroPageX, 4, 0, logical_ops::sbc),
  op!("INC_ZPX", ZeroPageX, 6, 0, logical_ops::inc),
  op!("ISC_ZPX", ZeroPageX, 6, 0, illegal_ops::isc),
  op!("SED_IMP", Implied, 2, 0, jump_ops::sed),
  op!("SBC_ABY", AbsoluteY, 4, 1, logical_ops::sbc),
  op!("NOP_IMP7", Implied, 2, 0, jump_ops::nop),
  op!("ISC_ABY", AbsoluteY, 7, 0, illegal_ops::isc),
  op!("NOP_ABX6", AbsoluteX, 4, 1, jump_ops::nop),
  op!("SBC_ABX", AbsoluteX, 4, 1, logical_ops::sbc),
  op!("INC_ABX", AbsoluteX, 7, 0, logical_ops::inc),
  op!("ISC_ABX", AbsoluteX, 7, 0, illegal_ops::isc),
];

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn table_has_256_entries() {
    assert_eq!(OPCODE_TABLE.len(), 256);
  }

  #[test]
  fn jam_slots_yield_zero_cycles_and_jam_kind() {
    for &opcode in &[0x02u8, 0x12, 0x22, 0x32, 0x42, 0x52, 0x62, 0x72, 0x92, 0xB2, 0xD2, 0xF2] {
      assert_eq!(OPCODE_TABLE[opcode as usize].kind, StepKind::Jam);
    }
  }

  #[test]
  fn official_nop_is_two_cycles_implied() {
    let entry = &OPCODE_TABLE[0xEA];
    assert_eq!(entry.cycles, 2);
    assert_eq!(entry.mode, Mode::Implied);
  }

  #[test]
  fn brk_is_seven_cycles() {
    assert_eq!(OPCODE_TABLE[0x00].cycles, 7);
  }

  #[test]
  fn read_indexed_forms_carry_a_page_cross_penalty() {
    assert_eq!(OPCODE_TABLE[0xBD].page_cross_penalty, 1); // LDA abs,X
    assert_eq!(OPCODE_TABLE[0x9D].page_cross_penalty, 0); // STA abs,X (write, deterministic)
  }
}
