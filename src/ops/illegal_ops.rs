//! Undocumented opcodes.
//!
//! The "stable" illegal opcodes are implemented as compositions of the
//! documented primitives that the real 6502's instruction decoder happens
//! to execute in combination (SLO is ASL-then-ORA sharing one decoded
//! address, and so on). The "unstable" family (bus-conflict/high-byte-
//! dependent opcodes whose exact behavior varies across chip revisions)
//! still consumes its documented bytes and cycles so trace/cycle
//! accounting stays correct, it just doesn't mutate registers.

use crate::cpu::Cpu;
use crate::opcodes::Mode;
use crate::ops::logical_ops::{add_with_carry, compare, read_rmw_operand, write_rmw_result};
use crate::status::StatusFlag;

/// ASL the operand, then OR the shifted result into A.
pub fn slo(cpu: &mut Cpu, mode: Mode, _penalty: u8) {
  let (address, operand) = read_rmw_operand(cpu, mode);
  let shifted = operand << 1;
  cpu.p.set(StatusFlag::Carry, operand & 0b1000_0000 != 0);
  write_rmw_result(cpu, address, shifted);
  cpu.a |= shifted;
  cpu.p.update_zero_and_negative(cpu.a);
}

/// ROL the operand, then AND the rotated result into A.
pub fn rla(cpu: &mut Cpu, mode: Mode, _penalty: u8) {
  let (address, operand) = read_rmw_operand(cpu, mode);
  let rotated = (operand << 1) | cpu.p.carry_bit();
  cpu.p.set(StatusFlag::Carry, operand & 0b1000_0000 != 0);
  write_rmw_result(cpu, address, rotated);
  cpu.a &= rotated;
  cpu.p.update_zero_and_negative(cpu.a);
}

/// LSR the operand, then EOR the shifted result into A.
pub fn sre(cpu: &mut Cpu, mode: Mode, _penalty: u8) {
  let (address, operand) = read_rmw_operand(cpu, mode);
  let shifted = operand >> 1;
  cpu.p.set(StatusFlag::Carry, operand & 0b0000_0001 != 0);
  write_rmw_result(cpu, address, shifted);
  cpu.a ^= shifted;
  cpu.p.update_zero_and_negative(cpu.a);
}

/// ROR the operand, then ADC the rotated result into A.
pub fn rra(cpu: &mut Cpu, mode: Mode, _penalty: u8) {
  let (address, operand) = read_rmw_operand(cpu, mode);
  let carry_in = cpu.p.carry_bit();
  let rotated = (operand >> 1) | (carry_in << 7);
  cpu.p.set(StatusFlag::Carry, operand & 0b0000_0001 != 0);
  write_rmw_result(cpu, address, rotated);
  add_with_carry(cpu, rotated);
}

/// Stores `A & X` at the resolved address. Flags untouched, like any raw
/// store.
pub fn sax(cpu: &mut Cpu, mode: Mode, _penalty: u8) {
  let address = cpu.resolve_write_address(mode);
  cpu.write(address, cpu.a & cpu.x);
}

/// Loads both A and X from the resolved operand in one shot.
pub fn lax(cpu: &mut Cpu, mode: Mode, penalty: u8) {
  let value = cpu.read_operand(mode, penalty);
  cpu.a = value;
  cpu.x = value;
  cpu.p.update_zero_and_negative(value);
}

/// DEC the operand, then CMP it against A — no write-back flags of its
/// own beyond what CMP sets.
pub fn dcp(cpu: &mut Cpu, mode: Mode, _penalty: u8) {
  let address = cpu.resolve_write_address(mode);
  let result = cpu.read(address).wrapping_sub(1);
  cpu.write(address, result);
  compare(cpu, cpu.a, result);
}

/// INC the operand, then SBC it from A.
pub fn isc(cpu: &mut Cpu, mode: Mode, _penalty: u8) {
  let address = cpu.resolve_write_address(mode);
  let result = cpu.read(address).wrapping_add(1);
  cpu.write(address, result);
  add_with_carry(cpu, !result);
}

/// AND the immediate operand into A, then copy bit 7 of the result into
/// Carry (used by software as a cheap sign-to-carry transfer).
pub fn anc(cpu: &mut Cpu, mode: Mode, penalty: u8) {
  let value = cpu.read_operand(mode, penalty);
  cpu.a &= value;
  cpu.p.update_zero_and_negative(cpu.a);
  cpu.p.set(StatusFlag::Carry, cpu.a & 0b1000_0000 != 0);
}

/// AND the immediate operand into A, then LSR the result (Carry takes the
/// bit shifted out, same as a standalone LSR).
pub fn alr(cpu: &mut Cpu, mode: Mode, penalty: u8) {
  let value = cpu.read_operand(mode, penalty);
  cpu.a &= value;
  cpu.p.set(StatusFlag::Carry, cpu.a & 0b0000_0001 != 0);
  cpu.a >>= 1;
  cpu.p.update_zero_and_negative(cpu.a);
}

/// The bus-conflict-dependent "unstable" opcodes (ANE/XAA, LXA, SHA, SHX,
/// SHY, TAS, LAS, SBX, ARR) are out of scope: real hardware behavior
/// depends on analog bus capacitance, not just logical state. This stub
/// still consumes the instruction's documented operand bytes so cycle and
/// trace accounting stay correct; it performs no register or memory
/// mutation.
pub fn unstable(cpu: &mut Cpu, mode: Mode, penalty: u8) {
  if mode != Mode::Implied {
    cpu.read_operand(mode, penalty);
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::cpu::Cpu;

  #[test]
  fn slo_shifts_then_ors_into_a() {
    let mut cpu = Cpu::new(&[], Some(0xC000));
    cpu.a = 0b0000_0001;
    cpu.write(0x0010, 0b1000_0001);
    cpu.write(0xC000, 0x07); // SLO $10
    cpu.write(0xC001, 0x10);
    cpu.step();
    assert_eq!(cpu.read(0x0010), 0b0000_0010);
    assert_eq!(cpu.a, 0b0000_0011);
    assert!(cpu.p.get(StatusFlag::Carry));
  }

  #[test]
  fn lax_loads_a_and_x_together() {
    let mut cpu = Cpu::new(&[0xA7, 0x10], Some(0x8000));
    cpu.write(0x0010, 0x77);
    cpu.step();
    assert_eq!(cpu.a, 0x77);
    assert_eq!(cpu.x, 0x77);
  }

  #[test]
  fn dcp_decrements_then_compares() {
    let mut cpu = Cpu::new(&[], Some(0xC000));
    cpu.a = 0x10;
    cpu.write(0x0010, 0x11);
    cpu.write(0xC000, 0xC7); // DCP $10
    cpu.write(0xC001, 0x10);
    cpu.step();
    assert_eq!(cpu.read(0x0010), 0x10);
    assert!(cpu.p.get(StatusFlag::Zero));
    assert!(cpu.p.get(StatusFlag::Carry));
  }

  #[test]
  fn unstable_opcode_consumes_bytes_without_mutating_registers() {
    let mut cpu = Cpu::new(&[], Some(0xC000));
    cpu.a = 0x42;
    cpu.x = 0x13;
    cpu.write(0xC000, 0x8B); // XAA #$FF
    cpu.write(0xC001, 0xFF);
    cpu.step();
    assert_eq!(cpu.a, 0x42);
    assert_eq!(cpu.x, 0x13);
    assert_eq!(cpu.pc, 0xC002);
  }
}
