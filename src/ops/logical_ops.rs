//! Arithmetic, comparison, and read-modify-write instructions.
//!
//! `dey` reads and writes `cpu.y`, not `cpu.x` — any register write that
//! counts as a "load" updates Z and N from the loaded value. ASL/ROL/LSR/ROR
//! distinguish the accumulator from a resolved memory address so their
//! write-back always lands on the right target.

use crate::cpu::Cpu;
use crate::opcodes::Mode;

/// Logical OR with the accumulator.
/// Function: A:=A or {adr}  Flags: N Z
pub fn ora(cpu: &mut Cpu, mode: Mode, penalty: u8) {
  let value = cpu.read_operand(mode, penalty);
  cpu.a |= value;
  cpu.p.update_zero_and_negative(cpu.a);
}

/// Logical AND with the accumulator.
/// Function: A:=A&{adr}  Flags: N Z
pub fn and(cpu: &mut Cpu, mode: Mode, penalty: u8) {
  let value = cpu.read_operand(mode, penalty);
  cpu.a &= value;
  cpu.p.update_zero_and_negative(cpu.a);
}

/// Logical exclusive-or with the accumulator.
/// Function: A:=A exor {adr}  Flags: N Z
pub fn eor(cpu: &mut Cpu, mode: Mode, penalty: u8) {
  let value = cpu.read_operand(mode, penalty);
  cpu.a ^= value;
  cpu.p.update_zero_and_negative(cpu.a);
}

/// Shared ADC/SBC implementation: SBC is ADC of the operand's one's
/// complement, the standard 6502 convention.
pub(crate) fn add_with_carry(cpu: &mut Cpu, operand: u8) {
  let carry_in = cpu.p.carry_bit() as u16;
  let sum = cpu.a as u16 + operand as u16 + carry_in;
  let result = sum as u8;

  let overflow = ((cpu.a ^ result) & (operand ^ result) & 0x80) != 0;

  cpu.p.set(crate::status::StatusFlag::Carry, sum > 0xFF);
  cpu.p.set(crate::status::StatusFlag::Overflow, overflow);
  cpu.p.update_zero_and_negative(result);
  cpu.a = result;
}

/// Add with carry.  Function: A:=A+{adr}+C  Flags: N V Z C
pub fn adc(cpu: &mut Cpu, mode: Mode, penalty: u8) {
  let value = cpu.read_operand(mode, penalty);
  add_with_carry(cpu, value);
}

/// Subtract with carry.  Function: A:=A-{adr}-(1-C)  Flags: N V Z C
pub fn sbc(cpu: &mut Cpu, mode: Mode, penalty: u8) {
  let value = cpu.read_operand(mode, penalty);
  add_with_carry(cpu, !value);
}

pub(crate) fn compare(cpu: &mut Cpu, register: u8, value: u8) {
  cpu.p.update_zero_and_negative(register.wrapping_sub(value));
  cpu.p.set(crate::status::StatusFlag::Carry, register >= value);
}

/// Compare A.  Function: A-{adr}  Flags: N Z C
pub fn cmp(cpu: &mut Cpu, mode: Mode, penalty: u8) {
  let value = cpu.read_operand(mode, penalty);
  compare(cpu, cpu.a, value);
}

/// Compare X.  Function: X-{adr}  Flags: N Z C
pub fn cpx(cpu: &mut Cpu, mode: Mode, penalty: u8) {
  let value = cpu.read_operand(mode, penalty);
  compare(cpu, cpu.x, value);
}

/// Compare Y.  Function: Y-{adr}  Flags: N Z C
pub fn cpy(cpu: &mut Cpu, mode: Mode, penalty: u8) {
  let value = cpu.read_operand(mode, penalty);
  compare(cpu, cpu.y, value);
}

/// Decrement memory.  Function: {adr}:={adr}-1  Flags: N Z
pub fn dec(cpu: &mut Cpu, mode: Mode, _penalty: u8) {
  let address = cpu.resolve_write_address(mode);
  let result = cpu.read(address).wrapping_sub(1);
  cpu.write(address, result);
  cpu.p.update_zero_and_negative(result);
}

/// Decrement X.  Function: X:=X-1  Flags: N Z
pub fn dex(cpu: &mut Cpu, _mode: Mode, _penalty: u8) {
  cpu.x = cpu.x.wrapping_sub(1);
  cpu.p.update_zero_and_negative(cpu.x);
}

/// Decrement Y.  Function: Y:=Y-1  Flags: N Z
pub fn dey(cpu: &mut Cpu, _mode: Mode, _penalty: u8) {
  cpu.y = cpu.y.wrapping_sub(1);
  cpu.p.update_zero_and_negative(cpu.y);
}

/// Increment memory.  Function: {adr}:={adr}+1  Flags: N Z
pub fn inc(cpu: &mut Cpu, mode: Mode, _penalty: u8) {
  let address = cpu.resolve_write_address(mode);
  let result = cpu.read(address).wrapping_add(1);
  cpu.write(address, result);
  cpu.p.update_zero_and_negative(result);
}

/// Increment X.  Function: X:=X+1  Flags: N Z
pub fn inx(cpu: &mut Cpu, _mode: Mode, _penalty: u8) {
  cpu.x = cpu.x.wrapping_add(1);
  cpu.p.update_zero_and_negative(cpu.x);
}

/// Increment Y.  Function: Y:=Y+1  Flags: N Z
pub fn iny(cpu: &mut Cpu, _mode: Mode, _penalty: u8) {
  cpu.y = cpu.y.wrapping_add(1);
  cpu.p.update_zero_and_negative(cpu.y);
}

/// Reads the operand for an in-place shift/rotate: either the accumulator,
/// or a resolved memory address (RMW, always deterministic cycle cost).
pub(crate) fn read_rmw_operand(cpu: &mut Cpu, mode: Mode) -> (Option<u16>, u8) {
  if mode == Mode::Accumulator {
    (None, cpu.a)
  } else {
    let address = cpu.resolve_write_address(mode);
    (Some(address), cpu.read(address))
  }
}

pub(crate) fn write_rmw_result(cpu: &mut Cpu, address: Option<u16>, result: u8) {
  match address {
    Some(addr) => cpu.write(addr, result),
    None => cpu.a = result,
  }
  cpu.p.update_zero_and_negative(result);
}

/// Arithmetic shift left.  Function: {adr}:={adr}*2  Flags: N Z C
pub fn asl(cpu: &mut Cpu, mode: Mode, _penalty: u8) {
  let (address, operand) = read_rmw_operand(cpu, mode);
  let result = operand << 1;
  cpu.p.set(crate::status::StatusFlag::Carry, operand & 0b1000_0000 != 0);
  write_rmw_result(cpu, address, result);
}

/// Logical shift right.  Function: {adr}:={adr}/2  Flags: N Z C
pub fn lsr(cpu: &mut Cpu, mode: Mode, _penalty: u8) {
  let (address, operand) = read_rmw_operand(cpu, mode);
  let result = operand >> 1;
  cpu.p.set(crate::status::StatusFlag::Carry, operand & 0b0000_0001 != 0);
  write_rmw_result(cpu, address, result);
}

/// Rotate left through carry.  Function: {adr}:={adr}*2+C  Flags: N Z C
pub fn rol(cpu: &mut Cpu, mode: Mode, _penalty: u8) {
  let (address, operand) = read_rmw_operand(cpu, mode);
  let result = (operand << 1) | cpu.p.carry_bit();
  cpu.p.set(crate::status::StatusFlag::Carry, operand & 0b1000_0000 != 0);
  write_rmw_result(cpu, address, result);
}

/// Rotate right through carry.  Function: {adr}:={adr}/2+C*128  Flags: N Z C
pub fn ror(cpu: &mut Cpu, mode: Mode, _penalty: u8) {
  let (address, operand) = read_rmw_operand(cpu, mode);
  let carry_in = cpu.p.carry_bit();
  let result = (operand >> 1) | (carry_in << 7);
  cpu.p.set(crate::status::StatusFlag::Carry, operand & 0b0000_0001 != 0);
  write_rmw_result(cpu, address, result);
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::cpu::Cpu;

  fn cpu_with(a: u8, carry: bool) -> Cpu {
    let mut cpu = Cpu::new(&[], Some(0xC000));
    cpu.a = a;
    cpu.p.set(crate::status::StatusFlag::Carry, carry);
    cpu
  }

  #[test]
  fn adc_sets_carry_and_overflow_on_signed_overflow() {
    let mut cpu = cpu_with(0x50, false);
    add_with_carry(&mut cpu, 0x50);
    assert_eq!(cpu.a, 0xA0);
    assert!(!cpu.p.get(crate::status::StatusFlag::Carry));
    assert!(cpu.p.get(crate::status::StatusFlag::Overflow));
    assert!(cpu.p.get(crate::status::StatusFlag::Negative));
    assert!(!cpu.p.get(crate::status::StatusFlag::Zero));
  }

  #[test]
  fn sbc_is_adc_of_ones_complement() {
    let mut cpu = cpu_with(0x33, true);
    add_with_carry(&mut cpu, !0x11);
    assert_eq!(cpu.a, 0x22);
    assert!(cpu.p.get(crate::status::StatusFlag::Carry));
  }

  #[test]
  fn rol_then_ror_round_trips() {
    let mut cpu = Cpu::new(&[], Some(0xC000));
    cpu.a = 0b1011_0110;
    cpu.p.set(crate::status::StatusFlag::Carry, true);
    let original = cpu.a;
    let carry_in = cpu.p.get(crate::status::StatusFlag::Carry);
    rol(&mut cpu, Mode::Accumulator, 0);
    ror(&mut cpu, Mode::Accumulator, 0);
    assert_eq!(cpu.a, original);
    assert_eq!(cpu.p.get(crate::status::StatusFlag::Carry), carry_in);
  }
}
