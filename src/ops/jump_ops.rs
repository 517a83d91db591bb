//! Branches, jumps, subroutine linkage, interrupts, and the flag-only /
//! no-operand instructions (flag clear/set, BIT, NOP).
//!
//! JSR pushes `PC-1` (the address of the JSR's last operand byte), not the
//! raw post-fetch PC; RTS pulls that value and adds 1 back. BRK pushes
//! `PC+1` and vectors through `$FFFE`/`$FFFF`, the IRQ/BRK vector.

use crate::cpu::Cpu;
use crate::memory::interrupt_vector;
use crate::opcodes::Mode;
use crate::status::StatusFlag;

fn branch(cpu: &mut Cpu, penalty: u8, taken: bool) {
  let (target, crossed) = cpu.resolve_branch_target();
  if taken {
    cpu.pc = target;
    cpu.cycles += 1;
    if crossed {
      cpu.cycles += penalty as u64;
    }
  }
}

/// Branch on carry clear.
pub fn bcc(cpu: &mut Cpu, _mode: Mode, penalty: u8) {
  let taken = !cpu.p.get(StatusFlag::Carry);
  branch(cpu, penalty, taken);
}

/// Branch on carry set.
pub fn bcs(cpu: &mut Cpu, _mode: Mode, penalty: u8) {
  let taken = cpu.p.get(StatusFlag::Carry);
  branch(cpu, penalty, taken);
}

/// Branch on result zero.
pub fn beq(cpu: &mut Cpu, _mode: Mode, penalty: u8) {
  let taken = cpu.p.get(StatusFlag::Zero);
  branch(cpu, penalty, taken);
}

/// Branch on result minus.
pub fn bmi(cpu: &mut Cpu, _mode: Mode, penalty: u8) {
  let taken = cpu.p.get(StatusFlag::Negative);
  branch(cpu, penalty, taken);
}

/// Branch on result not zero.
pub fn bne(cpu: &mut Cpu, _mode: Mode, penalty: u8) {
  let taken = !cpu.p.get(StatusFlag::Zero);
  branch(cpu, penalty, taken);
}

/// Branch on result plus.
pub fn bpl(cpu: &mut Cpu, _mode: Mode, penalty: u8) {
  let taken = !cpu.p.get(StatusFlag::Negative);
  branch(cpu, penalty, taken);
}

/// Branch on overflow clear.
pub fn bvc(cpu: &mut Cpu, _mode: Mode, penalty: u8) {
  let taken = !cpu.p.get(StatusFlag::Overflow);
  branch(cpu, penalty, taken);
}

/// Branch on overflow set.
pub fn bvs(cpu: &mut Cpu, _mode: Mode, penalty: u8) {
  let taken = cpu.p.get(StatusFlag::Overflow);
  branch(cpu, penalty, taken);
}

/// Test bits in memory against A, without modifying A.
/// Function: A&{adr}  Flags: N V Z (Z from A&M; N,V copied straight from
/// bits 7 and 6 of the memory operand).
pub fn bit(cpu: &mut Cpu, mode: Mode, penalty: u8) {
  let value = cpu.read_operand(mode, penalty);
  cpu.p.set(StatusFlag::Zero, (cpu.a & value) == 0);
  cpu.p.set(StatusFlag::Negative, value & 0b1000_0000 != 0);
  cpu.p.set(StatusFlag::Overflow, value & 0b0100_0000 != 0);
}

/// Clear carry.
pub fn clc(cpu: &mut Cpu, _mode: Mode, _penalty: u8) {
  cpu.p.set(StatusFlag::Carry, false);
}

/// Set carry.
pub fn sec(cpu: &mut Cpu, _mode: Mode, _penalty: u8) {
  cpu.p.set(StatusFlag::Carry, true);
}

/// Clear decimal mode. BCD arithmetic itself is out of scope; the bit is
/// still tracked so NES software that toggles it observes the flag.
pub fn cld(cpu: &mut Cpu, _mode: Mode, _penalty: u8) {
  cpu.p.set(StatusFlag::Decimal, false);
}

/// Set decimal mode.
pub fn sed(cpu: &mut Cpu, _mode: Mode, _penalty: u8) {
  cpu.p.set(StatusFlag::Decimal, true);
}

/// Clear interrupt disable.
pub fn cli(cpu: &mut Cpu, _mode: Mode, _penalty: u8) {
  cpu.p.set(StatusFlag::InterruptDisable, false);
}

/// Set interrupt disable.
pub fn sei(cpu: &mut Cpu, _mode: Mode, _penalty: u8) {
  cpu.p.set(StatusFlag::InterruptDisable, true);
}

/// Clear overflow.
pub fn clv(cpu: &mut Cpu, _mode: Mode, _penalty: u8) {
  cpu.p.set(StatusFlag::Overflow, false);
}

/// No operation; consumes only the bytes and cycles its opcode entry
/// declares. Used both for the official `$EA` and the documented-as-NOP
/// illegal opcodes dispatched through this same handler.
pub fn nop(cpu: &mut Cpu, mode: Mode, penalty: u8) {
  if mode != Mode::Implied {
    // Illegal NOPs still read their operand, for correct cycle/page-cross
    // accounting, and discard the value.
    cpu.read_operand(mode, penalty);
  }
}

/// Jump. Function: PC:={adr}
pub fn jmp(cpu: &mut Cpu, mode: Mode, _penalty: u8) {
  let address = cpu.resolve_write_address(mode);
  cpu.pc = address;
}

/// Jump to subroutine: pushes the address of the *last byte of the JSR
/// instruction* (`PC-1` at the point the operand has been fully fetched),
/// not the address of the next instruction.
/// Function: (S)-:=PC+2,PC:={adr}
pub fn jsr(cpu: &mut Cpu, mode: Mode, _penalty: u8) {
  let address = cpu.resolve_write_address(mode);
  let return_point = cpu.pc.wrapping_sub(1);
  cpu.push_stack_u16(return_point);
  cpu.pc = address;
}

/// Return from subroutine: pulls the pushed `PC-1` and adds 1 back.
/// Function: PC:=+(S)+1
pub fn rts(cpu: &mut Cpu, _mode: Mode, _penalty: u8) {
  let return_point = cpu.pull_stack_u16();
  cpu.pc = return_point.wrapping_add(1);
}

/// Force break: pushes `PC+1`, pushes P with B and U set, sets I, and
/// vectors through `$FFFE`/`$FFFF` — the IRQ/BRK vector, not the reset
/// vector.
/// Function: (S)-:=PC+1,(S)-:=P,I:=1,PC:=($FFFE)
pub fn brk(cpu: &mut Cpu, _mode: Mode, _penalty: u8) {
  let return_point = cpu.pc.wrapping_add(1);
  cpu.push_stack_u16(return_point);
  let pushed = cpu.p.as_pushed_byte();
  cpu.push_stack_u8(pushed);
  cpu.p.set(StatusFlag::InterruptDisable, true);
  cpu.pc = cpu.read(interrupt_vector::IRQ_BRK) as u16
    | ((cpu.read(interrupt_vector::IRQ_BRK + 1) as u16) << 8);
}

/// Return from interrupt: pulls P (forcing Break clear, Unused set) then
/// pulls PC directly, with no +1 — unlike RTS, the pushed PC was never
/// decremented.
/// Function: P:=+(S),PC:=+(S)
pub fn rti(cpu: &mut Cpu, _mode: Mode, _penalty: u8) {
  let pulled_p = cpu.pull_stack_u8();
  cpu.p = crate::status::Status::from_pulled_byte(pulled_p);
  cpu.pc = cpu.pull_stack_u16();
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn brk_pushes_pc_plus_one_and_vectors_through_irq_brk() {
    let mut cpu = Cpu::new(&[], Some(0xC000));
    cpu.write(0xFFFE, 0x00);
    cpu.write(0xFFFF, 0x90);
    cpu.sp = 0xFD;
    brk(&mut cpu, Mode::Implied, 0);
    assert_eq!(cpu.pc, 0x9000);
    assert!(cpu.p.get(StatusFlag::InterruptDisable));
    let pushed_p = cpu.read(0x01FC);
    assert!(pushed_p & (StatusFlag::Break as u8) != 0);
    let pushed_pc = cpu.read(0x01FD) as u16 | ((cpu.read(0x01FE) as u16) << 8);
    assert_eq!(pushed_pc, 0xC001);
  }

  #[test]
  fn rti_restores_pc_without_incrementing() {
    let mut cpu = Cpu::new(&[], Some(0x0000));
    cpu.sp = 0xFD;
    cpu.push_stack_u16(0x8000);
    cpu.push_stack_u8(0b0010_0001);
    rti(&mut cpu, Mode::Implied, 0);
    assert_eq!(cpu.pc, 0x8000);
    assert!(cpu.p.get(StatusFlag::Carry));
  }

  #[test]
  fn bit_copies_bits_7_and_6_and_computes_zero_from_and() {
    let mut cpu = Cpu::new(&[0x00], Some(0xC000));
    cpu.a = 0x00;
    cpu.write(0x00, 0b1100_0000);
    bit(&mut cpu, Mode::ZeroPage, 0);
    assert!(cpu.p.get(StatusFlag::Zero));
    assert!(cpu.p.get(StatusFlag::Negative));
    assert!(cpu.p.get(StatusFlag::Overflow));
  }
}
