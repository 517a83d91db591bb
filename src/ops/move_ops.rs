//! Register-to-register, register-to-memory, and stack move instructions.
//!
//! Raw stores to memory (STA/STX/STY) and `txs` don't touch Z/N — only
//! register writes that count as a "load" do.

use crate::cpu::Cpu;
use crate::opcodes::Mode;

/// Load the value into register A.
/// Function: A:={adr}  Flags: N Z
pub fn lda(cpu: &mut Cpu, mode: Mode, penalty: u8) {
  let value = cpu.read_operand(mode, penalty);
  cpu.a = value;
  cpu.p.update_zero_and_negative(cpu.a);
}

/// Store register A at the resolved address.
/// Function: {adr}:=A  Flags: (none)
pub fn sta(cpu: &mut Cpu, mode: Mode, _penalty: u8) {
  let address = cpu.resolve_write_address(mode);
  cpu.write(address, cpu.a);
}

/// Load register X with the value.
/// Function: X:={adr}  Flags: N Z
pub fn ldx(cpu: &mut Cpu, mode: Mode, penalty: u8) {
  let value = cpu.read_operand(mode, penalty);
  cpu.x = value;
  cpu.p.update_zero_and_negative(cpu.x);
}

/// Store register X at the resolved address.
/// Function: {adr}:=X  Flags: (none)
pub fn stx(cpu: &mut Cpu, mode: Mode, _penalty: u8) {
  let address = cpu.resolve_write_address(mode);
  cpu.write(address, cpu.x);
}

/// Load register Y with the value.
/// Function: Y:={adr}  Flags: N Z
pub fn ldy(cpu: &mut Cpu, mode: Mode, penalty: u8) {
  let value = cpu.read_operand(mode, penalty);
  cpu.y = value;
  cpu.p.update_zero_and_negative(cpu.y);
}

/// Store register Y at the resolved address.
/// Function: {adr}:=Y  Flags: (none)
pub fn sty(cpu: &mut Cpu, mode: Mode, _penalty: u8) {
  let address = cpu.resolve_write_address(mode);
  cpu.write(address, cpu.y);
}

/// Transfer A to X.  Function: X:=A  Flags: N Z
pub fn tax(cpu: &mut Cpu, _mode: Mode, _penalty: u8) {
  cpu.x = cpu.a;
  cpu.p.update_zero_and_negative(cpu.x);
}

/// Transfer X to A.  Function: A:=X  Flags: N Z
pub fn txa(cpu: &mut Cpu, _mode: Mode, _penalty: u8) {
  cpu.a = cpu.x;
  cpu.p.update_zero_and_negative(cpu.a);
}

/// Transfer A to Y.  Function: Y:=A  Flags: N Z
pub fn tay(cpu: &mut Cpu, _mode: Mode, _penalty: u8) {
  cpu.y = cpu.a;
  cpu.p.update_zero_and_negative(cpu.y);
}

/// Transfer Y to A.  Function: A:=Y  Flags: N Z
pub fn tya(cpu: &mut Cpu, _mode: Mode, _penalty: u8) {
  cpu.a = cpu.y;
  cpu.p.update_zero_and_negative(cpu.a);
}

/// Transfer SP to X.  Function: X:=S  Flags: N Z
pub fn tsx(cpu: &mut Cpu, _mode: Mode, _penalty: u8) {
  cpu.x = cpu.sp;
  cpu.p.update_zero_and_negative(cpu.x);
}

/// Transfer X to SP.  Function: S:=X  Flags: (none)
pub fn txs(cpu: &mut Cpu, _mode: Mode, _penalty: u8) {
  cpu.sp = cpu.x;
}

/// Pull A from the stack.  Function: A:=+(S)  Flags: N Z
pub fn pla(cpu: &mut Cpu, _mode: Mode, _penalty: u8) {
  cpu.a = cpu.pull_stack_u8();
  cpu.p.update_zero_and_negative(cpu.a);
}

/// Push A onto the stack.  Function: (S)-:=A  Flags: (none)
pub fn pha(cpu: &mut Cpu, _mode: Mode, _penalty: u8) {
  cpu.push_stack_u8(cpu.a);
}

/// Pull the status register from the stack.
/// Function: P:=+(S)  Flags: N V D I Z C
pub fn plp(cpu: &mut Cpu, _mode: Mode, _penalty: u8) {
  let pulled = cpu.pull_stack_u8();
  cpu.p = crate::status::Status::from_pulled_byte(pulled);
}

/// Push the status register onto the stack (with B and U set).
/// Function: (S)-:=P  Flags: (none)
pub fn php(cpu: &mut Cpu, _mode: Mode, _penalty: u8) {
  let pushed = cpu.p.as_pushed_byte();
  cpu.push_stack_u8(pushed);
}
