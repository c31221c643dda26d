use bitos::BitUtils;

use crate::agu::StepValue;
use crate::ins::{Cond, Ins};
use crate::regs::{ACC_MASK, Acc, ArArp, BkrepFrame, Reg, RnOld, SttMod, SysReg, sign_extend};
use crate::{Exec, Interpreter, Memory, RunError};

/// ALM/ALU operation selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AlmOp {
    Or,
    And,
    Xor,
    Tst0,
    Tst1,
    Cmp,
    Cmpu,
    Add,
    Addl,
    Addh,
    Sub,
    Subl,
    Subh,
    Msu,
    Sqr,
    Sqra,
}

impl AlmOp {
    fn new(bits: u8) -> Self {
        use AlmOp::*;
        [
            Or, And, Xor, Tst0, Tst1, Cmp, Cmpu, Add, Addl, Addh, Sub, Subl, Subh, Msu, Sqr, Sqra,
        ][bits as usize & 0xF]
    }

    /// The subset reachable through the 16-bit ALU encodings.
    fn alu(bits: u8) -> Self {
        use AlmOp::*;
        [Or, And, Xor, Add, Cmp, Sub, Addh, Subh][bits as usize & 7]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AlbOp {
    Set,
    Rst,
    Chng,
    Addv,
    Tst0,
    Tst1,
    Cmpv,
    Subv,
}

impl AlbOp {
    fn new(bits: u8) -> Self {
        use AlbOp::*;
        [Set, Rst, Chng, Addv, Tst0, Tst1, Cmpv, Subv][bits as usize & 7]
    }

    fn modifies(self) -> bool {
        !matches!(self, AlbOp::Tst0 | AlbOp::Tst1 | AlbOp::Cmpv)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModaOp {
    Shr,
    Shr4,
    Shl,
    Shl4,
    Ror,
    Rol,
    Clr,
    Clrr,
    Not,
    Neg,
    Rnd,
    Pacr,
    Inc,
    Dec,
    Copy,
    Reserved,
}

impl ModaOp {
    fn moda4(bits: u8) -> Self {
        use ModaOp::*;
        [
            Shr, Shr4, Shl, Shl4, Ror, Rol, Clr, Clrr, Not, Neg, Rnd, Pacr, Inc, Dec, Copy,
            Reserved,
        ][bits as usize & 0xF]
    }

    fn moda3(bits: u8) -> Self {
        use ModaOp::*;
        [Shr, Shr4, Shl, Shl4, Clr, Clrr, Not, Neg][bits as usize & 7]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MulOp {
    Mpy,
    Mpysu,
    Mac,
    Macsu,
    Macus,
    Macuu,
    Maa,
    Maasu,
}

impl MulOp {
    fn new(bits: u8) -> Self {
        use MulOp::*;
        [Mpy, Mpysu, Mac, Macsu, Macus, Macuu, Maa, Maasu][bits as usize & 7]
    }

    fn short(bits: u8) -> Self {
        use MulOp::*;
        [Mpy, Mac, Maa, Macsu][bits as usize & 3]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SumBase {
    Zero,
    Acc,
    Sv,
    SvRnd,
}

impl SumBase {
    fn new(bits: u8) -> Self {
        [SumBase::Zero, SumBase::Acc, SumBase::Sv, SumBase::SvRnd][bits as usize & 3]
    }
}

/// Per-product configuration of the product-sum network.
#[derive(Debug, Clone, Copy)]
struct PsumCfg {
    align: bool,
    sub: bool,
}

const P_ADD: PsumCfg = PsumCfg {
    align: false,
    sub: false,
};
const P_ADDA: PsumCfg = PsumCfg {
    align: true,
    sub: false,
};
const P_SUB: PsumCfg = PsumCfg {
    align: false,
    sub: true,
};
const P_SUBA: PsumCfg = PsumCfg {
    align: true,
    sub: true,
};

/// Configuration word carried by the MMA expansion word.
#[derive(Debug, Clone, Copy)]
struct MmaCfg {
    base: SumBase,
    p0: PsumCfg,
    p1: PsumCfg,
    x0_sign: bool,
    y0_sign: bool,
    x1_sign: bool,
    y1_sign: bool,
    dmodi: bool,
    dmodj: bool,
}

impl MmaCfg {
    fn new(word: u16) -> Self {
        Self {
            base: SumBase::new(word.bits(0, 2) as u8),
            p0: PsumCfg {
                sub: word.bit(2),
                align: word.bit(3),
            },
            p1: PsumCfg {
                sub: word.bit(4),
                align: word.bit(5),
            },
            x0_sign: word.bit(6),
            y0_sign: word.bit(7),
            x1_sign: word.bit(8),
            y1_sign: word.bit(9),
            dmodi: word.bit(10),
            dmodj: word.bit(11),
        }
    }
}

impl<M: Memory> Interpreter<M> {
    pub(crate) fn undefined(&mut self, ins: Ins) -> Exec {
        Err(RunError::UndefinedInstruction { opcode: ins.base })
    }

    // Shared arithmetic.

    /// 40-bit add/subtract with C/V/LV update.
    fn add_sub40(&mut self, a: u64, b: u64, sub: bool) -> u64 {
        let a = a & ACC_MASK;
        let b = b & ACC_MASK;
        let result = if sub {
            a.wrapping_sub(b)
        } else {
            a.wrapping_add(b)
        };
        self.regs.fc0 = (result >> 40) & 1 != 0;
        let b = if sub { !b } else { b };
        self.regs.fv = ((!(a ^ b) & (a ^ result)) >> 39) & 1 != 0;
        if self.regs.fv {
            self.regs.flv = true;
        }
        sign_extend(40, result)
    }

    fn do_multiplication(&mut self, unit: usize, x_sign: bool, y_sign: bool) {
        let mut x = self.regs.x[unit] as u32;
        let mut y = self.regs.y[unit] as u32;
        // Half-word multiply modes mask the y input.
        if self.regs.hwm == 1 || (self.regs.hwm == 3 && unit == 0) {
            y >>= 8;
        } else if self.regs.hwm == 2 || (self.regs.hwm == 3 && unit == 1) {
            y &= 0xFF;
        }
        if x_sign {
            x = sign_extend(16, x as u64) as u32;
        }
        if y_sign {
            y = sign_extend(16, y as u64) as u32;
        }
        self.regs.p[unit] = x.wrapping_mul(y);
        self.regs.psign[unit] = if x_sign || y_sign {
            (self.regs.p[unit] >> 31) as u16
        } else {
            0
        };
    }

    fn product_sum(&mut self, base: SumBase, acc: Acc, p0: PsumCfg, p1: PsumCfg) {
        let mut value_a = self.regs.product_to_bus40(0);
        let mut value_b = self.regs.product_to_bus40(1);
        if p0.align {
            value_a = sign_extend(24, value_a >> 16);
        }
        if p1.align {
            value_b = sign_extend(24, value_b >> 16);
        }
        let value_c = match base {
            SumBase::Zero => 0,
            SumBase::Acc => self.regs.acc(acc),
            SumBase::Sv => sign_extend(32, (self.regs.sv as u64) << 16),
            SumBase::SvRnd => sign_extend(32, (self.regs.sv as u64) << 16) | 0x8000,
        };
        let result = self.add_sub40(value_c, value_a, p0.sub);
        let temp_c = self.regs.fc0;
        let temp_v = self.regs.fv;
        let result = self.add_sub40(result, value_b, p1.sub);
        if p0.sub == p1.sub {
            self.regs.fc0 |= temp_c;
            self.regs.fv |= temp_v;
        } else {
            self.regs.fc0 ^= temp_c;
            self.regs.fv ^= temp_v;
        }
        self.regs.set_acc(acc, result);
    }

    /// One-step shift of a 40-bit value by a signed amount, through the
    /// read-path saturator.
    fn shift_bus40(&mut self, value: u64, sv: u16, dest: Acc) {
        let mut value = value & ACC_MASK;
        let original_sign = (value >> 39) as u16;
        if sv >> 15 == 0 {
            // Left shift.
            if sv >= 40 {
                if !self.regs.s {
                    self.regs.fv = value != 0;
                    if self.regs.fv {
                        self.regs.flv = true;
                    }
                }
                value = 0;
                self.regs.fc0 = false;
            } else {
                if !self.regs.s {
                    self.regs.fv =
                        sign_extend(40, value) != sign_extend(40 - sv as u32, value);
                    if self.regs.fv {
                        self.regs.flv = true;
                    }
                }
                value <<= sv;
                self.regs.fc0 = value & (1 << 40) != 0;
            }
        } else {
            // Right shift.
            let nsv = (!sv).wrapping_add(1);
            if nsv >= 40 {
                if !self.regs.s {
                    self.regs.fc0 = (value >> 39) & 1 != 0;
                    value = if self.regs.fc0 { ACC_MASK } else { 0 };
                } else {
                    value = 0;
                    self.regs.fc0 = false;
                }
            } else {
                self.regs.fc0 = value & (1 << (nsv - 1)) != 0;
                value >>= nsv;
                if !self.regs.s {
                    value = sign_extend(40 - nsv as u32, value);
                }
            }

            if !self.regs.s {
                self.regs.fv = false;
            }
        }

        let mut value = sign_extend(40, value);
        self.regs.set_acc_flags(value);
        if !self.regs.s && !self.regs.sata {
            if self.regs.fv || sign_extend(32, value) != value {
                self.regs.fls = true;
                value = if original_sign == 1 {
                    0xFFFF_FFFF_8000_0000
                } else {
                    0x7FFF_FFFF
                };
            }
        }
        self.regs.set_acc_raw(dest, value);
    }

    fn exp_value(value: u64) -> u16 {
        let sign = (value >> 39) & 1;
        let mut bit = 38u32;
        let mut count: u16 = 0;
        loop {
            if (value >> bit) & 1 != sign {
                break;
            }
            count += 1;
            if bit == 0 {
                break;
            }
            bit -= 1;
        }
        count.wrapping_sub(8)
    }

    // Memory operand helpers.

    fn mem_imm8_address(&self, ins: Ins) -> u16 {
        (ins.base & 0xFF).wrapping_add((self.regs.page as u16) << 8)
    }

    fn load_mem_imm8(&mut self, ins: Ins) -> u16 {
        let address = self.mem_imm8_address(ins);
        self.mem.data_read(address)
    }

    fn store_mem_imm8(&mut self, ins: Ins, value: u16) {
        let address = self.mem_imm8_address(ins);
        self.mem.data_write(address, value);
    }

    fn load_mem_r7imm16(&mut self, ins: Ins) -> u16 {
        let address = ins.expansion.wrapping_add(self.regs.r[7]);
        self.mem.data_read(address)
    }

    fn store_mem_r7imm16(&mut self, ins: Ins, value: u16) {
        let address = ins.expansion.wrapping_add(self.regs.r[7]);
        self.mem.data_write(address, value);
    }

    fn mem_r7imm7s_address(&self, ins: Ins) -> u16 {
        (sign_extend(7, ins.base.bits(0, 7) as u64) as u16).wrapping_add(self.regs.r[7])
    }

    // ALM family.

    fn extend_operand_for_alm(op: AlmOp, a: u16) -> u64 {
        match op {
            AlmOp::Cmp | AlmOp::Sub | AlmOp::Add => sign_extend(16, a as u64),
            AlmOp::Addh | AlmOp::Subh => sign_extend(32, (a as u64) << 16),
            _ => a as u64,
        }
    }

    fn alm_generic(&mut self, op: AlmOp, a: u64, b: Acc) -> Exec {
        match op {
            AlmOp::Or => {
                let value = sign_extend(40, self.regs.acc(b) | a);
                self.regs.set_acc_no_sat(b, value);
            }
            AlmOp::And => {
                let value = sign_extend(40, self.regs.acc(b) & a);
                self.regs.set_acc_no_sat(b, value);
            }
            AlmOp::Xor => {
                let value = sign_extend(40, self.regs.acc(b) ^ a);
                self.regs.set_acc_no_sat(b, value);
            }
            AlmOp::Tst0 => {
                let value = self.regs.acc(b) & 0xFFFF;
                self.regs.fz = value & a == 0;
            }
            AlmOp::Tst1 => {
                let value = self.regs.acc(b) & 0xFFFF;
                self.regs.fz = value & !a == 0;
            }
            AlmOp::Cmp
            | AlmOp::Cmpu
            | AlmOp::Sub
            | AlmOp::Subl
            | AlmOp::Subh
            | AlmOp::Add
            | AlmOp::Addl
            | AlmOp::Addh => {
                let value = self.regs.acc(b);
                let sub = !matches!(op, AlmOp::Add | AlmOp::Addl | AlmOp::Addh);
                let result = self.add_sub40(value, a, sub);
                if matches!(op, AlmOp::Cmp | AlmOp::Cmpu) {
                    self.regs.set_acc_flags(result);
                } else {
                    self.regs.set_acc(b, result);
                }
            }
            AlmOp::Msu => {
                let value = self.regs.acc(b);
                let product = self.regs.product_to_bus40(0);
                let result = self.add_sub40(value, product, true);
                self.regs.set_acc(b, result);

                self.regs.x[0] = a as u16;
                self.do_multiplication(0, true, true);
            }
            AlmOp::Sqra => {
                let value = self.regs.acc(b);
                let product = self.regs.product_to_bus40(0);
                let result = self.add_sub40(value, product, false);
                self.regs.set_acc(b, result);

                self.regs.x[0] = a as u16;
                self.regs.y[0] = a as u16;
                self.do_multiplication(0, true, true);
            }
            AlmOp::Sqr => {
                self.regs.x[0] = a as u16;
                self.regs.y[0] = a as u16;
                self.do_multiplication(0, true, true);
            }
        }
        Ok(())
    }

    pub(crate) fn alm_mem_imm8(&mut self, ins: Ins) -> Exec {
        let op = AlmOp::new(ins.base.bits(9, 13) as u8);
        let b = Acc::ax(ins.base.bit(8) as u8);
        let value = self.load_mem_imm8(ins);
        self.alm_generic(op, Self::extend_operand_for_alm(op, value), b)
    }

    pub(crate) fn alm_rn(&mut self, ins: Ins) -> Exec {
        let op = AlmOp::new(ins.base.bits(6, 10) as u8);
        let b = Acc::ax(ins.base.bit(5) as u8);
        let unit = ins.base.bits(2, 5) as usize;
        let step = StepValue::zids(ins.base.bits(0, 2) as u8);
        let address = self.regs.rn_address_and_modify(unit, step, false);
        let value = self.mem.data_read(address);
        self.alm_generic(op, Self::extend_operand_for_alm(op, value), b)
    }

    pub(crate) fn alm_reg(&mut self, ins: Ins) -> Exec {
        let op = AlmOp::new(ins.base.bits(6, 10) as u8);
        let b = Acc::ax(ins.base.bit(5) as u8);
        let a = Reg::new(ins.base.bits(0, 5) as u8);

        let bus40_allowed = matches!(
            op,
            AlmOp::Or | AlmOp::And | AlmOp::Xor | AlmOp::Add | AlmOp::Cmp | AlmOp::Sub
        );
        let value = match a {
            Reg::P => {
                if !bus40_allowed {
                    return self.undefined(ins);
                }
                self.regs.product_to_bus40(0)
            }
            Reg::A0 | Reg::A1 | Reg::B0 | Reg::B1 => {
                if !bus40_allowed {
                    return self.undefined(ins);
                }
                let (acc, _) = a.acc().unwrap();
                self.regs.acc(acc)
            }
            _ => {
                let value = self.regs.reg_to_bus16(a, false)?;
                Self::extend_operand_for_alm(op, value)
            }
        };
        self.alm_generic(op, value, b)
    }

    pub(crate) fn alm_r6(&mut self, ins: Ins) -> Exec {
        let op = AlmOp::new(ins.base.bits(1, 5) as u8);
        let b = Acc::ax(ins.base.bit(0) as u8);
        let value = self.regs.r[6];
        self.alm_generic(op, Self::extend_operand_for_alm(op, value), b)
    }

    pub(crate) fn alu_mem_imm16(&mut self, ins: Ins) -> Exec {
        let op = AlmOp::alu(ins.base.bits(4, 7) as u8);
        let b = Acc::ax(ins.base.bit(0) as u8);
        let value = self.mem.data_read(ins.expansion);
        self.alm_generic(op, Self::extend_operand_for_alm(op, value), b)
    }

    pub(crate) fn alu_mem_r7imm16(&mut self, ins: Ins) -> Exec {
        let op = AlmOp::alu(ins.base.bits(4, 7) as u8);
        let b = Acc::ax(ins.base.bit(0) as u8);
        let value = self.load_mem_r7imm16(ins);
        self.alm_generic(op, Self::extend_operand_for_alm(op, value), b)
    }

    pub(crate) fn alu_imm16(&mut self, ins: Ins) -> Exec {
        let op = AlmOp::alu(ins.base.bits(4, 7) as u8);
        let b = Acc::ax(ins.base.bit(0) as u8);
        let value = ins.expansion;
        self.alm_generic(op, Self::extend_operand_for_alm(op, value), b)
    }

    pub(crate) fn alu_imm8(&mut self, ins: Ins) -> Exec {
        let op = AlmOp::alu(ins.base.bits(9, 12) as u8);
        let b = Acc::ax(ins.base.bit(8) as u8);
        let value = ins.base.bits(0, 8);

        // AND with a byte immediate leaves accumulator bits 8..15 alone,
        // while the flags see the fully masked result.
        let and_backup = if op == AlmOp::And {
            self.regs.acc(b) & 0xFF00
        } else {
            0
        };
        self.alm_generic(op, Self::extend_operand_for_alm(op, value), b)?;
        if op == AlmOp::And {
            let and_new = self.regs.acc(b) & 0xFFFF_FFFF_FFFF_00FF;
            self.regs.set_acc_raw(b, and_backup | and_new);
        }
        Ok(())
    }

    pub(crate) fn alu_mem_r7imm7s(&mut self, ins: Ins) -> Exec {
        let op = AlmOp::alu(ins.base.bits(8, 11) as u8);
        let b = Acc::ax(ins.base.bit(7) as u8);
        let address = self.mem_r7imm7s_address(ins);
        let value = self.mem.data_read(address);
        self.alm_generic(op, Self::extend_operand_for_alm(op, value), b)
    }

    // ALB family.

    fn alb_generic(&mut self, op: AlbOp, a: u16, b: u16) -> u16 {
        let result = match op {
            AlbOp::Set => {
                let result = a | b;
                self.regs.fm = result >> 15 != 0;
                result
            }
            AlbOp::Rst => {
                let result = !a & b;
                self.regs.fm = result >> 15 != 0;
                result
            }
            AlbOp::Chng => {
                let result = a ^ b;
                self.regs.fm = result >> 15 != 0;
                result
            }
            AlbOp::Addv => {
                let r = a as u32 + b as u32;
                self.regs.fc0 = r >> 16 != 0;
                self.regs.fm = (sign_extend(16, b as u64) as u32)
                    .wrapping_add(sign_extend(16, a as u64) as u32)
                    >> 31
                    != 0;
                r as u16
            }
            AlbOp::Tst0 => (a & b != 0) as u16,
            AlbOp::Tst1 => (a & !b != 0) as u16,
            AlbOp::Cmpv | AlbOp::Subv => {
                let r = (b as u32).wrapping_sub(a as u32);
                self.regs.fc0 = r >> 16 != 0;
                self.regs.fm = (sign_extend(16, b as u64) as u32)
                    .wrapping_sub(sign_extend(16, a as u64) as u32)
                    >> 31
                    != 0;
                r as u16
            }
        };
        self.regs.fz = result == 0;
        result
    }

    pub(crate) fn alb_mem_imm8(&mut self, ins: Ins) -> Exec {
        let op = AlbOp::new(ins.base.bits(8, 11) as u8);
        let bv = self.load_mem_imm8(ins);
        let result = self.alb_generic(op, ins.expansion, bv);
        if op.modifies() {
            self.store_mem_imm8(ins, result);
        }
        Ok(())
    }

    pub(crate) fn alb_rn(&mut self, ins: Ins) -> Exec {
        let op = AlbOp::new(ins.base.bits(5, 8) as u8);
        let unit = ins.base.bits(2, 5) as usize;
        let step = StepValue::zids(ins.base.bits(0, 2) as u8);
        let address = self.regs.rn_address_and_modify(unit, step, false);
        let bv = self.mem.data_read(address);
        let result = self.alb_generic(op, ins.expansion, bv);
        if op.modifies() {
            self.mem.data_write(address, result);
        }
        Ok(())
    }

    pub(crate) fn alb_reg(&mut self, ins: Ins) -> Exec {
        let op = AlbOp::new(ins.base.bits(5, 8) as u8);
        let b = Reg::new(ins.base.bits(0, 5) as u8);

        let bv = match b {
            Reg::P => (self.regs.product_to_bus40(0) >> 16) as u16,
            Reg::A0 | Reg::A1 | Reg::B0 | Reg::B1 => return self.undefined(ins),
            Reg::A0l | Reg::A1l | Reg::B0l | Reg::B1l => {
                let (acc, _) = b.acc().unwrap();
                self.regs.acc(acc) as u16
            }
            _ => self.regs.reg_to_bus16(b, false)?,
        };
        let result = self.alb_generic(op, ins.expansion, bv);
        if op.modifies() {
            // Accumulator halves bypass the regular bus, its flags and its
            // saturator.
            match b {
                Reg::A0l | Reg::A1l | Reg::B0l | Reg::B1l => {
                    let (acc, _) = b.acc().unwrap();
                    let value = (self.regs.acc(acc) & !0xFFFF) | result as u64;
                    self.regs.set_acc_raw(acc, value);
                }
                Reg::A0h | Reg::A1h | Reg::B0h | Reg::B1h => {
                    let (acc, _) = b.acc().unwrap();
                    let value =
                        (self.regs.acc(acc) & !0xFFFF_0000) | ((result as u64) << 16);
                    self.regs.set_acc_raw(acc, value);
                }
                _ => self.regs.reg_from_bus16(b, result)?,
            }
        }
        Ok(())
    }

    pub(crate) fn alb_r6(&mut self, ins: Ins) -> Exec {
        let op = AlbOp::new(ins.base.bits(0, 3) as u8);
        let bv = self.regs.r[6];
        let result = self.alb_generic(op, ins.expansion, bv);
        if op.modifies() {
            self.regs.r[6] = result;
        }
        Ok(())
    }

    pub(crate) fn alb_sttmod(&mut self, ins: Ins) -> Exec {
        let op = AlbOp::new(ins.base.bits(3, 6) as u8);
        let b = SttMod::new(ins.base.bits(0, 3) as u8);
        let bv = self.regs.sttmod_to_bus16(b);
        let result = self.alb_generic(op, ins.expansion, bv);
        if op.modifies() {
            self.regs.sttmod_from_bus16(b, result);
        }
        Ok(())
    }

    // MODA.

    fn moda(&mut self, op: ModaOp, a: Acc, cond: Cond) -> Exec {
        if !self.regs.condition(cond) {
            return Ok(());
        }
        match op {
            ModaOp::Shr => {
                let value = self.regs.acc(a);
                self.shift_bus40(value, 0xFFFF, a);
            }
            ModaOp::Shr4 => {
                let value = self.regs.acc(a);
                self.shift_bus40(value, 0xFFFC, a);
            }
            ModaOp::Shl => {
                let value = self.regs.acc(a);
                self.shift_bus40(value, 1, a);
            }
            ModaOp::Shl4 => {
                let value = self.regs.acc(a);
                self.shift_bus40(value, 4, a);
            }
            ModaOp::Ror => {
                let mut value = self.regs.acc(a) & ACC_MASK;
                let old_fc = self.regs.fc0;
                self.regs.fc0 = value & 1 != 0;
                value >>= 1;
                value |= (old_fc as u64) << 39;
                self.regs.set_acc_no_sat(a, sign_extend(40, value));
            }
            ModaOp::Rol => {
                let mut value = self.regs.acc(a);
                let old_fc = self.regs.fc0;
                self.regs.fc0 = (value >> 39) & 1 != 0;
                value <<= 1;
                value |= old_fc as u64;
                self.regs.set_acc_no_sat(a, sign_extend(40, value));
            }
            ModaOp::Clr => self.regs.set_acc(a, 0),
            ModaOp::Clrr => self.regs.set_acc(a, 0x8000),
            ModaOp::Not => {
                let result = !self.regs.acc(a);
                self.regs.set_acc_no_sat(a, result);
            }
            ModaOp::Neg => {
                let value = self.regs.acc(a);
                self.regs.fc0 = value != 0;
                self.regs.fv = value == 0xFFFF_FF80_0000_0000;
                if self.regs.fv {
                    self.regs.flv = true;
                }
                let result = sign_extend(40, (!value).wrapping_add(1));
                self.regs.set_acc(a, result);
            }
            ModaOp::Rnd => {
                let value = self.regs.acc(a);
                let result = self.add_sub40(value, 0x8000, false);
                self.regs.set_acc(a, result);
            }
            ModaOp::Pacr => {
                let value = self.regs.product_to_bus40(0);
                let result = self.add_sub40(value, 0x8000, false);
                self.regs.set_acc(a, result);
            }
            ModaOp::Inc => {
                let value = self.regs.acc(a);
                let result = self.add_sub40(value, 1, false);
                self.regs.set_acc(a, result);
            }
            ModaOp::Dec => {
                let value = self.regs.acc(a);
                let result = self.add_sub40(value, 1, true);
                self.regs.set_acc(a, result);
            }
            ModaOp::Copy => {
                let value = self.regs.acc(a.counterpart());
                self.regs.set_acc(a, value);
            }
            ModaOp::Reserved => return Err(RunError::undefined()),
        }
        Ok(())
    }

    pub(crate) fn moda4(&mut self, ins: Ins) -> Exec {
        let op = ModaOp::moda4(ins.base.bits(5, 9) as u8);
        let a = Acc::ax(ins.base.bit(4) as u8);
        let cond = Cond::new(ins.base.bits(0, 4) as u8);
        self.moda(op, a, cond)
    }

    pub(crate) fn moda3(&mut self, ins: Ins) -> Exec {
        let op = ModaOp::moda3(ins.base.bits(5, 8) as u8);
        let a = Acc::bx(ins.base.bit(4) as u8);
        let cond = Cond::new(ins.base.bits(0, 4) as u8);
        self.moda(op, a, cond)
    }

    pub(crate) fn pacr1(&mut self, ins: Ins) -> Exec {
        let a = Acc::ax(ins.base.bit(0) as u8);
        let value = self.regs.product_to_bus40(1);
        let result = self.add_sub40(value, 0x8000, false);
        self.regs.set_acc(a, result);
        Ok(())
    }

    // Shifts.

    pub(crate) fn shfc(&mut self, ins: Ins) -> Exec {
        let a = Acc::ab(ins.base.bits(6, 8) as u8);
        let b = Acc::ab(ins.base.bits(4, 6) as u8);
        let cond = Cond::new(ins.base.bits(0, 4) as u8);
        if self.regs.condition(cond) {
            let value = self.regs.acc(a);
            let sv = self.regs.sv;
            self.shift_bus40(value, sv, b);
        }
        Ok(())
    }

    pub(crate) fn shfi(&mut self, ins: Ins) -> Exec {
        let a = Acc::ab(ins.base.bits(8, 10) as u8);
        let b = Acc::ab(ins.base.bits(6, 8) as u8);
        let sv = sign_extend(6, ins.base.bits(0, 6) as u64) as u16;
        let value = self.regs.acc(a);
        self.shift_bus40(value, sv, b);
        Ok(())
    }

    // Accumulator add/sub/cmp.

    pub(crate) fn add_ab_bx(&mut self, ins: Ins) -> Exec {
        let a = Acc::ab(ins.base.bits(1, 3) as u8);
        let b = Acc::bx(ins.base.bit(0) as u8);
        let result = self.add_sub40(self.regs.acc(b), self.regs.acc(a), false);
        self.regs.set_acc(b, result);
        Ok(())
    }

    pub(crate) fn add_bx_ax(&mut self, ins: Ins) -> Exec {
        let a = Acc::bx(ins.base.bit(1) as u8);
        let b = Acc::ax(ins.base.bit(0) as u8);
        let result = self.add_sub40(self.regs.acc(b), self.regs.acc(a), false);
        self.regs.set_acc(b, result);
        Ok(())
    }

    pub(crate) fn add_p1_ax(&mut self, ins: Ins) -> Exec {
        let b = Acc::ax(ins.base.bit(0) as u8);
        let value = self.regs.product_to_bus40(1);
        let result = self.add_sub40(self.regs.acc(b), value, false);
        self.regs.set_acc(b, result);
        Ok(())
    }

    pub(crate) fn add_px_bx(&mut self, ins: Ins) -> Exec {
        let p = Acc::px(ins.base.bit(1) as u8);
        let b = Acc::bx(ins.base.bit(0) as u8);
        let value = self.regs.product_to_bus40(p);
        let result = self.add_sub40(self.regs.acc(b), value, false);
        self.regs.set_acc(b, result);
        Ok(())
    }

    pub(crate) fn sub_ab_bx(&mut self, ins: Ins) -> Exec {
        let a = Acc::ab(ins.base.bits(1, 3) as u8);
        let b = Acc::bx(ins.base.bit(0) as u8);
        let result = self.add_sub40(self.regs.acc(b), self.regs.acc(a), true);
        self.regs.set_acc(b, result);
        Ok(())
    }

    pub(crate) fn sub_bx_ax(&mut self, ins: Ins) -> Exec {
        let a = Acc::bx(ins.base.bit(1) as u8);
        let b = Acc::ax(ins.base.bit(0) as u8);
        let result = self.add_sub40(self.regs.acc(b), self.regs.acc(a), true);
        self.regs.set_acc(b, result);
        Ok(())
    }

    pub(crate) fn sub_p1_ax(&mut self, ins: Ins) -> Exec {
        let b = Acc::ax(ins.base.bit(0) as u8);
        let value = self.regs.product_to_bus40(1);
        let result = self.add_sub40(self.regs.acc(b), value, true);
        self.regs.set_acc(b, result);
        Ok(())
    }

    pub(crate) fn sub_px_bx(&mut self, ins: Ins) -> Exec {
        let p = Acc::px(ins.base.bit(1) as u8);
        let b = Acc::bx(ins.base.bit(0) as u8);
        let value = self.regs.product_to_bus40(p);
        let result = self.add_sub40(self.regs.acc(b), value, true);
        self.regs.set_acc(b, result);
        Ok(())
    }

    fn cmp_accs(&mut self, a: Acc, b: Acc) {
        let va = self.regs.acc(a);
        let vb = self.regs.acc(b);
        let result = self.add_sub40(vb, va, true);
        self.regs.set_acc_flags(result);
    }

    pub(crate) fn cmp_ax_bx(&mut self, ins: Ins) -> Exec {
        let a = Acc::ax(ins.base.bit(1) as u8);
        let b = Acc::bx(ins.base.bit(0) as u8);
        self.cmp_accs(a, b);
        Ok(())
    }

    pub(crate) fn cmp_b0_b1(&mut self, _: Ins) -> Exec {
        self.cmp_accs(Acc::B0, Acc::B1);
        Ok(())
    }

    pub(crate) fn cmp_b1_b0(&mut self, _: Ins) -> Exec {
        self.cmp_accs(Acc::B1, Acc::B0);
        Ok(())
    }

    pub(crate) fn cmp_bx_ax(&mut self, ins: Ins) -> Exec {
        let a = Acc::bx(ins.base.bit(1) as u8);
        let b = Acc::ax(ins.base.bit(0) as u8);
        self.cmp_accs(a, b);
        Ok(())
    }

    pub(crate) fn cmp_p1_ax(&mut self, ins: Ins) -> Exec {
        let b = Acc::ax(ins.base.bit(0) as u8);
        let va = self.regs.product_to_bus40(1);
        let vb = self.regs.acc(b);
        let result = self.add_sub40(vb, va, true);
        self.regs.set_acc_flags(result);
        Ok(())
    }

    // Product-sum network.

    pub(crate) fn add_p0_p1(&mut self, ins: Ins) -> Exec {
        let c = Acc::ab(ins.base.bits(0, 2) as u8);
        self.product_sum(SumBase::Zero, c, P_ADD, P_ADD);
        Ok(())
    }

    pub(crate) fn add_p0_p1a(&mut self, ins: Ins) -> Exec {
        let c = Acc::ab(ins.base.bits(0, 2) as u8);
        self.product_sum(SumBase::Zero, c, P_ADD, P_ADDA);
        Ok(())
    }

    pub(crate) fn add3_p0_p1(&mut self, ins: Ins) -> Exec {
        let c = Acc::ab(ins.base.bits(0, 2) as u8);
        self.product_sum(SumBase::Acc, c, P_ADD, P_ADD);
        Ok(())
    }

    pub(crate) fn add3_p0_p1a(&mut self, ins: Ins) -> Exec {
        let c = Acc::ab(ins.base.bits(0, 2) as u8);
        self.product_sum(SumBase::Acc, c, P_ADD, P_ADDA);
        Ok(())
    }

    pub(crate) fn add3_p0a_p1a(&mut self, ins: Ins) -> Exec {
        let c = Acc::ab(ins.base.bits(0, 2) as u8);
        self.product_sum(SumBase::Acc, c, P_ADDA, P_ADDA);
        Ok(())
    }

    pub(crate) fn sub_p0_p1(&mut self, ins: Ins) -> Exec {
        let c = Acc::ab(ins.base.bits(0, 2) as u8);
        self.product_sum(SumBase::Zero, c, P_ADD, P_SUB);
        Ok(())
    }

    pub(crate) fn sub_p0_p1a(&mut self, ins: Ins) -> Exec {
        let c = Acc::ab(ins.base.bits(0, 2) as u8);
        self.product_sum(SumBase::Zero, c, P_ADD, P_SUBA);
        Ok(())
    }

    pub(crate) fn sub3_p0_p1(&mut self, ins: Ins) -> Exec {
        let c = Acc::ab(ins.base.bits(0, 2) as u8);
        self.product_sum(SumBase::Acc, c, P_SUB, P_SUB);
        Ok(())
    }

    pub(crate) fn sub3_p0_p1a(&mut self, ins: Ins) -> Exec {
        let c = Acc::ab(ins.base.bits(0, 2) as u8);
        self.product_sum(SumBase::Acc, c, P_SUB, P_SUBA);
        Ok(())
    }

    pub(crate) fn sub3_p0a_p1a(&mut self, ins: Ins) -> Exec {
        let c = Acc::ab(ins.base.bits(0, 2) as u8);
        self.product_sum(SumBase::Acc, c, P_SUBA, P_SUBA);
        Ok(())
    }

    pub(crate) fn addsub_p0_p1(&mut self, ins: Ins) -> Exec {
        let c = Acc::ab(ins.base.bits(0, 2) as u8);
        self.product_sum(SumBase::Acc, c, P_ADD, P_SUB);
        Ok(())
    }

    pub(crate) fn addsub_p1_p0(&mut self, ins: Ins) -> Exec {
        let c = Acc::ab(ins.base.bits(0, 2) as u8);
        self.product_sum(SumBase::Acc, c, P_SUB, P_ADD);
        Ok(())
    }

    pub(crate) fn addsub_p0_p1a(&mut self, ins: Ins) -> Exec {
        let c = Acc::ab(ins.base.bits(0, 2) as u8);
        self.product_sum(SumBase::Acc, c, P_ADD, P_SUBA);
        Ok(())
    }

    pub(crate) fn addsub_p1a_p0(&mut self, ins: Ins) -> Exec {
        let c = Acc::ab(ins.base.bits(0, 2) as u8);
        self.product_sum(SumBase::Acc, c, P_SUB, P_ADDA);
        Ok(())
    }
}

// Multiplier family.
impl<M: Memory> Interpreter<M> {
    fn mul_generic(&mut self, op: MulOp, a: Acc) {
        if !matches!(op, MulOp::Mpy | MulOp::Mpysu) {
            let value = self.regs.acc(a);
            let mut product = self.regs.product_to_bus40(0);
            if matches!(op, MulOp::Maa | MulOp::Maasu) {
                product = sign_extend(24, product >> 16);
            }
            let result = self.add_sub40(value, product, false);
            self.regs.set_acc(a, result);
        }

        match op {
            // "su" names multiply a signed y input by an unsigned x.
            MulOp::Mpy | MulOp::Mac | MulOp::Maa => self.do_multiplication(0, true, true),
            MulOp::Mpysu | MulOp::Macsu | MulOp::Maasu => self.do_multiplication(0, false, true),
            MulOp::Macus => self.do_multiplication(0, true, false),
            MulOp::Macuu => self.do_multiplication(0, false, false),
        }
    }

    pub(crate) fn mul_rn_rn(&mut self, ins: Ins) -> Exec {
        let op = MulOp::new(ins.base.bits(8, 11) as u8);
        let a = Acc::ax(ins.base.bit(7) as u8);
        let y_unit = 4 + ins.base.bit(6) as usize;
        let ys = StepValue::zids(ins.base.bits(4, 6) as u8);
        let x_unit = ins.base.bits(2, 4) as usize;
        let xs = StepValue::zids(ins.base.bits(0, 2) as u8);
        let address_y = self.regs.rn_address_and_modify(y_unit, ys, false);
        let address_x = self.regs.rn_address_and_modify(x_unit, xs, false);
        self.regs.y[0] = self.mem.data_read(address_y);
        self.regs.x[0] = self.mem.data_read(address_x);
        self.mul_generic(op, a);
        Ok(())
    }

    pub(crate) fn mul_rn_imm16(&mut self, ins: Ins) -> Exec {
        let op = MulOp::new(ins.base.bits(6, 9) as u8);
        let a = Acc::ax(ins.base.bit(5) as u8);
        let unit = ins.base.bits(2, 5) as usize;
        let step = StepValue::zids(ins.base.bits(0, 2) as u8);
        let address = self.regs.rn_address_and_modify(unit, step, false);
        self.regs.y[0] = self.mem.data_read(address);
        self.regs.x[0] = ins.expansion;
        self.mul_generic(op, a);
        Ok(())
    }

    pub(crate) fn mul_y0_rn(&mut self, ins: Ins) -> Exec {
        let op = MulOp::new(ins.base.bits(6, 9) as u8);
        let a = Acc::ax(ins.base.bit(5) as u8);
        let unit = ins.base.bits(2, 5) as usize;
        let step = StepValue::zids(ins.base.bits(0, 2) as u8);
        let address = self.regs.rn_address_and_modify(unit, step, false);
        self.regs.x[0] = self.mem.data_read(address);
        self.mul_generic(op, a);
        Ok(())
    }

    pub(crate) fn mul_y0_reg(&mut self, ins: Ins) -> Exec {
        let op = MulOp::new(ins.base.bits(6, 9) as u8);
        let a = Acc::ax(ins.base.bit(5) as u8);
        let x = Reg::new(ins.base.bits(0, 5) as u8);
        self.regs.x[0] = self.regs.reg_to_bus16(x, false)?;
        self.mul_generic(op, a);
        Ok(())
    }

    pub(crate) fn mul_y0_mem_imm8(&mut self, ins: Ins) -> Exec {
        let op = MulOp::short(ins.base.bits(9, 11) as u8);
        let a = Acc::ax(ins.base.bit(8) as u8);
        self.regs.x[0] = self.load_mem_imm8(ins);
        self.mul_generic(op, a);
        Ok(())
    }

    pub(crate) fn mul_y0_r6(&mut self, ins: Ins) -> Exec {
        let op = MulOp::new(ins.base.bits(1, 4) as u8);
        let a = Acc::ax(ins.base.bit(0) as u8);
        self.regs.x[0] = self.regs.r[6];
        self.mul_generic(op, a);
        Ok(())
    }

    pub(crate) fn mpyi(&mut self, ins: Ins) -> Exec {
        self.regs.x[0] = sign_extend(8, ins.base.bits(0, 8) as u64) as u16;
        self.do_multiplication(0, true, true);
        Ok(())
    }

    pub(crate) fn msu(&mut self, ins: Ins) -> Exec {
        let a = Acc::ax(ins.base.bit(7) as u8);
        let y_unit = 4 + ins.base.bit(6) as usize;
        let ys = StepValue::zids(ins.base.bits(4, 6) as u8);
        let x_unit = ins.base.bits(2, 4) as usize;
        let xs = StepValue::zids(ins.base.bits(0, 2) as u8);
        let yi = self.regs.rn_address_and_modify(y_unit, ys, false);
        let xi = self.regs.rn_address_and_modify(x_unit, xs, false);
        let value = self.regs.acc(a);
        let product = self.regs.product_to_bus40(0);
        let result = self.add_sub40(value, product, true);
        self.regs.set_acc(a, result);
        self.regs.y[0] = self.mem.data_read(yi);
        self.regs.x[0] = self.mem.data_read(xi);
        self.do_multiplication(0, true, true);
        Ok(())
    }

    pub(crate) fn msu_rn_imm16(&mut self, ins: Ins) -> Exec {
        let a = Acc::ax(ins.base.bit(5) as u8);
        let unit = ins.base.bits(2, 5) as usize;
        let step = StepValue::zids(ins.base.bits(0, 2) as u8);
        let yi = self.regs.rn_address_and_modify(unit, step, false);
        let value = self.regs.acc(a);
        let product = self.regs.product_to_bus40(0);
        let result = self.add_sub40(value, product, true);
        self.regs.set_acc(a, result);
        self.regs.y[0] = self.mem.data_read(yi);
        self.regs.x[0] = ins.expansion;
        self.do_multiplication(0, true, true);
        Ok(())
    }

    pub(crate) fn msusu(&mut self, ins: Ins) -> Exec {
        let unit = self.regs.ar_rn_unit(ins.base.bits(3, 5) as u8);
        let step = StepValue::ar(self.regs.arstep[ins.base.bits(1, 3) as usize]);
        let a = Acc::ax(ins.base.bit(0) as u8);
        let xi = self.regs.rn_address_and_modify(unit, step, false);
        let value = self.regs.acc(a);
        let product = self.regs.product_to_bus40(0);
        let result = self.add_sub40(value, product, true);
        self.regs.set_acc(a, result);
        self.regs.x[0] = self.mem.data_read(xi);
        self.do_multiplication(0, false, true);
        Ok(())
    }

    pub(crate) fn mac_x1to0(&mut self, ins: Ins) -> Exec {
        let a = Acc::ax(ins.base.bit(0) as u8);
        let value = self.regs.acc(a);
        let product = self.regs.product_to_bus40(0);
        let result = self.add_sub40(value, product, false);
        self.regs.set_acc(a, result);
        self.regs.x[0] = self.regs.x[1];
        self.do_multiplication(0, true, true);
        Ok(())
    }

    pub(crate) fn mac1(&mut self, ins: Ins) -> Exec {
        let (ui, uj) = self.regs.arp_rn_units(ins.base.bit(5) as u8);
        let (si, sj) = self
            .regs
            .arp_steps(ins.base.bits(3, 5) as u8, ins.base.bits(1, 3) as u8);
        let a = Acc::ax(ins.base.bit(0) as u8);
        let i = self.regs.rn_address_and_modify(ui, si, false);
        let j = self.regs.rn_address_and_modify(uj, sj, false);
        let value = self.regs.acc(a);
        let product = self.regs.product_to_bus40(1);
        let result = self.add_sub40(value, product, false);
        self.regs.set_acc(a, result);
        self.regs.x[1] = self.mem.data_read(i);
        self.regs.y[1] = self.mem.data_read(j);
        self.do_multiplication(1, true, true);
        Ok(())
    }

    // MMA: product sum followed by multiplier reload.

    fn mma_finish(&mut self, cfg: MmaCfg) {
        self.do_multiplication(0, cfg.x0_sign, cfg.y0_sign);
        self.do_multiplication(1, cfg.x1_sign, cfg.y1_sign);
    }

    pub(crate) fn mma_swap(&mut self, ins: Ins) -> Exec {
        let a = Acc::ab(ins.base.bits(0, 2) as u8);
        let cfg = MmaCfg::new(ins.expansion);
        self.product_sum(cfg.base, a, cfg.p0, cfg.p1);
        self.regs.x.swap(0, 1);
        self.mma_finish(cfg);
        Ok(())
    }

    pub(crate) fn mma_arp(&mut self, ins: Ins) -> Exec {
        let (ui, uj) = self.regs.arp_rn_units(ins.base.bit(6) as u8);
        let (si, sj) = self
            .regs
            .arp_steps(ins.base.bits(4, 6) as u8, ins.base.bits(2, 4) as u8);
        let (oi, oj) = self
            .regs
            .arp_offsets(ins.base.bits(4, 6) as u8, ins.base.bits(2, 4) as u8);
        let a = Acc::ab(ins.base.bits(0, 2) as u8);
        let cfg = MmaCfg::new(ins.expansion);
        self.product_sum(cfg.base, a, cfg.p0, cfg.p1);
        let x = self.regs.rn_address_and_modify(ui, si, cfg.dmodi);
        let y = self.regs.rn_address_and_modify(uj, sj, cfg.dmodj);
        self.regs.x[0] = self.mem.data_read(x);
        self.regs.y[0] = self.mem.data_read(y);
        let xo = self.regs.offset_address(ui, x, oi, cfg.dmodi);
        let yo = self.regs.offset_address(uj, y, oj, cfg.dmodj);
        self.regs.x[1] = self.mem.data_read(xo);
        self.regs.y[1] = self.mem.data_read(yo);
        self.mma_finish(cfg);
        Ok(())
    }

    pub(crate) fn mma_mx_xy(&mut self, ins: Ins) -> Exec {
        let unit = self.regs.ar_rn_unit(ins.base.bit(3) as u8);
        let step = StepValue::ar(self.regs.arstep[ins.base.bits(1, 3) as usize]);
        let a = Acc::ax(ins.base.bit(0) as u8);
        let cfg = MmaCfg::new(ins.expansion);
        self.product_sum(cfg.base, a, cfg.p0, cfg.p1);
        self.regs.x.swap(0, 1);
        let address = self.regs.rn_address_and_modify(unit, step, false);
        self.regs.y[0] = self.mem.data_read(address);
        self.mma_finish(cfg);
        Ok(())
    }

    pub(crate) fn mma_xy_mx(&mut self, ins: Ins) -> Exec {
        let unit = self.regs.ar_rn_unit(ins.base.bit(3) as u8);
        let step = StepValue::ar(self.regs.arstep[ins.base.bits(1, 3) as usize]);
        let a = Acc::ax(ins.base.bit(0) as u8);
        let cfg = MmaCfg::new(ins.expansion);
        self.product_sum(cfg.base, a, cfg.p0, cfg.p1);
        self.regs.x.swap(0, 1);
        let address = self.regs.rn_address_and_modify(unit, step, false);
        self.regs.y[1] = self.mem.data_read(address);
        self.mma_finish(cfg);
        Ok(())
    }

    pub(crate) fn mma_my_my(&mut self, ins: Ins) -> Exec {
        let n = ins.base.bit(3) as u8;
        let unit = self.regs.ar_rn_unit(n);
        let step = StepValue::ar(self.regs.arstep[ins.base.bits(1, 3) as usize]);
        let offset = self.regs.ar_offset(ins.base.bits(1, 3) as u8);
        let a = Acc::ax(ins.base.bit(0) as u8);
        let cfg = MmaCfg::new(ins.expansion);
        self.product_sum(cfg.base, a, cfg.p0, cfg.p1);
        let address = self.regs.rn_address_and_modify(unit, step, false);
        self.regs.x[0] = self.mem.data_read(address);
        let second = self.regs.offset_address(unit, address, offset, false);
        self.regs.x[1] = self.mem.data_read(second);
        self.mma_finish(cfg);
        Ok(())
    }

    pub(crate) fn mma_mov_axh(&mut self, ins: Ins) -> Exec {
        let u = Acc::ax(ins.base.bit(5) as u8);
        let v = Acc::bx(ins.base.bit(4) as u8);
        let unit = self.regs.ar_rn_unit(ins.base.bit(3) as u8);
        let step = StepValue::ar(self.regs.arstep[ins.base.bits(1, 3) as usize]);
        let offset = self.regs.ar_offset(ins.base.bits(1, 3) as u8);
        let a = Acc::ax(ins.base.bit(0) as u8);
        let cfg = MmaCfg::new(ins.expansion);
        let address = self.regs.rn_address_and_modify(unit, step, false);
        let u_value = (self.regs.saturate_no_flag(self.regs.acc(u), false) >> 16) as u16;
        let v_value = (self.regs.saturate_no_flag(self.regs.acc(v), false) >> 16) as u16;
        // The offset word goes out first.
        let second = self.regs.offset_address(unit, address, offset, false);
        self.mem.data_write(second, v_value);
        self.mem.data_write(address, u_value);
        self.product_sum(cfg.base, a, cfg.p0, cfg.p1);
        self.regs.x.swap(0, 1);
        self.mma_finish(cfg);
        Ok(())
    }

    pub(crate) fn mma_mov_arrn(&mut self, ins: Ins) -> Exec {
        let unit = self.regs.ar_rn_unit(ins.base.bits(3, 5) as u8);
        let step = StepValue::ar(self.regs.arstep[ins.base.bits(1, 3) as usize]);
        let offset = self.regs.ar_offset(ins.base.bits(1, 3) as u8);
        let a = Acc::ax(ins.base.bit(0) as u8);
        let cfg = MmaCfg::new(ins.expansion);
        let address = self.regs.rn_address_and_modify(unit, step, false);
        let u_value = (self.regs.saturate_no_flag(self.regs.acc(a), false) >> 16) as u16;
        let v_value =
            (self.regs.saturate_no_flag(self.regs.acc(a.counterpart()), false) >> 16) as u16;
        let second = self.regs.offset_address(unit, address, offset, false);
        self.mem.data_write(second, v_value);
        self.mem.data_write(address, u_value);
        self.product_sum(cfg.base, a, cfg.p0, cfg.p1);
        self.regs.x.swap(0, 1);
        self.mma_finish(cfg);
        Ok(())
    }

    // Squares.

    pub(crate) fn sqr_sqr_add3_ab(&mut self, ins: Ins) -> Exec {
        let a = Acc::ab(ins.base.bits(2, 4) as u8);
        let b = Acc::ab(ins.base.bits(0, 2) as u8);
        let value = self.regs.acc(a);
        self.product_sum(SumBase::Acc, b, P_ADD, P_ADD);
        self.regs.x[0] = (value >> 16) as u16;
        self.regs.y[0] = (value >> 16) as u16;
        self.regs.x[1] = value as u16;
        self.regs.y[1] = value as u16;
        self.do_multiplication(0, true, true);
        self.do_multiplication(1, true, true);
        Ok(())
    }

    pub(crate) fn sqr_sqr_add3_mem(&mut self, ins: Ins) -> Exec {
        let n = ins.base.bits(4, 6) as u8;
        let sn = ins.base.bits(2, 4) as u8;
        let b = Acc::ab(ins.base.bits(0, 2) as u8);
        self.product_sum(SumBase::Acc, b, P_ADD, P_ADD);
        let unit = self.regs.ar_rn_unit(n);
        let step = StepValue::ar(self.regs.arstep[sn as usize]);
        let offset = self.regs.ar_offset(sn);
        let address0 = self.regs.rn_address_and_modify(unit, step, false);
        let address1 = self.regs.offset_address(unit, address0, offset, false);
        let first = self.mem.data_read(address0);
        let second = self.mem.data_read(address1);
        self.regs.x[0] = first;
        self.regs.y[0] = first;
        self.regs.x[1] = second;
        self.regs.y[1] = second;
        self.do_multiplication(0, true, true);
        self.do_multiplication(1, true, true);
        Ok(())
    }

    pub(crate) fn sqr_mpysu_add3a(&mut self, ins: Ins) -> Exec {
        let a = Acc::ab(ins.base.bits(2, 4) as u8);
        let b = Acc::ab(ins.base.bits(0, 2) as u8);
        let value = self.regs.acc(a);
        self.product_sum(SumBase::Acc, b, P_ADD, P_ADDA);
        self.regs.x[0] = (value >> 16) as u16;
        self.regs.y[0] = (value >> 16) as u16;
        self.regs.y[1] = (value >> 16) as u16;
        self.regs.x[1] = value as u16;
        self.do_multiplication(0, true, true);
        self.do_multiplication(1, false, true);
        Ok(())
    }
}

// Extrema, vector-tracking and codebook search.
impl<M: Memory> Interpreter<M> {
    fn max_min_acc(&mut self, a: Acc, step: StepValue, min: bool, strict: bool) {
        let u = self.regs.acc(a);
        let v = self.regs.acc(a.counterpart());
        let d = if min {
            u.wrapping_sub(v)
        } else {
            v.wrapping_sub(u)
        };
        let r0 = self.regs.rn_and_modify(0, step, false);
        let selected = (d >> 63) & 1 == 0 && (!strict || d != 0);
        if selected {
            self.regs.fm = true;
            self.regs.mixp = r0;
            self.regs.set_acc_raw(a, v);
        } else {
            self.regs.fm = false;
        }
    }

    pub(crate) fn max_ge(&mut self, ins: Ins) -> Exec {
        let a = Acc::ax(ins.base.bit(2) as u8);
        let step = StepValue::zids(ins.base.bits(0, 2) as u8);
        self.max_min_acc(a, step, false, false);
        Ok(())
    }

    pub(crate) fn max_gt(&mut self, ins: Ins) -> Exec {
        let a = Acc::ax(ins.base.bit(2) as u8);
        let step = StepValue::zids(ins.base.bits(0, 2) as u8);
        self.max_min_acc(a, step, false, true);
        Ok(())
    }

    pub(crate) fn min_le(&mut self, ins: Ins) -> Exec {
        let a = Acc::ax(ins.base.bit(2) as u8);
        let step = StepValue::zids(ins.base.bits(0, 2) as u8);
        self.max_min_acc(a, step, true, false);
        Ok(())
    }

    pub(crate) fn min_lt(&mut self, ins: Ins) -> Exec {
        let a = Acc::ax(ins.base.bit(2) as u8);
        let step = StepValue::zids(ins.base.bits(0, 2) as u8);
        self.max_min_acc(a, step, true, true);
        Ok(())
    }

    fn max_min_r0(&mut self, a: Acc, step: StepValue, min: bool, strict: bool) {
        let u = self.regs.acc(a);
        let r0 = self.regs.rn_and_modify(0, step, false);
        let address = self.regs.rn_address(0, r0);
        let v = sign_extend(16, self.mem.data_read(address) as u64);
        let d = if min {
            u.wrapping_sub(v)
        } else {
            v.wrapping_sub(u)
        };
        let selected = (d >> 63) & 1 == 0 && (!strict || d != 0);
        if selected {
            self.regs.fm = true;
            self.regs.mixp = r0;
            self.regs.set_acc_raw(a, v);
        } else {
            self.regs.fm = false;
        }
    }

    pub(crate) fn max_ge_r0(&mut self, ins: Ins) -> Exec {
        let a = Acc::ax(ins.base.bit(2) as u8);
        let step = StepValue::zids(ins.base.bits(0, 2) as u8);
        self.max_min_r0(a, step, false, false);
        Ok(())
    }

    pub(crate) fn max_gt_r0(&mut self, ins: Ins) -> Exec {
        let a = Acc::ax(ins.base.bit(2) as u8);
        let step = StepValue::zids(ins.base.bits(0, 2) as u8);
        self.max_min_r0(a, step, false, true);
        Ok(())
    }

    pub(crate) fn min_le_r0(&mut self, ins: Ins) -> Exec {
        let a = Acc::ax(ins.base.bit(2) as u8);
        let step = StepValue::zids(ins.base.bits(0, 2) as u8);
        self.max_min_r0(a, step, true, false);
        Ok(())
    }

    pub(crate) fn min_lt_r0(&mut self, ins: Ins) -> Exec {
        let a = Acc::ax(ins.base.bit(2) as u8);
        let step = StepValue::zids(ins.base.bits(0, 2) as u8);
        self.max_min_r0(a, step, true, true);
        Ok(())
    }

    /// Per-half signed compare/select feeding the vtr shift pipeline.
    fn min_max_vtr(&mut self, a: Acc, b: Acc, min: bool) {
        let u = self.regs.acc(a);
        let v = self.regs.acc(b);
        let uh = sign_extend(24, u >> 16);
        let ul = sign_extend(16, u & 0xFFFF);
        let vh = sign_extend(24, v >> 16);
        let vl = sign_extend(16, v & 0xFFFF);
        let wh = if min {
            uh.wrapping_sub(vh)
        } else {
            vh.wrapping_sub(uh)
        };
        let wl = if min {
            ul.wrapping_sub(vl)
        } else {
            vl.wrapping_sub(ul)
        };
        self.regs.fc0 = wh >> 63 == 0;
        self.regs.fc1 = wl >> 63 == 0;
        let wh = if self.regs.fc0 { vh } else { uh };
        let wl = if self.regs.fc1 { vl } else { ul };
        let w = (wh << 16) | (wl & 0xFFFF);
        self.regs.set_acc_raw(a, w);
        self.shift_vtr();
    }

    fn shift_vtr(&mut self) {
        self.regs.vtr[0] = (self.regs.vtr[0] >> 1) | ((self.regs.fc0 as u16) << 15);
        self.regs.vtr[1] = (self.regs.vtr[1] >> 1) | ((self.regs.fc1 as u16) << 15);
    }

    pub(crate) fn max2_vtr_ax(&mut self, ins: Ins) -> Exec {
        let a = Acc::ax(ins.base.bit(0) as u8);
        self.min_max_vtr(a, a.counterpart(), false);
        Ok(())
    }

    pub(crate) fn min2_vtr_ax(&mut self, ins: Ins) -> Exec {
        let a = Acc::ax(ins.base.bit(0) as u8);
        self.min_max_vtr(a, a.counterpart(), true);
        Ok(())
    }

    pub(crate) fn max2_vtr_ax_bx(&mut self, ins: Ins) -> Exec {
        let a = Acc::ax(ins.base.bit(1) as u8);
        let b = Acc::bx(ins.base.bit(0) as u8);
        self.min_max_vtr(a, b, false);
        Ok(())
    }

    pub(crate) fn min2_vtr_ax_bx(&mut self, ins: Ins) -> Exec {
        let a = Acc::ax(ins.base.bit(1) as u8);
        let b = Acc::bx(ins.base.bit(0) as u8);
        self.min_max_vtr(a, b, true);
        Ok(())
    }

    pub(crate) fn minmax2_mov(&mut self, ins: Ins) -> Exec {
        let min = ins.base.bit(8);
        let high = ins.base.bit(7);
        let swapped = ins.base.bit(6);
        let ax = Acc::ax(ins.base.bit(5) as u8);
        let bx = Acc::bx(ins.base.bit(4) as u8);
        let n = ins.base.bits(2, 4) as u8;
        let sn = ins.base.bits(0, 2) as u8;
        let (first, second) = if swapped { (bx, ax) } else { (ax, bx) };
        self.min_max_vtr(first, second, min);
        let value = self
            .regs
            .saturate_no_flag(self.regs.acc(first.counterpart()), false);
        let unit = self.regs.ar_rn_unit(n);
        let step = StepValue::ar(self.regs.arstep[sn as usize]);
        let address = self.regs.rn_address_and_modify(unit, step, false);
        let value16 = if high { (value >> 16) as u16 } else { value as u16 };
        self.mem.data_write(address, value16);
        Ok(())
    }

    pub(crate) fn minmax2_mov2(&mut self, ins: Ins) -> Exec {
        let min = ins.base.bit(8);
        let swapped_words = ins.base.bit(7);
        let a = Acc::ax(ins.base.bit(6) as u8);
        let b = Acc::bx(ins.base.bit(5) as u8);
        let arp = ins.base.bit(4) as u8;
        let si = ins.base.bits(2, 4) as u8;
        let sj = ins.base.bits(0, 2) as u8;
        self.min_max_vtr(a, b, min);
        let value = self
            .regs
            .saturate_no_flag(self.regs.acc(a.counterpart()), false);
        let h = (value >> 16) as u16;
        let l = value as u16;
        let (ui, uj) = self.regs.arp_rn_units(arp);
        let (si, sj) = self.regs.arp_steps(si, sj);
        let i = self.regs.rn_address_and_modify(ui, si, false);
        let j = self.regs.rn_address_and_modify(uj, sj, false);
        if swapped_words {
            self.mem.data_write(i, l);
            self.mem.data_write(j, h);
        } else {
            self.mem.data_write(i, h);
            self.mem.data_write(j, l);
        }
        Ok(())
    }

    pub(crate) fn vtrclr0(&mut self, _: Ins) -> Exec {
        self.regs.vtr[0] = 0;
        Ok(())
    }

    pub(crate) fn vtrclr1(&mut self, _: Ins) -> Exec {
        self.regs.vtr[1] = 0;
        Ok(())
    }

    pub(crate) fn vtrclr(&mut self, _: Ins) -> Exec {
        self.regs.vtr = [0; 2];
        Ok(())
    }

    pub(crate) fn vtrshr(&mut self, _: Ins) -> Exec {
        self.shift_vtr();
        Ok(())
    }

    pub(crate) fn vtrmov0(&mut self, ins: Ins) -> Exec {
        let a = Acc::ax(ins.base.bit(0) as u8);
        self.regs.set_acc(a, self.regs.vtr[0] as u64);
        Ok(())
    }

    pub(crate) fn vtrmov1(&mut self, ins: Ins) -> Exec {
        let a = Acc::ax(ins.base.bit(0) as u8);
        self.regs.set_acc(a, self.regs.vtr[1] as u64);
        Ok(())
    }

    pub(crate) fn vtrmov(&mut self, ins: Ins) -> Exec {
        let a = Acc::ax(ins.base.bit(0) as u8);
        let value = (self.regs.vtr[1] & 0xFF00) | (self.regs.vtr[0] >> 8);
        self.regs.set_acc(a, value as u64);
        Ok(())
    }

    fn cbs(&mut self, u: u16, v: u16, r: u16, strict: bool) {
        let x0 = std::mem::replace(&mut self.regs.x[0], u);
        let diff = self
            .regs
            .product_to_bus40(0)
            .wrapping_sub(self.regs.product_to_bus40(1));
        self.regs.y[0] = u;
        self.do_multiplication(0, true, true);
        self.regs.y[0] = (self.regs.product_to_bus40(0) >> 16) as u16;
        self.regs.x[0] = x0;
        let cond = diff >> 63 == 0 && (!strict || diff != 0);
        if cond {
            self.regs.mixp = r;
            // The exchange pairs x0 with y1 rather than y0.
            self.regs.x[0] = self.regs.y[1];
            self.regs.x[1] = self.regs.y[0];
        }
        self.regs.y[1] = v;
        self.do_multiplication(0, true, true);
        self.do_multiplication(1, true, true);
    }

    pub(crate) fn cbs_axh(&mut self, ins: Ins) -> Exec {
        let a = Acc::ax(ins.base.bit(1) as u8);
        let strict = ins.base.bit(0);
        let u = (self.regs.acc(a) >> 16) as u16;
        let v = (self.regs.acc(a.counterpart()) >> 16) as u16;
        let r = self.regs.r[0];
        self.cbs(u, v, r, strict);
        Ok(())
    }

    pub(crate) fn cbs_axh_bxh(&mut self, ins: Ins) -> Exec {
        let a = Acc::ax(ins.base.bit(2) as u8);
        let b = Acc::bx(ins.base.bit(1) as u8);
        let strict = ins.base.bit(0);
        let u = (self.regs.acc(a) >> 16) as u16;
        let v = (self.regs.acc(b) >> 16) as u16;
        let r = self.regs.r[0];
        self.cbs(u, v, r, strict);
        Ok(())
    }

    pub(crate) fn cbs_arp(&mut self, ins: Ins) -> Exec {
        let (ui, uj) = self.regs.arp_rn_units(ins.base.bit(5) as u8);
        let (si, sj) = self
            .regs
            .arp_steps(ins.base.bits(3, 5) as u8, ins.base.bits(1, 3) as u8);
        let strict = ins.base.bit(0);
        let aip = self.regs.rn_and_modify(ui, si, false);
        let ai = self.regs.rn_address(ui, aip);
        let aj = self.regs.rn_address_and_modify(uj, sj, false);
        let u = self.mem.data_read(ai);
        let v = self.mem.data_read(aj);
        self.cbs(u, v, aip, strict);
        Ok(())
    }
}

// Exponent detect, normalization, division step, limiters, bit tests.
impl<M: Memory> Interpreter<M> {
    fn exp_store(&mut self, b: Acc) {
        let value = sign_extend(16, self.regs.sv as u64);
        self.regs.set_acc_raw(b, value);
    }

    pub(crate) fn exp_bx(&mut self, ins: Ins) -> Exec {
        let a = Acc::bx(ins.base.bit(0) as u8);
        self.regs.sv = Self::exp_value(self.regs.acc(a));
        Ok(())
    }

    pub(crate) fn exp_bx_ax(&mut self, ins: Ins) -> Exec {
        let a = Acc::bx(ins.base.bit(1) as u8);
        let b = Acc::ax(ins.base.bit(0) as u8);
        self.regs.sv = Self::exp_value(self.regs.acc(a));
        self.exp_store(b);
        Ok(())
    }

    pub(crate) fn exp_rn(&mut self, ins: Ins) -> Exec {
        let unit = ins.base.bits(2, 5) as usize;
        let step = StepValue::zids(ins.base.bits(0, 2) as u8);
        let address = self.regs.rn_address_and_modify(unit, step, false);
        let value = sign_extend(32, (self.mem.data_read(address) as u64) << 16);
        self.regs.sv = Self::exp_value(value);
        Ok(())
    }

    pub(crate) fn exp_rn_ax(&mut self, ins: Ins) -> Exec {
        let unit = ins.base.bits(3, 6) as usize;
        let step = StepValue::zids(ins.base.bits(1, 3) as u8);
        let b = Acc::ax(ins.base.bit(0) as u8);
        let address = self.regs.rn_address_and_modify(unit, step, false);
        let value = sign_extend(32, (self.mem.data_read(address) as u64) << 16);
        self.regs.sv = Self::exp_value(value);
        self.exp_store(b);
        Ok(())
    }

    fn exp_reg_value(&mut self, a: Reg) -> Result<u64, RunError> {
        Ok(match a {
            Reg::A0 | Reg::A1 | Reg::B0 | Reg::B1 => {
                let (acc, _) = a.acc().unwrap();
                self.regs.acc(acc)
            }
            _ => sign_extend(32, (self.regs.reg_to_bus16(a, false)? as u64) << 16),
        })
    }

    pub(crate) fn exp_reg(&mut self, ins: Ins) -> Exec {
        let a = Reg::new(ins.base.bits(0, 5) as u8);
        let value = self.exp_reg_value(a)?;
        self.regs.sv = Self::exp_value(value);
        Ok(())
    }

    pub(crate) fn exp_reg_ax(&mut self, ins: Ins) -> Exec {
        let a = Reg::new(ins.base.bits(1, 6) as u8);
        let b = Acc::ax(ins.base.bit(0) as u8);
        let value = self.exp_reg_value(a)?;
        self.regs.sv = Self::exp_value(value);
        self.exp_store(b);
        Ok(())
    }

    pub(crate) fn exp_r6(&mut self, _: Ins) -> Exec {
        let value = sign_extend(32, (self.regs.r[6] as u64) << 16);
        self.regs.sv = Self::exp_value(value);
        Ok(())
    }

    pub(crate) fn exp_r6_ax(&mut self, ins: Ins) -> Exec {
        let b = Acc::ax(ins.base.bit(0) as u8);
        let value = sign_extend(32, (self.regs.r[6] as u64) << 16);
        self.regs.sv = Self::exp_value(value);
        self.exp_store(b);
        Ok(())
    }

    pub(crate) fn norm(&mut self, ins: Ins) -> Exec {
        let a = Acc::ax(ins.base.bit(5) as u8);
        let unit = ins.base.bits(2, 5) as usize;
        let step = StepValue::zids(ins.base.bits(0, 2) as u8);
        if !self.regs.fn_ {
            let mut value = self.regs.acc(a);
            self.regs.fv = value != sign_extend(39, value);
            if self.regs.fv {
                self.regs.flv = true;
            }
            value <<= 1;
            self.regs.fc0 = value & (1 << 40) != 0;
            let value = sign_extend(40, value);
            self.regs.set_acc_no_sat(a, value);
            self.regs.rn_and_modify(unit, step, false);
            self.regs.fr = self.regs.r[unit] == 0;
        }
        Ok(())
    }

    pub(crate) fn divs(&mut self, ins: Ins) -> Exec {
        let b = Acc::ax(ins.base.bit(8) as u8);
        let da = self.load_mem_imm8(ins);
        let db = self.regs.acc(b);
        let value = db.wrapping_sub((da as u64) << 15);
        if value >> 63 != 0 {
            self.regs.set_acc_no_sat(b, sign_extend(40, db << 1));
        } else {
            self.regs
                .set_acc_no_sat(b, sign_extend(40, (value << 1).wrapping_add(1)));
        }
        Ok(())
    }

    pub(crate) fn lim(&mut self, ins: Ins) -> Exec {
        let a = Acc::ax(ins.base.bit(1) as u8);
        let b = Acc::ax(ins.base.bit(0) as u8);
        let value = self.regs.acc(a);
        let value = self.regs.saturate_unconditional(value);
        self.regs.set_acc_no_sat(b, value);
        Ok(())
    }

    fn tstb_value(&mut self, value: u16, bit: u16) {
        self.regs.fz = bit < 16 && (value >> bit) & 1 != 0;
    }

    pub(crate) fn tstb_mem_imm8(&mut self, ins: Ins) -> Exec {
        let value = self.load_mem_imm8(ins);
        let bit = ins.expansion & 0xF;
        self.tstb_value(value, bit);
        Ok(())
    }

    pub(crate) fn tstb_rn(&mut self, ins: Ins) -> Exec {
        let unit = ins.base.bits(6, 9) as usize;
        let step = StepValue::zids(ins.base.bits(4, 6) as u8);
        let bit = ins.base.bits(0, 4);
        let address = self.regs.rn_address_and_modify(unit, step, false);
        let value = self.mem.data_read(address);
        self.tstb_value(value, bit);
        Ok(())
    }

    pub(crate) fn tstb_reg(&mut self, ins: Ins) -> Exec {
        let a = Reg::new(ins.base.bits(4, 9) as u8);
        let bit = ins.base.bits(0, 4);
        let value = self.regs.reg_to_bus16(a, false)?;
        self.tstb_value(value, bit);
        Ok(())
    }

    pub(crate) fn tstb_r6(&mut self, ins: Ins) -> Exec {
        let bit = ins.base.bits(0, 4);
        let value = self.regs.r[6];
        self.tstb_value(value, bit);
        Ok(())
    }

    pub(crate) fn tstb_sttmod(&mut self, ins: Ins) -> Exec {
        let a = SttMod::new(ins.base.bits(0, 3) as u8);
        let bit = ins.expansion;
        let value = self.regs.sttmod_to_bus16(a);
        self.tstb_value(value, bit);
        Ok(())
    }

    pub(crate) fn tst4b(&mut self, ins: Ins) -> Exec {
        let n = ins.base.bits(2, 4) as u8;
        let sn = ins.base.bits(0, 2) as u8;
        let unit = self.regs.ar_rn_unit(n);
        let step = StepValue::ar(self.regs.arstep[sn as usize]);
        let address = self.regs.rn_address_and_modify(unit, step, false);
        let value = self.mem.data_read(address);
        let bit = self.regs.acc(Acc::A0) & 0xF;
        let set = (value >> bit) & 1 != 0;
        self.regs.fz = set;
        self.regs.fc0 = set;
        Ok(())
    }

    pub(crate) fn tst4b_ax(&mut self, ins: Ins) -> Exec {
        let n = ins.base.bits(3, 5) as u8;
        let sn = ins.base.bits(1, 3) as u8;
        let c = Acc::ax(ins.base.bit(0) as u8);
        let a = self.regs.acc(Acc::A0);
        let bit = a & 0xF;
        let fv = self.regs.fv;
        let flv = self.regs.flv;
        let fm = self.regs.fm;
        let fn_ = self.regs.fn_;
        let fe = self.regs.fe;
        let sv = self.regs.sv;
        self.shift_bus40(a, sv, c);
        self.regs.fc1 = self.regs.fc0;
        self.regs.fv = fv;
        self.regs.flv = flv;
        self.regs.fm = fm;
        self.regs.fn_ = fn_;
        self.regs.fe = fe;
        let unit = self.regs.ar_rn_unit(n);
        let step = StepValue::ar(self.regs.arstep[sn as usize]);
        let address = self.regs.rn_address_and_modify(unit, step, false);
        let value = self.mem.data_read(address);
        let set = (value >> bit) & 1 != 0;
        self.regs.fz = set;
        self.regs.fc0 = set;
        Ok(())
    }
}

// Moves.
impl<M: Memory> Interpreter<M> {
    pub(crate) fn mov_ab_ab(&mut self, ins: Ins) -> Exec {
        let a = Acc::ab(ins.base.bits(2, 4) as u8);
        let b = Acc::ab(ins.base.bits(0, 2) as u8);
        let value = self.regs.acc(a);
        self.regs.set_acc(b, value);
        Ok(())
    }

    fn abl_to_bus16(&mut self, bits: u8) -> u16 {
        let reg = [Reg::A0l, Reg::A1l, Reg::B0l, Reg::B1l][bits as usize & 3];
        // Infallible for the low-half names.
        self.regs.reg_to_bus16(reg, true).unwrap_or(0)
    }

    fn bus16_to_abl(&mut self, bits: u8, value: u16) {
        let reg = [Reg::A0l, Reg::A1l, Reg::B0l, Reg::B1l][bits as usize & 3];
        let _ = self.regs.reg_from_bus16(reg, value);
    }

    pub(crate) fn mov_x0_abl(&mut self, ins: Ins) -> Exec {
        self.regs.x[0] = self.abl_to_bus16(ins.base.bits(0, 2) as u8);
        Ok(())
    }

    pub(crate) fn mov_x1_abl(&mut self, ins: Ins) -> Exec {
        self.regs.x[1] = self.abl_to_bus16(ins.base.bits(0, 2) as u8);
        Ok(())
    }

    pub(crate) fn mov_y1_abl(&mut self, ins: Ins) -> Exec {
        self.regs.y[1] = self.abl_to_bus16(ins.base.bits(0, 2) as u8);
        Ok(())
    }

    pub(crate) fn mov_icr_to_ab(&mut self, ins: Ins) -> Exec {
        let b = Acc::ab(ins.base.bits(0, 2) as u8);
        let value = self.regs.icr_to_bus16();
        self.regs.set_acc(b, sign_extend(16, value as u64));
        Ok(())
    }

    pub(crate) fn mov_repc_to_ab(&mut self, ins: Ins) -> Exec {
        let b = Acc::ab(ins.base.bits(0, 2) as u8);
        let value = self.regs.repc;
        self.regs.set_acc(b, sign_extend(16, value as u64));
        Ok(())
    }

    pub(crate) fn mov_repc_to_abl(&mut self, ins: Ins) -> Exec {
        let value = self.regs.repc;
        self.bus16_to_abl(ins.base.bits(0, 2) as u8, value);
        Ok(())
    }

    pub(crate) fn mov_repc_abl(&mut self, ins: Ins) -> Exec {
        let value = self.abl_to_bus16(ins.base.bits(0, 2) as u8);
        self.regs.repc = value;
        Ok(())
    }

    pub(crate) fn mov_p0_ab(&mut self, ins: Ins) -> Exec {
        let a = Acc::ab(ins.base.bits(0, 2) as u8);
        let acc = self.regs.acc(a);
        let value = self.regs.saturate(acc, false) as u32;
        self.regs.product_from_bus32(0, value);
        Ok(())
    }

    pub(crate) fn mov_p1_to_ab(&mut self, ins: Ins) -> Exec {
        let b = Acc::ab(ins.base.bits(0, 2) as u8);
        let value = self.regs.product_to_bus40(1);
        self.regs.set_acc(b, value);
        Ok(())
    }

    pub(crate) fn mov_x0_to_ab(&mut self, ins: Ins) -> Exec {
        let b = Acc::ab(ins.base.bits(0, 2) as u8);
        let value = self.regs.x[0];
        self.regs.set_acc(b, sign_extend(16, value as u64));
        Ok(())
    }

    pub(crate) fn mov_x1_to_ab(&mut self, ins: Ins) -> Exec {
        let b = Acc::ab(ins.base.bits(0, 2) as u8);
        let value = self.regs.x[1];
        self.regs.set_acc(b, sign_extend(16, value as u64));
        Ok(())
    }

    pub(crate) fn mov_y1_to_ab(&mut self, ins: Ins) -> Exec {
        let b = Acc::ab(ins.base.bits(0, 2) as u8);
        let value = self.regs.y[1];
        self.regs.set_acc(b, sign_extend(16, value as u64));
        Ok(())
    }

    pub(crate) fn mov_rn_reg(&mut self, ins: Ins) -> Exec {
        let b = Reg::new(ins.base.bits(5, 10) as u8);
        let unit = ins.base.bits(2, 5) as usize;
        let step = StepValue::zids(ins.base.bits(0, 2) as u8);
        let address = self.regs.rn_address_and_modify(unit, step, false);
        let value = self.mem.data_read(address);
        self.regs.reg_from_bus16(b, value)
    }

    pub(crate) fn mov_reg_rn(&mut self, ins: Ins) -> Exec {
        let a = Reg::new(ins.base.bits(5, 10) as u8);
        let unit = ins.base.bits(2, 5) as usize;
        let step = StepValue::zids(ins.base.bits(0, 2) as u8);
        let value = self.regs.reg_to_bus16(a, true)?;
        let address = self.regs.rn_address_and_modify(unit, step, false);
        self.mem.data_write(address, value);
        Ok(())
    }

    pub(crate) fn mov_reg_reg(&mut self, ins: Ins) -> Exec {
        let a = Reg::new(ins.base.bits(5, 10) as u8);
        let b = Reg::new(ins.base.bits(0, 5) as u8);
        match a {
            Reg::P => {
                // The destination degenerates to an a-accumulator select.
                let b = Acc::ax(ins.base.bit(0) as u8);
                let value = self.regs.product_to_bus40(0);
                self.regs.set_acc(b, value);
            }
            Reg::Pc => match b {
                Reg::A0 | Reg::A1 => {
                    let (acc, _) = b.acc().unwrap();
                    self.regs.set_acc(acc, self.regs.pc as u64);
                }
                _ => {
                    let value = self.regs.pc as u16;
                    self.regs.reg_from_bus16(b, value)?;
                }
            },
            _ => {
                let value = self.regs.reg_to_bus16(a, true)?;
                self.regs.reg_from_bus16(b, value)?;
            }
        }
        Ok(())
    }

    pub(crate) fn mov_reg_bx(&mut self, ins: Ins) -> Exec {
        let a = Reg::new(ins.base.bits(1, 6) as u8);
        let b = Acc::bx(ins.base.bit(0) as u8);
        match a {
            Reg::P => {
                let value = self.regs.product_to_bus40(0);
                self.regs.set_acc(b, value);
            }
            Reg::A0 | Reg::A1 => {
                let (acc, _) = a.acc().unwrap();
                let value = self.regs.acc(acc);
                self.regs.set_acc(b, value);
            }
            _ => {
                let value = self.regs.reg_to_bus16(a, true)?;
                self.regs.set_acc(b, sign_extend(16, value as u64));
            }
        }
        Ok(())
    }

    pub(crate) fn mov_ablh_mem_imm8(&mut self, ins: Ins) -> Exec {
        let reg = [
            Reg::A0l,
            Reg::A1l,
            Reg::B0l,
            Reg::B1l,
            Reg::A0h,
            Reg::A1h,
            Reg::B0h,
            Reg::B1h,
        ][ins.base.bits(8, 11) as usize];
        let value = self.regs.reg_to_bus16(reg, true)?;
        self.store_mem_imm8(ins, value);
        Ok(())
    }

    pub(crate) fn mov_mem_imm8_ab(&mut self, ins: Ins) -> Exec {
        let b = Acc::ab(ins.base.bits(8, 10) as u8);
        let value = self.load_mem_imm8(ins);
        self.regs.set_acc(b, sign_extend(16, value as u64));
        Ok(())
    }

    pub(crate) fn mov_mem_imm8_ablh(&mut self, ins: Ins) -> Exec {
        let reg = [
            Reg::A0l,
            Reg::A1l,
            Reg::B0l,
            Reg::B1l,
            Reg::A0h,
            Reg::A1h,
            Reg::B0h,
            Reg::B1h,
        ][ins.base.bits(8, 11) as usize];
        let value = self.load_mem_imm8(ins);
        self.regs.reg_from_bus16(reg, value)
    }

    pub(crate) fn mov_mem_imm8_rnold(&mut self, ins: Ins) -> Exec {
        let b = RnOld::new(ins.base.bits(8, 11) as u8);
        let value = self.load_mem_imm8(ins);
        self.regs.reg_from_bus16(b.reg(), value)
    }

    pub(crate) fn mov_rnold_mem_imm8(&mut self, ins: Ins) -> Exec {
        let a = RnOld::new(ins.base.bits(8, 11) as u8);
        let value = self.regs.reg_to_bus16(a.reg(), false)?;
        self.store_mem_imm8(ins, value);
        Ok(())
    }

    pub(crate) fn mov_axl_mem_imm16(&mut self, ins: Ins) -> Exec {
        let a = [Reg::A0l, Reg::A1l][ins.base.bit(0) as usize];
        let value = self.regs.reg_to_bus16(a, true)?;
        self.mem.data_write(ins.expansion, value);
        Ok(())
    }

    pub(crate) fn mov_axl_mem_r7imm16(&mut self, ins: Ins) -> Exec {
        let a = [Reg::A0l, Reg::A1l][ins.base.bit(0) as usize];
        let value = self.regs.reg_to_bus16(a, true)?;
        self.store_mem_r7imm16(ins, value);
        Ok(())
    }

    pub(crate) fn mov_axl_mem_r7imm7s(&mut self, ins: Ins) -> Exec {
        let a = [Reg::A0l, Reg::A1l][ins.base.bit(7) as usize];
        let value = self.regs.reg_to_bus16(a, true)?;
        let address = self.mem_r7imm7s_address(ins);
        self.mem.data_write(address, value);
        Ok(())
    }

    pub(crate) fn mov_mem_imm16_ax(&mut self, ins: Ins) -> Exec {
        let b = Acc::ax(ins.base.bit(0) as u8);
        let value = self.mem.data_read(ins.expansion);
        self.regs.set_acc(b, sign_extend(16, value as u64));
        Ok(())
    }

    pub(crate) fn mov_mem_r7imm16_ax(&mut self, ins: Ins) -> Exec {
        let b = Acc::ax(ins.base.bit(0) as u8);
        let value = self.load_mem_r7imm16(ins);
        self.regs.set_acc(b, sign_extend(16, value as u64));
        Ok(())
    }

    pub(crate) fn mov_mem_r7imm7s_ax(&mut self, ins: Ins) -> Exec {
        let b = Acc::ax(ins.base.bit(7) as u8);
        let address = self.mem_r7imm7s_address(ins);
        let value = self.mem.data_read(address);
        self.regs.set_acc(b, sign_extend(16, value as u64));
        Ok(())
    }

    pub(crate) fn mov_imm16_reg(&mut self, ins: Ins) -> Exec {
        let b = Reg::new(ins.base.bits(0, 5) as u8);
        self.regs.reg_from_bus16(b, ins.expansion)
    }

    pub(crate) fn mov_imm16_bx(&mut self, ins: Ins) -> Exec {
        let b = Acc::bx(ins.base.bit(0) as u8);
        self.regs.set_acc(b, sign_extend(16, ins.expansion as u64));
        Ok(())
    }

    pub(crate) fn mov_imm16_ararp(&mut self, ins: Ins) -> Exec {
        let b = ArArp::new(ins.base.bits(0, 3) as u8);
        self.regs.ararp_from_bus16(b, ins.expansion);
        Ok(())
    }

    pub(crate) fn mov_imm16_sttmod(&mut self, ins: Ins) -> Exec {
        let b = SttMod::new(ins.base.bits(0, 3) as u8);
        self.regs.sttmod_from_bus16(b, ins.expansion);
        Ok(())
    }

    pub(crate) fn mov_r6_imm16(&mut self, ins: Ins) -> Exec {
        self.regs.r[6] = ins.expansion;
        Ok(())
    }

    pub(crate) fn mov_repc_imm16(&mut self, ins: Ins) -> Exec {
        self.regs.repc = ins.expansion;
        Ok(())
    }

    pub(crate) fn mov_stepi0_imm16(&mut self, ins: Ins) -> Exec {
        self.regs.stepi0 = ins.expansion;
        Ok(())
    }

    pub(crate) fn mov_stepj0_imm16(&mut self, ins: Ins) -> Exec {
        self.regs.stepj0 = ins.expansion;
        Ok(())
    }

    pub(crate) fn mov_imm8s_axh(&mut self, ins: Ins) -> Exec {
        let b = [Reg::A0h, Reg::A1h][ins.base.bit(8) as usize];
        let value = sign_extend(8, ins.base.bits(0, 8) as u64) as u16;
        self.regs.reg_from_bus16(b, value)
    }

    pub(crate) fn mov_imm8_axl(&mut self, ins: Ins) -> Exec {
        let b = [Reg::A0l, Reg::A1l][ins.base.bit(8) as usize];
        let value = ins.base.bits(0, 8);
        self.regs.reg_from_bus16(b, value)
    }

    pub(crate) fn mov_imm8s_rnold(&mut self, ins: Ins) -> Exec {
        let b = RnOld::new(ins.base.bits(8, 11) as u8);
        let value = sign_extend(8, ins.base.bits(0, 8) as u64) as u16;
        self.regs.reg_from_bus16(b.reg(), value)
    }

    pub(crate) fn mov_a0h_stepi0(&mut self, _: Ins) -> Exec {
        let value = self.regs.reg_to_bus16(Reg::A0h, true)?;
        self.regs.stepi0 = value;
        Ok(())
    }

    pub(crate) fn mov_a0h_stepj0(&mut self, _: Ins) -> Exec {
        let value = self.regs.reg_to_bus16(Reg::A0h, true)?;
        self.regs.stepj0 = value;
        Ok(())
    }

    pub(crate) fn mov_stepi0_a0h(&mut self, _: Ins) -> Exec {
        let value = self.regs.stepi0;
        self.regs.reg_from_bus16(Reg::A0h, value)
    }

    pub(crate) fn mov_stepj0_a0h(&mut self, _: Ins) -> Exec {
        let value = self.regs.stepj0;
        self.regs.reg_from_bus16(Reg::A0h, value)
    }

    pub(crate) fn mov_memsp_reg(&mut self, ins: Ins) -> Exec {
        let b = Reg::new(ins.base.bits(0, 5) as u8);
        let value = self.mem.data_read(self.regs.sp);
        self.regs.reg_from_bus16(b, value)
    }

    pub(crate) fn mov_memsp_r6(&mut self, _: Ins) -> Exec {
        self.regs.r[6] = self.mem.data_read(self.regs.sp);
        Ok(())
    }

    pub(crate) fn mov_mixp_reg(&mut self, ins: Ins) -> Exec {
        let b = Reg::new(ins.base.bits(0, 5) as u8);
        let value = self.regs.mixp;
        self.regs.reg_from_bus16(b, value)
    }

    pub(crate) fn mov_reg_mixp(&mut self, ins: Ins) -> Exec {
        let a = Reg::new(ins.base.bits(0, 5) as u8);
        self.regs.mixp = self.regs.reg_to_bus16(a, true)?;
        Ok(())
    }

    pub(crate) fn mov_r6_mixp(&mut self, _: Ins) -> Exec {
        self.regs.mixp = self.regs.r[6];
        Ok(())
    }

    pub(crate) fn mov_mixp_r6(&mut self, _: Ins) -> Exec {
        self.regs.r[6] = self.regs.mixp;
        Ok(())
    }

    pub(crate) fn mov_p0h_reg(&mut self, ins: Ins) -> Exec {
        let b = Reg::new(ins.base.bits(0, 5) as u8);
        let value = (self.regs.product_to_bus40(0) >> 16) as u16;
        self.regs.reg_from_bus16(b, value)
    }

    pub(crate) fn mov_p0h_r6(&mut self, _: Ins) -> Exec {
        self.regs.r[6] = (self.regs.product_to_bus40(0) >> 16) as u16;
        Ok(())
    }

    pub(crate) fn mov_reg_r6(&mut self, ins: Ins) -> Exec {
        let a = Reg::new(ins.base.bits(0, 5) as u8);
        self.regs.r[6] = self.regs.reg_to_bus16(a, true)?;
        Ok(())
    }

    pub(crate) fn mov_r6_reg(&mut self, ins: Ins) -> Exec {
        let b = Reg::new(ins.base.bits(0, 5) as u8);
        let value = self.regs.r[6];
        self.regs.reg_from_bus16(b, value)
    }

    pub(crate) fn mov_r6_rn(&mut self, ins: Ins) -> Exec {
        let unit = ins.base.bits(2, 5) as usize;
        let step = StepValue::zids(ins.base.bits(0, 2) as u8);
        let address = self.regs.rn_address_and_modify(unit, step, false);
        self.regs.r[6] = self.mem.data_read(address);
        Ok(())
    }

    pub(crate) fn mov_r6_to_rn(&mut self, ins: Ins) -> Exec {
        let unit = ins.base.bits(2, 5) as usize;
        let step = StepValue::zids(ins.base.bits(0, 2) as u8);
        let value = self.regs.r[6];
        let address = self.regs.rn_address_and_modify(unit, step, false);
        self.mem.data_write(address, value);
        Ok(())
    }

    // System register transfers.

    fn abl_reg(bits: u8) -> Reg {
        [Reg::A0l, Reg::A1l, Reg::B0l, Reg::B1l][bits as usize & 3]
    }

    pub(crate) fn mov_abl_ararp(&mut self, ins: Ins) -> Exec {
        let a = Self::abl_reg(ins.base.bits(3, 5) as u8);
        let b = ArArp::new(ins.base.bits(0, 3) as u8);
        let value = self.regs.reg_to_bus16(a, true)?;
        self.regs.ararp_from_bus16(b, value);
        Ok(())
    }

    pub(crate) fn mov_abl_sttmod(&mut self, ins: Ins) -> Exec {
        let a = Self::abl_reg(ins.base.bits(3, 5) as u8);
        let b = SttMod::new(ins.base.bits(0, 3) as u8);
        let value = self.regs.reg_to_bus16(a, true)?;
        self.regs.sttmod_from_bus16(b, value);
        Ok(())
    }

    pub(crate) fn mov_ararp_abl(&mut self, ins: Ins) -> Exec {
        let b = Self::abl_reg(ins.base.bits(3, 5) as u8);
        let a = ArArp::new(ins.base.bits(0, 3) as u8);
        let value = self.regs.ararp_to_bus16(a);
        self.regs.reg_from_bus16(b, value)
    }

    pub(crate) fn mov_sttmod_abl(&mut self, ins: Ins) -> Exec {
        let b = Self::abl_reg(ins.base.bits(3, 5) as u8);
        let a = SttMod::new(ins.base.bits(0, 3) as u8);
        let value = self.regs.sttmod_to_bus16(a);
        self.regs.reg_from_bus16(b, value)
    }

    pub(crate) fn mov_repc_to_arrn(&mut self, ins: Ins) -> Exec {
        let n = ins.base.bits(2, 4) as u8;
        let sn = ins.base.bits(0, 2) as u8;
        let unit = self.regs.ar_rn_unit(n);
        let step = StepValue::ar(self.regs.arstep[sn as usize]);
        let address = self.regs.rn_address_and_modify(unit, step, false);
        let value = self.regs.repc;
        self.mem.data_write(address, value);
        Ok(())
    }

    pub(crate) fn mov_repc_arrn(&mut self, ins: Ins) -> Exec {
        let n = ins.base.bits(2, 4) as u8;
        let sn = ins.base.bits(0, 2) as u8;
        let unit = self.regs.ar_rn_unit(n);
        let step = StepValue::ar(self.regs.arstep[sn as usize]);
        let address = self.regs.rn_address_and_modify(unit, step, false);
        self.regs.repc = self.mem.data_read(address);
        Ok(())
    }

    pub(crate) fn mov_ararp_to_arrn(&mut self, ins: Ins) -> Exec {
        let a = ArArp::new(ins.base.bits(4, 7) as u8);
        let n = ins.base.bits(2, 4) as u8;
        let sn = ins.base.bits(0, 2) as u8;
        let unit = self.regs.ar_rn_unit(n);
        let step = StepValue::ar(self.regs.arstep[sn as usize]);
        let address = self.regs.rn_address_and_modify(unit, step, false);
        let value = self.regs.ararp_to_bus16(a);
        self.mem.data_write(address, value);
        Ok(())
    }

    pub(crate) fn mov_sttmod_to_arrn(&mut self, ins: Ins) -> Exec {
        let a = SttMod::new(ins.base.bits(4, 7) as u8);
        let n = ins.base.bits(2, 4) as u8;
        let sn = ins.base.bits(0, 2) as u8;
        let unit = self.regs.ar_rn_unit(n);
        let step = StepValue::ar(self.regs.arstep[sn as usize]);
        let address = self.regs.rn_address_and_modify(unit, step, false);
        let value = self.regs.sttmod_to_bus16(a);
        self.mem.data_write(address, value);
        Ok(())
    }

    pub(crate) fn mov_arrn_ararp(&mut self, ins: Ins) -> Exec {
        let b = ArArp::new(ins.base.bits(4, 7) as u8);
        let n = ins.base.bits(2, 4) as u8;
        let sn = ins.base.bits(0, 2) as u8;
        let unit = self.regs.ar_rn_unit(n);
        let step = StepValue::ar(self.regs.arstep[sn as usize]);
        let address = self.regs.rn_address_and_modify(unit, step, false);
        let value = self.mem.data_read(address);
        self.regs.ararp_from_bus16(b, value);
        Ok(())
    }

    pub(crate) fn mov_arrn_sttmod(&mut self, ins: Ins) -> Exec {
        let b = SttMod::new(ins.base.bits(4, 7) as u8);
        let n = ins.base.bits(2, 4) as u8;
        let sn = ins.base.bits(0, 2) as u8;
        let unit = self.regs.ar_rn_unit(n);
        let step = StepValue::ar(self.regs.arstep[sn as usize]);
        let address = self.regs.rn_address_and_modify(unit, step, false);
        let value = self.mem.data_read(address);
        self.regs.sttmod_from_bus16(b, value);
        Ok(())
    }

    pub(crate) fn mov_repc_to_r7imm16(&mut self, ins: Ins) -> Exec {
        let value = self.regs.repc;
        self.store_mem_r7imm16(ins, value);
        Ok(())
    }

    pub(crate) fn mov_repc_r7imm16(&mut self, ins: Ins) -> Exec {
        self.regs.repc = self.load_mem_r7imm16(ins);
        Ok(())
    }

    pub(crate) fn mov_sysreg_to_r7(&mut self, ins: Ins) -> Exec {
        let a = SysReg::new(ins.base.bits(0, 4) as u8);
        let value = self.regs.sys_to_bus16(a);
        self.store_mem_r7imm16(ins, value);
        Ok(())
    }

    pub(crate) fn mov_r7_to_sysreg(&mut self, ins: Ins) -> Exec {
        let b = SysReg::new(ins.base.bits(0, 4) as u8);
        let value = self.load_mem_r7imm16(ins);
        self.regs.sys_from_bus16(b, value);
        Ok(())
    }
}

// Double-word and paired-pointer moves.
impl<M: Memory> Interpreter<M> {
    pub(crate) fn mova_ab_to_m(&mut self, ins: Ins) -> Exec {
        let a = Acc::ab(ins.base.bits(4, 6) as u8);
        let n = ins.base.bits(2, 4) as u8;
        let sn = ins.base.bits(0, 2) as u8;
        let acc = self.regs.acc(a);
        let value = self.regs.saturate(acc, false);
        let l = value as u16;
        let h = (value >> 16) as u16;
        let unit = self.regs.ar_rn_unit(n);
        let step = StepValue::ar(self.regs.arstep[sn as usize]);
        let offset = self.regs.ar_offset(sn);
        let address = self.regs.rn_address_and_modify(unit, step, false);
        let address2 = self.regs.offset_address(unit, address, offset, false);
        // The offset word must land first; with a zero offset the base word
        // wins.
        self.mem.data_write(address2, l);
        self.mem.data_write(address, h);
        Ok(())
    }

    pub(crate) fn mova_m_to_ab(&mut self, ins: Ins) -> Exec {
        let b = Acc::ab(ins.base.bits(4, 6) as u8);
        let n = ins.base.bits(2, 4) as u8;
        let sn = ins.base.bits(0, 2) as u8;
        let unit = self.regs.ar_rn_unit(n);
        let step = StepValue::ar(self.regs.arstep[sn as usize]);
        let offset = self.regs.ar_offset(sn);
        let address = self.regs.rn_address_and_modify(unit, step, false);
        let address2 = self.regs.offset_address(unit, address, offset, false);
        let l = self.mem.data_read(address2);
        let h = self.mem.data_read(address);
        let value = sign_extend(32, ((h as u64) << 16) | l as u64);
        self.regs.set_acc(b, value);
        Ok(())
    }

    pub(crate) fn mov2_px_to_m(&mut self, ins: Ins) -> Exec {
        let p = Acc::px(ins.base.bit(4) as u8);
        let n = ins.base.bits(2, 4) as u8;
        let sn = ins.base.bits(0, 2) as u8;
        let value = self.regs.p[p];
        let l = value as u16;
        let h = (value >> 16) as u16;
        let unit = self.regs.ar_rn_unit(n);
        let step = StepValue::ar(self.regs.arstep[sn as usize]);
        let offset = self.regs.ar_offset(sn);
        let address = self.regs.rn_address_and_modify(unit, step, false);
        let address2 = self.regs.offset_address(unit, address, offset, false);
        self.mem.data_write(address2, l);
        self.mem.data_write(address, h);
        Ok(())
    }

    pub(crate) fn mov2s_px_to_m(&mut self, ins: Ins) -> Exec {
        let p = Acc::px(ins.base.bit(4) as u8);
        let n = ins.base.bits(2, 4) as u8;
        let sn = ins.base.bits(0, 2) as u8;
        let value = self.regs.product_to_bus40(p);
        let l = value as u16;
        let h = (value >> 16) as u16;
        let unit = self.regs.ar_rn_unit(n);
        let step = StepValue::ar(self.regs.arstep[sn as usize]);
        let offset = self.regs.ar_offset(sn);
        let address = self.regs.rn_address_and_modify(unit, step, false);
        let address2 = self.regs.offset_address(unit, address, offset, false);
        self.mem.data_write(address2, l);
        self.mem.data_write(address, h);
        Ok(())
    }

    pub(crate) fn mov2_m_to_px(&mut self, ins: Ins) -> Exec {
        let p = Acc::px(ins.base.bit(4) as u8);
        let n = ins.base.bits(2, 4) as u8;
        let sn = ins.base.bits(0, 2) as u8;
        let unit = self.regs.ar_rn_unit(n);
        let step = StepValue::ar(self.regs.arstep[sn as usize]);
        let offset = self.regs.ar_offset(sn);
        let address = self.regs.rn_address_and_modify(unit, step, false);
        let address2 = self.regs.offset_address(unit, address, offset, false);
        let l = self.mem.data_read(address2);
        let h = self.mem.data_read(address);
        let value = ((h as u32) << 16) | l as u32;
        self.regs.product_from_bus32(p, value);
        Ok(())
    }

    pub(crate) fn mov2_axh_m(&mut self, ins: Ins) -> Exec {
        let a = Acc::ax(ins.base.bit(4) as u8);
        let n = ins.base.bits(2, 4) as u8;
        let sn = ins.base.bits(0, 2) as u8;
        let acc = self.regs.acc(a);
        let u = (self.regs.saturate_no_flag(acc, false) >> 16) as u16;
        let v = self.regs.y[0];
        let unit = self.regs.ar_rn_unit(n);
        let step = StepValue::ar(self.regs.arstep[sn as usize]);
        let offset = self.regs.ar_offset(sn);
        let ua = self.regs.rn_address_and_modify(unit, step, false);
        let va = self.regs.offset_address(unit, ua, offset, false);
        self.mem.data_write(va, v);
        self.mem.data_write(ua, u);
        Ok(())
    }

    pub(crate) fn mov2_ax_mij(&mut self, ins: Ins) -> Exec {
        let a = Acc::ab(ins.base.bits(5, 7) as u8);
        let (ui, uj) = self.regs.arp_rn_units(ins.base.bit(4) as u8);
        let (si, sj) = self
            .regs
            .arp_steps(ins.base.bits(2, 4) as u8, ins.base.bits(0, 2) as u8);
        let i = self.regs.rn_address_and_modify(ui, si, false);
        let j = self.regs.rn_address_and_modify(uj, sj, false);
        let acc = self.regs.acc(a);
        let value = self.regs.saturate_no_flag(acc, false);
        self.mem.data_write(i, (value >> 16) as u16);
        self.mem.data_write(j, value as u16);
        Ok(())
    }

    pub(crate) fn mov2_ax_mji(&mut self, ins: Ins) -> Exec {
        let a = Acc::ab(ins.base.bits(5, 7) as u8);
        let (ui, uj) = self.regs.arp_rn_units(ins.base.bit(4) as u8);
        let (si, sj) = self
            .regs
            .arp_steps(ins.base.bits(2, 4) as u8, ins.base.bits(0, 2) as u8);
        let i = self.regs.rn_address_and_modify(ui, si, false);
        let j = self.regs.rn_address_and_modify(uj, sj, false);
        let acc = self.regs.acc(a);
        let value = self.regs.saturate_no_flag(acc, false);
        self.mem.data_write(j, (value >> 16) as u16);
        self.mem.data_write(i, value as u16);
        Ok(())
    }

    pub(crate) fn mov2_mij_ax(&mut self, ins: Ins) -> Exec {
        let (ui, uj) = self.regs.arp_rn_units(ins.base.bit(6) as u8);
        let (si, sj) = self
            .regs
            .arp_steps(ins.base.bits(4, 6) as u8, ins.base.bits(2, 4) as u8);
        let b = Acc::ab(ins.base.bits(0, 2) as u8);
        let i = self.regs.rn_address_and_modify(ui, si, false);
        let h = self.mem.data_read(i);
        let j = self.regs.rn_address_and_modify(uj, sj, false);
        let l = self.mem.data_read(j);
        let value = sign_extend(32, ((h as u64) << 16) | l as u64);
        self.regs.set_acc_raw(b, value);
        Ok(())
    }

    pub(crate) fn mov2_mji_ax(&mut self, ins: Ins) -> Exec {
        let (ui, uj) = self.regs.arp_rn_units(ins.base.bit(6) as u8);
        let (si, sj) = self
            .regs
            .arp_steps(ins.base.bits(4, 6) as u8, ins.base.bits(2, 4) as u8);
        let b = Acc::ab(ins.base.bits(0, 2) as u8);
        let i = self.regs.rn_address_and_modify(ui, si, false);
        let l = self.mem.data_read(i);
        let j = self.regs.rn_address_and_modify(uj, sj, false);
        let h = self.mem.data_read(j);
        let value = sign_extend(32, ((h as u64) << 16) | l as u64);
        self.regs.set_acc_raw(b, value);
        Ok(())
    }

    pub(crate) fn mov2_abh_m(&mut self, ins: Ins) -> Exec {
        let x = [Reg::A0h, Reg::A1h, Reg::B0h, Reg::B1h][ins.base.bits(5, 7) as usize];
        let y = [Reg::A0h, Reg::A1h, Reg::B0h, Reg::B1h][ins.base.bits(3, 5) as usize];
        let n = ins.base.bit(2) as u8;
        let sn = ins.base.bits(0, 2) as u8;
        let (x_acc, _) = x.acc().unwrap();
        let (y_acc, _) = y.acc().unwrap();
        let xv = self.regs.acc(x_acc);
        let yv = self.regs.acc(y_acc);
        let u = (self.regs.saturate_no_flag(xv, false) >> 16) as u16;
        let v = (self.regs.saturate_no_flag(yv, false) >> 16) as u16;
        let unit = self.regs.ar_rn_unit(n);
        let step = StepValue::ar(self.regs.arstep[sn as usize]);
        let offset = self.regs.ar_offset(sn);
        let ua = self.regs.rn_address_and_modify(unit, step, false);
        let va = self.regs.offset_address(unit, ua, offset, false);
        self.mem.data_write(va, v);
        self.mem.data_write(ua, u);
        Ok(())
    }

    fn exchange(&mut self, ins: Ins, write_i: bool, round: bool) -> Exec {
        let a = Acc::ax(ins.base.bit(6) as u8);
        let (ui, uj) = self.regs.arp_rn_units(ins.base.bits(4, 6) as u8);
        let (si, sj) = self
            .regs
            .arp_steps(ins.base.bits(2, 4) as u8, ins.base.bits(0, 2) as u8);
        let i = self.regs.rn_address_and_modify(ui, si, false);
        let j = self.regs.rn_address_and_modify(uj, sj, false);
        let acc = self.regs.acc(a);
        let value = self.regs.saturate_no_flag(acc, false);
        let (out, input) = if write_i { (i, j) } else { (j, i) };
        self.mem.data_write(out, (value >> 16) as u16);
        let read = (self.mem.data_read(input) as u64) << 16;
        let read = if round { read | 0x8000 } else { read };
        self.regs.set_acc_raw(a, sign_extend(32, read));
        Ok(())
    }

    pub(crate) fn exchange_iaj(&mut self, ins: Ins) -> Exec {
        self.exchange(ins, false, false)
    }

    pub(crate) fn exchange_riaj(&mut self, ins: Ins) -> Exec {
        self.exchange(ins, false, true)
    }

    pub(crate) fn exchange_jai(&mut self, ins: Ins) -> Exec {
        self.exchange(ins, true, false)
    }

    pub(crate) fn exchange_rjai(&mut self, ins: Ins) -> Exec {
        self.exchange(ins, true, true)
    }
}

// Shift-and-move, rounding moves, program-memory moves.
impl<M: Memory> Interpreter<M> {
    pub(crate) fn movs_mem_imm8_ab(&mut self, ins: Ins) -> Exec {
        let b = Acc::ab(ins.base.bits(8, 10) as u8);
        let value = sign_extend(16, self.load_mem_imm8(ins) as u64);
        let sv = self.regs.sv;
        self.shift_bus40(value, sv, b);
        Ok(())
    }

    pub(crate) fn movs_rn_ab(&mut self, ins: Ins) -> Exec {
        let b = Acc::ab(ins.base.bits(5, 7) as u8);
        let unit = ins.base.bits(2, 5) as usize;
        let step = StepValue::zids(ins.base.bits(0, 2) as u8);
        let address = self.regs.rn_address_and_modify(unit, step, false);
        let value = sign_extend(16, self.mem.data_read(address) as u64);
        let sv = self.regs.sv;
        self.shift_bus40(value, sv, b);
        Ok(())
    }

    pub(crate) fn movs_reg_ab(&mut self, ins: Ins) -> Exec {
        let b = Acc::ab(ins.base.bits(5, 7) as u8);
        let a = Reg::new(ins.base.bits(0, 5) as u8);
        let value = sign_extend(16, self.regs.reg_to_bus16(a, false)? as u64);
        let sv = self.regs.sv;
        self.shift_bus40(value, sv, b);
        Ok(())
    }

    pub(crate) fn movs_r6_ax(&mut self, ins: Ins) -> Exec {
        let b = Acc::ax(ins.base.bit(0) as u8);
        let value = sign_extend(16, self.regs.r[6] as u64);
        let sv = self.regs.sv;
        self.shift_bus40(value, sv, b);
        Ok(())
    }

    pub(crate) fn movsi(&mut self, ins: Ins) -> Exec {
        let a = RnOld::new(ins.base.bits(7, 10) as u8);
        let b = Acc::ab(ins.base.bits(5, 7) as u8);
        let sv = sign_extend(5, ins.base.bits(0, 5) as u64) as u16;
        let value = sign_extend(16, self.regs.reg_to_bus16(a.reg(), false)? as u64);
        self.shift_bus40(value, sv, b);
        Ok(())
    }

    pub(crate) fn movr_arrn_abh(&mut self, ins: Ins) -> Exec {
        let n = ins.base.bits(4, 6) as u8;
        let sn = ins.base.bits(2, 4) as u8;
        let b = Acc::ab(ins.base.bits(0, 2) as u8);
        let unit = self.regs.ar_rn_unit(n);
        let step = StepValue::ar(self.regs.arstep[sn as usize]);
        let address = self.regs.rn_address_and_modify(unit, step, false);
        let value16 = self.mem.data_read(address);
        let value = sign_extend(32, (value16 as u64) << 16);
        let result = self.add_sub40(value, 0x8000, false);
        self.regs.set_acc(b, result);
        Ok(())
    }

    /// 16-bit rounding path: carry comes from bit 16, overflow is forced
    /// clear.
    fn movr_round16(&mut self, value16: u16, b: Acc) {
        let result = value16 as u64 + 0x8000;
        self.regs.fc0 = result >> 16 != 0;
        self.regs.fv = false;
        self.regs.set_acc(b, result & 0xFFFF);
    }

    pub(crate) fn movr_rn_ax(&mut self, ins: Ins) -> Exec {
        let unit = ins.base.bits(3, 6) as usize;
        let step = StepValue::zids(ins.base.bits(1, 3) as u8);
        let b = Acc::ax(ins.base.bit(0) as u8);
        let address = self.regs.rn_address_and_modify(unit, step, false);
        let value16 = self.mem.data_read(address);
        self.movr_round16(value16, b);
        Ok(())
    }

    pub(crate) fn movr_reg_ax(&mut self, ins: Ins) -> Exec {
        let a = Reg::new(ins.base.bits(1, 6) as u8);
        let b = Acc::ax(ins.base.bit(0) as u8);
        match a {
            Reg::A0 | Reg::A1 | Reg::B0 | Reg::B1 => {
                let (acc, _) = a.acc().unwrap();
                let value = self.regs.acc(acc);
                let result = self.add_sub40(value, 0x8000, false);
                self.regs.set_acc(b, result);
            }
            Reg::P => {
                let value = self.regs.product_to_bus40(0);
                let result = self.add_sub40(value, 0x8000, false);
                self.regs.set_acc(b, result);
            }
            _ => {
                let value16 = self.regs.reg_to_bus16(a, false)?;
                self.movr_round16(value16, b);
            }
        }
        Ok(())
    }

    pub(crate) fn movr_bx_ax(&mut self, ins: Ins) -> Exec {
        let a = Acc::bx(ins.base.bit(1) as u8);
        let b = Acc::ax(ins.base.bit(0) as u8);
        let value = self.regs.acc(a);
        let result = self.add_sub40(value, 0x8000, false);
        self.regs.set_acc(b, result);
        Ok(())
    }

    pub(crate) fn movr_r6_ax(&mut self, ins: Ins) -> Exec {
        let b = Acc::ax(ins.base.bit(0) as u8);
        let value16 = self.regs.r[6];
        self.movr_round16(value16, b);
        Ok(())
    }

    pub(crate) fn movd(&mut self, ins: Ins) -> Exec {
        let src = ins.base.bits(5, 7) as usize;
        let src_step = StepValue::zids(ins.base.bits(3, 5) as u8);
        let dst = 4 + ins.base.bit(2) as usize;
        let dst_step = StepValue::zids(ins.base.bits(0, 2) as u8);
        let address_s = self.regs.rn_address_and_modify(src, src_step, false);
        let address_d = self.regs.rn_address_and_modify(dst, dst_step, false) as u32
            | ((self.regs.movpd as u32) << 16);
        let value = self.mem.data_read(address_s);
        self.mem.program_write(address_d, value);
        Ok(())
    }

    pub(crate) fn movp_prog(&mut self, ins: Ins) -> Exec {
        let src = 4 + ins.base.bits(6, 8) as usize;
        let src_step = StepValue::zids(ins.base.bits(4, 6) as u8);
        let dst = ins.base.bits(2, 4) as usize;
        let dst_step = StepValue::zids(ins.base.bits(0, 2) as u8);
        let address_s = self.regs.rn_address_and_modify(src, src_step, false) as u32
            | ((self.regs.movpd as u32) << 16);
        let address_d = self.regs.rn_address_and_modify(dst, dst_step, false);
        let value = self.mem.program_read(address_s);
        self.mem.data_write(address_d, value);
        Ok(())
    }

    pub(crate) fn movp_axl_reg(&mut self, ins: Ins) -> Exec {
        let a = [Reg::A0l, Reg::A1l][ins.base.bit(5) as usize];
        let b = Reg::new(ins.base.bits(0, 5) as u8);
        let address =
            self.regs.reg_to_bus16(a, false)? as u32 | ((self.regs.movpd as u32) << 16);
        let value = self.mem.program_read(address);
        self.regs.reg_from_bus16(b, value)
    }

    pub(crate) fn movp_ax_reg(&mut self, ins: Ins) -> Exec {
        let a = Acc::ax(ins.base.bit(5) as u8);
        let b = Reg::new(ins.base.bits(0, 5) as u8);
        // Computed program addresses never saturate.
        let address = (self.regs.acc(a) & 0x3FFFF) as u32;
        let value = self.mem.program_read(address);
        self.regs.reg_from_bus16(b, value)
    }

    pub(crate) fn movpdw(&mut self, ins: Ins) -> Exec {
        let a = Acc::ax(ins.base.bit(0) as u8);
        let address = (self.regs.acc(a) & 0x3FFFF) as u32;
        let h = self.mem.program_read(address);
        let l = self.mem.program_read(address + 1);
        self.regs.set_pc(l, h);
        Ok(())
    }
}

// Accumulator logic, clears, swap.
impl<M: Memory> Interpreter<M> {
    pub(crate) fn or_ab_ab_ax(&mut self, ins: Ins) -> Exec {
        let a = Acc::ab(ins.base.bits(3, 5) as u8);
        let b = Acc::ab(ins.base.bits(1, 3) as u8);
        let c = Acc::ax(ins.base.bit(0) as u8);
        let value = self.regs.acc(a) | self.regs.acc(b);
        self.regs.set_acc_no_sat(c, value);
        Ok(())
    }

    pub(crate) fn or_ax_bx_ax(&mut self, ins: Ins) -> Exec {
        let a = Acc::ax(ins.base.bit(2) as u8);
        let b = Acc::bx(ins.base.bit(1) as u8);
        let c = Acc::ax(ins.base.bit(0) as u8);
        let value = self.regs.acc(a) | self.regs.acc(b);
        self.regs.set_acc_no_sat(c, value);
        Ok(())
    }

    pub(crate) fn or_bx_bx_ax(&mut self, ins: Ins) -> Exec {
        let a = Acc::bx(ins.base.bit(2) as u8);
        let b = Acc::bx(ins.base.bit(1) as u8);
        let c = Acc::ax(ins.base.bit(0) as u8);
        let value = self.regs.acc(a) | self.regs.acc(b);
        self.regs.set_acc_no_sat(c, value);
        Ok(())
    }

    pub(crate) fn and_ab_ab_ax(&mut self, ins: Ins) -> Exec {
        let a = Acc::ab(ins.base.bits(3, 5) as u8);
        let b = Acc::ab(ins.base.bits(1, 3) as u8);
        let c = Acc::ax(ins.base.bit(0) as u8);
        let value = self.regs.acc(a) & self.regs.acc(b);
        self.regs.set_acc_no_sat(c, value);
        Ok(())
    }

    /// A double clear of the same accumulator redirects the second write to
    /// the paired one.
    fn filter_double_clr(a: u8, b: u8) -> (Acc, Acc) {
        let b = match a {
            0 => 1,
            1 => 0,
            2 => {
                if b == 2 {
                    3
                } else {
                    b
                }
            }
            _ => {
                if b == 1 {
                    1
                } else {
                    0
                }
            }
        };
        (Acc::ab(a), Acc::ab(b))
    }

    pub(crate) fn clr(&mut self, ins: Ins) -> Exec {
        let (a, b) = Self::filter_double_clr(
            ins.base.bits(2, 4) as u8,
            ins.base.bits(0, 2) as u8,
        );
        self.regs.set_acc(a, 0);
        self.regs.set_acc(b, 0);
        Ok(())
    }

    pub(crate) fn clrr(&mut self, ins: Ins) -> Exec {
        let (a, b) = Self::filter_double_clr(
            ins.base.bits(2, 4) as u8,
            ins.base.bits(0, 2) as u8,
        );
        self.regs.set_acc(a, 0x8000);
        self.regs.set_acc(b, 0x8000);
        Ok(())
    }

    pub(crate) fn clrp0(&mut self, _: Ins) -> Exec {
        self.regs.product_from_bus32(0, 0);
        Ok(())
    }

    pub(crate) fn clrp1(&mut self, _: Ins) -> Exec {
        self.regs.product_from_bus32(1, 0);
        Ok(())
    }

    pub(crate) fn clrp(&mut self, _: Ins) -> Exec {
        self.regs.product_from_bus32(0, 0);
        self.regs.product_from_bus32(1, 0);
        Ok(())
    }

    pub(crate) fn swap(&mut self, ins: Ins) -> Exec {
        use Acc::*;
        let (s0, d0, s1, d1) = match ins.base.bits(0, 4) {
            0 => (A0, B0, B0, A0),
            1 => (A0, B1, B1, A0),
            2 => (A1, B0, B0, A1),
            3 => (A1, B1, B1, A1),
            4 => {
                let u = self.regs.acc(A1);
                let v = self.regs.acc(B1);
                self.regs.set_acc(A1, v);
                self.regs.set_acc(B1, u);
                (A0, B0, B0, A0)
            }
            5 => {
                let u = self.regs.acc(A1);
                let v = self.regs.acc(B0);
                self.regs.set_acc(A1, v);
                self.regs.set_acc(B0, u);
                (A0, B1, B1, A0)
            }
            6 => (A0, B0, B0, A1),
            7 => (A0, B1, B1, A1),
            8 => (A1, B0, B0, A0),
            9 => (A1, B1, B1, A0),
            10 => (A0, B1, B0, A0),
            11 => (A1, B1, B0, A1),
            12 => (A0, B0, B1, A0),
            13 => (A1, B0, B1, A1),
            _ => return self.undefined(ins),
        };
        let u = self.regs.acc(s0);
        let v = self.regs.acc(s1);
        self.regs.set_acc(d0, u);
        self.regs.set_acc(d1, v);
        Ok(())
    }
}

// Paired-memory add/sub network.
impl<M: Memory> Interpreter<M> {
    fn arp_pair_addresses(
        &mut self,
        arp: u8,
        si_bits: u8,
        sj_bits: u8,
    ) -> (usize, usize, u16, u16) {
        let (ui, uj) = self.regs.arp_rn_units(arp);
        let (si, sj) = self.regs.arp_steps(si_bits, sj_bits);
        let i = self.regs.rn_address_and_modify(ui, si, false);
        let j = self.regs.rn_address_and_modify(uj, sj, false);
        (ui, uj, i, j)
    }

    fn add_sub_paired(&mut self, ins: Ins, sub_high: bool, sub_low: bool) -> Exec {
        let arp = ins.base.bit(6) as u8;
        let si_bits = ins.base.bits(4, 6) as u8;
        let sj_bits = ins.base.bits(2, 4) as u8;
        let b = Acc::ab(ins.base.bits(0, 2) as u8);
        let (oi, oj) = self.regs.arp_offsets(si_bits, sj_bits);
        let (ui, uj, i, j) = self.arp_pair_addresses(arp, si_bits, sj_bits);
        let vj = sign_extend(16, self.mem.data_read(j) as u64);
        let vi = sign_extend(16, self.mem.data_read(i) as u64);
        let high = if sub_high {
            vj.wrapping_sub(vi)
        } else {
            vj.wrapping_add(vi)
        };
        let joff = self.regs.offset_address(uj, j, oj, false);
        let ioff = self.regs.offset_address(ui, i, oi, false);
        let wj = self.mem.data_read(joff);
        let wi = self.mem.data_read(ioff);
        let low = if sub_low {
            wj.wrapping_sub(wi)
        } else {
            wj.wrapping_add(wi)
        };
        let result = (high << 16) | low as u64;
        self.regs.set_acc_raw(b, result);
        Ok(())
    }

    pub(crate) fn add_add(&mut self, ins: Ins) -> Exec {
        self.add_sub_paired(ins, false, false)
    }

    pub(crate) fn add_sub_mem(&mut self, ins: Ins) -> Exec {
        self.add_sub_paired(ins, false, true)
    }

    pub(crate) fn sub_add(&mut self, ins: Ins) -> Exec {
        self.add_sub_paired(ins, true, false)
    }

    pub(crate) fn sub_sub(&mut self, ins: Ins) -> Exec {
        self.add_sub_paired(ins, true, true)
    }

    fn add_sub_sv_common(&mut self, ins: Ins, sub_low: bool) -> Exec {
        let n = ins.base.bit(4) as u8;
        let sn = ins.base.bits(2, 4) as u8;
        let b = Acc::ab(ins.base.bits(0, 2) as u8);
        let unit = self.regs.ar_rn_unit(n);
        let step = StepValue::ar(self.regs.arstep[sn as usize]);
        let offset = self.regs.ar_offset(sn);
        let address = self.regs.rn_address_and_modify(unit, step, false);
        let sv = self.regs.sv;
        let high16 = sign_extend(16, self.mem.data_read(address) as u64);
        let svx = sign_extend(16, sv as u64);
        let high = if sub_low {
            high16.wrapping_sub(svx)
        } else {
            high16.wrapping_add(svx)
        };
        let off = self.regs.offset_address(unit, address, offset, false);
        let low16 = self.mem.data_read(off);
        let low = if sub_low {
            low16.wrapping_add(sv)
        } else {
            low16.wrapping_sub(sv)
        };
        let result = (high << 16) | low as u64;
        self.regs.set_acc_raw(b, result);
        Ok(())
    }

    pub(crate) fn add_sub_sv(&mut self, ins: Ins) -> Exec {
        self.add_sub_sv_common(ins, false)
    }

    pub(crate) fn sub_add_sv(&mut self, ins: Ins) -> Exec {
        self.add_sub_sv_common(ins, true)
    }

    pub(crate) fn sub_add_i_mov_j_sv(&mut self, ins: Ins) -> Exec {
        let arp = ins.base.bit(6) as u8;
        let si_bits = ins.base.bits(4, 6) as u8;
        let sj_bits = ins.base.bits(2, 4) as u8;
        let b = Acc::ab(ins.base.bits(0, 2) as u8);
        let (oi, _) = self.regs.arp_offsets(si_bits, sj_bits);
        let (ui, _uj, i, j) = self.arp_pair_addresses(arp, si_bits, sj_bits);
        let sv = self.regs.sv;
        let high = sign_extend(16, self.mem.data_read(i) as u64)
            .wrapping_sub(sign_extend(16, sv as u64));
        let ioff = self.regs.offset_address(ui, i, oi, false);
        let low = self.mem.data_read(ioff).wrapping_add(sv);
        let result = (high << 16) | low as u64;
        self.regs.set_acc_raw(b, result);
        self.regs.sv = self.mem.data_read(j);
        Ok(())
    }

    pub(crate) fn sub_add_j_mov_i_sv(&mut self, ins: Ins) -> Exec {
        let arp = ins.base.bit(6) as u8;
        let si_bits = ins.base.bits(4, 6) as u8;
        let sj_bits = ins.base.bits(2, 4) as u8;
        let b = Acc::ab(ins.base.bits(0, 2) as u8);
        let (_, oj) = self.regs.arp_offsets(si_bits, sj_bits);
        let (_ui, uj, i, j) = self.arp_pair_addresses(arp, si_bits, sj_bits);
        let sv = self.regs.sv;
        let high = sign_extend(16, self.mem.data_read(j) as u64)
            .wrapping_sub(sign_extend(16, sv as u64));
        let joff = self.regs.offset_address(uj, j, oj, false);
        let low = self.mem.data_read(joff).wrapping_add(sv);
        let result = (high << 16) | low as u64;
        self.regs.set_acc_raw(b, result);
        self.regs.sv = self.mem.data_read(i);
        Ok(())
    }

    pub(crate) fn add_sub_i_mov_j(&mut self, ins: Ins) -> Exec {
        let arp = ins.base.bit(6) as u8;
        let si_bits = ins.base.bits(4, 6) as u8;
        let sj_bits = ins.base.bits(2, 4) as u8;
        let b = Acc::ab(ins.base.bits(0, 2) as u8);
        let (oi, _) = self.regs.arp_offsets(si_bits, sj_bits);
        let (ui, _uj, i, j) = self.arp_pair_addresses(arp, si_bits, sj_bits);
        let sv = self.regs.sv;
        let high = sign_extend(16, self.mem.data_read(i) as u64)
            .wrapping_add(sign_extend(16, sv as u64));
        let ioff = self.regs.offset_address(ui, i, oi, false);
        let low = self.mem.data_read(ioff).wrapping_sub(sv);
        let result = (high << 16) | low as u64;
        let acc = self.regs.acc(b);
        let exchange = self.regs.saturate_no_flag(acc, false) as u16;
        self.regs.set_acc_raw(b, result);
        self.mem.data_write(j, exchange);
        Ok(())
    }

    pub(crate) fn add_sub_j_mov_i(&mut self, ins: Ins) -> Exec {
        let arp = ins.base.bit(6) as u8;
        let si_bits = ins.base.bits(4, 6) as u8;
        let sj_bits = ins.base.bits(2, 4) as u8;
        let b = Acc::ab(ins.base.bits(0, 2) as u8);
        let (_, oj) = self.regs.arp_offsets(si_bits, sj_bits);
        let (_ui, uj, i, j) = self.arp_pair_addresses(arp, si_bits, sj_bits);
        let sv = self.regs.sv;
        let high = sign_extend(16, self.mem.data_read(j) as u64)
            .wrapping_add(sign_extend(16, sv as u64));
        let joff = self.regs.offset_address(uj, j, oj, false);
        let low = self.mem.data_read(joff).wrapping_sub(sv);
        let result = (high << 16) | low as u64;
        let acc = self.regs.acc(b);
        let exchange = self.regs.saturate_no_flag(acc, false) as u16;
        self.regs.set_acc_raw(b, result);
        self.mem.data_write(i, exchange);
        Ok(())
    }

    pub(crate) fn addhp(&mut self, ins: Ins) -> Exec {
        let n = ins.base.bits(4, 6) as u8;
        let sn = ins.base.bits(2, 4) as u8;
        let p = Acc::px(ins.base.bit(1) as u8);
        let c = Acc::ax(ins.base.bit(0) as u8);
        let unit = self.regs.ar_rn_unit(n);
        let step = StepValue::ar(self.regs.arstep[sn as usize]);
        let address = self.regs.rn_address_and_modify(unit, step, false);
        let value =
            sign_extend(32, ((self.mem.data_read(address) as u64) << 16) | 0x8000);
        let product = self.regs.product_to_bus40(p);
        let result = self.add_sub40(value, product, false);
        self.regs.set_acc(c, result);
        Ok(())
    }

    fn mov_productsum_sv(&mut self, ins: Ins, base: SumBase, p1: PsumCfg) -> Exec {
        let n = ins.base.bit(3) as u8;
        let sn = ins.base.bits(1, 3) as u8;
        let b = Acc::bx(ins.base.bit(0) as u8);
        let unit = self.regs.ar_rn_unit(n);
        let step = StepValue::ar(self.regs.arstep[sn as usize]);
        let address = self.regs.rn_address_and_modify(unit, step, false);
        self.regs.sv = self.mem.data_read(address);
        self.product_sum(base, b, P_SUB, p1);
        Ok(())
    }

    pub(crate) fn mov_addsub_sv(&mut self, ins: Ins) -> Exec {
        self.mov_productsum_sv(ins, SumBase::Sv, P_ADD)
    }

    pub(crate) fn mov_addsub_rnd_sv(&mut self, ins: Ins) -> Exec {
        self.mov_productsum_sv(ins, SumBase::SvRnd, P_ADD)
    }

    pub(crate) fn mov_sub3_sv(&mut self, ins: Ins) -> Exec {
        self.mov_productsum_sv(ins, SumBase::Sv, P_SUB)
    }

    pub(crate) fn mov_sub3_rnd_sv(&mut self, ins: Ins) -> Exec {
        self.mov_productsum_sv(ins, SumBase::SvRnd, P_SUB)
    }
}

// Pointer-register instructions.
impl<M: Memory> Interpreter<M> {
    fn modr_flags(&mut self, unit: usize) {
        self.regs.fr = self.regs.r[unit] == 0;
    }

    pub(crate) fn modr(&mut self, ins: Ins) -> Exec {
        let unit = ins.base.bits(2, 5) as usize;
        let step = StepValue::zids(ins.base.bits(0, 2) as u8);
        self.regs.rn_and_modify(unit, step, false);
        self.modr_flags(unit);
        Ok(())
    }

    pub(crate) fn modr_dmod(&mut self, ins: Ins) -> Exec {
        let unit = ins.base.bits(2, 5) as usize;
        let step = StepValue::zids(ins.base.bits(0, 2) as u8);
        self.regs.rn_and_modify(unit, step, true);
        self.modr_flags(unit);
        Ok(())
    }

    pub(crate) fn modr_i2(&mut self, ins: Ins) -> Exec {
        let unit = ins.base.bits(0, 3) as usize;
        self.regs
            .rn_and_modify(unit, StepValue::Increase2Mode1, false);
        self.modr_flags(unit);
        Ok(())
    }

    pub(crate) fn modr_i2_dmod(&mut self, ins: Ins) -> Exec {
        let unit = ins.base.bits(0, 3) as usize;
        self.regs
            .rn_and_modify(unit, StepValue::Increase2Mode1, true);
        self.modr_flags(unit);
        Ok(())
    }

    pub(crate) fn modr_d2(&mut self, ins: Ins) -> Exec {
        let unit = ins.base.bits(0, 3) as usize;
        self.regs
            .rn_and_modify(unit, StepValue::Decrease2Mode1, false);
        self.modr_flags(unit);
        Ok(())
    }

    pub(crate) fn modr_d2_dmod(&mut self, ins: Ins) -> Exec {
        let unit = ins.base.bits(0, 3) as usize;
        self.regs
            .rn_and_modify(unit, StepValue::Decrease2Mode1, true);
        self.modr_flags(unit);
        Ok(())
    }

    fn modr_pair(&mut self, ins: Ins, dmodi: bool, dmodj: bool) -> Exec {
        let (ui, uj) = self.regs.arp_rn_units(ins.base.bits(4, 6) as u8);
        let (si, sj) = self
            .regs
            .arp_steps(ins.base.bits(2, 4) as u8, ins.base.bits(0, 2) as u8);
        self.regs.rn_and_modify(ui, si, dmodi);
        self.regs.rn_and_modify(uj, sj, dmodj);
        Ok(())
    }

    pub(crate) fn modr_eemod(&mut self, ins: Ins) -> Exec {
        self.modr_pair(ins, false, false)
    }

    pub(crate) fn modr_edmod(&mut self, ins: Ins) -> Exec {
        self.modr_pair(ins, false, true)
    }

    pub(crate) fn modr_demod(&mut self, ins: Ins) -> Exec {
        self.modr_pair(ins, true, false)
    }

    pub(crate) fn modr_ddmod(&mut self, ins: Ins) -> Exec {
        self.modr_pair(ins, true, true)
    }

    pub(crate) fn bitrev(&mut self, ins: Ins) -> Exec {
        let unit = ins.base.bits(0, 3) as usize;
        self.regs.r[unit] = self.regs.r[unit].reverse_bits();
        Ok(())
    }

    pub(crate) fn bitrev_dbrv(&mut self, ins: Ins) -> Exec {
        let unit = ins.base.bits(0, 3) as usize;
        self.regs.r[unit] = self.regs.r[unit].reverse_bits();
        self.regs.brv[unit] = false;
        Ok(())
    }

    pub(crate) fn bitrev_ebrv(&mut self, ins: Ins) -> Exec {
        let unit = ins.base.bits(0, 3) as usize;
        self.regs.r[unit] = self.regs.r[unit].reverse_bits();
        self.regs.brv[unit] = true;
        Ok(())
    }

    pub(crate) fn load_ps(&mut self, ins: Ins) -> Exec {
        self.regs.ps[0] = ins.base.bits(0, 2) as u8;
        Ok(())
    }

    pub(crate) fn load_ps01(&mut self, ins: Ins) -> Exec {
        self.regs.ps[0] = ins.base.bits(0, 2) as u8;
        self.regs.ps[1] = ins.base.bits(2, 4) as u8;
        Ok(())
    }

    pub(crate) fn load_movpd(&mut self, ins: Ins) -> Exec {
        self.regs.movpd = ins.base.bits(0, 2) as u8;
        Ok(())
    }

    pub(crate) fn load_stepi(&mut self, ins: Ins) -> Exec {
        self.regs.stepi = ins.base.bits(0, 7);
        Ok(())
    }

    pub(crate) fn load_stepj(&mut self, ins: Ins) -> Exec {
        self.regs.stepj = ins.base.bits(0, 7);
        Ok(())
    }

    pub(crate) fn load_page(&mut self, ins: Ins) -> Exec {
        self.regs.page = ins.base.bits(0, 8) as u8;
        Ok(())
    }

    pub(crate) fn load_modi(&mut self, ins: Ins) -> Exec {
        self.regs.modi = ins.base.bits(0, 9);
        Ok(())
    }

    pub(crate) fn load_modj(&mut self, ins: Ins) -> Exec {
        self.regs.modj = ins.base.bits(0, 9);
        Ok(())
    }
}

// Control flow.
impl<M: Memory> Interpreter<M> {
    pub(crate) fn br(&mut self, ins: Ins) -> Exec {
        let cond = Cond::new(ins.base.bits(0, 4) as u8);
        if self.regs.condition(cond) {
            let h = ins.base.bits(4, 6);
            self.regs.set_pc(ins.expansion, h);
        }
        Ok(())
    }

    pub(crate) fn brr(&mut self, ins: Ins) -> Exec {
        let cond = Cond::new(ins.base.bits(0, 4) as u8);
        if self.regs.condition(cond) {
            // pc already points at the next instruction.
            let delta = sign_extend(7, ins.base.bits(4, 11) as u64) as u32;
            self.regs.pc = self.regs.pc.wrapping_add(delta);
        }
        Ok(())
    }

    pub(crate) fn call(&mut self, ins: Ins) -> Exec {
        let cond = Cond::new(ins.base.bits(0, 4) as u8);
        if self.regs.condition(cond) {
            self.push_pc();
            let h = ins.base.bits(4, 6);
            self.regs.set_pc(ins.expansion, h);
        }
        Ok(())
    }

    pub(crate) fn callr(&mut self, ins: Ins) -> Exec {
        let cond = Cond::new(ins.base.bits(0, 4) as u8);
        if self.regs.condition(cond) {
            self.push_pc();
            let delta = sign_extend(7, ins.base.bits(4, 11) as u64) as u32;
            self.regs.pc = self.regs.pc.wrapping_add(delta);
        }
        Ok(())
    }

    pub(crate) fn calla_axl(&mut self, ins: Ins) -> Exec {
        let a = [Reg::A0l, Reg::A1l][ins.base.bit(0) as usize];
        self.push_pc();
        let target = self.regs.reg_to_bus16(a, false)? as u32;
        self.set_pc_checked(target)
    }

    pub(crate) fn calla_ax(&mut self, ins: Ins) -> Exec {
        let a = Acc::ax(ins.base.bit(0) as u8);
        self.push_pc();
        let target = (self.regs.acc(a) & 0x3FFFF) as u32;
        self.set_pc_checked(target)
    }

    pub(crate) fn ret(&mut self, ins: Ins) -> Exec {
        let cond = Cond::new(ins.base.bits(0, 4) as u8);
        if self.regs.condition(cond) {
            self.pop_pc();
        }
        Ok(())
    }

    pub(crate) fn reti(&mut self, ins: Ins) -> Exec {
        let cond = Cond::new(ins.base.bits(0, 4) as u8);
        if self.regs.condition(cond) {
            self.pop_pc();
            self.regs.ie = true;
        }
        Ok(())
    }

    pub(crate) fn retic(&mut self, ins: Ins) -> Exec {
        let cond = Cond::new(ins.base.bits(0, 4) as u8);
        if self.regs.condition(cond) {
            self.pop_pc();
            self.regs.ie = true;
            self.regs.context_restore();
        }
        Ok(())
    }

    pub(crate) fn rets(&mut self, ins: Ins) -> Exec {
        self.pop_pc();
        self.regs.sp = self.regs.sp.wrapping_add(ins.base.bits(0, 8));
        Ok(())
    }

    pub(crate) fn mov_pc_ax(&mut self, ins: Ins) -> Exec {
        let a = Acc::ax(ins.base.bit(0) as u8);
        let value = self.regs.acc(a);
        self.set_pc_checked((value & 0xFFFF_FFFF) as u32)
    }

    pub(crate) fn mov_pc_bx(&mut self, ins: Ins) -> Exec {
        let a = Acc::bx(ins.base.bit(0) as u8);
        let value = self.regs.acc(a);
        self.set_pc_checked((value & 0xFFFF_FFFF) as u32)
    }

    pub(crate) fn dint(&mut self, _: Ins) -> Exec {
        self.regs.ie = false;
        Ok(())
    }

    pub(crate) fn eint(&mut self, _: Ins) -> Exec {
        self.regs.ie = true;
        Ok(())
    }

    pub(crate) fn cntx_s(&mut self, _: Ins) -> Exec {
        self.regs.context_store();
        Ok(())
    }

    pub(crate) fn cntx_r(&mut self, _: Ins) -> Exec {
        self.regs.context_restore();
        Ok(())
    }

    // Repeats.

    fn repeat(&mut self, count: u16) {
        self.regs.repc = count;
        self.regs.rep = true;
    }

    pub(crate) fn rep_imm8(&mut self, ins: Ins) -> Exec {
        self.repeat(ins.base.bits(0, 8));
        Ok(())
    }

    pub(crate) fn rep_reg(&mut self, ins: Ins) -> Exec {
        let a = Reg::new(ins.base.bits(0, 5) as u8);
        let count = self.regs.reg_to_bus16(a, false)?;
        self.repeat(count);
        Ok(())
    }

    pub(crate) fn rep_r6(&mut self, _: Ins) -> Exec {
        let count = self.regs.r[6];
        self.repeat(count);
        Ok(())
    }

    fn block_repeat(&mut self, lc: u16, address: u32) -> Exec {
        if self.regs.bcn() > 3 {
            return Err(RunError::LoopStackOverflow);
        }
        self.regs.bkrep_stack.push(BkrepFrame {
            start: self.regs.pc,
            end: address,
            lc,
        });
        self.regs.lp = true;
        Ok(())
    }

    pub(crate) fn bkrep_imm8(&mut self, ins: Ins) -> Exec {
        let lc = ins.base.bits(0, 8);
        let address = ins.expansion as u32 | (self.regs.pc & 0x30000);
        self.block_repeat(lc, address)
    }

    pub(crate) fn bkrep_reg(&mut self, ins: Ins) -> Exec {
        let a = Reg::new(ins.base.bits(0, 5) as u8);
        let lc = self.regs.reg_to_bus16(a, false)?;
        let address = ins.expansion as u32 | ((ins.base.bits(5, 7) as u32) << 16);
        self.block_repeat(lc, address)
    }

    pub(crate) fn bkrep_r6(&mut self, ins: Ins) -> Exec {
        let lc = self.regs.r[6];
        let address = ins.expansion as u32 | ((ins.base.bits(0, 2) as u32) << 16);
        self.block_repeat(lc, address)
    }

    pub(crate) fn break_(&mut self, ins: Ins) -> Exec {
        if !self.regs.lp {
            return self.undefined(ins);
        }
        // Drops the innermost frame without branching; control leaves the
        // body through its natural flow past the loop end.
        self.regs.bkrep_stack.pop();
        self.regs.lp = !self.regs.bkrep_stack.is_empty();
        Ok(())
    }

    fn restore_block_repeat(&mut self, mut address: u16) -> Result<u16, RunError> {
        let live = self.regs.lp;
        if live && self.regs.bcn() > 3 {
            return Err(RunError::LoopStackOverflow);
        }
        address = address.wrapping_add(1);
        let flag = self.mem.data_read(address);
        let valid = flag >> 15 != 0;
        if live && !valid {
            return Err(RunError::InvalidLoopRestore);
        }
        address = address.wrapping_add(1);
        let end_lo = self.mem.data_read(address);
        address = address.wrapping_add(1);
        let start_lo = self.mem.data_read(address);
        address = address.wrapping_add(1);
        let lc = self.mem.data_read(address);
        let frame = BkrepFrame {
            end: end_lo as u32 | ((flag as u32 >> 8) & 3) << 16,
            start: start_lo as u32 | (flag as u32 & 3) << 16,
            lc,
        };
        if live {
            self.regs.bkrep_stack.insert(0, frame);
        } else if valid {
            self.regs.bkrep_stack.push(frame);
            self.regs.lp = true;
        }
        Ok(address)
    }

    fn store_block_repeat(&mut self, mut address: u16) -> u16 {
        let frame = self
            .regs
            .bkrep_stack
            .first()
            .copied()
            .unwrap_or_default();
        self.mem.data_write(address, frame.lc);
        address = address.wrapping_sub(1);
        self.mem.data_write(address, frame.start as u16);
        address = address.wrapping_sub(1);
        self.mem.data_write(address, frame.end as u16);
        address = address.wrapping_sub(1);
        let mut flag = (self.regs.lp as u16) << 15;
        // Both packed high-bit fields carry start[17:16]; end[17:16] is
        // never persisted.
        flag |= (frame.start >> 16) as u16;
        flag |= ((frame.start >> 16) as u16) << 8;
        self.mem.data_write(address, flag);
        address = address.wrapping_sub(1);
        if self.regs.lp {
            self.regs.bkrep_stack.remove(0);
            self.regs.lp = !self.regs.bkrep_stack.is_empty();
        }
        address
    }

    pub(crate) fn bkreprst_arrn(&mut self, ins: Ins) -> Exec {
        let unit = self.regs.ar_rn_unit(ins.base.bits(0, 2) as u8);
        let address = self.regs.r[unit];
        let address = self.restore_block_repeat(address)?;
        self.regs.r[unit] = address;
        Ok(())
    }

    pub(crate) fn bkreprst_memsp(&mut self, _: Ins) -> Exec {
        let address = self.regs.sp;
        let address = self.restore_block_repeat(address)?;
        self.regs.sp = address;
        Ok(())
    }

    pub(crate) fn bkrepsto_arrn(&mut self, ins: Ins) -> Exec {
        let unit = self.regs.ar_rn_unit(ins.base.bits(0, 2) as u8);
        let address = self.regs.r[unit];
        let address = self.store_block_repeat(address);
        self.regs.r[unit] = address;
        Ok(())
    }

    pub(crate) fn bkrepsto_memsp(&mut self, _: Ins) -> Exec {
        let address = self.regs.sp;
        let address = self.store_block_repeat(address);
        self.regs.sp = address;
        Ok(())
    }

    // Bank exchanges.

    pub(crate) fn banke(&mut self, ins: Ins) -> Exec {
        let flags = ins.base.bits(0, 6);
        if flags.bit(0) {
            std::mem::swap(&mut self.regs.stepi, &mut self.regs.stepib);
            std::mem::swap(&mut self.regs.modi, &mut self.regs.modib);
            if self.regs.stp16 {
                std::mem::swap(&mut self.regs.stepi0, &mut self.regs.stepi0b);
            }
        }
        if flags.bit(1) {
            let r4b = self.regs.r4b;
            self.regs.r4b = self.regs.r[4];
            self.regs.r[4] = r4b;
        }
        if flags.bit(2) {
            let r1b = self.regs.r1b;
            self.regs.r1b = self.regs.r[1];
            self.regs.r[1] = r1b;
        }
        if flags.bit(3) {
            let r0b = self.regs.r0b;
            self.regs.r0b = self.regs.r[0];
            self.regs.r[0] = r0b;
        }
        if flags.bit(4) {
            let r7b = self.regs.r7b;
            self.regs.r7b = self.regs.r[7];
            self.regs.r[7] = r7b;
        }
        if flags.bit(5) {
            std::mem::swap(&mut self.regs.stepj, &mut self.regs.stepjb);
            std::mem::swap(&mut self.regs.modj, &mut self.regs.modjb);
            if self.regs.stp16 {
                std::mem::swap(&mut self.regs.stepj0, &mut self.regs.stepj0b);
            }
        }
        Ok(())
    }

    pub(crate) fn bankr(&mut self, _: Ins) -> Exec {
        self.regs.swap_all_ar_arp();
        Ok(())
    }

    pub(crate) fn bankr_ar(&mut self, ins: Ins) -> Exec {
        self.regs.swap_ar(ins.base.bit(0) as usize);
        Ok(())
    }

    pub(crate) fn bankr_ar_arp(&mut self, ins: Ins) -> Exec {
        self.regs.swap_ar(ins.base.bit(2) as usize);
        self.regs.swap_arp(ins.base.bits(0, 2) as usize);
        Ok(())
    }

    pub(crate) fn bankr_arp(&mut self, ins: Ins) -> Exec {
        self.regs.swap_arp(ins.base.bits(0, 2) as usize);
        Ok(())
    }
}

// Stack instructions.
impl<M: Memory> Interpreter<M> {
    pub(crate) fn push_imm16(&mut self, ins: Ins) -> Exec {
        self.data_push(ins.expansion);
        Ok(())
    }

    pub(crate) fn push_reg(&mut self, ins: Ins) -> Exec {
        let a = Reg::new(ins.base.bits(0, 5) as u8);
        let value = self.regs.reg_to_bus16(a, true)?;
        self.data_push(value);
        Ok(())
    }

    pub(crate) fn pop_reg(&mut self, ins: Ins) -> Exec {
        let a = Reg::new(ins.base.bits(0, 5) as u8);
        let value = self.data_pop();
        self.regs.reg_from_bus16(a, value)
    }

    pub(crate) fn push_sysreg(&mut self, ins: Ins) -> Exec {
        let a = SysReg::new(ins.base.bits(0, 4) as u8);
        let value = self.regs.sys_to_bus16(a);
        self.data_push(value);
        Ok(())
    }

    pub(crate) fn pop_sysreg(&mut self, ins: Ins) -> Exec {
        let a = SysReg::new(ins.base.bits(0, 4) as u8);
        let value = self.data_pop();
        self.regs.sys_from_bus16(a, value);
        Ok(())
    }

    pub(crate) fn push_abe(&mut self, ins: Ins) -> Exec {
        let a = Acc::ab(ins.base.bits(0, 2) as u8);
        let acc = self.regs.acc(a);
        let value = (self.regs.saturate(acc, false) >> 32) as u16;
        self.data_push(value);
        Ok(())
    }

    pub(crate) fn pop_abe(&mut self, ins: Ins) -> Exec {
        let a = Acc::ab(ins.base.bits(0, 2) as u8);
        let e = sign_extend(8, (self.data_pop() & 0xFF) as u64) & 0xFFFF_FFFF;
        let value = (self.regs.acc(a) & 0xFFFF_FFFF) | (e << 32);
        self.regs.set_acc(a, value);
        Ok(())
    }

    pub(crate) fn push_px(&mut self, ins: Ins) -> Exec {
        let p = Acc::px(ins.base.bit(0) as u8);
        let value = self.regs.product_to_bus40(p) as u32;
        self.data_push(value as u16);
        self.data_push((value >> 16) as u16);
        Ok(())
    }

    pub(crate) fn pop_px(&mut self, ins: Ins) -> Exec {
        let p = Acc::px(ins.base.bit(0) as u8);
        let h = self.data_pop();
        let l = self.data_pop();
        self.regs.product_from_bus32(p, ((h as u32) << 16) | l as u32);
        Ok(())
    }

    pub(crate) fn pusha_ax(&mut self, ins: Ins) -> Exec {
        let a = Acc::ax(ins.base.bit(0) as u8);
        let acc = self.regs.acc(a);
        let value = self.regs.saturate(acc, false) as u32;
        self.data_push(value as u16);
        self.data_push((value >> 16) as u16);
        Ok(())
    }

    pub(crate) fn pusha_bx(&mut self, ins: Ins) -> Exec {
        let a = Acc::bx(ins.base.bit(0) as u8);
        let acc = self.regs.acc(a);
        let value = self.regs.saturate(acc, false) as u32;
        self.data_push(value as u16);
        self.data_push((value >> 16) as u16);
        Ok(())
    }

    pub(crate) fn popa(&mut self, ins: Ins) -> Exec {
        let a = Acc::ab(ins.base.bits(0, 2) as u8);
        let h = self.data_pop();
        let l = self.data_pop();
        let value = sign_extend(32, ((h as u64) << 16) | l as u64);
        self.regs.set_acc(a, value);
        Ok(())
    }

    pub(crate) fn push_r6(&mut self, _: Ins) -> Exec {
        let value = self.regs.r[6];
        self.data_push(value);
        Ok(())
    }

    pub(crate) fn push_repc(&mut self, _: Ins) -> Exec {
        let value = self.regs.repc;
        self.data_push(value);
        Ok(())
    }

    pub(crate) fn push_x0(&mut self, _: Ins) -> Exec {
        let value = self.regs.x[0];
        self.data_push(value);
        Ok(())
    }

    pub(crate) fn push_x1(&mut self, _: Ins) -> Exec {
        let value = self.regs.x[1];
        self.data_push(value);
        Ok(())
    }

    pub(crate) fn push_y1(&mut self, _: Ins) -> Exec {
        let value = self.regs.y[1];
        self.data_push(value);
        Ok(())
    }

    pub(crate) fn pop_r6(&mut self, _: Ins) -> Exec {
        self.regs.r[6] = self.data_pop();
        Ok(())
    }

    pub(crate) fn pop_repc(&mut self, _: Ins) -> Exec {
        self.regs.repc = self.data_pop();
        Ok(())
    }

    pub(crate) fn pop_x0(&mut self, _: Ins) -> Exec {
        self.regs.x[0] = self.data_pop();
        Ok(())
    }

    pub(crate) fn pop_x1(&mut self, _: Ins) -> Exec {
        self.regs.x[1] = self.data_pop();
        Ok(())
    }

    pub(crate) fn pop_y1(&mut self, _: Ins) -> Exec {
        self.regs.y[1] = self.data_pop();
        Ok(())
    }
}
