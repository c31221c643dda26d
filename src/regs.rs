use bitos::{
    bitos,
    integer::{u2, u3, u4, u6, u7, u9},
};
use strum::FromRepr;
use tinyvec::ArrayVec;

use crate::RunError;
use crate::ins::Cond;

pub const ACC_MASK: u64 = 0xFF_FFFF_FFFF;

#[inline(always)]
pub fn sign_extend(bits: u32, value: u64) -> u64 {
    let shift = 64 - bits;
    (((value << shift) as i64) >> shift) as u64
}

#[inline(always)]
pub fn bit_reverse16(value: u16) -> u16 {
    value.reverse_bits()
}

/// One of the four 40-bit accumulators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRepr)]
#[repr(u8)]
pub enum Acc {
    A0,
    A1,
    B0,
    B1,
}

impl Acc {
    pub fn ab(bits: u8) -> Self {
        Self::from_repr(bits & 3).unwrap()
    }

    pub fn ax(bit: u8) -> Self {
        Self::ab(bit & 1)
    }

    pub fn bx(bit: u8) -> Self {
        Self::ab(2 | (bit & 1))
    }

    pub fn px(bit: u8) -> usize {
        (bit & 1) as usize
    }

    /// The accumulator paired with this one (a0↔a1, b0↔b1).
    pub fn counterpart(self) -> Self {
        match self {
            Acc::A0 => Acc::A1,
            Acc::A1 => Acc::A0,
            Acc::B0 => Acc::B1,
            Acc::B1 => Acc::B0,
        }
    }
}

/// The 16-bit-bus register operand class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRepr)]
#[repr(u8)]
pub enum Reg {
    R0,
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,
    A0,
    A1,
    B0,
    B1,
    A0l,
    A1l,
    B0l,
    B1l,
    A0h,
    A1h,
    B0h,
    B1h,
    X0,
    X1,
    Y0,
    Y1,
    P,
    Pc,
    Sp,
    Sv,
    Lc,
    St1,
    St2,
    Mixp,
}

impl Reg {
    pub fn new(bits: u8) -> Self {
        Self::from_repr(bits & 0x1F).unwrap()
    }

    /// The accumulator this name aliases, if any, with the slice it selects.
    pub fn acc(self) -> Option<(Acc, AccSlice)> {
        use Reg::*;
        Some(match self {
            A0 => (Acc::A0, AccSlice::Whole),
            A1 => (Acc::A1, AccSlice::Whole),
            B0 => (Acc::B0, AccSlice::Whole),
            B1 => (Acc::B1, AccSlice::Whole),
            A0l => (Acc::A0, AccSlice::Low),
            A1l => (Acc::A1, AccSlice::Low),
            B0l => (Acc::B0, AccSlice::Low),
            B1l => (Acc::B1, AccSlice::Low),
            A0h => (Acc::A0, AccSlice::High),
            A1h => (Acc::A1, AccSlice::High),
            B0h => (Acc::B0, AccSlice::High),
            B1h => (Acc::B1, AccSlice::High),
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccSlice {
    Whole,
    Low,
    High,
}

/// Legacy short register operand class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRepr)]
#[repr(u8)]
pub enum RnOld {
    R0,
    R1,
    R2,
    R3,
    R4,
    R5,
    Sv,
    Y0,
}

impl RnOld {
    pub fn new(bits: u8) -> Self {
        Self::from_repr(bits & 7).unwrap()
    }

    pub fn reg(self) -> Reg {
        match self {
            RnOld::R0 => Reg::R0,
            RnOld::R1 => Reg::R1,
            RnOld::R2 => Reg::R2,
            RnOld::R3 => Reg::R3,
            RnOld::R4 => Reg::R4,
            RnOld::R5 => Reg::R5,
            RnOld::Sv => Reg::Sv,
            RnOld::Y0 => Reg::Y0,
        }
    }
}

/// Address/pair configuration register operand class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRepr)]
#[repr(u8)]
pub enum ArArp {
    Ar0,
    Ar1,
    Arp0,
    Arp1,
    Arp2,
    Arp3,
    Cfgi,
    Cfgj,
}

impl ArArp {
    pub fn new(bits: u8) -> Self {
        Self::from_repr(bits & 7).unwrap()
    }
}

/// Status/mode register operand class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRepr)]
#[repr(u8)]
pub enum SttMod {
    Stt0,
    Stt1,
    Stt2,
    St0,
    Mod0,
    Mod1,
    Mod2,
    Mod3,
}

impl SttMod {
    pub fn new(bits: u8) -> Self {
        Self::from_repr(bits & 7).unwrap()
    }
}

/// The 4-bit class joining [`ArArp`] and [`SttMod`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SysReg {
    ArArp(ArArp),
    SttMod(SttMod),
}

impl SysReg {
    pub fn new(bits: u8) -> Self {
        if bits & 8 == 0 {
            Self::ArArp(ArArp::new(bits))
        } else {
            Self::SttMod(SttMod::new(bits))
        }
    }
}

// Packed register views. The stored state is the loose fields on
// `Registers`; these only define the wire layouts.

#[bitos(16)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Stt0 {
    #[bits(0)]
    pub fls: bool,
    #[bits(1)]
    pub flv: bool,
    #[bits(2)]
    pub fe: bool,
    #[bits(3)]
    pub fc0: bool,
    #[bits(4)]
    pub fv: bool,
    #[bits(5)]
    pub fn_: bool,
    #[bits(6)]
    pub fm: bool,
    #[bits(7)]
    pub fz: bool,
    #[bits(11)]
    pub fc1: bool,
}

#[bitos(16)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Stt1 {
    #[bits(4)]
    pub fr: bool,
    #[bits(14)]
    pub iu0: bool,
    #[bits(15)]
    pub iu1: bool,
}

#[bitos(16)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Stt2 {
    #[bits(0)]
    pub ip0: bool,
    #[bits(1)]
    pub ip1: bool,
    #[bits(2)]
    pub ip2: bool,
    #[bits(3)]
    pub vip: bool,
    #[bits(6..8)]
    pub movpd: u2,
    #[bits(12..15)]
    pub bcn: u3,
    #[bits(15)]
    pub lp: bool,
}

#[bitos(16)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Mod0 {
    #[bits(0)]
    pub sat: bool,
    #[bits(1)]
    pub sata: bool,
    #[bits(5..7)]
    pub hwm: u2,
    #[bits(7)]
    pub s: bool,
    #[bits(8)]
    pub ou0: bool,
    #[bits(9)]
    pub ou1: bool,
    #[bits(10..12)]
    pub ps0: u2,
    #[bits(13..15)]
    pub ps1: u2,
}

#[bitos(16)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Mod1 {
    #[bits(0..8)]
    pub page: u8,
    #[bits(12)]
    pub stp16: bool,
    #[bits(13)]
    pub cmd: bool,
    #[bits(14)]
    pub epi: bool,
    #[bits(15)]
    pub epj: bool,
}

#[bitos(16)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Mod2 {
    #[bits(0..8)]
    pub m: u8,
    #[bits(8..16)]
    pub brv: u8,
}

#[bitos(16)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Mod3 {
    #[bits(0)]
    pub nimc: bool,
    #[bits(1)]
    pub ic0: bool,
    #[bits(2)]
    pub ic1: bool,
    #[bits(3)]
    pub ic2: bool,
    #[bits(4)]
    pub ou2: bool,
    #[bits(5)]
    pub ou3: bool,
    #[bits(7)]
    pub ie: bool,
    #[bits(8)]
    pub im0: bool,
    #[bits(9)]
    pub im1: bool,
    #[bits(10)]
    pub im2: bool,
    #[bits(11)]
    pub vim: bool,
    #[bits(13)]
    pub ccnta: bool,
    #[bits(14)]
    pub cpc: bool,
    #[bits(15)]
    pub crep: bool,
}

#[bitos(16)]
#[derive(Debug, Clone, Copy, Default)]
pub struct St0 {
    #[bits(0)]
    pub sat: bool,
    #[bits(1)]
    pub ie: bool,
    #[bits(2)]
    pub im0: bool,
    #[bits(3)]
    pub im1: bool,
    #[bits(4)]
    pub fr: bool,
    #[bits(5)]
    pub fls: bool,
    #[bits(6)]
    pub fe: bool,
    #[bits(7)]
    pub fc0: bool,
    #[bits(8)]
    pub fv: bool,
    #[bits(9)]
    pub fn_: bool,
    #[bits(10)]
    pub fm: bool,
    #[bits(11)]
    pub fz: bool,
    #[bits(12..16)]
    pub a0e: u4,
}

#[bitos(16)]
#[derive(Debug, Clone, Copy, Default)]
pub struct St1 {
    #[bits(0..8)]
    pub page: u8,
    #[bits(10..12)]
    pub ps0: u2,
    #[bits(12..16)]
    pub a1e: u4,
}

#[bitos(16)]
#[derive(Debug, Clone, Copy, Default)]
pub struct St2 {
    #[bits(0..6)]
    pub m: u6,
    #[bits(6)]
    pub im2: bool,
    #[bits(7)]
    pub s: bool,
    #[bits(8)]
    pub ou0: bool,
    #[bits(9)]
    pub ou1: bool,
    #[bits(10)]
    pub iu0: bool,
    #[bits(11)]
    pub iu1: bool,
    #[bits(12)]
    pub ip0: bool,
    #[bits(13)]
    pub ip1: bool,
    #[bits(14)]
    pub ip2: bool,
}

#[bitos(16)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Cfg {
    #[bits(0..7)]
    pub step: u7,
    #[bits(7..16)]
    pub modulo: u9,
}

#[bitos(16)]
#[derive(Debug, Clone, Copy, Default)]
pub struct ArReg {
    #[bits(0..3)]
    pub step_a: u3,
    #[bits(3..5)]
    pub offset_a: u2,
    #[bits(5..8)]
    pub step_b: u3,
    #[bits(8..10)]
    pub offset_b: u2,
    #[bits(10..13)]
    pub rn_a: u3,
    #[bits(13..16)]
    pub rn_b: u3,
}

#[bitos(16)]
#[derive(Debug, Clone, Copy, Default)]
pub struct ArpReg {
    #[bits(0..2)]
    pub rni: u2,
    #[bits(2..5)]
    pub stepi: u3,
    #[bits(5..7)]
    pub offseti: u2,
    #[bits(8..10)]
    pub rnj: u2,
    #[bits(10..13)]
    pub stepj: u3,
    #[bits(13..15)]
    pub offsetj: u2,
}

#[bitos(16)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Icr {
    #[bits(0)]
    pub nimc: bool,
    #[bits(1)]
    pub ic0: bool,
    #[bits(2)]
    pub ic1: bool,
    #[bits(3)]
    pub ic2: bool,
}

/// One live block-repeat frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BkrepFrame {
    pub start: u32,
    pub end: u32,
    pub lc: u16,
}

/// The register bank exchanged by `cntx` context switches.
#[derive(Debug, Clone, Copy, Default)]
struct SwapBank {
    sat: bool,
    sata: bool,
    s: bool,
    ou: [bool; 4],
    ps: [u8; 2],
    hwm: u8,
    page: u8,
    stp16: bool,
    cmd: bool,
    epi: bool,
    epj: bool,
    m: [bool; 8],
    brv: [bool; 8],
    arrn: [u8; 4],
    arstep: [u8; 4],
    aroffset: [u8; 4],
    arprni: [u8; 4],
    arpstepi: [u8; 4],
    arpoffseti: [u8; 4],
    arprnj: [u8; 4],
    arpstepj: [u8; 4],
    arpoffsetj: [u8; 4],
}

#[derive(Debug, Clone, Copy, Default)]
struct StoredFlags {
    fz: bool,
    fm: bool,
    fn_: bool,
    fv: bool,
    flv: bool,
    fe: bool,
    fc0: bool,
    fc1: bool,
    fls: bool,
    fr: bool,
}

/// All architectural state of the DSP core.
#[derive(Debug, Clone)]
pub struct Registers {
    pub pc: u32,
    pub sp: u16,

    pub a: [u64; 2],
    pub b: [u64; 2],

    pub p: [u32; 2],
    pub psign: [u16; 2],
    pub ps: [u8; 2],

    pub x: [u16; 2],
    pub y: [u16; 2],

    pub r: [u16; 8],
    pub stepi: u16,
    pub stepj: u16,
    pub modi: u16,
    pub modj: u16,
    pub stepi0: u16,
    pub stepj0: u16,

    pub sv: u16,
    pub mixp: u16,
    pub vtr: [u16; 2],

    pub repc: u16,
    pub rep: bool,
    pub bkrep_stack: ArrayVec<[BkrepFrame; 4]>,
    pub lp: bool,

    // Flags.
    pub fz: bool,
    pub fm: bool,
    pub fn_: bool,
    pub fv: bool,
    pub flv: bool,
    pub fe: bool,
    pub fc0: bool,
    pub fc1: bool,
    pub fls: bool,
    pub fr: bool,
    pub iu: [bool; 2],

    // Modes.
    pub sat: bool,
    pub sata: bool,
    pub s: bool,
    pub ou: [bool; 4],
    pub hwm: u8,
    pub page: u8,
    pub stp16: bool,
    pub cmd: bool,
    pub epi: bool,
    pub epj: bool,
    pub m: [bool; 8],
    pub brv: [bool; 8],
    pub movpd: u8,

    // Interrupts.
    pub ie: bool,
    pub im: [bool; 3],
    pub ip: [bool; 3],
    pub ic: [bool; 3],
    pub vim: bool,
    pub vip: bool,
    pub vic: bool,
    pub viaddr: u32,
    pub ccnta: bool,
    pub cpc: bool,
    pub crep: bool,

    // Addressing indirection tables (two triples per ar register, one
    // i/j pair per arp register).
    pub arrn: [u8; 4],
    pub arstep: [u8; 4],
    pub aroffset: [u8; 4],
    pub arprni: [u8; 4],
    pub arpstepi: [u8; 4],
    pub arpoffseti: [u8; 4],
    pub arprnj: [u8; 4],
    pub arpstepj: [u8; 4],
    pub arpoffsetj: [u8; 4],

    // Shadows.
    pub r0b: u16,
    pub r1b: u16,
    pub r4b: u16,
    pub r7b: u16,
    pub stepib: u16,
    pub stepjb: u16,
    pub modib: u16,
    pub modjb: u16,
    pub stepi0b: u16,
    pub stepj0b: u16,
    repcs: u16,
    swap_bank: SwapBank,
    stored_flags: StoredFlags,
}

impl Default for Registers {
    fn default() -> Self {
        Self {
            pc: 0,
            sp: 0,
            a: [0; 2],
            b: [0; 2],
            p: [0; 2],
            psign: [0; 2],
            ps: [0; 2],
            x: [0; 2],
            y: [0; 2],
            r: [0; 8],
            stepi: 0,
            stepj: 0,
            modi: 0,
            modj: 0,
            stepi0: 0,
            stepj0: 0,
            sv: 0,
            mixp: 0,
            vtr: [0; 2],
            repc: 0,
            rep: false,
            bkrep_stack: ArrayVec::new(),
            lp: false,
            fz: false,
            fm: false,
            fn_: false,
            fv: false,
            flv: false,
            fe: false,
            fc0: false,
            fc1: false,
            fls: false,
            fr: false,
            iu: [false; 2],
            sat: false,
            sata: true,
            s: false,
            ou: [false; 4],
            hwm: 0,
            page: 0,
            stp16: false,
            cmd: false,
            epi: false,
            epj: false,
            m: [false; 8],
            brv: [false; 8],
            movpd: 0,
            ie: false,
            im: [false; 3],
            ip: [false; 3],
            ic: [false; 3],
            vim: false,
            vip: false,
            vic: false,
            viaddr: 0,
            ccnta: false,
            cpc: false,
            crep: false,
            arrn: [0; 4],
            arstep: [0; 4],
            aroffset: [0; 4],
            arprni: [0; 4],
            arpstepi: [0; 4],
            arpoffseti: [0; 4],
            arprnj: [0; 4],
            arpstepj: [0; 4],
            arpoffsetj: [0; 4],
            r0b: 0,
            r1b: 0,
            r4b: 0,
            r7b: 0,
            stepib: 0,
            stepjb: 0,
            modib: 0,
            modjb: 0,
            stepi0b: 0,
            stepj0b: 0,
            repcs: 0,
            swap_bank: SwapBank::default(),
            stored_flags: StoredFlags::default(),
        }
    }
}

impl Registers {
    pub fn bcn(&self) -> usize {
        self.bkrep_stack.len()
    }

    pub fn pc_l(&self) -> u16 {
        self.pc as u16
    }

    pub fn pc_h(&self) -> u16 {
        ((self.pc >> 16) & 3) as u16
    }

    pub fn set_pc(&mut self, l: u16, h: u16) {
        self.pc = ((h as u32 & 3) << 16) | l as u32;
    }

    /// The loop counter of the innermost live block repeat.
    pub fn lc(&self) -> u16 {
        self.bkrep_stack.last().map(|f| f.lc).unwrap_or(0)
    }

    pub fn set_lc(&mut self, value: u16) {
        if let Some(frame) = self.bkrep_stack.last_mut() {
            frame.lc = value;
        }
    }

    pub fn sar(&self, storing: bool) -> bool {
        if storing { self.sata } else { self.sat }
    }

    // Accumulators.

    pub fn acc(&self, acc: Acc) -> u64 {
        match acc {
            Acc::A0 => self.a[0],
            Acc::A1 => self.a[1],
            Acc::B0 => self.b[0],
            Acc::B1 => self.b[1],
        }
    }

    /// Raw store, bypassing flags and saturation.
    pub fn set_acc_raw(&mut self, acc: Acc, value: u64) {
        let value = sign_extend(40, value);
        match acc {
            Acc::A0 => self.a[0] = value,
            Acc::A1 => self.a[1] = value,
            Acc::B0 => self.b[0] = value,
            Acc::B1 => self.b[1] = value,
        }
    }

    /// The Z/M/E/N recipe applied on every flagged accumulator write.
    pub fn set_acc_flags(&mut self, value: u64) {
        let value = sign_extend(40, value);
        self.fz = value == 0;
        self.fm = (value >> 39) & 1 != 0;
        self.fe = value != sign_extend(32, value);
        let bit31 = (value >> 31) & 1;
        let bit30 = (value >> 30) & 1;
        self.fn_ = self.fz || (!self.fe && bit31 != bit30);
    }

    pub fn set_acc(&mut self, acc: Acc, value: u64) {
        let value = sign_extend(40, value);
        self.set_acc_flags(value);
        let value = self.saturate_store(value);
        self.set_acc_raw(acc, value);
    }

    pub fn set_acc_no_sat(&mut self, acc: Acc, value: u64) {
        let value = sign_extend(40, value);
        self.set_acc_flags(value);
        self.set_acc_raw(acc, value);
    }

    // Saturators.

    fn clamp(value: u64) -> u64 {
        if (value >> 39) & 1 != 0 {
            0xFFFF_FFFF_8000_0000
        } else {
            0x0000_0000_7FFF_FFFF
        }
    }

    pub fn saturate_unconditional(&mut self, value: u64) -> u64 {
        if value != sign_extend(32, value) {
            self.fls = true;
            return Self::clamp(value);
        }
        value
    }

    pub fn saturate_unconditional_no_flag(value: u64) -> u64 {
        if value != sign_extend(32, value) {
            return Self::clamp(value);
        }
        value
    }

    pub fn saturate(&mut self, value: u64, storing: bool) -> u64 {
        if !self.sar(storing) {
            return self.saturate_unconditional(value);
        }
        value
    }

    pub fn saturate_no_flag(&self, value: u64, storing: bool) -> u64 {
        if !self.sar(storing) {
            return Self::saturate_unconditional_no_flag(value);
        }
        value
    }

    fn saturate_store(&mut self, value: u64) -> u64 {
        self.saturate(value, true)
    }

    // Products.

    pub fn product_to_bus40(&self, unit: usize) -> u64 {
        let value = self.p[unit] as u64 | ((self.psign[unit] as u64) << 32);
        match self.ps[unit] {
            0 => sign_extend(33, value),
            1 => sign_extend(32, value >> 1),
            2 => sign_extend(34, value << 1),
            _ => sign_extend(35, value << 2),
        }
    }

    pub fn product_from_bus32(&mut self, unit: usize, value: u32) {
        self.p[unit] = value;
        self.psign[unit] = (value >> 31) as u16;
    }

    // 16-bit bus conversion.

    pub fn reg_to_bus16(&mut self, reg: Reg, saturate_for_mov: bool) -> Result<u16, RunError> {
        if let Some((acc, slice)) = reg.acc() {
            let value = self.acc(acc);
            return Ok(match slice {
                // Bare accumulator names never saturate on this path.
                AccSlice::Whole => value as u16,
                AccSlice::Low => {
                    if saturate_for_mov {
                        self.saturate(value, false) as u16
                    } else {
                        value as u16
                    }
                }
                AccSlice::High => {
                    if saturate_for_mov {
                        (self.saturate(value, false) >> 16) as u16
                    } else {
                        (value >> 16) as u16
                    }
                }
            });
        }

        Ok(match reg {
            Reg::R0 => self.r[0],
            Reg::R1 => self.r[1],
            Reg::R2 => self.r[2],
            Reg::R3 => self.r[3],
            Reg::R4 => self.r[4],
            Reg::R5 => self.r[5],
            Reg::R6 => self.r[6],
            Reg::R7 => self.r[7],
            Reg::X0 => self.x[0],
            Reg::X1 => self.x[1],
            Reg::Y0 => self.y[0],
            Reg::Y1 => self.y[1],
            Reg::P => (self.product_to_bus40(0) >> 16) as u16,
            Reg::Pc => self.pc as u16,
            Reg::Sp => self.sp,
            Reg::Sv => self.sv,
            Reg::Lc => self.lc(),
            Reg::St1 => self.sttmod_to_bus16(SttMod::St1),
            Reg::St2 => self.sttmod_to_bus16(SttMod::St2),
            Reg::Mixp => self.mixp,
            _ => unreachable!(),
        })
    }

    pub fn reg_from_bus16(&mut self, reg: Reg, value: u16) -> Result<(), RunError> {
        if let Some((acc, slice)) = reg.acc() {
            match slice {
                AccSlice::Whole => self.set_acc(acc, sign_extend(16, value as u64)),
                AccSlice::Low => self.set_acc(acc, value as u64),
                AccSlice::High => self.set_acc(acc, sign_extend(32, (value as u64) << 16)),
            }
            return Ok(());
        }

        match reg {
            Reg::R0 => self.r[0] = value,
            Reg::R1 => self.r[1] = value,
            Reg::R2 => self.r[2] = value,
            Reg::R3 => self.r[3] = value,
            Reg::R4 => self.r[4] = value,
            Reg::R5 => self.r[5] = value,
            Reg::R6 => self.r[6] = value,
            Reg::R7 => self.r[7] = value,
            Reg::X0 => self.x[0] = value,
            Reg::X1 => self.x[1] = value,
            Reg::Y0 => self.y[0] = value,
            Reg::Y1 => self.y[1] = value,
            Reg::P => {
                // p as destination addresses p0h.
                self.psign[0] = (value > 0x7FFF) as u16;
                self.p[0] = (self.p[0] & 0xFFFF) | ((value as u32) << 16);
            }
            // The program counter is not writable through the 16-bit bus.
            Reg::Pc => return Err(RunError::undefined()),
            Reg::Sp => self.sp = value,
            Reg::Sv => self.sv = value,
            Reg::Lc => self.set_lc(value),
            Reg::St1 => self.sttmod_from_bus16(SttMod::St1, value),
            Reg::St2 => self.sttmod_from_bus16(SttMod::St2, value),
            Reg::Mixp => self.mixp = value,
            _ => unreachable!(),
        }
        Ok(())
    }

    // Packed system registers.

    pub fn ararp_to_bus16(&self, reg: ArArp) -> u16 {
        match reg {
            ArArp::Ar0 | ArArp::Ar1 => {
                let n = (reg == ArArp::Ar1) as usize;
                ArReg::default()
                    .with_step_a(u3::new(self.arstep[2 * n]))
                    .with_offset_a(u2::new(self.aroffset[2 * n]))
                    .with_step_b(u3::new(self.arstep[2 * n + 1]))
                    .with_offset_b(u2::new(self.aroffset[2 * n + 1]))
                    .with_rn_a(u3::new(self.arrn[2 * n]))
                    .with_rn_b(u3::new(self.arrn[2 * n + 1]))
                    .to_bits()
            }
            ArArp::Arp0 | ArArp::Arp1 | ArArp::Arp2 | ArArp::Arp3 => {
                let n = reg as usize - ArArp::Arp0 as usize;
                ArpReg::default()
                    .with_rni(u2::new(self.arprni[n]))
                    .with_stepi(u3::new(self.arpstepi[n]))
                    .with_offseti(u2::new(self.arpoffseti[n]))
                    .with_rnj(u2::new(self.arprnj[n]))
                    .with_stepj(u3::new(self.arpstepj[n]))
                    .with_offsetj(u2::new(self.arpoffsetj[n]))
                    .to_bits()
            }
            ArArp::Cfgi => Cfg::default()
                .with_step(u7::new(self.stepi as u8 & 0x7F))
                .with_modulo(u9::new(self.modi & 0x1FF))
                .to_bits(),
            ArArp::Cfgj => Cfg::default()
                .with_step(u7::new(self.stepj as u8 & 0x7F))
                .with_modulo(u9::new(self.modj & 0x1FF))
                .to_bits(),
        }
    }

    pub fn ararp_from_bus16(&mut self, reg: ArArp, value: u16) {
        match reg {
            ArArp::Ar0 | ArArp::Ar1 => {
                let n = (reg == ArArp::Ar1) as usize;
                let ar = ArReg::from_bits(value);
                self.arstep[2 * n] = ar.step_a().value();
                self.aroffset[2 * n] = ar.offset_a().value();
                self.arstep[2 * n + 1] = ar.step_b().value();
                self.aroffset[2 * n + 1] = ar.offset_b().value();
                self.arrn[2 * n] = ar.rn_a().value();
                self.arrn[2 * n + 1] = ar.rn_b().value();
            }
            ArArp::Arp0 | ArArp::Arp1 | ArArp::Arp2 | ArArp::Arp3 => {
                let n = reg as usize - ArArp::Arp0 as usize;
                let arp = ArpReg::from_bits(value);
                self.arprni[n] = arp.rni().value();
                self.arpstepi[n] = arp.stepi().value();
                self.arpoffseti[n] = arp.offseti().value();
                self.arprnj[n] = arp.rnj().value();
                self.arpstepj[n] = arp.stepj().value();
                self.arpoffsetj[n] = arp.offsetj().value();
            }
            ArArp::Cfgi => {
                let cfg = Cfg::from_bits(value);
                self.stepi = cfg.step().value() as u16;
                self.modi = cfg.modulo().value();
            }
            ArArp::Cfgj => {
                let cfg = Cfg::from_bits(value);
                self.stepj = cfg.step().value() as u16;
                self.modj = cfg.modulo().value();
            }
        }
    }

    pub fn sttmod_to_bus16(&self, reg: SttMod) -> u16 {
        match reg {
            SttMod::Stt0 => Stt0::default()
                .with_fls(self.fls)
                .with_flv(self.flv)
                .with_fe(self.fe)
                .with_fc0(self.fc0)
                .with_fv(self.fv)
                .with_fn_(self.fn_)
                .with_fm(self.fm)
                .with_fz(self.fz)
                .with_fc1(self.fc1)
                .to_bits(),
            SttMod::Stt1 => Stt1::default()
                .with_fr(self.fr)
                .with_iu0(self.iu[0])
                .with_iu1(self.iu[1])
                .to_bits(),
            SttMod::Stt2 => Stt2::default()
                .with_ip0(self.ip[0])
                .with_ip1(self.ip[1])
                .with_ip2(self.ip[2])
                .with_vip(self.vip)
                .with_movpd(u2::new(self.movpd))
                .with_bcn(u3::new(self.bcn() as u8))
                .with_lp(self.lp)
                .to_bits(),
            SttMod::St0 => St0::default()
                .with_sat(self.sat)
                .with_ie(self.ie)
                .with_im0(self.im[0])
                .with_im1(self.im[1])
                .with_fr(self.fr)
                .with_fls(self.fls)
                .with_fe(self.fe)
                .with_fc0(self.fc0)
                .with_fv(self.fv)
                .with_fn_(self.fn_)
                .with_fm(self.fm)
                .with_fz(self.fz)
                .with_a0e(u4::new(((self.a[0] >> 32) & 0xF) as u8))
                .to_bits(),
            SttMod::St1 => St1::default()
                .with_page(self.page)
                .with_ps0(u2::new(self.ps[0]))
                .with_a1e(u4::new(((self.a[1] >> 32) & 0xF) as u8))
                .to_bits(),
            SttMod::St2 => {
                let mut m = 0u8;
                for i in 0..6 {
                    m |= (self.m[i] as u8) << i;
                }
                St2::default()
                    .with_m(u6::new(m))
                    .with_im2(self.im[2])
                    .with_s(self.s)
                    .with_ou0(self.ou[0])
                    .with_ou1(self.ou[1])
                    .with_iu0(self.iu[0])
                    .with_iu1(self.iu[1])
                    .with_ip0(self.ip[0])
                    .with_ip1(self.ip[1])
                    .with_ip2(self.ip[2])
                    .to_bits()
            }
            SttMod::Mod0 => Mod0::default()
                .with_sat(self.sat)
                .with_sata(self.sata)
                .with_hwm(u2::new(self.hwm))
                .with_s(self.s)
                .with_ou0(self.ou[0])
                .with_ou1(self.ou[1])
                .with_ps0(u2::new(self.ps[0]))
                .with_ps1(u2::new(self.ps[1]))
                .to_bits(),
            SttMod::Mod1 => Mod1::default()
                .with_page(self.page)
                .with_stp16(self.stp16)
                .with_cmd(self.cmd)
                .with_epi(self.epi)
                .with_epj(self.epj)
                .to_bits(),
            SttMod::Mod2 => {
                let mut m = 0u8;
                let mut brv = 0u8;
                for i in 0..8 {
                    m |= (self.m[i] as u8) << i;
                    brv |= (self.brv[i] as u8) << i;
                }
                Mod2::default().with_m(m).with_brv(brv).to_bits()
            }
            SttMod::Mod3 => Mod3::default()
                .with_nimc(self.vic)
                .with_ic0(self.ic[0])
                .with_ic1(self.ic[1])
                .with_ic2(self.ic[2])
                .with_ou2(self.ou[2])
                .with_ou3(self.ou[3])
                .with_ie(self.ie)
                .with_im0(self.im[0])
                .with_im1(self.im[1])
                .with_im2(self.im[2])
                .with_vim(self.vim)
                .with_ccnta(self.ccnta)
                .with_cpc(self.cpc)
                .with_crep(self.crep)
                .to_bits(),
        }
    }

    pub fn sttmod_from_bus16(&mut self, reg: SttMod, value: u16) {
        match reg {
            SttMod::Stt0 => {
                let stt0 = Stt0::from_bits(value);
                self.fls = stt0.fls();
                self.flv = stt0.flv();
                self.fe = stt0.fe();
                self.fc0 = stt0.fc0();
                self.fv = stt0.fv();
                self.fn_ = stt0.fn_();
                self.fm = stt0.fm();
                self.fz = stt0.fz();
                self.fc1 = stt0.fc1();
            }
            SttMod::Stt1 => {
                let stt1 = Stt1::from_bits(value);
                self.fr = stt1.fr();
                self.iu[0] = stt1.iu0();
                self.iu[1] = stt1.iu1();
            }
            SttMod::Stt2 => {
                // Pending-interrupt and loop-state mirrors are read-only.
                let stt2 = Stt2::from_bits(value);
                self.movpd = stt2.movpd().value();
            }
            SttMod::St0 => {
                let st0 = St0::from_bits(value);
                self.sat = st0.sat();
                self.ie = st0.ie();
                self.im[0] = st0.im0();
                self.im[1] = st0.im1();
                self.fr = st0.fr();
                self.fls = st0.fls();
                self.fe = st0.fe();
                self.fc0 = st0.fc0();
                self.fv = st0.fv();
                self.fn_ = st0.fn_();
                self.fm = st0.fm();
                self.fz = st0.fz();
                let e = sign_extend(4, st0.a0e().value() as u64);
                let value = (self.a[0] & 0xFFFF_FFFF) | ((e & 0xFF) << 32);
                self.set_acc_no_sat(Acc::A0, value);
            }
            SttMod::St1 => {
                let st1 = St1::from_bits(value);
                self.page = st1.page();
                self.ps[0] = st1.ps0().value();
                let e = sign_extend(4, st1.a1e().value() as u64);
                let value = (self.a[1] & 0xFFFF_FFFF) | ((e & 0xFF) << 32);
                self.set_acc_no_sat(Acc::A1, value);
            }
            SttMod::St2 => {
                let st2 = St2::from_bits(value);
                for i in 0..6 {
                    self.m[i] = st2.m().value() & (1 << i) != 0;
                }
                self.im[2] = st2.im2();
                self.s = st2.s();
                self.ou[0] = st2.ou0();
                self.ou[1] = st2.ou1();
            }
            SttMod::Mod0 => {
                let mod0 = Mod0::from_bits(value);
                self.sat = mod0.sat();
                self.sata = mod0.sata();
                self.hwm = mod0.hwm().value();
                self.s = mod0.s();
                self.ou[0] = mod0.ou0();
                self.ou[1] = mod0.ou1();
                self.ps[0] = mod0.ps0().value();
                self.ps[1] = mod0.ps1().value();
            }
            SttMod::Mod1 => {
                let mod1 = Mod1::from_bits(value);
                self.page = mod1.page();
                self.stp16 = mod1.stp16();
                self.cmd = mod1.cmd();
                self.epi = mod1.epi();
                self.epj = mod1.epj();
            }
            SttMod::Mod2 => {
                let mod2 = Mod2::from_bits(value);
                for i in 0..8 {
                    self.m[i] = mod2.m() & (1 << i) != 0;
                    self.brv[i] = mod2.brv() & (1 << i) != 0;
                }
            }
            SttMod::Mod3 => {
                let mod3 = Mod3::from_bits(value);
                self.vic = mod3.nimc();
                self.ic[0] = mod3.ic0();
                self.ic[1] = mod3.ic1();
                self.ic[2] = mod3.ic2();
                self.ou[2] = mod3.ou2();
                self.ou[3] = mod3.ou3();
                self.ie = mod3.ie();
                self.im[0] = mod3.im0();
                self.im[1] = mod3.im1();
                self.im[2] = mod3.im2();
                self.vim = mod3.vim();
                self.ccnta = mod3.ccnta();
                self.cpc = mod3.cpc();
                self.crep = mod3.crep();
            }
        }
    }

    pub fn sys_to_bus16(&mut self, reg: SysReg) -> u16 {
        match reg {
            SysReg::ArArp(r) => self.ararp_to_bus16(r),
            SysReg::SttMod(r) => self.sttmod_to_bus16(r),
        }
    }

    pub fn sys_from_bus16(&mut self, reg: SysReg, value: u16) {
        match reg {
            SysReg::ArArp(r) => self.ararp_from_bus16(r, value),
            SysReg::SttMod(r) => self.sttmod_from_bus16(r, value),
        }
    }

    pub fn icr_to_bus16(&self) -> u16 {
        Icr::default()
            .with_nimc(self.vic)
            .with_ic0(self.ic[0])
            .with_ic1(self.ic[1])
            .with_ic2(self.ic[2])
            .to_bits()
    }

    // Conditions.

    pub fn condition(&self, cond: Cond) -> bool {
        match cond {
            Cond::True => true,
            Cond::Eq => self.fz,
            Cond::Neq => !self.fz,
            Cond::Gt => !self.fz && !self.fm,
            Cond::Ge => !self.fm,
            Cond::Lt => self.fm,
            Cond::Le => self.fm || self.fz,
            Cond::Nn => !self.fn_,
            Cond::Carry => self.fc0,
            Cond::Overflow => self.fv,
            Cond::Extension => self.fe,
            Cond::Latched => self.fls || self.flv,
            Cond::NotR => !self.fr,
            Cond::NotIu0 => !self.iu[0],
            Cond::Iu0 => self.iu[0],
            Cond::Iu1 => self.iu[1],
        }
    }

    // Bank exchanges.

    pub fn swap_ar(&mut self, n: usize) {
        // ar shadows live in the context bank; an explicit bankr exchanges
        // only the addressed register with its shadow.
        for i in [2 * n, 2 * n + 1] {
            std::mem::swap(&mut self.arrn[i], &mut self.swap_bank.arrn[i]);
            std::mem::swap(&mut self.arstep[i], &mut self.swap_bank.arstep[i]);
            std::mem::swap(&mut self.aroffset[i], &mut self.swap_bank.aroffset[i]);
        }
    }

    pub fn swap_arp(&mut self, n: usize) {
        std::mem::swap(&mut self.arprni[n], &mut self.swap_bank.arprni[n]);
        std::mem::swap(&mut self.arpstepi[n], &mut self.swap_bank.arpstepi[n]);
        std::mem::swap(&mut self.arpoffseti[n], &mut self.swap_bank.arpoffseti[n]);
        std::mem::swap(&mut self.arprnj[n], &mut self.swap_bank.arprnj[n]);
        std::mem::swap(&mut self.arpstepj[n], &mut self.swap_bank.arpstepj[n]);
        std::mem::swap(&mut self.arpoffsetj[n], &mut self.swap_bank.arpoffsetj[n]);
    }

    pub fn swap_all_ar_arp(&mut self) {
        for n in 0..2 {
            self.swap_ar(n);
        }
        for n in 0..4 {
            self.swap_arp(n);
        }
    }

    fn shadow_swap(&mut self) {
        let bank = &mut self.swap_bank;
        std::mem::swap(&mut self.sat, &mut bank.sat);
        std::mem::swap(&mut self.sata, &mut bank.sata);
        std::mem::swap(&mut self.s, &mut bank.s);
        std::mem::swap(&mut self.ou, &mut bank.ou);
        std::mem::swap(&mut self.ps, &mut bank.ps);
        std::mem::swap(&mut self.hwm, &mut bank.hwm);
        std::mem::swap(&mut self.page, &mut bank.page);
        std::mem::swap(&mut self.stp16, &mut bank.stp16);
        std::mem::swap(&mut self.cmd, &mut bank.cmd);
        std::mem::swap(&mut self.epi, &mut bank.epi);
        std::mem::swap(&mut self.epj, &mut bank.epj);
        std::mem::swap(&mut self.m, &mut bank.m);
        std::mem::swap(&mut self.brv, &mut bank.brv);
        std::mem::swap(&mut self.arrn, &mut bank.arrn);
        std::mem::swap(&mut self.arstep, &mut bank.arstep);
        std::mem::swap(&mut self.aroffset, &mut bank.aroffset);
        std::mem::swap(&mut self.arprni, &mut bank.arprni);
        std::mem::swap(&mut self.arpstepi, &mut bank.arpstepi);
        std::mem::swap(&mut self.arpoffseti, &mut bank.arpoffseti);
        std::mem::swap(&mut self.arprnj, &mut bank.arprnj);
        std::mem::swap(&mut self.arpstepj, &mut bank.arpstepj);
        std::mem::swap(&mut self.arpoffsetj, &mut bank.arpoffsetj);
        if self.crep {
            std::mem::swap(&mut self.repc, &mut self.repcs);
        }
    }

    fn shadow_store(&mut self) {
        self.stored_flags = StoredFlags {
            fz: self.fz,
            fm: self.fm,
            fn_: self.fn_,
            fv: self.fv,
            flv: self.flv,
            fe: self.fe,
            fc0: self.fc0,
            fc1: self.fc1,
            fls: self.fls,
            fr: self.fr,
        };
    }

    fn shadow_restore(&mut self) {
        let f = self.stored_flags;
        self.fz = f.fz;
        self.fm = f.fm;
        self.fn_ = f.fn_;
        self.fv = f.fv;
        self.flv = f.flv;
        self.fe = f.fe;
        self.fc0 = f.fc0;
        self.fc1 = f.fc1;
        self.fls = f.fls;
        self.fr = f.fr;
    }

    /// Interrupt-entry context switch: bank swap plus the a1/b1 cross move.
    pub fn context_store(&mut self) {
        self.shadow_store();
        self.shadow_swap();
        let a = self.a[1];
        let b = self.b[1];
        self.b[1] = a;
        // Only the b1 → a1 leg updates flags.
        self.set_acc_no_sat(Acc::A1, b);
    }

    pub fn context_restore(&mut self) {
        self.shadow_restore();
        self.shadow_swap();
        let a = self.a[1];
        self.a[1] = self.b[1];
        self.b[1] = a;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn accumulators_stay_sign_extended() {
        let mut regs = Registers::default();
        regs.sata = true;
        regs.set_acc(Acc::A0, 0x80_0000_0000);
        assert_eq!(regs.a[0], sign_extend(40, 0x80_0000_0000));
        regs.set_acc_no_sat(Acc::B1, 0xFF_FFFF_FFFF);
        assert_eq!(regs.b[1], u64::MAX);
    }

    #[test]
    fn acc_write_flags() {
        let mut regs = Registers::default();
        regs.set_acc_no_sat(Acc::A0, 0);
        assert!(regs.fz);
        assert!(!regs.fm);
        assert!(!regs.fe);
        assert!(regs.fn_);

        regs.set_acc_no_sat(Acc::A0, sign_extend(40, 0x80_0000_0000));
        assert!(!regs.fz);
        assert!(regs.fm);
        assert!(regs.fe);
        assert!(!regs.fn_);

        // bit31 != bit30 with no extension in use.
        regs.set_acc_no_sat(Acc::A0, 0x0000_0000_4000_0000);
        assert!(!regs.fe);
        assert!(regs.fn_);
    }

    #[test]
    fn saturation_path() {
        let mut regs = Registers::default();
        regs.sata = false;
        regs.set_acc(Acc::A0, 0x00_8000_0000);
        assert_eq!(regs.a[0], 0x0000_0000_7FFF_FFFF);
        assert!(regs.fls);

        let mut regs = Registers::default();
        regs.sata = true;
        regs.set_acc(Acc::A0, 0x00_8000_0000);
        assert_eq!(regs.a[0], 0x0000_0000_8000_0000);
        assert!(!regs.fls);
    }

    #[test]
    fn packed_registers_round_trip() {
        let mut regs = Registers::default();
        for reg in [
            SttMod::Stt0,
            SttMod::St0,
            SttMod::Mod0,
            SttMod::Mod1,
            SttMod::Mod2,
            SttMod::Mod3,
        ] {
            regs.sttmod_from_bus16(reg, 0xFFFF);
            let bits = regs.sttmod_to_bus16(reg);
            regs.sttmod_from_bus16(reg, bits);
            assert_eq!(bits, regs.sttmod_to_bus16(reg), "{reg:?}");
        }

        for reg in [
            ArArp::Ar0,
            ArArp::Ar1,
            ArArp::Arp0,
            ArArp::Arp3,
            ArArp::Cfgi,
            ArArp::Cfgj,
        ] {
            regs.ararp_from_bus16(reg, 0x5AA5);
            let bits = regs.ararp_to_bus16(reg);
            regs.ararp_from_bus16(reg, bits);
            assert_eq!(bits, regs.ararp_to_bus16(reg), "{reg:?}");
        }
    }

    #[test]
    fn cfgi_packs_step_and_modulo() {
        let mut regs = Registers::default();
        regs.ararp_from_bus16(ArArp::Cfgi, 0xFF85);
        assert_eq!(regs.stepi, 0x05);
        assert_eq!(regs.modi, 0x1FF);
        assert_eq!(regs.ararp_to_bus16(ArArp::Cfgi), 0xFF85);
    }

    #[test]
    fn context_switch_cross_moves_a1_b1() {
        let mut regs = Registers::default();
        regs.sata = true;
        regs.set_acc(Acc::A1, 0x1111);
        regs.set_acc(Acc::B1, 0x2222);
        regs.context_store();
        assert_eq!(regs.a[1], 0x2222);
        assert_eq!(regs.b[1], 0x1111);
        regs.context_restore();
        assert_eq!(regs.a[1], 0x1111);
        assert_eq!(regs.b[1], 0x2222);
    }

    #[test]
    fn bankr_is_an_involution() {
        let mut regs = Registers::default();
        regs.arrn = [1, 2, 3, 4];
        regs.arstep = [7, 6, 5, 4];
        let arrn = regs.arrn;
        regs.swap_all_ar_arp();
        assert_eq!(regs.arrn, [0, 0, 0, 0]);
        regs.swap_all_ar_arp();
        assert_eq!(regs.arrn, arrn);
    }
}
