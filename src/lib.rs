//! Interpreter core for the Teak/XpertTeak family of 16-bit audio DSPs.
//!
//! The crate owns the architectural register file and the instruction-stream
//! semantics: decoding, 40-bit accumulator arithmetic with saturation, the
//! modulo/bit-reverse address generators, single-instruction and block
//! repeats, and interrupt delivery. Everything outside the instruction
//! stream — memory, MMIO, timing — is the embedder's, reached through the
//! [`Memory`] trait.

mod agu;
mod exec;
mod regs;

pub mod ins;

use easyerr::Error;

use crate::ins::{Ins, Opcode};
pub use crate::regs::{Acc, ArArp, Reg, Registers, RnOld, SttMod, SysReg};

/// Memory interface supplied by the embedder.
///
/// Data space is 16-bit addressed, program space 18-bit. Calls are
/// synchronous; the write ordering performed by an instruction is part of
/// that instruction's semantics.
pub trait Memory {
    fn data_read(&mut self, addr: u16) -> u16;
    fn data_write(&mut self, addr: u16, value: u16);
    fn program_read(&mut self, addr: u32) -> u16;
    fn program_write(&mut self, addr: u32, value: u16);
}

impl<M: Memory + ?Sized> Memory for &mut M {
    fn data_read(&mut self, addr: u16) -> u16 {
        (**self).data_read(addr)
    }

    fn data_write(&mut self, addr: u16, value: u16) {
        (**self).data_write(addr, value)
    }

    fn program_read(&mut self, addr: u32) -> u16 {
        (**self).program_read(addr)
    }

    fn program_write(&mut self, addr: u32, value: u16) {
        (**self).program_write(addr, value)
    }
}

/// Fatal conditions. Any of these aborts the current [`Interpreter::run`];
/// the register file is left as-is and is not specified for resumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RunError {
    #[error("program counter left the 18-bit program space")]
    PcOverflow,
    #[error("block repeat stack overflow")]
    LoopStackOverflow,
    #[error("restored block repeat frame is invalid under a live loop")]
    InvalidLoopRestore,
    #[error("undefined instruction {opcode:#06x}")]
    UndefinedInstruction { opcode: u16 },
}

impl RunError {
    pub(crate) fn undefined() -> Self {
        RunError::UndefinedInstruction { opcode: 0 }
    }
}

pub(crate) type Exec = Result<(), RunError>;

/// The interpreter: the register file plus the embedder's memory system.
pub struct Interpreter<M> {
    pub regs: Registers,
    pub mem: M,
}

impl<M: Memory> Interpreter<M> {
    pub fn new(mem: M) -> Self {
        Self {
            regs: Registers::default(),
            mem,
        }
    }

    /// Latches a regular interrupt line. Picked up at the next instruction
    /// boundary where `ie` allows it.
    pub fn signal_interrupt(&mut self, i: usize) {
        self.regs.ip[i] = true;
    }

    /// Latches the vectored interrupt with its target address.
    pub fn signal_vectored_interrupt(&mut self, address: u32) {
        self.regs.viaddr = address & 0x3FFFF;
        self.regs.vip = true;
    }

    /// Executes `cycles` instruction cycles.
    pub fn run(&mut self, cycles: u32) -> Result<(), RunError> {
        for _ in 0..cycles {
            self.step()?;
        }
        Ok(())
    }

    fn step(&mut self) -> Result<(), RunError> {
        let word = self.mem.program_read(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);

        let decoded = ins::decode(word);
        let mut ins = Ins::new(word);
        if decoded.needs_expansion {
            ins.expansion = self.mem.program_read(self.regs.pc);
            self.regs.pc = self.regs.pc.wrapping_add(1);
        }

        // Single-instruction repeat: rewind so the same instruction is
        // fetched again next cycle.
        if self.regs.rep {
            if self.regs.repc == 0 {
                self.regs.rep = false;
            } else {
                self.regs.repc -= 1;
                self.regs.pc = self.regs.pc.wrapping_sub(decoded.len());
            }
        }

        // Block repeat: the frame end records the last fetched word of the
        // loop body.
        if self.regs.lp {
            if let Some(&frame) = self.regs.bkrep_stack.last() {
                if frame.end + 1 == self.regs.pc {
                    if frame.lc == 0 {
                        self.regs.bkrep_stack.pop();
                        self.regs.lp = !self.regs.bkrep_stack.is_empty();
                    } else {
                        if let Some(frame) = self.regs.bkrep_stack.last_mut() {
                            frame.lc -= 1;
                        }
                        self.regs.pc = frame.start;
                    }
                }
            }
        }

        self.execute(ins).map_err(|err| match err {
            // Attach the offending word to faults raised below the decoder.
            RunError::UndefinedInstruction { .. } => {
                tracing::warn!(opcode = word, pc = self.regs.pc, "undefined instruction");
                RunError::UndefinedInstruction { opcode: word }
            }
            other => other,
        })?;

        // A repeated instruction is not interruptible.
        if self.regs.ie && !self.regs.rep {
            self.check_interrupts();
        }

        Ok(())
    }

    fn check_interrupts(&mut self) {
        for i in 0..3 {
            if self.regs.im[i] && self.regs.ip[i] {
                tracing::trace!(line = i, "taking interrupt");
                self.regs.ip[i] = false;
                self.regs.ie = false;
                self.push_pc();
                self.regs.pc = 0x0006 + i as u32 * 8;
                if self.regs.ic[i] {
                    self.regs.context_store();
                }
                return;
            }
        }

        if self.regs.vim && self.regs.vip {
            tracing::trace!(address = self.regs.viaddr, "taking vectored interrupt");
            self.regs.vip = false;
            self.regs.ie = false;
            self.push_pc();
            self.regs.pc = self.regs.viaddr;
            if self.regs.vic {
                self.regs.context_store();
            }
        }
    }

    pub(crate) fn push_pc(&mut self) {
        let l = self.regs.pc_l();
        let h = self.regs.pc_h();
        if self.regs.cpc {
            self.data_push(h);
            self.data_push(l);
        } else {
            self.data_push(l);
            self.data_push(h);
        }
    }

    pub(crate) fn pop_pc(&mut self) {
        let (l, h) = if self.regs.cpc {
            let l = self.data_pop();
            let h = self.data_pop();
            (l, h)
        } else {
            let h = self.data_pop();
            let l = self.data_pop();
            (l, h)
        };
        self.regs.set_pc(l, h);
    }

    pub(crate) fn data_push(&mut self, value: u16) {
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        self.mem.data_write(self.regs.sp, value);
    }

    pub(crate) fn data_pop(&mut self) -> u16 {
        let value = self.mem.data_read(self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(1);
        value
    }

    /// Checked program-counter write for computed targets.
    pub(crate) fn set_pc_checked(&mut self, pc: u32) -> Exec {
        if pc >= 0x40000 {
            return Err(RunError::PcOverflow);
        }
        self.regs.pc = pc;
        Ok(())
    }

    fn execute(&mut self, ins: Ins) -> Exec {
        use Opcode::*;

        match ins.decoded().opcode {
            Nop => Ok(()),
            Trap | Retd | Retid | Retidc | PushPrpage | PopPrpage | MovEu | MovDvm
            | MovDvmToAb | MovIcrReg | MovIcrImm5 | MovPrpageImm4 | MovPrpageAbl
            | MovPrpageToAbl | MovExt0 | MovExt1 | MovExt2 | MovExt3 | Illegal => {
                self.undefined(ins)
            }

            Dint => self.dint(ins),
            Eint => self.eint(ins),
            CntxS => self.cntx_s(ins),
            CntxR => self.cntx_r(ins),
            Break => self.break_(ins),
            BkrepstoMemsp => self.bkrepsto_memsp(ins),
            BkreprstMemsp => self.bkreprst_memsp(ins),
            BkrepstoArRn => self.bkrepsto_arrn(ins),
            BkreprstArRn => self.bkreprst_arrn(ins),
            ClrP0 => self.clrp0(ins),
            ClrP1 => self.clrp1(ins),
            ClrBothP => self.clrp(ins),
            VtrClr0 => self.vtrclr0(ins),
            VtrClr1 => self.vtrclr1(ins),
            VtrClr => self.vtrclr(ins),
            VtrShr => self.vtrshr(ins),
            VtrMov0 => self.vtrmov0(ins),
            VtrMov1 => self.vtrmov1(ins),
            VtrMov => self.vtrmov(ins),
            Bankr => self.bankr(ins),
            BankrAr => self.bankr_ar(ins),
            BankrArArp => self.bankr_ar_arp(ins),
            BankrArp => self.bankr_arp(ins),
            Banke => self.banke(ins),

            PushR6 => self.push_r6(ins),
            PushRepc => self.push_repc(ins),
            PushX0 => self.push_x0(ins),
            PushX1 => self.push_x1(ins),
            PushY1 => self.push_y1(ins),
            PopR6 => self.pop_r6(ins),
            PopRepc => self.pop_repc(ins),
            PopX0 => self.pop_x0(ins),
            PopX1 => self.pop_x1(ins),
            PopY1 => self.pop_y1(ins),
            PushImm16 => self.push_imm16(ins),
            PushReg => self.push_reg(ins),
            PopReg => self.pop_reg(ins),
            PushSysReg => self.push_sysreg(ins),
            PopSysReg => self.pop_sysreg(ins),
            PushaAx => self.pusha_ax(ins),
            PushaBx => self.pusha_bx(ins),
            PushAbe => self.push_abe(ins),
            PopAbe => self.pop_abe(ins),
            PushPx => self.push_px(ins),
            PopPx => self.pop_px(ins),
            PopaAb => self.popa(ins),

            MovPcAx => self.mov_pc_ax(ins),
            MovPcBx => self.mov_pc_bx(ins),
            CallaAxl => self.calla_axl(ins),
            CallaAx => self.calla_ax(ins),
            Movpdw => self.movpdw(ins),

            ExpR6 => self.exp_r6(ins),
            ExpR6Ax => self.exp_r6_ax(ins),
            ExpBx => self.exp_bx(ins),
            ExpBxAx => self.exp_bx_ax(ins),
            ExpRn => self.exp_rn(ins),
            ExpRnAx => self.exp_rn_ax(ins),
            ExpReg => self.exp_reg(ins),
            ExpRegAx => self.exp_reg_ax(ins),

            MovR6Mixp => self.mov_r6_mixp(ins),
            MovMixpR6 => self.mov_mixp_r6(ins),
            MovMemspR6 => self.mov_memsp_r6(ins),
            MovMemspReg => self.mov_memsp_reg(ins),
            MovMixpReg => self.mov_mixp_reg(ins),
            MovRegMixp => self.mov_reg_mixp(ins),
            MovP0hReg => self.mov_p0h_reg(ins),
            MovP0hR6 => self.mov_p0h_r6(ins),
            MovRegR6 => self.mov_reg_r6(ins),
            MovR6Reg => self.mov_r6_reg(ins),
            MovR6Rn => self.mov_r6_rn(ins),
            MovR6ToRn => self.mov_r6_to_rn(ins),

            LoadPs => self.load_ps(ins),
            LoadMovpd => self.load_movpd(ins),
            LoadPs01 => self.load_ps01(ins),
            LoadStepi => self.load_stepi(ins),
            LoadStepj => self.load_stepj(ins),
            LoadPage => self.load_page(ins),
            LoadModi => self.load_modi(ins),
            LoadModj => self.load_modj(ins),

            Bitrev => self.bitrev(ins),
            BitrevDbrv => self.bitrev_dbrv(ins),
            BitrevEbrv => self.bitrev_ebrv(ins),
            Swap => self.swap(ins),

            RepImm8 => self.rep_imm8(ins),
            RepReg => self.rep_reg(ins),
            RepR6 => self.rep_r6(ins),
            BkrepImm8 => self.bkrep_imm8(ins),
            BkrepReg => self.bkrep_reg(ins),
            BkrepR6 => self.bkrep_r6(ins),

            Norm => self.norm(ins),
            MovA0hStepi0 => self.mov_a0h_stepi0(ins),
            MovA0hStepj0 => self.mov_a0h_stepj0(ins),
            MovStepi0A0h => self.mov_stepi0_a0h(ins),
            MovStepj0A0h => self.mov_stepj0_a0h(ins),
            MovStepi0Imm16 => self.mov_stepi0_imm16(ins),
            MovStepj0Imm16 => self.mov_stepj0_imm16(ins),

            AddAbBx => self.add_ab_bx(ins),
            AddBxAx => self.add_bx_ax(ins),
            AddP1Ax => self.add_p1_ax(ins),
            AddPxBx => self.add_px_bx(ins),
            SubAbBx => self.sub_ab_bx(ins),
            SubBxAx => self.sub_bx_ax(ins),
            SubP1Ax => self.sub_p1_ax(ins),
            SubPxBx => self.sub_px_bx(ins),
            CmpAxBx => self.cmp_ax_bx(ins),
            CmpB0B1 => self.cmp_b0_b1(ins),
            CmpB1B0 => self.cmp_b1_b0(ins),
            CmpBxAx => self.cmp_bx_ax(ins),
            CmpP1Ax => self.cmp_p1_ax(ins),

            OrAbAbAx => self.or_ab_ab_ax(ins),
            OrAxBxAx => self.or_ax_bx_ax(ins),
            OrBxBxAx => self.or_bx_bx_ax(ins),
            AndAbAbAx => self.and_ab_ab_ax(ins),
            ClrAbAb => self.clr(ins),
            ClrrAbAb => self.clrr(ins),

            AddP0P1 => self.add_p0_p1(ins),
            AddP0P1a => self.add_p0_p1a(ins),
            Add3P0P1 => self.add3_p0_p1(ins),
            Add3P0P1a => self.add3_p0_p1a(ins),
            Add3P0aP1a => self.add3_p0a_p1a(ins),
            SubP0P1 => self.sub_p0_p1(ins),
            SubP0P1a => self.sub_p0_p1a(ins),
            Sub3P0P1 => self.sub3_p0_p1(ins),
            Sub3P0P1a => self.sub3_p0_p1a(ins),
            Sub3P0aP1a => self.sub3_p0a_p1a(ins),
            AddsubP0P1 => self.addsub_p0_p1(ins),
            AddsubP1P0 => self.addsub_p1_p0(ins),
            AddsubP0P1a => self.addsub_p0_p1a(ins),
            AddsubP1aP0 => self.addsub_p1a_p0(ins),

            RetsImm8 => self.rets(ins),
            Divs => self.divs(ins),

            TstbMemImm8 => self.tstb_mem_imm8(ins),
            TstbRn => self.tstb_rn(ins),
            TstbReg => self.tstb_reg(ins),
            TstbR6 => self.tstb_r6(ins),
            TstbSttMod => self.tstb_sttmod(ins),
            Tst4b => self.tst4b(ins),
            Tst4bAx => self.tst4b_ax(ins),

            MovAbAb => self.mov_ab_ab(ins),
            MovX0Abl => self.mov_x0_abl(ins),
            MovX1Abl => self.mov_x1_abl(ins),
            MovY1Abl => self.mov_y1_abl(ins),
            MovIcrToAb => self.mov_icr_to_ab(ins),
            MovRepcToAb => self.mov_repc_to_ab(ins),
            MovRepcToAbl => self.mov_repc_to_abl(ins),
            MovRepcAbl => self.mov_repc_abl(ins),
            MovP0Ab => self.mov_p0_ab(ins),
            MovP1ToAb => self.mov_p1_to_ab(ins),
            MovX0ToAb => self.mov_x0_to_ab(ins),
            MovX1ToAb => self.mov_x1_to_ab(ins),
            MovY1ToAb => self.mov_y1_to_ab(ins),

            Brr => self.brr(ins),
            Callr => self.callr(ins),
            Br => self.br(ins),
            Call => self.call(ins),
            Ret => self.ret(ins),
            Reti => self.reti(ins),
            Retic => self.retic(ins),

            AlmMemImm8 => self.alm_mem_imm8(ins),
            AlmRn => self.alm_rn(ins),
            AlmReg => self.alm_reg(ins),
            AlmR6 => self.alm_r6(ins),
            AluMemImm16 => self.alu_mem_imm16(ins),
            AluMemR7Imm16 => self.alu_mem_r7imm16(ins),
            AluImm16 => self.alu_imm16(ins),
            AluImm8 => self.alu_imm8(ins),
            AluMemR7Imm7s => self.alu_mem_r7imm7s(ins),

            AlbMemImm8 => self.alb_mem_imm8(ins),
            AlbRn => self.alb_rn(ins),
            AlbReg => self.alb_reg(ins),
            AlbR6 => self.alb_r6(ins),
            AlbSttMod => self.alb_sttmod(ins),

            Moda4 => self.moda4(ins),
            Moda3 => self.moda3(ins),
            Pacr1 => self.pacr1(ins),
            Shfi => self.shfi(ins),
            Shfc => self.shfc(ins),

            ModrRn => self.modr(ins),
            ModrDmod => self.modr_dmod(ins),
            ModrI2 => self.modr_i2(ins),
            ModrI2Dmod => self.modr_i2_dmod(ins),
            ModrD2 => self.modr_d2(ins),
            ModrD2Dmod => self.modr_d2_dmod(ins),
            ModrEemod => self.modr_eemod(ins),
            ModrEdmod => self.modr_edmod(ins),
            ModrDemod => self.modr_demod(ins),
            ModrDdmod => self.modr_ddmod(ins),

            MulRnRn => self.mul_rn_rn(ins),
            MulRnImm16 => self.mul_rn_imm16(ins),
            MulY0Rn => self.mul_y0_rn(ins),
            MulY0Reg => self.mul_y0_reg(ins),
            MulY0MemImm8 => self.mul_y0_mem_imm8(ins),
            MulY0R6 => self.mul_y0_r6(ins),
            Mpyi => self.mpyi(ins),
            Msu => self.msu(ins),
            MsuRnImm16 => self.msu_rn_imm16(ins),
            Msusu => self.msusu(ins),
            MacX1to0 => self.mac_x1to0(ins),
            Mac1 => self.mac1(ins),

            AddAdd => self.add_add(ins),
            AddSub => self.add_sub_mem(ins),
            SubAdd => self.sub_add(ins),
            SubSub => self.sub_sub(ins),
            AddSubSv => self.add_sub_sv(ins),
            SubAddSv => self.sub_add_sv(ins),
            SubAddIMovJSv => self.sub_add_i_mov_j_sv(ins),
            SubAddJMovISv => self.sub_add_j_mov_i_sv(ins),
            AddSubIMovJ => self.add_sub_i_mov_j(ins),
            AddSubJMovI => self.add_sub_j_mov_i(ins),
            Addhp => self.addhp(ins),

            MovAddsubSv => self.mov_addsub_sv(ins),
            MovAddsubRndSv => self.mov_addsub_rnd_sv(ins),
            MovSub3Sv => self.mov_sub3_sv(ins),
            MovSub3RndSv => self.mov_sub3_rnd_sv(ins),

            SqrSqrAdd3Ab => self.sqr_sqr_add3_ab(ins),
            SqrSqrAdd3Mem => self.sqr_sqr_add3_mem(ins),
            SqrMpysuAdd3a => self.sqr_mpysu_add3a(ins),

            MmaSwap => self.mma_swap(ins),
            MmaArp => self.mma_arp(ins),
            MmaMxXy => self.mma_mx_xy(ins),
            MmaXyMx => self.mma_xy_mx(ins),
            MmaMyMy => self.mma_my_my(ins),
            MmaMovAxh => self.mma_mov_axh(ins),
            MmaMovArRn => self.mma_mov_arrn(ins),

            CbsAxh => self.cbs_axh(ins),
            CbsAxhBxh => self.cbs_axh_bxh(ins),
            CbsArp => self.cbs_arp(ins),

            MaxGe => self.max_ge(ins),
            MaxGt => self.max_gt(ins),
            MinLe => self.min_le(ins),
            MinLt => self.min_lt(ins),
            MaxGeR0 => self.max_ge_r0(ins),
            MaxGtR0 => self.max_gt_r0(ins),
            MinLeR0 => self.min_le_r0(ins),
            MinLtR0 => self.min_lt_r0(ins),
            Max2VtrAx => self.max2_vtr_ax(ins),
            Min2VtrAx => self.min2_vtr_ax(ins),
            Max2VtrAxBx => self.max2_vtr_ax_bx(ins),
            Min2VtrAxBx => self.min2_vtr_ax_bx(ins),
            MinMax2Mov => self.minmax2_mov(ins),
            MinMax2Mov2 => self.minmax2_mov2(ins),

            Lim => self.lim(ins),

            MovpProg => self.movp_prog(ins),
            Movd => self.movd(ins),
            MovpAxlReg => self.movp_axl_reg(ins),
            MovpAxReg => self.movp_ax_reg(ins),

            MovAblArArp => self.mov_abl_ararp(ins),
            MovAblSttMod => self.mov_abl_sttmod(ins),
            MovArArpAbl => self.mov_ararp_abl(ins),
            MovSttModAbl => self.mov_sttmod_abl(ins),
            MovRepcToArRn => self.mov_repc_to_arrn(ins),
            MovRepcArRn => self.mov_repc_arrn(ins),
            MovArArpToArRn => self.mov_ararp_to_arrn(ins),
            MovSttModToArRn => self.mov_sttmod_to_arrn(ins),
            MovArRnArArp => self.mov_arrn_ararp(ins),
            MovArRnSttMod => self.mov_arrn_sttmod(ins),
            MovRepcToR7Imm16 => self.mov_repc_to_r7imm16(ins),
            MovRepcR7Imm16 => self.mov_repc_r7imm16(ins),
            MovSysRegToR7 => self.mov_sysreg_to_r7(ins),
            MovR7ToSysReg => self.mov_r7_to_sysreg(ins),

            MovRnReg => self.mov_rn_reg(ins),
            MovRegRn => self.mov_reg_rn(ins),
            MovRegReg => self.mov_reg_reg(ins),
            MovRegBx => self.mov_reg_bx(ins),
            MovAblhMemImm8 => self.mov_ablh_mem_imm8(ins),
            MovMemImm8Ab => self.mov_mem_imm8_ab(ins),
            MovMemImm8Ablh => self.mov_mem_imm8_ablh(ins),
            MovMemImm8RnOld => self.mov_mem_imm8_rnold(ins),
            MovRnOldMemImm8 => self.mov_rnold_mem_imm8(ins),
            MovAxlMemImm16 => self.mov_axl_mem_imm16(ins),
            MovAxlMemR7Imm16 => self.mov_axl_mem_r7imm16(ins),
            MovAxlMemR7Imm7s => self.mov_axl_mem_r7imm7s(ins),
            MovMemImm16Ax => self.mov_mem_imm16_ax(ins),
            MovMemR7Imm16Ax => self.mov_mem_r7imm16_ax(ins),
            MovMemR7Imm7sAx => self.mov_mem_r7imm7s_ax(ins),
            MovImm16Reg => self.mov_imm16_reg(ins),
            MovImm16Bx => self.mov_imm16_bx(ins),
            MovImm16ArArp => self.mov_imm16_ararp(ins),
            MovImm16SttMod => self.mov_imm16_sttmod(ins),
            MovR6Imm16 => self.mov_r6_imm16(ins),
            MovRepcImm16 => self.mov_repc_imm16(ins),
            MovImm8sAxh => self.mov_imm8s_axh(ins),
            MovImm8Axl => self.mov_imm8_axl(ins),
            MovImm8sRnOld => self.mov_imm8s_rnold(ins),

            MovaAbToM => self.mova_ab_to_m(ins),
            MovaMToAb => self.mova_m_to_ab(ins),
            Mov2PxToM => self.mov2_px_to_m(ins),
            Mov2sPxToM => self.mov2s_px_to_m(ins),
            Mov2MToPx => self.mov2_m_to_px(ins),
            Mov2AxhM => self.mov2_axh_m(ins),
            Mov2AxMij => self.mov2_ax_mij(ins),
            Mov2AxMji => self.mov2_ax_mji(ins),
            Mov2MijAx => self.mov2_mij_ax(ins),
            Mov2MjiAx => self.mov2_mji_ax(ins),
            Mov2AbhM => self.mov2_abh_m(ins),
            ExchangeIaj => self.exchange_iaj(ins),
            ExchangeRiaj => self.exchange_riaj(ins),
            ExchangeJai => self.exchange_jai(ins),
            ExchangeRjai => self.exchange_rjai(ins),

            MovsMemImm8Ab => self.movs_mem_imm8_ab(ins),
            MovsRnAb => self.movs_rn_ab(ins),
            MovsRegAb => self.movs_reg_ab(ins),
            MovsR6Ax => self.movs_r6_ax(ins),
            Movsi => self.movsi(ins),
            MovrArRnAbh => self.movr_arrn_abh(ins),
            MovrRnAx => self.movr_rn_ax(ins),
            MovrRegAx => self.movr_reg_ax(ins),
            MovrBxAx => self.movr_bx_ax(ins),
            MovrR6Ax => self.movr_r6_ax(ins),
        }
    }
}

#[cfg(test)]
mod test;
