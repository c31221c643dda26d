use strum::{FromRepr, VariantArray};

/// Condition field evaluated against the register file flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRepr)]
#[repr(u8)]
pub enum Cond {
    True = 0b0000,
    Eq = 0b0001,
    Neq = 0b0010,
    Gt = 0b0011,
    Ge = 0b0100,
    Lt = 0b0101,
    Le = 0b0110,
    Nn = 0b0111,
    Carry = 0b1000,
    Overflow = 0b1001,
    Extension = 0b1010,
    Latched = 0b1011,
    NotR = 0b1100,
    NotIu0 = 0b1101,
    Iu0 = 0b1110,
    Iu1 = 0b1111,
}

impl Cond {
    pub fn new(value: u8) -> Self {
        Self::from_repr(value & 0xF).unwrap()
    }
}

#[derive(Clone, Copy)]
struct OpcodeInfo {
    mask: u16,
    target: u16,
}

impl OpcodeInfo {
    #[inline(always)]
    fn matches(self, value: u16) -> bool {
        (value & self.mask) == self.target
    }

    const fn parse(s: &'static str) -> Self {
        assert!(s.is_ascii());

        let bytes = s.as_bytes();

        let mut mask = 0;
        let mut target = 0;

        let mut char_index = 0;
        let mut bit_index = 15;
        loop {
            let char = bytes[char_index];
            match char {
                b'0' => {
                    mask |= 1 << bit_index;
                }
                b'1' => {
                    mask |= 1 << bit_index;
                    target |= 1 << bit_index;
                }
                b'x' | b'_' => (),
                _ => panic!("unknown character"),
            }

            char_index += 1;
            if char != b'_' {
                if bit_index == 0 {
                    break;
                }

                bit_index -= 1;
            }
        }

        Self { mask, target }
    }
}

macro_rules! opcode {
    (
        $e:ident;
        $($name:ident = $opcode:literal),*
        $(,)?
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, VariantArray)]
        pub enum $e {
            $(
                $name,
            )*
            Illegal,
        }

        impl $e {
            pub fn find_match(value: u16) -> Self {
                $(
                    let info = const { OpcodeInfo::parse($opcode) };
                    if info.matches(value) {
                        return Self::$name;
                    }
                )*

                Self::Illegal
            }

            #[cfg(test)]
            fn info(self) -> Option<OpcodeInfo> {
                match self {
                    $(
                        Self::$name => Some(const { OpcodeInfo::parse($opcode) }),
                    )*
                    Self::Illegal => None,
                }
            }
        }
    };
}

// Operand field placement is noted per block; handlers pull the fields out of
// the instruction word with `BitUtils`.
opcode! {
    Opcode;

    // 0000_0000_0000: bare words.
    Nop           = "0000_0000_0000_0000",
    Trap          = "0000_0000_0000_0001",
    Dint          = "0000_0000_0000_0010",
    Eint          = "0000_0000_0000_0011",
    CntxS         = "0000_0000_0000_0100",
    CntxR         = "0000_0000_0000_0101",
    Break         = "0000_0000_0000_0110",
    BkrepstoMemsp = "0000_0000_0000_0111",
    BkreprstMemsp = "0000_0000_0000_1000",
    Retd          = "0000_0000_0000_1001",
    Retid         = "0000_0000_0000_1010",
    Retidc        = "0000_0000_0000_1011",
    PushPrpage    = "0000_0000_0000_1100",
    PopPrpage     = "0000_0000_0000_1101",
    ClrP0         = "0000_0000_0000_1110",
    ClrP1         = "0000_0000_0000_1111",
    ClrBothP      = "0000_0000_0001_0000",
    VtrClr0       = "0000_0000_0001_0001",
    VtrClr1       = "0000_0000_0001_0010",
    VtrClr        = "0000_0000_0001_0011",
    VtrShr        = "0000_0000_0001_0100",
    Bankr         = "0000_0000_0001_0101",
    PushR6        = "0000_0000_0001_0110",
    PushRepc      = "0000_0000_0001_0111",
    PushX0        = "0000_0000_0001_1000",
    PushX1        = "0000_0000_0001_1001",
    PushY1        = "0000_0000_0001_1010",
    PopR6         = "0000_0000_0001_1011",
    PopRepc       = "0000_0000_0001_1100",
    PopX0         = "0000_0000_0001_1101",
    PopX1         = "0000_0000_0001_1110",
    PopY1         = "0000_0000_0001_1111",

    // 0000_0000_0010: Axl/Ax singles (bit 0).
    VtrMov0       = "0000_0000_0010_000x",
    VtrMov1       = "0000_0000_0010_001x",
    VtrMov        = "0000_0000_0010_010x",
    PushImm16     = "0000_0000_0010_0110",
    MovEu         = "0000_0000_0010_0111",
    MovPcAx       = "0000_0000_0010_100x",
    MovPcBx       = "0000_0000_0010_101x",
    CallaAxl      = "0000_0000_0010_110x",
    CallaAx       = "0000_0000_0010_111x",

    BankrAr       = "0000_0000_0011_000x",
    Movpdw        = "0000_0000_0011_001x",
    ExpR6         = "0000_0000_0011_0100",
    ExpR6Ax       = "0000_0000_0011_011x",
    MovR6Mixp     = "0000_0000_0011_1000",
    MovMixpR6     = "0000_0000_0011_1001",
    MovMemspR6    = "0000_0000_0011_1010",

    // reg5 in bits 4..0.
    MovMemspReg   = "0000_0000_010x_xxxx",
    MovMixpReg    = "0000_0000_011x_xxxx",
    MovRegMixp    = "0000_0000_100x_xxxx",
    MovP0hReg     = "0000_0000_101x_xxxx",
    MovRegR6      = "0000_0000_110x_xxxx",
    MovR6Reg      = "0000_0000_111x_xxxx",

    // 0000_0001: banks, stack and product/extension stack ops.
    BankrArArp    = "0000_0001_0000_0xxx",
    BankrArp      = "0000_0001_0000_10xx",
    BkrepstoArRn  = "0000_0001_0000_11xx",
    BkreprstArRn  = "0000_0001_0001_00xx",
    PushaAx       = "0000_0001_0001_010x",
    PushaBx       = "0000_0001_0001_011x",
    PushAbe       = "0000_0001_0001_10xx",
    PopAbe        = "0000_0001_0001_11xx",
    PushPx        = "0000_0001_0010_000x",
    PopPx         = "0000_0001_0010_001x",
    PopaAb        = "0000_0001_0010_01xx",
    PushReg       = "0000_0001_011x_xxxx",
    PopReg        = "0000_0001_100x_xxxx",
    PushSysReg    = "0000_0001_1010_xxxx",
    PopSysReg     = "0000_0001_1011_xxxx",
    LoadPs        = "0000_0001_1100_00xx",
    LoadMovpd     = "0000_0001_1100_01xx",
    LoadPs01      = "0000_0001_1101_xxxx",

    // Addressing-mode immediates.
    LoadStepi     = "0000_0010_0xxx_xxxx",
    LoadStepj     = "0000_0010_1xxx_xxxx",
    LoadPage      = "0000_0011_xxxx_xxxx",
    LoadModi      = "0000_010x_xxxx_xxxx",
    LoadModj      = "0000_011x_xxxx_xxxx",

    // 0000_1000: bank/bit-reverse/swap/repeat.
    Banke         = "0000_1000_00xx_xxxx",
    Bitrev        = "0000_1000_0100_0xxx",
    BitrevDbrv    = "0000_1000_0100_1xxx",
    BitrevEbrv    = "0000_1000_0101_0xxx",
    RepR6         = "0000_1000_0101_1000",
    Swap          = "0000_1000_0110_xxxx",
    RepReg        = "0000_1000_100x_xxxx",
    ModrDdmod     = "0000_1000_11xx_xxxx",

    // 0000_1001: norm, step0 transfers, accumulator add/sub/cmp.
    Norm          = "0000_1001_00xx_xxxx",
    MovA0hStepi0  = "0000_1001_0100_0000",
    MovA0hStepj0  = "0000_1001_0100_0001",
    MovStepi0A0h  = "0000_1001_0100_0010",
    MovStepj0A0h  = "0000_1001_0100_0011",
    AddAbBx       = "0000_1001_1000_0xxx",
    AddBxAx       = "0000_1001_1000_10xx",
    AddP1Ax       = "0000_1001_1000_110x",
    AddPxBx       = "0000_1001_1001_00xx",
    SubAbBx       = "0000_1001_1010_0xxx",
    SubBxAx       = "0000_1001_1010_10xx",
    SubP1Ax       = "0000_1001_1010_110x",
    SubPxBx       = "0000_1001_1011_00xx",
    CmpAxBx       = "0000_1001_1100_00xx",
    CmpB0B1       = "0000_1001_1100_0100",
    CmpB1B0       = "0000_1001_1100_0101",
    CmpBxAx       = "0000_1001_1101_00xx",
    CmpP1Ax       = "0000_1001_1101_100x",
    OrAbAbAx      = "0000_1001_111x_xxxx",

    RepImm8       = "0000_1010_xxxx_xxxx",
    RetsImm8      = "0000_1011_xxxx_xxxx",
    Divs          = "0000_110x_xxxx_xxxx",

    // 0000_1110: bit tests and the product-sum network.
    TstbR6        = "0000_1110_0000_xxxx",
    TstbSttMod    = "0000_1110_0001_0xxx",
    AddsubP0P1a   = "0000_1110_0001_10xx",
    AddsubP1aP0   = "0000_1110_0001_11xx",
    Tst4b         = "0000_1110_0010_xxxx",
    AddP0P1       = "0000_1110_0011_00xx",
    AddP0P1a      = "0000_1110_0011_01xx",
    Add3P0P1      = "0000_1110_0011_10xx",
    Add3P0P1a     = "0000_1110_0011_11xx",
    Tst4bAx       = "0000_1110_010x_xxxx",
    Add3P0aP1a    = "0000_1110_0110_00xx",
    SubP0P1       = "0000_1110_0110_01xx",
    SubP0P1a      = "0000_1110_0110_10xx",
    Sub3P0P1      = "0000_1110_0110_11xx",
    Sub3P0P1a     = "0000_1110_0111_00xx",
    Sub3P0aP1a    = "0000_1110_0111_01xx",
    AddsubP0P1    = "0000_1110_0111_10xx",
    AddsubP1P0    = "0000_1110_0111_11xx",
    AddSubJMovI   = "0000_1110_1xxx_xxxx",

    // 0000_1111: accumulator moves and multiplier-input moves.
    MovAbAb       = "0000_1111_0000_xxxx",
    MovDvm        = "0000_1111_0001_00xx",
    MovX0Abl      = "0000_1111_0001_01xx",
    MovX1Abl      = "0000_1111_0001_10xx",
    MovY1Abl      = "0000_1111_0001_11xx",
    MovDvmToAb    = "0000_1111_0010_01xx",
    MovIcrToAb    = "0000_1111_0010_10xx",
    MovRepcToAb   = "0000_1111_0010_11xx",
    MovPrpageImm4 = "0000_1111_0100_xxxx",
    MovPrpageAbl  = "0000_1111_0101_00xx",
    MovPrpageToAbl = "0000_1111_0101_01xx",
    MovExt0       = "0000_1111_0101_1000",
    MovExt1       = "0000_1111_0101_1001",
    MovExt2       = "0000_1111_0101_1010",
    MovExt3       = "0000_1111_0101_1011",
    MovIcrImm5    = "0000_1111_011x_xxxx",
    MovRepcToAbl  = "0000_1111_1000_00xx",
    MovRepcAbl    = "0000_1111_1000_01xx",
    MovR6Rn       = "0000_1111_101x_xxxx",
    MovR6ToRn     = "0000_1111_110x_xxxx",
    MovP0hR6      = "0000_1111_1110_0000",
    MovP0Ab       = "0000_1111_1110_01xx",
    MovP1ToAb     = "0000_1111_1110_10xx",
    MovX0ToAb     = "0000_1111_1111_00xx",
    MovX1ToAb     = "0000_1111_1111_01xx",
    MovY1ToAb     = "0000_1111_1111_10xx",

    // Relative branches: rel7 in bits 10..4, cond in bits 3..0.
    Brr           = "0001_0xxx_xxxx_xxxx",
    Callr         = "0001_1xxx_xxxx_xxxx",

    // ALM: op in bits 12..9, Ax in bit 8, imm8 in bits 7..0.
    AlmMemImm8    = "001x_xxxx_xxxx_xxxx",

    // ALM variants: op bits 9..6, Ax bit 5, then Rn+step or reg5.
    AlmRn         = "0100_00xx_xxxx_xxxx",
    AlmReg        = "0100_01xx_xxxx_xxxx",
    AlmR6         = "0100_1000_000x_xxxx",
    ModrDemod     = "0100_1000_01xx_xxxx",
    // ALU 16-bit operand forms: op bits 6..4, Ax bit 0.
    AluMemImm16   = "0100_1000_1xxx_000x",
    AluMemR7Imm16 = "0100_1000_1xxx_001x",
    AluImm16      = "0100_1000_1xxx_010x",
    // Program-memory word moves: src r4..r7 bits 7..6, step bits 5..4,
    // dst r0..r3 bits 3..2, step bits 1..0.
    MovpProg      = "0100_1001_xxxx_xxxx",
    Br            = "0100_1010_00xx_xxxx",
    Call          = "0100_1010_01xx_xxxx",
    Ret           = "0100_1010_1000_xxxx",
    Reti          = "0100_1010_1001_xxxx",
    Retic         = "0100_1010_1010_xxxx",
    BkrepImm8     = "0100_1011_xxxx_xxxx",
    BkrepReg      = "0100_1100_0xxx_xxxx",
    BkrepR6       = "0100_1101_0000_00xx",
    AddSubIMovJ   = "0100_1101_1xxx_xxxx",
    TstbRn        = "0100_111x_xxxx_xxxx",

    // ALU with inline imm8: op bits 11..9, Ax bit 8.
    AluImm8       = "0101_xxxx_xxxx_xxxx",

    AluMemR7Imm7s = "0110_0xxx_xxxx_xxxx",
    AlbMemImm8    = "0110_1xxx_xxxx_xxxx",

    // ALB variants: op bits 7..5 (Rn form 7..5, reg form 7..5).
    AlbRn         = "0111_0000_xxxx_xxxx",
    AlbReg        = "0111_0001_xxxx_xxxx",
    AlbR6         = "0111_0010_0000_0xxx",
    AlbSttMod     = "0111_0010_10xx_xxxx",
    TstbMemImm8   = "0111_0011_xxxx_xxxx",
    MovAblArArp   = "0111_0100_000x_xxxx",
    MovAblSttMod  = "0111_0100_001x_xxxx",
    MovArArpAbl   = "0111_0100_010x_xxxx",
    MovSttModAbl  = "0111_0100_011x_xxxx",
    MovRepcToArRn = "0111_0100_1000_xxxx",
    MovRepcArRn   = "0111_0100_1001_xxxx",
    MovArArpToArRn = "0111_0101_0xxx_xxxx",
    MovSttModToArRn = "0111_0101_1xxx_xxxx",
    MovArRnArArp  = "0111_0110_0xxx_xxxx",
    MovArRnSttMod = "0111_0110_1xxx_xxxx",
    MovRepcToR7Imm16 = "0111_0111_0000_0000",
    MovRepcR7Imm16 = "0111_0111_0000_0001",
    MovSysRegToR7 = "0111_0111_0001_xxxx",
    MovR7ToSysReg = "0111_0111_0010_xxxx",
    MovpAxlReg    = "0111_0111_01xx_xxxx",
    Movd          = "0111_0111_1xxx_xxxx",
    // MODA: op bits 8..5, acc bit 4, cond bits 3..0.
    Moda4         = "0111_100x_xxxx_xxxx",
    Moda3         = "0111_1010_xxxx_xxxx",
    Pacr1         = "0111_1011_0000_000x",
    Shfi          = "0111_11xx_xxxx_xxxx",

    // Multiplication: op bits 10..8, Ax bit 7, y unit bit 6, y step 5..4,
    // x unit 3..2, x step 1..0.
    MulRnRn       = "1000_0xxx_xxxx_xxxx",
    MulRnImm16    = "1000_100x_xxxx_xxxx",
    MulY0Rn       = "1000_101x_xxxx_xxxx",
    MulY0Reg      = "1000_110x_xxxx_xxxx",
    MovsRnAb      = "1000_1110_0xxx_xxxx",
    MovsR6Ax      = "1000_1110_1000_000x",
    MovsRegAb     = "1000_1111_0xxx_xxxx",
    MovpAxReg     = "1000_1111_10xx_xxxx",

    MulY0MemImm8  = "1001_0xxx_xxxx_xxxx",
    MulY0R6       = "1001_1000_0000_xxxx",
    Mpyi          = "1001_1001_xxxx_xxxx",
    Msu           = "1001_1010_xxxx_xxxx",
    MsuRnImm16    = "1001_1011_00xx_xxxx",
    Msusu         = "1001_1100_000x_xxxx",
    AddAdd        = "1001_1101_0xxx_xxxx",
    AddSub        = "1001_1101_1xxx_xxxx",
    SubAdd        = "1001_1110_0xxx_xxxx",
    SubSub        = "1001_1110_1xxx_xxxx",
    AddSubSv      = "1001_1111_000x_xxxx",
    SubAddSv      = "1001_1111_001x_xxxx",
    MmaSwap       = "1001_1111_0100_00xx",
    MmaMxXy       = "1001_1111_0101_xxxx",
    MmaXyMx       = "1001_1111_0110_xxxx",
    MmaMyMy       = "1001_1111_0111_xxxx",
    SubAddIMovJSv = "1001_1111_1xxx_xxxx",

    // Register/indirect moves: reg5 bits 9..5, Rn bits 4..2, step bits 1..0.
    MovRnReg      = "1010_00xx_xxxx_xxxx",
    MovRegRn      = "1010_01xx_xxxx_xxxx",
    MovRegReg     = "1010_10xx_xxxx_xxxx",
    MovRegBx      = "1010_1100_00xx_xxxx",
    MovAddsubSv   = "1010_1100_0100_xxxx",
    MovAddsubRndSv = "1010_1100_0101_xxxx",
    MovSub3Sv     = "1010_1100_0110_xxxx",
    MovSub3RndSv  = "1010_1100_0111_xxxx",
    SqrSqrAdd3Ab  = "1010_1100_1000_xxxx",
    SqrSqrAdd3Mem = "1010_1100_11xx_xxxx",
    SqrMpysuAdd3a = "1010_1101_0100_xxxx",
    OrAxBxAx      = "1010_1101_1000_0xxx",
    OrBxBxAx      = "1010_1101_1001_0xxx",
    AndAbAbAx     = "1010_1101_101x_xxxx",
    ClrAbAb       = "1010_1101_1100_xxxx",
    ClrrAbAb      = "1010_1101_1101_xxxx",
    ModrRn        = "1010_1101_111x_xxxx",
    Shfc          = "1010_1110_xxxx_xxxx",
    CbsArp        = "1010_1111_00xx_xxxx",
    ModrDmod      = "1010_1111_010x_xxxx",
    ModrI2        = "1010_1111_0110_0xxx",
    ModrI2Dmod    = "1010_1111_0110_1xxx",
    ModrD2        = "1010_1111_0111_0xxx",
    ModrD2Dmod    = "1010_1111_0111_1xxx",
    ModrEemod     = "1010_1111_10xx_xxxx",
    ModrEdmod     = "1010_1111_11xx_xxxx",

    // Short-page memory moves: imm8 in bits 7..0.
    MovAblhMemImm8 = "1011_0xxx_xxxx_xxxx",
    MovMemImm8Ab  = "1011_10xx_xxxx_xxxx",
    TstbReg       = "1011_110x_xxxx_xxxx",
    Mov2MijAx     = "1011_1110_0xxx_xxxx",
    Mov2MjiAx     = "1011_1110_1xxx_xxxx",
    Mov2AbhM      = "1011_1111_0xxx_xxxx",
    ExchangeIaj   = "1011_1111_1xxx_xxxx",

    MovMemImm8Ablh = "1100_0xxx_xxxx_xxxx",
    MovMemImm8RnOld = "1100_1xxx_xxxx_xxxx",

    MovAxlMemImm16 = "1101_0010_0000_000x",
    MovAxlMemR7Imm16 = "1101_0010_0000_001x",
    MmaArp        = "1101_0010_1xxx_xxxx",
    MovAxlMemR7Imm7s = "1101_0011_xxxx_xxxx",
    MovMemImm16Ax = "1101_0100_0000_000x",
    MovMemR7Imm16Ax = "1101_0100_0000_001x",
    MmaMovAxh     = "1101_0100_10xx_xxxx",
    MmaMovArRn    = "1101_0100_110x_xxxx",
    MovMemR7Imm7sAx = "1101_0101_xxxx_xxxx",
    ExchangeRiaj  = "1101_0110_0xxx_xxxx",
    ExchangeJai   = "1101_0110_1xxx_xxxx",
    ExchangeRjai  = "1101_0111_0xxx_xxxx",
    Addhp         = "1101_0111_10xx_xxxx",
    CbsAxh        = "1101_0111_1100_00xx",
    CbsAxhBxh     = "1101_0111_1100_1xxx",
    MovRnOldMemImm8 = "1101_1xxx_xxxx_xxxx",

    MovImm16Reg   = "1110_0000_000x_xxxx",
    MovImm16Bx    = "1110_0000_0010_000x",
    MovImm16ArArp = "1110_0000_0011_0xxx",
    MovImm16SttMod = "1110_0000_0011_1xxx",
    MovR6Imm16    = "1110_0000_0100_0000",
    MovRepcImm16  = "1110_0000_0100_0001",
    MovStepi0Imm16 = "1110_0000_0100_0010",
    MovStepj0Imm16 = "1110_0000_0100_0011",
    SubAddJMovISv = "1110_0000_1xxx_xxxx",
    MovIcrReg     = "1110_0001_000x_xxxx",
    MovImm8sAxh   = "1110_001x_xxxx_xxxx",
    MovImm8Axl    = "1110_010x_xxxx_xxxx",
    MovaAbToM     = "1110_0110_00xx_xxxx",
    MovaMToAb     = "1110_0110_01xx_xxxx",
    Mov2PxToM     = "1110_0110_100x_xxxx",
    Mov2sPxToM    = "1110_0110_101x_xxxx",
    Mov2MToPx     = "1110_0110_110x_xxxx",
    Mov2AxhM      = "1110_0110_111x_xxxx",
    Mov2AxMij     = "1110_0111_0xxx_xxxx",
    Mov2AxMji     = "1110_0111_1xxx_xxxx",
    MovImm8sRnOld = "1110_1xxx_xxxx_xxxx",

    MovsMemImm8Ab = "1111_00xx_xxxx_xxxx",
    Movsi         = "1111_01xx_xxxx_xxxx",
    MovrArRnAbh   = "1111_1000_00xx_xxxx",
    MovrRnAx      = "1111_1000_01xx_xxxx",
    MovrRegAx     = "1111_1000_10xx_xxxx",
    MovrBxAx      = "1111_1000_1100_00xx",
    MovrR6Ax      = "1111_1000_1101_000x",
    ExpBx         = "1111_1001_0000_000x",
    ExpBxAx       = "1111_1001_0001_00xx",
    ExpRn         = "1111_1001_001x_xxxx",
    ExpRnAx       = "1111_1001_01xx_xxxx",
    ExpReg        = "1111_1001_100x_xxxx",
    ExpRegAx      = "1111_1001_11xx_xxxx",
    Lim           = "1111_1010_0000_00xx",
    MacX1to0      = "1111_1010_0000_010x",
    Mac1          = "1111_1010_10xx_xxxx",
    MaxGe         = "1111_1011_0000_0xxx",
    MaxGt         = "1111_1011_0001_0xxx",
    MinLe         = "1111_1011_0010_0xxx",
    MinLt         = "1111_1011_0011_0xxx",
    MaxGeR0       = "1111_1011_0100_0xxx",
    MaxGtR0       = "1111_1011_0101_0xxx",
    MinLeR0       = "1111_1011_0110_0xxx",
    MinLtR0       = "1111_1011_0111_0xxx",
    Max2VtrAx     = "1111_1011_1000_000x",
    Min2VtrAx     = "1111_1011_1000_001x",
    Max2VtrAxBx   = "1111_1011_1001_00xx",
    Min2VtrAxBx   = "1111_1011_1001_01xx",
    MinMax2Mov    = "1111_110x_xxxx_xxxx",
    MinMax2Mov2   = "1111_111x_xxxx_xxxx",
}

impl Opcode {
    /// Whether the instruction consumes a second program word.
    pub fn needs_expansion(self) -> bool {
        use Opcode::*;

        matches!(
            self,
            PushImm16
                | AluMemImm16
                | AluMemR7Imm16
                | AluImm16
                | AlbMemImm8
                | AlbRn
                | AlbReg
                | AlbR6
                | AlbSttMod
                | TstbMemImm8
                | TstbSttMod
                | Br
                | Call
                | BkrepImm8
                | BkrepReg
                | BkrepR6
                | MovImm16Reg
                | MovImm16Bx
                | MovImm16ArArp
                | MovImm16SttMod
                | MovR6Imm16
                | MovRepcImm16
                | MovStepi0Imm16
                | MovStepj0Imm16
                | MovAxlMemImm16
                | MovAxlMemR7Imm16
                | MovMemImm16Ax
                | MovMemR7Imm16Ax
                | MovRepcToR7Imm16
                | MovRepcR7Imm16
                | MovSysRegToR7
                | MovR7ToSysReg
                | MmaSwap
                | MmaArp
                | MmaMxXy
                | MmaXyMx
                | MmaMyMy
                | MmaMovAxh
                | MmaMovArRn
        )
    }
}

#[cfg(test)]
mod test {
    use super::Opcode;
    use strum::VariantArray;

    #[test]
    fn unique_opcodes() {
        for value in 0..=u16::MAX {
            let mut hit = None;
            for opcode in Opcode::VARIANTS {
                if opcode.info().is_some_and(|i| i.matches(value)) {
                    if let Some(hit) = hit {
                        panic!("opcodes {hit:?} and {opcode:?} are valid for {value:016b}");
                    }

                    hit = Some(*opcode);
                }
            }
        }
    }

    #[test]
    fn find_match_agrees_with_info() {
        for value in 0..=u16::MAX {
            let found = Opcode::find_match(value);
            if let Some(info) = found.info() {
                assert!(info.matches(value));
            }
        }
    }
}
