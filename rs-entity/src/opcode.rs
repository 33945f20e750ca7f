use std::fmt;

/// Tokens of the model opcode stream, with the numeric values the tables use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    Faces = 1,
    TexCubemap = 2,
    TexDetail = 3,
    TexInherit = 4,
    Size = 5,
    Tr = 6,
    Rot = 7,
    RotCas = 8,
    Ref = 9,
    Rot90 = 10,
    Tex = 11,
    Invert = 12,
    IncFaceId = 13,
    Name = 14,
    DualSide = 15,
}

/// Number of operands following a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Fixed(usize),
    /// Four texture indices per face selected by the run's mask.
    PerFace(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeInfo {
    pub opcode: Opcode,
    pub name: &'static str,
    pub arity: Arity,
    /// Whether entity models may use the token. Block-only tokens are not.
    pub supported: bool,
}

const fn info(opcode: Opcode, name: &'static str, arity: Arity, supported: bool) -> OpcodeInfo {
    OpcodeInfo {
        opcode,
        name,
        arity,
        supported,
    }
}

/// Indexed by `opcode as usize - 1`.
pub static OPCODES: [OpcodeInfo; 15] = [
    info(Opcode::Faces, "FACES", Arity::Fixed(1), true),
    info(Opcode::TexCubemap, "TEX_CUBEMAP", Arity::Fixed(0), false),
    info(Opcode::TexDetail, "TEX_DETAIL", Arity::Fixed(0), true),
    info(Opcode::TexInherit, "TEX_INHERIT", Arity::Fixed(0), false),
    info(Opcode::Size, "SIZE", Arity::Fixed(3), true),
    info(Opcode::Tr, "TR", Arity::Fixed(3), true),
    info(Opcode::Rot, "ROT", Arity::Fixed(3), true),
    info(Opcode::RotCas, "ROTCAS", Arity::Fixed(3), true),
    info(Opcode::Ref, "REF", Arity::Fixed(3), true),
    info(Opcode::Rot90, "ROT90", Arity::Fixed(1), true),
    info(Opcode::Tex, "TEX", Arity::PerFace(4), true),
    info(Opcode::Invert, "INVERT", Arity::Fixed(0), true),
    info(Opcode::IncFaceId, "INC_FACEID", Arity::Fixed(0), true),
    info(Opcode::Name, "NAME", Arity::Fixed(1), false),
    info(Opcode::DualSide, "DUALSIDE", Arity::Fixed(0), true),
];

impl Opcode {
    pub fn info(self) -> &'static OpcodeInfo {
        &OPCODES[self as usize - 1]
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn value(self) -> f32 {
        f32::from(self as u8)
    }

    /// Token for a stream value; only exact integers name a token.
    pub fn from_value(value: f32) -> Option<Self> {
        if value.fract() != 0.0 || !(1.0..=OPCODES.len() as f32).contains(&value) {
            return None;
        }
        Some(OPCODES[value as usize - 1].opcode)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        OPCODES.iter().find(|i| i.name == name).map(|i| i.opcode)
    }

    /// Operand count of the token, given the face count of the current run.
    pub fn operand_count(self, faces: usize) -> usize {
        match self.info().arity {
            Arity::Fixed(n) => n,
            Arity::PerFace(n) => n * faces,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
