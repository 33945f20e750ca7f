use bevy_math::Vec3;
use rs_utils::DataError;
use tracing::trace;

use crate::face::{DecodeContext, DetailFlags, FaceGroup, FaceMask};
use crate::opcode::Opcode;

/// Decodes a whole opcode stream into its face groups, in run order.
pub fn decode(stream: &[f32], context: &DecodeContext) -> Result<Vec<FaceGroup>, DataError> {
    ModelOpcodeDecoder::new(stream, context).decode()
}

/// Sequential reader over one opcode stream.
///
/// A stream is a list of runs. Each run is `FACES mask`, any number of
/// modifiers, then `TEX` with four indices per drawn face. Nothing but a new
/// `FACES` may follow a `TEX` block.
pub struct ModelOpcodeDecoder<'a> {
    stream: &'a [f32],
    context: &'a DecodeContext,
    pos: usize,
}

impl<'a> ModelOpcodeDecoder<'a> {
    pub fn new(stream: &'a [f32], context: &'a DecodeContext) -> Self {
        Self {
            stream,
            context,
            pos: 0,
        }
    }

    pub fn decode(mut self) -> Result<Vec<FaceGroup>, DataError> {
        let mut groups = Vec::new();
        while self.pos < self.stream.len() {
            let group = self.decode_run(groups.is_empty())?;
            trace!(
                offset = group.offset,
                faces = group.face_count(),
                "decoded face group"
            );
            groups.push(group);
        }
        Ok(groups)
    }

    fn decode_run(&mut self, first: bool) -> Result<FaceGroup, DataError> {
        let start = self.pos;
        let token = self.stream[start];
        if token != Opcode::Faces.value() {
            let reason = if first {
                format!("stream must start with FACES, found {token}")
            } else {
                format!("expected FACES after the previous TEX block, found {token}")
            };
            return Err(DataError::malformed(start, reason));
        }
        let faces = self.read_mask()?;
        let mut group = FaceGroup::new(start, faces, self.context);

        loop {
            let at = self.pos;
            if at >= self.stream.len() {
                return Err(DataError::malformed(
                    at,
                    format!("stream ends inside the run started at token {start}, TEX is missing"),
                ));
            }
            let opcode = self.read_opcode()?;
            match opcode {
                Opcode::TexDetail => group.detail |= DetailFlags::TEX_DETAIL,
                Opcode::Invert => group.detail |= DetailFlags::INVERT,
                Opcode::DualSide => group.detail |= DetailFlags::DUAL_SIDE,
                Opcode::IncFaceId => group.detail |= DetailFlags::INC_FACE_ID,
                Opcode::Size => group.size = self.read_vec3(opcode)?,
                Opcode::Tr => group.translation = self.read_vec3(opcode)?,
                Opcode::Rot => group.rotation.angles = self.read_vec3(opcode)?,
                Opcode::RotCas => group.cascade = Some(self.read_vec3(opcode)?),
                Opcode::Ref => group.pivot = Some(self.read_vec3(opcode)?),
                Opcode::Rot90 => group.rotation.quarter_turns = self.read_quarter_turns()?,
                Opcode::Tex => {
                    group.texture_indices = self.read_texture_indices(faces)?;
                    return Ok(group);
                }
                Opcode::Faces => {
                    return Err(DataError::malformed(
                        at,
                        format!("FACES before the TEX block of the run started at token {start}"),
                    ));
                }
                Opcode::TexCubemap | Opcode::TexInherit | Opcode::Name => {
                    return Err(DataError::malformed(
                        at,
                        format!("{opcode} is not supported in entity models"),
                    ));
                }
            }
        }
    }

    fn read_opcode(&mut self) -> Result<Opcode, DataError> {
        let at = self.pos;
        let value = self.stream[at];
        let opcode = Opcode::from_value(value)
            .ok_or_else(|| DataError::malformed(at, format!("unknown token {value}")))?;
        if !opcode.info().supported {
            return Err(DataError::malformed(
                at,
                format!("{opcode} is not supported in entity models"),
            ));
        }
        self.pos += 1;
        Ok(opcode)
    }

    /// Operands of the token just read, which sits at `self.pos - 1`.
    fn operands(&mut self, opcode: Opcode, count: usize) -> Result<&'a [f32], DataError> {
        let at = self.pos - 1;
        let available = self.stream.len() - self.pos;
        if available < count {
            return Err(DataError::malformed(
                at,
                format!("{opcode} needs {count} operand(s), found {available}"),
            ));
        }
        let stream = self.stream;
        let operands = &stream[self.pos..self.pos + count];
        if let Some(i) = operands.iter().position(|v| !v.is_finite()) {
            return Err(DataError::malformed(
                self.pos + i,
                format!("{opcode} operand is not a finite number"),
            ));
        }
        self.pos += count;
        Ok(operands)
    }

    fn read_mask(&mut self) -> Result<FaceMask, DataError> {
        // FACES itself is validated by the caller.
        self.pos += 1;
        let at = self.pos;
        let value = self.operands(Opcode::Faces, 1)?[0];
        if value.fract() != 0.0 || !(0.0..=63.0).contains(&value) {
            return Err(DataError::malformed(
                at,
                format!("face mask must be an integer in [0, 63], found {value}"),
            ));
        }
        FaceMask::from_bits(value as u8)
            .ok_or_else(|| DataError::malformed(at, format!("invalid face mask {value}")))
    }

    fn read_vec3(&mut self, opcode: Opcode) -> Result<Vec3, DataError> {
        let v = self.operands(opcode, 3)?;
        Ok(Vec3::new(v[0], v[1], v[2]))
    }

    fn read_quarter_turns(&mut self) -> Result<u8, DataError> {
        let at = self.pos;
        let angle = self.operands(Opcode::Rot90, 1)?[0];
        if angle % 90.0 == 0.0 && (0.0..=270.0).contains(&angle) {
            Ok((angle / 90.0) as u8)
        } else {
            Err(DataError::InvalidRotation { offset: at, angle })
        }
    }

    fn read_texture_indices(&mut self, faces: FaceMask) -> Result<Vec<u32>, DataError> {
        let start = self.pos;
        let count = Opcode::Tex.operand_count(faces.face_count());
        let values = self.operands(Opcode::Tex, count)?;
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                if v.fract() == 0.0 && v >= 0.0 && v <= u32::MAX as f32 {
                    Ok(v as u32)
                } else {
                    Err(DataError::malformed(
                        start + i,
                        format!("texture index must be a non-negative integer, found {v}"),
                    ))
                }
            })
            .collect()
    }
}
