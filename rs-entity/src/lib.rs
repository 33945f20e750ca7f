//! Entity models and the decoder for their opcode streams.

pub mod decoder;
pub mod face;
pub mod model;
pub mod opcode;

pub use decoder::{ModelOpcodeDecoder, decode};
pub use face::{DecodeContext, DetailFlags, FaceGroup, FaceMask, Rotation};
pub use model::{
    EntityModel, MODEL_PROPERTIES, ModelTable, PAINTING, model_stream, parse_model_record,
};
pub use opcode::{Arity, OPCODES, Opcode, OpcodeInfo};

#[cfg(test)]
mod tests;
