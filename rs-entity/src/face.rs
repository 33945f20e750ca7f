use bevy_math::Vec3;

bitflags::bitflags! {
    /// Cuboid faces drawn by a face group.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FaceMask: u8 {
        const SOUTH = 1 << 0;
        const EAST = 1 << 1;
        const NORTH = 1 << 2;
        const WEST = 1 << 3;
        const TOP = 1 << 4;
        const BOTTOM = 1 << 5;
    }
}

impl FaceMask {
    pub fn face_count(self) -> usize {
        self.bits().count_ones() as usize
    }

    /// Texture indices a `TEX` block must supply for this mask.
    pub fn texture_index_count(self) -> usize {
        4 * self.face_count()
    }
}

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DetailFlags: u8 {
        /// Texture indices address detail cells instead of whole tiles.
        const TEX_DETAIL = 1 << 0;
        /// Faces point inward.
        const INVERT = 1 << 1;
        const DUAL_SIDE = 1 << 2;
        /// Starts a new face id for the faces of this group.
        const INC_FACE_ID = 1 << 3;
    }
}

/// Euler angles in degrees plus a quarter turn count around the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rotation {
    pub angles: Vec3,
    pub quarter_turns: u8,
}

impl Rotation {
    pub const IDENTITY: Rotation = Rotation {
        angles: Vec3::ZERO,
        quarter_turns: 0,
    };

    pub fn is_identity(&self) -> bool {
        self.angles == Vec3::ZERO && self.quarter_turns == 0
    }
}

/// One decoded opcode run: a cuboid, its transform and its face textures.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceGroup {
    /// Token offset of the run's `FACES` token.
    pub offset: usize,
    pub faces: FaceMask,
    pub detail: DetailFlags,
    pub size: Vec3,
    pub translation: Vec3,
    pub rotation: Rotation,
    /// Rotation center set by `REF`; the cuboid center otherwise.
    pub pivot: Option<Vec3>,
    /// `ROTCAS` angles, applied to this group and the ones after it.
    pub cascade: Option<Vec3>,
    pub texture_indices: Vec<u32>,
}

impl FaceGroup {
    pub(crate) fn new(offset: usize, faces: FaceMask, context: &DecodeContext) -> Self {
        Self {
            offset,
            faces,
            detail: context.detail,
            size: context.size,
            translation: context.translation,
            rotation: context.rotation,
            pivot: None,
            cascade: None,
            texture_indices: Vec::new(),
        }
    }

    pub fn face_count(&self) -> usize {
        self.faces.face_count()
    }

    /// Two triangles per drawn face.
    pub fn vertex_count(&self) -> usize {
        6 * self.face_count()
    }

    /// Each drawn face with its four texture indices, in mask bit order.
    pub fn face_textures(&self) -> impl Iterator<Item = (FaceMask, &[u32])> {
        self.faces.iter().zip(self.texture_indices.chunks_exact(4))
    }
}

/// Values every run starts from before its modifiers apply.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DecodeContext {
    pub size: Vec3,
    pub translation: Vec3,
    pub rotation: Rotation,
    pub detail: DetailFlags,
}
