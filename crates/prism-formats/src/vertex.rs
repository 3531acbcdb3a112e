use std::{
    any::TypeId,
    fmt,
    hash::{Hash, Hasher},
};

use bytemuck::{Pod, Zeroable};
use ordered_float::OrderedFloat;
use prism_math::{Vec2, Vec3};
use prism_pal::prelude::{InputElement, VertexFormat};
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use static_assertions::const_assert_eq;

use crate::{color::Color, declaration::VertexDeclaration, registry::VertexDeclarationRegistry};

/// A fixed-layout vertex whose bytes are read directly by the input assembler.
///
/// Implementors are `#[repr(C)]` and list their fields in [`input_elements`] in declaration
/// order. Equality is field by field and `a == b` must imply equal hashes.
///
/// [`input_elements`]: VertexType::input_elements
pub trait VertexType: Pod + PartialEq + Hash + Send + Sync + 'static {
    /// Unique name used for runtime lookups.
    const NAME: &'static str;

    /// Builds the input elements of this vertex. Only called once per registry.
    fn input_elements() -> Vec<InputElement>;

    /// The declaration of this vertex, registering it with the global registry if needed.
    #[inline]
    fn declaration() -> VertexDeclaration {
        VertexDeclarationRegistry::global().get_or_register::<Self>()
    }
}

/// Runtime tag of a [`VertexType`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct VertexTypeId {
    id: TypeId,
    name: &'static str,
}

impl VertexTypeId {
    #[inline(always)]
    pub fn of<V: VertexType>() -> Self {
        Self {
            id: TypeId::of::<V>(),
            name: V::NAME,
        }
    }

    #[inline(always)]
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    #[inline(always)]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Hashes a vertex with a fixed hasher. Stable for the lifetime of the process.
#[inline]
pub fn vertex_hash<V: Hash + ?Sized>(vertex: &V) -> u64 {
    let mut hasher = FxHasher::default();
    vertex.hash(&mut hasher);
    hasher.finish()
}

/// Feeds floats to a hasher so that values comparing equal (`0.0` and `-0.0`) hash alike.
#[inline(always)]
fn hash_floats<H: Hasher>(values: &[f32], state: &mut H) {
    for value in values {
        OrderedFloat(*value).hash(state);
    }
}

/// Position and packed color.
#[repr(C)]
#[derive(Debug, Default, Copy, Clone, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct VertexPositionColor {
    pub position: Vec3,
    pub color: Color,
}

/// Position and texture coordinates.
#[repr(C)]
#[derive(Debug, Default, Copy, Clone, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct VertexPositionTexture {
    /// XYZ position.
    pub position: Vec3,
    /// UV texture coordinates.
    pub texture_coordinate: Vec2,
}

/// Position, packed color and texture coordinates.
#[repr(C)]
#[derive(Debug, Default, Copy, Clone, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct VertexPositionColorTexture {
    pub position: Vec3,
    pub color: Color,
    pub texture_coordinate: Vec2,
}

/// Position, normal and texture coordinates.
#[repr(C)]
#[derive(Debug, Default, Copy, Clone, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct VertexPositionNormalTexture {
    pub position: Vec3,
    pub normal: Vec3,
    pub texture_coordinate: Vec2,
}

const_assert_eq!(std::mem::size_of::<VertexPositionColor>(), 16);
const_assert_eq!(std::mem::size_of::<VertexPositionTexture>(), 20);
const_assert_eq!(std::mem::size_of::<VertexPositionColorTexture>(), 24);
const_assert_eq!(std::mem::size_of::<VertexPositionNormalTexture>(), 32);

impl VertexPositionColor {
    #[inline(always)]
    pub const fn new(position: Vec3, color: Color) -> Self {
        Self { position, color }
    }
}

impl VertexPositionTexture {
    #[inline(always)]
    pub const fn new(position: Vec3, texture_coordinate: Vec2) -> Self {
        Self {
            position,
            texture_coordinate,
        }
    }
}

impl VertexPositionColorTexture {
    #[inline(always)]
    pub const fn new(position: Vec3, color: Color, texture_coordinate: Vec2) -> Self {
        Self {
            position,
            color,
            texture_coordinate,
        }
    }
}

impl VertexPositionNormalTexture {
    #[inline(always)]
    pub const fn new(position: Vec3, normal: Vec3, texture_coordinate: Vec2) -> Self {
        Self {
            position,
            normal,
            texture_coordinate,
        }
    }
}

impl VertexType for VertexPositionColor {
    const NAME: &'static str = "VertexPositionColor";

    fn input_elements() -> Vec<InputElement> {
        vec![
            InputElement::new("POSITION", 0, VertexFormat::Float32x3, 0),
            InputElement::new("COLOR", 0, VertexFormat::Unorm8x4, 0),
        ]
    }
}

impl VertexType for VertexPositionTexture {
    const NAME: &'static str = "VertexPositionTexture";

    fn input_elements() -> Vec<InputElement> {
        vec![
            InputElement::new("POSITION", 0, VertexFormat::Float32x3, 0),
            InputElement::new("TEXCOORD", 0, VertexFormat::Float32x2, 0),
        ]
    }
}

impl VertexType for VertexPositionColorTexture {
    const NAME: &'static str = "VertexPositionColorTexture";

    fn input_elements() -> Vec<InputElement> {
        vec![
            InputElement::new("POSITION", 0, VertexFormat::Float32x3, 0),
            InputElement::new("COLOR", 0, VertexFormat::Unorm8x4, 0),
            InputElement::new("TEXCOORD", 0, VertexFormat::Float32x2, 0),
        ]
    }
}

impl VertexType for VertexPositionNormalTexture {
    const NAME: &'static str = "VertexPositionNormalTexture";

    fn input_elements() -> Vec<InputElement> {
        vec![
            InputElement::new("POSITION", 0, VertexFormat::Float32x3, 0),
            InputElement::new("NORMAL", 0, VertexFormat::Float32x3, 0),
            InputElement::new("TEXCOORD", 0, VertexFormat::Float32x2, 0),
        ]
    }
}

impl Hash for VertexPositionColor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_floats(&self.position.to_array(), state);
        self.color.hash(state);
    }
}

impl Hash for VertexPositionTexture {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_floats(&self.position.to_array(), state);
        hash_floats(&self.texture_coordinate.to_array(), state);
    }
}

impl Hash for VertexPositionColorTexture {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_floats(&self.position.to_array(), state);
        self.color.hash(state);
        hash_floats(&self.texture_coordinate.to_array(), state);
    }
}

impl Hash for VertexPositionNormalTexture {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_floats(&self.position.to_array(), state);
        hash_floats(&self.normal.to_array(), state);
        hash_floats(&self.texture_coordinate.to_array(), state);
    }
}

impl fmt::Display for VertexPositionColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position: {}, Color: {}", self.position, self.color)
    }
}

impl fmt::Display for VertexPositionTexture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Position: {}, Texcoord: {}",
            self.position, self.texture_coordinate
        )
    }
}

impl fmt::Display for VertexPositionColorTexture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Position: {}, Color: {}, Texcoord: {}",
            self.position, self.color, self.texture_coordinate
        )
    }
}

impl fmt::Display for VertexPositionNormalTexture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Position: {}, Normal: {}, Texcoord: {}",
            self.position, self.normal, self.texture_coordinate
        )
    }
}
