use bitflags::bitflags;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VertexFormat {
    // 32-bit float
    Float32,
    Float32x2,
    Float32x3,
    Float32x4,

    // 16-bit float
    Float16x2,
    Float16x4,

    // 32-bit integer
    Uint32,
    Uint32x2,
    Uint32x3,
    Uint32x4,
    Sint32,
    Sint32x2,
    Sint32x3,
    Sint32x4,

    // 16-bit integer
    Unorm16x2,
    Unorm16x4,
    Snorm16x2,
    Snorm16x4,
    Uint16x2,
    Uint16x4,
    Sint16x2,
    Sint16x4,

    // 8-bit integer
    Unorm8x4,
    Snorm8x4,
    Uint8x4,
    Sint8x4,
}

/// How the bits of each component of a [`VertexFormat`] are interpreted by the shader.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NumericType {
    Float,
    Uint,
    Sint,
    /// Unsigned integer mapped to `[0, 1]`.
    Unorm,
    /// Signed integer mapped to `[-1, 1]`.
    Snorm,
}

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VertexInputRate {
    /// Data advances once per vertex.
    Vertex,
    /// Data advances once every `step_rate` instances.
    Instance { step_rate: u32 },
}

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FeatureLevel {
    Level9_1,
    Level9_2,
    Level9_3,
    Level10_0,
    Level10_1,
    Level11_0,
    Level11_1,
}

bitflags! {
    /// Optional capabilities a device may expose on top of its feature level.
    #[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
    #[serde(transparent)]
    pub struct DeviceFeatures: u32 {
        /// Rasterizer states may force a sample count independent of the render target.
        const FORCED_SAMPLE_COUNT = 0b001;
        /// Input elements may be stepped per instance.
        const INSTANCING          = 0b010;
        /// Blend states may describe each render target separately.
        const INDEPENDENT_BLEND   = 0b100;
    }
}

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FillMode {
    Solid,
    Wireframe,
}

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CullMode {
    None,
    Front,
    Back,
}

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FrontFace {
    CounterClockwise,
    Clockwise,
}

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CompareOp {
    Never,
    Less,
    Equal,
    LessOrEqual,
    Greater,
    NotEqual,
    GreaterOrEqual,
    Always,
}

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StencilOp {
    Keep,
    Zero,
    Replace,
    IncrementAndClamp,
    DecrementAndClamp,
    Invert,
    IncrementAndWrap,
    DecrementAndWrap,
}

bitflags! {
    #[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
    #[serde(transparent)]
    pub struct ColorComponents: u32 {
        const R = 0b0001;
        const G = 0b0010;
        const B = 0b0100;
        const A = 0b1000;
        const ALL = 0b1111;
    }
}

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlendFactor {
    Zero,
    One,
    SrcColor,
    OneMinusSrcColor,
    DstColor,
    OneMinusDstColor,
    SrcAlpha,
    OneMinusSrcAlpha,
    DstAlpha,
    OneMinusDstAlpha,
    SrcAlphaSaturate,
    BlendFactor,
    OneMinusBlendFactor,
}

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlendOp {
    Add,
    Subtract,
    ReverseSubtract,
    Min,
    Max,
}

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Filter {
    Nearest,
    Linear,
}

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SamplerAddressMode {
    Repeat,
    MirroredRepeat,
    ClampToEdge,
    ClampToBorder,
    MirrorOnce,
}

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BorderColor {
    TransparentBlack,
    OpaqueBlack,
    OpaqueWhite,
}

impl VertexFormat {
    /// Size in bytes of one element of this format.
    #[inline(always)]
    pub const fn size(&self) -> u32 {
        self.component_count() * self.component_width()
    }

    #[inline(always)]
    pub const fn component_count(&self) -> u32 {
        match self {
            VertexFormat::Float32 | VertexFormat::Uint32 | VertexFormat::Sint32 => 1,
            VertexFormat::Float32x2
            | VertexFormat::Float16x2
            | VertexFormat::Uint32x2
            | VertexFormat::Sint32x2
            | VertexFormat::Unorm16x2
            | VertexFormat::Snorm16x2
            | VertexFormat::Uint16x2
            | VertexFormat::Sint16x2 => 2,
            VertexFormat::Float32x3 | VertexFormat::Uint32x3 | VertexFormat::Sint32x3 => 3,
            VertexFormat::Float32x4
            | VertexFormat::Float16x4
            | VertexFormat::Uint32x4
            | VertexFormat::Sint32x4
            | VertexFormat::Unorm16x4
            | VertexFormat::Snorm16x4
            | VertexFormat::Uint16x4
            | VertexFormat::Sint16x4
            | VertexFormat::Unorm8x4
            | VertexFormat::Snorm8x4
            | VertexFormat::Uint8x4
            | VertexFormat::Sint8x4 => 4,
        }
    }

    /// Size in bytes of a single component.
    #[inline(always)]
    pub const fn component_width(&self) -> u32 {
        match self {
            VertexFormat::Float32
            | VertexFormat::Float32x2
            | VertexFormat::Float32x3
            | VertexFormat::Float32x4
            | VertexFormat::Uint32
            | VertexFormat::Uint32x2
            | VertexFormat::Uint32x3
            | VertexFormat::Uint32x4
            | VertexFormat::Sint32
            | VertexFormat::Sint32x2
            | VertexFormat::Sint32x3
            | VertexFormat::Sint32x4 => 4,
            VertexFormat::Float16x2
            | VertexFormat::Float16x4
            | VertexFormat::Unorm16x2
            | VertexFormat::Unorm16x4
            | VertexFormat::Snorm16x2
            | VertexFormat::Snorm16x4
            | VertexFormat::Uint16x2
            | VertexFormat::Uint16x4
            | VertexFormat::Sint16x2
            | VertexFormat::Sint16x4 => 2,
            VertexFormat::Unorm8x4
            | VertexFormat::Snorm8x4
            | VertexFormat::Uint8x4
            | VertexFormat::Sint8x4 => 1,
        }
    }

    #[inline(always)]
    pub const fn numeric_type(&self) -> NumericType {
        match self {
            VertexFormat::Float32
            | VertexFormat::Float32x2
            | VertexFormat::Float32x3
            | VertexFormat::Float32x4
            | VertexFormat::Float16x2
            | VertexFormat::Float16x4 => NumericType::Float,
            VertexFormat::Uint32
            | VertexFormat::Uint32x2
            | VertexFormat::Uint32x3
            | VertexFormat::Uint32x4
            | VertexFormat::Uint16x2
            | VertexFormat::Uint16x4
            | VertexFormat::Uint8x4 => NumericType::Uint,
            VertexFormat::Sint32
            | VertexFormat::Sint32x2
            | VertexFormat::Sint32x3
            | VertexFormat::Sint32x4
            | VertexFormat::Sint16x2
            | VertexFormat::Sint16x4
            | VertexFormat::Sint8x4 => NumericType::Sint,
            VertexFormat::Unorm16x2 | VertexFormat::Unorm16x4 | VertexFormat::Unorm8x4 => {
                NumericType::Unorm
            }
            VertexFormat::Snorm16x2 | VertexFormat::Snorm16x4 | VertexFormat::Snorm8x4 => {
                NumericType::Snorm
            }
        }
    }

    /// Lowest feature level able to read this format from a vertex buffer.
    pub const fn min_feature_level(&self) -> FeatureLevel {
        match self {
            VertexFormat::Float32
            | VertexFormat::Float32x2
            | VertexFormat::Float32x3
            | VertexFormat::Float32x4
            | VertexFormat::Unorm8x4
            | VertexFormat::Uint8x4
            | VertexFormat::Snorm16x2
            | VertexFormat::Snorm16x4
            | VertexFormat::Sint16x2
            | VertexFormat::Sint16x4 => FeatureLevel::Level9_1,
            VertexFormat::Float16x2 | VertexFormat::Float16x4 => FeatureLevel::Level9_3,
            _ => FeatureLevel::Level10_0,
        }
    }
}

impl FeatureLevel {
    /// Capabilities every device of this feature level is guaranteed to expose.
    pub fn default_features(&self) -> DeviceFeatures {
        match self {
            FeatureLevel::Level9_1 | FeatureLevel::Level9_2 => DeviceFeatures::empty(),
            FeatureLevel::Level9_3 => DeviceFeatures::INSTANCING,
            FeatureLevel::Level10_0 | FeatureLevel::Level10_1 | FeatureLevel::Level11_0 => {
                DeviceFeatures::INSTANCING | DeviceFeatures::INDEPENDENT_BLEND
            }
            FeatureLevel::Level11_1 => DeviceFeatures::all(),
        }
    }
}

impl BlendFactor {
    /// Color factors may not be used to blend the alpha channel.
    #[inline(always)]
    pub fn is_color_factor(&self) -> bool {
        matches!(
            *self,
            BlendFactor::SrcColor
                | BlendFactor::OneMinusSrcColor
                | BlendFactor::DstColor
                | BlendFactor::OneMinusDstColor
        )
    }
}
