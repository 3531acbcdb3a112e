pub use api;

#[cfg(feature = "null")]
pub type Backend = null::NullBackend;

#[cfg(feature = "null")]
pub mod backend {
    pub use null::{NullBackend, NullBackendCreateInfo, NullHandle};
}

pub mod prelude {
    pub use api::types::*;

    // Errors
    pub use api::result::{DeviceCreationError, ResultCode, StateObjectKind};

    // Context
    #[cfg(feature = "null")]
    pub type Context = api::context::Context<crate::Backend>;
    pub use api::context::{GraphicsProperties, Limits};

    // Rasterizer state
    #[cfg(feature = "null")]
    pub type RasterizerState = api::rasterizer_state::RasterizerState<crate::Backend>;
    pub use api::rasterizer_state::{RasterizerDescription, RasterizerStateCreateInfo};

    // Blend state
    #[cfg(feature = "null")]
    pub type BlendState = api::blend_state::BlendState<crate::Backend>;
    pub use api::blend_state::{BlendDescription, BlendStateCreateInfo, RenderTargetBlend};

    // Depth/stencil state
    #[cfg(feature = "null")]
    pub type DepthStencilState = api::depth_stencil_state::DepthStencilState<crate::Backend>;
    pub use api::depth_stencil_state::{
        DepthStencilDescription, DepthStencilStateCreateInfo, StencilFaceDescription,
    };

    // Sampler state
    #[cfg(feature = "null")]
    pub type SamplerState = api::sampler_state::SamplerState<crate::Backend>;
    pub use api::sampler_state::{SamplerDescription, SamplerStateCreateInfo};

    // Input layout
    #[cfg(feature = "null")]
    pub type InputLayout = api::input_layout::InputLayout<crate::Backend>;
    pub use api::input_layout::{
        validate_input_elements, InputElement, InputLayoutCreateInfo, InvalidLayoutError,
        MAX_VERTEX_STRIDE,
    };
}
