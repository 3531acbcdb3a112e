//! Pal is a thin layer over a native graphics device. It only covers the creation of immutable
//! state objects and input layouts: every constructor hands its description to the
//! [`Backend`] untouched and wraps the handle it gets back.
//!
//! To start using Pal, you must first choose a [`Backend`] and then create a
//! [`Context`](struct@context::Context).

pub mod blend_state;
pub mod context;
pub mod depth_stencil_state;
pub mod input_layout;
pub mod rasterizer_state;
pub mod result;
pub mod sampler_state;
pub mod types;

use blend_state::BlendStateCreateInfo;
use context::GraphicsProperties;
use depth_stencil_state::DepthStencilStateCreateInfo;
use input_layout::{InputLayoutCreateInfo, InvalidLayoutError};
use rasterizer_state::RasterizerStateCreateInfo;
use result::DeviceCreationError;
use sampler_state::SamplerStateCreateInfo;

/// Entry points of a native device.
///
/// Backends *must* treat every create info as read-only and report failures with the device's
/// own result code. Handles returned by a `create_*` function are destroyed exactly once with the
/// matching `destroy_*` function.
#[allow(clippy::missing_safety_doc)]
pub trait Backend: Sized + 'static {
    type RasterizerState;
    type BlendState;
    type DepthStencilState;
    type SamplerState;
    type InputLayout;

    unsafe fn properties(&self) -> &GraphicsProperties;

    unsafe fn create_rasterizer_state(
        &self,
        create_info: &RasterizerStateCreateInfo,
    ) -> Result<Self::RasterizerState, DeviceCreationError>;
    unsafe fn create_blend_state(
        &self,
        create_info: &BlendStateCreateInfo,
    ) -> Result<Self::BlendState, DeviceCreationError>;
    unsafe fn create_depth_stencil_state(
        &self,
        create_info: &DepthStencilStateCreateInfo,
    ) -> Result<Self::DepthStencilState, DeviceCreationError>;
    unsafe fn create_sampler_state(
        &self,
        create_info: &SamplerStateCreateInfo,
    ) -> Result<Self::SamplerState, DeviceCreationError>;
    unsafe fn create_input_layout(
        &self,
        create_info: &InputLayoutCreateInfo<'_>,
    ) -> Result<Self::InputLayout, InvalidLayoutError>;

    unsafe fn destroy_rasterizer_state(&self, id: &mut Self::RasterizerState);
    unsafe fn destroy_blend_state(&self, id: &mut Self::BlendState);
    unsafe fn destroy_depth_stencil_state(&self, id: &mut Self::DepthStencilState);
    unsafe fn destroy_sampler_state(&self, id: &mut Self::SamplerState);
    unsafe fn destroy_input_layout(&self, id: &mut Self::InputLayout);
}
