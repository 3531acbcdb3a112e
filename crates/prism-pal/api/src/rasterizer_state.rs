use std::sync::Arc;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::{
    context::Context,
    result::{DeviceCreationError, ResultCode, StateObjectKind},
    types::*,
    Backend,
};

/// Sample counts a rasterizer may be forced to. `0` disables forcing.
pub const FORCED_SAMPLE_COUNTS: [u32; 6] = [0, 1, 2, 4, 8, 16];

/// Describes how primitives are turned into fragments.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
pub struct RasterizerDescription {
    pub fill_mode: FillMode,
    /// Culling rule for primitives.
    pub cull_mode: CullMode,
    /// Which winding represents the front face of a primitive.
    pub front_face: FrontFace,
    /// Constant depth value added to each fragment.
    pub depth_bias: i32,
    /// Maximum depth bias of a fragment.
    pub depth_bias_clamp: OrderedFloat<f32>,
    /// Scalar on a fragment's slope.
    pub slope_scaled_depth_bias: OrderedFloat<f32>,
    /// Clip primitives against the near and far planes.
    pub depth_clip: bool,
    /// Discard fragments outside the bound scissor rectangle.
    pub scissor: bool,
    /// Use quadrilateral line anti-aliasing on multisample targets.
    pub multisample: bool,
    /// Alpha line anti-aliasing. Only used when drawing lines with `multisample` off.
    pub antialiased_lines: bool,
    /// Sample count forced during UAV-only rendering. Requires
    /// [`FORCED_SAMPLE_COUNT`](DeviceFeatures::FORCED_SAMPLE_COUNT) when non-zero.
    pub forced_sample_count: u32,
}

#[derive(Debug, Clone)]
pub struct RasterizerStateCreateInfo {
    pub description: RasterizerDescription,
    /// The backend *should* use the provided debug name for easy identification.
    pub debug_name: Option<String>,
}

pub struct RasterizerState<B: Backend>(pub(crate) Arc<RasterizerStateInner<B>>);

pub(crate) struct RasterizerStateInner<B: Backend> {
    ctx: Context<B>,
    description: RasterizerDescription,
    pub(crate) id: B::RasterizerState,
}

impl<B: Backend> RasterizerState<B> {
    /// Creates a new rasterizer state.
    ///
    /// # Arguments
    /// - `ctx` - The [`Context`] to create the state with.
    /// - `create_info` - Describes the state to create. It is handed to the backend unchanged.
    ///
    /// # Errors
    /// Fails with [`ResultCode::UNSUPPORTED`] if the description forces a sample count but the
    /// device lacks [`DeviceFeatures::FORCED_SAMPLE_COUNT`]. Any other failure is the one
    /// reported by the backend.
    pub fn new(
        ctx: Context<B>,
        create_info: RasterizerStateCreateInfo,
    ) -> Result<Self, DeviceCreationError> {
        let description = create_info.description;
        if description.requires_forced_sample_count()
            && !ctx.properties().supports(DeviceFeatures::FORCED_SAMPLE_COUNT)
        {
            prism_log::warn!(
                "rasterizer state {:?} forces {} samples but the device does not support it",
                create_info.debug_name,
                description.forced_sample_count
            );
            ResultCode::UNSUPPORTED.check(StateObjectKind::Rasterizer)?;
        }

        let id = unsafe { ctx.0.create_rasterizer_state(&create_info)? };
        Ok(Self(Arc::new(RasterizerStateInner {
            ctx,
            description,
            id,
        })))
    }

    #[inline(always)]
    pub fn description(&self) -> &RasterizerDescription {
        &self.0.description
    }

    #[inline(always)]
    pub fn internal(&self) -> &B::RasterizerState {
        &self.0.id
    }
}

impl<B: Backend> Clone for RasterizerState<B> {
    #[inline(always)]
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<B: Backend> Drop for RasterizerStateInner<B> {
    fn drop(&mut self) {
        unsafe {
            self.ctx.0.destroy_rasterizer_state(&mut self.id);
        }
    }
}

impl RasterizerDescription {
    /// Solid fill, back face culling, depth clipping on.
    pub const CULL_BACK: Self = Self {
        fill_mode: FillMode::Solid,
        cull_mode: CullMode::Back,
        front_face: FrontFace::Clockwise,
        depth_bias: 0,
        depth_bias_clamp: OrderedFloat(0.0),
        slope_scaled_depth_bias: OrderedFloat(0.0),
        depth_clip: true,
        scissor: false,
        multisample: false,
        antialiased_lines: false,
        forced_sample_count: 0,
    };

    /// Solid fill without culling.
    pub const CULL_NONE: Self = Self {
        cull_mode: CullMode::None,
        ..Self::CULL_BACK
    };

    /// Solid fill, front face culling.
    pub const CULL_FRONT: Self = Self {
        cull_mode: CullMode::Front,
        ..Self::CULL_BACK
    };

    /// Wireframe without culling.
    pub const WIREFRAME: Self = Self {
        fill_mode: FillMode::Wireframe,
        cull_mode: CullMode::None,
        ..Self::CULL_BACK
    };

    #[inline(always)]
    pub fn requires_forced_sample_count(&self) -> bool {
        self.forced_sample_count != 0
    }

    /// Checks the description against the rules the native runtime enforces.
    pub fn validate(&self) -> Result<(), ResultCode> {
        if !self.depth_bias_clamp.0.is_finite() || !self.slope_scaled_depth_bias.0.is_finite() {
            return Err(ResultCode::INVALID_ARG);
        }

        if !FORCED_SAMPLE_COUNTS.contains(&self.forced_sample_count) {
            return Err(ResultCode::INVALID_ARG);
        }

        if self.requires_forced_sample_count() && self.multisample {
            return Err(ResultCode::INVALID_ARG);
        }

        Ok(())
    }
}

impl Default for RasterizerDescription {
    #[inline(always)]
    fn default() -> Self {
        Self::CULL_BACK
    }
}
