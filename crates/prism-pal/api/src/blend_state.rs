use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    context::Context,
    result::{DeviceCreationError, ResultCode},
    types::*,
    Backend,
};

/// Number of render targets a blend state describes.
pub const MAX_RENDER_TARGETS: usize = 8;

/// Describes blending operations for a single render target.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenderTargetBlend {
    /// Should blending be performed.
    pub blend: bool,
    pub src_color_blend_factor: BlendFactor,
    pub dst_color_blend_factor: BlendFactor,
    pub color_blend_op: BlendOp,
    pub src_alpha_blend_factor: BlendFactor,
    pub dst_alpha_blend_factor: BlendFactor,
    pub alpha_blend_op: BlendOp,
    /// What components should be written to the render target.
    pub write_mask: ColorComponents,
}

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlendDescription {
    pub alpha_to_coverage: bool,
    /// When `false`, only `render_targets[0]` is used and applied to every target.
    pub independent_blend: bool,
    pub render_targets: [RenderTargetBlend; MAX_RENDER_TARGETS],
}

#[derive(Debug, Clone)]
pub struct BlendStateCreateInfo {
    pub description: BlendDescription,
    /// The backend *should* use the provided debug name for easy identification.
    pub debug_name: Option<String>,
}

pub struct BlendState<B: Backend>(pub(crate) Arc<BlendStateInner<B>>);

pub(crate) struct BlendStateInner<B: Backend> {
    ctx: Context<B>,
    description: BlendDescription,
    pub(crate) id: B::BlendState,
}

impl<B: Backend> BlendState<B> {
    /// Creates a new blend state.
    ///
    /// # Arguments
    /// - `ctx` - The [`Context`] to create the state with.
    /// - `create_info` - Describes the state to create.
    #[inline(always)]
    pub fn new(
        ctx: Context<B>,
        create_info: BlendStateCreateInfo,
    ) -> Result<Self, DeviceCreationError> {
        let id = unsafe { ctx.0.create_blend_state(&create_info)? };
        Ok(Self(Arc::new(BlendStateInner {
            ctx,
            description: create_info.description,
            id,
        })))
    }

    #[inline(always)]
    pub fn description(&self) -> &BlendDescription {
        &self.0.description
    }

    #[inline(always)]
    pub fn internal(&self) -> &B::BlendState {
        &self.0.id
    }
}

impl<B: Backend> Clone for BlendState<B> {
    #[inline(always)]
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<B: Backend> Drop for BlendStateInner<B> {
    fn drop(&mut self) {
        unsafe {
            self.ctx.0.destroy_blend_state(&mut self.id);
        }
    }
}

impl RenderTargetBlend {
    pub const OPAQUE: Self = Self {
        blend: false,
        src_color_blend_factor: BlendFactor::One,
        dst_color_blend_factor: BlendFactor::Zero,
        color_blend_op: BlendOp::Add,
        src_alpha_blend_factor: BlendFactor::One,
        dst_alpha_blend_factor: BlendFactor::Zero,
        alpha_blend_op: BlendOp::Add,
        write_mask: ColorComponents::ALL,
    };

    /// Premultiplied alpha blending.
    pub const ALPHA_BLEND: Self = Self {
        blend: true,
        src_color_blend_factor: BlendFactor::One,
        dst_color_blend_factor: BlendFactor::OneMinusSrcAlpha,
        src_alpha_blend_factor: BlendFactor::One,
        dst_alpha_blend_factor: BlendFactor::OneMinusSrcAlpha,
        ..Self::OPAQUE
    };

    pub const ADDITIVE: Self = Self {
        blend: true,
        src_color_blend_factor: BlendFactor::SrcAlpha,
        dst_color_blend_factor: BlendFactor::One,
        src_alpha_blend_factor: BlendFactor::SrcAlpha,
        dst_alpha_blend_factor: BlendFactor::One,
        ..Self::OPAQUE
    };

    pub const NON_PREMULTIPLIED: Self = Self {
        blend: true,
        src_color_blend_factor: BlendFactor::SrcAlpha,
        dst_color_blend_factor: BlendFactor::OneMinusSrcAlpha,
        src_alpha_blend_factor: BlendFactor::SrcAlpha,
        dst_alpha_blend_factor: BlendFactor::OneMinusSrcAlpha,
        ..Self::OPAQUE
    };
}

impl BlendDescription {
    /// Uses `target` for every render target.
    pub const fn uniform(target: RenderTargetBlend) -> Self {
        Self {
            alpha_to_coverage: false,
            independent_blend: false,
            render_targets: [target; MAX_RENDER_TARGETS],
        }
    }

    pub const OPAQUE: Self = Self::uniform(RenderTargetBlend::OPAQUE);
    pub const ALPHA_BLEND: Self = Self::uniform(RenderTargetBlend::ALPHA_BLEND);
    pub const ADDITIVE: Self = Self::uniform(RenderTargetBlend::ADDITIVE);
    pub const NON_PREMULTIPLIED: Self = Self::uniform(RenderTargetBlend::NON_PREMULTIPLIED);

    /// The render targets the device actually reads.
    #[inline]
    pub fn active_targets(&self) -> &[RenderTargetBlend] {
        if self.independent_blend {
            &self.render_targets
        } else {
            &self.render_targets[..1]
        }
    }

    /// Checks the description against the rules the native runtime enforces.
    pub fn validate(&self, features: DeviceFeatures) -> Result<(), ResultCode> {
        if self.independent_blend && !features.contains(DeviceFeatures::INDEPENDENT_BLEND) {
            return Err(ResultCode::UNSUPPORTED);
        }

        for target in self.active_targets() {
            if target.src_alpha_blend_factor.is_color_factor()
                || target.dst_alpha_blend_factor.is_color_factor()
            {
                return Err(ResultCode::INVALID_ARG);
            }
        }

        Ok(())
    }
}

impl Default for RenderTargetBlend {
    #[inline(always)]
    fn default() -> Self {
        Self::OPAQUE
    }
}

impl Default for BlendDescription {
    #[inline(always)]
    fn default() -> Self {
        Self::OPAQUE
    }
}
