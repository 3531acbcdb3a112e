use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{context::Context, result::DeviceCreationError, types::*, Backend};

/// Stencil operations for one facing of a primitive.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StencilFaceDescription {
    /// Performed when the stencil test fails.
    pub fail_op: StencilOp,
    /// Performed when the stencil test passes but the depth test fails.
    pub depth_fail_op: StencilOp,
    /// Performed when both tests pass.
    pub pass_op: StencilOp,
    pub compare: CompareOp,
}

/// Describes depth and stencil testing rules.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DepthStencilDescription {
    /// Should depth testing be enabled.
    pub depth_test: bool,
    /// Should we write to the depth buffer.
    pub depth_write: bool,
    /// What comparison operation should be used to pass depth values.
    pub depth_compare: CompareOp,
    pub stencil_test: bool,
    pub stencil_read_mask: u8,
    pub stencil_write_mask: u8,
    pub front_face: StencilFaceDescription,
    pub back_face: StencilFaceDescription,
}

#[derive(Debug, Clone)]
pub struct DepthStencilStateCreateInfo {
    pub description: DepthStencilDescription,
    /// The backend *should* use the provided debug name for easy identification.
    pub debug_name: Option<String>,
}

pub struct DepthStencilState<B: Backend>(pub(crate) Arc<DepthStencilStateInner<B>>);

pub(crate) struct DepthStencilStateInner<B: Backend> {
    ctx: Context<B>,
    description: DepthStencilDescription,
    pub(crate) id: B::DepthStencilState,
}

impl<B: Backend> DepthStencilState<B> {
    /// Creates a new depth/stencil state.
    ///
    /// # Arguments
    /// - `ctx` - The [`Context`] to create the state with.
    /// - `create_info` - Describes the state to create.
    #[inline(always)]
    pub fn new(
        ctx: Context<B>,
        create_info: DepthStencilStateCreateInfo,
    ) -> Result<Self, DeviceCreationError> {
        let id = unsafe { ctx.0.create_depth_stencil_state(&create_info)? };
        Ok(Self(Arc::new(DepthStencilStateInner {
            ctx,
            description: create_info.description,
            id,
        })))
    }

    #[inline(always)]
    pub fn description(&self) -> &DepthStencilDescription {
        &self.0.description
    }

    #[inline(always)]
    pub fn internal(&self) -> &B::DepthStencilState {
        &self.0.id
    }
}

impl<B: Backend> Clone for DepthStencilState<B> {
    #[inline(always)]
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<B: Backend> Drop for DepthStencilStateInner<B> {
    fn drop(&mut self) {
        unsafe {
            self.ctx.0.destroy_depth_stencil_state(&mut self.id);
        }
    }
}

impl StencilFaceDescription {
    pub const KEEP: Self = Self {
        fail_op: StencilOp::Keep,
        depth_fail_op: StencilOp::Keep,
        pass_op: StencilOp::Keep,
        compare: CompareOp::Always,
    };
}

impl DepthStencilDescription {
    /// Depth testing and writing disabled.
    pub const NONE: Self = Self {
        depth_test: false,
        depth_write: false,
        depth_compare: CompareOp::LessOrEqual,
        stencil_test: false,
        stencil_read_mask: u8::MAX,
        stencil_write_mask: u8::MAX,
        front_face: StencilFaceDescription::KEEP,
        back_face: StencilFaceDescription::KEEP,
    };

    /// Depth testing and writing enabled.
    pub const DEFAULT: Self = Self {
        depth_test: true,
        depth_write: true,
        ..Self::NONE
    };

    /// Depth testing enabled, writing disabled.
    pub const READ_ONLY: Self = Self {
        depth_test: true,
        depth_write: false,
        ..Self::NONE
    };
}

impl Default for StencilFaceDescription {
    #[inline(always)]
    fn default() -> Self {
        Self::KEEP
    }
}

impl Default for DepthStencilDescription {
    #[inline(always)]
    fn default() -> Self {
        Self::DEFAULT
    }
}
