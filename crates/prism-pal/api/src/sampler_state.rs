use std::sync::Arc;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::{
    context::{Context, Limits},
    result::{DeviceCreationError, ResultCode},
    types::*,
    Backend,
};

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SamplerDescription {
    pub min_filter: Filter,
    pub mag_filter: Filter,
    pub mipmap_filter: Filter,
    pub address_u: SamplerAddressMode,
    pub address_v: SamplerAddressMode,
    pub address_w: SamplerAddressMode,
    pub mip_lod_bias: OrderedFloat<f32>,
    /// Anisotropic filtering is used when this is `Some`.
    pub max_anisotropy: Option<u32>,
    /// Turns the sampler into a comparison sampler.
    pub compare: Option<CompareOp>,
    /// Only used with [`ClampToBorder`](SamplerAddressMode::ClampToBorder).
    pub border_color: BorderColor,
    pub min_lod: OrderedFloat<f32>,
    pub max_lod: OrderedFloat<f32>,
}

#[derive(Debug, Clone)]
pub struct SamplerStateCreateInfo {
    pub description: SamplerDescription,
    /// The backend *should* use the provided debug name for easy identification.
    pub debug_name: Option<String>,
}

pub struct SamplerState<B: Backend>(pub(crate) Arc<SamplerStateInner<B>>);

pub(crate) struct SamplerStateInner<B: Backend> {
    ctx: Context<B>,
    description: SamplerDescription,
    pub(crate) id: B::SamplerState,
}

impl<B: Backend> SamplerState<B> {
    /// Creates a new sampler state.
    ///
    /// # Arguments
    /// - `ctx` - The [`Context`] to create the state with.
    /// - `create_info` - Describes the state to create.
    #[inline(always)]
    pub fn new(
        ctx: Context<B>,
        create_info: SamplerStateCreateInfo,
    ) -> Result<Self, DeviceCreationError> {
        let id = unsafe { ctx.0.create_sampler_state(&create_info)? };
        Ok(Self(Arc::new(SamplerStateInner {
            ctx,
            description: create_info.description,
            id,
        })))
    }

    #[inline(always)]
    pub fn description(&self) -> &SamplerDescription {
        &self.0.description
    }

    #[inline(always)]
    pub fn internal(&self) -> &B::SamplerState {
        &self.0.id
    }
}

impl<B: Backend> Clone for SamplerState<B> {
    #[inline(always)]
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<B: Backend> Drop for SamplerStateInner<B> {
    fn drop(&mut self) {
        unsafe {
            self.ctx.0.destroy_sampler_state(&mut self.id);
        }
    }
}

impl SamplerDescription {
    pub const fn new(filter: Filter, address_mode: SamplerAddressMode) -> Self {
        Self {
            min_filter: filter,
            mag_filter: filter,
            mipmap_filter: filter,
            address_u: address_mode,
            address_v: address_mode,
            address_w: address_mode,
            mip_lod_bias: OrderedFloat(0.0),
            max_anisotropy: None,
            compare: None,
            border_color: BorderColor::TransparentBlack,
            min_lod: OrderedFloat(0.0),
            max_lod: OrderedFloat(f32::MAX),
        }
    }

    pub const POINT_WRAP: Self = Self::new(Filter::Nearest, SamplerAddressMode::Repeat);
    pub const POINT_CLAMP: Self = Self::new(Filter::Nearest, SamplerAddressMode::ClampToEdge);
    pub const LINEAR_WRAP: Self = Self::new(Filter::Linear, SamplerAddressMode::Repeat);
    pub const LINEAR_CLAMP: Self = Self::new(Filter::Linear, SamplerAddressMode::ClampToEdge);

    pub const ANISOTROPIC_WRAP: Self = Self {
        max_anisotropy: Some(16),
        ..Self::LINEAR_WRAP
    };

    pub const ANISOTROPIC_CLAMP: Self = Self {
        max_anisotropy: Some(16),
        ..Self::LINEAR_CLAMP
    };

    /// Checks the description against the rules the native runtime enforces.
    pub fn validate(&self, limits: &Limits) -> Result<(), ResultCode> {
        if let Some(anisotropy) = self.max_anisotropy {
            if anisotropy == 0 || anisotropy > limits.max_anisotropy {
                return Err(ResultCode::INVALID_ARG);
            }
        }

        if self.min_lod.0.is_nan() || self.max_lod.0.is_nan() || self.mip_lod_bias.0.is_nan() {
            return Err(ResultCode::INVALID_ARG);
        }

        if self.min_lod > self.max_lod {
            return Err(ResultCode::INVALID_ARG);
        }

        Ok(())
    }
}

impl Default for SamplerDescription {
    #[inline(always)]
    fn default() -> Self {
        Self::LINEAR_CLAMP
    }
}
