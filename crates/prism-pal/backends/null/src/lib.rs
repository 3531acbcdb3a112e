//! A headless backend. It holds no GPU resources but enforces the same feature levels, limits
//! and validation rules as a native device, which makes it suitable for tests and tooling.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use api::{
    blend_state::BlendStateCreateInfo,
    context::GraphicsProperties,
    depth_stencil_state::DepthStencilStateCreateInfo,
    input_layout::{validate_input_elements, InputLayoutCreateInfo, InvalidLayoutError},
    rasterizer_state::RasterizerStateCreateInfo,
    result::{DeviceCreationError, ResultCode, StateObjectKind},
    sampler_state::SamplerStateCreateInfo,
    types::{DeviceFeatures, FeatureLevel},
    Backend,
};
use prism_log::{debug, trace, warn};

pub struct NullBackendCreateInfo {
    pub feature_level: FeatureLevel,
    /// Overrides the features implied by `feature_level`.
    pub features: Option<DeviceFeatures>,
    pub debug_name: Option<String>,
}

/// Opaque id of an object created by the [`NullBackend`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NullHandle(u64);

pub struct NullBackend {
    properties: GraphicsProperties,
    debug_name: Option<String>,
    next_id: AtomicU64,
    live_objects: AtomicUsize,
}

impl NullBackend {
    pub fn new(create_info: NullBackendCreateInfo) -> Self {
        let mut properties = GraphicsProperties::for_feature_level(create_info.feature_level);
        if let Some(features) = create_info.features {
            properties.features = features;
        }

        debug!(
            "created null device {:?} at {:?} with {:?}",
            create_info.debug_name, properties.feature_level, properties.features
        );

        Self {
            properties,
            debug_name: create_info.debug_name,
            next_id: AtomicU64::new(1),
            live_objects: AtomicUsize::new(0),
        }
    }

    /// Number of objects created and not yet destroyed.
    #[inline(always)]
    pub fn live_objects(&self) -> usize {
        self.live_objects.load(Ordering::Acquire)
    }

    #[inline(always)]
    pub fn debug_name(&self) -> Option<&str> {
        self.debug_name.as_deref()
    }

    fn allocate(&self, kind: &str, debug_name: Option<&str>) -> NullHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.live_objects.fetch_add(1, Ordering::AcqRel);
        debug!("created {kind} {id} ({debug_name:?})");
        NullHandle(id)
    }

    fn release(&self, kind: &str, id: &NullHandle) {
        self.live_objects.fetch_sub(1, Ordering::AcqRel);
        trace!("destroyed {kind} {}", id.0);
    }

    /// Turns the outcome of a description check into the device's creation result.
    fn checked(
        &self,
        object: StateObjectKind,
        debug_name: Option<&str>,
        validation: Result<(), ResultCode>,
    ) -> Result<(), DeviceCreationError> {
        validation
            .err()
            .unwrap_or(ResultCode::OK)
            .check(object)
            .map_err(|err| {
                warn!("device refused {object} state {debug_name:?}: {}", err.code);
                err
            })
    }
}

impl NullHandle {
    #[inline(always)]
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl Default for NullBackendCreateInfo {
    fn default() -> Self {
        Self {
            feature_level: FeatureLevel::Level11_0,
            features: None,
            debug_name: None,
        }
    }
}

impl Backend for NullBackend {
    type RasterizerState = NullHandle;
    type BlendState = NullHandle;
    type DepthStencilState = NullHandle;
    type SamplerState = NullHandle;
    type InputLayout = NullHandle;

    unsafe fn properties(&self) -> &GraphicsProperties {
        &self.properties
    }

    unsafe fn create_rasterizer_state(
        &self,
        create_info: &RasterizerStateCreateInfo,
    ) -> Result<Self::RasterizerState, DeviceCreationError> {
        let debug_name = create_info.debug_name.as_deref();
        let validation = create_info.description.validate();
        self.checked(StateObjectKind::Rasterizer, debug_name, validation)?;
        Ok(self.allocate("rasterizer state", debug_name))
    }

    unsafe fn create_blend_state(
        &self,
        create_info: &BlendStateCreateInfo,
    ) -> Result<Self::BlendState, DeviceCreationError> {
        let debug_name = create_info.debug_name.as_deref();
        let validation = create_info.description.validate(self.properties.features);
        self.checked(StateObjectKind::Blend, debug_name, validation)?;
        Ok(self.allocate("blend state", debug_name))
    }

    unsafe fn create_depth_stencil_state(
        &self,
        create_info: &DepthStencilStateCreateInfo,
    ) -> Result<Self::DepthStencilState, DeviceCreationError> {
        Ok(self.allocate("depth/stencil state", create_info.debug_name.as_deref()))
    }

    unsafe fn create_sampler_state(
        &self,
        create_info: &SamplerStateCreateInfo,
    ) -> Result<Self::SamplerState, DeviceCreationError> {
        let debug_name = create_info.debug_name.as_deref();
        let validation = create_info.description.validate(&self.properties.limits);
        self.checked(StateObjectKind::Sampler, debug_name, validation)?;
        Ok(self.allocate("sampler state", debug_name))
    }

    unsafe fn create_input_layout(
        &self,
        create_info: &InputLayoutCreateInfo<'_>,
    ) -> Result<Self::InputLayout, InvalidLayoutError> {
        let debug_name = create_info.debug_name.as_deref();
        if let Err(err) = validate_input_elements(create_info.elements, &self.properties) {
            warn!("device refused input layout {debug_name:?}: {err}");
            return Err(err);
        }
        Ok(self.allocate("input layout", debug_name))
    }

    unsafe fn destroy_rasterizer_state(&self, id: &mut Self::RasterizerState) {
        self.release("rasterizer state", id);
    }

    unsafe fn destroy_blend_state(&self, id: &mut Self::BlendState) {
        self.release("blend state", id);
    }

    unsafe fn destroy_depth_stencil_state(&self, id: &mut Self::DepthStencilState) {
        self.release("depth/stencil state", id);
    }

    unsafe fn destroy_sampler_state(&self, id: &mut Self::SamplerState) {
        self.release("sampler state", id);
    }

    unsafe fn destroy_input_layout(&self, id: &mut Self::InputLayout) {
        self.release("input layout", id);
    }
}
