use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    types::{DeviceFeatures, FeatureLevel, VertexFormat},
    Backend,
};

/// The context is the entry point for Pal. It is used to create all other Pal objects.
pub struct Context<B: Backend>(pub(crate) Arc<B>);

/// Hard limits of a device.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Limits {
    /// Number of vertex buffer slots input elements may read from.
    pub max_input_slots: u32,
    /// Number of elements a single input layout may contain.
    pub max_input_elements: u32,
    /// Largest anisotropy a sampler may request.
    pub max_anisotropy: u32,
}

/// Describes what a device is capable of.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
pub struct GraphicsProperties {
    pub feature_level: FeatureLevel,
    pub features: DeviceFeatures,
    pub limits: Limits,
}

impl<B: Backend> Context<B> {
    /// Creates a new Pal instance.
    ///
    /// # Arguments
    ///
    /// - `backend` - A backend object selected based on your system. See `/backends/` for a
    /// selection to choose from.
    #[inline(always)]
    pub fn new(backend: B) -> Self {
        Self(Arc::new(backend))
    }

    #[inline(always)]
    pub fn properties(&self) -> &GraphicsProperties {
        unsafe { self.0.properties() }
    }

    /// Direct access to the backend.
    #[inline(always)]
    pub fn backend(&self) -> &B {
        &self.0
    }
}

impl<B: Backend> Clone for Context<B> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl Limits {
    pub fn for_feature_level(level: FeatureLevel) -> Self {
        match level {
            FeatureLevel::Level9_1 => Limits {
                max_input_slots: 16,
                max_input_elements: 16,
                max_anisotropy: 2,
            },
            FeatureLevel::Level9_2
            | FeatureLevel::Level9_3
            | FeatureLevel::Level10_0
            | FeatureLevel::Level10_1 => Limits {
                max_input_slots: 16,
                max_input_elements: 16,
                max_anisotropy: 16,
            },
            FeatureLevel::Level11_0 | FeatureLevel::Level11_1 => Limits {
                max_input_slots: 32,
                max_input_elements: 32,
                max_anisotropy: 16,
            },
        }
    }
}

impl GraphicsProperties {
    /// Properties every device of the given feature level reports.
    pub fn for_feature_level(level: FeatureLevel) -> Self {
        Self {
            feature_level: level,
            features: level.default_features(),
            limits: Limits::for_feature_level(level),
        }
    }

    #[inline(always)]
    pub fn supports_vertex_format(&self, format: VertexFormat) -> bool {
        self.feature_level >= format.min_feature_level()
    }

    #[inline(always)]
    pub fn supports(&self, features: DeviceFeatures) -> bool {
        self.features.contains(features)
    }
}

impl Default for GraphicsProperties {
    fn default() -> Self {
        Self::for_feature_level(FeatureLevel::Level11_0)
    }
}
