use std::{borrow::Cow, sync::Arc};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    context::{Context, GraphicsProperties},
    result::ResultCode,
    types::*,
    Backend,
};

/// Describes how one field of a vertex maps to a shader input.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
pub struct InputElement {
    /// Name matching the shader input, such as `POSITION` or `TEXCOORD`.
    pub semantic_name: Cow<'static, str>,
    /// Disambiguates repeated semantics, such as several texture coordinate sets.
    pub semantic_index: u32,
    pub format: VertexFormat,
    /// The vertex buffer slot this element is read from.
    pub input_slot: u32,
    /// Byte offset within the vertex. `None` places the element directly after the previous
    /// element of the same slot.
    pub offset: Option<u32>,
    pub input_rate: VertexInputRate,
}

/// Largest number of bytes the elements of one input slot may span.
pub const MAX_VERTEX_STRIDE: u32 = 2048;

pub struct InputLayoutCreateInfo<'a> {
    /// Elements of the layout in declaration order.
    pub elements: &'a [InputElement],
    /// The backend *should* use the provided debug name for easy identification.
    pub debug_name: Option<String>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidLayoutError {
    #[error("input layout has no elements")]
    Empty,
    #[error("input layout has {count} elements but the device supports at most {max}")]
    TooManyElements { count: usize, max: u32 },
    #[error("element {index} ({semantic}{semantic_index}) uses {format:?} which the device does not support")]
    UnsupportedFormat {
        index: usize,
        semantic: String,
        semantic_index: u32,
        format: VertexFormat,
    },
    #[error("element {index} ({semantic}{semantic_index}) reads from slot {slot} but the device only has {max} slots")]
    UnsupportedSlot {
        index: usize,
        semantic: String,
        semantic_index: u32,
        slot: u32,
        max: u32,
    },
    #[error("element {index} repeats semantic {semantic}{semantic_index}")]
    DuplicateSemantic {
        index: usize,
        semantic: String,
        semantic_index: u32,
    },
    #[error("element {index} ({semantic}{semantic_index}) has offset {offset} which is not 4 byte aligned")]
    MisalignedOffset {
        index: usize,
        semantic: String,
        semantic_index: u32,
        offset: u32,
    },
    #[error("element {index} ({semantic}{semantic_index}) ends at byte {end} but a vertex may span at most {max} bytes")]
    OffsetOutOfRange {
        index: usize,
        semantic: String,
        semantic_index: u32,
        end: u32,
        max: u32,
    },
    #[error("element {index} ({semantic}{semantic_index}) is per-instance but the device does not support instancing")]
    InstancingUnsupported {
        index: usize,
        semantic: String,
        semantic_index: u32,
    },
    #[error("device rejected the input layout: {0}")]
    Device(ResultCode),
}

/// A compiled binding of vertex buffer bytes to shader inputs.
pub struct InputLayout<B: Backend>(pub(crate) Arc<InputLayoutInner<B>>);

pub(crate) struct InputLayoutInner<B: Backend> {
    ctx: Context<B>,
    elements: Vec<InputElement>,
    pub(crate) id: B::InputLayout,
}

impl<B: Backend> InputLayout<B> {
    /// Creates a new input layout.
    ///
    /// # Arguments
    /// - `ctx` - The [`Context`] to create the layout with.
    /// - `create_info` - Describes the layout to create.
    pub fn new(
        ctx: Context<B>,
        create_info: InputLayoutCreateInfo<'_>,
    ) -> Result<Self, InvalidLayoutError> {
        let elements = create_info.elements.to_vec();
        let id = unsafe { ctx.0.create_input_layout(&create_info)? };
        Ok(Self(Arc::new(InputLayoutInner { ctx, elements, id })))
    }

    #[inline(always)]
    pub fn elements(&self) -> &[InputElement] {
        &self.0.elements
    }

    #[inline(always)]
    pub fn internal(&self) -> &B::InputLayout {
        &self.0.id
    }
}

impl<B: Backend> Clone for InputLayout<B> {
    #[inline(always)]
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<B: Backend> Drop for InputLayoutInner<B> {
    fn drop(&mut self) {
        unsafe {
            self.ctx.0.destroy_input_layout(&mut self.id);
        }
    }
}

impl InputElement {
    /// Creates a per-vertex element placed right after the previous element of its slot.
    pub const fn new(
        semantic_name: &'static str,
        semantic_index: u32,
        format: VertexFormat,
        input_slot: u32,
    ) -> Self {
        Self {
            semantic_name: Cow::Borrowed(semantic_name),
            semantic_index,
            format,
            input_slot,
            offset: None,
            input_rate: VertexInputRate::Vertex,
        }
    }

    /// Same as [`InputElement::new`] with a semantic name computed at runtime.
    pub fn named(
        semantic_name: impl Into<Cow<'static, str>>,
        semantic_index: u32,
        format: VertexFormat,
        input_slot: u32,
    ) -> Self {
        Self {
            semantic_name: semantic_name.into(),
            semantic_index,
            format,
            input_slot,
            offset: None,
            input_rate: VertexInputRate::Vertex,
        }
    }

    /// Places the element at an explicit byte offset.
    #[inline(always)]
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Steps the element once every `step_rate` instances.
    #[inline(always)]
    pub fn per_instance(mut self, step_rate: u32) -> Self {
        self.input_rate = VertexInputRate::Instance { step_rate };
        self
    }

    #[inline(always)]
    pub fn size(&self) -> u32 {
        self.format.size()
    }

    /// Semantics are matched case-insensitively.
    #[inline]
    pub fn same_semantic(&self, other: &InputElement) -> bool {
        self.semantic_index == other.semantic_index
            && self.semantic_name.eq_ignore_ascii_case(&other.semantic_name)
    }
}

/// Validates input elements the way the native runtime does before compiling an input layout.
pub fn validate_input_elements(
    elements: &[InputElement],
    properties: &GraphicsProperties,
) -> Result<(), InvalidLayoutError> {
    if elements.is_empty() {
        return Err(InvalidLayoutError::Empty);
    }

    let limits = &properties.limits;
    if elements.len() > limits.max_input_elements as usize {
        return Err(InvalidLayoutError::TooManyElements {
            count: elements.len(),
            max: limits.max_input_elements,
        });
    }

    // Running end of every slot. Slots are range checked before indexing.
    let mut slot_ends = vec![0_u32; limits.max_input_slots as usize];

    for (index, element) in elements.iter().enumerate() {
        let semantic = || element.semantic_name.to_string();

        if element.input_slot >= limits.max_input_slots {
            return Err(InvalidLayoutError::UnsupportedSlot {
                index,
                semantic: semantic(),
                semantic_index: element.semantic_index,
                slot: element.input_slot,
                max: limits.max_input_slots,
            });
        }

        if !properties.supports_vertex_format(element.format) {
            return Err(InvalidLayoutError::UnsupportedFormat {
                index,
                semantic: semantic(),
                semantic_index: element.semantic_index,
                format: element.format,
            });
        }

        if let Some(offset) = element.offset {
            if offset % 4 != 0 {
                return Err(InvalidLayoutError::MisalignedOffset {
                    index,
                    semantic: semantic(),
                    semantic_index: element.semantic_index,
                    offset,
                });
            }
        }

        let slot_end = &mut slot_ends[element.input_slot as usize];
        let end = element
            .offset
            .unwrap_or(*slot_end)
            .saturating_add(element.size());
        if end > MAX_VERTEX_STRIDE {
            return Err(InvalidLayoutError::OffsetOutOfRange {
                index,
                semantic: semantic(),
                semantic_index: element.semantic_index,
                end,
                max: MAX_VERTEX_STRIDE,
            });
        }
        *slot_end = end;

        if matches!(element.input_rate, VertexInputRate::Instance { .. })
            && !properties.supports(DeviceFeatures::INSTANCING)
        {
            return Err(InvalidLayoutError::InstancingUnsupported {
                index,
                semantic: semantic(),
                semantic_index: element.semantic_index,
            });
        }

        if elements[..index].iter().any(|prev| prev.same_semantic(element)) {
            return Err(InvalidLayoutError::DuplicateSemantic {
                index,
                semantic: semantic(),
                semantic_index: element.semantic_index,
            });
        }
    }

    Ok(())
}
