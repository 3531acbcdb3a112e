use std::sync::Arc;

use prism_pal::api::{
    context::Context,
    input_layout::{InputElement, InputLayout, InputLayoutCreateInfo, InvalidLayoutError},
    Backend,
};
use rustc_hash::FxHashMap;

/// The ordered input elements of one vertex type.
///
/// Declarations are immutable. Cloning one is cheap and the clone shares the same element
/// storage, so two declarations obtained for the same vertex type are both value-equal and
/// [`ptr_eq`](VertexDeclaration::ptr_eq).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertexDeclaration {
    elements: Arc<[InputElement]>,
}

impl VertexDeclaration {
    pub fn new(elements: impl Into<Arc<[InputElement]>>) -> Self {
        Self {
            elements: elements.into(),
        }
    }

    #[inline(always)]
    pub fn elements(&self) -> &[InputElement] {
        &self.elements
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[inline(always)]
    pub fn iter(&self) -> std::slice::Iter<'_, InputElement> {
        self.elements.iter()
    }

    /// `true` if both declarations share the same element storage.
    #[inline(always)]
    pub fn ptr_eq(&self, other: &VertexDeclaration) -> bool {
        Arc::ptr_eq(&self.elements, &other.elements)
    }

    /// Finds the element with the given semantic. Semantics are matched case-insensitively.
    pub fn find(&self, semantic_name: &str, semantic_index: u32) -> Option<&InputElement> {
        self.elements.iter().find(|element| {
            element.semantic_index == semantic_index
                && element.semantic_name.eq_ignore_ascii_case(semantic_name)
        })
    }

    /// Byte offset of every element within its slot, in declaration order. Elements without an
    /// explicit offset start where the previous element of the same slot ended.
    /// Offsets saturate at `u32::MAX` rather than wrapping.
    pub fn resolved_offsets(&self) -> Vec<u32> {
        let mut slot_ends = FxHashMap::<u32, u32>::default();
        self.elements
            .iter()
            .map(|element| {
                let end = slot_ends.entry(element.input_slot).or_insert(0);
                let offset = element.offset.unwrap_or(*end);
                *end = offset.saturating_add(element.size());
                offset
            })
            .collect()
    }

    /// Size in bytes of one vertex in the given slot. `0` if no element reads from it.
    pub fn stride(&self, slot: u32) -> u32 {
        self.elements
            .iter()
            .zip(self.resolved_offsets())
            .filter(|(element, _)| element.input_slot == slot)
            .map(|(element, offset)| offset.saturating_add(element.size()))
            .max()
            .unwrap_or(0)
    }

    /// The distinct input slots used by this declaration, ascending.
    pub fn slots(&self) -> Vec<u32> {
        let mut slots: Vec<_> = self.elements.iter().map(|e| e.input_slot).collect();
        slots.sort_unstable();
        slots.dedup();
        slots
    }

    /// Compiles this declaration into an input layout on the given device.
    pub fn create_input_layout<B: Backend>(
        &self,
        ctx: Context<B>,
        debug_name: Option<String>,
    ) -> Result<InputLayout<B>, InvalidLayoutError> {
        InputLayout::new(
            ctx,
            InputLayoutCreateInfo {
                elements: &self.elements,
                debug_name,
            },
        )
    }
}

impl From<Vec<InputElement>> for VertexDeclaration {
    #[inline(always)]
    fn from(value: Vec<InputElement>) -> Self {
        Self::new(value)
    }
}

impl<'a> IntoIterator for &'a VertexDeclaration {
    type Item = &'a InputElement;
    type IntoIter = std::slice::Iter<'a, InputElement>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
