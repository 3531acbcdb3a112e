//! Vertex value types and the declarations describing how their bytes feed shader inputs.

pub mod color;
pub mod declaration;
pub mod registry;
pub mod vertex;

#[cfg(test)]
mod tests;

pub mod prelude {
    pub use crate::color::Color;
    pub use crate::declaration::VertexDeclaration;
    pub use crate::registry::{RegisterError, UnknownVertexType, VertexDeclarationRegistry};
    pub use crate::vertex::{
        vertex_hash, VertexPositionColor, VertexPositionColorTexture, VertexPositionNormalTexture,
        VertexPositionTexture, VertexType, VertexTypeId,
    };
    pub use crate::declaration_for;
}

use declaration::VertexDeclaration;
use registry::{UnknownVertexType, VertexDeclarationRegistry};
use vertex::VertexType;

/// Declaration of `V` from the global registry.
///
/// # Errors
/// Fails with [`UnknownVertexType`] if `V` was never registered.
#[inline]
pub fn declaration_for<V: VertexType>() -> Result<VertexDeclaration, UnknownVertexType> {
    VertexDeclarationRegistry::global().declaration_for::<V>()
}
