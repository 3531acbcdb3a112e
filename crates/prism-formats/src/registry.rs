use std::{
    any::{type_name, TypeId},
    hash::BuildHasherDefault,
    sync::{Arc, OnceLock},
};

use dashmap::{mapref::entry::Entry, DashMap};
use prism_log::{debug, warn};
use prism_pal::prelude::{InputElement, VertexInputRate};
use rustc_hash::FxHasher;
use thiserror::Error;

use crate::{
    declaration::VertexDeclaration,
    vertex::{
        VertexPositionColor, VertexPositionColorTexture, VertexPositionNormalTexture,
        VertexPositionTexture, VertexType, VertexTypeId,
    },
};

type FxBuildHasher = BuildHasherDefault<FxHasher>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("no vertex declaration registered for `{name}`")]
pub struct UnknownVertexType {
    pub name: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegisterError {
    #[error("vertex name `{name}` is already used by `{existing}`")]
    NameTaken {
        name: &'static str,
        existing: &'static str,
    },
}

/// Maps vertex types to their declarations.
///
/// Declarations are built lazily on first lookup and then shared by every caller. Concurrent
/// first lookups of the same type build it exactly once.
#[derive(Default)]
pub struct VertexDeclarationRegistry {
    entries: DashMap<TypeId, Arc<RegistryEntry>, FxBuildHasher>,
    /// Vertex name to the type registered under it and that type's Rust name.
    names: DashMap<&'static str, (TypeId, &'static str), FxBuildHasher>,
}

struct RegistryEntry {
    name: &'static str,
    size: usize,
    build: fn() -> Vec<InputElement>,
    declaration: OnceLock<VertexDeclaration>,
}

impl VertexDeclarationRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry containing the built-in vertex types.
    pub fn with_builtin() -> Self {
        let registry = Self::new();
        registry.register_builtin();
        registry
    }

    /// The process-wide registry. Built-in vertex types are always registered.
    pub fn global() -> &'static VertexDeclarationRegistry {
        static GLOBAL: OnceLock<VertexDeclarationRegistry> = OnceLock::new();
        GLOBAL.get_or_init(Self::with_builtin)
    }

    /// Registers a vertex type. Registering the same type again does nothing.
    ///
    /// # Errors
    /// Fails if a different type is already registered under `V::NAME`.
    pub fn register<V: VertexType>(&self) -> Result<VertexTypeId, RegisterError> {
        let id = TypeId::of::<V>();
        match self.names.entry(V::NAME) {
            Entry::Occupied(entry) => {
                let (existing_id, existing) = *entry.get();
                if existing_id != id {
                    return Err(RegisterError::NameTaken {
                        name: V::NAME,
                        existing,
                    });
                }
            }
            Entry::Vacant(entry) => {
                entry.insert((id, type_name::<V>()));
            }
        }

        self.insert_entry::<V>();
        Ok(VertexTypeId::of::<V>())
    }

    /// Declaration of a registered vertex type.
    ///
    /// # Errors
    /// Fails with [`UnknownVertexType`] if `V` was never registered.
    #[inline]
    pub fn declaration_for<V: VertexType>(&self) -> Result<VertexDeclaration, UnknownVertexType> {
        self.declaration_for_id(VertexTypeId::of::<V>())
    }

    /// Same as [`declaration_for`](Self::declaration_for) with a runtime type tag.
    pub fn declaration_for_id(
        &self,
        id: VertexTypeId,
    ) -> Result<VertexDeclaration, UnknownVertexType> {
        let entry = self.entry(id.type_id()).ok_or_else(|| UnknownVertexType {
            name: id.name().to_owned(),
        })?;
        Ok(entry.declaration())
    }

    /// Looks a declaration up by the name the vertex type was registered with.
    pub fn declaration_by_name(&self, name: &str) -> Result<VertexDeclaration, UnknownVertexType> {
        let unknown = || UnknownVertexType {
            name: name.to_owned(),
        };
        let id = self.names.get(name).map(|entry| entry.value().0).ok_or_else(unknown)?;
        let entry = self.entry(id).ok_or_else(unknown)?;
        Ok(entry.declaration())
    }

    /// Declaration of `V`, registering it first if needed.
    pub fn get_or_register<V: VertexType>(&self) -> VertexDeclaration {
        if let Some(entry) = self.entry(TypeId::of::<V>()) {
            return entry.declaration();
        }

        if let Err(err) = self.register::<V>() {
            warn!("{err}; `{}` can only be looked up by type", type_name::<V>());
        }
        self.insert_entry::<V>().declaration()
    }

    #[inline]
    pub fn is_registered<V: VertexType>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<V>())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names of every type registered by name, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.names.iter().map(|entry| *entry.key()).collect();
        names.sort_unstable();
        names
    }

    fn register_builtin(&self) {
        let results = [
            self.register::<VertexPositionColor>(),
            self.register::<VertexPositionTexture>(),
            self.register::<VertexPositionColorTexture>(),
            self.register::<VertexPositionNormalTexture>(),
        ];

        for err in results.into_iter().filter_map(Result::err) {
            warn!("unable to register built-in vertex type: {err}");
        }
    }

    /// Clones the entry out so no map lock is held while a declaration is built.
    #[inline]
    fn entry(&self, id: TypeId) -> Option<Arc<RegistryEntry>> {
        self.entries.get(&id).map(|entry| entry.value().clone())
    }

    fn insert_entry<V: VertexType>(&self) -> Arc<RegistryEntry> {
        self.entries
            .entry(TypeId::of::<V>())
            .or_insert_with(|| {
                Arc::new(RegistryEntry {
                    name: V::NAME,
                    size: std::mem::size_of::<V>(),
                    build: V::input_elements,
                    declaration: OnceLock::new(),
                })
            })
            .value()
            .clone()
    }
}

impl RegistryEntry {
    fn declaration(&self) -> VertexDeclaration {
        self.declaration
            .get_or_init(|| {
                let declaration = VertexDeclaration::new((self.build)());
                debug!(
                    "built vertex declaration for {} with {} elements",
                    self.name,
                    declaration.len()
                );

                let interleaved = declaration.iter().all(|element| {
                    element.input_slot == 0 && element.input_rate == VertexInputRate::Vertex
                });
                if interleaved && declaration.stride(0) as usize != self.size {
                    warn!(
                        "vertex declaration for {} covers {} bytes but the vertex is {} bytes",
                        self.name,
                        declaration.stride(0),
                        self.size
                    );
                }

                declaration
            })
            .clone()
    }
}
