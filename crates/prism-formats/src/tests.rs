use std::{
    hash::{Hash, Hasher},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Barrier,
    },
    time::Duration,
};

use bytemuck::{Pod, Zeroable};
use prism_math::{Vec2, Vec3, Vec4};
use prism_pal::{
    api::context::Context,
    backend::{NullBackend, NullBackendCreateInfo},
    prelude::{FeatureLevel, InputElement, InvalidLayoutError, VertexFormat},
};

use crate::prelude::*;

#[repr(C)]
#[derive(Debug, Default, Copy, Clone, PartialEq, Pod, Zeroable)]
struct UnregisteredVertex {
    position: [f32; 3],
}

impl Hash for UnregisteredVertex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for value in self.position {
            value.to_bits().hash(state);
        }
    }
}

impl VertexType for UnregisteredVertex {
    const NAME: &'static str = "UnregisteredVertex";

    fn input_elements() -> Vec<InputElement> {
        vec![InputElement::new("POSITION", 0, VertexFormat::Float32x3, 0)]
    }
}

static COUNTED_BUILDS: AtomicUsize = AtomicUsize::new(0);

#[repr(C)]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Pod, Zeroable)]
struct CountedVertex {
    position: [i32; 3],
    id: u32,
}

impl VertexType for CountedVertex {
    const NAME: &'static str = "CountedVertex";

    fn input_elements() -> Vec<InputElement> {
        COUNTED_BUILDS.fetch_add(1, Ordering::SeqCst);
        // Give other threads a chance to race the build.
        std::thread::sleep(Duration::from_millis(20));
        vec![
            InputElement::new("POSITION", 0, VertexFormat::Sint32x3, 0),
            InputElement::new("BLENDINDICES", 0, VertexFormat::Uint32, 0),
        ]
    }
}

static LAZY_BUILDS: AtomicUsize = AtomicUsize::new(0);

#[repr(C)]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Pod, Zeroable)]
struct LazyVertex {
    indices: [u32; 4],
}

impl VertexType for LazyVertex {
    const NAME: &'static str = "LazyVertex";

    fn input_elements() -> Vec<InputElement> {
        LAZY_BUILDS.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(20));
        vec![InputElement::new("BLENDINDICES", 0, VertexFormat::Uint32x4, 0)]
    }
}

#[repr(C)]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Pod, Zeroable)]
struct FarOffsetVertex {
    indices: [u32; 4],
}

impl VertexType for FarOffsetVertex {
    const NAME: &'static str = "FarOffsetVertex";

    fn input_elements() -> Vec<InputElement> {
        vec![
            InputElement::new("BLENDINDICES", 0, VertexFormat::Uint32x4, 0)
                .with_offset(u32::MAX - 3),
            InputElement::new("BLENDWEIGHT", 0, VertexFormat::Float32x4, 0),
        ]
    }
}

#[repr(C)]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Pod, Zeroable)]
struct ImpostorVertex {
    id: u32,
}

impl VertexType for ImpostorVertex {
    // Deliberately clashes with a built-in type.
    const NAME: &'static str = "VertexPositionTexture";

    fn input_elements() -> Vec<InputElement> {
        vec![InputElement::new("BLENDINDICES", 0, VertexFormat::Uint32, 0)]
    }
}

fn null_context(feature_level: FeatureLevel) -> Context<NullBackend> {
    Context::new(NullBackend::new(NullBackendCreateInfo {
        feature_level,
        ..Default::default()
    }))
}

#[test]
fn position_texture_declaration() {
    let declaration = declaration_for::<VertexPositionTexture>().unwrap();

    assert_eq!(
        declaration.elements(),
        &[
            InputElement::new("POSITION", 0, VertexFormat::Float32x3, 0),
            InputElement::new("TEXCOORD", 0, VertexFormat::Float32x2, 0),
        ]
    );
    assert_eq!(declaration.resolved_offsets(), vec![0, 12]);
    assert_eq!(declaration.stride(0), 20);
}

#[test]
fn declaration_is_shared() {
    let first = declaration_for::<VertexPositionNormalTexture>().unwrap();
    let second = declaration_for::<VertexPositionNormalTexture>().unwrap();
    let third = VertexPositionNormalTexture::declaration();

    assert_eq!(first, second);
    assert!(first.ptr_eq(&second));
    assert!(first.ptr_eq(&third));
}

#[test]
fn builtin_declarations_match_layout() {
    fn check<V: VertexType>(fields: usize) {
        let declaration = V::declaration();
        assert_eq!(declaration.len(), fields, "{}", V::NAME);
        assert_eq!(declaration.slots(), vec![0], "{}", V::NAME);
        assert_eq!(
            declaration.stride(0) as usize,
            std::mem::size_of::<V>(),
            "{}",
            V::NAME
        );
    }

    check::<VertexPositionColor>(2);
    check::<VertexPositionTexture>(2);
    check::<VertexPositionColorTexture>(3);
    check::<VertexPositionNormalTexture>(3);

    let declaration = VertexPositionColorTexture::declaration();
    let semantics: Vec<_> = declaration
        .iter()
        .map(|element| element.semantic_name.as_ref())
        .collect();
    assert_eq!(semantics, ["POSITION", "COLOR", "TEXCOORD"]);
    assert_eq!(declaration.resolved_offsets(), vec![0, 12, 16]);
}

#[test]
fn structural_equality_and_hash() {
    let a = VertexPositionTexture::new(Vec3::new(1.0, 2.0, 3.0), Vec2::new(0.0, 0.0));
    let b = VertexPositionTexture::new(Vec3::new(1.0, 2.0, 3.0), Vec2::new(0.0, 0.0));
    assert_eq!(a, b);
    assert_eq!(vertex_hash(&a), vertex_hash(&b));

    let c = VertexPositionTexture::new(Vec3::new(1.0, 2.0, 3.0), Vec2::new(0.0, 1.0));
    assert_ne!(a, c);
    assert_ne!(vertex_hash(&a), vertex_hash(&c));
}

#[test]
fn hash_is_order_sensitive() {
    let a = VertexPositionNormalTexture::new(Vec3::X, Vec3::Y, Vec2::ZERO);
    let b = VertexPositionNormalTexture::new(Vec3::Y, Vec3::X, Vec2::ZERO);
    assert_ne!(a, b);
    assert_ne!(vertex_hash(&a), vertex_hash(&b));
}

#[test]
fn signed_zero_hashes_alike() {
    let a = VertexPositionColor::new(Vec3::new(0.0, 1.0, 2.0), Color::RED);
    let b = VertexPositionColor::new(Vec3::new(-0.0, 1.0, 2.0), Color::RED);
    assert_eq!(a, b);
    assert_eq!(vertex_hash(&a), vertex_hash(&b));
}

#[test]
fn nan_is_never_equal() {
    let a = VertexPositionTexture::new(Vec3::new(f32::NAN, 0.0, 0.0), Vec2::ZERO);
    assert_ne!(a, a);
}

#[test]
fn unknown_vertex_type() {
    assert_eq!(
        declaration_for::<UnregisteredVertex>(),
        Err(UnknownVertexType {
            name: String::from("UnregisteredVertex")
        })
    );

    let registry = VertexDeclarationRegistry::new();
    assert!(registry.is_empty());
    assert!(registry.declaration_for::<VertexPositionTexture>().is_err());
    assert!(registry
        .declaration_for_id(VertexTypeId::of::<VertexPositionColor>())
        .is_err());
    assert!(registry.declaration_by_name("VertexPositionColor").is_err());
}

#[test]
fn lookup_by_runtime_tag() {
    let registry = VertexDeclarationRegistry::with_builtin();
    assert_eq!(registry.len(), 4);
    assert_eq!(
        registry.names(),
        vec![
            "VertexPositionColor",
            "VertexPositionColorTexture",
            "VertexPositionNormalTexture",
            "VertexPositionTexture",
        ]
    );

    let by_type = registry.declaration_for::<VertexPositionColor>().unwrap();
    let by_id = registry
        .declaration_for_id(VertexTypeId::of::<VertexPositionColor>())
        .unwrap();
    let by_name = registry.declaration_by_name("VertexPositionColor").unwrap();
    assert!(by_type.ptr_eq(&by_id));
    assert!(by_type.ptr_eq(&by_name));

    assert_eq!(
        registry.declaration_by_name("VertexPositionColour"),
        Err(UnknownVertexType {
            name: String::from("VertexPositionColour")
        })
    );
}

#[test]
fn registration() {
    let registry = VertexDeclarationRegistry::new();

    let id = registry.register::<VertexPositionTexture>().unwrap();
    assert_eq!(id.name(), "VertexPositionTexture");
    assert!(registry.is_registered::<VertexPositionTexture>());

    // Registering twice is harmless.
    assert_eq!(registry.register::<VertexPositionTexture>(), Ok(id));
    assert_eq!(registry.len(), 1);

    assert!(matches!(
        registry.register::<ImpostorVertex>(),
        Err(RegisterError::NameTaken {
            name: "VertexPositionTexture",
            ..
        })
    ));
    assert!(!registry.is_registered::<ImpostorVertex>());

    // The name still resolves to the first type.
    let by_name = registry.declaration_by_name("VertexPositionTexture").unwrap();
    assert_eq!(by_name.len(), 2);

    // The compile-time path still works for the impostor, only its name is unavailable.
    let impostor = registry.get_or_register::<ImpostorVertex>();
    assert_eq!(impostor.len(), 1);
    assert!(registry.is_registered::<ImpostorVertex>());
    assert_eq!(registry.len(), 2);
}

#[test]
fn get_or_register() {
    let registry = VertexDeclarationRegistry::new();
    assert!(registry.declaration_for::<UnregisteredVertex>().is_err());

    let declaration = registry.get_or_register::<UnregisteredVertex>();
    assert_eq!(declaration.len(), 1);
    assert!(registry
        .declaration_for::<UnregisteredVertex>()
        .unwrap()
        .ptr_eq(&declaration));
    assert!(registry.declaration_by_name("UnregisteredVertex").is_ok());
}

#[test]
fn concurrent_first_access_builds_once() {
    const THREADS: usize = 8;

    let registry = VertexDeclarationRegistry::new();
    registry.register::<CountedVertex>().unwrap();
    assert_eq!(COUNTED_BUILDS.load(Ordering::SeqCst), 0);

    let barrier = Barrier::new(THREADS);
    let declarations: Vec<VertexDeclaration> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                s.spawn(|| {
                    barrier.wait();
                    registry.declaration_for::<CountedVertex>().unwrap()
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    assert_eq!(COUNTED_BUILDS.load(Ordering::SeqCst), 1);
    assert_eq!(declarations[0].len(), 2);
    for declaration in &declarations {
        assert!(declaration.ptr_eq(&declarations[0]));
    }
}

#[test]
fn concurrent_first_access_registers_once() {
    const THREADS: usize = 8;

    let registry = VertexDeclarationRegistry::new();
    let barrier = Barrier::new(THREADS);
    let declarations: Vec<VertexDeclaration> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                s.spawn(|| {
                    barrier.wait();
                    registry.get_or_register::<LazyVertex>()
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    assert_eq!(LAZY_BUILDS.load(Ordering::SeqCst), 1);
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.names(), vec!["LazyVertex"]);
    for declaration in &declarations {
        assert!(declaration.ptr_eq(&declarations[0]));
    }
    assert!(registry
        .declaration_for::<LazyVertex>()
        .unwrap()
        .ptr_eq(&declarations[0]));
}

#[test]
fn far_offsets_saturate() {
    let registry = VertexDeclarationRegistry::new();
    registry.register::<FarOffsetVertex>().unwrap();

    let declaration = registry.declaration_for::<FarOffsetVertex>().unwrap();
    assert_eq!(declaration.resolved_offsets(), vec![u32::MAX - 3, u32::MAX]);
    assert_eq!(declaration.stride(0), u32::MAX);

    // Later lookups still succeed.
    assert!(registry
        .declaration_for::<FarOffsetVertex>()
        .unwrap()
        .ptr_eq(&declaration));

    let ctx = null_context(FeatureLevel::Level11_0);
    let err = declaration.create_input_layout(ctx.clone(), None).err().unwrap();
    assert!(matches!(
        err,
        InvalidLayoutError::OffsetOutOfRange {
            index: 0,
            end: u32::MAX,
            ..
        }
    ));
    assert_eq!(ctx.backend().live_objects(), 0);
}

#[test]
fn multi_stream_offsets() {
    let declaration = VertexDeclaration::new(vec![
        InputElement::new("POSITION", 0, VertexFormat::Float32x3, 0),
        InputElement::new("NORMAL", 0, VertexFormat::Snorm16x4, 0),
        InputElement::new("TEXCOORD", 0, VertexFormat::Float16x2, 1),
        InputElement::new("TEXCOORD", 1, VertexFormat::Float32x4, 2).per_instance(1),
        InputElement::new("TEXCOORD", 2, VertexFormat::Float32x4, 2)
            .with_offset(32)
            .per_instance(1),
        InputElement::new("COLOR", 0, VertexFormat::Unorm8x4, 2).per_instance(1),
    ]);

    assert_eq!(declaration.resolved_offsets(), vec![0, 12, 0, 0, 32, 48]);
    assert_eq!(declaration.stride(0), 20);
    assert_eq!(declaration.stride(1), 4);
    assert_eq!(declaration.stride(2), 52);
    assert_eq!(declaration.stride(3), 0);
    assert_eq!(declaration.slots(), vec![0, 1, 2]);

    let texcoord = declaration.find("texcoord", 2).unwrap();
    assert_eq!(texcoord.offset, Some(32));
    assert!(declaration.find("TEXCOORD", 3).is_none());
}

#[test]
fn bind_declaration_to_device() {
    let ctx = null_context(FeatureLevel::Level11_0);
    let declaration = VertexPositionColorTexture::declaration();

    let layout = declaration
        .create_input_layout(ctx.clone(), Some(String::from("position_color_texture")))
        .unwrap();
    assert_eq!(layout.elements(), declaration.elements());
    assert_eq!(ctx.backend().live_objects(), 1);
}

#[test]
fn bind_declaration_unsupported_by_device() {
    let ctx = null_context(FeatureLevel::Level9_1);
    let declaration = VertexDeclaration::new(CountedVertexElements::elements());

    let err = declaration.create_input_layout(ctx.clone(), None).err().unwrap();
    assert!(matches!(
        err,
        InvalidLayoutError::UnsupportedFormat {
            index: 0,
            format: VertexFormat::Sint32x3,
            ..
        }
    ));
    assert_eq!(ctx.backend().live_objects(), 0);
}

/// Elements of [`CountedVertex`] without touching its build counter.
struct CountedVertexElements;

impl CountedVertexElements {
    fn elements() -> Vec<InputElement> {
        vec![
            InputElement::new("POSITION", 0, VertexFormat::Sint32x3, 0),
            InputElement::new("BLENDINDICES", 0, VertexFormat::Uint32, 0),
        ]
    }
}

#[test]
fn vertex_display() {
    let vertex = VertexPositionTexture::new(Vec3::new(1.0, 2.0, 3.0), Vec2::new(0.0, 1.0));
    assert_eq!(vertex.to_string(), "Position: [1, 2, 3], Texcoord: [0, 1]");

    let vertex = VertexPositionColor::new(Vec3::ZERO, Color::new(255, 128, 0, 255));
    assert_eq!(vertex.to_string(), "Position: [0, 0, 0], Color: #FF8000FF");
}

#[test]
fn vertex_bytes() {
    let vertices = [
        VertexPositionColor::new(Vec3::new(1.0, 0.0, 0.0), Color::WHITE),
        VertexPositionColor::new(Vec3::new(0.0, 1.0, 0.0), Color::BLACK),
    ];
    let bytes: &[u8] = bytemuck::cast_slice(&vertices);

    assert_eq!(bytes.len(), 32);
    assert_eq!(&bytes[0..4], &1.0_f32.to_ne_bytes());
    assert_eq!(&bytes[12..16], &[255, 255, 255, 255]);
    assert_eq!(&bytes[28..32], &[0, 0, 0, 255]);
}

#[test]
fn color_conversions() {
    assert_eq!(Color::from_vec4(Vec4::new(1.0, 0.5, 0.0, 1.0)), Color::new(255, 128, 0, 255));
    assert_eq!(Color::from_vec4(Vec4::new(2.0, -1.0, 0.0, 1.0)), Color::RED);
    assert_eq!(Color::BLUE.to_vec4(), Vec4::new(0.0, 0.0, 1.0, 1.0));
    assert_eq!(Color::from([1, 2, 3, 4]).to_array(), [1, 2, 3, 4]);
    assert_eq!(<[u8; 4]>::from(Color::GREEN), [0, 255, 0, 255]);
}
