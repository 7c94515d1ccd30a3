#![allow(clippy::module_name_repetitions)]

mod graphics;
pub use graphics::*;

pub mod assets;
pub mod material;
pub mod renderer;
pub mod volume;

pub mod prelude;

/// Export wgpu crate
pub use wgpu;

pub(crate) mod macros;

pub_const_flag!(
    SCRATCH_TARGET_USAGE,
    wgpu::TextureUsages,
    RENDER_ATTACHMENT,
    TEXTURE_BINDING,
    COPY_SRC,
    COPY_DST
);
