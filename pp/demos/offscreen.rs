//! Renders one frame of a gradient through the VHS pass without a window and
//! reports how much the image changed.
//!
//! `--fallback` asks for the software adapter, `--low-power` for the
//! integrated one. `WGPU_BACKEND` picks the backends, e.g. `vulkan` or `gl`.

use std::sync::Arc;

use postfx::prelude::*;
use postfx::BoxError;
use postfx_vhs::{VhsMaterialProvider, VhsMaterials, VhsRendererFeature, VhsSettings};

const WIDTH: u32 = 256;
const HEIGHT: u32 = 256;

fn gradient() -> Vec<u8> {
    (0..HEIGHT)
        .flat_map(|y| (0..WIDTH).map(move |x| (x, y)))
        .flat_map(|(x, y)| [x as u8, y as u8, 128, 255])
        .collect()
}

fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt::init();

    let mut builder = Gpu::builder().with_label("VHS offscreen");
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--fallback" => builder = builder.with_fallback_adapter(),
            "--low-power" => {
                builder = builder.with_power_preference(postfx::wgpu::PowerPreference::LowPower)
            }
            other => return Err(format!("unknown argument `{}`", other).into()),
        }
    }
    if let Some(backends) = postfx::wgpu::util::backend_bits_from_env() {
        builder = builder.with_backends(backends);
    }
    let gpu = builder.build_headless()?;
    let mut context = GpuRenderContext::new(&gpu);
    let desc = TargetDescriptor::new(WIDTH, HEIGHT, TextureFormat::Rgba8Unorm).with_depth_bits(24);
    let input = gradient();
    context.create_camera_target(0, &desc).write(&input);

    let shader = Shader::from_wgsl("vhs", include_str!("shader/vhs.wgsl"));
    let resources = Resources::new().with(
        VhsMaterials::ASSET_NAME,
        VhsMaterials::from_shader(Arc::new(shader)),
    );
    let provider = Arc::new(VhsMaterialProvider::new(Arc::new(resources)));

    let mut renderer = Renderer::new();
    renderer.add_feature(Box::new(VhsRendererFeature::new(provider)));

    let mut volumes = VolumeManager::new();
    volumes.register::<VhsSettings>();
    volumes.add_volume(Volume::new(
        "global",
        VolumeProfile::new().with(VhsSettings::new(0.5, Color::CYAN)),
    ));
    let stack = volumes.create_stack();

    let data = RenderingData::new(CameraData::game(0, desc), &stack);
    renderer.render_frame(&mut context, &[data])?;

    let output = context
        .camera_target(0)
        .ok_or("camera target disappeared")?
        .read_immediately()?;
    let changed = input
        .chunks_exact(4)
        .zip(output.chunks_exact(4))
        .filter(|(a, b)| a != b)
        .count();
    println!(
        "{} of {} pixels changed, pool holds {} free targets",
        changed,
        WIDTH * HEIGHT,
        context.pool().free_count()
    );
    Ok(())
}
