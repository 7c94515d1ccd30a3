use std::sync::Arc;

use postfx::prelude::*;
use postfx_vhs::{VhsMaterialProvider, VhsMaterials, VhsRendererFeature, VhsSettings};

const SIZE: u32 = 32;

struct Frame {
    context: GpuRenderContext,
    renderer: Renderer,
    desc: TargetDescriptor,
    input: Vec<u32>,
}

fn frame() -> Frame {
    let gpu = Gpu::builder().build_headless().unwrap();
    let mut context = GpuRenderContext::new(&gpu);
    let desc = TargetDescriptor::new(SIZE, SIZE, TextureFormat::Rgba8Unorm);
    let input: Vec<u32> = (0..SIZE * SIZE).map(|i| 0xff_40_80_00 | (i & 0xff)).collect();
    context.create_camera_target(0, &desc).write(&input);

    let shader = Shader::from_wgsl("vhs", include_str!("../demos/shader/vhs.wgsl"));
    let resources = Resources::new().with(
        VhsMaterials::ASSET_NAME,
        VhsMaterials::from_shader(Arc::new(shader)),
    );
    let mut renderer = Renderer::new();
    renderer.add_feature(Box::new(VhsRendererFeature::new(Arc::new(
        VhsMaterialProvider::new(Arc::new(resources)),
    ))));

    Frame {
        context,
        renderer,
        desc,
        input,
    }
}

fn render(frame: &mut Frame, intensity: f32) -> Vec<u8> {
    let mut volumes = VolumeManager::new();
    volumes.register::<VhsSettings>();
    volumes.add_volume(Volume::new(
        "global",
        VolumeProfile::new().with(VhsSettings::new(intensity, Color::rgba(1.0, 0.0, 0.0, 1.0))),
    ));
    let stack = volumes.create_stack();
    let data = RenderingData::new(CameraData::game(0, frame.desc), &stack);
    frame
        .renderer
        .render_frame(&mut frame.context, &[data])
        .unwrap();
    frame.context.camera_target(0).unwrap().read_immediately().unwrap()
}

#[test]
#[ignore = "needs a gpu adapter"]
fn inactive_effect_leaves_pixels_alone() {
    let mut frame = frame();
    let output = render(&mut frame, 0.0);
    assert_eq!(bytemuck::cast_slice::<_, u8>(&frame.input), &output[..]);
    assert_eq!(frame.context.pool().active_count(), 0);
}

#[test]
#[ignore = "needs a gpu adapter"]
fn active_effect_changes_the_camera_target() {
    let mut frame = frame();
    let output = render(&mut frame, 1.0);
    assert_ne!(bytemuck::cast_slice::<_, u8>(&frame.input), &output[..]);
    assert_eq!(frame.context.pool().active_count(), 0);
    assert_eq!(frame.context.pool().free_count(), 2);
}
