//! Everything a post-processing effect needs, in one import.

pub use crate::assets::{Asset, AssetSource, Resources};
pub use crate::material::{Color, Material, PropertyBlock, PropertyId, Shader};
pub use crate::renderer::{
    CameraData, CameraType, CommandBuffer, FramePass, PassQueue, RenderContext, RenderPassEvent,
    RenderTargetId, Renderer, RendererFeature, RenderingData,
};
pub use crate::volume::{
    ClampedFloatParameter, NoInterpColorParameter, PostProcessComponent, Volume, VolumeComponent,
    VolumeManager, VolumeParameter, VolumeProfile, VolumeStack,
};
pub use crate::{FilterMode, Gpu, GpuError, GpuHandle, GpuRenderContext, TargetDescriptor, TextureFormat};
