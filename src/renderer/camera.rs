use super::command::{CameraId, RenderTargetId};
use crate::volume::VolumeStack;
use crate::TargetDescriptor;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CameraType {
    /// A camera that renders the running game
    Game,
    /// The editor's scene view
    SceneView,
    /// Thumbnail and inspector previews
    Preview,
    Reflection,
}

#[derive(Clone, Debug)]
pub struct CameraData {
    pub id: CameraId,
    pub camera_type: CameraType,
    /// Describes the camera's color target
    pub target_descriptor: TargetDescriptor,
}

impl CameraData {
    pub fn new(id: CameraId, camera_type: CameraType, target_descriptor: TargetDescriptor) -> Self {
        Self {
            id,
            camera_type,
            target_descriptor,
        }
    }

    pub fn game(id: CameraId, target_descriptor: TargetDescriptor) -> Self {
        Self::new(id, CameraType::Game, target_descriptor)
    }

    pub const fn color_target(&self) -> RenderTargetId {
        RenderTargetId::Camera(self.id)
    }

    pub fn is_scene_view_camera(&self) -> bool {
        self.camera_type == CameraType::SceneView
    }

    pub fn is_preview_camera(&self) -> bool {
        self.camera_type == CameraType::Preview
    }

    /// Editor tooling cameras that post-processing must not touch
    pub fn is_editor_camera(&self) -> bool {
        self.is_scene_view_camera() || self.is_preview_camera()
    }
}

/// Everything a pass may read about the camera currently being rendered.
pub struct RenderingData<'a> {
    pub camera: CameraData,
    /// Volume state resolved for this camera and frame
    pub volume_stack: &'a VolumeStack,
}

impl<'a> RenderingData<'a> {
    pub fn new(camera: CameraData, volume_stack: &'a VolumeStack) -> Self {
        Self {
            camera,
            volume_stack,
        }
    }
}
