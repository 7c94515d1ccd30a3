use std::sync::Arc;

use crate::material::{Material, PropertyBlock, PropertyId};
use crate::{FilterMode, TargetDescriptor};

pub type CameraId = u32;

/// Names a render target inside a command buffer.
/// Temporary targets are named like shader properties and only exist between
/// their `GetTemporaryRt` and `ReleaseTemporaryRt` commands.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RenderTargetId {
    /// The color target of a camera, owned by the host
    Camera(CameraId),
    Temporary(PropertyId),
}

impl RenderTargetId {
    pub const fn temporary(name: &str) -> Self {
        RenderTargetId::Temporary(PropertyId::from_name(name))
    }

    pub const fn is_temporary(&self) -> bool {
        matches!(self, RenderTargetId::Temporary(_))
    }
}

/// Shader state of a material blit, captured when the blit is recorded.
#[derive(Clone, Debug)]
pub struct MaterialBlit {
    pub material: Arc<Material>,
    pub properties: PropertyBlock,
    pub pass: u32,
}

#[derive(Clone, Debug)]
pub enum Command {
    GetTemporaryRt {
        id: RenderTargetId,
        desc: TargetDescriptor,
        filter: FilterMode,
    },
    ReleaseTemporaryRt {
        id: RenderTargetId,
    },
    /// Full-screen copy of `source` into `dest`, through `material` when set.
    Blit {
        source: RenderTargetId,
        dest: RenderTargetId,
        material: Option<MaterialBlit>,
    },
}

/// An ordered list of rendering commands.
/// Nothing happens until the buffer is handed to a [`RenderContext`](super::RenderContext).
#[derive(Clone, Debug)]
pub struct CommandBuffer {
    name: String,
    commands: Vec<Command>,
}

impl CommandBuffer {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            commands: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get_temporary_rt(
        &mut self,
        id: RenderTargetId,
        desc: TargetDescriptor,
        filter: FilterMode,
    ) {
        self.commands
            .push(Command::GetTemporaryRt { id, desc, filter });
    }

    pub fn release_temporary_rt(&mut self, id: RenderTargetId) {
        self.commands.push(Command::ReleaseTemporaryRt { id });
    }

    pub fn blit(&mut self, source: RenderTargetId, dest: RenderTargetId) {
        self.commands.push(Command::Blit {
            source,
            dest,
            material: None,
        });
    }

    /// Blit through `material`, snapshotting `properties` as they are now.
    pub fn blit_material(
        &mut self,
        source: RenderTargetId,
        dest: RenderTargetId,
        material: &Arc<Material>,
        properties: &PropertyBlock,
        pass: u32,
    ) {
        self.commands.push(Command::Blit {
            source,
            dest,
            material: Some(MaterialBlit {
                material: Arc::clone(material),
                properties: properties.clone(),
                pass,
            }),
        });
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Take every recorded command, leaving the buffer empty for reuse.
    pub fn drain(&mut self) -> std::vec::Drain<'_, Command> {
        self.commands.drain(..)
    }
}
