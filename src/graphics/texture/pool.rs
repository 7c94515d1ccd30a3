use std::collections::HashMap;

use crate::renderer::RenderTargetId;
use crate::{FilterMode, GpuError, GpuHandle, TargetDescriptor, Texture};

/// A temporary target handed out by the pool.
pub struct PooledTarget {
    pub texture: Texture,
    pub filter: FilterMode,
    key: TargetDescriptor,
}

/// Released items per descriptor, stamped with the frame they were released in.
struct FreeList<T> {
    entries: HashMap<TargetDescriptor, Vec<(T, u64)>>,
}

impl<T> Default for FreeList<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T> FreeList<T> {
    fn push(&mut self, key: TargetDescriptor, item: T, frame: u64) {
        self.entries.entry(key).or_default().push((item, frame));
    }

    fn pop(&mut self, key: &TargetDescriptor) -> Option<T> {
        self.entries
            .get_mut(key)
            .and_then(Vec::pop)
            .map(|(item, _)| item)
    }

    /// Drop every item released before `frame`. Returns how many were dropped.
    fn evict_before(&mut self, frame: u64) -> usize {
        let mut evicted = 0;
        self.entries.retain(|_, items| {
            let before = items.len();
            items.retain(|(_, released)| *released >= frame);
            evicted += before - items.len();
            !items.is_empty()
        });
        evicted
    }

    fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Reuses temporary render targets across frames.
///
/// Released textures are kept per descriptor and handed back out to the next
/// request with the same descriptor, so a steady-state frame allocates nothing.
/// Textures nobody asked for in the last few frames are dropped at
/// [`end_frame`](Self::end_frame), so a resized camera does not keep its old
/// targets alive.
pub struct TexturePool {
    gpu: GpuHandle,
    free: FreeList<Texture>,
    active: HashMap<RenderTargetId, PooledTarget>,
    frame: u64,
    max_idle_frames: u64,
}

impl TexturePool {
    pub const DEFAULT_MAX_IDLE_FRAMES: u64 = 2;

    pub fn new(gpu: GpuHandle) -> Self {
        Self {
            gpu,
            free: FreeList::default(),
            active: HashMap::new(),
            frame: 0,
            max_idle_frames: Self::DEFAULT_MAX_IDLE_FRAMES,
        }
    }

    /// How many whole frames a released texture may go unused before it is dropped.
    pub fn with_max_idle_frames(mut self, frames: u64) -> Self {
        self.max_idle_frames = frames;
        self
    }

    /// Bind a texture matching `desc` to `id` until it is released.
    /// # Errors
    /// `TargetInUse` when `id` was acquired and not yet released.
    pub fn acquire(
        &mut self,
        id: RenderTargetId,
        desc: &TargetDescriptor,
        filter: FilterMode,
    ) -> Result<&PooledTarget, GpuError> {
        if self.active.contains_key(&id) {
            return Err(GpuError::TargetInUse(id));
        }

        // Depth and sample count never reach the allocated color texture
        let key = TargetDescriptor {
            depth_buffer_bits: 0,
            sample_count: 1,
            ..*desc
        };
        let texture = match self.free.pop(&key) {
            Some(texture) => texture,
            None => {
                tracing::debug!(?id, width = key.width, height = key.height, "allocating temporary target");
                Texture::for_target(&self.gpu, "Temporary render target", &key)
            }
        };

        Ok(self.active.entry(id).or_insert(PooledTarget {
            texture,
            filter,
            key,
        }))
    }

    /// Return the texture bound to `id` to the pool.
    /// Returns false when nothing was bound to `id`.
    pub fn release(&mut self, id: RenderTargetId) -> bool {
        match self.active.remove(&id) {
            Some(target) => {
                self.free.push(target.key, target.texture, self.frame);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: RenderTargetId) -> Option<&PooledTarget> {
        self.active.get(&id)
    }

    pub fn active_ids(&self) -> impl Iterator<Item = RenderTargetId> + '_ {
        self.active.keys().copied()
    }

    /// Number of targets currently acquired
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Number of released textures waiting for reuse
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Close the current frame and drop released textures that have been idle
    /// for more than the allowed number of frames.
    pub fn end_frame(&mut self) {
        self.frame += 1;
        let evicted = self
            .free
            .evict_before(self.frame.saturating_sub(self.max_idle_frames));
        if evicted > 0 {
            tracing::debug!(evicted, frame = self.frame, "dropped idle temporary targets");
        }
    }

    /// Drop every released texture.
    pub fn trim(&mut self) {
        self.free.clear();
    }
}
