use bytemuck::{Pod, Zeroable};

/// Identifier of a named shader property or render target.
/// Computed from the name with FNV-1a so ids can be built in const context.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyId(pub u32);

impl PropertyId {
    pub const fn from_name(name: &str) -> Self {
        let bytes = name.as_bytes();
        let mut hash: u32 = 0x811c_9dc5;
        let mut i = 0;
        while i < bytes.len() {
            hash ^= bytes[i] as u32;
            hash = hash.wrapping_mul(0x0100_0193);
            i += 1;
        }
        PropertyId(hash)
    }
}

impl From<&str> for PropertyId {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

/// Linear RGBA color, laid out as a WGSL `vec4<f32>`.
#[derive(Pod, Zeroable, Copy, Clone, Debug, PartialEq, Default)]
#[repr(C)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const CYAN: Color = Color::rgba(0.0, 1.0, 1.0, 1.0);
    pub const CLEAR: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Component-wise linear interpolation
    pub fn lerp(self, to: Color, t: f32) -> Color {
        Color {
            r: self.r + (to.r - self.r) * t,
            g: self.g + (to.g - self.g) * t,
            b: self.b + (to.b - self.b) * t,
            a: self.a + (to.a - self.a) * t,
        }
    }

    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PropertyKind {
    Float,
    Color,
}

impl PropertyKind {
    /// Alignment in a WGSL uniform block
    pub const fn align(self) -> u32 {
        match self {
            PropertyKind::Float => 4,
            PropertyKind::Color => 16,
        }
    }

    pub const fn size(self) -> u32 {
        match self {
            PropertyKind::Float => 4,
            PropertyKind::Color => 16,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PropertyValue {
    Float(f32),
    Color(Color),
}

impl PropertyValue {
    pub const fn kind(&self) -> PropertyKind {
        match self {
            PropertyValue::Float(_) => PropertyKind::Float,
            PropertyValue::Color(_) => PropertyKind::Color,
        }
    }

    fn bytes(&self) -> &[u8] {
        match self {
            PropertyValue::Float(v) => bytemuck::bytes_of(v),
            PropertyValue::Color(c) => bytemuck::bytes_of(c),
        }
    }
}

/// Per-draw property values, keyed by id.
/// Values set here take precedence over the material defaults when packed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyBlock {
    values: Vec<(PropertyId, PropertyValue)>,
}

impl PropertyBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, id: PropertyId, value: PropertyValue) {
        match self.values.iter_mut().find(|(key, _)| *key == id) {
            Some((_, slot)) => *slot = value,
            None => self.values.push((id, value)),
        }
    }

    pub fn set_float(&mut self, id: PropertyId, value: f32) {
        self.set(id, PropertyValue::Float(value));
    }

    pub fn set_color(&mut self, id: PropertyId, value: Color) {
        self.set(id, PropertyValue::Color(value));
    }

    pub fn get(&self, id: PropertyId) -> Option<PropertyValue> {
        self.values
            .iter()
            .find(|(key, _)| *key == id)
            .map(|(_, value)| *value)
    }

    pub fn float(&self, id: PropertyId) -> Option<f32> {
        match self.get(id)? {
            PropertyValue::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn color(&self, id: PropertyId) -> Option<Color> {
        match self.get(id)? {
            PropertyValue::Color(c) => Some(c),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayoutEntry {
    pub id: PropertyId,
    pub name: String,
    pub kind: PropertyKind,
    pub offset: u32,
}

/// Uniform block layout of a material, in declaration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyLayout {
    entries: Vec<LayoutEntry>,
    end: u32,
}

impl PropertyLayout {
    pub fn push(&mut self, name: &str, kind: PropertyKind) -> &LayoutEntry {
        let offset = round_up(self.end, kind.align());
        self.end = offset + kind.size();
        self.entries.push(LayoutEntry {
            id: PropertyId::from_name(name),
            name: name.to_string(),
            kind,
            offset,
        });
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[LayoutEntry] {
        &self.entries
    }

    pub fn entry(&self, id: PropertyId) -> Option<&LayoutEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Size of the uniform block in bytes.
    /// Uniform blocks are rounded up to 16 bytes and are never empty.
    pub fn size(&self) -> u32 {
        round_up(self.end, 16).max(16)
    }

    pub(crate) fn write(&self, bytes: &mut [u8], entry: &LayoutEntry, value: &PropertyValue) {
        let offset = entry.offset as usize;
        let src = value.bytes();
        bytes[offset..offset + src.len()].copy_from_slice(src);
    }
}

const fn round_up(value: u32, align: u32) -> u32 {
    (value + align - 1) / align * align
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_ids_are_stable_per_name() {
        const INTENSITY: PropertyId = PropertyId::from_name("_Intensity");
        assert_eq!(INTENSITY, PropertyId::from("_Intensity"));
        assert_ne!(INTENSITY, PropertyId::from_name("_OverlayColor"));
        // FNV-1a of the empty string is the offset basis
        assert_eq!(PropertyId::from_name(""), PropertyId(0x811c_9dc5));
    }

    #[test]
    fn layout_follows_uniform_alignment() {
        let mut layout = PropertyLayout::default();
        assert_eq!(layout.push("_Intensity", PropertyKind::Float).offset, 0);
        assert_eq!(layout.push("_OverlayColor", PropertyKind::Color).offset, 16);
        assert_eq!(layout.push("_Speed", PropertyKind::Float).offset, 32);
        assert_eq!(layout.size(), 48);
        assert_eq!(PropertyLayout::default().size(), 16);
    }

    #[test]
    fn block_overwrites_existing_values() {
        let id = PropertyId::from_name("_Intensity");
        let mut block = PropertyBlock::new();
        block.set_float(id, 0.25);
        block.set_float(id, 0.75);
        assert_eq!(block.len(), 1);
        assert_eq!(block.float(id), Some(0.75));
        assert_eq!(block.color(id), None);
        block.clear();
        assert!(block.is_empty());
    }

    #[test]
    fn color_lerp_hits_endpoints() {
        assert_eq!(Color::BLACK.lerp(Color::WHITE, 0.0), Color::BLACK);
        assert_eq!(Color::BLACK.lerp(Color::WHITE, 1.0), Color::WHITE);
        assert_eq!(Color::BLACK.lerp(Color::WHITE, 0.5).r, 0.5);
    }
}
