use std::ops::Range;

/// Fixed-capacity point storage with a visible prefix.
///
/// Every entry stays allocated for the lifetime of the arena; only the
/// number of entries handed to the GPU (`visible`) changes. Entries are
/// never reordered or removed individually.
#[derive(Clone, Debug)]
pub struct PointArena<T> {
    items: Vec<T>,
    visible: usize,
}

impl<T> PointArena<T> {
    pub fn new(items: Vec<T>, visible: usize) -> Self {
        let visible = visible.min(items.len());
        Self { items, visible }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn visible(&self) -> usize {
        self.visible
    }

    /// Set the visible prefix length, clamped to capacity. Returns the applied value.
    pub fn set_visible(&mut self, count: usize) -> usize {
        self.visible = count.min(self.items.len());
        self.visible
    }

    /// Instance range to draw.
    #[inline]
    pub fn draw_range(&self) -> Range<u32> {
        0..self.visible as u32
    }

    #[inline]
    pub fn all(&self) -> &[T] {
        &self.items
    }

    #[inline]
    pub fn all_mut(&mut self) -> &mut [T] {
        &mut self.items
    }

    #[inline]
    pub fn visible_slice(&self) -> &[T] {
        &self.items[..self.visible]
    }
}
