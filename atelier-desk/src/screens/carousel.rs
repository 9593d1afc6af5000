//! Featured-model carousel
//!
//! Shows [`ITEMS_PER_VIEW`] images at a time and advances one image per tick.
//! After the last full window it wraps back to the first image.

use std::time::Duration;

pub const ITEMS_PER_VIEW: usize = 4;

/// Delay between two automatic ticks
pub const TICK_INTERVAL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Carousel {
    images: Vec<String>,
    /// Index of the first visible image
    index: usize,
}

impl Carousel {
    pub fn new(images: Vec<String>) -> Self {
        Self { images, index: 0 }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Enough images to scroll at all
    pub fn scrolls(&self) -> bool {
        self.images.len() > ITEMS_PER_VIEW
    }

    fn max_index(&self) -> usize {
        self.images.len().saturating_sub(ITEMS_PER_VIEW)
    }

    pub fn tick(&mut self) {
        if !self.scrolls() {
            return;
        }
        self.index = if self.index >= self.max_index() { 0 } else { self.index + 1 };
    }

    pub fn visible(&self) -> &[String] {
        let end = (self.index + ITEMS_PER_VIEW).min(self.images.len());
        &self.images[self.index.min(end)..end]
    }

    /// Number of navigation dots
    pub fn page_count(&self) -> usize {
        self.images.len().div_ceil(ITEMS_PER_VIEW)
    }

    pub fn active_dot(&self) -> usize {
        self.index / ITEMS_PER_VIEW
    }
}
