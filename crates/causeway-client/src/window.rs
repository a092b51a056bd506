// SPDX-License-Identifier: Apache-2.0

use std::ops::RangeInclusive;

pub const DEFAULT_BUFFER: usize = 2;
pub const DEFAULT_PREFETCH_THRESHOLD: usize = 2;

/// Media lifecycle seam. The embedder owns the actual players; the window
/// tells it when exactly one item should be playing and which item to warm
/// up next. `hint_preload` is advisory: failures are the embedder's to
/// swallow.
pub trait PlaybackController {
    /// Start playback of `index` from position zero.
    fn play_from_start(&mut self, index: usize);
    /// Pause playback of `index`, keeping whatever is on screen.
    fn pause(&mut self, index: usize);
    /// Non-blocking hint that `index` will likely become active next.
    fn hint_preload(&mut self, index: usize);
}

/// Fixed-buffer windowing around the active entry.
///
/// Items are uniform-height panels, so mounting is decided purely by index
/// distance: the active item plus `buffer` neighbors on each side are live,
/// everything else renders as an inert placeholder of the same height.
#[derive(Debug, Clone)]
pub struct FeedWindow {
    buffer: usize,
    prefetch_threshold: usize,
    active_index: usize,
    activated: bool,
    media_failed: bool,
}

impl Default for FeedWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedWindow {
    #[must_use]
    pub fn new() -> Self {
        Self::with_buffer(DEFAULT_BUFFER, DEFAULT_PREFETCH_THRESHOLD)
    }

    #[must_use]
    pub fn with_buffer(buffer: usize, prefetch_threshold: usize) -> Self {
        Self {
            buffer,
            prefetch_threshold,
            active_index: 0,
            activated: false,
            media_failed: false,
        }
    }

    #[must_use]
    pub const fn active_index(&self) -> usize {
        self.active_index
    }

    #[must_use]
    pub const fn media_failed(&self) -> bool {
        self.media_failed
    }

    /// Indices that must be fully mounted for a list of `len` items.
    #[must_use]
    pub fn mount_range(&self, len: usize) -> RangeInclusive<usize> {
        if len == 0 {
            #[allow(clippy::reversed_empty_ranges)]
            return 1..=0;
        }
        let low = self.active_index.saturating_sub(self.buffer);
        let high = (self.active_index + self.buffer).min(len - 1);
        low..=high
    }

    #[must_use]
    pub fn is_mounted(&self, index: usize, len: usize) -> bool {
        self.mount_range(len).contains(&index)
    }

    /// Applies a new active index from the embedder's scroll/visibility
    /// signal. The previous item is paused before the new one starts, so at
    /// no instant are two items playing, and activation always restarts
    /// from position zero.
    pub fn set_active_index(
        &mut self,
        index: usize,
        len: usize,
        controller: &mut dyn PlaybackController,
    ) {
        if len == 0 {
            return;
        }
        let index = index.min(len - 1);
        if self.activated && index == self.active_index {
            return;
        }
        if self.activated {
            controller.pause(self.active_index);
        }
        self.active_index = index;
        self.activated = true;
        self.media_failed = false;
        controller.play_from_start(index);
        if index + 1 < len {
            controller.hint_preload(index + 1);
        }
    }

    /// Prefetch trigger: near the tail, more pages exist, nothing in flight.
    #[must_use]
    pub fn should_fetch_next(&self, len: usize, has_next_page: bool, in_flight: bool) -> bool {
        if !has_next_page || in_flight || len == 0 {
            return false;
        }
        self.active_index + self.prefetch_threshold >= len
    }

    /// The active item's media failed to play: freeze on the poster and
    /// wait for an explicit retry. The surrounding list stays mounted.
    pub fn mark_media_failed(&mut self, controller: &mut dyn PlaybackController) {
        if self.activated && !self.media_failed {
            controller.pause(self.active_index);
        }
        self.media_failed = true;
    }

    /// Manual retry affordance: restart the active item from the beginning.
    pub fn retry_media(&mut self, controller: &mut dyn PlaybackController) {
        if !self.activated {
            return;
        }
        self.media_failed = false;
        controller.play_from_start(self.active_index);
    }
}
