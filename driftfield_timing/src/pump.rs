// Copyright 2026 the Driftfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Whether a frame callback wants to run again on the next tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameControl {
    /// Keep the callback scheduled for the next tick.
    Continue,
    /// Drop the callback; it will not run again.
    Stop,
}

/// Identifies a scheduled frame callback for cancellation.
///
/// Handles are never reused within one [`FramePump`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

struct Slot {
    id: u64,
    callback: Box<dyn FnMut(f64) -> FrameControl>,
}

/// A cooperative frame loop with request-animation-frame semantics.
///
/// The pump owns a set of frame callbacks. On every [`FramePump::tick`] each
/// callback runs exactly once, in registration order, receiving the tick's
/// timestamp in milliseconds. A callback stays scheduled by returning
/// [`FrameControl::Continue`] and unschedules itself by returning
/// [`FrameControl::Stop`]; the host can also remove it from outside via
/// [`FramePump::cancel`].
///
/// Loops bounded by physical decay (a glide reaching its stop threshold)
/// express their termination condition as the return value; nothing here
/// uses timeouts.
pub struct FramePump {
    slots: Vec<Slot>,
    next_id: u64,
}

impl FramePump {
    /// Creates an empty pump.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            next_id: 0,
        }
    }

    /// Schedules `callback` to run on every tick until it returns
    /// [`FrameControl::Stop`] or is cancelled.
    ///
    /// Returns a handle usable with [`FramePump::cancel`] and
    /// [`FramePump::is_scheduled`].
    pub fn request<F>(&mut self, callback: F) -> FrameHandle
    where
        F: FnMut(f64) -> FrameControl + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        self.slots.push(Slot {
            id,
            callback: Box::new(callback),
        });
        FrameHandle(id)
    }

    /// Removes a scheduled callback without running it.
    ///
    /// Returns `true` if the handle was still scheduled. Cancelling an
    /// already-finished callback is a no-op.
    pub fn cancel(&mut self, handle: FrameHandle) -> bool {
        let before = self.slots.len();
        self.slots.retain(|slot| slot.id != handle.0);
        self.slots.len() != before
    }

    /// Returns `true` if the handle's callback is still scheduled.
    #[must_use]
    pub fn is_scheduled(&self, handle: FrameHandle) -> bool {
        self.slots.iter().any(|slot| slot.id == handle.0)
    }

    /// Runs every scheduled callback once with the given timestamp.
    ///
    /// Callbacks returning [`FrameControl::Stop`] are dropped before the next
    /// tick. Returns how many callbacks ran.
    pub fn tick(&mut self, now_ms: f64) -> usize {
        let mut ran = 0;
        self.slots.retain_mut(|slot| {
            ran += 1;
            (slot.callback)(now_ms) == FrameControl::Continue
        });
        ran
    }

    /// Number of currently scheduled callbacks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if nothing is scheduled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Default for FramePump {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FramePump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FramePump")
            .field("scheduled", &self.slots.len())
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}
