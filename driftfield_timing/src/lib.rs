// Copyright 2026 the Driftfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Driftfield Timing: frame scheduling and clock capabilities.
//!
//! Driftfield's animation code never reads wall-clock time or schedules
//! platform callbacks on its own. Instead it is written against two small
//! capabilities provided by this crate:
//!
//! - [`Clock`]: a source of monotonic timestamps in milliseconds. Hosts use
//!   [`StdClock`]; tests use [`ManualClock`] and advance it by hand.
//! - [`FramePump`]: a cooperative frame loop with request-animation-frame
//!   semantics. Callbacks are one-shot per tick and stay scheduled by
//!   returning [`FrameControl::Continue`]; cancellation is explicit via the
//!   handle returned at registration.
//!
//! Several independent loops can coexist on one pump (driftfield runs the
//! flow-field simulation and the momentum glide as two registrations); the
//! host calls [`FramePump::tick`] once per display frame with the current
//! timestamp.
//!
//! ## Example
//!
//! ```rust
//! use driftfield_timing::{Clock, FrameControl, FramePump, ManualClock};
//!
//! let clock = ManualClock::new(0.0);
//! let mut pump = FramePump::new();
//!
//! let mut frames = 0;
//! // Not shared here for brevity; real callbacks close over shared state.
//! let handle = pump.request(move |_now| {
//!     frames += 1;
//!     if frames < 3 {
//!         FrameControl::Continue
//!     } else {
//!         FrameControl::Stop
//!     }
//! });
//!
//! while !pump.is_empty() {
//!     clock.advance(16.0);
//!     pump.tick(clock.now_ms());
//! }
//! assert!(!pump.is_scheduled(handle));
//! ```

mod clock;
mod pump;

pub use clock::{Clock, ManualClock, StdClock};
pub use pump::{FrameControl, FrameHandle, FramePump};
