//! Timed, debounced playback of a move sequence against a disposable copy of a
//! cube state.
//!
//! A session moves through [`PlaybackState`]s as the user plays, pauses, and
//! steps. Timing comes from a [`Clock`], so tests can drive playback
//! deterministically with a [`ManualClock`].

mod clock;
mod errors;
mod events;
mod player;
mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use errors::{AnimationError, PlayerError};
pub use events::{PlaybackState, PlayerEvent};
pub use player::MoveSequencePlayer;
pub use timer::{FrameTimer, TimerHandle};

#[cfg(test)]
mod tests;
