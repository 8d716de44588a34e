use cubeplay_core::CubeState;
use cubeplay_notation::Move;
use cubeplay_prefs::PlaybackSpeed;

/// Playback state of a [`crate::MoveSequencePlayer`].
///
/// A session that hit an error additionally carries an error flag; see
/// [`crate::MoveSequencePlayer::has_error()`].
#[derive(strum::Display, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum PlaybackState {
    /// No session has been started.
    #[default]
    Idle,
    /// Session is stopped partway through.
    Paused,
    /// Session is advancing on a timer.
    Playing,
    /// Every move has been applied.
    Completed,
}

/// Change to a [`crate::MoveSequencePlayer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    /// A new session was started.
    SessionStarted {
        /// Starting cube state.
        cube: CubeState,
        /// Number of moves in the session.
        len: usize,
    },
    /// One move was applied, either by the timer or by a step.
    Stepped {
        /// Number of moves applied so far.
        index: usize,
        /// Move that was applied.
        mv: Move,
        /// Cube state after the move.
        cube: CubeState,
    },
    /// The last applied move was undone.
    SteppedBack {
        /// Number of moves applied so far.
        index: usize,
        /// Cube state after undoing the move.
        cube: CubeState,
    },
    /// The session was rewound to its starting state.
    Reset {
        /// Starting cube state.
        cube: CubeState,
    },
    /// The playback state changed.
    StateChanged {
        /// New state.
        state: PlaybackState,
    },
    /// A move could not be applied and playback stopped.
    Failed {
        /// Index of the move that failed.
        index: usize,
        /// Error message.
        message: String,
    },
    /// The playback speed changed.
    SpeedChanged {
        /// New speed.
        speed: PlaybackSpeed,
    },
    /// The player was closed.
    Closed,
}
