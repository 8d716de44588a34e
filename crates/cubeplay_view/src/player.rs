use cubeplay_core::{ChangeNotifier, CubeState, ListenerId, RotationEngine, TwistEngine};
use cubeplay_notation::{Move, MoveSequence, parse_move};
use cubeplay_prefs::{PlaybackPreferences, PlaybackSpeed};
use web_time::{Duration, Instant};

use crate::{
    AnimationError, Clock, FrameTimer, PlaybackState, PlayerError, PlayerEvent, SystemClock,
};

/// Replays a move sequence against a private copy of a cube state.
///
/// The player never touches a [`cubeplay_core::CubeModel`]; it only reports
/// snapshots to its listeners. Timed playback is driven by calling
/// [`Self::update()`] once per frame.
///
/// Listeners must not call back into the player.
#[derive(Debug)]
pub struct MoveSequencePlayer {
    prefs: PlaybackPreferences,
    clock: Box<dyn Clock>,
    engine: Box<dyn TwistEngine>,

    /// Moves for the current session.
    moves: MoveSequence,
    /// Cube state at the start of the session.
    original: CubeState,
    /// Cube state after the first `index` moves.
    virtual_cube: CubeState,
    /// Number of moves applied to `virtual_cube`.
    index: usize,

    state: PlaybackState,
    speed: PlaybackSpeed,
    error: Option<AnimationError>,
    closed: bool,

    /// Outstanding playback tick.
    timer: FrameTimer,
    /// Time of the last control call that was not debounced.
    last_control: Option<Instant>,

    notifier: ChangeNotifier<PlayerEvent>,
}

impl MoveSequencePlayer {
    /// Constructs an idle player using the wall clock and the standard rotation
    /// engine.
    pub fn new(prefs: &PlaybackPreferences) -> Self {
        Self {
            prefs: prefs.clone(),
            clock: Box::new(SystemClock),
            engine: Box::new(RotationEngine),

            moves: MoveSequence::new(),
            original: CubeState::SOLVED,
            virtual_cube: CubeState::SOLVED,
            index: 0,

            state: PlaybackState::Idle,
            speed: prefs.default_speed,
            error: None,
            closed: false,

            timer: FrameTimer::new(),
            last_control: None,

            notifier: ChangeNotifier::new(),
        }
    }
    /// Replaces the clock used for scheduling and debouncing.
    #[must_use]
    pub fn with_clock(mut self, clock: impl 'static + Clock) -> Self {
        self.clock = Box::new(clock);
        self
    }
    /// Replaces the engine used to apply moves.
    #[must_use]
    pub fn with_engine(mut self, engine: impl 'static + TwistEngine) -> Self {
        self.engine = Box::new(engine);
        self
    }

    /// Registers a listener for player events.
    pub fn add_listener(
        &self,
        listener: impl 'static + Fn(&PlayerEvent) -> eyre::Result<()>,
    ) -> ListenerId {
        self.notifier.add(listener)
    }
    /// Removes a listener. Returns `false` if it was not registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.notifier.remove(id)
    }

    /// Starts a session from move tokens and a cube string.
    ///
    /// Every token and the cube string are checked before anything changes; on
    /// error the player is left exactly as it was.
    pub fn start<S: AsRef<str>>(&mut self, moves: &[S], cube: &str) -> Result<(), PlayerError> {
        if self.closed {
            return Err(PlayerError::Closed);
        }
        let moves = moves
            .iter()
            .map(|token| parse_move(token.as_ref()))
            .collect::<Result<MoveSequence, _>>()?;
        // Parsing checks every invariant and logs warnings.
        let cube = cube.parse::<CubeState>()?;
        self.begin_session(moves, cube);
        Ok(())
    }

    /// Starts a session from an already-parsed move sequence.
    pub fn start_with(&mut self, moves: MoveSequence, cube: CubeState) -> Result<(), PlayerError> {
        if self.closed {
            return Err(PlayerError::Closed);
        }
        let report = cube.validate();
        report.ensure_valid()?;
        for warning in &report.warnings {
            log::warn!("{warning}");
        }
        self.begin_session(moves, cube);
        Ok(())
    }

    fn begin_session(&mut self, moves: MoveSequence, cube: CubeState) {
        self.cancel_tick();
        log::debug!("starting session with {} moves from {cube}", moves.len());
        self.moves = moves;
        self.original = cube;
        self.virtual_cube = cube;
        self.index = 0;
        self.error = None;
        self.last_control = None;
        self.notifier.notify(PlayerEvent::SessionStarted {
            cube,
            len: self.moves.len(),
        });
        self.set_state(PlaybackState::Paused);
    }

    /// Starts timed playback. Returns whether the call had any effect.
    pub fn play(&mut self) -> bool {
        if !self.accept_control("play") {
            return false;
        }
        if self.has_error()
            || self.index >= self.moves.len()
            || self.state == PlaybackState::Playing
        {
            return false;
        }
        self.set_state(PlaybackState::Playing);
        self.schedule_tick();
        true
    }

    /// Stops timed playback. Returns whether the call had any effect.
    pub fn pause(&mut self) -> bool {
        if !self.accept_control("pause") {
            return false;
        }
        self.pause_playback()
    }

    /// Applies the next move. Returns whether the call had any effect.
    pub fn step_forward(&mut self) -> bool {
        if !self.accept_control("step_forward") {
            return false;
        }
        self.pause_playback();
        if self.has_error() || self.index >= self.moves.len() {
            return false;
        }
        if let Err(e) = self.apply_next_move() {
            self.fail(e);
            return false;
        }
        if self.index == self.moves.len() {
            self.set_state(PlaybackState::Completed);
        }
        true
    }

    /// Undoes the last applied move by replaying every earlier move from the
    /// starting state. Returns whether the call had any effect.
    pub fn step_backward(&mut self) -> bool {
        if !self.accept_control("step_backward") {
            return false;
        }
        self.pause_playback();
        if self.has_error() || self.index == 0 {
            return false;
        }

        let new_index = self.index - 1;
        let rebuilt = self.moves.iter().take(new_index).enumerate().try_fold(
            self.original,
            |cube, (index, mv)| {
                self.engine
                    .twist(&cube, mv)
                    .map_err(|source| AnimationError { index, mv, source })
            },
        );
        let cube = match rebuilt {
            Ok(cube) => cube,
            Err(e) => {
                // `index` is unchanged, so the session stays at the last good
                // state.
                self.fail(e);
                return false;
            }
        };

        self.virtual_cube = cube;
        self.index = new_index;
        log::debug!("stepped back to move {new_index}");
        self.notifier.notify(PlayerEvent::SteppedBack {
            index: new_index,
            cube,
        });
        if self.state == PlaybackState::Completed {
            self.set_state(PlaybackState::Paused);
        }
        true
    }

    /// Rewinds to the starting state and clears any error. Returns whether the
    /// call had any effect.
    pub fn reset(&mut self) -> bool {
        if !self.accept_control("reset") {
            return false;
        }
        if self.state == PlaybackState::Idle {
            return false;
        }
        self.cancel_tick();
        self.index = 0;
        self.virtual_cube = self.original;
        self.error = None;
        self.notifier.notify(PlayerEvent::Reset {
            cube: self.original,
        });
        self.set_state(PlaybackState::Paused);
        true
    }

    /// Changes the playback speed. If playing, the pending tick is rescheduled
    /// using the new speed.
    pub fn set_speed(&mut self, speed: PlaybackSpeed) {
        if self.closed || self.speed == speed {
            return;
        }
        self.speed = speed;
        log::debug!("playback speed set to {speed}");
        self.notifier.notify(PlayerEvent::SpeedChanged { speed });
        if self.state == PlaybackState::Playing {
            self.schedule_tick();
        }
    }

    /// Stops playback and ends the session. Every later call is a no-op.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.cancel_tick();
        self.closed = true;
        log::debug!("player closed");
        self.notifier.notify(PlayerEvent::Closed);
        self.notifier.clear();
    }

    /// Fires the playback tick if it is due. Returns whether playback is still
    /// running, in which case this should be called again next frame.
    pub fn update(&mut self) -> bool {
        if self.closed {
            return false;
        }
        let now = self.clock.now();
        if self.timer.poll(now).is_some() {
            self.on_tick();
        }
        self.state == PlaybackState::Playing
    }

    fn on_tick(&mut self) {
        // Pause may have raced the timer.
        if self.state != PlaybackState::Playing {
            return;
        }
        if let Err(e) = self.apply_next_move() {
            self.fail(e);
        } else if self.index < self.moves.len() {
            self.schedule_tick();
        } else {
            self.set_state(PlaybackState::Completed);
        }
    }

    fn apply_next_move(&mut self) -> Result<(), AnimationError> {
        let index = self.index;
        let Some(mv) = self.moves.get(index) else {
            return Ok(());
        };
        self.virtual_cube = self
            .engine
            .twist(&self.virtual_cube, mv)
            .map_err(|source| AnimationError { index, mv, source })?;
        self.index += 1;
        log::debug!("applied move {index} ({mv})");
        self.notifier.notify(PlayerEvent::Stepped {
            index: self.index,
            mv,
            cube: self.virtual_cube,
        });
        Ok(())
    }

    fn fail(&mut self, error: AnimationError) {
        log::error!("playback stopped: {error}");
        self.cancel_tick();
        let index = error.index;
        let message = error.to_string();
        self.error = Some(error);
        self.set_state(PlaybackState::Paused);
        self.notifier.notify(PlayerEvent::Failed { index, message });
    }

    /// Returns `false` if the player is closed or the call arrived too soon
    /// after the previous accepted control call.
    fn accept_control(&mut self, name: &str) -> bool {
        if self.closed {
            return false;
        }
        let now = self.clock.now();
        if let Some(last) = self.last_control
            && now.saturating_duration_since(last) < self.prefs.debounce_window()
        {
            log::trace!("ignoring {name}; too soon after previous control");
            return false;
        }
        self.last_control = Some(now);
        true
    }

    fn pause_playback(&mut self) -> bool {
        self.cancel_tick();
        if self.state == PlaybackState::Playing {
            self.set_state(PlaybackState::Paused);
            true
        } else {
            false
        }
    }

    fn schedule_tick(&mut self) {
        let delay = self.step_duration();
        self.timer.schedule(self.clock.now(), delay);
    }
    fn cancel_tick(&mut self) {
        self.timer.cancel();
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            log::debug!("playback state {} -> {state}", self.state);
            self.state = state;
            self.notifier.notify(PlayerEvent::StateChanged { state });
        }
    }

    /// Returns the playback state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }
    /// Returns whether a move failed to apply. Only [`Self::reset()`] clears
    /// this.
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
    /// Returns the error that stopped playback, if any.
    pub fn last_error(&self) -> Option<&AnimationError> {
        self.error.as_ref()
    }
    /// Returns whether [`Self::close()`] has been called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Returns the number of moves applied so far.
    pub fn index(&self) -> usize {
        self.index
    }
    /// Returns the number of moves in the session.
    pub fn len(&self) -> usize {
        self.moves.len()
    }
    /// Returns whether the session has no moves.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
    /// Returns the fraction of moves applied, from 0.0 to 1.0.
    pub fn progress(&self) -> f32 {
        if self.moves.is_empty() {
            1.0
        } else {
            self.index as f32 / self.moves.len() as f32
        }
    }

    /// Returns the cube state after the applied moves.
    pub fn cube(&self) -> CubeState {
        self.virtual_cube
    }
    /// Returns the cube state at the start of the session.
    pub fn original(&self) -> CubeState {
        self.original
    }
    /// Returns the moves in the session.
    pub fn moves(&self) -> &MoveSequence {
        &self.moves
    }
    /// Returns the most recently applied move.
    pub fn last_move(&self) -> Option<Move> {
        self.moves.get(self.index.checked_sub(1)?)
    }
    /// Returns the move that will be applied next.
    pub fn next_move(&self) -> Option<Move> {
        self.moves.get(self.index)
    }

    /// Returns the playback speed.
    pub fn speed(&self) -> PlaybackSpeed {
        self.speed
    }
    /// Returns the time between steps at the current speed.
    pub fn step_duration(&self) -> Duration {
        self.prefs.step_duration(self.speed)
    }
    /// Returns the time until the next playback tick, or `None` if not
    /// playing.
    pub fn time_until_tick(&self) -> Option<Duration> {
        self.timer.remaining(self.clock.now())
    }
}
