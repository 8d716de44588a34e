use std::cell::RefCell;
use std::rc::Rc;

use cubeplay_core::{
    CubeError, CubeState, RotationEngine, RotationError, SOLVED_STRING, TwistEngine, apply_moves,
};
use cubeplay_notation::{Face, InvalidMoveNotation, Move, parse_move, parse_moves};
use cubeplay_prefs::{PlaybackPreferences, PlaybackSpeed};
use pretty_assertions::assert_eq;
use web_time::Duration;

use super::*;

const SEXY_MOVE: [&str; 4] = ["R", "U", "R'", "U'"];
const SCRAMBLE: &str = "R U2 F' D L2 B R' U F2";
const SCRAMBLED: &str = "BDLRURDDFRUFLRFFDURLDUFBLBLBRDFDFBUFRDBULLDRUUBUFBLLBR";

fn new_player() -> (MoveSequencePlayer, ManualClock) {
    let clock = ManualClock::new();
    let player = MoveSequencePlayer::new(&PlaybackPreferences::default()).with_clock(clock.clone());
    (player, clock)
}

fn scramble_tokens() -> Vec<&'static str> {
    SCRAMBLE.split_whitespace().collect()
}

/// Advances the clock past the debounce window.
fn settle(clock: &ManualClock) {
    clock.advance_ms(PlaybackPreferences::default().debounce_ms);
}

fn record_events(player: &MoveSequencePlayer) -> Rc<RefCell<Vec<PlayerEvent>>> {
    let events = Rc::new(RefCell::new(vec![]));
    let events_ref = Rc::clone(&events);
    player.add_listener(move |e| {
        events_ref.borrow_mut().push(e.clone());
        Ok(())
    });
    events
}

/// Runs timed playback until it stops, advancing the clock one step at a time.
fn play_to_end(player: &mut MoveSequencePlayer, clock: &ManualClock) {
    for _ in 0..=player.len() {
        clock.advance(player.step_duration());
        if !player.update() {
            return;
        }
    }
    panic!("playback did not stop");
}

/// Engine that refuses to turn one face.
#[derive(Debug)]
struct JammedFace(Face);
impl TwistEngine for JammedFace {
    fn twist(&self, cube: &CubeState, m: Move) -> Result<CubeState, CubeError> {
        if m.face == self.0 {
            Err(RotationError::UnknownFace(m.face.symbol()).into())
        } else {
            RotationEngine.twist(cube, m)
        }
    }
}

#[test]
fn test_sexy_move_six_times_is_identity() {
    let (mut player, clock) = new_player();
    let moves = SEXY_MOVE.repeat(6);
    player.start(&moves, SOLVED_STRING).unwrap();
    assert_eq!(player.len(), 24);

    for i in 0..24 {
        assert!(player.step_forward());
        assert_eq!(player.index(), i + 1);
        settle(&clock);
    }
    assert!(!player.step_forward());
    assert_eq!(player.state(), PlaybackState::Completed);
    assert_eq!(player.cube().to_string(), SOLVED_STRING);
    assert_eq!(player.progress(), 1.0);
}

#[test]
fn test_step_forward_then_backward_restores_cube() {
    let (mut player, clock) = new_player();
    player.start(&scramble_tokens(), SOLVED_STRING).unwrap();

    for _ in 0..3 {
        player.step_forward();
        settle(&clock);
    }
    let before = player.cube().to_string();
    assert_eq!(player.last_move(), Some(parse_move("F'").unwrap()));
    assert_eq!(player.next_move(), Some(parse_move("D").unwrap()));

    assert!(player.step_forward());
    settle(&clock);
    assert_ne!(player.cube().to_string(), before);
    assert!(player.step_backward());
    assert_eq!(player.cube().to_string(), before);
    assert_eq!(player.index(), 3);

    // The original cube is untouched by stepping.
    assert_eq!(player.original().to_string(), SOLVED_STRING);
}

#[test]
fn test_step_backward_at_start_is_noop() {
    let (mut player, _clock) = new_player();
    player.start(&["R"], SOLVED_STRING).unwrap();
    assert!(!player.step_backward());
    assert_eq!(player.index(), 0);
    assert_eq!(player.last_move(), None);
}

#[test]
fn test_play_matches_stepping() {
    let (mut stepped, clock) = new_player();
    stepped.start(&scramble_tokens(), SOLVED_STRING).unwrap();
    while stepped.step_forward() {
        settle(&clock);
    }

    let (mut played, clock) = new_player();
    played.start(&scramble_tokens(), SOLVED_STRING).unwrap();
    assert!(played.play());
    assert_eq!(played.state(), PlaybackState::Playing);
    play_to_end(&mut played, &clock);

    assert_eq!(played.state(), PlaybackState::Completed);
    assert_eq!(stepped.state(), PlaybackState::Completed);
    assert_eq!(played.cube(), stepped.cube());
    assert_eq!(played.cube().to_string(), SCRAMBLED);
}

#[test]
fn test_ticks_follow_step_duration() {
    let (mut player, clock) = new_player();
    player.start(&SEXY_MOVE, SOLVED_STRING).unwrap();
    player.play();
    assert_eq!(player.time_until_tick(), Some(Duration::from_millis(500)));

    clock.advance_ms(499);
    assert!(player.update());
    assert_eq!(player.index(), 0);
    clock.advance_ms(1);
    assert!(player.update());
    assert_eq!(player.index(), 1);
    assert_eq!(player.time_until_tick(), Some(Duration::from_millis(500)));
}

#[test]
fn test_pause_cancels_pending_tick() {
    let (mut player, clock) = new_player();
    player.start(&SEXY_MOVE, SOLVED_STRING).unwrap();
    player.play();
    clock.advance_ms(300);
    assert!(player.pause());
    assert_eq!(player.state(), PlaybackState::Paused);
    assert_eq!(player.time_until_tick(), None);

    clock.advance_ms(1000);
    assert!(!player.update());
    assert_eq!(player.index(), 0);

    // Resuming waits a full step again.
    assert!(player.play());
    clock.advance_ms(499);
    player.update();
    assert_eq!(player.index(), 0);
    clock.advance_ms(1);
    player.update();
    assert_eq!(player.index(), 1);
}

#[test]
fn test_step_forward_pauses_playback() {
    let (mut player, clock) = new_player();
    player.start(&SEXY_MOVE, SOLVED_STRING).unwrap();
    player.play();
    settle(&clock);
    assert!(player.step_forward());
    assert_eq!(player.state(), PlaybackState::Paused);
    assert_eq!(player.index(), 1);

    clock.advance_ms(1000);
    assert!(!player.update());
    assert_eq!(player.index(), 1);
}

#[test]
fn test_rapid_controls_are_debounced() {
    let (mut player, clock) = new_player();
    player.start(&SEXY_MOVE, SOLVED_STRING).unwrap();

    assert!(player.step_forward());
    assert!(!player.step_forward());
    clock.advance_ms(99);
    assert!(!player.step_forward());
    assert!(!player.reset());
    assert_eq!(player.index(), 1);

    clock.advance_ms(1);
    assert!(player.step_forward());
    assert_eq!(player.index(), 2);

    // Any control counts toward the window.
    clock.advance_ms(100);
    assert!(player.step_backward());
    assert!(!player.play());
    assert_eq!(player.state(), PlaybackState::Paused);
}

#[test]
fn test_malformed_moves_are_rejected() {
    let (mut player, clock) = new_player();
    player.start(&SEXY_MOVE, SOLVED_STRING).unwrap();
    player.step_forward();
    settle(&clock);
    let cube = player.cube();

    let err = player.start(&["R", "X"], SOLVED_STRING).unwrap_err();
    assert_eq!(
        err,
        PlayerError::Cube(CubeError::Notation(InvalidMoveNotation::UnknownFace {
            token: "X".to_owned(),
            face: 'X',
        })),
    );
    let err = player.start(&["R3"], SOLVED_STRING).unwrap_err();
    assert!(matches!(
        err,
        PlayerError::Cube(CubeError::Notation(InvalidMoveNotation::UnknownModifier { .. })),
    ));

    // Session is untouched.
    assert_eq!(player.index(), 1);
    assert_eq!(player.cube(), cube);
    assert_eq!(player.moves().to_string(), "R U R' U'");
    assert_eq!(player.state(), PlaybackState::Paused);
}

#[test]
fn test_invalid_cube_is_rejected() {
    let (mut player, _clock) = new_player();
    let events = record_events(&player);

    let too_short = &SOLVED_STRING[..53];
    let bad_symbol = SOLVED_STRING.replacen('U', "X", 1);
    let uneven = SOLVED_STRING.replacen('U', "R", 1);
    for cube in [too_short, bad_symbol.as_str(), uneven.as_str()] {
        let err = player.start(&SEXY_MOVE, cube).unwrap_err();
        assert!(matches!(err, PlayerError::Cube(CubeError::Validation(_))), "{err}");
    }

    let all_up = CubeState::from_facelets([Face::Up; 54]);
    let err = player.start_with(parse_moves("R").unwrap(), all_up).unwrap_err();
    assert!(matches!(err, PlayerError::Cube(CubeError::Validation(_))));

    assert_eq!(player.state(), PlaybackState::Idle);
    assert!(player.is_empty());
    assert!(events.borrow().is_empty());
}

#[test]
fn test_failed_step_requires_reset() {
    let (player, clock) = new_player();
    let mut player = player.with_engine(JammedFace(Face::Front));
    let events = record_events(&player);
    player.start(&["R", "U", "F", "R"], SOLVED_STRING).unwrap();

    player.play();
    play_to_end(&mut player, &clock);

    // Frozen at the last good state.
    assert!(player.has_error());
    assert_eq!(player.state(), PlaybackState::Paused);
    assert_eq!(player.index(), 2);
    let r_u = apply_moves(&CubeState::SOLVED, parse_moves("R U").unwrap());
    assert_eq!(player.cube(), r_u);
    let error = player.last_error().unwrap();
    assert_eq!(error.index, 2);
    assert_eq!(error.mv, parse_move("F").unwrap());
    assert!(events.borrow().iter().any(|e| matches!(
        e,
        PlayerEvent::Failed { index: 2, message } if message.contains("'F'"),
    )));

    // Only reset is accepted.
    settle(&clock);
    assert!(!player.play());
    settle(&clock);
    assert!(!player.step_forward());
    settle(&clock);
    assert!(!player.step_backward());
    assert_eq!(player.index(), 2);
    settle(&clock);
    assert!(player.reset());
    assert!(!player.has_error());
    assert_eq!(player.last_error(), None);
    assert_eq!(player.index(), 0);
    assert_eq!(player.cube().to_string(), SOLVED_STRING);

    settle(&clock);
    assert!(player.step_forward());
    assert_eq!(player.index(), 1);
}

#[test]
fn test_reset_rewinds() {
    let (mut player, clock) = new_player();
    player.start(&scramble_tokens(), SCRAMBLED).unwrap();
    player.play();
    for _ in 0..3 {
        clock.advance(player.step_duration());
        player.update();
    }
    assert_eq!(player.index(), 3);

    settle(&clock);
    assert!(player.reset());
    assert_eq!(player.state(), PlaybackState::Paused);
    assert_eq!(player.index(), 0);
    assert_eq!(player.cube().to_string(), SCRAMBLED);
    assert_eq!(player.time_until_tick(), None);
}

#[test]
fn test_set_speed_reschedules_pending_tick() {
    let (mut player, clock) = new_player();
    let events = record_events(&player);
    player.start(&SEXY_MOVE, SOLVED_STRING).unwrap();
    assert_eq!(player.speed(), PlaybackSpeed::Normal);
    player.play();

    clock.advance_ms(300);
    player.set_speed(PlaybackSpeed::Fast);
    assert_eq!(player.time_until_tick(), Some(Duration::from_millis(200)));
    assert_eq!(player.state(), PlaybackState::Playing);
    assert_eq!(player.index(), 0);

    clock.advance_ms(199);
    player.update();
    assert_eq!(player.index(), 0);
    clock.advance_ms(1);
    player.update();
    assert_eq!(player.index(), 1);
    assert_eq!(player.time_until_tick(), Some(Duration::from_millis(200)));

    assert!(events.borrow().contains(&PlayerEvent::SpeedChanged {
        speed: PlaybackSpeed::Fast,
    }));

    // Changing speed while paused does not start playback.
    settle(&clock);
    player.pause();
    player.set_speed(PlaybackSpeed::Slow);
    assert_eq!(player.time_until_tick(), None);
    assert_eq!(player.step_duration(), Duration::from_millis(1000));
}

#[test]
fn test_completed_session() {
    let (mut player, clock) = new_player();
    player.start(&["R", "U"], SOLVED_STRING).unwrap();
    player.play();
    play_to_end(&mut player, &clock);
    assert_eq!(player.state(), PlaybackState::Completed);

    settle(&clock);
    assert!(!player.play());
    assert_eq!(player.state(), PlaybackState::Completed);
    settle(&clock);
    assert!(player.step_backward());
    assert_eq!(player.state(), PlaybackState::Paused);
    assert_eq!(player.cube().to_string(), "UUFUUFUUFRRRRRRRRRFFDFFDFFDDDBDDBDDBLLLLLLLLLBBUBBUBBU");
}

#[test]
fn test_idle_player_ignores_controls() {
    let (mut player, clock) = new_player();
    assert_eq!(player.state(), PlaybackState::Idle);
    for control in [
        MoveSequencePlayer::play,
        MoveSequencePlayer::pause,
        MoveSequencePlayer::step_forward,
        MoveSequencePlayer::step_backward,
        MoveSequencePlayer::reset,
    ] {
        settle(&clock);
        assert!(!control(&mut player));
    }
    assert_eq!(player.state(), PlaybackState::Idle);
    assert!(!player.update());
}

#[test]
fn test_empty_session() {
    let (mut player, _clock) = new_player();
    player.start::<&str>(&[], SOLVED_STRING).unwrap();
    assert_eq!(player.state(), PlaybackState::Paused);
    assert!(!player.play());
    assert_eq!(player.progress(), 1.0);
}

#[test]
fn test_close() {
    let (mut player, clock) = new_player();
    let events = record_events(&player);
    player.start(&SEXY_MOVE, SOLVED_STRING).unwrap();
    player.play();

    player.close();
    assert!(player.is_closed());
    assert_eq!(events.borrow().last(), Some(&PlayerEvent::Closed));
    let event_count = events.borrow().len();

    clock.advance_ms(10_000);
    assert!(!player.update());
    assert!(!player.play());
    assert!(!player.step_forward());
    assert!(!player.reset());
    player.set_speed(PlaybackSpeed::Fast);
    player.close();
    assert_eq!(player.index(), 0);
    assert_eq!(
        player.start(&SEXY_MOVE, SOLVED_STRING),
        Err(PlayerError::Closed),
    );
    assert_eq!(events.borrow().len(), event_count);
}

#[test]
fn test_events() {
    let (mut player, clock) = new_player();
    let events = record_events(&player);
    player.start(&["R"], SOLVED_STRING).unwrap();
    player.step_forward();
    settle(&clock);
    player.step_backward();

    let r = apply_moves(&CubeState::SOLVED, parse_moves("R").unwrap());
    assert_eq!(
        *events.borrow(),
        [
            PlayerEvent::SessionStarted {
                cube: CubeState::SOLVED,
                len: 1,
            },
            PlayerEvent::StateChanged {
                state: PlaybackState::Paused,
            },
            PlayerEvent::Stepped {
                index: 1,
                mv: parse_move("R").unwrap(),
                cube: r,
            },
            PlayerEvent::StateChanged {
                state: PlaybackState::Completed,
            },
            PlayerEvent::SteppedBack {
                index: 0,
                cube: CubeState::SOLVED,
            },
            PlayerEvent::StateChanged {
                state: PlaybackState::Paused,
            },
        ],
    );
}

#[test]
fn test_sessions_are_independent() {
    let clock = ManualClock::new();
    let prefs = PlaybackPreferences::default();
    let mut a = MoveSequencePlayer::new(&prefs).with_clock(clock.clone());
    let mut b = MoveSequencePlayer::new(&prefs).with_clock(clock.clone());
    a.start(&scramble_tokens(), SOLVED_STRING).unwrap();
    b.start(&scramble_tokens(), SOLVED_STRING).unwrap();

    a.play();
    for _ in 0..4 {
        clock.advance(a.step_duration());
        a.update();
        b.update();
    }
    assert_eq!(a.index(), 4);
    assert_eq!(b.index(), 0);
    assert_eq!(b.cube().to_string(), SOLVED_STRING);
}

#[test]
fn test_duplicate_centers_are_only_a_warning() {
    // Swap the Up center with a Right sticker: colors stay balanced but two
    // centers are `R`.
    let mut cube = CubeState::SOLVED;
    cube.set_sticker(Face::Up, 1, 1, Face::Right).unwrap();
    cube.set_sticker(Face::Right, 0, 0, Face::Up).unwrap();
    let report = cube.validate();
    assert!(report.valid);
    assert!(!report.warnings.is_empty());

    let (mut player, _clock) = new_player();
    player.start_with(parse_moves("R U").unwrap(), cube).unwrap();
    assert_eq!(player.original(), cube);
    player.start(&["R"], &cube.to_string()).unwrap();
    assert_eq!(player.state(), PlaybackState::Paused);
}

#[test]
fn test_rescheduled_tick_fires_once() {
    let (mut player, clock) = new_player();
    player.start(&SEXY_MOVE, SOLVED_STRING).unwrap();
    player.play();

    // Slow down before the first tick; the old deadline must not fire.
    clock.advance_ms(100);
    player.set_speed(PlaybackSpeed::Slow);
    clock.advance_ms(400);
    player.update();
    assert_eq!(player.index(), 0);
    clock.advance_ms(700);
    player.update();
    assert_eq!(player.index(), 1);
    player.update();
    assert_eq!(player.index(), 1);
    assert_eq!(player.time_until_tick(), Some(Duration::from_millis(1000)));
}
