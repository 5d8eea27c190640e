use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use typrace::{
    app::{App, Control},
    runtime::{FixedTicker, RaceEvent, Runner, TestEventSource},
    session::{Session, SessionConfig},
    view::{CharStatus, Footer},
    word_generator::WordGenerator,
};

fn app_for(word: &str, number_of_words: usize) -> App {
    let generator = WordGenerator::seeded(Box::new(vec![word.to_string()]), 0).unwrap();
    App::new(Session::new(SessionConfig { number_of_words }, generator))
}

fn key(code: KeyCode) -> RaceEvent {
    RaceEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

/// Drive `app` from a scripted channel until it quits or the script runs dry
fn drive(app: &mut App, events: Vec<RaceEvent>) -> Control {
    let (tx, rx) = mpsc::channel();
    let expected = events.len();
    for ev in events {
        tx.send(ev).unwrap();
    }
    drop(tx);

    let runner = Runner::new(TestEventSource::new(rx), FixedTicker::new(Duration::from_millis(5)));
    let mut seen = 0;
    while seen < expected {
        let ev = runner.step();
        if ev != RaceEvent::Tick {
            seen += 1;
        }
        if app.on_event(ev) == Control::Quit {
            return Control::Quit;
        }
    }
    Control::Continue
}

#[test]
fn headless_typing_flow_completes() {
    let mut app = app_for("hi", 1);

    let control = drive(
        &mut app,
        vec![key(KeyCode::Char('h')), key(KeyCode::Char('i'))],
    );

    assert_eq!(control, Control::Continue);
    assert!(app.session.is_finished());

    let state = app.render_state();
    assert!(state
        .cells
        .iter()
        .all(|cell| cell.status == CharStatus::Correct));
    match state.footer {
        Footer::Stats(stats) => {
            assert!(stats.finished);
            assert_eq!(stats.accuracy, 100.0);
            assert!(stats.wpm >= 0.0);
        }
        Footer::Prompt(_) => panic!("expected stats once finished"),
    }
}

#[test]
fn headless_mistake_correction_and_restart() {
    let mut app = app_for("cat", 1);

    drive(
        &mut app,
        vec![
            key(KeyCode::Char('c')),
            key(KeyCode::Char('x')),
            key(KeyCode::Backspace),
            key(KeyCode::Char('a')),
            key(KeyCode::Char('t')),
        ],
    );

    assert!(app.session.is_finished());
    let stats = app.session.stats();
    assert_eq!(stats.top_mistyped.len(), 1);
    assert_eq!(stats.top_mistyped[0].char, 'a');
    assert!((stats.accuracy - 60.0).abs() < 1e-9);

    drive(&mut app, vec![key(KeyCode::Enter)]);
    assert!(!app.session.is_finished());
    assert_eq!(app.session.typed_text(), "");
    assert!(app.session.mistyped().is_empty());
}

#[test]
fn headless_early_finish_then_quit() {
    let mut app = app_for("hello", 2);

    let control = drive(
        &mut app,
        vec![
            key(KeyCode::Char('h')),
            key(KeyCode::Enter),
            key(KeyCode::Char('q')),
            key(KeyCode::Char('z')),
        ],
    );

    assert_eq!(control, Control::Quit);
    assert!(app.session.is_finished());
    assert_eq!(app.session.typed_text(), "h");
}

#[test]
fn headless_paste_and_resize_are_harmless() {
    let mut app = app_for("abc", 1);

    drive(
        &mut app,
        vec![
            RaceEvent::Resize(132, 43),
            RaceEvent::Paste("abc".into()),
            key(KeyCode::Char('a')),
        ],
    );

    assert_eq!((app.width, app.height), (132, 43));
    assert_eq!(app.session.typed_text(), "a");
    assert_eq!(app.session.total_keystrokes(), 1);
}

#[test]
fn headless_escape_quits_mid_race() {
    let mut app = app_for("abc", 1);
    let control = drive(&mut app, vec![key(KeyCode::Char('a')), key(KeyCode::Esc)]);

    assert_eq!(control, Control::Quit);
    assert!(!app.session.is_finished());
}
