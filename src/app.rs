use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::{
    runtime::RaceEvent,
    session::Session,
    view::{self, RenderState},
};

/// What the event loop should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Owns the running session and the terminal facts the view needs
#[derive(Debug)]
pub struct App {
    pub session: Session,
    pub width: u16,
    pub height: u16,
    blink_epoch: Instant,
}

impl App {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            width: 0,
            height: 0,
            blink_epoch: Instant::now(),
        }
    }

    pub fn on_event(&mut self, event: RaceEvent) -> Control {
        match event {
            RaceEvent::Key(key) => self.on_key(key),
            RaceEvent::Paste(text) => {
                self.session.handle_input(&text);
                Control::Continue
            }
            RaceEvent::Resize(width, height) => {
                self.width = width;
                self.height = height;
                Control::Continue
            }
            RaceEvent::Tick => Control::Continue,
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Control {
        if key.kind == KeyEventKind::Release {
            return Control::Continue;
        }

        // ctrl+c and esc quit from anywhere
        if key.code == KeyCode::Esc
            || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
        {
            return Control::Quit;
        }

        if self.session.is_finished() {
            match key.code {
                KeyCode::Char('q') => return Control::Quit,
                KeyCode::Enter => self.session.restart(),
                _ => {}
            }
            return Control::Continue;
        }

        match key.code {
            KeyCode::Enter => self.session.handle_early_finish(),
            KeyCode::Backspace => self.session.handle_backspace(),
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.session.handle_char(c)
            }
            _ => {}
        }
        Control::Continue
    }

    pub fn render_state(&self) -> RenderState {
        view::project(&self.session)
    }

    pub fn cursor_visible(&self) -> bool {
        view::cursor_visible(self.blink_epoch.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        session::{Phase, SessionConfig},
        word_generator::WordGenerator,
    };
    use crossterm::event::KeyEventState;

    fn app_for(word: &str) -> App {
        let generator = WordGenerator::seeded(Box::new(vec![word.to_string()]), 0).unwrap();
        App::new(Session::new(SessionConfig { number_of_words: 1 }, generator))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn typing_keys_reach_the_session() {
        let mut app = app_for("hi");

        assert_eq!(app.on_key(key(KeyCode::Char('h'))), Control::Continue);
        assert_eq!(app.session.typed_text(), "h");

        app.on_key(KeyEvent::new(KeyCode::Char('I'), KeyModifiers::SHIFT));
        assert_eq!(app.session.typed_text(), "hI");
        assert!(app.session.is_finished());
    }

    #[test]
    fn backspace_while_active() {
        let mut app = app_for("hi");
        app.on_key(key(KeyCode::Char('x')));
        app.on_key(key(KeyCode::Backspace));

        assert_eq!(app.session.typed_text(), "");
        assert_eq!(app.session.total_keystrokes(), 2);
    }

    #[test]
    fn enter_finishes_early_then_restarts() {
        let mut app = app_for("hello");
        app.on_key(key(KeyCode::Char('h')));

        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.session.phase(), Phase::Finished);
        assert_eq!(app.session.typed_text(), "h");

        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.session.phase(), Phase::Active);
        assert_eq!(app.session.typed_text(), "");
    }

    #[test]
    fn quit_keys() {
        let mut app = app_for("hi");
        assert_eq!(app.on_key(key(KeyCode::Esc)), Control::Quit);
        assert_eq!(app.on_key(ctrl('c')), Control::Quit);
        assert_eq!(app.session.typed_text(), "");
    }

    #[test]
    fn q_types_while_active_and_quits_when_finished() {
        let mut app = app_for("qq");
        assert_eq!(app.on_key(key(KeyCode::Char('q'))), Control::Continue);
        assert_eq!(app.on_key(key(KeyCode::Char('q'))), Control::Continue);
        assert!(app.session.is_finished());

        assert_eq!(app.on_key(key(KeyCode::Char('q'))), Control::Quit);
    }

    #[test]
    fn other_keys_ignored_when_finished() {
        let mut app = app_for("a");
        app.on_key(key(KeyCode::Char('a')));
        assert!(app.session.is_finished());

        app.on_key(key(KeyCode::Char('b')));
        app.on_key(key(KeyCode::Backspace));
        assert_eq!(app.session.typed_text(), "a");
        assert!(app.session.is_finished());
    }

    #[test]
    fn control_chords_are_not_typed() {
        let mut app = app_for("hi");
        app.on_key(ctrl('h'));
        app.on_key(KeyEvent::new(KeyCode::Char('h'), KeyModifiers::ALT));
        assert_eq!(app.session.typed_text(), "");
    }

    #[test]
    fn key_release_is_ignored() {
        let mut app = app_for("hi");
        let release = KeyEvent {
            code: KeyCode::Char('h'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        app.on_key(release);
        assert_eq!(app.session.typed_text(), "");
    }

    #[test]
    fn paste_only_accepts_single_chars() {
        let mut app = app_for("hi");
        app.on_event(RaceEvent::Paste("hi".into()));
        assert_eq!(app.session.typed_text(), "");

        app.on_event(RaceEvent::Paste("h".into()));
        assert_eq!(app.session.typed_text(), "h");
    }

    #[test]
    fn resize_and_tick_are_inert() {
        let mut app = app_for("hi");
        assert_eq!(app.on_event(RaceEvent::Resize(120, 40)), Control::Continue);
        assert_eq!((app.width, app.height), (120, 40));

        assert_eq!(app.on_event(RaceEvent::Tick), Control::Continue);
        assert_eq!(app.session.total_keystrokes(), 0);
    }

    #[test]
    fn render_state_tracks_session() {
        let mut app = app_for("hi");
        app.on_key(key(KeyCode::Char('h')));

        let state = app.render_state();
        assert_eq!(state.typed, "h");
        assert_eq!(state.cursor, Some(1));
    }
}
