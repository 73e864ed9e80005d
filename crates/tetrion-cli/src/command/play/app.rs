use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use log::error;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};
use tetrion_engine::{Command, GameController, TickOutcome};

use crate::{
    leaderboard::JsonLeaderboard,
    tui::{App, Tui},
    ui::widgets::{GameOverDisplay, GameOverPrompt, KeyBinding, KeyBindingDisplay, SessionDisplay},
};

use super::name_entry::{NameEntry, NameEntryAction};

const TICK_RATE: f64 = 60.0;

const PLAYING_KEYS: &[KeyBinding] = &[
    (&["←", "→"], "Move"),
    (&["↓"], "Soft Drop"),
    (&["↑"], "Rotate"),
    (&["Space"], "Hard Drop"),
    (&["P"], "Pause"),
    (&["R"], "Reset"),
    (&["Q"], "Quit"),
];
const PAUSED_KEYS: &[KeyBinding] = &[(&["P"], "Resume"), (&["R"], "Reset"), (&["Q"], "Quit")];
const NAME_ENTRY_KEYS: &[KeyBinding] = &[(&["Enter"], "Save"), (&["Esc"], "Skip")];
const GAME_OVER_KEYS: &[KeyBinding] = &[(&["R"], "Play Again"), (&["Q"], "Quit")];

/// Game over prompt state.
#[derive(Debug)]
enum Prompt {
    NameEntry(NameEntry),
    Closed { notice: Option<String> },
}

#[derive(Debug)]
pub struct PlayApp {
    controller: GameController<JsonLeaderboard>,
    prompt: Option<Prompt>,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(controller: GameController<JsonLeaderboard>) -> Self {
        Self {
            controller,
            prompt: None,
            is_exiting: false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if let Some(Prompt::NameEntry(entry)) = &mut self.prompt {
            match entry.handle_key(key.code) {
                NameEntryAction::Editing => {}
                NameEntryAction::Submit(name) => self.save_score(&name),
                NameEntryAction::Skip => self.prompt = Some(Prompt::Closed { notice: None }),
            }
            return;
        }

        let command = match key.code {
            KeyCode::Left => Command::MoveLeft,
            KeyCode::Right => Command::MoveRight,
            KeyCode::Down => Command::SoftDrop,
            KeyCode::Up => Command::Rotate,
            KeyCode::Char(' ') => Command::HardDrop,
            KeyCode::Char('p') => Command::TogglePause,
            KeyCode::Char('r') => Command::Reset,
            KeyCode::Char('q') => {
                self.is_exiting = true;
                return;
            }
            _ => return,
        };
        // Piece commands are only forwarded while the game is running
        let status = self.controller.session().status();
        if matches!(command, Command::TogglePause | Command::Reset) || status.is_running() {
            self.controller.handle_command(command);
        }
        if command == Command::Reset {
            self.prompt = None;
        }
        self.open_prompt_on_game_over();
    }

    fn open_prompt_on_game_over(&mut self) {
        if self.prompt.is_none() && self.controller.final_score().is_some() {
            self.prompt = Some(Prompt::NameEntry(NameEntry::default()));
        }
    }

    fn save_score(&mut self, name: &str) {
        let Some(score) = self.controller.final_score() else {
            return;
        };
        let notice = match self.controller.source().submit(name, score) {
            Ok(()) => {
                self.controller.reload_leaderboard();
                "Score saved!".to_owned()
            }
            Err(err) => {
                error!("failed to save score: {err:#}");
                format!("Failed to save score: {err}")
            }
        };
        self.prompt = Some(Prompt::Closed {
            notice: Some(notice),
        });
    }

    fn key_bindings(&self) -> &'static [KeyBinding<'static>] {
        match &self.prompt {
            Some(Prompt::NameEntry(_)) => NAME_ENTRY_KEYS,
            Some(Prompt::Closed { .. }) => GAME_OVER_KEYS,
            None if self.controller.session().status().is_paused() => PAUSED_KEYS,
            None => PLAYING_KEYS,
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_tick_rate(TICK_RATE);
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _tui: &mut Tui, event: Event) {
        if let Some(key) = event.as_key_event()
            && key.kind == KeyEventKind::Press
        {
            self.handle_key(key);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let snapshot = self.controller.snapshot();
        let session = self.controller.session();
        let mut session_display =
            SessionDisplay::new(&snapshot, session.stats(), self.controller.leaderboard());
        if let (Some(prompt), Some(score)) = (&self.prompt, self.controller.final_score()) {
            let prompt = match prompt {
                Prompt::NameEntry(entry) => GameOverPrompt::NameEntry {
                    name: entry.name(),
                    error: entry.error(),
                },
                Prompt::Closed { notice } => GameOverPrompt::Closed {
                    notice: notice.as_deref(),
                },
            };
            session_display = session_display.game_over(GameOverDisplay::new(score, prompt));
        }

        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)])
                .areas::<2>(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(KeyBindingDisplay::new(self.key_bindings()), help_area);
    }

    fn update(&mut self, _tui: &mut Tui, elapsed: Duration) {
        if let TickOutcome::Locked(lock) = self.controller.tick(elapsed)
            && lock.game_over
        {
            self.open_prompt_on_game_over();
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use tetrion_engine::EngineConfig;

    use super::*;
    use crate::util::testing::temp_path;

    fn new_app() -> PlayApp {
        let source = JsonLeaderboard::new(temp_path("leaderboard.json"));
        let controller = GameController::with_seed(EngineConfig::default(), 1, source).unwrap();
        PlayApp::new(controller)
    }

    fn press(app: &mut PlayApp, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn play_until_game_over(app: &mut PlayApp) {
        for _ in 0..500 {
            if app.controller.final_score().is_some() {
                return;
            }
            press(app, KeyCode::Char(' '));
        }
        panic!("hard dropping in the middle must top out");
    }

    #[test]
    fn test_keys_map_to_commands() {
        let mut app = new_app();
        let x = app.controller.session().falling_piece().x();
        press(&mut app, KeyCode::Left);
        assert_eq!(app.controller.session().falling_piece().x(), x - 1);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.controller.session().falling_piece().y(), 1);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.controller.session().stats().completed_pieces(), 1);
    }

    #[test]
    fn test_pause_blocks_piece_keys() {
        let mut app = new_app();
        press(&mut app, KeyCode::Char('p'));
        assert!(app.controller.session().status().is_paused());
        let piece = app.controller.session().falling_piece().clone();
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.controller.session().falling_piece(), &piece);
        assert_eq!(app.key_bindings(), PAUSED_KEYS);
        press(&mut app, KeyCode::Char('p'));
        assert!(app.controller.session().status().is_running());
    }

    #[test]
    fn test_game_over_saves_named_score() {
        let mut app = new_app();
        play_until_game_over(&mut app);
        assert!(matches!(app.prompt, Some(Prompt::NameEntry(_))));

        // 'q' and 'r' are part of the name while typing
        for c in "qr".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        assert!(!app.should_exit());
        press(&mut app, KeyCode::Enter);

        let Some(Prompt::Closed { notice }) = &app.prompt else {
            panic!("prompt should be closed after saving");
        };
        assert_eq!(notice.as_deref(), Some("Score saved!"));
        let score = app.controller.final_score().unwrap();
        assert_eq!(app.controller.leaderboard()[0].name, "qr");
        assert_eq!(app.controller.leaderboard()[0].score, score);
    }

    #[test]
    fn test_skip_then_reset_starts_new_game() {
        let mut app = new_app();
        play_until_game_over(&mut app);
        press(&mut app, KeyCode::Esc);
        assert!(matches!(app.prompt, Some(Prompt::Closed { notice: None })));
        assert!(app.controller.leaderboard().is_empty());

        press(&mut app, KeyCode::Char('r'));
        assert!(app.prompt.is_none());
        assert!(app.controller.session().status().is_running());
        assert_eq!(app.controller.session().stats().completed_pieces(), 0);
    }

    #[test]
    fn test_quit() {
        let mut app = new_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_exit());
    }
}
