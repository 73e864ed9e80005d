use crossterm::event::KeyCode;

/// Longest accepted player name, in characters.
pub(crate) const MAX_NAME_LEN: usize = 20;

/// What the player did with a key press in the name field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum NameEntryAction {
    Editing,
    Submit(String),
    Skip,
}

/// Text field collecting the name saved with a score.
#[derive(Debug, Default)]
pub(crate) struct NameEntry {
    name: String,
    error: Option<&'static str>,
}

impl NameEntry {
    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn error(&self) -> Option<&'static str> {
        self.error
    }

    pub(crate) fn handle_key(&mut self, code: KeyCode) -> NameEntryAction {
        match code {
            KeyCode::Enter => {
                let name = self.name.trim();
                if name.is_empty() {
                    self.error = Some("Please enter your name");
                    return NameEntryAction::Editing;
                }
                return NameEntryAction::Submit(name.to_owned());
            }
            KeyCode::Esc => return NameEntryAction::Skip,
            KeyCode::Backspace => {
                self.name.pop();
            }
            KeyCode::Char(c) if !c.is_control() && self.name.chars().count() < MAX_NAME_LEN => {
                self.name.push(c);
            }
            _ => return NameEntryAction::Editing,
        }
        self.error = None;
        NameEntryAction::Editing
    }
}
