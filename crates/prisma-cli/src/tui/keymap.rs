use crate::config::FilterKey;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use molprisma::engine::controller::{Action, Direction};
use molprisma::engine::visibility::KindToggle;

/// What a key press asks of the UI loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Apply(Action),
    ToggleHelp,
}

#[derive(Debug, Clone)]
pub struct KeyMap {
    filters: Vec<FilterKey>,
}

impl KeyMap {
    pub fn new(filters: Vec<FilterKey>) -> Self {
        Self { filters }
    }

    pub fn filter_keys(&self) -> &[FilterKey] {
        &self.filters
    }

    /// Maps a key press to an input. `page` is the fast-scroll step.
    pub fn resolve(&self, key: KeyEvent, page: usize) -> Option<Input> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let action = match key.code {
            KeyCode::Char('c') if ctrl => Action::Quit,
            KeyCode::Up => Action::ScrollUp(1),
            KeyCode::Down => Action::ScrollDown(1),
            KeyCode::PageUp => Action::ScrollUp(page),
            KeyCode::PageDown => Action::ScrollDown(page),
            KeyCode::Home => Action::ScrollTop,
            KeyCode::End => Action::ScrollBottom,
            KeyCode::Left => Action::MoveField(Direction::Backward),
            KeyCode::Right => Action::MoveField(Direction::Forward),
            KeyCode::Esc => Action::Quit,
            KeyCode::Char(c) => return self.resolve_char(c),
            _ => return None,
        };
        Some(Input::Apply(action))
    }

    fn resolve_char(&self, c: char) -> Option<Input> {
        let action = match c.to_ascii_lowercase() {
            'h' => return Some(Input::ToggleHelp),
            'q' => Action::Quit,
            'a' => Action::ToggleAll,
            's' => Action::ToggleKind(KindToggle::Atom),
            'd' => Action::ToggleKind(KindToggle::Hetero),
            'f' => Action::ToggleKind(KindToggle::Meta),
            'x' => Action::ResetFilters,
            lower => {
                let binding = self.filters.iter().find(|f| f.key == lower)?;
                let direction = if c.is_ascii_uppercase() {
                    Direction::Backward
                } else {
                    Direction::Forward
                };
                Action::CycleFilter(binding.filter.clone(), direction)
            }
        };
        Some(Input::Apply(action))
    }
}
