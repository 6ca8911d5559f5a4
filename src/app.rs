use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

use crate::config::AppConfig;
use crate::menu::MenuListController;

/// Seconds a status message stays on the info line
const STATUS_SECONDS: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    AddInput,
    AddButton,
    FilterInput,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::List => Focus::AddInput,
            Focus::AddInput => Focus::AddButton,
            Focus::AddButton => Focus::FilterInput,
            Focus::FilterInput => Focus::List,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::List => Focus::FilterInput,
            Focus::AddInput => Focus::List,
            Focus::AddButton => Focus::AddInput,
            Focus::FilterInput => Focus::AddButton,
        }
    }

    /// Whether keystrokes go into a text input
    pub fn is_input(self) -> bool {
        matches!(self, Focus::AddInput | Focus::FilterInput)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Help,
}

pub struct App {
    pub menu: MenuListController,
    pub focus: Focus,
    pub popup: Popup,

    // Index into the visible items
    pub selected: usize,

    // Status message (shown in info line, auto-clears after timeout)
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        let menu = MenuListController::with_policy(&config.initial_items, config.invalid_filter);

        Self {
            menu,
            focus: Focus::List,
            popup: Popup::None,
            selected: 0,
            status_message: None,
            status_message_time: None,
        }
    }

    /// Set a status message (auto-clears after a few seconds)
    fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(Instant::now());
    }

    /// Whether the app is in a state where `q` quits instead of being typed
    pub fn can_quit(&self) -> bool {
        self.popup == Popup::None && !self.focus.is_input()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle popups first
        if self.popup != Popup::None {
            return self.handle_popup_key(key);
        }

        match key.code {
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return Ok(());
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                return Ok(());
            }
            _ => {}
        }

        match self.focus {
            Focus::List => self.handle_list_key(key),
            Focus::AddInput => self.handle_add_input_key(key),
            Focus::AddButton => self.handle_add_button_key(key),
            Focus::FilterInput => self.handle_filter_input_key(key),
        }
    }

    fn handle_popup_key(&mut self, key: KeyEvent) -> Result<()> {
        match self.popup {
            Popup::Help => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::Enter | KeyCode::Char('q')) {
                    self.popup = Popup::None;
                }
                Ok(())
            }
            Popup::None => Ok(()),
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.move_down(),
            KeyCode::Char('k') | KeyCode::Up => self.move_up(),
            KeyCode::Char('a') => self.focus = Focus::AddInput,
            KeyCode::Char('/') => self.focus = Focus::FilterInput,
            KeyCode::Char('?') | KeyCode::Char('h') => self.popup = Popup::Help,
            _ => {}
        }
        Ok(())
    }

    fn handle_add_input_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => self.focus = Focus::List,
            KeyCode::Enter => self.add_item(),
            KeyCode::Backspace => {
                let mut draft = self.menu.draft_item().to_string();
                draft.pop();
                self.menu.set_draft(draft);
            }
            KeyCode::Char(c) if is_plain_char(key) => {
                let mut draft = self.menu.draft_item().to_string();
                draft.push(c);
                self.menu.set_draft(draft);
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_add_button_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => self.focus = Focus::List,
            KeyCode::Enter | KeyCode::Char(' ') => self.add_item(),
            _ => {}
        }
        Ok(())
    }

    fn handle_filter_input_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => self.focus = Focus::List,
            KeyCode::Backspace => {
                let mut filter = self.menu.filter_text().to_string();
                filter.pop();
                self.menu.set_filter(filter);
                self.clamp_selection();
            }
            KeyCode::Char(c) if is_plain_char(key) => {
                let mut filter = self.menu.filter_text().to_string();
                filter.push(c);
                self.menu.set_filter(filter);
                self.clamp_selection();
            }
            _ => {}
        }
        Ok(())
    }

    /// Activate "Add Item"
    fn add_item(&mut self) {
        let before = self.menu.len();
        let draft = self.menu.draft_item().to_string();
        self.menu.add_item();

        if self.menu.len() > before {
            self.set_status(format!("Added {}", draft.trim()));
        } else {
            self.set_status("Nothing to add");
        }
    }

    fn move_down(&mut self) {
        let count = self.menu.visible_items().len();
        if count > 0 {
            self.selected = (self.selected + 1) % count;
        }
    }

    fn move_up(&mut self) {
        let count = self.menu.visible_items().len();
        if count > 0 {
            self.selected = self.selected.checked_sub(1).unwrap_or(count - 1);
        }
    }

    /// Keep the selection inside the visible list after the filter changes
    fn clamp_selection(&mut self) {
        let count = self.menu.visible_items().len();
        self.selected = self.selected.min(count.saturating_sub(1));
    }

    pub fn tick(&mut self) {
        // Clear status message after timeout
        if let Some(time) = self.status_message_time {
            if time.elapsed().as_secs() >= STATUS_SECONDS {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }
}

/// A character typed without Ctrl/Alt (Shift only changes the character)
fn is_plain_char(key: KeyEvent) -> bool {
    key.modifiers.difference(KeyModifiers::SHIFT).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            app.handle_key(key(KeyCode::Char(c))).unwrap();
        }
    }

    fn sample_app() -> App {
        let config = AppConfig {
            initial_items: vec!["Home".to_string(), "About".to_string(), "Contact".to_string()],
            ..AppConfig::default()
        };
        App::new(&config)
    }

    #[test]
    fn test_focus_cycles() {
        let mut app = sample_app();
        assert_eq!(app.focus, Focus::List);
        app.handle_key(key(KeyCode::Tab)).unwrap();
        assert_eq!(app.focus, Focus::AddInput);
        app.handle_key(key(KeyCode::Tab)).unwrap();
        assert_eq!(app.focus, Focus::AddButton);
        app.handle_key(key(KeyCode::Tab)).unwrap();
        assert_eq!(app.focus, Focus::FilterInput);
        app.handle_key(key(KeyCode::Tab)).unwrap();
        assert_eq!(app.focus, Focus::List);
        app.handle_key(key(KeyCode::BackTab)).unwrap();
        assert_eq!(app.focus, Focus::FilterInput);
    }

    #[test]
    fn test_typing_and_enter_adds_item() {
        let mut app = sample_app();
        app.handle_key(key(KeyCode::Char('a'))).unwrap();
        type_str(&mut app, "Settingz");
        app.handle_key(key(KeyCode::Backspace)).unwrap();
        type_str(&mut app, "s");
        assert_eq!(app.menu.draft_item(), "Settings");

        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.menu.items().last().map(String::as_str), Some("Settings"));
        assert_eq!(app.menu.draft_item(), "");
        assert_eq!(app.status_message.as_deref(), Some("Added Settings"));
    }

    #[test]
    fn test_add_button_with_blank_draft() {
        let mut app = sample_app();
        app.handle_key(key(KeyCode::Tab)).unwrap();
        type_str(&mut app, "  ");
        app.handle_key(key(KeyCode::Tab)).unwrap();
        assert_eq!(app.focus, Focus::AddButton);

        app.handle_key(key(KeyCode::Char(' '))).unwrap();
        assert_eq!(app.menu.len(), 3);
        assert_eq!(app.menu.draft_item(), "  ");
        assert_eq!(app.status_message.as_deref(), Some("Nothing to add"));
    }

    #[test]
    fn test_filter_input_narrows_and_clamps_selection() {
        let mut app = sample_app();
        app.handle_key(key(KeyCode::Down)).unwrap();
        app.handle_key(key(KeyCode::Down)).unwrap();
        assert_eq!(app.selected, 2);

        app.handle_key(key(KeyCode::Char('/'))).unwrap();
        type_str(&mut app, "ho");
        assert_eq!(app.menu.filter_text(), "ho");
        assert_eq!(app.menu.visible_items(), ["Home"]);
        assert_eq!(app.selected, 0);

        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.focus, Focus::List);
        assert_eq!(app.menu.filter_text(), "ho");
    }

    #[test]
    fn test_selection_wraps() {
        let mut app = sample_app();
        app.handle_key(key(KeyCode::Up)).unwrap();
        assert_eq!(app.selected, 2);
        app.handle_key(key(KeyCode::Char('j'))).unwrap();
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_selection_on_empty_list() {
        let mut app = App::new(&AppConfig::default());
        app.handle_key(key(KeyCode::Down)).unwrap();
        app.handle_key(key(KeyCode::Up)).unwrap();
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_q_is_typed_inside_inputs() {
        let mut app = sample_app();
        assert!(app.can_quit());
        app.handle_key(key(KeyCode::Char('/'))).unwrap();
        assert!(!app.can_quit());
        type_str(&mut app, "q");
        assert_eq!(app.menu.filter_text(), "q");
    }

    #[test]
    fn test_modified_chars_are_not_typed() {
        let mut app = sample_app();
        app.handle_key(key(KeyCode::Char('a'))).unwrap();
        app.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT)).unwrap();
        app.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)).unwrap();
        app.handle_key(KeyEvent::new(KeyCode::Char('S'), KeyModifiers::SHIFT)).unwrap();
        assert_eq!(app.menu.draft_item(), "S");

        app.handle_key(key(KeyCode::Esc)).unwrap();
        app.handle_key(key(KeyCode::Char('/'))).unwrap();
        app.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT)).unwrap();
        app.handle_key(KeyEvent::new(KeyCode::Char('o'), KeyModifiers::CONTROL | KeyModifiers::SHIFT)).unwrap();
        assert_eq!(app.menu.filter_text(), "");
    }

    #[test]
    fn test_help_popup() {
        let mut app = sample_app();
        app.handle_key(key(KeyCode::Char('?'))).unwrap();
        assert_eq!(app.popup, Popup::Help);
        assert!(!app.can_quit());
        app.handle_key(key(KeyCode::Down)).unwrap();
        assert_eq!(app.selected, 0);
        app.handle_key(key(KeyCode::Esc)).unwrap();
        assert_eq!(app.popup, Popup::None);
    }

    #[test]
    fn test_tick_keeps_fresh_status() {
        let mut app = sample_app();
        app.set_status("hello");
        app.tick();
        assert_eq!(app.status_message.as_deref(), Some("hello"));
    }
}
