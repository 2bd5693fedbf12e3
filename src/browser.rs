use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::PrSummary;

/// Filter prompt state. `Editing` captures every keystroke until the
/// query is confirmed or cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterState {
    #[default]
    Off,
    Editing,
    Applied,
}

/// Selectable list of pull request summaries with a substring filter.
/// Pure view-local state: no key ever leaves this component with a side
/// effect.
pub struct ListBrowser {
    items: Vec<PrSummary>,
    visible: Vec<usize>,
    cursor: usize,
    rows: usize,
    filter: FilterState,
    query: String,
}

impl ListBrowser {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            visible: Vec::new(),
            cursor: 0,
            rows: 10,
            filter: FilterState::Off,
            query: String::new(),
        }
    }

    /// Replace the whole collection. The cursor is kept when it still
    /// points at a valid row, reset to the top otherwise.
    pub fn set_items(&mut self, items: Vec<PrSummary>) {
        self.items = items;
        self.refilter();
        if self.cursor >= self.visible.len() {
            self.cursor = 0;
        }
    }

    pub fn selected(&self) -> Option<&PrSummary> {
        self.visible
            .get(self.cursor)
            .map(|&idx| &self.items[idx])
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    pub fn is_filtering(&self) -> bool {
        self.filter == FilterState::Editing
    }

    pub fn filter_state(&self) -> FilterState {
        self.filter
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Rows of list viewport currently available, used as the page step.
    pub fn set_rows(&mut self, rows: usize) {
        self.rows = rows.max(1);
    }

    /// Visible summaries in filter order, paired with their selection flag.
    pub fn entries(&self) -> impl Iterator<Item = (&PrSummary, bool)> {
        self.visible
            .iter()
            .enumerate()
            .map(|(i, &idx)| (&self.items[idx], i == self.cursor))
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.filter == FilterState::Editing {
            self.handle_filter_key(key);
            return;
        }

        let page = self.rows;
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.move_cursor(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_cursor(-1),
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.move_cursor(page as isize)
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.move_cursor(-(page as isize))
            }
            KeyCode::PageDown => self.move_cursor(page as isize),
            KeyCode::PageUp => self.move_cursor(-(page as isize)),
            KeyCode::Char('g') | KeyCode::Home => self.cursor = 0,
            KeyCode::Char('G') | KeyCode::End => {
                self.cursor = self.visible.len().saturating_sub(1);
            }
            KeyCode::Char('/') => {
                self.filter = FilterState::Editing;
            }
            KeyCode::Esc if self.filter == FilterState::Applied => self.clear_filter(),
            _ => {}
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.clear_filter(),
            KeyCode::Enter => {
                self.filter = if self.query.is_empty() {
                    FilterState::Off
                } else {
                    FilterState::Applied
                };
            }
            KeyCode::Backspace => {
                self.query.pop();
                self.refilter();
                self.clamp_cursor();
            }
            // Cursor keys still work while the prompt is open.
            KeyCode::Down => self.move_cursor(1),
            KeyCode::Up => self.move_cursor(-1),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.query.push(c);
                self.refilter();
                self.clamp_cursor();
            }
            _ => {}
        }
    }

    fn clear_filter(&mut self) {
        self.filter = FilterState::Off;
        self.query.clear();
        self.refilter();
        self.clamp_cursor();
    }

    fn refilter(&mut self) {
        let query = self.query.to_lowercase();
        self.visible = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, pr)| query.is_empty() || pr.title.to_lowercase().contains(&query))
            .map(|(idx, _)| idx)
            .collect();
    }

    fn clamp_cursor(&mut self) {
        if self.cursor >= self.visible.len() {
            self.cursor = self.visible.len().saturating_sub(1);
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        if self.visible.is_empty() {
            self.cursor = 0;
            return;
        }
        let last = self.visible.len() - 1;
        let next = self.cursor as isize + delta;
        self.cursor = next.clamp(0, last as isize) as usize;
    }
}

impl Default for ListBrowser {
    fn default() -> Self {
        Self::new()
    }
}
