use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use crate::action::Action;
use crate::browser::ListBrowser;
use crate::event::Event;
use crate::gateway::Gateway;
use crate::types::{PrDetail, RepoIdentity};
use crate::viewer::DetailViewer;

/// Rows taken by the app header and status bar.
const CHROME_ROWS: u16 = 2;
/// Rows taken by the detail screen's own header and footer.
const DETAIL_CHROME_ROWS: u16 = 2;
/// Rows above the list window (title or filter prompt).
const LIST_TITLE_ROWS: u16 = 1;
/// Lines each list row occupies (title + description).
const LIST_ROW_LINES: u16 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    ListLoading,
    List,
    DetailLoading,
    Detail,
    Error(String),
}

pub struct App {
    pub view: View,
    pub repo: RepoIdentity,
    pub browser: ListBrowser,
    pub viewer: DetailViewer,
    pub detail: Option<PrDetail>,
    /// Transient message for failures local to one action (diff viewer,
    /// browser opener); never changes the view.
    pub notice: Option<String>,
    pub should_quit: bool,
    list_loaded: bool,
    fetch_seq: u64,
    gateway: Arc<dyn Gateway>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl App {
    pub fn new(
        repo: RepoIdentity,
        gateway: Arc<dyn Gateway>,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> Self {
        Self {
            view: View::ListLoading,
            repo,
            browser: ListBrowser::new(),
            viewer: DetailViewer::new(),
            detail: None,
            notice: None,
            should_quit: false,
            list_loaded: false,
            fetch_seq: 0,
            gateway,
            action_tx,
        }
    }

    pub fn handle_event(&self, event: Event) -> Action {
        match event {
            Event::Init => Action::LoadList,
            Event::Key(key) => self.handle_key(key),
            Event::Resize(width, height) => Action::Resize(width, height),
            _ => Action::None,
        }
    }

    fn handle_key(&self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('c') {
                return Action::Quit;
            }
            // Ctrl-chords (page up/down) belong to the active view.
            return match self.view {
                View::List => Action::ListKey(key),
                View::Detail => Action::DetailKey(key),
                _ => Action::None,
            };
        }

        // While the filter prompt is open every key belongs to the list,
        // including the ones that would otherwise quit or open things.
        if self.view == View::List && self.browser.is_filtering() {
            return Action::ListKey(key);
        }

        match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Esc => {
                // An applied filter is cleared before Esc means quit.
                if self.view == View::List && !self.browser.query().is_empty() {
                    Action::ListKey(key)
                } else {
                    Action::Quit
                }
            }
            KeyCode::Char('i') | KeyCode::Enter if self.view == View::List => Action::OpenDetail,
            KeyCode::Char('d') if self.view == View::List => Action::ViewDiff,
            KeyCode::Char('o') if self.view == View::List => Action::OpenInBrowser,
            KeyCode::Char('r') if self.view == View::List => Action::LoadList,
            KeyCode::Char('h') if self.view == View::Detail => Action::Back,
            KeyCode::Char('h') if matches!(self.view, View::Error(_)) => Action::Back,
            _ => match self.view {
                View::List => Action::ListKey(key),
                View::Detail => Action::DetailKey(key),
                _ => Action::None,
            },
        }
    }

    pub fn update(&mut self, action: Action) {
        if self.notice.is_some() && !matches!(action, Action::None) {
            self.notice = None;
        }

        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::Back => match self.view {
                View::Detail | View::DetailLoading => {
                    // Supersede any fetch still in flight so its result
                    // is dropped on arrival.
                    self.fetch_seq += 1;
                    self.viewer.clear();
                    self.detail = None;
                    self.view = View::List;
                }
                View::Error(_) if self.list_loaded => {
                    self.fetch_seq += 1;
                    self.view = View::List;
                }
                _ => {}
            },

            Action::LoadList => {
                self.view = View::ListLoading;
                self.spawn_load_list();
            }
            Action::ListLoaded(items, gen) => {
                if gen != self.fetch_seq {
                    tracing::debug!(gen, current = self.fetch_seq, "dropping stale list result");
                    return;
                }
                self.browser.set_items(items);
                self.list_loaded = true;
                self.view = View::List;
            }

            Action::OpenDetail => {
                if let Some(pr) = self.browser.selected() {
                    let number = pr.number;
                    self.view = View::DetailLoading;
                    self.spawn_load_detail(number);
                }
            }
            Action::DetailLoaded(detail, gen) => {
                if gen != self.fetch_seq {
                    tracing::debug!(
                        gen,
                        current = self.fetch_seq,
                        number = detail.number,
                        "dropping stale detail result"
                    );
                    return;
                }
                self.viewer.set_detail(&detail);
                self.detail = Some(*detail);
                self.view = View::Detail;
            }

            Action::FetchFailed(message, gen) => {
                if gen != self.fetch_seq {
                    return;
                }
                self.view = View::Error(message);
            }

            Action::ViewDiff => {
                if let Some(pr) = self.browser.selected() {
                    self.action_tx.send(Action::SuspendForDiff(pr.number)).ok();
                }
            }
            // Serviced by the run loop; reaching the app means the loop
            // was bypassed (tests), so it is a no-op here.
            Action::SuspendForDiff(_) => {}
            Action::DiffFinished(error) => {
                if let Some(message) = error {
                    self.notice = Some(message);
                }
            }

            Action::OpenInBrowser => {
                if let Some(pr) = self.browser.selected() {
                    if let Err(e) = open::that(&pr.url) {
                        tracing::warn!("failed to open {}: {}", pr.url, e);
                        self.notice = Some(format!("could not open browser: {}", e));
                    }
                }
            }

            Action::Resize(width, height) => {
                let content = height.saturating_sub(CHROME_ROWS);
                let list_rows = content.saturating_sub(LIST_TITLE_ROWS) / LIST_ROW_LINES;
                self.browser.set_rows(list_rows.max(1) as usize);
                let text_rows = content.saturating_sub(DETAIL_CHROME_ROWS).max(1);
                self.viewer.resize(width.max(1) as usize, text_rows as usize);
            }

            Action::ListKey(key) => self.browser.handle_key(key),
            Action::DetailKey(key) => self.viewer.handle_key(key),
            Action::None => {}
        }
    }

    fn next_gen(&mut self) -> u64 {
        self.fetch_seq += 1;
        self.fetch_seq
    }

    fn spawn_load_list(&mut self) {
        let gen = self.next_gen();
        let tx = self.action_tx.clone();
        let gateway = Arc::clone(&self.gateway);
        let repo = self.repo.clone();
        tokio::spawn(async move {
            match gateway.list_open_prs(&repo).await {
                Ok(prs) => {
                    tx.send(Action::ListLoaded(prs, gen)).ok();
                }
                Err(e) => {
                    tx.send(Action::FetchFailed(e.to_string(), gen)).ok();
                }
            }
        });
    }

    fn spawn_load_detail(&mut self, number: u64) {
        let gen = self.next_gen();
        let tx = self.action_tx.clone();
        let gateway = Arc::clone(&self.gateway);
        let repo = self.repo.clone();
        tokio::spawn(async move {
            let (detail, files) = tokio::join!(
                gateway.get_pr(&repo, number),
                gateway.list_pr_files(&repo, number)
            );
            match (detail, files) {
                (Ok(mut detail), Ok(files)) => {
                    detail.files = files;
                    tx.send(Action::DetailLoaded(Box::new(detail), gen)).ok();
                }
                (Err(e), _) | (_, Err(e)) => {
                    tx.send(Action::FetchFailed(e.to_string(), gen)).ok();
                }
            }
        });
    }
}
