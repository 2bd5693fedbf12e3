use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::PrDetail;

/// Assemble the detail view's text buffer. The section order is fixed:
/// title, merge summary, body, requested reviewers, commits, changed
/// files. Calling this twice with the same payload yields identical
/// output.
pub fn assemble_detail(pr: &PrDetail) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(pr.title.clone());

    let n = pr.commits.len();
    lines.push(format!(
        "{} wants to merge {} commit{} into {} from {}",
        pr.author,
        n,
        if n == 1 { "" } else { "s" },
        pr.base_branch,
        pr.head_branch,
    ));

    match pr.body.as_deref() {
        Some(body) if !body.is_empty() => {
            for line in body.lines() {
                lines.push(line.to_string());
            }
        }
        _ => lines.push("No description provided".to_string()),
    }

    for reviewer in &pr.reviewers {
        lines.push(reviewer.login.clone());
    }

    for commit in &pr.commits {
        lines.push(format!(
            "• {} by {}",
            commit.headline,
            commit.authors.join(", ")
        ));
    }

    for file in &pr.files {
        let mut line = file.path.clone();
        if file.additions > 0 {
            line.push_str(&format!(" +{}", file.additions));
        }
        if file.deletions > 0 {
            line.push_str(&format!(" -{}", file.deletions));
        }
        lines.push(line);
    }

    lines.join("\n")
}

/// Read-only scrollable text buffer for the detail screen.
pub struct DetailViewer {
    lines: Vec<String>,
    scroll: usize,
    width: usize,
    height: usize,
}

impl DetailViewer {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            scroll: 0,
            width: 80,
            height: 20,
        }
    }

    /// Replace the buffer and jump back to the top.
    pub fn set_content(&mut self, text: &str) {
        self.lines = text.lines().map(str::to_string).collect();
        self.scroll = 0;
    }

    pub fn set_detail(&mut self, pr: &PrDetail) {
        self.set_content(&assemble_detail(pr));
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.scroll = 0;
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Fraction scrolled through the buffer, 0 when the content fits
    /// the viewport entirely.
    pub fn scroll_fraction(&self) -> f64 {
        let max = self.max_scroll();
        if max == 0 {
            0.0
        } else {
            self.scroll as f64 / max as f64
        }
    }

    /// The slice of lines currently inside the viewport.
    pub fn visible_lines(&self) -> &[String] {
        let start = self.scroll.min(self.lines.len());
        let end = (start + self.height).min(self.lines.len());
        &self.lines[start..end]
    }

    /// Recompute the viewport, keeping the scroll fraction stable so a
    /// resize does not jump the reading position.
    pub fn resize(&mut self, width: usize, height: usize) {
        let fraction = self.scroll_fraction();
        self.width = width.max(1);
        self.height = height.max(1);
        let max = self.max_scroll();
        self.scroll = ((fraction * max as f64).round() as usize).min(max);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let page = self.height;
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.scroll_by(1),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_by(-1),
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.scroll_by(page as isize)
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.scroll_by(-(page as isize))
            }
            KeyCode::PageDown => self.scroll_by(page as isize),
            KeyCode::PageUp => self.scroll_by(-(page as isize)),
            KeyCode::Char('g') | KeyCode::Home => self.scroll = 0,
            KeyCode::Char('G') | KeyCode::End => self.scroll = self.max_scroll(),
            _ => {}
        }
    }

    fn max_scroll(&self) -> usize {
        self.lines.len().saturating_sub(self.height)
    }

    fn scroll_by(&mut self, delta: isize) {
        let next = self.scroll as isize + delta;
        self.scroll = next.clamp(0, self.max_scroll() as isize) as usize;
    }
}

impl Default for DetailViewer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PrCommit, PrFile, PrState, Reviewer};
    use chrono::{TimeZone, Utc};

    fn detail() -> PrDetail {
        PrDetail {
            number: 7,
            title: "Add retry logic".to_string(),
            url: "https://github.com/o/r/pull/7".to_string(),
            body: Some("Retries transient failures.\nSecond line.".to_string()),
            state: PrState::Open,
            author: "alice".to_string(),
            base_branch: "main".to_string(),
            head_branch: "retry".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 2, 12, 0, 0).unwrap(),
            reviewers: vec![
                Reviewer {
                    login: "bob".to_string(),
                },
                Reviewer {
                    login: "carol".to_string(),
                },
            ],
            commits: vec![PrCommit {
                headline: "add retry".to_string(),
                body: String::new(),
                authors: vec!["alice".to_string()],
                committed_at: Utc.with_ymd_and_hms(2024, 1, 2, 12, 0, 0).unwrap(),
            }],
            files: vec![
                PrFile {
                    path: "src/retry.rs".to_string(),
                    additions: 40,
                    deletions: 2,
                },
                PrFile {
                    path: "src/removed.rs".to_string(),
                    additions: 0,
                    deletions: 17,
                },
                PrFile {
                    path: "docs/added.md".to_string(),
                    additions: 5,
                    deletions: 0,
                },
            ],
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn buffer_sections_appear_in_order() {
        let text = assemble_detail(&detail());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Add retry logic",
                "alice wants to merge 1 commit into main from retry",
                "Retries transient failures.",
                "Second line.",
                "bob",
                "carol",
                "• add retry by alice",
                "src/retry.rs +40 -2",
                "src/removed.rs -17",
                "docs/added.md +5",
            ]
        );
    }

    #[test]
    fn assembly_is_idempotent() {
        let pr = detail();
        assert_eq!(assemble_detail(&pr), assemble_detail(&pr));
    }

    #[test]
    fn empty_body_renders_placeholder() {
        let mut pr = detail();
        pr.body = None;
        assert!(assemble_detail(&pr)
            .lines()
            .any(|l| l == "No description provided"));

        pr.body = Some(String::new());
        assert!(assemble_detail(&pr)
            .lines()
            .any(|l| l == "No description provided"));
    }

    #[test]
    fn markers_only_for_nonzero_counts() {
        let text = assemble_detail(&detail());
        assert!(text.contains("src/removed.rs -17"));
        assert!(!text.contains("src/removed.rs +0"));
        assert!(text.contains("docs/added.md +5"));
        assert!(!text.contains("docs/added.md +5 -0"));
    }

    #[test]
    fn fraction_is_zero_when_content_fits() {
        let mut viewer = DetailViewer::new();
        viewer.resize(80, 10);
        viewer.set_content("one\ntwo\nthree");
        assert_eq!(viewer.scroll_fraction(), 0.0);
        viewer.handle_key(key(KeyCode::Char('j')));
        assert_eq!(viewer.scroll_fraction(), 0.0);
    }

    #[test]
    fn scrolling_moves_the_window_and_clamps() {
        let mut viewer = DetailViewer::new();
        viewer.resize(80, 2);
        viewer.set_content("a\nb\nc\nd");

        assert_eq!(viewer.visible_lines(), ["a", "b"]);
        viewer.handle_key(key(KeyCode::Char('j')));
        assert_eq!(viewer.visible_lines(), ["b", "c"]);
        viewer.handle_key(key(KeyCode::Char('G')));
        assert_eq!(viewer.visible_lines(), ["c", "d"]);
        assert_eq!(viewer.scroll_fraction(), 1.0);
        viewer.handle_key(key(KeyCode::Char('j')));
        assert_eq!(viewer.visible_lines(), ["c", "d"]);
    }

    #[test]
    fn set_content_resets_scroll() {
        let mut viewer = DetailViewer::new();
        viewer.resize(80, 2);
        viewer.set_content("a\nb\nc\nd");
        viewer.handle_key(key(KeyCode::Char('G')));
        viewer.set_content("a\nb\nc\nd");
        assert_eq!(viewer.visible_lines(), ["a", "b"]);
    }

    #[test]
    fn resize_preserves_scroll_fraction() {
        let mut viewer = DetailViewer::new();
        viewer.resize(80, 4);
        let text: String = (0..20).map(|i| format!("line {}\n", i)).collect();
        viewer.set_content(text.trim_end());
        viewer.handle_key(key(KeyCode::Char('G')));
        assert_eq!(viewer.scroll_fraction(), 1.0);

        viewer.resize(80, 8);
        assert_eq!(viewer.scroll_fraction(), 1.0);
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let mut viewer = DetailViewer::new();
        viewer.resize(0, 0);
        viewer.set_content("a\nb\nc");
        viewer.handle_key(key(KeyCode::PageDown));
        assert!(!viewer.visible_lines().is_empty());
    }
}
