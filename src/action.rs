use crossterm::event::KeyEvent;

use crate::types::{PrDetail, PrSummary};

/// Everything the loop applies to the app, keyboard-derived intents and
/// async fetch results alike. Fetch results carry the generation of the
/// request that produced them; the app drops results whose generation is
/// no longer current.
#[derive(Debug, Clone)]
pub enum Action {
    Quit,
    Back,

    // List
    LoadList,
    ListLoaded(Vec<PrSummary>, u64),
    ListKey(KeyEvent),

    // Detail
    OpenDetail,
    DetailLoaded(Box<PrDetail>, u64),
    DetailKey(KeyEvent),

    // Diff handoff. `ViewDiff` is the intent; the app validates the
    // selection and emits `SuspendForDiff`, which the run loop services
    // before handing anything back to the app.
    ViewDiff,
    SuspendForDiff(u64),
    DiffFinished(Option<String>),

    OpenInBrowser,

    FetchFailed(String, u64),
    Resize(u16, u16),
    None,
}
