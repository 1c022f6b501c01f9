use serde::{Deserialize, Serialize};

/// Maximum number of copied snippets kept on a log.
pub const MAX_COPIED_TEXTS: usize = 10;
/// Maximum characters kept per copied snippet.
pub const MAX_COPIED_TEXT_CHARS: usize = 100;

/// Accumulated client-side telemetry for one question.
///
/// Durations and timestamps are milliseconds. The record is mutated in place by
/// the [`BehaviorTracker`](crate::telemetry::BehaviorTracker) and snapshotted when
/// the answer is submitted; the snapshot stored on an attempt never changes.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BehaviorLog {
    pub start_time: i64,
    pub blur_count: u32,
    pub blur_durations: Vec<u64>,
    pub visibility_change_count: u32,
    pub mouse_move_count: u32,
    pub mouse_inactive_time: u64,
    pub mouse_leave_count: u32,
    pub copy_count: u32,
    pub copied_texts: Vec<String>,
    pub paste_count: u32,
    pub cut_count: u32,
    pub key_press_count: u32,
    pub typing_speed: f64,
    pub right_click_count: u32,
    pub scroll_count: u32,
    pub scroll_distance: f64,
}

impl BehaviorLog {
    pub fn new(start_time: i64) -> Self {
        Self {
            start_time,
            ..Default::default()
        }
    }

    pub fn mouse_inactive_secs(&self) -> f64 {
        self.mouse_inactive_time as f64 / 1000.0
    }

    /// Appends a copied snippet, truncating it and evicting the oldest entries
    /// past [`MAX_COPIED_TEXTS`].
    pub fn push_copied_text(&mut self, text: &str) {
        let snippet: String = text.chars().take(MAX_COPIED_TEXT_CHARS).collect();
        self.copied_texts.push(snippet);
        if self.copied_texts.len() > MAX_COPIED_TEXTS {
            let overflow = self.copied_texts.len() - MAX_COPIED_TEXTS;
            self.copied_texts.drain(..overflow);
        }
    }
}
