use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::models::domain::BehaviorLog;
use crate::telemetry::throttle::Throttle;

const MOUSE_SAMPLE_INTERVAL_MS: i64 = 100;
const MOUSE_INACTIVE_THRESHOLD_MS: i64 = 5_000;
const TYPING_WINDOW_MS: i64 = 10_000;
const TYPING_WINDOW_SECS: f64 = 10.0;

/// A browser-level signal observed while a question is on screen.
/// Timestamps are epoch milliseconds taken by the client when the event fired.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    Blur { at: i64 },
    Focus { at: i64 },
    VisibilityChange { at: i64, hidden: bool },
    MouseMove { at: i64 },
    MouseLeave,
    Copy { selection: Option<String> },
    Paste,
    Cut,
    KeyDown { at: i64 },
    ContextMenu,
    Scroll,
}

type Observer = Box<dyn FnMut(&BehaviorLog) + Send>;

/// Folds telemetry events into a [`BehaviorLog`].
///
/// Every handler runs synchronously and only touches in-memory state. When an
/// observer is registered it receives the updated log after each change, so the
/// caller always holds a current copy to snapshot on submission.
pub struct BehaviorTracker {
    log: BehaviorLog,
    blur_started_at: Option<i64>,
    last_mouse_sample: i64,
    mouse_throttle: Throttle,
    key_presses: VecDeque<i64>,
    observer: Option<Observer>,
}

impl BehaviorTracker {
    pub fn new(start_time: i64) -> Self {
        Self {
            log: BehaviorLog::new(start_time),
            blur_started_at: None,
            last_mouse_sample: start_time,
            mouse_throttle: Throttle::new(MOUSE_SAMPLE_INTERVAL_MS),
            key_presses: VecDeque::new(),
            observer: None,
        }
    }

    pub fn with_observer<F>(mut self, observer: F) -> Self
    where
        F: FnMut(&BehaviorLog) + Send + 'static,
    {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn log(&self) -> &BehaviorLog {
        &self.log
    }

    /// Deep copy of the current log, taken when an answer is submitted.
    pub fn snapshot(&self) -> BehaviorLog {
        self.log.clone()
    }

    /// Starts a fresh log, e.g. when the next question is shown.
    pub fn reset(&mut self, start_time: i64) {
        self.log = BehaviorLog::new(start_time);
        self.blur_started_at = None;
        self.last_mouse_sample = start_time;
        self.mouse_throttle = Throttle::new(MOUSE_SAMPLE_INTERVAL_MS);
        self.key_presses.clear();
        self.notify();
    }

    pub fn handle(&mut self, event: TelemetryEvent) {
        match event {
            TelemetryEvent::Blur { at } => self.on_blur(at),
            TelemetryEvent::Focus { at } => self.on_focus(at),
            TelemetryEvent::VisibilityChange { at, hidden } => self.on_visibility_change(at, hidden),
            TelemetryEvent::MouseMove { at } => self.on_mouse_move(at),
            TelemetryEvent::MouseLeave => self.on_mouse_leave(),
            TelemetryEvent::Copy { selection } => self.on_copy(selection.as_deref()),
            TelemetryEvent::Paste => self.on_paste(),
            TelemetryEvent::Cut => self.on_cut(),
            TelemetryEvent::KeyDown { at } => self.on_key_down(at),
            TelemetryEvent::ContextMenu => self.on_context_menu(),
            TelemetryEvent::Scroll => self.on_scroll(),
        }
    }

    pub fn on_blur(&mut self, at: i64) {
        self.blur_started_at = Some(at);
        self.log.blur_count += 1;
        self.notify();
    }

    pub fn on_focus(&mut self, at: i64) {
        // A focus without a preceding blur carries no duration.
        if let Some(started) = self.blur_started_at.take() {
            self.log.blur_durations.push((at - started).max(0) as u64);
            self.notify();
        }
    }

    pub fn on_visibility_change(&mut self, at: i64, hidden: bool) {
        if hidden {
            self.on_blur(at);
            self.log.visibility_change_count += 1;
            self.notify();
        } else {
            self.on_focus(at);
        }
    }

    pub fn on_mouse_move(&mut self, at: i64) {
        if !self.mouse_throttle.admit(at) {
            return;
        }

        let gap = at - self.last_mouse_sample;
        if gap > MOUSE_INACTIVE_THRESHOLD_MS {
            self.log.mouse_inactive_time += gap as u64;
        }
        self.log.mouse_move_count += 1;
        self.last_mouse_sample = at;
        self.notify();
    }

    pub fn on_mouse_leave(&mut self) {
        self.log.mouse_leave_count += 1;
        self.notify();
    }

    pub fn on_copy(&mut self, selection: Option<&str>) {
        self.log.copy_count += 1;
        self.log.push_copied_text(selection.unwrap_or_default());
        self.notify();
    }

    pub fn on_paste(&mut self) {
        self.log.paste_count += 1;
        self.notify();
    }

    pub fn on_cut(&mut self) {
        self.log.cut_count += 1;
        self.notify();
    }

    pub fn on_key_down(&mut self, at: i64) {
        self.key_presses.push_back(at);
        while let Some(&oldest) = self.key_presses.front() {
            if at - oldest >= TYPING_WINDOW_MS {
                self.key_presses.pop_front();
            } else {
                break;
            }
        }

        self.log.key_press_count += 1;
        self.log.typing_speed = self.key_presses.len() as f64 / TYPING_WINDOW_SECS;
        self.notify();
    }

    /// Counted only; the context menu itself is never suppressed.
    pub fn on_context_menu(&mut self) {
        self.log.right_click_count += 1;
        self.notify();
    }

    pub fn on_scroll(&mut self) {
        self.log.scroll_count += 1;
        self.notify();
    }

    fn notify(&mut self) {
        if let Some(observer) = self.observer.as_mut() {
            observer(&self.log);
        }
    }
}
