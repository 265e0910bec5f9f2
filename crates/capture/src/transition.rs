//! Transition recording.
//!
//! The browser host forwards navigation-triggering events (clicks,
//! history API calls, popstate, hashchange); the recorder tracks the
//! current URL and turns each event into a storable draft with the
//! trigger classification and, for clicks, a best-effort selector and
//! label of the triggering element.

use serde::Serialize;

use crate::dom::DomNode;
use crate::loading::LoadingIndicator;

/// Longest trigger-element label kept on a draft.
const MAX_TRIGGER_TEXT: usize = 80;

/// How a captured transition was initiated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TriggerType {
    Click,
    PushState,
    ReplaceState,
    PopState,
    HashChange,
}

impl TriggerType {
    /// Wire/storage name, matching the capture strategy contract.
    pub fn as_str(self) -> &'static str {
        match self {
            TriggerType::Click => "click",
            TriggerType::PushState => "pushState",
            TriggerType::ReplaceState => "replaceState",
            TriggerType::PopState => "popstate",
            TriggerType::HashChange => "hashchange",
        }
    }
}

/// Whether the capture session was driven by a user or an automated
/// crawl.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureMode {
    Manual,
    Auto,
}

impl CaptureMode {
    pub fn as_str(self) -> &'static str {
        match self {
            CaptureMode::Manual => "manual",
            CaptureMode::Auto => "auto",
        }
    }
}

/// A navigation-triggering event as reported by the browser host.
#[derive(Debug, Clone)]
pub enum NavigationEvent {
    /// A click on a link or interactive element. `target_url` is set
    /// when the host could determine where the click leads.
    Click {
        element: DomNode,
        target_url: Option<String>,
    },
    PushState { url: String },
    ReplaceState { url: String },
    PopState { url: Option<String> },
    HashChange { url: String },
}

/// An observed transition, ready to be persisted by the capture
/// orchestration.
#[derive(Debug, Clone, Serialize)]
pub struct TransitionDraft {
    pub trigger: TriggerType,
    pub source_url: String,
    pub target_url: Option<String>,
    pub trigger_selector: Option<String>,
    pub trigger_text: Option<String>,
    pub capture_mode: CaptureMode,
    pub had_loading_indicator: bool,
    pub loading_indicator_type: Option<&'static str>,
    pub loading_time_ms: Option<u64>,
}

impl TransitionDraft {
    /// Attach a loading classification measured after the event fired.
    pub fn with_loading(mut self, indicator: &LoadingIndicator) -> Self {
        self.had_loading_indicator = indicator.detected;
        self.loading_indicator_type = indicator.kind.map(|k| k.as_str());
        self.loading_time_ms = indicator.duration_ms;
        self
    }
}

/// Tracks the page URL across events and produces transition drafts.
pub struct TransitionRecorder {
    current_url: String,
    capture_mode: CaptureMode,
}

impl TransitionRecorder {
    pub fn new(initial_url: impl Into<String>, capture_mode: CaptureMode) -> Self {
        TransitionRecorder {
            current_url: initial_url.into(),
            capture_mode,
        }
    }

    pub fn current_url(&self) -> &str {
        &self.current_url
    }

    /// Record one navigation event. The draft's source URL is the URL
    /// tracked before the event; when the event names a target URL the
    /// recorder advances to it.
    pub fn record(&mut self, event: NavigationEvent) -> TransitionDraft {
        let source_url = self.current_url.clone();

        let (trigger, target_url, selector, text) = match event {
            NavigationEvent::Click {
                element,
                target_url,
            } => {
                let text = element.text.trim();
                let text = (!text.is_empty())
                    .then(|| text.chars().take(MAX_TRIGGER_TEXT).collect::<String>());
                (
                    TriggerType::Click,
                    target_url,
                    Some(element.selector()),
                    text,
                )
            }
            NavigationEvent::PushState { url } => (TriggerType::PushState, Some(url), None, None),
            NavigationEvent::ReplaceState { url } => {
                (TriggerType::ReplaceState, Some(url), None, None)
            }
            NavigationEvent::PopState { url } => (TriggerType::PopState, url, None, None),
            NavigationEvent::HashChange { url } => (TriggerType::HashChange, Some(url), None, None),
        };

        if let Some(url) = &target_url {
            self.current_url = url.clone();
        }

        TransitionDraft {
            trigger,
            source_url,
            target_url,
            trigger_selector: selector,
            trigger_text: text,
            capture_mode: self.capture_mode,
            had_loading_indicator: false,
            loading_indicator_type: None,
            loading_time_ms: None,
        }
    }
}
