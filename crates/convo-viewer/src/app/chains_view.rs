use chrono::{DateTime, Local};
use convo_tree::{ChainsPayload, ChainsResponse, Pager, Tweet};

use super::{Command, Event};
use crate::fetch::FetchTarget;

/// State of the precomputed-chains viewer.
#[derive(Debug)]
pub struct ChainsView {
    pub url: String,
    pub loading: bool,
    /// Text for the error region, set by a failed fetch.
    pub error: Option<String>,
    /// Last payload received. Kept across a response without data.
    pub payload: Option<ChainsPayload>,
    /// The server has no completed run; offer a manual refetch.
    pub show_refetch: bool,
    pub pager: Pager,
    pub fetched_at: Option<DateTime<Local>>,
}

impl ChainsView {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            loading: false,
            error: None,
            payload: None,
            show_refetch: false,
            pager: Pager::default(),
            fetched_at: None,
        }
    }

    pub fn target(&self) -> FetchTarget {
        FetchTarget::Chains {
            url: self.url.clone(),
        }
    }

    /// Refetching is offered when there is no data yet or the last
    /// attempt failed.
    pub fn can_refetch(&self) -> bool {
        self.show_refetch || self.error.is_some()
    }

    pub fn update(&mut self, event: Event) -> Command {
        match event {
            Event::Prev => redraw_if(self.pager.prev()),
            Event::Next => redraw_if(self.pager.next()),
            Event::Refetch if self.can_refetch() => {
                self.begin_fetch();
                Command::Fetch
            }
            Event::Quit => Command::Quit,
            _ => Command::None,
        }
    }

    pub fn begin_fetch(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn finish_fetch(&mut self, result: Result<ChainsResponse, String>) -> Command {
        self.loading = false;
        self.fetched_at = Some(Local::now());

        match result {
            Ok(ChainsResponse { data: Some(payload) }) => {
                self.pager.resize(payload.conversation_chains.len());
                self.payload = Some(payload);
                self.show_refetch = false;
            }
            Ok(ChainsResponse { data: None }) => {
                self.show_refetch = true;
            }
            Err(message) => {
                tracing::warn!(url = %self.url, error = %message, "Chains fetch failed");
                self.error = Some(message);
            }
        }
        Command::Redraw
    }

    /// Tweets of the chain on screen. Empty when there is nothing to show.
    pub fn current_chain(&self) -> Vec<(&str, &Tweet)> {
        let Some(payload) = &self.payload else {
            return Vec::new();
        };
        if payload.conversation_chains.is_empty() {
            tracing::debug!("No conversation chains to show");
            return Vec::new();
        }
        self.pager
            .current()
            .and_then(|i| payload.resolve_chain(i))
            .unwrap_or_default()
    }

    /// `"3/12 conversations"`.
    pub fn position_label(&self) -> Option<String> {
        let payload = self.payload.as_ref()?;
        let index = self.pager.current()?;
        Some(format!("{}/{} conversations", index + 1, payload.total()))
    }

    pub fn last_run_at(&self) -> Option<&str> {
        self.payload.as_ref().map(|p| p.last_run_at.as_str())
    }
}

pub(super) fn redraw_if(changed: bool) -> Command {
    if changed {
        Command::Redraw
    } else {
        Command::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(chains: usize) -> ChainsResponse {
        let json = serde_json::json!({
            "data": {
                "allTweets": {
                    "t1": {"text": "hello", "authorName": "ann", "createdAt": "d1"},
                    "t2": {"text": "world", "authorName": "bo", "createdAt": "d2"}
                },
                "conversationChains": (0..chains).map(|_| vec!["t1", "t2"]).collect::<Vec<_>>(),
                "totalConversationsCount": chains,
                "lastRunAt": "2024-05-01T00:00:00Z"
            }
        });
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn successful_fetch_populates_and_hides_refetch() {
        let mut view = ChainsView::new("http://x/data");
        view.begin_fetch();
        assert!(view.loading);
        assert_eq!(view.finish_fetch(Ok(response(3))), Command::Redraw);
        assert!(!view.loading);
        assert!(!view.show_refetch);
        assert_eq!(view.position_label().as_deref(), Some("1/3 conversations"));
        assert_eq!(view.current_chain().len(), 2);
        assert_eq!(view.last_run_at(), Some("2024-05-01T00:00:00Z"));
    }

    #[test]
    fn missing_data_offers_refetch() {
        let mut view = ChainsView::new("http://x/data");
        view.begin_fetch();
        view.finish_fetch(Ok(ChainsResponse::default()));
        assert!(!view.loading);
        assert!(view.show_refetch);
        assert!(view.current_chain().is_empty());
        assert_eq!(view.update(Event::Refetch), Command::Fetch);
        assert!(view.loading);
    }

    #[test]
    fn failure_sets_error_and_clears_loading() {
        let mut view = ChainsView::new("http://x/data");
        view.begin_fetch();
        view.finish_fetch(Err("connection refused".into()));
        assert!(!view.loading);
        assert_eq!(view.error.as_deref(), Some("connection refused"));
        // a new attempt clears the error region
        assert_eq!(view.update(Event::Refetch), Command::Fetch);
        assert!(view.error.is_none());
    }

    #[test]
    fn refetch_is_not_offered_while_data_is_shown() {
        let mut view = ChainsView::new("http://x/data");
        view.finish_fetch(Ok(response(1)));
        assert_eq!(view.update(Event::Refetch), Command::None);
    }

    #[test]
    fn paging_redraws_only_on_movement() {
        let mut view = ChainsView::new("http://x/data");
        view.finish_fetch(Ok(response(2)));
        assert_eq!(view.update(Event::Prev), Command::None);
        assert_eq!(view.update(Event::Next), Command::Redraw);
        assert_eq!(view.position_label().as_deref(), Some("2/2 conversations"));
        assert_eq!(view.update(Event::Next), Command::None);
        assert_eq!(view.update(Event::Prev), Command::Redraw);
    }

    #[test]
    fn refetch_keeps_position_when_still_valid() {
        let mut view = ChainsView::new("http://x/data");
        view.finish_fetch(Ok(response(3)));
        view.update(Event::Next);
        view.update(Event::Next);
        view.finish_fetch(Ok(response(5)));
        assert_eq!(view.pager.index(), 2);
        view.finish_fetch(Ok(response(1)));
        assert_eq!(view.pager.index(), 0);
    }

    #[test]
    fn empty_chain_list_renders_nothing() {
        let mut view = ChainsView::new("http://x/data");
        view.finish_fetch(Ok(response(0)));
        assert!(view.current_chain().is_empty());
        assert!(view.position_label().is_none());
        assert_eq!(view.update(Event::Next), Command::None);
    }

    #[test]
    fn tree_only_events_are_ignored() {
        let mut view = ChainsView::new("http://x/data");
        assert_eq!(view.update(Event::ToggleView), Command::None);
        assert_eq!(view.update(Event::ZoomIn), Command::None);
        assert_eq!(view.update(Event::Quit), Command::Quit);
    }
}
