//! Event loop wiring the list controller to the network and the view.
//!
//! The driver owns the one [`ListController`]. UI events are handled
//! synchronously: they update the controller and spawn network tasks.
//! Completed fetches and deletes come back over a channel in whatever order
//! they finish and are applied through the controller's staleness check.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::application::debounce::Debouncer;
use crate::application::services::list_controller::{
    DeleteOutcome, ListController, PageOutcome, PageRequest,
};
use crate::domain::entities::{Coupon, Page};
use crate::domain::repositories::CouponRepository;
use crate::error::ApiError;

/// Input from the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Raw search box contents after a keystroke.
    Input(String),
    /// The end-of-list sentinel scrolled into view.
    ScrollEnd,
    /// Delete the coupon with this code.
    Delete(String),
    /// Refetch the current search from page 1.
    Reload,
    Quit,
}

/// State change reported by [`ListDriver::next_update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Update {
    /// A debounced search term started a new session.
    Committed { term: String },
    PageApplied { page: u32, added: usize },
    PageFailed { page: u32, message: String },
    /// A page of a superseded session arrived and was dropped.
    StaleDiscarded { generation: u64, page: u32 },
    Deleted { code: String },
    DeleteFailed { code: String, message: String },
}

/// Renders the list after every change.
pub trait ListView {
    /// `update` is `None` for renders caused directly by a UI event.
    fn render(&mut self, query_input: &str, list: &ListController, update: Option<&Update>);
}

#[derive(Debug)]
enum Completion {
    Page {
        request: PageRequest,
        result: Result<Page<Coupon>, ApiError>,
    },
    Delete {
        generation: u64,
        code: String,
        result: Result<(), ApiError>,
    },
}

/// Drives one coupon list.
pub struct ListDriver<R: CouponRepository + ?Sized + 'static> {
    repository: Arc<R>,
    controller: ListController,
    query_input: String,
    debouncer: Debouncer<String>,
    commits: mpsc::UnboundedReceiver<String>,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
    deleting: HashSet<String>,
}

impl<R: CouponRepository + ?Sized + 'static> ListDriver<R> {
    /// Creates a driver; nothing is fetched until [`Self::mount`].
    ///
    /// Must be called inside a tokio runtime.
    pub fn new(repository: Arc<R>, page_size: u32, debounce: Duration) -> Self {
        let (debouncer, commits) = Debouncer::new(debounce);
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();

        Self {
            repository,
            controller: ListController::new(page_size),
            query_input: String::new(),
            debouncer,
            commits,
            completions_tx,
            completions_rx,
            deleting: HashSet::new(),
        }
    }

    pub fn controller(&self) -> &ListController {
        &self.controller
    }

    /// Search box contents as typed, before debouncing.
    pub fn query_input(&self) -> &str {
        &self.query_input
    }

    /// Fetches the first page of the initial (empty) search.
    pub fn mount(&mut self) {
        if let Some(request) = self.controller.mount() {
            self.spawn_fetch(request);
        }
    }

    /// Records a keystroke; the search commits after the quiet period.
    pub fn on_input(&mut self, text: &str) {
        self.query_input = text.to_string();
        self.debouncer.push(text.to_string());
    }

    pub fn on_sentinel_visible(&mut self) {
        if let Some(request) = self.controller.sentinel_visible() {
            self.spawn_fetch(request);
        }
    }

    /// Starts a remote delete; the list changes once the service confirms it.
    ///
    /// A second delete of a code still being deleted is ignored.
    pub fn on_delete(&mut self, code: &str) {
        if !self.deleting.insert(code.to_string()) {
            debug!(code, "Delete already in flight");
            return;
        }

        let repository = Arc::clone(&self.repository);
        let tx = self.completions_tx.clone();
        let code = code.to_string();
        let generation = self.controller.generation();
        tokio::spawn(async move {
            let result = repository.delete(&code).await;
            let _ = tx.send(Completion::Delete {
                generation,
                code,
                result,
            });
        });
    }

    /// Restarts the committed search, dropping any search still debouncing.
    pub fn on_reload(&mut self) {
        self.debouncer.cancel();
        // a term may have fired already and be waiting to be committed
        while self.commits.try_recv().is_ok() {}
        self.query_input = self.controller.state().search_term().to_string();
        let request = self.controller.reload();
        self.spawn_fetch(request);
    }

    /// Handles one UI event. Returns false for [`UiEvent::Quit`].
    pub fn handle(&mut self, event: UiEvent) -> bool {
        match event {
            UiEvent::Input(text) => self.on_input(&text),
            UiEvent::ScrollEnd => self.on_sentinel_visible(),
            UiEvent::Delete(code) => self.on_delete(&code),
            UiEvent::Reload => self.on_reload(),
            UiEvent::Quit => return false,
        }
        true
    }

    /// Waits for the next debounce commit or network completion and applies it.
    ///
    /// Cancel-safe: nothing is applied until a message has been received.
    pub async fn next_update(&mut self) -> Update {
        loop {
            tokio::select! {
                Some(term) = self.commits.recv() => {
                    if let Some(update) = self.commit(term) {
                        return update;
                    }
                }
                Some(completion) = self.completions_rx.recv() => {
                    return self.complete(completion);
                }
            }
        }
    }

    /// Runs until [`UiEvent::Quit`] or until `events` closes.
    pub async fn run<V: ListView>(&mut self, mut events: mpsc::Receiver<UiEvent>, view: &mut V) {
        self.mount();
        view.render(&self.query_input, &self.controller, None);

        loop {
            tokio::select! {
                event = events.recv() => {
                    let Some(event) = event else { break };
                    if !self.handle(event) {
                        break;
                    }
                    view.render(&self.query_input, &self.controller, None);
                }
                update = self.next_update() => {
                    view.render(&self.query_input, &self.controller, Some(&update));
                }
            }
        }

        self.debouncer.cancel();
        debug!("List driver stopped");
    }

    fn commit(&mut self, term: String) -> Option<Update> {
        let request = self.controller.commit_search(&term)?;
        self.spawn_fetch(request);
        Some(Update::Committed {
            term: self.controller.state().search_term().to_string(),
        })
    }

    fn complete(&mut self, completion: Completion) -> Update {
        match completion {
            Completion::Page { request, result } => {
                match self.controller.apply_page(&request, result) {
                    PageOutcome::Applied { added } => Update::PageApplied {
                        page: request.page,
                        added,
                    },
                    PageOutcome::Failed => {
                        let message = self.controller.error().unwrap_or_default().to_string();
                        warn!(page = request.page, %message, "Failed to load coupons");
                        Update::PageFailed {
                            page: request.page,
                            message,
                        }
                    }
                    PageOutcome::Stale => Update::StaleDiscarded {
                        generation: request.generation,
                        page: request.page,
                    },
                }
            }
            Completion::Delete {
                generation,
                code,
                result,
            } => {
                self.deleting.remove(&code);
                match self.controller.apply_delete(generation, &code, result) {
                    DeleteOutcome::Removed
                    | DeleteOutcome::NotListed
                    | DeleteOutcome::Superseded => Update::Deleted { code },
                    DeleteOutcome::Failed => {
                        let message = self.controller.error().unwrap_or_default().to_string();
                        warn!(%code, %message, "Failed to delete coupon");
                        Update::DeleteFailed { code, message }
                    }
                }
            }
        }
    }

    fn spawn_fetch(&self, request: PageRequest) {
        debug!(
            generation = request.generation,
            page = request.page,
            offset = request.query.offset,
            "Fetching coupons"
        );

        let repository = Arc::clone(&self.repository);
        let tx = self.completions_tx.clone();
        tokio::spawn(async move {
            let result = repository.list(&request.query).await;
            let _ = tx.send(Completion::Page { request, result });
        });
    }
}
