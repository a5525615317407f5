//! Paginated, searchable coupon list with infinite-scroll loading.
//!
//! [`ListController`] is a pure state machine: operations that need the
//! network hand back a [`PageRequest`], and the caller feeds the result back
//! through [`ListController::apply_page`]. Keeping I/O out makes the
//! staleness rules easy to drive from tests and from any event loop
//! (see [`crate::application::list_driver`]).
//!
//! # States
//!
//! ```text
//! Idle ──mount──▶ LoadingFirstPage ──ok──▶ Ready ──sentinel──▶ LoadingMore
//!                    │    ▲                  ▲                    │   │
//!                   err   └──commit_search───┤◀────────ok─────────┘  err
//!                    ▼                       │                        │
//!                  Error ◀───────────────────┴────────────────────────┘
//! ```
//!
//! Every committed search term opens a new session with a fresh generation
//! number. Results are applied only if they belong to the current
//! generation's in-flight request; anything else is stale and dropped.

use std::collections::HashSet;

use tracing::debug;

use crate::api::dto::ListQuery;
use crate::domain::entities::{Coupon, Page};
use crate::error::ApiError;

/// Items requested per fetch unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

const FETCH_FAILED: &str = "Failed to fetch coupons";
const DELETE_FAILED: &str = "Failed to delete coupon";

/// Loading state of the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStatus {
    Idle,
    LoadingFirstPage,
    LoadingMore,
    Ready,
    Error,
}

impl ListStatus {
    pub fn is_loading(self) -> bool {
        matches!(self, Self::LoadingFirstPage | Self::LoadingMore)
    }
}

/// Coupons loaded so far for the current search term.
#[derive(Debug, Clone, PartialEq)]
pub struct PageState {
    items: Vec<Coupon>,
    total_count: u64,
    current_page: u32,
    page_size: u32,
    search_term: String,
}

impl PageState {
    fn new(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            current_page: 0,
            page_size: page_size.max(1),
            search_term: String::new(),
        }
    }

    /// Loaded coupons in server order.
    pub fn items(&self) -> &[Coupon] {
        &self.items
    }

    /// Matching coupons on the server, as last reported (minus local deletions).
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Last page applied in this session; 0 until the first page lands.
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Committed search term ("" means no filter).
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// True iff the server holds more matches than the pages loaded so far.
    pub fn has_more(&self) -> bool {
        self.total_count > u64::from(self.current_page) * u64::from(self.page_size)
    }

    fn reset(&mut self, term: String) {
        self.items.clear();
        self.total_count = 0;
        self.current_page = 0;
        self.search_term = term;
    }

    /// Appends `incoming`, skipping codes that are already listed.
    ///
    /// Returns the number of coupons actually added.
    fn append(&mut self, incoming: Vec<Coupon>) -> usize {
        let mut seen: HashSet<String> = self.items.iter().map(|c| c.code.clone()).collect();
        let before = self.items.len();

        for coupon in incoming {
            if seen.insert(coupon.code.clone()) {
                self.items.push(coupon);
            } else {
                debug!(code = %coupon.code, "Skipping coupon already listed");
            }
        }

        self.items.len() - before
    }
}

/// One page fetch, tagged with the session it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub generation: u64,
    pub page: u32,
    pub query: ListQuery,
}

/// What [`ListController::apply_page`] did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// Result applied; `added` coupons joined the list.
    Applied { added: usize },
    /// Fetch failed; the list is unchanged and an error message is stored.
    Failed,
    /// Result belonged to a superseded session or request and was dropped.
    Stale,
}

/// What [`ListController::apply_delete`] did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Coupon removed from the list and the total decremented.
    Removed,
    /// Deleted on the server but not in the loaded pages; only the total changed.
    NotListed,
    /// Deleted on the server for an earlier session; the current list is untouched.
    Superseded,
    /// Delete failed; nothing changed.
    Failed,
}

/// Owns the paging state of the coupon list.
#[derive(Debug)]
pub struct ListController {
    state: PageState,
    status: ListStatus,
    generation: u64,
    in_flight: Option<u32>,
    error: Option<String>,
}

impl ListController {
    pub fn new(page_size: u32) -> Self {
        Self {
            state: PageState::new(page_size),
            status: ListStatus::Idle,
            generation: 0,
            in_flight: None,
            error: None,
        }
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn status(&self) -> ListStatus {
        self.status
    }

    /// Message of the last failed fetch or delete, cleared by the next success.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Current session number; bumped by every new session.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True while a page fetch of the current session is outstanding.
    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Starts the first session with the current (initially empty) term.
    ///
    /// Returns `None` if the list was already mounted.
    pub fn mount(&mut self) -> Option<PageRequest> {
        if self.status != ListStatus::Idle {
            return None;
        }
        let term = self.state.search_term.clone();
        Some(self.start_session(term))
    }

    /// Commits a debounced search term.
    ///
    /// Opens a new session unless the term equals the committed one and the
    /// session is healthy; use [`Self::reload`] to force a refetch.
    pub fn commit_search(&mut self, term: &str) -> Option<PageRequest> {
        let term = term.trim();
        let unchanged = term == self.state.search_term;

        if unchanged && !matches!(self.status, ListStatus::Idle | ListStatus::Error) {
            debug!(term, "Search term unchanged, keeping session");
            return None;
        }

        Some(self.start_session(term.to_string()))
    }

    /// Restarts the current search from page 1.
    pub fn reload(&mut self) -> PageRequest {
        let term = self.state.search_term.clone();
        self.start_session(term)
    }

    /// Reacts to the end-of-list sentinel becoming visible.
    ///
    /// Returns the next page request only if the session is settled
    /// (`Ready` or `Error`), nothing is in flight and more items exist.
    pub fn sentinel_visible(&mut self) -> Option<PageRequest> {
        if !matches!(self.status, ListStatus::Ready | ListStatus::Error) {
            return None;
        }
        if self.in_flight.is_some() || !self.state.has_more() {
            return None;
        }

        let page = self.state.current_page + 1;
        self.status = if page == 1 {
            ListStatus::LoadingFirstPage
        } else {
            ListStatus::LoadingMore
        };

        debug!(generation = self.generation, page, "Loading next page");
        Some(self.issue(page))
    }

    /// Applies the result of a page fetch.
    ///
    /// Results for anything other than the current session's in-flight
    /// request are discarded without touching the state.
    pub fn apply_page(
        &mut self,
        request: &PageRequest,
        result: Result<Page<Coupon>, ApiError>,
    ) -> PageOutcome {
        if request.generation != self.generation || self.in_flight != Some(request.page) {
            debug!(
                generation = request.generation,
                current = self.generation,
                page = request.page,
                "Discarding stale page"
            );
            return PageOutcome::Stale;
        }
        self.in_flight = None;

        match result {
            Ok(page) => {
                if request.page == 1 {
                    self.state.items.clear();
                }
                let added = self.state.append(page.items);
                self.state.total_count = page.total;
                self.state.current_page = request.page;
                self.status = ListStatus::Ready;
                self.error = None;

                debug!(
                    page = request.page,
                    added,
                    total = page.total,
                    has_more = self.state.has_more(),
                    "Page applied"
                );
                PageOutcome::Applied { added }
            }
            Err(e) => {
                self.error = Some(e.user_message(FETCH_FAILED));
                self.status = ListStatus::Error;
                debug!(page = request.page, error = %e, "Page fetch failed");
                PageOutcome::Failed
            }
        }
    }

    /// Applies the result of a remote delete started during session `generation`.
    ///
    /// The list changes only once the service confirmed the deletion. A listed
    /// coupon is removed and counted off the total whatever the session. An
    /// unlisted code only lowers the total of the session it was deleted from;
    /// a newer session's total never included it.
    pub fn apply_delete(
        &mut self,
        generation: u64,
        code: &str,
        result: Result<(), ApiError>,
    ) -> DeleteOutcome {
        match result {
            Ok(()) => {
                self.error = None;

                match self.state.items.iter().position(|c| c.code == code) {
                    Some(index) => {
                        self.state.items.remove(index);
                        self.state.total_count = self.state.total_count.saturating_sub(1);
                        DeleteOutcome::Removed
                    }
                    None if generation == self.generation => {
                        self.state.total_count = self.state.total_count.saturating_sub(1);
                        DeleteOutcome::NotListed
                    }
                    None => {
                        debug!(
                            code,
                            generation,
                            current = self.generation,
                            "Delete confirmed for a superseded session"
                        );
                        DeleteOutcome::Superseded
                    }
                }
            }
            Err(e) => {
                self.error = Some(e.user_message(DELETE_FAILED));
                DeleteOutcome::Failed
            }
        }
    }

    fn start_session(&mut self, term: String) -> PageRequest {
        self.generation += 1;
        self.state.reset(term);
        self.status = ListStatus::LoadingFirstPage;
        self.error = None;

        debug!(
            generation = self.generation,
            term = %self.state.search_term,
            "New list session"
        );
        self.issue(1)
    }

    fn issue(&mut self, page: u32) -> PageRequest {
        self.in_flight = Some(page);
        PageRequest {
            generation: self.generation,
            page,
            query: ListQuery::for_page(page, self.state.page_size, &self.state.search_term),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{CouponType, UsageMode};
    use chrono::{Duration, Utc};

    fn coupon(code: &str) -> Coupon {
        let now = Utc::now();
        Coupon {
            code: code.to_string(),
            title: format!("Coupon {code}"),
            description: String::new(),
            kind: CouponType::Fixed,
            usage_mode: UsageMode::Manual,
            discount_value: 10000.0,
            expires_at: now + Duration::days(30),
            created_at: now,
            updated_at: now,
        }
    }

    fn page(range: std::ops::Range<u32>, total: u64) -> Page<Coupon> {
        let items = range.map(|i| coupon(&format!("C{i:03}"))).collect();
        Page::new(items, total, 20, 0)
    }

    fn codes(c: &ListController) -> Vec<String> {
        c.state().items().iter().map(|c| c.code.clone()).collect()
    }

    fn assert_has_more_invariant(c: &ListController) {
        let s = c.state();
        assert_eq!(
            s.has_more(),
            s.total_count() > u64::from(s.current_page()) * u64::from(s.page_size())
        );
    }

    #[test]
    fn test_mount_requests_first_page_once() {
        let mut c = ListController::new(20);
        assert_eq!(c.status(), ListStatus::Idle);

        let req = c.mount().unwrap();
        assert_eq!(req.page, 1);
        assert_eq!(req.query, ListQuery::for_page(1, 20, ""));
        assert_eq!(c.status(), ListStatus::LoadingFirstPage);

        assert!(c.mount().is_none());
    }

    #[test]
    fn test_infinite_scroll_scenario() {
        let mut c = ListController::new(20);

        let first = c.mount().unwrap();
        assert_eq!(first.query.offset, 0);
        assert_eq!(
            c.apply_page(&first, Ok(page(0..20, 45))),
            PageOutcome::Applied { added: 20 }
        );
        assert_eq!(c.state().items().len(), 20);
        assert!(c.state().has_more());
        assert_has_more_invariant(&c);

        let second = c.sentinel_visible().unwrap();
        assert_eq!(second.query.offset, 20);
        assert_eq!(c.status(), ListStatus::LoadingMore);
        c.apply_page(&second, Ok(page(20..40, 45)));
        assert_eq!(c.state().items().len(), 40);
        assert!(c.state().has_more());
        assert_has_more_invariant(&c);

        let third = c.sentinel_visible().unwrap();
        assert_eq!(third.query.offset, 40);
        c.apply_page(&third, Ok(page(40..45, 45)));
        assert_eq!(c.state().items().len(), 45);
        assert!(!c.state().has_more());
        assert_eq!(c.status(), ListStatus::Ready);
        assert_has_more_invariant(&c);

        assert!(c.sentinel_visible().is_none());

        let unique: HashSet<String> = codes(&c).into_iter().collect();
        assert_eq!(unique.len(), 45);
    }

    #[test]
    fn test_sentinel_suppressed_while_loading() {
        let mut c = ListController::new(20);
        let first = c.mount().unwrap();

        // first page still loading
        assert!(c.sentinel_visible().is_none());

        c.apply_page(&first, Ok(page(0..20, 100)));
        let second = c.sentinel_visible().unwrap();

        // repeated visibility while the second page is in flight
        assert!(c.sentinel_visible().is_none());
        assert!(c.sentinel_visible().is_none());
        assert!(c.is_fetching());

        c.apply_page(&second, Ok(page(20..40, 100)));
        assert_eq!(c.sentinel_visible().unwrap().page, 3);
    }

    #[test]
    fn test_new_search_discards_outstanding_fetch() {
        let mut c = ListController::new(20);
        let first = c.mount().unwrap();
        c.apply_page(&first, Ok(page(0..20, 45)));
        let stale = c.sentinel_visible().unwrap();

        let search = c.commit_search("SALE").unwrap();
        assert_eq!(search.query.coupon_code.as_deref(), Some("SALE"));
        assert_eq!(search.query.offset, 0);
        assert!(c.state().items().is_empty());
        assert_eq!(c.state().current_page(), 0);

        // the old session's page arrives late
        assert_eq!(
            c.apply_page(&stale, Ok(page(20..40, 45))),
            PageOutcome::Stale
        );
        assert!(c.state().items().is_empty());
        assert_eq!(c.state().total_count(), 0);
        assert_eq!(c.status(), ListStatus::LoadingFirstPage);

        c.apply_page(&search, Ok(page(100..103, 3)));
        assert_eq!(codes(&c), vec!["C100", "C101", "C102"]);
        assert_eq!(c.state().total_count(), 3);
        assert_eq!(c.state().search_term(), "SALE");
    }

    #[test]
    fn test_stale_failure_is_ignored_too() {
        let mut c = ListController::new(20);
        let first = c.mount().unwrap();
        let second = c.commit_search("X").unwrap();

        assert_eq!(c.apply_page(&first, Err(ApiError::Timeout)), PageOutcome::Stale);
        assert!(c.error().is_none());
        assert_eq!(c.status(), ListStatus::LoadingFirstPage);

        c.apply_page(&second, Ok(page(0..1, 1)));
        assert_eq!(c.status(), ListStatus::Ready);
    }

    #[test]
    fn test_duplicate_result_delivery_is_stale() {
        let mut c = ListController::new(20);
        let first = c.mount().unwrap();
        c.apply_page(&first, Ok(page(0..20, 45)));

        assert_eq!(
            c.apply_page(&first, Ok(page(0..20, 45))),
            PageOutcome::Stale
        );
        assert_eq!(c.state().items().len(), 20);
    }

    #[test]
    fn test_unchanged_term_keeps_session() {
        let mut c = ListController::new(20);
        let first = c.mount().unwrap();
        c.apply_page(&first, Ok(page(0..5, 5)));

        assert!(c.commit_search("").is_none());
        assert!(c.commit_search("  ").is_none());
        assert_eq!(c.generation(), 1);

        let req = c.commit_search("A").unwrap();
        assert_eq!(req.generation, 2);
    }

    #[test]
    fn test_first_page_error_envelope() {
        let mut c = ListController::new(20);
        let first = c.mount().unwrap();

        let outcome = c.apply_page(&first, Err(ApiError::rejected("Invalid pagination parameters", 400)));
        assert_eq!(outcome, PageOutcome::Failed);
        assert_eq!(c.status(), ListStatus::Error);
        assert_eq!(c.error(), Some("Invalid pagination parameters"));
        assert!(c.state().items().is_empty());
        assert!(!c.is_fetching());

        // nothing to scroll to; retry is an explicit reload
        assert!(c.sentinel_visible().is_none());
        let retry = c.reload();
        assert_eq!(retry.page, 1);
        assert!(c.error().is_none());
    }

    #[test]
    fn test_next_page_failure_keeps_items_and_allows_retry() {
        let mut c = ListController::new(20);
        let first = c.mount().unwrap();
        c.apply_page(&first, Ok(page(0..20, 45)));
        let second = c.sentinel_visible().unwrap();

        assert_eq!(c.apply_page(&second, Err(ApiError::Timeout)), PageOutcome::Failed);
        assert_eq!(c.status(), ListStatus::Error);
        assert_eq!(c.error(), Some("Failed to fetch coupons"));
        assert_eq!(c.state().items().len(), 20);
        assert_eq!(c.state().current_page(), 1);
        assert!(c.state().has_more());

        let retry = c.sentinel_visible().unwrap();
        assert_eq!(retry.page, 2);
        assert_eq!(retry.query.offset, 20);
        assert_eq!(retry.generation, second.generation);

        c.apply_page(&retry, Ok(page(20..40, 45)));
        assert_eq!(c.state().items().len(), 40);
        assert!(c.error().is_none());
    }

    #[test]
    fn test_overlapping_pages_are_deduplicated() {
        let mut c = ListController::new(20);
        let first = c.mount().unwrap();
        c.apply_page(&first, Ok(page(0..20, 41)));

        // a coupon was created server-side, shifting the next page by one
        let second = c.sentinel_visible().unwrap();
        let outcome = c.apply_page(&second, Ok(page(19..39, 41)));

        assert_eq!(outcome, PageOutcome::Applied { added: 19 });
        assert_eq!(c.state().items().len(), 39);
        let unique: HashSet<String> = codes(&c).into_iter().collect();
        assert_eq!(unique.len(), 39);
    }

    #[test]
    fn test_delete_success_removes_exactly_one() {
        let mut c = ListController::new(20);
        let first = c.mount().unwrap();
        c.apply_page(&first, Ok(page(0..20, 45)));

        assert_eq!(c.apply_delete(c.generation(), "C005", Ok(())), DeleteOutcome::Removed);
        assert_eq!(c.state().items().len(), 19);
        assert_eq!(c.state().total_count(), 44);
        assert!(!codes(&c).contains(&"C005".to_string()));
        assert_eq!(c.status(), ListStatus::Ready);
        assert_has_more_invariant(&c);
    }

    #[test]
    fn test_delete_failure_changes_nothing() {
        let mut c = ListController::new(20);
        let first = c.mount().unwrap();
        c.apply_page(&first, Ok(page(0..20, 45)));
        let before = c.state().clone();

        let outcome = c.apply_delete(c.generation(), "NOPE", Err(ApiError::rejected("not found", 404)));
        assert_eq!(outcome, DeleteOutcome::Failed);
        assert_eq!(c.state(), &before);
        assert_eq!(c.error(), Some("not found"));

        c.apply_delete(c.generation(), "C001", Err(ApiError::Status { status: 503 }));
        assert_eq!(c.state(), &before);
        assert_eq!(c.error(), Some("Failed to delete coupon"));
    }

    #[test]
    fn test_delete_of_unlisted_code_only_adjusts_total() {
        let mut c = ListController::new(20);
        let first = c.mount().unwrap();
        c.apply_page(&first, Ok(page(0..20, 45)));

        assert_eq!(c.apply_delete(c.generation(), "C044", Ok(())), DeleteOutcome::NotListed);
        assert_eq!(c.state().items().len(), 20);
        assert_eq!(c.state().total_count(), 44);
    }

    #[test]
    fn test_late_delete_leaves_newer_session_total() {
        let mut c = ListController::new(20);
        let first = c.mount().unwrap();
        c.apply_page(&first, Ok(page(0..20, 45)));
        let deleted_in = c.generation();

        let search = c.commit_search("SALE").unwrap();
        let sale = ["SALE001", "SALE002"].iter().map(|code| coupon(code)).collect();
        c.apply_page(&search, Ok(Page::new(sale, 2, 20, 0)));

        let outcome = c.apply_delete(deleted_in, "C005", Ok(()));
        assert_eq!(outcome, DeleteOutcome::Superseded);
        assert_eq!(codes(&c), vec!["SALE001", "SALE002"]);
        assert_eq!(c.state().total_count(), 2);
        assert!(c.state().total_count() >= c.state().items().len() as u64);
        assert_has_more_invariant(&c);
    }

    #[test]
    fn test_late_delete_of_code_listed_in_newer_session() {
        let mut c = ListController::new(20);
        let first = c.mount().unwrap();
        c.apply_page(&first, Ok(page(0..20, 45)));
        let deleted_in = c.generation();

        let search = c.commit_search("C00").unwrap();
        c.apply_page(&search, Ok(page(0..10, 10)));

        assert_eq!(
            c.apply_delete(deleted_in, "C005", Ok(())),
            DeleteOutcome::Removed
        );
        assert_eq!(c.state().items().len(), 9);
        assert_eq!(c.state().total_count(), 9);
    }

    #[test]
    fn test_page_size_zero_is_clamped() {
        let c = ListController::new(0);
        assert_eq!(c.state().page_size(), 1);
    }
}
