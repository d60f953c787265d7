//! [`Controller`] driving the [`AdminState`] through an [`Api`].

use std::future::Future;

use tokio::sync::Mutex;
use tracing as log;

use crate::{
    api::{self, Api, StatusTarget},
    state::{ActiveTab, AdminState, FetchState, ResponseFilter},
};

/// Accessor of a [`FetchState`] inside the [`AdminState`].
type Slot<T> = fn(&mut AdminState) -> &mut FetchState<T>;

/// Controller of the admin panel.
///
/// Every fetch is issued with a fresh [`Ticket`], so a slow response never
/// overwrites the result of a fetch issued after it.
///
/// [`Ticket`]: crate::state::Ticket
#[derive(Debug)]
pub struct Controller<A> {
    /// [`Api`] of the backend.
    api: A,

    /// Current [`AdminState`].
    state: Mutex<AdminState>,
}

impl<A: Api> Controller<A> {
    /// Creates a new [`Controller`] with the default [`AdminState`].
    #[must_use]
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: Mutex::new(AdminState::default()),
        }
    }

    /// Returns a snapshot of the current [`AdminState`].
    pub async fn state(&self) -> AdminState {
        self.state.lock().await.clone()
    }

    /// Switches to the provided [`ActiveTab`] and fetches its records.
    pub async fn open(&self, tab: ActiveTab) {
        self.state.lock().await.active_tab = tab;
        self.refresh().await;
    }

    /// Switches to the [`ActiveTab::Bookings`] fetching only the ones in the
    /// provided `status`, if any.
    pub async fn open_bookings(&self, status: Option<String>) {
        {
            let mut state = self.state.lock().await;
            state.active_tab = ActiveTab::Bookings;
            state.booking_status = status;
        }
        self.refresh().await;
    }

    /// Re-fetches the records of the current [`ActiveTab`].
    pub async fn refresh(&self) {
        let (tab, booking_status) = {
            let state = self.state.lock().await;
            (state.active_tab, state.booking_status.clone())
        };

        match tab {
            ActiveTab::Dashboard => {
                self.fetch(
                    |s| &mut s.dashboard,
                    "dashboard data",
                    async { self.api.dashboard().await.map(Some) },
                )
                .await;
            }
            ActiveTab::Tourism => {
                self.fetch(
                    |s| &mut s.tourism_packages,
                    "tourism packages",
                    self.api.tourism_packages(),
                )
                .await;
            }
            ActiveTab::Investments => {
                self.fetch(
                    |s| &mut s.investment_listings,
                    "investments",
                    self.api.investment_listings(),
                )
                .await;
            }
            ActiveTab::Bookings => {
                self.fetch(
                    |s| &mut s.bookings,
                    "bookings",
                    self.api.bookings(booking_status),
                )
                .await;
            }
            ActiveTab::Responses => {
                self.fetch(
                    |s| &mut s.form_responses,
                    "form responses",
                    self.api.form_responses(),
                )
                .await;
            }
        }
    }

    /// Dismisses the error of the current [`ActiveTab`] and re-issues its
    /// fetch.
    pub async fn retry(&self) {
        self.dismiss_error().await;
        self.refresh().await;
    }

    /// Dismisses the error of the current [`ActiveTab`], if any.
    pub async fn dismiss_error(&self) {
        self.state.lock().await.dismiss_error();
    }

    /// Changes the status of the provided [`StatusTarget`] and re-fetches
    /// the list it belongs to.
    ///
    /// Nothing is re-fetched if the change fails.
    pub async fn change_status(&self, target: StatusTarget, status: &str) {
        let tab = match &target {
            StatusTarget::Booking(_) => ActiveTab::Bookings,
            StatusTarget::InvestmentListing(_) => ActiveTab::Investments,
            StatusTarget::FormResponse(_) => ActiveTab::Responses,
        };

        let result =
            self.api.update_status(target.clone(), status.to_owned()).await;

        let mut state = self.state.lock().await;
        state.active_tab = tab;
        if let Err(e) = result {
            log::warn!("failed to update status of {target:?}: {e}");
            let msg = format!("Failed to update status: {e}");
            match tab {
                ActiveTab::Bookings => state.bookings.fail(msg),
                ActiveTab::Investments => state.investment_listings.fail(msg),
                ActiveTab::Responses => state.form_responses.fail(msg),
                ActiveTab::Dashboard | ActiveTab::Tourism => {}
            }
            return;
        }
        drop(state);

        self.refresh().await;
    }

    /// Applies the provided [`ResponseFilter`] to the already fetched form
    /// responses.
    pub async fn filter_responses(&self, filter: ResponseFilter) {
        self.state.lock().await.response_filter = filter;
    }

    /// Runs the provided `fetch` under a fresh ticket of the [`FetchState`]
    /// returned by `slot`.
    async fn fetch<T>(
        &self,
        slot: Slot<T>,
        what: &str,
        fetch: impl Future<Output = Result<T, api::Error>>,
    ) {
        let ticket = slot(&mut *self.state.lock().await).begin();

        let result = fetch.await.map_err(|e| {
            log::warn!("failed to fetch {what}: {e}");
            format!("Failed to fetch {what}: {e}")
        });

        let mut state = self.state.lock().await;
        if !slot(&mut *state).finish(ticket, result) {
            log::debug!("discarded stale response of {what}");
        }
    }
}

#[cfg(test)]
mod spec {
    use std::{
        collections::VecDeque,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Mutex,
        },
        time::Duration,
    };

    use crate::{
        api::{Api, Error, StatusTarget},
        model::{
            Booking, FormResponse, InvestmentListing, Stats, TourismPackage,
        },
        state::{ActiveTab, ResponseFilter},
    };

    use super::Controller;

    /// Scripted reply of the [`MockApi`].
    type Reply<T> = (Duration, Result<T, Error>);

    /// [`Api`] replying with scripted results after scripted delays.
    #[derive(Debug, Default)]
    struct MockApi {
        bookings: Mutex<VecDeque<Reply<Vec<Booking>>>>,
        responses: Mutex<VecDeque<Reply<Vec<FormResponse>>>>,
        updates: Mutex<VecDeque<Result<(), Error>>>,
        calls: AtomicUsize,
    }

    impl MockApi {
        fn reply<T>(queue: &Mutex<VecDeque<Reply<T>>>) -> Reply<T> {
            queue.lock().unwrap().pop_front().expect("unscripted call")
        }

        fn booking(id: &str, status: &str) -> Booking {
            Booking {
                id: id.into(),
                status: status.into(),
                ..Booking::default()
            }
        }

        fn failure() -> Error {
            Error::Server {
                status: 500,
                message: "Internal server error".into(),
            }
        }
    }

    impl Api for MockApi {
        async fn dashboard(&self) -> Result<Stats, Error> {
            _ = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Stats::default())
        }

        async fn tourism_packages(
            &self,
        ) -> Result<Vec<TourismPackage>, Error> {
            _ = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![])
        }

        async fn investment_listings(
            &self,
        ) -> Result<Vec<InvestmentListing>, Error> {
            _ = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![])
        }

        async fn bookings(
            &self,
            _: Option<String>,
        ) -> Result<Vec<Booking>, Error> {
            _ = self.calls.fetch_add(1, Ordering::SeqCst);
            let (delay, result) = Self::reply(&self.bookings);
            tokio::time::sleep(delay).await;
            result
        }

        async fn form_responses(&self) -> Result<Vec<FormResponse>, Error> {
            _ = self.calls.fetch_add(1, Ordering::SeqCst);
            let (delay, result) = Self::reply(&self.responses);
            tokio::time::sleep(delay).await;
            result
        }

        async fn update_status(
            &self,
            _: StatusTarget,
            _: String,
        ) -> Result<(), Error> {
            _ = self.calls.fetch_add(1, Ordering::SeqCst);
            self.updates
                .lock()
                .unwrap()
                .pop_front()
                .expect("unscripted call")
        }
    }

    #[tokio::test]
    async fn stale_response_never_overwrites_newer_one() {
        let api = MockApi::default();
        api.bookings.lock().unwrap().extend([
            (
                Duration::from_millis(200),
                Ok(vec![MockApi::booking("old", "pending")]),
            ),
            (
                Duration::from_millis(10),
                Ok(vec![MockApi::booking("new", "confirmed")]),
            ),
        ]);
        let ctrl = Controller::new(api);

        tokio::join!(ctrl.open(ActiveTab::Bookings), async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            ctrl.refresh().await;
        });

        let state = ctrl.state().await;
        assert_eq!(state.bookings.data.len(), 1);
        assert_eq!(state.bookings.data[0].id, "new");
        assert!(!state.bookings.loading);
        assert_eq!(state.error(), None);
    }

    #[tokio::test]
    async fn failed_fetch_is_shown_until_retry_succeeds() {
        let api = MockApi::default();
        api.bookings.lock().unwrap().extend([
            (Duration::ZERO, Err(MockApi::failure())),
            (
                Duration::ZERO,
                Ok(vec![MockApi::booking("b1", "pending")]),
            ),
        ]);
        let ctrl = Controller::new(api);

        ctrl.open(ActiveTab::Bookings).await;
        let state = ctrl.state().await;
        assert!(state
            .error()
            .is_some_and(|e| e.starts_with("Failed to fetch bookings")));
        assert!(state.bookings.data.is_empty());

        ctrl.retry().await;
        let state = ctrl.state().await;
        assert_eq!(state.error(), None);
        assert_eq!(state.bookings.data.len(), 1);
    }

    #[tokio::test]
    async fn status_change_refetches_the_list() {
        let api = MockApi::default();
        api.bookings.lock().unwrap().extend([
            (
                Duration::ZERO,
                Ok(vec![MockApi::booking("b1", "pending")]),
            ),
            (
                Duration::ZERO,
                Ok(vec![MockApi::booking("b1", "confirmed")]),
            ),
        ]);
        api.updates.lock().unwrap().push_back(Ok(()));
        let ctrl = Controller::new(api);

        ctrl.open(ActiveTab::Bookings).await;
        ctrl.change_status(StatusTarget::Booking("b1".into()), "confirmed")
            .await;

        let state = ctrl.state().await;
        assert_eq!(state.bookings.data[0].status, "confirmed");
        assert_eq!(ctrl.api.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn failed_status_change_is_dismissible() {
        let api = MockApi::default();
        api.bookings.lock().unwrap().push_back((
            Duration::ZERO,
            Ok(vec![MockApi::booking("b1", "pending")]),
        ));
        api.updates.lock().unwrap().push_back(Err(MockApi::failure()));
        let ctrl = Controller::new(api);

        ctrl.open(ActiveTab::Bookings).await;
        ctrl.change_status(StatusTarget::Booking("b1".into()), "confirmed")
            .await;

        let state = ctrl.state().await;
        assert!(state
            .error()
            .is_some_and(|e| e.starts_with("Failed to update status")));
        assert_eq!(state.bookings.data[0].status, "pending");
        assert_eq!(ctrl.api.calls.load(Ordering::SeqCst), 2);

        ctrl.dismiss_error().await;
        assert_eq!(ctrl.state().await.error(), None);
    }

    #[tokio::test]
    async fn response_filter_never_refetches() {
        let api = MockApi::default();
        api.responses.lock().unwrap().push_back((
            Duration::ZERO,
            Ok(["tourism", "investment", "investment"]
                .into_iter()
                .map(|kind| FormResponse {
                    kind: kind.into(),
                    ..FormResponse::default()
                })
                .collect()),
        ));
        let ctrl = Controller::new(api);

        ctrl.open(ActiveTab::Responses).await;
        ctrl.filter_responses(ResponseFilter::Investment).await;
        assert_eq!(ctrl.state().await.visible_responses().len(), 2);
        ctrl.filter_responses(ResponseFilter::General).await;
        assert!(ctrl.state().await.visible_responses().is_empty());

        assert_eq!(ctrl.api.calls.load(Ordering::SeqCst), 1);
    }
}
