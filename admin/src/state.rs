//! View-state of the admin client.

use std::{fmt, str::FromStr};

use crate::model::{
    Booking, FormResponse, InvestmentListing, Stats, TourismPackage,
};

/// Tab of the admin panel being shown.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ActiveTab {
    /// Dashboard summary.
    #[default]
    Dashboard,

    /// Tourism packages table.
    Tourism,

    /// Investment listings table.
    Investments,

    /// Bookings table.
    Bookings,

    /// Form responses cards.
    Responses,
}

impl ActiveTab {
    /// Human-readable title of this [`ActiveTab`].
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Tourism => "Tourism Packages",
            Self::Investments => "Investments",
            Self::Bookings => "Bookings",
            Self::Responses => "Form Responses",
        }
    }
}

/// Generation token of a single fetch.
///
/// Only the response of the latest issued [`Ticket`] is applied.
#[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd)]
pub struct Ticket(u64);

/// State of a remotely fetched value.
#[derive(Clone, Debug)]
pub struct FetchState<T> {
    /// Last successfully fetched value.
    pub data: T,

    /// Indicator whether a fetch is in flight.
    pub loading: bool,

    /// Message of the last failure, until dismissed.
    pub error: Option<String>,

    /// Latest issued [`Ticket`].
    latest: Ticket,
}

/// [`FetchState`] of a managed list of records.
pub type ListState<T> = FetchState<Vec<T>>;

impl<T: Default> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: T::default(),
            loading: false,
            error: None,
            latest: Ticket::default(),
        }
    }
}

impl<T> FetchState<T> {
    /// Issues a new [`Ticket`] for a fetch, superseding all the previous
    /// ones.
    pub fn begin(&mut self) -> Ticket {
        self.latest = Ticket(self.latest.0 + 1);
        self.loading = true;
        self.latest
    }

    /// Applies the `result` of the fetch identified by the provided
    /// [`Ticket`].
    ///
    /// Returns `false` if the [`Ticket`] is stale, leaving this
    /// [`FetchState`] untouched.
    pub fn finish(
        &mut self,
        ticket: Ticket,
        result: Result<T, String>,
    ) -> bool {
        if ticket != self.latest {
            return false;
        }
        self.loading = false;
        match result {
            Ok(data) => {
                self.data = data;
                self.error = None;
            }
            Err(msg) => self.error = Some(msg),
        }
        true
    }

    /// Records a failure not bound to any fetch (like a failed status
    /// change).
    pub fn fail(&mut self, msg: impl Into<String>) {
        self.error = Some(msg.into());
    }

    /// Dismisses the shown error, if any.
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}

/// Client-side filter of the [`FormResponse`]s by their kind.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ResponseFilter {
    /// All the [`FormResponse`]s.
    #[default]
    All,

    /// Tourism [`FormResponse`]s only.
    Tourism,

    /// Investment [`FormResponse`]s only.
    Investment,

    /// General [`FormResponse`]s only.
    General,
}

impl ResponseFilter {
    /// Checks whether the provided [`FormResponse`] passes this
    /// [`ResponseFilter`].
    #[must_use]
    pub fn matches(self, response: &FormResponse) -> bool {
        match self {
            Self::All => true,
            Self::Tourism => response.kind == "tourism",
            Self::Investment => response.kind == "investment",
            Self::General => response.kind == "general",
        }
    }
}

impl fmt::Display for ResponseFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::All => "all",
            Self::Tourism => "tourism",
            Self::Investment => "investment",
            Self::General => "general",
        })
    }
}

impl FromStr for ResponseFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "tourism" => Ok(Self::Tourism),
            "investment" => Ok(Self::Investment),
            "general" => Ok(Self::General),
            other => Err(format!("unknown response filter `{other}`")),
        }
    }
}

/// Whole view-state of the admin panel.
#[derive(Clone, Debug, Default)]
pub struct AdminState {
    /// Currently shown [`ActiveTab`].
    pub active_tab: ActiveTab,

    /// Dashboard [`Stats`].
    pub dashboard: FetchState<Option<Stats>>,

    /// Managed [`TourismPackage`]s.
    pub tourism_packages: ListState<TourismPackage>,

    /// Managed [`InvestmentListing`]s.
    pub investment_listings: ListState<InvestmentListing>,

    /// Managed [`Booking`]s.
    pub bookings: ListState<Booking>,

    /// Status the [`Booking`]s are fetched by, if any.
    pub booking_status: Option<String>,

    /// Managed [`FormResponse`]s.
    pub form_responses: ListState<FormResponse>,

    /// [`ResponseFilter`] applied to the shown [`FormResponse`]s.
    pub response_filter: ResponseFilter,
}

impl AdminState {
    /// Returns the error shown on the [`ActiveTab`], if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self.active_tab {
            ActiveTab::Dashboard => self.dashboard.error.as_deref(),
            ActiveTab::Tourism => self.tourism_packages.error.as_deref(),
            ActiveTab::Investments => {
                self.investment_listings.error.as_deref()
            }
            ActiveTab::Bookings => self.bookings.error.as_deref(),
            ActiveTab::Responses => self.form_responses.error.as_deref(),
        }
    }

    /// Dismisses the error shown on the [`ActiveTab`], if any.
    pub fn dismiss_error(&mut self) {
        match self.active_tab {
            ActiveTab::Dashboard => self.dashboard.dismiss_error(),
            ActiveTab::Tourism => self.tourism_packages.dismiss_error(),
            ActiveTab::Investments => self.investment_listings.dismiss_error(),
            ActiveTab::Bookings => self.bookings.dismiss_error(),
            ActiveTab::Responses => self.form_responses.dismiss_error(),
        }
    }

    /// Returns the [`FormResponse`]s passing the current
    /// [`ResponseFilter`].
    #[must_use]
    pub fn visible_responses(&self) -> Vec<&FormResponse> {
        self.form_responses
            .data
            .iter()
            .filter(|r| self.response_filter.matches(r))
            .collect()
    }
}

#[cfg(test)]
mod spec {
    use crate::model::FormResponse;

    use super::{ActiveTab, AdminState, ListState, ResponseFilter};

    #[test]
    fn stale_ticket_is_discarded() {
        let mut list = ListState::<u8>::default();

        let older = list.begin();
        let newer = list.begin();

        assert!(list.finish(newer, Ok(vec![2])));
        assert!(!list.finish(older, Ok(vec![1])));
        assert_eq!(list.data, [2]);
        assert!(!list.loading);
    }

    #[test]
    fn stale_failure_keeps_newer_data() {
        let mut list = ListState::<u8>::default();

        let older = list.begin();
        let newer = list.begin();
        _ = list.finish(newer, Ok(vec![2]));

        assert!(!list.finish(older, Err("timeout".into())));
        assert_eq!(list.error, None);
    }

    #[test]
    fn failure_keeps_previous_data() {
        let mut list = ListState::<u8>::default();
        let first = list.begin();
        _ = list.finish(first, Ok(vec![1]));

        let second = list.begin();
        _ = list.finish(second, Err("boom".into()));

        assert_eq!(list.data, [1]);
        assert_eq!(list.error.as_deref(), Some("boom"));

        list.dismiss_error();
        assert_eq!(list.error, None);
    }

    #[test]
    fn filters_responses_by_kind() {
        let mut state = AdminState {
            active_tab: ActiveTab::Responses,
            ..AdminState::default()
        };
        state.form_responses.data = ["tourism", "investment", "general"]
            .into_iter()
            .map(|kind| FormResponse {
                kind: kind.into(),
                ..FormResponse::default()
            })
            .collect();

        assert_eq!(state.visible_responses().len(), 3);

        state.response_filter = ResponseFilter::Investment;
        let visible = state.visible_responses();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].kind, "investment");
    }

    #[test]
    fn parses_response_filter() {
        assert_eq!(
            "General".parse::<ResponseFilter>(),
            Ok(ResponseFilter::General),
        );
        assert!("other".parse::<ResponseFilter>().is_err());
    }
}
