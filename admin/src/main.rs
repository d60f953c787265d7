use std::{io, process::ExitCode};

use admin::{
    state::ActiveTab,
    view::{
        BookingTable, Dashboard, InvestmentTable, ResponseCards, TourismTable,
    },
    AdminState, Controller, HttpApi, ResponseFilter, StatusTarget,
};
use clap::{Parser, Subcommand};
use tracing as log;
use tracing_subscriber::EnvFilter;

/// Admin client of the tourism and investment bookings backend.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// Base URL of the backend.
    #[arg(
        long,
        env = "ADMIN_BACKEND_URL",
        default_value = "http://localhost:8080"
    )]
    backend_url: String,

    /// Number of retries of a failed fetch.
    #[arg(long, default_value_t = 0)]
    retries: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Shows the dashboard summary.
    Dashboard,

    /// Lists the tourism packages.
    Tourism,

    /// Lists the investment listings.
    Investments,

    /// Lists the bookings.
    Bookings {
        /// Lists only the bookings in this status.
        #[arg(long)]
        status: Option<String>,
    },

    /// Lists the form responses.
    Responses {
        /// Shows only `all`, `tourism`, `investment` or `general` responses.
        #[arg(long, default_value_t = ResponseFilter::All)]
        filter: ResponseFilter,
    },

    /// Confirms the booking with the provided ID.
    Confirm { id: String },

    /// Cancels the booking with the provided ID.
    Cancel { id: String },

    /// Completes the booking with the provided ID.
    Complete { id: String },

    /// Marks the form response with the provided ID as contacted.
    Contacted { id: String },

    /// Changes status of the form response with the provided ID.
    ResponseStatus { id: String, status: String },

    /// Changes status of the investment listing with the provided ID.
    ListingStatus { id: String, status: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .compact()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let Args {
        backend_url,
        retries,
        command,
    } = Args::parse();

    let api = match HttpApi::new(backend_url) {
        Ok(api) => api,
        Err(e) => {
            log::error!("failed to initialize HTTP client: {e}");
            return ExitCode::FAILURE;
        }
    };
    log::debug!("using backend at {}", api.base_url());
    let ctrl = Controller::new(api);

    match command {
        Command::Dashboard => ctrl.open(ActiveTab::Dashboard).await,
        Command::Tourism => ctrl.open(ActiveTab::Tourism).await,
        Command::Investments => ctrl.open(ActiveTab::Investments).await,
        Command::Bookings { status } => ctrl.open_bookings(status).await,
        Command::Responses { filter } => {
            ctrl.filter_responses(filter).await;
            ctrl.open(ActiveTab::Responses).await;
        }
        Command::Confirm { id } => {
            ctrl.change_status(StatusTarget::Booking(id), "confirmed").await;
        }
        Command::Cancel { id } => {
            ctrl.change_status(StatusTarget::Booking(id), "cancelled").await;
        }
        Command::Complete { id } => {
            ctrl.change_status(StatusTarget::Booking(id), "completed").await;
        }
        Command::Contacted { id } => {
            ctrl.change_status(StatusTarget::FormResponse(id), "contacted")
                .await;
        }
        Command::ResponseStatus { id, status } => {
            ctrl.change_status(StatusTarget::FormResponse(id), &status)
                .await;
        }
        Command::ListingStatus { id, status } => {
            ctrl.change_status(StatusTarget::InvestmentListing(id), &status)
                .await;
        }
    }

    let mut state = ctrl.state().await;
    for attempt in 1..=retries {
        if state.error().is_none() {
            break;
        }
        log::info!("retrying, attempt {attempt} of {retries}");
        ctrl.retry().await;
        state = ctrl.state().await;
    }

    if let Some(e) = state.error() {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }
    print!("{}", render(&state));
    ExitCode::SUCCESS
}

/// Renders the [`ActiveTab`] of the provided [`AdminState`].
fn render(state: &AdminState) -> String {
    let title = state.active_tab.title();
    let body = match state.active_tab {
        ActiveTab::Dashboard => state
            .dashboard
            .data
            .as_ref()
            .map(|s| Dashboard(s).to_string())
            .unwrap_or_default(),
        ActiveTab::Tourism => {
            TourismTable(&state.tourism_packages.data).to_string()
        }
        ActiveTab::Investments => {
            InvestmentTable(&state.investment_listings.data).to_string()
        }
        ActiveTab::Bookings => BookingTable(&state.bookings.data).to_string(),
        ActiveTab::Responses => {
            let visible = state.visible_responses();
            format!(
                "Filter: {}\n\n{}",
                state.response_filter,
                ResponseCards(&visible),
            )
        }
    };
    format!("== {title} ==\n\n{body}")
}
