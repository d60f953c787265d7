//! [`Api`] of the backend and its [`HttpApi`] implementation.

use std::{future::Future, time::Duration};

use derive_more::{Display, From};
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::json;

use crate::model::{
    Booking, FormResponse, InvestmentListing, Stats, TourismPackage,
};

/// Operations of the backend used by the admin client.
pub trait Api: Send + Sync {
    /// Fetches the dashboard [`Stats`].
    fn dashboard(&self) -> impl Future<Output = Result<Stats, Error>> + Send;

    /// Fetches all the [`TourismPackage`]s.
    fn tourism_packages(
        &self,
    ) -> impl Future<Output = Result<Vec<TourismPackage>, Error>> + Send;

    /// Fetches all the [`InvestmentListing`]s.
    fn investment_listings(
        &self,
    ) -> impl Future<Output = Result<Vec<InvestmentListing>, Error>> + Send;

    /// Fetches the [`Booking`]s, only the ones in the provided `status` if
    /// any.
    fn bookings(
        &self,
        status: Option<String>,
    ) -> impl Future<Output = Result<Vec<Booking>, Error>> + Send;

    /// Fetches all the [`FormResponse`]s.
    fn form_responses(
        &self,
    ) -> impl Future<Output = Result<Vec<FormResponse>, Error>> + Send;

    /// Changes the status of the provided [`StatusTarget`].
    fn update_status(
        &self,
        target: StatusTarget,
        status: String,
    ) -> impl Future<Output = Result<(), Error>> + Send;
}

/// Record whose status is changed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StatusTarget {
    /// Booking with the provided ID.
    Booking(String),

    /// Investment listing with the provided ID.
    InvestmentListing(String),

    /// Form response with the provided ID.
    FormResponse(String),
}

impl StatusTarget {
    /// Returns the REST path of this [`StatusTarget`]'s status.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Booking(id) => format!("/api/bookings/{id}/status"),
            Self::InvestmentListing(id) => {
                format!("/api/investment/{id}/status")
            }
            Self::FormResponse(id) => {
                format!("/api/form-responses/{id}/status")
            }
        }
    }
}

/// Error of an [`Api`] call.
#[derive(Debug, Display, derive_more::Error, From)]
pub enum Error {
    /// Backend couldn't be reached.
    #[display("backend is unreachable: {_0}")]
    Transport(reqwest::Error),

    /// Backend responded with a failure.
    #[display("backend failed with `{status}`: {message}")]
    #[from(ignore)]
    Server {
        /// HTTP status code of the response.
        status: u16,

        /// Error message reported by the backend.
        message: String,
    },

    /// Backend responded with an unexpected body.
    #[display("malformed backend response: {_0}")]
    Decode(serde_json::Error),
}

/// JSON envelope wrapping every backend response.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    success: bool,
    data: Option<T>,
    error: Option<String>,
}

/// [`Api`] talking to the backend over HTTP.
#[derive(Clone, Debug)]
pub struct HttpApi {
    /// Underlying HTTP [`Client`].
    client: Client,

    /// Base URL of the backend, without a trailing slash.
    base_url: String,
}

impl HttpApi {
    /// Timeout of a single request.
    pub const TIMEOUT: Duration = Duration::from_secs(30);

    /// Creates a new [`HttpApi`] for the backend at the provided `base_url`.
    ///
    /// # Errors
    ///
    /// If the HTTP [`Client`] cannot be initialized.
    pub fn new(base_url: impl Into<String>) -> Result<Self, Error> {
        let client = Client::builder().timeout(Self::TIMEOUT).build()?;
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            _ = base_url.pop();
        }
        Ok(Self { client, base_url })
    }

    /// Returns the base URL of the backend.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, Error> {
        let resp = self
            .client
            .get(format!("{}{path}", self.base_url))
            .query(query)
            .send()
            .await?;
        decode(resp).await
    }
}

impl Api for HttpApi {
    #[tracing::instrument(skip_all)]
    async fn dashboard(&self) -> Result<Stats, Error> {
        self.get("/api/dashboard/stats", &[]).await
    }

    #[tracing::instrument(skip_all)]
    async fn tourism_packages(&self) -> Result<Vec<TourismPackage>, Error> {
        self.get("/api/tourism", &[]).await
    }

    #[tracing::instrument(skip_all)]
    async fn investment_listings(
        &self,
    ) -> Result<Vec<InvestmentListing>, Error> {
        self.get("/api/investment", &[]).await
    }

    #[tracing::instrument(skip(self))]
    async fn bookings(
        &self,
        status: Option<String>,
    ) -> Result<Vec<Booking>, Error> {
        let query = status.map(|s| ("status", s));
        self.get("/api/bookings", query.as_slice()).await
    }

    #[tracing::instrument(skip_all)]
    async fn form_responses(&self) -> Result<Vec<FormResponse>, Error> {
        self.get("/api/form-responses", &[]).await
    }

    #[tracing::instrument(skip(self))]
    async fn update_status(
        &self,
        target: StatusTarget,
        status: String,
    ) -> Result<(), Error> {
        let resp = self
            .client
            .patch(format!("{}{}", self.base_url, target.path()))
            .json(&json!({ "status": status }))
            .send()
            .await?;
        decode::<serde::de::IgnoredAny>(resp).await.map(drop)
    }
}

/// Unwraps the [`Envelope`] of the provided [`Response`].
async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, Error> {
    let status = resp.status();
    let body = resp.bytes().await?;

    if !status.is_success() {
        let message = serde_json::from_slice::<
            Envelope<serde::de::IgnoredAny>,
        >(&body)
        .ok()
        .and_then(|e| e.error)
        .unwrap_or_else(|| status.to_string());
        return Err(Error::Server {
            status: status.as_u16(),
            message,
        });
    }

    match serde_json::from_slice::<Envelope<T>>(&body)? {
        Envelope {
            success: true,
            data: Some(data),
            ..
        } => Ok(data),
        Envelope { error, .. } => Err(Error::Server {
            status: status.as_u16(),
            message: error.unwrap_or_else(|| "unsuccessful response".into()),
        }),
    }
}
