//! Admin client of the tourism and investment bookings backend.
//!
//! Keeps an explicit [`AdminState`] and drives it through an [`Api`] with
//! a [`Controller`].

#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod api;
pub mod controller;
pub mod model;
pub mod state;
pub mod view;

// Used in binary.
use clap as _;
use tracing_subscriber as _;
// Used in integration tests.
#[cfg(test)]
use application as _;
#[cfg(test)]
use axum as _;
#[cfg(test)]
use service as _;

pub use self::{
    api::{Api, HttpApi, StatusTarget},
    controller::Controller,
    state::{ActiveTab, AdminState, FetchState, ListState, ResponseFilter},
};
