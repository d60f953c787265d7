//! [`HttpApi`] tests against the backend served over the in-memory database.

use admin::{api::Error, Api as _, HttpApi, StatusTarget};
use service::{infra::Memory, Config, Service};
use tokio::net::TcpListener;

/// Serves the backend on a random local port, returning its base URL.
async fn serve() -> String {
    let service = Service::new(Config::default(), Memory::new());
    let app = application::router(service);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    }));
    format!("http://{addr}/")
}

async fn create_booking(base_url: &str) -> String {
    let body: serde_json::Value = reqwest::Client::new()
        .post(format!("{base_url}api/bookings"))
        .json(&serde_json::json!({
            "fullName": "Asha Rao",
            "email": "asha@example.com",
            "phone": "+91 98765 43210",
            "country": "India",
            "checkIn": "2026-11-01",
            "checkOut": "2026-11-05",
            "adults": 2,
            "accommodation": "Lake Villa",
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    body["data"]["id"].as_str().unwrap().to_owned()
}

#[tokio::test]
async fn lists_and_confirms_bookings() {
    let base_url = serve().await;
    let id = create_booking(&base_url).await;
    let api = HttpApi::new(base_url).unwrap();

    let bookings = api.bookings(None).await.unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].id, id);
    assert_eq!(bookings[0].status, "pending");
    assert_eq!(bookings[0].accommodation.as_deref(), Some("Lake Villa"));

    api.update_status(StatusTarget::Booking(id.clone()), "confirmed".into())
        .await
        .unwrap();

    let pending = api.bookings(Some("pending".into())).await.unwrap();
    assert!(pending.is_empty());

    let stats = api.dashboard().await.unwrap();
    assert_eq!(stats.total_bookings, 1);
    assert_eq!(stats.pending_approvals, 0);
    assert_eq!(stats.recent_bookings[0].package_name, "Lake Villa");
    assert_eq!(stats.recent_bookings[0].status, "confirmed");
}

#[tokio::test]
async fn reports_backend_failures() {
    let api = HttpApi::new(serve().await).unwrap();

    let err = api
        .update_status(
            StatusTarget::FormResponse("missing".into()),
            "contacted".into(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Server { status: 404, .. }), "{err}");

    let err = api.bookings(Some("approved".into())).await.unwrap_err();
    assert!(
        matches!(
            &err,
            Error::Server { status: 400, message }
                if message == "Invalid or missing fields: `status`",
        ),
        "{err}",
    );

    assert!(api.form_responses().await.unwrap().is_empty());
    assert!(api.tourism_packages().await.unwrap().is_empty());
    assert!(api.investment_listings().await.unwrap().is_empty());
}

#[tokio::test]
async fn unreachable_backend_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = HttpApi::new(format!("http://{addr}"))
        .unwrap()
        .dashboard()
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Transport(_)), "{err}");
}
