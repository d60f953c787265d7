//! REST API tests running against the in-memory database.

use application::router;
use axum::{
    body::{to_bytes, Body},
    Router,
};
use common::DateTime;
use http::{Method, Request, StatusCode};
use serde_json::{json, Value};
use service::{infra::Memory, Config, Service};
use tower::ServiceExt as _;

fn app() -> Router {
    router(Service::new(Config::default(), Memory::new()))
}

async fn call(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json");
    let req = match body {
        Some(body) => req.body(Body::from(body.to_string())),
        None => req.body(Body::empty()),
    }
    .unwrap();

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn booking_form(package_id: Option<&str>) -> Value {
    json!({
        "fullName": "Asha Rao",
        "email": "asha@example.com",
        "phone": "+91 98765 43210",
        "country": "India",
        "checkIn": "2026-11-01",
        "checkOut": "2026-11-05",
        "adults": 2,
        "children": 1,
        "packageId": package_id,
        "specialRequirements": ["Airport pickup"],
    })
}

#[tokio::test]
async fn health_is_ok() {
    let (status, body) = call(&app(), Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));
}

#[tokio::test]
async fn dashboard_of_empty_store_is_zeroed() {
    let (status, body) =
        call(&app(), Method::GET, "/api/dashboard/stats", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["totalBookings"], 0);
    assert_eq!(body["data"]["totalInvestments"], 0);
    assert_eq!(body["data"]["totalTourismPackages"], 0);
    assert_eq!(body["data"]["totalFormResponses"], 0);
    assert_eq!(body["data"]["recentBookings"], json!([]));
    assert_eq!(body["data"]["recentInvestments"], json!([]));
    assert_eq!(body["data"]["monthlyRevenue"].as_f64(), Some(0.0));
    assert_eq!(body["data"]["pendingApprovals"], 0);
}

#[tokio::test]
async fn tourism_package_lifecycle() {
    let app = app();

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/tourism",
        Some(json!({
            "title": "Kerala Backwaters",
            "description": "Houseboat stay",
            "price": 22000,
            "durationDays": 3,
            "itinerary": ["Alleppey", "Kumarakom"],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["title"], "Kerala Backwaters");
    let id = body["data"]["id"].as_str().unwrap().to_owned();

    let (status, body) = call(
        &app,
        Method::PUT,
        &format!("/api/tourism/{id}"),
        Some(json!({
            "title": "Kerala Backwaters Deluxe",
            "description": "Houseboat stay",
            "price": 25000,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Kerala Backwaters Deluxe");
    assert_eq!(body["data"]["itinerary"], json!([]));

    let (status, body) = call(&app, Method::GET, "/api/tourism", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, _) =
        call(&app, Method::DELETE, &format!("/api/tourism/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) =
        call(&app, Method::GET, &format!("/api/tourism/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn malformed_id_is_not_found() {
    let (status, body) =
        call(&app(), Method::GET, "/api/bookings/not-an-id", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn create_names_missing_fields() {
    let (status, body) = call(
        &app(),
        Method::POST,
        "/api/investment",
        Some(json!({ "description": "Sea-facing plot" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(
        body["error"],
        "Invalid or missing fields: `title`, `price`",
    );
}

#[tokio::test]
async fn malformed_body_is_validation_error() {
    let app = app();
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/bookings")
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn booking_confirmation_shows_on_dashboard() {
    let app = app();

    let (_, body) = call(
        &app,
        Method::POST,
        "/api/tourism",
        Some(json!({
            "title": "Munnar Hills",
            "description": "Tea gardens",
            "price": 12000,
        })),
    )
    .await;
    let package_id = body["data"]["id"].as_str().unwrap().to_owned();

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/bookings",
        Some(booking_form(Some(&package_id))),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["checkIn"], "2026-11-01");
    let id = body["data"]["id"].as_str().unwrap().to_owned();

    let (status, body) = call(
        &app,
        Method::PATCH,
        &format!("/api/bookings/{id}/status"),
        Some(json!({ "status": "approved" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid or missing fields: `status`");

    let (_, body) =
        call(&app, Method::GET, &format!("/api/bookings/{id}"), None).await;
    assert_eq!(body["data"]["status"], "pending");

    let (status, body) = call(
        &app,
        Method::PATCH,
        &format!("/api/bookings/{id}/status"),
        Some(json!({ "status": "confirmed" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "confirmed");

    let (_, body) =
        call(&app, Method::GET, "/api/dashboard/stats", None).await;
    let recent = &body["data"]["recentBookings"][0];
    assert_eq!(recent["id"], id.as_str());
    assert_eq!(recent["customerName"], "Asha Rao");
    assert_eq!(recent["packageName"], "Munnar Hills");
    assert_eq!(recent["status"], "confirmed");
    assert_eq!(body["data"]["pendingApprovals"], 0);
}

#[tokio::test]
async fn booking_with_inverted_stay_is_rejected() {
    let mut form = booking_form(None);
    form["checkOut"] = json!("2026-10-30");

    let (status, body) =
        call(&app(), Method::POST, "/api/bookings", Some(form)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid or missing fields: `checkOut`");
}

#[tokio::test]
async fn registration_keeps_dangling_property() {
    let app = app();

    let (_, body) = call(
        &app,
        Method::POST,
        "/api/investment",
        Some(json!({ "title": "Goa Villa", "price": 9500000 })),
    )
    .await;
    assert_eq!(body["data"]["status"], "available");
    let property_id = body["data"]["id"].as_str().unwrap().to_owned();

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/registrations",
        Some(json!({
            "type": "investment",
            "name": "Ravi Kumar",
            "email": "ravi@example.com",
            "phone": "9876543210",
            "propertyId": property_id,
            "requirements": "3BHK",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["property"]["title"], "Goa Villa");

    let (status, _) = call(
        &app,
        Method::DELETE,
        &format!("/api/investment/{property_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(
        &app,
        Method::GET,
        "/api/form-responses?type=investment",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let listed = body["data"].as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["propertyId"], property_id.as_str());
    assert_eq!(listed[0]["property"], Value::Null);
    assert_eq!(listed[0]["status"], "pending");

    let (status, body) = call(
        &app,
        Method::GET,
        "/api/form-responses?type=unknown",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid or missing fields: `type`");
}

#[tokio::test]
async fn form_response_status_is_updated() {
    let app = app();

    let (_, body) = call(
        &app,
        Method::POST,
        "/api/form-responses",
        Some(json!({
            "type": "general",
            "name": "Kiran",
            "email": "kiran@example.com",
            "phone": "9123456780",
            "message": "Please call",
        })),
    )
    .await;
    let id = body["data"]["id"].as_str().unwrap().to_owned();

    let (status, body) = call(
        &app,
        Method::PATCH,
        &format!("/api/registrations/{id}/status"),
        Some(json!({ "status": "contacted" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "contacted");

    let (status, _) = call(
        &app,
        Method::DELETE,
        &format!("/api/form-responses/{id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(
        &app,
        Method::DELETE,
        &format!("/api/form-responses/{id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn updates_of_absent_records_are_not_found() {
    let app = app();
    let absent = "6f1c2b9e-8d4a-4c3e-9b7f-2a5d0e1c3b4a";

    let (_, body) = call(
        &app,
        Method::POST,
        "/api/tourism",
        Some(json!({
            "title": "Hampi Ruins",
            "description": "Heritage walk",
            "price": 15000,
        })),
    )
    .await;
    let kept = body["data"].clone();

    for (method, uri, input) in [
        (
            Method::PUT,
            format!("/api/tourism/{absent}"),
            json!({
                "title": "Hampi Ruins Deluxe",
                "description": "Heritage walk",
                "price": 18000,
            }),
        ),
        (
            Method::PATCH,
            format!("/api/investment/{absent}/status"),
            json!({ "status": "sold" }),
        ),
        (
            Method::PATCH,
            format!("/api/bookings/{absent}/status"),
            json!({ "status": "confirmed" }),
        ),
    ] {
        let (status, body) = call(&app, method, &uri, Some(input)).await;

        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body["success"], false, "{uri}");
    }

    let (_, body) = call(&app, Method::GET, "/api/tourism", None).await;
    assert_eq!(body["data"], json!([kept]));
    for uri in ["/api/investment", "/api/bookings"] {
        let (_, body) = call(&app, Method::GET, uri, None).await;
        assert_eq!(body["data"], json!([]), "{uri}");
    }
}

#[tokio::test]
async fn largest_prices_keep_exact_revenue() {
    let app = app();

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/tourism",
        Some(json!({
            "title": "Private Island",
            "description": "Whole island",
            "price": 1_000_000_000_000_u64,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid or missing fields: `price`");

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/tourism",
        Some(json!({
            "title": "Private Island",
            "description": "Whole island",
            "price": 999_999_999_999.99,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["price"].to_string(), "999999999999.99");
    let package_id = body["data"]["id"].as_str().unwrap().to_owned();

    let today = DateTime::now().date().to_string();
    let year = today[..4].parse::<u16>().unwrap();
    for _ in 0..2 {
        let mut form = booking_form(Some(&package_id));
        form["checkIn"] = json!(today);
        form["checkOut"] = json!(format!("{}-12-31", year + 1));
        let (_, body) =
            call(&app, Method::POST, "/api/bookings", Some(form)).await;
        let id = body["data"]["id"].as_str().unwrap().to_owned();

        let (status, _) = call(
            &app,
            Method::PATCH,
            &format!("/api/bookings/{id}/status"),
            Some(json!({ "status": "confirmed" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) =
        call(&app, Method::GET, "/api/dashboard/stats", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"]["monthlyRevenue"].to_string(),
        "1999999999999.98",
    );
}
