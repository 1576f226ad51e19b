//! Integration tests for time slots and booking.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, connect, delete_auth, get_auth, post_auth, post_json_auth, student, ustaz, Account,
    TestApp,
};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn create_slot(test: &TestApp, owner: &Account, day: &str, start: &str, end: &str) -> Value {
    let response = post_json_auth(
        test.app(),
        "/api/schedule",
        &owner.token,
        json!({ "day": day, "start_time": start, "end_time": end }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn slots_are_listed_in_week_order(pool: PgPool) {
    let test = common::build_test_app(pool);
    let mentor = ustaz(&test, "Yusuf").await;
    let other = ustaz(&test, "Idris").await;

    create_slot(&test, &mentor, "Wednesday", "09:00", "10:00").await;
    create_slot(&test, &mentor, "Monday", "14:00", "15:00").await;
    create_slot(&test, &mentor, "Monday", "08:30", "09:30").await;
    create_slot(&test, &other, "Tuesday", "10:00", "11:00").await;

    let uri = format!("/api/schedule?ustaz_id={}", mentor.id);
    let response = get_auth(test.app(), &uri, &mentor.token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let order: Vec<(String, String)> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| {
            (
                s["day"].as_str().unwrap().to_string(),
                s["start_time"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    assert_eq!(
        order,
        vec![
            ("Monday".to_string(), "08:30".to_string()),
            ("Monday".to_string(), "14:00".to_string()),
            ("Wednesday".to_string(), "09:00".to_string()),
        ]
    );

    let response = get_auth(test.app(), "/api/schedule", &mentor.token).await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 4);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_slots_are_rejected(pool: PgPool) {
    let test = common::build_test_app(pool);
    let mentor = ustaz(&test, "Yusuf").await;

    for (day, start, end) in [
        ("Funday", "09:00", "10:00"),
        ("Monday", "10:00", "10:00"),
        ("Monday", "11:00", "10:00"),
        ("Monday", "9am", "10:00"),
    ] {
        let response = post_json_auth(
            test.app(),
            "/api/schedule",
            &mentor.token,
            json!({ "day": day, "start_time": start, "end_time": end }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{day} {start}-{end}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn only_the_owner_deletes_a_slot(pool: PgPool) {
    let test = common::build_test_app(pool);
    let mentor = ustaz(&test, "Yusuf").await;
    let other = ustaz(&test, "Idris").await;
    let slot = create_slot(&test, &mentor, "Friday", "16:00", "17:00").await;
    let uri = format!("/api/schedule/{}", slot["id"]);

    let response = delete_auth(test.app(), &uri, &other.token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(test.app(), &uri, &mentor.token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete_auth(test.app(), &uri, &mentor.token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn booking_requires_an_accepted_connection(pool: PgPool) {
    let test = common::build_test_app(pool);
    let mentor = ustaz(&test, "Yusuf").await;
    let pupil = student(&test, "Salim").await;
    let stranger = student(&test, "Anas").await;
    connect(&test, &pupil, &mentor).await;

    let slot = create_slot(&test, &mentor, "Saturday", "07:00", "08:00").await;
    let uri = format!("/api/schedule/{}/book", slot["id"]);

    let response = post_auth(test.app(), &uri, &stranger.token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_auth(test.app(), &uri, &pupil.token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let booked = body_json(response).await;
    assert_eq!(booked["data"]["is_booked"], true);
    assert_eq!(booked["data"]["booked_by"], pupil.id);

    let response = post_auth(test.app(), &uri, &pupil.token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
