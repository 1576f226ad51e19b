//! Integration tests for the admin area and student feedback/complaints.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    admin, body_json, delete_auth, get, get_auth, multipart_auth, post_json, post_json_auth,
    student, ustaz, Part,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_lists_every_user(pool: PgPool) {
    let test = common::build_test_app(pool);
    let root = admin(&test).await;
    student(&test, "Salim").await;
    ustaz(&test, "Yusuf").await;

    let response = get_auth(test.app(), "/api/admin/users", &root.token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let users = json["data"].as_array().unwrap();
    assert_eq!(users.len(), 3);
    assert!(users.iter().all(|u| u.get("password_hash").is_none()));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_deletes_users_but_not_self(pool: PgPool) {
    let test = common::build_test_app(pool);
    let root = admin(&test).await;
    let pupil = student(&test, "Salim").await;

    let response = delete_auth(
        test.app(),
        &format!("/api/admin/users/{}", root.id),
        &root.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let uri = format!("/api/admin/users/{}", pupil.id);
    let response = delete_auth(test.app(), &uri, &root.token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete_auth(test.app(), &uri, &root.token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The deleted account can no longer log in.
    let response = post_json(
        test.app(),
        "/api/auth/login",
        json!({ "email": "salim@muraja.test", "password": common::PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_a_user_removes_only_their_own_photos(pool: PgPool) {
    let test = common::build_test_app(pool);
    let root = admin(&test).await;
    let mentor = ustaz(&test, "Yusuf").await;
    let pupil = student(&test, "Salim").await;
    let receiver = pupil.id.to_string();

    let response = multipart_auth(
        test.app(),
        Method::POST,
        "/api/chat/send",
        &mentor.token,
        &[
            Part::Text("receiver_id", &receiver),
            Part::File {
                name: "file",
                file_name: "plan.pdf",
                content_type: "application/pdf",
                bytes: b"%PDF-1.7",
            },
        ],
    )
    .await;
    let attachment = body_json(response).await["data"]["attachment_url"]
        .as_str()
        .unwrap()
        .to_string();

    let response = multipart_auth(
        test.app(),
        Method::PUT,
        "/api/users/profile",
        &pupil.token,
        &[Part::Text("photo_url", &attachment)],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = multipart_auth(
        test.app(),
        Method::PUT,
        "/api/users/profile",
        &pupil.token,
        &[Part::File {
            name: "photo",
            file_name: "me.png",
            content_type: "image/png",
            bytes: b"\x89PNG fake",
        }],
    )
    .await;
    let photo = body_json(response).await["data"]["photo_url"]
        .as_str()
        .unwrap()
        .to_string();

    let uri = format!("/api/admin/users/{}", pupil.id);
    let response = delete_auth(test.app(), &uri, &root.token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert_eq!(get(test.app(), &photo).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(get(test.app(), &attachment).await.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn assign_ustaz_checks_roles(pool: PgPool) {
    let test = common::build_test_app(pool);
    let root = admin(&test).await;
    let pupil = student(&test, "Salim").await;
    let mentor = ustaz(&test, "Yusuf").await;

    let response = post_json_auth(
        test.app(),
        "/api/admin/assign-ustaz",
        &root.token,
        json!({ "student_id": mentor.id, "ustaz_id": mentor.id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        test.app(),
        "/api/admin/assign-ustaz",
        &root.token,
        json!({ "student_id": pupil.id, "ustaz_id": pupil.id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        test.app(),
        "/api/admin/assign-ustaz",
        &root.token,
        json!({ "student_id": pupil.id, "ustaz_id": mentor.id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["assigned_ustaz_id"], mentor.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn student_notes_reach_the_admin(pool: PgPool) {
    let test = common::build_test_app(pool);
    let root = admin(&test).await;
    let pupil = student(&test, "Salim").await;
    let mentor = ustaz(&test, "Yusuf").await;

    let response = post_json_auth(
        test.app(),
        "/api/student/feedback",
        &pupil.token,
        json!({ "content": "The revision schedule helps a lot" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json_auth(
        test.app(),
        "/api/student/complaint",
        &pupil.token,
        json!({ "content": "Audio in class is hard to hear" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json_auth(
        test.app(),
        "/api/student/feedback",
        &pupil.token,
        json!({ "content": "   " }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        test.app(),
        "/api/student/complaint",
        &mentor.token,
        json!({ "content": "not a student" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(test.app(), "/api/admin/feedback", &root.token).await;
    let feedback = body_json(response).await;
    assert_eq!(feedback["data"][0]["student_name"], "Salim");
    assert_eq!(feedback["data"][0]["content"], "The revision schedule helps a lot");

    let response = get_auth(test.app(), "/api/admin/complaints", &root.token).await;
    let complaints = body_json(response).await;
    assert_eq!(complaints["data"].as_array().unwrap().len(), 1);
    assert_eq!(complaints["data"][0]["student_email"], "salim@muraja.test");
}
