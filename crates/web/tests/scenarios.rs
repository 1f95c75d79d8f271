//! End-to-end flows against a real database. Run with
//! `DATABASE_URL=postgres://... cargo test -- --ignored`.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::json;
use sqlx::PgPool;
use tokio::task::JoinSet;

use common::{app, call, signup};

#[sqlx::test(migrations = "../storage/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn athlete_signup_login_and_profile(pool: PgPool) {
    let app = app(pool);
    signup(&app, "athlete", "asha@example.com").await;

    let (status, body) = call(
        &app,
        "POST",
        "/api/auth/athlete/signup",
        None,
        Some(json!({
            "name": "Asha Again",
            "email": "ASHA@example.com",
            "password": "secret123",
            "sport": "Tennis",
            "experience": "1-3"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Athlete already exists with this email");

    let (status, body) = call(
        &app,
        "POST",
        "/api/auth/athlete/login",
        None,
        Some(json!({ "email": "asha@example.com", "password": "wrong-one" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid email or password");

    let (status, body) = call(
        &app,
        "POST",
        "/api/auth/athlete/login",
        None,
        Some(json!({ "email": "asha@example.com", "password": "secret123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hasProfile"], json!(false));
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = call(&app, "GET", "/api/athlete/profile", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["level"], "Intermediate");

    let (status, body) = call(
        &app,
        "PUT",
        "/api/athlete/profile",
        Some(&token),
        Some(json!({ "name": "Asha P", "sport": "Badminton", "level": "Advanced" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["isProfileComplete"], json!(true));

    let (_, body) = call(&app, "GET", "/api/auth/athlete/me", Some(&token), None).await;
    assert_eq!(body["data"]["sport"], "Badminton");
}

#[sqlx::test(migrations = "../storage/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn coach_request_lifecycle(pool: PgPool) {
    let app = app(pool);
    let athlete = signup(&app, "athlete", "asha@example.com").await;
    let coach = signup(&app, "coach", "ravi@example.com").await;

    let (_, body) = call(&app, "GET", "/api/coach/profile", Some(&coach), None).await;
    let coach_id = body["data"]["profileId"].as_str().unwrap().to_string();

    let (status, body) = call(&app, "GET", "/api/athlete/find-coaches", Some(&athlete), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["requestStatus"], "not_sent");

    let send = json!({ "coachId": coach_id });
    let (status, body) = call(
        &app,
        "POST",
        "/api/athlete/find-coaches/send-request",
        Some(&athlete),
        Some(send.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["message"], "I would like to train with you!");

    let (status, body) = call(
        &app,
        "POST",
        "/api/athlete/find-coaches/send-request",
        Some(&athlete),
        Some(send),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Request already pending");

    let (_, body) = call(&app, "GET", "/api/coach/requests?status=pending", Some(&coach), None).await;
    let request_id = body["data"][0]["requestId"].as_str().unwrap().to_string();

    let uri = format!("/api/coach/requests/{request_id}");
    let (status, body) = call(&app, "PUT", &uri, Some(&coach), Some(json!({ "status": "accepted" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Request accepted successfully");

    let (status, body) = call(&app, "PUT", &uri, Some(&coach), Some(json!({ "status": "rejected" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Request is already accepted");

    let (_, body) = call(&app, "GET", "/api/coach/requests/accepted-athletes", Some(&coach), None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (_, body) = call(&app, "GET", "/api/athlete/find-coaches", Some(&athlete), None).await;
    assert_eq!(body["data"][0]["requestStatus"], "accepted");
}

#[sqlx::test(migrations = "../storage/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn tournament_capacity_and_withdrawal(pool: PgPool) {
    let app = app(pool);
    let admin = signup(&app, "admin", "root@example.com").await;
    let first = signup(&app, "athlete", "first@example.com").await;
    let second = signup(&app, "athlete", "second@example.com").await;

    let (status, body) = call(
        &app,
        "POST",
        "/api/admin/tournaments",
        Some(&admin),
        Some(json!({
            "name": "City Open",
            "sport": "Tennis",
            "date": (Utc::now() + Duration::days(30)).to_rfc3339(),
            "participants": 8,
            "location": "Pune",
            "prize": "Trophy",
            "organizer": "City Club",
            "maxAthletes": 1
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let id = body["data"]["tournamentId"].as_str().unwrap().to_string();
    let register = format!("/api/athlete/tournaments/{id}/register");

    let (status, body) = call(&app, "POST", &register, Some(&first), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "pending");

    let (status, body) = call(&app, "POST", &register, Some(&first), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "You are already registered for this tournament (Status: pending)"
    );

    let (status, body) = call(&app, "POST", &register, Some(&second), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No more athlete slots available for this tournament");

    let (status, _) = call(&app, "DELETE", &register, Some(&first), None).await;
    assert_eq!(status, StatusCode::OK);

    // withdrawal is final
    let (status, body) = call(&app, "POST", &register, Some(&first), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "You are already registered for this tournament (Status: withdrawn)"
    );
    let (status, body) = call(&app, "DELETE", &register, Some(&first), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Registration not found");

    let (status, _) = call(&app, "POST", &register, Some(&second), None).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = call(
        &app,
        "GET",
        &format!("/api/admin/tournaments/{id}/registrations"),
        Some(&admin),
        None,
    )
    .await;
    let live: Vec<_> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|r| r["status"] == "pending")
        .collect();
    assert_eq!(live.len(), 1);
    let registration_id = live[0]["registrationId"].as_str().unwrap().to_string();

    let (status, body) = call(
        &app,
        "PUT",
        &format!("/api/admin/tournaments/registrations/{registration_id}"),
        Some(&admin),
        Some(json!({ "status": "approved" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["approvedBy"].is_string());

    let (status, _) = call(
        &app,
        "PUT",
        &format!("/api/admin/tournaments/registrations/{registration_id}"),
        Some(&admin),
        Some(json!({ "status": "rejected" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(&app, "DELETE", &register, Some(&second), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = call(&app, "GET", &format!("/api/admin/tournaments/{id}"), Some(&admin), None).await;
    assert_eq!(body["data"]["currentAthleteCount"], json!(1));
}

#[sqlx::test(migrations = "../storage/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn concurrent_registrations_never_overbook(pool: PgPool) {
    let app = app(pool);
    let admin = signup(&app, "admin", "root@example.com").await;

    let (status, body) = call(
        &app,
        "POST",
        "/api/admin/tournaments",
        Some(&admin),
        Some(json!({
            "name": "Last Seat Open",
            "sport": "Tennis",
            "date": (Utc::now() + Duration::days(30)).to_rfc3339(),
            "participants": 2,
            "location": "Pune",
            "prize": "Trophy",
            "organizer": "City Club",
            "maxAthletes": 1
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let id = body["data"]["tournamentId"].as_str().unwrap().to_string();
    let register = format!("/api/athlete/tournaments/{id}/register");

    let mut athletes = Vec::new();
    for n in 0..6 {
        athletes.push(signup(&app, "athlete", &format!("athlete{n}@example.com")).await);
    }

    let mut attempts = JoinSet::new();
    for token in athletes {
        let (app, register) = (app.clone(), register.clone());
        attempts.spawn(async move { call(&app, "POST", &register, Some(&token), None).await });
    }

    let mut created = 0;
    while let Some(result) = attempts.join_next().await {
        let (status, body) = result.unwrap();
        if status == StatusCode::CREATED {
            created += 1;
        } else {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["message"], "No more athlete slots available for this tournament");
        }
    }
    assert_eq!(created, 1);

    let (_, body) = call(&app, "GET", &format!("/api/admin/tournaments/{id}"), Some(&admin), None).await;
    assert_eq!(body["data"]["currentAthleteCount"], json!(1));

    let (_, body) = call(
        &app,
        "GET",
        &format!("/api/admin/tournaments/{id}/registrations"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../storage/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn concurrent_request_resolutions_settle_once(pool: PgPool) {
    let app = app(pool);
    let athlete = signup(&app, "athlete", "asha@example.com").await;
    let coach = signup(&app, "coach", "ravi@example.com").await;

    let (_, body) = call(&app, "GET", "/api/coach/profile", Some(&coach), None).await;
    let coach_id = body["data"]["profileId"].as_str().unwrap().to_string();

    let (status, _) = call(
        &app,
        "POST",
        "/api/athlete/find-coaches/send-request",
        Some(&athlete),
        Some(json!({ "coachId": coach_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = call(&app, "GET", "/api/coach/requests", Some(&coach), None).await;
    let request_id = body["data"][0]["requestId"].as_str().unwrap().to_string();
    let uri = format!("/api/coach/requests/{request_id}");

    let mut attempts = JoinSet::new();
    for decision in ["accepted", "rejected"] {
        let (app, uri, coach) = (app.clone(), uri.clone(), coach.clone());
        attempts.spawn(async move {
            let outcome = call(&app, "PUT", &uri, Some(&coach), Some(json!({ "status": decision }))).await;
            (decision, outcome)
        });
    }

    let mut winner = None;
    let mut losers = Vec::new();
    while let Some(result) = attempts.join_next().await {
        let (decision, (status, body)) = result.unwrap();
        if status == StatusCode::OK {
            assert!(winner.replace(decision).is_none());
        } else {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            losers.push(body["message"].as_str().unwrap().to_string());
        }
    }

    let winner = winner.unwrap();
    assert_eq!(losers, vec![format!("Request is already {winner}")]);

    let (_, body) = call(&app, "GET", "/api/coach/requests", Some(&coach), None).await;
    assert_eq!(body["data"][0]["status"], winner);
}

#[sqlx::test(migrations = "../storage/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn coach_sees_only_tournaments_open_to_coaches(pool: PgPool) {
    let app = app(pool);
    let coach = signup(&app, "coach", "ravi@example.com").await;

    let (status, _) = call(
        &app,
        "POST",
        "/api/coach/tournaments",
        Some(&coach),
        Some(json!({
            "name": "Junior Cup",
            "sport": "Badminton",
            "date": (Utc::now() + Duration::days(10)).to_rfc3339(),
            "participants": 16,
            "location": "Nashik",
            "prize": "Medals",
            "organizer": "Ravi Academy",
            "allowedUserTypes": ["coach", "athlete"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = call(&app, "GET", "/api/coach/tournaments", Some(&coach), None).await;
    assert_eq!(body["count"], json!(0));

    let (_, body) = call(&app, "GET", "/api/coach/tournaments/my-tournaments", Some(&coach), None).await;
    assert_eq!(body["count"], json!(1));
    assert_eq!(body["data"][0]["allowedUserTypes"], json!(["athlete"]));
}

#[sqlx::test(migrations = "../storage/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn admin_moderates_coaches_and_athletes(pool: PgPool) {
    let app = app(pool);
    let admin = signup(&app, "admin", "root@example.com").await;
    let athlete = signup(&app, "athlete", "asha@example.com").await;
    signup(&app, "coach", "ravi@example.com").await;

    let (_, body) = call(&app, "GET", "/api/admin/coaches/pending", Some(&admin), None).await;
    let coach_id = body["data"][0]["accountId"].as_str().unwrap().to_string();

    let (status, body) = call(
        &app,
        "POST",
        &format!("/api/admin/coaches/{coach_id}/verify-certificate"),
        Some(&admin),
        Some(json!({
            "sport": "Chess",
            "certificateName": "FIDE Trainer",
            "certificateUrl": "https://files.example.com/cert.pdf"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid sport");

    let (status, _) = call(
        &app,
        "PUT",
        &format!("/api/admin/coaches/{coach_id}/reject"),
        Some(&admin),
        Some(json!({ "reason": "Certificate unreadable" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = call(&app, "GET", &format!("/api/admin/coaches/{coach_id}"), Some(&admin), None).await;
    assert_eq!(body["data"]["rejectionReason"], "Certificate unreadable");

    let (_, body) = call(&app, "GET", "/api/admin/athletes", Some(&admin), None).await;
    let athlete_id = body["data"][0]["accountId"].as_str().unwrap().to_string();

    let (status, body) = call(
        &app,
        "PUT",
        &format!("/api/admin/athletes/{athlete_id}/status"),
        Some(&admin),
        Some(json!({ "status": "pending" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid status");

    let (status, _) = call(
        &app,
        "PUT",
        &format!("/api/admin/athletes/{athlete_id}/status"),
        Some(&admin),
        Some(json!({ "status": "suspended" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(&app, "GET", "/api/athlete/tournaments", Some(&athlete), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Athlete not active");
}
