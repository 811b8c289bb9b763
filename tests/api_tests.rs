mod common;

use chrono::{Duration, Utc};
use common::TestApp;
use postwright::r#gen::client::CompletionError;
use postwright::models::PostRecord;
use reqwest::StatusCode;
use serde_json::json;

// ── Health ──────────────────────────────────────────────────────

#[tokio::test]
async fn health_returns_ok() {
    let app = common::spawn_app().await;

    let resp = app.client.get(app.url("/health")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "ok");
}

// ── Registration & login ────────────────────────────────────────

#[tokio::test]
async fn first_registration_becomes_admin_later_ones_plain_users() {
    let app = common::spawn_app().await;

    let (body, status) = app.register("admin", "password123").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "Admin");

    let (body, status) = app.register("alice", "password123").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "User");
    assert_eq!(body["user"]["tier"], "Basic");
}

#[tokio::test]
async fn register_rejects_duplicate_username_without_altering_existing() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    let (body, status) = app.register("admin", "otherpassword").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("already exists"));

    // the original credentials still work
    let (_, status) = app.login("admin", "password123").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn register_rejects_short_password() {
    let app = common::spawn_app().await;

    let (_, status) = app.register("admin", "short").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_matches_username_case_insensitively() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    let (body, status) = app.login("ADMIN", "password123").await;
    assert_eq!(status, StatusCode::OK);
    // stored spelling is preserved
    assert_eq!(body["user"]["username"], "admin");
}

#[tokio::test]
async fn login_failures_are_distinct() {
    let app = common::spawn_app().await;

    // empty store
    let (body, status) = app.login("nobody", "password123").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].as_str().unwrap().contains("No users exist"));

    let admin_token = app.bootstrap().await;

    let (body, status) = app.login("nobody", "password123").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].as_str().unwrap().contains("User not found"));

    let (body, status) = app.login("admin", "wrongpassword").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].as_str().unwrap().contains("Incorrect password"));

    let (_, status) = app.login("   ", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // disabled accounts fail regardless of password correctness
    let resp = app
        .client
        .put(app.url("/api/v1/admin/users/admin/enabled"))
        .bearer_auth(&admin_token)
        .json(&json!({ "enabled": false }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let (body, status) = app.login("admin", "password123").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["error"].as_str().unwrap().contains("disabled"));
}

#[tokio::test]
async fn login_records_last_login() {
    let app = common::spawn_app().await;
    let token = app.bootstrap().await;

    app.login("admin", "password123").await;
    let (body, status) = app.get_json(&token, "/api/v1/me").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["last_login"].is_string());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn repeated_login_failures_are_rate_limited() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    for _ in 0..5 {
        let (_, status) = app.login("admin", "wrongpassword").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
    let (_, status) = app.login("admin", "wrongpassword").await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn change_password_requires_current_password() {
    let app = common::spawn_app().await;
    let token = app.bootstrap().await;

    let resp = app
        .client
        .post(app.url("/api/v1/auth/change-password"))
        .bearer_auth(&token)
        .json(&json!({ "current_password": "wrong", "new_password": "newpassword1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = app
        .client
        .post(app.url("/api/v1/auth/change-password"))
        .bearer_auth(&token)
        .json(&json!({ "current_password": "password123", "new_password": "newpassword1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let (_, status) = app.login("admin", "newpassword1").await;
    assert_eq!(status, StatusCode::OK);
}

// ── Admin account management ────────────────────────────────────

#[tokio::test]
async fn admin_routes_reject_plain_users() {
    let app = common::spawn_app().await;
    let admin_token = app.bootstrap().await;
    let user_token = app.create_and_login_user(&admin_token, "alice").await;

    let (_, status) = app.get_json(&user_token, "/api/v1/admin/users").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (_, status) = app.get_json(&user_token, "/api/v1/admin/stats").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn unknown_tier_and_role_default_instead_of_erroring() {
    let app = common::spawn_app().await;
    let token = app.bootstrap().await;

    let resp = app
        .client
        .post(app.url("/api/v1/admin/users"))
        .bearer_auth(&token)
        .json(&json!({
            "username": "bob",
            "password": "password123",
            "tier": "Platinum",
            "role": "Superuser",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["tier"], "Basic");
    assert_eq!(body["role"], "User");
}

#[tokio::test]
async fn creating_user_with_unknown_company_fails() {
    let app = common::spawn_app().await;
    let token = app.bootstrap().await;

    let resp = app
        .client
        .post(app.url("/api/v1/admin/users"))
        .bearer_auth(&token)
        .json(&json!({
            "username": "bob",
            "password": "password123",
            "company_id": 99,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn tier_update_round_trips() {
    let app = common::spawn_app().await;
    let token = app.bootstrap().await;
    app.create_and_login_user(&token, "alice").await;

    let resp = app
        .client
        .put(app.url("/api/v1/admin/users/alice/tier"))
        .bearer_auth(&token)
        .json(&json!({ "tier": "Premium" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let (body, _) = app.get_json(&token, "/api/v1/admin/users/alice").await;
    assert_eq!(body["tier"], "Premium");
}

// ── Companies ───────────────────────────────────────────────────

#[tokio::test]
async fn company_create_defaults_monthly_window() {
    let app = common::spawn_app().await;
    let token = app.bootstrap().await;

    let company = app.create_company(&token, "Acme").await;
    assert_eq!(company["id"], 1);
    assert_eq!(company["enabled"], true);

    let start: chrono::DateTime<Utc> =
        company["start_date"].as_str().unwrap().parse().unwrap();
    let expiration: chrono::DateTime<Utc> =
        company["expiration_date"].as_str().unwrap().parse().unwrap();
    assert_eq!((expiration - start).num_days(), 30);
}

#[tokio::test]
async fn company_names_are_unique_case_insensitively() {
    let app = common::spawn_app().await;
    let token = app.bootstrap().await;
    app.create_company(&token, "Acme").await;

    let resp = app
        .client
        .post(app.url("/api/v1/admin/companies"))
        .bearer_auth(&token)
        .json(&json!({ "name": "ACME" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn subscription_status_reflects_expiration_and_enabled_flag() {
    let app = common::spawn_app().await;
    let token = app.bootstrap().await;

    let company = app.create_company(&token, "Acme").await;
    let id = company["id"].as_u64().unwrap();

    let (body, _) = app
        .get_json(&token, &format!("/api/v1/admin/companies/{id}/subscription/status"))
        .await;
    assert_eq!(body["active"], true);

    // disabled company is inactive even with a future expiration
    let resp = app
        .client
        .put(app.url(&format!("/api/v1/admin/companies/{id}/enabled")))
        .bearer_auth(&token)
        .json(&json!({ "enabled": false }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let (body, _) = app
        .get_json(&token, &format!("/api/v1/admin/companies/{id}/subscription/status"))
        .await;
    assert_eq!(body["active"], false);

    // re-enable but expire the subscription
    app.client
        .put(app.url(&format!("/api/v1/admin/companies/{id}/enabled")))
        .bearer_auth(&token)
        .json(&json!({ "enabled": true }))
        .send()
        .await
        .unwrap();
    let resp = app
        .client
        .put(app.url(&format!("/api/v1/admin/companies/{id}/subscription")))
        .bearer_auth(&token)
        .json(&json!({ "expiration_date": Utc::now() - Duration::days(1) }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let (body, _) = app
        .get_json(&token, &format!("/api/v1/admin/companies/{id}/subscription/status"))
        .await;
    assert_eq!(body["active"], false);
}

#[tokio::test]
async fn deleting_a_company_detaches_its_users() {
    let app = common::spawn_app().await;
    let token = app.bootstrap().await;

    let company = app.create_company(&token, "Acme").await;
    let id = company["id"].as_u64().unwrap();

    let resp = app
        .client
        .post(app.url("/api/v1/admin/users"))
        .bearer_auth(&token)
        .json(&json!({ "username": "bob", "password": "password123", "company_id": id }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .client
        .delete(app.url(&format!("/api/v1/admin/companies/{id}")))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let (body, _) = app.get_json(&token, "/api/v1/admin/users/bob").await;
    assert!(body["company_id"].is_null());

    // second delete reports not found
    let resp = app
        .client
        .delete(app.url(&format!("/api/v1/admin/companies/{id}")))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn company_ids_are_max_plus_one_over_the_current_collection() {
    let app = common::spawn_app().await;
    let token = app.bootstrap().await;

    let first = app.create_company(&token, "Acme").await;
    assert_eq!(first["id"], 1);
    let second = app.create_company(&token, "Globex").await;
    assert_eq!(second["id"], 2);

    app.client
        .delete(app.url("/api/v1/admin/companies/2"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();

    let third = app.create_company(&token, "Initech").await;
    assert_eq!(third["id"], 2); // max(existing)+1 with only id 1 left
}

// ── Generation workflow ─────────────────────────────────────────

#[tokio::test]
async fn generate_saves_post_and_returns_image_prompt() {
    let app = common::spawn_app().await;
    let admin_token = app.bootstrap().await;
    let token = app.create_and_login_user(&admin_token, "alice").await;

    app.completion
        .set_reply("AI is transforming healthcare. Here is why professionals should care today.")
        .await;

    let (body, status) = app
        .generate(&token, &TestApp::generate_body("AI in Healthcare"))
        .await;
    assert_eq!(status, StatusCode::OK, "generate failed: {body}");
    assert_eq!(app.completion.call_count(), 1);

    // the prompt embedded the structured fields and the length guidance
    let (system, user) = app.completion.last_prompt.lock().await.clone().unwrap();
    assert!(system.contains("professional LinkedIn post writer"));
    for needle in [
        "AI in Healthcare",
        "Inform professionals",
        "Professionals",
        "AI transforms care",
        "Educate",
        "300-800 characters",
    ] {
        assert!(user.contains(needle), "prompt missing {needle:?}");
    }

    assert_eq!(body["post"]["post_length"], "Short");
    assert_eq!(body["post"]["post_goal"], "Educate");
    assert!(body["image_prompt"].as_str().unwrap().contains("AI in Healthcare"));

    // newest post first in the admin listing
    let (posts, _) = app.get_json(&admin_token, "/api/v1/admin/posts").await;
    assert_eq!(posts[0]["topic"], "AI in Healthcare");
    assert_eq!(posts[0]["user_id"], "alice");
}

#[tokio::test]
async fn generate_rejects_oversized_topic_without_calling_backend() {
    let app = common::spawn_app().await;
    let admin_token = app.bootstrap().await;
    let token = app.create_and_login_user(&admin_token, "alice").await;

    let (body, status) = app
        .generate(&token, &TestApp::generate_body(&"x".repeat(250)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("200 characters"));
    assert_eq!(app.completion.call_count(), 0);

    // and nothing was saved
    let (posts, _) = app.get_json(&token, "/api/v1/posts").await;
    assert_eq!(posts.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn upstream_failures_map_to_distinct_statuses() {
    let app = common::spawn_app().await;
    let admin_token = app.bootstrap().await;
    let token = app.create_and_login_user(&admin_token, "alice").await;

    app.completion.fail_next(CompletionError::RateLimited).await;
    let (body, status) = app.generate(&token, &TestApp::generate_body("Topic")).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert!(body["error"].as_str().unwrap().contains("busy"));

    app.completion.fail_next(CompletionError::QuotaExceeded).await;
    let (body, status) = app.generate(&token, &TestApp::generate_body("Topic")).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("quota"));

    app.completion
        .fail_next(CompletionError::BadCredentials)
        .await;
    let (_, status) = app.generate(&token, &TestApp::generate_body("Topic")).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn overlong_completion_is_truncated_to_linkedin_limit() {
    let app = common::spawn_app().await;
    let admin_token = app.bootstrap().await;
    let token = app.create_and_login_user(&admin_token, "alice").await;

    app.completion.set_reply(&"y".repeat(4000)).await;
    let (body, status) = app.generate(&token, &TestApp::generate_body("Topic")).await;
    assert_eq!(status, StatusCode::OK);

    let post = body["post"]["generated_post"].as_str().unwrap();
    assert_eq!(post.chars().count(), 3000);
    assert!(post.ends_with("..."));
}

#[tokio::test]
async fn lapsed_company_subscription_blocks_generation() {
    let app = common::spawn_app().await;
    let admin_token = app.bootstrap().await;

    let resp = app
        .client
        .post(app.url("/api/v1/admin/companies"))
        .bearer_auth(&admin_token)
        .json(&json!({
            "name": "Lapsed Inc",
            "expiration_date": Utc::now() - Duration::days(1),
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let company: serde_json::Value = resp.json().await.unwrap();
    let id = company["id"].as_u64().unwrap();

    let resp = app
        .client
        .post(app.url("/api/v1/admin/users"))
        .bearer_auth(&admin_token)
        .json(&json!({ "username": "bob", "password": "password123", "company_id": id }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let (body, status) = app.login("bob", "password123").await;
    assert_eq!(status, StatusCode::OK);
    let token = body["access_token"].as_str().unwrap().to_string();

    let (body, status) = app.generate(&token, &TestApp::generate_body("Topic")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["error"].as_str().unwrap().contains("subscription"));
    assert_eq!(app.completion.call_count(), 0);
}

// ── History, stats, analytics ───────────────────────────────────

fn seeded_post(id: u64, user: &str, goal: &str, length: &str, days_ago: i64) -> PostRecord {
    PostRecord {
        id,
        user_id: user.to_string(),
        date: Utc::now() - Duration::days(days_ago),
        topic: format!("Topic {id}"),
        purpose: "Purpose".to_string(),
        audience: "General".to_string(),
        message: "Message".to_string(),
        tone_intensity: "Moderate".to_string(),
        language_style: "Professional".to_string(),
        post_length: length.to_string(),
        formatting: "Paragraphs".to_string(),
        cta: String::new(),
        post_goal: goal.to_string(),
        generated_post: "Generated text".to_string(),
    }
}

fn seed_posts(app: &TestApp, posts: &[PostRecord]) {
    let json = serde_json::to_string_pretty(posts).unwrap();
    std::fs::write(app.data_dir.join("posts.json"), json).unwrap();
}

#[tokio::test]
async fn stats_count_today_and_rolling_week() {
    let app = common::spawn_app().await;
    let admin_token = app.bootstrap().await;
    let token = app.create_and_login_user(&admin_token, "alice").await;

    let mut posts: Vec<PostRecord> = (1..=3)
        .map(|id| seeded_post(id, "alice", "Educate", "Short", 0))
        .collect();
    posts.push(seeded_post(4, "alice", "Engage", "Long", 10));
    posts.push(seeded_post(5, "alice", "Engage", "Long", 10));
    seed_posts(&app, &posts);

    let (body, status) = app.get_json(&token, "/api/v1/posts/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_posts"], 5);
    assert_eq!(body["posts_today"], 3);
    assert_eq!(body["posts_week"], 3);
}

#[tokio::test]
async fn history_is_sorted_newest_first_and_respects_limit() {
    let app = common::spawn_app().await;
    let admin_token = app.bootstrap().await;
    let token = app.create_and_login_user(&admin_token, "alice").await;

    seed_posts(
        &app,
        &[
            seeded_post(1, "alice", "Educate", "Short", 5),
            seeded_post(2, "alice", "Educate", "Short", 1),
            seeded_post(3, "bob", "Educate", "Short", 0),
        ],
    );

    let (body, _) = app.get_json(&token, "/api/v1/posts").await;
    let posts = body.as_array().unwrap();
    assert_eq!(posts.len(), 2); // only alice's
    assert_eq!(posts[0]["id"], 2); // newest first

    let (body, _) = app.get_json(&token, "/api/v1/posts?limit=1").await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn analytics_group_by_goal_and_length() {
    let app = common::spawn_app().await;
    let token = app.bootstrap().await;

    seed_posts(
        &app,
        &[
            seeded_post(1, "alice", "Educate", "Short", 0),
            seeded_post(2, "alice", "Educate", "Long", 0),
            seeded_post(3, "bob", "Engage", "Short", 0),
        ],
    );

    let (body, status) = app.get_json(&token, "/api/v1/admin/analytics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["posts_by_goal"]["Educate"], 2);
    assert_eq!(body["posts_by_goal"]["Engage"], 1);
    assert_eq!(body["posts_by_length"]["Short"], 2);
    assert_eq!(body["posts_by_length"]["Long"], 1);
    assert_eq!(body["all_posts"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn csv_export_has_one_row_per_post() {
    let app = common::spawn_app().await;
    let admin_token = app.bootstrap().await;
    let token = app.create_and_login_user(&admin_token, "alice").await;

    seed_posts(
        &app,
        &[
            seeded_post(1, "alice", "Educate", "Short", 1),
            seeded_post(2, "alice", "Engage", "Long", 0),
        ],
    );

    let resp = app
        .client
        .get(app.url("/api/v1/posts/export"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "text/csv"
    );
    let csv = resp.text().await.unwrap();
    assert!(csv.starts_with("id,user_id,date"));
    assert_eq!(csv.lines().count(), 3); // header + 2 rows
}

#[tokio::test]
async fn deleting_a_post_is_idempotent() {
    let app = common::spawn_app().await;
    let token = app.bootstrap().await;

    seed_posts(&app, &[seeded_post(1, "alice", "Educate", "Short", 0)]);

    let resp = app
        .client
        .delete(app.url("/api/v1/admin/posts/1"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let (body, _) = app.get_json(&token, "/api/v1/admin/posts").await;
    assert_eq!(body.as_array().unwrap().len(), 0);

    // deleting an absent id is a silent no-op
    let resp = app
        .client
        .delete(app.url("/api/v1/admin/posts/1"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn generation_upserts_activity_records() {
    let app = common::spawn_app().await;
    let admin_token = app.bootstrap().await;
    let token = app.create_and_login_user(&admin_token, "alice").await;

    app.generate(&token, &TestApp::generate_body("First"))
        .await;
    app.generate(&token, &TestApp::generate_body("Second"))
        .await;

    let (body, status) = app.get_json(&admin_token, "/api/v1/admin/activity").await;
    assert_eq!(status, StatusCode::OK);
    let activity = body.as_array().unwrap();
    assert_eq!(activity.len(), 1);
    assert_eq!(activity[0]["user_id"], "alice");
    assert_eq!(activity[0]["post_count"], 2);
}

#[tokio::test]
async fn post_ids_are_never_reused() {
    let app = common::spawn_app().await;
    let admin_token = app.bootstrap().await;
    let token = app.create_and_login_user(&admin_token, "alice").await;

    let (body, _) = app.generate(&token, &TestApp::generate_body("First")).await;
    let first_id = body["post"]["id"].as_u64().unwrap();

    app.client
        .delete(app.url(&format!("/api/v1/admin/posts/{first_id}")))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap();

    let (body, _) = app.generate(&token, &TestApp::generate_body("Second")).await;
    let second_id = body["post"]["id"].as_u64().unwrap();
    assert!(second_id > first_id);
}

// ── Branding ────────────────────────────────────────────────────

#[tokio::test]
async fn branding_read_is_public_and_write_is_admin_only() {
    let app = common::spawn_app().await;

    let resp = app
        .client
        .get(app.url("/api/v1/branding"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["customer_name"], "LinkedIn Post Generator");

    let admin_token = app.bootstrap().await;
    let user_token = app.create_and_login_user(&admin_token, "alice").await;

    let resp = app
        .client
        .put(app.url("/api/v1/admin/branding"))
        .bearer_auth(&user_token)
        .json(&json!({ "customer_name": "Acme" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // a partial update keeps the remaining keys at their defaults
    let resp = app
        .client
        .put(app.url("/api/v1/admin/branding"))
        .bearer_auth(&admin_token)
        .json(&json!({ "customer_name": "Acme" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["customer_name"], "Acme");
    assert_eq!(body["button_color"], "#17A2B8");

    let resp = app
        .client
        .get(app.url("/api/v1/branding"))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["customer_name"], "Acme");
}
