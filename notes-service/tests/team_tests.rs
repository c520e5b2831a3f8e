mod common;

use common::TestApp;
use common::TestUser;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

async fn create_team_note(app: &TestApp, user: &TestUser, team_id: &str, body: &str) -> Value {
    let response = app
        .post_authenticated(&format!("/api/v1/teams/{}/notes", team_id), &user.token)
        .json(&json!({ "body": body }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CREATED);

    response.json().await.unwrap()
}

#[tokio::test]
async fn test_create_team_makes_creator_admin() {
    let app = TestApp::spawn().await;
    let admin = app.signed_in_user("admin@example.com").await;

    let response = app
        .post_authenticated("/api/v1/teams", &admin.token)
        .json(&json!({ "team_name": "Writers", "is_private": true }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let team: Value = response.json().await.unwrap();
    assert_eq!(team["team_name"], "Writers");
    assert_eq!(team["created_by"], admin.id.as_str());
    assert_eq!(team["is_private"], true);

    let members: Value = app
        .get_authenticated(
            &format!("/api/v1/teams/{}/members", team["id"].as_str().unwrap()),
            &admin.token,
        )
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();

    let members = members.as_array().unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["user_id"], admin.id.as_str());
    assert_eq!(members[0]["role"], "admin");
}

#[tokio::test]
async fn test_create_team_validates_name() {
    let app = TestApp::spawn().await;
    let admin = app.signed_in_user("admin@example.com").await;

    for name in ["   ".to_string(), "x".repeat(101)] {
        let response = app
            .post_authenticated("/api/v1/teams", &admin.token)
            .json(&json!({ "team_name": name }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}

#[tokio::test]
async fn test_team_visibility_follows_membership() {
    let app = TestApp::spawn().await;
    let admin = app.signed_in_user("admin@example.com").await;
    let outsider = app.signed_in_user("outsider@example.com").await;
    let team_id = app.create_team(&admin, "Writers").await;

    let response = app
        .get_authenticated(&format!("/api/v1/teams/{}", team_id), &outsider.token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let listed: Value = app
        .get_authenticated("/api/v1/teams", &outsider.token)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();
    assert!(listed.as_array().unwrap().is_empty());

    let listed: Value = app
        .get_authenticated("/api/v1/teams", &admin.token)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let missing = app
        .get_authenticated(
            &format!("/api/v1/teams/{}", uuid::Uuid::new_v4()),
            &admin.token,
        )
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let invalid = app
        .get_authenticated("/api/v1/teams/not-a-uuid", &admin.token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_only_admins_manage_members() {
    let app = TestApp::spawn().await;
    let admin = app.signed_in_user("admin@example.com").await;
    let member = app.signed_in_user("member@example.com").await;
    let newcomer = app.signed_in_user("newcomer@example.com").await;
    let team_id = app.create_team(&admin, "Writers").await;

    let response = app.add_member(&admin, &team_id, &member, "member").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let membership: Value = response.json().await.unwrap();
    assert_eq!(membership["role"], "member");

    let response = app.add_member(&member, &team_id, &newcomer, "member").await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .delete_authenticated(
            &format!("/api/v1/teams/{}/members/{}", team_id, admin.id),
            &member.token,
        )
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_add_member_rejections() {
    let app = TestApp::spawn().await;
    let admin = app.signed_in_user("admin@example.com").await;
    let member = app.signed_in_user("member@example.com").await;
    let team_id = app.create_team(&admin, "Writers").await;

    app.add_member(&admin, &team_id, &member, "member").await;
    let duplicate = app.add_member(&admin, &team_id, &member, "admin").await;
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    let bad_role = app.add_member(&admin, &team_id, &member, "owner").await;
    assert_eq!(bad_role.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let unknown_user = app
        .post_authenticated(&format!("/api/v1/teams/{}/members", team_id), &admin.token)
        .json(&json!({ "user_id": uuid::Uuid::new_v4() }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(unknown_user.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_last_admin_cannot_be_removed() {
    let app = TestApp::spawn().await;
    let admin = app.signed_in_user("admin@example.com").await;
    let second = app.signed_in_user("second@example.com").await;
    let team_id = app.create_team(&admin, "Writers").await;
    let admin_path = format!("/api/v1/teams/{}/members/{}", team_id, admin.id);

    let response = app
        .delete_authenticated(&admin_path, &admin.token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    app.add_member(&admin, &team_id, &second, "admin").await;

    let response = app
        .delete_authenticated(&admin_path, &second.token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .get_authenticated(&format!("/api/v1/teams/{}", team_id), &admin.token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_remove_unknown_member() {
    let app = TestApp::spawn().await;
    let admin = app.signed_in_user("admin@example.com").await;
    let team_id = app.create_team(&admin, "Writers").await;

    let response = app
        .delete_authenticated(
            &format!("/api/v1/teams/{}/members/{}", team_id, uuid::Uuid::new_v4()),
            &admin.token,
        )
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_team_notes_are_shared_with_members() {
    let app = TestApp::spawn().await;
    let admin = app.signed_in_user("admin@example.com").await;
    let member = app.signed_in_user("member@example.com").await;
    let outsider = app.signed_in_user("outsider@example.com").await;
    let team_id = app.create_team(&admin, "Writers").await;
    app.add_member(&admin, &team_id, &member, "member").await;

    let note = create_team_note(&app, &admin, &team_id, "agenda").await;
    assert_eq!(note["team_id"], team_id.as_str());
    assert_eq!(note["user_id"], admin.id.as_str());
    let note_path = format!(
        "/api/v1/teams/{}/notes/{}",
        team_id,
        note["id"].as_str().unwrap()
    );

    let response = app
        .put_authenticated(&note_path, &member.token)
        .json(&json!({ "body": "agenda v2" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let fetched: Value = app
        .get_authenticated(&note_path, &admin.token)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["body"], "agenda v2");

    let response = app
        .get_authenticated(&note_path, &outsider.token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .get_authenticated(&format!("/api/v1/teams/{}/notes", team_id), &outsider.token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let listed: Value = app
        .get_authenticated(&format!("/api/v1/teams/{}/notes", team_id), &member.token)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 1);

    // Team notes never show up as personal notes.
    let personal: Value = app
        .get_authenticated("/api/v1/notes", &admin.token)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();
    assert!(personal.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_team_note_cannot_be_reached_through_another_team() {
    let app = TestApp::spawn().await;
    let alice = app.signed_in_user("alice@example.com").await;
    let bob = app.signed_in_user("bob@example.com").await;
    let team_a = app.create_team(&alice, "A").await;
    let team_b = app.create_team(&bob, "B").await;

    let note = create_team_note(&app, &alice, &team_a, "secret").await;

    let response = app
        .get_authenticated(
            &format!("/api/v1/teams/{}/notes/{}", team_b, note["id"].as_str().unwrap()),
            &bob.token,
        )
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_team_note_deletion_rights() {
    let app = TestApp::spawn().await;
    let admin = app.signed_in_user("admin@example.com").await;
    let author = app.signed_in_user("author@example.com").await;
    let bystander = app.signed_in_user("bystander@example.com").await;
    let team_id = app.create_team(&admin, "Writers").await;
    app.add_member(&admin, &team_id, &author, "member").await;
    app.add_member(&admin, &team_id, &bystander, "member").await;

    let first = create_team_note(&app, &author, &team_id, "first").await;
    let second = create_team_note(&app, &author, &team_id, "second").await;
    let path_of = |note: &Value| {
        format!(
            "/api/v1/teams/{}/notes/{}",
            team_id,
            note["id"].as_str().unwrap()
        )
    };

    let response = app
        .delete_authenticated(&path_of(&first), &bystander.token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .delete_authenticated(&path_of(&first), &author.token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .delete_authenticated(&path_of(&second), &admin.token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .get_authenticated(&path_of(&second), &author.token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_team() {
    let app = TestApp::spawn().await;
    let admin = app.signed_in_user("admin@example.com").await;
    let member = app.signed_in_user("member@example.com").await;
    let team_id = app.create_team(&admin, "Writers").await;
    app.add_member(&admin, &team_id, &member, "member").await;
    create_team_note(&app, &member, &team_id, "doomed").await;
    let team_path = format!("/api/v1/teams/{}", team_id);

    let response = app
        .delete_authenticated(&team_path, &member.token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .delete_authenticated(&team_path, &admin.token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(app.store.note_count(), 0);

    let response = app
        .get_authenticated(&team_path, &admin.token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
