mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};
use service::authz::Role;

use common::TestApp;

fn george() -> Value {
    json!({
        "firstName": "George",
        "lastName": "Franklin",
        "address": "110 W. Liberty St.",
        "city": "Madison",
        "telephone": "6085551023"
    })
}

async fn seed(app: &TestApp) -> anyhow::Result<(String, i64, Value)> {
    let vet_admin = app.token(&[Role::VetAdmin]);
    let owner_admin = app.token(&[Role::OwnerAdmin]);
    let cat = app.post("/api/pettypes", &vet_admin, json!({"name": "cat"})).await?.body;
    let owner = app.post("/api/owners", &owner_admin, george()).await?;
    assert_eq!(owner.status, StatusCode::CREATED);
    Ok((owner_admin, owner.body["id"].as_i64().unwrap(), cat))
}

#[tokio::test]
async fn owner_lookup_returns_pets_with_types_and_visits() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (token, owner_id, cat) = seed(&app).await?;

    let pet = app
        .post(
            &format!("/api/owners/{owner_id}/pets"),
            &token,
            json!({"name": "Leo", "birthDate": "2010-09-07", "type": cat}),
        )
        .await?;
    assert_eq!(pet.status, StatusCode::CREATED);
    assert_eq!(pet.body["ownerId"], owner_id);
    let pet_id = pet.body["id"].as_i64().unwrap();
    assert_eq!(pet.location(), Some(format!("/api/pets/{pet_id}").as_str()));

    let visit = app
        .post(&format!("/api/pets/{pet_id}/visits"), &token, json!({"date": "2013-01-01", "description": "rabies shot"}))
        .await?;
    assert_eq!(visit.status, StatusCode::CREATED);
    assert_eq!(visit.body["petId"], pet_id);

    let owner = app.get(&format!("/api/owners/{owner_id}"), &token).await?;
    assert_eq!(owner.status, StatusCode::OK);
    let pets = owner.body["pets"].as_array().unwrap();
    assert_eq!(pets.len(), 1);
    assert_eq!(pets[0]["type"]["name"], "cat");
    assert_eq!(pets[0]["birthDate"], "2010-09-07");
    assert_eq!(pets[0]["visits"][0]["description"], "rabies shot");
    assert_eq!(pets[0]["visits"][0]["date"], "2013-01-01");
    Ok(())
}

#[tokio::test]
async fn invalid_owner_reports_every_field() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let token = app.token(&[Role::OwnerAdmin]);
    let reply = app.post("/api/owners", &token, json!({"firstName": "George", "telephone": "608-555-1023"})).await?;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    let errors = reply.errors();
    for field in ["lastName", "address", "city"] {
        assert_eq!(errors[field], "must not be blank", "{field}");
    }
    assert_eq!(errors["telephone"], "numeric value out of bounds (<10 digits>.<0 digits> expected)");
    assert!(errors.get("firstName").is_none());
    assert_eq!(reply.body["firstName"], "George");
    assert_eq!(app.get("/api/owners", &token).await?.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn padded_telephone_is_rejected() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let token = app.token(&[Role::OwnerAdmin]);
    let mut owner = george();
    owner["telephone"] = json!(" 123 ");
    let reply = app.post("/api/owners", &token, owner).await?;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.errors()["telephone"], "numeric value out of bounds (<10 digits>.<0 digits> expected)");
    assert_eq!(app.get("/api/owners", &token).await?.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn search_by_last_name_prefix() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let token = app.token(&[Role::OwnerAdmin]);
    for last in ["Davis", "Davidson", "Franklin"] {
        let mut owner = george();
        owner["lastName"] = json!(last);
        app.post("/api/owners", &token, owner).await?;
    }

    let reply = app.get("/api/owners?lastName=Dav", &token).await?;
    assert_eq!(reply.status, StatusCode::OK);
    let names: Vec<_> = reply.body.as_array().unwrap().iter().map(|o| o["lastName"].clone()).collect();
    assert_eq!(names, vec![json!("Davis"), json!("Davidson")]);

    assert_eq!(app.get("/api/owners?lastName=Zz", &token).await?.status, StatusCode::NOT_FOUND);
    assert_eq!(app.get("/api/owners", &token).await?.body.as_array().unwrap().len(), 3);
    Ok(())
}

#[tokio::test]
async fn update_owner_keeps_identity_and_pets() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (token, owner_id, cat) = seed(&app).await?;
    app.post(&format!("/api/owners/{owner_id}/pets"), &token, json!({"name": "Leo", "type": cat})).await?;

    let mut changed = george();
    changed["city"] = json!("Monona");
    let reply = app.put(&format!("/api/owners/{owner_id}"), &token, changed.clone()).await?;
    assert_eq!(reply.status, StatusCode::NO_CONTENT);

    let owner = app.get(&format!("/api/owners/{owner_id}"), &token).await?.body;
    assert_eq!(owner["city"], "Monona");
    assert_eq!(owner["id"], owner_id);
    assert_eq!(owner["pets"].as_array().unwrap().len(), 1);

    assert_eq!(app.put("/api/owners/404", &token, changed).await?.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn add_pet_requires_owner_and_known_type() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (token, owner_id, cat) = seed(&app).await?;

    let reply = app.post("/api/owners/999/pets", &token, json!({"name": "Leo", "type": cat})).await?;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);

    let reply = app
        .post(&format!("/api/owners/{owner_id}/pets"), &token, json!({"name": "Leo", "type": {"id": 999, "name": "dragon"}}))
        .await?;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);

    let reply = app.post(&format!("/api/owners/{owner_id}/pets"), &token, json!({"name": "Leo"})).await?;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.errors()["type"], "must not be null");

    assert_eq!(app.get("/api/pets", &token).await?.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn pet_and_visit_updates() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (token, owner_id, cat) = seed(&app).await?;
    let dog = app.post("/api/pettypes", &app.token(&[Role::VetAdmin]), json!({"name": "dog"})).await?.body;
    let pet = app.post(&format!("/api/owners/{owner_id}/pets"), &token, json!({"name": "Leo", "type": cat})).await?.body;
    let pet_id = pet["id"].as_i64().unwrap();

    let reply = app.put(&format!("/api/pets/{pet_id}"), &token, json!({"name": "Rosy", "type": dog})).await?;
    assert_eq!(reply.status, StatusCode::NO_CONTENT);
    let pet = app.get(&format!("/api/pets/{pet_id}"), &token).await?.body;
    assert_eq!(pet["name"], "Rosy");
    assert_eq!(pet["type"]["name"], "dog");
    assert_eq!(pet["ownerId"], owner_id);

    let visit = app
        .post(&format!("/api/pets/{pet_id}/visits"), &token, json!({"date": "2013-01-01", "description": "rabies shot"}))
        .await?
        .body;
    let visit_id = visit["id"].as_i64().unwrap();
    let reply = app.put(&format!("/api/visits/{visit_id}"), &token, json!({"description": "rabies booster"})).await?;
    assert_eq!(reply.status, StatusCode::NO_CONTENT);
    let visit = app.get(&format!("/api/visits/{visit_id}"), &token).await?.body;
    assert_eq!(visit["description"], "rabies booster");
    assert_eq!(visit["date"], "2013-01-01");

    let reply = app.put(&format!("/api/visits/{visit_id}"), &token, json!({"description": ""})).await?;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.errors()["description"], "must not be blank");

    assert_eq!(app.delete(&format!("/api/visits/{visit_id}"), &token).await?.status, StatusCode::NO_CONTENT);
    assert_eq!(app.get("/api/visits", &token).await?.status, StatusCode::NOT_FOUND);
    assert_eq!(app.post("/api/pets/999/visits", &token, json!({"description": "x"})).await?.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn delete_owner_removes_pets_and_visits() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (token, owner_id, cat) = seed(&app).await?;
    let pet = app.post(&format!("/api/owners/{owner_id}/pets"), &token, json!({"name": "Leo", "type": cat})).await?.body;
    let pet_id = pet["id"].as_i64().unwrap();
    app.post(&format!("/api/pets/{pet_id}/visits"), &token, json!({"description": "checkup"})).await?;

    assert_eq!(app.delete(&format!("/api/owners/{owner_id}"), &token).await?.status, StatusCode::NO_CONTENT);
    assert_eq!(app.get(&format!("/api/owners/{owner_id}"), &token).await?.status, StatusCode::NOT_FOUND);
    assert_eq!(app.get(&format!("/api/pets/{pet_id}"), &token).await?.status, StatusCode::NOT_FOUND);
    assert_eq!(app.get("/api/visits", &token).await?.status, StatusCode::NOT_FOUND);
    assert_eq!(app.get("/api/pettypes", &token).await?.status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn vet_admin_cannot_touch_owners() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let vet_admin = app.token(&[Role::VetAdmin]);
    assert_eq!(app.post("/api/owners", &vet_admin, george()).await?.status, StatusCode::FORBIDDEN);
    assert_eq!(app.get("/api/owners", &app.token(&[Role::OwnerAdmin])).await?.status, StatusCode::NOT_FOUND);
    Ok(())
}
