mod common;

use common::{TestApp, result_ids};
use http::{StatusCode, header};
use serde_json::json;

#[tokio::test]
async fn favorite_lifecycle() {
    let t = TestApp::new().await;
    let (_, token) = t.register("anna").await;
    let tag = t.tag("Lunch", "lunch").await;
    let salt = t.ingredient("salt", "g").await;
    let id = t.recipe(&token, "Soup", &[tag], &[(salt, 1)]).await;
    let uri = format!("/api/recipes/{id}/favorite");

    let added = t.post(&uri, Some(&token), json!({})).await;
    assert_eq!(added.status, StatusCode::CREATED);
    let body = added.json();
    assert_eq!(body["id"], id);
    assert_eq!(body["name"], "Soup");
    assert_eq!(body["cooking_time"], 15);
    assert!(body["image"].as_str().unwrap().starts_with("http://testserver/media/"));

    let again = t.post(&uri, Some(&token), json!({})).await;
    assert_eq!(again.status, StatusCode::BAD_REQUEST);
    assert_eq!(again.json()["code"], 4001);

    let recipe = t.get(&format!("/api/recipes/{id}"), Some(&token)).await.json();
    assert_eq!(recipe["is_favorited"], true);

    assert_eq!(t.delete(&uri, Some(&token)).await.status, StatusCode::NO_CONTENT);
    let gone = t.delete(&uri, Some(&token)).await;
    assert_eq!(gone.status, StatusCode::BAD_REQUEST);
    assert_eq!(gone.json()["code"], 4002);
}

#[tokio::test]
async fn cart_lifecycle() {
    let t = TestApp::new().await;
    let (_, token) = t.register("anna").await;
    let tag = t.tag("Lunch", "lunch").await;
    let salt = t.ingredient("salt", "g").await;
    let id = t.recipe(&token, "Soup", &[tag], &[(salt, 1)]).await;
    let uri = format!("/api/recipes/{id}/shopping_cart");

    assert_eq!(t.post(&uri, Some(&token), json!({})).await.status, StatusCode::CREATED);
    let again = t.post(&uri, Some(&token), json!({})).await;
    assert_eq!(again.status, StatusCode::BAD_REQUEST);
    assert_eq!(again.json()["code"], 4003);

    let recipe = t.get(&format!("/api/recipes/{id}"), Some(&token)).await.json();
    assert_eq!(recipe["is_in_shopping_cart"], true);

    assert_eq!(t.delete(&uri, Some(&token)).await.status, StatusCode::NO_CONTENT);
    let gone = t.delete(&uri, Some(&token)).await;
    assert_eq!(gone.status, StatusCode::BAD_REQUEST);
    assert_eq!(gone.json()["code"], 4004);
}

#[tokio::test]
async fn relations_on_missing_recipe() {
    let t = TestApp::new().await;
    let (_, token) = t.register("anna").await;

    let fav = t.post("/api/recipes/404/favorite", Some(&token), json!({})).await;
    assert_eq!(fav.status, StatusCode::NOT_FOUND);
    let cart = t
        .post("/api/recipes/404/shopping_cart", Some(&token), json!({}))
        .await;
    assert_eq!(cart.status, StatusCode::NOT_FOUND);

    let anonymous = t.post("/api/recipes/404/favorite", None, json!({})).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn deleting_recipe_drops_relations() {
    let t = TestApp::new().await;
    let (_, anna) = t.register("anna").await;
    let (_, bob) = t.register("bob").await;
    let tag = t.tag("Lunch", "lunch").await;
    let salt = t.ingredient("salt", "g").await;
    let id = t.recipe(&anna, "Soup", &[tag], &[(salt, 1)]).await;

    t.post(&format!("/api/recipes/{id}/favorite"), Some(&bob), json!({}))
        .await;
    t.post(&format!("/api/recipes/{id}/shopping_cart"), Some(&bob), json!({}))
        .await;
    assert_eq!(
        t.delete(&format!("/api/recipes/{id}"), Some(&anna)).await.status,
        StatusCode::NO_CONTENT
    );

    let page = t.get("/api/recipes?is_favorited=1", Some(&bob)).await.json();
    assert_eq!(page["count"], 0);
    let list = t
        .get("/api/recipes/download_shopping_cart", Some(&bob))
        .await
        .text();
    assert_eq!(list, "Shopping list:\n");
}

#[tokio::test]
async fn subscribe_lifecycle() {
    let t = TestApp::new().await;
    let (anna_id, anna) = t.register("anna").await;
    let (bob_id, bob) = t.register("bob").await;
    let tag = t.tag("Lunch", "lunch").await;
    let salt = t.ingredient("salt", "g").await;
    for name in ["One", "Two", "Three"] {
        t.recipe(&anna, name, &[tag], &[(salt, 1)]).await;
    }
    let uri = format!("/api/users/{anna_id}/subscribe");

    let own = t
        .post(&format!("/api/users/{bob_id}/subscribe"), Some(&bob), json!({}))
        .await;
    assert_eq!(own.status, StatusCode::BAD_REQUEST);
    assert_eq!(own.json()["code"], 4007);

    let added = t
        .post(&format!("{uri}?recipes_limit=2"), Some(&bob), json!({}))
        .await;
    assert_eq!(added.status, StatusCode::CREATED, "{}", added.text());
    let card = added.json();
    assert_eq!(card["id"], anna_id);
    assert_eq!(card["username"], "anna");
    assert_eq!(card["is_subscribed"], true);
    assert_eq!(card["recipes_count"], 3);
    assert_eq!(card["recipes"].as_array().unwrap().len(), 2);
    assert_eq!(card["recipes"][0]["name"], "Three");

    let again = t.post(&uri, Some(&bob), json!({})).await;
    assert_eq!(again.status, StatusCode::BAD_REQUEST);
    assert_eq!(again.json()["code"], 4005);

    let profile = t.get(&format!("/api/users/{anna_id}"), Some(&bob)).await.json();
    assert_eq!(profile["is_subscribed"], true);
    let anonymous = t.get(&format!("/api/users/{anna_id}"), None).await.json();
    assert_eq!(anonymous["is_subscribed"], false);

    assert_eq!(t.delete(&uri, Some(&bob)).await.status, StatusCode::NO_CONTENT);
    let gone = t.delete(&uri, Some(&bob)).await;
    assert_eq!(gone.status, StatusCode::BAD_REQUEST);
    assert_eq!(gone.json()["code"], 4006);

    let missing = t.post("/api/users/999/subscribe", Some(&bob), json!({})).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn subscriptions_list() {
    let t = TestApp::new().await;
    let (anna_id, anna) = t.register("anna").await;
    let (carl_id, _) = t.register("carl").await;
    let (_, bob) = t.register("bob").await;
    let tag = t.tag("Lunch", "lunch").await;
    let salt = t.ingredient("salt", "g").await;
    t.recipe(&anna, "One", &[tag], &[(salt, 1)]).await;
    t.recipe(&anna, "Two", &[tag], &[(salt, 1)]).await;

    for id in [anna_id, carl_id] {
        let response = t
            .post(&format!("/api/users/{id}/subscribe"), Some(&bob), json!({}))
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
    }

    let page = t
        .get("/api/users/subscriptions?recipes_limit=1", Some(&bob))
        .await
        .json();
    assert_eq!(page["count"], 2);
    let ids = result_ids(&page);
    assert!(ids.contains(&anna_id) && ids.contains(&carl_id));
    for card in page["results"].as_array().unwrap() {
        assert!(card["recipes"].as_array().unwrap().len() <= 1);
        assert_eq!(card["is_subscribed"], true);
    }

    let bad = t
        .get("/api/users/subscriptions?recipes_limit=-1", Some(&bob))
        .await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);

    let card = t
        .get(&format!("/api/users/{anna_id}/subscribe"), Some(&bob))
        .await
        .json();
    assert_eq!(card["recipes_count"], 2);
    assert_eq!(card["recipes"].as_array().unwrap().len(), 2);

    assert_eq!(
        t.get("/api/users/subscriptions", None).await.status,
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
async fn shopping_list_sums_ingredients() {
    let t = TestApp::new().await;
    let (_, token) = t.register("anna").await;
    let tag = t.tag("Baking", "baking").await;
    let flour = t.ingredient("flour", "g").await;
    let milk = t.ingredient("milk", "ml").await;
    let bread = t.recipe(&token, "Bread", &[tag], &[(flour, 200)]).await;
    let cake = t
        .recipe(&token, "Cake", &[tag], &[(flour, 300), (milk, 250)])
        .await;

    let empty = t.get("/api/recipes/download_shopping_cart", Some(&token)).await;
    assert_eq!(empty.status, StatusCode::OK);
    assert_eq!(empty.text(), "Shopping list:\n");

    for id in [bread, cake] {
        t.post(&format!("/api/recipes/{id}/shopping_cart"), Some(&token), json!({}))
            .await;
    }

    let response = t.get("/api/recipes/download_shopping_cart", Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(
        response.headers[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .contains("shopping_list.txt")
    );
    assert!(
        response.headers[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/plain")
    );
    assert_eq!(
        response.text(),
        "Shopping list:\nflour (g) - 500\nmilk (ml) - 250\n"
    );

    assert_eq!(
        t.get("/api/recipes/download_shopping_cart", None).await.status,
        StatusCode::UNAUTHORIZED
    );
}
