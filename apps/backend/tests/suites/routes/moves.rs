use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{json, Value};

use crate::common::assert_problem;
use crate::support::create_test_app;
use crate::support::test_state::build_fixed_state;

/// 3x3 board with its only mine at (0,0).
fn new_game_body() -> Value {
    json!({ "rows": 3, "columns": 3 })
}

#[actix_web::test]
async fn reveal_flood_and_view_consistency() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_fixed_state(&[0]).await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/api/games")
        .set_json(new_game_body())
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_str().expect("id").to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{id}/moves"))
        .set_json(json!({ "x": 1, "y": 1 }))
        .to_request();
    let moved: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(moved["game"]["status"], "ACTIVE");
    let updated = moved["updatedCells"].as_array().expect("updatedCells");
    assert_eq!(updated.len(), 1);
    assert_eq!(updated[0]["status"], "REVEALED");
    assert_eq!(updated[0]["neighboringMineCount"], 1);
    assert!(updated[0].get("isMine").is_none());

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{id}/moves"))
        .set_json(json!({ "x": 2, "y": 2, "action": "REVEAL" }))
        .to_request();
    let moved: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(moved["game"]["status"], "CLEARED");
    // (1,1) was already revealed
    assert_eq!(moved["updatedCells"].as_array().map(Vec::len), Some(7));

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{id}"))
        .to_request();
    let view: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(view["status"], "CLEARED");
    let cells = view["cells"].as_array().expect("cells");
    let mine = &cells[0];
    assert_eq!((mine["x"].as_u64(), mine["y"].as_u64()), (Some(0), Some(0)));
    assert_eq!(mine["status"], "HIDDEN");
    assert!(mine.get("isMine").is_none(), "undetonated mines stay secret");
    assert_eq!(
        cells.iter().filter(|c| c["status"] == "REVEALED").count(),
        8
    );
    Ok(())
}

#[actix_web::test]
async fn detonation_then_conflict() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_fixed_state(&[0]).await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/api/games")
        .set_json(new_game_body())
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_str().expect("id").to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{id}/moves"))
        .set_json(json!({ "x": 0, "y": 0, "action": "REVEAL" }))
        .to_request();
    let moved: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(moved["game"]["status"], "DETONATED");
    assert_eq!(moved["updatedCells"][0]["status"], "DETONATED");
    assert_eq!(moved["updatedCells"][0]["isMine"], true);
    assert!(moved["updatedCells"][0].get("neighboringMineCount").is_none());

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{id}/moves"))
        .set_json(json!({ "x": 2, "y": 2, "action": "FLAG" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::CONFLICT, "GAME_NOT_ACTIVE").await;
    Ok(())
}

#[actix_web::test]
async fn flag_rules_over_http() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_fixed_state(&[0]).await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/api/games")
        .set_json(new_game_body())
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_str().expect("id").to_string();
    let uri = format!("/api/games/{id}/moves");

    let req = test::TestRequest::post()
        .uri(&uri)
        .set_json(json!({ "x": 2, "y": 1, "action": "FLAG" }))
        .to_request();
    let moved: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(moved["updatedCells"][0]["status"], "FLAGGED");

    let req = test::TestRequest::post()
        .uri(&uri)
        .set_json(json!({ "x": 2, "y": 1, "action": "FLAG" }))
        .to_request();
    let moved: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(moved["updatedCells"], json!([]));

    let req = test::TestRequest::post()
        .uri(&uri)
        .set_json(json!({ "x": 2, "y": 1, "action": "REVEAL" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(
        resp,
        StatusCode::UNPROCESSABLE_ENTITY,
        "INVALID_CELL_TRANSITION",
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn move_input_errors() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_fixed_state(&[0]).await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/api/games")
        .set_json(new_game_body())
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_str().expect("id").to_string();
    let uri = format!("/api/games/{id}/moves");

    let req = test::TestRequest::post()
        .uri(&uri)
        .set_json(json!({ "x": 3, "y": 0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::BAD_REQUEST, "INVALID_COORDINATES").await;

    let req = test::TestRequest::post()
        .uri(&uri)
        .set_json(json!({ "x": 0, "y": 0, "action": "DIG" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::BAD_REQUEST, "BAD_REQUEST").await;

    let req = test::TestRequest::post()
        .uri("/api/games/3fa85f64-5717-4562-b3fc-2c963f66afa6/moves")
        .set_json(json!({ "x": 0, "y": 0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::NOT_FOUND, "GAME_NOT_FOUND").await;
    Ok(())
}
