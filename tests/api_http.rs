// tests/api_http.rs
//
// HTTP-level tests for the public API Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot.
//
// Covered:
// - GET /health
// - POST /enrich (enriched + degraded)
// - POST /batch
// - GET /metrics

use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value as Json};
use tower::ServiceExt as _; // for `oneshot`

use fixture_insights::api::{self, AppState};
use fixture_insights::batch::BatchOptions;
use fixture_insights::metrics::Metrics;
use fixture_insights::HomeAdvantageTable;

const BODY_LIMIT: usize = 1024 * 1024;

fn test_router() -> Router {
    let state = AppState::new(HomeAdvantageTable::default_seed(), BatchOptions::default());
    api::router(state)
}

async fn post_json(app: Router, uri: &str, payload: Json) -> (StatusCode, Json) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("build POST");
    let resp = app.oneshot(req).await.expect("oneshot");
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    let v = serde_json::from_slice(&bytes).unwrap_or(Json::Null);
    (status, v)
}

fn fixture_json(id: u64, league: u64, home: Option<u64>, away: u64) -> Json {
    json!({
        "fixture": { "id": id, "date": "2026-10-19T19:45:00+00:00", "status": { "short": "NS" } },
        "league": { "id": league, "name": "Premier League", "country": "England" },
        "teams": {
            "home": { "id": home, "name": "Home FC" },
            "away": { "id": away, "name": "Away FC" }
        },
        "goals": { "home": null, "away": null }
    })
}

#[tokio::test]
async fn health_returns_ok() {
    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .expect("build GET /health");
    let resp = test_router().oneshot(req).await.expect("oneshot /health");
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT).await.unwrap();
    assert_eq!(String::from_utf8(bytes.to_vec()).unwrap(), "OK");
}

#[tokio::test]
async fn enrich_returns_full_record() {
    let payload = json!({
        "fixture": fixture_json(1, 39, Some(40), 50),
        "homeMatches": [
            { "homeTeamId": 40, "awayTeamId": 1, "homeGoals": 3, "awayGoals": 0,
              "statistics": { "corners": 8, "yellowCards": 1 } },
            { "homeTeamId": 2, "awayTeamId": 40, "homeGoals": 1, "awayGoals": 2 }
        ],
        "awayMatches": [
            { "homeTeamId": 50, "awayTeamId": 3, "homeGoals": 0, "awayGoals": 2 }
        ],
        "h2hMatches": [
            { "homeTeamId": 50, "awayTeamId": 40, "homeGoals": 0, "awayGoals": 1 }
        ]
    });

    let (status, v) = post_json(test_router(), "/enrich", payload).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(v["fixture"]["id"], json!(1));
    assert_eq!(v["analysis"]["recommendation"], json!("HOME WIN"));
    assert_eq!(v["stats"]["home"]["formMatches"], json!(2));
    assert_eq!(v["stats"]["home"]["winRate"], json!(100));
    assert_eq!(v["h2h"]["homeWins"], json!(1));
    assert_eq!(v["form"]["home"], json!(["W", "W", "-", "-", "-"]));
    assert_eq!(v["form"]["away"], json!(["L", "-", "-", "-", "-"]));
    let p = &v["analysis"]["probabilities"];
    assert!(p["home"].is_i64() && p["draw"].is_i64() && p["away"].is_i64());
}

#[tokio::test]
async fn enrich_with_missing_team_degrades() {
    let payload = json!({ "fixture": fixture_json(2, 39, None, 50) });
    let (status, v) = post_json(test_router(), "/enrich", payload).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["analysis"]["recommendation"], json!("DATA UNAVAILABLE"));
    assert_eq!(v["analysis"]["confidence"], json!(0));
    assert_eq!(v["teams"]["away"]["id"], json!(50));
    assert!(v.get("stats").is_none());
}

#[tokio::test]
async fn enrich_survives_extreme_numbers() {
    let max = u32::MAX;
    let payload = json!({
        "fixture": fixture_json(3, 39, Some(40), 50),
        "homeMatches": [
            { "homeTeamId": 40, "awayTeamId": 1, "homeGoals": max, "awayGoals": 0,
              "statistics": { "corners": max, "yellowCards": max, "redCards": max } },
            { "homeTeamId": 2, "awayTeamId": 40, "homeGoals": 0, "awayGoals": max,
              "statistics": { "corners": max, "yellowCards": max, "redCards": 1 } }
        ],
        "awayMatches": [
            { "homeTeamId": 50, "awayTeamId": 3, "homeGoals": 0, "awayGoals": max }
        ],
        "h2hMatches": []
    });

    let (status, v) = post_json(test_router(), "/enrich", payload).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["fixture"]["id"], json!(3));
    assert_eq!(v["stats"]["home"]["formMatches"], json!(2));
    assert_eq!(v["stats"]["home"]["winRate"], json!(100));
    assert_eq!(v["analysis"]["recommendation"], json!("HOME WIN"));
    let p = &v["analysis"]["probabilities"];
    let sum = p["home"].as_i64().unwrap() + p["draw"].as_i64().unwrap() + p["away"].as_i64().unwrap();
    assert_eq!(sum, 100);
}

#[tokio::test]
async fn batch_keeps_order_and_uses_snapshot() {
    let payload = json!({
        "fixtures": [
            fixture_json(10, 39, Some(40), 50),
            fixture_json(11, 140, Some(60), 70),
            fixture_json(12, 39, None, 80)
        ],
        "source": {
            "forms": {
                "40": [ { "homeTeamId": 40, "awayTeamId": 9, "homeGoals": 4, "awayGoals": 1 } ]
            },
            "h2h": [ { "homeId": 50, "awayId": 40, "matches": [
                { "homeTeamId": 40, "awayTeamId": 50, "homeGoals": 2, "awayGoals": 2 }
            ] } ]
        }
    });

    let (status, v) = post_json(test_router(), "/batch", payload).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["count"], json!(3));

    let arr = v["fixtures"].as_array().expect("fixtures array");
    let ids: Vec<u64> = arr.iter().map(|f| f["fixture"]["id"].as_u64().unwrap()).collect();
    assert_eq!(ids, vec![10, 11, 12]);

    assert_eq!(arr[0]["stats"]["home"]["goalsScored"], json!(4.0));
    assert_eq!(arr[0]["h2h"]["draws"], json!(1));
    assert_eq!(arr[1]["stats"]["home"]["formMatches"], json!(0));
    assert_eq!(arr[2]["analysis"]["recommendation"], json!("DATA UNAVAILABLE"));
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let (status, _) = post_json(test_router(), "/enrich", json!({ "nope": true })).await;
    assert!(status.is_client_error(), "got {status}");
}

#[tokio::test]
async fn metrics_endpoint_lists_enrichment_series() {
    let metrics = Metrics::init(15).expect("install recorder");
    let state = AppState::new(HomeAdvantageTable::default_seed(), BatchOptions::default())
        .with_metrics(metrics);
    let app = api::create_router(state);

    let (status, _) = post_json(
        app.clone(),
        "/batch",
        json!({ "fixtures": [fixture_json(1, 39, Some(1), 2), fixture_json(2, 39, None, 3)] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let resp = app
        .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    for needle in [
        "enrich_fixtures_total",
        "enrich_degraded_total",
        "enrich_batches_total",
        "enrich_max_fixtures",
    ] {
        assert!(text.contains(needle), "missing {needle} in:\n{text}");
    }
}
