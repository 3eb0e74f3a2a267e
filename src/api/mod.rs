mod bid;
mod chain;
mod health;
pub mod models;
mod nodes;

use actix_web::web::{self, ServiceConfig};

use crate::network::API_PREFIX;

pub use models::AppState;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        web::scope(API_PREFIX)
            .service(health::health_check)
            .service(chain::get_blockchain)
            .service(chain::validate_chain)
            .service(chain::mine)
            .service(chain::receive_new_block)
            .service(chain::consensus)
            .service(bid::post_bid)
            .service(bid::post_bid_broadcast)
            .service(bid::get_auction_bids)
            .service(bid::get_bidder_bids)
            .service(nodes::register_and_broadcast_node)
            .service(nodes::register_node)
            .service(nodes::register_nodes_bulk),
    );
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use serde_json::{Value, json};

    use super::{AppState, init_routes};
    use crate::network::HttpPeerClient;
    use crate::node::ChainSnapshot;

    const ME: &str = "http://127.0.0.1:3001";

    fn state() -> web::Data<AppState> {
        let client = HttpPeerClient::new(Duration::from_millis(500)).unwrap();
        web::Data::new(AppState::new(ME, client))
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(App::new().app_data($state.clone()).configure(init_routes)).await
        };
    }

    #[actix_web::test]
    async fn health_is_up() {
        let state = state();
        let app = app!(state);
        let req = test::TestRequest::get().uri("/api/v1/health/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn fresh_node_serves_genesis() {
        let state = state();
        let app = app!(state);
        let req = test::TestRequest::get().uri("/api/v1/blockchain/").to_request();
        let snap: ChainSnapshot = test::call_and_read_body_json(&app, req).await;
        assert_eq!(snap.chain.len(), 1);
        assert_eq!(snap.chain[0].index, 1);
        assert_eq!(snap.chain[0].hash, "0");
        assert!(snap.pending_bids.is_empty());
        assert!(snap.network_nodes.is_empty());
    }

    #[actix_web::test]
    async fn bid_then_mine() {
        let state = state();
        let app = app!(state);

        for (name, value) in [("YD", "123.45"), ("AB", "7.10")] {
            let req = test::TestRequest::post()
                .uri("/api/v1/bid/")
                .set_json(json!({"bidder_name": name, "auction_id": 100, "bid_value": value}))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::CREATED);
        }
        assert_eq!(state.snapshot().pending_bids.len(), 2);

        let req = test::TestRequest::post().uri("/api/v1/mine/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["mined_index"], 2);
        assert_eq!(body["bids"], 2);
        assert!(body["hash"].as_str().unwrap().starts_with("0000"));
        assert!(state.snapshot().pending_bids.is_empty());

        let req = test::TestRequest::get().uri("/api/v1/validate/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["valid"], true);
        assert_eq!(body["length"], 2);

        let req = test::TestRequest::get().uri("/api/v1/auction/100/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["count"], 2);
        assert_eq!(body["bids"][0]["bid_value"], "123.45");

        let req = test::TestRequest::get().uri("/api/v1/bidder/AB/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["count"], 1);
    }

    #[actix_web::test]
    async fn malformed_bid_is_client_error() {
        let state = state();
        let app = app!(state);
        let req = test::TestRequest::post()
            .uri("/api/v1/bid/")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"bidder_name\": 5")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_client_error());
        assert!(state.snapshot().pending_bids.is_empty());
    }

    #[actix_web::test]
    async fn receive_block_accepts_then_rejects_duplicate() {
        let state = state();
        let app = app!(state);
        let block = json!({
            "index": 2,
            "timestamp": 1,
            "bids": [],
            "nonce": 12,
            "hash": "0000abc",
            "previous_block_hash": "0"
        });

        let req = test::TestRequest::post()
            .uri("/api/v1/receive-new-block/")
            .set_json(&block)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::post()
            .uri("/api/v1/receive-new-block/")
            .set_json(&block)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);
        assert_eq!(state.snapshot().chain.len(), 2);
        assert_eq!(state.validate(), (true, 2));
    }

    #[actix_web::test]
    async fn node_registration_routes() {
        let state = state();
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/v1/register-node/")
            .set_json(json!({"new_node_url": "http://127.0.0.1:3002"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::post()
            .uri("/api/v1/register-nodes-bulk/")
            .set_json(json!(["http://127.0.0.1:3002", "http://127.0.0.1:3003", ME]))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        assert_eq!(
            state.snapshot().network_nodes,
            vec!["http://127.0.0.1:3002", "http://127.0.0.1:3003"]
        );
    }

    #[actix_web::test]
    async fn consensus_without_peers_keeps_chain() {
        let state = state();
        let app = app!(state);
        let req = test::TestRequest::post().uri("/api/v1/consensus/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["replaced"], false);
        assert_eq!(body["length"], 1);
    }
}
