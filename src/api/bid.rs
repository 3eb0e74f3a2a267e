use actix_web::{HttpResponse, Responder, get, post, web};
use log::debug;

use super::models::{ApiResponse, AppState, BidsResponse};
use crate::bid::Bid;

/// Register a bid locally without telling anyone else.
#[post("/bid/")]
pub async fn post_bid(state: web::Data<AppState>, body: web::Json<Bid>) -> impl Responder {
    state.submit_bid(body.into_inner());
    HttpResponse::Created().json(ApiResponse::new("RegisterBid", "Bid created"))
}

/// Register a bid and forward it to every known peer.
#[post("/bid/broadcast/")]
pub async fn post_bid_broadcast(
    state: web::Data<AppState>,
    body: web::Json<Bid>,
) -> impl Responder {
    let delivered = state.submit_and_broadcast_bid(body.into_inner()).await;
    debug!("POST /bid/broadcast/ - delivered to {delivered} peers");
    HttpResponse::Created().json(ApiResponse::new(
        "RegisterAndBroadcastBid",
        "Bid created and broadcast successfully",
    ))
}

/// Every mined bid for an auction.
#[get("/auction/{auction_id}/")]
pub async fn get_auction_bids(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> impl Responder {
    let bids = state.bids_for_auction(path.into_inner());
    HttpResponse::Ok().json(BidsResponse {
        count: bids.len(),
        bids,
    })
}

/// Every mined bid placed by a bidder.
#[get("/bidder/{bidder_name}/")]
pub async fn get_bidder_bids(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let bids = state.bids_for_bidder(&path);
    HttpResponse::Ok().json(BidsResponse {
        count: bids.len(),
        bids,
    })
}
