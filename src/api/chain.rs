use actix_web::{HttpResponse, Responder, get, post, web};
use log::error;

use super::models::{ApiResponse, AppState, ConsensusResponse, MineResponse, ValidateResponse};
use crate::blockchain::Block;
use crate::node::{ConsensusOutcome, MineOutcome};

/// Full node state: chain, pending bids and known peers.
#[get("/blockchain/")]
pub async fn get_blockchain(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.snapshot())
}

/// Validate linkage and index sequencing of the local chain.
#[get("/validate/")]
pub async fn validate_chain(state: web::Data<AppState>) -> impl Responder {
    let (valid, length) = state.validate();
    HttpResponse::Ok().json(ValidateResponse { valid, length })
}

/// Mine the pending bids into a new block and broadcast it to every peer.
#[post("/mine/")]
pub async fn mine(state: web::Data<AppState>) -> impl Responder {
    match state.mine().await {
        Ok(MineOutcome::Mined(block)) => HttpResponse::Ok().json(MineResponse {
            mined_index: block.index,
            hash: block.hash,
            nonce: block.nonce,
            bids: block.bids.len(),
        }),
        Ok(MineOutcome::Abandoned) => HttpResponse::Conflict().json(ApiResponse::new(
            "Mine",
            "Mining abandoned: chain tip changed during the search",
        )),
        Err(e) => {
            error!("MINER - {e}");
            HttpResponse::InternalServerError().json(ApiResponse::new("Mine", e.to_string()))
        }
    }
}

/// Receive a block mined by a peer. Accepted only if it links to our tip.
#[post("/receive-new-block/")]
pub async fn receive_new_block(
    state: web::Data<AppState>,
    body: web::Json<Block>,
) -> impl Responder {
    if state.receive_block(body.into_inner()) {
        HttpResponse::Ok().json(ApiResponse::new(
            "ReceiveNewBlock",
            "New block received and accepted",
        ))
    } else {
        HttpResponse::Conflict().json(ApiResponse::new(
            "ReceiveNewBlock",
            "New block has been rejected",
        ))
    }
}

/// Replace the local chain with the longest valid chain among peers.
#[post("/consensus/")]
pub async fn consensus(state: web::Data<AppState>) -> impl Responder {
    let resp = match state.resolve().await {
        ConsensusOutcome::Replaced { source, length } => ConsensusResponse {
            replaced: true,
            length,
            source: Some(source),
        },
        ConsensusOutcome::Kept { length } => ConsensusResponse {
            replaced: false,
            length,
            source: None,
        },
    };
    HttpResponse::Ok().json(resp)
}
