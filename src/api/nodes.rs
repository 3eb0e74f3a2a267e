use actix_web::{HttpResponse, Responder, post, web};

use super::models::{ApiResponse, AppState, NewNodeRequest};
use crate::network::Registration;

/// Entry point for a node joining the network: register it, announce it to
/// every known peer and send it our roster.
#[post("/register-and-broadcast-node/")]
pub async fn register_and_broadcast_node(
    state: web::Data<AppState>,
    body: web::Json<NewNodeRequest>,
) -> impl Responder {
    let status = match state.register_and_broadcast_node(&body.new_node_url).await {
        Registration::Added => "Node registered successfully",
        Registration::AlreadyPresent => "Node is already registered. No action taken",
    };
    HttpResponse::Ok().json(ApiResponse::new("RegisterAndBroadcastNode", status))
}

/// Register a single node announced by a peer.
#[post("/register-node/")]
pub async fn register_node(
    state: web::Data<AppState>,
    body: web::Json<NewNodeRequest>,
) -> impl Responder {
    let url = &body.new_node_url;
    let status = match state.register_node(url) {
        Registration::Added => format!("Node {url} was registered successfully"),
        Registration::AlreadyPresent => format!("Node {url} is already registered. No action taken"),
    };
    HttpResponse::Ok().json(ApiResponse::new("RegisterNode", status))
}

/// Register the roster sent to us when we join.
#[post("/register-nodes-bulk/")]
pub async fn register_nodes_bulk(
    state: web::Data<AppState>,
    body: web::Json<Vec<String>>,
) -> impl Responder {
    let added = state.register_nodes_bulk(&body);
    HttpResponse::Ok().json(ApiResponse::new(
        "RegisterNodesBulk",
        format!("Nodes registered successfully ({added} new)"),
    ))
}
