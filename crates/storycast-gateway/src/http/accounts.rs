//! Account management endpoints — the in-memory credential store.
//!
//! Accounts live only in the process: there is deliberately no persistence,
//! so a restart starts from an empty list. Passwords go in through
//! `POST /api/accounts` and never come back out on any surface.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

use storycast_core::types::Account;

use crate::app::AppState;
use crate::http::error_response;

#[derive(Deserialize)]
pub struct AddAccountRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// POST /api/accounts — validate and append one account.
pub async fn add_account(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddAccountRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let account = Account::new(req.username, req.password)
        .map_err(|e| error_response(StatusCode::BAD_REQUEST, &e))?;

    let username = account.username.clone();
    state.accounts.lock().unwrap().push(account);
    info!(%username, "account added");

    Ok(Json(json!({ "ok": true, "username": username })))
}

/// GET /api/accounts — usernames only, in insertion order.
pub async fn list_accounts(State(state): State<Arc<AppState>>) -> Json<Value> {
    let usernames: Vec<String> = state
        .accounts
        .lock()
        .unwrap()
        .iter()
        .map(|a| a.username.clone())
        .collect();
    Json(json!({ "accounts": usernames }))
}
