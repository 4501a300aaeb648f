use std::ops::Add;

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use secrets::Secret;
use tokio::task;
use tokio::task::spawn_blocking;
use warp::Rejection;
use warp::Reply;
use warp::http::StatusCode;
use warp::reply::{Json, WithStatus};

use crate::POOL;
use crate::helper_model::PeladoError;
use crate::model::{AccessToken, NewAccessToken, PublishAccessToken};
use crate::schema::access_tokens::dsl::*;

async fn generate_unique_token() -> Vec<u8> {
    loop {
        // Generate a secure random 32-byte token
        let token_vec = Secret::<[u8; 32]>::random(|s| s.to_vec());

        let token_to_return = token_vec.clone();

        let token_exists_result = task::spawn_blocking(move || {
            let mut pool = POOL.clone().get().unwrap();
            diesel::select(diesel::dsl::exists(
                crate::schema::access_tokens::table
                    .filter(crate::schema::access_tokens::token.eq(token_vec)),
            ))
            .get_result::<bool>(&mut pool)
        })
        .await;

        let token_exists = match token_exists_result {
            Ok(result) => match result {
                Ok(v) => v,
                Err(e) => {
                    // Treat a DB error as if the token exists, to force a retry.
                    eprintln!("Database error: {:?}", e);
                    true
                }
            },
            Err(join_err) => {
                eprintln!("Error joining blocking task: {:?}", join_err);
                true
            }
        };

        // If the token does not exist, return it
        if !token_exists {
            return token_to_return;
        }
    }
}

pub async fn gen_token_object(_user_id: i32, client_type: Option<String>) -> NewAccessToken {
    // Browser sessions expire quickly; the installed dashboard keeps its
    // token for 28 days.
    let mut _exp: DateTime<Utc> = Utc::now().add(chrono::Duration::seconds(600));
    if let Some(client_type) = client_type {
        if client_type == "pelado-app" {
            _exp = Utc::now().add(chrono::Duration::days(28));
        }
    }
    NewAccessToken {
        user_id: _user_id,
        token: generate_unique_token().await,
        exp: _exp,
    }
}

pub async fn verify_user_token(_user_id: i32, token_data: String) -> Result<bool, PeladoError> {
    let binary_token = hex::decode(token_data).map_err(|_| PeladoError::TokenFormat)?;
    let token_clone = binary_token.clone();
    let mut pool = POOL.clone().get().map_err(|_| PeladoError::Database)?;
    let token_in_db = spawn_blocking(move || {
        access_tokens
            .filter(token.eq(token_clone))
            .filter(user_id.eq(_user_id))
            .first::<AccessToken>(&mut pool)
            .optional()
    })
    .await
    .map_err(|_| PeladoError::Database)?
    .map_err(|_| PeladoError::Database)?;

    match token_in_db {
        Some(record) => Ok(record.exp >= Utc::now()),
        None => Ok(false),
    }
}

pub async fn rm_token_by_binary(token_bit: Vec<u8>) {
    let mut pool = POOL.clone().get().unwrap();
    let removed = spawn_blocking(move || {
        diesel::delete(access_tokens.filter(token.eq(token_bit))).execute(&mut pool)
    })
    .await
    .unwrap();
    if let Err(e) = removed {
        eprintln!("Database error removing token: {:?}", e);
    }
}

// Every authenticated reply carries the rotated token in a `token` header.
pub fn wrap_json_reply_with_token(
    token_data: PublishAccessToken,
    reply: WithStatus<Json>,
) -> warp::reply::Response {
    warp::reply::with_header(reply, "token", token_data.token).into_response()
}

pub fn token_not_hex_warp_return() -> Result<(warp::reply::Response,), Rejection> {
    let error_msg = serde_json::json!({"error": "Token not in hex format"});
    Ok::<_, Rejection>((warp::reply::with_status(
        warp::reply::json(&error_msg),
        StatusCode::BAD_REQUEST,
    )
    .into_response(),))
}

pub fn token_invalid_return() -> Result<(warp::reply::Response,), Rejection> {
    let error_msg = serde_json::json!({"error": "Token not valid"});
    Ok::<_, Rejection>((warp::reply::with_status(
        warp::reply::json(&error_msg),
        StatusCode::UNAUTHORIZED,
    )
    .into_response(),))
}
