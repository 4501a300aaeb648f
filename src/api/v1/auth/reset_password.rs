use bcrypt::{DEFAULT_COST, hash};
use chrono::Utc;
use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl};
use serde_derive::{Deserialize, Serialize};
use warp::http::{Method, StatusCode};
use warp::reply::with_status;
use warp::{Filter, Reply};

use crate::{POOL, methods, model};

#[derive(Deserialize, Serialize, Clone, Debug)]
struct ResetPasswordData {
    user_id: i32,
    token: String, // hex, from the reset email
    password: String,
    confirm_password: String,
}

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("reset-password")
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::body::json())
        .and_then(async move |method: Method, body: ResetPasswordData| {
            if method != Method::POST {
                return methods::standard_replies::method_not_allowed_response();
            }
            if body.password.len() < 8 {
                return methods::standard_replies::bad_request(
                    "Password must be at least 8 characters long",
                );
            }
            if body.password != body.confirm_password {
                return methods::standard_replies::bad_request("Passwords do not match");
            }
            let binary_token = match hex::decode(&body.token) {
                Ok(bytes) => bytes,
                Err(_) => {
                    return methods::tokens::token_not_hex_warp_return();
                }
            };

            let mut pool = POOL.get().unwrap();
            use crate::schema::password_resets::dsl as reset_query;
            let reset_result = reset_query::password_resets
                .filter(reset_query::user_id.eq(&body.user_id))
                .filter(reset_query::token.eq(&binary_token))
                .get_result::<model::PasswordReset>(&mut pool);
            let Ok(reset) = reset_result else {
                return methods::tokens::token_invalid_return();
            };
            if reset.exp < Utc::now() {
                return methods::tokens::token_invalid_return();
            }

            let hashed_pass = hash(&body.password, DEFAULT_COST).unwrap();
            use crate::schema::users::dsl as users_query;
            let updated = diesel::update(users_query::users.find(body.user_id))
                .set(users_query::password.eq(hashed_pass))
                .execute(&mut pool);
            if updated.is_err() {
                return methods::standard_replies::internal_server_error_response();
            }

            // The reset code is single-use, and every open session dies with
            // the old password.
            let _ = diesel::delete(
                reset_query::password_resets.filter(reset_query::user_id.eq(&body.user_id)),
            )
            .execute(&mut pool);
            use crate::schema::access_tokens::dsl as token_query;
            let _ = diesel::delete(
                token_query::access_tokens.filter(token_query::user_id.eq(&body.user_id)),
            )
            .execute(&mut pool);

            let msg = serde_json::json!({"message": "Password updated"});
            Ok::<_, warp::Rejection>((with_status(warp::reply::json(&msg), StatusCode::OK)
                .into_response(),))
        })
}
