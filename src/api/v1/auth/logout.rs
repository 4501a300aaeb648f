use warp::http::{Method, StatusCode};
use warp::reply::with_status;
use warp::{Filter, Reply};

use crate::helper_model::PeladoError;
use crate::{methods, model};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("logout")
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::header::<String>("auth"))
        .and_then(async move |method: Method, auth: String| {
            if method != Method::POST {
                return methods::standard_replies::method_not_allowed_response();
            }
            let token_and_id = auth.split("$").collect::<Vec<&str>>();
            if token_and_id.len() != 2 {
                return methods::tokens::token_invalid_return();
            }
            let user_id = match token_and_id[1].parse::<i32>() {
                Ok(int) => int,
                Err(_) => {
                    return methods::tokens::token_invalid_return();
                }
            };
            let access_token = model::RequestToken {
                user_id,
                token: token_and_id[0].to_string(),
            };
            let if_token_valid =
                methods::tokens::verify_user_token(access_token.user_id, access_token.token.clone())
                    .await;
            match if_token_valid {
                Err(PeladoError::TokenFormat) => methods::tokens::token_not_hex_warp_return(),
                Err(_) => methods::standard_replies::internal_server_error_response(),
                Ok(token_is_valid) => {
                    if !token_is_valid {
                        methods::tokens::token_invalid_return()
                    } else {
                        // The session ends here: the token is removed, not
                        // rotated.
                        methods::tokens::rm_token_by_binary(
                            hex::decode(&access_token.token).unwrap(),
                        )
                        .await;
                        let msg = serde_json::json!({"message": "Session closed"});
                        Ok::<_, warp::Rejection>((with_status(
                            warp::reply::json(&msg),
                            StatusCode::OK,
                        )
                        .into_response(),))
                    }
                }
            }
        })
}
