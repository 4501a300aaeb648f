use diesel::prelude::*;
use warp::http::{Method, StatusCode};
use warp::reply::with_status;
use warp::{Filter, Reply};

use crate::helper_model::PeladoError;
use crate::{POOL, methods, model};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("person")
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::header::<String>("auth"))
        .and(warp::header::optional::<String>("target-user-id"))
        .and(warp::header::optional::<String>("x-client-type"))
        .and_then(
            async move |method: Method,
                        auth: String,
                        target_user_id: Option<String>,
                        client_type: Option<String>| {
                if method != Method::GET {
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
                let if_token_valid = methods::tokens::verify_user_token(
                    access_token.user_id,
                    access_token.token.clone(),
                )
                .await;
                match if_token_valid {
                    Err(PeladoError::TokenFormat) => methods::tokens::token_not_hex_warp_return(),
                    Err(_) => methods::standard_replies::internal_server_error_response(),
                    Ok(token_is_valid) => {
                        if !token_is_valid {
                            methods::tokens::token_invalid_return()
                        } else {
                            // Token is valid; rotate it
                            let user = match methods::user::get_user_by_id(access_token.user_id)
                                .await
                            {
                                Ok(user) => user,
                                Err(_) => return methods::tokens::token_invalid_return(),
                            };
                            methods::tokens::rm_token_by_binary(
                                hex::decode(&access_token.token).unwrap(),
                            )
                            .await;
                            let new_token = methods::tokens::gen_token_object(
                                access_token.user_id,
                                client_type,
                            )
                            .await;
                            use crate::schema::access_tokens::dsl::*;
                            let mut pool = POOL.get().unwrap();
                            let new_token_in_db_publish: model::PublishAccessToken =
                                diesel::insert_into(access_tokens)
                                    .values(&new_token)
                                    .get_result::<model::AccessToken>(&mut pool)
                                    .unwrap()
                                    .into();

                            // Without a target the caller asks about itself;
                            // asking about anyone else takes an admin.
                            let target = match target_user_id {
                                None => user.id,
                                Some(raw) => match raw.parse::<i32>() {
                                    Ok(id_value) => id_value,
                                    Err(_) => {
                                        let msg = serde_json::json!({"error": "target-user-id invalid"});
                                        return Ok::<_, warp::Rejection>((
                                            methods::tokens::wrap_json_reply_with_token(
                                                new_token_in_db_publish,
                                                with_status(
                                                    warp::reply::json(&msg),
                                                    StatusCode::BAD_REQUEST,
                                                ),
                                            ),
                                        ));
                                    }
                                },
                            };
                            if target != user.id
                                && !methods::user::user_is_operational_admin(&user)
                            {
                                return methods::user::user_not_admin_wrapped_return(
                                    new_token_in_db_publish,
                                );
                            }

                            match methods::user::get_person_by_user_id(target).await {
                                Ok(person) => {
                                    let msg = serde_json::json!({"person": &person});
                                    Ok::<_, warp::Rejection>((
                                        methods::tokens::wrap_json_reply_with_token(
                                            new_token_in_db_publish,
                                            with_status(warp::reply::json(&msg), StatusCode::OK),
                                        ),
                                    ))
                                }
                                Err(_) => {
                                    let msg = serde_json::json!({"error": "User invalid"});
                                    Ok::<_, warp::Rejection>((
                                        methods::tokens::wrap_json_reply_with_token(
                                            new_token_in_db_publish,
                                            with_status(
                                                warp::reply::json(&msg),
                                                StatusCode::BAD_REQUEST,
                                            ),
                                        ),
                                    ))
                                }
                            }
                        }
                    }
                }
            },
        )
}
