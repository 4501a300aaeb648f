use bytes::Bytes;
use diesel::prelude::*;
use warp::http::{Method, StatusCode};
use warp::reply::with_status;
use warp::{Filter, Reply};

use crate::helper_model::PeladoError;
use crate::{POOL, helper_model, integration, methods, model};

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("upload-image")
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::body::bytes())
        .and(warp::header::<String>("auth"))
        .and(warp::header::<String>("file-name"))
        .and(warp::header::optional::<String>("x-client-type"))
        .and_then(
            async move |method: Method,
                        body: Bytes,
                        auth: String,
                        file_name: String,
                        client_type: Option<String>| {
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
                            let admin = match methods::user::get_user_by_id(access_token.user_id)
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
                            if !methods::user::user_is_operational_admin(&admin) {
                                return methods::user::user_not_admin_wrapped_return(
                                    new_token_in_db_publish,
                                );
                            }

                            // The hosted URL must exist before any car
                            // payload can embed it.
                            let upload_result = integration::cloudinary_pelado::upload_image(
                                file_name,
                                body.to_vec(),
                            )
                            .await;
                            match upload_result {
                                Ok(file_link) => {
                                    let msg = helper_model::FileLink { file_link };
                                    Ok::<_, warp::Rejection>((
                                        methods::tokens::wrap_json_reply_with_token(
                                            new_token_in_db_publish,
                                            with_status(warp::reply::json(&msg), StatusCode::OK),
                                        ),
                                    ))
                                }
                                Err(e) => {
                                    eprintln!("Cloudinary upload error: {:?}", e);
                                    methods::standard_replies::internal_server_error_response()
                                }
                            }
                        }
                    }
                }
            },
        )
}
