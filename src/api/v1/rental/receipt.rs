use diesel::prelude::*;
use serde_derive::{Deserialize, Serialize};
use warp::http::{Method, StatusCode};
use warp::reply::with_status;
use warp::{Filter, Reply};

use crate::helper_model::PeladoError;
use crate::{POOL, helper_model, methods, model};

#[derive(Deserialize, Serialize, Clone, Debug)]
struct ReceiptRequestData {
    rental_id: i32,
}

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("receipt")
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::body::json())
        .and(warp::header::<String>("auth"))
        .and(warp::header::optional::<String>("x-client-type"))
        .and_then(
            async move |method: Method,
                        body: ReceiptRequestData,
                        auth: String,
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

                            use crate::schema::rentals::dsl as rental_query;
                            let rental_result = rental_query::rentals
                                .find(body.rental_id)
                                .get_result::<model::Rental>(&mut pool);
                            let rental = match rental_result {
                                Ok(rental) => rental,
                                Err(_) => {
                                    let msg = serde_json::json!({"error": "Rental invalid"});
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
                            };
                            // Customers can only print their own receipts.
                            if rental.user_id != user.id
                                && !methods::user::user_is_operational_admin(&user)
                            {
                                return methods::standard_replies::rental_not_allowed_response();
                            }

                            use crate::schema::cars::dsl as car_query;
                            let car_result = car_query::cars
                                .find(rental.car_id)
                                .get_result::<model::Car>(&mut pool);
                            let Ok(car) = car_result else {
                                return methods::standard_replies::internal_server_error_response();
                            };
                            let person_result =
                                methods::user::get_person_by_user_id(rental.user_id).await;
                            let Ok(person) = person_result else {
                                return methods::standard_replies::internal_server_error_response();
                            };

                            let detail = helper_model::RentalDetail { rental, car, person };
                            let document = helper_model::ReceiptDocument {
                                confirmation: detail.rental.confirmation.clone(),
                                body: methods::receipt::render_receipt(&detail),
                            };
                            let msg = serde_json::json!({"receipt": &document});
                            Ok::<_, warp::Rejection>((
                                methods::tokens::wrap_json_reply_with_token(
                                    new_token_in_db_publish,
                                    with_status(warp::reply::json(&msg), StatusCode::OK),
                                ),
                            ))
                        }
                    }
                }
            },
        )
}
