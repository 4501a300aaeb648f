use diesel::prelude::*;
use serde_derive::{Deserialize, Serialize};
use warp::http::StatusCode;
use warp::{Filter, Reply};

use crate::helper_model::PeladoError;
use crate::methods::{dates, pricing};
use crate::{POOL, methods, model};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
struct NewRentalRequestBodyData {
    car_id: i32,
    start_date: String, // YYYY-MM-DD, possibly a full ISO timestamp
    end_date: String,
    observation: Option<String>,
}

pub fn main() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("new")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(warp::header::<String>("auth"))
        .and(warp::header::optional::<String>("x-client-type"))
        .and_then(
            async move |body: NewRentalRequestBodyData, auth: String, client_type: Option<String>| {
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
                            let mut pool = POOL.clone().get().unwrap();
                            let new_token_in_db_publish: model::PublishAccessToken =
                                diesel::insert_into(access_tokens)
                                    .values(&new_token)
                                    .get_result::<model::AccessToken>(&mut pool)
                                    .unwrap()
                                    .into();

                            // Dates the desk cannot read are rejected here,
                            // never guessed, and nothing is inserted.
                            let start = match dates::require_client_date(&body.start_date) {
                                Ok(date) => date,
                                Err(e) => {
                                    let error_msg = serde_json::json!({"access_token": &new_token_in_db_publish, "error": e.to_string()});
                                    return Ok::<_, warp::Rejection>((warp::reply::with_status(warp::reply::json(&error_msg), StatusCode::BAD_REQUEST).into_response(),));
                                }
                            };
                            let end = match dates::require_client_date(&body.end_date) {
                                Ok(date) => date,
                                Err(e) => {
                                    let error_msg = serde_json::json!({"access_token": &new_token_in_db_publish, "error": e.to_string()});
                                    return Ok::<_, warp::Rejection>((warp::reply::with_status(warp::reply::json(&error_msg), StatusCode::BAD_REQUEST).into_response(),));
                                }
                            };
                            let days = match pricing::validate_rental_dates(start, end) {
                                Ok(days) => days,
                                Err(_) => {
                                    let error_msg = serde_json::json!({"access_token": &new_token_in_db_publish, "error": "End date must be at least one day after the start date"});
                                    return Ok::<_, warp::Rejection>((warp::reply::with_status(warp::reply::json(&error_msg), StatusCode::UNPROCESSABLE_ENTITY).into_response(),));
                                }
                            };

                            let observation =
                                methods::user::sanitize_optional(body.observation.clone());
                            if let Some(ref obs) = observation {
                                if obs.chars().count() > 300 {
                                    let error_msg = serde_json::json!({"access_token": &new_token_in_db_publish, "error": "Observation too long"});
                                    return Ok::<_, warp::Rejection>((warp::reply::with_status(warp::reply::json(&error_msg), StatusCode::BAD_REQUEST).into_response(),));
                                }
                            }

                            use crate::schema::cars::dsl as car_query;
                            let car_result = car_query::cars
                                .find(body.car_id)
                                .get_result::<model::Car>(&mut pool);
                            let car = match car_result {
                                Ok(car) => car,
                                Err(_) => {
                                    let error_msg = serde_json::json!({"access_token": &new_token_in_db_publish, "error": "Car invalid"});
                                    return Ok::<_, warp::Rejection>((warp::reply::with_status(warp::reply::json(&error_msg), StatusCode::BAD_REQUEST).into_response(),));
                                }
                            };
                            if !car.is_rentable() {
                                let error_msg = serde_json::json!({"access_token": &new_token_in_db_publish, "error": "Car unavailable"});
                                return Ok::<_, warp::Rejection>((warp::reply::with_status(warp::reply::json(&error_msg), StatusCode::CONFLICT).into_response(),));
                            }

                            // The rate is snapshotted now; later price
                            // changes leave this rental untouched.
                            let total = match pricing::compute_total(car.price_per_day, days) {
                                Ok(total) => total,
                                Err(_) => {
                                    let error_msg = serde_json::json!({"access_token": &new_token_in_db_publish, "error": "Car rate invalid"});
                                    return Ok::<_, warp::Rejection>((warp::reply::with_status(warp::reply::json(&error_msg), StatusCode::NOT_ACCEPTABLE).into_response(),));
                                }
                            };

                            let conf_id = methods::rental::generate_unique_rental_confirmation();
                            let new_rental = model::NewRental {
                                confirmation: conf_id,
                                car_id: car.id,
                                user_id: user.id,
                                start_date: start,
                                end_date: Some(end),
                                daily_rate: car.price_per_day,
                                total,
                                observation,
                                is_active: true,
                            };
                            use crate::schema::rentals::dsl as rental_query;
                            let insert_result = diesel::insert_into(rental_query::rentals)
                                .values(&new_rental)
                                .get_result::<model::Rental>(&mut pool);
                            match insert_result {
                                Ok(rental) => {
                                    let msg = serde_json::json!({"access_token": &new_token_in_db_publish, "rental": &rental});
                                    Ok::<_, warp::Rejection>((warp::reply::with_status(warp::reply::json(&msg), StatusCode::CREATED).into_response(),))
                                }
                                Err(e) => {
                                    eprintln!("Database error creating rental: {:?}", e);
                                    methods::standard_replies::internal_server_error_response()
                                }
                            }
                        }
                    }
                }
            },
        )
}
