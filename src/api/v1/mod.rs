mod auth;
mod car;
mod people;
mod rental;
mod user;

use warp::Filter;

pub fn api_v1() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("v1")
        .and(
            auth::api_v1_auth()
                .or(car::api_v1_car())
                .or(rental::api_v1_rental())
                .or(user::api_v1_user())
                .or(people::api_v1_people()),
        )
        .and(warp::path::end())
}
