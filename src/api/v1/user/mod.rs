mod deactivate;
mod person;
mod update;

use warp::Filter;

pub fn api_v1_user() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone
{
    warp::path("user")
        .and(person::main().or(update::main()).or(deactivate::main()))
        .and(warp::path::end())
}
