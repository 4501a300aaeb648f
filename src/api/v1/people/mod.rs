mod get_all;
mod search;

use warp::Filter;

pub fn api_v1_people() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone
{
    warp::path("people")
        .and(get_all::main().or(search::main()))
        .and(warp::path::end())
}
