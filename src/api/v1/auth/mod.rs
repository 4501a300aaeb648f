mod forgot_password;
mod login;
mod logout;
mod register;
mod reset_password;

use warp::Filter;

pub fn api_v1_auth() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone
{
    warp::path("auth")
        .and(
            login::main()
                .or(register::main())
                .or(logout::main())
                .or(forgot_password::main())
                .or(reset_password::main()),
        )
        .and(warp::path::end())
}
