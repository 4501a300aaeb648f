mod categorized;
mod finish;
mod get_all;
mod new;
mod receipt;

use warp::Filter;

pub fn api_v1_rental() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone
{
    warp::path("rental")
        .and(
            get_all::main()
                .or(categorized::main())
                .or(new::main())
                .or(finish::main())
                .or(receipt::main()),
        )
        .and(warp::path::end())
}
