mod get_all;
mod new;
mod update;
mod upload_image;

use warp::Filter;

pub fn api_v1_car() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("car")
        .and(
            get_all::main()
                .or(new::main())
                .or(update::main())
                .or(upload_image::main()),
        )
        .and(warp::path::end())
}
