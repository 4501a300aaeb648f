use std::collections::HashMap;
use warp::http::StatusCode;
use warp::reply::with_status;
use warp::{Filter, Reply, reply};

// Diagnostic echo used to debug proxy and client header handling. The auth
// header is masked so a pasted response can never leak a live token.
pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("header-check")
        .and(warp::path::end())
        .and(warp::header::headers_cloned())
        .and_then(async move |headers: warp::http::HeaderMap| {
            let mut header_map = HashMap::new();
            for (key, value) in headers.iter() {
                let name = key.to_string();
                if name == "auth" {
                    header_map.insert(name, String::from("<masked>"));
                    continue;
                }
                if let Ok(val_str) = value.to_str() {
                    header_map.insert(name, val_str.to_string());
                }
            }
            let msg = serde_json::json!({
                "server": "pelado-httpd",
                "headers": header_map,
            });
            Ok::<_, warp::Rejection>((with_status(reply::json(&msg), StatusCode::OK)
                .into_response(),))
        })
}
