use std::ops::Add;

use chrono::Utc;
use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl};
use secrets::Secret;
use serde_derive::{Deserialize, Serialize};
use warp::http::{Method, StatusCode};
use warp::reply::with_status;
use warp::{Filter, Reply};

use crate::{POOL, integration, methods, model};

#[derive(Deserialize, Serialize, Clone, Debug)]
struct ForgotPasswordData {
    mail: String,
}

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("forgot-password")
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::body::json())
        .and_then(async move |method: Method, body: ForgotPasswordData| {
            if method != Method::POST {
                return methods::standard_replies::method_not_allowed_response();
            }
            let mut pool = POOL.get().unwrap();

            // The reply is the same whether or not the address exists, so
            // the endpoint cannot be used to probe accounts.
            let generic_msg =
                serde_json::json!({"message": "If the email exists, a reset code was sent"});
            let generic_reply = Ok::<_, warp::Rejection>((with_status(
                warp::reply::json(&generic_msg),
                StatusCode::OK,
            )
            .into_response(),));

            use crate::schema::people::dsl as people_query;
            use crate::schema::users::dsl as users_query;

            let person_result = people_query::people
                .filter(people_query::mail.eq(&body.mail))
                .get_result::<model::Person>(&mut pool);
            let Ok(person) = person_result else {
                return generic_reply;
            };
            let user_result = users_query::users
                .filter(users_query::person_id.eq(person.id))
                .filter(users_query::is_active.eq(true))
                .get_result::<model::User>(&mut pool);
            let Ok(user) = user_result else {
                return generic_reply;
            };

            let token_vec = Secret::<[u8; 32]>::random(|s| s.to_vec());
            let new_reset = model::NewPasswordReset {
                user_id: user.id,
                token: token_vec.clone(),
                exp: Utc::now().add(chrono::Duration::hours(1)),
            };
            use crate::schema::password_resets::dsl::*;
            let inserted = diesel::insert_into(password_resets)
                .values(&new_reset)
                .execute(&mut pool);
            if let Err(e) = inserted {
                eprintln!("Database error storing password reset: {:?}", e);
                return methods::standard_replies::internal_server_error_response();
            }

            let code = format!("{}${}", user.id, hex::encode(&token_vec));
            let recipient = integration::sendgrid_pelado::make_email_obj(&person.mail, &person.name);
            let email_body = format!(
                "Hola {},<br><br>Recibimos un pedido para restablecer tu contrasena. \
                 Tu codigo es:<br><b>{}</b><br><br>El codigo vence en una hora. \
                 Si no fuiste vos, ignora este mensaje.",
                person.name, code
            );
            let sent = integration::sendgrid_pelado::send_email(
                None,
                recipient,
                "Restablecer contrasena",
                &email_body,
                None,
            )
            .await;
            if let Err(e) = sent {
                eprintln!("Sendgrid error sending reset email: {:?}", e);
            }

            generic_reply
        })
}
