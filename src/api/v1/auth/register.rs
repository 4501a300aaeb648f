use bcrypt::{DEFAULT_COST, hash};
use diesel::{BoolExpressionMethods, ExpressionMethods, QueryDsl, RunQueryDsl};
use regex::Regex;
use serde_derive::{Deserialize, Serialize};
use warp::http::{Method, StatusCode};
use warp::reply::with_status;
use warp::{Filter, Reply};

use crate::{POOL, helper_model, methods, model};

#[derive(Deserialize, Serialize, Clone, Debug)]
struct RegisterData {
    // person
    name: String,
    dni: String,
    phone: String,
    mail: String,
    gender: Option<model::Gender>,
    birthday: Option<String>,
    // user
    username: String,
    password: String,
    confirm_password: String,
    role: Option<model::UserRole>,
}

fn is_valid_email(email: &str) -> bool {
    if email.len() > 254 {
        return false;
    }
    lazy_static::lazy_static! {
        static ref EMAIL_REGEX: Regex = Regex::new(
            r"(?i)^[a-z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-z0-9-](?:[a-z0-9-]{0,61}[a-z0-9])+(?:\.[a-z0-9-](?:[a-z0-9-]{0,61}[a-z0-9])+)+$"
        ).expect("Invalid regex");
    }
    EMAIL_REGEX.is_match(email)
}

fn is_valid_phone_number(phone: &str) -> bool {
    lazy_static::lazy_static! {
        static ref PHONE_REGEX: Regex = Regex::new(
            r"^\d{10}$"  // Exactly 10 digits
        ).expect("Invalid phone number regex");
    }
    PHONE_REGEX.is_match(phone)
}

fn is_valid_dni(dni: &str) -> bool {
    lazy_static::lazy_static! {
        static ref DNI_REGEX: Regex = Regex::new(
            r"^\d{7,9}$"
        ).expect("Invalid DNI regex");
    }
    DNI_REGEX.is_match(dni)
}

pub fn main() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("register")
        .and(warp::path::end())
        .and(warp::method())
        .and(warp::body::json())
        .and(warp::header::optional::<String>("x-client-type"))
        .and_then(
            async move |method: Method, mut register_data: RegisterData, client_type: Option<String>| {
                if method != Method::POST {
                    return methods::standard_replies::method_not_allowed_response();
                }
                let mut pool = POOL.get().unwrap();

                if !is_valid_email(&register_data.mail)
                    || !is_valid_phone_number(&register_data.phone)
                    || !is_valid_dni(&register_data.dni)
                {
                    return methods::standard_replies::bad_request(
                        "Please check your email, phone number and DNI format",
                    );
                }
                if register_data.password.len() < 8 {
                    return methods::standard_replies::bad_request(
                        "Password must be at least 8 characters long",
                    );
                }
                if register_data.password != register_data.confirm_password {
                    return methods::standard_replies::bad_request("Passwords do not match");
                }

                // Blank optional fields are dropped before they reach the
                // insert, never stored as empty strings.
                let birthday_input = methods::user::sanitize_optional(register_data.birthday.clone());
                let birthday = match birthday_input {
                    None => None,
                    Some(raw) => match methods::dates::require_client_date(&raw) {
                        Ok(date) => Some(date),
                        Err(e) => {
                            return methods::standard_replies::bad_request(&e.to_string());
                        }
                    },
                };

                use crate::schema::people::dsl as people_query;
                use crate::schema::users::dsl as users_query;

                let username_clone = register_data.username.clone();
                let existing_user = users_query::users
                    .filter(users_query::username.eq(&username_clone))
                    .get_result::<model::User>(&mut pool);
                let existing_person = people_query::people
                    .filter(
                        people_query::dni
                            .eq(&register_data.dni)
                            .or(people_query::mail.eq(&register_data.mail)),
                    )
                    .get_result::<model::Person>(&mut pool);

                if existing_user.is_ok() || existing_person.is_ok() {
                    let error_msg = helper_model::ErrorResponse {
                        title: String::from("Conflict"),
                        message: String::from("Username, DNI or email already exists"),
                    };
                    return Ok::<_, warp::Rejection>((with_status(
                        warp::reply::json(&error_msg),
                        StatusCode::CONFLICT,
                    )
                    .into_response(),));
                }

                let hashed_pass = hash(&register_data.password, DEFAULT_COST).unwrap();
                register_data.password = hashed_pass;

                let new_person = model::NewPerson {
                    name: register_data.name.trim().to_string(),
                    dni: register_data.dni,
                    phone: register_data.phone,
                    mail: register_data.mail,
                    gender: register_data.gender,
                    birthday,
                };
                let person = diesel::insert_into(people_query::people)
                    .values(&new_person)
                    .get_result::<model::Person>(&mut pool);
                let Ok(person) = person else {
                    return methods::standard_replies::internal_server_error_response();
                };

                let new_user = model::NewUser {
                    username: register_data.username,
                    password: register_data.password,
                    role: register_data.role.unwrap_or(model::UserRole::Customer),
                    is_active: true,
                    person_id: person.id,
                };
                let user = diesel::insert_into(users_query::users)
                    .values(&new_user)
                    .get_result::<model::User>(&mut pool);
                let Ok(user) = user else {
                    return methods::standard_replies::internal_server_error_response();
                };

                let new_access_token =
                    methods::tokens::gen_token_object(user.id, client_type).await;
                use crate::schema::access_tokens::dsl::*;
                let insert_token_result = diesel::insert_into(access_tokens)
                    .values(&new_access_token)
                    .get_result::<model::AccessToken>(&mut pool)
                    .unwrap();

                let pub_token: model::PublishAccessToken = insert_token_result.into();
                let pub_user = user.to_publish_user();
                methods::standard_replies::auth_user_reply(&pub_user, &pub_token, true)
            },
        )
}
