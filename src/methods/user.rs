use diesel::prelude::*;
use tokio::task;
use warp::Rejection;
use warp::http::StatusCode;

use crate::POOL;
use crate::methods::tokens::wrap_json_reply_with_token;
use crate::model::{Person, PublishAccessToken, User};

pub async fn get_user_by_id(_user_id: i32) -> QueryResult<User> {
    let mut pool = POOL.clone().get().unwrap();
    task::spawn_blocking(move || {
        use crate::schema::users::dsl::*;
        users.filter(id.eq(&_user_id)).get_result::<User>(&mut pool)
    })
    .await
    .unwrap()
}

pub async fn get_person_by_user_id(_user_id: i32) -> QueryResult<Person> {
    let mut pool = POOL.clone().get().unwrap();
    task::spawn_blocking(move || {
        use crate::schema::people;
        use crate::schema::users;
        users::table
            .inner_join(people::table)
            .filter(users::id.eq(&_user_id))
            .select(Person::as_select())
            .get_result::<Person>(&mut pool)
    })
    .await
    .unwrap()
}

// Only a live admin account may manage inventory or other accounts.
pub fn user_is_operational_admin(user: &User) -> bool {
    user.is_active && user.role == crate::model::UserRole::Admin
}

/// Omission rule for optional text fields: forms submit empty strings, and
/// an empty or blank value is dropped entirely so it never lands in an
/// insert as `''` nor overwrites stored data on update.
pub fn sanitize_optional(value: Option<String>) -> Option<String> {
    match value {
        None => None,
        Some(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
    }
}

pub fn user_not_admin_wrapped_return(
    token_data: PublishAccessToken,
) -> Result<(warp::reply::Response,), Rejection> {
    let error_msg = serde_json::json!({"error": "You do not have administrator privileges"});
    Ok::<_, Rejection>((wrap_json_reply_with_token(
        token_data,
        warp::reply::with_status(warp::reply::json(&error_msg), StatusCode::UNAUTHORIZED),
    ),))
}

// -------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_are_dropped() {
        assert_eq!(sanitize_optional(None), None);
        assert_eq!(sanitize_optional(Some(String::new())), None);
        assert_eq!(sanitize_optional(Some("   ".to_string())), None);
    }

    #[test]
    fn real_values_are_trimmed_and_kept() {
        assert_eq!(
            sanitize_optional(Some("  hola  ".to_string())),
            Some("hola".to_string())
        );
        assert_eq!(
            sanitize_optional(Some("12345678".to_string())),
            Some("12345678".to_string())
        );
    }
}
