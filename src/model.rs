use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

// Diesel requires us to define a custom mapping between the Rust enum
// and the database type, if we are not using string.
use crate::schema::*;
use diesel::deserialize::{self, FromSql};
use diesel::pg::{Pg, PgValue};
use diesel::serialize::{self, Output, ToSql};
use diesel::{AsExpression, FromSqlRow};
use std::io::Write;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, AsExpression, FromSqlRow)]
#[diesel(sql_type = sql_types::UserRoleEnum)] //lets us map the enum to TEXT in PostgresSQL
pub enum UserRole {
    Admin,
    Customer,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, AsExpression, FromSqlRow)]
#[diesel(sql_type = sql_types::GenderEnum)]
pub enum Gender {
    Male,
    Female,
    Other,
    PNTS, // prefer not to say
}

//This is for postgres. For other databases the type might be different.
impl ToSql<sql_types::UserRoleEnum, Pg> for UserRole {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        match *self {
            UserRole::Admin => out.write_all(b"Admin")?,
            UserRole::Customer => out.write_all(b"Customer")?,
        }
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<sql_types::UserRoleEnum, Pg> for UserRole {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"Admin" => Ok(UserRole::Admin),
            b"Customer" => Ok(UserRole::Customer),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl ToSql<sql_types::GenderEnum, Pg> for Gender {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        match *self {
            Gender::Male => out.write_all(b"Male")?,
            Gender::Female => out.write_all(b"Female")?,
            Gender::Other => out.write_all(b"Other")?,
            Gender::PNTS => out.write_all(b"PNTS")?,
        }
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<sql_types::GenderEnum, Pg> for Gender {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"Male" => Ok(Gender::Male),
            b"Female" => Ok(Gender::Female),
            b"Other" => Ok(Gender::Other),
            b"PNTS" => Ok(Gender::PNTS),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[diesel(table_name = people)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Person {
    pub id: i32,
    pub name: String,
    pub dni: String,
    pub phone: String,
    pub mail: String,
    pub gender: Option<Gender>,
    pub birthday: Option<NaiveDate>,
}

#[derive(Insertable, Debug, Clone, Deserialize, Serialize)]
#[diesel(table_name = people)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewPerson {
    pub name: String,
    pub dni: String,
    pub phone: String,
    pub mail: String,
    pub gender: Option<Gender>,
    pub birthday: Option<NaiveDate>,
}

// Omitted fields leave the stored value alone; there is no way to blank a
// profile field from this payload.
#[derive(AsChangeset, Debug, Clone, Deserialize, Serialize)]
#[diesel(table_name = people)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdatePerson {
    pub name: Option<String>,
    pub dni: Option<String>,
    pub phone: Option<String>,
    pub mail: Option<String>,
    pub gender: Option<Gender>,
    pub birthday: Option<NaiveDate>,
}

#[derive(Queryable, Identifiable, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[diesel(belongs_to(Person))]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password: String, // Hashed!
    pub role: UserRole,
    pub is_active: bool,
    pub person_id: i32,
}

impl User {
    pub fn to_publish_user(&self) -> PublishUser {
        PublishUser {
            id: self.id,
            username: self.username.clone(),
            role: self.role,
            is_active: self.is_active,
            person_id: self.person_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishUser {
    pub id: i32,
    pub username: String,
    pub role: UserRole,
    pub is_active: bool,
    pub person_id: i32,
}

#[derive(Insertable, Debug, Clone, Deserialize, Serialize)]
#[diesel(belongs_to(Person))]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewUser {
    pub username: String,
    pub password: String, // Hash this before inserting!
    pub role: UserRole,
    pub is_active: bool,
    pub person_id: i32,
}

#[derive(Queryable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = cars)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Car {
    pub id: i32,
    pub brand: String,
    pub model: String,
    pub color: String,
    pub year: String,
    pub price_per_day: f64,
    pub stock: i32,
    pub available: bool,
    pub image_url: Option<String>,
}

impl Car {
    // A car can be handed out only while it is flagged available and
    // at least one unit is in stock.
    pub fn is_rentable(&self) -> bool {
        self.available && self.stock > 0
    }
}

#[derive(Insertable, Debug, Clone, Deserialize, Serialize)]
#[diesel(table_name = cars)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewCar {
    pub brand: String,
    pub model: String,
    pub color: String,
    pub year: String,
    pub price_per_day: f64,
    pub stock: i32,
    pub available: bool,
    pub image_url: Option<String>,
}

#[derive(AsChangeset, Debug, Clone, Deserialize, Serialize)]
#[diesel(table_name = cars)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateCar {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub color: Option<String>,
    pub year: Option<String>,
    pub price_per_day: Option<f64>,
    pub stock: Option<i32>,
    pub available: Option<bool>,
    pub image_url: Option<String>,
}

#[derive(Queryable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(belongs_to(Car))]
#[diesel(belongs_to(User))]
#[diesel(table_name = rentals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Rental {
    pub id: i32,
    pub confirmation: String,
    pub car_id: i32,
    pub user_id: i32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub daily_rate: f64,
    pub total: f64, // snapshot at creation, never recomputed
    pub observation: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone, Deserialize, Serialize)]
#[diesel(belongs_to(Car))]
#[diesel(belongs_to(User))]
#[diesel(table_name = rentals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewRental {
    pub confirmation: String,
    pub car_id: i32,
    pub user_id: i32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub daily_rate: f64,
    pub total: f64,
    pub observation: Option<String>,
    pub is_active: bool,
}

#[derive(Queryable, Identifiable, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[diesel(belongs_to(User))]
#[diesel(table_name = access_tokens)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AccessToken {
    pub id: i32,
    pub user_id: i32,
    pub token: Vec<u8>,
    pub exp: DateTime<Utc>,
}

impl AccessToken {
    pub fn to_publish_access_token(&self) -> PublishAccessToken {
        PublishAccessToken {
            user_id: self.user_id,
            token: hex::encode(&self.token),
            exp: self.exp,
        }
    }
}

impl From<AccessToken> for PublishAccessToken {
    fn from(token: AccessToken) -> Self {
        token.to_publish_access_token()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishAccessToken {
    pub user_id: i32,
    pub token: String, // hex
    pub exp: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone, PartialEq, Eq)]
#[diesel(belongs_to(User))]
#[diesel(table_name = access_tokens)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewAccessToken {
    pub user_id: i32,
    pub token: Vec<u8>,
    pub exp: DateTime<Utc>,
}

// The token half of the `auth` header, split into its two parts.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RequestToken {
    pub user_id: i32,
    pub token: String, // hex
}

#[derive(Queryable, Identifiable, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[diesel(belongs_to(User))]
#[diesel(table_name = password_resets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PasswordReset {
    pub id: i32,
    pub user_id: i32,
    pub token: Vec<u8>,
    pub exp: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone, PartialEq, Eq)]
#[diesel(belongs_to(User))]
#[diesel(table_name = password_resets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewPasswordReset {
    pub user_id: i32,
    pub token: Vec<u8>,
    pub exp: DateTime<Utc>,
}
