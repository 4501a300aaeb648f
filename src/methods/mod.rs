pub mod car;
pub mod dates;
pub mod pricing;
pub mod receipt;
pub mod rental;
pub mod standard_replies;
pub mod tokens;
pub mod user;
