use serde_derive::{Deserialize, Serialize};
use thiserror::Error;

use crate::model;

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ErrorResponse {
    pub title: String,
    pub message: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PeladoError {
    // end date not strictly after start date, or fewer than one billable day
    #[error("end date must be after start date")]
    InvalidDateRange,
    // pricing and validation fail closed on unparsable dates; categorization
    // fails open instead and never raises this
    #[error("malformed date: {0}")]
    MalformedDate(String),
    #[error("daily rate must be a finite, non-negative number")]
    InvalidRate,
    #[error("token not in hex format")]
    TokenFormat,
    #[error("database unavailable")]
    Database,
}

// Everything the receipt renderer consumes for one rental.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct RentalDetail {
    pub rental: model::Rental,
    pub car: model::Car,
    pub person: model::Person,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct FileLink {
    pub file_link: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ReceiptDocument {
    pub confirmation: String,
    pub body: String,
}
