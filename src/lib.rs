//! Property form for house price estimates.
//!
//! Raw form input is checked by single-field and cross-field rules
//! ([`validation`]), turned into a typed request ([`form::PredictionRequest`]),
//! sent to a remote prediction service ([`predictor`]) and the result kept in
//! a bounded local history ([`history`]).

pub mod config;
pub mod form;
pub mod history;
pub mod predictor;
pub mod service;
pub mod storage;
pub mod validation;

pub use config::Config;
pub use service::EstimatorService;
