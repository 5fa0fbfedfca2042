pub mod error;
pub mod listing;
pub mod progress;
pub mod validator;
