//! SUMAK: registration wizard, personalized task paths, and account flows
//! for the small-business support platform.

pub mod account;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod store;
pub mod tasks;
pub mod wizard;
