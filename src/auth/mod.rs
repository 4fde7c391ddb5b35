//! Account flows: registration, mock login, and password recovery.

pub mod recovery;
pub mod service;
pub mod session;

pub use recovery::RecoveryCode;
pub use service::AccountService;
pub use session::Session;
