//! Accounts: the registered-user record and its role-specific payloads.

pub mod model;
pub mod role;

pub use model::{
    Account, ClientProfile, DEFAULT_INSTITUTION, EntrepreneurProfile, FacilitatorProfile, Review,
    RoleProfile,
};
pub use role::{Answer, Diagnostic, Goal, Role};
