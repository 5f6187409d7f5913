//! Role-based gating of routes.

pub mod enforcer;

pub use enforcer::RoleRequirement;
