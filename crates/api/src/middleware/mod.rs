//! Request authorization.
//!
//! - [`rbac::ClaimedRoles`] -- Roles asserted by the caller in `x-user-roles`.
//! - [`rbac::enforce_route_policy`] -- Rejects a request whose claimed roles
//!   do not satisfy the matched route's [`Operation`](newsletter_core::access::Operation).

pub mod rbac;
