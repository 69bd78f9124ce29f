//! Repository functions, generic over `ConnectionTrait` and returning
//! `DomainError`.

pub mod lpj;
pub mod module_access;
pub mod modules;
pub mod push_subscriptions;
pub mod roles;
pub mod tor;
pub mod transactions;
pub mod users;
