pub mod claims;
pub mod gate;
pub mod jwt;
pub mod password;

pub use claims::ClaimSet;
pub use gate::{AuthErrorKind, AuthOutcome, TokenAuthenticator};
