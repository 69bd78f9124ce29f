pub mod auth_claims;
pub mod validated_json;

pub use auth_claims::AuthClaims;
pub use validated_json::ValidatedJson;
