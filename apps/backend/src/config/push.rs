use std::env;

pub const DEFAULT_VAPID_SUBJECT: &str = "mailto:admin@simjur.com";

/// VAPID material for Web Push delivery.
#[derive(Clone)]
pub struct PushConfig {
    /// Base64url public key, shared with browsers when they subscribe
    pub public_key: String,
    /// Base64url private key used to sign VAPID JWTs
    pub private_key: String,
    /// `sub` claim of the VAPID JWT (a `mailto:` or `https:` URI)
    pub subject: String,
}

impl std::fmt::Debug for PushConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PushConfig")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .field("subject", &self.subject)
            .finish()
    }
}

/// Read `VAPID_PUBLIC_KEY`, `VAPID_PRIVATE_KEY` and `VAPID_SUBJECT`.
///
/// Returns `None` unless both keys are present and non-empty; push sending
/// is then reported as a configuration error per request.
pub fn push_config_from_env() -> Option<PushConfig> {
    let non_empty = |name: &str| env::var(name).ok().filter(|v| !v.trim().is_empty());

    let public_key = non_empty("VAPID_PUBLIC_KEY")?;
    let private_key = non_empty("VAPID_PRIVATE_KEY")?;
    let subject = non_empty("VAPID_SUBJECT").unwrap_or_else(|| DEFAULT_VAPID_SUBJECT.to_string());

    Some(PushConfig {
        public_key,
        private_key,
        subject,
    })
}
