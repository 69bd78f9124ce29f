use std::fmt;

use lazy_regex::regex::Captures;
use lazy_regex::{lazy_regex, Lazy, Regex};

static EMAIL: Lazy<Regex> = lazy_regex!(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b");

// Base64url / hex runs of 16+ chars, which covers JWT segments and push keys.
static TOKEN: Lazy<Regex> = lazy_regex!(r"[A-Za-z0-9+/_-]{16,}={0,2}");

/// Mask emails (first character of the local part is kept) and opaque tokens.
///
/// Emails are handled first so the token pattern does not eat their local parts.
pub fn redact(input: &str) -> String {
    let masked = EMAIL.replace_all(input, |caps: &Captures| {
        let email = &caps[0];
        match email.split_once('@') {
            Some((local, domain)) => match local.chars().next() {
                Some(first) => format!("{first}***@{domain}"),
                None => format!("@{domain}"),
            },
            None => email.to_string(),
        }
    });

    TOKEN.replace_all(&masked, "[REDACTED_TOKEN]").into_owned()
}

/// Display wrapper applying [`redact`] when formatted.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}
