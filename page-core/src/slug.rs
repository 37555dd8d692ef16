//! Public page slugs.

use uuid::Uuid;

const SUFFIX_ALPHABET: &[u8; 36] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Length of the random suffix appended by [`make_slug`].
pub const SUFFIX_LEN: usize = 4;

/// Fallback base when a name has no usable characters.
pub const DEFAULT_SLUG_BASE: &str = "site";

/// Turn a page name into a URL-safe base: lower-case, whitespace runs
/// become `-`, anything outside `[a-z0-9-]` is dropped.
#[must_use]
pub fn slug_base(name: &str) -> String {
    let lowered = name.to_lowercase();
    let dashed = lowered.split_whitespace().collect::<Vec<_>>().join("-");
    let base: String = dashed
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect();
    if base.is_empty() {
        DEFAULT_SLUG_BASE.to_string()
    } else {
        base
    }
}

/// Build a fresh slug for `name`: the base plus a short random suffix.
///
/// ```
/// let slug = page_core::make_slug("My Landing Page");
/// assert!(slug.starts_with("my-landing-page-"));
/// ```
#[must_use]
pub fn make_slug(name: &str) -> String {
    let suffix = encode_suffix(Uuid::new_v4().as_u128());
    format!("{}-{suffix}", slug_base(name))
}

/// Base-36 digits of `bits`, least significant first.
///
/// The low 62 bits of a v4 uuid are random, so the four digits taken here
/// are uniform to well within one part in a billion.
fn encode_suffix(mut bits: u128) -> String {
    let radix = SUFFIX_ALPHABET.len() as u128;
    (0..SUFFIX_LEN)
        .map(|_| {
            let digit = usize::try_from(bits % radix).unwrap_or_default();
            bits /= radix;
            char::from(SUFFIX_ALPHABET[digit])
        })
        .collect()
}
