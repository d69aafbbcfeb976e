//! Slug generation.
//!
//! Public submissions get a name-derived slug plus a random base36 suffix so
//! two independent submissions of the same name land on distinct slugs. The
//! store still enforces uniqueness; the repository retries with a fresh
//! suffix on conflict.

use rand::Rng;

const SUFFIX_LEN: usize = 4;
const SUFFIX_CHARS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Lowercase the name, collapse every non-alphanumeric run into a single
/// `-`, and trim leading/trailing dashes.
pub fn slugify(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars().flat_map(|c| c.to_lowercase()) {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c);
        } else {
            pending_dash = true;
        }
    }
    out
}

/// Random 4-char base36 suffix.
pub fn random_suffix() -> String {
    let mut rng = rand::rng();
    (0..SUFFIX_LEN)
        .map(|_| SUFFIX_CHARS[rng.random_range(0..SUFFIX_CHARS.len())] as char)
        .collect()
}

/// Slug for a public submission: `<slugified-name>-<random suffix>`.
pub fn submission_slug(name: &str) -> String {
    let base = slugify(name);
    if base.is_empty() {
        random_suffix()
    } else {
        format!("{}-{}", base, random_suffix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Acme Robotics"), "acme-robotics");
        assert_eq!(slugify("  Tech -- Hub!  "), "tech-hub");
        assert_eq!(slugify("Café de l'Est 21"), "caf-de-l-est-21");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_submission_slug_shape() {
        let slug = submission_slug("Acme Robotics");
        assert!(slug.starts_with("acme-robotics-"));
        let suffix = slug.rsplit('-').next().unwrap();
        assert_eq!(suffix.len(), 4);
        assert!(suffix.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_two_submissions_get_distinct_slugs() {
        // 36^4 suffixes; a handful of draws colliding would indicate a broken rng
        let slugs: std::collections::HashSet<_> =
            (0..16).map(|_| submission_slug("Tech Hub")).collect();
        assert!(slugs.len() > 1);
        for slug in &slugs {
            assert!(slug.starts_with("tech-hub-"));
        }
    }
}
