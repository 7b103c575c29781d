use std::sync::LazyLock;

use regex::Regex;

const MAX_DOMAIN_LENGTH: usize = 253;

static DOMAIN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([a-z0-9]([a-z0-9\-]{0,61}[a-z0-9])?\.)+[a-z]{2,}$")
        .expect("domain pattern is a valid regex")
});

/// Returns true when the last dot-separated label is 2+ ASCII letters.
/// Compound suffixes such as `.co.uk` satisfy this as well.
pub fn has_tld(host: &str) -> bool {
    match host.rsplit_once('.') {
        Some((_, tld)) => tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()),
        None => false,
    }
}

/// Checks that `host` looks like a public website domain.
///
/// A leading `www.` and anything after the first `/` or `?` are ignored.
/// The rest must be dot-separated labels of 1-63 alphanumeric/hyphen
/// characters (no hyphen at either end of a label), ending in a TLD of at
/// least two letters, with a total length of at most 253 characters.
pub fn is_valid_domain(host: &str) -> bool {
    let host = strip_www(host);
    let host = host.split(['/', '?']).next().unwrap_or_default();

    host.len() <= MAX_DOMAIN_LENGTH && DOMAIN_PATTERN.is_match(host)
}

fn strip_www(host: &str) -> &str {
    match host.get(..4) {
        Some(prefix) if prefix.eq_ignore_ascii_case("www.") => &host[4..],
        _ => host,
    }
}
