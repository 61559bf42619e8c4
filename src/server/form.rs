//! Request variable decoding
//!
//! Consumers send PHP-style form data: flat keys like `site_url` and
//! bracketed keys like `plugins[hello/hello.php][Version]`. Query-string and
//! body pairs are merged (body last, so it wins), tags are stripped from every
//! key and value, and the result is folded into a [`RequestContext`].

use crate::feed::NonceIssuer;
use crate::models::{ComponentKind, RequestContext};
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

fn tag_pattern() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"<[^\s<>][^>]*(?:>|$)").expect("valid tag regex"))
}

/// Remove HTML and PHP tags
pub fn strip_tags(value: &str) -> String {
    tag_pattern().replace_all(value, "").into_owned()
}

/// Decode `application/x-www-form-urlencoded` pairs from both sources
pub fn merge_pairs(query: Option<&str>, body: &[u8]) -> Vec<(String, String)> {
    let query = query.unwrap_or_default().as_bytes();
    url::form_urlencoded::parse(query)
        .chain(url::form_urlencoded::parse(body))
        .map(|(k, v)| (strip_tags(&k), strip_tags(&v)))
        .collect()
}

/// Site URL announced in a `User-Agent` like `ClassicPress/1.1.1; https://site.example`
pub fn site_url_from_user_agent(user_agent: &str) -> Option<String> {
    let candidate = user_agent.rsplit(';').next()?.trim();
    if candidate.is_empty() {
        return None;
    }
    match Url::parse(candidate) {
        Ok(url) if url.has_host() => Some(candidate.to_string()),
        _ => None,
    }
}

/// Split `name[a][b]` into `("name", ["a", "b"])`
fn split_key(key: &str) -> (&str, Vec<&str>) {
    let Some(open) = key.find('[') else {
        return (key, Vec::new());
    };

    let base = &key[..open];
    let mut parts = Vec::new();
    let mut rest = &key[open..];
    while let Some(stripped) = rest.strip_prefix('[') {
        let Some(close) = stripped.find(']') else {
            break;
        };
        parts.push(&stripped[..close]);
        rest = &stripped[close + 1..];
    }
    (base, parts)
}

/// Fold request pairs into a request context for `kind`
///
/// `user_agent` supplies the site URL when the pairs do not. When a site URL
/// is known, the nonce for this request is issued with `nonces`.
pub fn decode_request(
    kind: ComponentKind,
    pairs: &[(String, String)],
    user_agent: Option<&str>,
    nonces: &NonceIssuer,
) -> RequestContext {
    let mut ctx = RequestContext::new(kind, "", "");
    let mut next_screenshot = 1;

    for (key, value) in pairs {
        let (base, parts) = split_key(key);
        match (base, parts.as_slice()) {
            ("site_url", []) => ctx.site_url = value.trim().to_string(),
            ("plugin", []) if kind == ComponentKind::Plugin => ctx.identifier = value.trim().to_string(),
            ("theme", []) if kind == ComponentKind::Theme => ctx.identifier = value.trim().to_string(),
            ("plugins", [id, field]) if kind == ComponentKind::Plugin && field.eq_ignore_ascii_case("version") => {
                ctx.remote_versions.insert(id.to_string(), value.trim().to_string());
            }
            ("themes", [id, field]) if kind == ComponentKind::Theme && field.eq_ignore_ascii_case("version") => {
                ctx.remote_versions.insert(id.to_string(), value.trim().to_string());
            }
            ("themes", [id]) if kind == ComponentKind::Theme => {
                ctx.remote_versions.insert(id.to_string(), value.trim().to_string());
            }
            ("screenshot_urls", [index]) => {
                let index = if index.is_empty() {
                    next_screenshot
                } else {
                    match index.parse::<u32>() {
                        Ok(n) => n,
                        Err(_) => continue,
                    }
                };
                next_screenshot = next_screenshot.max(index.saturating_add(1));
                ctx.screenshot_urls.insert(index, value.trim().to_string());
            }
            ("banner_urls", [name]) => {
                ctx.banner_urls.insert(name.to_string(), value.trim().to_string());
            }
            _ => {}
        }
    }

    if ctx.site_url.is_empty() {
        if let Some(site_url) = user_agent.and_then(site_url_from_user_agent) {
            ctx.site_url = site_url;
        }
    }

    if !ctx.site_url.is_empty() {
        ctx.nonce = nonces.issue(&ctx.nonce_action());
    }

    ctx
}
