//! Testing notice for pending updates
//!
//! Whitelisted testers see a caution banner above every section, with links
//! for reporting problems to the endpoint's notification targets.

use crate::models::{Header, NotificationTargets};
use crate::parser::html_escape;
use url::form_urlencoded::byte_serialize;

/// Percent-encode for a `mailto:` query (spaces as `%20`, not `+`)
fn mail_encode(value: &str) -> String {
    byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Build a `mailto:` URL addressed to the first email, copying the rest
pub fn feedback_mailto(targets: &NotificationTargets, header: &Header) -> Option<String> {
    let (first, rest) = targets.emails.split_first()?;
    let name = header.name();
    let version = header.version();

    let subject = format!("Pending Update Report: {} v{}", name, version);
    let body = format!(
        "We greatly appreciate your help and feedback in testing the update to {} version {} - thanks!\r\n\r\n",
        name, version
    );

    let mut url = format!(
        "mailto:{}?subject={}&body={}",
        first,
        mail_encode(&subject),
        mail_encode(&body)
    );
    if !rest.is_empty() {
        url.push_str("&cc=");
        url.push_str(&mail_encode(&rest.join(",")));
    }
    Some(url)
}

/// Render the caution banner shown to testers of a pending update
pub fn testing_notice(targets: &NotificationTargets, header: &Header) -> String {
    let caution =
        "<strong>Caution</strong>: This update is currently undergoing testing &#8211; it is not yet intended for production.";

    let mail = feedback_mailto(targets, header)
        .map(|url| format!("<a href=\"{}\">send an email</a>", html_escape(&url)));
    let report = targets
        .urls
        .first()
        .map(|url| format!("<a href=\"{}\">report it here</a>", html_escape(url)));

    let feedback = match (mail, report) {
        (Some(mail), Some(report)) => {
            format!(" If you experience any issues, please {} or {}.", mail, report)
        }
        (Some(link), None) | (None, Some(link)) => {
            format!(" If you experience any issues, please {}.", link)
        }
        (None, None) => String::new(),
    };

    format!(
        "<div class=\"plugin_testing_notice\"><p><span>{}{}</span></p></div>",
        caution, feedback
    )
}
