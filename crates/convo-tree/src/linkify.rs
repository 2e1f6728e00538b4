//! First-URL extraction for tweet text.

use std::sync::OnceLock;

use regex::Regex;

const URL_PATTERN: &str = r"(https?://(www\.)?[-a-zA-Z0-9@:%._\+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}\b([-a-zA-Z0-9()@:%_\+.~#?&/=]*))";

fn url_regex() -> Option<&'static Regex> {
    static URL: OnceLock<Option<Regex>> = OnceLock::new();
    URL.get_or_init(|| match Regex::new(URL_PATTERN) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::error!(error = %e, "URL pattern failed to compile; links disabled");
            None
        }
    })
    .as_ref()
}

/// Text split into its plain part and at most one link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Linkified {
    /// The input with the first URL removed.
    pub text: String,
    pub url: Option<String>,
}

/// Pull the first `http(s)://` URL out of `text`.
///
/// Only the first match is special; later URLs stay in the plain text.
/// Surrounding punctuation is not trimmed.
pub fn extract_first_url(text: &str) -> Linkified {
    let found = url_regex().and_then(|re| re.find(text));
    match found {
        Some(m) => {
            let mut rest = String::with_capacity(text.len() - m.len());
            rest.push_str(&text[..m.start()]);
            rest.push_str(&text[m.end()..]);
            Linkified {
                text: rest,
                url: Some(m.as_str().to_string()),
            }
        }
        None => Linkified {
            text: text.to_string(),
            url: None,
        },
    }
}
