use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use thiserror::Error;

use crate::{BoardConfig, UrlMode};

/// Everything `encodeURI` escapes in the ASCII range. Reserved characters
/// (`;,/?:@&=+$#`) and the unreserved marks stay literal; `%` is always escaped.
const URI_ESCAPED: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestUrlError {
    #[error("invalid request url {url:?}: {message}")]
    Invalid { url: String, message: String },
}

/// Builds the fully parameterized arrivals URL.
///
/// Placeholders are substituted first; the result is then encoded exactly once.
pub fn build_request_url(config: &BoardConfig) -> Result<String, RequestUrlError> {
    let raw = match config.url_mode {
        UrlMode::Templated => config
            .api_base
            .replace("{atcocode}", &config.atcocode)
            .replace("{app_id}", &config.app_id)
            .replace("{app_key}", &config.app_key),
        UrlMode::QueryParams => {
            let path = config
                .api_base
                .split('?')
                .next()
                .unwrap_or(&config.api_base);
            format!(
                "{}{}",
                path.replace("{atcocode}", &config.atcocode),
                query_params(config)
            )
        }
    };
    encode_once(&raw)
}

fn query_params(config: &BoardConfig) -> String {
    format!(
        "?app_id={}&app_key={}&limit={}&group={}&nextbuses={}",
        config.app_id,
        config.app_key,
        config.limit,
        yes_no(config.group),
        yes_no(config.next_buses)
    )
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn encode_once(raw: &str) -> Result<String, RequestUrlError> {
    let encoded = utf8_percent_encode(raw, URI_ESCAPED).to_string();
    // Parse only to validate; the serialized form would normalize dot segments.
    url::Url::parse(&encoded).map_err(|err| RequestUrlError::Invalid {
        url: raw.to_string(),
        message: err.to_string(),
    })?;
    Ok(encoded)
}
