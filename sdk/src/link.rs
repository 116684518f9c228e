//! RFC 8288 `Link` header parsing for cursor pagination.

use url::Url;

/// One link-value: a target and its relation types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkValue {
    pub target: String,
    pub rels: Vec<String>,
}

impl LinkValue {
    /// True when `rel` is one of this link's relation types.
    pub fn has_rel(&self, rel: &str) -> bool {
        self.rels.iter().any(|r| r.eq_ignore_ascii_case(rel))
    }
}

/// Parses a `Link` header value.
///
/// `<https://x/api/v1/users?after=abc>; rel="next", <...>; rel="self"`
///
/// Malformed link-values are skipped.
pub fn parse_link_header(value: &str) -> Vec<LinkValue> {
    let mut links = Vec::new();
    let mut rest = value;

    while let Some(open) = rest.find('<') {
        let after_open = &rest[open + 1..];
        let Some(close) = after_open.find('>') else {
            break;
        };
        let target = after_open[..close].trim().to_string();
        let params_and_rest = &after_open[close + 1..];

        // Params run until the next link-value.
        let end = params_and_rest.find('<').unwrap_or(params_and_rest.len());
        let params = &params_and_rest[..end];
        rest = &params_and_rest[end..];

        let rels = params
            .split(';')
            .filter_map(|p| {
                let (key, val) = p.split_once('=')?;
                key.trim()
                    .eq_ignore_ascii_case("rel")
                    .then(|| val.trim().trim_end_matches(',').trim().trim_matches('"'))
            })
            .flat_map(|v| v.split_whitespace().map(str::to_string).collect::<Vec<_>>())
            .collect();

        links.push(LinkValue { target, rels });
    }

    links
}

/// The `rel="next"` target among `values`, resolved against `base`.
pub fn next_link<'a>(values: impl IntoIterator<Item = &'a str>, base: &Url) -> Option<Url> {
    values
        .into_iter()
        .flat_map(parse_link_header)
        .find(|l| l.has_rel("next"))
        .and_then(|l| base.join(&l.target).ok())
}
