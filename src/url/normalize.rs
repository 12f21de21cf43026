use crate::UrlError;
use std::fmt;
use url::{ParseError, Position, Url};

/// Scheme applied to targets that do not carry one
pub const DEFAULT_SCHEME: &str = "http";

/// An absolute URL produced from a raw target
///
/// The wrapped [`Url`] always has a non-empty scheme. When the target did not
/// spell out a path, the root path the URL grammar inserts for special schemes
/// is left out of the string form, so `example.com` renders as
/// `http://example.com` rather than `http://example.com/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedUrl {
    url: Url,
    elide_root_path: bool,
}

impl NormalizedUrl {
    fn new(url: Url, source: &str) -> Self {
        let elide_root_path = url.path() == "/" && !has_explicit_path(source);
        Self {
            url,
            elide_root_path,
        }
    }

    /// Returns the parsed URL used for the request
    pub fn as_url(&self) -> &Url {
        &self.url
    }

    /// Returns the URL scheme
    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }
}

impl fmt::Display for NormalizedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.elide_root_path {
            write!(
                f,
                "{}{}",
                &self.url[..Position::BeforePath],
                &self.url[Position::AfterPath..]
            )
        } else {
            f.write_str(self.url.as_str())
        }
    }
}

/// Normalizes a raw target into an absolute URL
///
/// # Normalization Steps
///
/// 1. Parse the target as a URL; targets with a scheme are accepted as they are
/// 2. A target without a scheme or a leading `//` whose first path segment
///    holds a colon (for example `127.0.0.1:80`) is rejected, the grammar
///    cannot tell a host:port from a scheme there
/// 3. Otherwise the target gets the `http` scheme (in place of a leading
///    `//`, if any) and is parsed again
///
/// No further repair of the target is attempted.
///
/// # Arguments
///
/// * `raw` - The target string to normalize
///
/// # Returns
///
/// * `Ok(NormalizedUrl)` - Absolute URL with a scheme
/// * `Err(UrlError)` - The target is not a URL
///
/// # Examples
///
/// ```
/// use hashfetch::url::normalize_url;
///
/// let url = normalize_url("example.com").unwrap();
/// assert_eq!(url.to_string(), "http://example.com");
/// ```
pub fn normalize_url(raw: &str) -> Result<NormalizedUrl, UrlError> {
    match Url::parse(raw) {
        Ok(url) => Ok(NormalizedUrl::new(url, raw)),
        Err(ParseError::RelativeUrlWithoutBase) => {
            // A leading `//` already introduces the authority
            let authority_and_path = match raw.strip_prefix("//") {
                Some(rest) => rest,
                None if first_segment_has_colon(raw) => {
                    return Err(UrlError::ColonInFirstSegment(raw.to_string()));
                }
                None => raw,
            };

            let with_scheme = format!("{}://{}", DEFAULT_SCHEME, authority_and_path);
            let url = Url::parse(&with_scheme).map_err(|source| UrlError::Parse {
                url: raw.to_string(),
                source,
            })?;

            Ok(NormalizedUrl::new(url, &with_scheme))
        }
        Err(source) => Err(UrlError::Parse {
            url: raw.to_string(),
            source,
        }),
    }
}

/// Checks whether the text after the authority starts with a path separator
fn has_explicit_path(source: &str) -> bool {
    let rest = source
        .split_once("://")
        .map_or(source, |(_, after_scheme)| after_scheme);

    match rest.find(|c: char| matches!(c, '/' | '?' | '#')) {
        Some(idx) => rest[idx..].starts_with('/'),
        None => false,
    }
}

fn first_segment_has_colon(raw: &str) -> bool {
    raw.split(|c: char| matches!(c, '/' | '?' | '#'))
        .next()
        .is_some_and(|segment| segment.contains(':'))
}
