//! Host extraction from stored file URIs.
//!
//! The host is reported exactly as written in the URI: no case folding, no
//! IDNA conversion, and an explicit port is kept even when it is the
//! scheme's default. The URI is only validated, not normalized.

use thiserror::Error;

/// Why a file URI couldn't be split into its parts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("invalid control character in URL")]
    ControlCharacter,

    #[error("missing protocol scheme")]
    MissingScheme,

    #[error("first path segment in URL cannot contain colon")]
    ColonInFirstSegment,

    #[error("invalid userinfo")]
    InvalidUserinfo,

    #[error("missing ']' in host")]
    MissingBracket,

    #[error("invalid port {0:?} after host")]
    InvalidPort(String),

    #[error("invalid character {0:?} in host name")]
    InvalidHostCharacter(char),

    #[error("invalid URL escape {0:?}")]
    InvalidEscape(String),
}

/// Where percent-escapes are being checked; hosts are stricter than paths.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Component {
    Host,
    Zone,
    Other,
}

/// Host (and port, if one is written) of a stored file URI.
///
/// Surrounding whitespace is ignored. URIs without an authority, such as a
/// bare path or an opaque `mailto:` form, have an empty host.
pub fn file_version_host(raw: &str) -> Result<String, HostError> {
    let raw = raw.trim();
    if raw.bytes().any(|b| b < 0x20 || b == 0x7f) {
        return Err(HostError::ControlCharacter);
    }

    let (rest, fragment) = split_once_or_all(raw, '#');
    if let Some(fragment) = fragment {
        unescape(fragment, Component::Other)?;
    }
    if rest.is_empty() || rest == "*" {
        return Ok(String::new());
    }

    let (scheme, rest) = split_scheme(rest)?;
    let (rest, _query) = split_once_or_all(rest, '?');

    if !rest.starts_with('/') {
        if scheme.is_none() {
            let first_segment = rest.split('/').next().unwrap_or_default();
            if first_segment.contains(':') {
                return Err(HostError::ColonInFirstSegment);
            }
        }
        // Opaque (`mailto:x`) or relative path: no authority.
        return Ok(String::new());
    }

    let has_authority =
        rest.starts_with("//") && (scheme.is_some() || !rest.starts_with("///"));
    if !has_authority {
        unescape(rest, Component::Other)?;
        return Ok(String::new());
    }

    let after_slashes = &rest[2..];
    let (authority, path) = match after_slashes.find('/') {
        Some(i) => after_slashes.split_at(i),
        None => (after_slashes, ""),
    };
    let host = parse_authority(authority)?;
    unescape(path, Component::Other)?;
    Ok(host)
}

fn split_once_or_all(s: &str, sep: char) -> (&str, Option<&str>) {
    match s.split_once(sep) {
        Some((head, tail)) => (head, Some(tail)),
        None => (s, None),
    }
}

/// Split off a leading `scheme:`. Returns `None` for the scheme when the
/// text doesn't start with one.
fn split_scheme(s: &str) -> Result<(Option<&str>, &str), HostError> {
    for (i, c) in s.char_indices() {
        match c {
            'a'..='z' | 'A'..='Z' => {}
            '0'..='9' | '+' | '-' | '.' if i > 0 => {}
            ':' if i == 0 => return Err(HostError::MissingScheme),
            ':' => return Ok((Some(&s[..i]), &s[i + 1..])),
            _ => return Ok((None, s)),
        }
    }
    Ok((None, s))
}

fn parse_authority(authority: &str) -> Result<String, HostError> {
    let host = match authority.rfind('@') {
        Some(i) => {
            let userinfo = &authority[..i];
            if !userinfo.chars().all(is_userinfo_char) {
                return Err(HostError::InvalidUserinfo);
            }
            unescape(userinfo, Component::Other)?;
            &authority[i + 1..]
        }
        None => authority,
    };
    parse_host(host)
}

fn is_userinfo_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "-._:~!$&'()*+,;=%@".contains(c)
}

fn parse_host(host: &str) -> Result<String, HostError> {
    if host.starts_with('[') {
        let close = host.rfind(']').ok_or(HostError::MissingBracket)?;
        let port = &host[close + 1..];
        if !is_valid_optional_port(port) {
            return Err(HostError::InvalidPort(port.to_string()));
        }
        // IPv6 zone identifiers are introduced by an escaped '%'.
        return match host[..close].find("%25") {
            Some(zone) => Ok(format!(
                "{}{}{}",
                unescape(&host[..zone], Component::Host)?,
                unescape(&host[zone..close], Component::Zone)?,
                unescape(&host[close..], Component::Host)?,
            )),
            None => unescape(host, Component::Host),
        };
    }

    if let Some(i) = host.rfind(':') {
        let port = &host[i..];
        if !is_valid_optional_port(port) {
            return Err(HostError::InvalidPort(port.to_string()));
        }
    }
    unescape(host, Component::Host)
}

/// Empty, or `:` followed by nothing but digits. The value isn't range
/// checked.
fn is_valid_optional_port(port: &str) -> bool {
    match port.strip_prefix(':') {
        Some(digits) => digits.bytes().all(|b| b.is_ascii_digit()),
        None => port.is_empty(),
    }
}

/// ASCII bytes that may not appear literally in a host.
fn is_forbidden_in_host(b: u8) -> bool {
    !(b.is_ascii_alphanumeric() || b"!$&'()*+,;=:[]<>\"-_.~".contains(&b))
}

/// Decode percent-escapes, rejecting malformed ones. In hosts an escape may
/// only encode a non-ASCII byte (or `%25`), and reserved ASCII characters
/// may not appear unescaped.
fn unescape(s: &str, component: Component) -> Result<String, HostError> {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if b == b'%' {
            let escape = s.get(i..(i + 3).min(s.len())).unwrap_or(&s[i..]);
            let (Some(hi), Some(lo)) = (
                bytes.get(i + 1).and_then(|&h| hex_value(h)),
                bytes.get(i + 2).and_then(|&l| hex_value(l)),
            ) else {
                return Err(HostError::InvalidEscape(escape.to_string()));
            };
            let value = hi << 4 | lo;
            match component {
                Component::Host if hi < 8 && escape != "%25" => {
                    return Err(HostError::InvalidEscape(escape.to_string()));
                }
                Component::Zone
                    if escape != "%25" && value != b' ' && is_forbidden_in_host(value) =>
                {
                    return Err(HostError::InvalidEscape(escape.to_string()));
                }
                _ => {}
            }
            out.push(value);
            i += 3;
            continue;
        }

        if component != Component::Other && b < 0x80 && is_forbidden_in_host(b) {
            return Err(HostError::InvalidHostCharacter(char::from(b)));
        }
        out.push(b);
        i += 1;
    }

    Ok(String::from_utf8_lossy(&out).into_owned())
}

fn hex_value(b: u8) -> Option<u8> {
    char::from(b).to_digit(16).map(|d| d as u8)
}
