// src/robots/policy.rs
// =============================================================================
// Parses robots.txt files and answers "may the wildcard agent fetch this?"
//
// We only care about groups addressed to `User-agent: *`. Rules from other
// agents' groups are ignored entirely.
//
// Matching follows the classic exclusion-rules behaviour:
// - Rules are checked in file order, the first match decides
// - A rule matches when its path is a prefix of the URL's path (+ query)
// - `*` inside a rule matches any run of characters, a trailing `$`
//   anchors the rule to the end of the path
// - No matching rule means the URL is allowed
//
// Rules and URL paths are compared in one canonical form: non-ASCII is
// percent-encoded, escapes of unreserved characters are decoded (%7E -> ~),
// and the remaining escapes use upper-case hex.
// =============================================================================

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use url::Url;

// Characters url encodes in a path. Non-ASCII is always encoded.
const PATH_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}');

// What a host's robots.txt lets the wildcard agent do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RobotsPolicy {
    /// No usable policy (e.g. robots.txt is 404): everything is allowed
    AllowAll,
    /// Access to the policy itself was refused (401/403): nothing is allowed
    DisallowAll,
    /// Ordered rules for `User-agent: *`
    Rules(Vec<Rule>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub pattern: String,
    pub allow: bool,
}

impl Rule {
    fn new(pattern: &str, allow: bool) -> Self {
        // "Disallow:" with nothing after it means "allow everything"
        let allow = allow || pattern.is_empty();
        Self {
            pattern: normalize(pattern),
            allow,
        }
    }

    fn matches(&self, target: &str) -> bool {
        pattern_matches(&self.pattern, target)
    }
}

impl RobotsPolicy {
    // Parses the text of a robots.txt file
    //
    // Never fails: lines we don't understand are skipped.
    pub fn parse(content: &str) -> Self {
        let mut rules = Vec::new();

        // Does the group we're in apply to `*`?
        let mut in_wildcard_group = false;
        // Have we seen an Allow/Disallow line in the current group? A
        // User-agent line after that starts a new group.
        let mut group_has_rules = false;

        for raw_line in content.lines() {
            if raw_line.trim().is_empty() {
                // Blank line ends the current group
                in_wildcard_group = false;
                group_has_rules = false;
                continue;
            }

            let line = strip_comment(raw_line).trim();
            let Some((field, value)) = line.split_once(':') else {
                continue;
            };
            let field = field.trim().to_ascii_lowercase();
            let value = value.trim();

            match field.as_str() {
                "user-agent" => {
                    if group_has_rules {
                        in_wildcard_group = false;
                        group_has_rules = false;
                    }
                    if value == "*" {
                        in_wildcard_group = true;
                    }
                }
                "allow" | "disallow" => {
                    group_has_rules = true;
                    if in_wildcard_group {
                        rules.push(Rule::new(value, field == "allow"));
                    }
                }
                _ => {}
            }
        }

        RobotsPolicy::Rules(rules)
    }

    // Decides whether the wildcard agent may fetch `url`
    pub fn allows(&self, url: &Url) -> bool {
        match self {
            RobotsPolicy::AllowAll => true,
            RobotsPolicy::DisallowAll => false,
            RobotsPolicy::Rules(rules) => {
                let target = match url.query() {
                    Some(query) => normalize(&format!("{}?{}", url.path(), query)),
                    None => normalize(url.path()),
                };

                rules
                    .iter()
                    .find(|rule| rule.matches(&target))
                    .map_or(true, |rule| rule.allow)
            }
        }
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(index) => &line[..index],
        None => line,
    }
}

// Brings a rule or a URL path into canonical percent-encoded form
fn normalize(raw: &str) -> String {
    let encoded = utf8_percent_encode(raw, PATH_ENCODE_SET).to_string();
    let bytes = encoded.as_bytes();

    let mut out = String::with_capacity(encoded.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                let decoded = hi * 16 + lo;
                if is_unreserved(decoded) {
                    out.push(char::from(decoded));
                } else {
                    out.push_str(&format!("%{:02X}", decoded));
                }
                i += 3;
                continue;
            }
        }
        out.push(char::from(bytes[i]));
        i += 1;
    }

    out
}

fn hex_value(byte: u8) -> Option<u8> {
    char::from(byte).to_digit(16).map(|d| d as u8)
}

fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~')
}

// Prefix match with `*` wildcards and an optional `$` end anchor
fn pattern_matches(pattern: &str, target: &str) -> bool {
    let (pattern, anchored) = match pattern.strip_suffix('$') {
        Some(stripped) => (stripped, true),
        None => (pattern, false),
    };

    let mut pieces = pattern.split('*');
    let first = pieces.next().unwrap_or("");
    let Some(mut rest) = target.strip_prefix(first) else {
        return false;
    };

    let pieces: Vec<&str> = pieces.collect();
    if pieces.is_empty() {
        return !anchored || rest.is_empty();
    }

    for (i, piece) in pieces.iter().enumerate() {
        if anchored && i == pieces.len() - 1 {
            return rest.ends_with(piece);
        }
        match rest.find(piece) {
            Some(pos) => rest = &rest[pos + piece.len()..],
            None => return false,
        }
    }

    true
}
