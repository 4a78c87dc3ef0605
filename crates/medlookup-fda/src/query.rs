//! openFDA query-string construction
//!
//! Terms are embedded in Lucene-style search expressions, so quotes and
//! backslashes must be escaped before transmission. Unquoted prefix terms
//! additionally escape whitespace and every query-syntax operator.

/// Characters with query-syntax meaning outside a quoted phrase
const SYNTAX_CHARS: &[char] = &[
    '\\', '"', '+', '-', '!', '(', ')', '{', '}', '[', ']', '^', '~', '*', '?', ':', '/', '&',
    '|',
];

fn collapse_whitespace(term: &str) -> String {
    term.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Escape a term for embedding inside a quoted openFDA phrase
///
/// Backslashes and double quotes are backslash-escaped. Surrounding
/// whitespace is trimmed and interior runs collapse to one space.
pub fn escape_term(term: &str) -> String {
    let collapsed = collapse_whitespace(term);
    let mut escaped = String::with_capacity(collapsed.len());
    for c in collapsed.chars() {
        if c == '\\' || c == '"' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Escape a term for use as a single unquoted prefix token
///
/// Whitespace and query operators are backslash-escaped so the whole term
/// stays bound to the field it follows.
pub fn escape_prefix_term(term: &str) -> String {
    let collapsed = collapse_whitespace(term);
    let mut escaped = String::with_capacity(collapsed.len() * 2);
    for c in collapsed.chars() {
        if c == ' ' || SYNTAX_CHARS.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Exact generic-name match
pub fn lookup_query(generic_name: &str) -> String {
    format!("openfda.generic_name:\"{}\"", escape_term(generic_name))
}

/// Prefix match over generic and brand names
pub fn search_query(term: &str) -> String {
    let escaped = escape_prefix_term(term);
    format!(
        "openfda.generic_name:{}* OR openfda.brand_name:{}*",
        escaped, escaped
    )
}
