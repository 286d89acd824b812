//! Minimal HTML text extraction for soft-failure detection.
//!
//! This is not a parser. It finds `<title>` and strips tags from `<body>`, which
//! is enough to recognise gateway error pages served with a 2xx status.

/// Elements whose content is never visible text.
const HIDDEN_ELEMENTS: [&str; 3] = ["script", "style", "noscript"];

/// Returns the decoded, whitespace-collapsed contents of the first `<title>`.
pub fn extract_title(html: &str) -> Option<String> {
    let lower = html.to_ascii_lowercase();
    let open = find_tag(&lower, 0, "title")?;
    let start = open + lower[open..].find('>')? + 1;
    let end = start + lower[start..].find("</title")?;
    Some(collapse_whitespace(&decode_entities(&html[start..end])))
}

/// Returns the visible text of the document body (or the whole document when
/// there is no `<body>` tag): tags removed, hidden elements dropped, entities
/// decoded, whitespace collapsed.
pub fn visible_text(html: &str) -> String {
    // ASCII lowercasing keeps byte offsets valid for `html`.
    let lower = html.to_ascii_lowercase();
    let mut i = find_tag(&lower, 0, "body").unwrap_or(0);
    let mut out = String::with_capacity(html.len() / 2);

    while i < html.len() {
        let Some(rel) = html[i..].find('<') else {
            out.push_str(&html[i..]);
            break;
        };
        out.push_str(&html[i..i + rel]);
        i += rel;

        if let Some(name) = HIDDEN_ELEMENTS
            .iter()
            .find(|name| tag_name_at(&lower, i + 1, name))
        {
            let close = format!("</{name}");
            match lower[i..].find(&close) {
                Some(off) => i += off + close.len(),
                None => break,
            }
        }
        match html[i..].find('>') {
            Some(off) => {
                i += off + 1;
                out.push(' ');
            }
            None => break,
        }
    }

    collapse_whitespace(&decode_entities(&out))
}

/// Offset of the first `<name` tag (followed by `>`, `/` or whitespace) at or
/// after `from`.
fn find_tag(lower: &str, from: usize, name: &str) -> Option<usize> {
    let mut pos = from;
    while let Some(rel) = lower[pos..].find('<') {
        let at = pos + rel;
        if tag_name_at(lower, at + 1, name) {
            return Some(at);
        }
        pos = at + 1;
    }
    None
}

fn tag_name_at(lower: &str, at: usize, name: &str) -> bool {
    let Some(rest) = lower.get(at..) else {
        return false;
    };
    rest.starts_with(name)
        && rest[name.len()..]
            .chars()
            .next()
            .map_or(true, |c| c == '>' || c == '/' || c.is_ascii_whitespace())
}

fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
