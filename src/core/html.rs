// src/core/html.rs
//! Tolerant, case-insensitive tag scanning over raw page text.
//!
//! All lookups lowercase with `to_ascii_lowercase`, which keeps byte offsets
//! identical to the original, so spans found in the lowercase copy index the
//! original text directly.

/// Find the next opening `<tag ...>` at or after `from`.
/// Returns the span of the opening tag itself, `>` included.
pub fn next_open_tag_ci(s: &str, tag: &str, from: usize) -> Option<(usize, usize)> {
    let lc = s.to_ascii_lowercase();
    let needle = join!("<", &tag.to_ascii_lowercase());
    let mut at = from;
    loop {
        let start = lc.get(at..)?.find(&needle)? + at;
        let after = start + needle.len();
        // "<tr" must not match "<track"
        match lc.as_bytes().get(after) {
            Some(b) if b.is_ascii_whitespace() || *b == b'>' || *b == b'/' => {
                let end = s[after..].find('>')? + after + 1;
                return Some((start, end));
            }
            _ => at = after,
        }
    }
}

/// Next `<tag ...>...</tag>` block at or after `from`, as `(start, end)` with
/// `end` just past the closing tag. Nesting of the same tag is not tracked.
pub fn next_tag_block_ci(s: &str, tag: &str, from: usize) -> Option<(usize, usize)> {
    let (start, open_end) = next_open_tag_ci(s, tag, from)?;
    let close = join!("</", &tag.to_ascii_lowercase(), ">");
    let rel = s[open_end..].to_ascii_lowercase().find(&close)?;
    Some((start, open_end + rel + close.len()))
}

/// All `<tag ...>...</tag>` blocks, in document order.
pub fn tag_blocks_ci<'a>(s: &'a str, tag: &str) -> Vec<&'a str> {
    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some((b, e)) = next_tag_block_ci(s, tag, pos) {
        out.push(&s[b..e]);
        pos = e;
    }
    out
}

/// All opening `<tag ...>` tags, in document order. Meant for void elements like `<input>`.
pub fn open_tags_ci<'a>(s: &'a str, tag: &str) -> Vec<&'a str> {
    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some((b, e)) = next_open_tag_ci(s, tag, pos) {
        out.push(&s[b..e]);
        pos = e;
    }
    out
}

/// The opening tag of a block: everything up to and including the first `>`.
pub fn open_tag(block: &str) -> &str {
    match block.find('>') {
        Some(gt) => &block[..=gt],
        None => block,
    }
}

/// Raw markup between the opening tag and the last `<` of the block.
pub fn inner_after_open_tag(block: &str) -> &str {
    if let Some(oe) = block.find('>') {
        if let Some(cs) = block.rfind('<') {
            if cs > oe {
                return &block[oe + 1..cs];
            }
        }
    }
    ""
}

/// Value of attribute `name` inside an opening tag. Quoted (either quote) or bare.
/// The value is returned raw; entities are not decoded.
pub fn attr<'a>(open_tag: &'a str, name: &str) -> Option<&'a str> {
    let lc = open_tag.to_ascii_lowercase();
    let name = name.to_ascii_lowercase();
    let mut at = 0usize;

    while let Some(rel) = lc[at..].find(&name) {
        let pos = at + rel;
        at = pos + name.len();

        let preceded = pos > 0 && lc.as_bytes()[pos - 1].is_ascii_whitespace();
        let rest = open_tag[at..].trim_start();
        if !preceded || !rest.starts_with('=') {
            continue;
        }

        let val = rest[1..].trim_start();
        let (quote, body) = match val.as_bytes().first() {
            Some(b'"') => (Some('"'), &val[1..]),
            Some(b'\'') => (Some('\''), &val[1..]),
            _ => (None, val),
        };
        let end = match quote {
            Some(q) => body.find(q)?,
            None => body
                .find(|c: char| c.is_ascii_whitespace() || c == '>')
                .unwrap_or(body.len()),
        };
        return Some(&body[..end]);
    }
    None
}

/// Whether the `class` attribute lists `class` as one of its words.
pub fn has_class(open_tag: &str, class: &str) -> bool {
    attr(open_tag, "class")
        .map(|v| v.split_ascii_whitespace().any(|c| c == class))
        .unwrap_or(false)
}

/// Opening tag of the `<tag>` whose `id` is exactly `id`.
pub fn find_open_tag_by_id<'a>(doc: &'a str, tag: &str, id: &str) -> Option<&'a str> {
    open_tags_ci(doc, tag)
        .into_iter()
        .find(|t| attr(t, "id") == Some(id))
}

/// Whole `<tag>...</tag>` block whose `id` is exactly `id`.
pub fn find_block_by_id<'a>(doc: &'a str, tag: &str, id: &str) -> Option<&'a str> {
    let mut pos = 0usize;
    while let Some((b, e)) = next_open_tag_ci(doc, tag, pos) {
        if attr(&doc[b..e], "id") == Some(id) {
            let (_, end) = next_tag_block_ci(doc, tag, b)?;
            return Some(&doc[b..end]);
        }
        pos = e;
    }
    None
}

pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    super::sanitize::normalize_ws(&out)
}
