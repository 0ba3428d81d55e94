//! Path and byte helpers

/// Simple glob pattern matching (supports * and ?)
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();
    glob_match_chars(&pattern, &text)
}

fn glob_match_chars(pattern: &[char], text: &[char]) -> bool {
    match pattern.split_first() {
        None => text.is_empty(),
        Some(('*', rest)) => {
            if rest.is_empty() {
                return true; // trailing * matches everything
            }
            (0..=text.len()).any(|skip| glob_match_chars(rest, &text[skip..]))
        }
        Some(('?', rest)) => !text.is_empty() && glob_match_chars(rest, &text[1..]),
        Some((c, rest)) => text.first() == Some(c) && glob_match_chars(rest, &text[1..]),
    }
}

/// Strip trailing Unicode whitespace. Stops at the first non-space char or invalid UTF-8.
pub fn trim_space_end(bytes: &[u8]) -> &[u8] {
    let mut end = 0;
    let mut pos = 0;
    for chunk in bytes.utf8_chunks() {
        let valid = chunk.valid();
        let kept = valid.trim_end().len();
        if kept > 0 {
            end = pos + kept;
        }
        pos += valid.len();
        if !chunk.invalid().is_empty() {
            pos += chunk.invalid().len();
            end = pos;
        }
    }
    &bytes[..end]
}

/// Strip leading and trailing Unicode whitespace, stopping at invalid UTF-8 on either side.
pub fn trim_space(bytes: &[u8]) -> &[u8] {
    let mut start = 0;
    for chunk in bytes.utf8_chunks() {
        let valid = chunk.valid();
        let rest = valid.trim_start();
        start += valid.len() - rest.len();
        if !rest.is_empty() || !chunk.invalid().is_empty() {
            break;
        }
    }
    trim_space_end(&bytes[start..])
}

/// First non-blank line of a diagnostic stream, whitespace-trimmed. Multi-line tool
/// output is cut down to this so user-facing errors stay one line.
pub fn first_line(diagnostic: &[u8]) -> String {
    diagnostic
        .split(|&b| b == b'\n')
        .map(trim_space)
        .find(|line| !line.is_empty())
        .map(|line| String::from_utf8_lossy(line).into_owned())
        .unwrap_or_default()
}
