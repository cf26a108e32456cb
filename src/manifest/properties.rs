//! Java `.properties` parser
//!
//! Handles the subset Maven writes into `pom.properties`:
//! - `#` and `!` comment lines, blank lines
//! - `key=value`, `key: value` and `key value` separators
//! - trailing backslash line continuations
//! - `\t`, `\n`, `\r`, `\uXXXX` and escaped separator characters
//!
//! Format example:
//! ```text
//! #Generated by Maven
//! #Thu Jan 01 00:00:00 UTC 2020
//! version=1.7.30
//! groupId=org.slf4j
//! artifactId=slf4j-api
//! ```

use std::collections::HashMap;

/// Parse properties text into a map. Later keys override earlier ones.
pub fn parse_properties(content: &str) -> HashMap<String, String> {
    let mut properties = HashMap::new();

    for line in logical_lines(content) {
        let (key, value) = split_key_value(&line);
        properties.insert(unescape(key), unescape(value));
    }

    properties
}

/// Join continuation lines and drop blanks and comments
fn logical_lines(content: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut pending: Option<String> = None;

    for raw in content.lines() {
        let trimmed = raw.trim_start();

        let mut current = match pending.take() {
            Some(mut joined) => {
                joined.push_str(trimmed);
                joined
            }
            None => {
                if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                    continue;
                }
                trimmed.to_string()
            }
        };

        if ends_with_continuation(&current) {
            current.pop();
            pending = Some(current);
        } else {
            lines.push(current);
        }
    }

    if let Some(last) = pending {
        lines.push(last);
    }

    lines
}

/// An odd number of trailing backslashes continues the line
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

fn split_key_value(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' | ' ' | '\t' | '\x0c' => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let rest = line[key_end..].trim_start_matches([' ', '\t', '\x0c']);
    let rest = rest
        .strip_prefix(['=', ':'])
        .map_or(rest, |value| value.trim_start_matches([' ', '\t', '\x0c']));

    (key, rest)
}

fn unescape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => result.push('\t'),
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some('f') => result.push('\x0c'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => result.push(decoded),
                    None => {
                        result.push('u');
                        result.push_str(&hex);
                    }
                }
            }
            Some(other) => result.push(other),
            None => {}
        }
    }

    result
}
