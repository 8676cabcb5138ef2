use sha2::{Digest, Sha256};

const MAX_STEM_CHARS: usize = 60;

/// Portable, deterministic filename: `{sanitized_title}--{short_hash(key)}.{extension}`.
///
/// The hash keeps two alerts with the same headline apart; the title keeps the
/// file recognisable.
pub fn deterministic_filename(title: &str, key: &str, extension: &str) -> String {
    format!("{}--{}.{}", sanitize_title(title), short_hash(key), extension)
}

fn sanitize_title(input: &str) -> String {
    let mut cleaned = String::with_capacity(input.len());
    for c in input.chars() {
        let c = if is_forbidden(c) || c.is_whitespace() {
            '_'
        } else {
            c
        };
        if c == '_' && cleaned.ends_with('_') {
            continue;
        }
        cleaned.push(c);
    }

    let trimmed = cleaned.trim_matches(&['_', '.'][..]);
    let mut stem: String = trimmed.chars().take(MAX_STEM_CHARS).collect();
    if stem.is_empty() {
        stem = "alert".to_string();
    }
    if is_reserved_device_name(&stem) {
        stem.push('_');
    }
    stem
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

fn is_reserved_device_name(name: &str) -> bool {
    const RESERVED: &[&str] = &["CON", "PRN", "AUX", "NUL"];
    let upper = name.to_ascii_uppercase();
    RESERVED.contains(&upper.as_str())
        || ((upper.starts_with("COM") || upper.starts_with("LPT"))
            && upper.len() == 4
            && upper.as_bytes()[3].is_ascii_digit())
}

fn short_hash(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    digest.iter().take(4).map(|byte| format!("{byte:02x}")).collect()
}
