//! Masking helpers for identities written to logs

/// Mask an email address for logging (e.g., j***n@example.com)
///
/// Anything without an `@` is treated as an opaque identity and only its
/// last four characters are kept.
pub fn mask_email(identity: &str) -> String {
    match identity.split_once('@') {
        Some((local, domain)) => {
            let chars: Vec<char> = local.chars().collect();
            let masked_local = match chars.len() {
                0 => String::from("***"),
                1 | 2 => format!("{}***", chars[0]),
                n => format!("{}***{}", chars[0], chars[n - 1]),
            };
            format!("{}@{}", masked_local, domain)
        }
        None => mask_identity(identity),
    }
}

/// Mask an opaque identity, keeping only the last four characters
pub fn mask_identity(identity: &str) -> String {
    let chars: Vec<char> = identity.chars().collect();
    if chars.len() <= 4 {
        "****".to_string()
    } else {
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("***{}", tail)
    }
}
