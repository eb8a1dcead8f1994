//! Normalization of string-typed switches.
//!
//! Feature switches arrive from CI matrices as loosely formatted strings.
//! They are turned into `bool` here, at the boundary, so the resolver never
//! sees a string.

use crate::util::errors::{Error, Result};

const TRUTHY: [&str; 4] = ["true", "1", "yes", "on"];
const FALSY: [&str; 4] = ["false", "0", "no", "off"];

/// Parse a switch value case-insensitively.
///
/// `what` names the option in the error message.
pub fn parse_switch(what: &'static str, value: &str) -> Result<bool> {
    let normalized = value.trim().to_ascii_lowercase();

    if TRUTHY.contains(&normalized.as_str()) {
        Ok(true)
    } else if FALSY.contains(&normalized.as_str()) {
        Ok(false)
    } else {
        Err(Error::invalid(
            what,
            value,
            "true or false (also accepted: 1/0, yes/no, on/off)",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_switch_case_insensitive() {
        assert!(parse_switch("flag", "TRUE").unwrap());
        assert!(parse_switch("flag", "True").unwrap());
        assert!(parse_switch("flag", "on").unwrap());
        assert!(parse_switch("flag", "1").unwrap());
        assert!(!parse_switch("flag", "false").unwrap());
        assert!(!parse_switch("flag", "OFF").unwrap());
        assert!(!parse_switch("flag", " no ").unwrap());
    }

    #[test]
    fn test_parse_switch_rejects_garbage() {
        let err = parse_switch("--enable-tzdb", "maybe").unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("--enable-tzdb"));
        assert!(parse_switch("flag", "").is_err());
    }
}
