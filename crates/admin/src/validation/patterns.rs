//! Compiled patterns shared by the form schemas.

use std::sync::LazyLock;

use regex::Regex;

/// Letters, digits and underscores only.
pub static USERNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("Invalid regex"));

/// Digits, `+`, `-`, whitespace and parentheses.
pub static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9+\-\s()]+$").expect("Invalid regex"));

/// Digits and hyphens.
pub static ZIP_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9-]+$").expect("Invalid regex"));

pub static HAS_LOWERCASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z]").expect("Invalid regex"));

pub static HAS_UPPERCASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]").expect("Invalid regex"));

pub static HAS_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]").expect("Invalid regex"));
