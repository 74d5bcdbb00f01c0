use std::sync::LazyLock;

use chrono::prelude::*;
use regex::Regex;

use crate::error::RegistryError;

pub const CPF_DIGITS: usize = 11;
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

static NON_DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^0-9]").expect("valid regex"));

/// Keeps only the digits, which must come out to exactly 11.
pub fn normalize_national_id(input: &str) -> Result<String, RegistryError> {
    let digits = NON_DIGIT.replace_all(input, "").into_owned();

    if digits.len() != CPF_DIGITS {
        return Err(RegistryError::InvalidIdentifier);
    }

    Ok(digits)
}

pub fn timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}
