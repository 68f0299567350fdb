use std::collections::HashMap;

use anyhow::{Result, anyhow};
use isolang::Language;
use once_cell::sync::Lazy;

/// Language code helpers for the `lang` attribute of Typecraft texts.
///
/// Typecraft stores ISO 639-3 codes (`kri`, `nob`, `und`). Input may also
/// use ISO 639-1 (`en`) or the bibliographic ISO 639-2/B variants (`ger`),
/// which are normalized to their 639-3 form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-3 (3-letter) code, which includes every ISO 639-2/T code
    Part3,
    /// ISO 639-2/B (3-letter bibliographic) code
    Part2B,
    /// Reserved code without a language: und, mul, zxx, mis
    Special,
}

// Reserved ISO 639-2 codes Typecraft uses for undetermined or mixed content
const SPECIAL_CODES: [&str; 4] = ["und", "mul", "zxx", "mis"];

// ISO 639-2/B codes that differ from their 639-2/T (= 639-3) counterpart
static BIBLIOGRAPHIC_CODES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("alb", "sqi"),
        ("arm", "hye"),
        ("baq", "eus"),
        ("bur", "mya"),
        ("chi", "zho"),
        ("cze", "ces"),
        ("dut", "nld"),
        ("fre", "fra"),
        ("geo", "kat"),
        ("ger", "deu"),
        ("gre", "ell"),
        ("ice", "isl"),
        ("mac", "mkd"),
        ("mao", "mri"),
        ("may", "msa"),
        ("per", "fas"),
        ("rum", "ron"),
        ("slo", "slk"),
        ("tib", "bod"),
        ("wel", "cym"),
    ])
});

/// Classifies `code`, failing when it is not a known language code
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    let code = code.trim().to_lowercase();

    match code.len() {
        2 if Language::from_639_1(&code).is_some() => Ok(LanguageCodeType::Part1),
        3 if SPECIAL_CODES.contains(&code.as_str()) => Ok(LanguageCodeType::Special),
        3 if Language::from_639_3(&code).is_some() => Ok(LanguageCodeType::Part3),
        3 if BIBLIOGRAPHIC_CODES.contains_key(code.as_str()) => Ok(LanguageCodeType::Part2B),
        _ => Err(anyhow!("Invalid language code: {}", code)),
    }
}

/// Normalizes a language code to its ISO 639-3 form (`en` → `eng`, `ger` → `deu`).
pub fn normalize_to_part3(code: &str) -> Result<String> {
    let lowered = code.trim().to_lowercase();

    match validate_language_code(&lowered)? {
        LanguageCodeType::Part1 => Language::from_639_1(&lowered)
            .map(|lang| lang.to_639_3().to_string())
            .ok_or_else(|| anyhow!("Cannot normalize language code: {}", code)),
        LanguageCodeType::Part2B => BIBLIOGRAPHIC_CODES
            .get(lowered.as_str())
            .map(|part3| part3.to_string())
            .ok_or_else(|| anyhow!("Cannot normalize language code: {}", code)),
        LanguageCodeType::Part3 | LanguageCodeType::Special => Ok(lowered),
    }
}

/// Check if two language codes represent the same language
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (normalize_to_part3(code1), normalize_to_part3(code2)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// English name of the language (`"nob"` → `"Norwegian Bokmål"`)
pub fn get_language_name(code: &str) -> Result<String> {
    let part3 = normalize_to_part3(code)?;
    match part3.as_str() {
        "und" => return Ok("Undetermined".to_string()),
        "mul" => return Ok("Multiple languages".to_string()),
        "zxx" => return Ok("No linguistic content".to_string()),
        "mis" => return Ok("Uncoded languages".to_string()),
        _ => {}
    }
    let lang = Language::from_639_3(&part3)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", part3))?;
    Ok(lang.to_name().to_string())
}
