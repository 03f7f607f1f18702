use crate::utils::error::{Result, SnippetError};
use regex::Regex;
use std::net::IpAddr;
use url::Host;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 必填設定：缺少時回傳 `<NAME> setting: not found`
pub fn validate_required_setting<'a>(setting: &str, value: Option<&'a str>) -> Result<&'a str> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(SnippetError::config(format!("{} setting: not found", setting))),
    }
}

/// 必填設定且必須符合正規表達式
pub fn validate_setting_pattern<'a>(
    setting: &str,
    value: Option<&'a str>,
    pattern: &str,
    reason: &str,
) -> Result<&'a str> {
    let value = validate_required_setting(setting, value)?;
    let re = Regex::new(pattern).map_err(|e| {
        SnippetError::config(format!("{} setting: invalid pattern: {}", setting, e))
    })?;
    if !re.is_match(value) {
        return Err(SnippetError::config(format!("{} setting: {}", setting, reason)));
    }
    Ok(value)
}

pub fn validate_domain(field_name: &str, domain: &str) -> Result<()> {
    // '.example.com' 形式在 GA 中代表涵蓋所有子網域
    let host = domain.strip_prefix('.').unwrap_or(domain);
    match Host::parse(host) {
        Ok(Host::Domain(_)) => Ok(()),
        Ok(_) => Err(SnippetError::config(format!(
            "{}: '{}' is an IP address, expected a domain name",
            field_name, domain
        ))),
        Err(e) => Err(SnippetError::config(format!(
            "{}: invalid domain name '{}': {}",
            field_name, domain, e
        ))),
    }
}

pub fn validate_ip_addr(field_name: &str, value: &str) -> Result<IpAddr> {
    value.trim().parse::<IpAddr>().map_err(|e| {
        SnippetError::config(format!("{}: invalid IP address '{}': {}", field_name, value, e))
    })
}

pub fn validate_currency_code(field_name: &str, code: &str) -> Result<()> {
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(SnippetError::config(format!(
            "{}: '{}' must be a three-letter ISO 4217 code",
            field_name, code
        )));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(SnippetError::config(format!(
            "{}: value {} must be between {} and {}",
            field_name, value, min, max
        )));
    }
    Ok(())
}
