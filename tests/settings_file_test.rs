use analytics_snippet::utils::validation::Validate;
use analytics_snippet::{AnalyticsConfig, RenderContext, TrackingMode, TrackingSnippetBuilder};
use anyhow::Result;
use tempfile::TempDir;

/// 從設定檔與 JSON context 檔案完整 render 一次
#[test]
fn test_render_from_files() -> Result<()> {
    let temp_dir = TempDir::new()?;

    let settings_path = temp_dir.path().join("analytics.toml");
    std::fs::write(
        &settings_path,
        r#"
[google_analytics]
property_id = "UA-123456-7"
tracking_style = "multiple_domains"
domain = "example.com"
site_speed = true
anonymize_ip = true
currency_code = "EUR"

[analytical]
internal_ips = ["10.0.0.1"]
"#,
    )?;

    let context_path = temp_dir.path().join("context.json");
    std::fs::write(
        &context_path,
        r#"{
            "custom_variables": [{"name": "plan", "value": "pro", "scope": "visitor"}],
            "transaction": {"transactionId": "A-1", "total": 19.99, "city": "Amsterdam"},
            "items": [
                {"sku": "SKU-1", "name": "Widget", "category": "tools", "price": "9.99", "quantity": 2}
            ],
            "remote_addr": "203.0.113.5"
        }"#,
    )?;

    let config = AnalyticsConfig::from_file(&settings_path)?;
    config.validate()?;
    assert_eq!(config.tracking_style(), TrackingMode::MultipleDomains);

    let context = RenderContext::from_file(&context_path)?;
    let r = TrackingSnippetBuilder::new(config)?.render(&context)?;

    assert!(r.contains("_gaq.push(['_setDomainName', 'example.com']);"), "{}", r);
    assert!(r.contains("_gaq.push(['_setAllowLinker', true]);"), "{}", r);
    assert!(r.contains("_gaq.push(['_setCustomVar', 1, 'plan', 'pro', 1]);"), "{}", r);
    assert!(
        r.contains("_gaq.push(['_addTrans', 'A-1', '', '19.99', '', '', 'Amsterdam', '', '']);"),
        "{}",
        r
    );
    assert!(
        r.contains("_gaq.push(['_addItem', '', 'SKU-1', 'Widget', 'tools', '9.99', '2']);"),
        "{}",
        r
    );
    assert!(r.contains("_gaq.push(['_set', 'currencyCode', 'EUR']);"), "{}", r);
    assert!(r.contains("_gaq.push(['_trackPageLoadTime']);"), "{}", r);
    assert!(r.contains("_gaq.push (['_gat._anonymizeIp']);"), "{}", r);
    assert!(!r.starts_with("<!--"), "{}", r);

    let internal = context.with_remote_addr("10.0.0.1");
    let config = AnalyticsConfig::from_file(&settings_path)?;
    let r = TrackingSnippetBuilder::new(config)?.render(&internal)?;
    assert!(r.starts_with("<!-- Google Analytics disabled on internal IP address"), "{}", r);

    Ok(())
}

#[test]
fn test_invalid_settings_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let settings_path = temp_dir.path().join("broken.toml");
    std::fs::write(&settings_path, "[google_analytics\nproperty_id = ")?;

    let err = AnalyticsConfig::from_file(&settings_path).unwrap_err();
    assert!(err.is_config_error());
    assert!(err.to_string().contains("TOML parsing error"), "{}", err);
    Ok(())
}

#[test]
fn test_settings_with_bad_domain() -> Result<()> {
    let config = AnalyticsConfig::from_toml_str(
        r#"
[google_analytics]
property_id = "UA-1-2"
tracking_style = 2
domain = "not a domain"
"#,
    )?;
    assert!(config.validate().is_err());
    Ok(())
}
