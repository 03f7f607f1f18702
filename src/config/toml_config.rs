use crate::domain::model::{PropertyId, TrackingMode};
use crate::utils::error::{Result, SnippetError};
use crate::utils::validation::{
    validate_currency_code, validate_domain, validate_ip_addr, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 宿主程式的分析設定，對應 TOML 檔中的 `[google_analytics]` 與 `[analytical]` 表
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default)]
    pub google_analytics: GoogleAnalyticsConfig,
    #[serde(default)]
    pub analytical: SharedConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoogleAnalyticsConfig {
    pub property_id: Option<String>,
    #[serde(default)]
    pub tracking_style: TrackingMode,
    pub domain: Option<String>,
    #[serde(default)]
    pub display_advertising: bool,
    #[serde(default)]
    pub site_speed: bool,
    #[serde(default)]
    pub anonymize_ip: bool,
    pub currency_code: Option<String>,
    pub internal_ips: Option<Vec<String>>,
}

/// 所有分析服務共用的後備設定
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SharedConfig {
    pub domain: Option<String>,
    #[serde(default)]
    pub internal_ips: Vec<String>,
}

impl AnalyticsConfig {
    /// 以程式方式建立，只設定 property id
    pub fn with_property_id(property_id: impl Into<String>) -> Self {
        Self {
            google_analytics: GoogleAnalyticsConfig {
                property_id: Some(property_id.into()),
                ..Default::default()
            },
            analytical: SharedConfig::default(),
        }
    }

    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content)
            .map_err(|e| SnippetError::config(format!("TOML parsing error: {}", e)))
    }

    /// 替換環境變數 (例如 ${GA_PROPERTY_ID})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| SnippetError::config(format!("invalid substitution pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn property_id(&self) -> Result<PropertyId> {
        PropertyId::parse(self.google_analytics.property_id.as_deref())
    }

    pub fn tracking_style(&self) -> TrackingMode {
        self.google_analytics.tracking_style
    }

    /// 服務專屬網域優先，其次是共用網域
    pub fn domain(&self) -> Option<&str> {
        self.google_analytics
            .domain
            .as_deref()
            .filter(|d| !d.is_empty())
            .or_else(|| self.analytical.domain.as_deref().filter(|d| !d.is_empty()))
    }

    /// 服務專屬清單為空時改用共用清單
    pub fn internal_ips(&self) -> &[String] {
        self.google_analytics
            .internal_ips
            .as_deref()
            .filter(|ips| !ips.is_empty())
            .unwrap_or(self.analytical.internal_ips.as_slice())
    }

    pub fn currency_code(&self) -> Option<&str> {
        self.google_analytics
            .currency_code
            .as_deref()
            .filter(|c| !c.is_empty())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        self.property_id()?;

        if let Some(domain) = self.domain() {
            validate_domain("google_analytics.domain", domain)?;
        } else if self.tracking_style() != TrackingMode::SingleDomain {
            tracing::warn!(
                "Tracking style {:?} without a configured domain; every render must supply one",
                self.tracking_style()
            );
        }

        if let Some(code) = self.currency_code() {
            validate_currency_code("google_analytics.currency_code", code)?;
        }

        for ip in self.internal_ips() {
            validate_ip_addr("internal_ips", ip)?;
        }

        Ok(())
    }
}

impl Validate for AnalyticsConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

impl std::fmt::Display for AnalyticsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({:?})",
            self.google_analytics.property_id.as_deref().unwrap_or("<unset>"),
            self.tracking_style()
        )
    }
}
