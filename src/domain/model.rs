use crate::utils::error::Result;
use crate::utils::validation::{validate_range, validate_setting_pattern};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::Path;

pub const PROPERTY_ID_SETTING: &str = "GOOGLE_ANALYTICS_PROPERTY_ID";
const PROPERTY_ID_PATTERN: &str = r"^UA-\d+-\d+$";

/// 自訂變數可用的 slot 數量 (ga.js 限制 1..=5)
pub const CUSTOM_VARIABLE_SLOTS: usize = 5;

/// GA 網站資源 ID，格式為 `UA-XXXXXX-Y`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyId(String);

impl PropertyId {
    pub fn parse(value: Option<&str>) -> Result<Self> {
        let value = validate_setting_pattern(
            PROPERTY_ID_SETTING,
            value,
            PROPERTY_ID_PATTERN,
            "must be a string looking like 'UA-XXXXXX-Y'",
        )?;
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 設定檔中列舉值可以寫成數字或名稱
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CodeOrName {
    Code(u8),
    Name(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "CodeOrName", into = "u8")]
pub enum TrackingMode {
    #[default]
    SingleDomain,
    MultipleSubdomains,
    MultipleDomains,
}

impl TryFrom<CodeOrName> for TrackingMode {
    type Error = String;

    fn try_from(raw: CodeOrName) -> std::result::Result<Self, Self::Error> {
        match raw {
            CodeOrName::Code(1) => Ok(Self::SingleDomain),
            CodeOrName::Code(2) => Ok(Self::MultipleSubdomains),
            CodeOrName::Code(3) => Ok(Self::MultipleDomains),
            CodeOrName::Name(name) => match name.as_str() {
                "single_domain" => Ok(Self::SingleDomain),
                "multiple_subdomains" => Ok(Self::MultipleSubdomains),
                "multiple_domains" => Ok(Self::MultipleDomains),
                other => Err(format!("unknown tracking style '{}'", other)),
            },
            CodeOrName::Code(other) => Err(format!("unknown tracking style {}", other)),
        }
    }
}

impl From<TrackingMode> for u8 {
    fn from(mode: TrackingMode) -> Self {
        match mode {
            TrackingMode::SingleDomain => 1,
            TrackingMode::MultipleSubdomains => 2,
            TrackingMode::MultipleDomains => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "CodeOrName", into = "u8")]
pub enum Scope {
    Visitor,
    Session,
    #[default]
    Page,
}

impl Scope {
    pub fn code(self) -> u8 {
        self.into()
    }
}

impl TryFrom<CodeOrName> for Scope {
    type Error = String;

    fn try_from(raw: CodeOrName) -> std::result::Result<Self, Self::Error> {
        match raw {
            CodeOrName::Code(1) => Ok(Self::Visitor),
            CodeOrName::Code(2) => Ok(Self::Session),
            CodeOrName::Code(3) => Ok(Self::Page),
            CodeOrName::Name(name) => match name.as_str() {
                "visitor" => Ok(Self::Visitor),
                "session" => Ok(Self::Session),
                "page" => Ok(Self::Page),
                other => Err(format!("unknown custom variable scope '{}'", other)),
            },
            CodeOrName::Code(other) => Err(format!("unknown custom variable scope {}", other)),
        }
    }
}

impl From<Scope> for u8 {
    fn from(scope: Scope) -> Self {
        match scope {
            Scope::Visitor => 1,
            Scope::Session => 2,
            Scope::Page => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomVariable {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub scope: Scope,
}

impl CustomVariable {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            scope: Scope::default(),
        }
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }
}

/// 金額、數量等欄位可以是字串或 JSON 數字，統一轉成字串
#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

fn de_opt_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<TextOrNumber> = Option::deserialize(deserializer)?;
    Ok(raw.map(|v| match v {
        TextOrNumber::Text(s) => s,
        TextOrNumber::Number(n) => n.to_string(),
    }))
}

/// JSON 陣列可以比 slot 數短，未列出的 slot 視為未使用
fn de_custom_variables<'de, D>(
    deserializer: D,
) -> std::result::Result<[Option<CustomVariable>; CUSTOM_VARIABLE_SLOTS], D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<Option<CustomVariable>> = Vec::deserialize(deserializer)?;
    if raw.len() > CUSTOM_VARIABLE_SLOTS {
        return Err(serde::de::Error::invalid_length(
            raw.len(),
            &"at most 5 custom variable slots",
        ));
    }
    let mut slots: [Option<CustomVariable>; CUSTOM_VARIABLE_SLOTS] = Default::default();
    for (slot, var) in slots.iter_mut().zip(raw) {
        *slot = var;
    }
    Ok(slots)
}

/// 電子商務交易。`id` 與 `total` 為必填，於 render 時檢查
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "transactionId", alias = "id", default, deserialize_with = "de_opt_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub total: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub affiliation: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub tax: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub shipping: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub country: Option<String>,
}

impl Transaction {
    pub fn new(id: impl Into<String>, total: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            total: Some(total.into()),
            ..Default::default()
        }
    }

    /// 所有欄位都未設定 (例如 JSON `{}`)，視同沒有交易
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(rename = "transactionId", default, deserialize_with = "de_opt_text")]
    pub transaction_id: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub sku: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub price: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub quantity: Option<String>,
}

impl LineItem {
    pub fn new(
        sku: impl Into<String>,
        name: impl Into<String>,
        price: impl Into<String>,
        quantity: impl Into<String>,
    ) -> Self {
        Self {
            sku: Some(sku.into()),
            name: Some(name.into()),
            price: Some(price.into()),
            quantity: Some(quantity.into()),
            ..Default::default()
        }
    }
}

/// 單次 render 的頁面層級輸入
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderContext {
    #[serde(default, deserialize_with = "de_custom_variables")]
    pub custom_variables: [Option<CustomVariable>; CUSTOM_VARIABLE_SLOTS],
    #[serde(default)]
    pub transaction: Option<Transaction>,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub currency_code: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub remote_addr: Option<String>,
    #[serde(default)]
    pub internal_ip: Option<bool>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// 從 JSON 檔案載入
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// 設定自訂變數，`slot` 為 1-based
    pub fn with_custom_variable(mut self, slot: usize, var: CustomVariable) -> Result<Self> {
        validate_range("custom variable slot", slot, 1, CUSTOM_VARIABLE_SLOTS)?;
        self.custom_variables[slot - 1] = Some(var);
        Ok(self)
    }

    pub fn with_transaction(mut self, transaction: Transaction) -> Self {
        self.transaction = Some(transaction);
        self
    }

    pub fn with_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_currency_code(mut self, code: impl Into<String>) -> Self {
        self.currency_code = Some(code.into());
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_remote_addr(mut self, addr: impl Into<String>) -> Self {
        self.remote_addr = Some(addr.into());
        self
    }

    pub fn with_internal_ip(mut self, internal: bool) -> Self {
        self.internal_ip = Some(internal);
        self
    }

    /// 依 slot 順序列出已設定的自訂變數 (1-based index)
    pub fn custom_variables(&self) -> impl Iterator<Item = (usize, &CustomVariable)> {
        self.custom_variables
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.as_ref().map(|v| (i + 1, v)))
    }
}
