//! `_gaq.push(...)` 指令的格式化函式。
//!
//! 所有放進 JavaScript 單引號字串的值都經過 [`js_escape`]。

use crate::domain::model::Scope;
use std::borrow::Cow;

pub const NO_ALLOW_HASH_CODE: &str = "_gaq.push(['_setAllowHash', false]);";
pub const ALLOW_LINKER_CODE: &str = "_gaq.push(['_setAllowLinker', true]);";
pub const SITE_SPEED_CODE: &str = "_gaq.push(['_trackPageLoadTime']);";
pub const ANONYMIZE_IP_CODE: &str = "_gaq.push (['_gat._anonymizeIp']);";
pub const TRACK_TRANSACTION_CODE: &str = "_gaq.push(['_trackTrans']);";

/// ga.js 載入來源：(協定判斷式兩側, 路徑)
pub type Source = (&'static str, &'static str);

pub const DEFAULT_SOURCE: Source = (
    "'https://ssl' : 'http://www'",
    "'.google-analytics.com/ga.js'",
);
pub const DISPLAY_ADVERTISING_SOURCE: Source = (
    "'https://' : 'http://'",
    "'stats.g.doubleclick.net/dc.js'",
);

/// 跳脫單引號字串中的 `\`、`'` 與換行；拆開 `</` 避免提早結束 `<script>`，
/// `>` 轉成 `\x3e` 避免 `-->` 結束內部流量的 HTML 註解
pub fn js_escape(value: &str) -> Cow<'_, str> {
    if !value.contains(['\\', '\'', '\n', '\r', '<', '>']) {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len() + 8);
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '<' if chars.peek() == Some(&'/') => out.push_str("<\\"),
            '>' => out.push_str("\\x3e"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

pub fn set_domain(domain: &str) -> String {
    format!("_gaq.push(['_setDomainName', '{}']);", js_escape(domain))
}

pub fn set_custom_var(index: usize, name: &str, value: &str, scope: Scope) -> String {
    format!(
        "_gaq.push(['_setCustomVar', {}, '{}', '{}', {}]);",
        index,
        js_escape(name),
        js_escape(value),
        scope.code()
    )
}

pub struct TransactionFields<'a> {
    pub id: &'a str,
    pub affiliation: &'a str,
    pub total: &'a str,
    pub tax: &'a str,
    pub shipping: &'a str,
    pub city: &'a str,
    pub state: &'a str,
    pub country: &'a str,
}

pub fn add_transaction(t: &TransactionFields<'_>) -> String {
    format!(
        "_gaq.push(['_addTrans', '{}', '{}', '{}', '{}', '{}', '{}', '{}', '{}']);",
        js_escape(t.id),
        js_escape(t.affiliation),
        js_escape(t.total),
        js_escape(t.tax),
        js_escape(t.shipping),
        js_escape(t.city),
        js_escape(t.state),
        js_escape(t.country)
    )
}

pub struct ItemFields<'a> {
    pub transaction_id: &'a str,
    pub sku: &'a str,
    pub name: &'a str,
    pub category: &'a str,
    pub price: &'a str,
    pub quantity: &'a str,
}

pub fn add_item(i: &ItemFields<'_>) -> String {
    format!(
        "_gaq.push(['_addItem', '{}', '{}', '{}', '{}', '{}', '{}']);",
        js_escape(i.transaction_id),
        js_escape(i.sku),
        js_escape(i.name),
        js_escape(i.category),
        js_escape(i.price),
        js_escape(i.quantity)
    )
}

pub fn set_value(key: &str, value: &str) -> String {
    format!(
        "_gaq.push(['_set', '{}', '{}']);",
        js_escape(key),
        js_escape(value)
    )
}

/// 完整的非同步載入區塊
pub fn setup_code(property_id: &str, commands: &str, source: Source) -> String {
    format!(
        r#"
    <script type="text/javascript">

      var _gaq = _gaq || [];
      _gaq.push(['_setAccount', '{property_id}']);
      _gaq.push(['_trackPageview']);
      {commands}
      (function() {{
        var ga = document.createElement('script'); ga.type = 'text/javascript'; ga.async = true;
        ga.src = ('https:' == document.location.protocol ? {source_scheme}) + {source_url};
        var s = document.getElementsByTagName('script')[0]; s.parentNode.insertBefore(ga, s);
      }})();

    </script>
"#,
        property_id = js_escape(property_id),
        commands = commands,
        source_scheme = source.0,
        source_url = source.1,
    )
}

/// 內部流量時以 HTML 註解包住整段程式碼
pub fn disable_html(html: &str, service: &str) -> String {
    format!("<!-- {} disabled on internal IP address\n{}\n-->", service, html)
}
