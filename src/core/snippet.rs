use crate::adapters::InternalIps;
use crate::config::AnalyticsConfig;
use crate::core::commands::{self, ItemFields, TransactionFields};
use crate::domain::model::{LineItem, PropertyId, RenderContext, TrackingMode, Transaction};
use crate::domain::ports::TrafficClassifier;
use crate::utils::error::{Result, SnippetError};

pub const SERVICE_NAME: &str = "Google Analytics";

/// 依設定與頁面 context 產生 ga.js 追蹤程式碼
#[derive(Debug, Clone)]
pub struct TrackingSnippetBuilder<T: TrafficClassifier = InternalIps> {
    property_id: PropertyId,
    config: AnalyticsConfig,
    classifier: T,
}

impl TrackingSnippetBuilder<InternalIps> {
    /// 建立時即檢查 property id，內部 IP 清單取自設定
    pub fn new(config: AnalyticsConfig) -> Result<Self> {
        let classifier = InternalIps::from_config(&config);
        Self::with_classifier(config, classifier)
    }
}

impl<T: TrafficClassifier> TrackingSnippetBuilder<T> {
    pub fn with_classifier(config: AnalyticsConfig, classifier: T) -> Result<Self> {
        let property_id = config.property_id()?;
        tracing::debug!("Tracking snippet builder ready for {}", property_id);
        Ok(Self {
            property_id,
            config,
            classifier,
        })
    }

    pub fn property_id(&self) -> &PropertyId {
        &self.property_id
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    pub fn render(&self, context: &RenderContext) -> Result<String> {
        let mut cmds = self.domain_commands(context)?;
        cmds.extend(self.custom_var_commands(context));
        cmds.extend(self.transaction_commands(context)?);
        cmds.extend(self.other_commands());
        tracing::debug!("Rendering {} tracking commands", cmds.len());

        let source = if self.config.google_analytics.display_advertising {
            commands::DISPLAY_ADVERTISING_SOURCE
        } else {
            commands::DEFAULT_SOURCE
        };
        let html = commands::setup_code(self.property_id.as_str(), &cmds.join(" "), source);

        if self.classifier.is_internal(context) {
            tracing::info!(
                "{} disabled for internal address {}",
                SERVICE_NAME,
                context.remote_addr.as_deref().unwrap_or("<unknown>")
            );
            return Ok(commands::disable_html(&html, SERVICE_NAME));
        }
        Ok(html)
    }

    fn domain_commands(&self, context: &RenderContext) -> Result<Vec<String>> {
        let mode = self.config.tracking_style();
        if mode == TrackingMode::SingleDomain {
            return Ok(Vec::new());
        }

        let domain = context
            .domain
            .as_deref()
            .filter(|d| !d.is_empty())
            .or_else(|| self.config.domain())
            .ok_or_else(|| {
                SnippetError::config(
                    "tracking multiple domains with Google Analytics requires a domain name",
                )
            })?;

        let mut cmds = vec![
            commands::set_domain(domain),
            commands::NO_ALLOW_HASH_CODE.to_string(),
        ];
        if mode == TrackingMode::MultipleDomains {
            cmds.push(commands::ALLOW_LINKER_CODE.to_string());
        }
        Ok(cmds)
    }

    fn custom_var_commands(&self, context: &RenderContext) -> Vec<String> {
        context
            .custom_variables()
            .map(|(index, var)| commands::set_custom_var(index, &var.name, &var.value, var.scope))
            .collect()
    }

    fn transaction_commands(&self, context: &RenderContext) -> Result<Vec<String>> {
        let Some(transaction) = context.transaction.as_ref().filter(|t| !t.is_empty()) else {
            if !context.items.is_empty() {
                tracing::warn!(
                    "Ignoring {} line items without a transaction",
                    context.items.len()
                );
            }
            return Ok(Vec::new());
        };

        let mut cmds = vec![transaction_command(transaction)?];
        for item in &context.items {
            cmds.push(item_command(item)?);
        }

        let currency = context
            .currency_code
            .as_deref()
            .or_else(|| self.config.currency_code())
            .filter(|c| !c.is_empty());
        if let Some(code) = currency {
            cmds.push(commands::set_value("currencyCode", code));
        }

        cmds.push(commands::TRACK_TRANSACTION_CODE.to_string());
        Ok(cmds)
    }

    fn other_commands(&self) -> Vec<String> {
        let settings = &self.config.google_analytics;
        let mut cmds = Vec::new();
        if settings.site_speed {
            cmds.push(commands::SITE_SPEED_CODE.to_string());
        }
        if settings.anonymize_ip {
            cmds.push(commands::ANONYMIZE_IP_CODE.to_string());
        }
        cmds
    }
}

fn transaction_command(transaction: &Transaction) -> Result<String> {
    let (Some(id), Some(total)) = (transaction.id.as_deref(), transaction.total.as_deref()) else {
        return Err(SnippetError::config(
            "transaction tracking requires a total and a transactionId",
        ));
    };
    Ok(commands::add_transaction(&TransactionFields {
        id,
        affiliation: transaction.affiliation.as_deref().unwrap_or_default(),
        total,
        tax: transaction.tax.as_deref().unwrap_or_default(),
        shipping: transaction.shipping.as_deref().unwrap_or_default(),
        city: transaction.city.as_deref().unwrap_or_default(),
        state: transaction.state.as_deref().unwrap_or_default(),
        country: transaction.country.as_deref().unwrap_or_default(),
    }))
}

fn item_command(item: &LineItem) -> Result<String> {
    let required = |field: &'static str, value: &Option<String>| -> Result<String> {
        value
            .clone()
            .ok_or_else(|| SnippetError::config(format!("item requires {} variable", field)))
    };
    let sku = required("sku", &item.sku)?;
    let name = required("name", &item.name)?;
    let price = required("price", &item.price)?;
    let quantity = required("quantity", &item.quantity)?;

    Ok(commands::add_item(&ItemFields {
        transaction_id: item.transaction_id.as_deref().unwrap_or_default(),
        sku: &sku,
        name: &name,
        category: item.category.as_deref().unwrap_or_default(),
        price: &price,
        quantity: &quantity,
    }))
}
