use crate::domain::model::RenderContext;

/// 判斷當前請求是否來自內部流量 (內部流量不送出追蹤)
pub trait TrafficClassifier: Send + Sync {
    fn is_internal(&self, context: &RenderContext) -> bool;
}

/// 不做任何判斷，只看 context 上的 `internal_ip` 旗標
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitFlagOnly;

impl TrafficClassifier for ExplicitFlagOnly {
    fn is_internal(&self, context: &RenderContext) -> bool {
        context.internal_ip.unwrap_or(false)
    }
}
