use crate::config::AnalyticsConfig;
use crate::domain::model::RenderContext;
use crate::domain::ports::TrafficClassifier;
use std::net::IpAddr;

/// 以設定中的內部 IP 清單判斷內部流量
#[derive(Debug, Clone, Default)]
pub struct InternalIps {
    addrs: Vec<IpAddr>,
}

impl InternalIps {
    pub fn new(addrs: Vec<IpAddr>) -> Self {
        Self { addrs }
    }

    /// 無法解析的位址會被略過；請先以 `validate()` 檢查設定
    pub fn from_config(config: &AnalyticsConfig) -> Self {
        let addrs = config
            .internal_ips()
            .iter()
            .filter_map(|ip| match ip.trim().parse::<IpAddr>() {
                Ok(addr) => Some(addr),
                Err(_) => {
                    tracing::warn!("Ignoring unparseable internal IP '{}'", ip);
                    None
                }
            })
            .collect();
        Self { addrs }
    }

    pub fn contains(&self, addr: &IpAddr) -> bool {
        self.addrs.contains(addr)
    }
}

/// `X-Forwarded-For` 形式時取第一個位址 (原始用戶端)
fn client_addr(remote_addr: &str) -> Option<IpAddr> {
    remote_addr
        .split(',')
        .next()
        .map(str::trim)
        .and_then(|addr| addr.parse().ok())
}

impl TrafficClassifier for InternalIps {
    fn is_internal(&self, context: &RenderContext) -> bool {
        if let Some(flag) = context.internal_ip {
            return flag;
        }
        context
            .remote_addr
            .as_deref()
            .and_then(client_addr)
            .map(|addr| self.contains(&addr))
            .unwrap_or(false)
    }
}
