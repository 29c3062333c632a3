// crates/hg_config/src/transport.rs

//! 输运属性配置
//!
//! 当前仅包含 `rhoCp0`（密度 × 比热容，单位 [kg/m³]·[J/kg/K]），
//! 在边界条件构造时读取一次，生命周期内保持不变。

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// 输运属性
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransportConfig {
    /// 密度 × 比热容 [J/m³/K]
    #[serde(rename = "rhoCp0")]
    pub rho_cp0: f64,
}

impl TransportConfig {
    /// 创建输运属性
    pub fn new(rho_cp0: f64) -> Self {
        Self { rho_cp0 }
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.rho_cp0.is_finite() && self.rho_cp0 > 0.0) {
            return Err(ConfigError::invalid("rhoCp0", self.rho_cp0, "rhoCp0 必须为正的有限值"));
        }
        Ok(())
    }
}

impl Default for TransportConfig {
    /// 水在 20°C 附近的 ρ·cp
    fn default() -> Self {
        Self::new(998.2 * 4182.0)
    }
}
