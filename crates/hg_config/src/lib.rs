// crates/hg_config/src/lib.rs

//! HeatGrad Config Layer (Layer 2)
//!
//! 配置层，提供热流边界条件、输运属性和算例的 serde 配置类型。
//! 所有数值以 f64 存储，JSON 读写时保持逐位一致。
//!
//! # 模块概览
//!
//! - [`heat_flux`]: 热流温度边界条件配置（热源类型、时间调制策略）
//! - [`field_value`]: 均匀/逐面标量值
//! - [`transport`]: 输运属性（`rhoCp0`）
//! - [`case`]: 命令行算例配置
//! - [`error`]: 配置错误类型
//!
//! # 层级架构
//!
//! ```text
//! Layer 5: hg_cli        ─> uses CaseConfig
//! Layer 3: hg_physics    ─> builds HeatFluxTemperatureBc from HeatFluxBcConfig
//! Layer 2: hg_config     ─> (本层)
//! Layer 1: hg_foundation
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod case;
pub mod error;
pub mod field_value;
pub mod heat_flux;
pub mod transport;

/// 层级标识
pub const LAYER: u8 = 2;

// 重导出核心类型
pub use case::{CaseConfig, ControlConfig, PatchCaseConfig};
pub use error::ConfigError;
pub use field_value::FieldValue;
pub use heat_flux::{HeatFluxBcConfig, HeatSourceKind, ModulationConfig};
pub use transport::TransportConfig;
