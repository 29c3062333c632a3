// crates/hg_physics/src/lib.rs

//! HeatGrad Physics Layer (Layer 3)
//!
//! 热流驱动的固定梯度温度边界条件，包括：
//! - 边界几何与跨分区面积求和 (mesh)
//! - 边界场注册表 (registry)
//! - 热源换算、时间调制与梯度计算 (boundary)
//!
//! # 层级架构
//!
//! ```text
//! Layer 5: hg_cli
//! Layer 3: hg_physics    ─> (本层)
//! Layer 2: hg_config     ─> HeatFluxBcConfig, TransportConfig
//! Layer 1: hg_foundation ─> HgError, KahanSum
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod boundary;
pub mod mesh;
pub mod registry;

/// 层级标识
pub const LAYER: u8 = 3;

// 重导出边界条件类型
pub use boundary::{
    BoundaryError, FixedGradientField, HeatFluxTemperatureBc, HeatSourceSpec, PatchContext,
    TemporalModulation,
};
pub use mesh::{AreaReducer, BoundaryPatch, DirectMapper, PartitionSum, PatchFieldMapper, PatchGeometry, SerialReducer};
pub use registry::{FieldRegistry, PatchFieldRegistry};
