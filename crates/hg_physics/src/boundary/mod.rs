// crates/hg_physics/src/boundary/mod.rs

//! 热流温度边界条件
//!
//! # 子模块
//!
//! - [`heat_source`]: 功率/热流密度 → 逐面热流密度
//! - [`gradient`]: 热流密度 → 温度梯度
//! - [`modulation`]: 线性增长与时间窗调制
//! - [`fixed_gradient`]: 固定梯度存储与系数
//! - [`diffusivity`]: 有效热扩散系数查找
//! - [`heat_flux`]: 组合以上部分的边界条件
//!
//! # 使用示例
//!
//! ```ignore
//! use hg_physics::boundary::{HeatFluxTemperatureBc, PatchContext};
//!
//! let mut bc = HeatFluxTemperatureBc::new(&patch, &config, &transport)?;
//! for corrector in 0..n_correctors {
//!     bc.update_coeffs(&PatchContext::new(&patch, &registry, time))?;
//!     let face_values = bc.evaluate(&cell_values, &delta_coeffs)?;
//! }
//! ```

pub mod context;
pub mod diffusivity;
pub mod error;
pub mod fixed_gradient;
pub mod gradient;
pub mod heat_flux;
pub mod heat_source;
pub mod modulation;

pub use context::PatchContext;
pub use diffusivity::DiffusivityLookup;
pub use error::BoundaryError;
pub use fixed_gradient::FixedGradientField;
pub use gradient::temperature_gradient;
pub use heat_flux::HeatFluxTemperatureBc;
pub use heat_source::{flux_density, patch_flux_density, HeatSourceSpec};
pub use modulation::{RampState, TemporalModulation, WindowState};
