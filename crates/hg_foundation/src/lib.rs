// crates/hg_foundation/src/lib.rs

//! HeatGrad Foundation Layer
//!
//! 基础层，提供整个项目共用的最小抽象。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型
//! - [`kahan`]: Kahan 补偿求和（面积、热流等跨面累加）
//! - [`float`]: 浮点数有效性检查
//!
//! # 示例
//!
//! ```
//! use hg_foundation::{KahanSum, HgError, HgResult};
//!
//! fn total_area(areas: &[f64]) -> HgResult<f64> {
//!     let sum = KahanSum::sum_iter(areas.iter().copied());
//!     if sum <= 0.0 {
//!         return Err(HgError::invalid_input("面积之和必须为正"));
//!     }
//!     Ok(sum)
//! }
//!
//! assert!((total_area(&[0.5, 0.25, 0.25]).unwrap() - 1.0).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod float;
pub mod kahan;

/// 层级标识
pub const LAYER: u8 = 1;

// 重导出常用类型
pub use error::{HgError, HgResult};
pub use float::first_non_finite;
pub use kahan::KahanSum;
