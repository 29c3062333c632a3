// crates/hg_physics/src/mesh/mod.rs

//! 边界条件所需的网格接口
//!
//! - [`patch`]: 边界面几何与跨分区面积求和
//! - [`mapper`]: 拓扑变化时的逐面数据映射

pub mod mapper;
pub mod patch;

pub use mapper::{reverse_map, DirectMapper, PatchFieldMapper};
pub use patch::{AreaReducer, BoundaryPatch, PartitionSum, PatchGeometry, SerialReducer};
