// crates/hg_physics/src/boundary/context.rs

//! 单次系数更新所需的外部数据
//!
//! 上下文只借用，不被边界条件保存；每次调用都重新传入。

use crate::mesh::PatchGeometry;
use crate::registry::FieldRegistry;

/// 边界更新上下文
#[derive(Clone, Copy)]
pub struct PatchContext<'a> {
    /// 边界几何（面积与全局求和）
    pub patch: &'a dyn PatchGeometry,
    /// 边界场注册表
    pub fields: &'a dyn FieldRegistry,
    /// 当前模拟时间 [s]
    pub time: f64,
}

impl<'a> PatchContext<'a> {
    /// 创建上下文
    pub fn new(patch: &'a dyn PatchGeometry, fields: &'a dyn FieldRegistry, time: f64) -> Self {
        Self {
            patch,
            fields,
            time,
        }
    }

    /// 同一边界与注册表，换一个时间
    pub fn at_time(self, time: f64) -> Self {
        Self { time, ..self }
    }
}
