// crates/hg_physics/src/registry.rs

//! 边界场注册表
//!
//! 按 (场名, 边界名) 查找边界上的逐面标量场。注册表拥有数据，边界条件只在
//! 单次系数更新期间借用切片，绝不跨调用缓存，因为网格运动、重启或重映射
//! 都可能让底层存储重新分配。

use std::collections::HashMap;

/// 边界场只读查找接口
pub trait FieldRegistry {
    /// 查找指定边界上的标量场
    fn patch_field(&self, field: &str, patch: &str) -> Option<&[f64]>;
}

/// 基于 HashMap 的边界场注册表
#[derive(Debug, Clone, Default)]
pub struct PatchFieldRegistry {
    fields: HashMap<String, HashMap<String, Vec<f64>>>,
}

impl PatchFieldRegistry {
    /// 创建空注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册或替换边界场，返回被替换的旧数据
    pub fn insert(
        &mut self,
        field: impl Into<String>,
        patch: impl Into<String>,
        values: Vec<f64>,
    ) -> Option<Vec<f64>> {
        self.fields
            .entry(field.into())
            .or_default()
            .insert(patch.into(), values)
    }

    /// 链式注册
    pub fn with_field(
        mut self,
        field: impl Into<String>,
        patch: impl Into<String>,
        values: Vec<f64>,
    ) -> Self {
        self.insert(field, patch, values);
        self
    }

    /// 移除边界场
    pub fn remove(&mut self, field: &str, patch: &str) -> Option<Vec<f64>> {
        self.fields.get_mut(field)?.remove(patch)
    }

    /// 可变访问边界场
    pub fn get_mut(&mut self, field: &str, patch: &str) -> Option<&mut Vec<f64>> {
        self.fields.get_mut(field)?.get_mut(patch)
    }

    /// 已注册的场数目（按场名计）
    pub fn n_fields(&self) -> usize {
        self.fields.len()
    }
}

impl FieldRegistry for PatchFieldRegistry {
    fn patch_field(&self, field: &str, patch: &str) -> Option<&[f64]> {
        self.fields
            .get(field)
            .and_then(|per_patch| per_patch.get(patch))
            .map(Vec::as_slice)
    }
}
