// crates/hg_physics/src/mesh/patch.rs

//! 边界面几何访问
//!
//! 边界条件只需要边界面的面积以及跨分区的全局求和，因此这里只定义一个
//! 很窄的接口 [`PatchGeometry`]。求解器可以用自己的网格类型实现它。
//!
//! 本模块同时提供一个内存实现 [`BoundaryPatch`]：
//! - 串行运行时使用 [`SerialReducer`]，全局和即本地和
//! - [`BoundaryPatch::decompose`] 把一个边界切分成若干分区，各分区通过共享的
//!   [`PartitionSum`] 完成一次集合求和，模拟分布式运行

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use hg_foundation::{HgError, HgResult, KahanSum};

// ============================================================
// 跨分区归约
// ============================================================

/// 跨分区求和接口
///
/// 每次调用都是一次同步的集合求和：所有分区传入本地贡献，得到相同的全局和。
pub trait AreaReducer: Send + Sync + fmt::Debug {
    /// 对本地贡献做全局求和
    ///
    /// `slot` 是调用方分区的编号。
    fn reduce_sum(&self, slot: usize, local: f64) -> f64;

    /// 参与归约的分区数
    fn n_partitions(&self) -> usize {
        1
    }
}

/// 串行归约：全局和即本地和
#[derive(Debug, Clone, Copy, Default)]
pub struct SerialReducer;

impl AreaReducer for SerialReducer {
    #[inline]
    fn reduce_sum(&self, _slot: usize, local: f64) -> f64 {
        local
    }
}

/// 进程内分区求和表
///
/// 每个分区占一个槽位。`reduce_sum` 先把调用方的本地贡献写入自己的槽位，
/// 再返回所有槽位之和，因此面积变化后的下一次调用立即反映新值。
/// 槽位按 `f64` 位模式存放在原子量中，多个分区可以并发调用。
#[derive(Debug)]
pub struct PartitionSum {
    slots: Vec<AtomicU64>,
}

impl PartitionSum {
    /// 由各分区初始本地和创建
    pub fn new(local_sums: Vec<f64>) -> Self {
        Self {
            slots: local_sums.into_iter().map(|s| AtomicU64::new(s.to_bits())).collect(),
        }
    }

    /// 登记某个分区的本地和；槽位越界时忽略
    pub fn store(&self, slot: usize, local: f64) {
        if let Some(s) = self.slots.get(slot) {
            s.store(local.to_bits(), Ordering::Release);
        }
    }

    /// 当前全局和
    pub fn total(&self) -> f64 {
        KahanSum::sum_iter(
            self.slots
                .iter()
                .map(|s| f64::from_bits(s.load(Ordering::Acquire))),
        )
    }
}

impl AreaReducer for PartitionSum {
    fn reduce_sum(&self, slot: usize, local: f64) -> f64 {
        self.store(slot, local);
        self.total()
    }

    fn n_partitions(&self) -> usize {
        self.slots.len()
    }
}
// ============================================================
// 边界几何接口
// ============================================================

/// 边界面几何访问接口
pub trait PatchGeometry {
    /// 边界名称
    fn name(&self) -> &str;

    /// 本分区内各面的面积 [m²]
    fn face_areas(&self) -> &[f64];

    /// 全局求和（所有分区）
    fn reduce_sum(&self, local: f64) -> f64;

    /// 本分区内的面数
    fn n_faces(&self) -> usize {
        self.face_areas().len()
    }

    /// 本分区内的面积和
    fn local_area(&self) -> f64 {
        KahanSum::sum_iter(self.face_areas().iter().copied())
    }

    /// 整个边界（所有分区）的总面积
    fn total_area(&self) -> f64 {
        self.reduce_sum(self.local_area())
    }
}

// ============================================================
// 内存实现
// ============================================================

/// 内存中的边界面集合
#[derive(Debug, Clone)]
pub struct BoundaryPatch {
    name: String,
    face_areas: Vec<f64>,
    reducer: Arc<dyn AreaReducer>,
    slot: usize,
}

fn check_areas(face_areas: &[f64]) -> HgResult<()> {
    if let Some((i, a)) = face_areas
        .iter()
        .enumerate()
        .find(|(_, a)| !(a.is_finite() && **a >= 0.0))
    {
        return Err(HgError::invalid_input(format!(
            "边界面 {} 的面积无效: {}",
            i, a
        )));
    }
    Ok(())
}

impl BoundaryPatch {
    /// 创建串行边界
    ///
    /// 面积必须为非负有限值。
    pub fn new(name: impl Into<String>, face_areas: Vec<f64>) -> HgResult<Self> {
        Self::with_reducer(name, face_areas, Arc::new(SerialReducer))
    }

    /// 创建面积均匀的串行边界
    pub fn uniform(name: impl Into<String>, n_faces: usize, area: f64) -> HgResult<Self> {
        Self::new(name, vec![area; n_faces])
    }

    /// 使用指定归约器创建边界，占用第 0 个分区槽位
    pub fn with_reducer(
        name: impl Into<String>,
        face_areas: Vec<f64>,
        reducer: Arc<dyn AreaReducer>,
    ) -> HgResult<Self> {
        Self::in_partition(name, face_areas, reducer, 0)
    }

    /// 使用指定归约器创建第 `slot` 个分区
    pub fn in_partition(
        name: impl Into<String>,
        face_areas: Vec<f64>,
        reducer: Arc<dyn AreaReducer>,
        slot: usize,
    ) -> HgResult<Self> {
        check_areas(&face_areas)?;
        HgError::check_index("partition", slot, reducer.n_partitions())?;
        Ok(Self {
            name: name.into(),
            face_areas,
            reducer,
            slot,
        })
    }

    /// 把边界按连续区段切分为 `n_parts` 个分区
    ///
    /// 面数不能整除时前面的分区多分一个面；分区可以为空。
    pub fn decompose(&self, n_parts: usize) -> HgResult<Vec<BoundaryPatch>> {
        if n_parts == 0 {
            return Err(HgError::invalid_input("分区数必须为正"));
        }
        let n = self.face_areas.len();
        let base = n / n_parts;
        let extra = n % n_parts;

        let mut chunks = Vec::with_capacity(n_parts);
        let mut start = 0;
        for part in 0..n_parts {
            let len = base + usize::from(part < extra);
            chunks.push(self.face_areas[start..start + len].to_vec());
            start += len;
        }

        let sums = chunks
            .iter()
            .map(|c| KahanSum::sum_iter(c.iter().copied()))
            .collect();
        let reducer: Arc<dyn AreaReducer> = Arc::new(PartitionSum::new(sums));

        Ok(chunks
            .into_iter()
            .enumerate()
            .map(|(slot, face_areas)| BoundaryPatch {
                name: self.name.clone(),
                face_areas,
                reducer: Arc::clone(&reducer),
                slot,
            })
            .collect())
    }

    /// 替换本分区的面积（网格运动、重新分解后）
    ///
    /// 新面积立即登记到归约器，其他分区的下一次求和即可看到。
    pub fn set_face_areas(&mut self, face_areas: Vec<f64>) -> HgResult<()> {
        check_areas(&face_areas)?;
        self.face_areas = face_areas;
        self.reducer.reduce_sum(self.slot, self.local_area());
        Ok(())
    }

    /// 本分区在归约中的编号
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// 参与归约的分区数
    pub fn n_partitions(&self) -> usize {
        self.reducer.n_partitions()
    }
}

impl PatchGeometry for BoundaryPatch {
    fn name(&self) -> &str {
        &self.name
    }

    fn face_areas(&self) -> &[f64] {
        &self.face_areas
    }

    fn reduce_sum(&self, local: f64) -> f64 {
        self.reducer.reduce_sum(self.slot, local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serial_patch_area() {
        let patch = BoundaryPatch::new("wall", vec![0.5, 0.25, 0.25]).unwrap();
        assert_eq!(patch.n_faces(), 3);
        assert!((patch.local_area() - 1.0).abs() < 1e-14);
        assert!((patch.total_area() - 1.0).abs() < 1e-14);
        assert_eq!(patch.n_partitions(), 1);
    }

    #[test]
    fn test_invalid_area_rejected() {
        assert!(BoundaryPatch::new("wall", vec![1.0, -0.1]).is_err());
        assert!(BoundaryPatch::new("wall", vec![f64::NAN]).is_err());
        assert!(BoundaryPatch::new("wall", vec![0.0, 0.0]).is_ok());
    }

    #[test]
    fn test_decompose_preserves_total_area() {
        let patch = BoundaryPatch::new("wall", (1..=7).map(|i| i as f64 * 0.1).collect()).unwrap();
        let parts = patch.decompose(3).unwrap();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts.iter().map(|p| p.n_faces()).collect::<Vec<_>>(), vec![3, 2, 2]);
        for part in &parts {
            assert!((part.total_area() - patch.total_area()).abs() < 1e-12);
            assert_eq!(part.n_partitions(), 3);
            assert!(part.local_area() < patch.total_area());
        }
    }

    #[test]
    fn test_decompose_with_empty_partitions() {
        let patch = BoundaryPatch::uniform("wall", 2, 0.5).unwrap();
        let parts = patch.decompose(4).unwrap();
        assert_eq!(parts[3].n_faces(), 0);
        assert_eq!(parts[3].local_area(), 0.0);
        assert!((parts[3].total_area() - 1.0).abs() < 1e-14);
        assert!(patch.decompose(0).is_err());
    }

    #[test]
    fn test_partition_sum_uses_current_local() {
        // 登记值与本地 Kahan 和差一个 ulp 时，以本次传入的本地和为准
        let areas = vec![1.0, 1e-16, 1e-16];
        let naive: f64 = areas.iter().sum();
        let patch =
            BoundaryPatch::with_reducer("heater", areas, Arc::new(PartitionSum::new(vec![naive, 1.0]))).unwrap();
        let expected = patch.local_area() + 1.0;
        assert_eq!(patch.total_area(), expected);
    }

    #[test]
    fn test_set_face_areas_updates_all_partitions() {
        let patch = BoundaryPatch::uniform("wall", 4, 0.25).unwrap();
        let mut parts = patch.decompose(2).unwrap();
        assert_eq!(parts[1].slot(), 1);

        parts[0].set_face_areas(vec![1.0, 1.0]).unwrap();
        assert!((parts[0].total_area() - 2.5).abs() < 1e-14);
        assert!((parts[1].total_area() - 2.5).abs() < 1e-14);

        assert!(parts[0].set_face_areas(vec![-1.0, 1.0]).is_err());
        assert!((parts[1].total_area() - 2.5).abs() < 1e-14);
    }

    #[test]
    fn test_partition_slot_out_of_range() {
        let reducer: Arc<dyn AreaReducer> = Arc::new(PartitionSum::new(vec![0.0, 0.0]));
        assert!(BoundaryPatch::in_partition("wall", vec![1.0], Arc::clone(&reducer), 1).is_ok());
        assert!(BoundaryPatch::in_partition("wall", vec![1.0], reducer, 2).is_err());
        assert!(BoundaryPatch::in_partition("wall", vec![1.0], Arc::new(SerialReducer), 1).is_err());
    }
}
