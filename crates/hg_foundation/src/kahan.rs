// crates/hg_foundation/src/kahan.rs

//! Kahan 求和算法

/// Kahan 补偿求和器
///
/// 用于面积、热流量等长序列累加，减少浮点舍入误差。
///
/// # 示例
///
/// ```rust
/// use hg_foundation::KahanSum;
///
/// let areas = vec![0.1_f64; 1000];
/// let total = KahanSum::sum_iter(areas.iter().copied());
/// assert!((total - 100.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct KahanSum {
    sum: f64,
    compensation: f64,
}

impl KahanSum {
    /// 创建新的求和器
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加一个值
    #[inline]
    pub fn add(&mut self, value: f64) {
        let y = value - self.compensation;
        let t = self.sum + y;
        self.compensation = (t - self.sum) - y;
        self.sum = t;
    }

    /// 获取当前求和值
    #[inline]
    pub fn value(&self) -> f64 {
        self.sum
    }

    /// 重置求和器
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// 从迭代器求和
    pub fn sum_iter<I: IntoIterator<Item = f64>>(iter: I) -> f64 {
        let mut kahan = Self::new();
        for v in iter {
            kahan.add(v);
        }
        kahan.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kahan_sum() {
        let data = vec![0.1f64; 1000];
        let sum = KahanSum::sum_iter(data.iter().cloned());
        assert!((sum - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_kahan_reset() {
        let mut k = KahanSum::new();
        k.add(3.0);
        k.add(4.0);
        assert_eq!(k.value(), 7.0);
        k.reset();
        assert_eq!(k.value(), 0.0);
    }

    #[test]
    fn test_empty_sum() {
        assert_eq!(KahanSum::sum_iter(std::iter::empty()), 0.0);
    }
}
