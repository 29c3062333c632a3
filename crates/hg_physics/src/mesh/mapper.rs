// crates/hg_physics/src/mesh/mapper.rs

//! 拓扑变化时的边界场映射
//!
//! 网格拓扑变化（加密、重分区等）后，边界上的逐面数据需要按新面的来源重新排列。
//! 映射只改变数组的长度和顺序，不重新解释数值。

use hg_foundation::{HgError, HgResult};

/// 边界场映射接口
pub trait PatchFieldMapper {
    /// 映射后的面数
    fn size(&self) -> usize;

    /// 是否存在没有来源的新面
    fn has_unmapped(&self) -> bool;

    /// 把旧边界上的逐面数据映射到新边界
    fn map(&self, source: &[f64]) -> HgResult<Vec<f64>>;
}

/// 直接映射：每个新面至多对应一个旧面
///
/// `addressing[i] = Some(j)` 表示新面 `i` 取旧面 `j` 的值，
/// `None` 表示新面没有来源，映射结果取 0。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectMapper {
    addressing: Vec<Option<usize>>,
}

impl DirectMapper {
    /// 由寻址表创建
    pub fn new(addressing: Vec<Option<usize>>) -> Self {
        Self { addressing }
    }

    /// 每个新面都有来源的寻址表
    pub fn from_indices(indices: &[usize]) -> Self {
        Self::new(indices.iter().map(|&i| Some(i)).collect())
    }

    /// 寻址表
    pub fn addressing(&self) -> &[Option<usize>] {
        &self.addressing
    }
}

impl PatchFieldMapper for DirectMapper {
    fn size(&self) -> usize {
        self.addressing.len()
    }

    fn has_unmapped(&self) -> bool {
        self.addressing.iter().any(Option::is_none)
    }

    fn map(&self, source: &[f64]) -> HgResult<Vec<f64>> {
        self.addressing
            .iter()
            .map(|addr| match *addr {
                Some(j) => {
                    HgError::check_index("Face", j, source.len())?;
                    Ok(source[j])
                }
                None => Ok(0.0),
            })
            .collect()
    }
}

/// 反向映射：把 `source` 的值写入 `target` 中 `addressing` 指定的位置
pub fn reverse_map(target: &mut [f64], source: &[f64], addressing: &[usize]) -> HgResult<()> {
    HgError::check_size("addressing", source.len(), addressing.len())?;
    for (&value, &j) in source.iter().zip(addressing) {
        HgError::check_index("Face", j, target.len())?;
        target[j] = value;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_map_reorders_and_grows() {
        let mapper = DirectMapper::new(vec![Some(2), Some(0), None, Some(0)]);
        let mapped = mapper.map(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(mapped, vec![3.0, 1.0, 0.0, 1.0]);
        assert_eq!(mapper.size(), 4);
        assert!(mapper.has_unmapped());
    }

    #[test]
    fn test_direct_map_out_of_range() {
        let mapper = DirectMapper::from_indices(&[0, 5]);
        assert!(!mapper.has_unmapped());
        assert!(mapper.map(&[1.0, 2.0]).is_err());
    }

    #[test]
    fn test_reverse_map() {
        let mut target = vec![0.0; 4];
        reverse_map(&mut target, &[7.0, 8.0], &[3, 1]).unwrap();
        assert_eq!(target, vec![0.0, 8.0, 0.0, 7.0]);

        assert!(reverse_map(&mut target, &[1.0], &[9]).is_err());
        assert!(reverse_map(&mut target, &[1.0, 2.0], &[0]).is_err());
    }
}
