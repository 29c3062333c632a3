// crates/hg_foundation/src/float.rs

//! 浮点数有效性检查

/// 返回第一个非有限值的索引和值
pub fn first_non_finite(values: &[f64]) -> Option<(usize, f64)> {
    values
        .iter()
        .enumerate()
        .find(|(_, v)| !v.is_finite())
        .map(|(i, &v)| (i, v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_non_finite() {
        assert_eq!(first_non_finite(&[1.0, 2.0]), None);
        let (idx, v) = first_non_finite(&[1.0, f64::NEG_INFINITY, f64::NAN]).unwrap();
        assert_eq!(idx, 1);
        assert!(v.is_infinite());
        assert_eq!(first_non_finite(&[]), None);
    }
}
