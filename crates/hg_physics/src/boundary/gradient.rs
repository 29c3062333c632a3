// crates/hg_physics/src/boundary/gradient.rs

//! 热流密度 → 法向温度梯度
//!
//! ```text
//! grad_i = flux_i / (alphaEff_i * rhoCp0)
//! ```

use super::error::BoundaryError;

/// 计算逐面温度梯度 [K/m]
///
/// 扩散系数为零或非有限值时返回 [`BoundaryError::SingularDiffusivity`]，
/// 不会产生无穷大或 NaN 梯度。
pub fn temperature_gradient(
    flux: &[f64],
    diffusivity: &[f64],
    rho_cp0: f64,
) -> Result<Vec<f64>, BoundaryError> {
    BoundaryError::check_size("alphaEff", flux.len(), diffusivity.len())?;

    flux.iter()
        .zip(diffusivity)
        .enumerate()
        .map(|(face, (&q, &alpha))| {
            let denom = alpha * rho_cp0;
            if denom == 0.0 || !denom.is_finite() {
                Err(BoundaryError::SingularDiffusivity { face, value: alpha })
            } else {
                Ok(q / denom)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_formula() {
        let g = temperature_gradient(&[1000.0, 500.0], &[0.5, 0.25], 2.0).unwrap();
        assert!((g[0] - 1000.0).abs() < 1e-12);
        assert!((g[1] - 1000.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_flux_zero_gradient() {
        let g = temperature_gradient(&[0.0; 3], &[1.0; 3], 4.0e6).unwrap();
        assert!(g.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_singular() {
        let err = temperature_gradient(&[1.0, 1.0], &[1.0, 0.0], 1.0).unwrap_err();
        assert!(matches!(err, BoundaryError::SingularDiffusivity { face: 1, .. }));

        let err = temperature_gradient(&[1.0], &[f64::NAN], 1.0).unwrap_err();
        assert!(matches!(err, BoundaryError::SingularDiffusivity { face: 0, .. }));
    }

    #[test]
    fn test_size_mismatch() {
        assert!(matches!(
            temperature_gradient(&[1.0, 2.0], &[1.0], 1.0),
            Err(BoundaryError::SizeMismatch { .. })
        ));
    }

    #[test]
    fn test_empty_patch() {
        assert!(temperature_gradient(&[], &[], 1.0).unwrap().is_empty());
    }
}
