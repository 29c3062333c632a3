// crates/hg_config/tests/config_roundtrip.rs

//! 配置文件读写测试
//!
//! 写出再读回的配置必须与原配置逐位一致。

use hg_config::{CaseConfig, FieldValue, HeatFluxBcConfig, HeatSourceKind};

#[test]
fn test_boundary_file_roundtrip_is_bitwise() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("heater.json");

    // 不能被二进制精确表示的十进制值
    let cfg = HeatFluxBcConfig::ramp(
        HeatSourceKind::Flux,
        vec![0.1, 1.0 / 3.0, 2.0_f64.sqrt(), 1e-300],
        "alphaEff",
        0.07,
    )
    .with_initial_ratio(0.3)
    .with_gradient(vec![0.5, -0.25, 1e10, 0.0]);

    cfg.save_to_file(&path).unwrap();
    let back = HeatFluxBcConfig::from_file(&path).unwrap();

    assert_eq!(back, cfg);
    if let (FieldValue::NonUniform(a), FieldValue::NonUniform(b)) = (&cfg.q, &back.q) {
        for (x, y) in a.iter().zip(b) {
            assert_eq!(x.to_bits(), y.to_bits());
        }
    } else {
        panic!("q 应保持逐面形态");
    }
}

#[test]
fn test_window_roundtrip() {
    let cfg = HeatFluxBcConfig::window(HeatSourceKind::Power, 123.456, "alphaT", 5.0, 1.0);
    let json = cfg.to_json_string().unwrap();
    let back = HeatFluxBcConfig::from_json_str(&json).unwrap();
    assert_eq!(back, cfg);
    assert!(json.contains("\"heatFluxWindow\""));
}

#[test]
fn test_case_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("case.json");

    let case = CaseConfig::example();
    case.save_to_file(&path).unwrap();
    let back = CaseConfig::from_file(&path).unwrap();
    assert_eq!(back, case);
}

#[test]
fn test_missing_file() {
    let err = CaseConfig::from_file("/nonexistent/path/case.json").unwrap_err();
    assert!(matches!(err, hg_config::ConfigError::Io(_)));
}

#[test]
fn test_malformed_json() {
    let err = HeatFluxBcConfig::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, hg_config::ConfigError::Parse(_)));
}
