use std::path::PathBuf;

use polymark::GridConfig;

fn exe() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_polymark")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "polymark.exe"
            } else {
                "polymark"
            });
            p
        })
}

#[test]
fn cli_frames_writes_timeline_json() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();

    let cfg_path = dir.join("grid.json");
    let out_path = dir.join("frames.json");
    let _ = std::fs::remove_file(&out_path);

    let cfg = GridConfig {
        seed: Some(3),
        ..GridConfig::default()
    };
    let f = std::fs::File::create(&cfg_path).unwrap();
    serde_json::to_writer_pretty(f, &cfg).unwrap();

    let cfg_arg = cfg_path.to_string_lossy().to_string();
    let out_arg = out_path.to_string_lossy().to_string();

    let status = std::process::Command::new(exe())
        .args(["frames", "--config", cfg_arg.as_str(), "--ticks", "5", "--out"])
        .arg(out_arg.as_str())
        .status()
        .unwrap();
    assert!(status.success());

    let s = std::fs::read_to_string(&out_path).unwrap();
    let v: serde_json::Value = serde_json::from_str(&s).unwrap();
    let frames = v.as_array().unwrap();
    assert_eq!(frames.len(), 6);
    assert_eq!(frames[0]["frame"]["state"], "Initial");
    assert_eq!(frames[5]["frame"]["state"], "Final");
    assert_eq!(frames[1]["at_ms"], 2400);
}

#[test]
fn cli_config_prints_defaults() {
    let out = std::process::Command::new(exe())
        .arg("config")
        .output()
        .unwrap();
    assert!(out.status.success());
    let cfg: GridConfig = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(cfg, GridConfig::default());
}

#[test]
fn cli_rejects_odd_lattice() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();
    let cfg_path = dir.join("odd.json");
    std::fs::write(&cfg_path, r#"{ "points_per_side": 11 }"#).unwrap();

    let out = std::process::Command::new(exe())
        .args(["describe", "--config"])
        .arg(cfg_path.to_string_lossy().as_ref())
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("even"));
}
