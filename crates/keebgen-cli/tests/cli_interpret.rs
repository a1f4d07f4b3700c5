use std::path::PathBuf;
use std::process::Command;

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root")
        .to_path_buf()
}

fn read_json(path: &std::path::Path) -> serde_json::Value {
    let raw = std::fs::read_to_string(path).expect("read output");
    serde_json::from_str(&raw).expect("parse output json")
}

#[test]
fn interpret_writes_model_json() {
    let bin = env!("CARGO_BIN_EXE_keebgen");
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("out/thumbs.json");
    let layout = workspace_root().join("fixtures/layouts/thumb_cluster.txt");

    let out = Command::new(bin)
        .args([
            "interpret",
            layout.to_string_lossy().as_ref(),
            "-o",
            output.to_string_lossy().as_ref(),
            "--pretty",
        ])
        .output()
        .expect("run keebgen interpret");
    assert!(
        out.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );

    let model = read_json(&output);
    assert_eq!(model["keys"].as_array().expect("keys").len(), 10);
    let hull = model["hull"].as_array().expect("hull");
    assert!(hull.len() >= 4);
    assert_eq!(hull.first(), hull.last());
}

#[test]
fn interpret_prints_to_stdout_without_output() {
    let bin = env!("CARGO_BIN_EXE_keebgen");
    let layout = workspace_root().join("fixtures/layouts/iso_enter.json");

    let out = Command::new(bin)
        .args([
            "interpret",
            layout.to_string_lossy().as_ref(),
            "--hull",
            "none",
        ])
        .output()
        .expect("run keebgen interpret");
    assert!(out.status.success());

    let model: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("stdout is json");
    assert!(model.get("hull").is_none());
    assert!(!model["keys"].as_array().expect("keys").is_empty());
}

#[test]
fn unit_flag_scales_keys() {
    let bin = env!("CARGO_BIN_EXE_keebgen");
    let dir = tempfile::tempdir().expect("tempdir");
    let layout = dir.path().join("row.json");
    std::fs::write(&layout, r#"[["a", {"w": 2}, "b"]]"#).expect("write layout");
    let output = dir.path().join("row.out.json");

    let status = Command::new(bin)
        .args([
            "interpret",
            layout.to_string_lossy().as_ref(),
            "--unit",
            "10",
            "-o",
            output.to_string_lossy().as_ref(),
        ])
        .status()
        .expect("run keebgen interpret");
    assert!(status.success());

    let model = read_json(&output);
    assert_eq!(model["config"]["key_unit"], 10.0);
    let b = &model["keys"][1];
    assert_eq!(b["width"], 20.0);
    assert_eq!(b["x"], 20.0);
    assert_eq!(b["y"], -5.0);
}

#[test]
fn strict_rejects_misplaced_rotation() {
    let bin = env!("CARGO_BIN_EXE_keebgen");
    let dir = tempfile::tempdir().expect("tempdir");
    let layout = dir.path().join("rotated.json");
    std::fs::write(&layout, r#"[["a", {"r": 10}, "b"]]"#).expect("write layout");

    let lenient = Command::new(bin)
        .args(["interpret", layout.to_string_lossy().as_ref()])
        .output()
        .expect("run keebgen interpret");
    assert!(lenient.status.success());

    let strict = Command::new(bin)
        .args(["interpret", layout.to_string_lossy().as_ref(), "--strict"])
        .output()
        .expect("run keebgen interpret --strict");
    assert_eq!(strict.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&strict.stderr);
    assert!(stderr.contains("Error:"), "stderr: {stderr}");
}

#[test]
fn hull_subcommand_outputs_closed_ring() {
    let bin = env!("CARGO_BIN_EXE_keebgen");
    let dir = tempfile::tempdir().expect("tempdir");
    let points = dir.path().join("points.json");
    std::fs::write(
        &points,
        "[[0, 0], [2, 0], [2, 2], [0, 2], [1, 1], [1, 0]]",
    )
    .expect("write points");

    let out = Command::new(bin)
        .args(["hull", points.to_string_lossy().as_ref()])
        .output()
        .expect("run keebgen hull");
    assert!(out.status.success());

    let ring: Vec<[f64; 2]> = serde_json::from_slice(&out.stdout).expect("stdout is json");
    assert_eq!(ring.len(), 5);
    assert_eq!(ring.first(), ring.last());
    assert!(!ring.contains(&[1.0, 1.0]));
    assert!(!ring.contains(&[1.0, 0.0]));
}

#[test]
fn hull_rejects_non_point_input() {
    let bin = env!("CARGO_BIN_EXE_keebgen");
    let dir = tempfile::tempdir().expect("tempdir");
    let points = dir.path().join("points.json");
    std::fs::write(&points, r#"{"x": 1}"#).expect("write points");

    let status = Command::new(bin)
        .args(["hull", points.to_string_lossy().as_ref()])
        .status()
        .expect("run keebgen hull");
    assert_eq!(status.code(), Some(2));
}
