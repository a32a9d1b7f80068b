//! Runs the `cod2lab` binary against dumps on disk.

use std::fs;
use std::path::Path;
use std::process::Command;

fn write_dump(dir: &Path, products_version: &str, machines_version: &str) {
    fs::write(
        dir.join("products.json"),
        format!(
            r#"{{"game_version": "{products_version}", "products": [
                {{"type": "CountableProductProto", "id": "Product_Iron", "name": "Iron", "icon_path": "iron.png"}}
            ]}}"#
        ),
    )
    .unwrap();
    fs::write(
        dir.join("machines_and_buildings.json"),
        format!(
            r#"{{"game_version": "{machines_version}", "machines_and_buildings": [
                {{"id": "SmelterT1", "name": "Smelter", "workers": 0, "electricity_consumed": 0,
                  "maintenance_cost_units": "", "maintenance_cost_quantity": 0, "icon_path": "smelter.png",
                  "recipes": [{{"id": "SmeltIron", "name": "Iron smelting", "duration": 10,
                               "inputs": [], "outputs": [{{"name": "Iron", "quantity": 1}}]}}]}}
            ]}}"#
        ),
    )
    .unwrap();
}

fn cod2lab() -> Command {
    Command::new(env!("CARGO_BIN_EXE_cod2lab"))
}

#[test]
fn converts_and_writes_sprite_manifest() {
    let dir = tempfile::tempdir().unwrap();
    write_dump(dir.path(), "0.6.3", "0.6.3");
    let output = dir.path().join("out").join("data.json");
    let manifest = dir.path().join("out").join("icons.json");

    let status = cod2lab()
        .arg("--input-dir")
        .arg(dir.path())
        .arg("--output")
        .arg(&output)
        .arg("--sprite-manifest")
        .arg(&manifest)
        .status()
        .unwrap();
    assert!(status.success());

    let data: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(data["recipes"][0]["id"], "smelt-iron");

    let icons: serde_json::Value = serde_json::from_str(&fs::read_to_string(&manifest).unwrap()).unwrap();
    assert_eq!(icons[0]["id"], "iron");
    assert_eq!(icons[1]["id"], "smelter-t1");
    assert_eq!(icons[1]["x"], 40);
}

#[test]
fn version_mismatch_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    write_dump(dir.path(), "0.6.3", "0.6.4");
    let output = dir.path().join("out").join("data.json");

    let result = cod2lab()
        .arg("--input-dir")
        .arg(dir.path())
        .arg("--output")
        .arg(&output)
        .output()
        .unwrap();
    assert!(!result.status.success());
    assert!(!output.exists());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("game version mismatch"));
}

#[test]
fn missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let status = cod2lab()
        .arg("--input-dir")
        .arg(dir.path())
        .arg("--output")
        .arg(dir.path().join("data.json"))
        .status()
        .unwrap();
    assert!(!status.success());
}
