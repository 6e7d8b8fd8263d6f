#![cfg(feature = "cli")]

use std::path::Path;
use std::process::{Command, Output};

use icon_compositor::{Bounds, Color, Composition, ExportConfig, Point, Shape};

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_icon-compositor"))
        .current_dir(dir)
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn cli_writes_both_icons() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("icons");
    let out_arg = out.to_string_lossy().to_string();

    let output = run(
        dir.path(),
        &["--design", "lightning-bolt", "--size", "512", "--out-dir", &out_arg],
    );
    assert!(output.status.success(), "{output:?}");

    let icon = image::open(out.join("app_icon.png")).unwrap();
    assert_eq!(icon.color(), image::ColorType::Rgb8);
    assert_eq!(icon.width(), 512);

    let fg = image::open(out.join("app_icon_foreground.png")).unwrap();
    assert_eq!(fg.color(), image::ColorType::Rgba8);
    assert_eq!(fg.to_rgba8().get_pixel(0, 0).0, [0, 0, 0, 0]);
}

#[test]
fn flags_override_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let from_file = ExportConfig {
        out_dir: dir.path().join("from-file"),
        size: 1024,
        icon_file: "full.png".to_string(),
        ..ExportConfig::default()
    };
    let config_path = dir.path().join("config.json");
    std::fs::write(&config_path, from_file.to_json_pretty().unwrap()).unwrap();

    let flag_dir = dir.path().join("from-flag");
    let output = run(
        dir.path(),
        &[
            "--config",
            &config_path.to_string_lossy(),
            "--out-dir",
            &flag_dir.to_string_lossy(),
            "--size",
            "400",
            "--design",
            "lightning-bolt",
        ],
    );
    assert!(output.status.success(), "{output:?}");

    // File names come from the config, directory and size from the flags
    assert!(!dir.path().join("from-file").exists());
    let icon = image::open(flag_dir.join("full.png")).unwrap();
    assert_eq!(icon.width(), 400);
    assert!(flag_dir.join("app_icon_foreground.png").exists());
}

#[test]
fn dump_json_prints_composition_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(dir.path(), &["--design", "lightning-bolt", "--dump-json"]);
    assert!(output.status.success(), "{output:?}");

    let json = String::from_utf8(output.stdout).unwrap();
    let composition = Composition::from_json(&json).unwrap();
    assert_eq!(composition.name, "lightning-bolt");
    assert_eq!(composition.size, 1024);
    assert!(!dir.path().join("app_icon.png").exists());
}

#[test]
fn composition_file_is_rendered_at_its_own_size() {
    let dir = tempfile::tempdir().unwrap();
    let composition = Composition::new("dot", 48, Color::rgb(0x2D, 0xBE, 0x6C))
        .background(Shape::ellipse(
            Bounds::around(Point::new(24, 24), 20),
            Color::rgb(0x1B, 0x8F, 0x4E),
        ))
        .foreground(Shape::rectangle(
            Bounds::new(20, 20, 28, 28),
            Color::rgba(255, 255, 255, 0x80),
        ));
    let path = dir.path().join("dot.json");
    std::fs::write(&path, composition.to_json_pretty().unwrap()).unwrap();

    let output = run(dir.path(), &["--composition", &path.to_string_lossy()]);
    assert!(output.status.success(), "{output:?}");

    let icon = image::open(dir.path().join("app_icon.png")).unwrap().to_rgb8();
    assert_eq!(icon.width(), 48);
    assert_eq!(icon.get_pixel(24, 24).0, [255, 255, 255]);

    let fg = image::open(dir.path().join("app_icon_foreground.png"))
        .unwrap()
        .to_rgba8();
    assert_eq!(fg.get_pixel(24, 24).0, [255, 255, 255, 0x80]);
}

#[test]
fn composition_conflicts_with_design() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(
        dir.path(),
        &["--composition", "any.json", "--design", "ev-charging"],
    );
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn oversized_canvas_is_an_error_not_a_crash() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(
        dir.path(),
        &["--size", "1000000000", "--design", "lightning-bolt", "--dump-json"],
    );
    // anyhow errors exit with 1; a panic would exit with 101
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("canvas size"), "{stderr}");
}
