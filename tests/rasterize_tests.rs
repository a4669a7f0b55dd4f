//! # Rasterizer Tests
//!
//! Drives [`ImageMagickRenderer`] with a stand-in `convert` script so the
//! temporary PNG handling can be checked without ImageMagick installed.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use image::{Luma, Rgba, RgbaImage};

use weatherslip::WeatherslipError;
use weatherslip::render::dither::DitheringAlgorithm;
use weatherslip::render::rasterize::{ICON_SIZE, IconRenderer, ImageMagickRenderer, WHITE};

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn entries(dir: &Path) -> usize {
    fs::read_dir(dir).unwrap().count()
}

// One test so the scripts are written and executed sequentially.
#[test]
fn test_temporary_png_is_removed_on_success_and_failure() {
    let fixtures = tempfile::tempdir().unwrap();
    let scratch = tempfile::tempdir().unwrap();

    let svg = fixtures.path().join("wi-day-rain.svg");
    fs::write(&svg, r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#).unwrap();

    // 300x150 transparent canvas with an opaque black block in the middle
    let png = fixtures.path().join("rendered.png");
    let mut canvas = RgbaImage::from_pixel(300, 150, Rgba([0, 0, 0, 0]));
    for y in 50..100 {
        for x in 100..200 {
            canvas.put_pixel(x, y, Rgba([0, 0, 0, 255]));
        }
    }
    canvas.save(&png).unwrap();

    // success: log the arguments, copy the fixture to the last argument
    let args_log = fixtures.path().join("args.log");
    let ok_script = write_script(
        fixtures.path(),
        "fake-convert",
        &format!(
            "echo \"$@\" > '{}'\nfor last; do :; done\ncp '{}' \"$last\"",
            args_log.display(),
            png.display()
        ),
    );

    let renderer = ImageMagickRenderer::new()
        .program(&ok_script)
        .temp_dir(scratch.path());
    let bitmap = renderer.render(&svg, ICON_SIZE, ICON_SIZE, WHITE).unwrap();

    assert_eq!((bitmap.width(), bitmap.height()), (256, 128));
    assert_eq!(*bitmap.as_gray().get_pixel(0, 0), Luma([255]));
    assert_eq!(*bitmap.as_gray().get_pixel(128, 64), Luma([0]));
    assert_eq!(entries(scratch.path()), 0, "temporary PNG left behind");

    let args = fs::read_to_string(&args_log).unwrap();
    assert!(args.starts_with("-background #ffffff -density 900 "), "{}", args);
    assert!(args.contains("-resize 256x256"), "{}", args);
    assert!(args.trim_end().ends_with(".png"), "{}", args);

    let raster = bitmap
        .to_raster(DitheringAlgorithm::FloydSteinberg, false)
        .unwrap();
    assert_eq!(raster.width_dots, 256);
    assert_eq!(raster.height, 128);
    assert_eq!(raster.data.len(), 32 * 128);

    // failure: convert exits non-zero
    let failing_script = write_script(
        fixtures.path(),
        "failing-convert",
        "echo 'convert: no decode delegate for this image format' >&2\nexit 1",
    );
    let renderer = ImageMagickRenderer::new()
        .program(&failing_script)
        .temp_dir(scratch.path());
    let err = renderer.render(&svg, ICON_SIZE, ICON_SIZE, WHITE).unwrap_err();

    assert!(matches!(err, WeatherslipError::Render(_)));
    assert!(err.to_string().contains("no decode delegate"));
    assert_eq!(entries(scratch.path()), 0, "temporary PNG left behind");

    // failure: convert "succeeds" but writes garbage
    let garbage_script = write_script(
        fixtures.path(),
        "garbage-convert",
        "for last; do :; done\necho 'not a png' > \"$last\"",
    );
    let renderer = ImageMagickRenderer::new()
        .program(&garbage_script)
        .temp_dir(scratch.path());
    let err = renderer.render(&svg, ICON_SIZE, ICON_SIZE, WHITE).unwrap_err();

    assert!(matches!(err, WeatherslipError::Render(_)));
    assert_eq!(entries(scratch.path()), 0, "temporary PNG left behind");
}
