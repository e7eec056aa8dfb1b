use std::path::PathBuf;

use super::*;
use crate::fixtures::CiffBuilder;
use crate::format::ciff::decode_ciff;

fn sample(w: u64, h: u64) -> CiffImage {
    decode_ciff(&CiffBuilder::new(w, h).build()).unwrap()
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_raster").join(name);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn rgb_image_keeps_channel_order_and_layout() {
    let img = sample(3, 2);
    let rgb = to_rgb_image(&img).unwrap();
    assert_eq!(rgb.dimensions(), (3, 2));
    for y in 0..2u32 {
        for x in 0..3u32 {
            let p = img.pixel(u64::from(x), u64::from(y)).unwrap();
            assert_eq!(rgb.get_pixel(x, y).0, [p.red, p.green, p.blue]);
        }
    }
}

#[test]
fn empty_image_cannot_be_encoded() {
    let err = to_rgb_image(&sample(0, 4)).unwrap_err();
    assert!(matches!(err, CaffError::Encode(_)));
}

#[test]
fn oversized_dimensions_are_rejected() {
    let mut img = sample(1, 1);
    img.header.width = u64::from(u32::MAX) + 1;
    assert!(matches!(to_rgb_image(&img), Err(CaffError::Encode(_))));
}

#[test]
fn default_output_path_appends_extension() {
    assert_eq!(
        default_output_path(Path::new("dir/pic.caff"), OutputFormat::Jpeg),
        PathBuf::from("dir/pic.caff.jpg")
    );
    assert_eq!(
        default_output_path(Path::new("pic"), OutputFormat::Png),
        PathBuf::from("pic.png")
    );
}

#[test]
fn frame_paths_are_numbered_next_to_base() {
    assert_eq!(
        frame_output_path(Path::new("out/anim.jpg"), 3),
        PathBuf::from("out/anim-0003.jpg")
    );
    assert_eq!(
        frame_output_path(Path::new("anim"), 12),
        PathBuf::from("anim-0012")
    );
}

#[test]
fn validate_rejects_empty_path_and_existing_file() {
    assert!(matches!(
        EncodeConfig::new("", OutputFormat::Png).validate(),
        Err(CaffError::Validation(_))
    ));

    let dir = scratch_dir("existing");
    let path = dir.join("keep.png");
    std::fs::write(&path, b"x").unwrap();
    let mut cfg = EncodeConfig::new(&path, OutputFormat::Png);
    cfg.validate().unwrap();
    cfg.overwrite = false;
    assert!(matches!(cfg.validate(), Err(CaffError::Validation(_))));
}

#[test]
fn png_round_trips_through_image_crate() {
    let dir = scratch_dir("png");
    let path = dir.join("nested").join("out.png");
    let _ = std::fs::remove_file(&path);

    let img = sample(4, 3);
    encode_image(&img, &EncodeConfig::new(&path, OutputFormat::Png)).unwrap();

    let back = image::open(&path).unwrap().to_rgb8();
    assert_eq!(back.dimensions(), (4, 3));
    assert_eq!(back.into_raw(), img.to_rgb_bytes());
}

#[test]
fn jpeg_is_written() {
    let dir = scratch_dir("jpeg");
    let path = dir.join("out.jpg");
    let _ = std::fs::remove_file(&path);

    encode_image(&sample(8, 8), &EncodeConfig::new(&path, OutputFormat::Jpeg)).unwrap();
    let back = image::open(&path).unwrap();
    assert_eq!((back.width(), back.height()), (8, 8));
}
