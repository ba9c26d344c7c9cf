use super::*;
use std::path::PathBuf;

fn frame(w: u32, h: u32, rgba: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width: w,
        height: h,
        data: rgba.repeat((w * h) as usize),
        premultiplied: true,
    }
}

fn cfg(w: u32, h: u32) -> SinkConfig {
    SinkConfig {
        width: w,
        height: h,
        fps: 30.0,
    }
}

#[test]
fn sink_config_validation_catches_bad_values() {
    assert!(cfg(4, 4).validate().is_ok());
    assert!(cfg(0, 4).validate().is_err());
    assert!(
        SinkConfig {
            fps: 0.0,
            ..cfg(4, 4)
        }
        .validate()
        .is_err()
    );
    assert!(
        SinkConfig {
            fps: f64::NAN,
            ..cfg(4, 4)
        }
        .validate()
        .is_err()
    );
}

#[test]
fn in_memory_sink_captures_in_order() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg(2, 2)).unwrap();
    sink.push_frame(0, 16.0, &frame(2, 2, [0, 0, 0, 0])).unwrap();
    sink.push_frame(1, 50.0, &frame(2, 2, [10, 0, 0, 10])).unwrap();
    sink.end().unwrap();

    assert!(sink.finished);
    assert_eq!(sink.timestamps(), vec![16.0, 50.0]);
    assert_eq!(sink.frames[1].index, 1);
    assert_eq!(sink.config, Some(cfg(2, 2)));
}

#[test]
fn frame_file_names_are_zero_padded() {
    assert_eq!(PngSequenceSink::frame_file_name(0), "frame_00000.png");
    assert_eq!(PngSequenceSink::frame_file_name(42), "frame_00042.png");
}

#[test]
fn png_sink_rejects_push_before_begin_and_size_mismatch() {
    let dir = PathBuf::from("target").join("unit_png_sink_reject");
    let mut sink = PngSequenceSink::new(&dir);
    assert!(sink.push_frame(0, 0.0, &frame(2, 2, [0; 4])).is_err());

    sink.begin(cfg(2, 2)).unwrap();
    assert!(sink.push_frame(0, 0.0, &frame(3, 2, [0; 4])).is_err());
    assert!(sink.written().is_empty());
}

#[test]
fn png_sink_writes_straight_alpha_files() {
    let dir = PathBuf::from("target").join("unit_png_sink_write");
    let _ = std::fs::remove_dir_all(&dir);

    let mut sink = PngSequenceSink::new(&dir);
    sink.begin(cfg(2, 2)).unwrap();
    // Premultiplied red at 50% alpha.
    sink.push_frame(3, 0.0, &frame(2, 2, [128, 0, 0, 128])).unwrap();
    sink.end().unwrap();

    let path = dir.join("frame_00003.png");
    assert_eq!(sink.written(), &[path.clone()]);

    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (2, 2));
    let px = img.get_pixel(1, 1).0;
    assert_eq!(px[3], 128);
    assert!(px[0] >= 254);
}
