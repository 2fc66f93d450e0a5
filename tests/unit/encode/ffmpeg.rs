use super::*;

fn cfg(width: u32, height: u32) -> SinkConfig {
    SinkConfig {
        width,
        height,
        fps: Fps::default(),
    }
}

#[test]
fn sink_config_validation() {
    assert!(validate_sink_config(&cfg(64, 36)).is_ok());
    assert!(validate_sink_config(&cfg(0, 36)).is_err());
    assert!(validate_sink_config(&cfg(63, 36)).is_err());
    assert!(
        validate_sink_config(&SinkConfig {
            fps: Fps { num: 0, den: 1 },
            ..cfg(64, 36)
        })
        .is_err()
    );
}

#[test]
fn flatten_transparent_returns_background() {
    let mut dst = vec![0u8; 4];
    flatten_to_opaque_rgba8(&mut dst, &[0, 0, 0, 0], true, Rgba8::rgb(10, 20, 30)).unwrap();
    assert_eq!(dst, vec![10, 20, 30, 255]);
}

#[test]
fn flatten_opaque_is_identity() {
    let src = [1u8, 2, 3, 255];
    let mut dst = vec![0u8; 4];
    flatten_to_opaque_rgba8(&mut dst, &src, true, Rgba8::rgb(10, 20, 30)).unwrap();
    assert_eq!(dst, src);
}

#[test]
fn flatten_half_alpha_over_black() {
    let mut dst = vec![0u8; 4];
    flatten_to_opaque_rgba8(&mut dst, &[128, 0, 0, 128], true, Rgba8::rgb(0, 0, 0)).unwrap();
    assert_eq!(dst, vec![128, 0, 0, 255]);

    flatten_to_opaque_rgba8(&mut dst, &[255, 0, 0, 128], false, Rgba8::rgb(0, 0, 0)).unwrap();
    assert_eq!(dst, vec![128, 0, 0, 255]);
}

#[test]
fn flatten_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(flatten_to_opaque_rgba8(&mut dst, &[0; 4], true, Rgba8::rgb(0, 0, 0)).is_err());
}

#[test]
fn push_before_begin_fails() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("target/never.mp4"));
    let frame = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 16],
        premultiplied: true,
    };
    assert!(sink.push_frame(FrameIndex(0), &frame).is_err());
    assert!(sink.end().is_err());
}
