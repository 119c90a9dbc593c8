use super::*;

#[test]
fn parse_f32le_requires_alignment() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&0.5f32.to_le_bytes());
    bytes.extend_from_slice(&(-1.0f32).to_le_bytes());
    assert_eq!(parse_f32le(&bytes).unwrap(), vec![0.5, -1.0]);
    assert!(parse_f32le(&bytes[..5]).is_err());
}

#[test]
fn stereo_downmix_and_duration() {
    let pcm = AudioPcm {
        sample_rate: 4,
        channels: 2,
        interleaved_f32: vec![1.0, 0.0, 0.5, 0.5, -1.0, 1.0, 0.2, 0.4],
    };
    assert_eq!(pcm.frames(), 4);
    assert_eq!(pcm.duration_secs(), 1.0);
    let mono = pcm.to_mono();
    assert_eq!(mono.len(), 4);
    assert!((mono[0] - 0.5).abs() < 1e-6);
    assert!((mono[3] - 0.3).abs() < 1e-6);
}

#[test]
fn missing_file_is_an_input_error() {
    let err = decode_for_mix(Path::new("/definitely/not/here.mp3")).unwrap_err();
    assert!(matches!(err, ReelError::Input(_)));
}
