use super::*;

fn pcm(channels: u16, samples: Vec<f32>) -> AudioPcm {
    AudioPcm {
        sample_rate: 10,
        channels,
        interleaved_f32: samples,
    }
}

#[test]
fn music_alone_plays_at_full_music_volume() {
    let music = pcm(2, vec![1.0; 40]);
    let out = mix_music_and_narration(Some(&music), None, 1.0, 10, 2);
    assert_eq!(out.len(), 20);
    assert!(out.iter().all(|&s| (s - 0.8).abs() < 1e-6));
}

#[test]
fn narration_ducks_music() {
    let music = pcm(2, vec![1.0; 20]);
    let narration = pcm(1, vec![0.5; 10]);
    let out = mix_music_and_narration(Some(&music), Some(&narration), 1.0, 10, 2);
    assert!(out.iter().all(|&s| (s - (0.3 + 0.35)).abs() < 1e-6));
}

#[test]
fn short_sources_leave_silence_and_output_is_clamped() {
    let loud = pcm(1, vec![2.0; 5]);
    let out = mix_sources(&[(&loud, 1.0)], 1.0, 10, 2);
    assert_eq!(out.len(), 20);
    assert_eq!(out[0], 1.0);
    assert_eq!(out[1], 1.0);
    assert_eq!(out[19], 0.0);
}

#[test]
fn nothing_to_mix_is_silence() {
    let out = mix_music_and_narration(None, None, 0.5, 10, 2);
    assert_eq!(out, vec![0.0; 10]);
}

#[test]
fn writes_little_endian_floats() {
    let dir = std::env::temp_dir().join(format!("reelcraft_mix_{}", std::process::id()));
    let path = dir.join("mix.f32le");
    write_f32le_file(&[0.25, -0.5], &path).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes.len(), 8);
    assert_eq!(f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]), 0.25);
    let _ = std::fs::remove_dir_all(&dir);
}
