//! Integration tests for melosynth-io: CSV contour in, PCM WAV out.

use melosynth_core::{NegativePolicy, SynthConfig, VoicingGate, synthesize};
use melosynth_io::{
    PcmSpec, read_contour_csv, read_wav, read_wav_info, write_contour_csv, write_wav,
};
use tempfile::{NamedTempFile, TempDir};

const MELODY_CSV: &str = "\
# time,frequency as saved by the tracker script
0.00,0
0.10,220
0.20,247
0.30,-262
0.40,262
0.50,0
";

#[test]
fn csv_to_wav_pipeline() {
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("melody.csv");
    let wav_path = dir.path().join("melody.wav");
    std::fs::write(&csv_path, MELODY_CSV).unwrap();

    let contour = read_contour_csv(&csv_path)
        .unwrap()
        .into_contour(NegativePolicy::Silence, &VoicingGate::default())
        .unwrap();
    assert_eq!(contour.len(), 6);
    assert_eq!(contour.voiced_count(), 3);

    let config = SynthConfig::builder().sample_rate(8000).build().unwrap();
    let out = synthesize(&contour, config).unwrap();
    write_wav(&wav_path, &out.samples, PcmSpec::new(out.sample_rate)).unwrap();

    let info = read_wav_info(&wav_path).unwrap();
    assert_eq!(info.channels, 1);
    assert_eq!(info.sample_rate, 8000);
    assert_eq!(info.bits_per_sample, 16);
    assert!(!info.is_float);
    assert_eq!(info.num_frames, 4000);
    assert!((info.duration_secs - 0.5).abs() < 1e-9);

    let (loaded, _) = read_wav(&wav_path).unwrap();
    let peak = loaded.iter().fold(0.0f32, |m, &x| m.max(x.abs()));
    assert!((peak - 0.8).abs() < 1e-3, "peak was {peak}");
}

#[test]
fn absolute_policy_voices_negative_frames() {
    let file = NamedTempFile::new().unwrap();
    std::fs::write(file.path(), MELODY_CSV).unwrap();

    let contour = read_contour_csv(file.path())
        .unwrap()
        .into_contour(NegativePolicy::Absolute, &VoicingGate::default())
        .unwrap();
    assert_eq!(contour.voiced_count(), 4);
}

#[test]
fn contour_csv_roundtrip() {
    let file = NamedTempFile::new().unwrap();
    std::fs::write(file.path(), MELODY_CSV).unwrap();
    let original = read_contour_csv(file.path())
        .unwrap()
        .into_contour(NegativePolicy::Silence, &VoicingGate::default())
        .unwrap();

    let out = NamedTempFile::new().unwrap();
    write_contour_csv(out.path(), &original).unwrap();
    let reloaded = read_contour_csv(out.path())
        .unwrap()
        .into_contour(NegativePolicy::Silence, &VoicingGate::default())
        .unwrap();
    assert_eq!(reloaded, original);
}

#[test]
fn silent_contour_writes_zero_samples() {
    let file = NamedTempFile::new().unwrap();
    let contour = melosynth_core::Contour::from_pairs(&[0.0, 0.1], &[0.0, 0.0]).unwrap();
    let out = synthesize(&contour, SynthConfig::default()).unwrap();
    write_wav(file.path(), &out.samples, PcmSpec::new(out.sample_rate)).unwrap();

    let (loaded, _) = read_wav(file.path()).unwrap();
    assert_eq!(loaded.len(), 1600);
    assert!(loaded.iter().all(|&x| x == 0.0));
}

#[test]
fn missing_csv_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = read_contour_csv(dir.path().join("nope.csv")).unwrap_err();
    assert!(matches!(err, melosynth_io::Error::Io(_)));
}
