//! Display contour statistics or WAV file metadata.

use clap::Args;
use melosynth_core::{AdditiveSynth, NegativePolicy, SegmentKind, SynthConfig, VoicingGate};
use melosynth_io::{read_contour_csv, read_wav_info};
use std::path::{Path, PathBuf};

/// Display contour or WAV file information.
#[derive(Args)]
pub struct InfoArgs {
    /// Path to a contour CSV or a WAV file
    pub file: PathBuf,

    /// Sample rate used to plan segments for a contour
    #[arg(long, default_value = "16000")]
    pub sample_rate: u32,
}

/// Run the info command.
pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    let is_wav = args
        .file
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"));

    if is_wav {
        wav_info(&args.file)
    } else {
        contour_info(&args.file, args.sample_rate)
    }
}

fn wav_info(path: &Path) -> anyhow::Result<()> {
    let info = read_wav_info(path)?;
    let format_str = if info.is_float { "IEEE Float" } else { "PCM" };

    println!("File:        {}", path.display());
    println!("Format:      {} {}-bit", format_str, info.bits_per_sample);
    println!("Channels:    {}", info.channels);
    println!("Sample Rate: {} Hz", info.sample_rate);
    println!(
        "Duration:    {:.3}s ({} frames)",
        info.duration_secs, info.num_frames
    );

    Ok(())
}

fn contour_info(path: &Path, sample_rate: u32) -> anyhow::Result<()> {
    let contour =
        read_contour_csv(path)?.into_contour(NegativePolicy::Silence, &VoicingGate::default())?;
    let config = SynthConfig::builder().sample_rate(sample_rate).build()?;
    let plan = AdditiveSynth::new(config).plan(&contour)?;

    let voiced = contour.voiced_count();
    let voiced_pct = voiced as f64 / contour.len() as f64 * 100.0;

    println!("File:        {}", path.display());
    println!("Points:      {}", contour.len());
    println!("Duration:    {:.3}s", contour.end_time());
    println!("Voiced:      {voiced} ({voiced_pct:.1}%)");
    match contour.median_hop() {
        Some(hop) => println!("Hop:         {:.2} ms (median)", hop * 1000.0),
        None => println!("Hop:         -"),
    }
    match contour.frequency_range() {
        Some((lo, hi)) => println!("Range:       {lo:.1} - {hi:.1} Hz"),
        None => println!("Range:       - (no voiced frames)"),
    }

    println!();
    println!("Segments at {sample_rate} Hz:");
    for kind in [
        SegmentKind::Silent,
        SegmentKind::Onset,
        SegmentKind::Glide,
        SegmentKind::Release,
    ] {
        let count = plan.iter().filter(|s| s.kind() == kind).count();
        println!("  {:8} {count}", format!("{kind:?}"));
    }
    let samples: usize = plan.iter().map(|s| s.len).sum();
    println!("  {:8} {samples} samples", "Total");

    Ok(())
}
