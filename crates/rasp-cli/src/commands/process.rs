//! File-based processing command.
//!
//! Each channel of the input gets its own processing instance. Instances
//! share one published table and run on their own threads.

use std::path::PathBuf;
use std::thread;

use anyhow::bail;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rasp_core::{linear_to_db, peak, rms};
use rasp_effects::Distortion;

use super::common::{ParamArgs, describe};
use crate::wav::{Audio, read_wav, write_wav};

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    #[command(flatten)]
    params: ParamArgs,

    /// Processing block size
    #[arg(long, default_value = "512", value_parser = clap::value_parser!(u32).range(1..=65536))]
    block_size: u32,

    /// Output bit depth (16, 24 or 32); defaults to the input's
    #[arg(long, value_parser = parse_bit_depth)]
    bit_depth: Option<u16>,

    /// Suppress the progress bar and summary
    #[arg(short, long)]
    quiet: bool,
}

fn parse_bit_depth(s: &str) -> Result<u16, String> {
    match s.parse::<u16>() {
        Ok(bits @ (16 | 24 | 32)) => Ok(bits),
        _ => Err(format!("unsupported bit depth '{s}' (expected 16, 24 or 32)")),
    }
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    let params = args.params.resolve()?;
    let input = read_wav(&args.input)?;
    if input.frames() == 0 {
        bail!("{} contains no audio", args.input.display());
    }
    let sample_rate = input.sample_rate as f32;

    if !args.quiet {
        println!("Reading {}...", args.input.display());
        println!(
            "  {} channel(s), {} frames, {} Hz, {:.2}s",
            input.channels.len(),
            input.frames(),
            input.sample_rate,
            input.duration_secs()
        );
        println!("Processing with {}", describe(&params));
    }
    tracing::info!(
        input = %args.input.display(),
        channels = input.channels.len(),
        sample_rate = input.sample_rate,
        "processing"
    );

    let mut distortion = Distortion::with_params(params, sample_rate);
    distortion.realtime_initialize();
    for _ in &input.channels {
        distortion.realtime_add_processor(1, sample_rate);
    }

    let progress = if args.quiet {
        ProgressBar::hidden()
    } else {
        let total = (input.frames() * input.channels.len()) as u64;
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
                .progress_chars("##-"),
        );
        bar
    };

    let block_size = args.block_size as usize;
    let mut outputs: Vec<Vec<f32>> = input
        .channels
        .iter()
        .map(|channel| vec![0.0; channel.len()])
        .collect();

    {
        let (table, instances) = distortion.realtime_instances_mut();
        let table = &*table;
        let progress = &progress;
        thread::scope(|scope| {
            let lanes = instances.iter_mut().zip(&input.channels).zip(&mut outputs);
            for ((instance, inp), out) in lanes {
                scope.spawn(move || {
                    for (in_block, out_block) in
                        inp.chunks(block_size).zip(out.chunks_mut(block_size))
                    {
                        let done = instance.process_block(table, in_block, out_block);
                        progress.inc(done as u64);
                    }
                });
            }
        });
    }
    progress.finish_and_clear();
    distortion.realtime_finalize();

    if !args.quiet {
        print_stats("Input: ", &input.channels);
        print_stats("Output:", &outputs);
    }

    let output = Audio {
        channels: outputs,
        sample_rate: input.sample_rate,
        bits_per_sample: args.bit_depth.unwrap_or(match input.bits_per_sample {
            bits @ (16 | 24 | 32) => bits,
            _ => 32,
        }),
    };
    write_wav(&args.output, &output)?;
    tracing::info!(output = %args.output.display(), bits = output.bits_per_sample, "written");

    if !args.quiet {
        println!("Wrote {}", args.output.display());
    }
    Ok(())
}

fn print_stats(label: &str, channels: &[Vec<f32>]) {
    let peak_db = channels
        .iter()
        .map(|c| linear_to_db(f64::from(peak(c))))
        .fold(f64::NEG_INFINITY, f64::max);
    let rms_db = channels
        .iter()
        .map(|c| linear_to_db(f64::from(rms(c))))
        .fold(f64::NEG_INFINITY, f64::max);
    println!("  {label} RMS {rms_db:.1} dB, Peak {peak_db:.1} dB");
}
