//! Curve family listing.

#![allow(clippy::print_literal)]

use clap::Args;
use rasp_effects::Curve;

#[derive(Args)]
pub struct CurvesArgs {
    /// Show what each parameter does for every curve
    #[arg(short, long)]
    long: bool,
}

pub fn run(args: CurvesArgs) -> anyhow::Result<()> {
    println!("Curves");
    println!("======");
    println!();
    println!("  {:>2}  {:16}  {}", "#", "Id", "Name");
    println!("  {:>2}  {:16}  {}", "-", "--", "----");

    for curve in Curve::ALL {
        println!("  {:>2}  {:16}  {}", curve.index(), curve.id(), curve.name());
        if args.long {
            if curve.uses_threshold() {
                println!("{:24}threshold: clipping level", "");
            }
            if curve.uses_noise_floor() {
                println!("{:24}noise_floor: levelling floor", "");
            }
            println!("{:24}param1: {}", "", curve.param1_label());
            if let Some(label) = curve.param2_label() {
                println!("{:24}param2: {}", "", label);
            }
            println!("{:24}repeats: {}", "", curve.repeats_label());
        }
    }
    Ok(())
}
