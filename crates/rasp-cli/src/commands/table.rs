//! Transfer table dump.

use clap::Args;
use rasp_config::ParamsSnapshot;
use rasp_effects::{ShaperTable, TABLE_SIZE};
use serde::Serialize;

use super::common::{ParamArgs, describe};

#[derive(Args)]
pub struct TableArgs {
    #[command(flatten)]
    params: ParamArgs,

    /// Number of evenly spaced entries to print, both ends included
    #[arg(long, default_value = "17", value_parser = clap::value_parser!(u16).range(2..=2049))]
    points: u16,

    /// Print as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct TableDump {
    params: ParamsSnapshot,
    drive: f64,
    makeup_gain: f64,
    output_level: f64,
    residual: f64,
    points: Vec<TablePoint>,
}

#[derive(Serialize)]
struct TablePoint {
    index: usize,
    input: f64,
    output: f64,
}

pub fn run(args: TableArgs) -> anyhow::Result<()> {
    let params = args.params.resolve()?;
    let table = ShaperTable::build(&params);

    let points: Vec<TablePoint> = sample_indices(usize::from(args.points))
        .map(|index| TablePoint {
            index,
            input: ShaperTable::position(index),
            output: table.values()[index],
        })
        .collect();

    if args.json {
        let dump = TableDump {
            params: ParamsSnapshot::from(table.params()),
            drive: table.drive(),
            makeup_gain: table.makeup_gain(),
            output_level: table.output_level(),
            residual: table.residual(),
            points,
        };
        println!("{}", serde_json::to_string_pretty(&dump)?);
        return Ok(());
    }

    println!("{}", describe(table.params()));
    println!(
        "drive {:.4}  makeup {:.4}  output {:.4}  residual {:.4}",
        table.drive(),
        table.makeup_gain(),
        table.output_level(),
        table.residual()
    );
    println!();
    println!("  {:>5}  {:>8}  {:>10}", "index", "input", "output");
    for point in &points {
        println!(
            "  {:>5}  {:>8.4}  {:>10.6}",
            point.index, point.input, point.output
        );
    }
    Ok(())
}

/// `count` indices spread evenly over the table, first and last included.
fn sample_indices(count: usize) -> impl Iterator<Item = usize> {
    let last = TABLE_SIZE - 1;
    let count = count.clamp(2, TABLE_SIZE);
    (0..count).map(move |i| (i * last + (count - 1) / 2) / (count - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_indices_cover_both_ends() {
        let idx: Vec<usize> = sample_indices(17).collect();
        assert_eq!(idx.len(), 17);
        assert_eq!(idx[0], 0);
        assert_eq!(idx[8], 1024);
        assert_eq!(idx[16], 2048);
        assert!(idx.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn sample_indices_full_table() {
        let idx: Vec<usize> = sample_indices(TABLE_SIZE).collect();
        assert_eq!(idx, (0..TABLE_SIZE).collect::<Vec<_>>());
    }
}
