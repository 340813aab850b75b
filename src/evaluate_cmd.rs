use anyhow::{Context, Result, bail};
use chrono::NaiveDate;

use omi_evaluate::compare_pc_series;
use omi_io::{load_original_pcs_from_txt_file, load_pcs_from_txt_file};
use omi_pc::PcSeries;

use crate::cli::EvaluateArgs;

pub fn run(args: EvaluateArgs) -> Result<()> {
    let reference = if args.reference_original_format {
        load_original_pcs_from_txt_file(&args.reference)?
    } else {
        load_pcs_from_txt_file(&args.reference)?
    };
    let computed = load_pcs_from_txt_file(&args.computed)?;

    let (reference, computed) = restrict_to_common_dates(&reference, &computed)?;
    let comparison = compare_pc_series(&reference, &computed)
        .context("comparing PC series on the common period")?;

    println!(
        "Compared {} days ({} .. {})",
        reference.len(),
        reference.time()[0],
        reference.time()[reference.len() - 1]
    );
    for (name, agreement) in [("PC1", &comparison.pc1), ("PC2", &comparison.pc2)] {
        println!("{name}:");
        match agreement.correlation {
            Some(corr) => println!("  correlation:        {corr:.4}"),
            None => println!("  correlation:        undefined"),
        }
        println!("  mean difference:    {:.4}", agreement.diff_mean);
        println!("  stddev difference:  {:.4}", agreement.diff_std);
        println!("  68% abs difference: {:.4}", agreement.diff_abs_percent68);
        println!("  95% abs difference: {:.4}", agreement.diff_abs_percent95);
        println!("  99% abs difference: {:.4}", agreement.diff_abs_percent99);
    }
    Ok(())
}

/// Restricts both series to the dates present in each.
fn restrict_to_common_dates(a: &PcSeries, b: &PcSeries) -> Result<(PcSeries, PcSeries)> {
    let b_dates: std::collections::BTreeSet<NaiveDate> = b.time().iter().copied().collect();
    let common: Vec<NaiveDate> = a
        .time()
        .iter()
        .copied()
        .filter(|d| b_dates.contains(d))
        .collect();
    if common.is_empty() {
        bail!("the two PC files share no dates");
    }
    Ok((subset(a, &common)?, subset(b, &common)?))
}

fn subset(series: &PcSeries, dates: &[NaiveDate]) -> Result<PcSeries> {
    let wanted: std::collections::BTreeSet<NaiveDate> = dates.iter().copied().collect();
    let mut time = Vec::with_capacity(dates.len());
    let mut pc1 = Vec::with_capacity(dates.len());
    let mut pc2 = Vec::with_capacity(dates.len());
    for (i, date) in series.time().iter().enumerate() {
        if wanted.contains(date) {
            time.push(*date);
            pc1.push(series.pc1()[i]);
            pc2.push(series.pc2()[i]);
        }
    }
    Ok(PcSeries::new(time, pc1, pc2)?)
}
