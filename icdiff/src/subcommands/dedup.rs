use std::collections::BTreeSet;
use std::path::PathBuf;

use color_eyre::Result;
use ndarray::ArrayView1;

use crate::args::DedupArgs;
use crate::io::{open_marker_writer, write_flat_layout};
use crate::read_haplotypes::read_haplotypes;
use crate::structs::{Allele, HaplotypeSet};

#[doc(hidden)]
pub fn run(path: PathBuf, args: DedupArgs, output: PathBuf) -> Result<()> {
    let mut set = read_haplotypes(&path)?;
    deduplicate(&mut set, args.min_differences);

    let mut writer = open_marker_writer(output)?;
    write_flat_layout(&set, &mut writer)?;

    Ok(())
}

/// Number of markers at which two haplotypes differ, counting stops at `cap`.
/// Only the shared prefix of the two haplotypes is compared.
pub fn count_differences(a: ArrayView1<Allele>, b: ArrayView1<Allele>, cap: usize) -> usize {
    a.iter().zip(b.iter()).filter(|(x, y)| x != y).take(cap).count()
}

/// Indexes of haplotypes differing from an earlier kept haplotype at fewer than
/// `min_differences` markers. An index already marked is never used for comparison.
pub fn find_near_duplicates(set: &HaplotypeSet, min_differences: usize) -> BTreeSet<usize> {
    let n = set.nhaplotypes();
    let mut duplicates = BTreeSet::new();

    for i in 0..n {
        if duplicates.contains(&i) {
            continue;
        }
        let kept = set.haplotype(i);

        for j in (i + 1)..n {
            if duplicates.contains(&j) {
                continue;
            }
            if count_differences(kept, set.haplotype(j), min_differences) < min_differences {
                tracing::trace!("Haplotype {j} is a near-duplicate of haplotype {i}");
                duplicates.insert(j);
            }
        }
    }

    duplicates
}

/// Removes near-duplicate haplotypes in place and returns the number removed.
/// The earliest haplotype of a group of near-duplicates is kept.
pub fn deduplicate(set: &mut HaplotypeSet, min_differences: usize) -> usize {
    tracing::info!("Checking for similar haplotypes (< {min_differences} differences)");

    let duplicates = find_near_duplicates(set, min_differences);

    if !duplicates.is_empty() {
        let to_keep = (0..set.nhaplotypes())
            .filter(|idx| !duplicates.contains(idx))
            .collect();
        set.select_rows(to_keep);

        tracing::info!(
            "Removed {} haplotypes, {} haplotypes remain",
            duplicates.len(),
            set.nhaplotypes()
        );
    }

    duplicates.len()
}
