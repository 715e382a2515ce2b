use std::path::PathBuf;

use color_eyre::Result;
use itertools::Itertools;

use crate::args::DedupArgs;
use crate::read_haplotypes::read_haplotypes;
use crate::structs::HaplotypeSet;
use crate::subcommands::dedup::deduplicate;

/// Every haplotype as its allele tokens written one after another
pub fn concatenated_haplotypes(set: &HaplotypeSet) -> Vec<String> {
    set.haplotypes_iter()
        .into_iter()
        .map(|haplotype| haplotype.iter().map(|a| set.alleles().decode(*a)).join(""))
        .collect()
}

#[doc(hidden)]
pub fn run(path: PathBuf, dedup: Option<DedupArgs>) -> Result<()> {
    let mut set = read_haplotypes(&path)?;
    if let Some(args) = dedup {
        deduplicate(&mut set, args.min_differences);
    }

    for haplotype in concatenated_haplotypes(&set) {
        println!("{haplotype}");
    }
    Ok(())
}
