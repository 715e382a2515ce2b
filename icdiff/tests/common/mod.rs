#![allow(dead_code)]
use std::path::PathBuf;

use color_eyre::Result;

use icdiff::{read_haplotypes::read_haplotypes, structs::HaplotypeSet};

pub const TOY_FLAT: &str = "tests/data/toy.txt";
pub const TOY_GZ: &str = "tests/data/toy.txt.gz";
pub const TOY_FASTPHASE: &str = "tests/data/toy_fastphase.out";
pub const RAGGED: &str = "tests/data/ragged.txt";
pub const OUTDIR: &str = "tests/results";

pub fn create_toy_set() -> Result<HaplotypeSet> {
    read_haplotypes(&PathBuf::from(TOY_FLAT))
}

/// Path of an output file in the results directory, which is created when missing
pub fn output_path(name: &str) -> PathBuf {
    let dir = PathBuf::from(OUTDIR);
    std::fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

#[cfg(feature = "clap")]
pub fn silent_verbosity() -> icdiff::clap::LogAndVerbosity {
    icdiff::clap::LogAndVerbosity {
        verbosity: 1,
        log_file: None,
        silent: false,
    }
}
