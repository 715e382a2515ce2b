use std::path::PathBuf;

/// Haplotypes differing at fewer markers than this are considered duplicates
pub const DEFAULT_MIN_DIFFERENCES: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct DedupArgs {
    /// Minimum number of differing markers for two haplotypes to be kept as distinct (allows for genotyping errors)
    #[cfg_attr(feature = "clap", arg(short = 'm', long, default_value_t = DEFAULT_MIN_DIFFERENCES))]
    pub min_differences: usize,
}

impl Default for DedupArgs {
    fn default() -> Self {
        Self {
            min_differences: DEFAULT_MIN_DIFFERENCES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct IcdArgs {
    /// Haplotype files, one marker per line or fastPHASE output (gzip, bzip2 and xz are decompressed)
    #[cfg_attr(feature = "clap", arg(required = true, num_args = 1.., value_hint = clap::ValueHint::FilePath))]
    pub files: Vec<PathBuf>,

    #[cfg_attr(feature = "clap", command(flatten))]
    pub dedup: DedupArgs,

    /// Do not cap the information content of a window to log2 of the haplotype count
    #[cfg_attr(feature = "clap", arg(long))]
    pub unconstrained: bool,

    /// Output file, "-" writes to stdout
    #[cfg_attr(feature = "clap", arg(short = 'o', long, default_value_os_t = PathBuf::from("-")))]
    pub output: PathBuf,
}

impl Default for IcdArgs {
    fn default() -> Self {
        Self {
            files: vec![],
            dedup: DedupArgs::default(),
            unconstrained: false,
            output: PathBuf::from("-"),
        }
    }
}

impl IcdArgs {
    pub fn constrain(&self) -> bool {
        !self.unconstrained
    }
}
