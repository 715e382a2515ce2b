/// Information content difference of every marker, the main analysis
pub mod icd;

/// Removal of near-duplicate haplotypes
pub mod dedup;

/// Output the marker labels of a haplotype file
pub mod list_markers;

/// Output the haplotypes of a haplotype file
pub mod list_haplotypes;
