// ICDIFF - Information content difference of haplotype markers
// Copyright (C) 2024  Osma S. Rautila
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
//

//! ICDIFF - Information content difference of haplotype markers
//!
//! For every marker of a haplotype panel this library computes how far the information content
//! of the haplotypes around the marker falls short of what the sample size could carry.
//! Markers with a large difference are poorly resolved by their neighbourhood.
//!
//! The statistic is computed by growing a window around the marker one position at a time,
//! alternating sides, until every haplotype is uniquely identified by its alleles in the window.
//! Each window contributes its normalized entropy deficit. The window is grown twice, starting
//! from the left and from the right, and the two sums are averaged.
//!
//! Before the calculation haplotypes that differ from an earlier haplotype at fewer than
//! `--min-differences` markers are removed, as such differences are more likely genotyping errors
//! than real diversity.
//!
//! ICDIFF commands
//!
//! * Information content difference per marker
//! * Removal of near-duplicate haplotypes
//! * Listing of markers and haplotypes
//!
//! # Input
//!
//! Two layouts are read, optionally gzip, bzip2 or xz compressed:
//!
//! * one marker per line: `marker location allele allele ...`, one allele column per haplotype
//! * fastPHASE output, where each individual contributes two haplotype lines after a `#` line
//!
//! # Running ICDIFF
//!
//! To print the available commands use:
//! ```bash
//! icdiff --help
//! ```
//! To compute the per marker values use:
//! ```bash
//! icdiff icd chr9.txt.gz > chr9_icd.txt
//!
//! icdiff icd chr9_hapguess_switch.out --min-differences 5 -o chr9_icd.txt
//!
//! icdiff dedup chr9.txt.gz -o chr9_dedup.txt
//!```
//!

#[doc(hidden)]
pub mod args;

#[doc(hidden)]
pub mod io;

/// Functions for reading haplotype files into matrices
pub mod read_haplotypes;

/// ICDIFF structs
pub mod structs;

#[doc(hidden)]
pub mod utils;

#[doc(hidden)]
pub mod error;

#[cfg(feature = "clap")]
pub mod clap;
