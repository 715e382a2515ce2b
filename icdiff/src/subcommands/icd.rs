use std::time::Instant;

use color_eyre::Result;
use indexmap::IndexMap;
use ndarray::{s, ArrayView1};

use crate::args::IcdArgs;
use crate::io::{open_marker_writer, write_marker_values};
use crate::read_haplotypes::read_haplotypes;
use crate::structs::{Allele, HaplotypeSet};
use crate::subcommands::dedup::deduplicate;

/// The side a window prefers to grow to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocDirection {
    Left,
    Right,
}

impl LocDirection {
    pub fn toggle(self) -> Self {
        match self {
            LocDirection::Left => LocDirection::Right,
            LocDirection::Right => LocDirection::Left,
        }
    }
}

impl std::fmt::Display for LocDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            LocDirection::Right => write!(f, "right"),
            LocDirection::Left => write!(f, "left"),
        }
    }
}

/// Inclusive range of marker indexes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub left: usize,
    pub right: usize,
}

impl Window {
    pub fn new(location: usize) -> Self {
        Self {
            left: location,
            right: location,
        }
    }

    pub fn width(&self) -> usize {
        self.right - self.left + 1
    }

    pub fn spans(&self, nmarkers: usize) -> bool {
        self.left == 0 && self.right + 1 >= nmarkers
    }

    /// Grows the window by one marker, to the other side if the preferred side is at the end.
    /// A window spanning every marker stays as is.
    pub fn expand(&mut self, direction: LocDirection, nmarkers: usize) {
        match direction {
            LocDirection::Left if self.left > 0 => self.left -= 1,
            LocDirection::Left => self.right = (self.right + 1).min(nmarkers - 1),
            LocDirection::Right if self.right + 1 < nmarkers => self.right += 1,
            LocDirection::Right => self.left = self.left.saturating_sub(1),
        }
    }
}

#[doc(hidden)]
pub fn run(args: IcdArgs) -> Result<()> {
    let mut writer = open_marker_writer(args.output.clone())?;

    for path in &args.files {
        let start = Instant::now();

        let mut set = read_haplotypes(path)?;
        deduplicate(&mut set, args.dedup.min_differences);

        let values = marker_ic_diffs(&set, args.constrain());
        write_marker_values(&set, &values, &mut writer)?;

        tracing::info!(
            "Completed {} in {:.3} seconds",
            path.display(),
            start.elapsed().as_secs_f64()
        );
    }

    Ok(())
}

/// Information content difference of every marker in order
pub fn marker_ic_diffs(set: &HaplotypeSet, constrain: bool) -> Vec<f64> {
    tracing::debug!(
        "Computing the information content difference for {} markers over {} haplotypes",
        set.nmarkers(),
        set.nhaplotypes()
    );

    (0..set.nmarkers())
        .map(|location| ic_diff(set, location, constrain))
        .collect()
}

/// Information content difference of the marker at `location`.
///
/// The window around the marker is grown twice, first preferring the left and then the right side,
/// and the mean of the two sums is returned. An empty set has no difference.
///
/// With `constrain` the information content of a window is capped to log2 of the number of
/// haplotypes, the most a population of that size can carry.
///
/// # Panics
///
/// If `location` is not a marker index of a non-empty set.
pub fn ic_diff(set: &HaplotypeSet, location: usize, constrain: bool) -> f64 {
    if set.nhaplotypes() == 0 {
        return 0.0;
    }

    let left = directional_ic_diff(set, location, constrain, LocDirection::Left);
    let right = directional_ic_diff(set, location, constrain, LocDirection::Right);

    (left + right) / 2.0
}

/// Sum of the normalized information deficits of the windows visited while growing a window
/// from `location` until every haplotype has a unique allele pattern in it, or the window spans
/// all markers. `direction` is the side the window grows to first, after which the sides alternate.
///
/// # Panics
///
/// If `location` is not a marker index of a non-empty set.
pub fn directional_ic_diff(
    set: &HaplotypeSet,
    location: usize,
    constrain: bool,
    direction: LocDirection,
) -> f64 {
    let nhaplotypes = set.nhaplotypes();
    let nmarkers = set.nmarkers();

    if nhaplotypes == 0 {
        return 0.0;
    }
    assert!(
        location < nmarkers,
        "Marker {location} is out of bounds for {nmarkers} markers"
    );

    let ic_target = (nhaplotypes as f64).log2();

    let mut window = Window::new(location);
    let mut direction = direction;
    let mut ic_diff_sum = 0.0;
    let mut num_different = 0;

    while num_different < nhaplotypes {
        let width = window.width() as f64;
        let ic_max = if constrain {
            width.min(ic_target)
        } else {
            width
        };

        let (mut ic_value, patterns) = window_entropy(set, &window);
        num_different = patterns;

        // A single haplotype carries no information to fall short of
        if ic_max > 0.0 {
            ic_diff_sum += (ic_max - ic_value) / ic_max;
        }

        tracing::trace!(
            "Marker {location} growing {direction}: window {}-{}, {num_different} patterns, entropy {ic_value} (max {ic_max})",
            window.left,
            window.right,
        );

        if window.spans(nmarkers) {
            break;
        }

        window.expand(direction, nmarkers);
        direction = direction.toggle();

        // Never true for 0-based windows as `right < nmarkers`
        if window.left == 1 && window.right == nmarkers {
            ic_value = ic_target;
            tracing::warn!("Window covers the entire chromosome, entropy set to {ic_value}");
        }
    }

    ic_diff_sum
}

/// Shannon entropy in bits of the allele patterns of the haplotypes within the window,
/// and the number of distinct patterns.
pub fn window_entropy(set: &HaplotypeSet, window: &Window) -> (f64, usize) {
    let mut patterns: IndexMap<ArrayView1<Allele>, usize> = IndexMap::new();

    for haplotype in set.haplotypes_iter() {
        let pattern = haplotype.slice_move(s![window.left..=window.right]);
        *patterns.entry(pattern).or_insert(0) += 1;
    }

    let n = set.nhaplotypes() as f64;
    let entropy = patterns
        .values()
        .map(|count| {
            let p = *count as f64 / n;
            -p * p.log2()
        })
        .sum();

    (entropy, patterns.len())
}
