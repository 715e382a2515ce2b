use std::io::BufRead;
use std::path::Path;

use color_eyre::{
    eyre::{eyre, WrapErr},
    Result,
};

use crate::error::Error;
use crate::io::get_input;
use crate::structs::{Allele, AlleleDict, HaplotypeSet};

/// Columns between the marker label and the first allele in the marker per line layout
const LOCATION_COLUMNS: usize = 1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputFormat {
    /// `marker location allele allele ...`
    #[default]
    MarkerPerLine,
    /// fastPHASE output, two haplotype lines per individual
    FastPhase,
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            InputFormat::MarkerPerLine => write!(f, "marker per line"),
            InputFormat::FastPhase => write!(f, "fastPHASE"),
        }
    }
}

/// Line by line state of a haplotype file read. Allele tokens are interned as they are read.
#[derive(Debug, Default)]
struct HaplotypeParser {
    format: InputFormat,
    in_genotypes: bool,
    // ID of the fastPHASE individual whose haplotype lines are being read and lines still expected
    individual: Option<(String, usize)>,
    markers: Vec<String>,
    alleles: AlleleDict,
    rows: Vec<Vec<Allele>>,
}

impl HaplotypeParser {
    fn push_line(&mut self, line: &str) -> Result<()> {
        let mut tokens = line.split_whitespace();

        // A blank haplotype line is an empty haplotype
        if let Some((id, remaining)) = self.individual.take() {
            let mut row = Vec::with_capacity(self.rows.first().map_or(0, Vec::len));
            for allele in tokens {
                row.push(self.alleles.encode(allele)?);
            }
            self.rows.push(row);
            if remaining > 1 {
                self.individual = Some((id, remaining - 1));
            }
            return Ok(());
        }

        let Some(first) = tokens.next() else {
            return Ok(());
        };

        match self.format {
            InputFormat::MarkerPerLine => {
                if first.starts_with("**") {
                    tracing::info!("Assuming fastPHASE output");
                    self.format = InputFormat::FastPhase;
                    return Ok(());
                }
                self.markers.push(first.to_string());

                for (idx, allele) in tokens.skip(LOCATION_COLUMNS).enumerate() {
                    let allele = self.alleles.encode(allele)?;
                    match self.rows.get_mut(idx) {
                        Some(row) => row.push(allele),
                        None => {
                            tracing::trace!("New haplotype at column {idx}");
                            self.rows.push(vec![allele]);
                        }
                    }
                }
            }
            InputFormat::FastPhase => match first {
                "#" if self.in_genotypes => {
                    let id = tokens.collect::<Vec<_>>().join(" ");
                    tracing::trace!("Reading individual {id:?}");
                    self.individual = Some((id, 2));
                }
                "BEGIN" => {
                    if tokens.next() == Some("GENOTYPES") {
                        self.in_genotypes = true;
                    }
                }
                "END" => self.in_genotypes = false,
                _ => (),
            },
        }

        Ok(())
    }

    fn finish(self) -> Result<HaplotypeSet> {
        if let Some((id, remaining)) = self.individual {
            return Err(Error::UnpairedHaplotype {
                id,
                found: 2 - remaining,
            }
            .into());
        }

        let markers = match self.format {
            InputFormat::MarkerPerLine => self.markers,
            // fastPHASE output has no marker names, R code is 1-based
            InputFormat::FastPhase => {
                let nmarkers = self.rows.first().map_or(0, Vec::len);
                (1..=nmarkers).map(|idx| idx.to_string()).collect()
            }
        };

        tracing::debug!(
            "Read {} haplotypes over {} markers with {} distinct alleles from {} input",
            self.rows.len(),
            markers.len(),
            self.alleles.len(),
            self.format
        );

        HaplotypeSet::from_encoded(self.rows, markers, self.alleles)
    }
}

/// Reads haplotypes from either supported layout, detecting fastPHASE output from its banner
pub fn parse_haplotypes<R: BufRead>(reader: R) -> Result<HaplotypeSet> {
    let mut parser = HaplotypeParser::default();

    for (n, line) in reader.lines().enumerate() {
        let line = line.wrap_err(eyre!("Error reading line {}", n + 1))?;
        parser.push_line(&line)?;
    }

    parser.finish()
}

pub fn read_haplotypes(path: &Path) -> Result<HaplotypeSet> {
    tracing::info!("Reading {}", path.display());
    let input = get_input(Some(path.to_path_buf()))?;
    let reader = std::io::BufReader::new(input);

    parse_haplotypes(reader).wrap_err(eyre!("Error reading haplotypes from {path:?}"))
}

#[cfg(test)]
#[rustfmt::skip]
mod tests {
    use super::*;

    const MARKER_PER_LINE: &str = "\
rs1 100 A A G T
rs2 200 C C T C

rs3 300 G G G A
";

    const FASTPHASE: &str = "\
********************************************
*  Output from fastPHASE                   *
********************************************
BEGIN COMMAND_LINE
fastPHASE -oexample example.inp
END COMMAND_LINE
# not an individual
BEGIN GENOTYPES
# id 1
A C G
A C G
# id 2
G T G
T C A
END GENOTYPES
";

    #[test]
    fn marker_per_line() {
        let set = parse_haplotypes(MARKER_PER_LINE.as_bytes()).unwrap();
        assert_eq!(set.nhaplotypes(), 4);
        assert_eq!(set.markers(), &["rs1", "rs2", "rs3"]);
        assert_eq!(set.decode_haplotype(2), vec!["G", "T", "G"]);
        assert_eq!(set.decode_haplotype(3), vec!["T", "C", "A"]);
    }

    #[test]
    fn multi_character_tokens_are_single_alleles() {
        let set = parse_haplotypes("m1 1 Ins A\nm2 2 0 12\n".as_bytes()).unwrap();
        assert_eq!(set.nmarkers(), 2);
        assert_eq!(set.decode_haplotype(0), vec!["Ins", "0"]);
        assert_eq!(set.decode_haplotype(1), vec!["A", "12"]);
    }

    #[test]
    fn marker_per_line_ragged() {
        let err = parse_haplotypes("m1 1 A A G\nm2 2 C C\n".as_bytes()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<Error>(),
            Some(&Error::RaggedHaplotype { index: 2, expected: 2, found: 1 })
        );
    }

    #[test]
    fn haplotype_appearing_late_is_ragged() {
        let err = parse_haplotypes("m1 1 A A\nm2 2 C C G\n".as_bytes()).unwrap_err();
        assert!(err.downcast_ref::<Error>().is_some());
    }

    #[test]
    fn markers_without_haplotypes() {
        let set = parse_haplotypes("m1 1\nm2 2\n".as_bytes()).unwrap();
        assert_eq!(set.nhaplotypes(), 0);
        assert_eq!(set.nmarkers(), 2);
    }

    #[test]
    fn fastphase() {
        let set = parse_haplotypes(FASTPHASE.as_bytes()).unwrap();
        assert_eq!(set.nhaplotypes(), 4);
        assert_eq!(set.markers(), &["1", "2", "3"]);
        assert_eq!(set.decode_haplotype(0), vec!["A", "C", "G"]);
        assert_eq!(set.decode_haplotype(3), vec!["T", "C", "A"]);
    }

    #[test]
    fn fastphase_unpaired() {
        let input = "**\nBEGIN GENOTYPES\n# id 1\nA C G\n";
        let err = parse_haplotypes(input.as_bytes()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<Error>(),
            Some(&Error::UnpairedHaplotype { id: "id 1".into(), found: 1 })
        );
    }

    #[test]
    fn tokens_are_interned_while_reading() {
        let mut parser = HaplotypeParser::default();
        parser.push_line("m1 1 A Del A").unwrap();
        parser.push_line("m2 2 Del Del C").unwrap();

        assert_eq!(parser.alleles.len(), 3);
        assert_eq!(parser.rows, vec![vec![0, 1], vec![1, 1], vec![0, 2]]);

        let set = parser.finish().unwrap();
        assert_eq!(set.decode_haplotype(2), vec!["A", "C"]);
    }

    #[test]
    fn too_many_alleles_fail_while_reading() {
        let mut parser = HaplotypeParser::default();
        for i in 0..=usize::from(Allele::MAX) {
            parser.push_line(&format!("m{i} {i} {i}")).unwrap();
        }
        let err = parser.push_line("overflow 0 one_too_many").unwrap_err();
        assert_eq!(err.downcast_ref::<Error>(), Some(&Error::TooManyAlleles { max: 65536 }));
    }

    #[test]
    fn fastphase_blank_haplotype_line() {
        let input = "**\nBEGIN GENOTYPES\n# id 1\nA C\n\n# id 2\nG T\nT C\nEND GENOTYPES\n";
        let err = parse_haplotypes(input.as_bytes()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<Error>(),
            Some(&Error::RaggedHaplotype { index: 1, expected: 2, found: 0 })
        );
    }

    #[test]
    fn fastphase_ignores_lines_outside_genotypes() {
        let input = "**\n# id 1\nA C\nA C\n";
        let set = parse_haplotypes(input.as_bytes()).unwrap();
        assert_eq!(set.nhaplotypes(), 0);
        assert_eq!(set.nmarkers(), 0);
    }
}
