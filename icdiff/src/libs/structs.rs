use color_eyre::Result;
use indexmap::IndexSet;
use ndarray::iter::Lanes;
use ndarray::{Array2, ArrayView1, Axis, Ix1};

use crate::error::Error;

/// Integer code of an allele token, see [`AlleleDict`]
pub type Allele = u16;

/// Interns the allele tokens of a file. The code of a token is its insertion index.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AlleleDict {
    tokens: IndexSet<String>,
}

impl AlleleDict {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn encode(&mut self, token: &str) -> Result<Allele, Error> {
        if let Some(idx) = self.tokens.get_index_of(token) {
            return Ok(idx as Allele);
        }

        let max = usize::from(Allele::MAX) + 1;
        if self.tokens.len() == max {
            return Err(Error::TooManyAlleles { max });
        }

        let (idx, _) = self.tokens.insert_full(token.to_string());
        Ok(idx as Allele)
    }

    /// Panics if the code was not handed out by this dictionary
    pub fn decode(&self, allele: Allele) -> &str {
        &self.tokens[usize::from(allele)]
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// A haplotype panel: one row per haplotype, one column per marker.
#[derive(Debug, Clone, PartialEq)]
pub struct HaplotypeSet {
    pub matrix: Array2<Allele>,
    markers: Vec<String>,
    alleles: AlleleDict,
}

impl HaplotypeSet {
    /// Builds the matrix from rows of allele tokens, interning them into a new dictionary.
    pub fn from_rows<S: AsRef<str>>(rows: &[Vec<S>], markers: Vec<String>) -> Result<Self> {
        let mut alleles = AlleleDict::new();
        let mut encoded = Vec::with_capacity(rows.len());
        for row in rows {
            let mut codes = Vec::with_capacity(row.len());
            for token in row {
                codes.push(alleles.encode(token.as_ref())?);
            }
            encoded.push(codes);
        }

        Self::from_encoded(encoded, markers, alleles)
    }

    /// Builds the matrix from rows of allele codes handed out by `alleles`.
    ///
    /// Every row has to be as long as the first row and as long as `markers`.
    /// Without any rows the set is empty but still carries the marker labels.
    pub fn from_encoded(
        rows: Vec<Vec<Allele>>,
        markers: Vec<String>,
        alleles: AlleleDict,
    ) -> Result<Self> {
        let nmarkers = markers.len();

        if let Some(first) = rows.first() {
            let expected = first.len();
            for (index, row) in rows.iter().enumerate() {
                if row.len() != expected {
                    return Err(Error::RaggedHaplotype {
                        index,
                        expected,
                        found: row.len(),
                    }
                    .into());
                }
            }
            if expected != nmarkers {
                return Err(Error::MarkerCount {
                    nmarkers,
                    nalleles: expected,
                }
                .into());
            }
        }

        let nhaplotypes = rows.len();
        let flat: Vec<Allele> = rows.into_iter().flatten().collect();
        let matrix = Array2::from_shape_vec((nhaplotypes, nmarkers), flat)?;

        Ok(Self {
            matrix,
            markers,
            alleles,
        })
    }

    pub fn nhaplotypes(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn nmarkers(&self) -> usize {
        self.matrix.ncols()
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    pub fn get_marker_label(&self, idx: usize) -> &str {
        &self.markers[idx]
    }

    pub fn alleles(&self) -> &AlleleDict {
        &self.alleles
    }

    pub fn haplotype(&self, idx: usize) -> ArrayView1<Allele> {
        self.matrix.row(idx)
    }

    pub fn haplotypes_iter(&self) -> Lanes<'_, Allele, Ix1> {
        self.matrix.rows()
    }

    /// Allele tokens of a haplotype in marker order
    pub fn decode_haplotype(&self, idx: usize) -> Vec<&str> {
        self.haplotype(idx)
            .iter()
            .map(|allele| self.alleles.decode(*allele))
            .collect()
    }

    /// Allele tokens of all haplotypes at a marker
    pub fn decode_marker(&self, idx: usize) -> Vec<&str> {
        self.matrix
            .column(idx)
            .iter()
            .map(|allele| self.alleles.decode(*allele))
            .collect()
    }

    /// Keeps only the given haplotypes, in ascending index order
    pub fn select_rows(&mut self, mut to_keep: Vec<usize>) {
        to_keep.sort_unstable();
        to_keep.dedup();
        self.matrix = self.matrix.select(Axis(0), &to_keep);
    }
}
