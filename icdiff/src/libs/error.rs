use thiserror::Error as ThisError;

#[rustfmt::skip]
#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Haplotype {index} has {found} alleles while the first haplotype has {expected}. Haplotypes of unequal length are not supported")]
    RaggedHaplotype { index: usize, expected: usize, found: usize },

    #[error("The file lists {nmarkers} markers but the haplotypes have {nalleles} alleles")]
    MarkerCount { nmarkers: usize, nalleles: usize },

    #[error("The file contains more than {max} distinct allele tokens")]
    TooManyAlleles { max: usize },

    #[error("Individual {id:?} has {found} haplotype lines, expected 2. The fastPHASE file ends prematurely")]
    UnpairedHaplotype { id: String, found: usize },
}
