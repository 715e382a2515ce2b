mod common;
use common::{RAGGED, TOY_FLAT, TOY_GZ};

#[cfg(test)]
mod io {
    use super::*;

    use std::io::Read;
    use std::path::PathBuf;

    use icdiff::error::Error;
    use icdiff::read_haplotypes::read_haplotypes;

    #[test]
    fn compressed_input_is_transparent() {
        let mut plain = String::new();
        icdiff::io::get_input(Some(PathBuf::from(TOY_FLAT))).unwrap().read_to_string(&mut plain).unwrap();
        let mut decompressed = String::new();
        icdiff::io::get_input(Some(PathBuf::from(TOY_GZ))).unwrap().read_to_string(&mut decompressed).unwrap();
        assert_eq!(plain, decompressed);

        let flat = read_haplotypes(&PathBuf::from(TOY_FLAT)).unwrap();
        let gz = read_haplotypes(&PathBuf::from(TOY_GZ)).unwrap();
        assert_eq!(flat, gz);
    }

    #[test]
    fn read_toy_file() {
        let set = read_haplotypes(&PathBuf::from(TOY_FLAT)).unwrap();
        assert_eq!(set.nhaplotypes(), 4);
        assert_eq!(set.nmarkers(), 5);
        assert_eq!(set.get_marker_label(2), "m3");
        assert_eq!(set.decode_marker(0), vec!["A", "A", "G", "T"]);
        assert_eq!(set.alleles().len(), 4);
    }

    #[test]
    fn read_ragged_file() {
        let err = read_haplotypes(&PathBuf::from(RAGGED)).unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::RaggedHaplotype { .. })));
    }
}
