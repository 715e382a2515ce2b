use std::path::PathBuf;

use color_eyre::Result;

use crate::read_haplotypes::read_haplotypes;

#[doc(hidden)]
pub fn run(path: PathBuf) -> Result<()> {
    let set = read_haplotypes(&path)?;
    for marker in set.markers() {
        println!("{marker}");
    }
    Ok(())
}
