use std::io;
use std::path::PathBuf;

use color_eyre::{eyre::eyre, Result};
use csv::{QuoteStyle, Writer, WriterBuilder};
use serde::Serialize;

use crate::structs::HaplotypeSet;
use crate::utils::{format_significant, SIGNIFICANT_DIGITS};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerRecord<'a> {
    pub marker: &'a str,
    pub icd: String,
}

impl<'a> MarkerRecord<'a> {
    pub fn new(marker: &'a str, icd: f64) -> Self {
        Self {
            marker,
            icd: format_significant(icd, SIGNIFICANT_DIGITS),
        }
    }
}

/// Space delimited output without quoting, matching the marker per line input layout
pub fn get_marker_writer<W: io::Write>(output: W) -> Writer<W> {
    WriterBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .flexible(true)
        .double_quote(false)
        .quote_style(QuoteStyle::Never)
        .from_writer(output)
}

pub fn get_input(filename: Option<PathBuf>) -> Result<Box<dyn io::Read>> {
    let input: Box<dyn io::Read> = match filename {
        Some(name) => match name.to_str() {
            Some("-") => Box::new(io::stdin()),
            Some(name) => {
                let r = match niffler::from_path(name) {
                    Ok(x) => x.0,
                    Err(err) => {
                        let msg = format!("failed to open \"{name}\": {err}");
                        return Err(eyre!(msg))?;
                    }
                };
                Box::new(r)
            }
            None => return Err(eyre!("Unknown I/O error")),
        },
        None => Box::new(io::stdin()),
    };
    Ok(input)
}

pub fn get_output(filename: Option<PathBuf>) -> Result<Box<dyn io::Write>> {
    let output: Box<dyn io::Write> = match filename {
        Some(name) => match name.to_str() {
            Some("-") => Box::new(io::stdout()),
            Some(name) => Box::new(
                match std::fs::File::options()
                    .create(true)
                    .write(true)
                    .truncate(true)
                    .open(name)
                {
                    Ok(x) => x,
                    Err(err) => return Err(eyre!("failed to open \"{name}\": {err}"))?,
                },
            ),
            None => return Err(eyre!("Unknown I/O error")),
        },
        None => Box::new(io::stdout()),
    };
    Ok(output)
}

pub fn open_marker_writer(name: PathBuf) -> Result<Writer<Box<dyn io::Write>>> {
    Ok(get_marker_writer(get_output(Some(name))?))
}

pub fn write_marker_values<W: io::Write>(
    set: &HaplotypeSet,
    values: &[f64],
    writer: &mut Writer<W>,
) -> Result<()> {
    for (label, icd) in set.markers().iter().zip(values) {
        writer.serialize(MarkerRecord::new(label, *icd))?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the set back in the marker per line layout with 1-based marker indices as locations
pub fn write_flat_layout<W: io::Write>(set: &HaplotypeSet, writer: &mut Writer<W>) -> Result<()> {
    for (idx, label) in set.markers().iter().enumerate() {
        let location = (idx + 1).to_string();
        let mut record = vec![label.as_str(), location.as_str()];
        record.extend(set.decode_marker(idx));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}
