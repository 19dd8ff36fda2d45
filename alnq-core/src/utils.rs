use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    let reader = BufReader::new(file);

    Ok(reader)
}

///
/// Read all lines of a (possibly gzip'd) text file.
///
/// Trailing `\r` is stripped so files written on Windows parse the same way.
///
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let reader = get_dynamic_reader(path)?;
    reader
        .lines()
        .map(|line| {
            line.map(|l| l.trim_end_matches('\r').to_string())
                .with_context(|| format!("Failed to read line from {:?}", path))
        })
        .collect()
}

///
/// Sum up values stored under the same keys: `into[k] += from[k]` for every key of `from`.
///
pub fn merge_counts<K: Ord + Clone>(into: &mut BTreeMap<K, u32>, from: &BTreeMap<K, u32>) {
    for (k, v) in from {
        *into.entry(k.clone()).or_insert(0) += v;
    }
}
