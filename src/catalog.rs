/*!
Reading and writing of the line-oriented catalog files shared with the
downstream training tools.

One wavelet per line:

```text
<k> <x1> <y1> <w1> <h1> ... <xk> <yk> <wk> <hk> <weight1> ... <weightk>
```

The downstream optimizers append their statistics (priors, means,
standard deviations, histogram buckets) after the weight list; those
fields ride along on a loaded record as an uninterpreted numeric tail.
 */

use std::fs;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::wavelet::{HaarWavelet, Rect};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// One loaded catalog line: the wavelet plus whatever numeric fields a
/// downstream tool appended after the weights.
#[derive(Debug, Clone)]
pub struct CatalogRecord {
    pub wavelet: HaarWavelet,
    pub tail: Vec<f64>,
}

/// A line the loader could not parse. Reported, never fatal.
#[derive(Debug, Clone)]
pub struct MalformedRecord {
    /// 1-based line number in the input file.
    pub line_number: usize,
    pub reason: String,
}

/// Result of loading a catalog file.
#[derive(Debug, Default)]
pub struct LoadedCatalog {
    pub records: Vec<CatalogRecord>,
    pub malformed: Vec<MalformedRecord>,
}

/// Loads a catalog. Input ends at EOF or at the first blank line.
/// Malformed lines are collected and skipped so the checks still run
/// over everything that could be read.
pub fn load_catalog(path: &Path) -> Result<LoadedCatalog, CatalogError> {
    let reader = BufReader::new(File::open(path)?);
    let mut catalog = LoadedCatalog::default();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            break;
        }
        match parse_record(&line) {
            Ok(record) => catalog.records.push(record),
            Err(reason) => catalog.malformed.push(MalformedRecord {
                line_number: index + 1,
                reason,
            }),
        }
    }
    Ok(catalog)
}

/// Writes the catalog through a sibling temporary file and an atomic
/// rename, so a failed run never leaves a truncated catalog behind.
pub fn save_catalog(path: &Path, wavelets: &[HaarWavelet]) -> Result<(), CatalogError> {
    let mut tmp = path.as_os_str().to_os_string();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let written = (|| -> Result<(), CatalogError> {
        let mut writer = BufWriter::new(File::create(&tmp)?);
        for wavelet in wavelets {
            writeln!(writer, "{}", wavelet)?;
        }
        writer.flush()?;
        Ok(())
    })();
    if let Err(err) = written {
        let _ = fs::remove_file(&tmp);
        return Err(err);
    }

    fs::rename(&tmp, path)?;
    Ok(())
}

fn parse_record(line: &str) -> Result<CatalogRecord, String> {
    let mut tokens = line.split_whitespace();
    let dimensions: usize = tokens
        .next()
        .ok_or_else(|| "empty record".to_string())?
        .parse()
        .map_err(|_| "dimension count is not an integer".to_string())?;
    if dimensions == 0 {
        return Err("dimension count must be at least 1".to_string());
    }

    let mut rects = Vec::with_capacity(dimensions);
    for i in 0..dimensions {
        let mut field = |name: &str| -> Result<i32, String> {
            tokens
                .next()
                .ok_or_else(|| format!("missing {} of rectangle {}", name, i + 1))?
                .parse::<i32>()
                .map_err(|_| format!("{} of rectangle {} is not an integer", name, i + 1))
        };
        let x = field("x")?;
        let y = field("y")?;
        let width = field("width")?;
        let height = field("height")?;
        rects.push(Rect::new(x, y, width, height));
    }

    let mut weights = Vec::with_capacity(dimensions);
    for i in 0..dimensions {
        let weight = tokens
            .next()
            .ok_or_else(|| format!("missing weight {}", i + 1))?
            .parse::<f32>()
            .map_err(|_| format!("weight {} is not a number", i + 1))?;
        weights.push(weight);
    }

    let mut tail = Vec::new();
    for token in tokens {
        let value = token
            .parse::<f64>()
            .map_err(|_| format!("trailing field {:?} is not a number", token))?;
        tail.push(value);
    }

    Ok(CatalogRecord {
        wavelet: HaarWavelet::new(rects, weights),
        tail,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_plain_record() {
        let record = parse_record("2 0 2 3 4 3 2 3 4 1 -1").unwrap();
        assert_eq!(record.wavelet.dimensions(), 2);
        assert_eq!(record.wavelet.rects()[1], Rect::new(3, 2, 3, 4));
        assert_eq!(record.wavelet.weights(), &[1.0, -1.0]);
        assert!(record.tail.is_empty());
    }

    #[test]
    fn keeps_the_statistics_tail() {
        let record = parse_record("2 0 0 3 3 6 0 3 3 1 -1 0.5 0.25 0.25").unwrap();
        assert_eq!(record.tail, vec![0.5, 0.25, 0.25]);
    }

    #[test]
    fn rejects_truncated_records() {
        assert!(parse_record("2 0 0 3 3 6 0 3").is_err());
        assert!(parse_record("2 0 0 3 3 6 0 3 3 1").is_err());
        assert!(parse_record("0").is_err());
    }

    #[test]
    fn rejects_non_numeric_tokens() {
        assert!(parse_record("2 0 0 3 three 6 0 3 3 1 -1").is_err());
        assert!(parse_record("2 0 0 3 3 6 0 3 3 1 -1 x").is_err());
        assert!(parse_record("two 0 0 3 3 6 0 3 3 1 -1").is_err());
    }

    #[test]
    fn record_format_round_trips_through_display() {
        let line = "2 0 2 3 4 3 2 3 4 1 -1";
        let record = parse_record(line).unwrap();
        assert_eq!(record.wavelet.to_string(), line);
    }
}
