//! External input interfaces: applicants JSONL and labeled pairs CSV.
//!
//! Both loaders follow the same row-level policy as the trainer itself:
//! malformed rows are skipped and counted, never fatal. Only I/O and
//! file-level format failures propagate as errors.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use csv::ReaderBuilder;
use serde_json::Value;

use crate::dataset::{DataError, LabeledPair};

/// Loads the applicant feature map from a JSONL file.
///
/// Each line is a JSON object with an `id` (string, or number coerced to
/// string) and a `features` array of numbers. Blank lines are ignored.
/// Rows that fail to parse, lack either field, or contain non-numeric
/// features are skipped.
///
/// Returns the feature map and the number of skipped rows. Vectors of the
/// wrong length survive here; `InMemoryPairs::new` excludes them.
pub fn load_applicants_jsonl(
    path: &Path,
) -> Result<(HashMap<String, Vec<f64>>, usize), DataError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut id2x = HashMap::new();
    let mut skipped = 0usize;

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Ok(obj) = serde_json::from_str::<Value>(line) else {
            skipped += 1;
            continue;
        };

        let id = match obj.get("id") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => {
                skipped += 1;
                continue;
            }
        };

        let features: Option<Vec<f64>> = obj
            .get("features")
            .and_then(Value::as_array)
            .and_then(|arr| arr.iter().map(Value::as_f64).collect());

        match features {
            Some(x) => {
                id2x.insert(id, x);
            }
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::warn!(skipped, path = %path.display(), "skipped applicant rows with missing or bad features");
    }
    Ok((id2x, skipped))
}

/// Loads labeled pairs from a CSV file with header columns `i`, `j`, `y`.
///
/// Rows with an empty identifier are skipped. The label is coerced the way
/// the labeling pipeline produces it: parsed as a float, truncated toward
/// zero, and accepted only if the result is 0 or 1 (so "1", "1.0", and
/// stray fractional exports all land on the intended side; non-finite or
/// non-numeric labels are skipped).
///
/// Returns the pairs in file order and the number of skipped rows.
pub fn load_pairs_csv(path: &Path) -> Result<(Vec<LabeledPair>, usize), DataError> {
    let file = File::open(path)?;
    let mut rdr = ReaderBuilder::new().from_reader(BufReader::new(file));

    let headers = rdr.headers()?.clone();
    let col = |name: &str| headers.iter().position(|h| h == name);
    let (i_col, j_col, y_col) = (col("i"), col("j"), col("y"));

    let mut pairs = Vec::new();
    let mut skipped = 0usize;

    for record in rdr.records() {
        let record = record?;
        let field = |idx: Option<usize>| idx.and_then(|k| record.get(k)).unwrap_or("");

        let i = field(i_col).trim();
        let j = field(j_col).trim();
        if i.is_empty() || j.is_empty() {
            skipped += 1;
            continue;
        }

        let label = match field(y_col).trim().parse::<f64>() {
            Ok(y) if y.is_finite() => {
                let y = y as i64;
                match y {
                    0 => Some(false),
                    1 => Some(true),
                    _ => None,
                }
            }
            _ => None,
        };

        match label {
            Some(label) => pairs.push(LabeledPair::new(i, j, label)),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::warn!(skipped, path = %path.display(), "skipped pair rows with missing ids or bad labels");
    }
    Ok((pairs, skipped))
}
