//! Converts a submissions CSV export into applicants.jsonl.
//!
//! The export's column names drift between sheet revisions, so every lookup
//! tries a list of known aliases. Rows without a parseable, correctly sized
//! feature array are skipped and counted. Essay and score columns are
//! carried along as metadata so humans can label pairs without going back
//! to the sheet.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use csv::{ReaderBuilder, StringRecord};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(
    name = "make-applicants",
    about = "Build applicants.jsonl from a submissions CSV export"
)]
struct Args {
    /// Submissions CSV (export from the collection sheet)
    csv_path: PathBuf,

    /// Output applicants.jsonl path
    #[arg(long)]
    out: PathBuf,

    /// How applicant identifiers are constructed
    #[arg(long, value_enum, default_value = "uni-timestamp")]
    id_mode: IdMode,

    /// Expected feature vector length
    #[arg(long, default_value_t = 21)]
    dim: usize,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum IdMode {
    /// `{uni}_{timestamp}`, falling back to `{uni}_{row}` then the row index
    UniTimestamp,
    /// The 1-based row index
    Row,
}

#[derive(Serialize)]
struct ApplicantOut {
    id: String,
    features: Vec<f64>,
    meta: Meta,
}

#[derive(Serialize)]
struct Meta {
    name: String,
    uni: String,
    email: String,
    #[serde(rename = "schoolYear")]
    school_year: String,
    #[serde(rename = "raceEth")]
    race_eth: String,
    gpa: String,
    calc12: String,
    courses: String,
    score_0_10: String,
    raw_score: String,
    feature_version: String,
    resume_chars: String,
    #[serde(rename = "essayMath")]
    essay_math: String,
    #[serde(rename = "essayCommunity")]
    essay_community: String,
}

/// Returns the first matching column value from the record for any of the
/// given header aliases.
fn first<'a>(headers: &StringRecord, record: &'a StringRecord, keys: &[&str]) -> &'a str {
    for key in keys {
        if let Some(idx) = headers.iter().position(|h| h == *key) {
            if let Some(value) = record.get(idx) {
                return value;
            }
        }
    }
    ""
}

fn parse_number(v: &serde_json::Value) -> Option<f64> {
    v.as_f64()
        .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
}

fn try_number_array(s: &str) -> Option<Vec<f64>> {
    let value: serde_json::Value = serde_json::from_str(s).ok()?;
    value.as_array()?.iter().map(parse_number).collect()
}

/// Parses a feature array cell. Most cells are JSON like `[1,2,3]`, but
/// sheet exports sometimes single-quote the array, so one requoted retry
/// is attempted before giving up.
fn parse_features(raw: &str) -> Option<Vec<f64>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Some(v) = try_number_array(s) {
        return Some(v);
    }
    try_number_array(&s.replace('\'', "\""))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let file = File::open(&args.csv_path)
        .with_context(|| format!("CSV not found: {}", args.csv_path.display()))?;
    let mut rdr = ReaderBuilder::new().from_reader(BufReader::new(file));
    let headers = rdr.headers()?.clone();

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut out = BufWriter::new(
        File::create(&args.out).with_context(|| format!("creating {}", args.out.display()))?,
    );

    let mut n_ok = 0usize;
    let mut n_skip = 0usize;

    for (idx, record) in rdr.records().enumerate() {
        let record = record?;
        let idx = idx + 1;
        let get = |keys: &[&str]| first(&headers, &record, keys);

        let features_raw = get(&["features_json", "features", "featuresJson"]);
        let Some(features) = parse_features(features_raw) else {
            n_skip += 1;
            continue;
        };
        if features.len() != args.dim {
            n_skip += 1;
            continue;
        }

        let timestamp = get(&["timestamp"]).trim().to_string();
        let uni = get(&["uni"]).trim().to_string();
        let full_name = get(&["fullName", "fullname", "name"]).trim().to_string();

        let id = match args.id_mode {
            IdMode::UniTimestamp if !uni.is_empty() && !timestamp.is_empty() => {
                format!("{uni}_{timestamp}")
            }
            IdMode::UniTimestamp if !uni.is_empty() => format!("{uni}_{idx}"),
            _ => idx.to_string(),
        };

        let meta = Meta {
            name: full_name,
            uni,
            email: get(&["email"]).trim().to_string(),
            school_year: get(&["schoolYear", "schoolYearText"]).trim().to_string(),
            race_eth: get(&["raceEth"]).trim().to_string(),
            gpa: get(&["gpa"]).trim().to_string(),
            calc12: get(&["calc12", "calcVal"]).trim().to_string(),
            courses: get(&["courses"]).trim().to_string(),
            score_0_10: get(&["score_0_10"]).trim().to_string(),
            raw_score: get(&["raw_score", "raw"]).trim().to_string(),
            feature_version: get(&["feature_version"]).trim().to_string(),
            resume_chars: get(&["resume_chars"]).trim().to_string(),
            // essays stay untrimmed; labelers read them as written
            essay_math: get(&["essayMath"]).to_string(),
            essay_community: get(&["essayCommunity"]).to_string(),
        };

        let row = ApplicantOut {
            id,
            features,
            meta,
        };
        serde_json::to_writer(&mut out, &row)?;
        out.write_all(b"\n")?;
        n_ok += 1;
    }
    out.flush()?;

    println!(
        "wrote {} applicants to {} (skipped {} rows with missing/bad features)",
        n_ok,
        args.out.display(),
        n_skip
    );
    Ok(())
}
