use anyhow::Context;
use std::fs;
use std::path::Path;
use stepcore::Sample;

/// Loads a recorded session: a JSON array of `{x, y, z, timestamp_ns}` objects.
pub fn load_samples<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Sample>> {
    let path_ref = path.as_ref();
    let contents = fs::read_to_string(path_ref)
        .with_context(|| format!("reading recorded samples {}", path_ref.display()))?;
    let samples: Vec<Sample> = serde_json::from_str(&contents)
        .with_context(|| format!("parsing recorded samples {}", path_ref.display()))?;
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn load_reads_json_array() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            br#"[{"x": 0.1, "y": 0.2, "z": 9.8, "timestamp_ns": 0},
                 {"x": 0.0, "y": 0.0, "z": 21.5, "timestamp_ns": 20000000}]"#,
        )
        .unwrap();
        let path = temp.into_temp_path();
        let samples = load_samples(&path).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1].timestamp_ns, 20_000_000);
    }

    #[test]
    fn load_reports_path_on_parse_failure() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"not json").unwrap();
        let path = temp.into_temp_path();
        let err = load_samples(&path).unwrap_err();
        assert!(err.to_string().starts_with("parsing recorded samples"));
    }
}
