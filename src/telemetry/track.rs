use std::fs;
use std::path::Path;

use super::error::TrackError;
use super::sample::PositionSample;

/// Load a recorded track (a list of samples) from a JSON or YAML file.
pub fn load_track(path: &Path) -> Result<Vec<PositionSample>, TrackError> {
    let content = fs::read_to_string(path)?;
    let filename = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    let is_json = path.extension().is_some_and(|ext| ext == "json");
    parse_track(&content, is_json).map_err(|message| TrackError::InvalidTrack {
        file: filename,
        message,
    })
}

fn parse_track(content: &str, is_json: bool) -> Result<Vec<PositionSample>, String> {
    if is_json {
        serde_json::from_str(content).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_yaml_track() {
        let yaml = r#"
- latitude: 40.978
  longitude: 27.5153
  timestamp_ms: 1000
- latitude: 40.979
  longitude: 27.5153
  timestamp_ms: 2000
  instantaneous_speed_mps: 12.5
  heading_degrees: 5
"#;
        let track = parse_track(yaml, false).unwrap();
        assert_eq!(track.len(), 2);
        assert_eq!(track[0].instantaneous_speed_mps, None);
        assert_eq!(track[1].instantaneous_speed_mps, Some(12.5));
        assert_eq!(track[1].heading_degrees, Some(5.0));
    }

    #[test]
    fn parses_json_track() {
        let json = r#"[{"latitude": 1.0, "longitude": 2.0, "timestamp_ms": 3}]"#;
        let track = parse_track(json, true).unwrap();
        assert_eq!(track, vec![PositionSample::new(1.0, 2.0, 3)]);
    }

    #[test]
    fn rejects_sample_without_timestamp() {
        let yaml = "- latitude: 1.0\n  longitude: 2.0\n";
        assert!(parse_track(yaml, false).is_err());
    }

    fn write_track(name: &str, content: &str) -> std::path::PathBuf {
        let name = format!("moto-hud-{}-{}", std::process::id(), name);
        let path = std::env::temp_dir().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn extension_selects_the_parser() {
        // Block-style YAML is not valid JSON.
        let yaml = "- latitude: 1.0\n  longitude: 2.0\n  timestamp_ms: 3\n";
        let yaml_path = write_track("block.yaml", yaml);
        let json_path = write_track("block.json", yaml);

        let loaded = load_track(&yaml_path).unwrap();
        assert_eq!(loaded, vec![PositionSample::new(1.0, 2.0, 3)]);

        let err = load_track(&json_path).unwrap_err();
        assert!(matches!(err, TrackError::InvalidTrack { .. }));
        assert!(err.to_string().contains("block.json"));

        fs::remove_file(yaml_path).unwrap();
        fs::remove_file(json_path).unwrap();
    }

    #[test]
    fn loads_json_track_file() {
        let json = r#"[
            {"latitude": 40.978, "longitude": 27.5153, "timestamp_ms": 1000},
            {"latitude": 40.979, "longitude": 27.5153, "timestamp_ms": 2000}
        ]"#;
        let path = write_track("lap.json", json);

        let track = load_track(&path).unwrap();
        assert_eq!(track.len(), 2);
        assert_eq!(track[1].timestamp_ms, 2000);

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = load_track(Path::new("/nonexistent/track.yaml")).unwrap_err();
        assert!(matches!(err, TrackError::FileRead(_)));
    }
}
