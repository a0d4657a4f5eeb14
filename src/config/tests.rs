use super::validation::validate_config;
use super::*;
use crate::constants::test_constants::*;
use serial_test::serial;
use std::fs;
use tempfile::tempdir;

fn create_test_config(latitude: Option<f64>, longitude: Option<f64>, tz: Option<&str>) -> Config {
    Config {
        latitude,
        longitude,
        timezone: tz.map(|s| s.to_string()),
    }
}

#[test]
fn test_load_missing_file_returns_none() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("limelight.toml");

    assert!(load_from_path(&path).unwrap().is_none());
}

#[test]
fn test_save_then_load_preserves_values() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("nested").join("limelight.toml");
    let (lat, lon) = SAN_FRANCISCO;
    let config = create_test_config(Some(lat), Some(lon), Some("America/Los_Angeles"));

    save_to_path(&config, &path).unwrap();
    let loaded = load_from_path(&path).unwrap().unwrap();

    assert_eq!(loaded, config);
}

#[test]
fn test_saved_file_is_commented_toml() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("limelight.toml");
    let (lat, lon) = NEW_YORK;

    save_to_path(&create_test_config(Some(lat), Some(lon), None), &path).unwrap();
    let content = fs::read_to_string(&path).unwrap();

    assert!(content.starts_with("#[Location]\n"));
    assert!(content.contains("latitude = 40.7128  # Geographic latitude"));
    assert!(content.contains("longitude = -74.006 # Geographic longitude"));
    assert!(!content.contains("timezone"));
}

#[test]
fn test_save_leaves_no_temporary_files() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("limelight.toml");

    save_to_path(&create_test_config(Some(1.0), Some(2.0), None), &path).unwrap();
    save_to_path(&create_test_config(Some(3.0), Some(4.0), None), &path).unwrap();

    let entries: Vec<_> = fs::read_dir(temp_dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn test_save_rejects_invalid_coordinates() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("limelight.toml");

    let result = save_to_path(&create_test_config(Some(91.0), Some(0.0), None), &path);
    assert!(result.is_err());
    assert!(!path.exists());
}

#[test]
fn test_validation_ranges() {
    assert!(validate_config(&create_test_config(Some(90.0), Some(180.0), None)).is_ok());
    assert!(validate_config(&create_test_config(Some(-90.0), Some(-180.0), None)).is_ok());
    assert!(validate_config(&create_test_config(None, None, None)).is_ok());

    let err = validate_config(&create_test_config(Some(91.0), Some(0.0), None)).unwrap_err();
    assert!(err.to_string().contains("invalid latitude"));

    let err = validate_config(&create_test_config(Some(0.0), Some(-181.0), None)).unwrap_err();
    assert!(err.to_string().contains("invalid longitude"));
}

#[test]
fn test_validation_requires_coordinate_pairs() {
    assert!(validate_config(&create_test_config(Some(10.0), None, None)).is_err());
    assert!(validate_config(&create_test_config(None, Some(10.0), None)).is_err());
}

#[test]
fn test_validation_rejects_unknown_timezone() {
    assert!(validate_config(&create_test_config(None, None, Some("Europe/London"))).is_ok());
    assert!(validate_config(&create_test_config(None, None, Some("Mars/Olympus_Mons"))).is_err());
}

#[test]
fn test_load_rejects_out_of_range_file() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("limelight.toml");
    fs::write(&path, "latitude = 120.0\nlongitude = 0.0\n").unwrap();

    let err = load_from_path(&path).unwrap_err();
    assert!(format!("{err:#}").contains("invalid latitude"));
}

#[test]
fn test_load_rejects_unknown_keys() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("limelight.toml");
    fs::write(&path, "latitude = 10.0\nlongitude = 0.0\nbridge = \"x\"\n").unwrap();

    assert!(load_from_path(&path).is_err());
}

#[test]
fn test_get_location_errors() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("limelight.toml");

    // No file
    assert!(get_location(&path).is_err());

    // File without coordinates
    fs::write(&path, "timezone = \"UTC\"\n").unwrap();
    let err = get_location(&path).unwrap_err();
    assert!(err.to_string().contains("not set"));
}

#[test]
fn test_update_coordinates_keeps_timezone() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("limelight.toml");
    save_to_path(
        &create_test_config(None, None, Some("Europe/London")),
        &path,
    )
    .unwrap();

    let (lat, lon) = LONDON;
    update_coordinates(&path, Coordinates::new(lat, lon).unwrap()).unwrap();

    let loaded = load_from_path(&path).unwrap().unwrap();
    assert_eq!(loaded.timezone.as_deref(), Some("Europe/London"));
    let coords = get_location(&path).unwrap();
    assert!((coords.latitude() - lat).abs() < 1e-6);
    assert!((coords.longitude() - lon).abs() < 1e-6);
}

#[test]
fn test_stored_coordinates_keep_full_precision() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("limelight.toml");

    update_coordinates(&path, Coordinates::new(37.77491234, -122.41941678).unwrap()).unwrap();
    let coords = get_location(&path).unwrap();
    assert_eq!(coords.latitude(), 37.77491234);
    assert_eq!(coords.longitude(), -122.41941678);

    // Whole degrees are still written as TOML floats
    update_coordinates(&path, Coordinates::new(45.0, -90.0).unwrap()).unwrap();
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("latitude = 45.0 "));
    assert!(content.contains("longitude = -90.0 "));
    let coords = get_location(&path).unwrap();
    assert_eq!((coords.latitude(), coords.longitude()), (45.0, -90.0));
}

#[test]
fn test_update_coordinates_creates_file() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("limelight").join("limelight.toml");

    update_coordinates(&path, Coordinates::new(-33.8688, 151.2093).unwrap()).unwrap();

    let coords = get_location(&path).unwrap();
    assert!((coords.latitude() + 33.8688).abs() < 1e-6);
}

#[test]
fn test_update_timezone_set_and_clear() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("limelight.toml");
    let (lat, lon) = SAN_FRANCISCO;
    update_coordinates(&path, Coordinates::new(lat, lon).unwrap()).unwrap();

    update_timezone(&path, Some(chrono_tz::America::Los_Angeles)).unwrap();
    let loaded = load_from_path(&path).unwrap().unwrap();
    assert_eq!(
        loaded.timezone().unwrap(),
        Some(chrono_tz::America::Los_Angeles)
    );

    update_timezone(&path, None).unwrap();
    let loaded = load_from_path(&path).unwrap().unwrap();
    assert_eq!(loaded.timezone, None);
    assert!(loaded.coordinates().unwrap().is_some());
}

#[test]
#[serial]
fn test_config_path_follows_xdg_config_home() {
    let temp_dir = tempdir().unwrap();

    // Save and restore XDG_CONFIG_HOME
    let original = std::env::var("XDG_CONFIG_HOME").ok();
    unsafe {
        std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());
    }

    let result = get_config_path();

    unsafe {
        match original {
            Some(val) => std::env::set_var("XDG_CONFIG_HOME", val),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }

    // A custom directory may have been installed by another test binary; only
    // check the XDG branch when it is in effect.
    if get_custom_config_dir().is_none() {
        assert_eq!(
            result.unwrap(),
            temp_dir.path().join("limelight").join("limelight.toml")
        );
    }
}
