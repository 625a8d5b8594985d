mod common;

use approx::assert_relative_eq;
use serde_json::{json, Value};

use common::{sweep_date, temp_json_path, MockSky};
use crescent::constants::SUN_SETTING_ALTITUDE;
use crescent::criteria::{odeh, yallop};
use crescent::crescent_errors::CrescentError;
use crescent::sweep::compare::{compare_documents, CompareTolerance, Mismatch};
use crescent::sweep::output::{PointRecord, SweepDocument};
use crescent::sweep::{run_sweep, SweepConfig, SweepOutcome};

const LONGITUDE: f64 = 30.0;

#[test]
fn test_points_follow_input_order() {
    let date = sweep_date();
    let sky = MockSky::new(&date);
    let latitudes = [40, -85, 0, 85, -40];

    let result = run_sweep(&date, LONGITUDE, &latitudes, &sky).unwrap();

    let lats: Vec<i32> = result.points.iter().map(|p| p.latitude).collect();
    assert_eq!(lats, latitudes);
    let codes: Vec<Option<&str>> = result.points.iter().map(|p| p.error_code()).collect();
    assert_eq!(codes, [None, Some("no_sunset"), None, Some("no_sunset"), None]);
    assert_eq!(result.no_sunset_count(), 2);
    assert!(result.points.iter().all(|p| p.longitude == LONGITUDE));
}

#[test]
fn test_no_sunset_does_not_disturb_neighbours() {
    let date = sweep_date();
    let sky = MockSky::new(&date);

    let mixed = run_sweep(&date, LONGITUDE, &[85, 40, -85], &sky).unwrap();
    let alone = run_sweep(&date, LONGITUDE, &[40], &sky).unwrap();

    assert_eq!(mixed.points[1], alone.points[0]);
    assert!(matches!(mixed.points[1].outcome, SweepOutcome::Success(_)));
}

#[test]
fn test_sweep_meta() {
    let date = sweep_date();
    let sky = MockSky::new(&date);

    let result = run_sweep(&date, LONGITUDE, &[-20, -10, 0, 10, 20], &sky).unwrap();
    assert_eq!(result.meta.date.to_string(), "2026-02-18");
    assert_eq!(result.meta.longitude, LONGITUDE);
    assert_eq!(result.meta.lat_range, [-20, 20]);
    assert_eq!(result.meta.lat_step, 10);
    assert_eq!(result.meta.generated_with, "mock sky");
}

#[test]
fn test_evening_geometry_and_classes() {
    let date = sweep_date();
    let sky = MockSky::new(&date);
    let noon = date.noon_utc().unwrap();

    let result = run_sweep(&date, LONGITUDE, &[-40, 0, 40], &sky).unwrap();

    for point in &result.points {
        let evening = point.evening().unwrap();

        // First sunset of the afternoon, about 3.8 h after noon at this longitude
        let hours = (evening.sunset - noon).to_seconds() / 3600.0;
        assert!((3.5..4.2).contains(&hours), "lat {}: {hours} h", point.latitude);
        assert_relative_eq!(
            evening.sample.sun_altitude_deg,
            SUN_SETTING_ALTITUDE,
            epsilon = 1e-3
        );

        let geometry = &evening.geometry;
        assert_relative_eq!(
            geometry.arc_of_vision_deg,
            8.0 + point.latitude as f64 / 10.0,
            epsilon = 1e-9
        );
        assert!(geometry.arc_of_light_deg >= geometry.arc_of_vision_deg - 1e-9);
        assert!(geometry.crescent_semiwidth_arcmin > 0.0);
        assert_eq!(evening.sample.illuminated_fraction, 0.01);

        assert_eq!(
            evening.yallop,
            yallop(
                geometry.arc_of_light_deg,
                geometry.arc_of_vision_deg,
                geometry.crescent_semiwidth_arcmin
            )
        );
        assert_eq!(
            evening.odeh,
            odeh(geometry.arc_of_vision_deg, geometry.crescent_semiwidth_arcmin)
        );
    }
}

#[test]
fn test_document_shape() {
    let date = sweep_date();
    let sky = MockSky::new(&date);

    let result = run_sweep(&date, LONGITUDE, &[0, 85], &sky).unwrap();
    let value: Value =
        serde_json::from_str(&SweepDocument::from(&result).to_json().unwrap()).unwrap();

    let meta = value["meta"].as_object().unwrap();
    let meta_keys: Vec<&str> = meta.keys().map(String::as_str).collect();
    for key in [
        "date",
        "longitude",
        "lat_range",
        "lat_step",
        "generated_with",
        "description",
    ] {
        assert!(meta_keys.contains(&key), "missing meta key {key}");
    }
    assert_eq!(value["meta"]["lat_range"], json!([0, 85]));

    let success = value["points"][0].as_object().unwrap();
    assert_eq!(success.len(), 17);
    assert!(success["sunset_iso"].as_str().unwrap().ends_with('Z'));
    assert!(success["sunset_jd"].as_f64().unwrap() > 2_461_000.0);
    assert!(success.get("error").is_none());

    assert_eq!(
        value["points"][1],
        json!({"lat": 85, "lon": 30.0, "error": "no_sunset"})
    );
}

#[test]
fn test_sweep_is_deterministic() {
    let date = sweep_date();
    let sky = MockSky::new(&date);
    let latitudes: Vec<i32> = (-85..=85).step_by(17).collect();

    let first = SweepDocument::from(&run_sweep(&date, LONGITUDE, &latitudes, &sky).unwrap());
    let second = SweepDocument::from(&run_sweep(&date, LONGITUDE, &latitudes, &sky).unwrap());

    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
}

#[test]
fn test_ephemeris_failure_aborts_sweep() {
    let date = sweep_date();
    let sky = MockSky::failing_at(&date, 0.0);

    let err = run_sweep(&date, LONGITUDE, &[-10, 0, 10], &sky).unwrap_err();
    assert!(matches!(err, CrescentError::EphemerisOutOfRange { .. }));
}

#[test]
fn test_invalid_coordinates() {
    let date = sweep_date();
    let sky = MockSky::new(&date);

    let err = run_sweep(&date, LONGITUDE, &[95], &sky).unwrap_err();
    assert!(matches!(err, CrescentError::InvalidObserver(_)));

    let err = run_sweep(&date, 200.0, &[0], &sky).unwrap_err();
    assert!(matches!(err, CrescentError::InvalidObserver(_)));
}

#[test]
fn test_config_run_and_compare() {
    let date = sweep_date();
    let sky = MockSky::new(&date);
    let config = SweepConfig {
        lat_min: -10,
        lat_max: 85,
        lat_step: 5,
        output_path: temp_json_path("baseline.json"),
        description: "mock run".to_string(),
        ..SweepConfig::default()
    };

    let mut seen = Vec::new();
    let result = config
        .run_with(&sky, |point| seen.push(point.latitude))
        .unwrap();
    assert_eq!(seen, config.latitudes());
    assert_eq!(result.meta.lat_step, 5);
    assert_eq!(result.meta.description, "mock run");

    let document = SweepDocument::from(&result);
    document.write(&config.output_path).unwrap();
    let back = SweepDocument::from_path(&config.output_path).unwrap();
    let report = compare_documents(&back, &document, &CompareTolerance::default());
    assert!(report.is_match(), "{report}");
    assert_eq!(report.compared, document.points.len());

    let mut shifted = back.clone();
    let PointRecord::Success(record) = &mut shifted.points[0] else {
        panic!("lat -10 should have a sunset");
    };
    record.moon_alt += 1.0;
    let report = compare_documents(&shifted, &document, &CompareTolerance::default());
    assert_eq!(report.mismatches.len(), 1);
    assert!(matches!(
        report.mismatches[0],
        Mismatch::Value {
            lat: -10,
            field: "moon_alt",
            ..
        }
    ));

    std::fs::remove_file(&config.output_path).unwrap();
}
