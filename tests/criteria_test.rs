use itertools::Itertools;

use crescent::crescent_width::crescent_semiwidth;
use crescent::criteria::{odeh, yallop, OdehZone, YallopClass};

const WIDTHS: [f64; 6] = [0.0, 0.1, 0.25, 0.5, 1.0, 2.0];

fn arcv_grid() -> Vec<f64> {
    (0..=3000).map(|i| -5.0 + i as f64 * 0.01).collect()
}

#[test]
fn test_classes_improve_with_arc_of_vision() {
    for w in WIDTHS {
        let yallop_results: Vec<_> = arcv_grid().into_iter().map(|v| yallop(10.0, v, w)).collect();
        let odeh_results: Vec<_> = arcv_grid().into_iter().map(|v| odeh(v, w)).collect();

        for (low, high) in yallop_results.iter().tuple_windows() {
            assert!(high.score > low.score);
            assert!(high.class_code <= low.class_code, "w={w}: {low} then {high}");
        }
        for (low, high) in odeh_results.iter().tuple_windows() {
            assert!(high.score > low.score);
            assert!(high.class_code <= low.class_code, "w={w}: {low} then {high}");
        }

        // The grid spans every class
        assert_eq!(yallop_results.first().map(|r| r.class_code), Some('F'));
        assert_eq!(yallop_results.last().map(|r| r.class_code), Some('A'));
        assert_eq!(odeh_results.first().map(|r| r.class_code), Some('D'));
        assert_eq!(odeh_results.last().map(|r| r.class_code), Some('A'));
    }
}

#[test]
fn test_classes_improve_with_width() {
    for arcv in [4.0, 6.0, 8.0, 10.0, 12.0] {
        for (w_low, w_high) in WIDTHS.iter().tuple_windows() {
            let (low, high) = (yallop(0.0, arcv, *w_low), yallop(0.0, arcv, *w_high));
            assert!(high.score > low.score);
            assert!(high.class_code <= low.class_code);

            let (low, high) = (odeh(arcv, *w_low), odeh(arcv, *w_high));
            assert!(high.score > low.score);
            assert!(high.class_code <= low.class_code);
        }
    }
}

#[test]
fn test_results_consistent_with_class_tables() {
    for arcv in arcv_grid().into_iter().step_by(7) {
        for w in WIDTHS {
            let y = yallop(12.0, arcv, w);
            let class = YallopClass::from_q(y.score);
            assert_eq!(y.criterion_name, "yallop");
            assert_eq!(y.class_code, class.code());
            assert_eq!(y.visibility_label, class.label());

            let o = odeh(arcv, w);
            let zone = OdehZone::from_v(o.score);
            assert_eq!(o.criterion_name, "odeh");
            assert_eq!(o.class_code, zone.code());
            assert_eq!(o.visibility_label, zone.label());
        }
    }
}

#[test]
fn test_yallop_ignores_arc_of_light() {
    for arcl in [0.0, 7.0, 20.0, 90.0] {
        assert_eq!(yallop(arcl, 9.0, 0.3), yallop(0.0, 9.0, 0.3));
    }
}

#[test]
fn test_typical_young_crescent() {
    // ARCL 12°, Moon 8° up at 384 400 km, Sun at the setting altitude
    let w = crescent_semiwidth(12.0, 8.0, 384_400.0);
    let arcv = 8.0 + 0.8333;

    let y = yallop(12.0, arcv, w);
    let o = odeh(arcv, w);
    assert!(w > 0.3 && w < 0.4, "{w}");
    assert_eq!(y.class_code, 'C');
    assert_eq!(o.class_code, 'B');
}
