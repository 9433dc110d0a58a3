//! 계단 작도 회귀 테스트. 손 계산(동일 절차) 값과 성질 기반 검사를 함께 둔다.
use mccabe_thiele_toolbox::{
    ColumnSpec, DistillationError, EquilibriumModel, RefluxSpec, RelativeVolatility,
    StageStepper,
};

fn assert_close(label: &str, actual: f64, expected: f64, tol: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tol,
        "{label} expected {expected:.9} got {actual:.9} (diff {diff:.3e}, tol {tol})"
    );
}

fn ideal(alpha: f64) -> RelativeVolatility {
    RelativeVolatility::new(alpha).expect("alpha")
}

fn finite_spec(x_d: f64, x_w: f64, reflux_ratio: f64, q: f64, z_f: f64) -> ColumnSpec {
    ColumnSpec::finite_reflux(
        x_d,
        x_w,
        RefluxSpec {
            reflux_ratio,
            q,
            z_f,
        },
    )
    .expect("finite spec")
}

#[test]
fn total_reflux_alpha_2_5() {
    // 작도 7단: x = 0.8837, 0.7525, 0.5487, 0.3272, 0.1629, 0.0722, 0.0302
    // 마지막 단 보정 (0.0302 − 0.05)/(0.0302 − 0.0722) = 0.4715 → 6.5285단
    let spec = ColumnSpec::total_reflux(0.95, 0.05).unwrap();
    let run = StageStepper::total_reflux(ideal(2.5), &spec).run().unwrap();
    assert_eq!(run.full_steps, 7);
    assert_eq!(run.plates.floor(), 6.0);
    assert_close("plates", run.plates, 6.528_496_318, 1e-8);
    assert_close("x1", run.trace.x[1], 0.883_720_930, 1e-8);
    assert_close("x7", run.trace.x[7], 0.030_189_803, 1e-8);
}

#[test]
fn total_reflux_plates_decrease_with_alpha() {
    let spec = ColumnSpec::total_reflux(0.95, 0.05).unwrap();
    let mut prev = f64::INFINITY;
    for alpha in [1.2, 1.5, 2.0, 2.5, 3.0, 4.0, 6.0, 10.0] {
        let plates = StageStepper::total_reflux(ideal(alpha), &spec)
            .compute_plate_count()
            .unwrap();
        assert!(plates >= 0.0, "alpha {alpha}: {plates}");
        assert!(plates < prev, "alpha {alpha}: {plates} !< {prev}");
        prev = plates;
    }
}

#[test]
fn finite_reflux_saturated_liquid_feed() {
    let spec = finite_spec(0.9, 0.1, 2.0, 1.0, 0.5);
    let stepper = StageStepper::finite_reflux(ideal(2.0), &spec).unwrap();
    assert_eq!(stepper.operating_lines().intersection().0, 0.5);
    assert_eq!(stepper.operating_lines().feed_line(0.5), None);

    let (plates, feed) = stepper.compute_plate_count().unwrap();
    assert_close("plates", plates, 11.956_773_863, 1e-8);
    assert_eq!(feed, 6);
}

#[test]
fn finite_reflux_partial_vapor_feed() {
    let spec = finite_spec(0.95, 0.05, 3.0, 0.5, 0.45);
    let stepper = StageStepper::finite_reflux(ideal(2.5), &spec).unwrap();
    let (x_i, y_i) = stepper.operating_lines().intersection();
    assert_close("x_i", x_i, 0.378_571_429, 1e-8);
    assert_close("y_i", y_i, 0.521_428_571, 1e-8);
    let (plates, feed) = stepper.compute_plate_count().unwrap();
    assert_close("plates", plates, 9.926_261_693, 1e-8);
    assert_eq!(feed, 6);
}

#[test]
fn traces_are_strictly_decreasing_and_end_on_diagonal() {
    let cases = [
        (2.0, 2.0, 1.0, 0.5, 0.9, 0.1),
        (2.5, 3.0, 0.5, 0.45, 0.95, 0.05),
        (2.5, 2.0, 1.2, 0.45, 0.95, 0.05),
        (4.0, 2.0, 0.0, 0.5, 0.98, 0.02),
    ];
    for (alpha, r, q, z_f, x_d, x_w) in cases {
        let spec = finite_spec(x_d, x_w, r, q, z_f);
        let run = StageStepper::finite_reflux(ideal(alpha), &spec)
            .unwrap()
            .run()
            .unwrap();
        let x = &run.trace.x;
        assert!(x.windows(2).all(|w| w[1] < w[0]), "case {alpha},{r},{q}");
        let last = run.trace.len() - 1;
        assert_eq!(run.trace.y[last], x[last]);
        assert_eq!(run.trace.x[0], x_d);
        assert_eq!(run.trace.y[0], x_d);

        let feed = run.feed_plate.expect("feed plate");
        assert!(feed >= 1 && feed <= run.plates.ceil() as usize);
    }
}

#[test]
fn snapping_final_point_does_not_change_plate_count() {
    let spec = finite_spec(0.9, 0.1, 2.0, 1.0, 0.5);
    let run = StageStepper::finite_reflux(ideal(2.0), &spec)
        .unwrap()
        .run()
        .unwrap();
    let n = run.trace.len();
    // 보정식은 x만 사용하므로 마지막 y의 위치와 무관하다
    let (x_last, x_prev) = (run.trace.x[n - 1], run.trace.x[n - 2]);
    let unsnapped = run.full_steps as f64 - (x_last - 0.1) / (x_last - x_prev);
    assert_eq!(run.plates, unsnapped);
    assert!(run.final_operating_y > run.trace.y[n - 1]);
    assert_close("operating y", run.final_operating_y, 0.096_500_024, 1e-8);
}

#[test]
fn repeated_runs_are_identical() {
    let spec = finite_spec(0.95, 0.05, 3.0, 0.5, 0.45);
    let stepper = StageStepper::finite_reflux(ideal(2.5), &spec).unwrap();
    let first = stepper.compute_plate_count().unwrap();
    let second = stepper.compute_plate_count().unwrap();
    assert_eq!(first, second);
    assert_eq!(stepper.run().unwrap(), stepper.run().unwrap());
}

#[test]
fn parallel_feed_and_rectifying_lines_are_rejected() {
    let spec = finite_spec(0.9, 0.1, 2.0, -2.0, 0.5);
    let err = StageStepper::finite_reflux(ideal(2.0), &spec).unwrap_err();
    assert!(matches!(err, DistillationError::DegenerateGeometry(_)));
}

#[test]
fn pinch_below_minimum_reflux_hits_stage_limit() {
    let spec = finite_spec(0.9, 0.1, 0.5, 1.0, 0.5);
    let err = StageStepper::finite_reflux(ideal(2.0), &spec)
        .unwrap()
        .run()
        .unwrap_err();
    assert!(matches!(
        err,
        DistillationError::StageLimitExceeded { limit: 10_000, .. }
    ));
}

#[test]
fn custom_stage_limit_is_respected() {
    let spec = finite_spec(0.9, 0.1, 0.5, 1.0, 0.5);
    let err = StageStepper::finite_reflux(ideal(2.0), &spec)
        .unwrap()
        .with_max_stages(50)
        .unwrap()
        .compute_plate_count()
        .unwrap_err();
    assert!(matches!(
        err,
        DistillationError::StageLimitExceeded { limit: 50, .. }
    ));
}

#[test]
fn tagged_model_matches_direct_ideal() {
    let spec = ColumnSpec::total_reflux(0.95, 0.05).unwrap();
    let direct = StageStepper::total_reflux(ideal(2.5), &spec)
        .compute_plate_count()
        .unwrap();
    let model = EquilibriumModel::ideal(2.5).unwrap();
    let tagged = StageStepper::total_reflux(&model, &spec)
        .compute_plate_count()
        .unwrap();
    assert_eq!(direct, tagged);
}
