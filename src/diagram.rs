//! 도식용 좌표열. 렌더링은 호출자 몫이고 여기서는 곡선과 계단 선분만 만든다.

use crate::equilibrium::Equilibrium;
use crate::errors::DistillationResult;
use crate::numeric::linspace;
use crate::operating_lines::{FeedLine, OperatingLines};
use crate::stepper::StageTrace;

/// 곡선 하나를 구성하는 점 수.
pub const CURVE_POINTS: usize = 50;

/// 꺾은선 하나.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Polyline {
    fn from_fn(xs: Vec<f64>, f: impl Fn(f64) -> f64) -> Self {
        let y = xs.iter().map(|&x| f(x)).collect();
        Self { x: xs, y }
    }
}

/// 선분 (x0, y0) → (x1, y1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: (f64, f64),
    pub to: (f64, f64),
}

/// McCabe–Thiele 도식 한 장에 필요한 좌표열.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramSeries {
    pub diagonal: Polyline,
    pub equilibrium: Polyline,
    /// 유한 환류일 때만 채워진다.
    pub rectifying: Option<Polyline>,
    pub feed_line: Option<Polyline>,
    pub stripping: Option<Polyline>,
    /// 수평·수직 선분이 번갈아 나온다.
    pub steps: Vec<Segment>,
}

impl DiagramSeries {
    /// 전환류 도식: 대각선, 평형선, 계단.
    pub fn total_reflux<E: Equilibrium>(
        equilibrium: &E,
        trace: &StageTrace,
    ) -> DistillationResult<Self> {
        let xs = linspace(0.0, 1.0, CURVE_POINTS);
        Ok(Self {
            diagonal: Polyline::from_fn(xs.clone(), |x| x),
            equilibrium: Polyline {
                y: equilibrium.forward_many(&xs)?,
                x: xs,
            },
            rectifying: None,
            feed_line: None,
            stripping: None,
            steps: staircase(trace),
        })
    }

    /// 유한 환류 도식: 전환류 도식에 정류선, q선, 회수선을 더한다.
    pub fn finite_reflux<E: Equilibrium>(
        equilibrium: &E,
        lines: &OperatingLines,
        trace: &StageTrace,
    ) -> DistillationResult<Self> {
        let mut series = Self::total_reflux(equilibrium, trace)?;
        let (x_i, y_i) = lines.intersection();
        let z_f = lines.reflux().z_f;

        series.rectifying = Some(Polyline::from_fn(
            linspace(0.0, lines.x_d(), CURVE_POINTS),
            |x| lines.rectifying(x),
        ));
        series.feed_line = Some(match lines.feed() {
            FeedLine::Vertical { x } => Polyline {
                x: vec![x, x],
                y: vec![z_f, y_i],
            },
            FeedLine::Sloped { slope, intercept } => Polyline::from_fn(
                linspace(z_f.min(x_i), z_f.max(x_i), CURVE_POINTS),
                |x| slope * x + intercept,
            ),
        });
        series.stripping = Some(Polyline::from_fn(
            linspace(lines.x_w(), x_i, CURVE_POINTS),
            |x| lines.stripping(x),
        ));
        Ok(series)
    }
}

/// 궤적을 계단 선분으로 바꾼다. 각 단은 평형선까지의 수평선과 조작선까지의 수직선이다.
pub fn staircase(trace: &StageTrace) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(2 * trace.len().saturating_sub(1));
    for i in 1..trace.len() {
        let (x0, y0) = (trace.x[i - 1], trace.y[i - 1]);
        let (x1, y1) = (trace.x[i], trace.y[i]);
        segments.push(Segment {
            from: (x0, y0),
            to: (x1, y0),
        });
        segments.push(Segment {
            from: (x1, y0),
            to: (x1, y1),
        });
    }
    segments
}
