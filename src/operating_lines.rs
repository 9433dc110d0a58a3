//! 정류부/회수부 조작선과 q선(진료선), 그리고 두 조작선의 교점.

use log::debug;

use crate::column::{ColumnSpec, RefluxSpec};
use crate::errors::{DistillationError, DistillationResult};
use crate::numeric::{solve_2x2, LineRow};

/// 계단 한 단이 속한 탑 구간.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Rectifying,
    Stripping,
}

/// 계단 작도기가 사용하는 조작선 선택 능력.
pub trait OperatingLine {
    /// 정류부에서 회수부로 넘어가는 액상 조성. 구간이 하나뿐이면 `None`.
    fn switch_x(&self) -> Option<f64>;

    /// 주어진 구간의 조작선에서 x에 대응하는 y.
    fn vapor_composition(&self, x: f64, section: Section) -> f64;
}

/// 전환류: 조작선은 대각선 y = x 하나뿐이다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TotalReflux;

impl OperatingLine for TotalReflux {
    fn switch_x(&self) -> Option<f64> {
        None
    }

    fn vapor_composition(&self, x: f64, _section: Section) -> f64 {
        x
    }
}

/// q선. q = 1(포화액 진료)이면 x = z_F 수직선이라 함수 형태가 없다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeedLine {
    Vertical { x: f64 },
    Sloped { slope: f64, intercept: f64 },
}

impl FeedLine {
    pub fn new(q: f64, z_f: f64) -> Self {
        if (q - 1.0).abs() < f64::EPSILON {
            FeedLine::Vertical { x: z_f }
        } else {
            FeedLine::Sloped {
                slope: q / (q - 1.0),
                intercept: -z_f / (q - 1.0),
            }
        }
    }

    /// 수직선이면 `None`.
    pub fn at(&self, x: f64) -> Option<f64> {
        match *self {
            FeedLine::Vertical { .. } => None,
            FeedLine::Sloped { slope, intercept } => Some(slope * x + intercept),
        }
    }

    /// `a·x + b·y = c` 형태의 계수.
    fn row(&self) -> LineRow {
        match *self {
            FeedLine::Vertical { x } => LineRow::new(1.0, 0.0, x),
            FeedLine::Sloped { slope, intercept } => LineRow::new(slope, -1.0, -intercept),
        }
    }
}

/// 유한 환류 조작선 묶음.
///
/// 회수부 조작선은 따로 저장하지 않고, 캐시한 교점과 (x_W, x_W)를 지나는
/// 직선으로 매번 계산한다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatingLines {
    x_d: f64,
    x_w: f64,
    reflux: RefluxSpec,
    feed: FeedLine,
    intersection: (f64, f64),
}

impl OperatingLines {
    /// 유한 환류 사양에서 조작선을 구성한다.
    pub fn new(spec: &ColumnSpec) -> DistillationResult<Self> {
        let reflux = spec
            .reflux()
            .ok_or(DistillationError::InvalidParameter {
                name: "reflux_ratio",
                value: f64::INFINITY,
                reason: "전환류 사양에는 정류/회수 조작선이 없습니다",
            })?;
        let (x_d, x_w) = (spec.x_d(), spec.x_w());
        let feed = FeedLine::new(reflux.q, reflux.z_f);

        let r = reflux.reflux_ratio;
        let rectifying_row = LineRow::new(r / (r + 1.0), -1.0, -x_d / (r + 1.0));
        let intersection = solve_2x2(feed.row(), rectifying_row).ok_or_else(|| {
            DistillationError::DegenerateGeometry(format!(
                "q선과 정류 조작선이 평행하거나 일치합니다 (q = {}, R = {})",
                reflux.q, r
            ))
        })?;

        // R → ∞이면 정류선이 대각선에 붙어 교점이 (z_F, z_F)로 간다
        if intersection.0 >= x_d {
            return Err(DistillationError::DegenerateGeometry(format!(
                "교점 x = {:.6}가 x_D = {x_d} 이상입니다. q = {}에서 환류비 R = {r}이 \
                 최소 환류비보다 작을 가능성이 큽니다",
                intersection.0, reflux.q
            )));
        }
        if intersection.0 <= x_w {
            return Err(DistillationError::DegenerateGeometry(format!(
                "교점 x = {:.6}가 x_W = {x_w} 이하입니다. q = {}, z_F = {}에서 환류비 R = {r}이 \
                 최소 환류비보다 작을 가능성이 큽니다",
                intersection.0, reflux.q, reflux.z_f
            )));
        }
        debug!(
            "조작선 교점 ({:.6}, {:.6}), q = {}, R = {}",
            intersection.0, intersection.1, reflux.q, r
        );

        Ok(Self {
            x_d,
            x_w,
            reflux,
            feed,
            intersection,
        })
    }

    /// 정류부 조작선 y = R/(R+1)·x + x_D/(R+1)
    pub fn rectifying(&self, x: f64) -> f64 {
        let r = self.reflux.reflux_ratio;
        r / (r + 1.0) * x + self.x_d / (r + 1.0)
    }

    /// 회수부 조작선: 교점과 (x_W, x_W)를 지나는 직선.
    pub fn stripping(&self, x: f64) -> f64 {
        let (x_i, y_i) = self.intersection;
        let slope = (y_i - self.x_w) / (x_i - self.x_w);
        slope * (x - self.x_w) + self.x_w
    }

    /// q선의 y. q = 1이면 수직선이라 `None`.
    pub fn feed_line(&self, x: f64) -> Option<f64> {
        self.feed.at(x)
    }

    pub fn feed(&self) -> FeedLine {
        self.feed
    }

    /// 정류 조작선과 q선의 교점 (x, y).
    pub fn intersection(&self) -> (f64, f64) {
        self.intersection
    }

    pub fn reflux(&self) -> RefluxSpec {
        self.reflux
    }

    pub fn x_d(&self) -> f64 {
        self.x_d
    }

    pub fn x_w(&self) -> f64 {
        self.x_w
    }
}

impl OperatingLine for OperatingLines {
    fn switch_x(&self) -> Option<f64> {
        Some(self.intersection.0)
    }

    fn vapor_composition(&self, x: f64, section: Section) -> f64 {
        match section {
            Section::Rectifying => self.rectifying(x),
            Section::Stripping => self.stripping(x),
        }
    }
}
