//! Asymptotic growth functions and the plotter's animation state.
//!
//! The curves themselves are static – they are precomputed once over the
//! integer domain and never change while `n` animates.  Only the moving
//! marker and the live readout follow `n`.

// ───────────────────────────────────────── domain ────────────

/// Lower bound of the input-size parameter.
pub const N_MIN: f64 = 1.0;
/// Upper bound of the input-size parameter.
pub const N_MAX: f64 = 50.0;
/// How far `n` advances per tick while auto-playing.
pub const N_STEP: f64 = 0.2;

/// Values at or above this are shown as an overflow symbol, never as a
/// literal number.
pub const OVERFLOW_LIMIT: f64 = 1e9;
/// Plotted points are clamped here so fast-growing series can't produce
/// pathological chart coordinates.  Equals the quadratic maximum over the
/// domain, so the well-behaved curves are unaffected.
pub const PLOT_CLAMP: f64 = 2500.0;

// ───────────────────────────────────────── series ────────────

/// Identifies one growth function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesId {
    LogN,
    Linear,
    NLogN,
    Quadratic,
    Exponential,
}

/// A named growth function.  Immutable — defined once at start.
pub struct GrowthSeries {
    pub id: SeriesId,
    /// Display label, e.g. `"n log n"`.
    pub label: &'static str,
    pub f: fn(f64) -> f64,
}

/// All series, in dominance order (slowest-growing first).
pub static SERIES: &[GrowthSeries] = &[
    GrowthSeries {
        id: SeriesId::LogN,
        label: "log n",
        f: |n| n.log2(),
    },
    GrowthSeries {
        id: SeriesId::Linear,
        label: "n",
        f: |n| n,
    },
    GrowthSeries {
        id: SeriesId::NLogN,
        label: "n log n",
        f: |n| n * n.log2(),
    },
    GrowthSeries {
        id: SeriesId::Quadratic,
        label: "n²",
        f: |n| n * n,
    },
    GrowthSeries {
        id: SeriesId::Exponential,
        label: "2ⁿ",
        f: |n| 2f64.powf(n),
    },
];

/// A live value readout for one series at the current `n`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Readout {
    Value(u64),
    /// The function exceeded [`OVERFLOW_LIMIT`].
    Overflow,
}

impl std::fmt::Display for Readout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Readout::Value(v) => write!(f, "{v}"),
            Readout::Overflow => write!(f, "∞"),
        }
    }
}

impl GrowthSeries {
    /// `round(f(n))`, or [`Readout::Overflow`] at or past the display limit.
    pub fn readout(&self, n: f64) -> Readout {
        let v = (self.f)(n);
        if v >= OVERFLOW_LIMIT {
            Readout::Overflow
        } else {
            Readout::Value(v.round() as u64)
        }
    }

    /// The static curve over the integer domain, clamped to [`PLOT_CLAMP`].
    pub fn curve(&self) -> Vec<(f64, f64)> {
        (N_MIN as u64..=N_MAX as u64)
            .map(|i| {
                let n = i as f64;
                (n, (self.f)(n).min(PLOT_CLAMP))
            })
            .collect()
    }

    /// The moving marker point at the live `n`, clamped like the curve.
    pub fn marker(&self, n: f64) -> (f64, f64) {
        (n, (self.f)(n).min(PLOT_CLAMP))
    }
}

// ───────────────────────────────────────── plotter state ─────

/// Animation state for the growth-rate plotter.
pub struct PlotterState {
    /// Current input size, `N_MIN..=N_MAX`.
    pub n: f64,
    /// Whether the tick-driven auto-advance is running.
    pub playing: bool,
    /// Precomputed static curves, one per entry in [`SERIES`].
    pub curves: Vec<Vec<(f64, f64)>>,
}

impl PlotterState {
    pub fn new() -> Self {
        Self {
            n: N_MIN,
            playing: false,
            curves: SERIES.iter().map(|s| s.curve()).collect(),
        }
    }

    /// Advance `n` by one step.  Auto-pauses and clamps at the domain end.
    pub fn tick(&mut self) {
        if !self.playing {
            return;
        }
        self.n += N_STEP;
        if self.n >= N_MAX {
            self.n = N_MAX;
            self.playing = false;
        }
    }

    pub fn toggle_play(&mut self) {
        // Playing from the clamped end restarts the sweep.
        if !self.playing && self.n >= N_MAX {
            self.n = N_MIN;
        }
        self.playing = !self.playing;
    }

    /// Manual slider: set `n` directly.  Always pauses auto-play.
    pub fn set_n(&mut self, n: f64) {
        self.n = n.clamp(N_MIN, N_MAX);
        self.playing = false;
    }

    pub fn reset(&mut self) {
        self.n = N_MIN;
        self.playing = false;
    }
}

impl Default for PlotterState {
    fn default() -> Self {
        Self::new()
    }
}

// ───────────────────────────────────────── tests ─────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn series(id: SeriesId) -> &'static GrowthSeries {
        SERIES.iter().find(|s| s.id == id).unwrap()
    }

    #[test]
    fn dominance_ordering_holds_over_domain() {
        // log n ≤ n ≤ n log n ≤ n² for all n in [2, 50].
        for i in 2..=50u64 {
            let n = i as f64;
            let logn = (series(SeriesId::LogN).f)(n);
            let lin = (series(SeriesId::Linear).f)(n);
            let nlogn = (series(SeriesId::NLogN).f)(n);
            let quad = (series(SeriesId::Quadratic).f)(n);
            assert!(logn <= lin, "log n > n at n={n}");
            assert!(lin <= nlogn, "n > n log n at n={n}");
            assert!(nlogn <= quad, "n log n > n² at n={n}");
        }
    }

    #[test]
    fn slider_always_pauses() {
        let mut p = PlotterState::new();
        p.playing = true;
        p.set_n(25.0);
        assert!(!p.playing);
        assert_eq!(p.n, 25.0);
    }

    #[test]
    fn reset_returns_to_start() {
        let mut p = PlotterState::new();
        p.playing = true;
        p.n = 37.4;
        p.reset();
        assert_eq!(p.n, N_MIN);
        assert!(!p.playing);
    }

    #[test]
    fn tick_auto_pauses_at_domain_end() {
        let mut p = PlotterState::new();
        p.playing = true;
        p.n = N_MAX - 0.1;
        p.tick();
        assert_eq!(p.n, N_MAX);
        assert!(!p.playing);
        // Further ticks are no-ops while paused.
        p.tick();
        assert_eq!(p.n, N_MAX);
    }

    #[test]
    fn slider_clamps_to_domain() {
        let mut p = PlotterState::new();
        p.set_n(999.0);
        assert_eq!(p.n, N_MAX);
        p.set_n(-3.0);
        assert_eq!(p.n, N_MIN);
    }

    #[test]
    fn exponential_overflows_display_but_not_plot() {
        let exp = series(SeriesId::Exponential);
        // 2^30 = ~1.07e9 crosses the display limit well before n = 50.
        assert_eq!(exp.readout(30.0), Readout::Overflow);
        assert_eq!(exp.readout(10.0), Readout::Value(1024));
        // Plotted points never exceed the chart clamp.
        for (_, y) in exp.curve() {
            assert!(y <= PLOT_CLAMP);
        }
        assert_eq!(exp.marker(50.0).1, PLOT_CLAMP);
    }

    #[test]
    fn readout_rounds() {
        let nlogn = series(SeriesId::NLogN);
        // 10 * log2(10) = 33.219... → 33
        assert_eq!(nlogn.readout(10.0), Readout::Value(33));
    }

    #[test]
    fn curves_cover_integer_domain() {
        let p = PlotterState::new();
        assert_eq!(p.curves.len(), SERIES.len());
        for curve in &p.curves {
            assert_eq!(curve.len(), 50);
            assert_eq!(curve[0].0, 1.0);
            assert_eq!(curve[49].0, 50.0);
        }
    }
}
