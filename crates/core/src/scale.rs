//! The small pure scales the views share: linear instant↔number,
//! linear number↔number, and the square-root radius scale.
//!
//! Degenerate domains (empty, single point) map everything to the range
//! start instead of dividing by zero.

use chrono::{DateTime, Duration, FixedOffset};

/// Linear mapping between a datetime domain and a numeric range,
/// invertible in both directions (the slider's `progress ↔ max_time`).
#[derive(Debug, Clone, Copy)]
pub struct TimeScale {
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
    range: (f64, f64),
}

impl TimeScale {
    pub fn new(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>, range: (f64, f64)) -> Self {
        Self { start, end, range }
    }

    /// Domain extent of a commit sequence (assumed sorted ascending).
    /// `None` when there are no commits to span.
    pub fn from_extent(
        extent: Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)>,
        range: (f64, f64),
    ) -> Option<Self> {
        extent.map(|(start, end)| Self::new(start, end, range))
    }

    fn domain_millis(&self) -> f64 {
        (self.end - self.start).num_milliseconds() as f64
    }

    /// Forward map: instant → range value, clamped to the range.
    pub fn map(&self, t: DateTime<FixedOffset>) -> f64 {
        let span = self.domain_millis();
        if span <= 0.0 {
            return self.range.0;
        }
        let frac = ((t - self.start).num_milliseconds() as f64 / span).clamp(0.0, 1.0);
        self.range.0 + frac * (self.range.1 - self.range.0)
    }

    /// Inverse map: range value → instant, clamped to the domain.
    pub fn invert(&self, value: f64) -> DateTime<FixedOffset> {
        let width = self.range.1 - self.range.0;
        if width == 0.0 || self.domain_millis() <= 0.0 {
            return self.start;
        }
        let frac = ((value - self.range.0) / width).clamp(0.0, 1.0);
        let offset = (self.domain_millis() * frac).round() as i64;
        self.start + Duration::milliseconds(offset)
    }

    pub fn domain(&self) -> (DateTime<FixedOffset>, DateTime<FixedOffset>) {
        (self.start, self.end)
    }
}

/// Plain linear number scale (the hour-of-day axis).
#[derive(Debug, Clone, Copy)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn map(&self, value: f64) -> f64 {
        let span = self.domain.1 - self.domain.0;
        if span == 0.0 {
            return self.range.0;
        }
        let frac = (value - self.domain.0) / span;
        self.range.0 + frac * (self.range.1 - self.range.0)
    }
}

/// Square-root scale for dot radii — area-proportional encoding, so a
/// commit with 4× the lines reads as 4× the ink, not 4× the diameter.
#[derive(Debug, Clone, Copy)]
pub struct SqrtScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl SqrtScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn map(&self, value: f64) -> f64 {
        let lo = self.domain.0.max(0.0).sqrt();
        let hi = self.domain.1.max(0.0).sqrt();
        if hi - lo == 0.0 {
            return self.range.0;
        }
        let frac = ((value.max(0.0).sqrt() - lo) / (hi - lo)).clamp(0.0, 1.0);
        self.range.0 + frac * (self.range.1 - self.range.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).expect("datetime")
    }

    #[test]
    fn time_scale_roundtrip() {
        let scale = TimeScale::new(
            dt("2025-01-01T00:00:00-08:00"),
            dt("2025-01-11T00:00:00-08:00"),
            (0.0, 100.0),
        );
        assert_eq!(scale.map(dt("2025-01-01T00:00:00-08:00")), 0.0);
        assert_eq!(scale.map(dt("2025-01-11T00:00:00-08:00")), 100.0);
        assert!((scale.map(dt("2025-01-06T00:00:00-08:00")) - 50.0).abs() < 1e-9);

        let mid = scale.invert(50.0);
        assert_eq!(mid, dt("2025-01-06T00:00:00-08:00"));
        // invert(map(t)) returns t for in-domain instants
        let t = dt("2025-01-03T12:00:00-08:00");
        assert_eq!(scale.invert(scale.map(t)), t);
    }

    #[test]
    fn time_scale_degenerate_domain() {
        let t = dt("2025-01-01T00:00:00-08:00");
        let scale = TimeScale::new(t, t, (0.0, 100.0));
        assert_eq!(scale.map(t), 0.0);
        assert_eq!(scale.invert(75.0), t);
    }

    #[test]
    fn linear_scale_inverts_direction() {
        // Hour axis: 0 at the bottom of the plot, 24 at the top.
        let scale = LinearScale::new((0.0, 24.0), (600.0, 0.0));
        assert_eq!(scale.map(0.0), 600.0);
        assert_eq!(scale.map(24.0), 0.0);
        assert_eq!(scale.map(12.0), 300.0);
    }

    #[test]
    fn sqrt_scale_is_area_proportional() {
        let scale = SqrtScale::new((1.0, 100.0), (2.0, 30.0));
        assert!((scale.map(1.0) - 2.0).abs() < 1e-9);
        assert!((scale.map(100.0) - 30.0).abs() < 1e-9);
        // Quadrupling the value doubles the radius increment over the floor.
        let r25 = scale.map(25.0);
        assert!(r25 > 2.0 && r25 < 30.0);
    }

    #[test]
    fn sqrt_scale_single_valued_domain() {
        let scale = SqrtScale::new((5.0, 5.0), (2.0, 30.0));
        assert_eq!(scale.map(5.0), 2.0);
    }
}
