//! SLA Metric Model

use serde::{Deserialize, Serialize};

/// Comparison polarity for a metric
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MetricDirection {
    /// Times, delays: staying under the target is good
    LowerIsBetter,
    /// Satisfaction scores: staying over the target is good
    HigherIsBetter,
}

/// Derived per-metric compliance status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SlaStatus {
    Excellent,
    Good,
    Warning,
    Critical,
}

/// A tracked SLA metric: live measurement against a configurable target
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlaMetric {
    pub name: String,
    /// Current measurement
    pub value: f64,
    /// Threshold the measurement is judged against
    pub target: f64,
    pub unit: String,
    pub direction: MetricDirection,
}

impl SlaMetric {
    /// Derive the compliance status from value, target and polarity
    ///
    /// Lower-is-better: excellent at <= 0.7*target, good at <= target,
    /// warning at <= 1.2*target, critical beyond.
    /// Higher-is-better: excellent at >= target, warning at >= 0.9*target,
    /// critical below.
    pub fn status(&self) -> SlaStatus {
        match self.direction {
            MetricDirection::LowerIsBetter => {
                if self.value <= self.target * 0.7 {
                    SlaStatus::Excellent
                } else if self.value <= self.target {
                    SlaStatus::Good
                } else if self.value <= self.target * 1.2 {
                    SlaStatus::Warning
                } else {
                    SlaStatus::Critical
                }
            }
            MetricDirection::HigherIsBetter => {
                if self.value >= self.target {
                    SlaStatus::Excellent
                } else if self.value >= self.target * 0.9 {
                    SlaStatus::Warning
                } else {
                    SlaStatus::Critical
                }
            }
        }
    }

    /// Contribution of this metric to the aggregate compliance score
    ///
    /// Rewards being on target but caps at 100, so one over-performing
    /// metric cannot mask a breached one.
    pub fn compliance(&self) -> f64 {
        let ratio = match self.direction {
            MetricDirection::HigherIsBetter => {
                if self.value >= self.target {
                    return 100.0;
                }
                self.value / self.target * 100.0
            }
            MetricDirection::LowerIsBetter => {
                if self.value <= self.target {
                    return 100.0;
                }
                self.target / self.value * 100.0
            }
        };
        ratio.clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(value: f64, target: f64, direction: MetricDirection) -> SlaMetric {
        SlaMetric {
            name: "m".into(),
            value,
            target,
            unit: "с".into(),
            direction,
        }
    }

    #[test]
    fn lower_is_better_bands() {
        let d = MetricDirection::LowerIsBetter;
        assert_eq!(metric(12.3, 30.0, d).status(), SlaStatus::Excellent);
        assert_eq!(metric(25.0, 30.0, d).status(), SlaStatus::Good);
        assert_eq!(metric(34.0, 30.0, d).status(), SlaStatus::Warning);
        assert_eq!(metric(40.0, 30.0, d).status(), SlaStatus::Critical);
    }

    #[test]
    fn higher_is_better_bands() {
        let d = MetricDirection::HigherIsBetter;
        assert_eq!(metric(4.6, 4.5, d).status(), SlaStatus::Excellent);
        assert_eq!(metric(4.2, 4.5, d).status(), SlaStatus::Warning);
        assert_eq!(metric(3.0, 4.5, d).status(), SlaStatus::Critical);
    }

    #[test]
    fn compliance_caps_at_100() {
        let d = MetricDirection::LowerIsBetter;
        assert_eq!(metric(1.0, 30.0, d).compliance(), 100.0);
        let over = metric(60.0, 30.0, d).compliance();
        assert!((over - 50.0).abs() < 1e-9);
    }

    #[test]
    fn compliance_handles_zero_value() {
        // target/value would divide by zero; a zero measurement on a
        // lower-is-better metric is simply perfect
        let m = metric(0.0, 30.0, MetricDirection::LowerIsBetter);
        assert_eq!(m.compliance(), 100.0);
    }
}
