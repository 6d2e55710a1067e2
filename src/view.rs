//! Pure mapping from an analysis to the values the page displays.
//!
//! The gauge uses the half-dial convention where the needle sweeps
//! [-180°, 0°]: polarity -1 points left, 0 points straight up, +1 points right.

use crate::models::{AnalysisResult, Sentiment};
use serde::Serialize;

pub const GAUGE_MIN_DEG: f64 = -180.0;
pub const GAUGE_MAX_DEG: f64 = 0.0;
pub const GAUGE_NEUTRAL_BAND: f64 = 0.1;
pub const SUBJECTIVE_ABOVE: f64 = 0.5;
pub const CELEBRATE_ABOVE: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Success,
    Danger,
    Neutral,
}

impl Tone {
    pub fn css_class(self) -> &'static str {
        match self {
            Tone::Success => "success",
            Tone::Danger => "danger",
            Tone::Neutral => "neutral",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Tone::Success => "#10b981",
            Tone::Danger => "#ef4444",
            Tone::Neutral => "#a1a1aa",
        }
    }
}

impl From<Sentiment> for Tone {
    fn from(sentiment: Sentiment) -> Self {
        match sentiment {
            Sentiment::Positive => Tone::Success,
            Sentiment::Negative => Tone::Danger,
            Sentiment::Neutral => Tone::Neutral,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeView {
    pub angle_deg: f64,
    pub tone: Tone,
    pub polarity_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectivityView {
    pub value_text: String,
    pub qualifier: &'static str,
    pub display: String,
    pub fill_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfidenceView {
    pub percent: i64,
    pub display: String,
    pub fill_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewCommands {
    pub sentiment: Sentiment,
    pub label: &'static str,
    pub tone: Tone,
    pub gauge: GaugeView,
    pub subjectivity: SubjectivityView,
    pub confidence: ConfidenceView,
    pub celebrate: bool,
}

pub fn render(result: &AnalysisResult) -> ViewCommands {
    let percent = result.confidence.round() as i64;

    ViewCommands {
        sentiment: result.sentiment,
        label: result.sentiment.display_name(),
        tone: Tone::from(result.sentiment),
        gauge: GaugeView {
            angle_deg: gauge_angle(result.polarity),
            tone: gauge_tone(result.polarity),
            polarity_text: polarity_text(result.polarity),
        },
        subjectivity: subjectivity_view(result.subjectivity),
        confidence: ConfidenceView {
            percent,
            display: format!("{percent}%"),
            fill_percent: percent as f64,
        },
        celebrate: result.confidence > CELEBRATE_ABOVE
            && result.sentiment == Sentiment::Positive,
    }
}

pub fn gauge_angle(polarity: f64) -> f64 {
    (polarity + 1.0) * 90.0 - 180.0
}

pub fn gauge_tone(polarity: f64) -> Tone {
    if polarity > GAUGE_NEUTRAL_BAND {
        Tone::Success
    } else if polarity < -GAUGE_NEUTRAL_BAND {
        Tone::Danger
    } else {
        Tone::Neutral
    }
}

fn polarity_text(polarity: f64) -> String {
    if polarity >= 0.0 {
        format!("+{}", polarity.abs())
    } else {
        polarity.to_string()
    }
}

fn subjectivity_view(subjectivity: f64) -> SubjectivityView {
    let qualifier = if subjectivity > SUBJECTIVE_ABOVE {
        "Subjective"
    } else {
        "Objective"
    };
    let value_text = format!("{subjectivity:.2}");

    SubjectivityView {
        display: format!("{value_text} ({qualifier})"),
        value_text,
        qualifier,
        fill_percent: subjectivity * 100.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(sentiment: Sentiment, polarity: f64, subjectivity: f64, confidence: f64) -> AnalysisResult {
        AnalysisResult {
            sentiment,
            polarity,
            subjectivity,
            confidence,
        }
    }

    #[test]
    fn loved_text_renders_positive_view() {
        let view = render(&result(Sentiment::Positive, 0.8, 0.6, 92.0));

        assert_eq!(view.label, "Positive");
        assert_eq!(view.tone, Tone::Success);
        assert!((view.gauge.angle_deg - -18.0).abs() < 1e-9);
        assert_eq!(view.gauge.tone, Tone::Success);
        assert_eq!(view.gauge.polarity_text, "+0.8");
        assert_eq!(view.subjectivity.display, "0.60 (Subjective)");
        assert!((view.subjectivity.fill_percent - 60.0).abs() < 1e-9);
        assert_eq!(view.confidence.display, "92%");
        assert_eq!(view.confidence.fill_percent, 92.0);
        assert!(view.celebrate);
    }

    #[test]
    fn render_is_deterministic() {
        let input = result(Sentiment::Negative, -0.35, 0.2, 64.4);
        assert_eq!(render(&input), render(&input));
    }

    #[test]
    fn gauge_hits_boundaries_and_is_monotonic() {
        assert_eq!(gauge_angle(-1.0), GAUGE_MIN_DEG);
        assert_eq!(gauge_angle(0.0), -90.0);
        assert_eq!(gauge_angle(1.0), GAUGE_MAX_DEG);

        let mut previous = gauge_angle(-1.0);
        for step in 1..=200 {
            let polarity = -1.0 + f64::from(step) * 0.01;
            let angle = gauge_angle(polarity);
            assert!(angle >= previous, "angle dropped at polarity {polarity}");
            previous = angle;
        }
    }

    #[test]
    fn gauge_tone_uses_neutral_band() {
        assert_eq!(gauge_tone(0.1), Tone::Neutral);
        assert_eq!(gauge_tone(-0.1), Tone::Neutral);
        assert_eq!(gauge_tone(0.11), Tone::Success);
        assert_eq!(gauge_tone(-0.11), Tone::Danger);
    }

    #[test]
    fn sentiment_tone_is_three_way() {
        assert_eq!(Tone::from(Sentiment::Positive), Tone::Success);
        assert_eq!(Tone::from(Sentiment::Negative), Tone::Danger);
        assert_eq!(Tone::from(Sentiment::Neutral), Tone::Neutral);
    }

    #[test]
    fn subjectivity_at_half_is_objective() {
        let view = render(&result(Sentiment::Neutral, 0.0, 0.5, 50.0));
        assert_eq!(view.subjectivity.display, "0.50 (Objective)");
        assert_eq!(view.gauge.polarity_text, "+0");
    }

    #[test]
    fn confidence_rounds_half_away_from_zero() {
        let view = render(&result(Sentiment::Neutral, 0.0, 0.0, 72.5));
        assert_eq!(view.confidence.percent, 73);
        assert_eq!(view.confidence.display, "73%");
    }

    #[test]
    fn celebration_needs_positive_and_high_confidence() {
        assert!(!render(&result(Sentiment::Positive, 0.9, 0.5, 80.0)).celebrate);
        assert!(!render(&result(Sentiment::Negative, -0.9, 0.5, 99.0)).celebrate);
        assert!(render(&result(Sentiment::Positive, 0.9, 0.5, 80.1)).celebrate);
    }

    #[test]
    fn negative_polarity_keeps_its_sign() {
        let view = render(&result(Sentiment::Negative, -0.42, 0.3, 70.0));
        assert_eq!(view.gauge.polarity_text, "-0.42");
        assert_eq!(view.label, "Negative");
        assert_eq!(view.tone, Tone::Danger);
    }
}
