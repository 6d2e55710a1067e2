use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::AnalysisError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = AnalysisError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "positive" => Ok(Sentiment::Positive),
            "negative" => Ok(Sentiment::Negative),
            "neutral" => Ok(Sentiment::Neutral),
            other => Err(AnalysisError::MalformedResponse(format!(
                "unrecognized sentiment {other:?}"
            ))),
        }
    }
}

/// A validated analysis: every field present and inside its domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub sentiment: Sentiment,
    pub polarity: f64,
    pub subjectivity: f64,
    pub confidence: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

/// Upstream body as sent on the wire. The reference backend always includes
/// every key and nulls the ones that do not apply.
#[derive(Debug, Default, Deserialize)]
pub struct RawAnalysisResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub sentiment: Option<String>,
    #[serde(default)]
    pub polarity: Option<f64>,
    #[serde(default)]
    pub subjectivity: Option<f64>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl TryFrom<RawAnalysisResponse> for AnalysisResult {
    type Error = AnalysisError;

    fn try_from(raw: RawAnalysisResponse) -> Result<Self, Self::Error> {
        if let Some(message) = raw.error.filter(|message| !message.is_empty()) {
            return Err(AnalysisError::ServerError(message));
        }

        let sentiment = raw
            .sentiment
            .ok_or_else(|| missing("sentiment"))?
            .parse::<Sentiment>()?;
        let polarity = bounded("polarity", raw.polarity, -1.0, 1.0)?;
        let subjectivity = bounded("subjectivity", raw.subjectivity, 0.0, 1.0)?;
        let confidence = bounded("confidence", raw.confidence, 0.0, 100.0)?;

        Ok(AnalysisResult {
            sentiment,
            polarity,
            subjectivity,
            confidence,
        })
    }
}

fn missing(field: &str) -> AnalysisError {
    AnalysisError::MalformedResponse(format!("missing field `{field}`"))
}

fn bounded(field: &str, value: Option<f64>, min: f64, max: f64) -> Result<f64, AnalysisError> {
    let value = value.ok_or_else(|| missing(field))?;
    if !value.is_finite() || value < min || value > max {
        return Err(AnalysisError::MalformedResponse(format!(
            "`{field}` = {value} outside [{min}, {max}]"
        )));
    }
    Ok(value)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub text: String,
    pub sentiment: Sentiment,
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeForm {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    pub draft: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ThemeResponse {
    pub theme: Theme,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(body: &str) -> RawAnalysisResponse {
        serde_json::from_str(body).expect("valid json")
    }

    #[test]
    fn accepts_reference_backend_success_shape() {
        let result = AnalysisResult::try_from(raw(
            r#"{"sentiment":"negative","polarity":-0.42,"subjectivity":0.1,"confidence":71.0,"error":null}"#,
        ))
        .unwrap();
        assert_eq!(result.sentiment, Sentiment::Negative);
        assert_eq!(result.polarity, -0.42);
    }

    #[test]
    fn error_field_wins_over_payload() {
        let err = AnalysisResult::try_from(raw(
            r#"{"error":"Please enter some text to analyze.","sentiment":null,"polarity":null,"subjectivity":null,"confidence":null}"#,
        ))
        .unwrap_err();
        assert_eq!(
            err,
            AnalysisError::ServerError("Please enter some text to analyze.".into())
        );
    }

    #[test]
    fn empty_error_string_is_not_an_error() {
        let result = AnalysisResult::try_from(raw(
            r#"{"error":"","sentiment":"neutral","polarity":0.0,"subjectivity":0.0,"confidence":100}"#,
        ));
        assert!(result.is_ok());
    }

    #[test]
    fn missing_or_out_of_range_fields_are_malformed() {
        let missing = AnalysisResult::try_from(raw(
            r#"{"sentiment":"positive","polarity":0.5,"confidence":60}"#,
        ))
        .unwrap_err();
        assert!(matches!(missing, AnalysisError::MalformedResponse(_)));

        let out_of_range = AnalysisResult::try_from(raw(
            r#"{"sentiment":"positive","polarity":1.5,"subjectivity":0.5,"confidence":60}"#,
        ))
        .unwrap_err();
        assert!(matches!(out_of_range, AnalysisError::MalformedResponse(_)));
    }

    #[test]
    fn unknown_sentiment_is_not_defaulted() {
        let err = AnalysisResult::try_from(raw(
            r#"{"sentiment":"ecstatic","polarity":0.9,"subjectivity":0.5,"confidence":90}"#,
        ))
        .unwrap_err();
        assert!(err.is_server_class());
    }

    #[test]
    fn theme_toggles_and_rejects_unknown_values() {
        assert_eq!(Theme::default(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::parse("solarized"), None);
    }
}
