use std::fmt;

use colored::{ColoredString, Colorize};
use serde::Serialize;
use serde_json::json;

use crate::evaluator::ScoreResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Safe,
    LowRisk,
    Suspicious,
    HighRisk,
}

impl RiskLevel {
    pub fn from_score(score: u8) -> Self {
        match score {
            0 => RiskLevel::Safe,
            1..=29 => RiskLevel::LowRisk,
            30..=59 => RiskLevel::Suspicious,
            _ => RiskLevel::HighRisk,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Safe => "Safe",
            RiskLevel::LowRisk => "Low Risk",
            RiskLevel::Suspicious => "Suspicious",
            RiskLevel::HighRisk => "High Risk",
        }
    }

    fn badge(&self) -> ColoredString {
        match self {
            RiskLevel::Safe => format!("🟢 {}", self.label()).green().bold(),
            RiskLevel::LowRisk => format!("🟡 {}", self.label()).yellow().bold(),
            RiskLevel::Suspicious => format!("⚠ {}", self.label()).truecolor(255, 165, 0).bold(),
            RiskLevel::HighRisk => format!("☠ {}", self.label()).red().bold(),
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn render_text(url: &str, result: &ScoreResult) -> String {
    let level = RiskLevel::from_score(result.score);
    let mut out = format!(
        "\n🔗 URL: {}\n☢ Risk Score: {}/100 - {}\n",
        url,
        result.score,
        level.badge()
    );
    for finding in &result.details {
        out.push_str(&format!("• {}\n", finding));
    }
    out.push_str("----------------------------------------------");
    out
}

pub fn render_json(url: &str, result: &ScoreResult) -> serde_json::Value {
    json!({
        "url": url,
        "score": result.score,
        "level": RiskLevel::from_score(result.score),
        "details": result.details,
    })
}
