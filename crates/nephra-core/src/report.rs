//! Plain-text report rendering.
//!
//! Flattens a completed assessment into the downloadable report format:
//! header, score summary, positive risk factors, recommendations and a
//! generation timestamp. Rendering is deterministic for a fixed
//! timestamp, so the timestamp is a parameter rather than a clock read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::recommendations::RecommendationBlock;
use crate::scorer::{RiskResult, ScoreFactor, SCORE_SCALE};

/// A scored assessment bundled with its recommendations. Returned by
/// the calculate endpoint and accepted back by the report endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    pub id: Uuid,
    pub result: RiskResult,
    pub recommendations: Vec<RecommendationBlock>,
}

/// Rendered report plus the filename a browser should save it under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDocument {
    pub content: String,
    pub filename: String,
}

/// Render an assessment as the downloadable plain-text report.
///
/// Only factors that earned points are listed. The urgent line appears
/// directly under the risk summary when the urgent flag is set.
pub fn render_report(assessment: &Assessment, generated_at: DateTime<Utc>) -> ReportDocument {
    let result = &assessment.result;
    let mut content = String::new();

    content.push_str("Chronic Kidney Disease Risk Assessment Report\n");
    content.push_str("============================================\n\n");
    content.push_str(&format!("Risk Score: {}/{}\n", result.total_score, SCORE_SCALE));
    content.push_str(&format!("Risk Level: {}\n", result.risk_level));
    content.push_str(&format!("Estimated 5-year risk: {}\n", result.risk_percentage));
    if result.urgent_warning {
        content.push_str("URGENT: prompt consultation with a healthcare provider is recommended\n");
    }
    content.push('\n');

    content.push_str("Key Risk Factors:\n");
    content.push_str("----------------\n");
    let factor_lines: Vec<String> = result
        .factors
        .iter()
        .filter(|factor| factor.points > 0)
        .map(factor_line)
        .collect();
    content.push_str(&factor_lines.join("\n"));
    content.push_str("\n\n");

    content.push_str("Recommendations:\n");
    content.push_str("---------------\n");
    let blocks: Vec<String> = assessment.recommendations.iter().map(render_block).collect();
    content.push_str(&blocks.join("\n\n"));
    content.push_str("\n\n");

    content.push_str(&format!(
        "Report generated on: {}\n",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    ));

    ReportDocument {
        content,
        filename: format!("ckd_report_{}.txt", generated_at.format("%Y%m%d_%H%M%S")),
    }
}

fn factor_line(factor: &ScoreFactor) -> String {
    let mut line = format!(
        "- {}: {}/{} points",
        factor.label, factor.points, factor.max_points
    );
    if let Some(note) = &factor.note {
        line.push(' ');
        line.push_str(note);
    }
    line
}

fn render_block(block: &RecommendationBlock) -> String {
    let mut text = block.title.clone();
    if let Some(intro) = &block.intro {
        text.push('\n');
        text.push_str(intro);
    }
    for item in &block.items {
        text.push_str("\n- ");
        text.push_str(item);
    }
    text
}
