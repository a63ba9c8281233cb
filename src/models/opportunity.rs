//! Sales opportunity model, list filtering and pipeline aggregates

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    Prospecting,
    Qualification,
    Proposal,
    Negotiation,
    ClosedWon,
    ClosedLost,
}

impl Stage {
    pub fn is_open(&self) -> bool {
        !matches!(self, Stage::ClosedWon | Stage::ClosedLost)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    pub value: f64,
    /// 0-100
    #[serde(default)]
    pub probability: u8,
    pub stage: Stage,
    #[serde(default)]
    pub expected_close_date: Option<NaiveDate>,
}

impl Opportunity {
    /// Probability-weighted value
    pub fn weighted_value(&self) -> f64 {
        self.value * f64::from(self.probability.min(100)) / 100.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct OpportunityFilter {
    pub search: Option<String>,
    pub stage: Option<Stage>,
}

/// Case-insensitive search over title and customer name, plus optional stage match.
pub fn filter_opportunities<'a>(
    items: &'a [Opportunity],
    filter: &OpportunityFilter,
) -> Vec<&'a Opportunity> {
    let needle = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    items
        .iter()
        .filter(|o| filter.stage.map_or(true, |stage| o.stage == stage))
        .filter(|o| match &needle {
            Some(needle) => {
                o.title.to_lowercase().contains(needle)
                    || o
                        .customer_name
                        .as_deref()
                        .is_some_and(|c| c.to_lowercase().contains(needle))
            }
            None => true,
        })
        .collect()
}

/// Aggregates shown above the opportunities table
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PipelineMetrics {
    pub total_count: usize,
    pub open_count: usize,
    /// Sum of open opportunity values
    pub pipeline_value: f64,
    /// Probability-weighted sum of open opportunity values
    pub projected_value: f64,
    pub won_count: usize,
    pub won_value: f64,
    pub lost_count: usize,
    pub lost_value: f64,
    /// won / (won + lost) * 100, 0 when nothing closed
    pub win_rate: f64,
}

impl PipelineMetrics {
    pub fn from_opportunities<'a, I>(opportunities: I) -> Self
    where
        I: IntoIterator<Item = &'a Opportunity>,
    {
        let mut metrics = opportunities
            .into_iter()
            .fold(PipelineMetrics::default(), |mut m, o| {
                m.total_count += 1;
                match o.stage {
                    Stage::ClosedWon => {
                        m.won_count += 1;
                        m.won_value += o.value;
                    }
                    Stage::ClosedLost => {
                        m.lost_count += 1;
                        m.lost_value += o.value;
                    }
                    _ => {
                        m.open_count += 1;
                        m.pipeline_value += o.value;
                        m.projected_value += o.weighted_value();
                    }
                }
                m
            });

        let closed = metrics.won_count + metrics.lost_count;
        if closed > 0 {
            metrics.win_rate = metrics.won_count as f64 / closed as f64 * 100.0;
        }
        metrics
    }
}
