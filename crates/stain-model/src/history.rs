//! Persisted record of a committed estimate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::estimate::EstimationResult;

/// One committed calculation, as stored in the history file.
///
/// The serialized field names are part of the on-disk format and must not
/// change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Unique identifier for this entry.
    pub id: String,

    /// Name of the source image file.
    pub file_name: String,

    pub image_width: u32,
    pub image_height: u32,

    pub total_points: usize,
    pub points_in_stain: usize,
    pub estimated_area: u64,
    pub area_percentage: f64,

    /// When the estimate was committed.
    pub timestamp: DateTime<Utc>,

    /// Small preview of the image as a `data:` URL.
    pub image_data_url: String,
}

impl HistoryEntry {
    /// Create a new entry stamped with a fresh id and the current time.
    pub fn new(
        file_name: impl Into<String>,
        image_width: u32,
        image_height: u32,
        result: &EstimationResult,
        image_data_url: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            file_name: file_name.into(),
            image_width,
            image_height,
            total_points: result.total_points,
            points_in_stain: result.points_in_stain,
            estimated_area: result.estimated_area,
            area_percentage: result.area_percentage,
            timestamp: Utc::now(),
            image_data_url,
        }
    }

    /// The estimate this entry was created from.
    pub fn result(&self) -> EstimationResult {
        EstimationResult {
            total_points: self.total_points,
            points_in_stain: self.points_in_stain,
            estimated_area: self.estimated_area,
            area_percentage: self.area_percentage,
        }
    }

    /// Get relative time string (e.g., "2 hours ago", "Yesterday").
    pub fn relative_time(&self) -> String {
        self.relative_time_at(Utc::now())
    }

    /// Relative time measured against an explicit `now`.
    pub fn relative_time_at(&self, now: DateTime<Utc>) -> String {
        let duration = now.signed_duration_since(self.timestamp);

        if duration.num_minutes() < 1 {
            "Just now".to_string()
        } else if duration.num_minutes() < 60 {
            let mins = duration.num_minutes();
            format!("{} minute{} ago", mins, if mins == 1 { "" } else { "s" })
        } else if duration.num_hours() < 24 {
            let hours = duration.num_hours();
            format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
        } else if duration.num_days() == 1 {
            "Yesterday".to_string()
        } else if duration.num_days() < 7 {
            format!("{} days ago", duration.num_days())
        } else if duration.num_weeks() < 4 {
            let weeks = duration.num_weeks();
            format!("{} week{} ago", weeks, if weeks == 1 { "" } else { "s" })
        } else {
            self.timestamp.format("%b %d, %Y").to_string()
        }
    }

    /// Points summary (e.g., "532/1000").
    pub fn points_string(&self) -> String {
        format!("{}/{}", self.points_in_stain, self.total_points)
    }

    /// Estimated area with thousands grouping (e.g., "12,345 px²").
    pub fn area_string(&self) -> String {
        format!("{} px²", group_thousands(self.estimated_area))
    }
}

/// Format an integer with `,` between groups of three digits.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
