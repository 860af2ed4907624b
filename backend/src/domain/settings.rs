//! Per-identity display settings.
//!
//! Settings are created lazily on first read with defaults and upserted on
//! write; there is exactly one record per identity.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::identity::OwnerId;

/// Error returned when parsing an unknown settings value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSettingError {
    /// The setting field being parsed.
    pub field: &'static str,
    /// The unrecognised input value.
    pub input: String,
}

impl fmt::Display for ParseSettingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: {}", self.field, self.input)
    }
}

impl std::error::Error for ParseSettingError {}

/// Currency symbol shown next to prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
pub enum Currency {
    #[default]
    Dollar,
    Euro,
    Pound,
    Yen,
}

impl Currency {
    /// The display symbol, which is also the wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dollar => "$",
            Self::Euro => "€",
            Self::Pound => "£",
            Self::Yen => "¥",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "$" => Ok(Self::Dollar),
            "€" => Ok(Self::Euro),
            "£" => Ok(Self::Pound),
            "¥" => Ok(Self::Yen),
            _ => Err(ParseSettingError {
                field: "currency",
                input: s.to_owned(),
            }),
        }
    }
}

impl From<Currency> for String {
    fn from(value: Currency) -> Self {
        value.as_str().to_owned()
    }
}

impl TryFrom<String> for Currency {
    type Error = ParseSettingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Date rendering pattern for dashboards and CSV export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
pub enum DateFormat {
    /// `MM/DD/YYYY`
    #[default]
    MonthFirst,
    /// `DD/MM/YYYY`
    DayFirst,
    /// `YYYY-MM-DD`
    Iso,
}

impl DateFormat {
    /// The wire representation, matching the pattern it renders.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MonthFirst => "MM/DD/YYYY",
            Self::DayFirst => "DD/MM/YYYY",
            Self::Iso => "YYYY-MM-DD",
        }
    }

    /// Render a timestamp's date part in this format.
    pub fn render(self, timestamp: DateTime<Utc>) -> String {
        let pattern = match self {
            Self::MonthFirst => "%m/%d/%Y",
            Self::DayFirst => "%d/%m/%Y",
            Self::Iso => "%Y-%m-%d",
        };
        timestamp.format(pattern).to_string()
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateFormat {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MM/DD/YYYY" => Ok(Self::MonthFirst),
            "DD/MM/YYYY" => Ok(Self::DayFirst),
            "YYYY-MM-DD" => Ok(Self::Iso),
            _ => Err(ParseSettingError {
                field: "date format",
                input: s.to_owned(),
            }),
        }
    }
}

impl From<DateFormat> for String {
    fn from(value: DateFormat) -> Self {
        value.as_str().to_owned()
    }
}

impl TryFrom<String> for DateFormat {
    type Error = ParseSettingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Chart style for the dashboard's weekly histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChartType {
    #[default]
    Bar,
    Area,
}

impl ChartType {
    /// The wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Area => "area",
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartType {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bar" => Ok(Self::Bar),
            "area" => Ok(Self::Area),
            _ => Err(ParseSettingError {
                field: "chart type",
                input: s.to_owned(),
            }),
        }
    }
}

/// One settings record per identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    /// The identity these settings belong to.
    pub owner_id: OwnerId,
    /// Currency symbol for price display.
    pub currency: Currency,
    /// Date rendering pattern.
    pub date_format: DateFormat,
    /// Dashboard chart style.
    pub chart_type: ChartType,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Partial settings update; `None` fields are left untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsUpdate {
    pub currency: Option<Currency>,
    pub date_format: Option<DateFormat>,
    pub chart_type: Option<ChartType>,
}

impl UserSettings {
    /// Default settings created lazily on first read.
    pub fn default_for(owner_id: OwnerId, now: DateTime<Utc>) -> Self {
        Self {
            owner_id,
            currency: Currency::default(),
            date_format: DateFormat::default(),
            chart_type: ChartType::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update in place.
    pub fn apply_update(&mut self, update: SettingsUpdate, now: DateTime<Utc>) {
        if let Some(currency) = update.currency {
            self.currency = currency;
        }
        if let Some(date_format) = update.date_format {
            self.date_format = date_format;
        }
        if let Some(chart_type) = update.chart_type {
            self.chart_type = chart_type;
        }
        self.updated_at = now;
    }
}
