//! User settings HTTP handlers.
//!
//! ```text
//! GET /api/v1/settings   Fetch settings, creating defaults on first read
//! PUT /api/v1/settings   Apply a partial settings update
//! ```

use std::str::FromStr;

use actix_web::{get, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::UpdateSettingsRequest;
use crate::domain::settings::ParseSettingError;
use crate::domain::{ChartType, Currency, DateFormat, Error, SettingsUpdate, UserSettings};
use crate::inbound::http::auth::AuthContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::invalid_field_error;
use crate::inbound::http::ApiResult;

/// Request payload for a partial settings update.
#[derive(Debug, Deserialize, Serialize, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPayload {
    /// Currency symbol: `$`, `€`, `£` or `¥`.
    pub currency: Option<String>,
    /// Date pattern: `MM/DD/YYYY`, `DD/MM/YYYY` or `YYYY-MM-DD`.
    pub date_format: Option<String>,
    /// Histogram style: `bar` or `area`.
    pub chart_type: Option<String>,
}

/// Response payload for user settings.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    pub currency: String,
    pub date_format: String,
    pub chart_type: String,
    pub updated_at: String,
}

impl From<UserSettings> for SettingsResponse {
    fn from(value: UserSettings) -> Self {
        Self {
            currency: value.currency.as_str().to_owned(),
            date_format: value.date_format.as_str().to_owned(),
            chart_type: value.chart_type.as_str().to_owned(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

fn parse_setting<T>(field: &str, raw: Option<String>) -> Result<Option<T>, Error>
where
    T: FromStr<Err = ParseSettingError>,
{
    raw.map(|value| {
        value
            .parse()
            .map_err(|err: ParseSettingError| invalid_field_error(field, &err.input, "is not a recognised value"))
    })
    .transpose()
}

fn parse_settings_payload(payload: SettingsPayload) -> Result<SettingsUpdate, Error> {
    Ok(SettingsUpdate {
        currency: parse_setting::<Currency>("currency", payload.currency)?,
        date_format: parse_setting::<DateFormat>("dateFormat", payload.date_format)?,
        chart_type: parse_setting::<ChartType>("chartType", payload.chart_type)?,
    })
}

/// Fetch the caller's settings.
#[utoipa::path(
    get,
    path = "/api/v1/settings",
    description = "Fetch settings, creating defaults if none exist.",
    responses(
        (status = 200, description = "User settings", body = SettingsResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["settings"],
    operation_id = "getSettings"
)]
#[get("/settings")]
pub async fn get_settings(
    state: web::Data<HttpState>,
    auth: AuthContext,
) -> ApiResult<web::Json<SettingsResponse>> {
    let settings = state.settings.fetch(auth.identity()).await?;
    Ok(web::Json(SettingsResponse::from(settings)))
}

/// Apply a partial update to the caller's settings.
#[utoipa::path(
    put,
    path = "/api/v1/settings",
    request_body = SettingsPayload,
    responses(
        (status = 200, description = "Updated settings", body = SettingsResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["settings"],
    operation_id = "updateSettings"
)]
#[put("/settings")]
pub async fn update_settings(
    state: web::Data<HttpState>,
    auth: AuthContext,
    payload: web::Json<SettingsPayload>,
) -> ApiResult<web::Json<SettingsResponse>> {
    let update = parse_settings_payload(payload.into_inner())?;
    let settings = state
        .settings
        .update(auth.identity(), UpdateSettingsRequest { update })
        .await?;
    Ok(web::Json(SettingsResponse::from(settings)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode, OwnerId};
    use chrono::Utc;
    use rstest::rstest;

    #[test]
    fn payload_parses_all_fields() {
        let update = parse_settings_payload(SettingsPayload {
            currency: Some("€".to_owned()),
            date_format: Some("YYYY-MM-DD".to_owned()),
            chart_type: Some("area".to_owned()),
        })
        .expect("update");

        assert_eq!(update.currency, Some(Currency::Euro));
        assert_eq!(update.date_format, Some(DateFormat::Iso));
        assert_eq!(update.chart_type, Some(ChartType::Area));
    }

    #[test]
    fn empty_payload_parses_to_no_changes() {
        let update = parse_settings_payload(SettingsPayload::default()).expect("update");
        assert_eq!(update, SettingsUpdate::default());
    }

    #[rstest]
    #[case(SettingsPayload { currency: Some("₿".to_owned()), ..SettingsPayload::default() })]
    #[case(SettingsPayload { date_format: Some("DD.MM.YYYY".to_owned()), ..SettingsPayload::default() })]
    #[case(SettingsPayload { chart_type: Some("pie".to_owned()), ..SettingsPayload::default() })]
    fn payload_rejects_unknown_values(#[case] payload: SettingsPayload) {
        let err = parse_settings_payload(payload).expect_err("unknown value");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[test]
    fn response_renders_wire_representations() {
        let settings = UserSettings::default_for(OwnerId::new("user_1").expect("owner"), Utc::now());
        let response = SettingsResponse::from(settings);
        assert_eq!(response.currency, "$");
        assert_eq!(response.date_format, "MM/DD/YYYY");
        assert_eq!(response.chart_type, "bar");
    }
}
