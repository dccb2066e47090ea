// =====================
// リモートAPIクライアント
// =====================

use std::sync::Arc;

use grid_features::Period;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use crate::domain::models::{Assignment, ShiftPalette, ShiftSheet, ShiftType, StaffMember};
use crate::error::ApiError;
use crate::infrastructure::dto::{ApiRequest, AssignmentDto, ConfigResponse, ShiftsResponse};
use crate::infrastructure::transport::Transport;

/// 読めない応答のうちエラー表示に出す文字数
const EXCERPT_CHARS: usize = 50;

pub struct ApiClient<T> {
    // 再読み込みを切り離して走らせるので共有できるようにしておく
    transport: Arc<T>,
}

impl<T> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// 1回だけ送る。JSONとして読めれば status に関係なくそのまま返す
    pub async fn call(&self, request: &ApiRequest) -> Result<Value, ApiError> {
        debug!(action = request.action(), "API呼び出し");
        let body = serde_json::to_string(request).map_err(|e| ApiError::Decode(e.to_string()))?;
        let raw = self.transport.post(body).await?;

        serde_json::from_str::<Value>(&raw).map_err(|e| {
            error!(action = request.action(), error = %e, raw = %raw, "JSONではない応答");
            ApiError::Malformed {
                excerpt: raw.chars().take(EXCERPT_CHARS).collect(),
            }
        })
    }

    /// status == "success" 以外は Rejected にする
    async fn call_checked(&self, request: &ApiRequest) -> Result<Value, ApiError> {
        let value = self.call(request).await?;
        ensure_success(value)
    }

    async fn call_decoded<R: DeserializeOwned>(&self, request: &ApiRequest) -> Result<R, ApiError> {
        let value = self.call_checked(request).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    // ---------------------
    // アクションごとの呼び出し
    // ---------------------

    pub async fn login(&self, password: &str) -> Result<(), ApiError> {
        self.call_checked(&ApiRequest::Login {
            password: password.to_string(),
        })
        .await
        .map(drop)
    }

    /// 名簿とシフト記号
    pub async fn get_config(&self) -> Result<(Vec<StaffMember>, ShiftPalette), ApiError> {
        let config: ConfigResponse = self.call_decoded(&ApiRequest::GetConfig).await?;
        Ok((config.staff, ShiftPalette::new(config.shifts)))
    }

    pub async fn get_shifts(&self, period: Period) -> Result<ShiftSheet, ApiError> {
        let shifts: ShiftsResponse = self.call_decoded(&ApiRequest::get_shifts(period)).await?;
        let assignments = shifts
            .data
            .into_iter()
            .filter_map(AssignmentDto::into_assignment);
        Ok(ShiftSheet::from_assignments(period, assignments))
    }

    pub async fn save_shifts(&self, payload: &[Assignment]) -> Result<(), ApiError> {
        let payload = payload.iter().map(AssignmentDto::from).collect();
        self.call_checked(&ApiRequest::SaveShifts { payload })
            .await
            .map(drop)
    }

    pub async fn add_staff(&self, name: &str) -> Result<(), ApiError> {
        self.call_checked(&ApiRequest::AddStaff {
            name: name.to_string(),
        })
        .await
        .map(drop)
    }

    pub async fn delete_staff(&self, name: &str) -> Result<(), ApiError> {
        self.call_checked(&ApiRequest::DeleteStaff {
            name: name.to_string(),
        })
        .await
        .map(drop)
    }

    pub async fn save_setting(&self, shift_type: &ShiftType) -> Result<(), ApiError> {
        self.call_checked(&ApiRequest::SaveSetting {
            label: shift_type.label.clone(),
            color: shift_type.color.clone(),
        })
        .await
        .map(drop)
    }

    pub async fn delete_setting(&self, label: &str) -> Result<(), ApiError> {
        self.call_checked(&ApiRequest::DeleteSetting {
            label: label.to_string(),
        })
        .await
        .map(drop)
    }
}

fn ensure_success(value: Value) -> Result<Value, ApiError> {
    if value.get("status").and_then(Value::as_str) == Some("success") {
        return Ok(value);
    }
    let message = match value.get("message") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };
    Err(ApiError::Rejected(message))
}
