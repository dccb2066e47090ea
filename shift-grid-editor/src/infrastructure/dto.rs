// =====================
// API通信用の型
// =====================

use chrono::NaiveDate;
use grid_features::Period;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::models::{Assignment, ShiftType, StaffMember};

/// リクエスト本体。`{"action": "...", ...params}` の形で送る
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ApiRequest {
    Login { password: String },
    GetConfig,
    GetShifts { year: i32, month: u32 },
    SaveShifts { payload: Vec<AssignmentDto> },
    AddStaff { name: String },
    DeleteStaff { name: String },
    SaveSetting { label: String, color: String },
    DeleteSetting { label: String },
}

impl ApiRequest {
    pub fn get_shifts(period: Period) -> Self {
        ApiRequest::GetShifts {
            year: period.year,
            month: period.month,
        }
    }

    /// ログ用のアクション名
    pub fn action(&self) -> &'static str {
        match self {
            ApiRequest::Login { .. } => "login",
            ApiRequest::GetConfig => "getConfig",
            ApiRequest::GetShifts { .. } => "getShifts",
            ApiRequest::SaveShifts { .. } => "saveShifts",
            ApiRequest::AddStaff { .. } => "addStaff",
            ApiRequest::DeleteStaff { .. } => "deleteStaff",
            ApiRequest::SaveSetting { .. } => "saveSetting",
            ApiRequest::DeleteSetting { .. } => "deleteSetting",
        }
    }
}

/// 割り当て1件 (日付は `YYYY-MM-DD` 文字列)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentDto {
    pub date: String,
    pub staff: String,
    #[serde(default)]
    pub shift: String,
}

impl From<&Assignment> for AssignmentDto {
    fn from(a: &Assignment) -> Self {
        Self {
            date: a.date.format("%Y-%m-%d").to_string(),
            staff: a.staff.clone(),
            shift: a.shift.clone(),
        }
    }
}

impl AssignmentDto {
    /// 日付が読めない行は警告を出して捨てる
    pub fn into_assignment(self) -> Option<Assignment> {
        match NaiveDate::parse_from_str(&self.date, "%Y-%m-%d") {
            Ok(date) => Some(Assignment {
                date,
                staff: self.staff,
                shift: self.shift,
            }),
            Err(e) => {
                warn!(date = %self.date, staff = %self.staff, error = %e, "日付を解釈できない割り当てを無視");
                None
            }
        }
    }
}

/// getConfig の応答
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigResponse {
    #[serde(default)]
    pub staff: Vec<StaffMember>,
    #[serde(default)]
    pub shifts: Vec<ShiftType>,
}

/// getShifts の応答
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShiftsResponse {
    #[serde(default)]
    pub data: Vec<AssignmentDto>,
}
