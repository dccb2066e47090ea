// =====================
// ドメインモデル定義
// =====================

use std::collections::HashMap;

use chrono::NaiveDate;
use grid_features::{CellId, Period};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::style::{CellStyle, Rgb, StyleTable};
use crate::error::ValidationError;

/// シフト記号の最大文字数
pub const MAX_LABEL_CHARS: usize = 2;

/// スタッフ (名前で一意。並び順 = 列の順)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaffMember {
    pub name: String,
}

impl StaffMember {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// シフト記号と色
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftType {
    pub label: String,
    pub color: String,
}

impl ShiftType {
    pub fn new(label: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            color: color.into(),
        }
    }
}

/// 1セル分の割り当て
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub date: NaiveDate,
    pub staff: String,
    pub shift: String,
}

/// 記号の追加前チェック。空・3文字以上は通信せずに弾く。
/// 文字数はUnicodeスカラー値で数える
pub fn validate_label(label: &str) -> Result<&str, ValidationError> {
    let count = label.chars().count();
    if count == 0 || count > MAX_LABEL_CHARS {
        return Err(ValidationError::LabelLength);
    }
    Ok(label)
}

/// 登録済みのシフト記号一覧 (サーバーの並び順のまま)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShiftPalette {
    types: Vec<ShiftType>,
}

impl ShiftPalette {
    pub fn new(types: Vec<ShiftType>) -> Self {
        Self { types }
    }

    pub fn types(&self) -> &[ShiftType] {
        &self.types
    }

    pub fn lookup(&self, label: &str) -> Option<&ShiftType> {
        if label.is_empty() {
            return None;
        }
        self.types.iter().find(|t| t.label == label)
    }

    /// ラベルに対応する見た目。未登録・空・色が読めない場合は既定 (白背景)
    pub fn style_for(&self, label: &str, style: &StyleTable) -> CellStyle {
        let fallback = style.default_cell();
        match self.lookup(label).and_then(|t| Rgb::parse(&t.color)) {
            Some(background) => CellStyle {
                background,
                text: fallback.text,
            },
            None => fallback,
        }
    }
}

/// 表示中の月の割り当て (セル -> 記号)
/// 月を読み込むたびに丸ごと差し替え、一括適用でだけ書き換わる
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftSheet {
    period: Period,
    cells: HashMap<CellId, String>,
}

impl ShiftSheet {
    pub fn empty(period: Period) -> Self {
        Self {
            period,
            cells: HashMap::new(),
        }
    }

    /// 表示月以外の日付は捨てる。同じセルが重複したら後勝ち
    pub fn from_assignments(period: Period, assignments: impl IntoIterator<Item = Assignment>) -> Self {
        let mut sheet = Self::empty(period);
        for assignment in assignments {
            if !period.contains(assignment.date) {
                debug!(date = %assignment.date, %period, "表示月以外の割り当てを無視");
                continue;
            }
            sheet.set(CellId::new(assignment.date, assignment.staff), assignment.shift);
        }
        sheet
    }

    pub fn period(&self) -> Period {
        self.period
    }

    /// 未割り当てなら空文字
    pub fn value(&self, cell: &CellId) -> &str {
        self.cells.get(cell).map(String::as_str).unwrap_or("")
    }

    /// 空文字は消去
    pub fn set(&mut self, cell: CellId, label: impl Into<String>) {
        let label = label.into();
        if label.is_empty() {
            self.cells.remove(&cell);
        } else {
            self.cells.insert(cell, label);
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// 保存用。日付昇順、同じ日の中は名簿順。空セルと名簿にいないスタッフは含めない
    pub fn to_payload(&self, roster: &[StaffMember]) -> Vec<Assignment> {
        let mut payload = Vec::new();
        for date in self.period.dates() {
            for staff in roster {
                let cell = CellId::new(date, staff.name.clone());
                let value = self.value(&cell);
                if !value.is_empty() {
                    payload.push(Assignment {
                        date,
                        staff: staff.name.clone(),
                        shift: value.to_string(),
                    });
                }
            }
        }
        payload
    }
}
