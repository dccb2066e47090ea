// =====================
// ツールバー・入力フォーム
// =====================

use crate::domain::models::{validate_label, ShiftPalette, ShiftType, StaffMember};
use crate::domain::style::{Rgb, StyleTable};
use crate::error::ValidationError;

pub const CLEAR_LABEL: &str = "消去";

/// 新しい記号の色候補
pub const PRESET_COLORS: [&str; 10] = [
    "#ffcdd2", "#f8bbd0", "#e1bee7", "#d1c4e9", "#c5cae9",
    "#bbdefb", "#b2ebf2", "#b2dfdb", "#c8e6c9", "#fff9c4",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarButton {
    /// ボタンの表示
    pub caption: String,
    /// 押したときに選択セルへ書き込む値 (消去は空文字)
    pub apply: String,
    pub background: Rgb,
    pub text: Rgb,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolbar {
    pub buttons: Vec<ToolbarButton>,
}

impl Toolbar {
    /// 先頭は「消去」、以降は登録順の記号
    pub fn from_palette(palette: &ShiftPalette, style: &StyleTable) -> Self {
        let clear_text = Rgb::parse(&style.clear_button_text).unwrap_or(Rgb(0xe7, 0x4c, 0x3c));
        let mut buttons = vec![ToolbarButton {
            caption: CLEAR_LABEL.to_string(),
            apply: String::new(),
            background: Rgb::WHITE,
            text: clear_text,
        }];
        buttons.extend(palette.types().iter().map(|t| {
            let look = palette.style_for(&t.label, style);
            ToolbarButton {
                caption: t.label.clone(),
                apply: t.label.clone(),
                background: look.background,
                text: look.text,
            }
        }));
        Self { buttons }
    }
}

/// 記号追加フォーム (ラベル + プリセット色)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShiftTypeForm {
    pub label: String,
    color_index: usize,
}

impl ShiftTypeForm {
    /// 開くたびに空欄・先頭の色に戻す
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_color(&mut self, index: usize) -> bool {
        if index < PRESET_COLORS.len() {
            self.color_index = index;
            true
        } else {
            false
        }
    }

    pub fn selected_index(&self) -> usize {
        self.color_index
    }

    pub fn selected_color(&self) -> &'static str {
        PRESET_COLORS[self.color_index]
    }

    pub fn to_shift_type(&self) -> Result<ShiftType, ValidationError> {
        let label = validate_label(&self.label)?;
        Ok(ShiftType::new(label, self.selected_color()))
    }
}

/// PDF出力するスタッフの選択 (初期状態は全員)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPicker {
    pub entries: Vec<(String, bool)>,
}

impl ExportPicker {
    pub const SELECT_ALL: &'static str = "全て選択";

    pub fn new(roster: &[StaffMember]) -> Self {
        Self {
            entries: roster.iter().map(|s| (s.name.clone(), true)).collect(),
        }
    }

    pub fn all_checked(&self) -> bool {
        self.entries.iter().all(|(_, checked)| *checked)
    }

    /// 「全て選択」のチェックに合わせて全員を揃える
    pub fn set_all(&mut self, checked: bool) {
        for entry in &mut self.entries {
            entry.1 = checked;
        }
    }

    pub fn set(&mut self, name: &str, checked: bool) {
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| n == name) {
            entry.1 = checked;
        }
    }

    pub fn chosen(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, checked)| *checked)
            .map(|(name, _)| name.clone())
            .collect()
    }
}
