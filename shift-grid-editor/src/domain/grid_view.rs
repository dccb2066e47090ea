// --- 画面のシフト表 ---
//
// AppState から表全体を作り直す。部分更新はしない。
// 描画そのものはホスト側で、ここでは各セルの値・色・選択状態と座標だけを持つ

use chrono::NaiveDate;
use grid_features::{CellId, CellLocator, CellSelection, DayKind, Point};

use crate::domain::state::AppState;
use crate::domain::style::{estimate_text_width, CellStyle, StyleTable};

pub const DATE_HEADER: &str = "日";
pub const EMPTY_ROSTER_MESSAGE: &str = "スタッフがいません。上の編集ボタンから追加してください。";

#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub id: CellId,
    pub value: String,
    pub style: CellStyle,
    /// 選択ハイライト。CellSelection から毎回導出する
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayRow {
    pub day: u32,
    pub date: NaiveDate,
    pub kind: DayKind,
    pub style: CellStyle,
    pub cells: Vec<GridCell>,
}

/// 列幅・行高 (px, 表の左上が原点)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridGeometry {
    pub date_column_width: f32,
    pub column_widths: Vec<f32>,
    pub header_height: f32,
    pub row_height: f32,
}

impl GridGeometry {
    pub fn width(&self) -> f32 {
        self.date_column_width + self.column_widths.iter().sum::<f32>()
    }

    pub fn height(&self, rows: usize) -> f32 {
        self.header_height + self.row_height * rows as f32
    }

    /// 点がどのデータセル (行, 列) の上にあるか
    fn locate(&self, point: Point, rows: usize) -> Option<(usize, usize)> {
        if point.x < self.date_column_width || point.y < self.header_height || self.row_height <= 0.0 {
            return None;
        }
        let row = ((point.y - self.header_height) / self.row_height) as usize;
        if row >= rows {
            return None;
        }
        let mut right = self.date_column_width;
        for (col, width) in self.column_widths.iter().enumerate() {
            right += width;
            if point.x < right {
                return Some((row, col));
            }
        }
        None
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridView {
    /// 「日」+ スタッフ名 (名簿順)
    pub header: Vec<String>,
    pub header_style: CellStyle,
    pub rows: Vec<DayRow>,
    /// スタッフが0人の時だけ表の代わりに出すメッセージ
    pub placeholder: Option<&'static str>,
    pub geometry: GridGeometry,
    /// 画面上部の「n月」
    pub month_label: String,
}

impl GridView {
    /// 行は読み込み済みの割り当ての月から作る
    pub fn render(state: &AppState, style: &StyleTable) -> Self {
        let period = state.sheet.period();
        let month_label = format!("{}月", period.month);
        let header_style = style.header();

        if state.roster.is_empty() {
            return Self {
                header: Vec::new(),
                header_style,
                rows: Vec::new(),
                placeholder: Some(EMPTY_ROSTER_MESSAGE),
                geometry: GridGeometry::default(),
                month_label,
            };
        }

        let mut header = Vec::with_capacity(state.roster.len() + 1);
        header.push(DATE_HEADER.to_string());
        header.extend(state.roster.iter().map(|s| s.name.clone()));

        let rows: Vec<DayRow> = period
            .dates()
            .enumerate()
            .map(|(i, date)| {
                let kind = DayKind::of(date);
                let cells = state
                    .roster
                    .iter()
                    .map(|staff| {
                        let id = CellId::new(date, staff.name.clone());
                        let value = state.sheet.value(&id).to_string();
                        GridCell {
                            style: state.palette.style_for(&value, style),
                            selected: state.selection.contains(&id),
                            value,
                            id,
                        }
                    })
                    .collect();
                DayRow {
                    day: i as u32 + 1,
                    date,
                    kind,
                    style: style.day_cell(kind),
                    cells,
                }
            })
            .collect();

        let column_widths = state
            .roster
            .iter()
            .map(|staff| {
                let text = estimate_text_width(&staff.name, style.header_font_px) + style.cell_padding * 2.0;
                text.max(style.cell_min_width)
            })
            .collect();

        Self {
            header,
            header_style,
            rows,
            placeholder: None,
            geometry: GridGeometry {
                date_column_width: style.date_column_width,
                column_widths,
                header_height: style.header_height,
                row_height: style.cell_height,
            },
            month_label,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn cell(&self, id: &CellId) -> Option<&GridCell> {
        self.rows
            .iter()
            .find(|row| row.date == id.date)
            .and_then(|row| row.cells.iter().find(|c| c.id.staff == id.staff))
    }

    /// 選択が変わったらハイライトを付け直す
    pub fn sync_selection(&mut self, selection: &CellSelection) {
        for cell in self.rows.iter_mut().flat_map(|row| row.cells.iter_mut()) {
            cell.selected = selection.contains(&cell.id);
        }
    }

    pub fn selected_cells(&self) -> impl Iterator<Item = &GridCell> {
        self.rows.iter().flat_map(|row| row.cells.iter()).filter(|c| c.selected)
    }
}

impl CellLocator for GridView {
    fn cell_at(&self, point: Point) -> Option<CellId> {
        let (row, col) = self.geometry.locate(point, self.rows.len())?;
        self.rows.get(row)?.cells.get(col).map(|c| c.id.clone())
    }
}
