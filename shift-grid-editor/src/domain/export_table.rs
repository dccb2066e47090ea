// --- PDF出力用の表レイアウト ---
//
// 画面の表は読まず、状態とスタイル定義から直接組み立てる。
// 画面幅の制約はないので、列幅は中身に合わせて広がる

use grid_features::{CellId, DayKind, Period};

use crate::domain::models::{ShiftPalette, ShiftSheet, StaffMember};
use crate::domain::style::{estimate_text_width, CellStyle, Rgb, StyleTable};
use crate::error::ValidationError;

/// 表の左上を原点とする矩形 (px)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxRole {
    Header,
    Date(DayKind),
    Shift,
}

/// 枠付きのセル1つ
#[derive(Debug, Clone, PartialEq)]
pub struct TableBox {
    pub rect: Rect,
    pub text: String,
    pub style: CellStyle,
    pub font_px: f32,
    pub role: BoxRole,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportTable {
    pub period: Period,
    pub title: String,
    pub title_origin: (f32, f32),
    pub title_font_px: f32,
    pub text_color: Rgb,
    pub border: Rgb,
    /// 出力対象のスタッフ (名簿順)
    pub columns: Vec<String>,
    pub row_count: usize,
    pub boxes: Vec<TableBox>,
    pub width: f32,
    pub height: f32,
}

impl ExportTable {
    pub fn title_for(period: Period) -> String {
        format!("{}年 {}月 シフト表", period.year, period.month)
    }

    /// 選ばれたスタッフの列と、その月の全日の行で表を組む。
    /// 名簿にない名前は無視し、1人も残らなければエラー
    pub fn build(
        period: Period,
        roster: &[StaffMember],
        sheet: &ShiftSheet,
        palette: &ShiftPalette,
        chosen: &[String],
        style: &StyleTable,
    ) -> Result<Self, ValidationError> {
        let columns: Vec<String> = roster
            .iter()
            .filter(|s| chosen.iter().any(|c| c == &s.name))
            .map(|s| s.name.clone())
            .collect();
        if columns.is_empty() {
            return Err(ValidationError::EmptyExportSelection);
        }

        let dates: Vec<_> = period.dates().collect();
        let pad = style.cell_padding * 2.0;

        // 列幅: 見出しと全セルの最大、ただし最小幅は確保
        let widths: Vec<f32> = columns
            .iter()
            .map(|name| {
                let header = estimate_text_width(name, style.header_font_px);
                let body = dates
                    .iter()
                    .map(|date| {
                        let id = CellId::new(*date, name.clone());
                        estimate_text_width(sheet.value(&id), style.body_font_px)
                    })
                    .fold(0.0_f32, f32::max);
                (header.max(body) + pad).max(style.cell_min_width)
            })
            .collect();

        let title = Self::title_for(period);
        let title_width = estimate_text_width(&title, style.title_font_px);
        let title_height = style.title_font_px * 1.2;

        let table_left = style.page_padding;
        let table_top = style.page_padding + title_height + style.title_margin_bottom;
        let row_height = style.cell_height;

        let mut boxes = Vec::with_capacity((columns.len() + 1) * (dates.len() + 1));

        // 見出し行
        let header_style = style.header();
        let mut x = table_left;
        boxes.push(TableBox {
            rect: Rect { x, y: table_top, width: style.date_column_width, height: row_height },
            text: "日".to_string(),
            style: header_style,
            font_px: style.header_font_px,
            role: BoxRole::Header,
        });
        x += style.date_column_width;
        for (name, width) in columns.iter().zip(&widths) {
            boxes.push(TableBox {
                rect: Rect { x, y: table_top, width: *width, height: row_height },
                text: name.clone(),
                style: header_style,
                font_px: style.header_font_px,
                role: BoxRole::Header,
            });
            x += width;
        }
        let table_width = x - table_left;

        // 日付行
        for (i, date) in dates.iter().enumerate() {
            let y = table_top + row_height * (i + 1) as f32;
            let kind = DayKind::of(*date);
            let mut x = table_left;
            boxes.push(TableBox {
                rect: Rect { x, y, width: style.date_column_width, height: row_height },
                text: (i + 1).to_string(),
                style: style.day_cell(kind),
                font_px: style.body_font_px,
                role: BoxRole::Date(kind),
            });
            x += style.date_column_width;
            for (name, width) in columns.iter().zip(&widths) {
                let value = sheet.value(&CellId::new(*date, name.clone()));
                boxes.push(TableBox {
                    rect: Rect { x, y, width: *width, height: row_height },
                    text: value.to_string(),
                    style: palette.style_for(value, style),
                    font_px: style.body_font_px,
                    role: BoxRole::Shift,
                });
                x += width;
            }
        }

        let content_width = table_width.max(title_width);
        let table_height = row_height * (dates.len() + 1) as f32;

        Ok(Self {
            period,
            title_origin: (style.page_padding, style.page_padding),
            title,
            title_font_px: style.title_font_px,
            text_color: style.text_color(),
            border: style.border_color(),
            columns,
            row_count: dates.len(),
            boxes,
            width: content_width + style.page_padding * 2.0,
            height: table_top + table_height + style.page_padding,
        })
    }

    pub fn file_name(&self) -> String {
        format!("shift_{}_{}.pdf", self.period.year, self.period.month)
    }

    /// 見出し行を除いたデータ行の日付セル
    pub fn date_boxes(&self) -> impl Iterator<Item = &TableBox> {
        self.boxes.iter().filter(|b| matches!(b.role, BoxRole::Date(_)))
    }
}
