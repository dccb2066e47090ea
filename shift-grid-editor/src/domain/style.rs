use grid_features::DayKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);

    /// `#rgb` / `#rrggbb` / `rgb(r, g, b)` / `rgba(r, g, b, a)` を受け付ける
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if let Some(hex) = text.strip_prefix('#') {
            return Self::parse_hex(hex);
        }
        let inner = text
            .strip_prefix("rgba(")
            .or_else(|| text.strip_prefix("rgb("))?
            .strip_suffix(')')?;
        let mut parts = inner.split(',').map(|p| p.trim().parse::<u8>());
        let r = parts.next()?.ok()?;
        let g = parts.next()?.ok()?;
        let b = parts.next()?.ok()?;
        Some(Rgb(r, g, b))
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            3 => {
                let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
                Some(Rgb(digit(0)?, digit(1)?, digit(2)?))
            }
            6 => {
                let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
                Some(Rgb(byte(0)?, byte(2)?, byte(4)?))
            }
            _ => None,
        }
    }

    /// 0.0〜1.0 の成分 (PDF用)
    pub fn unit(&self) -> [f32; 3] {
        [self.0 as f32 / 255.0, self.1 as f32 / 255.0, self.2 as f32 / 255.0]
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// セル1つの見た目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub background: Rgb,
    pub text: Rgb,
}

/// 画面・PDFで共通に使う見た目の定義。
/// 画面の計算済みスタイルは読まず、ここから直接描く
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleTable {
    pub cell_background: String,
    pub cell_text: String,
    pub header_background: String,
    pub header_text: String,
    pub saturday_text: String,
    pub sunday_text: String,
    pub border: String,
    pub clear_button_text: String,

    pub date_column_width: f32,
    pub cell_min_width: f32,
    pub cell_height: f32,
    pub header_height: f32,
    pub cell_padding: f32,
    pub header_font_px: f32,
    pub body_font_px: f32,
    pub title_font_px: f32,
    pub title_margin_bottom: f32,
    pub page_padding: f32,
}

impl Default for StyleTable {
    fn default() -> Self {
        Self {
            cell_background: "#fff".to_string(),
            cell_text: "#333".to_string(),
            header_background: "#f0f0f0".to_string(),
            header_text: "#333".to_string(),
            saturday_text: "#3498db".to_string(),
            sunday_text: "#e74c3c".to_string(),
            border: "#888".to_string(),
            clear_button_text: "#e74c3c".to_string(),

            date_column_width: 50.0,
            cell_min_width: 30.0,
            cell_height: 30.0,
            header_height: 24.0,
            cell_padding: 2.0,
            header_font_px: 16.0,
            body_font_px: 14.0,
            title_font_px: 24.0,
            title_margin_bottom: 20.0,
            page_padding: 20.0,
        }
    }
}

impl StyleTable {
    /// 未知・空のラベル用 (白背景 + 既定の文字色)
    pub fn default_cell(&self) -> CellStyle {
        CellStyle {
            background: color_or(&self.cell_background, Rgb::WHITE),
            text: self.text_color(),
        }
    }

    pub fn text_color(&self) -> Rgb {
        color_or(&self.cell_text, Rgb(0x33, 0x33, 0x33))
    }

    pub fn header(&self) -> CellStyle {
        CellStyle {
            background: color_or(&self.header_background, Rgb::WHITE),
            text: color_or(&self.header_text, Rgb(0x33, 0x33, 0x33)),
        }
    }

    /// 日付セル。土日は文字色を変える
    pub fn day_cell(&self, kind: DayKind) -> CellStyle {
        let text = match kind {
            DayKind::Saturday => color_or(&self.saturday_text, self.text_color()),
            DayKind::Sunday => color_or(&self.sunday_text, self.text_color()),
            DayKind::Weekday => self.text_color(),
        };
        CellStyle {
            background: Rgb::WHITE,
            text,
        }
    }

    pub fn border_color(&self) -> Rgb {
        color_or(&self.border, Rgb(0x88, 0x88, 0x88))
    }
}

/// フォントを読まずに見積もる文字列幅 (px)。
/// 全角相当は1em、半角は0.6em
pub fn estimate_text_width(text: &str, font_px: f32) -> f32 {
    text.chars()
        .map(|c| if c.is_ascii() || is_halfwidth_kana(c) { 0.6 } else { 1.0 })
        .sum::<f32>()
        * font_px
}

fn is_halfwidth_kana(c: char) -> bool {
    ('\u{ff61}'..='\u{ff9f}').contains(&c)
}

fn color_or(text: &str, fallback: Rgb) -> Rgb {
    Rgb::parse(text).unwrap_or(fallback)
}
