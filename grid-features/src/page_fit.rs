use serde::{Deserialize, Serialize};

/// 1mm あたりのPDFポイント
pub const PT_PER_MM: f64 = 72.0 / 25.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// 用紙サイズ (mm)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSpec {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl PageSpec {
    pub fn a4(orientation: Orientation) -> Self {
        match orientation {
            Orientation::Portrait => Self { width_mm: 210.0, height_mm: 297.0 },
            Orientation::Landscape => Self { width_mm: 297.0, height_mm: 210.0 },
        }
    }

    pub fn width_pt(&self) -> f64 {
        self.width_mm * PT_PER_MM
    }

    pub fn height_pt(&self) -> f64 {
        self.height_mm * PT_PER_MM
    }
}

impl Default for PageSpec {
    fn default() -> Self {
        Self::a4(Orientation::Portrait)
    }
}

/// 用紙上の画像の配置 (左上原点, mm)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x_mm: f64,
    pub y_mm: f64,
    pub width_mm: f64,
    pub height_mm: f64,
    /// 画像1pxあたりのmm
    pub scale: f64,
}

/// 画像を印刷可能領域 (用紙 - 余白*2) に縦横とも収まるよう等倍率で縮小する。
/// 横は中央寄せ、縦は上余白に揃える (縦中央にはしない)。
///
/// 横長なら幅が、縦長なら高さが律速になるが、min() を取るだけでどちらも満たす。
/// 画像サイズが0か、余白で印刷領域がなくなる場合はNone
pub fn fit_to_page(image_width: f64, image_height: f64, page: PageSpec, margin_mm: f64) -> Option<Placement> {
    let printable_width = page.width_mm - margin_mm * 2.0;
    let printable_height = page.height_mm - margin_mm * 2.0;
    if image_width <= 0.0 || image_height <= 0.0 || printable_width <= 0.0 || printable_height <= 0.0 {
        return None;
    }

    let scale = (printable_width / image_width).min(printable_height / image_height);
    let width_mm = image_width * scale;
    let height_mm = image_height * scale;

    Some(Placement {
        x_mm: margin_mm + (printable_width - width_mm) / 2.0,
        y_mm: margin_mm,
        width_mm,
        height_mm,
        scale,
    })
}
