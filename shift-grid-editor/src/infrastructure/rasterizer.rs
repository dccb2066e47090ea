// --- 表レイアウトのラスタライズ ---
//
// ExportTable (px) を oversampling 倍した RGBA 画像に描く。
// 塗り・枠線は自前で、文字は ab_glyph のアウトラインをカバレッジで合成する

use std::path::Path;

use ab_glyph::{point, Font, FontArc, FontVec, PxScale, ScaleFont};
use fontdb::{Database, Family, Query};
use image::{Rgba, RgbaImage};
use tracing::{debug, info, warn};

use crate::domain::export_table::{ExportTable, Rect};
use crate::domain::style::Rgb;
use crate::error::ExportError;

/// これ未満だと文字が潰れる
pub const MIN_OVERSAMPLING: u32 = 2;

/// システムフォントを探す順。見つからなければ汎用のゴシック体
const SYSTEM_FAMILIES: [&str; 5] = [
    "Noto Sans CJK JP",
    "Noto Sans JP",
    "IPAexGothic",
    "IPAGothic",
    "Hiragino Sans",
];

pub struct Rasterizer {
    oversampling: u32,
    font: Option<FontArc>,
}

impl Rasterizer {
    pub fn new(oversampling: u32, font: Option<FontArc>) -> Result<Self, ExportError> {
        if oversampling < MIN_OVERSAMPLING {
            return Err(ExportError::Oversampling(oversampling));
        }
        if font.is_none() {
            warn!("フォント未設定のため、PDFには枠と色だけを描画します");
        }
        Ok(Self { oversampling, font })
    }

    pub fn load_font(path: &Path) -> Result<FontArc, ExportError> {
        let data = std::fs::read(path).map_err(|e| ExportError::Font(format!("{}: {}", path.display(), e)))?;
        FontArc::try_from_vec(data).map_err(|e| ExportError::Font(format!("{}: {}", path.display(), e)))
    }

    /// OSに入っているフォントから日本語の出るものを選ぶ
    pub fn find_system_font() -> Option<FontArc> {
        let mut db = Database::new();
        db.load_system_fonts();

        let mut families: Vec<Family> = SYSTEM_FAMILIES.iter().map(|&name| Family::Name(name)).collect();
        families.push(Family::SansSerif);
        let id = db.query(&Query {
            families: &families,
            ..Query::default()
        })?;

        let name = db.face(id).map(|face| face.post_script_name.clone()).unwrap_or_default();
        let loaded = db.with_face_data(id, |data, index| FontVec::try_from_vec_and_index(data.to_vec(), index))?;
        match loaded {
            Ok(font) => {
                info!(font = %name, "システムフォントを使用");
                Some(FontArc::new(font))
            }
            Err(e) => {
                warn!(font = %name, error = %e, "システムフォントを読み込めません");
                None
            }
        }
    }

    pub fn oversampling(&self) -> u32 {
        self.oversampling
    }

    pub fn render(&self, table: &ExportTable) -> Result<RgbaImage, ExportError> {
        let k = self.oversampling as f32;
        let width = (table.width * k).ceil() as u32;
        let height = (table.height * k).ceil() as u32;
        if width == 0 || height == 0 {
            return Err(ExportError::EmptyRaster);
        }
        debug!(width, height, oversampling = self.oversampling, "ラスタライズ開始");

        let mut canvas = Canvas {
            image: RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255])),
            k,
        };

        for cell in &table.boxes {
            canvas.fill(cell.rect, cell.style.background);
            canvas.stroke(cell.rect, table.border);
            if let Some(font) = &self.font {
                canvas.text_centered(font, &cell.text, cell.rect, cell.font_px, cell.style.text);
            }
        }

        if let Some(font) = &self.font {
            let (x, y) = table.title_origin;
            canvas.text_at(font, &table.title, x, y, table.title_font_px, table.text_color);
        }

        Ok(canvas.image)
    }
}

struct Canvas {
    image: RgbaImage,
    /// 論理px -> 画像px
    k: f32,
}

impl Canvas {
    fn device_rect(&self, rect: Rect) -> (u32, u32, u32, u32) {
        let clamp_x = |v: f32| (v * self.k).round().clamp(0.0, self.image.width() as f32) as u32;
        let clamp_y = |v: f32| (v * self.k).round().clamp(0.0, self.image.height() as f32) as u32;
        (
            clamp_x(rect.x),
            clamp_y(rect.y),
            clamp_x(rect.x + rect.width),
            clamp_y(rect.y + rect.height),
        )
    }

    fn fill_device(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgb) {
        for y in y0..y1 {
            for x in x0..x1 {
                self.image.put_pixel(x, y, Rgba([color.0, color.1, color.2, 255]));
            }
        }
    }

    fn fill(&mut self, rect: Rect, color: Rgb) {
        let (x0, y0, x1, y1) = self.device_rect(rect);
        self.fill_device(x0, y0, x1, y1, color);
    }

    /// 1論理pxの枠線 (内側に描く)
    fn stroke(&mut self, rect: Rect, color: Rgb) {
        let (x0, y0, x1, y1) = self.device_rect(rect);
        let line = (self.k.round() as u32).max(1);
        self.fill_device(x0, y0, x1, (y0 + line).min(y1), color);
        self.fill_device(x0, y1.saturating_sub(line).max(y0), x1, y1, color);
        self.fill_device(x0, y0, (x0 + line).min(x1), y1, color);
        self.fill_device(x1.saturating_sub(line).max(x0), y0, x1, y1, color);
    }

    fn text_width(font: &FontArc, text: &str, scale: PxScale) -> f32 {
        let scaled = font.as_scaled(scale);
        text.chars().map(|c| scaled.h_advance(scaled.glyph_id(c))).sum()
    }

    fn text_centered(&mut self, font: &FontArc, text: &str, rect: Rect, font_px: f32, color: Rgb) {
        if text.is_empty() {
            return;
        }
        let scale = PxScale::from(font_px * self.k);
        let scaled = font.as_scaled(scale);
        let width = Self::text_width(font, text, scale);
        let left = rect.x * self.k + (rect.width * self.k - width) / 2.0;
        let baseline = rect.y * self.k + (rect.height * self.k - scaled.height()) / 2.0 + scaled.ascent();
        self.draw_glyphs(font, text, scale, left, baseline, color);
    }

    /// (x, y) は文字列の左上
    fn text_at(&mut self, font: &FontArc, text: &str, x: f32, y: f32, font_px: f32, color: Rgb) {
        let scale = PxScale::from(font_px * self.k);
        let ascent = font.as_scaled(scale).ascent();
        self.draw_glyphs(font, text, scale, x * self.k, y * self.k + ascent, color);
    }

    fn draw_glyphs(&mut self, font: &FontArc, text: &str, scale: PxScale, left: f32, baseline: f32, color: Rgb) {
        let scaled = font.as_scaled(scale);
        let (width, height) = (self.image.width() as i32, self.image.height() as i32);
        let mut caret = left;

        for c in text.chars() {
            let mut glyph = scaled.scaled_glyph(c);
            glyph.position = point(caret, baseline);
            caret += scaled.h_advance(glyph.id);

            let Some(outlined) = font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            let image = &mut self.image;
            outlined.draw(|gx, gy, coverage| {
                let x = bounds.min.x as i32 + gx as i32;
                let y = bounds.min.y as i32 + gy as i32;
                if x < 0 || y < 0 || x >= width || y >= height {
                    return;
                }
                let pixel = image.get_pixel_mut(x as u32, y as u32);
                let alpha = coverage.clamp(0.0, 1.0);
                let inv = 1.0 - alpha;
                pixel[0] = (color.0 as f32 * alpha + pixel[0] as f32 * inv) as u8;
                pixel[1] = (color.1 as f32 * alpha + pixel[1] as f32 * inv) as u8;
                pixel[2] = (color.2 as f32 * alpha + pixel[2] as f32 * inv) as u8;
            });
        }
    }
}

/// PDF埋め込み用に不透明なRGBへ落とす
pub fn to_rgb_bytes(image: &RgbaImage) -> Vec<u8> {
    image.pixels().flat_map(|p| [p[0], p[1], p[2]]).collect()
}
