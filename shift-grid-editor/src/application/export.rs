// --- PDF出力 ---
//
// 状態 -> 表レイアウト -> ラスタ画像 -> 用紙へのはめ込み -> PDF の順に一方向で流す。
// 状態は読むだけで変更しない

use std::path::{Path, PathBuf};

use grid_features::fit_to_page;
use tracing::{error, info};

use crate::config::ExportConfig;
use crate::domain::export_table::ExportTable;
use crate::domain::state::AppState;
use crate::domain::style::StyleTable;
use crate::error::{AppError, ExportError};
use crate::infrastructure::pdf_writer::write_single_page;
use crate::infrastructure::rasterizer::Rasterizer;

/// 出来上がったPDF。ダウンロードさせるかファイルに書くかはホスト次第
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    pub fn save_into(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        info!(path = %path.display(), "PDFを書き出しました");
        Ok(path)
    }
}

pub struct ExportRenderer {
    config: ExportConfig,
    style: StyleTable,
    rasterizer: Rasterizer,
}

impl ExportRenderer {
    /// 拡大率のチェックとフォントの読み込みはここで1回だけ行う。
    /// 指定のフォントが読めなければエラー、未指定ならOSのフォントを探す
    pub fn new(config: ExportConfig, style: StyleTable) -> Result<Self, ExportError> {
        let font = match &config.font_path {
            Some(path) => Some(Rasterizer::load_font(path)?),
            None if config.system_font => Rasterizer::find_system_font(),
            None => None,
        };
        let rasterizer = Rasterizer::new(config.oversampling, font)?;
        Ok(Self {
            config,
            style,
            rasterizer,
        })
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// 表示中の月を、選ばれたスタッフの列だけでPDFにする
    pub fn render(&self, state: &AppState, chosen: &[String]) -> Result<ExportArtifact, AppError> {
        let period = state.sheet.period();
        let table = ExportTable::build(period, &state.roster, &state.sheet, &state.palette, chosen, &self.style)?;

        let bytes = self.render_table(&table).map_err(|e| {
            error!(error = %e, %period, "PDF出力に失敗");
            e
        })?;

        info!(%period, columns = table.columns.len(), size = bytes.len(), "PDF出力");
        Ok(ExportArtifact {
            file_name: table.file_name(),
            bytes,
        })
    }

    fn render_table(&self, table: &ExportTable) -> Result<Vec<u8>, ExportError> {
        let raster = self.rasterizer.render(table)?;
        let placement = fit_to_page(
            raster.width() as f64,
            raster.height() as f64,
            self.config.page,
            self.config.margin_mm,
        )
        .ok_or(ExportError::EmptyRaster)?;
        write_single_page(&raster, self.config.page, placement)
    }
}
