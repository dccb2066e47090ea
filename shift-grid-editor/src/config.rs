use std::path::PathBuf;

use grid_features::{GestureConfig, PageSpec};
use serde::Deserialize;

use crate::domain::style::StyleTable;

/// エディタ全体の設定。ホストがコードかJSONで組み立てて渡す
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// リモートAPIのURL (1つだけ)
    pub endpoint: String,
    pub gesture: GestureConfig,
    pub export: ExportConfig,
    pub style: StyleTable,
}

impl EditorConfig {
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// 書かれていない項目は既定値
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportConfig {
    /// 拡大率 (2以上)
    pub oversampling: u32,
    pub margin_mm: f64,
    pub page: PageSpec,
    /// 表の文字に使うフォント (TTF/OTF)
    pub font_path: Option<PathBuf>,
    /// font_path がないときにOSのフォントを探すか。見つからなければ文字は描かない
    pub system_font: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            oversampling: 3,
            margin_mm: 5.0,
            page: PageSpec::default(),
            font_path: None,
            system_font: true,
        }
    }
}
