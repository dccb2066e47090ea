//! 月間シフト表エディタ。
//! 名簿 (列) x 日付 (行) の表をセル一括選択で編集し、リモートAPIに保存、1枚のPDFに出力する。
//! 画面の描画・タッチイベント・ダウンロードはホスト側で、ここでは状態と遷移だけを持つ

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use application::controller::{RefreshJob, RefreshOutcome, RefreshResult, RefreshTicket, ShiftEditor};
pub use application::dialog::{Dialog, DialogKind, PendingAction};
pub use application::export::ExportArtifact;
pub use config::{EditorConfig, ExportConfig};
pub use error::{ApiError, AppError, ExportError, ValidationError};
pub use infrastructure::transport::{HttpTransport, Transport};
