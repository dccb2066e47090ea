use thiserror::Error;

/// リモートAPI呼び出しの失敗
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 通信そのものに失敗 (ネットワーク不通など)
    #[error("{0}")]
    Transport(String),
    /// JSONとして読めない応答。先頭の一部だけ持つ
    #[error("サーバーエラー\n{excerpt}")]
    Malformed { excerpt: String },
    /// status != "success"。サーバーのメッセージをそのまま出す
    #[error("{0}")]
    Rejected(String),
    /// successだが期待したフィールドがない
    #[error("応答の形式が不正です: {0}")]
    Decode(String),
}

/// 通信前に弾く入力エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("名前を入力してください")]
    EmptyStaffName,
    #[error("削除する名前を入力してください")]
    EmptyDeleteStaffName,
    #[error("2文字以内で入力してください")]
    LabelLength,
    #[error("削除するアイコン名を入力してください")]
    EmptyDeleteLabel,
    #[error("出力するスタッフを選択してください")]
    EmptyExportSelection,
    #[error("スタッフがいません")]
    NoStaff,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("拡大率は2以上にしてください (指定: {0})")]
    Oversampling(u32),
    #[error("出力する表が空です")]
    EmptyRaster,
    #[error("フォントを読み込めません: {0}")]
    Font(String),
    #[error("PDFの生成に失敗しました: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("ファイルの書き込みに失敗しました: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("ログインしてください")]
    Locked,
}
