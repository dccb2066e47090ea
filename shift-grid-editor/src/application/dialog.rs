// --- モーダルダイアログ ---
//
// 確認ダイアログの「OK」で実行する処理はクロージャではなく PendingAction で持つ。
// 表示中に次のダイアログが来ても上書きせず、後ろに並べる

use std::collections::VecDeque;

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Error,
    Success,
    Confirm,
}

/// 確認後に実行する処理
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    SaveShifts,
    DeleteStaff(String),
    DeleteShiftType(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub kind: DialogKind,
    pub title: String,
    pub message: String,
    /// Confirm の時だけ Some
    pub action: Option<PendingAction>,
}

impl Dialog {
    /// キャンセルボタンを出すかどうか
    pub fn has_cancel(&self) -> bool {
        self.kind == DialogKind::Confirm
    }
}

#[derive(Debug, Default)]
pub struct DialogQueue {
    queue: VecDeque<Dialog>,
}

impl DialogQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.push(DialogKind::Error, title.into(), message.into(), None);
    }

    pub fn success(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.push(DialogKind::Success, title.into(), message.into(), None);
    }

    pub fn confirm(&mut self, title: impl Into<String>, message: impl Into<String>, action: PendingAction) {
        self.push(DialogKind::Confirm, title.into(), message.into(), Some(action));
    }

    fn push(&mut self, kind: DialogKind, title: String, message: String, action: Option<PendingAction>) {
        debug!(?kind, %title, queued = self.queue.len(), "ダイアログ追加");
        self.queue.push_back(Dialog {
            kind,
            title,
            message,
            action,
        });
    }

    /// いま表示しているダイアログ
    pub fn current(&self) -> Option<&Dialog> {
        self.queue.front()
    }

    /// OK: 先頭を閉じ、その処理を返す (閉じるのと取り出すのは同時)
    pub fn accept(&mut self) -> Option<PendingAction> {
        self.queue.pop_front().and_then(|dialog| dialog.action)
    }

    /// キャンセル: 処理は捨てる
    pub fn dismiss(&mut self) {
        self.queue.pop_front();
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dialog> {
        self.queue.iter()
    }
}
