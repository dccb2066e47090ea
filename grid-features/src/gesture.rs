// --- セル選択ジェスチャーの判定 ---
//
// タッチ操作は以下の状態遷移で解釈する
//
//                 1本指 touch-start
//   Idle ──────────────────────────────▶ ArmedForTap ──(deadline)──▶ PaintSelecting
//    ▲                                     │    │                        │
//    │          touch-end (タップ: トグル) │    │ slop超えの移動         │ 2本指
//    └─────────────────────────────────────┘    ▼                        ▼
//    ◀─────────────── touch-end ────────── ExternalGesture ◀─────────────┘
//
// タイマーは自前で持たず、ArmTimer / CancelTimer を返してホスト側に任せる。
// 発火したらホストが on_deadline(token) を呼ぶ

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::cell::CellId;
use crate::selection::CellSelection;

/// グリッド座標系の点 (px)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

pub type TimerToken = u64;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GestureConfig {
    /// 長押しでなぞり選択に入るまでの時間
    pub long_press_ms: u64,
    /// これ以上動いたらスクロールとみなす (x, y どちらか)
    pub move_slop_px: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            long_press_ms: 500,
            move_slop_px: 10.0,
        }
    }
}

/// 座標からセルを引く (元のタッチ対象ではなく、今指がある位置のセル)
pub trait CellLocator {
    fn cell_at(&self, point: Point) -> Option<CellId>;
}

impl<F> CellLocator for F
where
    F: Fn(Point) -> Option<CellId>,
{
    fn cell_at(&self, point: Point) -> Option<CellId> {
        self(point)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GestureState {
    Idle,
    /// 指が置かれたが、タップかスクロールか長押しかまだ未確定
    ArmedForTap {
        origin: CellId,
        start: Point,
        token: TimerToken,
    },
    /// なぞり選択中
    PaintSelecting,
    /// 複数指 or スクロール。ブラウザ標準のスクロール/ズームに任せる
    ExternalGesture,
}

/// ホストに実行してもらう副作用
#[derive(Debug, Clone, PartialEq)]
pub enum GestureEffect {
    ArmTimer { token: TimerToken, after: Duration },
    CancelTimer { token: TimerToken },
    /// 振動 (使えれば)
    Haptic,
    /// このジェスチャーの標準スクロールを止める (preventDefault)
    SuppressScroll,
    Selected(CellId),
    Deselected(CellId),
}

#[derive(Debug)]
pub struct GestureEngine {
    config: GestureConfig,
    state: GestureState,
    /// マウス操作用のドラッグフラグ (長押しの概念はない)
    dragging: bool,
    next_token: TimerToken,
}

impl GestureEngine {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            state: GestureState::Idle,
            dragging: false,
            next_token: 0,
        }
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    // =================================================================
    // タッチ操作
    // =================================================================

    pub fn touch_start(&mut self, cell: CellId, point: Point, touches: usize) -> Vec<GestureEffect> {
        let mut effects = self.cancel_armed_timer();

        if touches > 1 {
            // 2本指以上はドラッグとみなさない
            self.transition(GestureState::ExternalGesture);
            return effects;
        }

        self.next_token += 1;
        let token = self.next_token;
        effects.push(GestureEffect::ArmTimer {
            token,
            after: Duration::from_millis(self.config.long_press_ms),
        });
        self.transition(GestureState::ArmedForTap {
            origin: cell,
            start: point,
            token,
        });
        effects
    }

    pub fn touch_move(
        &mut self,
        point: Point,
        touches: usize,
        selection: &mut CellSelection,
        locator: &impl CellLocator,
    ) -> Vec<GestureEffect> {
        if touches > 1 {
            let effects = self.cancel_armed_timer();
            if !matches!(self.state, GestureState::Idle) {
                self.transition(GestureState::ExternalGesture);
            }
            return effects;
        }

        match &self.state {
            GestureState::ArmedForTap { start, .. } => {
                let dx = (point.x - start.x).abs();
                let dy = (point.y - start.y).abs();
                if dx > self.config.move_slop_px || dy > self.config.move_slop_px {
                    // 長押し前に動いた = スクロール
                    let effects = self.cancel_armed_timer();
                    self.transition(GestureState::ExternalGesture);
                    effects
                } else {
                    Vec::new()
                }
            }
            GestureState::PaintSelecting => {
                let mut effects = vec![GestureEffect::SuppressScroll];
                if let Some(cell) = locator.cell_at(point) {
                    if selection.add(cell.clone()) {
                        effects.push(GestureEffect::Selected(cell));
                    }
                }
                effects
            }
            GestureState::Idle | GestureState::ExternalGesture => Vec::new(),
        }
    }

    /// touch-end / touch-cancel 共通
    pub fn touch_end(&mut self, selection: &mut CellSelection) -> Vec<GestureEffect> {
        let previous = std::mem::replace(&mut self.state, GestureState::Idle);
        trace!(?previous, "gesture -> Idle");

        match previous {
            GestureState::ArmedForTap { origin, token, .. } => {
                // 一度も昇格しなかった = タップ
                let effect = if selection.toggle(origin.clone()) {
                    GestureEffect::Selected(origin)
                } else {
                    GestureEffect::Deselected(origin)
                };
                vec![GestureEffect::CancelTimer { token }, effect]
            }
            _ => Vec::new(),
        }
    }

    pub fn touch_cancel(&mut self, selection: &mut CellSelection) -> Vec<GestureEffect> {
        self.touch_end(selection)
    }

    /// 長押しタイマーの発火。古いトークンは無視する
    pub fn on_deadline(&mut self, token: TimerToken, selection: &mut CellSelection) -> Vec<GestureEffect> {
        let origin = match &self.state {
            GestureState::ArmedForTap { origin, token: armed, .. } if *armed == token => origin.clone(),
            _ => return Vec::new(),
        };

        self.transition(GestureState::PaintSelecting);
        let mut effects = Vec::new();
        if selection.add(origin.clone()) {
            effects.push(GestureEffect::Selected(origin));
        }
        effects.push(GestureEffect::Haptic);
        effects
    }

    // =================================================================
    // マウス操作
    // =================================================================

    pub fn mouse_down(&mut self, cell: CellId, selection: &mut CellSelection) -> Vec<GestureEffect> {
        self.dragging = true;
        if selection.toggle(cell.clone()) {
            vec![GestureEffect::Selected(cell)]
        } else {
            vec![GestureEffect::Deselected(cell)]
        }
    }

    /// ドラッグ中に別セルへ入ったら追加 (外すことはない)
    pub fn mouse_enter(&mut self, cell: CellId, selection: &mut CellSelection) -> Vec<GestureEffect> {
        if self.dragging && selection.add(cell.clone()) {
            vec![GestureEffect::Selected(cell)]
        } else {
            Vec::new()
        }
    }

    /// ドキュメント上のどこで離しても呼ばれる
    pub fn mouse_up(&mut self) {
        self.dragging = false;
    }

    /// テーブル再構築時。ハンドラは作り直しなので進行中のジェスチャーも捨てる
    pub fn reset(&mut self) -> Vec<GestureEffect> {
        let effects = self.cancel_armed_timer();
        self.transition(GestureState::Idle);
        self.dragging = false;
        effects
    }

    fn cancel_armed_timer(&self) -> Vec<GestureEffect> {
        match &self.state {
            GestureState::ArmedForTap { token, .. } => vec![GestureEffect::CancelTimer { token: *token }],
            _ => Vec::new(),
        }
    }

    fn transition(&mut self, next: GestureState) {
        trace!(from = ?self.state, to = ?next, "gesture transition");
        self.state = next;
    }
}

impl Default for GestureEngine {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}
