use grid_features::{CellId, CellSelection, Period};
use tracing::debug;

use crate::domain::models::{ShiftPalette, ShiftSheet, StaffMember};

/// 世代番号。再読み込みを要求するたびに増える
pub type Generation = u64;

/// エディタの状態一式 (表示中の年月・名簿・記号・割り当て・選択)
#[derive(Debug, Clone)]
pub struct AppState {
    pub period: Period,
    pub roster: Vec<StaffMember>,
    pub palette: ShiftPalette,
    pub sheet: ShiftSheet,
    pub selection: CellSelection,
    /// 最後に要求した再読み込みの世代
    latest_generation: Generation,
}

impl AppState {
    pub fn new(period: Period) -> Self {
        Self {
            period,
            roster: Vec::new(),
            palette: ShiftPalette::default(),
            sheet: ShiftSheet::empty(period),
            selection: CellSelection::new(),
            latest_generation: 0,
        }
    }

    /// 新しい世代を払い出す。これより古い世代の結果は捨てられる
    pub fn next_generation(&mut self) -> Generation {
        self.latest_generation += 1;
        self.latest_generation
    }

    pub fn is_latest(&self, generation: Generation) -> bool {
        generation == self.latest_generation
    }

    pub fn latest_generation(&self) -> Generation {
        self.latest_generation
    }

    /// 移動先の年月。読み込みが成功するまで表示中の月は変えない
    pub fn target_period(&self, diff: i32) -> Period {
        self.period.shift(diff)
    }

    pub fn replace_config(&mut self, roster: Vec<StaffMember>, palette: ShiftPalette) {
        self.roster = roster;
        self.palette = palette;
    }

    /// 読み込んだ月の割り当てで丸ごと置き換える。
    /// 取得中に月が変わっていても、読み込んだ月を表示する
    pub fn replace_sheet(&mut self, sheet: ShiftSheet) {
        self.period = sheet.period();
        self.sheet = sheet;
        self.selection.clear();
    }

    /// 選択中のセル全てに記号を書き込み (空なら消去)、選択を空にする。
    /// 書き換えたセルを返す
    pub fn apply_shift_to_selection(&mut self, label: &str) -> Vec<CellId> {
        if self.selection.is_empty() {
            return Vec::new();
        }
        let cells = self.selection.take();
        for cell in &cells {
            self.sheet.set(cell.clone(), label);
        }
        debug!(label, count = cells.len(), "選択セルに一括適用");
        cells
    }
}
