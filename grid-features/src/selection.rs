use std::collections::BTreeSet;

use crate::cell::CellId;

/// 一括適用の対象として選ばれているセルの集合 (同じセルは1回だけ)
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CellSelection {
    cells: BTreeSet<CellId>,
}

impl CellSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, cell: &CellId) -> bool {
        self.cells.contains(cell)
    }

    /// 追加のみ (既に含まれていれば何もしない)
    /// 新たに追加された場合はtrue
    pub fn add(&mut self, cell: CellId) -> bool {
        self.cells.insert(cell)
    }

    pub fn remove(&mut self, cell: &CellId) -> bool {
        self.cells.remove(cell)
    }

    /// 含まれていれば外し、なければ追加する
    /// 操作後に選択状態ならtrue
    pub fn toggle(&mut self, cell: CellId) -> bool {
        if self.cells.remove(&cell) {
            false
        } else {
            self.cells.insert(cell);
            true
        }
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// 全要素を取り出して空にする
    pub fn take(&mut self) -> Vec<CellId> {
        std::mem::take(&mut self.cells).into_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CellId> {
        self.cells.iter()
    }
}
