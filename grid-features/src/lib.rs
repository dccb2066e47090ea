//! シフト表グリッドの純粋ロジック。
//! I/Oを持たないので、エディタ本体 (shift-grid-editor) から状態ごと渡して使う

pub mod cell;
pub mod gesture;
pub mod page_fit;
pub mod period;
pub mod selection;

pub use cell::CellId;
pub use gesture::{CellLocator, GestureConfig, GestureEffect, GestureEngine, GestureState, Point, TimerToken};
pub use page_fit::{fit_to_page, Orientation, PageSpec, Placement, PT_PER_MM};
pub use period::{DayKind, Period};
pub use selection::CellSelection;
