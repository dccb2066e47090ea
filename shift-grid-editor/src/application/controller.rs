// =====================
// エディタ本体
// =====================
//
// 状態・画面・ジェスチャー・ダイアログを1つの構造体で持つ。
// 操作はすべて &mut self 経由なので、通信中に別の操作が割り込むことはない。
// 失敗はその操作だけで終わり、ローディング表示を戻してダイアログを積む

use grid_features::{CellId, GestureEffect, GestureEngine, Period, Point, TimerToken};
use tracing::{info, warn};

use crate::application::dialog::{Dialog, DialogQueue, PendingAction};
use crate::application::export::{ExportArtifact, ExportRenderer};
use crate::application::session::Session;
use crate::application::toolbar::{ExportPicker, ShiftTypeForm, Toolbar};
use crate::config::EditorConfig;
use crate::domain::grid_view::GridView;
use crate::domain::models::{ShiftPalette, ShiftSheet, StaffMember};
use crate::domain::state::{AppState, Generation};
use crate::error::{ApiError, AppError, ValidationError};
use crate::infrastructure::api_client::ApiClient;
use crate::infrastructure::transport::{HttpTransport, Transport};

const TITLE_ERROR: &str = "エラー";
const TITLE_FAILED: &str = "失敗";
const TITLE_SAVE_FAILED: &str = "保存失敗";
const TITLE_NETWORK: &str = "通信エラー";
const TITLE_DONE: &str = "完了";

/// 再読み込み1回分の要求
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket {
    pub generation: Generation,
    pub period: Period,
    /// 名簿・記号も取り直すか
    pub needs_config: bool,
}

/// エディタから切り離して走らせられる再読み込み
pub struct RefreshJob<T> {
    api: ApiClient<T>,
    ticket: RefreshTicket,
}

/// 通信が終わった再読み込み。complete_refresh に戻す
#[derive(Debug)]
pub struct RefreshResult {
    pub ticket: RefreshTicket,
    result: Result<(Option<(Vec<StaffMember>, ShiftPalette)>, ShiftSheet), ApiError>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// 表を作り直した。中身は進行中のジェスチャーを捨てたことで止めるタイマー
    Applied(Vec<GestureEffect>),
    /// より新しい再読み込みがあるので捨てた
    Stale,
}

impl<T: Transport> RefreshJob<T> {
    pub fn ticket(&self) -> RefreshTicket {
        self.ticket
    }

    /// 名簿・記号と割り当ては同時に取り、両方揃ってから返す
    pub async fn run(self) -> RefreshResult {
        let period = self.ticket.period;
        let result = if self.ticket.needs_config {
            tokio::try_join!(self.api.get_config(), self.api.get_shifts(period))
                .map(|(config, sheet)| (Some(config), sheet))
        } else {
            self.api.get_shifts(period).await.map(|sheet| (None, sheet))
        };
        RefreshResult {
            ticket: self.ticket,
            result,
        }
    }
}

pub struct ShiftEditor<T> {
    api: ApiClient<T>,
    config: EditorConfig,
    session: Session,
    state: AppState,
    view: GridView,
    gestures: GestureEngine,
    dialogs: DialogQueue,
    exporter: ExportRenderer,
    loading: bool,
}

impl ShiftEditor<HttpTransport> {
    /// 設定のURLにつなぐ
    pub fn connect(config: EditorConfig) -> Result<Self, AppError> {
        let transport = HttpTransport::new(config.endpoint.clone());
        Self::new(transport, config)
    }
}

impl<T: Transport> ShiftEditor<T> {
    /// 表示月は今月から始める
    pub fn new(transport: T, config: EditorConfig) -> Result<Self, AppError> {
        Self::with_period(transport, config, Period::current())
    }

    pub fn with_period(transport: T, config: EditorConfig, period: Period) -> Result<Self, AppError> {
        let exporter = ExportRenderer::new(config.export.clone(), config.style.clone())?;
        let state = AppState::new(period);
        let view = GridView::render(&state, &config.style);
        Ok(Self {
            api: ApiClient::new(transport),
            gestures: GestureEngine::new(config.gesture),
            config,
            session: Session::Locked,
            state,
            view,
            dialogs: DialogQueue::new(),
            exporter,
            loading: false,
        })
    }

    // ---------------------
    // 参照
    // ---------------------

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> &GridView {
        &self.view
    }

    pub fn session(&self) -> Session {
        self.session
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn dialogs(&self) -> &DialogQueue {
        &self.dialogs
    }

    pub fn current_dialog(&self) -> Option<&Dialog> {
        self.dialogs.current()
    }

    pub fn gestures(&self) -> &GestureEngine {
        &self.gestures
    }

    pub fn api(&self) -> &ApiClient<T> {
        &self.api
    }

    pub fn toolbar(&self) -> Toolbar {
        Toolbar::from_palette(&self.state.palette, &self.config.style)
    }

    pub fn shift_type_form(&self) -> ShiftTypeForm {
        ShiftTypeForm::new()
    }

    pub fn export_picker(&self) -> ExportPicker {
        ExportPicker::new(&self.state.roster)
    }

    // ---------------------
    // ログイン
    // ---------------------

    pub async fn login(&mut self, password: &str) -> Result<RefreshOutcome, AppError> {
        self.loading = true;
        if let Err(e) = self.api.login(password).await {
            let title = match e {
                ApiError::Rejected(_) => TITLE_FAILED,
                _ => TITLE_NETWORK,
            };
            return Err(self.fail(title, e.into()));
        }
        info!("ログインしました");
        self.session = Session::Unlocked;
        self.refresh_view(true).await
    }

    // ---------------------
    // 再読み込み
    // ---------------------

    pub async fn refresh_view(&mut self, needs_config: bool) -> Result<RefreshOutcome, AppError> {
        let job = self.prepare_refresh(needs_config)?;
        let done = job.run().await;
        self.complete_refresh(done)
    }

    /// 新しい世代を払い出してジョブを作る。以前のジョブの結果はこれで古くなる
    pub fn prepare_refresh(&mut self, needs_config: bool) -> Result<RefreshJob<T>, AppError> {
        self.prepare_refresh_for(self.state.period, needs_config)
    }

    /// 指定の月を読み込むジョブ。表示中の月は complete_refresh で初めて切り替わる
    fn prepare_refresh_for(&mut self, period: Period, needs_config: bool) -> Result<RefreshJob<T>, AppError> {
        self.session.ensure_unlocked()?;
        self.loading = true;
        let ticket = RefreshTicket {
            generation: self.state.next_generation(),
            period,
            needs_config,
        };
        Ok(RefreshJob {
            api: self.api.clone(),
            ticket,
        })
    }

    pub fn complete_refresh(&mut self, done: RefreshResult) -> Result<RefreshOutcome, AppError> {
        if !self.state.is_latest(done.ticket.generation) {
            info!(
                generation = done.ticket.generation,
                latest = self.state.latest_generation(),
                "古い再読み込み結果を破棄"
            );
            return Ok(RefreshOutcome::Stale);
        }

        match done.result {
            Ok((config, sheet)) => {
                if let Some((roster, palette)) = config {
                    self.state.replace_config(roster, palette);
                }
                self.state.replace_sheet(sheet);
                let effects = self.rebuild_view();
                self.loading = false;
                info!(period = %self.state.period, staff = self.state.roster.len(), "表を更新");
                Ok(RefreshOutcome::Applied(effects))
            }
            Err(e) => Err(self.fail(TITLE_ERROR, e.into())),
        }
    }

    /// 読み込みに失敗したら表示中の月・選択はそのまま残る
    pub async fn change_month(&mut self, diff: i32) -> Result<RefreshOutcome, AppError> {
        let period = self.state.target_period(diff);
        let job = self.prepare_refresh_for(period, false)?;
        info!(%period, "月を移動");
        let done = job.run().await;
        self.complete_refresh(done)
    }

    /// 表を丸ごと作り直す。進行中のジェスチャーも捨てる
    fn rebuild_view(&mut self) -> Vec<GestureEffect> {
        self.view = GridView::render(&self.state, &self.config.style);
        self.gestures.reset()
    }

    // ---------------------
    // セル選択
    // ---------------------

    pub fn touch_start(&mut self, cell: CellId, point: Point, touches: usize) -> Vec<GestureEffect> {
        let effects = self.gestures.touch_start(cell, point, touches);
        self.after_gesture(effects)
    }

    pub fn touch_move(&mut self, point: Point, touches: usize) -> Vec<GestureEffect> {
        let effects = self
            .gestures
            .touch_move(point, touches, &mut self.state.selection, &self.view);
        self.after_gesture(effects)
    }

    pub fn touch_end(&mut self) -> Vec<GestureEffect> {
        let effects = self.gestures.touch_end(&mut self.state.selection);
        self.after_gesture(effects)
    }

    pub fn touch_cancel(&mut self) -> Vec<GestureEffect> {
        let effects = self.gestures.touch_cancel(&mut self.state.selection);
        self.after_gesture(effects)
    }

    /// ホストのタイマーが発火した
    pub fn timer_fired(&mut self, token: TimerToken) -> Vec<GestureEffect> {
        let effects = self.gestures.on_deadline(token, &mut self.state.selection);
        self.after_gesture(effects)
    }

    pub fn mouse_down(&mut self, cell: CellId) -> Vec<GestureEffect> {
        let effects = self.gestures.mouse_down(cell, &mut self.state.selection);
        self.after_gesture(effects)
    }

    pub fn mouse_enter(&mut self, cell: CellId) -> Vec<GestureEffect> {
        let effects = self.gestures.mouse_enter(cell, &mut self.state.selection);
        self.after_gesture(effects)
    }

    pub fn mouse_up(&mut self) {
        self.gestures.mouse_up();
    }

    fn after_gesture(&mut self, effects: Vec<GestureEffect>) -> Vec<GestureEffect> {
        let changed = effects
            .iter()
            .any(|e| matches!(e, GestureEffect::Selected(_) | GestureEffect::Deselected(_)));
        if changed {
            self.view.sync_selection(&self.state.selection);
        }
        effects
    }

    /// 選択中のセルに記号を入れる (空文字で消去)。選択は空になる
    pub fn apply_shift_to_selection(&mut self, label: &str) -> Vec<CellId> {
        let cells = self.state.apply_shift_to_selection(label);
        if !cells.is_empty() {
            // ハンドラは作り直さないのでジェスチャーはそのまま
            self.view = GridView::render(&self.state, &self.config.style);
        }
        cells
    }

    // ---------------------
    // ダイアログ
    // ---------------------

    /// OK。確認ダイアログなら対応する処理を実行する
    pub async fn accept_dialog(&mut self) -> Result<(), AppError> {
        match self.dialogs.accept() {
            Some(PendingAction::SaveShifts) => self.execute_save().await,
            Some(PendingAction::DeleteStaff(name)) => self.execute_delete_staff(&name).await,
            Some(PendingAction::DeleteShiftType(label)) => self.execute_delete_shift_type(&label).await,
            None => Ok(()),
        }
    }

    pub fn dismiss_dialog(&mut self) {
        self.dialogs.dismiss();
    }

    // ---------------------
    // 保存
    // ---------------------

    pub fn request_save(&mut self) -> Result<(), AppError> {
        self.session.ensure_unlocked()?;
        self.dialogs
            .confirm("保存", "現在の内容で保存しますか？", PendingAction::SaveShifts);
        Ok(())
    }

    /// 表示中の月の空でないセルを全部送る
    pub async fn execute_save(&mut self) -> Result<(), AppError> {
        self.session.ensure_unlocked()?;
        if self.state.roster.is_empty() {
            return Err(self.fail(TITLE_ERROR, ValidationError::NoStaff.into()));
        }

        let payload = self.state.sheet.to_payload(&self.state.roster);
        self.loading = true;
        match self.api.save_shifts(&payload).await {
            Ok(()) => {
                self.loading = false;
                info!(period = %self.state.sheet.period(), count = payload.len(), "保存しました");
                self.dialogs.success(TITLE_DONE, "データを保存しました");
                Ok(())
            }
            Err(e) => {
                let title = match e {
                    ApiError::Rejected(_) => TITLE_SAVE_FAILED,
                    _ => TITLE_NETWORK,
                };
                Err(self.fail(title, e.into()))
            }
        }
    }

    // ---------------------
    // スタッフ
    // ---------------------

    pub async fn add_staff(&mut self, name: &str) -> Result<RefreshOutcome, AppError> {
        self.session.ensure_unlocked()?;
        if name.is_empty() {
            return Err(self.fail(TITLE_ERROR, ValidationError::EmptyStaffName.into()));
        }
        self.loading = true;
        if let Err(e) = self.api.add_staff(name).await {
            return Err(self.fail_remote(e));
        }
        info!(name, "スタッフを追加");
        self.refresh_view(true).await
    }

    /// 確認ダイアログを出すだけ。実行は accept_dialog から
    pub fn delete_staff(&mut self, name: &str) -> Result<(), AppError> {
        self.session.ensure_unlocked()?;
        if name.is_empty() {
            return Err(self.fail(TITLE_ERROR, ValidationError::EmptyDeleteStaffName.into()));
        }
        self.dialogs.confirm(
            "削除確認",
            format!("「{}」を削除しますか？\nデータは復元できません。", name),
            PendingAction::DeleteStaff(name.to_string()),
        );
        Ok(())
    }

    async fn execute_delete_staff(&mut self, name: &str) -> Result<(), AppError> {
        self.session.ensure_unlocked()?;
        self.loading = true;
        if let Err(e) = self.api.delete_staff(name).await {
            return Err(self.fail_remote(e));
        }
        info!(name, "スタッフを削除");
        self.refresh_view(true).await.map(drop)
    }

    // ---------------------
    // シフト記号
    // ---------------------

    pub async fn add_shift_type(&mut self, form: &ShiftTypeForm) -> Result<RefreshOutcome, AppError> {
        self.session.ensure_unlocked()?;
        let shift_type = match form.to_shift_type() {
            Ok(t) => t,
            Err(e) => return Err(self.fail(TITLE_ERROR, e.into())),
        };
        self.loading = true;
        if let Err(e) = self.api.save_setting(&shift_type).await {
            return Err(self.fail_remote(e));
        }
        info!(label = %shift_type.label, color = %shift_type.color, "記号を追加");
        self.dialogs
            .success(TITLE_DONE, format!("「{}」を追加しました", shift_type.label));
        self.refresh_view(true).await
    }

    pub fn delete_shift_type(&mut self, label: &str) -> Result<(), AppError> {
        self.session.ensure_unlocked()?;
        if label.is_empty() {
            return Err(self.fail(TITLE_ERROR, ValidationError::EmptyDeleteLabel.into()));
        }
        self.dialogs.confirm(
            "削除確認",
            format!("「{}」を削除しますか？", label),
            PendingAction::DeleteShiftType(label.to_string()),
        );
        Ok(())
    }

    async fn execute_delete_shift_type(&mut self, label: &str) -> Result<(), AppError> {
        self.session.ensure_unlocked()?;
        self.loading = true;
        if let Err(e) = self.api.delete_setting(label).await {
            return Err(self.fail_remote(e));
        }
        info!(label, "記号を削除");
        self.dialogs.success(TITLE_DONE, "削除しました");
        self.refresh_view(true).await.map(drop)
    }

    // ---------------------
    // PDF出力
    // ---------------------

    pub fn export_pdf(&mut self, chosen: &[String]) -> Result<ExportArtifact, AppError> {
        self.session.ensure_unlocked()?;
        if chosen.is_empty() {
            return Err(self.fail(TITLE_ERROR, ValidationError::EmptyExportSelection.into()));
        }
        self.loading = true;
        match self.exporter.render(&self.state, chosen) {
            Ok(artifact) => {
                self.loading = false;
                self.dialogs.success(TITLE_DONE, "PDFを保存しました");
                Ok(artifact)
            }
            Err(e) => Err(self.fail(TITLE_ERROR, e)),
        }
    }

    // ---------------------
    // 失敗時の後始末
    // ---------------------

    fn fail(&mut self, title: &str, error: AppError) -> AppError {
        warn!(%title, error = %error, "操作に失敗");
        self.loading = false;
        self.dialogs.error(title, error.to_string());
        error
    }

    /// スタッフ・記号の追加削除: サーバーの拒否は「失敗」、それ以外は「エラー」
    fn fail_remote(&mut self, error: ApiError) -> AppError {
        let title = match error {
            ApiError::Rejected(_) => TITLE_FAILED,
            _ => TITLE_ERROR,
        };
        self.fail(title, error.into())
    }
}
