// 想定通りにタップ・なぞり選択・スクロールを判別できているかを確認する

#[cfg(test)]
mod gesture_engine_test {
    use std::time::Duration;

    use chrono::NaiveDate;
    use grid_features::{
        CellId, CellSelection, GestureConfig, GestureEffect, GestureEngine, GestureState, Point,
    };

    fn cell(day: u32, staff: &str) -> CellId {
        CellId::new(NaiveDate::from_ymd_opt(2024, 2, day).unwrap(), staff)
    }

    /// 1行 = 30px, 1列 = 50px のグリッドを想定した座標 -> セル
    fn locator(point: Point) -> Option<CellId> {
        let staff = ["A", "B", "C"];
        let col = (point.x / 50.0) as usize;
        let day = (point.y / 30.0) as u32 + 1;
        staff.get(col).map(|s| cell(day, s))
    }

    fn engine() -> GestureEngine {
        GestureEngine::new(GestureConfig::default())
    }

    /// タップ2回で元に戻る
    #[test]
    fn test_tap_toggles_twice() {
        let mut engine = engine();
        let mut selection = CellSelection::new();

        let effects = engine.touch_start(cell(1, "A"), Point::new(5.0, 5.0), 1);
        assert_eq!(
            effects,
            vec![GestureEffect::ArmTimer { token: 1, after: Duration::from_millis(500) }]
        );
        let effects = engine.touch_end(&mut selection);
        assert_eq!(
            effects,
            vec![GestureEffect::CancelTimer { token: 1 }, GestureEffect::Selected(cell(1, "A"))]
        );
        assert!(selection.contains(&cell(1, "A")));

        engine.touch_start(cell(1, "A"), Point::new(5.0, 5.0), 1);
        let effects = engine.touch_end(&mut selection);
        assert_eq!(
            effects,
            vec![GestureEffect::CancelTimer { token: 2 }, GestureEffect::Deselected(cell(1, "A"))]
        );
        assert!(selection.is_empty());
        assert_eq!(engine.state(), &GestureState::Idle);
    }

    /// 長押し前に大きく動いたらスクロール扱い。選択は変わらない
    #[test]
    fn test_move_before_deadline_is_scroll() {
        let mut engine = engine();
        let mut selection = CellSelection::new();

        engine.touch_start(cell(1, "A"), Point::new(5.0, 5.0), 1);
        let effects = engine.touch_move(Point::new(5.0, 40.0), 1, &mut selection, &locator);
        assert_eq!(effects, vec![GestureEffect::CancelTimer { token: 1 }]);
        assert_eq!(engine.state(), &GestureState::ExternalGesture);

        // スクロール中の移動・発火・指離しでは何も選択されない
        assert!(engine.touch_move(Point::new(60.0, 90.0), 1, &mut selection, &locator).is_empty());
        assert!(engine.on_deadline(1, &mut selection).is_empty());
        assert!(engine.touch_end(&mut selection).is_empty());
        assert!(selection.is_empty());
        assert_eq!(engine.state(), &GestureState::Idle);
    }

    /// しきい値以内の揺れはタップのまま
    #[test]
    fn test_small_jitter_is_still_tap() {
        let mut engine = engine();
        let mut selection = CellSelection::new();

        engine.touch_start(cell(2, "B"), Point::new(60.0, 35.0), 1);
        assert!(engine.touch_move(Point::new(68.0, 42.0), 1, &mut selection, &locator).is_empty());
        engine.touch_end(&mut selection);
        assert!(selection.contains(&cell(2, "B")));
    }

    /// 長押し -> なぞり選択。指を離しても選択は残る
    #[test]
    fn test_long_press_then_paint() {
        let mut engine = engine();
        let mut selection = CellSelection::new();

        engine.touch_start(cell(1, "A"), Point::new(5.0, 5.0), 1);
        let effects = engine.on_deadline(1, &mut selection);
        assert_eq!(effects, vec![GestureEffect::Selected(cell(1, "A")), GestureEffect::Haptic]);
        assert_eq!(engine.state(), &GestureState::PaintSelecting);

        // 元のタッチ対象ではなく、今いる位置のセルが選ばれる
        let effects = engine.touch_move(Point::new(55.0, 5.0), 1, &mut selection, &locator);
        assert_eq!(
            effects,
            vec![GestureEffect::SuppressScroll, GestureEffect::Selected(cell(1, "B"))]
        );
        // 同じセルの上で動いても二重には入らない
        let effects = engine.touch_move(Point::new(58.0, 8.0), 1, &mut selection, &locator);
        assert_eq!(effects, vec![GestureEffect::SuppressScroll]);
        // グリッド外
        let effects = engine.touch_move(Point::new(500.0, 8.0), 1, &mut selection, &locator);
        assert_eq!(effects, vec![GestureEffect::SuppressScroll]);

        assert!(engine.touch_end(&mut selection).is_empty());
        assert_eq!(selection.len(), 2);
        assert_eq!(engine.state(), &GestureState::Idle);
    }

    /// 古いトークンの発火は無視する
    #[test]
    fn test_stale_deadline_is_ignored() {
        let mut engine = engine();
        let mut selection = CellSelection::new();

        engine.touch_start(cell(1, "A"), Point::new(5.0, 5.0), 1);
        engine.touch_end(&mut selection);
        engine.touch_start(cell(3, "C"), Point::new(105.0, 65.0), 1);

        assert!(engine.on_deadline(1, &mut selection).is_empty());
        assert!(matches!(engine.state(), GestureState::ArmedForTap { token: 2, .. }));
    }

    /// 2本指はスクロール/ズームに任せる
    #[test]
    fn test_multi_touch_yields() {
        let mut engine = engine();
        let mut selection = CellSelection::new();

        let effects = engine.touch_start(cell(1, "A"), Point::new(5.0, 5.0), 2);
        assert!(effects.is_empty());
        assert_eq!(engine.state(), &GestureState::ExternalGesture);
        assert!(engine.touch_end(&mut selection).is_empty());

        // なぞり中に2本目の指 -> 外部ジェスチャーへ
        engine.touch_start(cell(1, "A"), Point::new(5.0, 5.0), 1);
        engine.on_deadline(1, &mut selection);
        let effects = engine.touch_move(Point::new(55.0, 5.0), 2, &mut selection, &locator);
        assert!(effects.is_empty());
        assert_eq!(engine.state(), &GestureState::ExternalGesture);
        assert!(engine.touch_move(Point::new(105.0, 5.0), 1, &mut selection, &locator).is_empty());
        assert_eq!(selection.len(), 1);

        // 未確定の状態で2本指になったらタイマーを止める
        engine.touch_end(&mut selection);
        engine.touch_start(cell(2, "A"), Point::new(5.0, 35.0), 1);
        let effects = engine.touch_start(cell(2, "A"), Point::new(5.0, 35.0), 2);
        assert_eq!(effects, vec![GestureEffect::CancelTimer { token: 2 }]);
    }

    /// マウス: 押下でトグル、ドラッグ中は追加のみ、離したら終わり
    #[test]
    fn test_mouse_drag() {
        let mut engine = engine();
        let mut selection = CellSelection::new();

        selection.add(cell(2, "A"));

        engine.mouse_down(cell(1, "A"), &mut selection);
        assert!(engine.is_dragging());
        assert_eq!(engine.mouse_enter(cell(1, "B"), &mut selection), vec![GestureEffect::Selected(cell(1, "B"))]);
        // すでに選択済みのセルを通っても外れない
        assert!(engine.mouse_enter(cell(2, "A"), &mut selection).is_empty());
        assert!(selection.contains(&cell(2, "A")));

        engine.mouse_up();
        assert!(engine.mouse_enter(cell(3, "C"), &mut selection).is_empty());
        assert_eq!(selection.len(), 3);

        // 選択済みセルを押すと外れる
        assert_eq!(engine.mouse_down(cell(1, "B"), &mut selection), vec![GestureEffect::Deselected(cell(1, "B"))]);
        // マウスでは長押しにならない
        assert_eq!(engine.state(), &GestureState::Idle);
    }

    #[test]
    fn test_reset_cancels_armed_timer() {
        let mut engine = engine();
        engine.touch_start(cell(1, "A"), Point::new(5.0, 5.0), 1);
        assert_eq!(engine.reset(), vec![GestureEffect::CancelTimer { token: 1 }]);
        assert_eq!(engine.state(), &GestureState::Idle);
        assert!(engine.reset().is_empty());
    }
}
