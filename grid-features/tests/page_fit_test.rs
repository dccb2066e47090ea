use grid_features::{fit_to_page, Orientation, PageSpec, Period};
use proptest::prelude::*;
use proptest::test_runner::Config;

const EPS: f64 = 1e-6;

proptest! {
    #![proptest_config(Config::with_cases(256))]

    /// どんな縦横比でも印刷可能領域からはみ出さない
    #[test]
    fn fitted_image_never_exceeds_printable_area(
        width in 1.0_f64..20_000.0,
        height in 1.0_f64..20_000.0,
        margin in 0.0_f64..20.0,
        landscape in any::<bool>(),
    ) {
        let orientation = if landscape { Orientation::Landscape } else { Orientation::Portrait };
        let page = PageSpec::a4(orientation);
        let placement = fit_to_page(width, height, page, margin).expect("fits");

        let printable_width = page.width_mm - margin * 2.0;
        let printable_height = page.height_mm - margin * 2.0;
        prop_assert!(placement.width_mm <= printable_width + EPS);
        prop_assert!(placement.height_mm <= printable_height + EPS);
        // どちらか一方は必ずいっぱいまで使う
        prop_assert!(
            (placement.width_mm - printable_width).abs() < EPS
                || (placement.height_mm - printable_height).abs() < EPS
        );
        // 縦横比は保つ
        prop_assert!((placement.width_mm / placement.height_mm - width / height).abs() < 1e-6 * (width / height).max(1.0));
        // 上余白に揃え、左右は均等
        prop_assert!((placement.y_mm - margin).abs() < EPS);
        let right = page.width_mm - (placement.x_mm + placement.width_mm);
        prop_assert!((placement.x_mm - right).abs() < EPS);
    }

    /// 月移動は日数計算と矛盾しない (翌月1日 - 今月1日 = 日数)
    #[test]
    fn shift_and_days_in_month_agree(year in 1970_i32..2200, month in 1_u32..=12, diff in -60_i32..60) {
        let period = Period::new(year, month).expect("valid");
        let shifted = period.shift(diff);
        prop_assert!((1..=12).contains(&shifted.month));
        prop_assert_eq!(shifted.shift(-diff), period);

        let first = period.first_day().expect("first day");
        let next = period.shift(1).first_day().expect("next first day");
        prop_assert_eq!((next - first).num_days() as u32, period.days_in_month());
        prop_assert_eq!(period.dates().count() as u32, period.days_in_month());
    }
}
