use chrono::{Datelike, Local, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// 表示中の年月
/// ※ month: 1 (1月) 〜 12 (12月)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

/// 曜日による行の種別 (日曜・土曜は別スタイル)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DayKind {
    Weekday,
    Saturday,
    Sunday,
}

impl DayKind {
    pub fn of(date: NaiveDate) -> Self {
        match date.weekday() {
            Weekday::Sun => DayKind::Sunday,
            Weekday::Sat => DayKind::Saturday,
            _ => DayKind::Weekday,
        }
    }
}

impl Period {
    /// monthが範囲外ならNone
    pub fn new(year: i32, month: u32) -> Option<Self> {
        // 1日が存在しない年月は chrono の範囲外
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    /// ローカル時計の今月
    pub fn current() -> Self {
        let today = Local::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    /// 月をdiffだけ移動する。12月を超えたら翌年、1月を下回ったら前年に繰り上げる
    pub fn shift(self, diff: i32) -> Self {
        // 月を通し番号 (year * 12 + month - 1) に直してから戻す
        let index = self.year as i64 * 12 + (self.month as i64 - 1) + diff as i64;
        Self {
            year: index.div_euclid(12) as i32,
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// その月の日数を計算
    /// 翌月の1日を取得して差分を取る (28〜31の固定表は使わない)
    pub fn days_in_month(&self) -> u32 {
        let Some(first_day) = self.first_day() else {
            return 0;
        };
        let Some(next_month_date) = self.shift(1).first_day() else {
            return 0;
        };
        next_month_date
            .signed_duration_since(first_day)
            .num_days() as u32
    }

    /// 1日から月末までの日付を順に返す
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (1..=self.days_in_month()).filter_map(move |day| self.date(day))
    }

    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}年 {}月", self.year, self.month)
    }
}
