use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// セルID (日付 + スタッフ名) 。
/// 表示上は `cell_<YYYY-MM-DD>_<staff>` の形で、同じ (date, staff) からは常に同じIDになる
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellId {
    pub date: NaiveDate,
    pub staff: String,
}

const PREFIX: &str = "cell_";
const DATE_LEN: usize = 10;

#[derive(Debug, PartialEq, Eq)]
pub enum CellIdParseErrorKind {
    /// `cell_` で始まっていない
    MissingPrefix,
    /// 日付部分が `YYYY-MM-DD` でない
    InvalidDate,
    /// スタッフ名が空
    MissingStaff,
}

impl CellId {
    pub fn new(date: NaiveDate, staff: impl Into<String>) -> Self {
        Self {
            date,
            staff: staff.into(),
        }
    }

    /// `YYYY-MM-DD` 形式の日付キー
    pub fn date_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}_{}", PREFIX, self.date.format("%Y-%m-%d"), self.staff)
    }
}

impl FromStr for CellId {
    type Err = CellIdParseErrorKind;

    // スタッフ名に `_` が入っていても良いように、日付は固定長で切り出す
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix(PREFIX)
            .ok_or(CellIdParseErrorKind::MissingPrefix)?;
        let date_part = rest.get(..DATE_LEN).ok_or(CellIdParseErrorKind::InvalidDate)?;
        let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            .map_err(|_| CellIdParseErrorKind::InvalidDate)?;
        let staff = rest
            .get(DATE_LEN..)
            .and_then(|tail| tail.strip_prefix('_'))
            .filter(|staff| !staff.is_empty())
            .ok_or(CellIdParseErrorKind::MissingStaff)?;
        Ok(Self::new(date, staff))
    }
}

#[cfg(test)]
mod cell_id_tests {
    use super::*;

    #[test]
    fn test_format_and_parse() {
        let id = CellId::new(NaiveDate::from_ymd_opt(2024, 2, 9).unwrap(), "山田_花子");
        assert_eq!(id.to_string(), "cell_2024-02-09_山田_花子");
        assert_eq!("cell_2024-02-09_山田_花子".parse::<CellId>(), Ok(id));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("2024-02-09_A".parse::<CellId>(), Err(CellIdParseErrorKind::MissingPrefix));
        assert_eq!("cell_2024-13-09_A".parse::<CellId>(), Err(CellIdParseErrorKind::InvalidDate));
        assert_eq!("cell_2024-02-09_".parse::<CellId>(), Err(CellIdParseErrorKind::MissingStaff));
        assert_eq!("cell_2024".parse::<CellId>(), Err(CellIdParseErrorKind::InvalidDate));
    }
}
