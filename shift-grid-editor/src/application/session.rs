use crate::error::AppError;

/// ログイン状態。ログインするまで編集系の操作はできない
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Locked,
    Unlocked,
}

impl Session {
    pub fn is_unlocked(&self) -> bool {
        matches!(self, Session::Unlocked)
    }

    pub fn ensure_unlocked(&self) -> Result<(), AppError> {
        match self {
            Session::Unlocked => Ok(()),
            Session::Locked => Err(AppError::Locked),
        }
    }
}
