pub mod controller;
pub mod dialog;
pub mod export;
pub mod session;
pub mod toolbar;
