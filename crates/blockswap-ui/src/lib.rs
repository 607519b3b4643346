//! BlockSwap 用户界面
//!
//! 基于egui的即时模式表单。

pub mod form_panel;
pub mod state;
pub mod status_panel;

pub use form_panel::{show_form_panel, FormAction};
pub use state::{FormState, MessageLevel, StatusMessage};
pub use status_panel::show_status_panel;
