//! Auth primitives: Telegram widget signature and OAuth state tokens

mod state;
mod widget;

pub use state::{generate_state, validate_state};
pub use widget::{
    compute_widget_hash, verify_widget_payload, WidgetPayload, AUTH_DATE_WINDOW_SECS,
};
