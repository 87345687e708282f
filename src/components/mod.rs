pub mod app;
pub mod board_view;
pub mod settings_modal;
pub mod status_panel;
pub mod view_controls;
pub mod win_banner;
