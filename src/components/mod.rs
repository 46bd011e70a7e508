pub mod app;
pub mod board_view;
pub mod element_picker;
pub mod goto_panel;
pub mod status_bar;
pub mod text_input_modal;
pub mod zoom_confirm_modal;
pub mod zoom_controls;
