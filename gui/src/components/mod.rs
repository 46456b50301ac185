// GUI components module
pub mod article_form;
pub mod article_grid;
pub mod confirm_dialog;
pub mod import_export;
pub mod notices;
pub mod toolbar;
