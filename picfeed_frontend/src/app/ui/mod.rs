pub mod dialogs;
pub mod feed;
pub mod images;
