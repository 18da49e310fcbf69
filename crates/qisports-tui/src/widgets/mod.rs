mod header;
mod loader;
mod page;
mod popup;
mod status_bar;

pub use header::HeaderWidget;
pub use loader::LoaderWidget;
pub use page::{page_lines, PageWidget};
pub use popup::PopupWidget;
pub use status_bar::{status_text, StatusBarWidget};
