pub mod handlers;
pub mod header;
pub mod results;
pub mod template_picker;
pub mod upload_section;
pub mod utils;
