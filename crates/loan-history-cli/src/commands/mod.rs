pub mod annual_summary;
pub mod timeline;
