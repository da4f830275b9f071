//! formdrill-report: Text and HTML renderers for drill statistics.

pub mod html;
pub mod text;
