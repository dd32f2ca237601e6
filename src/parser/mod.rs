// Response parsers, one per source format.

pub mod cnn_parser;
pub mod text;
pub mod twse_parser;
pub mod vix_parser;
pub mod yahoo_parser;

pub use cnn_parser::parse_fear_greed;
pub use twse_parser::parse_margin;
pub use vix_parser::parse_taiwan_vix;
pub use yahoo_parser::parse_chart;
