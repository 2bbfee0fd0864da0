pub mod guide;
pub mod metrics;
pub mod parser;
pub mod prompt;
pub mod providers;
pub mod validation;

pub use guide::TouristGuide;
pub use metrics::init_metrics;
