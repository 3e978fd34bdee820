pub mod config;
pub mod errors;
pub mod filters;
pub mod report;
pub mod results;
pub mod search;

pub use config::{EncodingMode, ReportLabels, SearchConfig};
pub use errors::{SearchError, SearchResult};
pub use report::ReportBuilder;
pub use results::{Match, ResultSet};
pub use search::{run, run_in, search_in};
