pub mod series;
pub mod serve;
pub mod settings;

pub use series::{SeriesArgs, print_series};
pub use serve::serve;
pub use settings::print_settings;
