pub mod formatting;
pub mod settings;

pub use settings::ReportSettings;
