pub mod aggregate;
pub mod classifier;
pub mod error;
pub mod extractor;
pub mod model;
pub mod status;

pub use self::aggregate::aggregate;
pub use self::classifier::ModuleClassifier;
pub use self::error::Error;
pub use self::extractor::{Extractor, ExtractorConfig, Strategy};
pub use self::model::{ModuleRecords, ModuleSummary, Report, Status, TestRecord};
