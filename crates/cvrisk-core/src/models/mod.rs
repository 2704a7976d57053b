pub mod advisory;
pub mod category;
pub mod predictors;
pub mod region;
pub mod unit;
pub mod validation;

pub use advisory::{Advisory, AdvisoryKind};
pub use category::RiskCategory;
pub use predictors::{PredictorColumns, Predictors, Sex, Smoking};
pub use region::RiskRegion;
pub use unit::CholesterolUnit;
pub use validation::{BatchValidationError, Field, FieldError};
