pub use error::EngineError;
pub use incomes::IncomeType;
pub use ops::{Engine, EngineBuilder, IncomeDraft, SystemTotals};

pub mod budgets;
pub mod expenses;
pub mod incomes;
pub mod users;

mod error;
mod ops;
mod util;

pub(crate) type ResultEngine<T> = Result<T, EngineError>;
