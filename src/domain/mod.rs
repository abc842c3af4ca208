pub mod common;
pub mod month;
pub mod record;
pub mod summary;

pub use common::Displayable;
pub use month::{first_of_month, month_name, parse_month, validate_month, MONTHS};
pub use record::{validate_amount, DuplicateKey, PaymentMethod, Record, RecordKind};
pub use summary::{FlowTotals, MonthlySummary, Summary};
