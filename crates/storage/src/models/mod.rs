pub mod finish_time;
pub mod race;
pub mod registration;
pub mod result;
pub mod runner;

pub use finish_time::{FinishTime, FinishTimeError};
pub use race::{DistanceCategory, DistanceContext, Race, RaceStatus};
pub use registration::{PaymentStatus, Registration, RegistrationDetail};
pub use result::{ResultDetail, ResultStatus};
pub use runner::Runner;
