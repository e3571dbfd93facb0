pub mod availability;
pub mod doctor;
pub mod expiry;
pub mod filter;
pub mod hours;

pub use availability::AvailabilityChecker;
pub use doctor::DoctorService;
pub use expiry::{ExpiryCalculator, ExpiryPolicy};
pub use filter::DoctorAvailabilityFilter;
pub use hours::OperatingHoursIndex;
