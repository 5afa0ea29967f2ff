pub mod availability;
pub mod clock;
pub mod conflict;
pub mod hours;
pub mod slots;

pub use availability::AvailabilityService;
