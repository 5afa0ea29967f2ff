pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{
    AvailabilityStatus, AvailabilityView, ProviderAvailability, ScheduleError, SlotPolicy, TimeSlot,
};
pub use services::AvailabilityService;
