pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{
    AppointmentError, CancelAppointmentRequest, CreateAppointmentRequest,
    RescheduleAppointmentRequest, UpdateStatusRequest,
};
pub use services::{AppointmentBookingService, AppointmentLifecycleService};
