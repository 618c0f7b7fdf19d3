//! Application layer: use-case services and outbound ports

pub mod ports;
pub mod services;

pub use ports::{MailMessage, Mailer};
pub use services::{
    AmenityService, AuthService, AuthenticatedUser, BookingReminder,
    BookingService, HolidayService, LoginResult, PropertyCodeService, PropertyService,
    RoleService, SubscriptionService, TicketService, UserService,
};
