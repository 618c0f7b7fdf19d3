//! Database entities module

pub mod amenity;
pub mod booking;
pub mod booking_sequence;
pub mod holiday;
pub mod property;
pub mod property_amenity;
pub mod property_code;
pub mod property_image;
pub mod role;
pub mod subscription;
pub mod ticket;
pub mod user;
pub mod user_session;

pub use amenity::Entity as Amenity;
pub use booking::Entity as Booking;
pub use booking_sequence::Entity as BookingSequence;
pub use holiday::Entity as Holiday;
pub use property::Entity as Property;
pub use property_amenity::Entity as PropertyAmenity;
pub use property_code::Entity as PropertyCode;
pub use property_image::Entity as PropertyImage;
pub use role::Entity as Role;
pub use subscription::Entity as Subscription;
pub use ticket::Entity as Ticket;
pub use user::Entity as User;
pub use user_session::Entity as UserSession;
