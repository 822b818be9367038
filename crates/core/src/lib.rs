//! Core types, schemas, and validation for the Vitrine analytics service.

pub mod error;
pub mod events;
pub mod limits;
pub mod session;

pub use error::{Error, Result, StoreErrorCode, ValidationErrorCode};
pub use events::{
    Interaction, SectionDwell, SectionTimeRequest, TrackInteractionRequest, TrackViewRequest, View,
};
pub use session::{Session, SessionKey};
