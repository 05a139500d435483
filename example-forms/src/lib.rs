//! Sample forms shared by the tests and demos of the workspace.

pub mod contact;
pub mod event_registration;
pub mod every_field;
pub mod satisfaction;

pub use contact::contact_form;
pub use event_registration::event_registration;
pub use every_field::every_field;
pub use satisfaction::satisfaction_survey;
