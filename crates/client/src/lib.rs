//! Client-side component layer for the bizdesk API.
//!
//! [`ApiClient`] speaks the REST surface; [`EntityView`] holds the state a
//! management screen renders (row list, form, editing identity, error
//! banner) and implements its actions on top of the client.

pub mod api;
pub mod config;
pub mod error;
pub mod form;
pub mod view;

pub use api::{ApiClient, Choice};
pub use config::ClientConfig;
pub use error::ClientError;
pub use form::FormModel;
pub use view::EntityView;
