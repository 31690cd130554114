//! Connection details for OpenID client registrations.
//!
//! Turns the attributes of an OpenID client (secret, client ID, service
//! account user ID) into the byte-valued credential map a secret store
//! publishes to downstream consumers. Every qualifying attribute is exposed
//! twice: under a short camel-case key and under the dotted
//! `attribute.<field>` key older consumers were written against.
//!
//! # Example
//!
//! ```
//! use conndetails_core::AttributeSet;
//! use conndetails_openid::project;
//!
//! # fn main() -> Result<(), conndetails_openid::ProjectionError> {
//! let attrs = AttributeSet::new()
//!     .with("client_id", "test-client")
//!     .with("client_secret", "");
//!
//! let details = project(&attrs)?;
//! assert_eq!(details.get_str("clientID"), Some("test-client"));
//! assert_eq!(details.get_str("attribute.client_id"), Some("test-client"));
//! assert!(!details.contains_key("clientSecret"));
//! # Ok(())
//! # }
//! ```

pub mod details;
pub mod error;
pub mod keys;
pub mod projector;

pub use details::ConnectionDetails;
pub use error::ProjectionError;
pub use keys::{ConnectionKey, LEGACY_PREFIX, OPENID_CLIENT_KEYS};
pub use projector::{project, ConnectionDetailsProjector, OpenIdClientProjector, Strictness};

pub mod prelude {
    //! Re-exports of the most commonly used projection types.
    pub use crate::{
        project, ConnectionDetails, ConnectionDetailsProjector, OpenIdClientProjector,
        Strictness,
    };
}
