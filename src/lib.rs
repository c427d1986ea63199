//! Keepsake – a keyed-singleton identity registry.
//!
//! Keepsake centers on the *instance key* concept: construction of a
//! registry-managed type with equivalent arguments returns the pre-existing
//! instance rather than a new one, where:
//! * A [`construct::InstanceKey`] couples a class group with an optional
//!   identifier value.
//! * The [`construct::Identified`] trait is a type's declared identity
//!   policy: its class group (defaulting to the type's own name), the name
//!   of the identifying constructor parameter, and the constructor
//!   signature used to bind call arguments.
//! * A [`binding::Signature`] plus [`binding::CallArgs`] resolve the
//!   identifier value from a call's positional and named values, with
//!   defaults, exactly as the constructor itself would bind them.
//! * The [`construct::Registry`] owns the table of kept instances and is
//!   the factory: cached instances come back as shared `Arc`s, builders
//!   only run on a miss.
//!
//! The registry is an explicit object owned by the composition root. There
//! is no hidden global, which keeps tests isolated and lets an owner
//! [`construct::Registry::reset`] between runs.
//!
//! ## Modules
//! * [`construct`] – instance keys, the keeper and the registry.
//! * [`binding`] – declared signatures and call-argument resolution.
//! * [`datatype`] – the closed set of identifier value types.
//! * [`capability`] – decoder for the service capability mask (a boundary
//!   adapter, independent of the registry).
//! * [`settings`] – layered configuration (file + environment).
//! * [`error`] – the crate error enum and `Result` alias.
//!
//! ## Quick Start
//! ```
//! use std::sync::Arc;
//! use keepsake::binding::{CallArgs, Signature};
//! use keepsake::construct::{Identified, Registry};
//!
//! struct Speaker { room: String }
//! impl Identified for Speaker {
//!     const IDENTIFIER: Option<&'static str> = Some("room");
//!     fn signature() -> Signature {
//!         Signature::new().required("room")
//!     }
//! }
//!
//! let registry = Registry::new();
//! let args = CallArgs::new().arg("kitchen");
//! let (first, existed) = registry
//!     .construct(&args, || Ok(Speaker { room: "kitchen".into() }))
//!     .unwrap();
//! assert!(!existed);
//! assert_eq!(first.room, "kitchen");
//! let (again, existed) = registry
//!     .construct(&args, || unreachable!("a hit must not rebuild"))
//!     .unwrap();
//! assert!(existed);
//! assert!(Arc::ptr_eq(&first, &again));
//! ```

pub mod binding;
pub mod capability;
pub mod construct;
pub mod datatype;
pub mod error;
pub mod settings;
