//! Trellis - file-system routing for pre-rendered sites.
//!
//! Two halves share the route model in [`route`]:
//!
//! - build time: [`scan`] page sources, build the route tree, write the
//!   [`artifact`] ([`generator`], optionally under [`watch`])
//! - run time: the [`runtime`] navigation engine resolves addresses against
//!   the artifact, fetches fragments and manages session history

pub mod artifact;
pub mod cli;
pub mod config;
pub mod core;
pub mod generator;
pub mod logger;
pub mod route;
pub mod runtime;
pub mod scan;
pub mod watch;
