//! Smallworld Routing
//!
//! Greedy geometric forwarding over a generated network.
//!
//! # Design
//!
//! A message knows only the position of its destination. Each node hands
//! it to whichever of its out-links lies closest to that position on the
//! torus. Long-range links let a message skip across the lattice; how
//! quickly greedy forwarding converges is the property a small-world
//! network is judged by.
//!
//! [`RoutingSimulation`] sends a batch of messages between random active
//! nodes and summarises hop counts and delivery rate.

mod error;
mod route;
mod simulation;

pub use error::{Result, RoutingError};
pub use route::{greedy_route, next_hop, Hop, Route};
pub use simulation::{median, RoutingReport, RoutingSimulation};
