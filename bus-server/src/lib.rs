//! Bus trip booking server.
//!
//! A web service that answers: "this bus is partway through its route;
//! where can a passenger still board, where can they alight, and what
//! does that segment cost?"

pub mod domain;
pub mod engine;
pub mod stream;
pub mod trips;
pub mod web;
