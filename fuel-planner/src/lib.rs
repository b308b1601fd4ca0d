//! Fuel stop route planner server.
//!
//! Given a start and finish place in the US, fetches a driving route,
//! places a refuel stop every few hundred miles, picks a station at each
//! stop from a fuel price table, and estimates the trip's fuel cost.

pub mod config;
pub mod domain;
pub mod geocode;
pub mod planner;
pub mod prices;
pub mod routing;
pub mod service;
pub mod web;

#[cfg(test)]
pub(crate) mod testing;
