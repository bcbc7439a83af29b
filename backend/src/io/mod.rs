//! IO layer: the REST API surface.

pub mod rest;
