//! Client side of the profile-edit flow: the form view-model and its
//! network seam. Kept in-crate so it shares the wire DTOs with the server.

pub mod backend;
pub mod profile_form;
