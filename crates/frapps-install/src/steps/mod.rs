//! Individual steps of the install process.
//!
//! Each step is implemented as a separate module with functions that
//! can be called by the [`Installer`](crate::Installer).

pub mod download;
pub mod extract;
pub mod install;
