// SPDX-License-Identifier: GPL-3.0-only

//! Camera backends
//!
//! - [`camera`]: the control contract and filter/frame catalogues
//! - [`virtual_camera`]: simulated camera producing synthetic captures

pub mod camera;
pub mod virtual_camera;
