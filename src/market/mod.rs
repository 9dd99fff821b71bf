// SPDX-License-Identifier: MIT

pub mod config;
pub mod demo;
pub mod seed;
pub mod server;
pub mod tracking;
pub mod views;
