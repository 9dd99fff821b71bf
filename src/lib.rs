// SPDX-License-Identifier: MIT

pub mod hub;
pub mod market;
