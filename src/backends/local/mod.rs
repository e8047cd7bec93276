// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod factory;
pub mod functions;

pub use factory::{FunctionContext, LocalFunctionFactory};
pub use functions::*;
