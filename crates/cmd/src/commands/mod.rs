// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

pub mod cat;
pub mod copy;
pub mod list;

pub use cat::cat_command;
pub use copy::{CopyMode, copy_command};
pub use list::list_command;
