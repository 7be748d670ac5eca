// SPDX-FileCopyrightText: The wedding-site authors
// SPDX-License-Identifier: MPL-2.0

//! Documentation of the site content and its data sources

#![allow(rustdoc::invalid_rust_codeblocks)] // Code blocks contain JSON and TOML.
#![doc = include_str!("../README.md")]
