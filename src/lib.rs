// Copyright 2016 Mozilla Foundation
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Compiler command-line drivers for a distributed C/C++ build system.
//!
//! A single user-configured compiler command line must be rewritten into
//! several distinct invocations: a preprocess-only one (for cache
//! fingerprinting and to produce distributable preprocessed source), a
//! compile-preprocessed one (to turn that source into an object, locally or
//! on a remote worker), and a canonicalized form a remote worker can consume.
//! Each compiler flavor has its own rewriting rules; the result is packaged
//! by [`Args`](args/struct.Args.html) under strict per-platform command-line
//! length limits, falling back to a response file when needed.

#![recursion_limit = "128"]

#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate lazy_static;
extern crate libc;
#[macro_use]
extern crate log;
extern crate uuid;

#[cfg(test)]
extern crate itertools;
#[cfg(test)]
extern crate tempdir;

#[cfg(test)]
#[macro_use]
mod test_utils;

pub mod args;
pub mod compiler;
pub mod errors;
pub mod response_file;
mod util;
