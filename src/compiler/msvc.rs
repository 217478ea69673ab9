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

use args::Args;
use compiler::ObjectNode;
use compiler::driver::{strip_token, CompilerDriver, DriverState};

/// Driver for Microsoft Visual C++, and for clang in CL compatibility mode
/// (`is_clang_cl`).
///
/// MSVC-style options accept either a `/` or a `-` prefix, so this driver
/// matches flags through its own prefix-agnostic helpers.
pub struct Msvc<'a> {
    state: DriverState<'a>,
    is_clang_cl: bool,
}

impl<'a> Msvc<'a> {
    pub fn new(object_node: &'a ObjectNode,
               remote_source_root: &str,
               is_clang_cl: bool) -> Msvc<'a> {
        Msvc {
            state: DriverState::new(object_node, remote_source_root),
            is_clang_cl: is_clang_cl,
        }
    }
}

/// `token` is exactly `arg` behind a `/` or `-` prefix.
fn is_compiler_arg_msvc(token: &str, arg: &str) -> bool {
    (token.len() == arg.len() + 1) && is_start_of_compiler_arg_msvc(token, arg)
}

/// `token` starts with `arg` behind a `/` or `-` prefix.
fn is_start_of_compiler_arg_msvc(token: &str, arg: &str) -> bool {
    let bytes = token.as_bytes();
    if bytes.is_empty() {
        return false;
    }
    ((bytes[0] == b'/') || (bytes[0] == b'-')) && token[1..].starts_with(arg)
}

/// `strip_token`, accepting either MSVC option prefix.
fn strip_token_msvc(token_to_check_for: &str, token: &str, allow_starts_with: bool) -> bool {
    if allow_starts_with {
        is_start_of_compiler_arg_msvc(token, token_to_check_for)
    } else {
        is_compiler_arg_msvc(token, token_to_check_for)
    }
}

/// `strip_token_with_arg`, accepting either MSVC option prefix. Glued
/// arguments (`/Foobj\`) consume nothing extra; a bare option consumes the
/// companion token by advancing `index`.
fn strip_token_with_arg_msvc(token_to_check_for: &str, token: &str, index: &mut usize) -> bool {
    if is_start_of_compiler_arg_msvc(token, token_to_check_for) {
        if is_compiler_arg_msvc(token, token_to_check_for) {
            *index += 1; // skip the companion token
        }
        return true;
    }
    false
}

impl<'a> CompilerDriver<'a> for Msvc<'a> {
    fn state(&self) -> &DriverState<'a> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut DriverState<'a> {
        &mut self.state
    }

    fn process_arg_preprocessor_only(&self,
                                     token: &str,
                                     index: &mut usize,
                                     _next_token: &str,
                                     _out: &mut Args) -> bool {
        // Remove the object file output arg; preprocessed output goes to
        // stdout
        if strip_token_with_arg_msvc("Fo", token, index) {
            return true;
        }

        // Remove the "compile only" flag
        strip_token_msvc("c", token, false)
    }

    fn process_arg_common(&self,
                          token: &str,
                          _index: &mut usize,
                          _out: &mut Args) -> bool {
        // clang-cl accepts the clang diagnostics options; they are
        // overridden below
        if self.is_clang_cl {
            if strip_token("-fdiagnostics-color", token, true)
                || strip_token("-fno-diagnostics-color", token, false) {
                return true;
            }
        }

        false
    }

    fn add_additional_args_preprocessor(&self, out: &mut Args) {
        out.append("/E"); // run the preprocessor only
        out.add_delimiter();
    }

    fn add_additional_args_common(&self, _is_local: bool, out: &mut Args) {
        if self.is_clang_cl && self.state.force_colored_diagnostics() {
            out.append("-fdiagnostics-color=always");
            out.add_delimiter();
        }
    }
}
