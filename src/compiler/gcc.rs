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
use compiler::driver::{strip_token, strip_token_with_arg, CompilerDriver, DriverState};

/// Driver for GCC and clang. The two share almost every rule; `is_clang`
/// gates the handful that differ.
pub struct GccClang<'a> {
    state: DriverState<'a>,
    is_clang: bool,
}

impl<'a> GccClang<'a> {
    pub fn new(object_node: &'a ObjectNode,
               remote_source_root: &str,
               is_clang: bool) -> GccClang<'a> {
        GccClang {
            state: DriverState::new(object_node, remote_source_root),
            is_clang: is_clang,
        }
    }

    /// Rewrite the argument of `-x` to its "cpp-output" variant so already
    /// preprocessed code isn't preprocessed a second time. Argument order
    /// matters, so the rewrite happens in place.
    fn process_arg_x_language_option(&self,
                                     token: &str,
                                     index: &mut usize,
                                     next_token: &str,
                                     out: &mut Args) -> bool {
        // Older clang (prior to v10) ignores -D directives on the command
        // line when a "*-cpp-output" language is set, which breaks
        // -frewrite-includes, so the rewrite is opt-in via a compiler
        // capability.
        if !self.state.object_node().compiler_caps().clang_gcc_update_x_language_arg_enabled {
            return false;
        }

        if (token == "-x") && !next_token.is_empty() {
            out.append(token);
            out.add_delimiter();

            let language = next_token;
            *index += 1; // consume the language argument
            if language == "c" {
                out.append("cpp-output");
            } else if (language == "c++")
                || (language == "objective-c")
                || (language == "objective-c++") {
                out.append(language);
                out.append("-cpp-output");
            } else {
                out.append(language);
            }
            out.add_delimiter();
            return true;
        }

        false
    }

    /// Strip makefile-style dependency output options. Generating them is
    /// fine while preprocessing, but on the compile of the preprocessed
    /// output they are reported as unused, and the directories they
    /// reference may not exist on a remote worker.
    fn process_arg_dependency_option(&self, token: &str, index: &mut usize) -> bool {
        strip_token("-MD", token, false) || strip_token_with_arg("-MF", token, index)
    }
}

impl<'a> CompilerDriver<'a> for GccClang<'a> {
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
        // The pch only helps a direct compilation; it can neither generate
        // the preprocessed output nor accelerate compiling it
        if strip_token_with_arg("-include-pch", token, index) {
            return true;
        }

        // Remove the static analyzer from the clang preprocessor
        if self.is_clang {
            if strip_token("--analyze", token, false)
                || strip_token_with_arg("-Xanalyzer", token, index)
                || strip_token_with_arg("-analyzer-output", token, index)
                || strip_token_with_arg("-analyzer-config", token, index)
                || strip_token_with_arg("-analyzer-checker", token, index) {
                return true;
            }
        }

        // Remove the output arg
        if strip_token_with_arg("-o", token, index) {
            return true;
        }

        // Remove the "compile only" flag
        strip_token("-c", token, false)
    }

    fn process_arg_compile_preprocessed(&self,
                                        token: &str,
                                        index: &mut usize,
                                        next_token: &str,
                                        is_local: bool,
                                        out: &mut Args) -> bool {
        if self.is_clang {
            // clang raises an error on -I options when the input is already
            // preprocessed
            if strip_token_with_arg("-I", token, index) {
                return true;
            }
        }

        // isysroot may not exist on a distributed system and only matters
        // for include paths, which have already been resolved
        if strip_token_with_arg("-isysroot", token, index) {
            return true;
        }

        if is_local {
            if self.process_arg_x_language_option(token, index, next_token, out) {
                return true;
            }
            if self.process_arg_dependency_option(token, index) {
                return true;
            }
        }

        if strip_token_with_arg("-include-pch", token, index) {
            return true;
        }

        // Remove forced includes so they aren't forced twice
        strip_token_with_arg("-include", token, index)
    }

    fn process_arg_common(&self,
                          token: &str,
                          _index: &mut usize,
                          _out: &mut Args) -> bool {
        // The -fdiagnostics-color options are overridden below
        if self.state.force_colored_diagnostics() {
            if strip_token("-fdiagnostics-color", token, true)
                || strip_token("-fno-diagnostics-color", token, false) {
                return true;
            }
        }

        false
    }

    fn process_arg_prepare_preprocessed_for_remote(&self,
                                                   token: &str,
                                                   index: &mut usize,
                                                   next_token: &str,
                                                   out: &mut Args) -> bool {
        if self.process_arg_x_language_option(token, index, next_token, out) {
            return true;
        }

        self.process_arg_dependency_option(token, index)
    }

    fn add_additional_args_preprocessor(&self, out: &mut Args) {
        out.append("-E"); // run the preprocessor only
        out.add_delimiter();

        // Keep unused defines declared in the pch so two pchs differing
        // only in such defines hash differently
        if self.state.object_node().is_creating_pch() {
            out.append("-dD");
            out.add_delimiter();
        }

        if self.is_clang {
            if self.state.object_node().compiler_caps().clang_rewrite_includes_enabled {
                out.append("-frewrite-includes");
                out.add_delimiter();
            }
        }
    }

    fn add_additional_args_common(&self, is_local: bool, out: &mut Args) {
        if self.state.force_colored_diagnostics() {
            out.append("-fdiagnostics-color=always");
            out.add_delimiter();
        }

        // -ffile-prefix-map would also cover __FILE__, but needs GCC 8 /
        // Clang 10; -fdebug-prefix-map is available from Clang 3.8 and all
        // modern GCC versions
        if is_local {
            if let Some(source_mapping) = self.state.source_mapping() {
                out.append(&format!("\"-fdebug-prefix-map={}={}\"",
                                    self.state.working_dir(), source_mapping));
                out.add_delimiter();
            }
        }
    }
}
