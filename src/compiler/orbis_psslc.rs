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

/// Driver for the Orbis Wave PSSL shader compiler.
pub struct OrbisWavePsslc<'a> {
    state: DriverState<'a>,
}

impl<'a> OrbisWavePsslc<'a> {
    pub fn new(object_node: &'a ObjectNode, remote_source_root: &str) -> OrbisWavePsslc<'a> {
        OrbisWavePsslc {
            state: DriverState::new(object_node, remote_source_root),
        }
    }
}

impl<'a> CompilerDriver<'a> for OrbisWavePsslc<'a> {
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
                                        _next_token: &str,
                                        _is_local: bool,
                                        _out: &mut Args) -> bool {
        // Remove forced includes so they aren't forced twice
        strip_token_with_arg("-include", token, index)
    }

    fn add_additional_args_preprocessor(&self, out: &mut Args) {
        out.append("-E"); // run the preprocessor only
        out.add_delimiter();
    }
}
