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

/// Driver for the SN Systems compiler.
pub struct Snc<'a> {
    state: DriverState<'a>,
}

impl<'a> Snc<'a> {
    pub fn new(object_node: &'a ObjectNode, remote_source_root: &str) -> Snc<'a> {
        Snc {
            state: DriverState::new(object_node, remote_source_root),
        }
    }
}

impl<'a> CompilerDriver<'a> for Snc<'a> {
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

    fn add_additional_args_preprocessor(&self, out: &mut Args) {
        out.append("-E"); // run the preprocessor only
        out.add_delimiter();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use compiler::driver::{build_full_args, Pass};
    use compiler::mock::MockObjectNode;

    #[test]
    fn test_preprocessor_only() {
        let node = MockObjectNode::new("main.cpp", "main.o");
        let driver = Snc::new(&node, "/remote/src");
        let tokens = stringvec!["-omain.o", "-c", "main.cpp"];
        let mut out = Args::new();
        build_full_args(&driver, &tokens, Pass::PreprocessorOnly, &mut out);
        assert_eq!(out.get_raw_args(), "main.cpp -E ");
    }
}
