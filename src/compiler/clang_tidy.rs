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

/// Driver for clang-tidy. Never used for preprocessing; the preprocessor
/// hooks are programming errors.
pub struct ClangTidy<'a> {
    state: DriverState<'a>,
}

impl<'a> ClangTidy<'a> {
    pub fn new(object_node: &'a ObjectNode, remote_source_root: &str) -> ClangTidy<'a> {
        ClangTidy {
            state: DriverState::new(object_node, remote_source_root),
        }
    }
}

impl<'a> CompilerDriver<'a> for ClangTidy<'a> {
    fn state(&self) -> &DriverState<'a> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut DriverState<'a> {
        &mut self.state
    }

    fn process_arg_preprocessor_only(&self,
                                     _token: &str,
                                     _index: &mut usize,
                                     _next_token: &str,
                                     _out: &mut Args) -> bool {
        panic!("clang-tidy can't be used as a preprocessor");
    }

    fn process_arg_common(&self,
                          token: &str,
                          _index: &mut usize,
                          _out: &mut Args) -> bool {
        // The config file is supplied through add_preliminary_args
        if strip_token("--config-file=", token, true) {
            return true;
        }

        // The -fdiagnostics-color options are overridden below
        if self.state.force_colored_diagnostics() {
            if strip_token("-fdiagnostics-color", token, true)
                || strip_token("-fno-diagnostics-color", token, false) {
                return true;
            }
        }

        false
    }

    fn add_additional_args_preprocessor(&self, _out: &mut Args) {
        panic!("clang-tidy can't be used as a preprocessor");
    }

    fn add_additional_args_common(&self, _is_local: bool, out: &mut Args) {
        if self.state.force_colored_diagnostics() {
            out.append("-fdiagnostics-color=always");
            out.add_delimiter();
        }
    }

    fn add_preliminary_args(&self, _is_local: bool, out: &mut Args) {
        // clang-tidy takes its linter arguments before a "--" separator and
        // forwards everything after it to the underlying clang instance.
        // --config-file is a linter argument, so it goes first.
        out.append("--config-file=");
        if let Some(override_source_file) = self.state.override_source_file() {
            out.append(override_source_file);
        }
        out.append(".config.yaml");
        out.add_delimiter();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use compiler::driver::{build_full_args, Pass};
    use compiler::mock::MockObjectNode;

    fn run(driver: &ClangTidy, tokens: &[String], pass: Pass) -> String {
        let mut out = Args::new();
        build_full_args(driver, tokens, pass, &mut out);
        out.get_raw_args().to_owned()
    }

    #[test]
    fn test_config_file_precedes_user_args() {
        let node = MockObjectNode::new("main.cpp", "main.o");
        let mut driver = ClangTidy::new(&node, "/remote/src");
        driver.state_mut().set_override_source_file("checked.cpp");

        let tokens = stringvec!["--config-file=user.yaml", "checked.cpp", "--", "-Wall"];
        assert_eq!(run(&driver, &tokens, Pass::Compile),
                   "--config-file=checked.cpp.config.yaml checked.cpp -- -Wall ");
    }

    #[test]
    fn test_config_file_path_without_override() {
        // Without an override source file the config path degenerates to
        // ".config.yaml"; downstream tooling relies on the convention
        let node = MockObjectNode::new("main.cpp", "main.o");
        let driver = ClangTidy::new(&node, "/remote/src");
        assert_eq!(run(&driver, &stringvec!["main.cpp"], Pass::Compile),
                   "--config-file=.config.yaml main.cpp ");
    }

    #[test]
    fn test_forced_colored_diagnostics() {
        let node = MockObjectNode::new("main.cpp", "main.o");
        let mut driver = ClangTidy::new(&node, "/remote/src");
        driver.state_mut().set_force_colored_diagnostics(true);

        let tokens = stringvec!["-fdiagnostics-color=never", "main.cpp"];
        assert_eq!(run(&driver, &tokens, Pass::Compile),
                   "--config-file=.config.yaml main.cpp -fdiagnostics-color=always ");
    }

    #[test]
    #[should_panic]
    fn test_preprocessing_is_a_programming_error() {
        let node = MockObjectNode::new("main.cpp", "main.o");
        let driver = ClangTidy::new(&node, "/remote/src");
        let mut out = Args::new();
        build_full_args(&driver, &stringvec!["main.cpp"], Pass::PreprocessorOnly, &mut out);
    }
}
