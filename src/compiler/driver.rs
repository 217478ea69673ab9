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
use util;

/// How a token stream is being rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// Produce preprocessed output only (`-E` style).
    PreprocessorOnly,
    /// Compile source that has already been preprocessed, either on this
    /// machine or on a remote worker.
    CompilePreprocessed { local: bool },
    /// A plain compile; tokens receive only common processing and build-time
    /// substitution.
    Compile,
    /// Canonicalize an already-preprocessed command for an untrusted remote
    /// worker.
    PreparePreprocessedForRemote,
}

/// State shared by every driver variant for the lifetime of one
/// compile-command preparation.
pub struct DriverState<'a> {
    object_node: &'a ObjectNode,
    remote_source_root: String,
    working_dir: String,
    source_mapping: Option<String>,
    relative_base_path: Option<String>,
    override_source_file: Option<String>,
    force_colored_diagnostics: bool,
}

impl<'a> DriverState<'a> {
    pub fn new(object_node: &'a ObjectNode, remote_source_root: &str) -> DriverState<'a> {
        DriverState {
            object_node: object_node,
            remote_source_root: remote_source_root.to_owned(),
            working_dir: String::new(),
            source_mapping: None,
            relative_base_path: None,
            override_source_file: None,
            force_colored_diagnostics: false,
        }
    }

    pub fn set_force_colored_diagnostics(&mut self, force_colored_diagnostics: bool) {
        self.force_colored_diagnostics = force_colored_diagnostics;
    }

    /// Enable `-fdebug-prefix-map` emission, mapping `working_dir` to
    /// `source_mapping` in debug info.
    pub fn set_source_mapping(&mut self, working_dir: &str, source_mapping: &str) {
        self.working_dir = working_dir.to_owned();
        self.source_mapping = Some(source_mapping.to_owned());
    }

    /// Emit `%1`/`%2` as paths relative to this base.
    pub fn set_relative_base_path(&mut self, relative_base_path: &str) {
        self.relative_base_path = Some(relative_base_path.to_owned());
    }

    /// Substitute `%1` with this file verbatim instead of the node's source.
    pub fn set_override_source_file(&mut self, override_source_file: &str) {
        self.override_source_file = Some(override_source_file.to_owned());
    }

    pub fn object_node(&self) -> &ObjectNode {
        self.object_node
    }

    /// Absolute path of the sources root on a distributed worker. Read by
    /// callers assembling the remote execution environment.
    pub fn remote_source_root(&self) -> &str {
        &self.remote_source_root
    }

    pub fn working_dir(&self) -> &str {
        &self.working_dir
    }

    pub fn source_mapping(&self) -> Option<&str> {
        self.source_mapping.as_ref().map(|s| s.as_str())
    }

    pub fn override_source_file(&self) -> Option<&str> {
        self.override_source_file.as_ref().map(|s| s.as_str())
    }

    pub fn force_colored_diagnostics(&self) -> bool {
        self.force_colored_diagnostics
    }
}

/// Argument-rewriting rules for one compiler flavor.
///
/// Each `process_arg_*` hook is offered one token (plus one token of
/// lookahead) and returns `true` iff it consumed the token; a hook that also
/// consumes the companion argument advances `index` by one. Hooks that
/// return `false` leave emission to the caller. The defaults implement the
/// behavior shared by all compilers: no rewriting, plus `%1`/`%2`
/// substitution.
pub trait CompilerDriver<'a> {
    fn state(&self) -> &DriverState<'a>;
    fn state_mut(&mut self) -> &mut DriverState<'a>;

    fn process_arg_preprocessor_only(&self,
                                     _token: &str,
                                     _index: &mut usize,
                                     _next_token: &str,
                                     _out: &mut Args) -> bool {
        false
    }

    fn process_arg_compile_preprocessed(&self,
                                        _token: &str,
                                        _index: &mut usize,
                                        _next_token: &str,
                                        _is_local: bool,
                                        _out: &mut Args) -> bool {
        false
    }

    fn process_arg_common(&self,
                          _token: &str,
                          _index: &mut usize,
                          _out: &mut Args) -> bool {
        false
    }

    fn process_arg_prepare_preprocessed_for_remote(&self,
                                                   _token: &str,
                                                   _index: &mut usize,
                                                   _next_token: &str,
                                                   _out: &mut Args) -> bool {
        false
    }

    /// Substitute `%1` (input file) or `%2` (output file) inside `token`.
    ///
    /// `%1` is checked first and only one marker is substituted per token.
    /// An `override_source_file` replaces `%1` verbatim; otherwise a
    /// configured `relative_base_path` makes both files relative to it.
    fn process_arg_build_time_substitution(&self,
                                           token: &str,
                                           _index: &mut usize,
                                           out: &mut Args) -> bool {
        let state = self.state();

        // %1 -> input file
        if let Some(found) = token.find("%1") {
            out.append(&token[..found]);
            match state.override_source_file() {
                Some(override_source_file) => out.append(override_source_file),
                None => {
                    let source_file = state.object_node().source_file_name();
                    match state.relative_base_path {
                        Some(ref base) => out.append(&util::get_relative_path(base, source_file)),
                        None => out.append(source_file),
                    }
                }
            }
            out.append(&token[found + 2..]);
            out.add_delimiter();
            return true;
        }

        // %2 -> output file
        if let Some(found) = token.find("%2") {
            out.append(&token[..found]);
            let output = state.object_node().name();
            match state.relative_base_path {
                Some(ref base) => out.append(&util::get_relative_path(base, output)),
                None => out.append(output),
            }
            out.append(&token[found + 2..]);
            out.add_delimiter();
            return true;
        }

        false
    }

    /// Arguments emitted before the user's tokens (clang-tidy's linter args).
    fn add_preliminary_args(&self, _is_local: bool, _out: &mut Args) {}

    fn add_additional_args_preprocessor(&self, _out: &mut Args) {}

    fn add_additional_args_common(&self, _is_local: bool, _out: &mut Args) {}

    fn add_additional_args_prepare_preprocessed_for_remote(&self, _out: &mut Args) {}
}

/// Report whether `token` matches `token_to_check_for`, exactly or (when
/// `allow_starts_with`) as a prefix.
pub fn strip_token(token_to_check_for: &str, token: &str, allow_starts_with: bool) -> bool {
    if allow_starts_with {
        token.starts_with(token_to_check_for)
    } else {
        token == token_to_check_for
    }
}

/// Report whether `token` is `token_to_check_for` with an argument.
///
/// The argument may be glued (`-ofile`) or in the companion token (`-o file`);
/// in the companion case `index` advances by one so the caller's iteration
/// skips it. A token wrapped in one balanced `"` or `'` pair is checked
/// against its unquoted content; nested quoting is not unwrapped further.
pub fn strip_token_with_arg(token_to_check_for: &str, token: &str, index: &mut usize) -> bool {
    strip_token_with_arg_inner(token_to_check_for, token, index, true)
}

fn strip_token_with_arg_inner(token_to_check_for: &str,
                              token: &str,
                              index: &mut usize,
                              allow_unquote: bool) -> bool {
    if token.starts_with(token_to_check_for) {
        if token == token_to_check_for {
            *index += 1; // skip the companion token
        }
        return true;
    }
    if allow_unquote && (token.len() > 2) {
        let bytes = token.as_bytes();
        let first = bytes[0];
        let last = bytes[token.len() - 1];
        if (first == last) && ((first == b'"') || (first == b'\'')) {
            let unquoted = &token[1..token.len() - 1];
            return strip_token_with_arg_inner(token_to_check_for, unquoted, index, false);
        }
    }
    false
}

/// Drive `tokens` through `driver`'s rules for `pass`, accumulating the
/// rewritten command line into `out`.
///
/// Every emitted argument is followed by one recorded delimiter.
pub fn build_full_args<'a>(driver: &CompilerDriver<'a>, tokens: &[String], pass: Pass, out: &mut Args) {
    trace!("building args: {:?}, {} tokens", pass, tokens.len());

    let is_local = match pass {
        Pass::CompilePreprocessed { local } => local,
        _ => true,
    };

    if pass != Pass::PreparePreprocessedForRemote {
        driver.add_preliminary_args(is_local, out);
    }

    let mut index = 0;
    while index < tokens.len() {
        let token = &tokens[index];
        let next_token = tokens.get(index + 1).map(|t| t.as_str()).unwrap_or("");

        let mut handled = match pass {
            Pass::PreprocessorOnly => {
                driver.process_arg_preprocessor_only(token, &mut index, next_token, out)
            }
            Pass::CompilePreprocessed { local } => {
                driver.process_arg_compile_preprocessed(token, &mut index, next_token, local, out)
            }
            Pass::Compile => false,
            Pass::PreparePreprocessedForRemote => {
                driver.process_arg_prepare_preprocessed_for_remote(token, &mut index, next_token, out)
            }
        };

        if pass != Pass::PreparePreprocessedForRemote {
            handled = handled || driver.process_arg_common(token, &mut index, out);
            handled = handled || driver.process_arg_build_time_substitution(token, &mut index, out);
        }

        if !handled {
            out.append(token);
            out.add_delimiter();
        }

        index += 1;
    }

    match pass {
        Pass::PreprocessorOnly => {
            driver.add_additional_args_preprocessor(out);
            driver.add_additional_args_common(true, out);
        }
        Pass::CompilePreprocessed { local } => {
            driver.add_additional_args_common(local, out);
        }
        Pass::Compile => {
            driver.add_additional_args_common(true, out);
        }
        Pass::PreparePreprocessedForRemote => {
            driver.add_additional_args_prepare_preprocessed_for_remote(out);
        }
    }
}
