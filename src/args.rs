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

#[cfg(target_os = "macos")]
use libc;
use response_file::ResponseFile;

use errors::*;

/// Whether finalization may redirect the arguments through a response file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgsResponseFileMode {
    /// Don't use a response file under any circumstances.
    Never,
    /// Use a response file if the args are long enough to require it.
    IfNeeded,
    /// Force the use of a response file no matter what.
    Always,
}

/// Builder for a single command line.
///
/// Arguments are accumulated into one buffer with every separator's offset
/// recorded, so that finalization can rewrite separators to newlines when a
/// response file needs one argument per line. An `Args` is filled during a
/// single pass, finalized once, and read-only afterwards.
pub struct Args {
    args: String,
    response_file_args: Option<String>,
    delimiter_indices: Vec<usize>,
    response_file: ResponseFile,
    finalized: bool,
    disable_response_file_write: bool,
}

impl Args {
    pub fn new() -> Args {
        Args {
            args: String::new(),
            response_file_args: None,
            delimiter_indices: Vec::new(),
            response_file: ResponseFile::new(),
            finalized: false,
            disable_response_file_write: false,
        }
    }

    pub fn append(&mut self, arg_part: &str) {
        assert!(!self.finalized);
        self.args.push_str(arg_part);
    }

    /// Record the separator position and append a single space.
    pub fn add_delimiter(&mut self) {
        assert!(!self.finalized);
        self.delimiter_indices.push(self.args.len());
        self.args.push(' ');
    }

    /// Reset the buffer and delimiter list. Only valid before finalize.
    pub fn clear(&mut self) {
        assert!(!self.finalized);
        self.args.clear();
        self.delimiter_indices.clear();
    }

    pub fn set_escape_slashes_in_response_file(&mut self) {
        assert!(!self.finalized);
        self.response_file.set_escape_slashes();
    }

    /// Skip the on-disk write at finalize time. Used by tests.
    pub fn disable_response_file_write(&mut self) {
        self.disable_response_file_write = true;
    }

    /// Do final fixups and create a response file if needed and permitted.
    ///
    /// `exe` only contributes its length: the eventual command line is
    /// `"<exe>" <args>`, and the platform limits apply to the whole of it.
    /// On `Never`-mode overflow the error is logged and returned; all other
    /// mode/length combinations succeed.
    pub fn finalize(&mut self,
                    exe: &str,
                    node_name_for_error: &str,
                    mode: ArgsResponseFileMode) -> Result<()> {
        self.finalize_with_limit(exe, node_name_for_error, mode, platform_arg_limit())
    }

    fn finalize_with_limit(&mut self,
                           exe: &str,
                           node_name_for_error: &str,
                           mode: ArgsResponseFileMode,
                           arg_limit: Option<usize>) -> Result<()> {
        assert!(!self.finalized);

        // Two quotes around the exe name and the separating space
        let extra_len = 3;
        let arg_len = self.args.len();
        let total_len = arg_len + exe.len() + extra_len;
        let fits = match arg_limit {
            Some(limit) => total_len <= limit,
            None => true,
        };

        match mode {
            ArgsResponseFileMode::Never => {
                if fits {
                    self.finalized = true;
                    return Ok(());
                }
                let err = ErrorKind::CommandLineLimitExceeded(arg_len,
                                                              arg_limit.unwrap_or(0),
                                                              node_name_for_error.to_owned());
                error!("{}", err);
                Err(err.into())
            }
            ArgsResponseFileMode::IfNeeded if fits => {
                self.finalized = true;
                Ok(())
            }
            ArgsResponseFileMode::IfNeeded | ArgsResponseFileMode::Always => {
                self.emit_response_file()
            }
        }
    }

    fn emit_response_file(&mut self) -> Result<()> {
        // link.exe rejects response-file lines of 131071 chars or more
        // (LNK1170), so long files get one argument per line
        if cfg!(windows) && (self.args.len() >= 131071) {
            self.convert_delimiters_to_newlines();
        }

        self.finalized = true;

        if !self.disable_response_file_write {
            debug!("args length {} requires a response file", self.args.len());
            self.response_file.create(&self.args)?;
        }

        self.response_file_args = Some(format!("@\"{}\"",
                                               self.response_file.path().display()));
        Ok(())
    }

    fn convert_delimiters_to_newlines(&mut self) {
        let Args { ref mut args, ref delimiter_indices, .. } = *self;
        // A space to newline swap is a 1-byte ASCII edit, so the buffer
        // stays valid UTF-8
        let bytes = unsafe { args.as_bytes_mut() };
        for &index in delimiter_indices {
            assert_eq!(bytes[index], b' ');
            bytes[index] = b'\n';
        }
    }

    pub fn get_raw_args(&self) -> &str {
        &self.args
    }

    /// The string to hand to process creation: the response-file indirection
    /// when one was emitted, the raw buffer otherwise.
    pub fn get_final_args(&self) -> &str {
        assert!(self.finalized);
        match self.response_file_args {
            Some(ref response_file_args) => response_file_args,
            None => &self.args,
        }
    }
}

impl Default for Args {
    fn default() -> Args {
        Args::new()
    }
}

/// Remove one enclosing `"` or `'` pair, if present.
///
/// A lone quote strips to the empty string; mismatched quote kinds are each
/// stripped independently, matching how the drivers unwrap quoted flags.
pub fn strip_quotes(s: &str) -> &str {
    if s.is_empty() {
        return s;
    }
    let bytes = s.as_bytes();
    let mut start = 0;
    let mut end = s.len();
    let first = bytes[0];
    if (first == b'"') || (first == b'\'') {
        start += 1;
    }
    let last = bytes[s.len() - 1];
    if (last == b'"') || (last == b'\'') {
        end -= 1;
    }
    if end < start {
        return "";
    }
    &s[start..end]
}

#[cfg(windows)]
fn platform_arg_limit() -> Option<usize> {
    // The documented CreateProcess command line cap (32KiB including the
    // null terminator)
    Some(32767)
}

#[cfg(target_os = "macos")]
lazy_static! {
    static ref ARG_MAX: usize = unsafe { libc::sysconf(libc::_SC_ARG_MAX) as usize };
}

#[cfg(target_os = "macos")]
fn platform_arg_limit() -> Option<usize> {
    Some(*ARG_MAX - 1)
}

#[cfg(not(any(windows, target_os = "macos")))]
fn platform_arg_limit() -> Option<usize> {
    // The interaction with the environment block makes the real limit
    // indeterminable, so the command line is treated as always fitting
    None
}

#[cfg(test)]
mod test {
    use super::*;

    const EXE_NAME: &'static str = "ExeName";
    const NODE_NAME: &'static str = "NodeName";
    const TEST_LIMIT: usize = 32767;

    fn check(mode: ArgsResponseFileMode,
             long_args: bool,
             expect_ok: bool,
             expect_response_file: bool) {
        let mut args = Args::new();

        // Prevent the write to disk; these tests only exercise policy
        args.disable_response_file_write();

        if long_args {
            // ~320 KiB of command line args (32 * 10 * 1024)
            for _ in 0..10 * 1024 {
                args.append("123456789012345678901234567890X"); // 31 chars
                args.add_delimiter();
            }
        } else {
            args.append("short");
        }

        match args.finalize_with_limit(EXE_NAME, NODE_NAME, mode, Some(TEST_LIMIT)) {
            Ok(()) => {
                assert!(expect_ok);
                let response_file_was_used = args.get_final_args().starts_with('@');
                assert_eq!(response_file_was_used, expect_response_file);
            }
            Err(e) => {
                assert!(!expect_ok);
                assert!(e.to_string().contains("Command Line Limit Exceeded"));
            }
        }
    }

    #[test]
    fn test_response_file_never_short() {
        //    Mode                            LongArgs  Success  UseResponseFile
        check(ArgsResponseFileMode::Never,    false,    true,    false);
    }

    #[test]
    fn test_response_file_never_long() {
        check(ArgsResponseFileMode::Never,    true,     false,   false);
    }

    #[test]
    fn test_response_file_if_needed_short() {
        check(ArgsResponseFileMode::IfNeeded, false,    true,    false);
    }

    #[test]
    fn test_response_file_if_needed_long() {
        check(ArgsResponseFileMode::IfNeeded, true,     true,    true);
    }

    #[test]
    fn test_response_file_always_short() {
        check(ArgsResponseFileMode::Always,   false,    true,    true);
    }

    #[test]
    fn test_response_file_always_long() {
        check(ArgsResponseFileMode::Always,   true,     true,    true);
    }

    #[test]
    fn test_response_file_threshold() {
        // The largest inline command is exactly limit - exe - 3 bytes of args;
        // one byte more redirects through a response file
        for &(extra, expect_response_file) in &[(0, false), (1, true)] {
            let mut args = Args::new();
            args.disable_response_file_write();
            args.append(&"a".repeat(TEST_LIMIT - EXE_NAME.len() - 3 + extra));
            args.finalize_with_limit(EXE_NAME, NODE_NAME,
                                     ArgsResponseFileMode::IfNeeded,
                                     Some(TEST_LIMIT)).unwrap();
            assert_eq!(args.get_final_args().starts_with('@'), expect_response_file);
        }
    }

    #[test]
    fn test_limit_error_details() {
        let mut args = Args::new();
        args.disable_response_file_write();
        args.append(&"a".repeat(40000));
        let err = args.finalize_with_limit(EXE_NAME, NODE_NAME,
                                           ArgsResponseFileMode::Never,
                                           Some(TEST_LIMIT)).unwrap_err();
        assert_eq!(err.to_string(),
                   "FBuild: Error: Command Line Limit Exceeded (len: 40000, limit: 32767) 'NodeName'");
    }

    #[test]
    fn test_no_limit_always_fits_inline() {
        let mut args = Args::new();
        args.disable_response_file_write();
        args.append(&"a".repeat(1024 * 1024));
        args.finalize_with_limit(EXE_NAME, NODE_NAME,
                                 ArgsResponseFileMode::Never, None).unwrap();
        assert_eq!(args.get_final_args().len(), 1024 * 1024);
    }

    #[test]
    fn test_delimiters_rewritten_to_newlines() {
        let mut args = Args::new();
        for _ in 0..4 {
            args.append("abc");
            args.add_delimiter();
        }
        let len_before = args.get_raw_args().len();
        args.convert_delimiters_to_newlines();
        assert_eq!(args.get_raw_args(), "abc\nabc\nabc\nabc\n");
        assert_eq!(args.get_raw_args().len(), len_before);
        assert!(!args.get_raw_args().contains(' '));
    }

    #[cfg(windows)]
    #[test]
    fn test_long_response_file_uses_newlines() {
        let mut args = Args::new();
        args.disable_response_file_write();
        // Past the per-line limit, so delimiters become newlines
        for _ in 0..5 * 1024 {
            args.append(&"a".repeat(31));
            args.add_delimiter();
        }
        args.finalize_with_limit(EXE_NAME, NODE_NAME,
                                 ArgsResponseFileMode::Always,
                                 Some(TEST_LIMIT)).unwrap();
        assert!(args.get_raw_args().contains('\n'));
        assert!(!args.get_raw_args().contains(' '));
    }

    #[test]
    fn test_response_file_written_and_cleaned_up() {
        use std::fs;
        use std::path::PathBuf;

        let path: PathBuf;
        {
            let mut args = Args::new();
            args.append("one");
            args.add_delimiter();
            args.append("two");
            args.finalize_with_limit(EXE_NAME, NODE_NAME,
                                     ArgsResponseFileMode::Always,
                                     Some(TEST_LIMIT)).unwrap();

            let final_args = args.get_final_args().to_owned();
            assert!(final_args.starts_with("@\""));
            assert!(final_args.ends_with('"'));
            path = PathBuf::from(&final_args[2..final_args.len() - 1]);
            assert_eq!(fs::read_to_string(&path).unwrap(), "one two");
        }

        // Dropping the Args releases the response file
        assert!(!path.exists());
    }

    #[test]
    fn test_clear_resets_buffer_and_delimiters() {
        let mut args = Args::new();
        args.append("abc");
        args.add_delimiter();
        args.clear();
        assert_eq!(args.get_raw_args(), "");
        args.append("xyz");
        args.add_delimiter();
        args.convert_delimiters_to_newlines(); // would panic on a stale index
        assert_eq!(args.get_raw_args(), "xyz\n");
    }

    #[test]
    #[should_panic]
    fn test_append_after_finalize_panics() {
        let mut args = Args::new();
        args.append("short");
        args.finalize_with_limit(EXE_NAME, NODE_NAME,
                                 ArgsResponseFileMode::Never,
                                 Some(TEST_LIMIT)).unwrap();
        args.append("more");
    }

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_quotes(""), "");
        assert_eq!(strip_quotes("\"\""), "");
        assert_eq!(strip_quotes("\""), "");
        assert_eq!(strip_quotes("plain"), "plain");
        assert_eq!(strip_quotes("\"quoted\""), "quoted");
        assert_eq!(strip_quotes("'quoted'"), "quoted");
        assert_eq!(strip_quotes("\"-o\""), "-o");
        // Only one pair comes off
        assert_eq!(strip_quotes("\"\"-o\"\""), "\"-o\"");
    }
}
