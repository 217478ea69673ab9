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

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use errors::*;

/// An on-disk file holding command-line arguments, referenced from the real
/// command line as `@"<path>"`.
///
/// The file is created at most once (enforced by the owning
/// [`Args`](../args/struct.Args.html)) and deleted when dropped.
pub struct ResponseFile {
    path: PathBuf,
    escape_slashes: bool,
}

impl ResponseFile {
    pub fn new() -> ResponseFile {
        ResponseFile {
            path: PathBuf::new(),
            escape_slashes: false,
        }
    }

    /// Double backslashes when writing, for compilers whose response-file
    /// parsing treats `\` as an escape character.
    pub fn set_escape_slashes(&mut self) {
        self.escape_slashes = true;
    }

    /// Write `args` to a uniquely-named file in the system temp directory.
    pub fn create(&mut self, args: &str) -> Result<()> {
        let dir = env::temp_dir();
        self.create_in(&dir, args)
    }

    fn create_in(&mut self, dir: &Path, args: &str) -> Result<()> {
        let path = dir.join(format!("args.{}.rsp", Uuid::new_v4().simple()));
        trace!("writing response file {:?} ({} bytes)", path, args.len());
        let mut file = File::create(&path)?;
        if self.escape_slashes {
            file.write_all(args.replace('\\', "\\\\").as_bytes())?;
        } else {
            file.write_all(args.as_bytes())?;
        }
        self.path = path;
        Ok(())
    }

    /// The path of the created file; empty until `create` has run.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ResponseFile {
    fn drop(&mut self) {
        if !self.path.as_os_str().is_empty() {
            // Removal failure just leaks a temp file
            let _ = fs::remove_file(&self.path);
        }
    }
}

#[cfg(test)]
mod test {
    use std::fs;
    use std::path::PathBuf;
    use tempdir::TempDir;

    use super::*;

    #[test]
    fn test_create_writes_args() {
        let td = TempDir::new("response_file").unwrap();
        let mut rf = ResponseFile::new();
        rf.create_in(td.path(), "-c foo.cpp -o foo.o").unwrap();
        assert_eq!(fs::read_to_string(rf.path()).unwrap(), "-c foo.cpp -o foo.o");
    }

    #[test]
    fn test_escape_slashes() {
        let td = TempDir::new("response_file").unwrap();
        let mut rf = ResponseFile::new();
        rf.set_escape_slashes();
        rf.create_in(td.path(), "/FoC:\\out\\foo.obj").unwrap();
        assert_eq!(fs::read_to_string(rf.path()).unwrap(), "/FoC:\\\\out\\\\foo.obj");
    }

    #[test]
    fn test_file_removed_on_drop() {
        let td = TempDir::new("response_file").unwrap();
        let path: PathBuf;
        {
            let mut rf = ResponseFile::new();
            rf.create_in(td.path(), "short").unwrap();
            path = rf.path().to_owned();
            assert!(path.exists());
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_unique_paths() {
        let td = TempDir::new("response_file").unwrap();
        let mut a = ResponseFile::new();
        let mut b = ResponseFile::new();
        a.create_in(td.path(), "a").unwrap();
        b.create_in(td.path(), "b").unwrap();
        assert!(a.path() != b.path());
    }
}
