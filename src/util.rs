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

use std::cmp;

fn is_separator(c: u8) -> bool {
    (c == b'/') || (c == b'\\')
}

/// Compute `path` relative to the directory `base`.
///
/// Paths are compared textually so that Windows-style command lines can be
/// rewritten on any host; `/` and `\` are interchangeable as separators.
/// If the paths share no common prefix the path is returned unchanged.
pub fn get_relative_path(base: &str, path: &str) -> String {
    let base_bytes = base.as_bytes();
    let path_bytes = path.as_bytes();

    // Find the longest common prefix, remembering the position just past the
    // last separator both sides agree on.
    let max = cmp::min(base_bytes.len(), path_bytes.len());
    let mut common = 0;
    let mut last_sep = 0;
    while common < max {
        let a = base_bytes[common];
        let b = path_bytes[common];
        if (a != b) && !(is_separator(a) && is_separator(b)) {
            break;
        }
        common += 1;
        if is_separator(a) {
            last_sep = common;
        }
    }

    // The whole base matched and the path continues into it as a directory
    if common == base_bytes.len() {
        if common == 0 {
            return path.to_owned();
        }
        if is_separator(base_bytes[common - 1]) {
            return path[common..].to_owned();
        }
        if (path_bytes.len() > common) && is_separator(path_bytes[common]) {
            return path[common + 1..].to_owned();
        }
    }

    // No shared root at all
    if last_sep == 0 {
        return path.to_owned();
    }

    // Walk up out of the unmatched base directories, then back down
    let remaining = &base[last_sep..];
    let updirs = remaining
        .split(|c| (c == '/') || (c == '\\'))
        .filter(|component| !component.is_empty())
        .count();
    let mut result = String::new();
    for _ in 0..updirs {
        result.push_str("../");
    }
    result.push_str(&path[last_sep..]);
    result
}
