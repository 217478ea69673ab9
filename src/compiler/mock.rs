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

use compiler::{CompilerCaps, ObjectNode};

/// An `ObjectNode` for driver tests.
pub struct MockObjectNode {
    pub source_file: String,
    pub node_name: String,
    pub creating_pch: bool,
    pub caps: CompilerCaps,
}

impl MockObjectNode {
    pub fn new(source_file: &str, name: &str) -> MockObjectNode {
        MockObjectNode {
            source_file: source_file.to_owned(),
            node_name: name.to_owned(),
            creating_pch: false,
            caps: CompilerCaps::default(),
        }
    }
}

impl ObjectNode for MockObjectNode {
    fn source_file_name(&self) -> &str {
        &self.source_file
    }

    fn name(&self) -> &str {
        &self.node_name
    }

    fn is_creating_pch(&self) -> bool {
        self.creating_pch
    }

    fn compiler_caps(&self) -> CompilerCaps {
        self.caps
    }
}
