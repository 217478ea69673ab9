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

//! The per-compiler command-line drivers.
//!
//! One driver variant exists per compiler flavor; all share the rule-hook
//! protocol of [`CompilerDriver`](driver/trait.CompilerDriver.html) and are
//! driven over a token stream by
//! [`build_full_args`](driver/fn.build_full_args.html).

pub mod driver;

mod clang_tidy;
mod codewarrior_wii;
mod cuda;
mod gcc;
mod greenhills_wiiu;
mod msvc;
#[cfg(test)]
pub mod mock;
mod orbis_psslc;
mod qt_rcc;
mod snc;
mod vbcc;

pub use self::clang_tidy::ClangTidy;
pub use self::codewarrior_wii::CodeWarriorWii;
pub use self::cuda::Cuda;
pub use self::driver::{build_full_args, CompilerDriver, DriverState, Pass};
pub use self::gcc::GccClang;
pub use self::greenhills_wiiu::GreenHillsWiiU;
pub use self::msvc::Msvc;
pub use self::orbis_psslc::OrbisWavePsslc;
pub use self::qt_rcc::QtRcc;
pub use self::snc::Snc;
pub use self::vbcc::Vbcc;

/// Capability bits exposed by the compiler a node is configured with.
///
/// Each bit opts in to a backward-incompatible rewriting rule that older
/// compiler versions can't handle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompilerCaps {
    /// Preprocess with `-frewrite-includes` (clang).
    pub clang_rewrite_includes_enabled: bool,
    /// Rewrite `-x <language>` to its `cpp-output` variant when compiling
    /// preprocessed source (clang/GCC).
    pub clang_gcc_update_x_language_arg_enabled: bool,
}

/// The build-graph node a compile command is being prepared for.
///
/// The driver never owns the node; it reads the source-file name, the output
/// name and the capability bits, nothing else.
pub trait ObjectNode {
    /// The input source file.
    fn source_file_name(&self) -> &str;
    /// The output file (the node's name in the build graph).
    fn name(&self) -> &str;
    /// Whether this compile creates a precompiled header.
    fn is_creating_pch(&self) -> bool;
    fn compiler_caps(&self) -> CompilerCaps;
}

/// Supported compiler flavors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompilerKind {
    /// Microsoft Visual C++
    Msvc,
    /// clang in CL compatibility mode
    ClangCl,
    /// GCC
    Gcc,
    /// clang
    Clang,
    /// clang-tidy
    ClangTidy,
    /// NVIDIA CUDA (nvcc)
    Cuda,
    /// CodeWarrior (Wii)
    CodeWarriorWii,
    /// Green Hills (WiiU)
    GreenHillsWiiU,
    /// Orbis Wave PSSL shader compiler
    OrbisWavePsslc,
    /// Qt resource compiler (rcc)
    QtRcc,
    /// SN Systems compiler
    Snc,
    /// vbcc
    Vbcc,
}

/// Create the driver for `kind`, bound to `object_node` for the duration of
/// one compile-command preparation.
pub fn new_driver<'a>(kind: CompilerKind,
                      object_node: &'a ObjectNode,
                      remote_source_root: &str) -> Box<CompilerDriver<'a> + 'a> {
    match kind {
        CompilerKind::Msvc => Box::new(Msvc::new(object_node, remote_source_root, false)),
        CompilerKind::ClangCl => Box::new(Msvc::new(object_node, remote_source_root, true)),
        CompilerKind::Gcc => Box::new(GccClang::new(object_node, remote_source_root, false)),
        CompilerKind::Clang => Box::new(GccClang::new(object_node, remote_source_root, true)),
        CompilerKind::ClangTidy => Box::new(ClangTidy::new(object_node, remote_source_root)),
        CompilerKind::Cuda => Box::new(Cuda::new(object_node, remote_source_root)),
        CompilerKind::CodeWarriorWii => Box::new(CodeWarriorWii::new(object_node, remote_source_root)),
        CompilerKind::GreenHillsWiiU => Box::new(GreenHillsWiiU::new(object_node, remote_source_root)),
        CompilerKind::OrbisWavePsslc => Box::new(OrbisWavePsslc::new(object_node, remote_source_root)),
        CompilerKind::QtRcc => Box::new(QtRcc::new(object_node, remote_source_root)),
        CompilerKind::Snc => Box::new(Snc::new(object_node, remote_source_root)),
        CompilerKind::Vbcc => Box::new(Vbcc::new(object_node, remote_source_root)),
    }
}
