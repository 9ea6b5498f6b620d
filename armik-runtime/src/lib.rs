// Copyright (C) 2024 Laixer Equipment B.V.
// All rights reserved.
//
// This software may be modified and distributed under the terms
// of the included license.  See the LICENSE file for details.

/// The `armik` library wraps the inverse kinematics solver with the tooling
/// needed to drive an arm.
///
/// The `config` module reads the arm geometry, joint offsets and workspace
/// bounds from a TOML file. The `path` module generates target sequences and
/// sweeps them through the solver. The `program` module loads target programs
/// from JSON. The `jog` module holds the bounded position used for manual
/// control. The `command` module encodes solutions into the servo command
/// line and the `workspace` module samples the reachable workspace.
pub mod command;
pub mod jog;
pub mod path;
pub mod program;
pub mod workspace;

mod config;

pub use self::config::*;

pub use armik_core as core;

/// Armik runtime module containing various constants.
pub mod consts {
    /// Armik runtime version.
    ///
    /// # Example
    ///
    /// ```
    /// use armik::consts::VERSION;
    ///
    /// println!("Armik runtime version: {}", VERSION);
    /// ```
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// System wide configuration file.
    pub const DEFAULT_CONFIG_PATH: &str = "/etc/armik/armik.toml";

    /// Local configuration file name.
    pub const LOCAL_CONFIG_FILE: &str = "armik.toml";

    /// Point used to spot check the workspace sampler.
    ///
    /// Straight above the base, one millimeter beyond the reach of the
    /// default arm.
    pub const SPOT_CHECK_TARGET: [i32; 3] = [0, 182, 0];
}
