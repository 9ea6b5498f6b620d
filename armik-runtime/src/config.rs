use std::{fmt, path::Path};

use serde::Deserialize;

use crate::core::{ArmGeometry, InverseKinematics, JointOffset};
use crate::workspace::Bounds;

/// Configuration error.
#[derive(Debug)]
pub enum Error {
    /// The configuration file could not be read.
    Io(std::io::Error),
    /// The configuration file is not valid TOML.
    Parse(toml::de::Error),
    /// The configuration describes an impossible arm.
    Invalid(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "cannot read configuration: {}", e),
            Error::Parse(e) => write!(f, "cannot parse configuration: {}", e),
            Error::Invalid(reason) => write!(f, "invalid configuration: {}", reason),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Parse(e) => Some(e),
            Error::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::Io(value)
    }
}

impl From<toml::de::Error> for Error {
    fn from(value: toml::de::Error) -> Self {
        Error::Parse(value)
    }
}

/// Gripper servo angles.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GripperConfig {
    /// Servo angles when the gripper is open.
    pub open: (u8, u8),
    /// Servo angles when the gripper is closed.
    pub closed: (u8, u8),
}

impl Default for GripperConfig {
    fn default() -> Self {
        Self {
            open: (90, 90),
            closed: (0, 180),
        }
    }
}

/// Manual control settings.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct JogConfig {
    /// Home position.
    pub home: [f64; 3],
    /// Distance moved per jog step.
    pub step: f64,
}

impl Default for JogConfig {
    fn default() -> Self {
        Self {
            home: [0.0, 150.0, 50.0],
            step: 1.0,
        }
    }
}

/// Workspace sampler settings.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Grid spacing.
    pub step: u32,
    /// Distance sampled beyond the reach of the arm.
    pub margin: u32,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            step: 10,
            margin: 10,
        }
    }
}

/// Armik configuration.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Arm dimensions.
    pub geometry: ArmGeometry,
    /// Servo zero position offset.
    pub offset: JointOffset,
    /// Workspace bounds for generated targets.
    pub bounds: Bounds,
    /// Gripper servo angles.
    pub gripper: GripperConfig,
    /// Manual control.
    pub jog: JogConfig,
    /// Workspace sampler.
    pub sampler: SamplerConfig,
}

impl Config {
    /// Read the configuration from the first existing file.
    ///
    /// Falls back to the default configuration if none of the files exist.
    pub fn try_from_file<P: AsRef<Path>>(paths: Vec<P>) -> Result<Self, Error> {
        for path in paths {
            let path = path.as_ref();
            if !path.exists() {
                log::trace!("Configuration {} does not exist", path.display());
                continue;
            }

            log::debug!("Reading configuration from {}", path.display());

            let contents = std::fs::read_to_string(path)?;
            return contents.parse();
        }

        log::debug!("No configuration file found, using defaults");

        Ok(Self::default())
    }

    /// Check the configuration describes a physical arm.
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.geometry.segment1 > 0.0 && self.geometry.segment2 > 0.0) {
            return Err(Error::Invalid(
                "segment lengths must be positive".to_string(),
            ));
        }
        if !self.geometry.base_height.is_finite() {
            return Err(Error::Invalid("base height must be finite".to_string()));
        }
        if !self.bounds.is_valid() {
            return Err(Error::Invalid("bounds are inverted".to_string()));
        }
        if !(self.jog.step > 0.0) {
            return Err(Error::Invalid("jog step must be positive".to_string()));
        }
        if self.sampler.step == 0 {
            return Err(Error::Invalid("sampler step must be positive".to_string()));
        }

        Ok(())
    }

    /// Construct the solver for this arm.
    pub fn solver(&self) -> InverseKinematics {
        InverseKinematics::new(self.geometry, self.offset)
    }
}

impl std::str::FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;

        Ok(config)
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}; offset shoulder: {:.1}°, elbow: {:.1}°",
            self.geometry, self.offset.shoulder, self.offset.elbow
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = Config::default();

        assert_eq!(config.geometry, ArmGeometry::new(50.0, 110.0, 71.0));
        assert_eq!(config.offset, JointOffset::uniform(60.0));
        assert_eq!(config.gripper.closed, (0, 180));
        assert_eq!(config.jog.home, [0.0, 150.0, 50.0]);
        assert_eq!(config.sampler.step, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_sections() {
        let config: Config = r#"
            [geometry]
            segment2 = 80.0

            [offset]
            elbow = 45.0
        "#
        .parse()
        .unwrap();

        assert_eq!(config.geometry, ArmGeometry::new(50.0, 110.0, 80.0));
        assert_eq!(config.offset, JointOffset::new(60.0, 45.0));
        assert_eq!(config.bounds, Bounds::default());
    }

    #[test]
    fn test_full() {
        let config: Config = r#"
            [geometry]
            base_height = 40.0
            segment1 = 100.0
            segment2 = 60.0

            [bounds]
            x = [-100.0, 100.0]
            y = [0.0, 150.0]
            z = [0.0, 100.0]

            [gripper]
            open = [80, 100]
            closed = [10, 170]

            [jog]
            home = [0.0, 120.0, 40.0]
            step = 2.5

            [sampler]
            step = 5
            margin = 0
        "#
        .parse()
        .unwrap();

        assert_eq!(config.geometry.max_reach(), 160.0);
        assert_eq!(config.bounds.x, (-100.0, 100.0));
        assert_eq!(config.gripper.open, (80, 100));
        assert_eq!(config.jog.step, 2.5);
        assert_eq!(config.sampler.margin, 0);
    }

    #[test]
    fn test_invalid_geometry() {
        let result = "[geometry]\nsegment1 = 0.0\n".parse::<Config>();

        assert!(matches!(result, Err(Error::Invalid(_))));
    }

    #[test]
    fn test_invalid_toml() {
        let result = "[geometry\n".parse::<Config>();

        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_missing_files() {
        let config = Config::try_from_file(vec!["/nonexistent/armik.toml"]).unwrap();

        assert_eq!(config, Config::default());
    }
}
